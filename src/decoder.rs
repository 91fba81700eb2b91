use std::io::{self, BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::path::Path;

/// One decoded button press, as the line lircd wrote for it
/// (`<scancode> <repeat> <key-name> <remote-name>`).
pub(crate) struct KeyEvent(String);

impl KeyEvent {
    pub(crate) fn text(&self) -> &str {
        &self.0
    }
}

/// Blocking source of decoded key presses.
pub(crate) trait KeySource {
    /// Blocks until the next press. `Ok(None)` means the decoder stream
    /// closed and the program should wind down.
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Yields one trimmed, non-empty line per call from any line stream.
pub(crate) struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> KeySource for LineSource<R> {
    fn next_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return Ok(Some(KeyEvent(trimmed.to_owned())));
        }
    }
}

/// The lircd broadcast socket. lircd owns the remote configuration and the
/// actual IR decoding; we only read the decoded event lines it publishes.
pub(crate) type LircSocket = LineSource<BufReader<UnixStream>>;

impl LircSocket {
    pub(crate) fn connect(path: &Path) -> io::Result<Self> {
        let stream = UnixStream::connect(path)?;
        Ok(LineSource::new(BufReader::new(stream)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn yields_one_event_per_line() {
        let input = "0000000000f40bf0 00 KEY_PLAY mceusb\n\
                     0000000000f40bf1 00 KEY_STOP mceusb\n";
        let mut source = LineSource::new(Cursor::new(input));
        assert_eq!(
            source.next_key().unwrap().unwrap().text(),
            "0000000000f40bf0 00 KEY_PLAY mceusb"
        );
        assert_eq!(
            source.next_key().unwrap().unwrap().text(),
            "0000000000f40bf1 00 KEY_STOP mceusb"
        );
        assert!(source.next_key().unwrap().is_none());
    }

    #[test]
    fn skips_blank_lines_and_trims() {
        let input = "\n\n  0000000000f40bf0 00 KEY_PAUSE mceusb  \n";
        let mut source = LineSource::new(Cursor::new(input));
        assert_eq!(
            source.next_key().unwrap().unwrap().text(),
            "0000000000f40bf0 00 KEY_PAUSE mceusb"
        );
        assert!(source.next_key().unwrap().is_none());
    }

    #[test]
    fn empty_stream_is_end_of_stream() {
        let mut source = LineSource::new(Cursor::new(""));
        assert!(source.next_key().unwrap().is_none());
    }
}
