/// A remote-control action the web service understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Power,
    Stop,
    Pause,
    Play,
    Rewind,
    Forward,
}

impl Command {
    /// Numeric code carried in the `function=` form field.
    pub(crate) fn code(self) -> u8 {
        match self {
            Command::Power => 1,
            Command::Stop => 2,
            Command::Pause => 3,
            Command::Play => 4,
            Command::Rewind => 5,
            Command::Forward => 6,
        }
    }
}

// Checked in order; the first token contained in the decoded line wins.
const KEY_TOKENS: [(&str, Command); 6] = [
    ("KEY_POWER", Command::Power),
    ("KEY_STOP", Command::Stop),
    ("KEY_PAUSE", Command::Pause),
    ("KEY_PLAY", Command::Play),
    ("KEY_REWIND", Command::Rewind),
    ("KEY_FORWARD", Command::Forward),
];

/// Maps a decoded key line to a command, `None` if no known button
/// name appears in it. Matching is containment, not equality, because
/// lircd hands us the whole event line, not just the key name.
pub(crate) fn map(code: &str) -> Option<Command> {
    KEY_TOKENS
        .iter()
        .find(|(token, _)| code.contains(token))
        .map(|&(_, command)| command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("KEY_POWER", Command::Power, 1)]
    #[case("KEY_STOP", Command::Stop, 2)]
    #[case("KEY_PAUSE", Command::Pause, 3)]
    #[case("KEY_PLAY", Command::Play, 4)]
    #[case("KEY_REWIND", Command::Rewind, 5)]
    #[case("KEY_FORWARD", Command::Forward, 6)]
    fn recognized_tokens(#[case] token: &str, #[case] expected: Command, #[case] code: u8) {
        let command = map(token).unwrap();
        assert_eq!(command, expected);
        assert_eq!(command.code(), code);
    }

    #[test]
    fn matches_inside_a_full_lircd_line() {
        assert_eq!(
            map("0000000000f40bf0 00 KEY_PLAY mceusb"),
            Some(Command::Play)
        );
    }

    #[rstest]
    #[case("")]
    #[case("KEY_UNKNOWN_BUTTON")]
    #[case("key_play")]
    #[case("0000000000f40bf0 00 KEY_VOLUMEUP mceusb")]
    fn unrecognized_lines(#[case] line: &str) {
        assert_eq!(map(line), None);
    }

    #[test]
    fn first_listed_token_wins_on_multiple_matches() {
        assert_eq!(map("KEY_PLAY KEY_STOP"), Some(Command::Stop));
    }
}
