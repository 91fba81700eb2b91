use std::io;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::command;
use crate::decoder::{KeyEvent, KeySource};
use crate::request;
use crate::transport::Transport;

/// The dispatch loop context: target host, transport, and the debounce
/// clock all live here rather than in globals.
pub(crate) struct Bridge<T> {
    transport: T,
    host: String,
    debounce: Option<Duration>,
    last_accepted: Option<Instant>,
}

impl<T: Transport> Bridge<T> {
    pub(crate) fn new(transport: T, host: String, debounce: Option<Duration>) -> Self {
        Self {
            transport,
            host,
            debounce,
            last_accepted: None,
        }
    }

    /// Runs until the decoder stream ends. Network trouble is logged and
    /// the loop moves on to the next press; only decoder errors are fatal.
    pub(crate) fn run<S: KeySource>(&mut self, keys: &mut S) -> io::Result<()> {
        while let Some(event) = keys.next_key()? {
            self.handle(&event);
        }
        info!("decoder stream closed, shutting down");
        Ok(())
    }

    fn handle(&mut self, event: &KeyEvent) {
        let Some(cmd) = command::map(event.text()) else {
            debug!(key = event.text(), "unrecognized key, ignoring");
            return;
        };

        if let (Some(window), Some(last)) = (self.debounce, self.last_accepted) {
            if last.elapsed() < window {
                debug!(?cmd, "within debounce window, ignoring repeat");
                return;
            }
        }
        self.last_accepted = Some(Instant::now());

        info!(?cmd, code = cmd.code(), "button pressed");
        let request = request::build(&self.host, cmd);
        match self.transport.exchange(request.as_bytes()) {
            Ok(response) => {
                info!(
                    response = %String::from_utf8_lossy(&response),
                    "request delivered"
                );
            }
            Err(err) => warn!(error = %err, "request failed, waiting for next key"),
        }
    }
}
