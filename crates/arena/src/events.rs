//! User input while a game is running

use std::io::{BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The user asked to stop
    Quit,
    /// No more input will arrive
    InputClosed,
}

pub trait EventSource {
    /// Next pending event, without blocking.
    fn poll(&mut self) -> Option<UiEvent>;

    /// Wait up to `timeout` for an event.
    fn wait(&mut self, timeout: Duration) -> Option<UiEvent>;
}

/// Reads lines from stdin on a background thread; `q` or `quit` ends the game.
pub struct StdinEvents {
    rx: Receiver<UiEvent>,
}

impl StdinEvents {
    pub fn spawn() -> Self {
        Self::from_reader(BufReader::new(std::io::stdin()))
    }

    /// Watch any line source, e.g. a byte slice in tests.
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else { break };
                if is_quit(&line) && tx.send(UiEvent::Quit).is_err() {
                    break;
                }
            }
            debug!("input closed");
        });
        Self { rx }
    }
}

impl EventSource for StdinEvents {
    fn poll(&mut self) -> Option<UiEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(UiEvent::InputClosed),
        }
    }

    fn wait(&mut self, timeout: Duration) -> Option<UiEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // Keep the pacing even with nothing left to read
                thread::sleep(timeout);
                Some(UiEvent::InputClosed)
            }
        }
    }
}

/// Never produces events; waiting just sleeps.
#[derive(Debug, Default)]
pub struct NoEvents;

impl EventSource for NoEvents {
    fn poll(&mut self) -> Option<UiEvent> {
        None
    }

    fn wait(&mut self, timeout: Duration) -> Option<UiEvent> {
        thread::sleep(timeout);
        None
    }
}

pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit" | "exit")
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
