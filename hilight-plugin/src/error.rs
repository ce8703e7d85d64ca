use std::error::Error as StdError;

use thiserror::Error;

use crate::TextEvent;

/// An error that occurred while talking to the host or inside a plugin callback.
#[derive(Error, Debug)]
pub enum Error {
    /// The host rejected or failed to execute a command.
    #[error("Host command `{command}` failed")]
    Command {
        command: String,
        #[source]
        source: Box<dyn StdError + Sync + Send>,
    },
    /// The host could not write to its output.
    #[error("Host I/O error")]
    Io(#[from] std::io::Error),
    /// A text event name was not recognized.
    #[error("Unknown text event: {0:?}")]
    UnknownEvent(String),
    /// A plugin was invoked for a text event it does not handle.
    #[error("Unsupported text event: {0}")]
    UnsupportedEvent(TextEvent),
    /// The text event carried fewer words than required.
    #[error("Malformed {event} event: expected at least {expected} words, got {actual}")]
    MalformedEvent {
        event: TextEvent,
        expected: usize,
        actual: usize,
    },
    /// Plugin-specific error.
    #[error("Plugin error: {0}")]
    Plugin(Box<dyn StdError + Sync + Send>),
}
