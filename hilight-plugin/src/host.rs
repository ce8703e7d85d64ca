use std::fmt::Debug;

use time::OffsetDateTime;

use crate::{Command, Error, Info, TextEvent};

/// The capabilities a host client exposes to plugins.
///
/// Hosts dispatch callbacks serially on a single thread, so implementations are free to use
/// interior mutability and are not required to be `Sync`.
pub trait Host {
    /// A handle identifying a window, channel or query in the host.
    type Context: Clone + Debug;

    /// Returns ambient information, or `None` if the host has no value for it (e.g. `away` when
    /// the user is present).
    fn get_info(&self, info: Info) -> Option<String>;

    /// Executes a command as if it was typed into the current window.
    fn command(&self, command: &Command) -> Result<(), Error>;

    /// Finds the context of the window named `channel` on `server`, or on any server if `server`
    /// is `None`.
    fn find_context(&self, server: Option<&str>, channel: &str) -> Option<Self::Context>;

    /// Prints a text event in the current context.
    fn emit_print(&self, event: TextEvent, args: &[&str]) -> Result<(), Error>;

    /// Prints a text event in the given context.
    fn emit_print_in(
        &self,
        context: &Self::Context,
        event: TextEvent,
        args: &[&str],
    ) -> Result<(), Error>;

    /// Prints a line of text in the current context.
    fn print(&self, text: &str) -> Result<(), Error>;

    /// Returns the current wall-clock time.
    ///
    /// Defaults to the local time, falling back to UTC when the local offset can't be determined.
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}
