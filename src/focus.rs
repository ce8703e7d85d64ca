use hilight_plugin::{Command, Error, Host};
use tracing::{trace, warn};

use crate::consts::TAB_NEW_TO_FRONT;

/// Keeps the host from bringing new tabs to the front for as long as the guard is alive.
///
/// Acquiring the guard sets `tab_new_to_front` to `0`; dropping it sets the value back to
/// `restore`, also when the code in between returns early with an error.
#[must_use = "the setting is restored as soon as the guard is dropped"]
pub struct TabFocusGuard<'a, H: Host> {
    host: &'a H,
    restore: u8,
}

impl<'a, H: Host> TabFocusGuard<'a, H> {
    /// Disables focusing of new tabs.
    ///
    /// # Errors
    ///
    /// Returns the host's error if the setting can't be changed, in which case nothing needs to
    /// be restored.
    pub fn acquire(host: &'a H, restore: u8) -> Result<Self, Error> {
        host.command(&Command::set(TAB_NEW_TO_FRONT, 0).quiet())?;

        trace!(%restore, "disabled tab focusing");

        Ok(TabFocusGuard { host, restore })
    }
}

impl<H: Host> Drop for TabFocusGuard<'_, H> {
    fn drop(&mut self) {
        let command = Command::set(TAB_NEW_TO_FRONT, self.restore).quiet();

        if let Err(err) = self.host.command(&command) {
            warn!(%command, error = %err, "could not restore tab focusing");
        }
    }
}
