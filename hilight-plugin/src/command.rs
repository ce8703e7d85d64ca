//! Typed host commands

use std::fmt;

/// A command issued to the host, rendered in the host's slash-command syntax.
///
/// # Example
///
/// ```rust
/// use hilight_plugin::Command;
///
/// let command = Command::set("tab_new_to_front", 0).quiet();
/// assert_eq!(command.to_string(), "set -quiet tab_new_to_front 0");
///
/// let command = Command::query("(Highlights)").nofocus();
/// assert_eq!(command.to_string(), "query -nofocus (Highlights)");
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// Changes the value of a host setting.
    Set {
        /// The setting name.
        name: String,
        /// The new value.
        value: String,
        /// Don't echo the change in the current window.
        quiet: bool,
    },
    /// Opens a query window, or reuses the existing one.
    Query {
        /// The nickname or window name to open.
        target: String,
        /// Open the window without bringing it to the front.
        nofocus: bool,
    },
}

impl Command {
    #[must_use]
    pub fn set(name: impl Into<String>, value: impl ToString) -> Command {
        Command::Set {
            name: name.into(),
            value: value.to_string(),
            quiet: false,
        }
    }

    #[must_use]
    pub fn query(target: impl Into<String>) -> Command {
        Command::Query {
            target: target.into(),
            nofocus: false,
        }
    }

    /// Suppresses the confirmation of a `set` command. No-op for other commands.
    #[must_use]
    pub fn quiet(mut self) -> Command {
        if let Command::Set { ref mut quiet, .. } = self {
            *quiet = true;
        }

        self
    }

    /// Keeps the focus on the current window. No-op for commands other than `query`.
    #[must_use]
    pub fn nofocus(mut self) -> Command {
        if let Command::Query {
            ref mut nofocus, ..
        } = self
        {
            *nofocus = true;
        }

        self
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Set { name, value, quiet } => {
                f.write_str("set ")?;

                if *quiet {
                    f.write_str("-quiet ")?;
                }

                write!(f, "{name} {value}")
            }
            Command::Query { target, nofocus } => {
                f.write_str("query ")?;

                if *nofocus {
                    f.write_str("-nofocus ")?;
                }

                f.write_str(target)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_without_flags() {
        assert_eq!(
            Command::set("tab_new_to_front", 2).to_string(),
            "set tab_new_to_front 2"
        );
    }

    #[test]
    fn query_without_flags() {
        assert_eq!(Command::query("alice").to_string(), "query alice");
    }

    #[test]
    fn flags_only_apply_to_their_command() {
        assert_eq!(Command::query("alice").quiet(), Command::query("alice"));
        assert_eq!(Command::set("a", 1).nofocus(), Command::set("a", 1));
    }
}
