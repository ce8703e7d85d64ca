use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use crate::Error;

/// A newtype wrapper for plugin metadata strings.
macro_rules! metadata_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Eq, PartialEq, Hash)]
        pub struct $name(&'static str);

        impl $name {
            /// Creates a new instance from a static string.
            #[must_use]
            pub const fn new(value: &'static str) -> Self {
                Self(value)
            }

            /// Returns the inner string value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                self.0
            }
        }

        impl From<&'static str> for $name {
            fn from(value: &'static str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0
            }
        }
    };
}

metadata_type!(Name, "Name of a plugin");
metadata_type!(Author, "Author of a plugin");
metadata_type!(Version, "Version of a plugin");
metadata_type!(Description, "Short description of a plugin");

/// The value a print hook returns to tell the host whether the triggering event should be passed
/// on to the host and to other plugins.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Eat {
    /// Pass the event on to everyone.
    #[default]
    None,
    /// Don't let the host itself see the event.
    Host,
    /// Don't let other plugins see the event.
    Plugin,
    /// Swallow the event completely.
    All,
}

impl Eat {
    /// Returns the bit representation used by the host ABI.
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Eat::None => 0,
            Eat::Host => 1,
            Eat::Plugin => 2,
            Eat::All => 3,
        }
    }

    const fn from_bits(bits: u8) -> Eat {
        match bits & 0b11 {
            0 => Eat::None,
            1 => Eat::Host,
            2 => Eat::Plugin,
            _ => Eat::All,
        }
    }
}

impl BitOr for Eat {
    type Output = Eat;

    fn bitor(self, rhs: Eat) -> Eat {
        Eat::from_bits(self.bits() | rhs.bits())
    }
}

/// Ambient information that can be requested from the host.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Info {
    /// The away reason, if the user is marked as away.
    Away,
    /// The name of the current channel or query.
    Channel,
    /// The hostname of the current server.
    Server,
    /// The user's current nickname.
    Nick,
    /// The name of the current network.
    Network,
    /// The host's configuration directory.
    ConfigDir,
}

impl Info {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Info::Away => "away",
            Info::Channel => "channel",
            Info::Server => "server",
            Info::Nick => "nick",
            Info::Network => "network",
            Info::ConfigDir => "configdir",
        }
    }
}

impl fmt::Display for Info {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text events emitted by the host that plugins can hook and print.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum TextEvent {
    /// A channel message that mentions the user.
    ChannelMsgHilight,
    /// A channel action (`/me`) that mentions the user.
    ChannelActionHilight,
    /// A two-column line without any predefined formatting.
    GenericMessage,
}

impl TextEvent {
    /// Returns the name the host uses for this event.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TextEvent::ChannelMsgHilight => "Channel Msg Hilight",
            TextEvent::ChannelActionHilight => "Channel Action Hilight",
            TextEvent::GenericMessage => "Generic Message",
        }
    }
}

impl fmt::Display for TextEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextEvent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            TextEvent::ChannelMsgHilight,
            TextEvent::ChannelActionHilight,
            TextEvent::GenericMessage,
        ]
        .into_iter()
        .find(|event| event.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| Error::UnknownEvent(s.to_string()))
    }
}
