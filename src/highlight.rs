//! Logs highlights in a separate window.
use std::fmt;

use hilight_plugin::{
    Author, Command, Description, Eat, Error as PluginError, Host, Info, Name, Plugin, TextEvent,
    Version,
};
use time::format_description::OwnedFormatItem;
use tracing::{debug, trace, warn};

use crate::Error;
use crate::config::{Config, FormatsConfig, TemplatePairConfig};
use crate::consts::CONTEXT_NOT_FOUND;
use crate::focus::TabFocusGuard;
use crate::template::{Fields, Template, TemplatePair};
use crate::{PLUGIN_NAME, VERSION};

/// The text events the plugin hooks.
const SUBSCRIPTIONS: [TextEvent; 2] = [
    TextEvent::ChannelMsgHilight,
    TextEvent::ChannelActionHilight,
];

/// The kind of highlight, derived from the hooked text event.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HighlightKind {
    /// A channel message mentioning the user.
    Message,
    /// A channel action mentioning the user.
    Action,
}

impl HighlightKind {
    /// Returns the text event this kind is hooked on.
    #[must_use]
    pub const fn event(self) -> TextEvent {
        match self {
            HighlightKind::Message => TextEvent::ChannelMsgHilight,
            HighlightKind::Action => TextEvent::ChannelActionHilight,
        }
    }
}

impl TryFrom<TextEvent> for HighlightKind {
    type Error = PluginError;

    fn try_from(event: TextEvent) -> Result<Self, Self::Error> {
        match event {
            TextEvent::ChannelMsgHilight => Ok(HighlightKind::Message),
            TextEvent::ChannelActionHilight => Ok(HighlightKind::Action),
            event => Err(PluginError::UnsupportedEvent(event)),
        }
    }
}

impl fmt::Display for HighlightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightKind::Message => f.write_str("message"),
            HighlightKind::Action => f.write_str("action"),
        }
    }
}

/// The template pair for each highlight kind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FormatTable {
    message: TemplatePair,
    action: TemplatePair,
}

impl FormatTable {
    /// Parses the configured templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] naming the first template that fails to parse.
    pub fn from_config(config: &FormatsConfig) -> Result<FormatTable, Error> {
        Ok(FormatTable {
            message: parse_pair("formats.message", &config.message)?,
            action: parse_pair("formats.action", &config.action)?,
        })
    }

    #[must_use]
    pub const fn get(&self, kind: HighlightKind) -> &TemplatePair {
        match kind {
            HighlightKind::Message => &self.message,
            HighlightKind::Action => &self.action,
        }
    }
}

fn parse_pair(name: &str, config: &TemplatePairConfig) -> Result<TemplatePair, Error> {
    let parse = |side: &str, source: &str| -> Result<Template, Error> {
        let name = format!("{name}.{side}");
        let template = Template::parse(source).map_err(|source| Error::Template {
            name: name.clone(),
            source,
        })?;

        trace!(
            %name,
            %template,
            fields = ?template.fields().collect::<Vec<_>>(),
            "parsed template"
        );

        Ok(template)
    };

    Ok(TemplatePair {
        left: parse("left", &config.left)?,
        right: parse("right", &config.right)?,
    })
}

/// Re-emits highlights into a dedicated window.
pub struct Highlight {
    /// The name of the window highlights are printed in
    window_name: String,
    /// The value `tab_new_to_front` is restored to
    tab_new_to_front: u8,
    /// Timestamp format
    time_format: OwnedFormatItem,
    /// Only log while away
    only_away: bool,
    /// Output templates
    formats: FormatTable,
}

impl Highlight {
    /// Builds the plugin from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the window name is unusable, the time format is invalid or a template
    /// fails to parse.
    pub fn new(config: &Config) -> Result<Highlight, Error> {
        config.validate()?;

        let time_format =
            time::format_description::parse_owned::<2>(&config.time_format).map_err(|source| {
                Error::TimeFormat {
                    format: config.time_format.clone(),
                    source,
                }
            })?;

        Ok(Highlight {
            window_name: config.window_name.clone(),
            tab_new_to_front: config.tab_new_to_front,
            time_format,
            only_away: config.only_away,
            formats: FormatTable::from_config(&config.formats)?,
        })
    }

    /// Formats the highlight and prints it in the highlight window.
    fn log<H: Host>(
        &self,
        host: &H,
        kind: HighlightKind,
        words: &[&str],
    ) -> Result<Eat, PluginError> {
        if self.only_away && host.get_info(Info::Away).is_none() {
            trace!(%kind, "not away, skipping highlight");

            return Ok(Eat::None);
        }

        let (nick, text, mode) = match *words {
            [nick, text] => (nick, text, ""),
            [nick, text, mode, ..] => (nick, text, mode),
            _ => {
                return Err(PluginError::MalformedEvent {
                    event: kind.event(),
                    expected: 2,
                    actual: words.len(),
                });
            }
        };

        let channel = host.get_info(Info::Channel).unwrap_or_default();
        // Used to find the context of the highlight window on the same server
        let server = host.get_info(Info::Server);
        let time = host
            .now()
            .format(&self.time_format)
            .map_err(|err| PluginError::Plugin(Box::new(err)))?;

        let fields = Fields {
            channel: &channel,
            time: &time,
            mode,
            nick,
            text,
        };
        let (left, right) = self.formats.get(kind).render(&fields);

        debug!(%kind, %nick, %channel, "logging highlight");

        self.open_window(host)?;

        match host.find_context(server.as_deref(), &self.window_name) {
            Some(context) => {
                host.emit_print_in(
                    &context,
                    TextEvent::GenericMessage,
                    &[left.as_str(), right.as_str()],
                )?;
            }
            None => {
                warn!(window = %self.window_name, ?server, "could not find highlight window");

                host.emit_print(TextEvent::GenericMessage, &[PLUGIN_NAME, CONTEXT_NOT_FOUND])?;
            }
        }

        Ok(Eat::None)
    }

    /// Opens the highlight window, if it isn't already, without bringing it to the front.
    fn open_window<H: Host>(&self, host: &H) -> Result<(), PluginError> {
        let _focus = TabFocusGuard::acquire(host, self.tab_new_to_front)?;

        host.command(&Command::query(&self.window_name).nofocus())
    }
}

impl<H: Host> Plugin<H> for Highlight {
    fn name() -> Name {
        Name::new(PLUGIN_NAME)
    }

    fn author() -> Author {
        Author::new("Mikkel Kroman <mk@maero.dk>")
    }

    fn version() -> Version {
        Version::new(VERSION)
    }

    fn description() -> Description {
        Description::new(env!("CARGO_PKG_DESCRIPTION"))
    }

    fn subscriptions(&self) -> &[TextEvent] {
        &SUBSCRIPTIONS
    }

    fn handle_print(
        &self,
        host: &H,
        event: TextEvent,
        words: &[&str],
    ) -> Result<Eat, PluginError> {
        let kind = HighlightKind::try_from(event)?;

        self.log(host, kind, words)
    }
}
