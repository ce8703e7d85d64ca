use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use irc::proto::ChannelExt;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Error;
use crate::consts;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// The name of the window where highlights are logged
    pub window_name: String,
    /// The value `tab_new_to_front` is restored to after opening the window
    pub tab_new_to_front: u8,
    /// Timestamp format description
    pub time_format: String,
    /// Only log highlights while marked as away
    pub only_away: bool,
    /// Output templates
    pub formats: FormatsConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

/// The templates for each highlight kind.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FormatsConfig {
    /// Templates for `Channel Msg Hilight`
    pub message: TemplatePairConfig,
    /// Templates for `Channel Action Hilight`
    pub action: TemplatePairConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TemplatePairConfig {
    /// Left-hand side of the separator
    pub left: String,
    /// Right-hand side of the separator
    pub right: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Output format of log lines
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window_name: consts::DEFAULT_WINDOW_NAME.to_string(),
            tab_new_to_front: consts::DEFAULT_TAB_NEW_TO_FRONT,
            time_format: consts::DEFAULT_TIME_FORMAT.to_string(),
            only_away: false,
            formats: FormatsConfig::default(),
            tracing: TracingConfig::default(),
        }
    }
}

impl Default for FormatsConfig {
    fn default() -> Self {
        FormatsConfig {
            message: TemplatePairConfig {
                left: consts::DEFAULT_LEFT.to_string(),
                right: consts::DEFAULT_MESSAGE_RIGHT.to_string(),
            },
            action: TemplatePairConfig {
                left: consts::DEFAULT_LEFT.to_string(),
                right: consts::DEFAULT_ACTION_RIGHT.to_string(),
            },
        }
    }
}

impl Config {
    /// Returns the layered configuration sources: built-in defaults, then the TOML file at
    /// `path`, then `HILIGHT_` prefixed environment variables.
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(consts::ENV_PREFIX).split("__"))
    }

    /// Loads and validates the configuration.
    ///
    /// A missing file is not an error; the defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a source can't be read or has the wrong shape, and a
    /// validation error if the window name is unusable.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, Error> {
        let path = path.as_ref();

        trace!(?path, "loading config");

        let config: Config = Self::figment(path).extract()?;

        config.validate()?;

        trace!(?path, "loaded config");

        Ok(config)
    }

    /// Checks that the window name can't collide with a real channel or user.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWindowName`] or [`Error::WindowNameCollision`].
    pub fn validate(&self) -> Result<(), Error> {
        let name = self.window_name.as_str();

        if name.is_empty() {
            return Err(Error::EmptyWindowName);
        }

        let kind = if name.is_channel_name() {
            "channel name"
        } else if is_nickname(name) {
            "nickname"
        } else {
            return Ok(());
        };

        Err(Error::WindowNameCollision {
            name: name.to_string(),
            kind,
        })
    }
}

/// Returns true if `s` is a syntactically valid nickname as per RFC 2812, section 2.3.1.
fn is_nickname(s: &str) -> bool {
    const fn is_special(c: char) -> bool {
        matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
    }

    let mut chars = s.chars();

    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || is_special(c))
        && chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
}
