//! Keeps track of highlights by logging them in a separate window.
//!
//! The plugin hooks the host's `Channel Msg Hilight` and `Channel Action Hilight` text events and
//! prints a formatted copy of every highlight in a dedicated window, by default named
//! `(Highlights)`. The original event is always passed on to the host untouched.

use std::path::PathBuf;

use hilight_plugin::{Host, Info, Registry};

pub mod config;
pub mod consts;
mod error;
pub mod focus;
pub mod highlight;
pub mod template;
pub mod terminal;
pub mod tracing;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::Error;
pub use highlight::Highlight;

/// The name the plugin registers itself with.
pub const PLUGIN_NAME: &str = env!("CARGO_PKG_NAME");

/// The version of the plugin.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the path of the config file in the host's configuration directory, or in the working
/// directory if the host doesn't have one.
pub fn config_path<H: Host>(host: &H) -> PathBuf {
    host.get_info(Info::ConfigDir)
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(consts::CONFIG_FILE_NAME)
}

/// Registers the plugin with a freshly constructed registry and announces it in the host.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the host fails to print.
pub fn load<H: Host>(host: &H, config: &Config) -> Result<Registry<H>, Error> {
    let mut registry = Registry::new();

    registry.register(Highlight::new(config)?);

    host.print(&format!("{PLUGIN_NAME} {VERSION} plugin loaded"))?;

    Ok(registry)
}

/// Plugin entry point: loads the config from the host's configuration directory, sets up logging
/// and registers the plugin.
///
/// # Errors
///
/// Returns an error if the configuration can't be loaded or is invalid.
pub fn init<H: Host>(host: &H) -> Result<Registry<H>, Error> {
    let config = Config::load(config_path(host))?;

    // The host may load the plugin more than once per process
    if let Err(err) = crate::tracing::try_init(&config.tracing) {
        ::tracing::debug!(error = %err, "tracing already initialized");
    }

    load(host, &config)
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use hilight_plugin::{Eat, TextEvent};

    use super::*;
    use crate::testing::{Call, RecordingHost};

    #[test]
    fn load_should_announce_plugin() {
        let host = RecordingHost::default();

        let registry = load(&host, &Config::default()).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(
            host.calls(),
            vec![Call::Print(format!("hilight {VERSION} plugin loaded"))]
        );
    }

    #[test]
    fn load_should_hook_both_highlight_events() {
        let host = RecordingHost::default();

        let registry = load(&host, &Config::default()).unwrap();

        assert_eq!(
            registry.subscriptions(),
            vec![TextEvent::ChannelMsgHilight, TextEvent::ChannelActionHilight]
        );
    }

    #[test]
    fn load_should_fail_on_invalid_config() {
        let host = RecordingHost::default();
        let config = Config {
            window_name: "#highlights".to_string(),
            ..Config::default()
        };

        assert!(load(&host, &config).is_err());
        assert!(host.calls().is_empty());
    }

    #[test]
    fn registry_dispatch_never_eats_highlights() {
        let host = RecordingHost::default();
        let registry = load(&host, &Config::default()).unwrap();

        let eat = registry
            .dispatch(&host, TextEvent::ChannelActionHilight, &["alice", "hi"])
            .unwrap();

        assert_eq!(eat, Eat::None);
    }

    #[test]
    fn config_path_defaults_to_working_directory() {
        let host = RecordingHost::default();

        assert_eq!(config_path(&host), PathBuf::from("hilight.toml"));
    }

    #[test]
    fn init_should_load_config_from_host_config_dir() {
        Jail::expect_with(|jail| {
            let dir = jail.create_dir("xchat2")?;
            let dir = jail.directory().join(dir);

            jail.create_file("xchat2/hilight.toml", r#"window_name = "[mentions]!""#)?;
            // Not the host's config directory
            jail.create_file("hilight.toml", r##"window_name = "#wrong""##)?;

            let host = RecordingHost::default().with_config_dir(&dir.to_string_lossy());
            let registry = init(&host).map_err(|e| e.to_string())?;

            registry
                .dispatch(&host, TextEvent::ChannelMsgHilight, &["alice", "hi"])
                .map_err(|e| e.to_string())?;

            assert_eq!(
                host.commands(),
                vec![
                    "set -quiet tab_new_to_front 0",
                    "query -nofocus [mentions]!",
                    "set -quiet tab_new_to_front 2",
                ]
            );
            assert!(matches!(
                host.calls().last(),
                Some(Call::EmitPrint { context: Some(context), .. }) if context == "[mentions]!"
            ));

            Ok(())
        });
    }
}
