use std::io::{self, BufRead};

use argh::FromArgs;
use miette::{IntoDiagnostic, WrapErr};
use tracing::{error, trace, warn};

use hilight::Config;
use hilight::terminal::{Line, TerminalHost};

/// Runs the highlight plugin in a terminal host, reading events from stdin.
///
/// Lines are either `/away [reason]`, `/back`, `/join <channel>` or a text event name followed by
/// its words, separated by tabs.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to config file
    #[argh(option, default = "String::from(\"hilight.toml\")")]
    config_path: String,
    /// the server the host pretends to be connected to
    #[argh(option, default = "String::from(\"irc.libera.chat\")")]
    server: String,
    /// the window that is initially in front
    #[argh(option, default = "String::from(\"#hilight\")")]
    channel: String,
    /// the user's nickname
    #[argh(option, default = "String::from(\"me\")")]
    nick: String,
    /// keep IRC formatting codes in the output
    #[argh(switch)]
    raw: bool,
}

fn main() -> miette::Result<()> {
    // Parse command-line arguments
    let opts: Opts = argh::from_env();

    // Load the config file, falling back to defaults for missing values
    let config = Config::load(&opts.config_path)?;

    hilight::tracing::try_init(&config.tracing)?;

    let host =
        TerminalHost::new(io::stdout(), &opts.server, &opts.channel, &opts.nick).raw(opts.raw);
    let registry = hilight::load(&host, &config)?;
    let hooks = registry.subscriptions();

    trace!(?hooks, "hooked text events");

    for line in io::stdin().lock().lines() {
        let line = line.into_diagnostic().wrap_err("could not read from stdin")?;

        let line = match Line::parse(&line) {
            Ok(Some(line)) => line,
            Ok(None) => continue,
            Err(err) => {
                warn!(error = %err, %line, "ignoring input");
                continue;
            }
        };

        let Some((event, words)) = host.apply(line) else {
            continue;
        };

        if !hooks.contains(&event) {
            trace!(%event, "event is not hooked");
            continue;
        }

        if let Err(err) = registry.dispatch(&host, event, &words) {
            error!(error = %err, %event, "print hook failed");
        }
    }

    Ok(())
}
