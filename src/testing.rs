use std::cell::RefCell;

use hilight_plugin::{Command, Error, Host, Info, TextEvent};
use time::OffsetDateTime;
use time::macros::datetime;

/// A host call recorded by [`RecordingHost`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Call {
    Command(String),
    EmitPrint {
        context: Option<String>,
        event: TextEvent,
        args: Vec<String>,
    },
    Print(String),
}

/// A host that records every call made to it.
pub struct RecordingHost {
    away: Option<String>,
    channel: Option<String>,
    server: Option<String>,
    config_dir: Option<String>,
    now: OffsetDateTime,
    creates_windows: bool,
    failing_query: bool,
    windows: RefCell<Vec<String>>,
    calls: RefCell<Vec<Call>>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        RecordingHost {
            away: None,
            channel: Some("#chan".to_string()),
            server: Some("irc.example.net".to_string()),
            config_dir: None,
            now: datetime!(2024-01-01 12:00:00 UTC),
            creates_windows: true,
            failing_query: false,
            windows: RefCell::default(),
            calls: RefCell::default(),
        }
    }
}

impl RecordingHost {
    pub fn with_away(mut self, reason: &str) -> Self {
        self.away = Some(reason.to_string());
        self
    }

    pub fn with_channel(mut self, channel: &str) -> Self {
        self.channel = Some(channel.to_string());
        self
    }

    /// Report no current channel.
    pub fn without_channel(mut self) -> Self {
        self.channel = None;
        self
    }

    pub fn with_config_dir(mut self, dir: &str) -> Self {
        self.config_dir = Some(dir.to_string());
        self
    }

    pub fn with_now(mut self, now: OffsetDateTime) -> Self {
        self.now = now;
        self
    }

    /// Accept `query` commands without ever opening a window.
    pub fn without_window(mut self) -> Self {
        self.creates_windows = false;
        self
    }

    /// Fail every `query` command.
    pub fn failing_query(mut self) -> Self {
        self.failing_query = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::Command(command) => Some(command.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Host for RecordingHost {
    type Context = String;

    fn get_info(&self, info: Info) -> Option<String> {
        match info {
            Info::Away => self.away.clone(),
            Info::Channel => self.channel.clone(),
            Info::Server => self.server.clone(),
            Info::Nick => Some("me".to_string()),
            Info::ConfigDir => self.config_dir.clone(),
            Info::Network => None,
        }
    }

    fn command(&self, command: &Command) -> Result<(), Error> {
        self.record(Call::Command(command.to_string()));

        if let Command::Query { target, .. } = command {
            if self.failing_query {
                return Err(Error::Command {
                    command: command.to_string(),
                    source: "query failed".into(),
                });
            }

            if self.creates_windows {
                self.windows.borrow_mut().push(target.clone());
            }
        }

        Ok(())
    }

    fn find_context(&self, server: Option<&str>, channel: &str) -> Option<String> {
        if server.is_some() && server != self.server.as_deref() {
            return None;
        }

        self.windows
            .borrow()
            .iter()
            .find(|window| window.as_str() == channel)
            .cloned()
    }

    fn emit_print(&self, event: TextEvent, args: &[&str]) -> Result<(), Error> {
        self.record(Call::EmitPrint {
            context: None,
            event,
            args: args.iter().map(ToString::to_string).collect(),
        });

        Ok(())
    }

    fn emit_print_in(
        &self,
        context: &String,
        event: TextEvent,
        args: &[&str],
    ) -> Result<(), Error> {
        self.record(Call::EmitPrint {
            context: Some(context.clone()),
            event,
            args: args.iter().map(ToString::to_string).collect(),
        });

        Ok(())
    }

    fn print(&self, text: &str) -> Result<(), Error> {
        self.record(Call::Print(text.to_string()));

        Ok(())
    }

    fn now(&self) -> OffsetDateTime {
        self.now
    }
}
