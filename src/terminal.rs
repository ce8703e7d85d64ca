//! A host that runs in a terminal.
//!
//! Windows only exist as names, and everything printed into them is written to a single output
//! stream prefixed with the window name.
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::io::Write;
use std::iter::Peekable;
use std::str::Chars;

use hilight_plugin::{Command, Error, Host, Info, TextEvent};
use irc::proto::FormattedStringExt;
use tracing::debug;

use crate::consts::TAB_NEW_TO_FRONT;

/// A line of input to the terminal host.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Line<'a> {
    /// `/away [reason]`
    Away(Option<&'a str>),
    /// `/back`
    Back,
    /// `/join <channel>`
    Join(&'a str),
    /// `<text event>\t<word>\t<word>...`
    Event {
        event: TextEvent,
        words: Vec<&'a str>,
    },
}

impl<'a> Line<'a> {
    /// Parses a line of input. Blank lines are `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownEvent`] if the line is neither a command nor starts with a known
    /// text event name.
    pub fn parse(line: &'a str) -> Result<Option<Line<'a>>, Error> {
        let line = line.trim_end_matches(['\r', '\n']);

        if line.trim().is_empty() {
            return Ok(None);
        }

        if let Some(command) = line.strip_prefix('/') {
            let (name, args) = command
                .split_once(' ')
                .map_or((command, ""), |(name, args)| (name, args.trim()));

            match name {
                "away" => return Ok(Some(Line::Away((!args.is_empty()).then_some(args)))),
                "back" => return Ok(Some(Line::Back)),
                "join" if !args.is_empty() => return Ok(Some(Line::Join(args))),
                _ => {}
            }
        }

        let mut fields = line.split('\t');
        let event = fields.next().unwrap_or_default().parse()?;

        Ok(Some(Line::Event {
            event,
            words: fields.collect(),
        }))
    }
}

#[derive(Debug)]
struct State {
    server: String,
    channel: String,
    nick: String,
    away: Option<String>,
    settings: HashMap<String, String>,
    windows: BTreeSet<String>,
}

/// A host writing every printed line to `W`.
pub struct TerminalHost<W: Write> {
    state: RefCell<State>,
    out: RefCell<W>,
    /// Keep IRC formatting codes in the output
    raw: bool,
}

impl<W: Write> TerminalHost<W> {
    /// Creates a host connected to `server` with `channel` as the current window.
    pub fn new(out: W, server: &str, channel: &str, nick: &str) -> Self {
        let state = State {
            server: server.to_string(),
            channel: channel.to_string(),
            nick: nick.to_string(),
            away: None,
            settings: HashMap::new(),
            windows: BTreeSet::from([channel.to_string()]),
        };

        TerminalHost {
            state: RefCell::new(state),
            out: RefCell::new(out),
            raw: false,
        }
    }

    /// Keeps IRC formatting codes in the output instead of stripping them.
    #[must_use]
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// Applies a command line to the host state. Returns the line back if it is a text event.
    pub fn apply<'a>(&self, line: Line<'a>) -> Option<(TextEvent, Vec<&'a str>)> {
        let mut state = self.state.borrow_mut();

        match line {
            Line::Away(reason) => {
                state.away = Some(reason.unwrap_or("away").to_string());
            }
            Line::Back => state.away = None,
            Line::Join(channel) => {
                state.windows.insert(channel.to_string());
                state.channel = channel.to_string();
            }
            Line::Event { event, words } => return Some((event, words)),
        }

        debug!(?state, "host state changed");

        None
    }

    /// Returns the name of the current window.
    pub fn current_window(&self) -> String {
        self.state.borrow().channel.clone()
    }

    #[cfg(test)]
    pub fn setting(&self, name: &str) -> Option<String> {
        self.state.borrow().settings.get(name).cloned()
    }

    pub fn into_writer(self) -> W {
        self.out.into_inner()
    }

    fn write_line(&self, window: &str, columns: &[&str]) -> Result<(), Error> {
        let line = columns.join("\t");
        let line = if self.raw {
            line
        } else {
            strip_colors(&line).as_str().strip_formatting().into_owned()
        };

        writeln!(self.out.borrow_mut(), "[{window}] {line}")?;

        Ok(())
    }
}

/// Removes mIRC colour codes: `\x03` followed by up to two digits of foreground colour and an
/// optional comma with up to two digits of background colour.
fn strip_colors(s: &str) -> String {
    fn skip_digits(chars: &mut Peekable<Chars<'_>>) -> usize {
        let mut n = 0;

        while n < 2 && chars.next_if(char::is_ascii_digit).is_some() {
            n += 1;
        }

        n
    }

    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x03' {
            buf.push(c);
            continue;
        }

        if skip_digits(&mut chars) == 0 {
            continue;
        }

        // Only a comma followed by a digit belongs to the colour code
        let mut lookahead = chars.clone();

        if lookahead.next() == Some(',') && lookahead.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
            skip_digits(&mut chars);
        }
    }

    buf
}

impl<W: Write> Host for TerminalHost<W> {
    type Context = String;

    fn get_info(&self, info: Info) -> Option<String> {
        let state = self.state.borrow();

        match info {
            Info::Away => state.away.clone(),
            Info::Channel => Some(state.channel.clone()),
            Info::Server | Info::Network => Some(state.server.clone()),
            Info::Nick => Some(state.nick.clone()),
            Info::ConfigDir => None,
        }
    }

    fn command(&self, command: &Command) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();

        match command {
            Command::Set { name, value, .. } => {
                state.settings.insert(name.clone(), value.clone());
            }
            Command::Query { target, nofocus } => {
                let created = state.windows.insert(target.clone());
                let to_front = state
                    .settings
                    .get(TAB_NEW_TO_FRONT)
                    .is_none_or(|value| value != "0");

                if !*nofocus || (created && to_front) {
                    state.channel = target.clone();
                }

                debug!(%target, created, current = %state.channel, "query");
            }
        }

        Ok(())
    }

    fn find_context(&self, server: Option<&str>, channel: &str) -> Option<String> {
        let state = self.state.borrow();

        if server.is_some_and(|server| server != state.server) {
            return None;
        }

        state.windows.get(channel).cloned()
    }

    fn emit_print(&self, event: TextEvent, args: &[&str]) -> Result<(), Error> {
        let window = self.current_window();

        self.emit_print_in(&window, event, args)
    }

    fn emit_print_in(
        &self,
        context: &String,
        _event: TextEvent,
        args: &[&str],
    ) -> Result<(), Error> {
        self.write_line(context, args)
    }

    fn print(&self, text: &str) -> Result<(), Error> {
        let window = self.current_window();

        self.write_line(&window, &[text])
    }
}

#[cfg(test)]
mod tests {
    use hilight_plugin::Eat;
    use rstest::rstest;

    use super::*;
    use crate::Config;

    fn host() -> TerminalHost<Vec<u8>> {
        TerminalHost::new(Vec::new(), "irc.example.net", "#chan", "me")
    }

    fn output(host: TerminalHost<Vec<u8>>) -> String {
        String::from_utf8(host.into_writer()).unwrap()
    }

    #[test]
    fn it_should_parse_commands() {
        assert_eq!(Line::parse("/away lunch").unwrap(), Some(Line::Away(Some("lunch"))));
        assert_eq!(Line::parse("/away").unwrap(), Some(Line::Away(None)));
        assert_eq!(Line::parse("/back").unwrap(), Some(Line::Back));
        assert_eq!(Line::parse("/join #rust").unwrap(), Some(Line::Join("#rust")));
        assert_eq!(Line::parse("   ").unwrap(), None);
    }

    #[test]
    fn it_should_parse_events() {
        assert_eq!(
            Line::parse("Channel Msg Hilight\talice\thello world\t@\n").unwrap(),
            Some(Line::Event {
                event: TextEvent::ChannelMsgHilight,
                words: vec!["alice", "hello world", "@"],
            })
        );
    }

    #[test]
    fn it_should_reject_unknown_events() {
        assert!(matches!(
            Line::parse("Channel Message\talice\thi"),
            Err(Error::UnknownEvent(_))
        ));
    }

    #[test]
    fn it_should_track_away_state() {
        let host = host();

        assert_eq!(host.apply(Line::Away(Some("lunch"))), None);
        assert_eq!(host.get_info(Info::Away).as_deref(), Some("lunch"));

        host.apply(Line::Back);
        assert_eq!(host.get_info(Info::Away), None);
    }

    #[test]
    fn query_without_focus_keeps_current_window() {
        let host = host();

        host.command(&Command::set(TAB_NEW_TO_FRONT, 0)).unwrap();
        host.command(&Command::query("(Highlights)").nofocus())
            .unwrap();

        assert_eq!(host.current_window(), "#chan");
        assert!(host.find_context(Some("irc.example.net"), "(Highlights)").is_some());
        assert!(host.find_context(Some("irc.other.net"), "(Highlights)").is_none());
    }

    #[test]
    fn new_tabs_steal_focus_by_default() {
        let host = host();

        host.command(&Command::query("(Highlights)").nofocus())
            .unwrap();

        assert_eq!(host.current_window(), "(Highlights)");
    }

    #[test]
    fn it_should_log_highlights_in_their_own_window() {
        let host = host();
        let registry = crate::load(&host, &Config::default()).unwrap();

        let (event, words) = host
            .apply(Line::parse("Channel Msg Hilight\talice\thello me\t+").unwrap().unwrap())
            .unwrap();
        let eat = registry.dispatch(&host, event, &words).unwrap();

        assert_eq!(eat, Eat::None);
        assert_eq!(host.current_window(), "#chan");
        assert_eq!(host.setting(TAB_NEW_TO_FRONT).as_deref(), Some("2"));

        let output = output(host);
        let mut lines = output.lines();

        assert_eq!(
            lines.next(),
            Some(format!("[#chan] hilight {} plugin loaded", crate::VERSION).as_str())
        );

        let line = lines.next().unwrap();

        assert!(line.starts_with("[(Highlights)] #chan\t["));
        assert!(line.ends_with("] <+alice> hello me"));
    }

    #[rstest]
    #[case("\x0321[12:00:00] <\x02a\x02> b\x0f", "[12:00:00] <a> b")]
    #[case("\x034red\x03 plain", "red plain")]
    #[case("\x0304,12both", "both")]
    #[case("\x0399,991", "1")]
    #[case("\x035,x", ",x")]
    #[case("\x03,5", ",5")]
    #[case("12\x03", "12")]
    fn it_should_strip_all_colour_codes(#[case] input: &str, #[case] expected: &str) {
        let host = host();

        host.print(input).unwrap();

        assert_eq!(output(host), format!("[#chan] {expected}\n"));
    }

    #[test]
    fn raw_output_keeps_formatting_codes() {
        let host = host().raw(true);

        host.print("\x02bold\x02").unwrap();

        assert_eq!(output(host), "[#chan] \x02bold\x02\n");
    }
}
