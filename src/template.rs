//! Format templates with named placeholders.
//!
//! A template is a string where `{channel}`, `{time}`, `{mode}`, `{nick}` and `{text}` are
//! replaced with the values of a highlight. Literal braces are written as `{{` and `}}`.
//! Everything else, including IRC formatting codes, is kept as-is.
//!
//! # Example
//!
//! ```rust
//! use hilight::template::{Fields, Template};
//!
//! let template: Template = "<{mode}{nick}> {text}".parse().unwrap();
//! let fields = Fields {
//!     channel: "#rust",
//!     time: "12:00:00",
//!     mode: "@",
//!     nick: "alice",
//!     text: "hi",
//! };
//!
//! assert_eq!(template.render(&fields), "<@alice> hi");
//! ```
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An error that occurred while parsing a template.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum TemplateError {
    #[error("Unknown field `{name}` at offset {offset}")]
    UnknownField { name: String, offset: usize },
    #[error("Unterminated placeholder at offset {offset}")]
    Unterminated { offset: usize },
    #[error("Unmatched `}}` at offset {offset}")]
    UnmatchedBrace { offset: usize },
}

/// A value that can be substituted into a template.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Field {
    Channel,
    Time,
    Mode,
    Nick,
    Text,
}

impl Field {
    fn from_name(name: &str) -> Option<Field> {
        match name {
            "channel" => Some(Field::Channel),
            "time" => Some(Field::Time),
            "mode" => Some(Field::Mode),
            "nick" => Some(Field::Nick),
            "text" => Some(Field::Text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Channel => "channel",
            Field::Time => "time",
            Field::Mode => "mode",
            Field::Nick => "nick",
            Field::Text => "text",
        }
    }
}

/// The values of a single highlight.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Fields<'a> {
    /// The channel the highlight happened in.
    pub channel: &'a str,
    /// The formatted timestamp.
    pub time: &'a str,
    /// The sender's mode prefix, e.g. `@`, or empty.
    pub mode: &'a str,
    /// The sender's nickname.
    pub nick: &'a str,
    /// The message or action text.
    pub text: &'a str,
}

impl<'a> Fields<'a> {
    #[must_use]
    pub const fn get(&self, field: Field) -> &'a str {
        match field {
            Field::Channel => self.channel,
            Field::Time => self.time,
            Field::Mode => self.mode,
            Field::Nick => self.nick,
            Field::Text => self.text,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed template.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template string.
    ///
    /// # Errors
    ///
    /// Returns an error if a placeholder names an unknown field, if a `{` is never closed or if a
    /// `}` is never opened.
    pub fn parse(s: &str) -> Result<Template, TemplateError> {
        let mut segments = vec![];
        let mut literal = String::new();
        let mut chars = s.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, c)| c == '{').is_some() => literal.push('{'),
                '{' => {
                    let start = offset + 1;
                    let end = s[start..]
                        .find('}')
                        .map(|len| start + len)
                        .ok_or(TemplateError::Unterminated { offset })?;
                    let name = &s[start..end];
                    let field = Field::from_name(name).ok_or_else(|| TemplateError::UnknownField {
                        name: name.to_string(),
                        offset,
                    })?;

                    // Skip past the closing brace
                    while chars.next_if(|&(idx, _)| idx <= end).is_some() {}

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }

                    segments.push(Segment::Field(field));
                }
                '}' if chars.next_if(|&(_, c)| c == '}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::UnmatchedBrace { offset }),
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Template { segments })
    }

    /// Renders the template with the given field values.
    #[must_use]
    pub fn render(&self, fields: &Fields<'_>) -> String {
        let mut buf = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => buf.push_str(s),
                Segment::Field(field) => buf.push_str(fields.get(*field)),
            }
        }

        buf
    }

    /// Returns the fields referenced by the template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(field) => Some(*field),
            Segment::Literal(_) => None,
        })
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

impl fmt::Display for Template {
    /// Writes the template back in its source form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => f.write_str(&s.replace('{', "{{").replace('}', "}}"))?,
                Segment::Field(field) => write!(f, "{{{}}}", field.as_str())?,
            }
        }

        Ok(())
    }
}

/// The two sides of the separator of a `Generic Message` line.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TemplatePair {
    pub left: Template,
    pub right: Template,
}

impl TemplatePair {
    #[must_use]
    pub fn render(&self, fields: &Fields<'_>) -> (String, String) {
        (self.left.render(fields), self.right.render(fields))
    }
}
