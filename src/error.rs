//! Error types

use miette::Diagnostic;
use thiserror::Error;

use crate::template::TemplateError;

/// Errors that can occur while loading the plugin.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The configuration could not be extracted from its sources.
    #[error("Could not load configuration")]
    #[diagnostic(code(hilight::config))]
    Config(#[source] Box<figment::Error>),
    /// The configured window name could be mistaken for a real channel or user.
    #[error("Window name {name:?} collides with a {kind}")]
    #[diagnostic(
        code(hilight::window_name),
        help("use a name that is neither a channel name nor a nickname, e.g. \"(Highlights)\"")
    )]
    WindowNameCollision { name: String, kind: &'static str },
    /// The configured window name is empty.
    #[error("Window name must not be empty")]
    #[diagnostic(code(hilight::window_name))]
    EmptyWindowName,
    /// The timestamp format description could not be parsed.
    #[error("Invalid time format {format:?}")]
    #[diagnostic(
        code(hilight::time_format),
        help("see https://time-rs.github.io/book/api/format-description.html")
    )]
    TimeFormat {
        format: String,
        #[source]
        source: time::error::InvalidFormatDescription,
    },
    /// A format template could not be parsed.
    #[error("Invalid template for {name}")]
    #[diagnostic(code(hilight::template))]
    Template {
        name: String,
        #[source]
        source: TemplateError,
    },
    /// The host refused a call made during loading.
    #[error("Host error")]
    Host(#[from] hilight_plugin::Error),
    /// Tracing could not be initialized.
    #[error("Could not initialize tracing")]
    Tracing(#[source] tracing_subscriber::util::TryInitError),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}
