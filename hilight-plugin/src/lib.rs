//! Host plugin API abstraction and plugin management.

mod command;
mod error;
mod host;
mod plugin;
mod types;

pub use command::Command;
pub use error::Error;
pub use host::Host;
pub use plugin::{Plugin, Registry};
pub use types::{Author, Description, Eat, Info, Name, TextEvent, Version};
