use tracing::{debug, trace};

use crate::{Author, Description, Eat, Error, Host, Name, TextEvent, Version};

/// The base trait that all plugins must implement.
pub trait Plugin<H: Host> {
    /// Returns the name of the plugin.
    fn name() -> Name
    where
        Self: Sized;

    /// Returns the author of the plugin.
    fn author() -> Author
    where
        Self: Sized;

    /// Returns the version of the plugin.
    fn version() -> Version
    where
        Self: Sized;

    /// Returns a short description of the plugin.
    fn description() -> Description
    where
        Self: Sized;

    /// The text events the host should hook for this plugin.
    fn subscriptions(&self) -> &[TextEvent];

    /// Handles a hooked text event with its positional words.
    fn handle_print(&self, _host: &H, _event: TextEvent, _words: &[&str]) -> Result<Eat, Error> {
        Ok(Eat::None)
    }
}

/// Plugin registry.
pub struct Registry<H: Host> {
    /// List of loaded plugins.
    plugins: Vec<Box<dyn Plugin<H>>>,
}

impl<H: Host> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Host> Registry<H> {
    /// Constructs and returns a new, empty plugin registry.
    #[must_use]
    pub fn new() -> Registry<H> {
        Registry { plugins: vec![] }
    }

    /// Registers an initialized plugin.
    pub fn register<P: Plugin<H> + 'static>(&mut self, plugin: P) {
        debug!(
            name = %P::name(),
            version = %P::version(),
            author = %P::author(),
            description = %P::description(),
            events = ?plugin.subscriptions(),
            "registering plugin"
        );

        self.plugins.push(Box::new(plugin));
    }

    /// Returns the number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Returns the sorted, deduplicated list of text events that must be hooked in the host.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<TextEvent> {
        let mut events: Vec<TextEvent> = self
            .plugins
            .iter()
            .flat_map(|plugin| plugin.subscriptions().iter().copied())
            .collect();

        events.sort_unstable();
        events.dedup();
        events
    }

    /// Dispatches a text event to every plugin subscribed to it and returns the combined [`Eat`]
    /// value.
    ///
    /// # Errors
    ///
    /// Returns the first error a plugin returns; plugins registered after it are not invoked.
    pub fn dispatch(&self, host: &H, event: TextEvent, words: &[&str]) -> Result<Eat, Error> {
        let mut eat = Eat::None;

        for plugin in &self.plugins {
            if plugin.subscriptions().contains(&event) {
                trace!(%event, num_words = words.len(), "dispatching text event");

                eat = eat | plugin.handle_print(host, event, words)?;
            }
        }

        Ok(eat)
    }
}
