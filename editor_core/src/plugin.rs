//! View plugins and the extensions that bundle them with configuration.

use crate::facet::{Facet, FacetStore, FacetType};
use crate::view::{ViewHost, ViewUpdate};
use std::fmt;

/// A behaviour that observes every view update.
pub trait ViewPlugin {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Called once per update, after the new state is in place.
    ///
    /// Implementations must not dispatch from here; deferred work goes
    /// through [`ViewHost::request_animation_frame`].
    fn update(&mut self, update: &ViewUpdate, host: &mut dyn ViewHost);
}

/// Constructor for a fresh plugin instance.
pub type PluginFactory = fn() -> Box<dyn ViewPlugin>;

/// Facet contributions plus plugins, attached to an editor as a unit.
#[derive(Default, Clone)]
pub struct Extension {
    facets: FacetStore,
    plugins: Vec<PluginFactory>,
}

impl Extension {
    /// Creates an empty extension.
    pub fn new() -> Self {
        Self::default()
    }

    /// Contributes a value to a facet.
    pub fn with_facet<T: FacetType>(mut self, facet: &Facet<T>, value: T) -> Self {
        self.facets.register(facet, value);
        self
    }

    /// Adds a plugin.
    pub fn with_plugin(mut self, factory: PluginFactory) -> Self {
        self.plugins.push(factory);
        self
    }

    /// Concatenates extensions; earlier ones register first.
    pub fn combine(extensions: impl IntoIterator<Item = Extension>) -> Self {
        let mut combined = Extension::new();
        for ext in extensions {
            combined.facets.extend(&ext.facets);
            combined.plugins.extend(ext.plugins);
        }
        combined
    }

    /// Facet contributions in registration order.
    pub fn facets(&self) -> &FacetStore {
        &self.facets
    }

    /// Number of plugins this extension will instantiate.
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Creates one instance of every plugin, in order.
    pub fn instantiate_plugins(&self) -> Vec<Box<dyn ViewPlugin>> {
        self.plugins.iter().map(|factory| factory()).collect()
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("facets", &self.facets)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}
