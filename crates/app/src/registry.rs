//! Generator dispatch — a closed, statically assembled engine registry.
//!
//! Engines are registered once at process start as plain factory functions
//! keyed by identifier; there is no dynamic discovery. Resolution looks the
//! identifier up first, so an unknown engine fails before its options are
//! ever touched.

use std::collections::BTreeMap;

use regbind_domain::error::GeneratorError;
use regbind_domain::library::Library;

use crate::ports::Generator;

/// Constructs a generator instance from its (still unvalidated) options.
pub type GeneratorFactory =
    fn(options: &serde_yaml::Value) -> Result<Box<dyn Generator>, GeneratorError>;

/// Registry mapping engine identifier → factory function.
#[derive(Debug, Default)]
pub struct GeneratorRegistry {
    engines: BTreeMap<&'static str, GeneratorFactory>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `engine`, replacing any previous entry.
    pub fn register(&mut self, engine: &'static str, factory: GeneratorFactory) {
        self.engines.insert(engine, factory);
    }

    /// Resolve one engine identifier and construct its generator.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::UnknownEngine`] when `engine` is not
    /// registered — before any option validation — or the factory's own
    /// [`GeneratorError::InvalidOptions`] when the options are rejected.
    pub fn resolve(
        &self,
        engine: &str,
        options: &serde_yaml::Value,
    ) -> Result<Box<dyn Generator>, GeneratorError> {
        let factory = self
            .engines
            .get(engine)
            .ok_or_else(|| GeneratorError::UnknownEngine(engine.to_string()))?;
        factory(options)
    }

    /// Resolve every generator declaration of `library`, in declaration
    /// order. Nothing is constructed unless every declaration resolves.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or options failure.
    pub fn resolve_all(&self, library: &Library) -> Result<Vec<Box<dyn Generator>>, GeneratorError> {
        library
            .generators()
            .iter()
            .map(|decl| self.resolve(&decl.engine, &decl.options))
            .collect()
    }
}
