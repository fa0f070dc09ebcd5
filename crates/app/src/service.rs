//! Generation service — the run-all-generators use-case.

use regbind_domain::error::RegbindError;
use regbind_domain::library::Library;

use crate::registry::GeneratorRegistry;

/// Application service that dispatches a resolved library to its declared
/// generator back-ends.
pub struct GenerationService {
    registry: GeneratorRegistry,
}

impl GenerationService {
    /// Create a new service backed by the given engine registry.
    #[must_use]
    pub fn new(registry: GeneratorRegistry) -> Self {
        Self { registry }
    }

    /// Resolve every generator declaration of `library`, then run each
    /// generator in declaration order.
    ///
    /// All declarations are resolved up front, so a bad declaration fails
    /// the call before any generator has produced output.
    ///
    /// # Errors
    ///
    /// Returns [`RegbindError::Generator`] for an unknown engine, rejected
    /// options, or an engine failure.
    #[tracing::instrument(skip(self, library), fields(library = %library.slug))]
    pub fn run(&self, library: &Library) -> Result<(), RegbindError> {
        let generators = self.registry.resolve_all(library)?;
        for generator in generators {
            tracing::info!(engine = generator.engine(), "running generator");
            generator.generate(library)?;
        }
        Ok(())
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }
}
