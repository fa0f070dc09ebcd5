//! Port definitions — traits that generator adapters implement.
//!
//! Ports are the boundary between the application core and generator
//! back-ends. They are defined here (in `app`) so that both the use-case
//! layer and the adapter crates can depend on them without creating circular
//! dependencies.

use regbind_domain::error::RegbindError;
use regbind_domain::library::Library;

/// A generator back-end.
///
/// An instance is constructed by its registry factory from a previously
/// validated options object; the core never inspects generator internals.
/// The fully resolved [`Library`] is the only thing a generator ever sees.
pub trait Generator {
    /// Registry identifier of this engine, e.g. `datasheet_md`.
    fn engine(&self) -> &'static str;

    /// Produce this generator's output from the resolved library.
    ///
    /// # Errors
    ///
    /// Returns [`RegbindError::Generator`] when the engine fails; the cause
    /// is engine-specific and opaque to the core.
    fn generate(&self, library: &Library) -> Result<(), RegbindError>;
}
