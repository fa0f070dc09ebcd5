//! Error taxonomy shared across the workspace.
//!
//! Every error is fail-fast: it surfaces to the caller of the top-level
//! build/resolve operation, with no retry and no partial success. Each layer
//! defines typed variants and converts upward via `#[from]` — no `String`
//! catch-alls except boxed sources at the generator boundary, where engine
//! internals are opaque to the core.

use crate::slug::Slug;

/// Top-level error for library construction, resolution, and dispatch.
#[derive(Debug, thiserror::Error)]
pub enum RegbindError {
    /// Raw input failed structural validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A cross-reference rule was violated.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// A dimension received an action contradicting its inferred scope.
    #[error(transparent)]
    ScopeConflict(#[from] ScopeConflictError),

    /// Generator dispatch or execution failed.
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// Structural validation failure while building a device graph.
///
/// `path` identifies the offending entry in the raw description, e.g.
/// `registers[1].fields[0].bit_length`.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// An integer value fell below its required minimum.
    #[error("{path}: must be at least {min}, got {value}")]
    IntegerOutOfRange {
        /// Path of the offending value in the raw description.
        path: String,
        /// Required minimum.
        min: i64,
        /// Value found in the input.
        value: i64,
    },

    /// An access mode token other than `r`, `w`, or `rw`.
    #[error("{path}: unrecognized access token '{token}'")]
    UnknownAccessToken {
        /// Path of the offending value in the raw description.
        path: String,
        /// Token found in the input.
        token: String,
    },

    /// A value descriptor declared more than one value space.
    #[error("{path}: at most one of range, enum, or boolean may be specified")]
    ConflictingValueSpec {
        /// Path of the offending value descriptor.
        path: String,
    },
}

/// Duplicate-identifier failures raised by the binding resolver.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// A device slug is already registered in the library.
    #[error("device with slug '{0}' already exists")]
    DuplicateDevice(Slug),

    /// A `(device, entity)` coordinate already carries an action.
    #[error(
        "action has already been defined for device '{device}' \
         and entity '{entity}' in dimension '{dimension}'"
    )]
    DuplicateAction {
        /// Dimension the coordinate belongs to.
        dimension: Slug,
        /// Device part of the coordinate.
        device: Slug,
        /// Entity part of the coordinate.
        entity: Slug,
    },
}

/// An action whose entity contradicts the dimension's inferred scope.
#[derive(Debug, thiserror::Error)]
pub enum ScopeConflictError {
    /// Entity-bound action offered to a domain-only dimension.
    #[error("action for entity '{entity}' is not allowed in domain-only dimension '{dimension}'")]
    EntityInDomainOnly {
        /// Dimension whose scope was already inferred as domain-only.
        dimension: Slug,
        /// The non-sentinel entity that was offered.
        entity: Slug,
    },

    /// Domain-only action offered to an entity-scoped dimension.
    #[error("domain-only action is not allowed in entity-scoped dimension '{dimension}'")]
    DomainOnlyInEntity {
        /// Dimension whose scope was already inferred as entity-scoped.
        dimension: Slug,
    },
}

/// Generator dispatch failures, raised before or during engine execution.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The engine identifier is not present in the registry.
    #[error("could not find generator engine '{0}'")]
    UnknownEngine(String),

    /// The engine rejected its options object.
    #[error("invalid options for generator engine '{engine}': {source}")]
    InvalidOptions {
        /// Engine identifier whose options failed validation.
        engine: &'static str,
        /// Engine-specific validation failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The engine itself failed while generating.
    #[error("generator engine '{engine}' failed: {source}")]
    Failed {
        /// Engine identifier that failed.
        engine: &'static str,
        /// Engine-specific failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
