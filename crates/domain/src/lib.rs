//! # regbind-domain
//!
//! Pure domain model for the regbind register-binding engine.
//!
//! ## Responsibilities
//! - Foundational types: slugs, access modes, value descriptors, error conventions
//! - Build validated **Device** graphs (registers, bit-fields, commands, parameters)
//!   from raw declarative descriptions
//! - Fold per-field **Bindings** into the library-wide index of
//!   Domains → Dimensions → Entities → Actions, enforcing scope consistency
//! - Derive the canonical accessor-name grammar from the resolved index
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! It must never import anything from `app`, adapters, or IO crates.
//! Generator back-ends are reached through the port trait in the `app` crate.

pub mod access;
pub mod accessor;
pub mod device;
pub mod error;
pub mod library;
pub mod schema;
pub mod slug;
pub mod value;
