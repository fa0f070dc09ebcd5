//! # regbind-app
//!
//! Application layer: the generator port, the engine registry, and the
//! generation use-case. Orchestrates the domain model without knowing about
//! concrete generator back-ends — those live in adapter crates and are wired
//! in by the binary.

pub mod ports;
pub mod registry;
pub mod service;

pub use ports::Generator;
pub use registry::{GeneratorFactory, GeneratorRegistry};
pub use service::GenerationService;
