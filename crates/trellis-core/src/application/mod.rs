//! Application layer for Trellis.
//!
//! This layer contains:
//! - **Generators**: one strategy per stack, plus the registry
//! - **Services**: use case orchestration (ScaffoldService, FileTreeEmitter)
//! - **Ports**: traits for the filesystem and template rendering
//! - **Errors**: application-specific error types
//!
//! Business rules on the config and plan live in `crate::domain`.

pub mod error;
pub mod generators;
pub mod ports;
pub mod services;

pub use services::{FileTreeEmitter, ScaffoldReport, ScaffoldService};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, TemplateRenderer};

pub use error::ApplicationError;
pub use generators::{Generator, GeneratorInfo, GeneratorRegistry};
