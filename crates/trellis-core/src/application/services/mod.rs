//! Application services - orchestrate use cases.
//!
//! `ScaffoldService` drives a whole run; `FileTreeEmitter` is the write
//! half on its own, usable with any `Filesystem`.

pub mod emitter;
pub mod scaffold_service;

pub use emitter::FileTreeEmitter;
pub use scaffold_service::{ScaffoldReport, ScaffoldService};
