//! Infrastructure adapters for Trellis.
//!
//! This crate implements the ports defined in `trellis_core::application::ports`:
//! real and in-memory filesystems, and the renderer for the templates
//! compiled into the binary.

pub mod filesystem;
pub mod renderer;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::BuiltinRenderer;
