//! Trellis Core - hexagonal architecture implementation
//!
//! This crate holds the domain and application layers of the Trellis
//! project scaffolding tool.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          trellis-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, GeneratorRegistry)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │     (Filesystem, TemplateRenderer)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     trellis-adapters (Infrastructure)   │
//! │ (LocalFilesystem, BuiltinRenderer, ...) │
//! └─────────────────────────────────────────┘
//!
//!        Domain layer (pure): ProjectConfig, GenerationPlan,
//!        Manifest, ScriptTable, TemplateId, RenderContext
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trellis_adapters::{BuiltinRenderer, LocalFilesystem};
//! use trellis_core::prelude::*;
//!
//! let mut raw = RawProjectConfig::new("react", "my-app");
//! raw.css_framework = Some("tailwind".into());
//! let config = raw.normalize()?;
//!
//! let service = ScaffoldService::new(
//!     Box::new(BuiltinRenderer::new()),
//!     Box::new(LocalFilesystem::new()),
//! );
//! let report = service.scaffold(&config, ".")?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FileTreeEmitter, GeneratorInfo, GeneratorRegistry, ScaffoldReport, ScaffoldService,
        ports::{Filesystem, TemplateRenderer},
    };
    pub use crate::domain::{
        FeatureTag, GenerationPlan, Language, PackageManager, ProjectConfig, ProjectType,
        RawProjectConfig, RenderContext, TemplateId,
    };
    pub use crate::error::{TrellisError, TrellisResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
