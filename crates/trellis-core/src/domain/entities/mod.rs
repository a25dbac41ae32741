pub mod common;
pub mod generation_plan;
pub mod manifest;
pub mod project_config;
pub mod template;

pub use crate::domain::DomainError;
pub use generation_plan::{GenerationPlan, PlannedFile};
pub use manifest::{Manifest, PackageJson, PyProject, ScriptTable};
pub use project_config::{ProjectConfig, RawProjectConfig};
pub use template::{RenderContext, TemplateId};
