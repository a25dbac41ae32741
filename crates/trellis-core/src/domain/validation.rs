use crate::domain::{entities::generation_plan::GenerationPlan, error::DomainError};

/// Centralized domain validation.
///
/// Run on every plan before it reaches the emitter.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_plan(plan: &GenerationPlan) -> Result<(), DomainError> {
        plan.validate()?;
        Self::validate_manifest(plan)
    }

    /// No dependency or script may carry an empty value.
    pub fn validate_manifest(plan: &GenerationPlan) -> Result<(), DomainError> {
        let manifest = plan.manifest();
        let entries = manifest
            .dependencies()
            .iter()
            .chain(manifest.dev_dependencies().iter())
            .chain(plan.scripts().iter());

        for (key, value) in entries {
            if value.trim().is_empty() {
                return Err(DomainError::EmptyManifestValue {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }
}
