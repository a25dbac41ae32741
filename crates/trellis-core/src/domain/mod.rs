// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Trellis.
//!
//! Pure logic only. All I/O and template text are reached through ports
//! defined in the application layer.
//!
//! - **No I/O**: no filesystem, network, clock or environment access
//! - **No logging**: observability belongs to the application layer
//! - **Immutable results**: `ProjectConfig`, `Manifest` and a finished
//!   `GenerationPlan` are read-only views
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use entities::{
    common::Permissions,
    generation_plan::{GenerationPlan, PlannedFile},
    manifest::{
        compose, DepGroup, DependencyMap, DependencyRule, Manifest, PackageJson, PyProject, Script,
        ScriptTable,
    },
    project_config::{FeatureSet, ProjectConfig, RawProjectConfig, Toggles},
    template::{RenderContext, TemplateId},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{
    CssFramework, Database, FeatureTag, Language, Orm, PackageManager, ProjectType,
};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn language_parses_aliases() {
        assert_eq!(Language::from_str("ts").unwrap(), Language::TypeScript);
        assert_eq!(Language::from_str("JavaScript").unwrap(), Language::JavaScript);
        assert!(Language::from_str("java").is_err());
    }

    #[test]
    fn project_type_round_trips_every_key() {
        for ty in ProjectType::ALL {
            assert_eq!(ProjectType::from_str(ty.as_str()).unwrap(), ty);
        }
        assert!(ProjectType::from_str("NextJS").is_ok());
    }

    #[test]
    fn project_type_unknown_is_not_found() {
        let err = ProjectType::from_str("cobol").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions()[0].contains("trellis list"));
    }

    #[test]
    fn only_python_stacks_force_python() {
        let forced: Vec<_> = ProjectType::ALL
            .into_iter()
            .filter(ProjectType::forces_python)
            .map(|t| t.as_str())
            .collect();
        assert_eq!(forced, vec!["fastapi", "django", "flask", "python"]);
    }

    #[test]
    fn enum_parse_errors_name_the_field() {
        let err = Orm::from_str("hibernate").unwrap_err();
        assert_eq!(err.to_string(), "invalid config: orm has unknown value 'hibernate'");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn feature_tags_are_closed() {
        assert_eq!(FeatureTag::parse("next-auth"), Some(FeatureTag::NextAuth));
        assert_eq!(FeatureTag::parse("Tanstack-Query"), Some(FeatureTag::TanstackQuery));
        assert_eq!(FeatureTag::parse("graphql"), None);
    }

    #[test]
    fn package_manager_defaults_follow_language() {
        assert_eq!(PackageManager::default_for(Language::Python), PackageManager::Pip);
        assert_eq!(PackageManager::default_for(Language::JavaScript), PackageManager::Npm);
        assert!(PackageManager::Pnpm.is_node());
        assert!(!PackageManager::Poetry.is_node());
    }

    // ========================================================================
    // Validator Tests
    // ========================================================================

    #[test]
    fn validator_accepts_a_clean_plan() {
        let config = RawProjectConfig::new("react", "demo").normalize().unwrap();
        let mut plan = GenerationPlan::new();
        plan.add_file("package.json", "{}");
        plan.set_scripts(ScriptTable::from_candidates([
            ("dev", Script::run("vite")),
            ("lint", Script::when(config.toggles().eslint, "eslint src")),
        ]));

        assert!(DomainValidator::validate_plan(&plan).is_ok());
    }

    #[test]
    fn validator_rejects_empty_plan() {
        assert_eq!(
            DomainValidator::validate_plan(&GenerationPlan::new()),
            Err(DomainError::EmptyPlan)
        );
    }
}
