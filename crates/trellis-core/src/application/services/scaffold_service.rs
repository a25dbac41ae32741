//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the whole workflow:
//! 1. Resolve the generator for the configured project type
//! 2. Check that the target directory is free
//! 3. Build and validate the plan
//! 4. Write it through the filesystem port
//!
//! Steps 1 and 2 run before any filesystem mutation.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use super::emitter::FileTreeEmitter;
use crate::{
    application::{
        generators::{GeneratorInfo, GeneratorRegistry, report_inert_features},
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{DomainValidator as validator, GenerationPlan, ProjectConfig},
    error::TrellisResult,
};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldReport {
    /// Directory the project was written to.
    pub root: PathBuf,
    pub plan: GenerationPlan,
    /// Feature tags the stack did not act on.
    pub ignored_features: Vec<String>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    registry: GeneratorRegistry,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a service over the built-in generators.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use trellis_adapters::{BuiltinRenderer, LocalFilesystem};
    /// use trellis_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(BuiltinRenderer::new()),
    ///     Box::new(LocalFilesystem::new()),
    /// );
    /// ```
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self::with_registry(GeneratorRegistry::builtin(), renderer, filesystem)
    }

    pub fn with_registry(
        registry: GeneratorRegistry,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            registry,
            renderer,
            filesystem,
        }
    }

    /// Registered stacks in registration order.
    pub fn list_generators(&self) -> Vec<GeneratorInfo> {
        self.registry.list()
    }

    /// Build and validate the plan without touching the filesystem.
    #[instrument(skip_all, fields(project = %config.name(), project_type = %config.project_type()))]
    pub fn plan(&self, config: &ProjectConfig) -> TrellisResult<GenerationPlan> {
        let (plan, _) = self.plan_with_report(config)?;
        Ok(plan)
    }

    /// Scaffold `config` into `base_dir/<name>`.
    #[instrument(
        skip_all,
        fields(
            project = %config.name(),
            project_type = %config.project_type(),
            base_dir = %base_dir.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        config: &ProjectConfig,
        base_dir: impl AsRef<Path>,
    ) -> TrellisResult<ScaffoldReport> {
        let root = base_dir.as_ref().join(config.name());
        let emitter = FileTreeEmitter::new(self.filesystem.as_ref());

        // Pre-flight: both checks happen before anything is written.
        self.registry.resolve(config.project_type())?;
        emitter.ensure_vacant(&root)?;

        let (plan, ignored_features) = self.plan_with_report(config)?;
        info!(
            files = plan.files().len(),
            directories = plan.directories().len(),
            "plan built"
        );

        emitter.materialize(&root, &plan)?;
        info!(root = %root.display(), "scaffold completed");

        Ok(ScaffoldReport {
            root,
            plan,
            ignored_features,
        })
    }

    fn plan_with_report(&self, config: &ProjectConfig) -> TrellisResult<(GenerationPlan, Vec<String>)> {
        let generator = self.registry.resolve(config.project_type())?;
        let ignored = report_inert_features(config, generator);
        let plan = generator.generate(config, self.renderer.as_ref())?;
        validator::validate_plan(&plan)?;
        Ok((plan, ignored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{
            ApplicationError,
            ports::{MockFilesystem, MockTemplateRenderer},
        },
        domain::{DomainError, RawProjectConfig},
        error::TrellisError,
    };

    fn renderer() -> Box<MockTemplateRenderer> {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .returning(|id, _| Ok(format!("{id}\n")));
        Box::new(renderer)
    }

    fn config(ty: &str, name: &str) -> ProjectConfig {
        RawProjectConfig::new(ty, name).normalize().unwrap()
    }

    /// A filesystem that fails the test on any mutation.
    fn untouched(exists: bool) -> Box<MockFilesystem> {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(exists);
        fs.expect_create_dir_all().never();
        fs.expect_create_dir().never();
        fs.expect_write_file().never();
        fs.expect_set_permissions().never();
        fs.expect_remove_dir_all().never();
        Box::new(fs)
    }

    #[test]
    fn existing_target_is_a_conflict_with_zero_writes() {
        let service = ScaffoldService::new(renderer(), untouched(true));
        let err = service.scaffold(&config("python", "X"), "/work").unwrap_err();

        assert_eq!(
            err,
            TrellisError::Application(ApplicationError::DirectoryConflict {
                path: PathBuf::from("/work/X"),
            })
        );
        assert!(err.is_preflight());
    }

    #[test]
    fn unregistered_type_fails_before_any_io() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().never();
        fs.expect_create_dir_all().never();
        fs.expect_write_file().never();

        let service = ScaffoldService::with_registry(
            GeneratorRegistry::new(Vec::new()),
            renderer(),
            Box::new(fs),
        );
        let err = service.scaffold(&config("react", "app"), "/work").unwrap_err();
        assert!(matches!(
            err,
            TrellisError::Domain(DomainError::UnknownProjectType { .. })
        ));
    }

    #[test]
    fn scaffold_writes_every_planned_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, _| path.starts_with("/work/site"))
            .returning(|_, _| Ok(()));

        let service = ScaffoldService::new(renderer(), Box::new(fs));
        let report = service.scaffold(&config("html", "site"), "/work").unwrap();

        assert_eq!(report.root, PathBuf::from("/work/site"));
        assert!(report.plan.has_file("index.html"));
        assert!(report.ignored_features.is_empty());
    }

    #[test]
    fn plan_is_a_dry_run() {
        let service = ScaffoldService::new(renderer(), untouched(false));
        let plan = service.plan(&config("flask", "web")).unwrap();
        assert!(plan.has_file("wsgi.py"));
    }

    #[test]
    fn ignored_features_are_reported() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_create_dir().returning(|_| Ok(()));
        fs.expect_write_file().returning(|_, _| Ok(()));

        let mut raw = RawProjectConfig::new("vue", "shop");
        raw.features = Some("pinia,jwt,warp-drive".into());
        let service = ScaffoldService::new(renderer(), Box::new(fs));
        let report = service.scaffold(&raw.normalize().unwrap(), "/work").unwrap();

        assert_eq!(report.ignored_features, vec!["jwt", "warp-drive"]);
        assert!(report.plan.manifest().dependencies().contains("pinia"));
    }

    #[test]
    fn renderer_failure_surfaces_before_writes() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().returning(|id, _| {
            Err(ApplicationError::RenderingFailed {
                template: id.as_str(),
                reason: "boom".into(),
            }
            .into())
        });
        let service = ScaffoldService::new(Box::new(renderer), untouched(false));
        let err = service.scaffold(&config("react", "app"), "/work").unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
