//! Stack generators and the registry that dispatches to them.
//!
//! # Adding a generator
//!
//! 1. Add the `ProjectType` variant in `domain::value_objects`
//! 2. Write a module here with a unit struct implementing [`Generator`]
//! 3. Register it in [`GeneratorRegistry::builtin`]

use tracing::warn;

use crate::{
    application::ports::TemplateRenderer,
    domain::{DomainError, FeatureTag, GenerationPlan, ProjectConfig, ProjectType},
    error::TrellisResult,
};

pub(crate) mod common;

mod angular;
mod cli;
mod django;
mod electron;
mod express;
mod fastapi;
mod flask;
mod html;
mod monorepo;
mod nestjs;
mod python_lib;
mod react;
mod svelte;
mod typescript_lib;
mod vue;

/// A strategy turning a config into a plan for one stack.
pub trait Generator: Send + Sync {
    fn project_type(&self) -> ProjectType;

    /// One-line summary shown by `trellis list`.
    fn description(&self) -> &'static str;

    /// Feature tags this stack reacts to.
    fn recognized_features(&self) -> &'static [FeatureTag] {
        &[]
    }

    /// Build the plan. Pure: no I/O beyond the renderer port.
    fn generate(
        &self,
        config: &ProjectConfig,
        renderer: &dyn TemplateRenderer,
    ) -> TrellisResult<GenerationPlan>;
}

/// Display row for a registered generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub key: &'static str,
    pub description: &'static str,
    pub features: Vec<&'static str>,
}

/// Read-only table of generators, keyed by project type.
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Every built-in stack.
    pub fn builtin() -> Self {
        Self::new(vec![
            Box::new(html::HtmlGenerator),
            Box::new(react::ReactGenerator),
            Box::new(react::NextJsGenerator),
            Box::new(vue::VueGenerator),
            Box::new(vue::NuxtGenerator),
            Box::new(svelte::SvelteGenerator),
            Box::new(angular::AngularGenerator),
            Box::new(express::ExpressGenerator),
            Box::new(nestjs::NestJsGenerator),
            Box::new(fastapi::FastApiGenerator),
            Box::new(django::DjangoGenerator),
            Box::new(flask::FlaskGenerator),
            Box::new(python_lib::PythonLibGenerator),
            Box::new(typescript_lib::TypeScriptLibGenerator),
            Box::new(cli::CliGenerator),
            Box::new(electron::ElectronGenerator),
            Box::new(monorepo::MonorepoGenerator),
        ])
    }

    pub fn new(generators: Vec<Box<dyn Generator>>) -> Self {
        Self { generators }
    }

    /// Look up the generator for a project type.
    ///
    /// # Errors
    ///
    /// `UnknownProjectType` when nothing is registered for the key.
    pub fn resolve(&self, project_type: ProjectType) -> TrellisResult<&dyn Generator> {
        self.generators
            .iter()
            .find(|g| g.project_type() == project_type)
            .map(|g| &**g)
            .ok_or_else(|| {
                DomainError::UnknownProjectType {
                    project_type: project_type.to_string(),
                }
                .into()
            })
    }

    pub fn list(&self) -> Vec<GeneratorInfo> {
        self.generators
            .iter()
            .map(|g| GeneratorInfo {
                key: g.project_type().as_str(),
                description: g.description(),
                features: g.recognized_features().iter().map(FeatureTag::as_str).collect(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}

/// Log feature tags the selected stack will not act on and return them,
/// inert tags first, then unrecognized ones.
pub(crate) fn report_inert_features(config: &ProjectConfig, generator: &dyn Generator) -> Vec<String> {
    let recognized = generator.recognized_features();
    let mut ignored = Vec::new();
    for tag in config.features().tags() {
        if !recognized.contains(tag) {
            warn!(
                feature = %tag,
                project_type = %generator.project_type(),
                "feature has no effect for this project type"
            );
            ignored.push(tag.to_string());
        }
    }
    for unknown in config.features().unknown() {
        warn!(feature = %unknown, "unrecognized feature ignored");
        ignored.push(unknown.clone());
    }
    ignored
}
