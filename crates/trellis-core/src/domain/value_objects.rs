//! Domain value objects: Language, PackageManager, CssFramework, Database,
//! Orm, ProjectType, FeatureTag.
//!
//! These are pure value types: `Copy`, equality-by-value, no identity. Each
//! one has a canonical string form (`as_str`) and a `FromStr` parser that
//! accepts that form case-insensitively.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add any dependency rules that react to it in the generator modules

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Language ─────────────────────────────────────────────────────────────────

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
}

impl Language {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Python => "python",
        }
    }

    /// Extension for plain modules (`ts`, `js`, `py`).
    pub const fn script_extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::JavaScript => "js",
            Self::Python => "py",
        }
    }

    /// Extension for JSX component modules.
    pub const fn component_extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "tsx",
            Self::JavaScript | Self::Python => "jsx",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "javascript" | "js" => Ok(Self::JavaScript),
            "python" | "py" => Ok(Self::Python),
            other => Err(DomainError::invalid(
                "language",
                format!("has unknown value '{other}'"),
            )),
        }
    }
}

// ── PackageManager ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
    Pip,
    Poetry,
    Pipenv,
    Conda,
}

impl PackageManager {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
            Self::Pip => "pip",
            Self::Poetry => "poetry",
            Self::Pipenv => "pipenv",
            Self::Conda => "conda",
        }
    }

    /// Default package manager for a language.
    pub const fn default_for(language: Language) -> Self {
        match language {
            Language::Python => Self::Pip,
            Language::TypeScript | Language::JavaScript => Self::Npm,
        }
    }

    pub const fn is_node(&self) -> bool {
        matches!(self, Self::Npm | Self::Yarn | Self::Pnpm | Self::Bun)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            "bun" => Ok(Self::Bun),
            "pip" => Ok(Self::Pip),
            "poetry" => Ok(Self::Poetry),
            "pipenv" => Ok(Self::Pipenv),
            "conda" => Ok(Self::Conda),
            other => Err(DomainError::invalid(
                "package_manager",
                format!("has unknown value '{other}'"),
            )),
        }
    }
}

// ── CssFramework ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CssFramework {
    Tailwind,
    CssModules,
    StyledComponents,
    Emotion,
    Scss,
    #[default]
    None,
}

impl CssFramework {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tailwind => "tailwind",
            Self::CssModules => "css-modules",
            Self::StyledComponents => "styled-components",
            Self::Emotion => "emotion",
            Self::Scss => "scss",
            Self::None => "none",
        }
    }
}

impl fmt::Display for CssFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CssFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tailwind" | "tailwindcss" => Ok(Self::Tailwind),
            "css-modules" => Ok(Self::CssModules),
            "styled-components" => Ok(Self::StyledComponents),
            "emotion" => Ok(Self::Emotion),
            "scss" | "sass" => Ok(Self::Scss),
            "none" | "" => Ok(Self::None),
            other => Err(DomainError::invalid(
                "css_framework",
                format!("has unknown value '{other}'"),
            )),
        }
    }
}

// ── Database ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    #[default]
    None,
    Sqlite,
    Postgresql,
    Mysql,
    Mongodb,
}

impl Database {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sqlite => "sqlite",
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
            Self::Mongodb => "mongodb",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Database {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "sqlite" => Ok(Self::Sqlite),
            "postgresql" | "postgres" => Ok(Self::Postgresql),
            "mysql" => Ok(Self::Mysql),
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            other => Err(DomainError::invalid(
                "database",
                format!("has unknown value '{other}'"),
            )),
        }
    }
}

// ── Orm ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orm {
    #[default]
    None,
    Prisma,
    Drizzle,
    TypeOrm,
    Sequelize,
    SqlAlchemy,
    SqlModel,
    Tortoise,
    Mongoose,
}

impl Orm {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Prisma => "prisma",
            Self::Drizzle => "drizzle",
            Self::TypeOrm => "typeorm",
            Self::Sequelize => "sequelize",
            Self::SqlAlchemy => "sqlalchemy",
            Self::SqlModel => "sqlmodel",
            Self::Tortoise => "tortoise",
            Self::Mongoose => "mongoose",
        }
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "prisma" => Ok(Self::Prisma),
            "drizzle" => Ok(Self::Drizzle),
            "typeorm" => Ok(Self::TypeOrm),
            "sequelize" => Ok(Self::Sequelize),
            "sqlalchemy" => Ok(Self::SqlAlchemy),
            "sqlmodel" => Ok(Self::SqlModel),
            "tortoise" => Ok(Self::Tortoise),
            "mongoose" => Ok(Self::Mongoose),
            other => Err(DomainError::invalid(
                "orm",
                format!("has unknown value '{other}'"),
            )),
        }
    }
}

// ── ProjectType ──────────────────────────────────────────────────────────────

/// Registry key selecting the generator for a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Html,
    React,
    NextJs,
    Vue,
    Nuxt,
    Svelte,
    Angular,
    Express,
    NestJs,
    FastApi,
    Django,
    Flask,
    Python,
    TypeScript,
    Cli,
    Electron,
    Monorepo,
}

impl ProjectType {
    /// Every project type, in listing order.
    pub const ALL: [ProjectType; 17] = [
        Self::Html,
        Self::React,
        Self::NextJs,
        Self::Vue,
        Self::Nuxt,
        Self::Svelte,
        Self::Angular,
        Self::Express,
        Self::NestJs,
        Self::FastApi,
        Self::Django,
        Self::Flask,
        Self::Python,
        Self::TypeScript,
        Self::Cli,
        Self::Electron,
        Self::Monorepo,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::React => "react",
            Self::NextJs => "nextjs",
            Self::Vue => "vue",
            Self::Nuxt => "nuxt",
            Self::Svelte => "svelte",
            Self::Angular => "angular",
            Self::Express => "express",
            Self::NestJs => "nestjs",
            Self::FastApi => "fastapi",
            Self::Django => "django",
            Self::Flask => "flask",
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::Cli => "cli",
            Self::Electron => "electron",
            Self::Monorepo => "monorepo",
        }
    }

    /// Types whose language is always Python, whatever the caller asked for.
    pub const fn forces_python(&self) -> bool {
        matches!(
            self,
            Self::Python | Self::FastApi | Self::Django | Self::Flask
        )
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or(DomainError::UnknownProjectType {
                project_type: s.trim().to_string(),
            })
    }
}

// ── FeatureTag ───────────────────────────────────────────────────────────────

/// Optional stack feature requested through the `features` list.
///
/// Each generator declares which tags it reacts to; a tag outside that set
/// is inert for the stack and gets reported at `WARN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureTag {
    Zustand,
    Redux,
    TanstackQuery,
    ReactRouter,
    NextAuth,
    Pinia,
    VueRouter,
    Zod,
    Swagger,
    LargeScale,
    Jwt,
    Celery,
    Drf,
}

impl FeatureTag {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zustand => "zustand",
            Self::Redux => "redux",
            Self::TanstackQuery => "tanstack-query",
            Self::ReactRouter => "react-router",
            Self::NextAuth => "nextauth",
            Self::Pinia => "pinia",
            Self::VueRouter => "vue-router",
            Self::Zod => "zod",
            Self::Swagger => "swagger",
            Self::LargeScale => "large-scale",
            Self::Jwt => "jwt",
            Self::Celery => "celery",
            Self::Drf => "drf",
        }
    }

    /// Parse a tag; `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        let tag = match s.trim().to_ascii_lowercase().as_str() {
            "zustand" => Self::Zustand,
            "redux" => Self::Redux,
            "tanstack-query" => Self::TanstackQuery,
            "react-router" => Self::ReactRouter,
            "nextauth" | "next-auth" => Self::NextAuth,
            "pinia" => Self::Pinia,
            "vue-router" => Self::VueRouter,
            "zod" => Self::Zod,
            "swagger" => Self::Swagger,
            "large-scale" => Self::LargeScale,
            "jwt" => Self::Jwt,
            "celery" => Self::Celery,
            "drf" => Self::Drf,
            _ => return None,
        };
        Some(tag)
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
