//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `TRELLIS_*` environment variables, e.g. `TRELLIS_DEFAULTS__AUTHOR`
//! 3. `.trellis.toml` in the current directory, unless `--config` is given
//! 4. The `--config` file, or `config.toml` in the platform config dir
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use trellis_core::domain::entities::project_config::{
    DEFAULT_LICENSE, DEFAULT_NODE_VERSION, DEFAULT_PYTHON_VERSION,
};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG: &str = ".trellis.toml";

const ENV_PREFIX: &str = "TRELLIS";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

/// Values used by `trellis new` when the matching flag is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,
    pub node_version: String,
    pub python_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            author: None,
            license: DEFAULT_LICENSE.into(),
            package_manager: None,
            node_version: DEFAULT_NODE_VERSION.into(),
            python_version: DEFAULT_PYTHON_VERSION.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over the defaults.
    ///
    /// Missing files are skipped. A file that exists but does not parse is an
    /// error.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = config_file
            .map(Path::to_path_buf)
            .or_else(platform_config_path);

        let mut builder = Config::builder().add_source(
            Config::try_from(&Self::default()).context("failed to seed default configuration")?,
        );

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        if config_file.is_none() {
            builder = builder.add_source(
                File::from(PathBuf::from(LOCAL_CONFIG))
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Path of the file that `trellis init` writes and `config path` reports.
    ///
    /// An explicit `--config` wins, then an existing `.trellis.toml`, then
    /// the platform config directory.
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return local;
        }
        platform_config_path().unwrap_or(local)
    }

    /// Serialise for `trellis init` and `trellis config list`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Look up a dotted key, `None` for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        let d = &self.defaults;
        let value = match key {
            "defaults.author" => d.author.clone().unwrap_or_default(),
            "defaults.license" => d.license.clone(),
            "defaults.package_manager" => d.package_manager.clone().unwrap_or_default(),
            "defaults.node_version" => d.node_version.clone(),
            "defaults.python_version" => d.python_version.clone(),
            "output.no_color" => self.output.no_color.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub const KEYS: [&'static str; 6] = [
        "defaults.author",
        "defaults.license",
        "defaults.package_manager",
        "defaults.node_version",
        "defaults.python_version",
        "output.no_color",
    ];
}

fn platform_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "trellis", "trellis")
        .map(|d| d.config_dir().join("config.toml"))
}
