//! User configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`KINDLING_` prefix, `__` between sections,
//!    e.g. `KINDLING_DEFAULTS__DOMAIN`)
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Environment variable naming a template directory that replaces the
/// bundled templates.
pub const TEMPLATES_DIR_ENV: &str = "KINDLING_TEMPLATES_DIR";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fallbacks for `kindling init`.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// API domain used when `--domain` is not given.
    pub domain: String,
    /// Prepended to a bare `--module` name, e.g. `github.com/acme`.
    pub module_prefix: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            domain: "example.com".into(),
            module_prefix: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// One of `auto`, `human`, `plain`, `json`.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template directory replacing the bundled set.
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("encoding defaults")?)
            .add_source(File::from(path.as_path()).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix("KINDLING")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("reading configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .with_context(|| format!("parsing configuration from {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kindling.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kindling", "kindling")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kindling.toml"))
    }

    /// Template directory from `KINDLING_TEMPLATES_DIR`, else `templates.dir`.
    pub fn templates_dir(&self) -> Option<PathBuf> {
        std::env::var_os(TEMPLATES_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.templates.dir.clone())
    }

    /// Apply `defaults.module_prefix` to a module given without a host.
    pub fn qualify_module(&self, module: &str) -> String {
        match self.defaults.module_prefix.as_deref() {
            Some(prefix) if !module.contains('/') && !prefix.is_empty() => {
                format!("{}/{}", prefix.trim_end_matches('/'), module)
            }
            _ => module.to_string(),
        }
    }
}

/// Resolve a `--dir` argument against the current directory.
pub fn resolve_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(dir))
            .unwrap_or_else(|_| dir.to_path_buf())
    }
}
