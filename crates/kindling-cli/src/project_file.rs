//! The `kindling.toml` project file.
//!
//! Written by `init` at the project root and appended to by `create api`.
//! It is the source of the [`ProjectConfig`] handed to the core on every
//! later invocation.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use kindling_core::prelude::{ProjectConfig, ResourceDescriptor};

use crate::error::{CliError, CliResult};

pub const PROJECT_FILE: &str = "kindling.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub module_path: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Copyright year fixed at first init so regenerated headers never drift.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub resources: Vec<ResourceDescriptor>,
}

impl ProjectFile {
    pub fn new(config: &ProjectConfig) -> Self {
        Self {
            module_path: config.module_path.clone(),
            domain: config.domain.clone(),
            project_name: config.project_name.clone(),
            year: config.year,
            resources: Vec::new(),
        }
    }

    pub fn path_in(root: &Path) -> PathBuf {
        root.join(PROJECT_FILE)
    }

    /// Read the project file under `root`.
    pub fn load(root: &Path) -> CliResult<Self> {
        let path = Self::path_in(root);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CliError::ProjectNotFound {
                    path: root.to_path_buf(),
                });
            }
            Err(e) => {
                return Err(CliError::IoError {
                    message: format!("Failed to read '{}'", path.display()),
                    source: e,
                });
            }
        };

        toml::from_str(&text).map_err(|e| CliError::ProjectFile {
            path: path.clone(),
            message: e.message().to_string(),
            source: Some(Box::new(e)),
        })
    }

    /// Write the project file under `root`, replacing any previous content.
    pub fn save(&self, root: &Path) -> CliResult<()> {
        let path = Self::path_in(root);
        let text = toml::to_string_pretty(self).map_err(|e| CliError::ProjectFile {
            path: path.clone(),
            message: format!("Failed to serialise: {e}"),
            source: Some(Box::new(e)),
        })?;

        std::fs::write(&path, text).map_err(|e| CliError::IoError {
            message: format!("Failed to write '{}'", path.display()),
            source: e,
        })?;
        debug!(path = %path.display(), resources = self.resources.len(), "Project file saved");
        Ok(())
    }

    /// The configuration the core consumes.
    pub fn project_config(&self) -> ProjectConfig {
        let mut config = ProjectConfig::new(&self.module_path, &self.domain);
        if let Some(name) = &self.project_name {
            config = config.with_project_name(name);
        }
        if let Some(year) = self.year {
            config = config.with_year(year);
        }
        config
    }

    /// Record the current year unless one is already recorded.
    pub fn pin_year(&mut self) -> i32 {
        *self.year.get_or_insert_with(|| chrono::Local::now().year())
    }

    /// Record a resource. Returns `false` if it was already recorded.
    pub fn add_resource(&mut self, resource: &ResourceDescriptor) -> bool {
        if self.resources.contains(resource) {
            return false;
        }
        self.resources.push(resource.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectFile {
        ProjectFile::new(
            &ProjectConfig::new("github.com/acme/provider-cloud", "cloud.acme.io")
                .with_project_name("provider-cloud"),
        )
    }

    #[test]
    fn save_then_load_keeps_resources() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = sample();
        file.add_resource(&ResourceDescriptor::new("compute", "v1alpha1", "Instance"));
        file.save(dir.path()).unwrap();

        let loaded = ProjectFile::load(dir.path()).unwrap();
        assert_eq!(loaded, file);
        assert_eq!(loaded.project_config().derived_project_name(), "provider-cloud");
    }

    #[test]
    fn duplicate_resource_is_not_recorded_twice() {
        let mut file = sample();
        let bucket = ResourceDescriptor::new("storage", "v1", "Bucket");
        assert!(file.add_resource(&bucket));
        assert!(!file.add_resource(&bucket));
        assert_eq!(file.resources.len(), 1);
    }

    #[test]
    fn missing_file_is_project_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ProjectFile::load(dir.path()),
            Err(CliError::ProjectNotFound { .. })
        ));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_FILE), "module_path = 3\n").unwrap();
        assert!(matches!(
            ProjectFile::load(dir.path()),
            Err(CliError::ProjectFile { .. })
        ));
    }

    #[test]
    fn year_is_pinned_once_and_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = sample();
        file.year = Some(2019);
        assert_eq!(file.pin_year(), 2019);
        file.save(dir.path()).unwrap();

        let loaded = ProjectFile::load(dir.path()).unwrap();
        assert_eq!(loaded.year, Some(2019));
        assert_eq!(loaded.project_config().year, Some(2019));
    }

    #[test]
    fn missing_year_is_pinned_to_now() {
        let mut file = sample();
        assert_eq!(file.year, None);
        let year = file.pin_year();
        assert_eq!(file.year, Some(year));
        assert!(year >= 2024);
    }

    #[test]
    fn project_name_is_optional() {
        let file: ProjectFile =
            toml::from_str("module_path = \"example.com/provider-demo\"\ndomain = \"demo.io\"\n")
                .unwrap();
        assert!(file.resources.is_empty());
        assert_eq!(file.project_config().derived_project_name(), "provider-demo");
    }
}
