//! Value objects shared by the template pipeline.
//!
//! Everything here is immutable once constructed. Validation of user input
//! lives in [`crate::domain::DomainValidator`]; these types only carry data
//! and the derivations every consumer agrees on.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Project name used when neither an explicit name nor a module path segment
/// is available.
pub const FALLBACK_PROJECT_NAME: &str = "project";

// ============================================================================
// ProjectConfig
// ============================================================================

/// Per-invocation project configuration.
///
/// Supplied by the command layer (usually read from the project file) and
/// read-only to the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Root import path of the generated module, e.g. `github.com/acme/provider-cloud`.
    pub module_path: String,
    /// Dotted DNS-like API domain, e.g. `cloud.acme.io`.
    pub domain: String,
    /// Explicit project name. Derived from `module_path` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// License header placed at the top of generated sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boilerplate: Option<String>,
    /// Copyright year for `{{YEAR}}`. The current year when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl ProjectConfig {
    pub fn new(module_path: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            module_path: module_path.into(),
            domain: domain.into(),
            project_name: None,
            boilerplate: None,
            year: None,
        }
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn with_boilerplate(mut self, boilerplate: impl Into<String>) -> Self {
        self.boilerplate = Some(boilerplate.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Project (and image) name.
    ///
    /// Resolution order: explicit name, final segment of the module path,
    /// [`FALLBACK_PROJECT_NAME`].
    pub fn derived_project_name(&self) -> String {
        if let Some(name) = self.project_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }

        self.module_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(FALLBACK_PROJECT_NAME)
            .to_string()
    }
}

// ============================================================================
// ResourceDescriptor
// ============================================================================

/// The group/version/kind triad identifying one generated API resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl ResourceDescriptor {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// The base API lives at `apis/<version>` without a group and is wired
    /// statically into the aggregator templates.
    pub fn is_base(&self) -> bool {
        self.group.is_empty()
    }

    pub fn group_lower(&self) -> String {
        self.group.to_lowercase()
    }

    pub fn version_lower(&self) -> String {
        self.version.to_lowercase()
    }

    pub fn kind_lower(&self) -> String {
        self.kind.to_lowercase()
    }

    /// Naive English plural used for resource names (`instance` -> `instances`).
    pub fn kind_plural(&self) -> String {
        let lower = self.kind_lower();
        if lower.ends_with('s') || lower.ends_with('x') || lower.ends_with("ch") {
            format!("{lower}es")
        } else if let Some(stem) = lower
            .strip_suffix('y')
            .filter(|stem| !stem.ends_with(['a', 'e', 'i', 'o', 'u']))
        {
            format!("{stem}ies")
        } else {
            format!("{lower}s")
        }
    }

    /// Fully qualified API group, e.g. `compute.cloud.acme.io`.
    pub fn group_domain(&self, domain: &str) -> String {
        if self.group.is_empty() {
            domain.to_string()
        } else {
            format!("{}.{}", self.group_lower(), domain)
        }
    }
}

impl fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.kind)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.kind)
        }
    }
}

// ============================================================================
// ExistsPolicy / ProductOptions
// ============================================================================

/// What writing a product may do when its target already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistsPolicy {
    /// Fail with `ExistingFileConflict`; protects hand-edited files.
    #[default]
    Error,
    /// Always replace the existing file.
    Overwrite,
}

impl fmt::Display for ExistsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Options accepted by the product factory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductOptions {
    pub force: bool,
    pub resource: Option<ResourceDescriptor>,
    pub custom_data: BTreeMap<String, String>,
}

impl ProductOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn resource(mut self, resource: ResourceDescriptor) -> Self {
        self.resource = Some(resource);
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_data.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_prefers_explicit_value() {
        let config = ProjectConfig::new("github.com/acme/provider-cloud", "acme.io")
            .with_project_name("cloud");
        assert_eq!(config.derived_project_name(), "cloud");
    }

    #[test]
    fn project_name_falls_back_to_module_segment() {
        let config = ProjectConfig::new("github.com/acme/provider-cloud/", "acme.io");
        assert_eq!(config.derived_project_name(), "provider-cloud");
    }

    #[test]
    fn project_name_falls_back_to_literal() {
        let config = ProjectConfig::new("", "acme.io");
        assert_eq!(config.derived_project_name(), FALLBACK_PROJECT_NAME);
    }

    #[test]
    fn blank_explicit_name_is_ignored() {
        let config = ProjectConfig::new("example.com/widgets", "acme.io").with_project_name("  ");
        assert_eq!(config.derived_project_name(), "widgets");
    }

    #[test]
    fn kind_plural_rules() {
        assert_eq!(ResourceDescriptor::new("g", "v1", "Instance").kind_plural(), "instances");
        assert_eq!(ResourceDescriptor::new("g", "v1", "Policy").kind_plural(), "policies");
        assert_eq!(ResourceDescriptor::new("g", "v1", "Gateway").kind_plural(), "gateways");
        assert_eq!(ResourceDescriptor::new("g", "v1", "Address").kind_plural(), "addresses");
    }

    #[test]
    fn base_resource_has_no_group() {
        assert!(ResourceDescriptor::new("", "v1alpha1", "ProviderConfig").is_base());
        assert!(!ResourceDescriptor::new("compute", "v1alpha1", "Instance").is_base());
    }

    #[test]
    fn group_domain_joins_group_and_domain() {
        let r = ResourceDescriptor::new("Compute", "v1alpha1", "Instance");
        assert_eq!(r.group_domain("acme.io"), "compute.acme.io");
        assert_eq!(
            ResourceDescriptor::new("", "v1", "X").group_domain("acme.io"),
            "acme.io"
        );
    }

    #[test]
    fn display_formats_triad() {
        let r = ResourceDescriptor::new("compute", "v1alpha1", "Instance");
        assert_eq!(r.to_string(), "compute/v1alpha1/Instance");
    }
}
