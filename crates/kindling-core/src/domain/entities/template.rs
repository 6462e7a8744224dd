//! Template descriptors and classification.
//!
//! A template store is a flat namespace of relative paths. Every leaf whose
//! name ends in [`TEMPLATE_SUFFIX`] becomes one [`TemplateDescriptor`]:
//!
//! ```text
//! project/apis/GROUP/VERSION/KIND_types.go.tmpl
//! └──┬──┘ └──────────────┬───────────────┘ └┬─┘
//!  root          output skeleton          suffix
//!  container
//! ```
//!
//! The descriptor's identifier is derived from the skeleton by splitting on
//! path separators and word boundaries and concatenating the capitalized
//! fragments (`ApisGroupVersionKindTypesGo`). The category is decided by the
//! placeholder tokens in the path:
//!
//! | Path contains                       | Category      |
//! |-------------------------------------|---------------|
//! | a `GROUP`, `VERSION` or `KIND` token | `PerResource` |
//! | a root-level one-off name (LICENSE) | `Static`      |
//! | anything else                       | `ProjectWide` |

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Suffix marking a store entry as a template.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Leading segment meaning "the generated project root". Stripped before
/// identifier derivation and path rendering.
pub const ROOT_CONTAINER: &str = "project";

/// Path tokens that make a template per-resource.
pub const RESOURCE_TOKENS: [&str; 3] = ["GROUP", "VERSION", "KIND"];

/// Root-level file names whose bodies are copied verbatim.
pub const STATIC_NAMES: [&str; 2] = ["LICENSE", ".gitignore"];

// ============================================================================
// TemplateType
// ============================================================================

/// Identifier synthesized from a template's path, e.g. `ApisGroupVersionDocGo`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TemplateType(String);

impl TemplateType {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self(identifier.into())
    }

    /// Derive the identifier for an output skeleton.
    ///
    /// The root container is ignored so `project/go.mod` and `go.mod` map to
    /// the same `GoMod`.
    pub fn derive(skeleton: &str) -> Self {
        let without_root = strip_root_container(skeleton);
        let identifier = without_root
            .split(['/', '\\', '.', '_', '-'])
            .filter(|fragment| !fragment.is_empty())
            .map(capitalize)
            .collect::<String>();
        Self(identifier)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

fn capitalize(fragment: &str) -> String {
    let mut chars = fragment.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(fragment.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Remove a leading [`ROOT_CONTAINER`] segment, if present.
pub fn strip_root_container(skeleton: &str) -> &str {
    skeleton
        .strip_prefix(ROOT_CONTAINER)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(skeleton)
}

// ============================================================================
// TemplateCategory
// ============================================================================

/// Closed set of template kinds. Each has its own product builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    /// Generated once per project.
    ProjectWide,
    /// Generated once per group/version/kind.
    PerResource,
    /// One-off body copied without substitution.
    Static,
}

impl TemplateCategory {
    /// Classify an output skeleton.
    pub fn classify(skeleton: &str) -> Self {
        let relative = strip_root_container(skeleton);

        let per_resource = relative
            .split('/')
            .any(|segment| RESOURCE_TOKENS.iter().any(|token| segment.contains(token)));
        if per_resource {
            return Self::PerResource;
        }

        if STATIC_NAMES.contains(&relative) {
            return Self::Static;
        }

        Self::ProjectWide
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectWide => "project-wide",
            Self::PerResource => "per-resource",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TemplateDescriptor
// ============================================================================

/// Metadata describing one template without its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    pub template_type: TemplateType,
    /// Path of the entry inside the store, suffix included.
    pub source_path: String,
    pub category: TemplateCategory,
    /// Output path with placeholder tokens, suffix removed.
    pub output_skeleton: String,
}

impl TemplateDescriptor {
    /// Build a descriptor for a store entry, or `None` if the entry is not a
    /// template.
    pub fn from_source_path(source_path: &str) -> Option<Self> {
        let normalized = source_path.replace('\\', "/");
        let skeleton = normalized.strip_suffix(TEMPLATE_SUFFIX)?;
        if skeleton.is_empty() || skeleton.ends_with('/') {
            return None;
        }

        Some(Self {
            template_type: TemplateType::derive(skeleton),
            category: TemplateCategory::classify(skeleton),
            output_skeleton: skeleton.to_string(),
            source_path: normalized,
        })
    }
}

// ============================================================================
// TemplateCatalog
// ============================================================================

/// Immutable snapshot of the templates discovered in one store.
///
/// Built once per process and shared by reference with every builder.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    descriptors: BTreeMap<TemplateType, TemplateDescriptor>,
}

impl TemplateCatalog {
    /// Collect descriptors, rejecting identifier collisions.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = TemplateDescriptor>,
    ) -> Result<Self, DomainError> {
        let mut map: BTreeMap<TemplateType, TemplateDescriptor> = BTreeMap::new();

        for descriptor in descriptors {
            if let Some(existing) = map.get(&descriptor.template_type) {
                return Err(DomainError::IdentifierCollision {
                    identifier: descriptor.template_type.to_string(),
                    first: existing.source_path.clone(),
                    second: descriptor.source_path,
                });
            }
            map.insert(descriptor.template_type.clone(), descriptor);
        }

        Ok(Self { descriptors: map })
    }

    pub fn get(&self, template_type: &TemplateType) -> Option<&TemplateDescriptor> {
        self.descriptors.get(template_type)
    }

    /// Descriptors in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateDescriptor> {
        self.descriptors.values()
    }

    pub fn by_category(
        &self,
        category: TemplateCategory,
    ) -> impl Iterator<Item = &TemplateDescriptor> {
        self.iter().filter(move |d| d.category == category)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_concatenates_capitalized_fragments() {
        assert_eq!(
            TemplateType::derive("project/apis/GROUP/VERSION/KIND_types.go").as_str(),
            "ApisGroupVersionKindTypesGo"
        );
        assert_eq!(TemplateType::derive("project/go.mod").as_str(), "GoMod");
        assert_eq!(TemplateType::derive("project/.gitignore").as_str(), "Gitignore");
        assert_eq!(
            TemplateType::derive("project/cluster/images/IMAGE_NAME/Dockerfile").as_str(),
            "ClusterImagesImageNameDockerfile"
        );
    }

    #[test]
    fn identifier_ignores_root_container_only_when_leading() {
        assert_eq!(TemplateType::derive("go.mod"), TemplateType::derive("project/go.mod"));
        assert_eq!(
            TemplateType::derive("docs/project/notes.md").as_str(),
            "DocsProjectNotesMd"
        );
    }

    #[test]
    fn classify_per_resource_by_tokens() {
        assert_eq!(
            TemplateCategory::classify("project/apis/GROUP/VERSION/doc.go"),
            TemplateCategory::PerResource
        );
        assert_eq!(
            TemplateCategory::classify("project/internal/controller/GROUP/KIND/KIND.go"),
            TemplateCategory::PerResource
        );
    }

    #[test]
    fn classify_static_only_at_root() {
        assert_eq!(TemplateCategory::classify("project/LICENSE"), TemplateCategory::Static);
        assert_eq!(TemplateCategory::classify(".gitignore"), TemplateCategory::Static);
        assert_eq!(
            TemplateCategory::classify("project/docs/LICENSE"),
            TemplateCategory::ProjectWide
        );
    }

    #[test]
    fn classify_defaults_to_project_wide() {
        assert_eq!(
            TemplateCategory::classify("project/apis/IMAGE_NAME.go"),
            TemplateCategory::ProjectWide
        );
        assert_eq!(TemplateCategory::classify("project/Makefile"), TemplateCategory::ProjectWide);
    }

    #[test]
    fn descriptor_requires_suffix() {
        assert!(TemplateDescriptor::from_source_path("project/README.md").is_none());
        assert!(TemplateDescriptor::from_source_path(".tmpl").is_none());

        let d = TemplateDescriptor::from_source_path("project/apis/GROUP/VERSION/doc.go.tmpl")
            .unwrap();
        assert_eq!(d.output_skeleton, "project/apis/GROUP/VERSION/doc.go");
        assert_eq!(d.template_type.as_str(), "ApisGroupVersionDocGo");
        assert_eq!(d.category, TemplateCategory::PerResource);
    }

    #[test]
    fn catalog_rejects_collisions() {
        let a = TemplateDescriptor::from_source_path("project/a_b.go.tmpl").unwrap();
        let b = TemplateDescriptor::from_source_path("project/a-b.go.tmpl").unwrap();

        let err = TemplateCatalog::from_descriptors([a, b]).unwrap_err();
        assert!(matches!(err, DomainError::IdentifierCollision { ref identifier, .. } if identifier == "ABGo"));
    }

    #[test]
    fn catalog_filters_by_category() {
        let catalog = TemplateCatalog::from_descriptors(
            ["project/go.mod.tmpl", "project/LICENSE.tmpl", "project/apis/GROUP/doc.go.tmpl"]
                .into_iter()
                .filter_map(TemplateDescriptor::from_source_path),
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.by_category(TemplateCategory::Static).count(), 1);
        assert_eq!(catalog.by_category(TemplateCategory::PerResource).count(), 1);
        assert!(catalog.get(&TemplateType::from("GoMod")).is_some());
    }
}
