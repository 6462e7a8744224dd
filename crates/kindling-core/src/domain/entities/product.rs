//! Template products: configured, path-resolved, body-resolved artifacts.
//!
//! ## Lifecycle
//!
//! ```text
//! TemplateProduct::new(descriptor, raw body)
//!     │
//!     ├── configure(&ProjectConfig)       module path, domain, names, boilerplate
//!     ├── set_resource(descriptor)        per-resource products only
//!     ├── set_force / set_custom_data / set_path_substitutions
//!     │
//!     └── set_template_defaults()         resolves final path + body
//!             │
//!             ▼
//!         path(), render(), exists_policy()
//! ```
//!
//! `set_template_defaults` derives everything from the raw inputs, so calling
//! it twice yields the same product.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::{
    entities::{
        common::RelativePath,
        template::{TemplateCategory, TemplateDescriptor, TemplateType},
    },
    error::DomainError,
    path_template::Substitutions,
    value_objects::{ExistsPolicy, ProjectConfig, ResourceDescriptor},
};

/// License header used when the project config carries none.
pub const DEFAULT_BOILERPLATE: &str = "/*
Copyright {{YEAR}} The {{PROJECT_NAME}} Authors.

Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an \"AS IS\" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/";

// ============================================================================
// RenderContext
// ============================================================================

/// Variables available to template bodies as `{{NAME}}` placeholders.
///
/// | Variable | Example | Bound by |
/// |----------|---------|----------|
/// | `MODULE_PATH` | "github.com/acme/provider-cloud" | `configure` |
/// | `DOMAIN` | "cloud.acme.io" | `configure` |
/// | `PROJECT_NAME`, `IMAGE_NAME` | "provider-cloud" | `configure` |
/// | `YEAR` | "2026" | `configure`, from `ProjectConfig::year` |
/// | `BOILERPLATE` | license header | `configure` |
/// | `GROUP`, `VERSION`, `KIND` | "compute", "v1alpha1", "Instance" | resource |
/// | `KIND_LOWER`, `KIND_PLURAL` | "instance", "instances" | resource |
/// | `GROUP_DOMAIN` | "compute.cloud.acme.io" | resource |
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` with its value.
    ///
    /// - `{{UNKNOWN}}` stays as a literal `{{UNKNOWN}}`
    /// - values are not re-scanned for placeholders
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];

            match after.find("}}") {
                Some(end) => {
                    let key = &after[..end];
                    match self.variables.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(key);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

// ============================================================================
// TemplateProduct
// ============================================================================

/// One file ready to be written.
#[derive(Debug, Clone)]
pub struct TemplateProduct {
    descriptor: TemplateDescriptor,
    raw_body: String,
    context: RenderContext,
    substitutions: Substitutions,
    resource: Option<ResourceDescriptor>,
    custom_data: BTreeMap<String, String>,
    exists_policy: ExistsPolicy,
    path: Option<RelativePath>,
    body: Option<String>,
}

impl TemplateProduct {
    pub fn new(descriptor: TemplateDescriptor, raw_body: impl Into<String>) -> Self {
        Self {
            descriptor,
            raw_body: raw_body.into(),
            context: RenderContext::new(),
            substitutions: Substitutions::new(),
            resource: None,
            custom_data: BTreeMap::new(),
            exists_policy: ExistsPolicy::Error,
            path: None,
            body: None,
        }
    }

    /// Bind project-level variables and the resolved boilerplate.
    pub fn configure(&mut self, config: &ProjectConfig) {
        let project_name = config.derived_project_name();
        let year = config
            .year
            .unwrap_or_else(|| chrono::Local::now().year())
            .to_string();

        let boilerplate = RenderContext::new()
            .with_variable("YEAR", year.clone())
            .with_variable("PROJECT_NAME", project_name.clone())
            .render(config.boilerplate.as_deref().unwrap_or(DEFAULT_BOILERPLATE));

        self.context.set("MODULE_PATH", config.module_path.trim_end_matches('/'));
        self.context.set("DOMAIN", config.domain.clone());
        self.context.set("PROJECT_NAME", project_name.clone());
        self.context.set("IMAGE_NAME", project_name);
        self.context.set("YEAR", year);
        self.context.set("BOILERPLATE", boilerplate);
    }

    /// Bind the resource this product is generated for.
    ///
    /// # Errors
    ///
    /// `ResourceNotApplicable` unless the template is per-resource.
    pub fn set_resource(&mut self, resource: ResourceDescriptor) -> Result<(), DomainError> {
        if self.descriptor.category != TemplateCategory::PerResource {
            return Err(DomainError::ResourceNotApplicable {
                template_type: self.descriptor.template_type.to_string(),
            });
        }
        self.resource = Some(resource);
        Ok(())
    }

    pub fn set_force(&mut self, force: bool) {
        if force {
            self.exists_policy = ExistsPolicy::Overwrite;
        }
    }

    pub fn set_custom_data(&mut self, data: BTreeMap<String, String>) {
        self.custom_data.extend(data);
    }

    pub fn set_path_substitutions(&mut self, substitutions: Substitutions) {
        self.substitutions = substitutions;
    }

    /// Resolve the final path and body from everything bound so far.
    pub fn set_template_defaults(&mut self) -> Result<(), DomainError> {
        let rendered_path = self.substitutions.render(&self.descriptor.output_skeleton);
        let path = RelativePath::try_new(rendered_path)?;

        let body = match self.descriptor.category {
            TemplateCategory::Static => self.raw_body.clone(),
            TemplateCategory::ProjectWide | TemplateCategory::PerResource => {
                self.body_context().render(&self.raw_body)
            }
        };

        self.path = Some(path);
        self.body = Some(body);
        Ok(())
    }

    fn body_context(&self) -> RenderContext {
        let mut ctx = self.context.clone();

        if let Some(resource) = &self.resource {
            let domain = ctx.get("DOMAIN").unwrap_or_default().to_string();
            ctx.set("GROUP", resource.group_lower());
            ctx.set("VERSION", resource.version_lower());
            ctx.set("KIND", resource.kind.clone());
            ctx.set("KIND_LOWER", resource.kind_lower());
            ctx.set("KIND_PLURAL", resource.kind_plural());
            ctx.set("GROUP_DOMAIN", resource.group_domain(&domain));
        }

        for (key, value) in &self.custom_data {
            ctx.set(key.clone(), value.clone());
        }

        ctx
    }

    pub fn template_type(&self) -> &TemplateType {
        &self.descriptor.template_type
    }

    pub fn category(&self) -> TemplateCategory {
        self.descriptor.category
    }

    pub fn descriptor(&self) -> &TemplateDescriptor {
        &self.descriptor
    }

    pub fn resource(&self) -> Option<&ResourceDescriptor> {
        self.resource.as_ref()
    }

    pub fn exists_policy(&self) -> ExistsPolicy {
        self.exists_policy
    }

    pub fn is_finalized(&self) -> bool {
        self.path.is_some() && self.body.is_some()
    }

    /// Resolved output path, relative to the project root.
    pub fn path(&self) -> Result<&RelativePath, DomainError> {
        self.path.as_ref().ok_or_else(|| self.not_finalized())
    }

    /// Resolved file body.
    pub fn render(&self) -> Result<&str, DomainError> {
        self.body.as_deref().ok_or_else(|| self.not_finalized())
    }

    fn not_finalized(&self) -> DomainError {
        DomainError::ProductNotFinalized {
            template_type: self.descriptor.template_type.to_string(),
        }
    }
}
