//! Product Factory - one builder per template category.
//!
//! ```text
//! build(type, config, options)
//!     │  catalog lookup ──► TemplateNotFound
//!     ▼
//! builder for descriptor.category
//!     │  substitutions ──► ResourceRequired (per-resource only)
//!     ▼
//! configure → set_resource → force / custom data → set_template_defaults
//! ```
//!
//! No filesystem access happens here; the only I/O is reading the template
//! body from the store.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, services::TemplateService},
    domain::{
        ProductOptions, ProjectConfig, ResourceDescriptor, Substitutions, TemplateCatalog,
        TemplateCategory, TemplateDescriptor, TemplateProduct, TemplateType,
        path_template::{TOKEN_GROUP, TOKEN_IMAGE_NAME, TOKEN_KIND, TOKEN_VERSION},
    },
    error::{Context, KindlingResult},
};

/// Category-specific construction steps.
pub trait ProductBuilder: Send + Sync {
    fn category(&self) -> TemplateCategory;

    /// Path bindings for one build.
    fn substitutions(
        &self,
        descriptor: &TemplateDescriptor,
        config: &ProjectConfig,
        resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<Substitutions>;

    /// Bind the resource to the product, where the category allows one.
    fn bind_resource(
        &self,
        _product: &mut TemplateProduct,
        _resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<()> {
        Ok(())
    }

    /// Run the product lifecycle for an already located descriptor.
    fn build(
        &self,
        descriptor: &TemplateDescriptor,
        body: String,
        config: &ProjectConfig,
        options: &ProductOptions,
    ) -> KindlingResult<TemplateProduct> {
        if descriptor.category != self.category() {
            return Err(ApplicationError::TemplateNotFound {
                template_type: descriptor.template_type.to_string(),
            }
            .into());
        }

        let substitutions = self.substitutions(descriptor, config, options.resource.as_ref())?;

        let mut product = TemplateProduct::new(descriptor.clone(), body);
        product.configure(config);
        self.bind_resource(&mut product, options.resource.as_ref())?;
        product.set_force(options.force);
        product.set_custom_data(options.custom_data.clone());
        product.set_path_substitutions(substitutions);
        product.set_template_defaults()?;

        Ok(product)
    }
}

fn base_substitutions(config: &ProjectConfig) -> Substitutions {
    Substitutions::new().bind(TOKEN_IMAGE_NAME, config.derived_project_name())
}

/// Files generated once per project.
pub struct ProjectWideBuilder;

impl ProductBuilder for ProjectWideBuilder {
    fn category(&self) -> TemplateCategory {
        TemplateCategory::ProjectWide
    }

    fn substitutions(
        &self,
        _descriptor: &TemplateDescriptor,
        config: &ProjectConfig,
        _resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<Substitutions> {
        Ok(base_substitutions(config))
    }
}

/// Files generated once per group/version/kind.
pub struct PerResourceBuilder;

impl ProductBuilder for PerResourceBuilder {
    fn category(&self) -> TemplateCategory {
        TemplateCategory::PerResource
    }

    fn substitutions(
        &self,
        descriptor: &TemplateDescriptor,
        config: &ProjectConfig,
        resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<Substitutions> {
        let resource = resource.ok_or_else(|| ApplicationError::ResourceRequired {
            template_type: descriptor.template_type.to_string(),
        })?;

        Ok(base_substitutions(config)
            .bind(TOKEN_GROUP, resource.group_lower())
            .bind(TOKEN_VERSION, resource.version_lower())
            .bind(TOKEN_KIND, resource.kind_lower()))
    }

    fn bind_resource(
        &self,
        product: &mut TemplateProduct,
        resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<()> {
        if let Some(resource) = resource {
            product.set_resource(resource.clone())?;
        }
        Ok(())
    }
}

/// One-off files copied verbatim.
pub struct StaticBuilder;

impl ProductBuilder for StaticBuilder {
    fn category(&self) -> TemplateCategory {
        TemplateCategory::Static
    }

    fn substitutions(
        &self,
        _descriptor: &TemplateDescriptor,
        config: &ProjectConfig,
        _resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<Substitutions> {
        Ok(base_substitutions(config))
    }
}

/// Turns template identifiers into finished products.
pub struct ProductFactory {
    catalog: Arc<TemplateCatalog>,
    templates: Arc<TemplateService>,
    builders: Vec<Box<dyn ProductBuilder>>,
}

impl ProductFactory {
    pub fn new(catalog: Arc<TemplateCatalog>, templates: Arc<TemplateService>) -> Self {
        Self {
            catalog,
            templates,
            builders: vec![
                Box::new(ProjectWideBuilder),
                Box::new(PerResourceBuilder),
                Box::new(StaticBuilder),
            ],
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    /// Build the product for `template_type`.
    #[instrument(skip(self, config, options), fields(template = %template_type))]
    pub fn build(
        &self,
        template_type: &TemplateType,
        config: &ProjectConfig,
        options: &ProductOptions,
    ) -> KindlingResult<TemplateProduct> {
        let descriptor =
            self.catalog
                .get(template_type)
                .ok_or_else(|| ApplicationError::TemplateNotFound {
                    template_type: template_type.to_string(),
                })?;

        let builder = self
            .builders
            .iter()
            .find(|b| b.category() == descriptor.category)
            .ok_or_else(|| ApplicationError::TemplateNotFound {
                template_type: template_type.to_string(),
            })?;

        let body = self.templates.load_body(descriptor)?;
        let product = builder
            .build(descriptor, body, config, options)
            .with_context(|| format!("building {template_type}"))?;

        debug!(category = %descriptor.category, "Product built");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockTemplateStore, TemplateStore};
    use crate::domain::ExistsPolicy;
    use crate::error::KindlingError;

    fn factory(entries: &'static [(&'static str, &'static str)]) -> ProductFactory {
        let mut store = MockTemplateStore::new();
        store
            .expect_list()
            .returning(move || Ok(entries.iter().map(|(p, _)| p.to_string()).collect()));
        store.expect_read().returning(move |path| {
            entries
                .iter()
                .find(|(p, _)| *p == path)
                .map(|(_, body)| body.as_bytes().to_vec())
                .ok_or_else(|| {
                    ApplicationError::ReadFailure {
                        path: path.into(),
                        reason: "missing".into(),
                    }
                    .into()
                })
        });

        let store: Arc<dyn TemplateStore> = Arc::new(store);
        let templates = Arc::new(TemplateService::new(store));
        let catalog = Arc::new(templates.discover().unwrap());
        ProductFactory::new(catalog, templates)
    }

    const ENTRIES: &[(&str, &str)] = &[
        ("project/apis/GROUP/VERSION/types.go.tmpl", "package {{VERSION}}\n"),
        ("project/cluster/images/IMAGE_NAME/Dockerfile.tmpl", "FROM scratch\n"),
        ("project/LICENSE.tmpl", "Copyright {{YEAR}}\n"),
        ("project/README.md.tmpl", "# {{PROJECT_NAME}}\n\nMaintained by {{OWNER}}.\n"),
    ];

    fn config() -> ProjectConfig {
        ProjectConfig::new("github.com/acme/provider-cloud", "cloud.acme.io")
    }

    #[test]
    fn per_resource_path_is_substituted() {
        let product = factory(ENTRIES)
            .build(
                &TemplateType::from("ApisGroupVersionTypesGo"),
                &config(),
                &ProductOptions::new().resource(ResourceDescriptor::new(
                    "compute", "v1alpha1", "Instance",
                )),
            )
            .unwrap();

        assert_eq!(product.path().unwrap().as_str(), "apis/compute/v1alpha1/types.go");
        assert_eq!(product.render().unwrap(), "package v1alpha1\n");
    }

    #[test]
    fn per_resource_without_resource_is_rejected() {
        let err = factory(ENTRIES)
            .build(
                &TemplateType::from("ApisGroupVersionTypesGo"),
                &config(),
                &ProductOptions::new(),
            )
            .unwrap_err();
        assert!(matches!(
            err.root(),
            KindlingError::Application(ApplicationError::ResourceRequired { .. })
        ));
    }

    #[test]
    fn unknown_type_is_not_found() {
        let err = factory(ENTRIES)
            .build(&TemplateType::from("Nope"), &config(), &ProductOptions::new())
            .unwrap_err();
        assert!(matches!(
            err,
            KindlingError::Application(ApplicationError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn project_wide_binds_image_name() {
        let product = factory(ENTRIES)
            .build(
                &TemplateType::from("ClusterImagesImageNameDockerfile"),
                &config(),
                &ProductOptions::new().force(true),
            )
            .unwrap();
        assert_eq!(
            product.path().unwrap().as_str(),
            "cluster/images/provider-cloud/Dockerfile"
        );
        assert_eq!(product.exists_policy(), ExistsPolicy::Overwrite);
    }

    #[test]
    fn static_body_is_verbatim() {
        let product = factory(ENTRIES)
            .build(&TemplateType::from("License"), &config(), &ProductOptions::new())
            .unwrap();
        assert_eq!(product.render().unwrap(), "Copyright {{YEAR}}\n");
    }

    #[test]
    fn options_data_reaches_rendered_body() {
        let product = factory(ENTRIES)
            .build(
                &TemplateType::derive("project/README.md"),
                &config(),
                &ProductOptions::new()
                    .data("OWNER", "acme")
                    .data("PROJECT_NAME", "cloud"),
            )
            .unwrap();
        assert_eq!(product.render().unwrap(), "# cloud\n\nMaintained by acme.\n");
    }

    #[test]
    fn builder_rejects_foreign_category() {
        let descriptor = TemplateDescriptor::from_source_path("project/LICENSE.tmpl").unwrap();
        let result = ProjectWideBuilder.build(
            &descriptor,
            String::new(),
            &config(),
            &ProductOptions::new(),
        );
        assert!(result.is_err());
    }
}
