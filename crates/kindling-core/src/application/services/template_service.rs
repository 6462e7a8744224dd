//! Template Service - discovery and listing.
//!
//! Walks the template store once and turns its entries into a
//! [`TemplateCatalog`]. Separated from ScaffoldService for single
//! responsibility.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{
        TemplateCatalog, TemplateCategory, TemplateDescriptor,
        entities::template::strip_root_container,
    },
    error::{Context, KindlingResult},
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub identifier: String,
    pub category: TemplateCategory,
    pub source_path: String,
    /// Output path with placeholder tokens still in place.
    pub output_path: String,
}

impl From<&TemplateDescriptor> for TemplateInfo {
    fn from(d: &TemplateDescriptor) -> Self {
        Self {
            identifier: d.template_type.to_string(),
            category: d.category,
            source_path: d.source_path.clone(),
            output_path: strip_root_container(&d.output_skeleton).to_string(),
        }
    }
}

/// Service for template operations.
pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(store: Arc<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Enumerate the store and classify every template entry.
    ///
    /// Entries without the template suffix are ignored. A store that cannot
    /// be enumerated fails the whole discovery.
    #[instrument(skip_all)]
    pub fn discover(&self) -> KindlingResult<TemplateCatalog> {
        let entries = self.store.list().context("discovering templates")?;

        let mut descriptors: Vec<TemplateDescriptor> = entries
            .iter()
            .filter_map(|entry| TemplateDescriptor::from_source_path(entry))
            .collect();
        descriptors.sort_by(|a, b| a.source_path.cmp(&b.source_path));

        let catalog = TemplateCatalog::from_descriptors(descriptors)?;
        debug!(
            entries = entries.len(),
            templates = catalog.len(),
            "Template discovery complete"
        );
        Ok(catalog)
    }

    /// Read a template body as UTF-8.
    pub fn load_body(&self, descriptor: &TemplateDescriptor) -> KindlingResult<String> {
        let bytes = self
            .store
            .read(&descriptor.source_path)
            .with_context(|| format!("loading template {}", descriptor.template_type))?;

        String::from_utf8(bytes).map_err(|e| {
            ApplicationError::ReadFailure {
                path: descriptor.source_path.clone().into(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Display listing of a catalog, in identifier order.
    pub fn list(catalog: &TemplateCatalog) -> Vec<TemplateInfo> {
        catalog.iter().map(TemplateInfo::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockTemplateStore;
    use crate::error::KindlingError;

    fn store_with(entries: &[&str]) -> Arc<dyn TemplateStore> {
        let entries: Vec<String> = entries.iter().map(|s| s.to_string()).collect();
        let mut store = MockTemplateStore::new();
        store.expect_list().returning(move || Ok(entries.clone()));
        store
            .expect_read()
            .returning(|path| Ok(format!("body of {path}").into_bytes()));
        Arc::new(store)
    }

    #[test]
    fn discovery_is_idempotent() {
        let service = TemplateService::new(store_with(&[
            "project/go.mod.tmpl",
            "project/apis/GROUP/VERSION/doc.go.tmpl",
            "project/LICENSE.tmpl",
            "project/README.md",
        ]));

        let first = TemplateService::list(&service.discover().unwrap());
        let second = TemplateService::list(&service.discover().unwrap());
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn discovery_fails_when_store_unavailable() {
        let mut store = MockTemplateStore::new();
        store.expect_list().returning(|| {
            Err(ApplicationError::StoreUnavailable {
                reason: "permission denied".into(),
            }
            .into())
        });

        let err = TemplateService::new(Arc::new(store)).discover().unwrap_err();
        assert!(matches!(
            err.root(),
            KindlingError::Application(ApplicationError::StoreUnavailable { .. })
        ));
    }

    #[test]
    fn discovery_rejects_identifier_collisions() {
        let service = TemplateService::new(store_with(&["project/a_b.tmpl", "project/a-b.tmpl"]));
        assert!(service.discover().is_err());
    }

    #[test]
    fn listing_reports_category_and_output_path() {
        let service = TemplateService::new(store_with(&["project/apis/GROUP/VERSION/doc.go.tmpl"]));
        let info = TemplateService::list(&service.discover().unwrap());
        assert_eq!(info[0].identifier, "ApisGroupVersionDocGo");
        assert_eq!(info[0].category, TemplateCategory::PerResource);
        assert_eq!(info[0].output_path, "apis/GROUP/VERSION/doc.go");
    }

    #[test]
    fn load_body_rejects_invalid_utf8() {
        let mut store = MockTemplateStore::new();
        store.expect_read().returning(|_| Ok(vec![0xff, 0xfe]));
        let service = TemplateService::new(Arc::new(store));
        let descriptor = TemplateDescriptor::from_source_path("project/go.mod.tmpl").unwrap();
        assert!(service.load_body(&descriptor).is_err());
    }
}
