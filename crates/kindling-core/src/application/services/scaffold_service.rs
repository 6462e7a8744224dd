//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the generation workflows:
//! 1. Discover templates once, at construction
//! 2. Build products through the factory
//! 3. Write them under their existence policy
//! 4. Re-render aggregators from the previous file plus the new resource
//!
//! A failure on one file is recorded in the [`GenerationReport`] and the
//! remaining files are still generated.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateStore},
        services::{ProductFactory, TemplateInfo, TemplateService},
    },
    domain::{
        AggregatorDocument, AggregatorKind, DomainError, DomainValidator as validator,
        ExistsPolicy, ProductOptions, ProjectConfig, ResourceDescriptor, TemplateCatalog,
        TemplateCategory, TemplateProduct, TemplateType,
    },
    error::{Context, KindlingError, KindlingResult},
};

/// A file that could not be generated.
#[derive(Debug, Clone)]
pub struct FileFailure {
    /// Template identifier or output path, whichever is known.
    pub target: String,
    pub error: KindlingError,
}

/// Outcome of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Paths written, relative to the project root.
    pub written: Vec<PathBuf>,
    /// Targets skipped because they exist and the policy forbids overwriting,
    /// relative to the project root.
    pub conflicts: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    fn record(&mut self, root: &Path, target: String, outcome: KindlingResult<PathBuf>) {
        let error = match outcome {
            Ok(path) => {
                self.written.push(path);
                return;
            }
            Err(error) => error,
        };

        if let KindlingError::Application(ApplicationError::ExistingFileConflict { path }) =
            error.root()
        {
            warn!(path = %path.display(), "Skipping existing file");
            let relative = path.strip_prefix(root).unwrap_or(path);
            self.conflicts.push(relative.to_path_buf());
            return;
        }

        warn!(target = %target, error = %error, "File generation failed");
        self.failures.push(FileFailure { target, error });
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    factory: ProductFactory,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// Discovery runs here, once; an unreadable store fails construction.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use kindling_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(store),      // impl TemplateStore
    ///     Box::new(filesystem), // impl Filesystem
    /// )?;
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        filesystem: Box<dyn Filesystem>,
    ) -> KindlingResult<Self> {
        let templates = Arc::new(TemplateService::new(Arc::from(store)));
        let catalog = Arc::new(templates.discover()?);
        let factory = ProductFactory::new(catalog, Arc::clone(&templates));

        Ok(Self {
            factory,
            filesystem,
        })
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        self.factory.catalog()
    }

    /// List all available templates.
    pub fn list_templates(&self) -> Vec<TemplateInfo> {
        TemplateService::list(self.catalog())
    }

    /// Build one product.
    pub fn build_product(
        &self,
        template_type: &TemplateType,
        config: &ProjectConfig,
        options: &ProductOptions,
    ) -> KindlingResult<TemplateProduct> {
        self.factory.build(template_type, config, options)
    }

    /// Write a finished product under `root`, honouring its existence policy.
    ///
    /// Returns the path written, relative to `root`.
    #[instrument(skip_all, fields(template = %product.template_type()))]
    pub fn write_product(&self, product: &TemplateProduct, root: &Path) -> KindlingResult<PathBuf> {
        let relative = product.path()?;
        let target = relative.under(root);

        self.filesystem
            .write_file(&target, product.render()?, product.exists_policy())
            .with_context(|| format!("writing {}", relative))?;

        info!(path = %relative, "Wrote file");
        Ok(relative.as_path().to_path_buf())
    }

    /// Render an aggregator file, merging the entries of any existing copy.
    ///
    /// A missing file starts from empty lists. A file that exists but cannot
    /// be read fails this aggregator only.
    #[instrument(skip(self, root, config))]
    pub fn render_aggregator(
        &self,
        kind: AggregatorKind,
        root: &Path,
        config: &ProjectConfig,
        resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<String> {
        let (product, text) = self.merge_aggregator(kind, root, config, resource)?;
        let relative = product.path()?;
        debug!(path = %relative, "Aggregator rendered");
        Ok(text)
    }

    /// Render and write an aggregator. Aggregators are always overwritten.
    pub fn update_aggregator(
        &self,
        kind: AggregatorKind,
        root: &Path,
        config: &ProjectConfig,
        resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<PathBuf> {
        let (product, text) = self.merge_aggregator(kind, root, config, resource)?;
        let relative = product.path()?;

        self.filesystem
            .write_file(&relative.under(root), &text, ExistsPolicy::Overwrite)
            .with_context(|| format!("writing {}", relative))?;

        info!(path = %relative, aggregator = %kind, "Updated aggregator");
        Ok(relative.as_path().to_path_buf())
    }

    fn merge_aggregator(
        &self,
        kind: AggregatorKind,
        root: &Path,
        config: &ProjectConfig,
        resource: Option<&ResourceDescriptor>,
    ) -> KindlingResult<(TemplateProduct, String)> {
        let product = self.factory.build(
            &kind.template_type(),
            config,
            &ProductOptions::new().force(true),
        )?;
        let relative = product.path()?;

        let existing = self
            .filesystem
            .read_file(&relative.under(root))
            .with_context(|| format!("reading aggregator {}", relative))?;

        let mut document = existing
            .as_deref()
            .map(AggregatorDocument::parse)
            .unwrap_or_default();
        if let Some(resource) = resource {
            document.add_resource(kind, &config.module_path, resource);
        }

        let text = document.render_into(product.render()?);
        Ok((product, text))
    }

    /// Generate every project-wide and static file plus both aggregators.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn init_project(
        &self,
        root: &Path,
        config: &ProjectConfig,
        force: bool,
    ) -> KindlingResult<GenerationReport> {
        validator::validate_config(config)?;
        self.filesystem.create_dir_all(root)?;

        let aggregators: Vec<TemplateType> =
            AggregatorKind::ALL.iter().map(|k| k.template_type()).collect();
        let options = ProductOptions::new().force(force);
        let mut report = GenerationReport::default();

        let types: Vec<TemplateType> = self
            .catalog()
            .iter()
            .filter(|d| {
                matches!(d.category, TemplateCategory::ProjectWide | TemplateCategory::Static)
            })
            .map(|d| d.template_type.clone())
            .filter(|t| !aggregators.contains(t))
            .collect();

        for template_type in types {
            let outcome = self
                .factory
                .build(&template_type, config, &options)
                .and_then(|product| self.write_product(&product, root));
            report.record(root, template_type.to_string(), outcome);
        }

        self.refresh_aggregators(&mut report, root, config, None);

        info!(
            written = report.written.len(),
            conflicts = report.conflicts.len(),
            failures = report.failures.len(),
            "Project initialized"
        );
        Ok(report)
    }

    /// Generate every per-resource file, then register the resource with both
    /// aggregators.
    #[instrument(skip_all, fields(root = %root.display(), resource = %resource))]
    pub fn add_resource(
        &self,
        root: &Path,
        config: &ProjectConfig,
        resource: &ResourceDescriptor,
        force: bool,
    ) -> KindlingResult<GenerationReport> {
        validator::validate_config(config)?;
        validator::validate_resource(resource)?;
        if resource.is_base() {
            return Err(DomainError::InvalidResource {
                resource: resource.to_string(),
                reason: "the base API is generated by 'init'; a group is required".into(),
            }
            .into());
        }

        let options = ProductOptions::new().force(force).resource(resource.clone());
        let mut report = GenerationReport::default();

        let types: Vec<TemplateType> = self
            .catalog()
            .by_category(TemplateCategory::PerResource)
            .map(|d| d.template_type.clone())
            .collect();

        for template_type in types {
            let outcome = self
                .factory
                .build(&template_type, config, &options)
                .and_then(|product| self.write_product(&product, root));
            report.record(root, template_type.to_string(), outcome);
        }

        self.refresh_aggregators(&mut report, root, config, Some(resource));

        info!(
            written = report.written.len(),
            conflicts = report.conflicts.len(),
            failures = report.failures.len(),
            "Resource added"
        );
        Ok(report)
    }

    fn refresh_aggregators(
        &self,
        report: &mut GenerationReport,
        root: &Path,
        config: &ProjectConfig,
        resource: Option<&ResourceDescriptor>,
    ) {
        for kind in AggregatorKind::ALL {
            if self.catalog().get(&kind.template_type()).is_none() {
                debug!(aggregator = %kind, "No aggregator template; skipping");
                continue;
            }
            let outcome = self.update_aggregator(kind, root, config, resource);
            report.record(root, kind.template_type().to_string(), outcome);
        }
    }
}
