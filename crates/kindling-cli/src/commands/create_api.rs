//! `kindling create api`: generate one group/version/kind and register it.

use tracing::debug;

use kindling_core::prelude::{DomainValidator, ResourceDescriptor};

use crate::{
    cli::CreateApiArgs,
    commands::{ensure_generated, scaffold_service},
    config::{AppConfig, resolve_dir},
    error::{CliError, CliResult},
    output::OutputManager,
    project_file::ProjectFile,
};

pub fn execute(args: CreateApiArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = resolve_dir(&args.dir);
    let mut project = ProjectFile::load(&root)?;

    let resource = ResourceDescriptor::new(args.group.trim(), args.version.trim(), args.kind.trim());
    DomainValidator::validate_resource(&resource).map_err(|e| CliError::InvalidInput {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })?;

    output.info(&format!("Creating API {resource} in {}", root.display()))?;

    // Project files written before the year was recorded get it now.
    let unpinned = project.year.is_none();
    project.pin_year();

    let service = scaffold_service(&config)?;
    let report = service.add_resource(&root, &project.project_config(), &resource, args.force)?;

    if project.add_resource(&resource) || unpinned {
        project.save(&root)?;
    } else {
        debug!(resource = %resource, "Resource already recorded in project file");
    }

    output.report(&format!("API {resource} created"), &report)?;
    ensure_generated(&report)
}
