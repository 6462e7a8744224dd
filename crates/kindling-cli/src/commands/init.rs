//! `kindling init`: generate the project skeleton and write `kindling.toml`.

use tracing::{info, warn};

use kindling_core::prelude::{DomainValidator, ProjectConfig};

use crate::{
    cli::InitArgs,
    commands::{ensure_generated, scaffold_service},
    config::{AppConfig, resolve_dir},
    error::{CliError, CliResult},
    output::OutputManager,
    project_file::ProjectFile,
};

pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let root = resolve_dir(&args.dir);

    let previous = match ProjectFile::load(&root) {
        Ok(file) => Some(file),
        Err(CliError::ProjectNotFound { .. }) => None,
        Err(e) if args.force => {
            warn!(error = %e, "Replacing unreadable project file");
            None
        }
        Err(e) => return Err(e),
    };
    if previous.is_some() && !args.force {
        return Err(CliError::ProjectExists { path: root });
    }

    let mut file = ProjectFile::new(&project_config(&args, &config));
    // Resources and year recorded by an earlier init survive a forced re-init.
    if let Some(previous) = previous {
        file.resources = previous.resources;
        file.year = previous.year;
    }
    file.pin_year();

    let project = file.project_config();
    DomainValidator::validate_config(&project).map_err(|e| CliError::InvalidInput {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })?;

    output.info(&format!(
        "Initialising {} ({}) in {}",
        project.derived_project_name(),
        project.module_path,
        root.display()
    ))?;

    let service = scaffold_service(&config)?;
    let report = service.init_project(&root, &project, args.force)?;

    file.save(&root)?;
    info!(root = %root.display(), "Project file written");

    output.report("Project initialised", &report)?;
    ensure_generated(&report)
}

fn project_config(args: &InitArgs, config: &AppConfig) -> ProjectConfig {
    let module = config.qualify_module(args.module.trim());
    let domain = args
        .domain
        .as_deref()
        .map(str::trim)
        .unwrap_or(config.defaults.domain.as_str())
        .to_string();

    let project = ProjectConfig::new(module, domain);
    match args.project_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => project.with_project_name(name),
        _ => project,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(module: &str, domain: Option<&str>) -> InitArgs {
        InitArgs {
            module: module.into(),
            domain: domain.map(Into::into),
            project_name: None,
            dir: PathBuf::from("."),
            force: false,
        }
    }

    #[test]
    fn domain_falls_back_to_config_default() {
        let mut config = AppConfig::default();
        config.defaults.domain = "cloud.acme.io".into();
        let project = project_config(&args("github.com/acme/provider-cloud", None), &config);
        assert_eq!(project.domain, "cloud.acme.io");
    }

    #[test]
    fn explicit_domain_wins() {
        let project = project_config(
            &args("github.com/acme/provider-cloud", Some("x.io")),
            &AppConfig::default(),
        );
        assert_eq!(project.domain, "x.io");
    }

    #[test]
    fn blank_project_name_is_ignored() {
        let mut a = args("github.com/acme/provider-cloud", None);
        a.project_name = Some("  ".into());
        let project = project_config(&a, &AppConfig::default());
        assert_eq!(project.project_name, None);
        assert_eq!(project.derived_project_name(), "provider-cloud");
    }
}
