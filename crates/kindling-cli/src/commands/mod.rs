//! Command handlers. Each `execute` turns parsed arguments into calls on the
//! core services and reports the outcome through the [`OutputManager`].
//!
//! [`OutputManager`]: crate::output::OutputManager

use tracing::debug;

use kindling_adapters::{DirectoryStore, InMemoryStore, LocalFilesystem};
use kindling_core::prelude::{GenerationReport, ScaffoldService, TemplateStore};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

pub mod completions;
pub mod create_api;
pub mod init;
pub mod list;

/// Template store selected by configuration: a user directory when one is
/// configured, the bundled templates otherwise.
pub fn template_store(config: &AppConfig) -> CliResult<Box<dyn TemplateStore>> {
    match config.templates_dir() {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using template directory");
            Ok(Box::new(DirectoryStore::new(dir)))
        }
        None => Ok(Box::new(InMemoryStore::with_builtin()?)),
    }
}

/// Scaffold service over the configured store and the local filesystem.
pub fn scaffold_service(config: &AppConfig) -> CliResult<ScaffoldService> {
    let store = template_store(config)?;
    Ok(ScaffoldService::new(store, Box::new(LocalFilesystem::new()))?)
}

/// Fail the command when any file could not be generated. Conflicts alone
/// are not a failure.
pub fn ensure_generated(report: &GenerationReport) -> CliResult<()> {
    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::GenerationFailed {
            count: report.failures.len(),
        })
    }
}
