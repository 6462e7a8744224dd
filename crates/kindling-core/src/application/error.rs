//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No descriptor of the builder's category carries this identifier.
    #[error("Template not found: {template_type}")]
    TemplateNotFound { template_type: String },

    /// A per-resource template was requested without a resource.
    #[error("Template '{template_type}' is per-resource and needs a group/version/kind")]
    ResourceRequired { template_type: String },

    /// The template store could not be enumerated.
    #[error("Template store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// Target exists and the product's policy forbids overwriting it.
    #[error("Refusing to overwrite existing file {path}")]
    ExistingFileConflict { path: PathBuf },

    /// Reading failed for a reason other than "not found".
    #[error("Failed to read {path}: {reason}")]
    ReadFailure { path: PathBuf, reason: String },

    #[error("Failed to write {path}: {reason}")]
    WriteFailure { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { template_type } => vec![
                format!("No template is named '{}'", template_type),
                "Try: kindling list to see available templates".into(),
            ],
            Self::ResourceRequired { .. } => vec![
                "Pass --group, --version and --kind to 'kindling create api'".into(),
            ],
            Self::StoreUnavailable { .. } => vec![
                "Check that the templates directory exists and is readable".into(),
                "Unset KINDLING_TEMPLATES_DIR to use the bundled templates".into(),
            ],
            Self::ExistingFileConflict { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
            ],
            Self::ReadFailure { path, .. } | Self::WriteFailure { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ExistingFileConflict { .. } => ErrorCategory::Conflict,
            Self::StoreUnavailable { .. } => ErrorCategory::Configuration,
            Self::ResourceRequired { .. }
            | Self::ReadFailure { .. }
            | Self::WriteFailure { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
