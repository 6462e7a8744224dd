// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can hold them alongside the file they belong to)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid resource '{resource}': {reason}")]
    InvalidResource { resource: String, reason: String },

    #[error("Invalid project configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Template Store Integrity
    // ========================================================================
    #[error("Templates '{first}' and '{second}' both derive the identifier '{identifier}'")]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Template '{template_type}' is not per-resource and cannot bind a resource")]
    ResourceNotApplicable { template_type: String },

    #[error("Template product '{template_type}' was used before its defaults were set")]
    ProductNotFinalized { template_type: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidResource { reason, .. } => vec![
                format!("Details: {}", reason),
                "Groups are lowercase DNS labels, e.g. 'compute'".into(),
                "Versions look like 'v1', 'v1alpha1' or 'v2beta3'".into(),
                "Kinds are UpperCamelCase, e.g. 'Instance'".into(),
            ],
            Self::InvalidConfiguration(msg) => vec![
                "Check the module path and domain passed to 'kindling init'".into(),
                format!("Details: {}", msg),
            ],
            Self::IdentifierCollision { first, second, .. } => vec![
                format!("Rename either '{}' or '{}' in the template store", first, second),
                "Template identifiers must be unique within one store".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidResource { .. }
            | Self::InvalidConfiguration(_)
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::IdentifierCollision { .. }
            | Self::ResourceNotApplicable { .. }
            | Self::ProductNotFinalized { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Internal,
}
