//! Unified error handling for kindling core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for kindling core operations.
#[derive(Debug, Error, Clone)]
pub enum KindlingError {
    /// Errors from the domain layer (business logic violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// An error annotated with the template type or path it concerns.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<KindlingError>,
    },
}

impl KindlingError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Context { source, .. } => source.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Context { source, .. } => source.category(),
        }
    }

    /// The innermost error with all context stripped.
    pub fn root(&self) -> &KindlingError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the root cause is an `ExistingFileConflict`.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self.root(),
            Self::Application(ApplicationError::ExistingFileConflict { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type KindlingResult<T> = Result<T, KindlingError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> KindlingResult<T>;

    fn with_context<F, S>(self, f: F) -> KindlingResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: Into<KindlingError>,
{
    fn context(self, msg: impl Into<String>) -> KindlingResult<T> {
        self.map_err(|e| KindlingError::Context {
            context: msg.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F, S>(self, f: F) -> KindlingResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| KindlingError::Context {
            context: f().into(),
            source: Box::new(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn context_wraps_and_preserves_root() {
        let result: Result<(), ApplicationError> = Err(ApplicationError::ExistingFileConflict {
            path: PathBuf::from("go.mod"),
        });
        let err = result.context("writing GoMod").unwrap_err();

        assert_eq!(
            err.to_string(),
            "writing GoMod: Application error: Refusing to overwrite existing file go.mod"
        );
        assert!(err.is_conflict());
        assert_eq!(err.category(), ErrorCategory::Conflict);
    }

    #[test]
    fn domain_categories_map_through() {
        let err: KindlingError = DomainError::InvalidConfiguration("x".into()).into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
