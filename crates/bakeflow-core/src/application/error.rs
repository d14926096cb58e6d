//! Application layer errors.
//!
//! These errors represent failures in resolution and orchestration, not
//! business logic. Business logic errors are `DomainError` from
//! `crate::domain`.

use thiserror::Error;

use crate::domain::DomainError;
use crate::error::ErrorCategory;

/// Errors that occur while resolving declarative documents into recipes.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A step config references a template name the source does not know.
    #[error("Step template not found: '{name}'")]
    TemplateNotFound { name: String },

    /// A template's required parameter is absent after merging defaults
    /// with the step config's overrides.
    #[error("Template '{template}' requires parameter '{param}', which is missing after merge")]
    MissingRequiredParameter { template: String, param: String },

    /// Assembling one recipe config failed. Raised per recipe during bulk
    /// load; the resolver catches it, logs, and continues with the rest.
    #[error("Failed to build recipe '{recipe_id}': {reason}")]
    RecipeBuild { recipe_id: String, reason: String },

    /// The config/template source itself failed (fetch, parse, I/O).
    /// This is the only failure that propagates out of `initialize()`.
    #[error("Recipe source error: {reason}")]
    SourceFetch { reason: String },

    /// A domain invariant was violated during assembly.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { name } => vec![
                format!("No step template named '{name}' exists in the source"),
                "Check the 'template' field of the step config for typos".into(),
            ],
            Self::MissingRequiredParameter { template, param } => vec![
                format!("Template '{template}' lists '{param}' in requiredParams"),
                format!("Add '{param}' to the step config's params, or give the template a default"),
            ],
            Self::SourceFetch { .. } => vec![
                "The recipe source could not be read".into(),
                "Retry with reload() once the source is reachable".into(),
            ],
            Self::RecipeBuild { recipe_id, .. } => vec![
                format!("Recipe '{recipe_id}' was excluded from the loaded set"),
                "Fix its config document and reload".into(),
            ],
            Self::Domain(e) => e.suggestions(),
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::MissingRequiredParameter { .. } => ErrorCategory::Validation,
            Self::RecipeBuild { .. } => ErrorCategory::Validation,
            Self::SourceFetch { .. } => ErrorCategory::Internal,
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Invariant => ErrorCategory::Invariant,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
        }
    }
}
