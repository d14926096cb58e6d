// ============================================================================
// domain/error.rs - DOMAIN ERROR TAXONOMY
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
///
/// Fail-fast: every variant is raised synchronously at construction of a
/// domain value and never recovered inside the domain layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Required field '{field}' is empty")]
    EmptyField { field: &'static str },

    #[error("Field '{field}' must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Field '{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Invalid amount range: min {min} must be less than max {max} and non-negative")]
    InvalidAmountRange { min: f64, max: f64 },

    #[error("Scale factor must be positive, got {factor}")]
    InvalidScaleFactor { factor: f64 },

    #[error("Step '{step_id}' must have at least one instruction")]
    MissingInstructions { step_id: String },

    #[error("Recipe '{recipe_id}' must have at least one step")]
    EmptyRecipe { recipe_id: String },

    #[error("Duplicate ingredient group '{name}' in step '{step_id}'")]
    DuplicateGroup { name: String, step_id: String },

    // ========================================================================
    // Ordering Invariant Violations
    // ========================================================================
    /// Sorted step orders are not exactly `1..=N`.
    ///
    /// `position` is the 0-indexed slot in the sorted sequence where the
    /// scan found the gap or duplicate.
    #[error(
        "Step orders are not contiguous: expected order {expected} at position {position}, found {found}"
    )]
    OrderGap {
        position: usize,
        expected: u32,
        found: u32,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyField { field } => vec![
                format!("Provide a non-empty value for '{field}'"),
                "Check the recipe config document for blank fields".into(),
            ],
            Self::InvalidAmountRange { min, max } => vec![
                format!("Got min={min}, max={max}"),
                "Ranges require 0 <= min < max".into(),
                "Use a plain number for a fixed amount instead of a range".into(),
            ],
            Self::InvalidScaleFactor { .. } => vec![
                "Scaling factors must be greater than zero".into(),
                "Check the target serving count".into(),
            ],
            Self::OrderGap { .. } => vec![
                "Step orders must form the unbroken sequence 1..N".into(),
                "Renumber the steps, or let the resolver assign orders from config position".into(),
            ],
            _ => vec!["Check the recipe definition for invalid values".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OrderGap { .. } => ErrorCategory::Invariant,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Invariant,
    NotFound,
    Internal,
}
