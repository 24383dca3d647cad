//! Error types for the conversion and costing engine

use thiserror::Error;

use crate::conversion::Unit;

/// Errors raised by table construction and recipe transformations
#[derive(Debug, Error, PartialEq)]
pub enum RecipeError {
    #[error("Malformed line {line}: {reason}")]
    MalformedRecipe { line: usize, reason: String },

    #[error("Invalid batch size: {0}")]
    InvalidBatchSize(String),

    #[error("Unknown unit: '{0}'")]
    UnknownUnit(String),

    #[error("No {unit} conversion for ingredient '{ingredient}'")]
    MissingConversion { ingredient: String, unit: Unit },

    #[error("No price entry for ingredient '{0}'")]
    MissingPrice(String),

    #[error("Unit mismatch for '{ingredient}': expected {expected}, found {found}")]
    UnitMismatch {
        ingredient: String,
        expected: Unit,
        found: Unit,
    },

    #[error("Package size for '{ingredient}' must be positive, got {grams} g")]
    InvalidPackageSize { ingredient: String, grams: f64 },
}

/// Result type for engine operations
pub type RecipeResult<T> = Result<T, RecipeError>;
