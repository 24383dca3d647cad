//! File loading
//!
//! Reads the conversion table, price table and recipes from disk. Errors
//! carry the path of the file that failed.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::parser::{parse_conversion_rows, parse_price_rows};
use crate::conversion::ConversionTable;
use crate::error::RecipeError;
use crate::models::{PriceTable, Recipe};

/// I/O-layer error types
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: RecipeError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for file operations
pub type DataResult<T> = Result<T, DataError>;

fn read(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn in_file(path: &Path) -> impl FnOnce(RecipeError) -> DataError + '_ {
    move |source| DataError::Invalid {
        path: path.to_path_buf(),
        source,
    }
}

/// Load and build the conversion table
pub fn load_conversions(path: &Path) -> DataResult<ConversionTable> {
    let rows = parse_conversion_rows(&read(path)?).map_err(in_file(path))?;
    let table = ConversionTable::build(rows);
    tracing::info!(
        "Loaded {} ingredient conversions from {}",
        table.len(),
        path.display()
    );
    Ok(table)
}

/// Load and build the price table; conversions must be loaded first
pub fn load_prices(path: &Path, conversions: &ConversionTable) -> DataResult<PriceTable> {
    let rows = parse_price_rows(&read(path)?).map_err(in_file(path))?;
    let table = PriceTable::build(rows, conversions).map_err(in_file(path))?;
    tracing::info!("Loaded {} ingredient prices from {}", table.len(), path.display());
    Ok(table)
}

/// Load a recipe file
pub fn load_recipe(path: &Path) -> DataResult<Recipe> {
    let recipe = Recipe::parse(&read(path)?).map_err(in_file(path))?;
    tracing::debug!(
        "Loaded recipe '{}' ({} ingredients) from {}",
        recipe.name(),
        recipe.ingredients().len(),
        path.display()
    );
    Ok(recipe)
}

/// Write `contents` to `path`, creating parent directories as needed
pub fn write_file(path: &Path, contents: &str) -> DataResult<()> {
    let io_error = |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
