//! Runtime configuration
//!
//! Paths come from command-line flags first, then environment variables,
//! then defaults relative to the working directory.

use std::path::{Path, PathBuf};

/// Directory holding the tables and recipe files
pub const DATA_DIR_ENV: &str = "RECIPE_DATA_DIR";
/// Directory reports are saved to
pub const OUTPUT_DIR_ENV: &str = "RECIPE_OUTPUT_DIR";

pub const DEFAULT_CONVERSIONS_FILE: &str = "ingredient_conversions.txt";
pub const DEFAULT_PRICES_FILE: &str = "ingredient_prices.txt";
const RECIPE_EXTENSION: &str = "txt";

/// Values given on the command line, all optional
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub conversions: Option<PathBuf>,
    pub prices: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub conversions_path: PathBuf,
    pub prices_path: PathBuf,
}

impl Config {
    /// Resolve configuration with priority: flags > env vars > defaults
    pub fn load(overrides: Overrides) -> Self {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    fn resolve(overrides: Overrides, env: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = overrides
            .data_dir
            .or_else(|| env(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let output_dir = overrides
            .output_dir
            .or_else(|| env(OUTPUT_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| data_dir.clone());

        let conversions_path = overrides
            .conversions
            .unwrap_or_else(|| data_dir.join(DEFAULT_CONVERSIONS_FILE));
        let prices_path = overrides
            .prices
            .unwrap_or_else(|| data_dir.join(DEFAULT_PRICES_FILE));

        Self {
            data_dir,
            output_dir,
            conversions_path,
            prices_path,
        }
    }

    /// Locate a recipe given either a path or a bare name
    ///
    /// `hallongrottor` resolves to `<data_dir>/hallongrottor.txt`.
    pub fn recipe_path(&self, recipe: &str) -> PathBuf {
        let as_path = Path::new(recipe);
        if as_path.extension().is_some() || as_path.components().count() > 1 {
            return as_path.to_path_buf();
        }
        self.data_dir.join(recipe).with_extension(RECIPE_EXTENSION)
    }
}
