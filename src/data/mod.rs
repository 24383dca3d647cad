//! Data files module
//!
//! Handles reading the input tables and recipes and writing reports.

pub mod loader;
pub mod parser;

pub use loader::{load_conversions, load_prices, load_recipe, write_file, DataError, DataResult};
pub use parser::{parse_conversion_rows, parse_price_rows};
