//! Unit conversion module
//!
//! Handles unit parsing and volume-to-gram conversion tables.

pub mod converter;
pub mod units;

pub use converter::{ConversionFactors, ConversionRow, ConversionTable, SkipReason, SkippedRow};
pub use units::{Unit, UnitCategory, G_PER_KG, TBSP_PER_DL, TSP_PER_DL, TSP_PER_TBSP};
