//! Unit types and conversion constants
//!
//! Provides the measurement units recipes and price lists are written in,
//! plus the fixed kitchen-volume ratios used to derive conversion factors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// A measurement unit for an ingredient quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Gram,
    /// Only meaningful in price lists
    Kilogram,
    Deciliter,
    Tablespoon,
    Teaspoon,
}

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitCategory {
    /// Mass units, convertible to grams without any ingredient data
    Weight,
    /// Kitchen volume units, convertible to grams only through a per-ingredient factor
    Volume,
}

// ============================================================================
// Volume Ratios
// ============================================================================

/// Tablespoons per deciliter
pub const TBSP_PER_DL: f64 = 6.6;
/// Teaspoons per deciliter
pub const TSP_PER_DL: f64 = 20.0;
/// Teaspoons per tablespoon
pub const TSP_PER_TBSP: f64 = 3.0;

// ============================================================================
// Weight Constants
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;

impl Unit {
    /// Short display symbol, as written in the data files
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Deciliter => "dl",
            Unit::Tablespoon => "tbsp",
            Unit::Teaspoon => "tsp",
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Gram | Unit::Kilogram => UnitCategory::Weight,
            Unit::Deciliter | Unit::Tablespoon | Unit::Teaspoon => UnitCategory::Volume,
        }
    }

    /// Grams per unit for weight units; volume units need an ingredient factor
    pub fn grams_per_unit(&self) -> Option<f64> {
        match self {
            Unit::Gram => Some(1.0),
            Unit::Kilogram => Some(G_PER_KG),
            Unit::Deciliter | Unit::Tablespoon | Unit::Teaspoon => None,
        }
    }

    /// Whether the unit may appear in a recipe ingredient line
    pub fn allowed_in_recipe(&self) -> bool {
        !matches!(self, Unit::Kilogram)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = RecipeError;

    /// Accepts English abbreviations and the Swedish `msk`/`tsk`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(Unit::Gram),
            "kg" | "kilogram" | "kilograms" => Ok(Unit::Kilogram),
            "dl" | "deciliter" | "deciliters" | "decilitre" | "decilitres" => Ok(Unit::Deciliter),
            "tbsp" | "msk" | "tablespoon" | "tablespoons" => Ok(Unit::Tablespoon),
            "tsp" | "tsk" | "teaspoon" | "teaspoons" => Ok(Unit::Teaspoon),
            _ => Err(RecipeError::UnknownUnit(s.to_string())),
        }
    }
}
