//! Ingredient conversion table
//!
//! Translates kitchen volume units to grams using one density measurement
//! per ingredient, e.g. "1000 g of flour fills 10 dl".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::units::{Unit, UnitCategory, TBSP_PER_DL, TSP_PER_DL, TSP_PER_TBSP};
use crate::error::{RecipeError, RecipeResult};
use crate::models::Recipe;

/// One density measurement: `grams` of `ingredient` occupy `amount` `unit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRow {
    pub ingredient: String,
    pub grams: f64,
    pub amount: f64,
    pub unit: Unit,
}

/// Grams per volume unit for a single ingredient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactors {
    pub grams_per_dl: f64,
    pub grams_per_tbsp: f64,
    pub grams_per_tsp: f64,
}

impl ConversionFactors {
    /// Derive all three factors from a single measurement
    ///
    /// Returns None when the unit is not a volume unit.
    pub fn derive(grams: f64, amount: f64, unit: Unit) -> Option<Self> {
        let factors = match unit {
            Unit::Deciliter => Self {
                grams_per_dl: grams / amount,
                grams_per_tbsp: grams / (amount * TBSP_PER_DL),
                grams_per_tsp: grams / (amount * TSP_PER_DL),
            },
            Unit::Tablespoon => Self {
                grams_per_dl: grams / (amount / TBSP_PER_DL),
                grams_per_tbsp: grams / amount,
                grams_per_tsp: grams / (amount * TSP_PER_TBSP),
            },
            Unit::Teaspoon => Self {
                grams_per_dl: grams / (amount / TSP_PER_DL),
                grams_per_tbsp: grams / (amount / TSP_PER_TBSP),
                grams_per_tsp: grams / amount,
            },
            Unit::Gram | Unit::Kilogram => return None,
        };
        Some(factors)
    }

    /// Grams per one `unit`, or None for weight units
    pub fn factor_for(&self, unit: Unit) -> Option<f64> {
        match unit {
            Unit::Deciliter => Some(self.grams_per_dl),
            Unit::Tablespoon => Some(self.grams_per_tbsp),
            Unit::Teaspoon => Some(self.grams_per_tsp),
            Unit::Gram | Unit::Kilogram => None,
        }
    }
}

/// Why a conversion row produced no factors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Conversion rows must be measured in dl, tbsp or tsp
    NotAVolumeUnit(Unit),
    NonPositiveMeasurement,
}

/// A conversion row that was left out of the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub ingredient: String,
    pub reason: SkipReason,
}

/// Per-ingredient volume-to-gram factors
///
/// Built once and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    factors: HashMap<String, ConversionFactors>,
    skipped: Vec<SkippedRow>,
}

impl ConversionTable {
    /// Build the table from density rows
    ///
    /// Rows that cannot yield factors are kept in [`skipped`](Self::skipped)
    /// rather than silently dropped. A later row for the same ingredient
    /// replaces an earlier one.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = ConversionRow>,
    {
        let mut table = Self::default();

        for row in rows {
            if row.grams <= 0.0 || row.amount <= 0.0 {
                tracing::warn!(
                    "Skipping conversion for '{}': measurement must be positive ({} g / {} {})",
                    row.ingredient,
                    row.grams,
                    row.amount,
                    row.unit
                );
                table.skipped.push(SkippedRow {
                    ingredient: row.ingredient,
                    reason: SkipReason::NonPositiveMeasurement,
                });
                continue;
            }

            match ConversionFactors::derive(row.grams, row.amount, row.unit) {
                Some(factors) => {
                    table.factors.insert(row.ingredient, factors);
                }
                None => {
                    tracing::warn!(
                        "Skipping conversion for '{}': '{}' is not a volume unit",
                        row.ingredient,
                        row.unit
                    );
                    table.skipped.push(SkippedRow {
                        ingredient: row.ingredient,
                        reason: SkipReason::NotAVolumeUnit(row.unit),
                    });
                }
            }
        }

        tracing::debug!(
            "Built conversion table: {} ingredients, {} skipped rows",
            table.factors.len(),
            table.skipped.len()
        );
        table
    }

    pub fn get(&self, ingredient: &str) -> Option<&ConversionFactors> {
        self.factors.get(ingredient)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Rows that were rejected during [`build`](Self::build)
    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Grams per one `unit` of `ingredient`
    ///
    /// Weight units need no table entry. Volume units fail with
    /// `MissingConversion` when the ingredient has no factors.
    pub fn grams_per(&self, ingredient: &str, unit: Unit) -> RecipeResult<f64> {
        if let Some(grams) = unit.grams_per_unit() {
            return Ok(grams);
        }

        self.factors
            .get(ingredient)
            .and_then(|f| f.factor_for(unit))
            .ok_or_else(|| RecipeError::MissingConversion {
                ingredient: ingredient.to_string(),
                unit,
            })
    }

    /// Convert `amount` `unit` of `ingredient` to grams
    pub fn to_grams(&self, ingredient: &str, amount: f64, unit: Unit) -> RecipeResult<f64> {
        Ok(amount * self.grams_per(ingredient, unit)?)
    }

    /// Ingredients of `recipe` measured by volume but lacking factors
    pub fn unmapped(&self, recipe: &Recipe) -> Vec<String> {
        recipe
            .ingredients()
            .iter()
            .filter(|i| i.quantity.unit.category() == UnitCategory::Volume)
            .filter(|i| !self.factors.contains_key(&i.name))
            .map(|i| i.name.clone())
            .collect()
    }
}
