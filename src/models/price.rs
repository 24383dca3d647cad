//! Price list model
//!
//! Ingredients are bought in fixed packages. Each entry records how many
//! grams one package holds and what it costs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Recipe;
use crate::conversion::{ConversionTable, Unit};
use crate::error::{RecipeError, RecipeResult};

/// One price-list line: a package of `amount` `unit` costs `price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub ingredient: String,
    pub amount: f64,
    pub unit: Unit,
    pub price: f64,
}

/// A purchasable package, normalized to grams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub package_grams: f64,
    pub package_price: f64,
}

/// Per-ingredient package sizes and prices
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    entries: HashMap<String, PriceEntry>,
}

impl PriceTable {
    /// Build the table, converting volume-sized packages through `conversions`
    pub fn build<I>(rows: I, conversions: &ConversionTable) -> RecipeResult<Self>
    where
        I: IntoIterator<Item = PriceRow>,
    {
        let mut entries = HashMap::new();

        for row in rows {
            let package_grams = conversions.to_grams(&row.ingredient, row.amount, row.unit)?;
            if package_grams <= 0.0 {
                return Err(RecipeError::InvalidPackageSize {
                    ingredient: row.ingredient,
                    grams: package_grams,
                });
            }

            entries.insert(
                row.ingredient,
                PriceEntry {
                    package_grams,
                    package_price: row.price,
                },
            );
        }

        tracing::debug!("Built price table: {} ingredients", entries.len());
        Ok(Self { entries })
    }

    /// Look up the package for `ingredient`
    pub fn get(&self, ingredient: &str) -> RecipeResult<&PriceEntry> {
        self.entries
            .get(ingredient)
            .ok_or_else(|| RecipeError::MissingPrice(ingredient.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ingredients of `recipe` with no price entry
    pub fn unpriced(&self, recipe: &Recipe) -> Vec<String> {
        recipe
            .ingredients()
            .iter()
            .filter(|i| !self.entries.contains_key(&i.name))
            .map(|i| i.name.clone())
            .collect()
    }
}
