//! Purchase cost and shopping lists
//!
//! Works on gram-normalized recipes only. Every ingredient must have a
//! price entry.

use serde::{Deserialize, Serialize};

use super::rounding::round_half_even;
use crate::conversion::{ConversionTable, Unit};
use crate::error::{RecipeError, RecipeResult};
use crate::models::{Batch, Ingredient, PriceEntry, PriceTable, Recipe};

/// Decimal places for cost totals
pub const COST_DECIMALS: usize = 2;
/// Decimal places for displayed package counts
pub const PACKAGE_DISPLAY_DECIMALS: usize = 1;

/// Relative slack taken off a package ratio before rounding up. Scaling by
/// `target / batch` can leave a few ulps above a whole number, which must
/// not buy an extra package; any real excess is far larger than this.
const WHOLE_PACKAGE_RELATIVE_TOLERANCE: f64 = 1e-12;

/// How package counts are derived from the grams needed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostMode {
    /// Fractional packages: the theoretical minimum spend
    Exact,
    /// Packages rounded up: what actually has to be bought
    WholeProducts,
}

/// Packages of one ingredient needed for a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageCount {
    pub ingredient: String,
    pub grams_needed: f64,
    pub packages: f64,
}

/// One shopping-list line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub ingredient: String,
    /// Whole packages to buy
    pub packages: f64,
    /// `packages` rounded for display; never used in cost totals
    pub display_packages: f64,
    pub package_grams: f64,
    pub package_price: f64,
}

/// Every number a report needs for one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub name: String,
    pub batch: Batch,
    /// Ingredients as listed in the recipe, before gram conversion
    pub ingredients: Vec<Ingredient>,
    /// The same ingredients converted to grams
    pub gram_ingredients: Vec<Ingredient>,
    pub shopping_list: Vec<ShoppingItem>,
    pub exact_cost: f64,
    pub whole_products_cost: f64,
}

/// Number of packages for `grams` with the given package size
fn package_ratio(grams: f64, entry: &PriceEntry, mode: CostMode) -> f64 {
    let ratio = grams / entry.package_grams;
    if ratio <= 0.0 {
        return 0.0;
    }
    match mode {
        CostMode::Exact => ratio,
        CostMode::WholeProducts => (ratio * (1.0 - WHOLE_PACKAGE_RELATIVE_TOLERANCE)).ceil(),
    }
}

/// Grams needed for `ingredient`, which must already be in grams
fn grams_needed(ingredient: &Ingredient) -> RecipeResult<f64> {
    match ingredient.quantity.unit {
        Unit::Gram => Ok(ingredient.quantity.amount),
        found @ (Unit::Kilogram | Unit::Deciliter | Unit::Tablespoon | Unit::Teaspoon) => {
            Err(RecipeError::UnitMismatch {
                ingredient: ingredient.name.clone(),
                expected: Unit::Gram,
                found,
            })
        }
    }
}

/// Packages needed per ingredient, in recipe order
pub fn packages_needed(
    recipe: &Recipe,
    prices: &PriceTable,
    mode: CostMode,
) -> RecipeResult<Vec<PackageCount>> {
    recipe
        .ingredients()
        .iter()
        .map(|ingredient| {
            let grams = grams_needed(ingredient)?;
            let entry = prices.get(&ingredient.name)?;
            Ok(PackageCount {
                ingredient: ingredient.name.clone(),
                grams_needed: grams,
                packages: package_ratio(grams, entry, mode),
            })
        })
        .collect()
}

/// Total purchase cost, rounded half-to-even to two decimals
pub fn cost(recipe: &Recipe, prices: &PriceTable, mode: CostMode) -> RecipeResult<f64> {
    let total = packages_needed(recipe, prices, mode)?
        .iter()
        .map(|count| {
            let entry = prices.get(&count.ingredient)?;
            Ok(count.packages * entry.package_price)
        })
        .sum::<RecipeResult<f64>>()?;

    Ok(round_half_even(total, COST_DECIMALS))
}

/// Whole packages to buy for each ingredient, with package details
pub fn shopping_list(recipe: &Recipe, prices: &PriceTable) -> RecipeResult<Vec<ShoppingItem>> {
    packages_needed(recipe, prices, CostMode::WholeProducts)?
        .into_iter()
        .map(|count| {
            let entry = prices.get(&count.ingredient)?;
            Ok(ShoppingItem {
                display_packages: round_half_even(count.packages, PACKAGE_DISPLAY_DECIMALS),
                ingredient: count.ingredient,
                packages: count.packages,
                package_grams: entry.package_grams,
                package_price: entry.package_price,
            })
        })
        .collect()
}

/// Convert `recipe` to grams and compute everything a report shows
pub fn summarize(
    recipe: &Recipe,
    conversions: &ConversionTable,
    prices: &PriceTable,
) -> RecipeResult<CostSummary> {
    let grams = recipe.convert_to_grams(conversions)?;

    let summary = CostSummary {
        name: recipe.name().to_string(),
        batch: recipe.batch(),
        ingredients: recipe.ingredients().to_vec(),
        gram_ingredients: grams.ingredients().to_vec(),
        shopping_list: shopping_list(&grams, prices)?,
        exact_cost: cost(&grams, prices, CostMode::Exact)?,
        whole_products_cost: cost(&grams, prices, CostMode::WholeProducts)?,
    };

    tracing::debug!(
        "Costed '{}': {} exact, {} whole products",
        summary.name,
        summary.exact_cost,
        summary.whole_products_cost
    );
    Ok(summary)
}
