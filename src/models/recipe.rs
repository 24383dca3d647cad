//! Recipe model
//!
//! A recipe is a value: every transformation (gram conversion, scaling,
//! merging) returns a new recipe and leaves its input untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Ingredient, Quantity};
use crate::conversion::{ConversionTable, Unit};
use crate::error::{RecipeError, RecipeResult};

/// How many items a recipe's listed quantities produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "size")]
pub enum Batch {
    /// The quantities produce exactly this many items
    Single(u32),
    /// Summed totals of several recipes; `nominal` is the batch size of the
    /// last recipe merged in, kept for naming only
    Merged { nominal: u32 },
}

impl Batch {
    pub fn size(&self) -> u32 {
        match self {
            Batch::Single(n) => *n,
            Batch::Merged { nominal } => *nominal,
        }
    }
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.size())
    }
}

/// A recipe with its ingredient list in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    name: String,
    batch: Batch,
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Create an empty recipe producing `batch_size` items
    pub fn new(name: impl Into<String>, batch_size: u32) -> RecipeResult<Self> {
        if batch_size == 0 {
            return Err(RecipeError::InvalidBatchSize(
                "batch size must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            name: name.into(),
            batch: Batch::Single(batch_size),
            ingredients: Vec::new(),
        })
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_ingredient(mut self, name: impl Into<String>, quantity: Quantity) -> Self {
        self.insert(name, quantity);
        self
    }

    /// Add an ingredient, replacing any earlier line with the same name
    pub fn insert(&mut self, name: impl Into<String>, quantity: Quantity) {
        let name = name.into();
        match self.ingredients.iter_mut().find(|i| i.name == name) {
            Some(existing) => existing.quantity = quantity,
            None => self.ingredients.push(Ingredient::new(name, quantity)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch(&self) -> Batch {
        self.batch
    }

    pub fn batch_size(&self) -> u32 {
        self.batch.size()
    }

    pub fn is_merged(&self) -> bool {
        matches!(self.batch, Batch::Merged { .. })
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn get(&self, ingredient: &str) -> Option<&Quantity> {
        self.ingredients
            .iter()
            .find(|i| i.name == ingredient)
            .map(|i| &i.quantity)
    }

    pub fn is_gram_normalized(&self) -> bool {
        self.ingredients.iter().all(|i| i.quantity.is_grams())
    }

    /// Parse a recipe from its text form
    ///
    /// ```text
    /// name batch_size
    /// ingredient amount unit
    /// ...
    /// ```
    ///
    /// Blank lines are ignored.
    pub fn parse(source: &str) -> RecipeResult<Self> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines.next().ok_or_else(|| RecipeError::MalformedRecipe {
            line: 1,
            reason: "missing 'name batch_size' header".to_string(),
        })?;

        let fields: Vec<&str> = header.split_whitespace().collect();
        let [name, batch_size] = fields[..] else {
            return Err(RecipeError::MalformedRecipe {
                line: header_line,
                reason: format!("expected 'name batch_size', got {} fields", fields.len()),
            });
        };

        let batch_size = parse_batch_size(batch_size)?;
        let mut recipe = Self::new(name, batch_size)?;

        for (line_no, line) in lines {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let [ingredient, amount, unit] = fields[..] else {
                return Err(RecipeError::MalformedRecipe {
                    line: line_no,
                    reason: format!("expected 'ingredient amount unit', got {} fields", fields.len()),
                });
            };

            let amount = parse_amount(amount, line_no)?;
            let unit: Unit = unit.parse()?;
            if !unit.allowed_in_recipe() {
                return Err(RecipeError::UnknownUnit(unit.to_string()));
            }

            recipe.insert(ingredient, Quantity::new(amount, unit));
        }

        Ok(recipe)
    }

    /// Return a copy with every quantity expressed in grams
    ///
    /// Converting a recipe that is already in grams changes nothing.
    pub fn convert_to_grams(&self, conversions: &ConversionTable) -> RecipeResult<Self> {
        let ingredients = self
            .ingredients
            .iter()
            .map(|ingredient| {
                let Quantity { amount, unit } = ingredient.quantity;
                let grams = match unit {
                    Unit::Gram => amount,
                    Unit::Deciliter | Unit::Tablespoon | Unit::Teaspoon => {
                        conversions.to_grams(&ingredient.name, amount, unit)?
                    }
                    Unit::Kilogram => return Err(RecipeError::UnknownUnit(unit.to_string())),
                };
                Ok(Ingredient::new(ingredient.name.clone(), Quantity::grams(grams)))
            })
            .collect::<RecipeResult<Vec<_>>>()?;

        Ok(Self {
            name: self.name.clone(),
            batch: self.batch,
            ingredients,
        })
    }

    /// Return a copy scaled to a batch size of one
    ///
    /// Merged recipes have no single batch size and cannot be scaled.
    pub fn scale_to_single(&self) -> RecipeResult<Self> {
        let batch_size = match self.batch {
            Batch::Single(n) if n > 0 => n,
            Batch::Single(_) => {
                return Err(RecipeError::InvalidBatchSize(
                    "batch size must be greater than 0".to_string(),
                ))
            }
            Batch::Merged { .. } => {
                return Err(RecipeError::InvalidBatchSize(
                    "a merged recipe is not a single batch".to_string(),
                ))
            }
        };

        Ok(self.map_quantities(Batch::Single(1), |q| q / f64::from(batch_size)))
    }

    /// Return a copy scaled to produce `target_batch_size` items
    pub fn scale_to_size(&self, target_batch_size: u32) -> RecipeResult<Self> {
        if target_batch_size == 0 {
            return Err(RecipeError::InvalidBatchSize(
                "target batch size must be greater than 0".to_string(),
            ));
        }

        let single = self.scale_to_single()?;
        Ok(single.map_quantities(Batch::Single(target_batch_size), |q| {
            q * f64::from(target_batch_size)
        }))
    }

    /// Combine two gram-normalized recipes into one ingredient list
    ///
    /// Callers must convert both recipes to grams first; inputs are not
    /// converted again here. Ingredients present in both are summed and
    /// must both be in grams. The result is marked as merged and carries
    /// `b`'s batch size as its nominal size.
    pub fn merge(a: &Recipe, b: &Recipe) -> RecipeResult<Recipe> {
        let mut ingredients = a.ingredients.clone();

        for ingredient in &b.ingredients {
            match ingredients.iter_mut().find(|i| i.name == ingredient.name) {
                Some(existing) => {
                    for quantity in [&existing.quantity, &ingredient.quantity] {
                        if !quantity.is_grams() {
                            return Err(RecipeError::UnitMismatch {
                                ingredient: ingredient.name.clone(),
                                expected: Unit::Gram,
                                found: quantity.unit,
                            });
                        }
                    }
                    existing.quantity.amount += ingredient.quantity.amount;
                }
                None => ingredients.push(ingredient.clone()),
            }
        }

        Ok(Recipe {
            name: format!("Merged: {} {} pcs & {}", a.name, a.batch, b.name),
            batch: Batch::Merged {
                nominal: b.batch_size(),
            },
            ingredients,
        })
    }

    /// Merge any number of gram-normalized recipes, left to right
    pub fn merge_all(first: &Recipe, rest: &[Recipe]) -> RecipeResult<Recipe> {
        rest.iter()
            .try_fold(first.clone(), |acc, next| Recipe::merge(&acc, next))
    }

    fn map_quantities(&self, batch: Batch, f: impl Fn(Quantity) -> Quantity) -> Self {
        Self {
            name: self.name.clone(),
            batch,
            ingredients: self
                .ingredients
                .iter()
                .map(|i| Ingredient::new(i.name.clone(), f(i.quantity)))
                .collect(),
        }
    }
}

fn parse_batch_size(raw: &str) -> RecipeResult<u32> {
    match raw.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RecipeError::InvalidBatchSize(format!(
            "'{}' is not a positive integer",
            raw
        ))),
    }
}

fn parse_amount(raw: &str, line: usize) -> RecipeResult<f64> {
    match raw.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(RecipeError::MalformedRecipe {
            line,
            reason: format!("'{}' is not a valid amount", raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::ConversionRow;

    const COOKIES: &str = "\
cookies 50
flour 6 dl
butter 200 g
sugar 1.5 dl
vanilla 2 tsp
";

    fn conversions() -> ConversionTable {
        let row = |ingredient: &str, grams, amount, unit| ConversionRow {
            ingredient: ingredient.to_string(),
            grams,
            amount,
            unit,
        };
        ConversionTable::build([
            row("flour", 1000.0, 10.0, Unit::Deciliter),
            row("sugar", 85.0, 1.0, Unit::Deciliter),
            row("vanilla", 3.0, 1.0, Unit::Teaspoon),
            row("butter", 15.0, 1.0, Unit::Tablespoon),
        ])
    }

    fn grams_recipe(name: &str, batch: u32, items: &[(&str, f64)]) -> Recipe {
        items
            .iter()
            .fold(Recipe::new(name, batch).unwrap(), |r, (n, g)| {
                r.with_ingredient(*n, Quantity::grams(*g))
            })
    }

    fn amounts(recipe: &Recipe) -> Vec<(String, f64)> {
        let mut out: Vec<_> = recipe
            .ingredients()
            .iter()
            .map(|i| (i.name.clone(), i.quantity.amount))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    fn assert_close(a: &[(String, f64)], b: &[(String, f64)]) {
        assert_eq!(a.len(), b.len());
        for ((na, va), (nb, vb)) in a.iter().zip(b) {
            assert_eq!(na, nb);
            assert!((va - vb).abs() < 1e-9, "{}: {} != {}", na, va, vb);
        }
    }

    #[test]
    fn test_parse_recipe() {
        let recipe = Recipe::parse(COOKIES).unwrap();
        assert_eq!(recipe.name(), "cookies");
        assert_eq!(recipe.batch(), Batch::Single(50));
        assert_eq!(recipe.ingredients().len(), 4);
        assert_eq!(recipe.get("sugar"), Some(&Quantity::new(1.5, Unit::Deciliter)));
        assert_eq!(recipe.ingredients()[0].name, "flour");
    }

    #[test]
    fn test_parse_accepts_swedish_units_and_blank_lines() {
        let recipe = Recipe::parse("kakor 10\n\nsmör 2 msk\nsalt 1 tsk\n").unwrap();
        assert_eq!(recipe.get("smör").unwrap().unit, Unit::Tablespoon);
        assert_eq!(recipe.get("salt").unwrap().unit, Unit::Teaspoon);
    }

    #[test]
    fn test_parse_malformed_line() {
        let err = Recipe::parse("cookies 50\nflour 6\n").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { line: 2, .. }));

        let err = Recipe::parse("cookies 50\nflour six dl\n").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { line: 2, .. }));

        let err = Recipe::parse("cookies\n").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { line: 1, .. }));

        let err = Recipe::parse("").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { .. }));
    }

    #[test]
    fn test_parse_invalid_batch_size() {
        for header in ["cookies 0", "cookies -3", "cookies 2.5", "cookies many"] {
            let err = Recipe::parse(header).unwrap_err();
            assert!(matches!(err, RecipeError::InvalidBatchSize(_)), "{}", header);
        }
    }

    #[test]
    fn test_parse_unknown_unit() {
        let err = Recipe::parse("cookies 10\nflour 2 cups\n").unwrap_err();
        assert_eq!(err, RecipeError::UnknownUnit("cups".to_string()));

        let err = Recipe::parse("cookies 10\nflour 2 kg\n").unwrap_err();
        assert_eq!(err, RecipeError::UnknownUnit("kg".to_string()));
    }

    #[test]
    fn test_convert_to_grams() {
        let recipe = Recipe::parse(COOKIES).unwrap();
        let grams = recipe.convert_to_grams(&conversions()).unwrap();

        assert!(grams.is_gram_normalized());
        assert_eq!(grams.batch(), recipe.batch());
        assert!((grams.get("flour").unwrap().amount - 600.0).abs() < 1e-9);
        assert!((grams.get("butter").unwrap().amount - 200.0).abs() < 1e-9);
        assert!((grams.get("sugar").unwrap().amount - 127.5).abs() < 1e-9);
        assert!((grams.get("vanilla").unwrap().amount - 6.0).abs() < 1e-9);

        // input untouched
        assert_eq!(recipe.get("flour").unwrap().unit, Unit::Deciliter);
    }

    #[test]
    fn test_convert_to_grams_is_idempotent() {
        let table = conversions();
        let once = Recipe::parse(COOKIES).unwrap().convert_to_grams(&table).unwrap();
        let twice = once.convert_to_grams(&table).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_convert_missing_conversion() {
        let recipe = Recipe::parse("bread 1\nyeast 1 tsp\n").unwrap();
        let err = recipe.convert_to_grams(&conversions()).unwrap_err();
        assert_eq!(
            err,
            RecipeError::MissingConversion {
                ingredient: "yeast".to_string(),
                unit: Unit::Teaspoon,
            }
        );
    }

    #[test]
    fn test_convert_rejects_kilograms() {
        let recipe = Recipe::new("bread", 1)
            .unwrap()
            .with_ingredient("flour", Quantity::new(1.0, Unit::Kilogram));
        let err = recipe.convert_to_grams(&conversions()).unwrap_err();
        assert_eq!(err, RecipeError::UnknownUnit("kg".to_string()));
    }

    #[test]
    fn test_scale_to_single() {
        let recipe = grams_recipe("buns", 50, &[("flour", 1000.0), ("yeast", 25.0)]);
        let single = recipe.scale_to_single().unwrap();
        assert_eq!(single.batch(), Batch::Single(1));
        assert!((single.get("flour").unwrap().amount - 20.0).abs() < 1e-9);
        assert!((single.get("yeast").unwrap().amount - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scale_50_to_200_multiplies_by_four() {
        let recipe = grams_recipe("buns", 50, &[("flour", 1000.0), ("yeast", 25.0), ("salt", 3.0)]);
        let scaled = recipe.scale_to_size(200).unwrap();
        assert_eq!(scaled.batch(), Batch::Single(200));
        for ingredient in recipe.ingredients() {
            let after = scaled.get(&ingredient.name).unwrap().amount;
            assert!((after - ingredient.quantity.amount * 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scale_keeps_units() {
        let recipe = Recipe::parse(COOKIES).unwrap().scale_to_size(100).unwrap();
        let flour = recipe.get("flour").unwrap();
        assert_eq!(flour.unit, Unit::Deciliter);
        assert!((flour.amount - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_composes() {
        let recipe = grams_recipe("buns", 12, &[("flour", 730.0), ("milk", 333.3), ("salt", 7.0)]);
        let via = recipe.scale_to_size(37).unwrap().scale_to_size(160).unwrap();
        let direct = recipe.scale_to_size(160).unwrap();
        assert_close(&amounts(&via), &amounts(&direct));
    }

    #[test]
    fn test_scale_to_zero_fails() {
        let recipe = grams_recipe("buns", 10, &[("flour", 100.0)]);
        assert!(matches!(
            recipe.scale_to_size(0),
            Err(RecipeError::InvalidBatchSize(_))
        ));
    }

    #[test]
    fn test_new_rejects_zero_batch() {
        assert!(matches!(
            Recipe::new("empty", 0),
            Err(RecipeError::InvalidBatchSize(_))
        ));
    }

    #[test]
    fn test_merge_sums_shared_ingredients() {
        let a = grams_recipe("buns", 200, &[("flour", 1000.0), ("butter", 100.0)]);
        let b = grams_recipe("toffee", 30, &[("butter", 150.0), ("syrup", 80.0)]);

        let merged = Recipe::merge(&a, &b).unwrap();
        assert_eq!(merged.name(), "Merged: buns 200 pcs & toffee");
        assert_eq!(merged.batch(), Batch::Merged { nominal: 30 });
        assert!(merged.is_merged());
        assert_eq!(
            amounts(&merged),
            vec![
                ("butter".to_string(), 250.0),
                ("flour".to_string(), 1000.0),
                ("syrup".to_string(), 80.0),
            ]
        );
        // first recipe's order comes first
        assert_eq!(merged.ingredients()[0].name, "flour");
    }

    #[test]
    fn test_merge_totals_commutative() {
        let a = grams_recipe("a", 2, &[("flour", 100.0), ("sugar", 20.0)]);
        let b = grams_recipe("b", 3, &[("sugar", 45.0), ("milk", 200.0)]);
        let ab = Recipe::merge(&a, &b).unwrap();
        let ba = Recipe::merge(&b, &a).unwrap();
        assert_close(&amounts(&ab), &amounts(&ba));
        assert_ne!(ab.batch(), ba.batch());
    }

    #[test]
    fn test_merge_totals_associative() {
        let a = grams_recipe("a", 2, &[("flour", 100.0), ("sugar", 20.5)]);
        let b = grams_recipe("b", 3, &[("sugar", 45.25), ("milk", 200.0)]);
        let c = grams_recipe("c", 4, &[("milk", 10.0), ("flour", 0.3), ("egg", 50.0)]);

        let chained = Recipe::merge(&Recipe::merge(&a, &b).unwrap(), &c).unwrap();
        let folded = Recipe::merge_all(&a, &[b, c]).unwrap();
        assert_close(&amounts(&chained), &amounts(&folded));
        assert_close(
            &amounts(&chained),
            &[
                ("egg".to_string(), 50.0),
                ("flour".to_string(), 100.3),
                ("milk".to_string(), 210.0),
                ("sugar".to_string(), 65.75),
            ],
        );
    }

    #[test]
    fn test_merge_unit_mismatch() {
        let a = grams_recipe("a", 2, &[("flour", 100.0)]);
        let b = Recipe::new("b", 1)
            .unwrap()
            .with_ingredient("flour", Quantity::new(2.0, Unit::Deciliter));

        let err = Recipe::merge(&a, &b).unwrap_err();
        assert_eq!(
            err,
            RecipeError::UnitMismatch {
                ingredient: "flour".to_string(),
                expected: Unit::Gram,
                found: Unit::Deciliter,
            }
        );
    }

    #[test]
    fn test_merged_recipe_cannot_be_scaled() {
        let a = grams_recipe("a", 2, &[("flour", 100.0)]);
        let b = grams_recipe("b", 3, &[("milk", 100.0)]);
        let merged = Recipe::merge(&a, &b).unwrap();
        assert!(matches!(
            merged.scale_to_size(10),
            Err(RecipeError::InvalidBatchSize(_))
        ));
    }

    #[test]
    fn test_insert_replaces_duplicate() {
        let recipe = Recipe::parse("x 1\nflour 1 dl\nflour 2 dl\n").unwrap();
        assert_eq!(recipe.ingredients().len(), 1);
        assert_eq!(recipe.get("flour").unwrap().amount, 2.0);
    }
}
