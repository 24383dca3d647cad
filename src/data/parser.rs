//! Text table parsing
//!
//! Conversion and price tables are whitespace-separated rows, one entry
//! per line. Blank lines and `#` comments are skipped.

use crate::conversion::{ConversionRow, Unit};
use crate::error::{RecipeError, RecipeResult};
use crate::models::PriceRow;

/// Numbered, trimmed, non-empty lines that are not comments
fn data_lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn split_fields<'a, const N: usize>(
    line: &'a str,
    line_no: usize,
    shape: &str,
) -> RecipeResult<[&'a str; N]> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let count = fields.len();
    fields.try_into().map_err(|_| RecipeError::MalformedRecipe {
        line: line_no,
        reason: format!("expected '{}', got {} fields", shape, count),
    })
}

fn parse_number(raw: &str, line_no: usize, what: &str) -> RecipeResult<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RecipeError::MalformedRecipe {
            line: line_no,
            reason: format!("'{}' is not a valid {}", raw, what),
        }),
    }
}

/// Parse `ingredient grams amount unit` rows
///
/// Rows in weight units parse fine and are reported as skipped when the
/// table is built; unrecognised unit names are an error.
pub fn parse_conversion_rows(source: &str) -> RecipeResult<Vec<ConversionRow>> {
    data_lines(source)
        .map(|(line_no, line)| {
            let [ingredient, grams, amount, unit] =
                split_fields::<4>(line, line_no, "ingredient grams amount unit")?;
            Ok(ConversionRow {
                ingredient: ingredient.to_string(),
                grams: parse_number(grams, line_no, "gram weight")?,
                amount: parse_number(amount, line_no, "amount")?,
                unit: unit.parse::<Unit>()?,
            })
        })
        .collect()
}

/// Parse `ingredient amount unit price` rows
pub fn parse_price_rows(source: &str) -> RecipeResult<Vec<PriceRow>> {
    data_lines(source)
        .map(|(line_no, line)| {
            let [ingredient, amount, unit, price] =
                split_fields::<4>(line, line_no, "ingredient amount unit price")?;
            Ok(PriceRow {
                ingredient: ingredient.to_string(),
                amount: parse_number(amount, line_no, "amount")?,
                unit: unit.parse::<Unit>()?,
                price: parse_number(price, line_no, "price")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conversion_rows() {
        let rows = parse_conversion_rows("vetemjöl 600 10 dl\n\n# spices\nkardemumma 2 1 tsk\n").unwrap();
        assert_eq!(
            rows,
            vec![
                ConversionRow {
                    ingredient: "vetemjöl".to_string(),
                    grams: 600.0,
                    amount: 10.0,
                    unit: Unit::Deciliter,
                },
                ConversionRow {
                    ingredient: "kardemumma".to_string(),
                    grams: 2.0,
                    amount: 1.0,
                    unit: Unit::Teaspoon,
                },
            ]
        );
    }

    #[test]
    fn test_parse_price_rows() {
        let rows = parse_price_rows("socker 1 kg 20\nmjölk 10 dl 14.90\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit, Unit::Kilogram);
        assert_eq!(rows[1].price, 14.9);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_price_rows("socker 1 kg 20\nsmör 500 g\n").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { line: 2, .. }));

        let err = parse_conversion_rows("flour 600 10 dl extra\n").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { line: 1, .. }));
    }

    #[test]
    fn test_bad_number() {
        let err = parse_price_rows("socker 1 kg cheap\n").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { line: 1, .. }));

        let err = parse_conversion_rows("flour NaN 10 dl\n").unwrap_err();
        assert!(matches!(err, RecipeError::MalformedRecipe { line: 1, .. }));
    }

    #[test]
    fn test_unknown_unit() {
        let err = parse_conversion_rows("flour 120 1 cup\n").unwrap_err();
        assert_eq!(err, RecipeError::UnknownUnit("cup".to_string()));
    }
}
