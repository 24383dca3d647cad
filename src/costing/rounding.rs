//! Decimal rounding for money and display values
//!
//! Rounds on the shortest decimal representation of a float, so `12.345`
//! is treated as the decimal 12.345 rather than its binary neighbour.

use std::cmp::Ordering;

/// Round `value` to `places` decimals, ties to even
///
/// `12.345 -> 12.34`, `0.015 -> 0.02`, `0.005 -> 0.0`
pub fn round_half_even(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // Also catches -0.0, which would otherwise print as "-0.00"
    if value == 0.0 {
        return 0.0;
    }

    // f64 Display never uses exponent notation and prints the shortest
    // digits that round-trip.
    let text = value.abs().to_string();
    let Some((int_part, frac_part)) = text.split_once('.') else {
        return value;
    };
    if frac_part.len() <= places {
        return value;
    }

    let (kept, dropped) = frac_part.split_at(places);
    let digits = format!("{int_part}{kept}");

    let round_up = match dropped.as_bytes()[0].cmp(&b'5') {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal if dropped[1..].bytes().any(|b| b != b'0') => true,
        Ordering::Equal => digits.bytes().last().is_some_and(|d| (d - b'0') % 2 == 1),
    };

    let Ok(mut scaled) = digits.parse::<f64>() else {
        return value;
    };
    if round_up {
        scaled += 1.0;
    }

    if scaled == 0.0 {
        return 0.0;
    }

    let places = i32::try_from(places).unwrap_or(i32::MAX);
    value.signum() * scaled / 10f64.powi(places)
}
