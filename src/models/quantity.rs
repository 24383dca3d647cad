//! Ingredient quantities
//!
//! An amount tagged with its unit. Used inside recipes only.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conversion::Unit;

/// An amount of an ingredient in a specific unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(amount: f64, unit: Unit) -> Self {
        Self { amount, unit }
    }

    pub fn grams(amount: f64) -> Self {
        Self::new(amount, Unit::Gram)
    }

    pub fn is_grams(&self) -> bool {
        self.unit == Unit::Gram
    }

    /// Scale the amount, keeping the unit
    pub fn scale(&self, multiplier: f64) -> Self {
        Self::new(self.amount * multiplier, self.unit)
    }
}

impl std::ops::Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, multiplier: f64) -> Quantity {
        self.scale(multiplier)
    }
}

impl std::ops::Div<f64> for Quantity {
    type Output = Quantity;

    fn div(self, divisor: f64) -> Quantity {
        Quantity::new(self.amount / divisor, self.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

/// A named ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(flatten)]
    pub quantity: Quantity,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.name)
    }
}
