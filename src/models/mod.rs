//! Data models
//!
//! Value types for recipes, their ingredient quantities and price lists.

mod price;
mod quantity;
mod recipe;

pub use price::{PriceEntry, PriceRow, PriceTable};
pub use quantity::{Ingredient, Quantity};
pub use recipe::{Batch, Recipe};
