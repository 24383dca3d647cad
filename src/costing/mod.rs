//! Cost calculation module
//!
//! Turns gram-normalized recipes into package counts and purchase totals.

pub mod calculator;
pub mod rounding;

pub use calculator::{
    cost, packages_needed, shopping_list, summarize, CostMode, CostSummary, PackageCount,
    ShoppingItem, COST_DECIMALS, PACKAGE_DISPLAY_DECIMALS,
};
pub use rounding::round_half_even;
