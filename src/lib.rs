//! Recipe Cost Library
//!
//! Converts recipes written in mixed kitchen units to grams, rescales and
//! merges them, and computes purchase cost against packaged prices.

pub mod build_info;
pub mod config;
pub mod conversion;
pub mod costing;
pub mod data;
pub mod error;
pub mod models;
pub mod report;
