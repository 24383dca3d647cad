//! Report generation
//!
//! Renders a cost summary as a human-readable text report or as JSON, and
//! saves it under a name derived from the recipe.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::conversion::Unit;
use crate::costing::CostSummary;
use crate::data::{write_file, DataResult};
use crate::models::{Batch, Ingredient};

const WIDTH: usize = 70;
const CURRENCY: &str = "kr";
const MERGED_FILE_STEM: &str = "Merged recipe";

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Local>,
    build: BuildInfo,
    #[serde(flatten)]
    summary: &'a CostSummary,
}

/// Grams as whole numbers, volumes with one decimal
fn format_quantity(ingredient: &Ingredient) -> String {
    let q = &ingredient.quantity;
    match q.unit {
        Unit::Gram => format!("{:>8.0} {}", q.amount, q.unit),
        Unit::Kilogram | Unit::Deciliter | Unit::Tablespoon | Unit::Teaspoon => {
            format!("{:>8.1} {}", q.amount, q.unit)
        }
    }
}

/// Render the text report
pub fn render_text(summary: &CostSummary, generated_at: DateTime<Local>) -> String {
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);

    let mut out = format!("{heavy}\n{} {} pcs\n{light}\nIngredients:\n", summary.name, summary.batch);
    for ingredient in &summary.ingredients {
        out.push_str(&format!("{:<20} {}\n", ingredient.name, format_quantity(ingredient)));
    }

    out.push_str(&format!("{light}\nShopping list:\n"));
    for item in &summary.shopping_list {
        out.push_str(&format!(
            "{:<20} |{:>6.1} pcs | {:>7.0} g {:>8.2} {}/pc\n",
            item.ingredient, item.display_packages, item.package_grams, item.package_price, CURRENCY
        ));
    }

    out.push_str(&format!("{light}\n"));
    out.push_str(&format!("Total cost: {:.2} {}\n", summary.exact_cost, CURRENCY));
    out.push_str(&format!(
        "Total cost (whole products): {:.2} {}\n",
        summary.whole_products_cost, CURRENCY
    ));
    out.push_str(&format!(
        "{light}\nGenerated {} by {}\n",
        generated_at.format("%Y-%m-%d %H:%M"),
        BuildInfo::current()
    ));
    out
}

/// Render the JSON report
pub fn render_json(summary: &CostSummary, generated_at: DateTime<Local>) -> DataResult<String> {
    let report = JsonReport {
        generated_at,
        build: BuildInfo::current(),
        summary,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render(
    summary: &CostSummary,
    format: ReportFormat,
    generated_at: DateTime<Local>,
) -> DataResult<String> {
    match format {
        ReportFormat::Text => Ok(render_text(summary, generated_at)),
        ReportFormat::Json => render_json(summary, generated_at),
    }
}

/// File name for a saved report: `"<name> <batch> pcs.txt"`, or
/// `"Merged recipe.txt"` for merged recipes
pub fn report_file_name(summary: &CostSummary, format: ReportFormat) -> String {
    let stem = match summary.batch {
        Batch::Merged { .. } => MERGED_FILE_STEM.to_string(),
        Batch::Single(n) => format!("{} {} pcs", summary.name, n),
    };
    format!("{}.{}", stem, format.extension())
}

/// Render and save the report into `dir`, returning the written path
pub fn save_report(
    dir: &Path,
    summary: &CostSummary,
    format: ReportFormat,
    generated_at: DateTime<Local>,
) -> DataResult<PathBuf> {
    let path = dir.join(report_file_name(summary, format));
    let contents = render(summary, format, generated_at)?;
    write_file(&path, &contents)?;
    Ok(path)
}
