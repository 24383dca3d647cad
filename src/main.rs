//! Recipe Cost Calculator
//!
//! Converts recipes to grams, rescales and merges them, and prices them
//! against a list of package sizes.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use recipe_cost::build_info::{self, BuildInfo};
use recipe_cost::config::{Config, Overrides};
use recipe_cost::conversion::ConversionTable;
use recipe_cost::costing::summarize;
use recipe_cost::data::{load_conversions, load_prices, load_recipe, DataResult};
use recipe_cost::error::RecipeError;
use recipe_cost::models::{PriceTable, Recipe};
use recipe_cost::report::{render, save_report, ReportFormat};

#[derive(Parser)]
#[command(name = "recipe-cost")]
#[command(version)]
#[command(about = "Convert, scale, merge and price baking recipes", long_about = None)]
struct Cli {
    /// Directory holding the tables and recipe files [env: RECIPE_DATA_DIR]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory reports are saved to [env: RECIPE_OUTPUT_DIR]
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Conversion table file
    #[arg(long, global = true)]
    conversions: Option<PathBuf>,

    /// Price table file
    #[arg(long, global = true)]
    prices: Option<PathBuf>,

    /// Log progress and print the build banner
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cost a single recipe, optionally scaled to a new batch size
    Report {
        /// Recipe name or path, as NAME or NAME@BATCH
        recipe: RecipeSpec,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Merge several recipes into one shopping list
    Merge {
        /// Recipe names or paths, as NAME or NAME@BATCH
        #[arg(required = true, num_args = 2..)]
        recipes: Vec<RecipeSpec>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List ingredients that cannot be converted or priced
    Check {
        /// Recipe name or path
        recipe: String,
    },

    /// Print build information as JSON
    Version,
}

#[derive(Args)]
struct OutputArgs {
    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Also save the report to the output directory
    #[arg(long)]
    save: bool,
}

/// A recipe reference with an optional target batch size
#[derive(Debug, Clone)]
struct RecipeSpec {
    name: String,
    batch: Option<u32>,
}

impl FromStr for RecipeSpec {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('@') {
            Some((name, batch)) => {
                let batch = batch
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        RecipeError::InvalidBatchSize(format!("'{}' is not a positive integer", batch))
                    })?;
                Ok(Self {
                    name: name.to_string(),
                    batch: Some(batch),
                })
            }
            None => Ok(Self {
                name: s.to_string(),
                batch: None,
            }),
        }
    }
}

/// Lookup tables, built once per run: conversions before prices
struct Tables {
    conversions: ConversionTable,
    prices: PriceTable,
}

impl Tables {
    fn load(config: &Config) -> DataResult<Self> {
        let conversions = load_conversions(&config.conversions_path)?;
        let prices = load_prices(&config.prices_path, &conversions)?;
        Ok(Self { conversions, prices })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let directive = if cli.verbose { "recipe_cost=debug" } else { "recipe_cost=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(Overrides {
        data_dir: cli.data_dir,
        output_dir: cli.output_dir,
        conversions: cli.conversions,
        prices: cli.prices,
    });
    tracing::debug!("Configuration: {:?}", config);

    if cli.verbose {
        build_info::print_startup_banner(&config);
    }

    match cli.command {
        Commands::Report { recipe, output } => {
            let tables = Tables::load(&config)?;
            let loaded = load_recipe(&config.recipe_path(&recipe.name))?;
            let recipe = match recipe.batch {
                Some(batch) => loaded.scale_to_size(batch)?,
                None => loaded,
            };
            emit(&config, &tables, &recipe, &output)
        }
        Commands::Merge { recipes, output } => {
            let tables = Tables::load(&config)?;
            let normalized = recipes
                .iter()
                .map(|spec| prepare_for_merge(&config, &tables, spec))
                .collect::<Result<Vec<_>, _>>()?;

            let Some((first, rest)) = normalized.split_first() else {
                return Err("merge needs at least two recipes".into());
            };
            let merged = Recipe::merge_all(first, rest)?;
            emit(&config, &tables, &merged, &output)
        }
        Commands::Check { recipe } => {
            let tables = Tables::load(&config)?;
            check(&tables, &load_recipe(&config.recipe_path(&recipe))?)
        }
        Commands::Version => {
            println!("{}", serde_json::to_string_pretty(&BuildInfo::current())?);
            Ok(())
        }
    }
}

/// Load, gram-normalize and optionally scale one merge operand
fn prepare_for_merge(
    config: &Config,
    tables: &Tables,
    spec: &RecipeSpec,
) -> Result<Recipe, Box<dyn std::error::Error>> {
    let recipe = load_recipe(&config.recipe_path(&spec.name))?.convert_to_grams(&tables.conversions)?;
    Ok(match spec.batch {
        Some(batch) => recipe.scale_to_size(batch)?,
        None => recipe,
    })
}

fn emit(
    config: &Config,
    tables: &Tables,
    recipe: &Recipe,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = summarize(recipe, &tables.conversions, &tables.prices)?;
    let now = Local::now();

    print!("{}", render(&summary, output.format, now)?);
    if output.format == ReportFormat::Json {
        println!();
    }

    if output.save {
        let path = save_report(&config.output_dir, &summary, output.format, now)?;
        eprintln!("Saved report to {}", path.display());
    }
    Ok(())
}

fn check(tables: &Tables, recipe: &Recipe) -> Result<(), Box<dyn std::error::Error>> {
    let unmapped = tables.conversions.unmapped(recipe);
    let unpriced = tables.prices.unpriced(recipe);

    for row in tables.conversions.skipped() {
        println!("skipped conversion row: {} ({:?})", row.ingredient, row.reason);
    }
    for name in &unmapped {
        println!("no conversion: {}", name);
    }
    for name in &unpriced {
        println!("no price: {}", name);
    }

    let problems = unmapped.len() + unpriced.len();
    if problems > 0 {
        return Err(format!("'{}' has {} unresolved ingredients", recipe.name(), problems).into());
    }

    println!("'{}': all {} ingredients convert and have prices", recipe.name(), recipe.ingredients().len());
    Ok(())
}
