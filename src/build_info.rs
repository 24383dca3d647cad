//! Build information module
//!
//! Identifies which build produced a report: the `version` command, the
//! JSON report header and the text report footer all read from here.

use std::fmt;

use serde::Serialize;

use crate::config::Config;

/// Build timestamp in ISO 8601 format, set by build.rs
pub const BUILD_TIMESTAMP: &str = match option_env!("RECIPE_COST_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build stamp embedded in JSON reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }
}

/// `recipe-cost 1.0.0 (built 2024-03-01T12:30:00Z)`
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (built {})", self.name, self.version, self.build_timestamp)
    }
}

/// Banner lines: the build, then where tables are read from and reports go
fn banner_lines(info: &BuildInfo, config: &Config) -> Vec<String> {
    let rule = "=".repeat(47);
    vec![
        rule.clone(),
        "  Recipe Cost Calculator".to_string(),
        format!("  {}", info),
        format!("  Conversions: {}", config.conversions_path.display()),
        format!("  Prices:      {}", config.prices_path.display()),
        format!("  Reports:     {}", config.output_dir.display()),
        rule,
    ]
}

/// Print the startup banner to stderr
pub fn print_startup_banner(config: &Config) {
    for line in banner_lines(&BuildInfo::current(), config) {
        eprintln!("{}", line);
    }
}
