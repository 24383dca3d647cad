//! Build script for recipe-cost
//!
//! Embeds the build timestamp so reports can say which build produced them.

fn main() {
    println!("cargo:rerun-if-changed=src");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    println!("cargo:rustc-env=RECIPE_COST_BUILD_TIMESTAMP={}", timestamp);
}
