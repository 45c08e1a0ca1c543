//! Builds the city → county/region lookup file from a city gazetteer
//!
//! The input is the Simplemaps US cities CSV, available from
//! <https://simplemaps.com/data/us-cities>.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use cf_loader::GeoLookupBuilder;
use clap::Parser;
use log::info;

/// Build a city lookup table for one state
#[derive(Parser, Debug)]
#[command(name = "geo-lookup")]
#[command(version)]
struct Args {
    /// Gazetteer CSV (city, state_id, county_name, county_fips columns)
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSON file; parent directories are created
    #[arg(short, long)]
    output: PathBuf,

    /// Two-letter state code to keep
    #[arg(long, default_value = "TX")]
    state: String,
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let start = Instant::now();

    let mut builder = GeoLookupBuilder::new(args.state.trim().to_uppercase());
    let rows = builder
        .read_csv(&args.input)
        .with_context(|| format!("Failed to read gazetteer {}", args.input.display()))?;

    let (cities, counties) = (builder.city_count(), builder.county_count());
    let lookup = builder.build(chrono::Local::now().date_naive());
    lookup
        .write_json(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Read {rows} gazetteer rows in {:?}", start.elapsed());
    println!("Created {}", args.output.display());
    println!("  - {cities} cities");
    println!("  - {counties} counties");
    println!("  - {} metro regions", lookup.regions.0.len());
    Ok(())
}
