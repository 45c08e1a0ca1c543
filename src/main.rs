use std::path::PathBuf;

use anyhow::{Context, Result};
use cf_loader::{
    EntityKind, LoadSummary, LoaderConfig, MemoryStore, RecordStore, RestStore, StoreConfig,
    run_import,
};
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};

/// Which disclosure files to import
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    Filers,
    Reports,
    Contributions,
    Expenditures,
    /// All four, in dependency order
    All,
}

impl Target {
    fn kinds(self) -> Vec<EntityKind> {
        match self {
            Self::Filers => vec![EntityKind::Filer],
            Self::Reports => vec![EntityKind::Report],
            Self::Contributions => vec![EntityKind::Contribution],
            Self::Expenditures => vec![EntityKind::Expenditure],
            Self::All => EntityKind::ALL.to_vec(),
        }
    }
}

/// Load campaign-finance disclosure exports into the store
#[derive(Parser, Debug)]
#[command(name = "cf-loader")]
#[command(version)]
struct Args {
    /// Directory holding cand.csv, cover.csv, contribs_*.csv and expend_*.csv
    #[arg(long, default_value = ".", env = "CF_DATA_DIR")]
    data_dir: PathBuf,

    /// Normalize and batch into memory without contacting the store
    #[arg(long)]
    dry_run: bool,

    /// Records per upsert (defaults per kind)
    #[arg(long, env = "CF_BATCH_SIZE")]
    batch_size: Option<usize>,

    /// Records per retry chunk after a failed upsert (defaults per kind)
    #[arg(long, env = "CF_FALLBACK_BATCH_SIZE")]
    fallback_batch_size: Option<usize>,

    /// Skip records received before this YYYYMMDD date
    #[arg(long, default_value_t = cf_loader::filter::DEFAULT_MIN_RECEIVED_DATE, env = "CF_MIN_RECEIVED_DATE")]
    min_received_date: i64,

    #[arg(value_enum)]
    target: Target,
}

fn run<S: RecordStore>(kinds: &[EntityKind], config: &LoaderConfig, store: &mut S) -> Result<()> {
    let mut total = LoadSummary::default();
    for &kind in kinds {
        let summary = run_import(kind, config, &mut *store)
            .with_context(|| format!("Failed to import {kind} records"))?;
        println!("{kind}: {summary}");
        total += summary;
    }

    if kinds.len() > 1 {
        println!("total: {total}");
    }
    if total.dropped > 0 {
        warn!("{} records were dropped after failed upserts", total.dropped);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();
    let config = LoaderConfig {
        data_dir: args.data_dir,
        batch_size: args.batch_size,
        fallback_batch_size: args.fallback_batch_size,
        min_received_date: args.min_received_date,
        dry_run: args.dry_run,
    };
    config.validate().context("Invalid loader configuration")?;

    let kinds = args.target.kinds();
    info!("Importing from {}", config.data_dir.display());

    if config.dry_run {
        info!("Dry run: records are kept in memory only");
        let mut store = MemoryStore::new();
        run(&kinds, &config, &mut store)?;
        for kind in &kinds {
            info!("{} distinct {kind} records would be upserted", store.len(*kind));
        }
    } else {
        let store_config = StoreConfig::from_env().context("Store is not configured")?;
        info!("Upserting into {}", store_config.url);
        let mut store = RestStore::new(&store_config).context("Failed to create store client")?;
        run(&kinds, &config, &mut store)?;
    }

    Ok(())
}
