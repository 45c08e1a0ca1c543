//! Per-kind import runs over a data directory
//!
//! An import resolves the kind's source files, then feeds each through one
//! [`BatchLoader`] and one [`Pipeline`] in file-name order, so deduplication
//! and the store connection span every file of the kind.

use std::time::Instant;

use crate::config::LoaderConfig;
use crate::entity::{EntityKind, EntitySpec, Record, contribution, expenditure, filer, report};
use crate::error::Result;
use crate::filter::ReceivedDateFilter;
use crate::loader::{BatchLoader, LoadSummary, Pipeline};
use crate::reader::{CsvRowReader, find_source_files};
use crate::store::RecordStore;
use crate::utils::logging::{
    create_spinner, finish_progress_bar, log_operation_complete, log_operation_start,
};

/// Import every source file of one kind
///
/// # Arguments
/// * `kind` - Entity kind to import
/// * `config` - Run configuration; validated before any file is opened
/// * `store` - Destination store
///
/// # Returns
/// The merged summary over all files of the kind
///
/// # Errors
/// Returns an error for invalid configuration, a missing data directory or
/// single source file, or an unreadable row
pub fn run_import<S: RecordStore>(
    kind: EntityKind,
    config: &LoaderConfig,
    store: &mut S,
) -> Result<LoadSummary> {
    config.validate()?;
    match kind {
        EntityKind::Filer => import_entity(filer::spec(), config, store),
        EntityKind::Report => import_entity(report::spec(), config, store),
        EntityKind::Contribution => import_entity(contribution::spec(), config, store),
        EntityKind::Expenditure => import_entity(expenditure::spec(), config, store),
    }
}

/// Import all four kinds in dependency order: filers, reports,
/// contributions, expenditures
pub fn run_all<S: RecordStore>(
    config: &LoaderConfig,
    store: &mut S,
) -> Result<Vec<(EntityKind, LoadSummary)>> {
    EntityKind::ALL
        .into_iter()
        .map(|kind| run_import(kind, config, &mut *store).map(|summary| (kind, summary)))
        .collect()
}

/// Import one kind described by `spec`, honouring the config's overrides
pub fn import_entity<R, S>(
    spec: EntitySpec<R>,
    config: &LoaderConfig,
    store: &mut S,
) -> Result<LoadSummary>
where
    R: Record,
    S: RecordStore,
{
    let kind = spec.kind();
    let files = find_source_files(&config.data_dir, kind.source_pattern())?;

    let batch_size = config.batch_size.unwrap_or(spec.batch_size);
    let fallback_batch_size = config.fallback_batch_size.unwrap_or(spec.fallback_batch_size);
    log::info!(
        "Importing {} files of kind {kind} (batch {batch_size}, fallback {fallback_batch_size})",
        files.len()
    );

    let mut pipeline = Pipeline::new(spec, ReceivedDateFilter::new(config.min_received_date));
    let mut loader = BatchLoader::new(&mut *store, batch_size, fallback_batch_size);
    let mut total = LoadSummary::default();

    for path in &files {
        let start = Instant::now();
        log_operation_start(&format!("Importing {kind} records from"), path);

        let rows = CsvRowReader::open(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let spinner = create_spinner(Some(&file_name));
        loader.set_progress(spinner.clone());

        let summary = loader.load(&mut pipeline, rows)?;

        finish_progress_bar(&spinner, Some(&format!("{file_name}: {} persisted", summary.persisted)));
        log_operation_complete("imported", path, summary.persisted, Some(start.elapsed()));
        log::info!("{file_name}: {summary}");
        total += summary;
    }

    if total.dropped > 0 {
        log::warn!("{} {kind} records could not be persisted", total.dropped);
    }
    log::info!("Finished {kind} import: {total}");
    Ok(total)
}
