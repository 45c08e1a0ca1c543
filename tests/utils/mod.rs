use std::path::Path;

use cf_loader::{LoaderConfig, RawRow, Result};
use tempfile::TempDir;

/// A temporary data directory holding source CSV files
pub struct DataDir {
    dir: TempDir,
}

impl DataDir {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a CSV file from a header and rows of values, quoting as needed
    pub fn write_csv(&self, name: &str, header: &[&str], rows: &[&[&str]]) {
        let mut writer =
            csv::Writer::from_path(self.dir.path().join(name)).expect("create csv fixture");
        writer.write_record(header).expect("write csv header");
        for row in rows {
            writer.write_record(*row).expect("write csv row");
        }
        writer.flush().expect("flush csv fixture");
    }

    /// Loader configuration pointing at this directory
    #[must_use]
    pub fn config(&self) -> LoaderConfig {
        LoaderConfig {
            data_dir: self.dir.path().to_path_buf(),
            ..Default::default()
        }
    }
}

/// Build an in-memory row stream from `(column, value)` lists
#[must_use]
pub fn rows(rows: &[&[(&str, &str)]]) -> Vec<Result<RawRow>> {
    rows.iter()
        .map(|pairs| Ok(RawRow::from_pairs(pairs.iter().copied())))
        .collect()
}
