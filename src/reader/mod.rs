//! Streaming reader for delimited disclosure files.
//!
//! Rows are yielded lazily as [`RawRow`] mappings from header name to raw
//! string. Bytes that are not valid UTF-8 are replaced with U+FFFD rather
//! than failing the file, and a UTF-8 BOM on the header row is dropped.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use csv::{ByteRecord, ReaderBuilder};
use encoding_rs::UTF_8;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::error::util::{safe_open_file, validate_directory};
use crate::error::{LoaderError, Result};
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Header name to column position
type ColumnIndex = FxHashMap<String, usize>;

/// One source row: raw values addressed by header name
#[derive(Debug, Clone)]
pub struct RawRow {
    columns: Arc<ColumnIndex>,
    values: Vec<String>,
    line: u64,
}

impl RawRow {
    /// Build a row from `(column, value)` pairs
    ///
    /// Later pairs with a repeated column name replace earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut columns = ColumnIndex::default();
        let mut values = Vec::new();
        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            if let Some(&idx) = columns.get(&key) {
                values[idx] = value;
            } else {
                columns.insert(key, values.len());
                values.push(value);
            }
        }

        Self {
            columns: Arc::new(columns),
            values,
            line: 0,
        }
    }

    /// Raw value of a column; missing columns and short rows read as empty
    #[must_use]
    pub fn get(&self, column: &str) -> &str {
        self.columns
            .get(column)
            .and_then(|&idx| self.values.get(idx))
            .map_or("", String::as_str)
    }

    /// First non-blank value among `columns`, in order
    #[must_use]
    pub fn first_non_empty(&self, columns: &[&str]) -> Option<String> {
        columns
            .iter()
            .map(|column| self.get(column))
            .find(|value| !value.trim().is_empty())
            .map(str::to_string)
    }

    /// Whether the header declared this column
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Line in the source file the row started on (0 when built in memory)
    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Lazy iterator of [`RawRow`]s over a CSV source
pub struct CsvRowReader<R: Read> {
    reader: csv::Reader<R>,
    columns: Arc<ColumnIndex>,
    record: ByteRecord,
    path: Option<PathBuf>,
    finished: bool,
}

impl CsvRowReader<File> {
    /// Open a CSV file for streaming
    pub fn open(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "reading disclosure rows")?;
        let mut reader = Self::from_reader(file).map_err(|e| e.with_path(path))?;
        reader.path = Some(path.to_path_buf());
        Ok(reader)
    }
}

impl<R: Read> CsvRowReader<R> {
    /// Wrap any byte source; the header row is read immediately
    pub fn from_reader(source: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true) // Allow rows with different lengths
            .has_headers(true)
            .from_reader(source);

        let headers = reader.byte_headers()?.clone();
        let mut columns = ColumnIndex::default();
        for (idx, raw) in headers.iter().enumerate() {
            let name = if idx == 0 {
                UTF_8.decode_with_bom_removal(raw).0
            } else {
                UTF_8.decode_without_bom_handling(raw).0
            };
            // A repeated header name resolves to its last column.
            columns.insert(name.trim().to_string(), idx);
        }

        Ok(Self {
            reader,
            columns: Arc::new(columns),
            record: ByteRecord::new(),
            path: None,
            finished: false,
        })
    }

    /// Header names in file order
    #[must_use]
    pub fn headers(&self) -> Vec<&str> {
        self.columns
            .iter()
            .sorted_by_key(|(_, idx)| **idx)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    fn decode_record(&self) -> RawRow {
        let values = self
            .record
            .iter()
            .map(|field| UTF_8.decode_without_bom_handling(field).0.into_owned())
            .collect();

        RawRow {
            columns: Arc::clone(&self.columns),
            values,
            line: self.record.position().map_or(0, csv::Position::line),
        }
    }
}

impl<R: Read> Iterator for CsvRowReader<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => Some(Ok(self.decode_record())),
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(e) => {
                // A broken record leaves the reader in an unknown state.
                self.finished = true;
                let err = LoaderError::from(e);
                Some(Err(match &self.path {
                    Some(path) => err.with_path(path),
                    None => err,
                }))
            }
        }
    }
}

/// How an entity kind's source files are named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePattern {
    /// Exactly one file with this name
    Single(&'static str),
    /// Every `{prefix}*.{extension}` file, in lexicographic order
    Sharded {
        prefix: &'static str,
        extension: &'static str,
    },
}

impl SourcePattern {
    /// Whether a file name belongs to this pattern
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            Self::Single(name) => file_name == *name,
            Self::Sharded { prefix, extension } => file_name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(extension))
                .is_some_and(|rest| rest.ends_with('.')),
        }
    }
}

impl std::fmt::Display for SourcePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(name) => f.write_str(name),
            Self::Sharded { prefix, extension } => write!(f, "{prefix}*.{extension}"),
        }
    }
}

/// Find the source files for a pattern, sorted by file name
///
/// A missing single file is an error; a sharded pattern with no matches
/// returns an empty list and logs a warning.
pub fn find_source_files(dir: &Path, pattern: SourcePattern) -> Result<Vec<PathBuf>> {
    log_operation_start("Searching for source files in", dir);
    validate_directory(dir, "locating source files")?;

    if let SourcePattern::Single(name) = pattern {
        let path = dir.join(name);
        safe_open_file(&path, "reading disclosure rows")?;
        return Ok(vec![path]);
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| LoaderError::io("Failed to read directory", e).with_path(dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| LoaderError::io("Failed to read directory entry", e).with_path(dir))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| pattern.matches(name));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    if files.is_empty() {
        log_warning(&format!("No files matching {pattern}"), Some(dir));
    } else {
        log_operation_complete("found", dir, files.len(), None);
    }

    Ok(files)
}
