// Copyright 2025 the Aevum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot CSV loading with row-shape validation.

use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;
use tracing::warn;

use crate::record::RawRecord;

/// Errors that abort a dataset load.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The resource could not be read at all.
    #[error("failed to read {path}")]
    Io {
        /// The path that failed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The document failed to parse; nothing is rendered from it.
    #[error("malformed dataset: {0}")]
    Malformed(String),
}

/// A non-fatal warning about a dropped row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-based line number in the source document (0 if unknown).
    pub line: u64,
    /// Field count the header promises.
    pub expected: usize,
    /// Field count the row actually had.
    pub found: usize,
}

impl std::fmt::Display for RowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: expected {} fields, found {}",
            self.line, self.expected, self.found
        )
    }
}

/// The result of a successful load: valid rows plus non-fatal warnings.
#[derive(Clone, Debug, Default)]
pub struct LoadOutcome {
    /// Rows that matched the header and decoded cleanly.
    pub records: Vec<RawRecord>,
    /// One warning per dropped row.
    pub warnings: Vec<RowWarning>,
}

/// Reads and parses the dataset at `path`.
///
/// This is the only I/O in the data layer; it runs once at startup and is
/// never retried.
pub fn load_csv_path(path: &Path) -> Result<LoadOutcome, DatasetError> {
    let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let outcome = parse_csv(&text)?;
    for warning in &outcome.warnings {
        warn!(%warning, "dropped malformed row");
    }
    Ok(outcome)
}

/// Parses CSV text with a header row.
///
/// Rows whose field count disagrees with the header are dropped and reported
/// as [`RowWarning`]s. Any other parser complaint (bad quoting, a field that
/// fails typed decoding) is a document-level error: complaints are collected
/// and returned together, and nothing is rendered from the document.
pub fn parse_csv(text: &str) -> Result<LoadOutcome, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::Malformed(e.to_string()))?
        .clone();
    let expected = headers.len();

    let mut outcome = LoadOutcome::default();
    let mut complaints: Vec<String> = Vec::new();

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                complaints.push(e.to_string());
                continue;
            }
        };

        if row.len() != expected {
            outcome.warnings.push(RowWarning {
                line: row.position().map_or(0, |p| p.line()),
                expected,
                found: row.len(),
            });
            continue;
        }

        match row.deserialize::<RawRecord>(Some(&headers)) {
            Ok(record) => outcome.records.push(record),
            Err(e) => complaints.push(e.to_string()),
        }
    }

    if complaints.is_empty() {
        Ok(outcome)
    } else {
        Err(DatasetError::Malformed(complaints.join("; ")))
    }
}
