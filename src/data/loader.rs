//! CSV Data Loader Module
//! Checks the raw file layout with `csv`, reads the values with Polars and
//! hands the rows to [`Table`] for validation.

use super::table::{SchemaError, Table};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Malformed CSV: {0}")]
    Format(#[source] csv::Error),
    #[error("Invalid dataset: {0}")]
    Schema(#[from] SchemaError),
}

/// Loads the salary dataset from disk.
pub struct DataLoader;

impl DataLoader {
    /// Load and validate a CSV file.
    ///
    /// Every column is read as text so that type inference and required-field
    /// validation happen in one place ([`Table::from_rows`]).
    pub fn load_csv(path: &Path) -> Result<Table, DataLoadError> {
        // Surface a missing or unreadable file as an I/O error rather than a Polars one.
        std::fs::File::open(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let headers = Self::read_layout(path)?;

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let columns = Self::string_columns(&df)?;
        let rows: Vec<Vec<Option<String>>> = (0..df.height())
            .map(|i| {
                columns
                    .iter()
                    .map(|col| col.get(i).cloned().flatten())
                    .collect()
            })
            .collect();

        log::debug!(
            "read {} rows x {} columns from {}",
            rows.len(),
            headers.len(),
            path.display()
        );

        let table = Table::from_rows(&headers, rows)?;
        log::info!(
            "loaded {} records ({} columns) from {}",
            table.len(),
            table.columns().len(),
            path.display()
        );
        Ok(table)
    }

    /// Header names exactly as written, after checking that every record
    /// has as many fields as the header. Polars pads short rows with nulls
    /// and renames duplicate headers, so neither its row widths nor its
    /// column names are trusted.
    fn read_layout(path: &Path) -> Result<Vec<String>, DataLoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(DataLoadError::Format)?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(DataLoadError::Format)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = 0usize;
        for record in reader.records() {
            record.map_err(|e| Self::layout_error(e, records + 1))?;
            records += 1;
        }
        log::debug!("layout of {}: {} columns, {records} records", path.display(), headers.len());
        Ok(headers)
    }

    /// `row` is the 1-based data row the reader failed on.
    fn layout_error(err: csv::Error, row: usize) -> DataLoadError {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => SchemaError::FieldCount {
                row,
                found: *len as usize,
                expected: *expected_len as usize,
            }
            .into(),
            _ => DataLoadError::Format(err),
        }
    }

    /// Materialise every column as owned optional strings.
    fn string_columns(df: &DataFrame) -> Result<Vec<Vec<Option<String>>>, DataLoadError> {
        df.get_columns()
            .iter()
            .map(|col| -> Result<Vec<Option<String>>, DataLoadError> {
                let as_text = col.cast(&DataType::String)?;
                let ca = as_text.as_materialized_series().str()?;
                Ok(ca
                    .into_iter()
                    .map(|v| v.map(str::to_string))
                    .collect())
            })
            .collect()
    }
}
