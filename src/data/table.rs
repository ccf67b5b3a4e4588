//! Table Module
//! Immutable, schema-checked in-memory table of salary records.

use super::schema::{CellValue, ColumnId};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use thiserror::Error;

/// Why a required field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    Missing,
    NotNumeric,
    NotFinite,
    Negative,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MalformedReason::Missing => "is missing",
            MalformedReason::NotNumeric => "is not a number",
            MalformedReason::NotFinite => "is not a finite number",
            MalformedReason::Negative => "is negative",
        };
        f.write_str(text)
    }
}

/// A record whose required field could not be parsed. `row` is 1-based.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row {row}: '{column}' {reason} (value: {value:?})")]
pub struct MalformedRecordError {
    pub row: usize,
    pub column: ColumnId,
    pub value: String,
    pub reason: MalformedReason,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(ColumnId),
    #[error("duplicate column '{0}'")]
    DuplicateColumn(ColumnId),
    #[error("row {row} has {found} fields, expected {expected}")]
    FieldCount {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    experience_level: String,
    salary_in_usd: f64,
    remote_ratio: CellValue,
    cells: Vec<CellValue>,
}

impl Record {
    pub fn experience_level(&self) -> &str {
        &self.experience_level
    }

    pub fn salary_in_usd(&self) -> f64 {
        self.salary_in_usd
    }

    pub fn remote_ratio(&self) -> &CellValue {
        &self.remote_ratio
    }

    /// All cells in schema order.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

/// Ordered records sharing one column schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<ColumnId>,
    records: Vec<Record>,
}

/// Positions of the required columns within the schema.
struct RequiredIndices {
    experience_level: usize,
    salary_in_usd: usize,
    remote_ratio: usize,
}

impl Table {
    /// Build a table from a header and raw rows, validating the schema and
    /// every required field. The first malformed row aborts construction.
    pub fn from_rows(
        headers: &[String],
        rows: Vec<Vec<Option<String>>>,
    ) -> Result<Self, SchemaError> {
        let columns: Vec<ColumnId> = headers.iter().map(|h| ColumnId::from_header(h)).collect();

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column) {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }

        let position = |id: &ColumnId| {
            columns
                .iter()
                .position(|c| c == id)
                .ok_or_else(|| SchemaError::MissingColumn(id.clone()))
        };
        let [experience_level, salary_in_usd, remote_ratio] = ColumnId::REQUIRED.map(|id| position(&id));
        let required = RequiredIndices {
            experience_level: experience_level?,
            salary_in_usd: salary_in_usd?,
            remote_ratio: remote_ratio?,
        };

        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| Self::parse_record(&columns, &required, i + 1, row))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { columns, records })
    }

    fn parse_record(
        columns: &[ColumnId],
        required: &RequiredIndices,
        row: usize,
        raw: Vec<Option<String>>,
    ) -> Result<Record, SchemaError> {
        if raw.len() != columns.len() {
            return Err(SchemaError::FieldCount {
                row,
                found: raw.len(),
                expected: columns.len(),
            });
        }

        let malformed = |column: ColumnId, value: Option<&str>, reason| MalformedRecordError {
            row,
            column,
            value: value.unwrap_or_default().to_string(),
            reason,
        };

        let level_raw = raw[required.experience_level].as_deref();
        let experience_level = match level_raw.map(str::trim) {
            Some(level) if !level.is_empty() => level.to_string(),
            _ => {
                return Err(
                    malformed(ColumnId::ExperienceLevel, level_raw, MalformedReason::Missing).into(),
                )
            }
        };

        let salary_raw = raw[required.salary_in_usd].as_deref();
        let salary_in_usd = match CellValue::infer(salary_raw) {
            CellValue::Null => {
                return Err(malformed(ColumnId::SalaryInUsd, salary_raw, MalformedReason::Missing).into())
            }
            cell => match cell.as_f64() {
                None => {
                    return Err(
                        malformed(ColumnId::SalaryInUsd, salary_raw, MalformedReason::NotNumeric)
                            .into(),
                    )
                }
                Some(v) if !v.is_finite() => {
                    return Err(
                        malformed(ColumnId::SalaryInUsd, salary_raw, MalformedReason::NotFinite)
                            .into(),
                    )
                }
                Some(v) if v < 0.0 => {
                    return Err(
                        malformed(ColumnId::SalaryInUsd, salary_raw, MalformedReason::Negative)
                            .into(),
                    )
                }
                Some(v) => v,
            },
        };

        let ratio_raw = raw[required.remote_ratio].as_deref();
        let remote_ratio = match CellValue::infer(ratio_raw) {
            CellValue::Null => {
                return Err(malformed(ColumnId::RemoteRatio, ratio_raw, MalformedReason::Missing).into())
            }
            cell => cell,
        };

        let cells = raw.iter().map(|v| CellValue::infer(v.as_deref())).collect();

        Ok(Record {
            experience_level,
            salary_in_usd,
            remote_ratio,
            cells,
        })
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, column: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &ColumnId) -> bool {
        self.column_index(column).is_some()
    }

    /// Cell at `row` for `column`; `None` if either is out of range.
    pub fn cell(&self, row: usize, column: &ColumnId) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.records.get(row)?.cells.get(idx)
    }

    /// The salary column as plain numbers, in table order.
    pub fn salaries(&self) -> Vec<f64> {
        self.records.iter().map(Record::salary_in_usd).collect()
    }

    /// Distinct experience levels in first-appearance order.
    pub fn experience_levels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(Record::experience_level)
            .filter(|level| seen.insert(*level))
            .map(str::to_string)
            .collect()
    }

    /// Distinct remote ratios, sorted.
    pub fn remote_ratios(&self) -> BTreeSet<CellValue> {
        self.records.iter().map(|r| r.remote_ratio.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(values: &[&str]) -> Vec<Option<String>> {
        values
            .iter()
            .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
            .collect()
    }

    #[test]
    fn preserves_column_order_and_passthrough_columns() {
        let table = Table::from_rows(
            &headers(&["job_title", "salary_in_usd", "Column 1", "experience_level", "remote_ratio"]),
            vec![row(&["Data Scientist", "85000", "7", "SE", "100"])],
        )
        .unwrap();

        assert_eq!(
            table.columns(),
            &[
                ColumnId::JobTitle,
                ColumnId::SalaryInUsd,
                ColumnId::Other("Column 1".into()),
                ColumnId::ExperienceLevel,
                ColumnId::RemoteRatio,
            ]
        );
        let record = &table.records()[0];
        assert_eq!(record.experience_level(), "SE");
        assert_eq!(record.salary_in_usd(), 85000.0);
        assert_eq!(record.remote_ratio(), &CellValue::Integer(100));
        assert_eq!(
            table.cell(0, &ColumnId::Other("Column 1".into())),
            Some(&CellValue::Integer(7))
        );
    }

    #[test]
    fn missing_salary_column_is_a_schema_error() {
        let err = Table::from_rows(
            &headers(&["experience_level", "remote_ratio"]),
            vec![row(&["SE", "0"])],
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::MissingColumn(ColumnId::SalaryInUsd));
    }

    #[test]
    fn duplicate_header_is_rejected() {
        let err = Table::from_rows(
            &headers(&["experience_level", "salary_in_usd", "remote_ratio", "salary_in_usd"]),
            vec![],
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateColumn(ColumnId::SalaryInUsd));
    }

    #[test]
    fn non_numeric_salary_fails_fast_with_row_number() {
        let err = Table::from_rows(
            &headers(&["experience_level", "salary_in_usd", "remote_ratio"]),
            vec![
                row(&["SE", "100000", "0"]),
                row(&["MI", "lots", "50"]),
                row(&["EN", "", "100"]),
            ],
        )
        .unwrap_err();

        match err {
            SchemaError::Malformed(e) => {
                assert_eq!(e.row, 2);
                assert_eq!(e.column, ColumnId::SalaryInUsd);
                assert_eq!(e.value, "lots");
                assert_eq!(e.reason, MalformedReason::NotNumeric);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_and_negative_salaries_are_malformed() {
        let cols = headers(&["experience_level", "salary_in_usd", "remote_ratio"]);

        let missing = Table::from_rows(&cols, vec![row(&["SE", "", "0"])]).unwrap_err();
        assert!(matches!(
            missing,
            SchemaError::Malformed(MalformedRecordError { reason: MalformedReason::Missing, .. })
        ));

        let negative = Table::from_rows(&cols, vec![row(&["SE", "-5", "0"])]).unwrap_err();
        assert!(matches!(
            negative,
            SchemaError::Malformed(MalformedRecordError { reason: MalformedReason::Negative, .. })
        ));

        let no_level = Table::from_rows(&cols, vec![row(&[" ", "10", "0"])]).unwrap_err();
        assert!(matches!(
            no_level,
            SchemaError::Malformed(MalformedRecordError {
                column: ColumnId::ExperienceLevel,
                ..
            })
        ));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let err = Table::from_rows(
            &headers(&["experience_level", "salary_in_usd", "remote_ratio"]),
            vec![row(&["SE", "10"])],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::FieldCount {
                row: 1,
                found: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn distinct_levels_keep_first_appearance_order() {
        let table = Table::from_rows(
            &headers(&["experience_level", "salary_in_usd", "remote_ratio"]),
            vec![
                row(&["SE", "10", "100"]),
                row(&["MI", "20", "0"]),
                row(&["SE", "30", "50"]),
                row(&["EN", "40", "0"]),
            ],
        )
        .unwrap();

        assert_eq!(table.experience_levels(), vec!["SE", "MI", "EN"]);
        assert_eq!(
            table.remote_ratios().into_iter().collect::<Vec<_>>(),
            vec![CellValue::Integer(0), CellValue::Integer(50), CellValue::Integer(100)]
        );
        assert_eq!(table.salaries(), vec![10.0, 20.0, 30.0, 40.0]);
    }
}
