//! Column Schema Module
//! Known column identifiers of the salary dataset and typed cell values.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Identifier of a dataset column.
///
/// The salary dataset's columns are known at compile time; anything else in
/// the header is carried as [`ColumnId::Other`] and passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColumnId {
    WorkYear,
    ExperienceLevel,
    EmploymentType,
    JobTitle,
    Salary,
    SalaryCurrency,
    SalaryInUsd,
    EmployeeResidence,
    RemoteRatio,
    CompanyLocation,
    CompanySize,
    Other(String),
}

impl ColumnId {
    /// Columns every input file must provide.
    pub const REQUIRED: [ColumnId; 3] = [
        ColumnId::ExperienceLevel,
        ColumnId::SalaryInUsd,
        ColumnId::RemoteRatio,
    ];

    /// Map a CSV header to its identifier. Never fails.
    pub fn from_header(header: &str) -> Self {
        match header {
            "work_year" => ColumnId::WorkYear,
            "experience_level" => ColumnId::ExperienceLevel,
            "employment_type" => ColumnId::EmploymentType,
            "job_title" => ColumnId::JobTitle,
            "salary" => ColumnId::Salary,
            "salary_currency" => ColumnId::SalaryCurrency,
            "salary_in_usd" => ColumnId::SalaryInUsd,
            "employee_residence" => ColumnId::EmployeeResidence,
            "remote_ratio" => ColumnId::RemoteRatio,
            "company_location" => ColumnId::CompanyLocation,
            "company_size" => ColumnId::CompanySize,
            other => ColumnId::Other(other.to_string()),
        }
    }

    /// Header text exactly as it appears in the file.
    pub fn as_str(&self) -> &str {
        match self {
            ColumnId::WorkYear => "work_year",
            ColumnId::ExperienceLevel => "experience_level",
            ColumnId::EmploymentType => "employment_type",
            ColumnId::JobTitle => "job_title",
            ColumnId::Salary => "salary",
            ColumnId::SalaryCurrency => "salary_currency",
            ColumnId::SalaryInUsd => "salary_in_usd",
            ColumnId::EmployeeResidence => "employee_residence",
            ColumnId::RemoteRatio => "remote_ratio",
            ColumnId::CompanyLocation => "company_location",
            ColumnId::CompanySize => "company_size",
            ColumnId::Other(name) => name,
        }
    }

    /// Human readable label used for chart axes and legends.
    pub fn label(&self) -> String {
        match self {
            ColumnId::ExperienceLevel => "Experience Level".to_string(),
            ColumnId::SalaryInUsd => "Salary (USD)".to_string(),
            ColumnId::RemoteRatio => "Remote Ratio".to_string(),
            other => other.as_str().to_string(),
        }
    }
}

impl From<String> for ColumnId {
    fn from(header: String) -> Self {
        ColumnId::from_header(&header)
    }
}

impl From<ColumnId> for String {
    fn from(id: ColumnId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed cell inferred from raw CSV text.
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Infer the narrowest type for a raw field. Empty or absent fields are `Null`.
    pub fn infer(raw: Option<&str>) -> Self {
        let Some(s) = raw.map(str::trim) else {
            return CellValue::Null;
        };
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" => CellValue::Bool(true),
            "false" | "False" => CellValue::Bool(false),
            _ => CellValue::Text(s.to_string()),
        }
    }

    /// Numeric view of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }
}

// Numbers compare by value across Integer/Float so that 50 and 50.0 are one key.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(v: &CellValue) -> u8 {
            match v {
                CellValue::Null => 0,
                CellValue::Bool(_) => 1,
                CellValue::Integer(_) | CellValue::Float(_) => 2,
                CellValue::Text(_) => 3,
            }
        }
        match (self, other) {
            (CellValue::Null, CellValue::Null) => Ordering::Equal,
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let (x, y) = (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN));
                x.total_cmp(&y)
            }
            (a, b) => rank(a).cmp(&rank(b)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_round_trip_through_column_ids() {
        assert_eq!(ColumnId::from_header("salary_in_usd"), ColumnId::SalaryInUsd);
        assert_eq!(
            ColumnId::from_header("Column 1"),
            ColumnId::Other("Column 1".to_string())
        );
        assert_eq!(ColumnId::RemoteRatio.to_string(), "remote_ratio");
        assert_eq!(ColumnId::Other("x y".into()).as_str(), "x y");
    }

    #[test]
    fn labels_for_chart_columns() {
        assert_eq!(ColumnId::ExperienceLevel.label(), "Experience Level");
        assert_eq!(ColumnId::SalaryInUsd.label(), "Salary (USD)");
        assert_eq!(ColumnId::RemoteRatio.label(), "Remote Ratio");
        assert_eq!(ColumnId::JobTitle.label(), "job_title");
    }

    #[test]
    fn infers_cell_types() {
        assert_eq!(CellValue::infer(Some("42")), CellValue::Integer(42));
        assert_eq!(CellValue::infer(Some(" 3.5 ")), CellValue::Float(3.5));
        assert_eq!(CellValue::infer(Some("SE")), CellValue::Text("SE".into()));
        assert_eq!(CellValue::infer(Some("true")), CellValue::Bool(true));
        assert_eq!(CellValue::infer(Some("")), CellValue::Null);
        assert_eq!(CellValue::infer(None), CellValue::Null);
    }

    #[test]
    fn numbers_order_by_value_across_types() {
        let mut values = vec![
            CellValue::Integer(100),
            CellValue::Text("hybrid".into()),
            CellValue::Float(50.5),
            CellValue::Integer(0),
            CellValue::Null,
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Null,
                CellValue::Integer(0),
                CellValue::Float(50.5),
                CellValue::Integer(100),
                CellValue::Text("hybrid".into()),
            ]
        );
        assert_eq!(
            CellValue::Integer(50).cmp(&CellValue::Float(50.0)),
            Ordering::Equal
        );
    }
}
