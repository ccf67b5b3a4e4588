//! Salary summary text block.

use crate::stats::{InsufficientDataError, StatisticsSummary};

/// Currency with exactly two decimals, rounded: `95812.43491` → `$95812.43`.
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub value: String,
}

impl SummaryLine {
    /// Label padded so the colons line up.
    pub fn text(&self) -> String {
        format!("{:<19}: {}", self.label, self.value)
    }
}

/// Display-ready salary statistics, or a placeholder when there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBlock {
    Lines(Vec<SummaryLine>),
    Placeholder(String),
}

impl SummaryBlock {
    pub fn from_result(result: &Result<StatisticsSummary, InsufficientDataError>) -> Self {
        match result {
            Ok(summary) => Self::from_summary(summary),
            Err(e) => Self::Placeholder(format!(
                "No data: salary statistics need at least 2 records (found {})",
                e.found
            )),
        }
    }

    /// Mean, median and standard deviation. Variance stays out of the display.
    pub fn from_summary(summary: &StatisticsSummary) -> Self {
        Self::Lines(vec![
            SummaryLine {
                label: "Mean Salary",
                value: format_currency(summary.mean),
            },
            SummaryLine {
                label: "Median Salary",
                value: format_currency(summary.median),
            },
            SummaryLine {
                label: "Standard Deviation",
                value: format_currency(summary.std),
            },
        ])
    }

    /// Plain text lines in display order.
    pub fn texts(&self) -> Vec<String> {
        match self {
            Self::Lines(lines) => lines.iter().map(SummaryLine::text).collect(),
            Self::Placeholder(text) => vec![text.clone()],
        }
    }
}
