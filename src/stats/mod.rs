//! Stats module - descriptive statistics over numeric columns

mod calculator;

pub use calculator::{GroupSummary, InsufficientDataError, StatisticsSummary, StatsCalculator};
