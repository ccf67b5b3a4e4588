//! Startup context: everything the renderers need, computed once.

use crate::config::DashboardConfig;
use crate::data::{DataLoadError, DataLoader, Table};
use crate::present::{build_page, BarChartSpec, GridPage, SummaryBlock};
use crate::stats::{GroupSummary, InsufficientDataError, StatisticsSummary, StatsCalculator};
use std::path::{Path, PathBuf};

/// The loaded dataset and everything derived from it. Immutable; a reload
/// builds a new value and the owner swaps it in whole.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub config: DashboardConfig,
    pub source: PathBuf,
    pub table: Table,
    pub salary_summary: Result<StatisticsSummary, InsufficientDataError>,
    pub group_summaries: Vec<GroupSummary>,
    pub summary_block: SummaryBlock,
    pub chart: BarChartSpec,
}

impl Dashboard {
    /// Run the whole pipeline for the configured data file.
    pub fn load(config: &DashboardConfig) -> Result<Self, DataLoadError> {
        Self::load_from(&config.data_path, config)
    }

    /// Run the pipeline for `path`, keeping every other setting from `config`.
    pub fn load_from(path: &Path, config: &DashboardConfig) -> Result<Self, DataLoadError> {
        let table = DataLoader::load_csv(path)?;
        Ok(Self::from_table(table, path, config))
    }

    /// Build a fresh dashboard from another file with the same settings.
    /// `self` is untouched; the caller swaps the result in on success.
    pub fn reload(&self, path: &Path) -> Result<Self, DataLoadError> {
        Self::load_from(path, &self.config)
    }

    /// Derive statistics and presentation structures from a loaded table.
    pub fn from_table(table: Table, source: &Path, config: &DashboardConfig) -> Self {
        let salary_summary = StatsCalculator::compute_summary(&table.salaries());
        match &salary_summary {
            Ok(s) => log::info!(
                "salary statistics over {} records: mean {:.2}, median {:.2}, std {:.2}",
                s.count,
                s.mean,
                s.median,
                s.std
            ),
            Err(e) => log::warn!("salary statistics unavailable: {e}"),
        }

        let group_summaries = StatsCalculator::compute_group_summaries(&table);
        let summary_block = SummaryBlock::from_result(&salary_summary);
        let chart = BarChartSpec::from_table(&table, &config.chart);
        log::debug!(
            "chart: {} categories, {} series",
            chart.categories.len(),
            chart.series.len()
        );

        Self {
            config: config.clone(),
            source: source.to_path_buf(),
            table,
            salary_summary,
            group_summaries,
            summary_block,
            chart,
        }
    }

    /// Styled grid for page `page` (zero-based, clamped).
    pub fn page(&self, page: usize) -> GridPage {
        build_page(&self.table, &self.config.grid, page, self.config.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataLoadError;
    use std::io::Write;

    const HEADER: &str = "work_year,experience_level,salary_in_usd,remote_ratio";

    fn csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        write!(file, "{body}").unwrap();
        file
    }

    #[test]
    fn load_derives_every_view() {
        let file = csv("2023,SE,100,0\n2023,MI,200,100\n2022,SE,300,50\n");
        let config = DashboardConfig {
            data_path: file.path().to_path_buf(),
            page_size: 2,
            ..DashboardConfig::default()
        };

        let dashboard = Dashboard::load(&config).unwrap();
        assert_eq!(dashboard.table.len(), 3);
        assert_eq!(dashboard.salary_summary.unwrap().mean, 200.0);
        assert_eq!(dashboard.group_summaries.len(), 2);
        assert_eq!(dashboard.chart.categories, vec!["SE", "MI"]);
        assert!(matches!(dashboard.summary_block, SummaryBlock::Lines(_)));

        let second = dashboard.page(1);
        assert_eq!(second.page_count, 2);
        assert_eq!(second.rows.len(), 1);
    }

    #[test]
    fn single_record_shows_placeholder() {
        let file = csv("2023,SE,100,0\n");
        let dashboard = Dashboard::load_from(file.path(), &DashboardConfig::default()).unwrap();
        assert_eq!(dashboard.salary_summary, Err(InsufficientDataError { found: 1 }));
        assert!(matches!(dashboard.summary_block, SummaryBlock::Placeholder(_)));
    }

    #[test]
    fn failed_reload_leaves_current_dashboard_untouched() {
        let file = csv("2023,SE,100,0\n2023,MI,200,100\n");
        let config = DashboardConfig::default();
        let current = Dashboard::load_from(file.path(), &config).unwrap();

        let err = current.reload(Path::new("/nonexistent/salaries.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
        assert_eq!(current.table.len(), 2);
        assert_eq!(current.source, file.path());
    }
}
