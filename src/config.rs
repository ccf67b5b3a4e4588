//! Dashboard configuration.
//!
//! Every field has a default reproducing the stock dashboard, so an absent or
//! partial JSON file is fine. Lookup order for the file: the
//! `SALARY_DASHBOARD_CONFIG` env var, then `dashboard.json` in the working
//! directory. The CSV path can further be overridden by the
//! `SALARY_DASHBOARD_DATA` env var and then by the first command-line argument.

use crate::present::{ChartConfig, GridStyles};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "SALARY_DASHBOARD_CONFIG";
pub const DATA_ENV: &str = "SALARY_DASHBOARD_DATA";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("page_size must be at least 1")]
    ZeroPageSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub title: String,
    pub page_size: usize,
    pub window_size: [f32; 2],
    pub chart: ChartConfig,
    pub grid: GridStyles,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("ds_salaries.csv"),
            title: "Data Scientist Analysis".to_string(),
            page_size: 10,
            window_size: [1400.0, 900.0],
            chart: ChartConfig::default(),
            grid: GridStyles::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration from the environment and command line.
    ///
    /// `args` are the program arguments without the program name.
    pub fn resolve<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = PathBuf::from(data);
        }
        if let Some(arg) = args.into_iter().next() {
            config.data_path = PathBuf::from(arg);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::{Color, Condition, Parity};
    use std::io::Write;

    #[test]
    fn defaults_match_stock_dashboard() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_path, PathBuf::from("ds_salaries.csv"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.title, "Data Scientist Analysis");
        assert_eq!(config.grid.data.len(), 5);
        assert_eq!(config.grid.header.len(), 4);
        assert!(!config.grid.editable);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "page_size": 25,
                "chart": {{ "height": 400, "paper_background": "white" }},
                "grid": {{ "data": [ {{ "if": {{ "row_parity": "even" }}, "background": "#eeeeee" }} ] }}
            }}"##
        )
        .unwrap();

        let config = DashboardConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.chart.height, 400.0);
        assert_eq!(config.chart.paper_background, Color::WHITE);
        assert_eq!(config.chart.plot_background, Color::LIGHT_GRAY);
        assert_eq!(config.grid.data.len(), 1);
        assert_eq!(config.grid.data[0].condition, Condition::RowParity(Parity::Even));
        assert_eq!(config.grid.data[0].style.background, Some(Color::rgb(0xee, 0xee, 0xee)));
        assert_eq!(config.grid.header.len(), 4);
        assert_eq!(config.title, "Data Scientist Analysis");
    }

    #[test]
    fn rejects_bad_colour_and_zero_page_size() {
        let mut bad_colour = tempfile::NamedTempFile::new().unwrap();
        write!(bad_colour, r#"{{ "chart": {{ "plot_background": "not-a-colour" }} }}"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(bad_colour.path()),
            Err(ConfigError::Json { .. })
        ));

        let mut zero = tempfile::NamedTempFile::new().unwrap();
        write!(zero, r#"{{ "page_size": 0 }}"#).unwrap();
        assert!(matches!(
            DashboardConfig::from_file(zero.path()),
            Err(ConfigError::ZeroPageSize)
        ));
    }

    #[test]
    fn command_line_argument_overrides_data_path() {
        // The only test touching these variables, so no other test races it.
        std::env::remove_var(CONFIG_ENV);
        std::env::set_var(DATA_ENV, "from_env.csv");

        let from_env = DashboardConfig::resolve(Vec::new()).unwrap();
        assert_eq!(from_env.data_path, PathBuf::from("from_env.csv"));

        let from_arg =
            DashboardConfig::resolve(vec!["from_arg.csv".to_string(), "ignored.csv".to_string()])
                .unwrap();
        assert_eq!(from_arg.data_path, PathBuf::from("from_arg.csv"));
        assert_eq!(from_arg.page_size, 10);

        std::env::remove_var(DATA_ENV);
        let fallback = DashboardConfig::resolve(Vec::new()).unwrap();
        assert_eq!(fallback.data_path, PathBuf::from("ds_salaries.csv"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DashboardConfig::from_file(Path::new("/nonexistent/dashboard.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
