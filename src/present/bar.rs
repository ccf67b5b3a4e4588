//! Bar Chart Module
//! Salary by experience level, one series per remote ratio, overlay mode.

use super::color::{palette_color, plasma, Color};
use crate::data::{CellValue, ColumnId, Table};
use serde::{Deserialize, Serialize};

/// How bars sharing a category slot are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    /// Drawn on top of one another at the same position.
    Overlay,
}

/// Appearance settings of the salary chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub height: f32,
    pub opacity: f32,
    pub paper_background: Color,
    pub plot_background: Color,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            x_label: ColumnId::ExperienceLevel.label(),
            y_label: ColumnId::SalaryInUsd.label(),
            color_label: ColumnId::RemoteRatio.label(),
            height: 600.0,
            opacity: 1.0,
            paper_background: Color::AQUAMARINE,
            plot_background: Color::LIGHT_GRAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Index into [`BarChartSpec::categories`].
    pub category: usize,
    pub value: f64,
}

/// All bars of one remote ratio.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub key: CellValue,
    pub color: Color,
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Legend text, e.g. `Remote Ratio = 50`.
    pub fn name(&self, color_label: &str) -> String {
        format!("{color_label} = {}", self.key)
    }
}

/// Everything a renderer needs to draw the salary chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub categories: Vec<String>,
    /// Drawn in order; later series cover earlier ones.
    pub series: Vec<BarSeries>,
    pub mode: BarMode,
    pub config: ChartConfig,
}

impl BarChartSpec {
    /// Shape the table into the chart: one category per distinct
    /// experience level (first appearance order), one bar per record.
    pub fn from_table(table: &Table, config: &ChartConfig) -> Self {
        let categories = table.experience_levels();
        let keys: Vec<CellValue> = table.remote_ratios().into_iter().collect();
        let colors = series_colors(&keys);

        let series = keys
            .into_iter()
            .zip(colors)
            .map(|(key, color)| {
                let bars = table
                    .records()
                    .iter()
                    .filter(|r| *r.remote_ratio() == key)
                    .filter_map(|r| {
                        let category = categories
                            .iter()
                            .position(|c| c == r.experience_level())?;
                        Some(Bar {
                            category,
                            value: r.salary_in_usd(),
                        })
                    })
                    .collect();
                BarSeries { key, color, bars }
            })
            .collect();

        Self {
            categories,
            series,
            mode: BarMode::Overlay,
            config: config.clone(),
        }
    }

    /// Tallest bar, used to size the value axis.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.bars.iter().map(|b| b.value))
            .fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.bars.is_empty())
    }
}

/// Numeric keys get the continuous plasma scale over their range; anything
/// categorical falls back to the qualitative palette.
fn series_colors(keys: &[CellValue]) -> Vec<Color> {
    let numeric: Option<Vec<f64>> = keys.iter().map(CellValue::as_f64).collect();
    match numeric {
        Some(values) if !values.is_empty() => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let span = max - min;
            values
                .iter()
                .map(|v| if span > 0.0 { plasma((v - min) / span) } else { plasma(0.0) })
                .collect()
        }
        _ => (0..keys.len()).map(palette_color).collect(),
    }
}
