//! Chart Plotter Module
//! Draws the interactive salary bar chart using egui_plot.

use crate::present::{BarChartSpec, Color};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot};

/// Bar width in category slots.
const BAR_WIDTH: f64 = 0.8;

pub fn to_color32(color: Color) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Draws interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the bar chart: category axis labelled with experience levels,
    /// one legend entry per series, bars of all series overlaid.
    pub fn draw_bar_chart(ui: &mut egui::Ui, spec: &BarChartSpec) {
        let config = &spec.config;

        egui::Frame::none()
            .fill(to_color32(config.paper_background))
            .rounding(5.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                if spec.is_empty() {
                    ui.label(RichText::new("No salary records to chart").size(14.0));
                    return;
                }

                let x_labels = spec.categories.clone();
                let color_label = config.color_label.clone();

                ui.scope(|ui| {
                    // egui_plot paints its background with the extreme colour
                    ui.visuals_mut().extreme_bg_color = to_color32(config.plot_background);

                    Plot::new("salary_by_experience_level")
                        .height(config.height)
                        .legend(Legend::default())
                        .x_axis_label(config.x_label.clone())
                        .y_axis_label(config.y_label.clone())
                        .allow_scroll(false)
                        .include_y(0.0)
                        .include_x(-0.5)
                        .include_x(spec.categories.len() as f64 - 0.5)
                        .x_axis_formatter(move |mark, _range| {
                            let v = mark.value;
                            if (v - v.round()).abs() > f64::EPSILON || v < 0.0 {
                                return String::new();
                            }
                            x_labels.get(v as usize).cloned().unwrap_or_default()
                        })
                        .show(ui, |plot_ui| {
                            for series in &spec.series {
                                let color =
                                    to_color32(series.color).gamma_multiply(config.opacity);
                                let bars: Vec<Bar> = series
                                    .bars
                                    .iter()
                                    .map(|b| {
                                        Bar::new(b.category as f64, b.value)
                                            .width(BAR_WIDTH)
                                            .fill(color)
                                    })
                                    .collect();

                                plot_ui.bar_chart(
                                    BarChart::new(bars)
                                        .color(color)
                                        .name(series.name(&color_label)),
                                );
                            }
                        });
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_dashboard_colours() {
        assert_eq!(to_color32(Color::AQUAMARINE), Color32::from_rgb(127, 255, 212));
        assert_eq!(to_color32(Color::BLACK), Color32::BLACK);
    }
}
