//! Static Chart Renderer
//! Renders the salary bar chart to PNG bytes for export.
//!
//! Layout matches the interactive chart: paper background around a plot
//! area, experience levels along x, salary along y, legend per remote ratio.

use crate::present::BarChartSpec;
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

const BAR_HALF_WIDTH: f64 = 0.4;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render: the chart has no bars")]
    Empty,
    #[error("Invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(color: crate::present::Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Upper end of the value axis: the tallest bar plus headroom.
fn value_axis_max(spec: &BarChartSpec) -> f64 {
    let max = spec.max_value();
    if max > 0.0 {
        max * 1.05
    } else {
        1.0
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart into an in-memory PNG.
    pub fn render_png(spec: &BarChartSpec, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        if spec.is_empty() {
            return Err(RenderError::Empty);
        }
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize { width, height });
        }

        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        Self::draw(spec, &mut pixels, width, height)?;

        let img = RgbImage::from_raw(width, height, pixels)
            .ok_or(RenderError::InvalidSize { width, height })?;
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        log::debug!("rendered {width}x{height} chart, {} bytes", png.len());
        Ok(png)
    }

    fn draw(spec: &BarChartSpec, pixels: &mut [u8], width: u32, height: u32) -> Result<(), RenderError> {
        let config = &spec.config;
        let categories = &spec.categories;
        let opacity = f64::from(config.opacity.clamp(0.0, 1.0));

        let root = BitMapBackend::with_buffer(pixels, (width, height)).into_drawing_area();
        root.fill(&rgb(config.paper_background)).map_err(draw_err)?;

        let x_range = -0.5..(categories.len() as f64 - 0.5);
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, 0.0..value_axis_max(spec))
            .map_err(draw_err)?;

        chart
            .plotting_area()
            .fill(&rgb(config.plot_background))
            .map_err(draw_err)?;

        let x_labels = |x: &f64| -> String {
            let idx = x.round();
            if (x - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            categories.get(idx as usize).cloned().unwrap_or_default()
        };
        let y_labels = |y: &f64| format!("{y:.0}");

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(categories.len())
            .x_label_formatter(&x_labels)
            .y_label_formatter(&y_labels)
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        for series in &spec.series {
            let color = rgb(series.color);
            let fill = color.mix(opacity).filled();
            chart
                .draw_series(series.bars.iter().map(|bar| {
                    let x = bar.category as f64;
                    Rectangle::new(
                        [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, bar.value)],
                        fill,
                    )
                }))
                .map_err(draw_err)?
                .label(series.name(&config.color_label))
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        Ok(())
    }
}
