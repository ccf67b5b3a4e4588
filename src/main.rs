//! Salary Dashboard - CSV table, salary chart and descriptive statistics.

use anyhow::{anyhow, Context};
use eframe::egui;
use salary_dashboard::gui::DashboardApp;
use salary_dashboard::{Dashboard, DashboardConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::resolve(std::env::args().skip(1))
        .context("Failed to load dashboard configuration")?;

    // Nothing is shown unless the data loads
    let dashboard = match Dashboard::load(&config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            log::error!("startup failed: {e}");
            return Err(e).with_context(|| format!("Failed to load {}", config.data_path.display()));
        }
    };
    log::info!(
        "dashboard ready: {} records, {} columns",
        dashboard.table.len(),
        dashboard.table.columns().len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 600.0])
            .with_title(config.title.clone()),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dashboard)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
