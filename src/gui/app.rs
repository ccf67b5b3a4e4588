//! Salary Dashboard Main Application
//! Single scrolling page: data grid, salary chart and descriptive statistics.

use crate::charts::{to_color32, ChartPlotter, StaticChartRenderer};
use crate::dashboard::Dashboard;
use crate::gui::table_view::{draw_grid_page, draw_group_table, GridAction};
use crate::present::{Color, GridPage, SummaryBlock};
use egui::{RichText, TopBottomPanel};

const PAGE_BACKGROUND: Color = Color::LIGHT_BLUE;
const PAGE_PADDING: f32 = 20.0;
const EXPORT_WIDTH: u32 = 1200;

/// Main application window.
pub struct DashboardApp {
    dashboard: Dashboard,
    page: GridPage,
    status: String,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dashboard: Dashboard) -> Self {
        let page = dashboard.page(0);
        let status = format!(
            "Loaded {} records from {}",
            dashboard.table.len(),
            dashboard.source.display()
        );
        Self {
            dashboard,
            page,
            status,
        }
    }

    fn go_to_page(&mut self, page: usize) {
        self.page = self.dashboard.page(page);
    }

    /// Pick another CSV. The current dashboard stays in place unless the new
    /// file loads completely.
    fn handle_open_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        match self.dashboard.reload(&path) {
            Ok(dashboard) => {
                log::info!("reloaded dashboard from {}", path.display());
                self.status = format!(
                    "Loaded {} records from {}",
                    dashboard.table.len(),
                    path.display()
                );
                self.dashboard = dashboard;
                self.go_to_page(0);
            }
            Err(e) => {
                log::error!("reload from {} failed: {e}", path.display());
                self.status = format!("Error: {e}");
            }
        }
    }

    fn handle_export_png(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("salary_by_experience_level.png")
            .save_file()
        else {
            return;
        };

        let height = self.dashboard.chart.config.height.max(1.0) as u32;
        let png = match StaticChartRenderer::render_png(&self.dashboard.chart, EXPORT_WIDTH, height) {
            Ok(png) => png,
            Err(e) => {
                log::error!("chart export failed: {e}");
                self.status = format!("Render error: {e}");
                return;
            }
        };

        if let Err(e) = std::fs::write(&path, png) {
            log::error!("writing {} failed: {e}", path.display());
            self.status = format!("Export error: {e}");
            return;
        }
        log::info!("chart exported to {}", path.display());
        self.status = format!("Chart exported to {}", path.display());

        if let Err(e) = open::that(&path) {
            log::warn!("could not open {}: {e}", path.display());
        }
    }

    fn show_menu(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open CSV…").clicked() {
                        ui.close_menu();
                        self.handle_open_csv();
                    }
                    if ui.button("Export chart PNG…").clicked() {
                        ui.close_menu();
                        self.handle_export_png();
                    }
                });
                ui.separator();
                ui.label(RichText::new(&self.status).size(12.0));
            });
        });
    }

    fn show_summary(ui: &mut egui::Ui, block: &SummaryBlock) {
        for line in block.texts() {
            ui.label(RichText::new(line).monospace().size(14.0));
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_menu(ctx);

        let frame = egui::Frame::none()
            .fill(to_color32(PAGE_BACKGROUND))
            .inner_margin(PAGE_PADDING);

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(RichText::new(&self.dashboard.config.title).size(28.0).strong());
                    ui.add_space(12.0);

                    ui.label(RichText::new("Dataframe Layout").size(20.0).strong());
                    match draw_grid_page(ui, &self.page) {
                        GridAction::PreviousPage => self.go_to_page(self.page.page.saturating_sub(1)),
                        GridAction::NextPage => self.go_to_page(self.page.page + 1),
                        GridAction::None => {}
                    }
                    ui.add_space(16.0);

                    ui.label(RichText::new("Salary by Experience Level").size(20.0).strong());
                    ChartPlotter::draw_bar_chart(ui, &self.dashboard.chart);
                    ui.add_space(16.0);

                    ui.label(RichText::new("Salary Descriptive Statistics").size(20.0).strong());
                    Self::show_summary(ui, &self.dashboard.summary_block);
                    ui.add_space(8.0);
                    draw_group_table(ui, &self.dashboard.group_summaries);
                });
        });
    }
}
