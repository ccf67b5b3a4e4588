//! Table widgets: the paginated data grid and the per-level statistics table.

use crate::charts::to_color32;
use crate::present::{format_currency, GridPage, Style};
use crate::stats::GroupSummary;
use egui::{Color32, RichText};

/// What the user asked the grid to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAction {
    None,
    PreviousPage,
    NextPage,
}

fn styled_cell(ui: &mut egui::Ui, text: RichText, style: &Style) {
    let text = match style.foreground {
        Some(fg) => text.color(to_color32(fg)),
        None => text,
    };
    egui::Frame::none()
        .fill(style.background.map(to_color32).unwrap_or(Color32::TRANSPARENT))
        .inner_margin(egui::Margin::symmetric(6.0, 3.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// Draw one page of the grid with its pager underneath.
pub fn draw_grid_page(ui: &mut egui::Ui, page: &GridPage) -> GridAction {
    let mut action = GridAction::None;

    egui::ScrollArea::horizontal()
        .id_salt("grid_scroll")
        .show(ui, |ui| {
            egui::Grid::new("data_grid")
                .spacing([1.0, 1.0])
                .show(ui, |ui| {
                    for header in &page.headers {
                        styled_cell(ui, RichText::new(header.column.as_str()).strong(), &header.style);
                    }
                    ui.end_row();

                    for row in &page.rows {
                        for cell in &row.cells {
                            styled_cell(ui, RichText::new(&cell.text), &cell.style);
                        }
                        ui.end_row();
                    }
                });
        });

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(page.has_previous(), egui::Button::new("◀ Previous"))
            .clicked()
        {
            action = GridAction::PreviousPage;
        }
        ui.label(format!(
            "Page {} of {} ({} rows)",
            page.page + 1,
            page.page_count,
            page.total_rows
        ));
        if ui
            .add_enabled(page.has_next(), egui::Button::new("Next ▶"))
            .clicked()
        {
            action = GridAction::NextPage;
        }
    });

    action
}

/// Salary statistics per experience level.
pub fn draw_group_table(ui: &mut egui::Ui, groups: &[GroupSummary]) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(5.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            egui::Grid::new("group_stats_table")
                .striped(true)
                .min_col_width(70.0)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    for title in ["Experience Level", "N", "Mean", "Median", "Std"] {
                        ui.label(RichText::new(title).strong().size(12.0));
                    }
                    ui.end_row();

                    for group in groups {
                        ui.label(RichText::new(&group.group_name).size(12.0));
                        ui.label(RichText::new(group.count().to_string()).size(12.0));
                        match &group.summary {
                            Ok(s) => {
                                for v in [s.mean, s.median, s.std] {
                                    ui.label(RichText::new(format_currency(v)).size(12.0));
                                }
                            }
                            Err(_) => {
                                for _ in 0..3 {
                                    ui.label(RichText::new("-").size(12.0));
                                }
                            }
                        }
                        ui.end_row();
                    }
                });
        });
}
