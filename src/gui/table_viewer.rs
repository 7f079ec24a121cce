//! Table Viewer Widget
//! Scrollable, striped grid showing the current explorer table.

use crate::data::TableView;
use egui::{Color32, RichText, ScrollArea};

const TABLE_HEIGHT: f32 = 420.0;

/// Holds the stringified table so it is only rebuilt when the view changes.
#[derive(Default)]
pub struct TableViewer {
    pub heading: String,
    pub view: TableView,
}

impl TableViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view(&mut self, heading: &str, view: TableView) {
        self.heading = heading.to_string();
        self.view = view;
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&self.heading).size(18.0).strong());
            ui.label(
                RichText::new(format!("{} rows", self.view.row_count()))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(5.0);

        if self.view.is_empty() {
            egui::Frame::none()
                .fill(ui.visuals().widgets.noninteractive.bg_fill)
                .rounding(5.0)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new("No movies match the current filters").color(Color32::GRAY),
                    );
                });
            return;
        }

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::both()
                    .id_salt("movie_table")
                    .max_height(TABLE_HEIGHT)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        egui::Grid::new("movie_table_grid")
                            .striped(true)
                            .min_col_width(40.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                for name in &self.view.columns {
                                    ui.label(RichText::new(name).strong().size(12.0));
                                }
                                ui.end_row();

                                for row in &self.view.rows {
                                    for cell in row {
                                        ui.label(RichText::new(cell).size(12.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}
