//! Control Panel Widget
//! Left side panel with the page selector and the explorer filters.

use crate::data::{FilterCriteria, RatingRange};
use crate::pages::Page;
use egui::{Color32, ComboBox, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub page: Page,
    pub criteria: FilterCriteria,
    /// Observed rating range; the sliders cannot leave it.
    pub bounds: RatingRange,
    pub status: String,
}

impl ControlPanel {
    pub fn new(bounds: RatingRange) -> Self {
        Self {
            page: Page::default(),
            criteria: FilterCriteria::unrestricted(bounds),
            bounds,
            status: "Ready".to_string(),
        }
    }

    /// Clear the filter inputs back to their defaults.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::unrestricted(self.bounds);
    }

    /// Keep `low <= high` inside the observed bounds after a slider moved.
    pub fn clamp_range(&mut self) {
        let RatingRange { low, high } = self.bounds;
        let range = &mut self.criteria.rating;
        range.low = range.low.clamp(low, high);
        range.high = range.high.clamp(low, high);
        if range.low > range.high {
            range.high = range.low;
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🎬 Movie Data Explorer")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Page Selector =====
        ui.label(RichText::new("Choose a page").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("page_selector")
            .width(200.0)
            .selected_text(self.page.title())
            .show_ui(ui, |ui| {
                for page in Page::ALL {
                    if ui
                        .selectable_label(self.page == page, page.title())
                        .clicked()
                        && self.page != page
                    {
                        self.page = page;
                        action = ControlPanelAction::PageChanged(page);
                    }
                }
            });

        if self.page != Page::DataExplorer {
            return action;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters =====
        ui.label(RichText::new("🔎 Filters").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 90.0;
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Movie Name:"));
            ui.text_edit_singleline(&mut self.criteria.movie_name);
        });
        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Director:"));
            ui.text_edit_singleline(&mut self.criteria.director);
        });

        ui.add_space(10.0);
        ui.label("Select a range of ratings");
        let span = self.bounds.low..=self.bounds.high;
        let low_changed = ui
            .add(egui::Slider::new(&mut self.criteria.rating.low, span.clone()).text("min"))
            .changed();
        let high_changed = ui
            .add(egui::Slider::new(&mut self.criteria.rating.high, span).text("max"))
            .changed();
        if low_changed || high_changed {
            self.clamp_range();
        }

        ui.add_space(15.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("▶ Submit").size(16.0))
                .min_size(egui::vec2(160.0, 32.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Submit;
            }
            if ui.small_button("Reset").clicked() {
                action = ControlPanelAction::Reset;
            }
        });

        ui.add_space(10.0);
        ui.separator();
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    PageChanged(Page),
    Submit,
    Reset,
}
