//! Movie Explorer Main Application
//! Main window with the control panel and the selected page.

use crate::charts::ChartPlotter;
use crate::data::{Dataset, FilterCriteria, TableView};
use crate::gui::{ControlPanel, ControlPanelAction, TableViewer};
use crate::pages::{self, Page, PageContent};
use egui::{RichText, ScrollArea, SidePanel};

/// Main application window.
pub struct MovieExplorerApp {
    dataset: Dataset,
    top_n: usize,
    persist_filters: bool,
    control_panel: ControlPanel,
    table_viewer: TableViewer,
}

impl MovieExplorerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: Dataset,
        top_n: usize,
        persist_filters: bool,
    ) -> Self {
        Self::with_dataset(dataset, top_n, persist_filters)
    }

    /// Build the application state without a window.
    pub fn with_dataset(dataset: Dataset, top_n: usize, persist_filters: bool) -> Self {
        let control_panel = ControlPanel::new(dataset.rating_bounds);
        let mut app = Self {
            dataset,
            top_n,
            persist_filters,
            control_panel,
            table_viewer: TableViewer::new(),
        };
        app.refresh_explorer(None);
        app
    }

    /// Rebuild the explorer table for the given filters (`None` = full table).
    fn refresh_explorer(&mut self, submitted: Option<&FilterCriteria>) {
        match pages::render(Page::DataExplorer, &self.dataset, submitted) {
            Ok(PageContent::Explorer(view)) => {
                let rows = view.table.height();
                self.table_viewer
                    .set_view(view.heading, TableView::from_frame(&view.table));
                self.control_panel.status =
                    format!("Showing {} of {} movies", rows, self.dataset.row_count());
            }
            Ok(PageContent::Text { .. }) => {}
            Err(e) => {
                log::error!("Filtering failed: {}", e);
                self.control_panel.status = format!("Error: {}", e);
            }
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::PageChanged(page) => {
                log::debug!("Switched to page {}", page.title());
                if !self.persist_filters {
                    self.control_panel.reset_filters();
                    self.refresh_explorer(None);
                }
            }
            ControlPanelAction::Submit => {
                let criteria = self.control_panel.criteria.clone();
                self.refresh_explorer(Some(&criteria));
            }
            ControlPanelAction::Reset => {
                self.control_panel.reset_filters();
                self.refresh_explorer(None);
            }
            ControlPanelAction::None => {}
        }
    }

    fn show_page(&self, ui: &mut egui::Ui) {
        let page = self.control_panel.page;
        match page {
            Page::DataExplorer => self.show_explorer(ui),
            Page::Introduction | Page::Conclusions | Page::ResearchObjectives => {
                if let Ok(PageContent::Text { heading, body }) =
                    pages::render(page, &self.dataset, None)
                {
                    ui.heading(heading);
                    ui.add_space(10.0);
                    ui.label(RichText::new(body).size(14.0));
                }
            }
        }
    }

    fn show_explorer(&self, ui: &mut egui::Ui) {
        self.table_viewer.show(ui);

        ui.add_space(20.0);
        ui.label(
            RichText::new(format!("Top {} Most Frequent Directors", self.top_n))
                .size(18.0)
                .strong(),
        );
        ChartPlotter::draw_ranking_chart(ui, "director_chart", &self.dataset.directors);

        ui.add_space(20.0);
        ui.label(
            RichText::new(format!("Top {} Most Frequent Areas", self.top_n))
                .size(18.0)
                .strong(),
        );
        ChartPlotter::draw_ranking_chart(ui, "area_chart", &self.dataset.countries);
    }
}

impl eframe::App for MovieExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        // Central panel - selected page
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Movie Data Explorer");
            ui.separator();
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.show_page(ui));
        });
    }
}
