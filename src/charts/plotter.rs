//! Chart Plotter Module
//! Draws frequency rankings as bar charts using egui_plot.

use crate::stats::FrequencyRanking;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Plot};

pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

const CHART_HEIGHT: f32 = 320.0;
const BAR_WIDTH: f64 = 0.7;

/// Creates bar charts for frequency rankings.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Build one bar per ranking entry, at x = 0, 1, 2, ...
    pub fn bars(ranking: &FrequencyRanking) -> Vec<Bar> {
        ranking
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                Bar::new(i as f64, entry.count as f64)
                    .width(BAR_WIDTH)
                    .name(&entry.category)
                    .fill(BAR_COLOR)
            })
            .collect()
    }

    /// Map an axis position back to its category label.
    pub fn label_at(labels: &[String], value: f64) -> String {
        if value < 0.0 || (value - value.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(value.round() as usize).cloned().unwrap_or_default()
    }

    /// Draw a ranking: categories on the x axis, counts on the y axis.
    pub fn draw_ranking_chart(ui: &mut egui::Ui, id: &str, ranking: &FrequencyRanking) {
        if ranking.is_empty() {
            ui.label(RichText::new("No data").color(Color32::GRAY));
            return;
        }

        let labels: Vec<String> = ranking
            .entries()
            .iter()
            .map(|e| e.category.clone())
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(ranking.max_count() as f64 + 1.0)
            .y_axis_label("count")
            .x_axis_formatter(move |mark, _range| Self::label_at(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(Self::bars(ranking)).color(BAR_COLOR));
            });
    }
}
