//! Movie Data Explorer - merged movie tables with filters and frequency charts
//!
//! Loads the listings, details and ratings CSVs once at startup, joins them on
//! their shared index and browses the result in a small desktop window.

mod charts;
mod config;
mod data;
mod gui;
mod pages;
mod stats;

use anyhow::Context;
use config::{AppConfig, CONFIG_FILE};
use data::DataLoader;
use eframe::egui;
use gui::MovieExplorerApp;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load(Path::new(CONFIG_FILE)).context("invalid configuration")?;
    log::info!("Effective config: {}", config.describe());

    // Any load failure aborts before the window opens
    let dataset = DataLoader::new(&config)
        .load()
        .with_context(|| format!("failed to load movie data from {}", config.data_dir.display()))?;
    log::info!("Loaded {} movies", dataset.row_count());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Movie Data Explorer"),
        ..Default::default()
    };

    let top_n = config.top_n;
    let persist_filters = config.persist_filters;
    eframe::run_native(
        "Movie Data Explorer",
        options,
        Box::new(move |cc| {
            Ok(Box::new(MovieExplorerApp::new(
                cc,
                dataset,
                top_n,
                persist_filters,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the UI: {e}"))
}
