//! Fines Explorer - regulatory sanctions dashboard
//!
//! Usage: `finescope [DATA_FILE]`. The file argument overrides `data_path`
//! from the settings file.

use anyhow::Context;
use eframe::egui;
use env_logger::Env;
use finescope::config::AppConfig;
use finescope::gui::FinesApp;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = AppConfig::load().context("Failed to load settings")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = Some(PathBuf::from(path));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Fines Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "Fines Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(FinesApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the window: {}", e))
}
