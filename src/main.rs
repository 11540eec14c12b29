// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme Studio
//!
//! A desktop meme editor: pick a template or your own image, add captions,
//! drag them into place and export the result as a PNG.

mod app;
mod config;
mod interaction;
mod io;
mod models;
mod remote;
mod render;
mod ui;
mod util;

use anyhow::Result;
use app::MemeApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = config::load_app_config();
    log::info!(
        "Starting with a {}x{} canvas",
        config.canvas_width,
        config.canvas_height
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1360.0, 820.0])
            .with_min_inner_size([960.0, 640.0])
            .with_drag_and_drop(true)
            .with_title("Meme Studio"),
        ..Default::default()
    };

    eframe::run_native(
        "Meme Studio",
        options,
        Box::new(move |cc| Ok(Box::new(MemeApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
