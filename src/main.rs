// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame Search
//!
//! A cross-platform desktop client for a keyframe search service: submit a
//! text query, browse the returned frames, step through them in a viewer,
//! and inspect each frame's source video metadata.

mod app;
mod config;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::FrameSearchApp;
use config::Settings;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let settings = Settings::load()?;
    let app = FrameSearchApp::new(&settings)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Frame Search"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native("Frame Search", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
