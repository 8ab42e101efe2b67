// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! clickmock - Clickable Mockup Editor
//!
//! A desktop application for turning a set of screenshots into a clickable
//! prototype: crop each image, draw hotspots that link to other images and
//! export the result as a single self-contained HTML page.

mod app;
mod config;
mod editor;
mod export;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::ClickmockApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("clickmock - Clickable Mockup Editor"),
        ..Default::default()
    };

    eframe::run_native(
        "clickmock",
        options,
        Box::new(|_cc| Ok(Box::new(ClickmockApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
