// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the editor context, the GPU textures for
//! each image, and the background loaders; every frame it draws the panels
//! and feeds their input back into the editor.

use crate::editor::mode::Mode;
use crate::editor::EditorContext;
use crate::models::item::{ImageItem, ItemId};
use crate::models::project::Project;
use crate::models::rect::Point;
use crate::ui::{canvas, items, preview, properties, toolbar, CanvasInput};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Largest texture side uploaded for display; bigger images are downscaled.
const MAX_TEXTURE_SIDE: u32 = 4096;

/// Result of a background load.
enum Loaded {
    Images(Vec<ImageItem>),
    Project(Project),
}

/// Main application state.
pub struct ClickmockApp {
    /// Project, selection, mode and the active gesture
    editor: EditorContext,

    /// Display textures, keyed by item
    textures: HashMap<ItemId, egui::TextureHandle>,

    /// Receiver for background image/project loading
    loader: Option<Receiver<Result<Loaded, String>>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last pointer position in source space, for the status line
    hover: Option<Point>,
}

impl Default for ClickmockApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickmockApp {
    /// Create a new application instance with an empty project.
    pub fn new() -> Self {
        Self {
            editor: EditorContext::default(),
            textures: HashMap::new(),
            loader: None,
            loading_message: None,
            hover: None,
        }
    }

    /// Decode image files on a background thread.
    fn import_images(&mut self, paths: Vec<PathBuf>) {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some(format!("Loading {} images...", paths.len()));

        std::thread::spawn(move || {
            let result = crate::io::media::load_images(paths)
                .map(Loaded::Images)
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    /// Load a project file on a background thread.
    fn open_project(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some("Loading project...".to_string());

        std::thread::spawn(move || {
            let result = crate::io::serialization::load_project(&path)
                .map(Loaded::Project)
                .map_err(|e| format!("{:#}", e));
            let _ = sender.send(result);
        });
    }

    fn save_project(&self, path: PathBuf) {
        match crate::io::serialization::save_project(&self.editor.project, &path) {
            Ok(()) => log::info!("Saved project to {}", path.display()),
            Err(e) => log::error!("Failed to save project: {:#}", e),
        }
    }

    fn export_html(&self, path: PathBuf) {
        if let Err(e) = crate::io::html::export_html(&self.editor.project, &path) {
            log::error!("Failed to export HTML: {:#}", e);
        }
    }

    /// Apply a finished background load.
    fn poll_loader(&mut self) {
        let Some(ref receiver) = self.loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.loader = None;
        self.loading_message = None;

        match result {
            Ok(Loaded::Images(items)) => self.editor.import(items),
            Ok(Loaded::Project(project)) => {
                log::info!("Loaded project with {} images", project.items.len());
                self.textures.clear();
                self.editor.replace_project(project);
            }
            Err(e) => log::error!("Load failed: {}", e),
        }
    }

    /// Upload textures for new items and drop those of removed ones.
    fn sync_textures(&mut self, ctx: &egui::Context) {
        let project = &self.editor.project;
        self.textures.retain(|id, _| project.resolve(*id).is_some());

        for item in &project.items {
            if self.textures.contains_key(&item.id) {
                continue;
            }
            let pixels: &image::RgbaImage = &item.raster.pixels;
            let color_image = if pixels.width().max(pixels.height()) > MAX_TEXTURE_SIDE {
                let scale = MAX_TEXTURE_SIDE as f64 / pixels.width().max(pixels.height()) as f64;
                let w = ((pixels.width() as f64 * scale).round() as u32).max(1);
                let h = ((pixels.height() as f64 * scale).round() as u32).max(1);
                let small = image::imageops::resize(pixels, w, h, image::imageops::FilterType::Triangle);
                egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], small.as_raw())
            } else {
                let size = [pixels.width() as usize, pixels.height() as usize];
                egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
            };
            let texture = ctx.load_texture(format!("item-{}", item.id), color_image, egui::TextureOptions::LINEAR);
            self.textures.insert(item.id, texture);
        }
    }

    /// Feed one frame of canvas input to the editor.
    fn apply_pointer(&mut self, input: CanvasInput) {
        if let Some(pos) = input.pressed {
            self.editor.pointer_down(pos, &input.view);
        }
        if let Some(pos) = input.pointer {
            if self.editor.gesture().is_some() {
                self.editor.pointer_move(pos, &input.view);
            }
            self.hover = Some(input.view.to_image_space(pos));
        }
        if input.released {
            self.editor.pointer_up();
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Import Images...").clicked() {
                    if let Some(paths) = rfd::FileDialog::new()
                        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
                        .pick_files()
                    {
                        self.import_images(paths);
                    }
                    ui.close_menu();
                }
                if ui.button("Open Project...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Project", &["json", "yaml", "yml"])
                        .pick_file()
                    {
                        self.open_project(path);
                    }
                    ui.close_menu();
                }
                ui.separator();
                let has_items = !self.editor.project.items.is_empty();
                if ui.add_enabled(has_items, egui::Button::new("Save Project...")).clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Project", &["json", "yaml", "yml"])
                        .set_file_name("project.cmproj.json")
                        .save_file()
                    {
                        self.save_project(path);
                    }
                    ui.close_menu();
                }
                if ui.add_enabled(has_items, egui::Button::new("Export HTML...")).clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("HTML", &["html"])
                        .set_file_name("mock_export.html")
                        .save_file()
                    {
                        self.export_html(path);
                    }
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
        });
    }
}

impl eframe::App for ClickmockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader();
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }
        self.sync_textures(ctx);

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| self.menu_bar(ctx, ui));

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, &mut self.editor);
        });

        let items_action = egui::SidePanel::left("items")
            .default_width(220.0)
            .show(ctx, |ui| items::show(ui, &self.editor))
            .inner;
        match items_action {
            items::ItemsAction::Select(id) => self.editor.select(id),
            items::ItemsAction::Remove(id) => self.editor.remove_item(id),
            items::ItemsAction::Move(id, before) => self.editor.move_item(id, before),
            items::ItemsAction::None => {}
        }

        if self.editor.mode() == Mode::Hotspot {
            let properties_action = egui::SidePanel::right("properties")
                .default_width(260.0)
                .show(ctx, |ui| properties::show(ui, &self.editor))
                .inner;
            match properties_action {
                properties::PropertiesAction::SetTarget(hotspot, target) => {
                    self.editor.set_hotspot_target(hotspot, target)
                }
                properties::PropertiesAction::Delete(hotspot) => self.editor.delete_hotspot(hotspot),
                properties::PropertiesAction::Follow(hotspot) => self.editor.follow_hotspot(hotspot),
                properties::PropertiesAction::None => {}
            }
        }

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.editor.cancel_gesture();
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Mode: {}", self.editor.mode().label()));
                ui.separator();
                match self.editor.selected() {
                    Some(item) => {
                        ui.label(&item.name);
                        ui.separator();
                        let space = match self.editor.mode() {
                            Mode::Crop => "image",
                            Mode::Hotspot => "output",
                        };
                        match self.hover {
                            Some(p) => ui.label(format!("{} x:{:.0} y:{:.0}", space, p.x, p.y)),
                            None => ui.label(format!("{} x:- y:-", space)),
                        };
                    }
                    None => {
                        ui.label("No image selected");
                    }
                }
            });
        });

        let input = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.spinner();
                            ui.label(message.as_str());
                        });
                    });
                    return CanvasInput::default();
                }
                let texture = self.editor.selected_id().and_then(|id| self.textures.get(&id));
                match self.editor.mode() {
                    Mode::Crop => canvas::show(ui, &self.editor, texture),
                    Mode::Hotspot => preview::show(ui, &self.editor, texture),
                }
            })
            .inner;

        self.apply_pointer(input);
        if self.editor.gesture().is_some() || input.released {
            ctx.request_repaint();
        }
    }
}
