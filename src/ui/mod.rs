// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the clickmock application.

pub mod canvas;
pub mod items;
pub mod preview;
pub mod properties;
pub mod toolbar;

use crate::editor::mode::CursorHint;
use crate::models::rect::{Point, Rect};
use crate::util::geometry::DisplayTransform;

/// Pointer activity on a canvas during one frame, plus the transform the
/// canvas was drawn with.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasInput {
    pub view: DisplayTransform,
    /// Primary button went down over the canvas.
    pub pressed: Option<Point>,
    /// Latest pointer position, anywhere in the window.
    pub pointer: Option<Point>,
    /// Primary button went up, anywhere in the window.
    pub released: bool,
}

impl CanvasInput {
    /// Collect this frame's pointer state for a canvas occupying `response`.
    pub fn read(ui: &egui::Ui, response: &egui::Response, view: DisplayTransform) -> Self {
        ui.input(|i| Self {
            view,
            pressed: (i.pointer.primary_pressed() && response.hovered())
                .then(|| i.pointer.interact_pos())
                .flatten()
                .map(to_point),
            pointer: i.pointer.latest_pos().map(to_point),
            released: i.pointer.primary_released(),
        })
    }
}

pub fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x as f64, pos.y as f64)
}

pub fn to_egui_rect(rect: &Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x as f32, rect.y as f32),
        egui::vec2(rect.w as f32, rect.h as f32),
    )
}

pub fn from_egui_rect(rect: egui::Rect) -> Rect {
    Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.width() as f64,
        rect.height() as f64,
    )
}

pub fn cursor_icon(hint: CursorHint) -> egui::CursorIcon {
    match hint {
        CursorHint::Default => egui::CursorIcon::Default,
        CursorHint::Move => egui::CursorIcon::Move,
        CursorHint::Pointer => egui::CursorIcon::PointingHand,
        CursorHint::Crosshair => egui::CursorIcon::Crosshair,
        CursorHint::ResizeNwSe => egui::CursorIcon::ResizeNwSe,
        CursorHint::ResizeNeSw => egui::CursorIcon::ResizeNeSw,
    }
}

/// Small filled squares centred on each corner of `rect` (screen space).
pub fn draw_handles(painter: &egui::Painter, rect: &Rect, size: f32, color: egui::Color32) {
    for (_, p) in crate::util::geometry::handle_points(rect) {
        let centre = egui::pos2(p.x as f32, p.y as f32);
        painter.rect_filled(egui::Rect::from_center_size(centre, egui::vec2(size, size)), 0.0, color);
    }
}
