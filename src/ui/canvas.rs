// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop canvas.
//!
//! Shows the whole selected image fitted to the available space, darkens
//! everything outside the crop and draws the crop frame with its handles.

use super::{cursor_icon, draw_handles, from_egui_rect, to_egui_rect, to_point, CanvasInput};
use crate::editor::EditorContext;
use crate::models::rect::Rect;
use crate::util::geometry::DisplayTransform;

const SHADE: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 115);
const ACCENT: egui::Color32 = egui::Color32::from_rgb(255, 122, 89);

/// Draw the crop canvas and report pointer input over it.
pub fn show(
    ui: &mut egui::Ui,
    editor: &EditorContext,
    texture: Option<&egui::TextureHandle>,
) -> CanvasInput {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let canvas = response.rect;
    painter.rect_filled(canvas, 0.0, egui::Color32::from_gray(40));

    let (Some(item), Some(texture)) = (editor.selected(), texture) else {
        painter.text(
            canvas.center(),
            egui::Align2::CENTER_CENTER,
            "Import images to begin (File → Import Images...)",
            egui::FontId::proportional(16.0),
            egui::Color32::from_gray(180),
        );
        return CanvasInput::default();
    };

    let view = DisplayTransform::fit(item.natural_size(), from_egui_rect(canvas));
    let image_rect = to_egui_rect(&view.rect_to_canvas(&Rect::full(item.natural_size())));
    painter.image(
        texture.id(),
        image_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );

    let crop = view.rect_to_canvas(&item.crop);
    let c = to_egui_rect(&crop);
    // Darken outside the crop without hiding the image.
    painter.rect_filled(egui::Rect::from_min_max(canvas.min, egui::pos2(canvas.max.x, c.min.y)), 0.0, SHADE);
    painter.rect_filled(egui::Rect::from_min_max(egui::pos2(canvas.min.x, c.max.y), canvas.max), 0.0, SHADE);
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(canvas.min.x, c.min.y), egui::pos2(c.min.x, c.max.y)),
        0.0,
        SHADE,
    );
    painter.rect_filled(
        egui::Rect::from_min_max(egui::pos2(c.max.x, c.min.y), egui::pos2(canvas.max.x, c.max.y)),
        0.0,
        SHADE,
    );
    painter.rect_stroke(c, 0.0, egui::Stroke::new(2.0, egui::Color32::from_white_alpha(204)));
    draw_handles(&painter, &crop, 10.0, ACCENT);

    if let Some(pos) = response.hover_pos() {
        ui.ctx().set_cursor_icon(cursor_icon(editor.cursor_at(to_point(pos), &view)));
    }

    CanvasInput::read(ui, &response, view)
}
