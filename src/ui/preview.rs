// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview canvas for hotspot editing.
//!
//! Draws the selected item's crop stretched over the output frame, fitted
//! to the available space, with its hotspots on top. The display transform
//! maps output pixels to the screen, so the hotspot editor sees output
//! coordinates.

use super::{cursor_icon, draw_handles, from_egui_rect, to_egui_rect, to_point, CanvasInput};
use crate::editor::EditorContext;
use crate::models::rect::Rect;
use crate::util::geometry::DisplayTransform;

const HOTSPOT_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(51, 24, 18, 51);
const HOTSPOT_STROKE: egui::Color32 = egui::Color32::from_rgb(255, 122, 89);
const PENDING_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(11, 53, 48, 64);
const PENDING_STROKE: egui::Color32 = egui::Color32::from_rgb(45, 212, 191);

/// Draw the preview and report pointer input over it.
pub fn show(
    ui: &mut egui::Ui,
    editor: &EditorContext,
    texture: Option<&egui::TextureHandle>,
) -> CanvasInput {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
    let canvas = response.rect;
    painter.rect_filled(canvas, 0.0, egui::Color32::from_gray(40));

    let (Some(item), Some(texture)) = (editor.selected(), texture) else {
        return CanvasInput::default();
    };

    let output = editor.project.output.size();
    let view = DisplayTransform::fit(output, from_egui_rect(canvas));
    let frame = to_egui_rect(&view.rect_to_canvas(&Rect::full(output)));

    let [r, g, b] = editor.project.output.background_rgb();
    painter.rect_filled(frame, 0.0, egui::Color32::from_rgb(r, g, b));

    let size = item.natural_size();
    let c = &item.crop;
    let uv = egui::Rect::from_min_max(
        egui::pos2((c.x / size.w) as f32, (c.y / size.h) as f32),
        egui::pos2((c.right() / size.w) as f32, (c.bottom() / size.h) as f32),
    );
    painter.image(texture.id(), frame, uv, egui::Color32::WHITE);

    for (idx, hotspot) in item.hotspots.iter().enumerate() {
        let on_screen = view.rect_to_canvas(&hotspot.rect);
        let rect = to_egui_rect(&on_screen);
        painter.rect_filled(rect, 0.0, HOTSPOT_FILL);
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, HOTSPOT_STROKE));
        painter.text(
            rect.min + egui::vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!("{}", idx + 1),
            egui::FontId::monospace(12.0),
            HOTSPOT_STROKE,
        );
        draw_handles(&painter, &on_screen, 8.0, HOTSPOT_STROKE);
    }

    if let Some(pending) = editor.pending_hotspot() {
        let rect = to_egui_rect(&view.rect_to_canvas(&pending));
        painter.rect_filled(rect, 0.0, PENDING_FILL);
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(2.0, PENDING_STROKE));
    }

    if let Some(pos) = response.hover_pos() {
        ui.ctx().set_cursor_icon(cursor_icon(editor.cursor_at(to_point(pos), &view)));
    }

    CanvasInput::read(ui, &response, view)
}
