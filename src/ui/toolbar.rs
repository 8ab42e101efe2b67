// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and mode selection UI.
//!
//! Mode switch, the crop actions, the draw-hotspot toggle and the
//! background colour of the output frame.

use crate::editor::mode::Mode;
use crate::editor::EditorContext;

/// Display the toolbar and apply its buttons to the editor.
pub fn show(ui: &mut egui::Ui, editor: &mut EditorContext) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Mode:");

        if ui.selectable_label(editor.mode() == Mode::Crop, "✂ Crop").clicked() {
            editor.set_mode(Mode::Crop);
        }
        if ui.selectable_label(editor.mode() == Mode::Hotspot, "⬚ Hotspots").clicked() {
            editor.set_mode(Mode::Hotspot);
        }

        ui.separator();

        let has_selection = editor.selected().is_some();
        match editor.mode() {
            Mode::Crop => {
                if ui.add_enabled(has_selection, egui::Button::new("Reset crop")).clicked() {
                    editor.reset_crop();
                }
                if ui.add_enabled(has_selection, egui::Button::new("Apply crop to all")).clicked() {
                    editor.apply_crop_to_all();
                }
            }
            Mode::Hotspot => {
                if ui.selectable_label(editor.is_draw_armed(), "＋ Draw hotspot").clicked() {
                    editor.toggle_draw();
                }
            }
        }

        ui.separator();

        ui.label("Background:");
        let mut rgb = editor.project.output.background_rgb();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            editor.project.output.set_background_rgb(rgb);
        }

        ui.separator();

        let hint = match (editor.mode(), editor.is_draw_armed()) {
            (Mode::Crop, _) => "Drag the frame to move the crop, drag a corner to resize",
            (Mode::Hotspot, true) => "Drag on the preview to add a hotspot",
            (Mode::Hotspot, false) => "Click a hotspot to follow its link, drag to move or resize",
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });
}
