// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot properties panel.
//!
//! Lists the selected image's hotspots with their link targets. Targets
//! that no longer exist are shown as missing rather than hidden.

use crate::editor::EditorContext;
use crate::models::item::{HotspotId, ItemId};

/// Result of interacting with the properties panel.
pub enum PropertiesAction {
    None,
    SetTarget(HotspotId, ItemId),
    Delete(HotspotId),
    Follow(HotspotId),
}

/// Display the hotspot list for the selected image.
pub fn show(ui: &mut egui::Ui, editor: &EditorContext) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Hotspots");
    ui.separator();

    let Some(item) = editor.selected() else {
        ui.label(egui::RichText::new("No image selected").weak());
        return action;
    };
    ui.label(egui::RichText::new(&item.name).strong());

    if item.hotspots.is_empty() {
        ui.label(egui::RichText::new("No hotspots yet").weak());
        return action;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for (idx, hotspot) in item.hotspots.iter().enumerate() {
            ui.horizontal(|ui| {
                if ui.button(format!("#{}", idx + 1)).on_hover_text("Go to target").clicked() {
                    action = PropertiesAction::Follow(hotspot.id);
                }

                let current = hotspot
                    .target_id
                    .and_then(|id| editor.project.resolve(id))
                    .map_or("(missing)", |target| target.name.as_str());
                egui::ComboBox::from_id_source(hotspot.id.0)
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for target in &editor.project.items {
                            let is_current = hotspot.target_id == Some(target.id);
                            if ui.selectable_label(is_current, &target.name).clicked() {
                                action = PropertiesAction::SetTarget(hotspot.id, target.id);
                            }
                        }
                    });

                if ui.small_button("✕").on_hover_text("Delete hotspot").clicked() {
                    action = PropertiesAction::Delete(hotspot.id);
                }
            });
        }
    });

    action
}
