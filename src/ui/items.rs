// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image list panel.

use crate::editor::EditorContext;
use crate::models::item::ItemId;

/// Result of interacting with the image list.
pub enum ItemsAction {
    None,
    Select(ItemId),
    Remove(ItemId),
    /// Move the item so it lands before the item now at the given index.
    Move(ItemId, usize),
}

/// Display the image list.
pub fn show(ui: &mut egui::Ui, editor: &EditorContext) -> ItemsAction {
    let mut action = ItemsAction::None;

    ui.heading("Images");
    ui.label(format!("{} items", editor.project.items.len()));
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        let count = editor.project.items.len();
        for (idx, item) in editor.project.items.iter().enumerate() {
            ui.horizontal(|ui| {
                if ui.small_button("✕").on_hover_text("Remove image").clicked() {
                    action = ItemsAction::Remove(item.id);
                }
                if ui.add_enabled(idx > 0, egui::Button::new("⏶").small()).on_hover_text("Move up").clicked() {
                    action = ItemsAction::Move(item.id, idx - 1);
                }
                if ui
                    .add_enabled(idx + 1 < count, egui::Button::new("⏷").small())
                    .on_hover_text("Move down")
                    .clicked()
                {
                    action = ItemsAction::Move(item.id, idx + 2);
                }
                let selected = editor.selected_id() == Some(item.id);
                if ui.selectable_label(selected, &item.name).clicked() {
                    action = ItemsAction::Select(item.id);
                }
            });
        }
    });

    action
}
