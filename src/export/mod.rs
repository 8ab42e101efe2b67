// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Export transform.
//!
//! Turns each item's crop and hotspots into what the static viewer needs:
//! a draw instruction stretching the crop over the export frame, and the
//! hotspots as percentages of that frame. Nothing here touches pixels.

use crate::models::item::{ImageItem, ItemId};
use crate::models::project::Project;
use crate::models::rect::{Rect, Size};
use serde::Serialize;
use std::collections::HashMap;

/// Draw `source` (image pixels) into `dest` (export pixels) over `background`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstruction {
    pub source: Rect,
    pub dest: Rect,
    pub background: [u8; 3],
}

/// A hotspot in percent of the export frame, linking by list index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedHotspot {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub target_idx: usize,
}

/// One item ready for the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedItem {
    pub id: ItemId,
    pub name: String,
    pub render: RenderInstruction,
    pub hotspots: Vec<ExportedHotspot>,
}

/// Transform one item. `index_of` maps live item ids to their export index;
/// hotspots whose target is missing from it are dropped.
pub fn export_item(
    item: &ImageItem,
    editing: Size,
    export: Size,
    background: [u8; 3],
    index_of: &HashMap<ItemId, usize>,
) -> ExportedItem {
    let scale_x = export.w / editing.w;
    let scale_y = export.h / editing.h;

    let hotspots = item
        .hotspots
        .iter()
        .filter_map(|hotspot| {
            let Some(&target_idx) = hotspot.target_id.and_then(|id| index_of.get(&id)) else {
                log::warn!("Dropping hotspot {:?} on '{}': target is gone", hotspot.id, item.name);
                return None;
            };
            let r = &hotspot.rect;
            Some(ExportedHotspot {
                x: r.x * scale_x / export.w * 100.0,
                y: r.y * scale_y / export.h * 100.0,
                w: r.w * scale_x / export.w * 100.0,
                h: r.h * scale_y / export.h * 100.0,
                target_idx,
            })
        })
        .collect();

    ExportedItem {
        id: item.id,
        name: item.name.clone(),
        render: RenderInstruction {
            source: item.crop,
            dest: Rect::full(export),
            background,
        },
        hotspots,
    }
}

/// Transform every item of the project, in list order.
pub fn export_project(project: &Project, export: Size) -> Vec<ExportedItem> {
    let index_of: HashMap<ItemId, usize> = project
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| (item.id, index))
        .collect();
    let editing = project.output.size();
    let background = project.output.background_rgb();

    project
        .items
        .iter()
        .map(|item| export_item(item, editing, export, background, &index_of))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::{test_item, Hotspot};
    use crate::models::project::OutputConfig;

    const EPS: f64 = 1e-9;

    fn project_with_link() -> (Project, ItemId, ItemId) {
        let mut project = Project::new(OutputConfig {
            w: 1000,
            h: 500,
            bg: "#102030".to_string(),
        });
        let mut a = test_item("a.png", 800, 600);
        let b = test_item("b.png", 640, 480);
        a.crop = Rect::new(10.0, 20.0, 300.0, 200.0);
        a.hotspots.push(Hotspot::new(Rect::new(250.0, 100.0, 100.0, 50.0), Some(b.id)));
        let (a_id, b_id) = (a.id, b.id);
        project.extend([a, b]);
        (project, a_id, b_id)
    }

    #[test]
    fn test_percentages_independent_of_export_resolution() {
        let (project, _, _) = project_with_link();
        for export in [Size::new(1920.0, 1080.0), Size::new(640.0, 480.0), Size::new(3000.0, 17.0)] {
            let items = export_project(&project, export);
            let h = &items[0].hotspots[0];
            assert!((h.x - 25.0).abs() < EPS);
            assert!((h.y - 20.0).abs() < EPS);
            assert!((h.w - 10.0).abs() < EPS);
            assert!((h.h - 10.0).abs() < EPS);
            assert_eq!(h.target_idx, 1);
        }
    }

    #[test]
    fn test_render_instruction_stretches_crop() {
        let (project, _, _) = project_with_link();
        let items = export_project(&project, Size::new(1920.0, 1080.0));
        let render = &items[0].render;
        assert_eq!(render.source, Rect::new(10.0, 20.0, 300.0, 200.0));
        assert_eq!(render.dest, Rect::new(0.0, 0.0, 1920.0, 1080.0));
        assert_eq!(render.background, [0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_dangling_hotspot_is_dropped() {
        let (mut project, a, b) = project_with_link();
        project.remove(b);
        assert_eq!(project.resolve(a).unwrap().hotspots.len(), 1);
        let items = export_project(&project, Size::new(1920.0, 1080.0));
        assert_eq!(items.len(), 1);
        assert!(items[0].hotspots.is_empty());
    }

    #[test]
    fn test_untargeted_hotspot_is_dropped() {
        let (mut project, a, _) = project_with_link();
        project.resolve_mut(a).unwrap().hotspots[0].target_id = None;
        let items = export_project(&project, Size::new(1920.0, 1080.0));
        assert!(items[0].hotspots.is_empty());
    }
}
