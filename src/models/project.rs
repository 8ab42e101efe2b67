// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project state management.
//!
//! The project is the ordered collection of image items plus the shared
//! output configuration. Items are owned here and nowhere else; every other
//! reference to an item goes through its [`ItemId`].

use super::item::{ImageItem, ItemId};
use super::rect::Size;
use crate::config;
use serde::{Deserialize, Serialize};

/// Shared output frame: editing resolution and letterbox colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_width")]
    pub w: u32,
    #[serde(default = "default_height")]
    pub h: u32,
    /// Background fill as `#rrggbb`.
    #[serde(default = "default_background")]
    pub bg: String,
}

fn default_width() -> u32 {
    config::DEFAULT_OUTPUT_WIDTH
}

fn default_height() -> u32 {
    config::DEFAULT_OUTPUT_HEIGHT
}

fn default_background() -> String {
    config::DEFAULT_BACKGROUND.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            w: default_width(),
            h: default_height(),
            bg: default_background(),
        }
    }
}

impl OutputConfig {
    pub fn size(&self) -> Size {
        Size::new(self.w as f64, self.h as f64)
    }

    /// Background as RGB, falling back to the default colour if unparsable.
    pub fn background_rgb(&self) -> [u8; 3] {
        parse_hex_color(&self.bg)
            .or_else(|| parse_hex_color(config::DEFAULT_BACKGROUND))
            .unwrap_or([0, 0, 0])
    }

    pub fn set_background_rgb(&mut self, rgb: [u8; 3]) {
        self.bg = format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2]);
    }
}

/// Parse `#rrggbb` (or `#rgb`).
pub fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.trim().strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// The item collection and output configuration.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub output: OutputConfig,
    pub items: Vec<ImageItem>,
}

impl Project {
    pub fn new(output: OutputConfig) -> Self {
        Self {
            output,
            items: Vec::new(),
        }
    }

    /// Look up a live item. A miss means the reference is dangling.
    pub fn resolve(&self, id: ItemId) -> Option<&ImageItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn resolve_mut(&mut self, id: ItemId) -> Option<&mut ImageItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Append items in the order given.
    pub fn extend(&mut self, items: impl IntoIterator<Item = ImageItem>) {
        self.items.extend(items);
    }

    /// Remove an item, returning it. Hotspots pointing at it are left dangling.
    pub fn remove(&mut self, id: ItemId) -> Option<ImageItem> {
        let index = self.index_of(id)?;
        Some(self.items.remove(index))
    }

    /// Move the item at `from` so it lands just before the item currently at
    /// `before`. `before == len` moves it to the end. Returns whether the
    /// order changed.
    pub fn move_item(&mut self, from: usize, before: usize) -> bool {
        let len = self.items.len();
        if from >= len || before > len || before == from || before == from + 1 {
            return false;
        }
        let item = self.items.remove(from);
        let to = if before > from { before - 1 } else { before };
        self.items.insert(to, item);
        true
    }

    /// Default link target for a hotspot drawn on `owner`: the first other
    /// item, or `owner` itself when it is the only one.
    pub fn default_target(&self, owner: ItemId) -> ItemId {
        self.items
            .iter()
            .find(|item| item.id != owner)
            .map_or(owner, |item| item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::test_item;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#0b0f1a"), Some([0x0b, 0x0f, 0x1a]));
        assert_eq!(parse_hex_color("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_color("0b0f1a"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_background_roundtrip() {
        let mut output = OutputConfig::default();
        output.set_background_rgb([1, 2, 255]);
        assert_eq!(output.bg, "#0102ff");
        assert_eq!(output.background_rgb(), [1, 2, 255]);
    }

    #[test]
    fn test_output_config_defaults_for_missing_fields() {
        let output: OutputConfig = serde_json::from_str(r##"{"bg":"#123456"}"##).unwrap();
        assert_eq!(output.w, 1920);
        assert_eq!(output.h, 1080);
        assert_eq!(output.bg, "#123456");
    }

    #[test]
    fn test_default_target_prefers_other_item() {
        let mut project = Project::default();
        let a = test_item("a.png", 10, 10);
        let a_id = a.id;
        project.extend([a]);
        assert_eq!(project.default_target(a_id), a_id);

        let b = test_item("b.png", 10, 10);
        let b_id = b.id;
        project.extend([b]);
        assert_eq!(project.default_target(a_id), b_id);
        assert_eq!(project.default_target(b_id), a_id);
    }

    #[test]
    fn test_remove_makes_reference_dangle() {
        let mut project = Project::default();
        let a = test_item("a.png", 10, 10);
        let a_id = a.id;
        project.extend([a]);
        assert!(project.remove(a_id).is_some());
        assert!(project.resolve(a_id).is_none());
        assert!(project.remove(a_id).is_none());
    }

    fn names(project: &Project) -> Vec<&str> {
        project.items.iter().map(|item| item.name.as_str()).collect()
    }

    fn abcd() -> Project {
        let mut project = Project::default();
        project.extend(["a", "b", "c", "d"].map(|name| test_item(name, 10, 10)));
        project
    }

    #[test]
    fn test_move_item_before_and_after() {
        let mut project = abcd();
        // Forward moves account for the removed slot.
        assert!(project.move_item(0, 3));
        assert_eq!(names(&project), ["b", "c", "a", "d"]);

        let mut project = abcd();
        assert!(project.move_item(3, 1));
        assert_eq!(names(&project), ["a", "d", "b", "c"]);

        let mut project = abcd();
        assert!(project.move_item(1, 4));
        assert_eq!(names(&project), ["a", "c", "d", "b"]);
    }

    #[test]
    fn test_move_item_noops() {
        let mut project = abcd();
        assert!(!project.move_item(1, 1));
        assert!(!project.move_item(1, 2));
        assert!(!project.move_item(4, 0));
        assert!(!project.move_item(0, 5));
        assert_eq!(names(&project), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_reorder_changes_default_target() {
        let mut project = abcd();
        let a_id = project.items[0].id;
        let c_id = project.items[2].id;
        assert!(project.move_item(2, 0));
        assert_eq!(project.default_target(a_id), c_id);
    }
}
