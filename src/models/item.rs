// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image items and hotspot data structures.
//!
//! An image item owns its crop rectangle (in the image's native pixels) and
//! an ordered list of hotspots (in output pixels). Hotspots refer to their
//! target item by id only; the reference is resolved against the live
//! collection whenever it is followed.

use super::rect::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of an image item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of a hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotspotId(pub Uuid);

impl HotspotId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HotspotId {
    fn default() -> Self {
        Self::new()
    }
}

/// Decoded pixels plus the bytes they were decoded from.
///
/// Cloning is cheap; both buffers are shared.
#[derive(Clone)]
pub struct Raster {
    pub pixels: Arc<image::RgbaImage>,
    /// Original file contents, re-embedded when the project is saved.
    pub encoded: Arc<Vec<u8>>,
    /// MIME type of `encoded`.
    pub mime: String,
}

impl Raster {
    pub fn new(pixels: image::RgbaImage, encoded: Vec<u8>, mime: impl Into<String>) -> Self {
        Self {
            pixels: Arc::new(pixels),
            encoded: Arc::new(encoded),
            mime: mime.into(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("mime", &self.mime)
            .finish()
    }
}

/// A clickable region over the output frame linking to another item.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub id: HotspotId,
    pub rect: Rect,
    /// Item this hotspot navigates to. May dangle after the target is removed.
    pub target_id: Option<ItemId>,
}

impl Hotspot {
    pub fn new(rect: Rect, target_id: Option<ItemId>) -> Self {
        Self {
            id: HotspotId::new(),
            rect,
            target_id,
        }
    }
}

/// One imported image with its crop and hotspots.
#[derive(Debug, Clone)]
pub struct ImageItem {
    pub id: ItemId,
    pub name: String,
    pub raster: Raster,
    /// Crop in native image pixels.
    pub crop: Rect,
    /// Hotspots in output pixels. List order is z-order, last on top.
    pub hotspots: Vec<Hotspot>,
}

impl ImageItem {
    /// Create an item with a full-image crop and no hotspots.
    pub fn new(name: impl Into<String>, raster: Raster) -> Self {
        let size = Size::new(raster.width() as f64, raster.height() as f64);
        Self {
            id: ItemId::new(),
            name: name.into(),
            raster,
            crop: Rect::full(size),
            hotspots: Vec::new(),
        }
    }

    /// Native pixel dimensions.
    pub fn natural_size(&self) -> Size {
        Size::new(self.raster.width() as f64, self.raster.height() as f64)
    }

    pub fn hotspot(&self, id: HotspotId) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.id == id)
    }

    pub fn hotspot_mut(&mut self, id: HotspotId) -> Option<&mut Hotspot> {
        self.hotspots.iter_mut().find(|h| h.id == id)
    }
}

#[cfg(test)]
pub(crate) fn test_item(name: &str, width: u32, height: u32) -> ImageItem {
    ImageItem::new(name, Raster::new(image::RgbaImage::new(width, height), Vec::new(), "image/png"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_full_crop() {
        let item = test_item("a.png", 800, 600);
        assert_eq!(item.crop, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert!(item.hotspots.is_empty());
    }
}
