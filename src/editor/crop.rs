// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Crop rectangle editing.
//!
//! Pointer positions arrive in canvas pixels. Hit-testing happens in canvas
//! space so the handle grab zones keep a constant on-screen size; the drag
//! delta is converted to image pixels with the current display transform
//! before it is applied to the snapshot taken at pointer-down.

use super::mode::CursorHint;
use crate::config::{CROP_HANDLE_TOLERANCE, CROP_MIN_SIZE};
use crate::models::item::{ImageItem, ItemId};
use crate::models::rect::{Point, Rect};
use crate::util::geometry::{self, DisplayTransform, Handle};

/// What a crop drag does to the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropDrag {
    Move,
    Resize(Handle),
}

/// An in-progress crop drag.
#[derive(Debug, Clone, PartialEq)]
pub struct CropGesture {
    pub item: ItemId,
    pub drag: CropDrag,
    /// Pointer-down position, canvas pixels.
    pub start: Point,
    /// Crop before the drag began.
    pub start_rect: Rect,
}

/// Start a drag if `pos` lands on a handle or inside the crop.
pub fn begin(item: &ImageItem, pos: Point, view: &DisplayTransform) -> Option<CropGesture> {
    let on_screen = view.rect_to_canvas(&item.crop);
    let drag = if let Some(handle) = geometry::hit_test_handle(pos, &on_screen, CROP_HANDLE_TOLERANCE) {
        log::debug!("Crop resize from {} handle on {}", handle.name(), item.name);
        CropDrag::Resize(handle)
    } else if geometry::hit_test_rect(pos, &on_screen) {
        CropDrag::Move
    } else {
        return None;
    };
    Some(CropGesture {
        item: item.id,
        drag,
        start: pos,
        start_rect: item.crop,
    })
}

/// Recompute the crop from the gesture snapshot and the pointer at `pos`.
pub fn update(gesture: &CropGesture, item: &mut ImageItem, pos: Point, view: &DisplayTransform) {
    let from = view.to_image_space(gesture.start);
    let to = view.to_image_space(pos);
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let bounds = item.natural_size();
    let start = &gesture.start_rect;

    item.crop = match gesture.drag {
        CropDrag::Move => geometry::clamp(start.translated(dx, dy), bounds, CROP_MIN_SIZE),
        CropDrag::Resize(handle) => {
            geometry::resize_from_handle(start, handle, dx, dy, bounds, CROP_MIN_SIZE)
        }
    };
}

/// Set the crop back to the whole image.
pub fn reset(item: &mut ImageItem) {
    item.crop = Rect::full(item.natural_size());
}

/// Copy the crop of `items[source]`, as fractions of its size, onto every item.
pub fn apply_to_all(items: &mut [ImageItem], source: usize) {
    let Some(from) = items.get(source) else {
        return;
    };
    let size = from.natural_size();
    if size.w <= 0.0 || size.h <= 0.0 {
        return;
    }
    let c = from.crop;
    let fractions = Rect::new(c.x / size.w, c.y / size.h, c.w / size.w, c.h / size.h);

    for item in items.iter_mut() {
        let target = item.natural_size();
        let scaled = Rect::new(
            fractions.x * target.w,
            fractions.y * target.h,
            fractions.w * target.w,
            fractions.h * target.h,
        );
        item.crop = geometry::clamp(scaled, target, CROP_MIN_SIZE);
    }
}

/// Cursor affordance for `pos` while idle.
pub fn cursor_at(item: &ImageItem, pos: Point, view: &DisplayTransform) -> CursorHint {
    let on_screen = view.rect_to_canvas(&item.crop);
    if let Some(handle) = geometry::hit_test_handle(pos, &on_screen, CROP_HANDLE_TOLERANCE) {
        CursorHint::for_handle(handle)
    } else if geometry::hit_test_rect(pos, &on_screen) {
        CursorHint::Move
    } else {
        CursorHint::Default
    }
}
