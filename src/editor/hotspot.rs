// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Hotspot editing.
//!
//! All positions here are in output pixels, the fixed resolution of the
//! preview frame. A hotspot doubles as a link and as a draggable shape: a
//! press and release with no displacement follows the link, anything else
//! edits the rectangle.

use super::mode::CursorHint;
use crate::config::{HOTSPOT_HANDLE_TOLERANCE, HOTSPOT_MIN_SIZE};
use crate::models::item::{Hotspot, HotspotId, ImageItem, ItemId};
use crate::models::rect::{Point, Rect, Size};
use crate::util::geometry::{self, Handle};

/// An in-progress hotspot gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum HotspotGesture {
    Resize {
        item: ItemId,
        hotspot: HotspotId,
        handle: Handle,
        start: Point,
        start_rect: Rect,
    },
    Move {
        item: ItemId,
        hotspot: HotspotId,
        start: Point,
        start_rect: Rect,
        /// Set once the pointer has been displaced from `start`.
        dragged: bool,
    },
    Draw {
        item: ItemId,
        anchor: Point,
        current: Rect,
    },
}

impl HotspotGesture {
    pub fn item(&self) -> ItemId {
        match self {
            HotspotGesture::Resize { item, .. }
            | HotspotGesture::Move { item, .. }
            | HotspotGesture::Draw { item, .. } => *item,
        }
    }

    /// Rectangle being drawn, if this is a draw gesture.
    pub fn pending_rect(&self) -> Option<Rect> {
        match self {
            HotspotGesture::Draw { current, .. } => Some(*current),
            _ => None,
        }
    }
}

/// How a hotspot gesture ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotOutcome {
    /// A moved or resized hotspot was left where it is.
    Edited,
    /// A pure click on a hotspot with a target.
    Navigate(ItemId),
    /// A draw gesture produced a new hotspot.
    Created(HotspotId),
    /// A draw gesture was too small and was thrown away.
    Discarded,
    /// Nothing happened.
    None,
}

/// What is under `pos`: the topmost hotspot and, if grabbed, which handle.
pub fn hit_test(item: &ImageItem, pos: Point) -> Option<(usize, Option<Handle>)> {
    item.hotspots.iter().enumerate().rev().find_map(|(index, hotspot)| {
        if let Some(handle) = geometry::hit_test_handle(pos, &hotspot.rect, HOTSPOT_HANDLE_TOLERANCE) {
            Some((index, Some(handle)))
        } else if geometry::hit_test_rect(pos, &hotspot.rect) {
            Some((index, None))
        } else {
            None
        }
    })
}

/// Start a gesture at `pos`: resize, move, or (when armed) draw.
pub fn begin(item: &ImageItem, pos: Point, draw_armed: bool) -> Option<HotspotGesture> {
    if let Some((index, handle)) = hit_test(item, pos) {
        let hotspot = &item.hotspots[index];
        return Some(match handle {
            Some(handle) => HotspotGesture::Resize {
                item: item.id,
                hotspot: hotspot.id,
                handle,
                start: pos,
                start_rect: hotspot.rect,
            },
            None => HotspotGesture::Move {
                item: item.id,
                hotspot: hotspot.id,
                start: pos,
                start_rect: hotspot.rect,
                dragged: false,
            },
        });
    }
    draw_armed.then(|| HotspotGesture::Draw {
        item: item.id,
        anchor: pos,
        current: Rect::new(pos.x, pos.y, 0.0, 0.0),
    })
}

/// Apply the pointer at `pos` to the gesture.
pub fn update(gesture: &mut HotspotGesture, item: &mut ImageItem, pos: Point, output: Size) {
    match gesture {
        HotspotGesture::Resize {
            hotspot,
            handle,
            start,
            start_rect,
            ..
        } => {
            let (dx, dy) = (pos.x - start.x, pos.y - start.y);
            if let Some(target) = item.hotspot_mut(*hotspot) {
                target.rect =
                    geometry::resize_from_handle(start_rect, *handle, dx, dy, output, HOTSPOT_MIN_SIZE);
            }
        }
        HotspotGesture::Move {
            hotspot,
            start,
            start_rect,
            dragged,
            ..
        } => {
            let (dx, dy) = (pos.x - start.x, pos.y - start.y);
            if dx != 0.0 || dy != 0.0 {
                *dragged = true;
            }
            if let Some(target) = item.hotspot_mut(*hotspot) {
                target.rect = geometry::clamp(start_rect.translated(dx, dy), output, HOTSPOT_MIN_SIZE);
            }
        }
        HotspotGesture::Draw { anchor, current, .. } => {
            *current = geometry::rect_from_corners(*anchor, pos);
        }
    }
}

/// End the gesture. New hotspots link to `default_target`.
pub fn finish(
    gesture: HotspotGesture,
    item: &mut ImageItem,
    default_target: ItemId,
    output: Size,
) -> HotspotOutcome {
    match gesture {
        HotspotGesture::Resize { .. } => HotspotOutcome::Edited,
        HotspotGesture::Move {
            hotspot, dragged, ..
        } => {
            if dragged {
                return HotspotOutcome::Edited;
            }
            match item.hotspot(hotspot).and_then(|h| h.target_id) {
                Some(target) => HotspotOutcome::Navigate(target),
                None => HotspotOutcome::None,
            }
        }
        HotspotGesture::Draw { current, .. } => {
            if current.w < HOTSPOT_MIN_SIZE || current.h < HOTSPOT_MIN_SIZE {
                return HotspotOutcome::Discarded;
            }
            let rect = geometry::clamp(current, output, HOTSPOT_MIN_SIZE);
            let hotspot = Hotspot::new(rect, Some(default_target));
            let id = hotspot.id;
            item.hotspots.push(hotspot);
            HotspotOutcome::Created(id)
        }
    }
}

/// Put the edited hotspot back where the gesture found it.
pub fn revert(gesture: &HotspotGesture, item: &mut ImageItem) {
    match gesture {
        HotspotGesture::Resize {
            hotspot, start_rect, ..
        }
        | HotspotGesture::Move {
            hotspot, start_rect, ..
        } => {
            if let Some(target) = item.hotspot_mut(*hotspot) {
                target.rect = *start_rect;
            }
        }
        HotspotGesture::Draw { .. } => {}
    }
}

/// Remove a hotspot by id. Other hotspots keep their ids.
pub fn delete(item: &mut ImageItem, id: HotspotId) -> bool {
    let before = item.hotspots.len();
    item.hotspots.retain(|h| h.id != id);
    item.hotspots.len() != before
}

/// Cursor affordance for `pos` while idle.
pub fn cursor_at(item: &ImageItem, pos: Point, draw_armed: bool) -> CursorHint {
    match hit_test(item, pos) {
        Some((_, Some(handle))) => CursorHint::for_handle(handle),
        Some((_, None)) => CursorHint::Pointer,
        None if draw_armed => CursorHint::Crosshair,
        None => CursorHint::Default,
    }
}
