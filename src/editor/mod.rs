// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor state and pointer dispatch.
//!
//! [`EditorContext`] owns the project, the current selection, the
//! interaction mode and the single active-gesture slot. The UI feeds it
//! pointer events together with the display transform of whichever canvas
//! is showing; the context routes them to the crop or hotspot editor based
//! on the mode.

pub mod crop;
pub mod hotspot;
pub mod mode;

use crate::models::item::{HotspotId, ImageItem, ItemId};
use crate::models::project::Project;
use crate::models::rect::{Point, Rect};
use crate::util::geometry::DisplayTransform;
use crop::CropGesture;
use hotspot::{HotspotGesture, HotspotOutcome};
use mode::{CursorHint, Mode};

/// The one gesture that may be in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Crop(CropGesture),
    Hotspot(HotspotGesture),
}

impl Gesture {
    /// Item the gesture is editing.
    pub fn item(&self) -> ItemId {
        match self {
            Gesture::Crop(g) => g.item,
            Gesture::Hotspot(g) => g.item(),
        }
    }
}

/// All mutable editor state.
#[derive(Debug, Default)]
pub struct EditorContext {
    pub project: Project,
    selected: Option<ItemId>,
    mode: Mode,
    gesture: Option<Gesture>,
    draw_armed: bool,
}

impl EditorContext {
    pub fn new(project: Project) -> Self {
        let selected = project.items.first().map(|item| item.id);
        Self {
            project,
            selected,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ImageItem> {
        self.project.resolve(self.selected?)
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_draw_armed(&self) -> bool {
        self.draw_armed
    }

    /// Switch mode. Refused while a gesture is in progress.
    pub fn set_mode(&mut self, mode: Mode) -> bool {
        if self.gesture.is_some() {
            log::debug!("Ignoring switch to {:?} mode during a gesture", mode);
            return false;
        }
        if self.mode != mode {
            self.mode = mode;
            log::info!("Switched to {} mode", mode.label());
        }
        true
    }

    /// Flip the draw-hotspot toggle; arming it also enters hotspot mode.
    pub fn toggle_draw(&mut self) {
        if self.gesture.is_some() {
            return;
        }
        self.draw_armed = !self.draw_armed;
        if self.draw_armed {
            self.set_mode(Mode::Hotspot);
        }
    }

    /// Select an item. Unknown ids are ignored; a pending gesture is aborted.
    pub fn select(&mut self, id: ItemId) {
        if self.project.resolve(id).is_none() {
            return;
        }
        if self.gesture.is_some() {
            self.cancel_gesture();
        }
        self.selected = Some(id);
    }

    /// Add freshly loaded items. The first one is selected if nothing is.
    pub fn import(&mut self, items: Vec<ImageItem>) {
        let first = items.first().map(|item| item.id);
        let count = items.len();
        self.project.extend(items);
        if self.selected.is_none() {
            self.selected = first;
        }
        log::info!("Imported {} images, total: {}", count, self.project.items.len());
    }

    /// Replace the whole project, e.g. after loading from disk.
    pub fn replace_project(&mut self, project: Project) {
        *self = Self {
            mode: self.mode,
            draw_armed: self.draw_armed,
            ..Self::new(project)
        };
    }

    /// Remove an item. Hotspots linking to it are left dangling.
    pub fn remove_item(&mut self, id: ItemId) {
        if self.gesture.as_ref().is_some_and(|g| g.item() == id) {
            log::debug!("Aborting gesture on removed item {}", id);
            self.gesture = None;
        }
        if self.project.remove(id).is_none() {
            return;
        }
        if self.selected == Some(id) {
            self.selected = self.project.items.first().map(|item| item.id);
        }
        log::info!("Removed image, total: {}", self.project.items.len());
    }

    /// Reorder an item so it lands just before the item now at `before`.
    /// A gesture on the moved item is cancelled first.
    pub fn move_item(&mut self, id: ItemId, before: usize) {
        let Some(from) = self.project.index_of(id) else {
            return;
        };
        if self.gesture.as_ref().is_some_and(|g| g.item() == id) {
            self.cancel_gesture();
        }
        if self.project.move_item(from, before) {
            log::debug!("Moved item {} from position {}", id, from);
        }
    }

    pub fn reset_crop(&mut self) {
        if let Some(item) = self.selected_mut() {
            crop::reset(item);
        }
    }

    /// Apply the selected item's relative crop to every item.
    pub fn apply_crop_to_all(&mut self) {
        let Some(index) = self.selected.and_then(|id| self.project.index_of(id)) else {
            return;
        };
        crop::apply_to_all(&mut self.project.items, index);
        log::info!("Applied crop to {} images", self.project.items.len());
    }

    /// Relink a hotspot. Targets that do not resolve are refused.
    pub fn set_hotspot_target(&mut self, id: HotspotId, target: ItemId) {
        if self.project.resolve(target).is_none() {
            log::debug!("Ignoring link to missing item {}", target);
            return;
        }
        if let Some(h) = self.selected_mut().and_then(|item| item.hotspot_mut(id)) {
            h.target_id = Some(target);
        }
    }

    pub fn delete_hotspot(&mut self, id: HotspotId) {
        let deleted = self.selected_mut().is_some_and(|item| hotspot::delete(item, id));
        if deleted {
            log::info!("Deleted hotspot");
        }
    }

    /// Follow a hotspot's link. Dangling or missing targets do nothing.
    pub fn follow_hotspot(&mut self, id: HotspotId) {
        let target = self
            .selected()
            .and_then(|item| item.hotspot(id))
            .and_then(|h| h.target_id);
        if let Some(target) = target {
            self.navigate(target);
        }
    }

    /// Pointer pressed at `pos` on the active canvas.
    ///
    /// `view` maps the shown source space (image pixels in crop mode, output
    /// pixels in hotspot mode) onto the canvas.
    pub fn pointer_down(&mut self, pos: Point, view: &DisplayTransform) {
        if self.gesture.is_some() {
            return;
        }
        let mode = self.mode;
        let draw_armed = self.draw_armed;
        let Some(item) = self.selected() else {
            return;
        };
        self.gesture = match mode {
            Mode::Crop => crop::begin(item, pos, view).map(Gesture::Crop),
            Mode::Hotspot => {
                hotspot::begin(item, view.to_image_space(pos), draw_armed).map(Gesture::Hotspot)
            }
        };
        match &self.gesture {
            Some(gesture) => log::debug!("Gesture started: {:?}", gesture),
            None => log::debug!("Pointer-down ignored at ({:.0}, {:.0})", pos.x, pos.y),
        }
    }

    /// Pointer moved to `pos` with a gesture possibly in progress.
    pub fn pointer_move(&mut self, pos: Point, view: &DisplayTransform) {
        let Some(mut gesture) = self.gesture.take() else {
            return;
        };
        let output = self.project.output.size();
        let Some(item) = self.project.resolve_mut(gesture.item()) else {
            log::debug!("Gesture target vanished, aborting");
            return;
        };
        match &mut gesture {
            Gesture::Crop(g) => crop::update(g, item, pos, view),
            Gesture::Hotspot(g) => hotspot::update(g, item, view.to_image_space(pos), output),
        }
        self.gesture = Some(gesture);
    }

    /// Pointer released anywhere. Always clears the gesture slot.
    pub fn pointer_up(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let Gesture::Hotspot(gesture) = gesture else {
            log::debug!("Crop gesture finished");
            return;
        };
        let owner = gesture.item();
        let output = self.project.output.size();
        let default_target = self.project.default_target(owner);
        let Some(item) = self.project.resolve_mut(owner) else {
            return;
        };
        match hotspot::finish(gesture, item, default_target, output) {
            HotspotOutcome::Navigate(target) => self.navigate(target),
            HotspotOutcome::Created(_) => {
                log::info!("Added hotspot, total: {}", item.hotspots.len());
            }
            HotspotOutcome::Discarded => log::debug!("Discarded hotspot smaller than minimum size"),
            HotspotOutcome::Edited | HotspotOutcome::None => {}
        }
    }

    /// Abort the active gesture, restoring any rectangle it was editing.
    pub fn cancel_gesture(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };
        let Some(item) = self.project.resolve_mut(gesture.item()) else {
            return;
        };
        match &gesture {
            Gesture::Crop(g) => item.crop = g.start_rect,
            Gesture::Hotspot(g) => hotspot::revert(g, item),
        }
        log::debug!("Gesture cancelled");
    }

    /// Hotspot being drawn, in output pixels, for the render pass.
    pub fn pending_hotspot(&self) -> Option<Rect> {
        match &self.gesture {
            Some(Gesture::Hotspot(g)) => g.pending_rect(),
            _ => None,
        }
    }

    /// Cursor affordance at `pos` on the active canvas.
    pub fn cursor_at(&self, pos: Point, view: &DisplayTransform) -> CursorHint {
        let Some(item) = self.selected() else {
            return CursorHint::Default;
        };
        match (&self.gesture, self.mode) {
            (Some(Gesture::Crop(g)), _) => match g.drag {
                crop::CropDrag::Move => CursorHint::Move,
                crop::CropDrag::Resize(handle) => CursorHint::for_handle(handle),
            },
            (Some(Gesture::Hotspot(HotspotGesture::Resize { handle, .. })), _) => {
                CursorHint::for_handle(*handle)
            }
            (Some(Gesture::Hotspot(HotspotGesture::Move { .. })), _) => CursorHint::Pointer,
            (Some(Gesture::Hotspot(HotspotGesture::Draw { .. })), _) => CursorHint::Crosshair,
            (None, Mode::Crop) => crop::cursor_at(item, pos, view),
            (None, Mode::Hotspot) => {
                hotspot::cursor_at(item, view.to_image_space(pos), self.draw_armed)
            }
        }
    }

    fn navigate(&mut self, target: ItemId) {
        if self.project.resolve(target).is_some() {
            self.selected = Some(target);
            log::info!("Navigated to {}", target);
        } else {
            log::debug!("Hotspot target {} no longer exists", target);
        }
    }

    fn selected_mut(&mut self) -> Option<&mut ImageItem> {
        let id = self.selected?;
        self.project.resolve_mut(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::item::{test_item, Hotspot};

    fn two_items() -> (EditorContext, ItemId, ItemId) {
        let a = test_item("a.png", 800, 600);
        let b = test_item("b.png", 640, 480);
        let (a_id, b_id) = (a.id, b.id);
        let mut ctx = EditorContext::default();
        ctx.import(vec![a, b]);
        (ctx, a_id, b_id)
    }

    fn identity() -> DisplayTransform {
        DisplayTransform::default()
    }

    #[test]
    fn test_initial_state() {
        let (ctx, a, _) = two_items();
        assert_eq!(ctx.mode(), Mode::Crop);
        assert_eq!(ctx.selected_id(), Some(a));
        assert!(ctx.gesture().is_none());
    }

    #[test]
    fn test_crop_gesture_through_context() {
        let (mut ctx, a, _) = two_items();
        ctx.pointer_down(Point::new(800.0, 600.0), &identity());
        assert!(matches!(ctx.gesture(), Some(Gesture::Crop(_))));
        ctx.pointer_move(Point::new(700.0, 500.0), &identity());
        ctx.pointer_up();
        assert!(ctx.gesture().is_none());
        assert_eq!(ctx.project.resolve(a).unwrap().crop, Rect::new(0.0, 0.0, 700.0, 500.0));
    }

    #[test]
    fn test_mode_switch_refused_mid_gesture() {
        let (mut ctx, _, _) = two_items();
        ctx.pointer_down(Point::new(400.0, 300.0), &identity());
        assert!(!ctx.set_mode(Mode::Hotspot));
        assert_eq!(ctx.mode(), Mode::Crop);
        ctx.pointer_up();
        assert!(ctx.set_mode(Mode::Hotspot));
        assert_eq!(ctx.mode(), Mode::Hotspot);
    }

    #[test]
    fn test_mode_switch_leaves_geometry_alone() {
        let (mut ctx, a, _) = two_items();
        let before = ctx.project.resolve(a).unwrap().crop;
        ctx.set_mode(Mode::Hotspot);
        ctx.set_mode(Mode::Crop);
        assert_eq!(ctx.project.resolve(a).unwrap().crop, before);
    }

    #[test]
    fn test_drawn_hotspot_links_to_other_item() {
        let (mut ctx, a, b) = two_items();
        ctx.toggle_draw();
        assert_eq!(ctx.mode(), Mode::Hotspot);
        ctx.pointer_down(Point::new(100.0, 100.0), &identity());
        ctx.pointer_move(Point::new(300.0, 200.0), &identity());
        assert_eq!(ctx.pending_hotspot(), Some(Rect::new(100.0, 100.0, 200.0, 100.0)));
        ctx.pointer_up();
        let item = ctx.project.resolve(a).unwrap();
        assert_eq!(item.hotspots.len(), 1);
        assert_eq!(item.hotspots[0].target_id, Some(b));
        assert_eq!(ctx.pending_hotspot(), None);
    }

    #[test]
    fn test_single_item_hotspot_links_to_itself() {
        let mut ctx = EditorContext::default();
        let only = test_item("only.png", 100, 100);
        let id = only.id;
        ctx.import(vec![only]);
        ctx.toggle_draw();
        ctx.pointer_down(Point::new(10.0, 10.0), &identity());
        ctx.pointer_move(Point::new(50.0, 50.0), &identity());
        ctx.pointer_up();
        assert_eq!(ctx.project.resolve(id).unwrap().hotspots[0].target_id, Some(id));
    }

    #[test]
    fn test_hotspot_click_navigates_through_preview_transform() {
        let (mut ctx, a, b) = two_items();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        ctx.project.resolve_mut(a).unwrap().hotspots.push(Hotspot::new(rect, Some(b)));
        ctx.set_mode(Mode::Hotspot);

        let view = DisplayTransform {
            scale: 0.25,
            offset_x: 10.0,
            offset_y: 20.0,
        };
        let on_screen = view.to_canvas_space(Point::new(200.0, 150.0));
        ctx.pointer_down(on_screen, &view);
        ctx.pointer_move(on_screen, &view);
        ctx.pointer_up();
        assert_eq!(ctx.selected_id(), Some(b));
        assert_eq!(ctx.project.resolve(a).unwrap().hotspots[0].rect, rect);
    }

    #[test]
    fn test_dangling_click_does_nothing() {
        let (mut ctx, a, b) = two_items();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        ctx.project.resolve_mut(a).unwrap().hotspots.push(Hotspot::new(rect, Some(b)));
        ctx.remove_item(b);
        assert_eq!(ctx.project.resolve(a).unwrap().hotspots[0].target_id, Some(b));

        ctx.set_mode(Mode::Hotspot);
        ctx.pointer_down(Point::new(150.0, 150.0), &identity());
        ctx.pointer_up();
        assert_eq!(ctx.selected_id(), Some(a));
    }

    #[test]
    fn test_removing_gesture_item_aborts_gesture() {
        let (mut ctx, a, b) = two_items();
        ctx.pointer_down(Point::new(400.0, 300.0), &identity());
        ctx.remove_item(a);
        assert!(ctx.gesture().is_none());
        assert_eq!(ctx.selected_id(), Some(b));
        ctx.pointer_move(Point::new(10.0, 10.0), &identity());
        ctx.pointer_up();
        assert_eq!(ctx.project.resolve(b).unwrap().crop, Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_cancel_restores_crop() {
        let (mut ctx, a, _) = two_items();
        ctx.pointer_down(Point::new(400.0, 300.0), &identity());
        ctx.pointer_move(Point::new(300.0, 300.0), &identity());
        ctx.cancel_gesture();
        assert!(ctx.gesture().is_none());
        assert_eq!(ctx.project.resolve(a).unwrap().crop, Rect::new(0.0, 0.0, 800.0, 600.0));
    }

    #[test]
    fn test_apply_crop_to_all_from_selection() {
        let (mut ctx, a, b) = two_items();
        ctx.project.resolve_mut(a).unwrap().crop = Rect::new(400.0, 300.0, 400.0, 300.0);
        ctx.apply_crop_to_all();
        assert_eq!(ctx.project.resolve(b).unwrap().crop, Rect::new(320.0, 240.0, 320.0, 240.0));
    }

    #[test]
    fn test_follow_hotspot_and_retarget() {
        let (mut ctx, a, b) = two_items();
        let hotspot = Hotspot::new(Rect::new(0.0, 0.0, 50.0, 50.0), Some(b));
        let id = hotspot.id;
        ctx.project.resolve_mut(a).unwrap().hotspots.push(hotspot);
        ctx.set_hotspot_target(id, a);
        ctx.follow_hotspot(id);
        assert_eq!(ctx.selected_id(), Some(a));
        ctx.set_hotspot_target(id, b);
        ctx.follow_hotspot(id);
        assert_eq!(ctx.selected_id(), Some(b));
    }

    #[test]
    fn test_select_mid_crop_gesture_restores_crop() {
        let (mut ctx, a, b) = two_items();
        ctx.pointer_down(Point::new(800.0, 600.0), &identity());
        ctx.pointer_move(Point::new(700.0, 500.0), &identity());
        assert_eq!(ctx.project.resolve(a).unwrap().crop, Rect::new(0.0, 0.0, 700.0, 500.0));

        ctx.select(b);
        assert!(ctx.gesture().is_none());
        assert_eq!(ctx.selected_id(), Some(b));
        assert_eq!(ctx.project.resolve(a).unwrap().crop, Rect::new(0.0, 0.0, 800.0, 600.0));

        ctx.pointer_move(Point::new(100.0, 100.0), &identity());
        ctx.pointer_up();
        assert_eq!(ctx.project.resolve(a).unwrap().crop, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(ctx.project.resolve(b).unwrap().crop, Rect::new(0.0, 0.0, 640.0, 480.0));
    }

    #[test]
    fn test_select_mid_hotspot_move_restores_hotspot() {
        let (mut ctx, a, b) = two_items();
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        ctx.project.resolve_mut(a).unwrap().hotspots.push(Hotspot::new(rect, Some(b)));
        ctx.set_mode(Mode::Hotspot);

        ctx.pointer_down(Point::new(200.0, 150.0), &identity());
        ctx.pointer_move(Point::new(250.0, 170.0), &identity());
        assert_eq!(ctx.project.resolve(a).unwrap().hotspots[0].rect, rect.translated(50.0, 20.0));

        ctx.select(b);
        assert!(ctx.gesture().is_none());
        assert_eq!(ctx.project.resolve(a).unwrap().hotspots[0].rect, rect);

        ctx.pointer_move(Point::new(400.0, 400.0), &identity());
        ctx.pointer_up();
        assert_eq!(ctx.selected_id(), Some(b));
        assert_eq!(ctx.project.resolve(a).unwrap().hotspots[0].rect, rect);
        assert!(ctx.project.resolve(b).unwrap().hotspots.is_empty());
    }

    #[test]
    fn test_retarget_to_missing_item_refused() {
        let (mut ctx, a, b) = two_items();
        let hotspot = Hotspot::new(Rect::new(0.0, 0.0, 50.0, 50.0), Some(b));
        let id = hotspot.id;
        ctx.project.resolve_mut(a).unwrap().hotspots.push(hotspot);
        ctx.set_hotspot_target(id, ItemId::new());
        assert_eq!(ctx.project.resolve(a).unwrap().hotspots[0].target_id, Some(b));
    }

    #[test]
    fn test_move_item_reorders_and_cancels_its_gesture() {
        let (mut ctx, a, b) = two_items();
        ctx.pointer_down(Point::new(800.0, 600.0), &identity());
        ctx.pointer_move(Point::new(700.0, 500.0), &identity());

        ctx.move_item(a, 2);
        assert!(ctx.gesture().is_none());
        assert_eq!(ctx.project.index_of(b), Some(0));
        assert_eq!(ctx.project.index_of(a), Some(1));
        assert_eq!(ctx.project.resolve(a).unwrap().crop, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(ctx.selected_id(), Some(a));
    }
}
