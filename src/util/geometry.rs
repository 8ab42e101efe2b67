// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! Rectangle clamping, corner handles, hit-testing and the display
//! transform used to move between canvas pixels and image (or output)
//! pixels. Everything here is pure.

use crate::models::rect::{Point, Rect, Size};

/// A corner handle of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    /// Hit-test order. The first handle whose zone contains the point wins.
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    pub fn name(self) -> &'static str {
        match self {
            Handle::Nw => "nw",
            Handle::Ne => "ne",
            Handle::Sw => "sw",
            Handle::Se => "se",
        }
    }

    fn moves_left(self) -> bool {
        matches!(self, Handle::Nw | Handle::Sw)
    }

    fn moves_top(self) -> bool {
        matches!(self, Handle::Nw | Handle::Ne)
    }
}

/// Force `rect` to be at least `min_size` and at most `bounds` on each axis,
/// then slide it back inside `[0, 0] - bounds`.
///
/// Width and height are capped by the bounds before the minimum is applied,
/// so for bounds smaller than `min_size` the minimum wins.
pub fn clamp(rect: Rect, bounds: Size, min_size: f64) -> Rect {
    let w = rect.w.min(bounds.w).max(min_size);
    let h = rect.h.min(bounds.h).max(min_size);
    let x = rect.x.min(bounds.w - w).max(0.0);
    let y = rect.y.min(bounds.h - h).max(0.0);
    Rect::new(x, y, w, h)
}

/// The four corners of `rect`, in hit-test order.
pub fn handle_points(rect: &Rect) -> [(Handle, Point); 4] {
    [
        (Handle::Nw, Point::new(rect.x, rect.y)),
        (Handle::Ne, Point::new(rect.right(), rect.y)),
        (Handle::Sw, Point::new(rect.x, rect.bottom())),
        (Handle::Se, Point::new(rect.right(), rect.bottom())),
    ]
}

/// Find the handle whose `tolerance`-square contains `point`.
pub fn hit_test_handle(point: Point, rect: &Rect, tolerance: f64) -> Option<Handle> {
    handle_points(rect)
        .into_iter()
        .find(|(_, p)| (point.x - p.x).abs() <= tolerance && (point.y - p.y).abs() <= tolerance)
        .map(|(handle, _)| handle)
}

/// Inclusive point-in-rectangle test.
pub fn hit_test_rect(point: Point, rect: &Rect) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Resize `start` by dragging `handle` by `(dx, dy)`.
///
/// The corner opposite `handle` stays put. The dragged edges are held within
/// `bounds` and at least `min_size` away from the anchor, so the result only
/// departs from the anchor when `start` itself lies outside `bounds`.
pub fn resize_from_handle(
    start: &Rect,
    handle: Handle,
    dx: f64,
    dy: f64,
    bounds: Size,
    min_size: f64,
) -> Rect {
    let (left, right) = if handle.moves_left() {
        let anchor = start.right();
        let left = (start.x + dx).min(anchor - min_size).max(0.0);
        (left, anchor)
    } else {
        let anchor = start.x;
        let right = (start.right() + dx).max(anchor + min_size).min(bounds.w);
        (anchor, right)
    };
    let (top, bottom) = if handle.moves_top() {
        let anchor = start.bottom();
        let top = (start.y + dy).min(anchor - min_size).max(0.0);
        (top, anchor)
    } else {
        let anchor = start.y;
        let bottom = (start.bottom() + dy).max(anchor + min_size).min(bounds.h);
        (anchor, bottom)
    };
    clamp(Rect::new(left, top, right - left, bottom - top), bounds, min_size)
}

/// Rectangle spanned by two corner points, whichever way round they are.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), (a.x - b.x).abs(), (a.y - b.y).abs())
}

/// Uniform scale plus offset mapping a source space onto the screen:
/// `canvas = source * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for DisplayTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl DisplayTransform {
    /// Fit `source` inside `canvas` (placed at `origin`), centred, preserving aspect.
    pub fn fit(source: Size, canvas: Rect) -> Self {
        if source.w <= 0.0 || source.h <= 0.0 || canvas.w <= 0.0 || canvas.h <= 0.0 {
            return Self {
                scale: 1.0,
                offset_x: canvas.x,
                offset_y: canvas.y,
            };
        }
        let scale = (canvas.w / source.w).min(canvas.h / source.h);
        Self {
            scale,
            offset_x: canvas.x + (canvas.w - source.w * scale) / 2.0,
            offset_y: canvas.y + (canvas.h - source.h * scale) / 2.0,
        }
    }

    pub fn to_canvas_space(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    pub fn to_image_space(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.offset_x) / self.scale,
            (point.y - self.offset_y) / self.scale,
        )
    }

    pub fn rect_to_canvas(&self, rect: &Rect) -> Rect {
        let origin = self.to_canvas_space(Point::new(rect.x, rect.y));
        Rect::new(origin.x, origin.y, rect.w * self.scale, rect.h * self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn bounds() -> Size {
        Size::new(800.0, 600.0)
    }

    #[test]
    fn test_clamp_stays_inside_and_is_idempotent() {
        let cases = [
            Rect::new(-50.0, -10.0, 100.0, 100.0),
            Rect::new(790.0, 590.0, 5.0, 5.0),
            Rect::new(100.0, 100.0, 2000.0, 3000.0),
            Rect::new(300.0, 200.0, -40.0, 0.0),
            Rect::new(10.0, 10.0, 50.0, 50.0),
        ];
        for rect in cases {
            let once = clamp(rect, bounds(), 20.0);
            assert!(once.x >= 0.0 && once.y >= 0.0, "{:?}", once);
            assert!(once.right() <= 800.0 + EPS && once.bottom() <= 600.0 + EPS);
            assert!(once.w >= 20.0 && once.h >= 20.0);
            assert_eq!(clamp(once, bounds(), 20.0), once);
        }
    }

    #[test]
    fn test_clamp_leaves_valid_rect_alone() {
        let rect = Rect::new(10.0, 20.0, 300.0, 200.0);
        assert_eq!(clamp(rect, bounds(), 20.0), rect);
    }

    #[test]
    fn test_handle_points_order() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        let points = handle_points(&rect);
        assert_eq!(points[0], (Handle::Nw, Point::new(10.0, 20.0)));
        assert_eq!(points[1], (Handle::Ne, Point::new(40.0, 20.0)));
        assert_eq!(points[2], (Handle::Sw, Point::new(10.0, 60.0)));
        assert_eq!(points[3], (Handle::Se, Point::new(40.0, 60.0)));
    }

    #[test]
    fn test_hit_test_handle() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(hit_test_handle(Point::new(105.0, 95.0), &rect, 10.0), Some(Handle::Nw));
        assert_eq!(hit_test_handle(Point::new(300.0, 210.0), &rect, 10.0), Some(Handle::Se));
        assert_eq!(hit_test_handle(Point::new(290.0, 100.0), &rect, 10.0), Some(Handle::Ne));
        assert_eq!(hit_test_handle(Point::new(200.0, 150.0), &rect, 10.0), None);
    }

    #[test]
    fn test_hit_test_handle_degenerate_prefers_nw() {
        let rect = Rect::new(50.0, 50.0, 1.0, 1.0);
        assert_eq!(hit_test_handle(Point::new(50.5, 50.5), &rect, 10.0), Some(Handle::Nw));
    }

    #[test]
    fn test_hit_test_rect_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(hit_test_rect(Point::new(0.0, 0.0), &rect));
        assert!(hit_test_rect(Point::new(10.0, 10.0), &rect));
        assert!(!hit_test_rect(Point::new(10.01, 5.0), &rect));
    }

    #[test]
    fn test_display_transform_roundtrip() {
        let transform = DisplayTransform::fit(
            Size::new(4032.0, 3024.0),
            Rect::new(17.0, 42.0, 913.0, 514.0),
        );
        for (x, y) in [(0.0, 0.0), (17.0, 42.0), (523.25, 301.5), (930.0, 556.0)] {
            let p = Point::new(x, y);
            let back = transform.to_canvas_space(transform.to_image_space(p));
            assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6);
            let back = transform.to_image_space(transform.to_canvas_space(p));
            assert!((back.x - p.x).abs() < 1e-6 && (back.y - p.y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_fit_centres_letterboxed_image() {
        let transform = DisplayTransform::fit(Size::new(800.0, 600.0), Rect::new(0.0, 0.0, 1600.0, 600.0));
        assert!((transform.scale - 1.0).abs() < EPS);
        assert!((transform.offset_x - 400.0).abs() < EPS);
        assert!(transform.offset_y.abs() < EPS);
    }

    #[test]
    fn test_resize_se_keeps_origin() {
        let start = Rect::new(100.0, 100.0, 200.0, 200.0);
        for (dx, dy) in [(50.0, 30.0), (-500.0, -500.0), (900.0, 900.0)] {
            let r = resize_from_handle(&start, Handle::Se, dx, dy, bounds(), 20.0);
            assert_eq!((r.x, r.y), (100.0, 100.0));
        }
    }

    #[test]
    fn test_resize_nw_keeps_bottom_right() {
        let start = Rect::new(100.0, 100.0, 600.0, 300.0);
        for (dx, dy) in [(50.0, 30.0), (-200.0, -200.0), (900.0, 900.0)] {
            let r = resize_from_handle(&start, Handle::Nw, dx, dy, bounds(), 20.0);
            assert!((r.right() - 700.0).abs() < EPS);
            assert!((r.bottom() - 400.0).abs() < EPS);
            assert!(r.w >= 20.0 && r.h >= 20.0 && r.x >= 0.0 && r.y >= 0.0);
        }
    }

    #[test]
    fn test_resize_mixed_corners_keep_fixed_axis() {
        let start = Rect::new(100.0, 100.0, 200.0, 200.0);
        let ne = resize_from_handle(&start, Handle::Ne, 40.0, -30.0, bounds(), 20.0);
        assert_eq!(ne.x, 100.0);
        assert_eq!(ne.bottom(), 300.0);
        assert_eq!(ne, Rect::new(100.0, 70.0, 240.0, 230.0));

        let sw = resize_from_handle(&start, Handle::Sw, 40.0, -30.0, bounds(), 20.0);
        assert_eq!(sw.right(), 300.0);
        assert_eq!(sw.y, 100.0);
        assert_eq!(sw, Rect::new(140.0, 100.0, 160.0, 170.0));
    }

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = rect_from_corners(Point::new(100.0, 100.0), Point::new(50.0, 50.0));
        assert_eq!(r, Rect::new(50.0, 50.0, 50.0, 50.0));
    }
}
