//! Axis-aligned rectangle, the spatial primitive behind bodies, sprites,
//! terrain and triggers.
//!
//! Most mutators *move* the rect rather than resize it. Only `set_w`,
//! `set_h`, `set_size`, `grow`, `union` and `match_to` change its size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle given by its top-left corner and its size. Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A rect of the given size with its top-left corner at the origin.
    pub const fn from_size(w: f32, h: f32) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    // -- Edges (setting one translates the rect) --

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn set_left(&mut self, n: f32) {
        self.x = n;
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn set_right(&mut self, n: f32) {
        self.x = n - self.w;
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn set_top(&mut self, n: f32) {
        self.y = n;
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn set_bottom(&mut self, n: f32) {
        self.y = n - self.h;
    }

    // -- Midpoints --

    pub fn mid_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn set_mid_x(&mut self, n: f32) {
        self.x = n - self.w / 2.0;
    }

    pub fn mid_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn set_mid_y(&mut self, n: f32) {
        self.y = n - self.h / 2.0;
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.mid_y())
    }

    pub fn set_center(&mut self, c: Vec2) {
        self.set_mid_x(c.x);
        self.set_mid_y(c.y);
    }

    // -- Size --

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn set_w(&mut self, w: f32) {
        self.w = w;
    }

    pub fn set_h(&mut self, h: f32) {
        self.h = h;
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.w = size.x;
        self.h = size.y;
    }

    /// Resize by `(dw, dh)` keeping the center fixed. Negative values shrink.
    pub fn grow(&mut self, dw: f32, dh: f32) {
        let c = self.center();
        self.w += dw;
        self.h += dh;
        self.set_center(c);
    }

    /// Copy position and size from `other`.
    pub fn match_to(&mut self, other: &Rect) {
        *self = *other;
    }

    /// Expand to the smallest rect covering both `self` and `other`.
    pub fn union(&mut self, other: &Rect) {
        let l = self.left().min(other.left());
        let t = self.top().min(other.top());
        let r = self.right().max(other.right());
        let b = self.bottom().max(other.bottom());
        self.x = l;
        self.y = t;
        self.w = r - l;
        self.h = b - t;
    }

    /// Half-open overlap test. Rects that only share an edge do not overlap.
    pub fn overlap(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }

    // -- Polar movement, all measured between centers --

    /// Move so that the centers coincide.
    pub fn move_to(&mut self, other: &Rect) {
        self.set_center(other.center());
    }

    pub fn range_to(&self, other: &Rect) -> f32 {
        self.center().distance(other.center())
    }

    /// Angle in radians from this center to `other`'s center, via `atan2(dy, dx)`.
    pub fn angle_to(&self, other: &Rect) -> f32 {
        let d = other.center() - self.center();
        d.y.atan2(d.x)
    }

    pub fn move_at_angle(&mut self, angle: f32, dist: f32) {
        self.x += dist * angle.cos();
        self.y += dist * angle.sin();
    }

    /// Step toward `other` by at most `max_dist`; snaps exactly onto it when closer.
    pub fn move_toward(&mut self, other: &Rect, max_dist: f32) {
        if self.range_to(other) > max_dist {
            self.move_at_angle(self.angle_to(other), max_dist);
        } else {
            self.move_to(other);
        }
    }

    /// Coordinates inside the rect, row-major from the top-left corner,
    /// advancing by `step` on both axes.
    pub fn internal_coords(&self, step: f32) -> Vec<Vec2> {
        assert!(step > 0.0, "internal_coords step must be positive");
        let mut coords = Vec::new();
        let mut cy = self.y;
        while cy < self.bottom() {
            let mut cx = self.x;
            while cx < self.right() {
                coords.push(Vec2::new(cx, cy));
                cx += step;
            }
            cy += step;
        }
        coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_translate_without_resizing() {
        let mut r = Rect::new(10.0, 20.0, 30.0, 40.0);
        r.set_right(100.0);
        assert_eq!(r.x, 70.0);
        assert_eq!(r.size(), Vec2::new(30.0, 40.0));

        r.set_bottom(100.0);
        assert_eq!(r.y, 60.0);
        assert_eq!(r.top(), 60.0);
        assert_eq!(r.size(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn center_setter_moves_rect() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 20.0);
        r.set_center(Vec2::new(50.0, 50.0));
        assert_eq!(r.x, 45.0);
        assert_eq!(r.y, 40.0);
        assert_eq!(r.mid_x(), 50.0);
        assert_eq!(r.mid_y(), 50.0);
    }

    #[test]
    fn grow_keeps_center() {
        let mut r = Rect::new(3.0, 7.0, 10.0, 4.0);
        let before = r.center();
        r.grow(6.0, -2.0);
        assert_eq!(r.center(), before);
        assert_eq!(r.size(), Vec2::new(16.0, 2.0));
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(5.0, 5.0, 10.0, 10.0)),
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(20.0, 0.0, 10.0, 10.0)),
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(2.0, 2.0, 2.0, 2.0)),
            (Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(10.0, 0.0, 5.0, 5.0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.overlap(&b), b.overlap(&a), "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlap(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlap(&Rect::new(-10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlap(&Rect::new(0.0, 10.0, 10.0, 10.0)));
        assert!(!a.overlap(&Rect::new(0.0, -10.0, 10.0, 10.0)));
        assert!(a.overlap(&Rect::new(9.5, 9.5, 10.0, 10.0)));
    }

    #[test]
    fn union_covers_both() {
        let mut a = Rect::new(0.0, 0.0, 10.0, 10.0);
        a.union(&Rect::new(-5.0, 20.0, 5.0, 5.0));
        assert_eq!(a, Rect::new(-5.0, 0.0, 15.0, 25.0));
    }

    #[test]
    fn match_to_copies_all_fields() {
        let mut a = Rect::new(1.0, 2.0, 3.0, 4.0);
        let b = Rect::new(9.0, 8.0, 7.0, 6.0);
        a.match_to(&b);
        assert_eq!(a, b);
    }

    #[test]
    fn angle_and_range() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(3.0, 4.0, 2.0, 2.0);
        assert!((a.range_to(&b) - 5.0).abs() < 1e-6);
        assert!((a.angle_to(&b) - (4.0f32).atan2(3.0)).abs() < 1e-6);
    }

    #[test]
    fn move_toward_clamps_and_snaps() {
        let mut a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(10.0, 0.0, 2.0, 2.0);

        a.move_toward(&b, 4.0);
        assert!((a.x - 4.0).abs() < 1e-5);
        assert!(a.y.abs() < 1e-5);

        a.move_toward(&b, 100.0);
        assert_eq!(a.center(), b.center());
    }

    #[test]
    fn internal_coords_row_major() {
        let r = Rect::new(0.0, 0.0, 2.0, 2.0);
        let coords = r.internal_coords(1.0);
        assert_eq!(
            coords,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ]
        );
    }
}
