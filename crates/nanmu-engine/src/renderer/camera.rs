use glam::Vec2;

use crate::core::rect::Rect;

/// Scrolling 2D camera.
///
/// The offset is the world position of the view's top-left corner; drawing
/// subtracts it from world coordinates to get screen coordinates.
#[derive(Debug, Clone)]
pub struct Camera {
    /// View width in pixels.
    pub width: f32,
    /// View height in pixels.
    pub height: f32,
    /// Scroll offset (sx, sy).
    pub offset: Vec2,
    /// Optional world bounds the view must stay inside.
    pub bounds: Option<Rect>,
    /// Smoothing factor for follow (0.0 = instant, 0.99 = very slow).
    pub smoothing: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
            bounds: None,
            smoothing: 0.0,
        }
    }

    pub fn sx(&self) -> f32 {
        self.offset.x
    }

    pub fn sy(&self) -> f32 {
        self.offset.y
    }

    /// The visible world region.
    pub fn view(&self) -> Rect {
        Rect::new(self.offset.x, self.offset.y, self.width, self.height)
    }

    /// Constrain the view to `bounds`, e.g. a zone's terrain extents.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        self.clamp_to_bounds();
    }

    pub fn clear_bounds(&mut self) {
        self.bounds = None;
    }

    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(0.0, 0.99);
    }

    /// Center the view on `target` immediately.
    pub fn look_at(&mut self, target: Vec2) {
        self.offset = target - self.half_size();
        self.clamp_to_bounds();
    }

    /// Move the view toward `target`, one tick's worth.
    pub fn follow(&mut self, target: Vec2) {
        if self.smoothing <= 0.0 {
            self.look_at(target);
            return;
        }
        let goal = target - self.half_size();
        self.offset += (goal - self.offset) * (1.0 - self.smoothing);
        self.clamp_to_bounds();
    }

    /// World → screen.
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    pub fn is_visible(&self, rect: &Rect) -> bool {
        self.view().overlap(rect)
    }

    fn half_size(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    fn clamp_to_bounds(&mut self) {
        let Some(b) = self.bounds else {
            return;
        };
        // A view wider or taller than the bounds centers on them.
        self.offset.x = if self.width >= b.w {
            b.mid_x() - self.width / 2.0
        } else {
            self.offset.x.clamp(b.left(), b.right() - self.width)
        };
        self.offset.y = if self.height >= b.h {
            b.mid_y() - self.height / 2.0
        } else {
            self.offset.y.clamp(b.top(), b.bottom() - self.height)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_centers_view() {
        let mut cam = Camera::new(100.0, 80.0);
        cam.look_at(Vec2::new(500.0, 300.0));
        assert_eq!(cam.offset, Vec2::new(450.0, 260.0));
        assert_eq!(cam.to_screen(Vec2::new(500.0, 300.0)), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn bounds_clamp_offset() {
        let mut cam = Camera::new(100.0, 100.0);
        cam.set_bounds(Rect::new(0.0, 0.0, 500.0, 400.0));

        cam.look_at(Vec2::ZERO);
        assert_eq!(cam.offset, Vec2::ZERO);

        cam.look_at(Vec2::new(1000.0, 1000.0));
        assert_eq!(cam.offset, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn small_bounds_center_the_view() {
        let mut cam = Camera::new(640.0, 480.0);
        cam.set_bounds(Rect::new(0.0, 0.0, 320.0, 800.0));
        cam.look_at(Vec2::new(0.0, 0.0));
        assert_eq!(cam.offset.x, 160.0 - 320.0);
        assert_eq!(cam.offset.y, 0.0);
    }

    #[test]
    fn follow_with_smoothing_moves_partway() {
        let mut cam = Camera::new(100.0, 100.0);
        cam.set_smoothing(0.9);
        cam.follow(Vec2::new(150.0, 150.0));
        assert!(cam.offset.x > 0.0 && cam.offset.x < 100.0);
        assert!(cam.offset.y > 0.0 && cam.offset.y < 100.0);
    }

    #[test]
    fn visibility_uses_half_open_overlap() {
        let cam = Camera::new(100.0, 100.0);
        assert!(cam.is_visible(&Rect::new(90.0, 90.0, 20.0, 20.0)));
        assert!(!cam.is_visible(&Rect::new(100.0, 0.0, 20.0, 20.0)));
    }
}
