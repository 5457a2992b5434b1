//! Kinematic body: a rect with velocity, resolved against static terrain one
//! axis at a time.

use glam::Vec2;

use crate::core::rect::Rect;

/// A static obstacle a body can collide with.
pub trait Solid {
    fn rect(&self) -> &Rect;

    /// One-way platforms only stop bodies falling onto them from above.
    fn one_way(&self) -> bool {
        false
    }
}

impl Solid for Rect {
    fn rect(&self) -> &Rect {
        self
    }
}

/// Which edges touched terrain as of the most recent [`Body::step`]. A body
/// resting flush on a floor counts as blocked below even with no vertical speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Body {
    pub rect: Rect,
    /// Pixels per tick.
    pub vel: Vec2,
    /// Rewritten by every `step`; read as last frame's contacts until then.
    pub blocked: Blocked,
    /// Drop through one-way platforms while set.
    pub fall_through: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Default::default()
        }
    }

    /// Integrate velocity against `terrain`: horizontal first, then vertical.
    ///
    /// Terrain must be well-formed (positive size); nothing here guards against
    /// degenerate rects.
    pub fn step<S: Solid>(&mut self, terrain: &[S]) {
        self.step_x(terrain);
        self.step_y(terrain);
    }

    fn step_x<S: Solid>(&mut self, terrain: &[S]) {
        self.blocked.left = false;
        self.blocked.right = false;

        let dx = self.vel.x;
        if dx == 0.0 {
            return;
        }

        let mut moved = self.rect;
        moved.x += dx;

        // Nearest stop wins when several pieces are hit at once.
        let mut stop: Option<f32> = None;
        for solid in terrain.iter().filter(|s| !s.one_way()) {
            let r = solid.rect();
            if !moved.overlap(r) {
                continue;
            }
            let x = if dx > 0.0 { r.left() - self.rect.w } else { r.right() };
            stop = Some(match stop {
                Some(s) if dx > 0.0 => s.min(x),
                Some(s) => s.max(x),
                None => x,
            });
        }

        match stop {
            Some(x) => {
                self.rect.x = x;
                self.vel.x = 0.0;
                if dx > 0.0 {
                    self.blocked.right = true;
                } else {
                    self.blocked.left = true;
                }
            }
            None => self.rect.x = moved.x,
        }
    }

    fn step_y<S: Solid>(&mut self, terrain: &[S]) {
        self.blocked.top = false;
        self.blocked.bottom = false;

        let dy = self.vel.y;
        if dy == 0.0 {
            self.rest_contacts(terrain);
            return;
        }

        let mut moved = self.rect;
        moved.y += dy;

        let mut stop: Option<f32> = None;
        for solid in terrain {
            let r = solid.rect();
            if solid.one_way() && !self.lands_on(r, dy) {
                continue;
            }
            if !moved.overlap(r) {
                continue;
            }
            let y = if dy > 0.0 { r.top() - self.rect.h } else { r.bottom() };
            stop = Some(match stop {
                Some(s) if dy > 0.0 => s.min(y),
                Some(s) => s.max(y),
                None => y,
            });
        }

        match stop {
            Some(y) => {
                self.rect.y = y;
                self.vel.y = 0.0;
                if dy > 0.0 {
                    self.blocked.bottom = true;
                } else {
                    self.blocked.top = true;
                }
            }
            None => self.rect.y = moved.y,
        }
    }

    /// Flag floors and ceilings the rect is flush against without moving
    /// vertically, e.g. while dashing along the ground.
    fn rest_contacts<S: Solid>(&mut self, terrain: &[S]) {
        for solid in terrain {
            let r = solid.rect();
            if self.rect.left() >= r.right() || r.left() >= self.rect.right() {
                continue;
            }
            if flush(r.top(), self.rect.bottom()) && !(solid.one_way() && self.fall_through) {
                self.blocked.bottom = true;
            }
            if flush(r.bottom(), self.rect.top()) && !solid.one_way() {
                self.blocked.top = true;
            }
        }
    }

    /// A one-way platform only catches a body that is falling, not dropping
    /// through, and started the move at or above the platform's top.
    fn lands_on(&self, platform: &Rect, dy: f32) -> bool {
        if self.fall_through && dy >= 0.0 {
            return false;
        }
        dy > 0.0 && self.rect.bottom() <= platform.top()
    }
}

/// Edges this close count as touching; landing rebuilds `y` from `top - h`.
fn flush(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-3
}
