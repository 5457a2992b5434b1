//! Player kinematics: running, jumping, dashing.
//!
//! Intent comes from the [`Controller`] passed into every update; the
//! resulting velocity is resolved against terrain by the embedded [`Body`].

use serde::{Deserialize, Serialize};

use crate::api::types::SoundEvent;
use crate::core::body::{Body, Solid};
use crate::core::rect::Rect;
use crate::error::EngineError;
use crate::input::controller::{Action, Button, Controller};

/// Cue played on takeoff.
pub const JUMP_SOUND: SoundEvent = SoundEvent(0);
/// Cue played when a dash starts.
pub const DASH_SOUND: SoundEvent = SoundEvent(1);

/// Dashes allowed per airborne period.
const AIR_DASH_BUDGET: u32 = 1;

/// Movement constants. Velocities are pixels per tick; positive y is down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub accel: f32,
    pub decel: f32,
    pub run_vel: f32,
    pub dash_vel: f32,
    /// Ticks a dash lasts.
    pub dash_duration: u32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    /// Vertical velocity on takeoff.
    pub jump_start: f32,
    /// Upward speed cap after jump is released early.
    pub jump_cut: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            accel: 0.5,
            decel: 0.3,
            run_vel: 5.0,
            dash_vel: 8.0,
            dash_duration: 30,
            gravity: 0.6,
            terminal_velocity: 14.0,
            jump_start: -13.2,
            jump_cut: -5.0,
            width: 28.0,
            height: 60.0,
        }
    }
}

impl PlayerTuning {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    #[default]
    Left,
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerBody {
    pub body: Body,
    pub tuning: PlayerTuning,
    /// Horizontal intent: -1, 0 or 1.
    pub x_dir: i8,
    /// Vertical intent: -1 (up), 0 or 1 (down).
    pub y_dir: i8,
    pub facing: Facing,
    /// Ticks of dash left; 0 when not dashing.
    pub dash_timer: u32,
    /// Dashes started since last touching the ground.
    pub air_dashes: u32,
}

impl PlayerBody {
    pub fn new(tuning: PlayerTuning) -> Self {
        let rect = Rect::from_size(tuning.width, tuning.height);
        Self {
            body: Body::new(rect),
            tuning,
            x_dir: 0,
            y_dir: 0,
            facing: Facing::default(),
            dash_timer: 0,
            air_dashes: 0,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0
    }

    /// Standing on something as of the last step.
    pub fn grounded(&self) -> bool {
        self.body.blocked.bottom
    }

    /// Place the body with its bottom-center at `(x, y)`.
    pub fn place(&mut self, x: f32, y: f32) {
        self.body.rect.set_mid_x(x);
        self.body.rect.set_bottom(y);
        self.body.vel = glam::Vec2::ZERO;
        self.dash_timer = 0;
    }

    /// One tick: timers, intent, velocity, then collision.
    ///
    /// Intent reads contact flags from the previous step.
    pub fn update<S: Solid>(&mut self, ctl: &Controller, terrain: &[S], sounds: &mut Vec<SoundEvent>) {
        if self.dash_timer > 0 {
            self.dash_timer -= 1;
        }
        if self.grounded() {
            self.air_dashes = 0;
        }

        let jumped = self.jump_input(ctl, sounds);
        self.body.fall_through = ctl.pressed(Action::Fall);
        self.y_dir = if ctl.pressed(Button::U) {
            -1
        } else if ctl.pressed(Button::D) {
            1
        } else {
            0
        };
        if !jumped {
            self.dash_input(ctl, sounds);
        }

        if self.is_dashing() {
            self.dash_move(ctl);
        } else {
            self.run(ctl);
            self.fall();
        }

        self.body.step(terrain);
    }

    /// Start a jump on press, cut it short on release. Returns whether a jump started.
    pub fn jump_input(&mut self, ctl: &Controller, sounds: &mut Vec<SoundEvent>) -> bool {
        if ctl.just_pressed(Action::Jump) {
            // A ground dash can be jump-cancelled even after running off a ledge.
            if self.grounded() || (self.is_dashing() && self.air_dashes == 0) {
                self.dash_timer = 0;
                self.body.vel.y = self.tuning.jump_start;
                sounds.push(JUMP_SOUND);
                log::debug!("jump from ({:.1}, {:.1})", self.body.rect.x, self.body.rect.y);
                return true;
            }
        } else if ctl.just_released(Action::Jump) && self.body.vel.y < self.tuning.jump_cut {
            self.body.vel.y = self.tuning.jump_cut;
        }
        false
    }

    /// Start a dash on press if allowed. Returns whether a dash started.
    pub fn dash_input(&mut self, ctl: &Controller, sounds: &mut Vec<SoundEvent>) -> bool {
        if !ctl.just_pressed(Action::Dash) || self.is_dashing() {
            return false;
        }
        if !self.grounded() {
            if self.air_dashes >= AIR_DASH_BUDGET {
                return false;
            }
            self.air_dashes += 1;
        }
        self.dash_timer = self.tuning.dash_duration;
        sounds.push(DASH_SOUND);
        log::debug!("dash {:?}, air dashes {}", self.facing, self.air_dashes);
        true
    }

    /// Accelerate toward the run target for the held direction, or coast to a stop.
    pub fn run(&mut self, ctl: &Controller) {
        let left = ctl.pressed(Action::RunLeft);
        let right = ctl.pressed(Action::RunRight);
        self.x_dir = if left && !right {
            self.facing = Facing::Left;
            -1
        } else if right && !left {
            self.facing = Facing::Right;
            1
        } else {
            0
        };

        let t = &self.tuning;
        let vx = self.body.vel.x;
        self.body.vel.x = match self.x_dir {
            0 if vx > 0.0 => (vx - t.decel).max(0.0),
            0 if vx < 0.0 => (vx + t.decel).min(0.0),
            0 => 0.0,
            d if d > 0 => (vx + t.accel).min(t.run_vel),
            _ => (vx - t.accel).max(-t.run_vel),
        };
    }

    pub fn fall(&mut self) {
        self.body.vel.y = (self.body.vel.y + self.tuning.gravity).min(self.tuning.terminal_velocity);
    }

    /// Fixed-speed horizontal burst in the facing direction. Hitting a wall or
    /// holding the opposite direction ends it early.
    fn dash_move(&mut self, ctl: &Controller) {
        let t = &self.tuning;
        self.body.vel.y = 0.0;
        let (blocked, reverse) = match self.facing {
            Facing::Right => (self.body.blocked.right, Action::RunLeft),
            Facing::Left => (self.body.blocked.left, Action::RunRight),
        };

        if blocked {
            self.body.vel.x = 0.0;
            self.dash_timer = 0;
        } else if ctl.pressed(reverse) {
            self.body.vel.x = match self.facing {
                Facing::Right => self.body.vel.x.min(t.run_vel),
                Facing::Left => self.body.vel.x.max(-t.run_vel),
            };
            self.dash_timer = 0;
        } else {
            self.body.vel.x = self.facing.sign() * t.dash_vel;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::queue::{InputEvent, InputQueue};

    const LEFT: u32 = 37;
    const RIGHT: u32 = 39;
    const DOWN: u32 = 40;
    const JUMP: u32 = 90;
    const DASH: u32 = 88;

    fn floor() -> Vec<Rect> {
        vec![Rect::new(-2000.0, 400.0, 4000.0, 50.0)]
    }

    fn frame(ctl: &mut Controller, events: &[InputEvent]) {
        let mut q = InputQueue::new();
        for e in events {
            q.push(*e);
        }
        ctl.update(&mut q);
    }

    /// A body resting on the floor after one settling tick.
    fn grounded() -> (PlayerBody, Controller) {
        let mut pb = PlayerBody::new(PlayerTuning::default());
        pb.place(500.0, 400.0);
        let mut ctl = Controller::new();
        frame(&mut ctl, &[]);
        pb.update(&ctl, &floor(), &mut Vec::new());
        assert!(pb.grounded());
        (pb, ctl)
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn tuning_defaults_and_partial_json() {
        let t = PlayerTuning::from_json(r#"{ "run_vel": 6.5 }"#).unwrap();
        assert_eq!(t.run_vel, 6.5);
        assert_eq!(t.dash_duration, 30);
        assert_eq!(t.jump_start, -13.2);
    }

    #[test]
    fn idle_body_stays_still() {
        let (mut pb, mut ctl) = grounded();
        for _ in 0..5 {
            frame(&mut ctl, &[]);
            pb.update(&ctl, &floor(), &mut Vec::new());
        }
        assert_eq!(pb.body.vel.x, 0.0);
        assert_eq!(pb.rect().mid_x(), 500.0);
        assert!(pb.grounded());
    }

    #[test]
    fn run_accelerates_to_cap_then_decelerates() {
        let (mut pb, mut ctl) = grounded();
        frame(&mut ctl, &[InputEvent::KeyDown { code: RIGHT }]);
        pb.update(&ctl, &floor(), &mut Vec::new());
        assert_eq!(pb.body.vel.x, 0.5);
        assert_eq!(pb.facing, Facing::Right);

        for _ in 0..20 {
            frame(&mut ctl, &[]);
            pb.update(&ctl, &floor(), &mut Vec::new());
        }
        assert_eq!(pb.body.vel.x, 5.0);

        frame(&mut ctl, &[InputEvent::KeyUp { code: RIGHT }]);
        pb.update(&ctl, &floor(), &mut Vec::new());
        assert!(approx(pb.body.vel.x, 4.7));
        assert_eq!(pb.x_dir, 0);

        for _ in 0..30 {
            frame(&mut ctl, &[]);
            pb.update(&ctl, &floor(), &mut Vec::new());
        }
        assert_eq!(pb.body.vel.x, 0.0);
        assert_eq!(pb.facing, Facing::Right);
    }

    #[test]
    fn both_directions_cancel() {
        let (mut pb, mut ctl) = grounded();
        frame(
            &mut ctl,
            &[InputEvent::KeyDown { code: LEFT }, InputEvent::KeyDown { code: RIGHT }],
        );
        pb.update(&ctl, &floor(), &mut Vec::new());
        assert_eq!(pb.x_dir, 0);
        assert_eq!(pb.body.vel.x, 0.0);
    }

    #[test]
    fn gravity_is_capped_at_terminal_velocity() {
        let mut pb = PlayerBody::new(PlayerTuning::default());
        let ctl = Controller::new();
        for _ in 0..100 {
            pb.update(&ctl, &[] as &[Rect], &mut Vec::new());
        }
        assert_eq!(pb.body.vel.y, 14.0);
    }

    #[test]
    fn jump_from_ground_plays_cue() {
        let (mut pb, mut ctl) = grounded();
        let mut sounds = Vec::new();
        frame(&mut ctl, &[InputEvent::KeyDown { code: JUMP }]);
        pb.update(&ctl, &floor(), &mut sounds);
        assert!(approx(pb.body.vel.y, -13.2 + 0.6));
        assert_eq!(sounds, vec![JUMP_SOUND]);
        assert!(!pb.grounded());

        // No double jump.
        frame(&mut ctl, &[InputEvent::KeyUp { code: JUMP }]);
        frame(&mut ctl, &[InputEvent::KeyDown { code: JUMP }]);
        sounds.clear();
        pb.update(&ctl, &floor(), &mut sounds);
        assert!(sounds.is_empty());
    }

    #[test]
    fn releasing_jump_cuts_upward_speed() {
        let mut pb = PlayerBody::new(PlayerTuning::default());
        let mut ctl = Controller::new();
        frame(&mut ctl, &[InputEvent::KeyDown { code: JUMP }]);
        frame(&mut ctl, &[InputEvent::KeyUp { code: JUMP }]);
        assert!(ctl.just_released(Action::Jump));

        pb.body.vel.y = -10.0;
        pb.jump_input(&ctl, &mut Vec::new());
        assert_eq!(pb.body.vel.y, -5.0);

        pb.body.vel.y = -3.0;
        pb.jump_input(&ctl, &mut Vec::new());
        assert_eq!(pb.body.vel.y, -3.0);

        pb.body.vel.y = -5.0;
        pb.jump_input(&ctl, &mut Vec::new());
        assert_eq!(pb.body.vel.y, -5.0);
    }

    #[test]
    fn dash_lasts_exactly_its_duration() {
        let (mut pb, mut ctl) = grounded();
        let mut sounds = Vec::new();
        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, &floor(), &mut sounds);
        assert_eq!(pb.dash_timer, 30);
        assert_eq!(pb.body.vel.x, -8.0);
        assert_eq!(pb.body.vel.y, 0.0);
        assert_eq!(sounds, vec![DASH_SOUND]);

        for i in 1..=30 {
            frame(&mut ctl, &[]);
            pb.update(&ctl, &floor(), &mut sounds);
            assert_eq!(pb.dash_timer, 30 - i);
            if i < 30 {
                assert_eq!(pb.body.vel.x, -8.0);
            }
        }
        // Back under the acceleration model: coasting from dash speed.
        assert!(approx(pb.body.vel.x, -7.7));
        assert!(!pb.is_dashing());
        assert_eq!(sounds.len(), 1);
    }

    #[test]
    fn dash_into_wall_stops() {
        let (mut pb, mut ctl) = grounded();
        pb.facing = Facing::Right;
        let mut terrain = floor();
        terrain.push(Rect::new(pb.rect().right() + 12.0, 0.0, 50.0, 400.0));

        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, &terrain, &mut Vec::new());
        assert_eq!(pb.body.vel.x, 8.0);

        frame(&mut ctl, &[]);
        pb.update(&ctl, &terrain, &mut Vec::new());
        assert!(pb.body.blocked.right);
        assert_eq!(pb.body.vel.x, 0.0);

        frame(&mut ctl, &[]);
        pb.update(&ctl, &terrain, &mut Vec::new());
        assert!(!pb.is_dashing());
        assert_eq!(pb.body.vel.x, 0.0);
    }

    #[test]
    fn ground_dash_keeps_contact_with_floor() {
        let (mut pb, mut ctl) = grounded();
        let mut sounds = Vec::new();
        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, &floor(), &mut sounds);
        for _ in 0..29 {
            frame(&mut ctl, &[]);
            pb.update(&ctl, &floor(), &mut sounds);
            assert!(pb.grounded());
        }
        assert_eq!(pb.dash_timer, 1);

        // The last dash tick still stands on the floor, so the jump goes through.
        sounds.clear();
        frame(&mut ctl, &[InputEvent::KeyDown { code: JUMP }]);
        pb.update(&ctl, &floor(), &mut sounds);
        assert_eq!(sounds, vec![JUMP_SOUND]);
        assert!(approx(pb.body.vel.y, -13.2 + 0.6));
    }

    #[test]
    fn dash_after_wall_cancel_is_a_ground_dash() {
        let (mut pb, mut ctl) = grounded();
        pb.facing = Facing::Right;
        let mut terrain = floor();
        terrain.push(Rect::new(pb.rect().right() + 12.0, 0.0, 50.0, 400.0));

        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, &terrain, &mut Vec::new());
        for _ in 0..2 {
            frame(&mut ctl, &[]);
            pb.update(&ctl, &terrain, &mut Vec::new());
        }
        assert!(!pb.is_dashing());
        assert!(pb.grounded());

        pb.facing = Facing::Left;
        frame(&mut ctl, &[InputEvent::KeyUp { code: DASH }]);
        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, &terrain, &mut Vec::new());
        assert!(pb.is_dashing());
        assert_eq!(pb.air_dashes, 0);

        let mut sounds = Vec::new();
        frame(&mut ctl, &[InputEvent::KeyDown { code: JUMP }]);
        pb.update(&ctl, &terrain, &mut sounds);
        assert!(!pb.is_dashing());
        assert_eq!(sounds, vec![JUMP_SOUND]);
    }

    #[test]
    fn reversing_cancels_dash() {
        let (mut pb, mut ctl) = grounded();
        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, &floor(), &mut Vec::new());

        frame(&mut ctl, &[InputEvent::KeyDown { code: RIGHT }]);
        pb.update(&ctl, &floor(), &mut Vec::new());
        assert_eq!(pb.dash_timer, 0);
        assert_eq!(pb.body.vel.x, -5.0);
    }

    #[test]
    fn one_air_dash_per_airborne_period() {
        let mut pb = PlayerBody::new(PlayerTuning::default());
        let mut ctl = Controller::new();
        let mut sounds = Vec::new();
        let nothing: &[Rect] = &[];

        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, nothing, &mut sounds);
        assert!(pb.is_dashing());
        assert_eq!(pb.air_dashes, 1);

        for _ in 0..30 {
            frame(&mut ctl, &[]);
            pb.update(&ctl, nothing, &mut sounds);
        }
        frame(&mut ctl, &[InputEvent::KeyUp { code: DASH }]);
        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, nothing, &mut sounds);
        assert!(!pb.is_dashing());
        assert_eq!(sounds, vec![DASH_SOUND]);
    }

    #[test]
    fn air_dash_cannot_be_jump_cancelled() {
        let mut pb = PlayerBody::new(PlayerTuning::default());
        let mut ctl = Controller::new();
        let nothing: &[Rect] = &[];

        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, nothing, &mut Vec::new());
        frame(&mut ctl, &[InputEvent::KeyDown { code: JUMP }]);
        pb.update(&ctl, nothing, &mut Vec::new());
        assert!(pb.is_dashing());
        assert_eq!(pb.body.vel.y, 0.0);
    }

    #[test]
    fn ground_dash_jump_cancels() {
        let (mut pb, mut ctl) = grounded();
        frame(&mut ctl, &[InputEvent::KeyDown { code: DASH }]);
        pb.update(&ctl, &floor(), &mut Vec::new());

        let mut sounds = Vec::new();
        frame(&mut ctl, &[InputEvent::KeyDown { code: JUMP }]);
        pb.update(&ctl, &floor(), &mut sounds);
        assert!(!pb.is_dashing());
        assert!(pb.body.vel.y < 0.0);
        assert_eq!(sounds, vec![JUMP_SOUND]);
    }

    #[test]
    fn fall_and_vertical_intent_follow_down() {
        let (mut pb, mut ctl) = grounded();
        frame(&mut ctl, &[InputEvent::KeyDown { code: DOWN }]);
        pb.update(&ctl, &floor(), &mut Vec::new());
        assert!(pb.body.fall_through);
        assert_eq!(pb.y_dir, 1);

        frame(&mut ctl, &[InputEvent::KeyUp { code: DOWN }]);
        pb.update(&ctl, &floor(), &mut Vec::new());
        assert!(!pb.body.fall_through);
        assert_eq!(pb.y_dir, 0);
    }
}
