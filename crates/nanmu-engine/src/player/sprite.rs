use crate::api::game::RenderContext;
use crate::components::animation::Animation;
use crate::components::sprite::{Sprite, SpriteSheet};
use crate::player::body::{Facing, PlayerBody};

/// Tile offset of the mirrored (left-facing) half of the player sheet.
pub const MIRROR_OFFSET: u32 = 32;

/// Vertical speed past which the airborne pose switches to rising or falling.
const AIR_POSE_THRESHOLD: f32 = 2.0;

/// Horizontal speed past which a grounded body counts as moving.
const RUN_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAnim {
    StandR,
    RunR,
    SkidR,
    DashR,
    RiseR,
    FloatR,
    FallR,
    StandL,
    RunL,
    SkidL,
    DashL,
    RiseL,
    FloatL,
    FallL,
}

impl PlayerAnim {
    pub const ALL: [PlayerAnim; 14] = [
        PlayerAnim::StandR,
        PlayerAnim::RunR,
        PlayerAnim::SkidR,
        PlayerAnim::DashR,
        PlayerAnim::RiseR,
        PlayerAnim::FloatR,
        PlayerAnim::FallR,
        PlayerAnim::StandL,
        PlayerAnim::RunL,
        PlayerAnim::SkidL,
        PlayerAnim::DashL,
        PlayerAnim::RiseL,
        PlayerAnim::FloatL,
        PlayerAnim::FallL,
    ];

    /// First tile and frame count on the player sheet.
    fn strip(self) -> (u32, u32) {
        use PlayerAnim::*;
        let (start, len) = match self {
            StandR | StandL => (0, 1),
            RunR | RunL => (1, 6),
            SkidR | SkidL => (7, 1),
            DashR | DashL => (8, 1),
            RiseR | RiseL => (16, 1),
            FloatR | FloatL => (17, 1),
            FallR | FallL => (18, 1),
        };
        match self {
            StandL | RunL | SkidL | DashL | RiseL | FloatL | FallL => (start + MIRROR_OFFSET, len),
            _ => (start, len),
        }
    }

    pub fn animation(self) -> Animation {
        let (start, len) = self.strip();
        Animation::strip(start, len, Animation::DEFAULT_RATE)
    }
}

/// Pick the pose for the body's current state.
///
/// Dashing wins, then grounded run/skid/stand, then the airborne arc. Skid is
/// a grounded body still sliding against its input.
pub fn choose_animation(body: &PlayerBody) -> PlayerAnim {
    use PlayerAnim::*;
    let right = body.facing == Facing::Right;
    let vel = body.body.vel;

    if body.is_dashing() {
        return if right { DashR } else { DashL };
    }

    if body.grounded() {
        return if vel.x > RUN_THRESHOLD {
            if body.x_dir > 0 { RunR } else { SkidR }
        } else if vel.x < -RUN_THRESHOLD {
            if body.x_dir < 0 { RunL } else { SkidL }
        } else if right {
            StandR
        } else {
            StandL
        };
    }

    match (vel.y < -AIR_POSE_THRESHOLD, vel.y > AIR_POSE_THRESHOLD, right) {
        (true, _, true) => RiseR,
        (true, _, false) => RiseL,
        (_, true, true) => FallR,
        (_, true, false) => FallL,
        (_, _, true) => FloatR,
        (_, _, false) => FloatL,
    }
}

/// The player's sprite, tracking its body.
#[derive(Debug, Clone)]
pub struct PlayerSprite {
    pub sprite: Sprite<PlayerAnim>,
}

impl PlayerSprite {
    /// `sheet` holds the right-facing frames first and their mirror images
    /// [`MIRROR_OFFSET`] tiles later.
    pub fn new(sheet: SpriteSheet, body: &PlayerBody) -> Self {
        let first = choose_animation(body);
        let mut sprite = Sprite::new(sheet, first, first.animation());
        for anim in PlayerAnim::ALL {
            sprite.anim.add(anim, anim.animation());
        }
        sprite.rect.set_size(body.rect().size());
        sprite.rect.move_to(body.rect());
        Self { sprite }
    }

    pub fn update(&mut self, body: &PlayerBody) {
        self.sprite.update();
        self.sprite.rect.move_to(body.rect());
        self.sprite.anim.select(choose_animation(body));
    }

    pub fn current(&self) -> PlayerAnim {
        self.sprite.anim.current()
    }

    pub fn draw(&self, ctx: &mut RenderContext) {
        self.sprite.draw(ctx);
    }
}
