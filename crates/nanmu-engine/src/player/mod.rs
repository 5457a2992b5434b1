//! The playable character: kinematics, sprite and health, updated together.

pub mod body;
pub mod sprite;
pub mod status;

use crate::api::game::RenderContext;
use crate::api::types::SoundEvent;
use crate::components::sprite::SpriteSheet;
use crate::core::body::Solid;
use crate::input::controller::Controller;

use self::body::{PlayerBody, PlayerTuning};
use self::sprite::PlayerSprite;
use self::status::PlayerStatus;

/// Starting (and maximum) health.
pub const MAX_HEALTH: f32 = 1000.0;

/// Ticks of invulnerability after a hit.
pub const HIT_FLASH_TICKS: u32 = 60;

/// Stun added per point of damage.
const STUN_PER_DAMAGE: f32 = 10.0;

/// Stun recovered per tick.
const STUN_DECAY: f32 = 0.1;

/// Something the player can pick up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pickup {
    /// Opens doors configured with the same name.
    Key(String),
}

pub struct Player {
    pub body: PlayerBody,
    pub sprite: PlayerSprite,
    pub status: PlayerStatus,
    pub health: f32,
    pub damage: f32,
    pub stun: f32,
    pub keys: Vec<String>,
}

impl Player {
    pub fn new(tuning: PlayerTuning, sheet: SpriteSheet, bars: SpriteSheet) -> Self {
        let body = PlayerBody::new(tuning);
        let sprite = PlayerSprite::new(sheet, &body);
        Self {
            body,
            sprite,
            status: PlayerStatus::new(bars),
            health: MAX_HEALTH,
            damage: 0.0,
            stun: 0.0,
            keys: vec!["default".to_string()],
        }
    }

    pub fn update<S: Solid>(&mut self, ctl: &Controller, terrain: &[S], sounds: &mut Vec<SoundEvent>) {
        self.body.update(ctl, terrain, sounds);
        self.sprite.update(&self.body);
        self.status.update(self.health, self.damage, self.stun);

        if self.stun > 0.0 {
            self.stun = (self.stun - STUN_DECAY).max(0.0);
        }
    }

    /// Apply a hit unless still flashing from the last one.
    pub fn take_damage(&mut self, n: f32) {
        if self.sprite.sprite.flashing != 0 {
            return;
        }
        self.damage = (self.damage + n).min(self.health);
        self.stun = (self.stun + n * STUN_PER_DAMAGE).min(self.health - self.damage);
        self.sprite.sprite.flashing = HIT_FLASH_TICKS;
        log::debug!("player hit for {}: damage {}, stun {}", n, self.damage, self.stun);
    }

    /// Touching enemies hurts them while this is true.
    pub fn is_dangerous(&self) -> bool {
        self.body.is_dashing()
    }

    pub fn collect(&mut self, pickup: Pickup) {
        match pickup {
            Pickup::Key(name) => self.keys.push(name),
        }
    }

    pub fn has_key(&self, name: &str) -> bool {
        self.keys.iter().any(|k| k == name)
    }

    pub fn draw(&self, ctx: &mut RenderContext) {
        self.sprite.draw(ctx);
    }

    pub fn draw_status(&self, ctx: &mut RenderContext) {
        self.status.draw(ctx);
    }
}
