use glam::Vec2;

use crate::api::game::RenderContext;
use crate::components::sprite::SpriteSheet;
use crate::core::rect::Rect;

/// Bar width in pixels; a full bar is this wide.
pub const BAR_WIDTH: f32 = 256.0;

/// Distance from the left and bottom of the view.
const MARGIN: f32 = 8.0;

/// Tiles of the health bar sheet, one bar per row.
const BLANK_BAR: u32 = 0;
const FULL_BAR: u32 = 1;
const STUN_BAR: u32 = 2;

/// Health readout: an empty track, the stun bar over it, and the
/// remaining-health bar on top.
#[derive(Debug, Clone)]
pub struct PlayerStatus {
    sheet: SpriteSheet,
    /// Health left once damage is counted.
    pub stun_fraction: f32,
    /// Health left once damage and stun are counted.
    pub full_fraction: f32,
}

impl PlayerStatus {
    pub fn new(sheet: SpriteSheet) -> Self {
        Self {
            sheet,
            stun_fraction: 1.0,
            full_fraction: 1.0,
        }
    }

    pub fn update(&mut self, health: f32, damage: f32, stun: f32) {
        self.stun_fraction = (health - damage) / health;
        self.full_fraction = (health - (stun + damage)) / health;
    }

    pub fn draw(&self, ctx: &mut RenderContext) {
        let pos = Vec2::new(MARGIN, ctx.camera.height - (self.sheet.tile_height + MARGIN));
        let atlas = self.sheet.atlas;

        ctx.buffer.blit(atlas, self.sheet.source(BLANK_BAR), pos);
        ctx.buffer.blit(atlas, self.bar(STUN_BAR, self.stun_fraction), pos);
        ctx.buffer.blit(atlas, self.bar(FULL_BAR, self.full_fraction), pos);
    }

    /// Source rect of `tile`, cut to `fraction` of its width.
    fn bar(&self, tile: u32, fraction: f32) -> Rect {
        let mut src = self.sheet.source(tile);
        src.w = (src.w * fraction.clamp(0.0, 1.0)).floor();
        src
    }
}
