use std::hash::Hash;

use glam::Vec2;

use crate::api::game::RenderContext;
use crate::components::animation::{Animation, Animator};
use crate::core::rect::Rect;

/// Identifies a texture atlas. Index into the asset manifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// A grid of equally sized tiles in one atlas, numbered row-major from 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub atlas: AtlasId,
    pub tile_width: f32,
    pub tile_height: f32,
    pub cols: u32,
}

impl SpriteSheet {
    pub fn new(atlas: AtlasId, tile_width: f32, tile_height: f32, cols: u32) -> Self {
        assert!(cols > 0, "sprite sheet needs at least one column");
        Self {
            atlas,
            tile_width,
            tile_height,
            cols,
        }
    }

    /// Source rect of `tile` within the atlas.
    pub fn source(&self, tile: u32) -> Rect {
        let col = (tile % self.cols) as f32;
        let row = (tile / self.cols) as f32;
        Rect::new(
            col * self.tile_width,
            row * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }
}

/// An animated, drawable rect.
///
/// `rect` is the sprite's bounds in world space; frames are drawn centered
/// inside it, so bounds may be smaller or larger than a tile.
#[derive(Debug, Clone)]
pub struct Sprite<K> {
    pub rect: Rect,
    pub sheet: SpriteSheet,
    pub anim: Animator<K>,
    /// Blink countdown after taking a hit; odd values skip drawing.
    pub flashing: u32,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> Sprite<K> {
    /// A sprite sized to one tile, playing `animation` under `key`.
    pub fn new(sheet: SpriteSheet, key: K, animation: Animation) -> Self {
        Self {
            rect: Rect::from_size(sheet.tile_width, sheet.tile_height),
            sheet,
            anim: Animator::new(key, animation),
            flashing: 0,
        }
    }

    /// Advance one frame.
    pub fn update(&mut self) {
        self.anim.tick();
        if self.flashing > 0 {
            self.flashing -= 1;
        }
    }

    pub fn visible(&self) -> bool {
        self.flashing % 2 == 0
    }

    /// Screen position the current frame would be drawn at.
    pub fn screen_pos(&self, camera_offset: Vec2) -> Vec2 {
        let dx = ((self.rect.w - self.sheet.tile_width) / 2.0).floor();
        let dy = ((self.rect.h - self.sheet.tile_height) / 2.0).floor();
        Vec2::new(self.rect.x + dx, self.rect.y + dy) - camera_offset
    }

    pub fn draw(&self, ctx: &mut RenderContext) {
        if !self.visible() {
            return;
        }
        let src = self.sheet.source(self.anim.frame());
        let dest = self.screen_pos(ctx.camera.offset);
        ctx.buffer.blit(self.sheet.atlas, src, dest);
    }
}
