use glam::Vec2;
use nanmu_engine::*;
use nanmu_engine::player::body::{DASH_SOUND, JUMP_SOUND};

const WORLD_JSON: &str = include_str!("../data/world.json");
const TUNING_JSON: &str = include_str!("../data/tuning.json");
const MANIFEST_JSON: &str = include_str!("../data/manifest.json");

const START_ZONE: &str = "town";
const START_POS: Vec2 = Vec2::new(96.0, 400.0);

/// Terrain is drawn as a grid of tiles this size.
const TILE: f32 = 32.0;
const SOLID_TILE: u32 = 0;
const PLATFORM_TILE: u32 = 1;

/// Game events for the host.
pub const EVENT_BATTLE: u32 = 1;
pub const EVENT_ZONE: u32 = 2;

const MENU_W: f32 = 320.0;
const MENU_H: f32 = 240.0;
const MENU_LINES: [&str; 10] = [
    "Ninmu Nanmu",
    "A Game About Love and Freedom",
    "",
    "=== Controls ===",
    "D-Pad: Arrow Keys",
    "Buttons: Z, X, C, V",
    "Triggers: A, S",
    "",
    "Press ENTER to open/close this screen.",
    "Close the window to exit the game.",
];

pub struct NinmuNanmu {
    world: WorldData,
    zone: Zone,
    player: Player,
    font: Option<Font>,
    show_main_menu: bool,
    show_game_menu: bool,
    /// Area of the battle region the player is standing in.
    in_battle: Option<String>,
    terrain_sheet: SpriteSheet,
}

impl NinmuNanmu {
    pub fn new() -> Self {
        let world = WorldData::from_json(WORLD_JSON).unwrap_or_else(|e| {
            log::warn!("world data rejected: {}", e);
            WorldData::default()
        });
        let tuning = PlayerTuning::from_json(TUNING_JSON).unwrap_or_else(|e| {
            log::warn!("player tuning rejected, using defaults: {}", e);
            PlayerTuning::default()
        });
        let manifest = AssetManifest::from_json(MANIFEST_JSON).unwrap_or_else(|e| {
            log::warn!("asset manifest rejected: {}", e);
            AssetManifest::default()
        });
        let registry = SheetRegistry::from_manifest(&manifest);
        if registry.sound("player_jump") != Some(JUMP_SOUND)
            || registry.sound("player_dash") != Some(DASH_SOUND)
        {
            log::warn!("manifest sound ids do not match the player's cues");
        }

        let sheet = |name: &str, fallback: SpriteSheet| {
            registry.sheet(name).unwrap_or_else(|| {
                log::warn!("no atlas named {:?}", name);
                fallback
            })
        };
        let player_sheet = sheet("player", SpriteSheet::new(AtlasId(0), 64.0, 64.0, 8));
        let bars = sheet("ui_health_bars", SpriteSheet::new(AtlasId(1), 256.0, 16.0, 1));
        let terrain_sheet = sheet("terrain", SpriteSheet::new(AtlasId(2), TILE, TILE, 4));

        let zone = Zone::new(&world, START_ZONE);
        let mut player = Player::new(tuning, player_sheet, bars);
        player.body.place(START_POS.x, START_POS.y);

        Self {
            world,
            zone,
            player,
            font: None,
            show_main_menu: true,
            show_game_menu: false,
            in_battle: None,
            terrain_sheet,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn show_main_menu(&self) -> bool {
        self.show_main_menu
    }

    pub fn show_game_menu(&self) -> bool {
        self.show_game_menu
    }

    /// Swap in another zone and drop the player at `pos`.
    fn enter_zone(&mut self, ctx: &mut EngineContext, id: &str, pos: Vec2) {
        let zone = match Zone::load(&self.world, id) {
            Ok(zone) => zone,
            Err(e) => {
                log::warn!("warp ignored: {}", e);
                return;
            }
        };
        log::debug!("zone {:?} -> {:?}", self.zone.id, zone.id);
        self.zone = zone;
        self.in_battle = None;
        self.player.body.place(pos.x, pos.y);
        self.frame_camera(ctx);
        ctx.emit_event(GameEvent::new(EVENT_ZONE, pos.x, pos.y, 0.0));
    }

    fn frame_camera(&self, ctx: &mut EngineContext) {
        match self.zone.bounds() {
            Some(b) => ctx.camera.set_bounds(b),
            None => ctx.camera.clear_bounds(),
        }
        ctx.camera.look_at(self.player.body.rect().center());
    }

    fn check_battle(&mut self, ctx: &mut EngineContext) {
        let area = self
            .zone
            .battle_at(self.player.body.rect())
            .map(|b| b.area.clone().unwrap_or_default());
        if area.is_some() && area != self.in_battle {
            let c = self.player.body.rect().center();
            log::debug!("battle {:?} at ({:.0}, {:.0})", area, c.x, c.y);
            ctx.emit_event(GameEvent::new(EVENT_BATTLE, c.x, c.y, 0.0));
        }
        self.in_battle = area;
    }

    fn check_warp(&mut self, ctx: &mut EngineContext) {
        if !ctx.controller.just_pressed(Button::U) {
            return;
        }
        let warp = self
            .zone
            .target_at(self.player.body.rect())
            .and_then(|t| t.warp.clone());
        if let Some(warp) = warp {
            self.enter_zone(ctx, &warp.zone, Vec2::new(warp.x, warp.y));
        }
    }

    fn draw_terrain(&self, ctx: &mut RenderContext) {
        let sheet = &self.terrain_sheet;
        for t in &self.zone.terrain {
            if !ctx.camera.is_visible(&t.rect) {
                continue;
            }
            let tile = sheet.source(if t.one_way { PLATFORM_TILE } else { SOLID_TILE });
            for p in t.rect.internal_coords(TILE) {
                // Edge tiles are cut to the terrain rect.
                let mut src = tile;
                src.w = src.w.min(t.rect.right() - p.x);
                src.h = src.h.min(t.rect.bottom() - p.y);
                ctx.buffer.blit(sheet.atlas, src, ctx.camera.to_screen(p));
            }
        }
    }

    fn draw_main_menu(&self, ctx: &mut RenderContext) {
        let Some(font) = &self.font else {
            return;
        };
        let x = (ctx.camera.width - MENU_W) / 2.0 + 5.0;
        let mut y = (ctx.camera.height - MENU_H) / 2.0 + 2.0;
        for line in MENU_LINES {
            font.render_block(line, MENU_W - 10.0, Vec2::new(x, y), ctx.buffer);
            y += font.height();
        }
    }

    fn draw_game_menu(&self, ctx: &mut RenderContext) {
        let Some(font) = &self.font else {
            return;
        };
        let keys = format!("Keys: {}", self.player.keys.join(", "));
        font.render_block(&keys, 128.0, Vec2::new(40.0, 40.0), ctx.buffer);
    }
}

impl Default for NinmuNanmu {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for NinmuNanmu {
    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.camera.set_smoothing(0.8);
        self.frame_camera(ctx);
        log::info!(
            "world: {} terrain, {} battles, {} targets",
            self.world.terrain.len(),
            self.world.battles.len(),
            self.world.targets.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext) {
        if ctx.controller.just_pressed(Button::Start) {
            self.show_main_menu = !self.show_main_menu;
        }
        if self.show_main_menu {
            return;
        }

        if self.show_game_menu {
            if ctx.controller.just_pressed(Button::Y) {
                self.show_game_menu = false;
            }
            return;
        }

        self.player.update(&ctx.controller, &self.zone.terrain, &mut ctx.sounds);
        self.check_battle(ctx);
        self.check_warp(ctx);
        ctx.camera.follow(self.player.body.rect().center());

        if ctx.controller.just_pressed(Button::Y) {
            self.show_game_menu = true;
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        self.draw_terrain(ctx);
        self.player.draw(ctx);
        self.player.draw_status(ctx);

        if self.show_game_menu {
            self.draw_game_menu(ctx);
        }
        if self.show_main_menu {
            self.draw_main_menu(ctx);
        }
    }

    fn load_font(&mut self, font: Font) {
        self.font = Some(font);
    }
}
