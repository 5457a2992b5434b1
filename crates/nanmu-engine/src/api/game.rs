use crate::api::types::{GameEvent, SoundEvent};
use crate::bridge::protocol::FrameBuffer;
use crate::core::time::Runnable;
use crate::input::controller::Controller;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::Camera;
use crate::renderer::instance::RenderBuffer;
use crate::systems::text::Font;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Simulation rate (default: 60).
    pub fps: f64,
    /// View width in pixels.
    pub world_width: f32,
    /// View height in pixels.
    pub world_height: f32,
    /// Maximum number of blits per frame (default: 1024).
    pub max_instances: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 60.0,
            world_width: 640.0,
            world_height: 480.0,
            max_instances: 1024,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Load data, spawn the player, place the camera.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One simulation tick. The controller has already consumed this frame's input.
    fn update(&mut self, ctx: &mut EngineContext);

    /// Draw the current state. Read-only: everything was settled in `update`.
    fn render(&self, ctx: &mut RenderContext);

    /// The host finished loading a font strip.
    fn load_font(&mut self, _font: Font) {}
}

/// Mutable engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub controller: Controller,
    pub input: InputQueue,
    pub camera: Camera,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    /// Updates run so far.
    pub ticks: u64,
    running: bool,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            controller: Controller::new(),
            input: InputQueue::new(),
            camera: Camera::new(config.world_width, config.world_height),
            sounds: Vec::new(),
            events: Vec::new(),
            ticks: 0,
            running: true,
        }
    }

    /// Emit a sound event to be played by the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        self.sounds.push(event);
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Stop the run loop after the current iteration.
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

/// What a game draws with.
pub struct RenderContext<'a> {
    pub camera: &'a Camera,
    pub buffer: &'a mut RenderBuffer,
}

/// A game plus everything the engine keeps for it. This is what the
/// scheduler drives.
pub struct Session<G: Game> {
    game: G,
    ctx: EngineContext,
    config: GameConfig,
    render_buffer: RenderBuffer,
    frame: FrameBuffer,
}

impl<G: Game> Session<G> {
    pub fn new(mut game: G) -> Self {
        let config = game.config();
        let mut ctx = EngineContext::new(&config);
        game.init(&mut ctx);
        log::info!(
            "session started: {}x{} at {} fps",
            config.world_width,
            config.world_height,
            config.fps
        );
        Self {
            game,
            ctx,
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            frame: FrameBuffer::new(&config),
            config,
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.ctx.input.push(event);
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Input first, then game logic.
    fn update(&mut self) {
        if self.ctx.input.quit_requested() {
            log::info!("quit requested");
            self.ctx.quit();
        }
        self.ctx.controller.update(&mut self.ctx.input);
        self.game.update(&mut self.ctx);
        self.ctx.ticks += 1;
    }

    fn render(&mut self) {
        self.render_buffer.clear();
        let mut rc = RenderContext {
            camera: &self.ctx.camera,
            buffer: &mut self.render_buffer,
        };
        self.game.render(&mut rc);
    }
}

impl<G: Game> Runnable for Session<G> {
    fn step(&mut self) {
        self.update();
        self.render();
    }

    fn fast_step(&mut self) {
        self.update();
    }

    fn present(&mut self) {
        self.frame.write(
            self.ctx.ticks,
            self.render_buffer.instances(),
            &self.ctx.sounds,
            &self.ctx.events,
        );
        self.ctx.clear_frame_data();
    }

    fn is_running(&self) -> bool {
        self.ctx.is_running()
    }
}
