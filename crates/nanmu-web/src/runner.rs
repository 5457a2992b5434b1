use nanmu_engine::{
    AtlasId, Clock, Font, Game, GameConfig, InputEvent, Runnable, Scheduler, Session, StepKind,
};

/// Wall clock for the browser. Frames are paced by `requestAnimationFrame`,
/// so waiting is a no-op.
///
/// Reads `performance.now()` when the page exposes it, `Date.now()` otherwise
/// (e.g. inside a worker without a window).
pub struct WebClock;

impl Clock for WebClock {
    fn now_ms(&mut self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map_or_else(js_sys::Date::now, |p| p.now())
    }

    fn wait_ms(&mut self, _ms: f64) {}
}

/// Generic game runner that wires a game session to the scheduler.
///
/// Each concrete game keeps a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly. One browser frame is one scheduler iteration.
pub struct GameRunner<G: Game, C: Clock = WebClock> {
    session: Session<G>,
    scheduler: Scheduler,
    clock: C,
    last_frame: Option<f64>,
}

impl<G: Game> GameRunner<G, WebClock> {
    pub fn new(game: G) -> Self {
        Self::with_clock(game, WebClock)
    }
}

impl<G: Game, C: Clock> GameRunner<G, C> {
    pub fn with_clock(game: G, clock: C) -> Self {
        let session = Session::new(game);
        let scheduler = Scheduler::new(session.config().fps);
        Self {
            session,
            scheduler,
            clock,
            last_frame: None,
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.session.push_input(event);
    }

    /// Run one loop iteration with a host-measured frame delta.
    pub fn tick(&mut self, dt_ms: f64) -> Option<StepKind> {
        if !self.session.is_running() {
            return None;
        }
        self.scheduler.tick(dt_ms, &mut self.session)
    }

    /// Run one loop iteration, measuring the delta with the runner's clock.
    /// The first call only starts the clock.
    pub fn frame(&mut self) -> Option<StepKind> {
        let now = self.clock.now_ms();
        let dt = self.last_frame.map_or(0.0, |prev| now - prev);
        self.last_frame = Some(now);
        self.tick(dt)
    }

    /// Build a font from the top pixel row of a font strip and hand it to the game.
    pub fn load_font(&mut self, atlas: u32, top_row: &[u32], height: f32) {
        match Font::from_strip(AtlasId(atlas), top_row, height) {
            Ok(font) => self.session.game_mut().load_font(font),
            Err(e) => log::warn!("font for atlas {} rejected: {}", atlas, e),
        }
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub fn session(&self) -> &Session<G> {
        &self.session
    }

    fn config(&self) -> &GameConfig {
        self.session.config()
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.session.frame_buffer().as_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.session.render_buffer().instance_count()
    }

    pub fn world_width(&self) -> f32 {
        self.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config().world_height
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.session.frame_buffer().layout().max_instances as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.session.frame_buffer().layout().max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.session.frame_buffer().layout().max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.session.frame_buffer().layout().buffer_total_floats as u32
    }
}
