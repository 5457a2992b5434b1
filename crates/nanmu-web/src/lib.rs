pub mod runner;

pub use runner::{GameRunner, WebClock};

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_frame/game_tick, input
///   handlers, font loading, shared buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use nanmu_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// nanmu_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `nanmu_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            log::info!("{}: initialized", $game_name);
        }

        /// One loop iteration timed by the runner's own clock.
        #[wasm_bindgen]
        pub fn game_frame() {
            with_runner(|r| {
                r.frame();
            });
        }

        /// One loop iteration with a host-measured delta in milliseconds.
        #[wasm_bindgen]
        pub fn game_tick(dt_ms: f64) {
            with_runner(|r| {
                r.tick(dt_ms);
            });
        }

        #[wasm_bindgen]
        pub fn game_is_running() -> bool {
            with_runner(|r| r.is_running())
        }

        #[wasm_bindgen]
        pub fn game_key_down(code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { code }));
        }

        #[wasm_bindgen]
        pub fn game_button_down(button: u32) {
            with_runner(|r| r.push_input(InputEvent::ButtonDown { button }));
        }

        #[wasm_bindgen]
        pub fn game_button_up(button: u32) {
            with_runner(|r| r.push_input(InputEvent::ButtonUp { button }));
        }

        #[wasm_bindgen]
        pub fn game_hat_motion(x: i32, y: i32) {
            let (x, y) = (x.signum() as i8, y.signum() as i8);
            with_runner(|r| r.push_input(InputEvent::HatMotion { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_quit() {
            with_runner(|r| r.push_input(InputEvent::Quit));
        }

        #[wasm_bindgen]
        pub fn game_load_font(atlas: u32, top_row: &[u32], height: f32) {
            with_runner(|r| r.load_font(atlas, top_row, height));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
