pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod player;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext, Session};
pub use api::types::{SoundEvent, GameEvent};
pub use components::animation::{Animation, Animator};
pub use components::sprite::{AtlasId, Sprite, SpriteSheet};
pub use core::body::{Blocked, Body, Solid};
pub use core::rect::Rect;
pub use core::time::{run, run_until, Clock, Runnable, Scheduler, StepKind, SystemClock};
pub use core::zone::{Battle, Target, Terrain, Warp, WorldData, Zone};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::Camera;
pub use input::controller::{Action, ActionMap, Bindings, Button, Controller};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SheetRegistry;
pub use bridge::protocol::{FrameBuffer, ProtocolLayout};
pub use systems::text::Font;
pub use player::{Pickup, Player};
pub use player::body::{Facing, PlayerBody, PlayerTuning};
pub use player::sprite::{PlayerAnim, PlayerSprite};
pub use error::EngineError;
