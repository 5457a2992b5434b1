use bytemuck::{Pod, Zeroable};

/// A sound cue emitted by game logic.
/// The numeric value maps to a sound in the asset manifest; the host plays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event handed from Rust to the host through the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32, b: f32, c: f32) -> Self {
        Self {
            kind: kind as f32,
            a,
            b,
            c,
        }
    }
}
