/// Shared frame buffer layout.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Instances: max_instances × 8 floats]
/// [Sounds: max_sounds × 1 float]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::{GameEvent, SoundEvent};
use crate::renderer::instance::RenderInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices. Slots 0 and 11 are reserved and always zero.
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_WORLD_WIDTH: usize = 4;
pub const HEADER_WORLD_HEIGHT: usize = 5;
pub const HEADER_MAX_SOUNDS: usize = 6;
pub const HEADER_SOUND_COUNT: usize = 7;
pub const HEADER_MAX_EVENTS: usize = 8;
pub const HEADER_EVENT_COUNT: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, fixed).
pub const INSTANCE_FLOATS: usize = RenderInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum sound events per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_sounds: usize, max_events: usize) -> Self {
        let instance_data_offset = HEADER_FLOATS;
        let sound_data_offset = instance_data_offset + max_instances * INSTANCE_FLOATS;
        let event_data_offset = sound_data_offset + max_sounds;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_instances,
            max_sounds,
            max_events,
            instance_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_sounds, config.max_events)
    }
}

/// The flat float buffer the host reads each frame.
pub struct FrameBuffer {
    layout: ProtocolLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(config: &GameConfig) -> Self {
        let layout = ProtocolLayout::from_config(config);
        let mut data = vec![0.0; layout.buffer_total_floats];
        data[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        data[HEADER_WORLD_WIDTH] = config.world_width;
        data[HEADER_WORLD_HEIGHT] = config.world_height;
        data[HEADER_MAX_SOUNDS] = layout.max_sounds as f32;
        data[HEADER_MAX_EVENTS] = layout.max_events as f32;
        data[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        Self { layout, data }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }

    /// Copy one frame's output into the buffer. Anything past a section's
    /// capacity is dropped.
    pub fn write(
        &mut self,
        frame: u64,
        instances: &[RenderInstance],
        sounds: &[SoundEvent],
        events: &[GameEvent],
    ) {
        let l = &self.layout;

        let n_inst = instances.len().min(l.max_instances);
        let src: &[f32] = bytemuck::cast_slice(&instances[..n_inst]);
        let start = l.instance_data_offset;
        self.data[start..start + src.len()].copy_from_slice(src);

        let n_sounds = sounds.len().min(l.max_sounds);
        for (i, s) in sounds[..n_sounds].iter().enumerate() {
            self.data[l.sound_data_offset + i] = s.0 as f32;
        }
        if n_sounds < sounds.len() {
            log::warn!("frame {}: dropped {} sound events", frame, sounds.len() - n_sounds);
        }

        let n_events = events.len().min(l.max_events);
        let src: &[f32] = bytemuck::cast_slice(&events[..n_events]);
        let start = l.event_data_offset;
        self.data[start..start + src.len()].copy_from_slice(src);
        if n_events < events.len() {
            log::warn!("frame {}: dropped {} game events", frame, events.len() - n_events);
        }

        self.data[HEADER_FRAME_COUNTER] = frame as f32;
        self.data[HEADER_INSTANCE_COUNT] = n_inst as f32;
        self.data[HEADER_SOUND_COUNT] = n_sounds as f32;
        self.data[HEADER_EVENT_COUNT] = n_events as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_instances, 1024);
        assert_eq!(layout.max_sounds, 32);
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.instance_data_offset, 12);
        assert_eq!(layout.sound_data_offset, 12 + 1024 * 8);
        assert_eq!(layout.event_data_offset, 12 + 1024 * 8 + 32);
        assert_eq!(layout.buffer_total_floats, 12 + 1024 * 8 + 32 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 10, 20);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.sound_data_offset, layout.instance_data_offset + 100 * INSTANCE_FLOATS);
        assert_eq!(layout.event_data_offset, layout.sound_data_offset + 10);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + 20 * EVENT_FLOATS);
    }

    #[test]
    fn reserved_header_slots_stay_zero() {
        let mut buf = FrameBuffer::new(&GameConfig::default());
        buf.write(7, &[RenderInstance::default()], &[SoundEvent(1)], &[]);
        let h = buf.as_slice();
        assert_eq!(h[0], 0.0);
        assert_eq!(h[HEADER_FLOATS - 1], 0.0);
        assert_eq!(h[HEADER_FRAME_COUNTER], 7.0);
    }

    #[test]
    fn header_carries_capacities() {
        let config = GameConfig::default();
        let buf = FrameBuffer::new(&config);
        let h = buf.as_slice();
        assert_eq!(h[HEADER_MAX_INSTANCES], 1024.0);
        assert_eq!(h[HEADER_WORLD_WIDTH], 640.0);
        assert_eq!(h[HEADER_WORLD_HEIGHT], 480.0);
        assert_eq!(h[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
    }

    #[test]
    fn write_packs_sections_and_counts() {
        let config = GameConfig {
            max_instances: 2,
            max_sounds: 1,
            max_events: 4,
            ..GameConfig::default()
        };
        let mut buf = FrameBuffer::new(&config);
        let inst = RenderInstance { x: 5.0, alpha: 1.0, ..Default::default() };
        buf.write(
            7,
            &[inst, inst, inst],
            &[SoundEvent(3), SoundEvent(4)],
            &[GameEvent::new(9, 1.0, 2.0, 3.0)],
        );

        let l = buf.layout().clone();
        let d = buf.as_slice();
        assert_eq!(d[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(d[HEADER_INSTANCE_COUNT], 2.0);
        assert_eq!(d[HEADER_SOUND_COUNT], 1.0);
        assert_eq!(d[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(d[l.instance_data_offset], 5.0);
        assert_eq!(d[l.instance_data_offset + INSTANCE_FLOATS], 5.0);
        assert_eq!(d[l.sound_data_offset], 3.0);
        assert_eq!(&d[l.event_data_offset..l.event_data_offset + 4], &[9.0, 1.0, 2.0, 3.0]);
    }
}
