use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::components::sprite::AtlasId;
use crate::core::rect::Rect;

/// One blit: copy a source rect of an atlas to a screen position, 1:1.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Destination x in screen pixels.
    pub x: f32,
    /// Destination y in screen pixels.
    pub y: f32,
    /// Source rect within the atlas, in pixels.
    pub src_x: f32,
    pub src_y: f32,
    pub src_w: f32,
    pub src_h: f32,
    /// Atlas index as a float.
    pub atlas: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// The frame's draw list, in painter's order.
pub struct RenderBuffer {
    instances: Vec<RenderInstance>,
    max_instances: usize,
    dropped: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// A buffer that holds at most `max_instances` blits per frame.
    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            max_instances,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        if self.dropped > 0 {
            log::warn!(
                "render buffer full: dropped {} blits (max {})",
                self.dropped,
                self.max_instances
            );
        }
        self.instances.clear();
        self.dropped = 0;
    }

    /// Queue a blit. Blits past capacity are dropped and reported on the next clear.
    pub fn push(&mut self, instance: RenderInstance) {
        if self.instances.len() >= self.max_instances {
            self.dropped += 1;
            return;
        }
        self.instances.push(instance);
    }

    /// Blit `src` from `atlas` with its top-left corner at `dest`.
    pub fn blit(&mut self, atlas: AtlasId, src: Rect, dest: Vec2) {
        self.push(RenderInstance {
            x: dest.x,
            y: dest.y,
            src_x: src.x,
            src_y: src.y,
            src_w: src.w,
            src_h: src.h,
            atlas: atlas.0 as f32,
            alpha: 1.0,
        });
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn max_instances(&self) -> usize {
        self.max_instances
    }

    /// Instances as a flat float slice, ready to copy into the shared buffer.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
