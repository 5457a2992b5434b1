//! Tick-driven sprite animation.
//!
//! An [`Animation`] is a fixed cycle of tile indices; an [`Animator`] holds a
//! closed set of them keyed by the entity's own animation enum and tracks
//! which one is playing.

use std::collections::HashMap;
use std::hash::Hash;

/// A cyclic sequence of sheet tiles, advancing one frame every `rate` ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<u32>,
    rate: u32,
}

impl Animation {
    /// Default ticks per frame.
    pub const DEFAULT_RATE: u32 = 6;

    pub fn new(frames: Vec<u32>, rate: u32) -> Self {
        assert!(!frames.is_empty(), "animation needs at least one frame");
        assert!(rate > 0, "animation rate must be positive");
        Self { frames, rate }
    }

    /// `length` consecutive tiles starting at `start`.
    pub fn strip(start: u32, length: u32, rate: u32) -> Self {
        Self::new((start..start + length).collect(), rate)
    }

    /// A single tile.
    pub fn still(tile: u32) -> Self {
        Self::new(vec![tile], Self::DEFAULT_RATE)
    }

    pub fn frames(&self) -> &[u32] {
        &self.frames
    }

    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Ticks before the cycle repeats.
    pub fn period(&self) -> u64 {
        self.rate as u64 * self.frames.len() as u64
    }

    /// Tile shown after `ticks` ticks of playback.
    pub fn frame_at(&self, ticks: u64) -> u32 {
        let idx = (ticks / self.rate as u64) % self.frames.len() as u64;
        self.frames[idx as usize]
    }
}

/// Named animations plus playback state.
#[derive(Debug, Clone)]
pub struct Animator<K> {
    animations: HashMap<K, Animation>,
    current: K,
    ticks: u64,
    frame: u32,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> Animator<K> {
    /// Start with a single animation, already selected.
    pub fn new(key: K, animation: Animation) -> Self {
        let frame = animation.frame_at(0);
        let mut animations = HashMap::new();
        animations.insert(key, animation);
        Self {
            animations,
            current: key,
            ticks: 0,
            frame,
        }
    }

    pub fn add(&mut self, key: K, animation: Animation) {
        self.animations.insert(key, animation);
    }

    pub fn contains(&self, key: K) -> bool {
        self.animations.contains_key(&key)
    }

    /// Switch animations. Selecting the one already playing keeps its tick
    /// count; selecting another restarts from tick 0.
    ///
    /// Panics if `key` was never added.
    pub fn select(&mut self, key: K) {
        if key == self.current {
            return;
        }
        let Some(animation) = self.animations.get(&key) else {
            panic!("animation {:?} was never added", key);
        };
        self.frame = animation.frame_at(0);
        self.current = key;
        self.ticks = 0;
    }

    /// Advance one tick and refresh the current frame.
    pub fn tick(&mut self) {
        self.ticks += 1;
        self.frame = self.animations[&self.current].frame_at(self.ticks);
    }

    pub fn current(&self) -> K {
        self.current
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Tile to draw this frame.
    pub fn frame(&self) -> u32 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Anim {
        Idle,
        Walk,
        Missing,
    }

    #[test]
    fn strip_builds_consecutive_frames() {
        let a = Animation::strip(7, 4, 6);
        assert_eq!(a.frames(), &[7, 8, 9, 10]);
        assert_eq!(a.period(), 24);
    }

    #[test]
    fn frame_at_divides_then_wraps() {
        let a = Animation::strip(0, 3, 4);
        assert_eq!(a.frame_at(0), 0);
        assert_eq!(a.frame_at(3), 0);
        assert_eq!(a.frame_at(4), 1);
        assert_eq!(a.frame_at(11), 2);
        assert_eq!(a.frame_at(12), 0);
    }

    #[test]
    fn frame_selection_is_periodic() {
        let a = Animation::new(vec![5, 1, 9, 9, 2], 3);
        for t in 0..200 {
            assert_eq!(a.frame_at(t), a.frame_at(t + a.period()));
        }
    }

    #[test]
    fn tick_advances_frames() {
        let mut anim = Animator::new(Anim::Walk, Animation::strip(0, 2, 2));
        assert_eq!(anim.frame(), 0);
        anim.tick();
        assert_eq!(anim.frame(), 0);
        anim.tick();
        assert_eq!(anim.frame(), 1);
        anim.tick();
        anim.tick();
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn reselecting_current_keeps_ticks() {
        let mut anim = Animator::new(Anim::Idle, Animation::strip(0, 4, 1));
        anim.add(Anim::Walk, Animation::strip(10, 4, 1));

        anim.tick();
        anim.tick();
        anim.select(Anim::Idle);
        assert_eq!(anim.ticks(), 2);
        assert_eq!(anim.frame(), 2);

        anim.select(Anim::Walk);
        assert_eq!(anim.current(), Anim::Walk);
        assert_eq!(anim.ticks(), 0);
        assert_eq!(anim.frame(), 10);
    }

    #[test]
    #[should_panic(expected = "never added")]
    fn selecting_unknown_animation_panics() {
        let mut anim = Animator::new(Anim::Idle, Animation::still(0));
        anim.select(Anim::Missing);
    }
}
