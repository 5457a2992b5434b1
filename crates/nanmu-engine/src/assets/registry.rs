use std::collections::HashMap;
use crate::api::types::SoundEvent;
use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{AtlasId, SpriteSheet};

/// Name-based lookup of sprite sheets and sound cues, built from an
/// AssetManifest. Lookups are deterministic per name, so callers may cache
/// what they get back.
pub struct SheetRegistry {
    sheets: HashMap<String, SpriteSheet>,
    sounds: HashMap<String, SoundEvent>,
}

impl SheetRegistry {
    pub fn new() -> Self {
        Self {
            sheets: HashMap::new(),
            sounds: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let sheets = manifest
            .atlases
            .iter()
            .enumerate()
            .map(|(i, desc)| {
                let sheet = SpriteSheet::new(
                    AtlasId(i as u32),
                    desc.tile_width as f32,
                    desc.tile_height as f32,
                    desc.cols.max(1),
                );
                (desc.name.clone(), sheet)
            })
            .collect();
        let sounds = manifest
            .sounds
            .iter()
            .map(|(name, desc)| (name.clone(), SoundEvent(desc.event_id)))
            .collect();
        Self { sheets, sounds }
    }

    /// Look up a sheet by atlas name. Returns None if not found.
    pub fn sheet(&self, name: &str) -> Option<SpriteSheet> {
        self.sheets.get(name).copied()
    }

    /// Look up a sound cue by name. Returns None if not found.
    pub fn sound(&self, name: &str) -> Option<SoundEvent> {
        self.sounds.get(name).copied()
    }
}

impl Default for SheetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_manifest() {
        let json = r#"{
            "atlases": [
                { "name": "ui", "path": "ui.png", "tile_width": 256, "tile_height": 16 },
                { "name": "player", "path": "player.png", "tile_width": 64, "tile_height": 64, "cols": 8 }
            ],
            "sounds": { "jump": { "path": "jump.wav", "event_id": 0 } }
        }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        let reg = SheetRegistry::from_manifest(&manifest);

        let player = reg.sheet("player").expect("player should exist");
        assert_eq!(player.atlas, AtlasId(1));
        assert_eq!(player.cols, 8);
        assert_eq!(player.source(9).x, 64.0);
        assert_eq!(reg.sound("jump"), Some(SoundEvent(0)));
    }

    #[test]
    fn unknown_returns_none() {
        let reg = SheetRegistry::new();
        assert!(reg.sheet("nonexistent").is_none());
        assert!(reg.sound("nonexistent").is_none());
    }
}
