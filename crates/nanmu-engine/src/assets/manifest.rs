use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Asset manifest describing the atlases and sounds a game uses.
/// Loaded from a JSON file at runtime; the host loads the same file to know
/// which images and audio to fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Texture atlases. Position in this list is the atlas id.
    #[serde(default)]
    pub atlases: Vec<AtlasDescriptor>,
    /// Sound cues by name.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// A texture atlas cut into a grid of equal tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasDescriptor {
    /// Human-readable name (e.g., "player").
    pub name: String,
    /// Relative path to the PNG file.
    pub path: String,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Number of tile columns (default: 1).
    #[serde(default = "default_cols")]
    pub cols: u32,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    pub event_id: u32,
}

fn default_cols() -> u32 {
    1
}

impl AssetManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }
}
