use thiserror::Error;

/// Errors from loading game data. Simulation itself never fails; broken
/// invariants at runtime panic instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("font strip has no glyph delimiters")]
    EmptyFont,
    #[error("font strip has {found} glyphs, expected {expected}")]
    GlyphCount { found: usize, expected: usize },
    #[error("unknown zone {0:?}")]
    UnknownZone(String),
}
