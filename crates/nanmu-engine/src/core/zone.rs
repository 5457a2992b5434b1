//! World model: terrain, battle triggers and interactable targets, grouped
//! into zones.
//!
//! [`WorldData`] holds the game-wide lists. A [`Zone`] is a disposable slice of
//! them, built on every zone transition and dropped on the next one.

use serde::{Deserialize, Serialize};

use crate::core::body::Solid;
use crate::core::rect::Rect;
use crate::error::EngineError;

/// Static level geometry. A single piece may be one tile or a whole level;
/// the engine treats each piece as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    #[serde(flatten)]
    pub rect: Rect,
    pub zone: String,
    /// Opaque reference back to the content that placed this piece.
    #[serde(default)]
    pub area: Option<String>,
    /// Only blocks bodies landing on it from above.
    #[serde(default)]
    pub one_way: bool,
}

impl Solid for Terrain {
    fn rect(&self) -> &Rect {
        &self.rect
    }

    fn one_way(&self) -> bool {
        self.one_way
    }
}

/// A region that starts a battle when entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    #[serde(flatten)]
    pub rect: Rect,
    pub zone: String,
    #[serde(default)]
    pub area: Option<String>,
}

/// Where a warp target sends the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warp {
    pub zone: String,
    pub x: f32,
    pub y: f32,
}

/// Anything the player can interact with that is neither terrain nor an enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(flatten)]
    pub rect: Rect,
    pub zone: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub warp: Option<Warp>,
}

/// Every terrain piece, battle and target in the game.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldData {
    pub terrain: Vec<Terrain>,
    pub battles: Vec<Battle>,
    pub targets: Vec<Target>,
}

impl WorldData {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether anything in the world belongs to `zone`.
    pub fn has_zone(&self, zone: &str) -> bool {
        self.terrain.iter().any(|t| t.zone == zone)
            || self.battles.iter().any(|b| b.zone == zone)
            || self.targets.iter().any(|t| t.zone == zone)
    }
}

/// The slice of the world that is currently live.
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: String,
    pub terrain: Vec<Terrain>,
    pub battles: Vec<Battle>,
    pub targets: Vec<Target>,
}

impl Zone {
    /// Collect everything in `world` tagged with `id`. An id with no content
    /// yields an empty zone.
    pub fn new(world: &WorldData, id: &str) -> Self {
        let zone = Self {
            id: id.to_string(),
            terrain: world.terrain.iter().filter(|t| t.zone == id).cloned().collect(),
            battles: world.battles.iter().filter(|b| b.zone == id).cloned().collect(),
            targets: world.targets.iter().filter(|t| t.zone == id).cloned().collect(),
        };
        log::info!(
            "zone {:?}: {} terrain, {} battles, {} targets",
            zone.id,
            zone.terrain.len(),
            zone.battles.len(),
            zone.targets.len()
        );
        zone
    }

    /// Like [`Zone::new`] but rejects ids the world knows nothing about.
    pub fn load(world: &WorldData, id: &str) -> Result<Self, EngineError> {
        if !world.has_zone(id) {
            return Err(EngineError::UnknownZone(id.to_string()));
        }
        Ok(Self::new(world, id))
    }

    /// Smallest rect covering all terrain; the size of the map surface.
    pub fn bounds(&self) -> Option<Rect> {
        let mut pieces = self.terrain.iter().map(|t| t.rect);
        let mut bounds = pieces.next()?;
        for r in pieces {
            bounds.union(&r);
        }
        Some(bounds)
    }

    pub fn battle_at(&self, rect: &Rect) -> Option<&Battle> {
        self.battles.iter().find(|b| b.rect.overlap(rect))
    }

    pub fn target_at(&self, rect: &Rect) -> Option<&Target> {
        self.targets.iter().find(|t| t.rect.overlap(rect))
    }
}
