use crate::consts::{face_count, WILDCARDS_PER_CLASS};
use crate::tiles::{Face, Tile, WildcardClass};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Whether a completing face can still be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "class")]
pub enum Availability {
    Available,
    /// No printed copy left; only a wildcard of this class can supply it.
    NeedsWildcard(WildcardClass),
    Dead,
}

/// Physical tile-set cardinalities minus what a player already holds.
#[derive(Debug, Clone, Default)]
pub struct TilePool {
    used_faces: HashMap<Face, u8>,
    used_wildcards: HashMap<WildcardClass, u8>,
}

impl TilePool {
    /// Counts every tile in `tiles` as taken from the set. Wildcards, declared
    /// or not, consume their class.
    pub fn with_used<'a, I>(tiles: I) -> Self
    where
        I: IntoIterator<Item = &'a Tile>,
    {
        let mut pool = Self::default();
        for tile in tiles {
            match (tile.wildcard_class(), tile.face_value()) {
                (Some(class), _) => *pool.used_wildcards.entry(class).or_insert(0) += 1,
                (None, Some(face)) => *pool.used_faces.entry(face).or_insert(0) += 1,
                (None, None) => {}
            }
        }
        pool
    }

    pub fn remaining(&self, face: Face) -> u8 {
        let used = self.used_faces.get(&face).copied().unwrap_or(0);
        face_count(face).saturating_sub(used)
    }

    pub fn remaining_wildcards(&self, class: WildcardClass) -> u8 {
        let used = self.used_wildcards.get(&class).copied().unwrap_or(0);
        WILDCARDS_PER_CLASS.saturating_sub(used)
    }

    pub fn availability(&self, face: Face) -> Availability {
        if self.remaining(face) > 0 {
            return Availability::Available;
        }
        match WildcardClass::of_face(face) {
            Some(class) if self.remaining_wildcards(class) > 0 => {
                Availability::NeedsWildcard(class)
            }
            _ => Availability::Dead,
        }
    }
}
