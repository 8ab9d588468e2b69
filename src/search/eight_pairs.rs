use super::{only_isolated, SearchBudget, ShapeSearch};
use crate::consts::HAND_SIZE;
use crate::hand::{ExposedGroup, Group, GroupKind, Shape, Witness};
use crate::tiles::{Face, Tile};
use std::collections::BTreeMap;
use tracing::debug;

/// Sixteen tiles as eight pairs of equal faces. Wildcard-origin tiles pair
/// with any single and with each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct EightPairsSearch;

impl EightPairsSearch {
    pub fn find(&self, tiles: &[Tile], budget: &mut SearchBudget) -> Option<Witness> {
        if tiles.len() != HAND_SIZE || !budget.spend() {
            return None;
        }

        let mut by_face: BTreeMap<Face, Vec<Tile>> = BTreeMap::new();
        let mut open: Vec<Tile> = Vec::new();
        for tile in tiles {
            match (tile.is_wildcard(), tile.face_value()) {
                (false, Some(face)) => by_face.entry(face).or_default().push(*tile),
                _ => open.push(*tile),
            }
        }

        let singles = by_face.values().filter(|v| v.len() % 2 == 1).count();
        if singles > open.len() || (open.len() - singles) % 2 != 0 {
            return None;
        }

        let mut groups = Vec::with_capacity(HAND_SIZE / 2);
        for (face, held) in by_face {
            for chunk in held.chunks(2) {
                let mut tiles = chunk.to_vec();
                if tiles.len() == 1 {
                    tiles.push(open.pop()?);
                }
                groups.push(pair(tiles, Some(face)));
            }
        }
        while let (Some(a), Some(b)) = (open.pop(), open.pop()) {
            groups.push(pair(vec![b, a], None));
        }

        debug!("Eight pairs found, {} singles matched by wildcards", singles);
        Some(Witness { groups })
    }

    /// Validates one declared pair.
    pub fn resolve_pair(&self, tiles: &[Tile]) -> Option<Group> {
        let [a, b] = tiles else {
            return None;
        };
        let face = match (a.is_wildcard(), b.is_wildcard()) {
            (true, true) => None,
            (false, true) => Some(a.face_value()?),
            (true, false) => Some(b.face_value()?),
            (false, false) => {
                let fa = a.face_value()?;
                if Some(fa) != b.face_value() {
                    return None;
                }
                Some(fa)
            }
        };
        Some(pair(vec![*a, *b], face))
    }
}

fn pair(tiles: Vec<Tile>, face: Option<Face>) -> Group {
    Group {
        kind: GroupKind::Pair,
        faces: vec![face; tiles.len()],
        tiles,
    }
}

impl ShapeSearch for EightPairsSearch {
    fn shape(&self) -> Shape {
        Shape::EightPairs
    }

    fn admits(&self, exposed: &[ExposedGroup]) -> bool {
        only_isolated(exposed)
    }

    fn accepts_len(&self, len: usize) -> bool {
        len == HAND_SIZE
    }

    fn search(&self, tiles: &[Tile], budget: &mut SearchBudget) -> Option<Witness> {
        self.find(tiles, budget)
    }
}
