use super::{only_isolated, SearchBudget, ShapeSearch};
use crate::consts::HAND_SIZE;
use crate::hand::{ExposedGroup, Group, GroupKind, Shape, Witness};
use crate::tiles::{Face, Operator, Tile, WildcardClass};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

/// Conventional tiles: bamboo, dots and characters 1–9, four winds and three
/// dragons, indexed 0..34.
pub const CONVENTIONAL_TILES: usize = 34;

const BAMBOO: usize = 0;
const DOTS: usize = 9;
const CHARACTERS: usize = 18;
const WINDS: usize = 27;
const DRAGONS: usize = 31;

/// Number faces of characters 1–9.
pub const CHARACTER_FACES: [u8; 9] = [21, 32, 35, 24, 25, 36, 27, 28, 49];

/// Wind faces in index order: north, south, east, west.
pub const WIND_FACES: [u8; 4] = [10, 20, 30, 40];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
pub enum Suit {
    Bamboo,
    Dots,
    Characters,
    Wind,
    Dragon,
}

/// Where a wildcard-origin tile may land in this grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Scope {
    Class(WildcardClass),
    /// Face 0 plays any conventional tile.
    Omni,
}

impl Scope {
    fn indices(self) -> std::ops::Range<usize> {
        match self {
            Self::Class(WildcardClass::Low) => BAMBOO..BAMBOO + 9,
            Self::Class(WildcardClass::Mid) => DOTS..DOTS + 9,
            Self::Class(WildcardClass::High) => CHARACTERS..CHARACTERS + 9,
            Self::Class(WildcardClass::Operator) => DRAGONS..DRAGONS + 3,
            Self::Omni => 0..CONVENTIONAL_TILES,
        }
    }
}

enum Slot {
    Fixed(usize),
    Open(Scope),
}

/// Index of a printed face, or None when the face has no conventional
/// reading.
pub fn index_of(face: Face) -> Option<usize> {
    match face {
        Face::Op(Operator::Plus) => Some(DRAGONS),
        Face::Op(Operator::Times) => Some(DRAGONS + 1),
        Face::Op(Operator::Power) => Some(DRAGONS + 2),
        Face::Number(n @ 1..=9) => Some(BAMBOO + n as usize - 1),
        Face::Number(n @ 11..=19) => Some(DOTS + n as usize - 11),
        Face::Number(n) => CHARACTER_FACES
            .iter()
            .position(|&c| c == n)
            .map(|i| CHARACTERS + i)
            .or_else(|| WIND_FACES.iter().position(|&w| w == n).map(|i| WINDS + i)),
    }
}

/// The face that plays conventional tile `idx`.
pub fn face_of(idx: usize) -> Face {
    match idx {
        i if i < DOTS => Face::Number((i - BAMBOO + 1) as u8),
        i if i < CHARACTERS => Face::Number((i - DOTS + 11) as u8),
        i if i < WINDS => Face::Number(CHARACTER_FACES[i - CHARACTERS]),
        i if i < DRAGONS => Face::Number(WIND_FACES[i - WINDS]),
        i => Face::Op(Operator::ALL[(i - DRAGONS).min(2)]),
    }
}

pub fn suit_of(idx: usize) -> Suit {
    match idx {
        i if i < DOTS => Suit::Bamboo,
        i if i < CHARACTERS => Suit::Dots,
        i if i < WINDS => Suit::Characters,
        i if i < DRAGONS => Suit::Wind,
        _ => Suit::Dragon,
    }
}

fn slot_of(tile: &Tile) -> Option<Slot> {
    if let Some(class) = tile.wildcard_class() {
        return Some(Slot::Open(Scope::Class(class)));
    }
    match tile.face_value()? {
        Face::Number(0) => Some(Slot::Open(Scope::Omni)),
        face => index_of(face).map(Slot::Fixed),
    }
}

#[derive(Debug, Clone, Copy)]
enum Meld {
    Pair(usize),
    Triplet(usize),
    Run(usize),
}

impl Meld {
    fn indices(self) -> Vec<usize> {
        match self {
            Self::Pair(i) => vec![i, i],
            Self::Triplet(i) => vec![i, i, i],
            Self::Run(i) => vec![i, i + 1, i + 2],
        }
    }

    fn kind(self) -> GroupKind {
        match self {
            Self::Pair(_) => GroupKind::Pair,
            Self::Triplet(_) => GroupKind::Triplet,
            Self::Run(_) => GroupKind::Run,
        }
    }
}

/// Runs start at rank 1–7 of a numbered suit.
fn can_start_run(idx: usize) -> bool {
    idx < WINDS && idx % 9 <= 6
}

/// Two pairs and four triplets/runs over the conventional tile set.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalSearch;

impl ConventionalSearch {
    pub fn find(&self, tiles: &[Tile], budget: &mut SearchBudget) -> Option<Witness> {
        if tiles.len() != HAND_SIZE {
            return None;
        }

        let mut counts = [0u8; CONVENTIONAL_TILES];
        let mut open: Vec<(Scope, Tile)> = Vec::new();
        let mut fixed: Vec<(usize, Tile)> = Vec::new();
        for tile in tiles {
            match slot_of(tile)? {
                Slot::Fixed(idx) => {
                    counts[idx] += 1;
                    fixed.push((idx, *tile));
                }
                Slot::Open(scope) => open.push((scope, *tile)),
            }
        }
        open.sort_by_key(|(scope, _)| *scope);

        let scopes: Vec<Scope> = open.iter().map(|(s, _)| *s).collect();
        let mut assigned = Vec::with_capacity(open.len());
        let melds = assign(&scopes, &mut counts, &mut assigned, budget)?;

        let mut placed = fixed;
        placed.extend(open.iter().zip(&assigned).map(|((_, tile), &idx)| (idx, *tile)));
        debug!("Conventional shape found after {} nodes", budget.spent());
        Some(Witness {
            groups: build_groups(&melds, placed),
        })
    }

    /// Validates one declared pair, triplet or run.
    pub fn resolve_group(&self, tiles: &[Tile]) -> Option<Group> {
        let mut fixed = Vec::new();
        let mut open = Vec::new();
        for tile in tiles {
            match slot_of(tile)? {
                Slot::Fixed(idx) => fixed.push((idx, *tile)),
                Slot::Open(scope) => open.push((scope, *tile)),
            }
        }
        let mut choice = vec![0usize; open.len()];
        resolve_open(&open, &mut choice, 0, &fixed, tiles.len())
    }
}

fn resolve_open(
    open: &[(Scope, Tile)],
    choice: &mut [usize],
    depth: usize,
    fixed: &[(usize, Tile)],
    arity: usize,
) -> Option<Group> {
    if depth == open.len() {
        let mut placed: Vec<(usize, Tile)> = fixed.to_vec();
        placed.extend(open.iter().zip(choice.iter()).map(|((_, t), &i)| (i, *t)));
        placed.sort_by_key(|(i, _)| *i);
        let first = placed.first()?.0;
        let meld = match arity {
            2 if placed.iter().all(|(i, _)| *i == first) => Meld::Pair(first),
            3 if placed.iter().all(|(i, _)| *i == first) => Meld::Triplet(first),
            3 if can_start_run(first)
                && placed[1].0 == first + 1
                && placed[2].0 == first + 2 =>
            {
                Meld::Run(first)
            }
            _ => return None,
        };
        return build_groups(&[meld], placed).pop();
    }
    for idx in open[depth].0.indices() {
        choice[depth] = idx;
        if let Some(g) = resolve_open(open, choice, depth + 1, fixed, arity) {
            return Some(g);
        }
    }
    None
}

/// Assigns open tiles in non-decreasing order within a scope, then tries to
/// decompose.
fn assign(
    scopes: &[Scope],
    counts: &mut [u8; CONVENTIONAL_TILES],
    assigned: &mut Vec<usize>,
    budget: &mut SearchBudget,
) -> Option<Vec<Meld>> {
    if !budget.spend() {
        return None;
    }
    let depth = assigned.len();
    if depth == scopes.len() {
        return decompose(counts, budget);
    }

    let scope = scopes[depth];
    let floor = match (depth, assigned.last()) {
        (d, Some(&prev)) if d > 0 && scopes[d - 1] == scope => prev,
        _ => 0,
    };
    for idx in scope.indices().filter(|&i| i >= floor) {
        counts[idx] += 1;
        assigned.push(idx);
        if let Some(melds) = assign(scopes, counts, assigned, budget) {
            return Some(melds);
        }
        assigned.pop();
        counts[idx] -= 1;
        if budget.exhausted() {
            return None;
        }
    }
    None
}

fn decompose(counts: &mut [u8; CONVENTIONAL_TILES], budget: &mut SearchBudget) -> Option<Vec<Meld>> {
    for i in 0..CONVENTIONAL_TILES {
        if counts[i] < 2 {
            continue;
        }
        counts[i] -= 2;
        for j in i..CONVENTIONAL_TILES {
            if counts[j] < 2 {
                continue;
            }
            counts[j] -= 2;
            let mut melds = vec![Meld::Pair(i), Meld::Pair(j)];
            let found = strip_melds(counts, &mut melds, budget);
            counts[j] += 2;
            if found {
                counts[i] += 2;
                return Some(melds);
            }
        }
        counts[i] += 2;
        if budget.exhausted() {
            return None;
        }
    }
    None
}

fn strip_melds(
    counts: &mut [u8; CONVENTIONAL_TILES],
    melds: &mut Vec<Meld>,
    budget: &mut SearchBudget,
) -> bool {
    if !budget.spend() {
        return false;
    }
    let Some(i) = counts.iter().position(|&c| c > 0) else {
        return true;
    };

    if counts[i] >= 3 {
        counts[i] -= 3;
        melds.push(Meld::Triplet(i));
        let ok = strip_melds(counts, melds, budget);
        counts[i] += 3;
        if ok {
            return true;
        }
        melds.pop();
    }

    if can_start_run(i) && counts[i + 1] > 0 && counts[i + 2] > 0 {
        for k in i..i + 3 {
            counts[k] -= 1;
        }
        melds.push(Meld::Run(i));
        let ok = strip_melds(counts, melds, budget);
        for k in i..i + 3 {
            counts[k] += 1;
        }
        if ok {
            return true;
        }
        melds.pop();
    }
    false
}

/// Hands the input tiles out to each meld by index.
fn build_groups(melds: &[Meld], mut placed: Vec<(usize, Tile)>) -> Vec<Group> {
    let mut groups = Vec::with_capacity(melds.len());
    for meld in melds {
        let mut tiles = Vec::new();
        let mut faces = Vec::new();
        for idx in meld.indices() {
            if let Some(pos) = placed.iter().position(|(i, _)| *i == idx) {
                let (_, tile) = placed.swap_remove(pos);
                tiles.push(tile);
                faces.push(Some(face_of(idx)));
            }
        }
        groups.push(Group {
            kind: meld.kind(),
            tiles,
            faces,
        });
    }
    groups
}

impl ShapeSearch for ConventionalSearch {
    fn shape(&self) -> Shape {
        Shape::Conventional
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
