use crate::consts::{GROUP_SIZE, HAND_SIZE};
use crate::error::{MahjongError, MjResult};
use crate::tiles::{Face, Operator, Tile};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// How the winning tile arrived.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WinMethod {
    #[strum(
        to_string = "self_draw",
        serialize = "z",
        serialize = "zm",
        serialize = "zimo",
        serialize = "tsumo",
        serialize = "自摸"
    )]
    SelfDraw,
    #[strum(
        to_string = "after_kong",
        serialize = "k",
        serialize = "gk",
        serialize = "杠开",
        serialize = "杠上开花"
    )]
    AfterKong,
    #[strum(
        to_string = "rob_reveal",
        serialize = "q",
        serialize = "qg",
        serialize = "抢",
        serialize = "抢杠"
    )]
    RobReveal,
    #[strum(
        to_string = "last_tile",
        serialize = "h",
        serialize = "hd",
        serialize = "海底",
        serialize = "海底捞月"
    )]
    LastTile,
    #[strum(
        to_string = "first_turn",
        serialize = "t",
        serialize = "th",
        serialize = "天",
        serialize = "天胡"
    )]
    FirstTurn,
    #[strum(
        to_string = "declared",
        serialize = "d",
        serialize = "dian",
        serialize = "点胡"
    )]
    Declared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposedKind {
    /// An arithmetic identity claimed from another player.
    Borrowed,
    Quadruple,
    Kong { concealed: bool },
    /// A single bonus tile or wildcard set aside.
    Isolated,
}

impl ExposedKind {
    pub fn arity(self) -> usize {
        match self {
            Self::Borrowed | Self::Quadruple => 4,
            Self::Kong { .. } => 5,
            Self::Isolated => 1,
        }
    }

    /// Tiles this group contributes toward the sixteen-tile total.
    pub fn counted_tiles(self) -> usize {
        match self {
            Self::Isolated => 0,
            _ => GROUP_SIZE,
        }
    }

    /// Claimed from another player (breaks a fully concealed hand).
    pub fn is_claimed(self) -> bool {
        matches!(
            self,
            Self::Borrowed | Self::Quadruple | Self::Kong { concealed: false }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposedGroup {
    pub kind: ExposedKind,
    pub tiles: Vec<Tile>,
}

impl ExposedGroup {
    /// Builds a group, inferring the kind from its arity.
    pub fn from_tiles(tiles: Vec<Tile>, concealed_kong: bool) -> MjResult<Self> {
        let kind = match tiles.len() {
            1 => ExposedKind::Isolated,
            4 if all_same_face(&tiles) => ExposedKind::Quadruple,
            4 => ExposedKind::Borrowed,
            5 => ExposedKind::Kong {
                concealed: concealed_kong,
            },
            n => {
                return Err(MahjongError::MalformedInput(format!(
                    "exposed group must hold 1, 4 or 5 tiles, got {}",
                    n
                )))
            }
        };
        if concealed_kong && !matches!(kind, ExposedKind::Kong { .. }) {
            return Err(MahjongError::MalformedInput(
                "only a five-tile kong can be marked concealed".to_string(),
            ));
        }
        Ok(Self { kind, tiles })
    }

    pub fn isolated(tile: Tile) -> Self {
        Self {
            kind: ExposedKind::Isolated,
            tiles: vec![tile],
        }
    }
}

fn all_same_face(tiles: &[Tile]) -> bool {
    match tiles.first().and_then(|t| t.face_value()) {
        Some(face) => tiles.iter().all(|t| t.face_value() == Some(face)),
        None => false,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    pub concealed: Vec<Tile>,
    /// Player-declared partition of `concealed`, if any.
    pub declared_groups: Option<Vec<Vec<Tile>>>,
    pub exposed: Vec<ExposedGroup>,
    pub win_tile: Option<Tile>,
    pub method: Option<WinMethod>,
}

impl Hand {
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            concealed: tiles,
            ..Default::default()
        }
    }

    /// Concealed tiles plus four per counted exposed group.
    pub fn counted_size(&self) -> usize {
        self.concealed.len()
            + self
                .exposed
                .iter()
                .map(|g| g.kind.counted_tiles())
                .sum::<usize>()
    }

    /// Size the concealed part must have for the hand to total sixteen.
    pub fn expected_concealed(&self) -> usize {
        let exposed: usize = self.exposed.iter().map(|g| g.kind.counted_tiles()).sum();
        HAND_SIZE.saturating_sub(exposed)
    }

    pub fn check_complete(&self) -> MjResult<()> {
        let actual = self.counted_size();
        if actual != HAND_SIZE {
            return Err(MahjongError::IllegalHandSize {
                actual,
                expected: HAND_SIZE,
            });
        }
        Ok(())
    }

    /// One tile short of sixteen: the concealed part is one below what the
    /// exposed groups leave room for.
    pub fn check_ready(&self) -> MjResult<()> {
        let actual = self.concealed.len();
        match self.expected_concealed().checked_sub(1) {
            Some(expected) if expected == actual => Ok(()),
            Some(expected) => Err(MahjongError::IllegalHandSize { actual, expected }),
            // Four counted reveals leave nothing to wait on
            None => Err(MahjongError::IllegalHandSize {
                actual: self.counted_size(),
                expected: HAND_SIZE - 1,
            }),
        }
    }

    /// No borrowed meld, exposed quadruple or open kong.
    pub fn is_concealed(&self) -> bool {
        !self.exposed.iter().any(|g| g.kind.is_claimed())
    }

    pub fn isolated(&self) -> impl Iterator<Item = &Tile> {
        self.exposed
            .iter()
            .filter(|g| g.kind == ExposedKind::Isolated)
            .flat_map(|g| g.tiles.iter())
    }

    /// Every tile the player holds, isolated reveals included.
    pub fn all_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.concealed
            .iter()
            .chain(self.exposed.iter().flat_map(|g| g.tiles.iter()))
    }
}

/// The three competing grammars, listed in priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Arithmetic,
    Conventional,
    EightPairs,
}

impl Shape {
    /// Higher wins ties.
    pub fn priority(self) -> u8 {
        match self {
            Self::Arithmetic => 3,
            Self::Conventional => 2,
            Self::EightPairs => 1,
        }
    }
}

/// `a op b = c`, normalised so `a <= b` for commutative operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    pub op: Operator,
    pub a: u8,
    pub b: u8,
    pub c: u8,
}

impl Identity {
    pub fn new(op: Operator, a: u8, b: u8, c: u8) -> Self {
        if op.commutes() && a > b {
            Self { op, a: b, b: a, c }
        } else {
            Self { op, a, b, c }
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = {}", self.a, self.op, self.b, self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Quadruple(Face),
    Identity(Identity),
    Pair,
    Triplet,
    Run,
}

/// A validated group: the input tiles with the face each one plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub kind: GroupKind,
    pub tiles: Vec<Tile>,
    /// None only for a wildcard paired with another wildcard.
    pub faces: Vec<Option<Face>>,
}

impl Group {
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.faces.iter().filter_map(|f| f.and_then(Face::number))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tiles: Vec<String> = self.tiles.iter().map(|t| t.to_string()).collect();
        match self.kind {
            GroupKind::Identity(id) => write!(f, "[{}] {}", tiles.join(" "), id),
            _ => write!(f, "[{}]", tiles.join(" ")),
        }
    }
}

/// One decomposition found by a grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Witness {
    pub groups: Vec<Group>,
}

impl Witness {
    pub fn flatten(&self) -> Vec<Tile> {
        self.groups
            .iter()
            .flat_map(|g| g.tiles.iter().copied())
            .collect()
    }
}
