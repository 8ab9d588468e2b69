use crate::consts::{is_pool_number, BONUS_NUMBERS, MAX_NUMBER, POWER_BASE_LIMIT, POWER_EXP_LIMIT};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

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
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum Operator {
    #[strum(to_string = "+", serialize = "加")]
    Plus,
    #[strum(to_string = "×", serialize = "*", serialize = "x", serialize = "X", serialize = "乘")]
    Times,
    #[strum(to_string = "∧", serialize = "^", serialize = "次方", serialize = "幂")]
    Power,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Plus, Operator::Times, Operator::Power];

    /// Evaluates `a op b`. Returns None on overflow or when a power exceeds
    /// the base/exponent limits.
    #[inline]
    pub fn apply(self, a: u32, b: u32) -> Option<u32> {
        match self {
            Self::Plus => a.checked_add(b),
            Self::Times => a.checked_mul(b),
            Self::Power => {
                if a > POWER_BASE_LIMIT || b > POWER_EXP_LIMIT {
                    None
                } else {
                    a.checked_pow(b)
                }
            }
        }
    }

    /// Whether the operation is commutative (identities are normalised on it).
    pub fn commutes(self) -> bool {
        !matches!(self, Self::Power)
    }
}

/// The four physical wildcard classes. Each one stands for any face in its
/// range.
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
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WildcardClass {
    #[strum(
        to_string = "jt",
        serialize = "ws",
        serialize = "s",
        serialize = "条",
        serialize = "索",
        serialize = "joker_tiao",
        serialize = "low"
    )]
    Low,
    #[strum(
        to_string = "jtong",
        serialize = "wp",
        serialize = "p",
        serialize = "筒",
        serialize = "饼",
        serialize = "joker_tong",
        serialize = "mid"
    )]
    Mid,
    #[strum(
        to_string = "jw",
        serialize = "wm",
        serialize = "m",
        serialize = "万",
        serialize = "joker_wan",
        serialize = "high"
    )]
    High,
    #[strum(
        to_string = "js",
        serialize = "op",
        serialize = "wz",
        serialize = "符号",
        serialize = "箭",
        serialize = "joker_symbol",
        serialize = "operator"
    )]
    Operator,
}

impl WildcardClass {
    pub const ALL: [WildcardClass; 4] = [
        WildcardClass::Low,
        WildcardClass::Mid,
        WildcardClass::High,
        WildcardClass::Operator,
    ];

    /// Every face this class may resolve to in the arithmetic grammar.
    pub fn faces(self) -> Vec<Face> {
        match self {
            Self::Low => (0..=9).map(Face::Number).collect(),
            Self::Mid => (10..=19).map(Face::Number).collect(),
            Self::High => (20..=MAX_NUMBER).map(Face::Number).collect(),
            Self::Operator => Operator::ALL.iter().map(|&op| Face::Op(op)).collect(),
        }
    }

    pub fn admits(self, face: Face) -> bool {
        Self::of_face(face) == Some(self)
    }

    /// The class whose range holds `face`; None past the largest number.
    pub fn of_face(face: Face) -> Option<Self> {
        match face {
            Face::Op(_) => Some(Self::Operator),
            Face::Number(0..=9) => Some(Self::Low),
            Face::Number(10..=19) => Some(Self::Mid),
            Face::Number(n) if n <= MAX_NUMBER => Some(Self::High),
            Face::Number(_) => None,
        }
    }
}

/// A concrete printed face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    Op(Operator),
    Number(u8),
}

impl Face {
    pub fn number(self) -> Option<u8> {
        match self {
            Self::Number(n) => Some(n),
            Self::Op(_) => None,
        }
    }

    pub fn operator(self) -> Option<Operator> {
        match self {
            Self::Op(op) => Some(op),
            Self::Number(_) => None,
        }
    }

    pub fn is_operator(self) -> bool {
        matches!(self, Self::Op(_))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op(op) => write!(f, "{}", op),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Search key. Variant order gives operators, then open wildcards, then
/// numbers ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Op(Operator),
    Wild(WildcardClass),
    Number(u8),
}

impl From<Face> for TileKind {
    fn from(face: Face) -> Self {
        match face {
            Face::Op(op) => Self::Op(op),
            Face::Number(n) => Self::Number(n),
        }
    }
}

/// One physical tile. Immutable; wildcard resolutions live in witnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    face: Option<Face>,
    wildcard: Option<WildcardClass>,
    bonus: bool,
}

impl Tile {
    pub fn number(n: u8) -> Self {
        Self {
            face: Some(Face::Number(n)),
            wildcard: None,
            bonus: false,
        }
    }

    pub fn op(op: Operator) -> Self {
        Self {
            face: Some(Face::Op(op)),
            wildcard: None,
            bonus: false,
        }
    }

    pub fn face(face: Face) -> Self {
        Self {
            face: Some(face),
            wildcard: None,
            bonus: false,
        }
    }

    /// An unresolved wildcard.
    pub fn wildcard(class: WildcardClass) -> Self {
        Self {
            face: None,
            wildcard: Some(class),
            bonus: false,
        }
    }

    /// A wildcard whose face has already been declared. None when no class
    /// covers the face.
    pub fn stand_in(face: Face) -> Option<Self> {
        WildcardClass::of_face(face).map(|class| Self {
            face: Some(face),
            wildcard: Some(class),
            bonus: false,
        })
    }

    /// A bonus-marked instance; only the dedicated bonus faces exist.
    pub fn bonus(n: u8) -> Option<Self> {
        BONUS_NUMBERS.contains(&n).then(|| Self {
            face: Some(Face::Number(n)),
            wildcard: None,
            bonus: true,
        })
    }

    /// The declared or printed face; None for an unresolved wildcard.
    #[inline]
    pub fn face_value(&self) -> Option<Face> {
        self.face
    }

    #[inline]
    pub fn wildcard_class(&self) -> Option<WildcardClass> {
        self.wildcard
    }

    /// True for any tile that is physically a wildcard, declared or not.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.wildcard.is_some()
    }

    #[inline]
    pub fn is_unresolved(&self) -> bool {
        self.face.is_none()
    }

    #[inline]
    pub fn is_bonus(&self) -> bool {
        self.bonus
    }

    /// Search key used by the arithmetic grammar. Declared wildcards search
    /// as their face.
    #[inline]
    pub fn kind(&self) -> TileKind {
        match (self.face, self.wildcard) {
            (Some(face), _) => face.into(),
            (None, Some(class)) => TileKind::Wild(class),
            (None, None) => TileKind::Wild(WildcardClass::Operator),
        }
    }

    /// Whether the tile can be written in notation without a wildcard marker.
    pub fn is_printed(&self) -> bool {
        match self.face {
            Some(Face::Number(n)) => self.wildcard.is_none() && is_pool_number(n),
            Some(Face::Op(_)) => self.wildcard.is_none(),
            None => false,
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.face, self.wildcard) {
            (Some(face), Some(_)) => write!(f, "{}w", face),
            (Some(face), None) if self.bonus => write!(f, "{}d", face),
            (Some(face), None) => write!(f, "{}", face),
            (None, Some(class)) => write!(f, "{}", class),
            (None, None) => write!(f, "?"),
        }
    }
}
