use crate::tiles::{Face, Operator};

/// Tiles in a completed hand, counting every exposed group as four.
pub const HAND_SIZE: usize = 16;
pub const GROUP_SIZE: usize = 4;

pub const MAX_NUMBER: u8 = 49;

/// Number faces that physically exist in the tile set.
pub const POOL_NUMBERS: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 24, 25, 27, 28,
    30, 32, 35, 36, 40, 49,
];

/// Faces that have a dedicated bonus-tile instance (`11d`, `13d`, ...).
pub const BONUS_NUMBERS: [u8; 4] = [11, 13, 17, 19];

// Arithmetic limits
pub const STRICT_MIN_SUM: u32 = 10;
pub const POWER_BASE_LIMIT: u32 = 100;
pub const POWER_EXP_LIMIT: u32 = 10;

// Scoring defaults
pub const DEFAULT_MIN_SCORE: u32 = 8;
pub const PERMISSIVE_MIN_SCORE: u32 = 0;
pub const DEFAULT_SEARCH_NODE_BUDGET: u64 = 2_000_000;

/// One physical wildcard per class.
pub const WILDCARDS_PER_CLASS: u8 = 1;

/// Faces required by the thirteen-orphans pattern.
pub const ORPHAN_FACES: [Face; 13] = [
    Face::Number(1),
    Face::Number(9),
    Face::Number(10),
    Face::Number(11),
    Face::Number(19),
    Face::Number(20),
    Face::Number(21),
    Face::Number(49),
    Face::Number(30),
    Face::Number(40),
    Face::Op(Operator::Plus),
    Face::Op(Operator::Times),
    Face::Op(Operator::Power),
];

/// Number of physical tiles printed with a given face.
pub fn face_count(face: Face) -> u8 {
    match face {
        Face::Op(Operator::Plus) => 10,
        Face::Op(Operator::Times) => 12,
        Face::Op(Operator::Power) => 6,
        Face::Number(n) => match n {
            2 => 10,
            3 => 8,
            4 | 5 | 6 | 8 | 12 => 6,
            7 | 9 | 10 | 16 | 18 | 24 => 4,
            0 | 1 | 11 | 13 | 14 | 15 | 17 | 19 | 20 | 21 | 25 | 27 | 28 | 30 | 32 | 35 | 36
            | 40 | 49 => 2,
            _ => 0,
        },
    }
}

pub fn is_pool_number(n: u8) -> bool {
    POOL_NUMBERS.contains(&n)
}

/// Every concrete face a readiness probe may append: 0..=49 and the operators.
pub fn candidate_faces() -> Vec<Face> {
    let mut faces: Vec<Face> = Operator::ALL.iter().map(|&op| Face::Op(op)).collect();
    faces.extend((0..=MAX_NUMBER).map(Face::Number));
    faces
}
