use crate::config::RuleSet;
use crate::consts::{GROUP_SIZE, STRICT_MIN_SUM};
use crate::hand::{Group, GroupKind, Identity};
use crate::tiles::{Face, Operator, Tile};

// (a, b, c) index orderings over the three numbers of a group.
const ORDERINGS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Decides whether four tiles form a quadruple or an arithmetic identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupValidator {
    permissive_addition: bool,
}

impl GroupValidator {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            permissive_addition: rules.permissive_addition,
        }
    }

    pub fn strict() -> Self {
        Self {
            permissive_addition: false,
        }
    }

    pub fn permissive() -> Self {
        Self {
            permissive_addition: true,
        }
    }

    pub fn is_valid(&self, tiles: &[Tile]) -> bool {
        self.resolve(tiles).is_some()
    }

    /// Returns the group with every wildcard resolved, or None when no
    /// assignment makes the four tiles valid.
    pub fn resolve(&self, tiles: &[Tile]) -> Option<Group> {
        if tiles.len() != GROUP_SIZE {
            return None;
        }

        let mut faces = [Face::Number(0); GROUP_SIZE];
        let mut open: Vec<(usize, Vec<Face>)> = Vec::new();
        for (i, tile) in tiles.iter().enumerate() {
            match (tile.face_value(), tile.wildcard_class()) {
                (Some(face), _) => faces[i] = face,
                (None, Some(class)) => open.push((i, class.faces())),
                (None, None) => return None,
            }
        }

        if open.is_empty() {
            return self.check_faces(&faces).map(|kind| build(tiles, &faces, kind));
        }

        // Odometer over the Cartesian product of wildcard ranges.
        let mut cursor = vec![0usize; open.len()];
        loop {
            for (slot, (idx, range)) in open.iter().enumerate() {
                faces[*idx] = range[cursor[slot]];
            }
            if let Some(kind) = self.check_faces(&faces) {
                return Some(build(tiles, &faces, kind));
            }

            let mut slot = 0;
            loop {
                if slot == open.len() {
                    return None;
                }
                cursor[slot] += 1;
                if cursor[slot] < open[slot].1.len() {
                    break;
                }
                cursor[slot] = 0;
                slot += 1;
            }
        }
    }

    /// The no-wildcard check: quadruple first, then the identity over all
    /// orderings of the three numbers.
    pub fn check_faces(&self, faces: &[Face; GROUP_SIZE]) -> Option<GroupKind> {
        if faces.iter().all(|f| *f == faces[0]) {
            return Some(GroupKind::Quadruple(faces[0]));
        }

        let mut op: Option<Operator> = None;
        let mut nums = [0u8; 3];
        let mut n = 0;
        for face in faces {
            match face {
                Face::Op(o) => {
                    if op.is_some() {
                        return None;
                    }
                    op = Some(*o);
                }
                Face::Number(v) => {
                    if n == 3 {
                        return None;
                    }
                    nums[n] = *v;
                    n += 1;
                }
            }
        }
        let op = op?;

        ORDERINGS.iter().find_map(|[ia, ib, ic]| {
            let (a, b, c) = (nums[*ia], nums[*ib], nums[*ic]);
            self.holds(op, a, b, c)
                .then(|| GroupKind::Identity(Identity::new(op, a, b, c)))
        })
    }

    #[inline]
    fn holds(&self, op: Operator, a: u8, b: u8, c: u8) -> bool {
        if op == Operator::Plus && !self.permissive_addition && (c as u32) < STRICT_MIN_SUM {
            return false;
        }
        op.apply(a as u32, b as u32) == Some(c as u32)
    }
}

fn build(tiles: &[Tile], faces: &[Face; GROUP_SIZE], kind: GroupKind) -> Group {
    Group {
        kind,
        tiles: tiles.to_vec(),
        faces: faces.iter().map(|f| Some(*f)).collect(),
    }
}
