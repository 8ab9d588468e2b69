use crate::error::{MahjongError, MjResult};
use crate::hand::{ExposedGroup, ExposedKind, Group, GroupKind, Hand, Identity, Shape, WinMethod, Witness};
use crate::search::GroupValidator;
use crate::tiles::{Face, Tile, WildcardClass};

/// A tile together with the face it plays in the scored shape.
#[derive(Debug, Clone, Copy)]
pub struct Played {
    pub tile: Tile,
    pub face: Option<Face>,
}

/// Everything the bonus predicates look at, derived once per scored shape.
#[derive(Debug, Clone)]
pub struct ScoreContext {
    pub shape: Shape,
    /// Concealed groups from the witness.
    pub groups: Vec<Group>,
    /// Counted exposed groups, resolved.
    pub exposed_groups: Vec<(ExposedKind, Group)>,
    /// Tiles of concealed and counted exposed groups.
    pub played: Vec<Played>,
    pub isolated: Vec<Tile>,
    pub identities: Vec<Identity>,
    pub concealed_quadruples: Vec<Face>,
    pub exposed_quadruples: Vec<Face>,
    pub kongs: u32,
    pub claimed_groups: u32,
    pub concealed: bool,
    pub win_face: Option<Face>,
    pub method: Option<WinMethod>,
}

impl ScoreContext {
    pub fn build(hand: &Hand, shape: Shape, witness: &Witness, validator: &GroupValidator) -> Self {
        let groups = witness.groups.clone();
        let exposed_groups: Vec<(ExposedKind, Group)> = hand
            .exposed
            .iter()
            .filter(|g| g.kind != ExposedKind::Isolated)
            .filter_map(|g| resolve_exposed(g, validator).map(|r| (g.kind, r)))
            .collect();

        let played = groups
            .iter()
            .chain(exposed_groups.iter().map(|(_, g)| g))
            .flat_map(|g| {
                g.tiles
                    .iter()
                    .zip(&g.faces)
                    .map(|(tile, face)| Played { tile: *tile, face: *face })
            })
            .collect();

        let mut identities = Vec::new();
        let mut concealed_quadruples = Vec::new();
        for g in &groups {
            match g.kind {
                GroupKind::Identity(id) => identities.push(id),
                GroupKind::Quadruple(face) => concealed_quadruples.push(face),
                _ => {}
            }
        }

        let mut exposed_quadruples = Vec::new();
        let mut kongs = 0;
        for (kind, g) in &exposed_groups {
            // A borrowed meld whose wildcard completes four of a kind reads as a quadruple.
            match (kind, g.kind) {
                (ExposedKind::Kong { .. }, _) => kongs += 1,
                (_, GroupKind::Identity(id)) => identities.push(id),
                (_, GroupKind::Quadruple(face)) => exposed_quadruples.push(face),
                _ => {}
            }
        }

        let claimed_groups = hand.exposed.iter().filter(|g| g.kind.is_claimed()).count() as u32;
        let isolated = hand.isolated().copied().collect();

        Self {
            shape,
            groups,
            exposed_groups,
            played,
            isolated,
            identities,
            concealed_quadruples,
            exposed_quadruples,
            kongs,
            claimed_groups,
            concealed: hand.is_concealed(),
            win_face: hand.win_tile.and_then(|t| t.face_value()),
            method: hand.method,
        }
    }

    /// Resolved number faces outside isolated reveals.
    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.played.iter().filter_map(|p| p.face.and_then(Face::number))
    }

    pub fn faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.played.iter().filter_map(|p| p.face)
    }

    /// Faces of every held tile, isolated reveals included.
    pub fn all_faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.faces()
            .chain(self.isolated.iter().filter_map(|t| t.face_value()))
    }

    pub fn quadruple_count(&self) -> usize {
        self.concealed_quadruples.len() + self.exposed_quadruples.len()
    }

    pub fn quadruple_faces(&self) -> impl Iterator<Item = Face> + '_ {
        self.concealed_quadruples
            .iter()
            .chain(&self.exposed_quadruples)
            .copied()
    }

    pub fn isolated_bonus(&self) -> u32 {
        self.isolated.iter().filter(|t| t.is_bonus()).count() as u32
    }

    pub fn isolated_wildcards(&self) -> u32 {
        self.isolated.iter().filter(|t| t.is_wildcard()).count() as u32
    }

    /// Operator tiles anywhere, counting isolated operator wildcards.
    pub fn operator_tiles(&self) -> u32 {
        let played = self.faces().filter(|f| f.is_operator()).count();
        let isolated = self
            .isolated
            .iter()
            .filter(|t| {
                t.face_value().is_some_and(Face::is_operator)
                    || t.wildcard_class() == Some(WildcardClass::Operator)
            })
            .count();
        (played + isolated) as u32
    }

    /// Identities paired with how often each occurs.
    pub fn identity_counts(&self) -> Vec<(Identity, u32)> {
        let mut counts: Vec<(Identity, u32)> = Vec::new();
        for id in &self.identities {
            match counts.iter_mut().find(|(seen, _)| seen == id) {
                Some((_, n)) => *n += 1,
                None => counts.push((*id, 1)),
            }
        }
        counts
    }
}

/// Every revealed group must be what its kind claims.
pub fn check_exposed(hand: &Hand, validator: &GroupValidator) -> MjResult<()> {
    for group in hand.exposed.iter().filter(|g| g.kind != ExposedKind::Isolated) {
        if resolve_exposed(group, validator).is_none() {
            let tiles: Vec<String> = group.tiles.iter().map(|t| t.to_string()).collect();
            return Err(MahjongError::InvalidDeclaredWin(format!(
                "exposed group ({}) is not a valid {:?}",
                tiles.join(" "),
                group.kind
            )));
        }
    }
    Ok(())
}

/// Resolves a revealed group's wildcards. None when the group is not what its
/// kind claims.
pub fn resolve_exposed(group: &ExposedGroup, validator: &GroupValidator) -> Option<Group> {
    match group.kind {
        ExposedKind::Borrowed | ExposedKind::Quadruple => {
            let resolved = validator.resolve(&group.tiles)?;
            match (group.kind, resolved.kind) {
                (ExposedKind::Quadruple, GroupKind::Quadruple(_)) => Some(resolved),
                (ExposedKind::Borrowed, _) => Some(resolved),
                _ => None,
            }
        }
        ExposedKind::Kong { .. } => {
            let face = group.tiles.iter().find_map(|t| t.face_value())?;
            let consistent = group.tiles.iter().all(|t| match t.face_value() {
                Some(f) => f == face,
                None => t.wildcard_class().is_some_and(|c| c.admits(face)),
            });
            consistent.then(|| Group {
                kind: GroupKind::Quadruple(face),
                tiles: group.tiles.clone(),
                faces: vec![Some(face); group.tiles.len()],
            })
        }
        ExposedKind::Isolated => None,
    }
}
