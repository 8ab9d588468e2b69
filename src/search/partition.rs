use super::{GroupValidator, SearchBudget, ShapeSearch};
use crate::consts::GROUP_SIZE;
use crate::hand::{ExposedGroup, Group, Shape, Witness};
use crate::tiles::{Tile, TileKind};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub witness: Option<Witness>,
    pub nodes: u64,
    pub exhausted: bool,
}

/// Backtracking search for a partition of `4k` tiles into valid groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartitionSearch {
    validator: GroupValidator,
}

impl PartitionSearch {
    pub fn new(validator: GroupValidator) -> Self {
        Self { validator }
    }

    pub fn validator(&self) -> &GroupValidator {
        &self.validator
    }

    pub fn run(&self, tiles: &[Tile], node_budget: u64) -> SearchOutcome {
        let mut budget = SearchBudget::new(node_budget);
        let witness = self.find(tiles, &mut budget);
        if witness.is_none() && budget.exhausted() {
            warn!(
                "Partition search gave up after {} nodes on {} tiles",
                budget.spent(),
                tiles.len()
            );
        }
        SearchOutcome {
            witness,
            nodes: budget.spent(),
            exhausted: budget.exhausted(),
        }
    }

    pub fn find(&self, tiles: &[Tile], budget: &mut SearchBudget) -> Option<Witness> {
        if tiles.len() % GROUP_SIZE != 0 {
            return None;
        }
        let mut sorted = tiles.to_vec();
        sorted.sort_by_key(|t| t.kind());

        let mut groups = Vec::with_capacity(sorted.len() / GROUP_SIZE);
        if self.recurse(&sorted, &mut groups, budget) {
            debug!("Partition found {} groups in {} nodes", groups.len(), budget.spent());
            Some(Witness { groups })
        } else {
            None
        }
    }

    fn recurse(&self, remaining: &[Tile], groups: &mut Vec<Group>, budget: &mut SearchBudget) -> bool {
        if !budget.spend() {
            return false;
        }
        if remaining.is_empty() {
            return true;
        }
        if remaining.len() % GROUP_SIZE != 0 {
            return false;
        }

        // 1. Quadruples of one kind first
        let mut counts: BTreeMap<TileKind, usize> = BTreeMap::new();
        for t in remaining {
            *counts.entry(t.kind()).or_insert(0) += 1;
        }
        for (&kind, &count) in &counts {
            if count < GROUP_SIZE {
                continue;
            }
            let picked: Vec<usize> = remaining
                .iter()
                .enumerate()
                .filter(|(_, t)| t.kind() == kind)
                .map(|(i, _)| i)
                .take(GROUP_SIZE)
                .collect();
            if self.try_group(remaining, &picked, groups, budget) {
                return true;
            }
            if budget.exhausted() {
                return false;
            }
        }

        // 2. Anchor the first tile and try every triple of the rest
        let n = remaining.len();
        let mut seen: HashSet<[TileKind; 3]> = HashSet::new();
        for i in 1..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let key = [remaining[i].kind(), remaining[j].kind(), remaining[k].kind()];
                    if !seen.insert(key) {
                        continue;
                    }
                    if self.try_group(remaining, &[0, i, j, k], groups, budget) {
                        return true;
                    }
                    if budget.exhausted() {
                        return false;
                    }
                }
            }
        }
        false
    }

    fn try_group(
        &self,
        remaining: &[Tile],
        picked: &[usize],
        groups: &mut Vec<Group>,
        budget: &mut SearchBudget,
    ) -> bool {
        if !budget.spend() {
            return false;
        }
        let candidate: Vec<Tile> = picked.iter().map(|&i| remaining[i]).collect();
        let Some(group) = self.validator.resolve(&candidate) else {
            return false;
        };

        let rest: Vec<Tile> = remaining
            .iter()
            .enumerate()
            .filter(|(i, _)| !picked.contains(i))
            .map(|(_, t)| *t)
            .collect();

        groups.push(group);
        if self.recurse(&rest, groups, budget) {
            return true;
        }
        groups.pop();
        false
    }
}

impl ShapeSearch for PartitionSearch {
    fn shape(&self) -> Shape {
        Shape::Arithmetic
    }

    fn admits(&self, _exposed: &[ExposedGroup]) -> bool {
        true
    }

    fn accepts_len(&self, len: usize) -> bool {
        len > 0 && len % GROUP_SIZE == 0
    }

    fn search(&self, tiles: &[Tile], budget: &mut SearchBudget) -> Option<Witness> {
        self.find(tiles, budget)
    }
}
