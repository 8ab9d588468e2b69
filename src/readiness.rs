use crate::config::Config;
use crate::consts::candidate_faces;
use crate::error::MjResult;
use crate::hand::{Hand, Shape};
use crate::pool::{Availability, TilePool};
use crate::scorer::context::check_exposed;
use crate::search::{GroupValidator, SearchBudget, ShapeSearch};
use crate::tiles::{Face, Tile};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct ReadinessOptions {
    pub node_budget: u64,
    pub parallel: bool,
}

impl From<&Config> for ReadinessOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            node_budget: cfg.search.search_node_budget,
            parallel: cfg.search.parallel_readiness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wait {
    pub face: Face,
    pub availability: Availability,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub waits: BTreeMap<Shape, Vec<Wait>>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.waits.values().any(|w| !w.is_empty())
    }

    pub fn faces(&self, shape: Shape) -> Vec<Face> {
        self.waits
            .get(&shape)
            .map(|w| w.iter().map(|w| w.face).collect())
            .unwrap_or_default()
    }
}

/// Probes every candidate face against a hand one tile short.
pub struct ReadinessAnalyzer {
    validator: GroupValidator,
    searches: Vec<Arc<dyn ShapeSearch>>,
    options: ReadinessOptions,
}

impl ReadinessAnalyzer {
    pub fn new(
        validator: GroupValidator,
        searches: Vec<Arc<dyn ShapeSearch>>,
        options: ReadinessOptions,
    ) -> Self {
        Self {
            validator,
            searches,
            options,
        }
    }

    pub fn analyze(&self, hand: &Hand) -> MjResult<ReadinessReport> {
        hand.check_ready()?;
        check_exposed(hand, &self.validator)?;

        let len = hand.concealed.len();

        let pool = TilePool::with_used(hand.all_tiles());
        let candidates = candidate_faces();
        let mut report = ReadinessReport::default();

        for search in &self.searches {
            let shape = search.shape();
            if !search.admits(&hand.exposed) || !search.accepts_len(len + 1) {
                continue;
            }

            let completes = |face: &Face| -> bool {
                let mut tiles = hand.concealed.clone();
                tiles.push(Tile::face(*face));
                let mut budget = SearchBudget::new(self.options.node_budget);
                search.search(&tiles, &mut budget).is_some()
            };

            let mut faces: Vec<Face> = if self.options.parallel {
                candidates.par_iter().filter(|f| completes(f)).copied().collect()
            } else {
                candidates.iter().filter(|f| completes(f)).copied().collect()
            };
            faces.sort();
            debug!("{} grammar: {} completing faces", shape, faces.len());

            let waits = faces
                .into_iter()
                .map(|face| Wait {
                    face,
                    availability: pool.availability(face),
                })
                .collect();
            report.waits.insert(shape, waits);
        }

        info!(
            "Readiness: {} waits across {} grammars",
            report.waits.values().map(Vec::len).sum::<usize>(),
            report.waits.len()
        );
        Ok(report)
    }
}
