use crate::config::Config;
use crate::consts::GROUP_SIZE;
use crate::error::{MahjongError, MjResult};
use crate::hand::{Group, Hand, Shape, Witness};
use crate::scorer::context::check_exposed;
use crate::scorer::{ScoreResult, Scorer};
use crate::search::{
    standard_searches, ConventionalSearch, EightPairsSearch, SearchBudget, ShapeSearch,
};
use crate::tiles::Tile;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub shape: Shape,
    pub witness: Witness,
    pub score: ScoreResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "resolution")]
pub enum Verdict {
    Win(Resolution),
    /// Some grammar completed the hand but no shape reached the minimum score.
    BelowThreshold(Resolution),
    NoShape,
}

impl Verdict {
    pub fn into_win(self) -> Option<Resolution> {
        match self {
            Self::Win(r) => Some(r),
            _ => None,
        }
    }
}

/// Runs every admitted grammar on a completed hand and keeps the best score.
pub struct Resolver {
    scorer: Arc<Scorer>,
    searches: Vec<Arc<dyn ShapeSearch>>,
    min_score: u32,
    node_budget: u64,
}

impl Resolver {
    pub fn new(config: &Config, scorer: Arc<Scorer>) -> Self {
        let searches = standard_searches(scorer.validator);
        Self::from_components(config, scorer, searches)
    }

    pub fn from_components(
        config: &Config,
        scorer: Arc<Scorer>,
        searches: Vec<Arc<dyn ShapeSearch>>,
    ) -> Self {
        info!(
            "Resolver Init: grammars={:?}, min_score={}, node_budget={}",
            searches.iter().map(|s| s.shape()).collect::<Vec<_>>(),
            config.rules.min_score,
            config.search.search_node_budget
        );
        Self {
            scorer,
            searches,
            min_score: config.rules.min_score,
            node_budget: config.search.search_node_budget,
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn min_score(&self) -> u32 {
        self.min_score
    }

    pub fn searches(&self) -> &[Arc<dyn ShapeSearch>] {
        &self.searches
    }

    pub fn check_exposed(&self, hand: &Hand) -> MjResult<()> {
        check_exposed(hand, &self.scorer.validator)
    }

    /// Every admitted grammar that completes the hand, scored, whether or not
    /// it reaches the minimum.
    pub fn attempts(&self, hand: &Hand) -> MjResult<Vec<Resolution>> {
        hand.check_complete()?;
        self.check_exposed(hand)?;

        let mut attempts: Vec<Resolution> = Vec::new();
        for search in &self.searches {
            let shape = search.shape();
            if !search.admits(&hand.exposed) || !search.accepts_len(hand.concealed.len()) {
                debug!("Skipping {} grammar for this hand", shape);
                continue;
            }

            let mut budget = SearchBudget::new(self.node_budget);
            match search.search(&hand.concealed, &mut budget) {
                Some(witness) => {
                    let score = self.scorer.score(hand, shape, &witness);
                    debug!("{} grammar: total={}, qualifying={}", shape, score.total, score.qualifying);
                    attempts.push(Resolution {
                        shape,
                        witness,
                        score,
                    });
                }
                None if budget.exhausted() => {
                    warn!("{} search exhausted its budget of {} nodes", shape, self.node_budget);
                }
                None => debug!("{} grammar found no decomposition", shape),
            }
        }
        Ok(attempts)
    }

    pub fn resolve(&self, hand: &Hand) -> MjResult<Verdict> {
        let attempts = self.attempts(hand)?;

        let rank = |r: &Resolution| (r.score.total, r.shape.priority());
        let (qualifying, short): (Vec<Resolution>, Vec<Resolution>) = attempts
            .into_iter()
            .partition(|r| r.score.qualifying >= self.min_score);

        if let Some(best) = qualifying.into_iter().max_by_key(rank) {
            info!("Win as {} for {} points", best.shape, best.score.total);
            return Ok(Verdict::Win(best));
        }
        if let Some(best) = short.into_iter().max_by_key(rank) {
            info!(
                "{} shape complete but {} qualifying points is below {}",
                best.shape, best.score.qualifying, self.min_score
            );
            return Ok(Verdict::BelowThreshold(best));
        }
        Ok(Verdict::NoShape)
    }

    pub fn resolve_win(&self, hand: &Hand) -> MjResult<Option<Resolution>> {
        Ok(self.resolve(hand)?.into_win())
    }

    /// Scores the grouping the player declared instead of searching for one.
    pub fn score_declared(&self, hand: &Hand) -> MjResult<Resolution> {
        hand.check_complete()?;
        self.check_exposed(hand)?;

        let declared = hand.declared_groups.as_ref().ok_or_else(|| {
            MahjongError::InvalidDeclaredWin("hand declares no grouping".to_string())
        })?;
        let shape = declared_shape(declared)?;

        let search = self
            .searches
            .iter()
            .find(|s| s.shape() == shape)
            .ok_or_else(|| {
                MahjongError::InvalidDeclaredWin(format!("{} grammar is not enabled", shape))
            })?;
        if !search.admits(&hand.exposed) {
            return Err(MahjongError::InvalidDeclaredWin(format!(
                "{} shape is not possible with the exposed groups",
                shape
            )));
        }

        let groups = declared
            .iter()
            .map(|tiles| {
                let group = match shape {
                    Shape::Arithmetic => self.scorer.validator.resolve(tiles),
                    Shape::Conventional => ConventionalSearch.resolve_group(tiles),
                    Shape::EightPairs => EightPairsSearch.resolve_pair(tiles),
                };
                group.ok_or_else(|| invalid_group(tiles))
            })
            .collect::<MjResult<Vec<Group>>>()?;

        let witness = Witness { groups };
        let score = self.scorer.score(hand, shape, &witness);
        if score.qualifying < self.min_score {
            return Err(MahjongError::InvalidDeclaredWin(format!(
                "{} qualifying points is below the minimum of {}",
                score.qualifying, self.min_score
            )));
        }

        info!("Declared {} win for {} points", shape, score.total);
        Ok(Resolution {
            shape,
            witness,
            score,
        })
    }
}

/// The grammar implied by the declared group sizes.
fn declared_shape(groups: &[Vec<Tile>]) -> MjResult<Shape> {
    let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();
    let pairs = sizes.iter().filter(|&&n| n == 2).count();
    let melds = sizes.iter().filter(|&&n| n == 3).count();

    if sizes.iter().all(|&n| n == GROUP_SIZE) {
        Ok(Shape::Arithmetic)
    } else if pairs == 8 && sizes.len() == 8 {
        Ok(Shape::EightPairs)
    } else if pairs == 2 && melds == 4 && sizes.len() == 6 {
        Ok(Shape::Conventional)
    } else {
        Err(MahjongError::InvalidDeclaredWin(format!(
            "group sizes {:?} match no winning shape",
            sizes
        )))
    }
}

fn invalid_group(tiles: &[Tile]) -> MahjongError {
    let text: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
    if tiles.iter().any(Tile::is_unresolved) {
        MahjongError::UnresolvableWildcard(format!("no assignment completes [{}]", text.join(" ")))
    } else {
        MahjongError::InvalidDeclaredWin(format!("[{}] is not a valid group", text.join(" ")))
    }
}
