use crate::config::Config;
use crate::consts::GROUP_SIZE;
use crate::error::{MahjongError, MjResult};
use crate::hand::{Group, Hand, Shape, Witness};
use crate::notation::{format_tiles, parse_hand, parse_tiles};
use crate::readiness::{ReadinessAnalyzer, ReadinessOptions, ReadinessReport};
use crate::resolver::{Resolution, Resolver, Verdict};
use crate::scorer::{BonusCategory, ScoreResult, Scorer};
use crate::search::{standard_searches, PartitionSearch};
use crate::tiles::Tile;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the services need, built once from a validated config.
pub struct MahjongState {
    pub config: Config,
    pub scorer: Arc<Scorer>,
    pub partition: PartitionSearch,
    pub resolver: Resolver,
    pub readiness: ReadinessAnalyzer,
}

impl MahjongState {
    pub fn new(config: Config) -> MjResult<Self> {
        Self::with_point_overrides(config, Vec::new())
    }

    pub fn with_point_overrides(
        config: Config,
        overrides: Vec<(BonusCategory, u32)>,
    ) -> MjResult<Self> {
        config.validate()?;
        let scorer = Arc::new(Scorer::new(&config.rules).with_overrides(overrides));
        let searches = standard_searches(scorer.validator);
        let resolver = Resolver::from_components(&config, scorer.clone(), searches.clone());
        let readiness = ReadinessAnalyzer::new(scorer.validator, searches, ReadinessOptions::from(&config));

        Ok(Self {
            partition: PartitionSearch::new(scorer.validator),
            config,
            scorer,
            resolver,
            readiness,
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub hand: String,
    pub declared: bool,
    pub verdict: Verdict,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReadyResult {
    pub hand: String,
    pub ready: bool,
    pub report: ReadinessReport,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub hand: String,
    pub min_score: u32,
    pub resolutions: Vec<Resolution>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GroupResult {
    pub tiles: String,
    pub valid: bool,
    pub group: Option<Group>,
}

/// Service: is this 4-tile set a valid arithmetic group?
pub fn validate_group(state: &MahjongState, tiles: &[Tile; GROUP_SIZE]) -> bool {
    state.scorer.validator.is_valid(tiles)
}

/// Service: arithmetic decomposition of a tile multiset.
pub fn partition(state: &MahjongState, tiles: &[Tile]) -> Option<Witness> {
    state
        .partition
        .run(tiles, state.config.search.search_node_budget)
        .witness
}

/// Service: best qualifying shape of a completed hand.
pub fn resolve_win(state: &MahjongState, hand: &Hand) -> MjResult<Option<Resolution>> {
    state.resolver.resolve_win(hand)
}

/// Service: completing faces of a hand one tile short, per grammar.
pub fn readiness(state: &MahjongState, hand: &Hand) -> MjResult<ReadinessReport> {
    state.readiness.analyze(hand)
}

/// Service: score one shape as read through `witness`.
pub fn score(state: &MahjongState, hand: &Hand, shape: Shape, witness: &Witness) -> ScoreResult {
    state.scorer.score(hand, shape, witness)
}

/// Service: parse and resolve a hand. A declared grouping is scored as given.
pub fn check_hand(state: &MahjongState, notation: &str) -> MjResult<CheckResult> {
    let hand = parse_hand(notation)?;
    let declared = hand.declared_groups.is_some();
    let verdict = if declared {
        Verdict::Win(state.resolver.score_declared(&hand)?)
    } else {
        state.resolver.resolve(&hand)?
    };

    Ok(CheckResult {
        hand: format_tiles(&hand.concealed),
        declared,
        verdict,
    })
}

pub fn ready_hand(state: &MahjongState, notation: &str) -> MjResult<ReadyResult> {
    let hand = parse_hand(notation)?;
    let report = state.readiness.analyze(&hand)?;

    Ok(ReadyResult {
        hand: format_tiles(&hand.concealed),
        ready: report.is_ready(),
        report,
    })
}

/// Service: every shape that completes the hand, best first.
pub fn score_hand(state: &MahjongState, notation: &str) -> MjResult<ScoreReport> {
    let hand = parse_hand(notation)?;
    let mut resolutions = state.resolver.attempts(&hand)?;
    resolutions.sort_by_key(|r| std::cmp::Reverse((r.score.total, r.shape.priority())));

    Ok(ScoreReport {
        hand: format_tiles(&hand.concealed),
        min_score: state.resolver.min_score(),
        resolutions,
    })
}

pub fn group_tiles(state: &MahjongState, notation: &str) -> MjResult<GroupResult> {
    let tiles = parse_tiles(notation)?;
    if tiles.len() != GROUP_SIZE {
        return Err(MahjongError::MalformedInput(format!(
            "a group holds exactly {} tiles, got {}",
            GROUP_SIZE,
            tiles.len()
        )));
    }
    let group = state.scorer.validator.resolve(&tiles);

    Ok(GroupResult {
        tiles: format_tiles(&tiles),
        valid: group.is_some(),
        group,
    })
}
