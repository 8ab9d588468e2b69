pub mod categories;
pub mod context;
pub mod engine;
pub mod loader;
pub mod predicates;
pub mod types;

pub use self::categories::BonusCategory;
pub use self::context::ScoreContext;
pub use self::types::{CategoryHit, Exclusion, ScoreResult};
use crate::config::RuleSet;
use crate::hand::{Hand, Shape, Witness};
use crate::search::GroupValidator;
use std::collections::HashMap;

pub struct Scorer {
    pub validator: GroupValidator,
    overrides: HashMap<BonusCategory, u32>,
}

impl Scorer {
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            validator: GroupValidator::new(rules),
            overrides: HashMap::new(),
        }
    }

    pub fn with_overrides<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (BonusCategory, u32)>,
    {
        self.overrides.extend(overrides);
        self
    }

    /// Points per occurrence, after overrides.
    pub fn points(&self, category: BonusCategory) -> u32 {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.points())
    }

    /// Scores one shape of `hand`, read through `witness`.
    pub fn score(&self, hand: &Hand, shape: Shape, witness: &Witness) -> ScoreResult {
        let ctx = ScoreContext::build(hand, shape, witness, &self.validator);
        engine::score(self, &ctx)
    }

    pub fn score_context(&self, ctx: &ScoreContext) -> ScoreResult {
        engine::score(self, ctx)
    }
}
