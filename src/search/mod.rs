pub mod conventional;
pub mod eight_pairs;
pub mod partition;
pub mod validator;

use crate::hand::{ExposedGroup, ExposedKind, Shape, Witness};
use crate::tiles::Tile;
use std::sync::Arc;

pub use self::conventional::ConventionalSearch;
pub use self::eight_pairs::EightPairsSearch;
pub use self::partition::{PartitionSearch, SearchOutcome};
pub use self::validator::GroupValidator;

/// Bounds the work a single search may do. Every validator call and every
/// recursion node costs one unit.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    limit: u64,
    spent: u64,
}

impl SearchBudget {
    pub fn new(limit: u64) -> Self {
        Self { limit, spent: 0 }
    }

    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    /// Charges one unit. Returns false once the budget is gone.
    #[inline]
    pub fn spend(&mut self) -> bool {
        if self.spent >= self.limit {
            return false;
        }
        self.spent += 1;
        true
    }

    #[inline]
    pub fn exhausted(&self) -> bool {
        self.spent >= self.limit
    }

    pub fn spent(&self) -> u64 {
        self.spent
    }
}

/// One winning grammar. Resolution and readiness receive the grammars they
/// should try; a grammar left out is simply never attempted.
pub trait ShapeSearch: Send + Sync {
    fn shape(&self) -> Shape;

    /// Whether the revealed groups leave room for this grammar.
    fn admits(&self, exposed: &[ExposedGroup]) -> bool;

    /// Whether a concealed part of `len` tiles could complete this grammar.
    fn accepts_len(&self, len: usize) -> bool;

    fn search(&self, tiles: &[Tile], budget: &mut SearchBudget) -> Option<Witness>;
}

/// Conventional and eight-pairs shapes only tolerate single-tile reveals.
pub(crate) fn only_isolated(exposed: &[ExposedGroup]) -> bool {
    exposed.iter().all(|g| g.kind == ExposedKind::Isolated)
}

/// All three grammars, in priority order.
pub fn standard_searches(validator: GroupValidator) -> Vec<Arc<dyn ShapeSearch>> {
    vec![
        Arc::new(PartitionSearch::new(validator)),
        Arc::new(ConventionalSearch),
        Arc::new(EightPairsSearch),
    ]
}
