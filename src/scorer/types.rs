use super::categories::BonusCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHit {
    pub category: BonusCategory,
    pub count: u32,
    // Points per occurrence
    pub points: u32,
}

impl CategoryHit {
    pub fn value(&self) -> u32 {
        self.points * self.count
    }
}

/// A triggered category dropped because a higher one implies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub category: BonusCategory,
    pub subsumed_by: BonusCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub hits: Vec<CategoryHit>,
    pub excluded: Vec<Exclusion>,
    pub total: u32,
    // Part of the total that counts toward the minimum winning score
    pub qualifying: u32,
}

impl ScoreResult {
    pub fn has(&self, category: BonusCategory) -> bool {
        self.hits.iter().any(|h| h.category == category)
    }

    pub fn count(&self, category: BonusCategory) -> u32 {
        self.hits
            .iter()
            .find(|h| h.category == category)
            .map_or(0, |h| h.count)
    }

    pub fn was_excluded(&self, category: BonusCategory) -> bool {
        self.excluded.iter().any(|e| e.category == category)
    }
}
