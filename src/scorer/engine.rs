use super::categories::BonusCategory;
use super::context::ScoreContext;
use super::predicates::PREDICATES;
use super::types::{CategoryHit, Exclusion, ScoreResult};
use super::Scorer;
use std::collections::HashSet;
use tracing::debug;

/// Evaluates every table entry, prunes subsumed categories and totals the
/// survivors.
pub fn score(scorer: &Scorer, ctx: &ScoreContext) -> ScoreResult {
    // 1. Trigger
    let triggered: Vec<(BonusCategory, u32)> = PREDICATES
        .iter()
        .filter_map(|(cat, predicate)| {
            let count = predicate(ctx);
            (count > 0).then_some((*cat, count))
        })
        .collect();

    // 2. Containment
    let present: HashSet<BonusCategory> = triggered.iter().map(|(c, _)| *c).collect();
    let mut excluded: Vec<Exclusion> = Vec::new();
    for (cat, _) in &triggered {
        for sub in cat.subsumes() {
            if present.contains(sub) && !excluded.iter().any(|e| e.category == *sub) {
                excluded.push(Exclusion {
                    category: *sub,
                    subsumed_by: *cat,
                });
            }
        }
    }

    let mut hits: Vec<CategoryHit> = triggered
        .into_iter()
        .filter(|(cat, _)| !excluded.iter().any(|e| e.category == *cat))
        .map(|(category, count)| CategoryHit {
            category,
            count,
            points: scorer.points(category),
        })
        .collect();

    // 3. Fallback
    if hits.is_empty() {
        hits.push(CategoryHit {
            category: BonusCategory::NoBonusWin,
            count: 1,
            points: scorer.points(BonusCategory::NoBonusWin),
        });
    }

    let total: u32 = hits.iter().map(CategoryHit::value).sum();

    // Isolated bonus tiles add to the total but not toward the minimum.
    let ornamental = if hits.iter().any(|h| h.category == BonusCategory::BonusTile) {
        scorer.points(BonusCategory::BonusTile) * ctx.isolated_bonus()
    } else {
        0
    };
    let qualifying = total.saturating_sub(ornamental);

    debug!(
        "Scored {} categories ({} excluded): total={}, qualifying={}",
        hits.len(),
        excluded.len(),
        total,
        qualifying
    );

    ScoreResult {
        hits,
        excluded,
        total,
        qualifying,
    }
}
