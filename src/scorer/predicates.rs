use super::categories::BonusCategory;
use super::context::ScoreContext;
use crate::consts::{face_count, ORPHAN_FACES};
use crate::hand::{GroupKind, Shape, WinMethod};
use crate::tiles::{Face, Operator};
use std::collections::{BTreeSet, HashMap};

/// How many times a category fires; 0 means it does not.
pub type Predicate = fn(&ScoreContext) -> u32;

/// The bonus table. The fallback category has no predicate; the engine awards
/// it when nothing else survives.
pub static PREDICATES: &[(BonusCategory, Predicate)] = &[
    (BonusCategory::GreatThreeDragons, great_three_dragons),
    (BonusCategory::GreatFourWinds, great_four_winds),
    (BonusCategory::AllOdd, all_odd),
    (BonusCategory::HeavenlyDragon, heavenly_dragon),
    (BonusCategory::ConsecutivePairs, consecutive_pairs),
    (BonusCategory::NoComposites, no_composites),
    (BonusCategory::ThirteenOrphans, thirteen_orphans),
    (BonusCategory::FourIdentical, four_identical),
    (BonusCategory::FourQuadruples, four_quadruples),
    (BonusCategory::EightImmortals, eight_immortals),
    (BonusCategory::AllPowersOfTwo, all_powers_of_two),
    (BonusCategory::PowerFlush, power_flush),
    (BonusCategory::TwoIdenticalPairs, two_identical_pairs),
    (BonusCategory::AllTwoDigit, all_two_digit),
    (BonusCategory::ThreeQuadruples, three_quadruples),
    (BonusCategory::ThreeIdentical, three_identical),
    (BonusCategory::AllMultiples, all_multiples),
    (BonusCategory::AllRare, all_rare),
    (BonusCategory::LittleThreeDragons, little_three_dragons),
    (BonusCategory::EarthDragon, earth_dragon),
    (BonusCategory::LittleFourWinds, little_four_winds),
    (BonusCategory::FirstTurnWin, first_turn_win),
    (BonusCategory::FourImmortals, four_immortals),
    (BonusCategory::EightPairs, eight_pairs),
    (BonusCategory::AllSingleDigit, all_single_digit),
    (BonusCategory::AllTriples, all_triples),
    (BonusCategory::AllComposite, all_composite),
    (BonusCategory::AllEven, all_even),
    (BonusCategory::LastTileWin, last_tile_win),
    (BonusCategory::AdditionFlush, addition_flush),
    (BonusCategory::FourGates, four_gates),
    (BonusCategory::MultiplicationFlush, multiplication_flush),
    (BonusCategory::OneIdenticalPair, one_identical_pair),
    (BonusCategory::AllWithRare, all_with_rare),
    (BonusCategory::Conventional, conventional),
    (BonusCategory::AfterKongWin, after_kong_win),
    (BonusCategory::RobbingKong, robbing_kong),
    (BonusCategory::NoTwos, no_twos),
    (BonusCategory::SelfDrawnConcealed, self_drawn_concealed),
    (BonusCategory::CommonTiles, common_tiles),
    (BonusCategory::Twins, twins),
    (BonusCategory::FullyExposed, fully_exposed),
    (BonusCategory::ConcealedQuadruple, concealed_quadruple),
    (BonusCategory::Kong, kong),
    (BonusCategory::OperatorWait, operator_wait),
    (BonusCategory::Concealed, concealed),
    (BonusCategory::ExposedQuadruple, exposed_quadruple),
    (BonusCategory::BonusTile, bonus_tiles),
    (BonusCategory::Power, power),
];

#[inline]
fn flag(hit: bool) -> u32 {
    hit as u32
}

fn all_numbers(ctx: &ScoreContext, pred: impl Fn(u8) -> bool) -> u32 {
    let mut any = false;
    for n in ctx.numbers() {
        if !pred(n) {
            return 0;
        }
        any = true;
    }
    flag(any)
}

pub fn is_composite(n: u8) -> bool {
    let n = n as u32;
    n >= 4 && (2..n).take_while(|d| d * d <= n).any(|d| n % d == 0)
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn tens(ctx: &ScoreContext) -> usize {
    ctx.numbers().filter(|n| n % 10 == 0).count()
}

fn max_repeat(ctx: &ScoreContext) -> u32 {
    ctx.identity_counts().iter().map(|(_, n)| *n).max().unwrap_or(0)
}

fn flush(ctx: &ScoreContext, op: Operator) -> u32 {
    flag(ctx.identities.len() == 4 && ctx.identities.iter().all(|id| id.op == op))
}

fn method_is(ctx: &ScoreContext, method: WinMethod) -> u32 {
    flag(ctx.method == Some(method))
}

fn distinct_numbers(ctx: &ScoreContext) -> BTreeSet<u8> {
    ctx.all_faces().filter_map(Face::number).collect()
}

// Number-set rules

fn all_odd(c: &ScoreContext) -> u32 {
    all_numbers(c, |n| n % 2 == 1)
}

fn all_even(c: &ScoreContext) -> u32 {
    all_numbers(c, |n| n % 2 == 0)
}

fn all_powers_of_two(c: &ScoreContext) -> u32 {
    all_numbers(c, |n| n.is_power_of_two())
}

fn all_two_digit(c: &ScoreContext) -> u32 {
    all_numbers(c, |n| n >= 10)
}

fn all_single_digit(c: &ScoreContext) -> u32 {
    all_numbers(c, |n| n <= 9)
}

fn all_triples(c: &ScoreContext) -> u32 {
    all_numbers(c, |n| n % 3 == 0)
}

fn all_composite(c: &ScoreContext) -> u32 {
    all_numbers(c, is_composite)
}

fn no_composites(c: &ScoreContext) -> u32 {
    flag(!c.numbers().any(is_composite))
}

fn no_twos(c: &ScoreContext) -> u32 {
    flag(!c.numbers().any(|n| n == 2))
}

fn great_four_winds(c: &ScoreContext) -> u32 {
    flag(tens(c) >= 9)
}

fn little_four_winds(c: &ScoreContext) -> u32 {
    flag(tens(c) >= 6)
}

// Identity and quadruple rules

fn four_identical(c: &ScoreContext) -> u32 {
    flag(max_repeat(c) >= 4)
}

fn three_identical(c: &ScoreContext) -> u32 {
    flag(max_repeat(c) >= 3)
}

fn one_identical_pair(c: &ScoreContext) -> u32 {
    flag(max_repeat(c) >= 2)
}

fn two_identical_pairs(c: &ScoreContext) -> u32 {
    flag(c.identity_counts().iter().filter(|(_, n)| *n >= 2).count() >= 2)
}

fn four_quadruples(c: &ScoreContext) -> u32 {
    flag(c.quadruple_count() >= 4)
}

fn three_quadruples(c: &ScoreContext) -> u32 {
    flag(c.quadruple_count() >= 3)
}

fn power_flush(c: &ScoreContext) -> u32 {
    flush(c, Operator::Power)
}

fn addition_flush(c: &ScoreContext) -> u32 {
    flush(c, Operator::Plus)
}

fn multiplication_flush(c: &ScoreContext) -> u32 {
    flush(c, Operator::Times)
}

fn power(c: &ScoreContext) -> u32 {
    c.identities.iter().filter(|id| id.op == Operator::Power).count() as u32
}

fn little_three_dragons(c: &ScoreContext) -> u32 {
    flag(c.operator_tiles() >= 8)
}

// Reveal and trigger rules

fn eight_immortals(c: &ScoreContext) -> u32 {
    flag(c.isolated_bonus() >= 4 && c.isolated_wildcards() >= 4)
}

fn four_immortals(c: &ScoreContext) -> u32 {
    flag(c.isolated_bonus() >= 4 || c.isolated_wildcards() >= 4)
}

fn eight_pairs(c: &ScoreContext) -> u32 {
    flag(c.shape == Shape::EightPairs)
}

fn conventional(c: &ScoreContext) -> u32 {
    flag(c.shape == Shape::Conventional)
}

fn first_turn_win(c: &ScoreContext) -> u32 {
    method_is(c, WinMethod::FirstTurn)
}

fn last_tile_win(c: &ScoreContext) -> u32 {
    method_is(c, WinMethod::LastTile)
}

fn after_kong_win(c: &ScoreContext) -> u32 {
    method_is(c, WinMethod::AfterKong)
}

fn robbing_kong(c: &ScoreContext) -> u32 {
    method_is(c, WinMethod::RobReveal)
}

fn self_drawn_concealed(c: &ScoreContext) -> u32 {
    flag(c.concealed && c.method == Some(WinMethod::SelfDraw))
}

fn fully_exposed(c: &ScoreContext) -> u32 {
    flag(c.claimed_groups >= 3 && c.method.is_some_and(|m| m != WinMethod::SelfDraw))
}

fn concealed_quadruple(c: &ScoreContext) -> u32 {
    c.concealed_quadruples.len() as u32
}

fn exposed_quadruple(c: &ScoreContext) -> u32 {
    c.exposed_quadruples.len() as u32
}

fn kong(c: &ScoreContext) -> u32 {
    c.kongs
}

fn operator_wait(c: &ScoreContext) -> u32 {
    flag(c.win_face.is_some_and(Face::is_operator))
}

fn concealed(c: &ScoreContext) -> u32 {
    flag(c.concealed)
}

fn great_three_dragons(ctx: &ScoreContext) -> u32 {
    let ops: BTreeSet<Operator> = ctx.quadruple_faces().filter_map(Face::operator).collect();
    flag(ops.len() >= 3)
}

fn heavenly_dragon(ctx: &ScoreContext) -> u32 {
    let nums = distinct_numbers(ctx);
    let mut run = 0;
    let mut prev: Option<u8> = None;
    for &n in &nums {
        run = match prev {
            Some(p) if n == p + 1 => run + 1,
            _ => 1,
        };
        if run >= 16 {
            return 1;
        }
        prev = Some(n);
    }
    0
}

fn earth_dragon(ctx: &ScoreContext) -> u32 {
    let nums = distinct_numbers(ctx);
    for &start in &nums {
        for step in 1..=4u8 {
            let holds = (0..12u32).all(|i| {
                let v = start as u32 + i * step as u32;
                v <= u8::MAX as u32 && nums.contains(&(v as u8))
            });
            if holds {
                return 1;
            }
        }
    }
    0
}

fn consecutive_pairs(ctx: &ScoreContext) -> u32 {
    if ctx.shape != Shape::EightPairs || !ctx.concealed {
        return 0;
    }
    let mut values = Vec::with_capacity(ctx.groups.len());
    for g in &ctx.groups {
        match g.faces.first().copied().flatten().and_then(Face::number) {
            Some(n) => values.push(n),
            None => return 0,
        }
    }
    values.sort_unstable();
    let Some(step) = values.get(1).zip(values.first()).map(|(b, a)| b - a) else {
        return 0;
    };
    flag(step > 0 && values.windows(2).all(|w| w[1] - w[0] == step))
}

fn thirteen_orphans(ctx: &ScoreContext) -> u32 {
    let held: BTreeSet<Face> = ctx.all_faces().collect();
    flag(ORPHAN_FACES.iter().all(|f| held.contains(f)))
}

fn all_multiples(ctx: &ScoreContext) -> u32 {
    let g = ctx.numbers().fold(0u32, |acc, n| gcd(acc, n as u32));
    let empty = ctx.numbers().next().is_none();
    flag(empty || g >= 4)
}

fn all_rare(ctx: &ScoreContext) -> u32 {
    flag(ctx.played.iter().all(|p| {
        p.tile.is_wildcard()
            || match p.face {
                Some(Face::Op(_)) => true,
                Some(face) => face_count(face) <= 2,
                None => false,
            }
    }))
}

fn four_gates(ctx: &ScoreContext) -> u32 {
    let ops: BTreeSet<Operator> = ctx.identities.iter().map(|id| id.op).collect();
    flag(ctx.quadruple_count() == 1 && ctx.identities.len() == 3 && ops.len() == 3)
}

fn all_with_rare(ctx: &ScoreContext) -> u32 {
    if ctx.shape != Shape::Arithmetic {
        return 0;
    }
    let groups = ctx
        .groups
        .iter()
        .chain(ctx.exposed_groups.iter().map(|(_, g)| g))
        .filter(|g| matches!(g.kind, GroupKind::Identity(_) | GroupKind::Quadruple(_)));
    let mut any = false;
    for g in groups {
        any = true;
        let rare = g
            .tiles
            .iter()
            .any(|t| !t.is_wildcard() && t.face_value().is_some_and(|f| face_count(f) == 2));
        if !rare {
            return 0;
        }
    }
    flag(any)
}

fn common_tiles(ctx: &ScoreContext) -> u32 {
    flag(
        ctx.played
            .iter()
            .all(|p| p.face.is_some_and(|f| face_count(f) >= 4)),
    )
}

fn twins(ctx: &ScoreContext) -> u32 {
    let mut held: HashMap<Face, u32> = HashMap::new();
    let tiles = ctx.played.iter().map(|p| p.tile).chain(ctx.isolated.iter().copied());
    for tile in tiles.filter(|t| !t.is_wildcard()) {
        if let Some(face) = tile.face_value() {
            *held.entry(face).or_insert(0) += 1;
        }
    }
    held.iter()
        .filter(|(face, _)| face_count(**face) == 2)
        .map(|(_, n)| n / 2)
        .sum()
}

fn bonus_tiles(ctx: &ScoreContext) -> u32 {
    let held = ctx.played.iter().filter(|p| p.tile.is_bonus()).count() as u32;
    held + ctx.isolated_bonus() + ctx.isolated_wildcards()
}
