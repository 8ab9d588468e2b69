use arith_mahjong::api::MahjongState;
use arith_mahjong::config::Config;
use arith_mahjong::hand::Shape;
use arith_mahjong::notation::parse_hand;
use arith_mahjong::scorer::context::{Played, ScoreContext};
use arith_mahjong::scorer::{BonusCategory, ScoreResult};
use arith_mahjong::tiles::{Face, Tile};
use rstest::rstest;

/// Strict rules with no minimum, so every declared grouping scores.
fn open_state() -> MahjongState {
    let mut config = Config::default();
    config.rules.min_score = 0;
    MahjongState::new(config).unwrap()
}

fn declared(notation: &str) -> ScoreResult {
    let hand = parse_hand(notation).unwrap();
    open_state()
        .resolver
        .score_declared(&hand)
        .unwrap_or_else(|e| panic!("{} should score: {}", notation, e))
        .score
}

/// A bare context holding only the given played tiles.
fn played_context(tiles: impl IntoIterator<Item = Tile>) -> ScoreContext {
    ScoreContext {
        shape: Shape::Arithmetic,
        groups: Vec::new(),
        exposed_groups: Vec::new(),
        played: tiles
            .into_iter()
            .map(|tile| Played {
                tile,
                face: tile.face_value(),
            })
            .collect(),
        isolated: Vec::new(),
        identities: Vec::new(),
        concealed_quadruples: Vec::new(),
        exposed_quadruples: Vec::new(),
        kongs: 0,
        claimed_groups: 0,
        concealed: true,
        win_face: None,
        method: None,
    }
}

// --- DECLARED HANDS, ONE PER CATEGORY ---
#[rstest]
#[case::great_three_dragons(
    "+ + + + / × × × × / ∧ ∧ ∧ ∧ / 2 × 6 12",
    BonusCategory::GreatThreeDragons,
    &[BonusCategory::AllEven, BonusCategory::CommonTiles],
    &[BonusCategory::ThreeQuadruples, BonusCategory::LittleThreeDragons, BonusCategory::ConcealedQuadruple],
    110
)]
#[case::great_four_winds(
    "10 + 10 20 / 20 + 10 30 / 10 + 30 40 / 2 × 6 12",
    BonusCategory::GreatFourWinds,
    &[BonusCategory::LittleFourWinds, BonusCategory::AllEven, BonusCategory::Twins],
    &[],
    146
)]
#[case::little_four_winds(
    "10 + 10 20 / 20 + 10 30 / 3 + 7 10 / 2 × 6 12",
    BonusCategory::LittleFourWinds,
    &[BonusCategory::Twins],
    &[],
    38
)]
#[case::no_composites(
    "2 + 11 13 / 2 + 17 19 / 1 × 7 7 / 0 × 3 0",
    BonusCategory::NoComposites,
    &[BonusCategory::AllWithRare, BonusCategory::Twins],
    &[],
    102
)]
#[case::thirteen_orphans(
    "2 × 20 40 / 9 ∧ 0 1 / 10 + 11 21 / 19 + 30 49",
    BonusCategory::ThirteenOrphans,
    &[BonusCategory::AllWithRare, BonusCategory::Power],
    &[],
    100
)]
#[case::eight_immortals(
    "(11d) (13d) (17d) (19d) (jt) (jtong) (jw) (js) 3 + 7 10 / 5 + 9 14 / 2 × 6 12 / 4 × 6 24",
    BonusCategory::EightImmortals,
    &[BonusCategory::BonusTile],
    &[BonusCategory::FourImmortals],
    106
)]
#[case::all_powers_of_two(
    "2 × 4 8 / 8 + 8 16 / 2 ∧ 4 16 / 16 + 16 32",
    BonusCategory::AllPowersOfTwo,
    &[BonusCategory::AllEven, BonusCategory::Power],
    &[],
    84
)]
#[case::power_flush(
    "2 ∧ 3 8 / 3 ∧ 2 9 / 5 ∧ 2 25 / 7 ∧ 2 49",
    BonusCategory::PowerFlush,
    &[],
    &[BonusCategory::Power],
    66
)]
#[case::two_identical_pairs(
    "3 + 7 10 / 3 + 7 10 / 5 + 9 14 / 5 + 9 14",
    BonusCategory::TwoIdenticalPairs,
    &[BonusCategory::AdditionFlush, BonusCategory::Twins],
    &[BonusCategory::OneIdenticalPair, BonusCategory::NoTwos],
    82
)]
#[case::one_identical_pair(
    "3 + 7 10 / 3 + 7 10 / 2 × 6 12 / 4 × 6 24",
    BonusCategory::OneIdenticalPair,
    &[BonusCategory::CommonTiles],
    &[],
    14
)]
#[case::all_two_digit(
    "10 + 10 20 / 11 + 19 30 / 12 + 13 25 / 15 + 21 36",
    BonusCategory::AllTwoDigit,
    &[BonusCategory::AdditionFlush, BonusCategory::AllWithRare],
    &[BonusCategory::NoTwos],
    70
)]
#[case::all_single_digit(
    "2 × 3 6 / 2 × 4 8 / 3 ∧ 2 9 / 1 × 5 5",
    BonusCategory::AllSingleDigit,
    &[BonusCategory::Power],
    &[],
    28
)]
#[case::all_multiples(
    "6 + 6 12 / 12 + 18 30 / 0 + 24 24 / 6 × 6 36",
    BonusCategory::AllMultiples,
    &[BonusCategory::AllEven, BonusCategory::NoTwos],
    &[BonusCategory::AllTriples],
    72
)]
#[case::all_triples(
    "3 + 9 12 / 3 × 6 18 / 6 + 15 21 / 0 + 27 27",
    BonusCategory::AllTriples,
    &[BonusCategory::NoTwos, BonusCategory::Twins],
    &[],
    36
)]
#[case::all_composite(
    "4 + 6 10 / 8 + 12 20 / 4 × 9 36 / 6 + 9 15",
    BonusCategory::AllComposite,
    &[BonusCategory::NoTwos],
    &[],
    24
)]
#[case::all_rare(
    "1 + 19 20 / 11 + 14 25 / 13 + 15 28 / 0 + 21 21",
    BonusCategory::AllRare,
    &[BonusCategory::AdditionFlush, BonusCategory::Twins],
    &[BonusCategory::AllWithRare, BonusCategory::NoTwos],
    66
)]
#[case::little_three_dragons(
    "+ + + + / × × × × / 3 + 7 10 / 2 × 6 12",
    BonusCategory::LittleThreeDragons,
    &[BonusCategory::ConcealedQuadruple, BonusCategory::CommonTiles],
    &[],
    46
)]
#[case::earth_dragon(
    "2 × 4 8 / 3 + 7 10 / 5 + 6 11 / 9 ∧ 0 1",
    BonusCategory::EarthDragon,
    &[BonusCategory::Power],
    &[BonusCategory::Concealed],
    34
)]
#[case::four_gates(
    "5 5 5 5 / 3 + 7 10 / 2 × 6 12 / 2 ∧ 3 8",
    BonusCategory::FourGates,
    &[BonusCategory::CommonTiles, BonusCategory::Concealed],
    &[BonusCategory::ConcealedQuadruple, BonusCategory::Power],
    18
)]
#[case::four_gates_exposed(
    "(5 5 5 5) 3 + 7 10 / 2 × 6 12 / 2 ∧ 3 8",
    BonusCategory::FourGates,
    &[BonusCategory::CommonTiles],
    &[BonusCategory::ExposedQuadruple, BonusCategory::Power],
    16
)]
#[case::multiplication_flush(
    "2 × 6 12 / 3 × 5 15 / 4 × 6 24 / 2 × 9 18",
    BonusCategory::MultiplicationFlush,
    &[BonusCategory::Concealed],
    &[],
    14
)]
fn test_category_triggers(
    #[case] notation: &str,
    #[case] category: BonusCategory,
    #[case] also: &[BonusCategory],
    #[case] excluded: &[BonusCategory],
    #[case] total: u32,
) {
    let score = declared(notation);

    assert!(score.has(category), "{} missing from {:?}", category, score.hits);
    for cat in also {
        assert!(score.has(*cat), "{} missing from {:?}", cat, score.hits);
    }
    for cat in excluded {
        assert!(score.was_excluded(*cat), "{} should be implied", cat);
        assert!(!score.has(*cat));
    }
    assert_eq!(score.total, total, "{:?}", score.hits);
}

#[test]
fn test_counted_categories() {
    let score = declared("+ + + + / × × × × / 3 + 7 10 / 2 × 6 12");
    assert_eq!(score.count(BonusCategory::ConcealedQuadruple), 2);

    let score = declared("10 + 10 20 / 20 + 10 30 / 10 + 30 40 / 2 × 6 12");
    // Two twenties and two thirties
    assert_eq!(score.count(BonusCategory::Twins), 2);

    let score = declared("(11d) (13d) (17d) (19d) (jt) (jtong) (jw) (js) 3 + 7 10 / 5 + 9 14 / 2 × 6 12 / 4 × 6 24");
    assert_eq!(score.count(BonusCategory::BonusTile), 8);
    // Only the revealed bonus tiles are ornamental
    assert_eq!(score.qualifying, 98);
}

#[test]
fn test_no_flush_with_mixed_operators() {
    let score = declared("2 × 6 12 / 3 × 5 15 / 4 × 6 24 / 3 + 7 10");
    assert!(!score.has(BonusCategory::MultiplicationFlush));
    assert!(!score.has(BonusCategory::AdditionFlush));
}

// --- DRAGONS ---
#[test]
fn test_heavenly_dragon_implies_earth_dragon() {
    let state = open_state();
    let ctx = played_context((1..=16).map(Tile::number));
    let score = state.scorer.score_context(&ctx);

    assert!(score.has(BonusCategory::HeavenlyDragon));
    assert!(score.was_excluded(BonusCategory::EarthDragon));
    assert!(score.was_excluded(BonusCategory::Concealed));
    assert_eq!(score.total, 88);
}

#[test]
fn test_heavenly_dragon_implies_all_rare() {
    // Every tile a declared wildcard counts as rare
    let state = open_state();
    let tiles = (1..=16).filter_map(|n| Tile::stand_in(Face::Number(n)));
    let score = state.scorer.score_context(&played_context(tiles));

    assert!(score.has(BonusCategory::HeavenlyDragon));
    assert!(score.was_excluded(BonusCategory::AllRare));
    assert_eq!(score.total, 88);
}

#[test]
fn test_broken_run_is_no_dragon() {
    let state = open_state();
    let ctx = played_context((1..=16).filter(|&n| n != 8).map(Tile::number));
    let score = state.scorer.score_context(&ctx);

    assert!(!score.has(BonusCategory::HeavenlyDragon));
    // No twelve-term progression survives the gap at eight
    assert!(!score.has(BonusCategory::EarthDragon));
}

// --- REVEALS ---
#[rstest]
#[case("{d}", true)]
#[case("{h}", true)]
#[case("{z}", false)]
fn test_fully_exposed(#[case] method: &str, #[case] fires: bool) {
    let hand = parse_hand(&format!("(3 + 7 10) (5 + 9 14) (2 × 6 12) 4 × 6 24 {}", method)).unwrap();
    let res = open_state()
        .resolver
        .attempts(&hand)
        .unwrap()
        .into_iter()
        .find(|r| r.shape == Shape::Arithmetic)
        .unwrap();

    assert_eq!(res.score.has(BonusCategory::FullyExposed), fires);
    assert!(!res.score.has(BonusCategory::Concealed));
}
