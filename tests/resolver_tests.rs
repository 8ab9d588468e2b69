use arith_mahjong::api::{self, MahjongState};
use arith_mahjong::config::Config;
use arith_mahjong::error::MahjongError;
use arith_mahjong::hand::Shape;
use arith_mahjong::notation::parse_hand;
use arith_mahjong::resolver::Verdict;
use arith_mahjong::scorer::BonusCategory;

// Four distinct identities: only the concealed bonus applies
const PLAIN: &str = "3 + 7 10 5 + 9 14 2 × 6 12 4 × 6 24";
// The same identity four times
const REPEATED: &str = "3 + 7 10 3 + 7 10 3 + 7 10 3 + 7 10";

fn state() -> MahjongState {
    MahjongState::new(Config::default()).unwrap()
}

#[test]
fn test_below_threshold_is_reported() {
    let hand = parse_hand(PLAIN).unwrap();
    match state().resolver.resolve(&hand).unwrap() {
        Verdict::BelowThreshold(res) => {
            assert_eq!(res.shape, Shape::Arithmetic);
            assert_eq!(res.score.total, 2);
            assert!(res.score.has(BonusCategory::Concealed));
        }
        other => panic!("expected below threshold, got {:?}", other),
    }
    assert!(api::resolve_win(&state(), &hand).unwrap().is_none());
}

#[test]
fn test_beginner_rules_accept_low_scores() {
    let relaxed = MahjongState::new(Config::beginner()).unwrap();
    let hand = parse_hand(PLAIN).unwrap();
    let res = api::resolve_win(&relaxed, &hand).unwrap().unwrap();
    assert_eq!(res.shape, Shape::Arithmetic);
}

#[test]
fn test_highest_total_wins() {
    let hand = parse_hand(REPEATED).unwrap();
    let s = state();

    // Eight pairs also completes this hand, but for fewer points
    let attempts = s.resolver.attempts(&hand).unwrap();
    assert_eq!(attempts.len(), 2);
    assert!(attempts.iter().any(|r| r.shape == Shape::EightPairs));

    let res = api::resolve_win(&s, &hand).unwrap().unwrap();
    assert_eq!(res.shape, Shape::Arithmetic);
    // four identical 88, addition flush 12, concealed 2, common tiles 4
    assert_eq!(res.score.total, 106);
    assert!(res.score.has(BonusCategory::FourIdentical));
    assert!(res.score.has(BonusCategory::AdditionFlush));
    assert!(res.score.was_excluded(BonusCategory::ThreeIdentical));
    assert!(res.score.was_excluded(BonusCategory::NoTwos));
}

#[test]
fn test_no_shape() {
    let hand = parse_hand("1 2 3 4 5 6 7 8 9 11 12 13 14 15 16 17").unwrap();
    assert_eq!(state().resolver.resolve(&hand).unwrap(), Verdict::NoShape);
}

#[test]
fn test_illegal_hand_size() {
    let hand = parse_hand("3 + 7 10 5 + 9 14 2 × 6 12 4 × 6").unwrap();
    let err = state().resolver.resolve(&hand).unwrap_err();
    match err {
        MahjongError::IllegalHandSize { actual, expected } => {
            assert_eq!(actual, 15);
            assert_eq!(expected, 16);
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert_eq!(
        state().resolver.resolve(&hand).unwrap_err().to_string(),
        "Illegal Hand Size: 15 tiles, expected 16 (1 short)"
    );
}

#[test]
fn test_exposed_groups_count_toward_size() {
    let hand = parse_hand("(3 + 7 10) 3 + 7 10 3 + 7 10 3 + 7 10").unwrap();
    let res = api::resolve_win(&state(), &hand).unwrap().unwrap();

    assert_eq!(res.shape, Shape::Arithmetic);
    assert_eq!(res.witness.groups.len(), 3);
    // The borrowed identity still counts toward four identical
    assert!(res.score.has(BonusCategory::FourIdentical));
    assert!(!res.score.has(BonusCategory::Concealed));
    assert_eq!(res.score.total, 104);
}

#[test]
fn test_invalid_exposed_group_rejected() {
    let hand = parse_hand("(3 + 7 11) 3 + 7 10 3 + 7 10 3 + 7 10").unwrap();
    assert!(matches!(
        state().resolver.resolve(&hand),
        Err(MahjongError::InvalidDeclaredWin(_))
    ));

    let hand = parse_hand("(5 5 5 5 6) 3 + 7 10 3 + 7 10 3 + 7 10").unwrap();
    assert!(matches!(
        state().resolver.resolve(&hand),
        Err(MahjongError::InvalidDeclaredWin(_))
    ));
}

#[test]
fn test_exposed_reveal_blocks_other_grammars() {
    let hand = parse_hand("(3 + 7 10) 3 + 7 10 3 + 7 10 3 + 7 10").unwrap();
    let attempts = state().resolver.attempts(&hand).unwrap();
    assert!(attempts.iter().all(|r| r.shape == Shape::Arithmetic));
}

#[test]
fn test_isolated_bonus_tiles_do_not_qualify() {
    let hand = parse_hand(&format!("{} (11d) (13d) (17d) (19d)", PLAIN)).unwrap();
    let res = api::resolve_win(&state(), &hand).unwrap().unwrap();

    assert!(res.score.has(BonusCategory::FourImmortals));
    assert_eq!(res.score.count(BonusCategory::BonusTile), 4);
    assert_eq!(res.score.total, 34);
    assert_eq!(res.score.qualifying, 26);
}

// --- DECLARED GROUPINGS ---

#[test]
fn test_declared_grouping_scored_as_given() {
    let relaxed = MahjongState::new(Config::beginner()).unwrap();
    let hand = parse_hand("3 + 7 10 / 5 + 9 14 / 2 × 6 12 / 4 × 6 24").unwrap();
    let res = relaxed.resolver.score_declared(&hand).unwrap();
    assert_eq!(res.shape, Shape::Arithmetic);
    assert_eq!(res.witness.groups.len(), 4);
}

#[test]
fn test_declared_below_minimum_rejected() {
    let hand = parse_hand("3 + 7 10 / 5 + 9 14 / 2 × 6 12 / 4 × 6 24").unwrap();
    assert!(matches!(
        state().resolver.score_declared(&hand),
        Err(MahjongError::InvalidDeclaredWin(_))
    ));
}

#[test]
fn test_declared_invalid_group() {
    let relaxed = MahjongState::new(Config::beginner()).unwrap();
    let hand = parse_hand("3 + 7 11 / 5 + 9 14 / 2 × 6 12 / 4 × 6 24").unwrap();
    assert!(matches!(
        relaxed.resolver.score_declared(&hand),
        Err(MahjongError::InvalidDeclaredWin(_))
    ));

    let hand = parse_hand("jt + 7 30 / 5 + 9 14 / 2 × 6 12 / 4 × 6 24").unwrap();
    assert!(matches!(
        relaxed.resolver.score_declared(&hand),
        Err(MahjongError::UnresolvableWildcard(_))
    ));
}

#[test]
fn test_declared_sizes_must_match_a_shape() {
    let relaxed = MahjongState::new(Config::beginner()).unwrap();
    let hand = parse_hand("3 + 7 10 5 / + 9 14 2 × 6 12 4 × 6 24").unwrap();
    assert!(matches!(
        relaxed.resolver.score_declared(&hand),
        Err(MahjongError::InvalidDeclaredWin(_))
    ));
}

#[test]
fn test_check_hand_uses_declared_path() {
    let relaxed = MahjongState::new(Config::beginner()).unwrap();
    let result = api::check_hand(&relaxed, "3 + 7 10 / 5 + 9 14 / 2 × 6 12 / 4 × 6 24").unwrap();
    assert!(result.declared);
    assert!(matches!(result.verdict, Verdict::Win(_)));
}

// --- IDENTITIES BESIDE QUADRUPLES ---
const MIXED: &str = "1 + 9 10 2 × 3 6 5 5 5 5 ∧ ∧ ∧ ∧";
const SMALL_SUM: &str = "1 + 2 3 2 × 3 6 5 5 5 5 ∧ ∧ ∧ ∧";

#[test]
fn test_identities_beside_quadruples() {
    let res = api::resolve_win(&state(), &parse_hand(MIXED).unwrap())
        .unwrap()
        .expect("two identities and two quadruples win");

    assert_eq!(res.shape, Shape::Arithmetic);
    assert_eq!(res.score.count(BonusCategory::ConcealedQuadruple), 2);
    // concealed quadruple 2 x 4, concealed 2
    assert_eq!(res.score.total, 10);
}

#[test]
fn test_small_sum_needs_permissive_addition() {
    let hand = parse_hand(SMALL_SUM).unwrap();
    assert_eq!(state().resolver.resolve(&hand).unwrap(), Verdict::NoShape);
    assert!(api::resolve_win(&state(), &hand).unwrap().is_none());

    let mut config = Config::default();
    config.rules.permissive_addition = true;
    let permissive = MahjongState::new(config).unwrap();
    let res = api::resolve_win(&permissive, &hand).unwrap().unwrap();

    assert_eq!(res.shape, Shape::Arithmetic);
    assert!(res.score.has(BonusCategory::AllSingleDigit));
    // all single digit 24, concealed quadruple 2 x 4, concealed 2
    assert_eq!(res.score.total, 34);
}
