use arith_mahjong::api::{self, MahjongState};
use arith_mahjong::config::Config;
use arith_mahjong::hand::{GroupKind, Shape};
use arith_mahjong::notation::{parse_hand, parse_tiles};
use arith_mahjong::scorer::BonusCategory;
use arith_mahjong::search::{ConventionalSearch, EightPairsSearch, SearchBudget, ShapeSearch};
use arith_mahjong::tiles::{Face, Operator};

// Three bamboo runs worth of tiles plus a dots run, a characters run and two pairs
const CONVENTIONAL: &str = "1 2 3 4 5 6 11 12 13 21 32 35 7 7 + +";
const PAIRS: &str = "1 1 3 3 5 5 7 7 9 9 11 11 13 13 15 15";

fn state() -> MahjongState {
    MahjongState::new(Config::default()).unwrap()
}

// --- CONVENTIONAL ---

#[test]
fn test_conventional_win() {
    let hand = parse_hand(CONVENTIONAL).unwrap();
    let res = api::resolve_win(&state(), &hand).unwrap().unwrap();

    assert_eq!(res.shape, Shape::Conventional);
    assert_eq!(res.witness.groups.len(), 6);
    assert_eq!(res.score.total, 8);
    assert!(res.score.has(BonusCategory::Conventional));
    assert!(res.score.was_excluded(BonusCategory::Concealed));

    let pairs = res
        .witness
        .groups
        .iter()
        .filter(|g| g.kind == GroupKind::Pair)
        .count();
    assert_eq!(pairs, 2);
}

#[test]
fn test_conventional_wildcard_takes_its_class_range() {
    let tiles = parse_tiles("1 jt 3 4 5 6 11 12 13 21 32 35 7 7 + +").unwrap();
    let witness = ConventionalSearch
        .find(&tiles, &mut SearchBudget::unlimited())
        .unwrap();

    let played: Vec<Face> = witness
        .groups
        .iter()
        .flat_map(|g| g.faces.iter().flatten().copied())
        .collect();
    assert!(played.contains(&Face::Number(2)));

    // A dots wildcard cannot stand in for bamboo two
    let tiles = parse_tiles("1 jtong 3 4 5 6 11 12 13 21 32 35 7 7 + +").unwrap();
    assert!(ConventionalSearch
        .find(&tiles, &mut SearchBudget::unlimited())
        .is_none());
}

#[test]
fn test_zero_plays_any_conventional_tile() {
    let tiles = parse_tiles("1 2 3 4 5 6 11 12 13 21 32 35 7 7 + 0").unwrap();
    let witness = ConventionalSearch
        .find(&tiles, &mut SearchBudget::unlimited())
        .unwrap();

    let zero_face = witness
        .groups
        .iter()
        .flat_map(|g| g.tiles.iter().zip(&g.faces))
        .find(|(t, _)| t.face_value() == Some(Face::Number(0)))
        .and_then(|(_, f)| *f);
    assert_eq!(zero_face, Some(Face::Op(Operator::Plus)));
}

#[test]
fn test_conventional_runs_stay_in_suit() {
    // 8 9 and 11 are bamboo 8, 9 and dots 1: no run
    let tiles = parse_tiles("8 9 11 4 5 6 11 12 13 21 32 35 7 7 + +").unwrap();
    assert!(ConventionalSearch
        .find(&tiles, &mut SearchBudget::unlimited())
        .is_none());
}

#[test]
fn test_claimed_reveal_blocks_conventional() {
    let hand = parse_hand("(5 5 5 5) 1 2 3 4 5 6 11 12 13 7 7 +").unwrap();
    assert!(!ConventionalSearch.admits(&hand.exposed));
    assert!(!EightPairsSearch.admits(&hand.exposed));

    let hand = parse_hand("(jt) 1 2 3 4 5 6 11 12 13 21 32 35 7 7 + +").unwrap();
    assert!(ConventionalSearch.admits(&hand.exposed));
}

// --- EIGHT PAIRS ---

#[test]
fn test_eight_pairs_win() {
    let hand = parse_hand(PAIRS).unwrap();
    let res = api::resolve_win(&state(), &hand).unwrap().unwrap();

    assert_eq!(res.shape, Shape::EightPairs);
    assert!(res.score.has(BonusCategory::ConsecutivePairs));
    assert!(res.score.has(BonusCategory::AllOdd));
    assert!(res.score.was_excluded(BonusCategory::EightPairs));
    assert!(res.score.was_excluded(BonusCategory::NoTwos));
    // Four rare faces held in pairs
    assert_eq!(res.score.count(BonusCategory::Twins), 4);
    assert_eq!(res.score.total, 88 + 88 + 16);
}

#[test]
fn test_eight_pairs_with_wildcard() {
    let tiles = parse_tiles("1 1 3 3 5 5 7 7 9 9 11 11 13 13 15 jtong").unwrap();
    let witness = EightPairsSearch
        .find(&tiles, &mut SearchBudget::unlimited())
        .unwrap();
    assert_eq!(witness.groups.len(), 8);
    assert!(witness.groups.iter().all(|g| g.kind == GroupKind::Pair));
}

#[test]
fn test_eight_pairs_needs_sixteen() {
    let tiles = parse_tiles("1 1 3 3 5 5 7 7 9 9 11 11").unwrap();
    assert!(!EightPairsSearch.accepts_len(tiles.len()));
    assert!(EightPairsSearch
        .find(&tiles, &mut SearchBudget::unlimited())
        .is_none());
}
