use arith_mahjong::hand::Hand;
use arith_mahjong::search::{GroupValidator, PartitionSearch, SearchBudget};
use arith_mahjong::tiles::{Operator, Tile};
use arith_mahjong::api::MahjongState;
use arith_mahjong::config::Config;
use proptest::prelude::*;

// --- STRATEGIES ---

// Identities over printed faces only
const IDENTITIES: [(Operator, u8, u8, u8); 12] = [
    (Operator::Plus, 3, 7, 10),
    (Operator::Plus, 5, 9, 14),
    (Operator::Plus, 8, 12, 20),
    (Operator::Plus, 15, 6, 21),
    (Operator::Plus, 10, 10, 20),
    (Operator::Times, 2, 6, 12),
    (Operator::Times, 3, 5, 15),
    (Operator::Times, 4, 6, 24),
    (Operator::Times, 5, 7, 35),
    (Operator::Times, 6, 6, 36),
    (Operator::Power, 2, 4, 16),
    (Operator::Power, 7, 2, 49),
];

fn identity_tiles(idx: usize) -> Vec<Tile> {
    let (op, a, b, c) = IDENTITIES[idx];
    vec![Tile::number(a), Tile::op(op), Tile::number(b), Tile::number(c)]
}

prop_compose! {
    fn arb_group()(idx in 0..IDENTITIES.len(), quad in any::<bool>(), face in 0..10u8) -> Vec<Tile> {
        if quad {
            vec![Tile::number(face); 4]
        } else {
            identity_tiles(idx)
        }
    }
}

prop_compose! {
    fn arb_completed_tiles()(groups in proptest::collection::vec(arb_group(), 1..=4)) -> Vec<Tile> {
        groups.into_iter().flatten().collect()
    }
}

fn arb_shuffled_tiles() -> impl Strategy<Value = Vec<Tile>> {
    arb_completed_tiles().prop_shuffle()
}

fn names(tiles: &[Tile]) -> Vec<String> {
    let mut v: Vec<String> = tiles.iter().map(|t| t.to_string()).collect();
    v.sort();
    v
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_generated_hands_partition(tiles in arb_shuffled_tiles()) {
        let search = PartitionSearch::new(GroupValidator::strict());
        let witness = search.find(&tiles, &mut SearchBudget::unlimited());
        prop_assert!(witness.is_some(), "no partition for {:?}", names(&tiles));

        let witness = witness.unwrap();
        // The witness is a rearrangement of the input
        prop_assert_eq!(names(&witness.flatten()), names(&tiles));
        for group in &witness.groups {
            prop_assert!(GroupValidator::strict().is_valid(&group.tiles));
        }
    }

    #[test]
    fn test_group_validity_ignores_order(idx in 0..IDENTITIES.len(), perm in Just(vec![0usize, 1, 2, 3]).prop_shuffle()) {
        let tiles = identity_tiles(idx);
        let shuffled: Vec<Tile> = perm.iter().map(|&i| tiles[i]).collect();
        let v = GroupValidator::strict();
        prop_assert_eq!(v.is_valid(&tiles), v.is_valid(&shuffled));
        prop_assert!(v.is_valid(&shuffled));
    }

    #[test]
    fn test_resolution_ignores_order(tiles in proptest::collection::vec(arb_group(), 4).prop_map(|g| g.concat())) {
        let state = MahjongState::new(Config::beginner()).unwrap();
        let mut reversed = tiles.clone();
        reversed.reverse();

        let a = state.resolver.resolve_win(&Hand::from_tiles(tiles)).unwrap();
        let b = state.resolver.resolve_win(&Hand::from_tiles(reversed)).unwrap();
        prop_assert!(a.is_some() && b.is_some());
        let (a, b) = (a.unwrap(), b.unwrap());
        prop_assert_eq!(a.shape, b.shape);
        prop_assert_eq!(a.score.total, b.score.total);
    }
}
