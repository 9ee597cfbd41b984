//! Property tests for the board model over seeded random boards

use hive_core::{AxialPosition, BoardState, Location, Pool, Rotation, Variant};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Play random moves: pool or board stacks onto random cells, sometimes back home
fn random_board(rng: &mut ChaCha8Rng, variant: Variant, moves: usize) -> BoardState {
    let mut board = BoardState::new(variant);
    for _ in 0..moves {
        let pieces = board.pieces().to_vec();
        let piece = &pieces[rng.gen_range(0..pieces.len())];
        let from = board.position_of(piece).unwrap();
        let top = board.top(&from).unwrap().to_string();
        let to = if rng.gen_bool(0.1) && !from.is_pool() {
            Location::Pool(Pool::of_piece(&top).unwrap())
        } else {
            Location::Board(AxialPosition::new(rng.gen_range(-4..=4), rng.gen_range(-4..=4)))
        };
        board.move_piece(&from, &to).unwrap();
    }
    board
}

fn random_position(rng: &mut ChaCha8Rng) -> AxialPosition {
    AxialPosition::new(rng.gen_range(-1000..=1000), rng.gen_range(-1000..=1000))
}

fn variants() -> [Variant; 2] {
    [Variant::default(), Variant::FULL]
}

// ============================================================================
// BOARD PROPERTIES
// ============================================================================

#[test]
fn test_full_text_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for variant in variants() {
        for _ in 0..200 {
            let moves = rng.gen_range(0..40);
            let board = random_board(&mut rng, variant, moves);
            let mut parsed = BoardState::new(variant);
            parsed.parse(&board.text(true)).unwrap();
            assert_eq!(parsed, board, "round trip of {}", board.text(true));
        }
    }
}

#[test]
fn test_on_board_text_round_trip() {
    // Pools are implied once everything else is placed
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..200 {
        let board = random_board(&mut rng, Variant::FULL, 30);
        let mut parsed = BoardState::new(Variant::FULL);
        parsed.parse(&board.text(false)).unwrap();
        assert_eq!(parsed, board);
    }
}

#[test]
fn test_every_piece_has_exactly_one_home() {
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    for _ in 0..100 {
        let board = random_board(&mut rng, Variant::FULL, 50);
        for piece in board.pieces() {
            let location = board.position_of(piece).unwrap();
            let stack = board.stack(&location);
            assert_eq!(stack.iter().filter(|p| *p == piece).count(), 1);
        }
        let listed: usize = board
            .pieces()
            .iter()
            .filter_map(|p| board.position_of(p))
            .collect::<std::collections::HashSet<_>>()
            .iter()
            .map(|loc| board.stack(loc).len())
            .sum();
        assert_eq!(listed, board.pieces().len());
    }
}

#[test]
fn test_pools_stay_sorted() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    for _ in 0..100 {
        let board = random_board(&mut rng, Variant::FULL, 60);
        for pool in Variant::FULL.pools() {
            let stack = board.stack(&Location::Pool(pool));
            let mut sorted = stack.to_vec();
            sorted.sort();
            assert_eq!(stack, sorted.as_slice());
        }
    }
}

#[test]
fn test_board_transform_inverses() {
    let mut rng = ChaCha8Rng::seed_from_u64(19);
    for _ in 0..100 {
        let board = random_board(&mut rng, Variant::default(), 25);

        let mut flipped = board.clone();
        flipped.flip();
        flipped.flip();
        assert_eq!(flipped, board);

        let mut turned = board.clone();
        turned.rotate(Rotation::Left);
        turned.rotate(Rotation::Right);
        assert_eq!(turned, board);

        let mut centered = board.clone();
        centered.center();
        let pools_before = board.text(true).split(' ').filter(|t| t.contains('@')).count();
        let pools_after = centered.text(true).split(' ').filter(|t| t.contains('@')).count();
        assert_eq!(pools_before, pools_after);
        let mut twice = centered.clone();
        twice.center();
        assert_eq!(twice, centered);
    }
}

// ============================================================================
// POSITION PROPERTIES
// ============================================================================

#[test]
fn test_position_algebra() {
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    for _ in 0..1000 {
        let p = random_position(&mut rng);
        assert_eq!(p.to_string().parse::<AxialPosition>().unwrap(), p);
        assert_eq!(p.flip().flip(), p);
        assert_eq!(p.rotate(Rotation::Right).rotate(Rotation::Left), p);
        assert_eq!(p.rotate(Rotation::Left).rotate(Rotation::Right), p);
        let q = p.rotate(Rotation::Left);
        assert_eq!(q.col + q.row + q.cube_y(), 0);
        // distance from the origin is preserved
        let norm = |a: AxialPosition| a.col.abs() + a.row.abs() + a.cube_y().abs();
        assert_eq!(norm(q), norm(p));
        assert_eq!(norm(p.flip()), norm(p));
    }
}
