use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tile2048_core::{
    add_random_tile, legal_directions, move_board, Board, Direction, Tile, GRID_SIZE,
};

fn tile() -> impl Strategy<Value = Tile> {
    prop_oneof![
        3 => Just(0u32),
        5 => (1u32..=11).prop_map(|exp| 1 << exp),
    ]
}

fn board() -> impl Strategy<Value = Board> {
    prop::array::uniform4(prop::array::uniform4(tile())).prop_map(Board::from_rows)
}

fn transpose(board: &Board) -> Board {
    let rows = board.rows();
    let mut out = [[0; GRID_SIZE]; GRID_SIZE];
    for (r, out_row) in out.iter_mut().enumerate() {
        for (c, slot) in out_row.iter_mut().enumerate() {
            *slot = rows[c][r];
        }
    }
    Board::from_rows(out)
}

proptest! {
    #[test]
    fn rotating_four_times_is_identity(b in board()) {
        prop_assert_eq!(b.rotate(1).rotate(1).rotate(1).rotate(1), b);
    }

    #[test]
    fn clockwise_then_counterclockwise_is_identity(b in board()) {
        prop_assert_eq!(b.rotate(1).rotate(3), b);
        prop_assert_eq!(b.rotate(3).rotate(1), b);
    }

    #[test]
    fn right_is_mirrored_left(b in board()) {
        let right = move_board(&b, Direction::Right);
        let left = move_board(&b.mirror(), Direction::Left);
        prop_assert_eq!(right.board, left.board.mirror());
        prop_assert_eq!(right.score, left.score);
        prop_assert_eq!(right.moved, left.moved);
    }

    #[test]
    fn up_and_down_are_transposed_left_and_right(b in board()) {
        let t = transpose(&b);
        let up = move_board(&b, Direction::Up);
        let left = move_board(&t, Direction::Left);
        prop_assert_eq!(up.board, transpose(&left.board));
        prop_assert_eq!(up.score, left.score);

        let down = move_board(&b, Direction::Down);
        let right = move_board(&t, Direction::Right);
        prop_assert_eq!(down.board, transpose(&right.board));
        prop_assert_eq!(down.score, right.score);
    }

    #[test]
    fn moved_flag_matches_board_difference(b in board()) {
        for direction in Direction::ALL {
            let result = move_board(&b, direction);
            prop_assert_eq!(result.moved, result.board != b);
            if !result.moved {
                prop_assert_eq!(result.score, 0);
            }
        }
    }

    #[test]
    fn moves_conserve_tile_sum(b in board()) {
        for direction in Direction::ALL {
            prop_assert_eq!(move_board(&b, direction).board.tile_sum(), b.tile_sum());
        }
    }

    #[test]
    fn can_move_agrees_with_legal_directions(b in board()) {
        // an empty board has room but nothing to slide
        prop_assume!(b != Board::empty());
        prop_assert_eq!(b.can_move(), legal_directions(&b).iter().any(|&legal| legal));
    }

    #[test]
    fn spawn_fills_exactly_one_empty_cell(b in board(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let spawned = add_random_tile(&b, &mut rng);
        let empty = b.empty_cells();
        if empty.is_empty() {
            prop_assert_eq!(spawned, b);
        } else {
            let changed: Vec<_> = b
                .rows()
                .iter()
                .flatten()
                .zip(spawned.rows().iter().flatten())
                .filter(|(before, after)| before != after)
                .map(|(before, after)| (*before, *after))
                .collect();
            prop_assert_eq!(changed.len(), 1);
            let (before, after) = changed[0];
            prop_assert_eq!(before, 0);
            prop_assert!(after == 2 || after == 4);
        }
    }
}
