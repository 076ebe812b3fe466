//! Property tests for move resolution on arbitrary boards.

use grid_merge::core::{apply_move, available_directions, Board, TileFactory};
use grid_merge::types::{Direction, GRID_SIZE};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = u32> {
    prop_oneof![
        4 => Just(0u32),
        3 => Just(2u32),
        2 => Just(4u32),
        1 => Just(8u32),
        1 => Just(16u32),
        1 => Just(1024u32),
    ]
}

fn grid() -> impl Strategy<Value = [[u32; GRID_SIZE]; GRID_SIZE]> {
    prop::array::uniform4(prop::array::uniform4(cell()))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn board(values: [[u32; GRID_SIZE]; GRID_SIZE]) -> Board {
    Board::from_values(values, &mut TileFactory::new(7))
}

proptest! {
    #[test]
    fn merges_conserve_total_value(values in grid(), dir in direction()) {
        let b = board(values);
        let out = apply_move(&b, dir);
        prop_assert_eq!(out.board.value_sum(), b.value_sum());
    }

    #[test]
    fn each_merge_removes_one_tile(values in grid(), dir in direction()) {
        let b = board(values);
        let out = apply_move(&b, dir);
        prop_assert_eq!(out.board.tile_count() + out.merges.len(), b.tile_count());
        prop_assert!(out.merges.len() <= 8);
    }

    #[test]
    fn merge_events_match_the_new_board(values in grid(), dir in direction()) {
        let b = board(values);
        let out = apply_move(&b, dir);
        for m in &out.merges {
            let tile = out.board.tile_at(m.row, m.col).expect("survivor cell is occupied");
            prop_assert_eq!(tile.id(), m.survivor);
            prop_assert_eq!(tile.value(), m.result_value);
            prop_assert_eq!(out.board.position_of(m.absorbed), None);

            // Both sources held half the result.
            let (ar, ac) = b.position_of(m.absorbed).expect("absorbed tile came from the input");
            let (sr, sc) = b.position_of(m.survivor).expect("survivor came from the input");
            prop_assert_eq!(b.tile_at(ar, ac).unwrap().value() * 2, m.result_value);
            prop_assert_eq!(b.tile_at(sr, sc).unwrap().value() * 2, m.result_value);
        }
    }

    #[test]
    fn moves_keep_board_consistent(values in grid(), dir in direction()) {
        let b = board(values);
        let out = apply_move(&b, dir);
        prop_assert!(out.board.is_consistent());
        // Ids are never invented by a move.
        for (_, _, tile) in out.board.tiles() {
            prop_assert!(b.position_of(tile.id()).is_some());
        }
    }

    #[test]
    fn unchanged_move_returns_the_same_board(values in grid(), dir in direction()) {
        let b = board(values);
        let out = apply_move(&b, dir);
        if !out.changed {
            prop_assert!(out.merges.is_empty());
            prop_assert_eq!(out.board, b);
        }
    }

    #[test]
    fn repeating_a_pure_slide_changes_nothing(values in grid(), dir in direction()) {
        let b = board(values);
        let first = apply_move(&b, dir);
        prop_assume!(first.merges.is_empty());
        let second = apply_move(&first.board, dir);
        prop_assert!(!second.changed);
    }

    #[test]
    fn available_directions_agree_with_board_check(values in grid()) {
        let b = board(values);
        // An empty board has free cells but nothing to slide.
        prop_assume!(b.tile_count() > 0);
        prop_assert_eq!(available_directions(&b).is_empty(), !b.has_available_moves());
    }

    #[test]
    fn input_board_is_not_mutated(values in grid(), dir in direction()) {
        let b = board(values);
        let before = b.clone();
        let _ = apply_move(&b, dir);
        prop_assert_eq!(b, before);
    }
}
