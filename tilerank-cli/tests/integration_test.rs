//! Integration tests for the placement advisor
//!
//! Tests the full stack: board engine, rating, streaming solver, and
//! file persistence through a real temp file.

use std::fs;

use tilerank_core::{Board, Pos, Tile, ORIGIN};
use tilerank_solver::Solver;

fn tile(code: &str) -> Tile {
    Tile::parse(code).unwrap()
}

/// A small mixed board: coast and water running off one side, plain
/// terrain on the other.
fn build_board() -> Board {
    let mut board = Board::new();
    board.place(Pos::new(1, 0), tile("wggggg")).unwrap();
    board.place(Pos::new(0, 1), tile("c")).unwrap();
    board.place(Pos::new(-1, 0), tile("ffgggg")).unwrap();
    board
}

#[test]
fn test_full_round_trip_through_file() {
    let board = build_board();

    let path = std::env::temp_dir().join("tilerank_integration_board.txt");
    board.save(&path).unwrap();

    let loaded = Board::load(&path).unwrap();
    assert_eq!(loaded, board);

    // Re-saving reproduces the file byte-for-byte.
    let first = fs::read(&path).unwrap();
    loaded.save(&path).unwrap();
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second);

    fs::remove_file(&path).ok();
}

#[test]
fn test_solver_agrees_with_board_search_after_reload() {
    let board = build_board();

    let path = std::env::temp_dir().join("tilerank_integration_solve.txt");
    board.save(&path).unwrap();
    let loaded = Board::load(&path).unwrap();
    fs::remove_file(&path).ok();

    let mut solver = Solver::new();
    for code in ["g", "r", "cgcgcg", "wggggg"] {
        let handle = solver.solve(&loaded, tile(code));
        let best = handle.into_best();

        let mut reference = loaded.clone();
        assert_eq!(best, reference.suggest_placements(tile(code)));

        // Every suggested move independently validates.
        for (pos, ori) in best {
            assert!(loaded.is_valid_placement(pos, tile(code).oriented(ori)));
        }
    }
}

#[test]
fn test_advisor_loop_keeps_board_consistent() {
    // Draw a few tiles, always play one of the suggested moves, like the
    // interactive loop does.
    let mut board = Board::new();
    let mut solver = Solver::new();

    for code in ["g", "gfgggg", "c", "ffgggg", "d"] {
        let handle = solver.solve(&board, tile(code));
        let best = handle.into_best();
        assert!(!best.is_empty(), "tile {} should be playable", code);

        let mut moves: Vec<(Pos, u8)> = best.into_iter().collect();
        moves.sort_unstable();
        let (pos, ori) = moves[0];
        board.place(pos, tile(code).oriented(ori)).unwrap();
    }

    assert_eq!(board.len(), 6);
    assert!(board.get(ORIGIN).is_some());
}
