//! Integration tests for tree navigation and reconstruction.
//!
//! Walks the end-to-end scenarios: extending and branching a line, cycling
//! through alternatives with wraparound, dedup on re-added moves, and
//! duplicate-handle isolation.

use sightline_core::Position;
use sightline_tree::{GameTree, MoveNode};

const FEN_AFTER_1E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";

const FEN_AFTER_1E4_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

const FEN_AFTER_1E4_C5: &str = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

/// Helper: a tree with `1. e4 e5` played and the cursor on the last move.
fn open_game() -> GameTree {
    let mut tree = GameTree::new();
    tree.add_move("e4").expect("e4 is legal at the start");
    tree.add_move("e5").expect("e5 is legal after e4");
    tree
}

// ── Line building ─────────────────────────────────────────────────────────────

#[test]
fn added_moves_come_back_as_the_main_line() {
    let moves = ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"];
    let mut tree = GameTree::new();
    for token in moves {
        tree.add_move(token).unwrap();
    }
    assert_eq!(
        tree.main_line().collect::<Vec<_>>(),
        moves,
        "with no navigation away from the end, the main line is exactly the input sequence"
    );
    assert_eq!(tree.current_san_line(), moves);
}

#[test]
fn the_live_position_tracks_the_current_line() {
    let tree = open_game();
    assert_eq!(tree.position().fen(), FEN_AFTER_1E4_E5);
    assert_eq!(
        tree.position().fen(),
        Position::replay(tree.current_san_line()).unwrap().fen(),
        "reconstruction equals the engine's replay of the same tokens"
    );
}

// ── Branching ─────────────────────────────────────────────────────────────────

#[test]
fn a_new_branch_is_a_sibling_not_a_replacement() {
    let mut tree = open_game();
    assert!(tree.go_to_previous());
    assert_eq!(tree.current_san_line(), ["e4"]);
    assert_eq!(tree.position().fen(), FEN_AFTER_1E4);

    tree.add_move("c5").unwrap();
    assert_eq!(tree.current_san_line(), ["e4", "c5"]);
    assert_eq!(tree.position().fen(), FEN_AFTER_1E4_C5);
    assert_eq!(
        tree.main_line().collect::<Vec<_>>(),
        ["e4", "e5"],
        "the main line still reports the original continuation"
    );

    // From the alternative, cycling reaches the main line and wraps back.
    assert!(tree.go_to_next_alternative());
    assert_eq!(tree.current_san_line(), ["e4", "e5"]);
    assert!(tree.go_to_next_alternative());
    assert_eq!(tree.current_san_line(), ["e4", "c5"]);
}

#[test]
fn branching_at_the_very_first_move() {
    let mut tree = open_game();
    assert!(tree.go_to_previous());
    assert!(tree.go_to_previous());
    assert_eq!(tree.current(), tree.root());

    tree.add_move("d4").unwrap();
    assert_eq!(tree.current_san_line(), ["d4"]);
    assert_eq!(tree.main_line().collect::<Vec<_>>(), ["e4", "e5"]);
}

#[test]
fn prebuilt_alternatives_join_the_same_branch_point() {
    let mut tree = open_game();
    tree.go_to_previous();
    tree.add_alternative(MoveNode::new("c5")).unwrap();
    assert_eq!(tree.current_san_line(), ["e4", "c5"]);

    tree.go_to_previous();
    tree.add_alternative(MoveNode::new("d5")).unwrap();
    assert_eq!(tree.current_san_line(), ["e4", "d5"]);

    assert!(tree.go_to_next_alternative());
    assert_eq!(tree.current_san_line(), ["e4", "e5"]);
}

// ── Sibling cycling ───────────────────────────────────────────────────────────

#[test]
fn three_siblings_cycle_in_insertion_order_and_wrap() {
    let mut tree = open_game();
    tree.go_to_previous();
    tree.add_move("c5").unwrap();
    tree.go_to_previous();
    tree.add_move("e6").unwrap();

    // Park the cursor on the main continuation e5.
    tree.go_to_previous();
    tree.go_to_next();
    assert_eq!(tree.current_san_line(), ["e4", "e5"]);

    let mut seen = Vec::new();
    for _ in 0..3 {
        assert!(tree.go_to_next_alternative());
        seen.push(tree.current_san_line().pop().unwrap());
    }
    assert_eq!(seen, ["c5", "e6", "e5"], "e5 -> c5 -> e6 -> e5");

    let mut seen = Vec::new();
    for _ in 0..3 {
        assert!(tree.go_to_previous_alternative());
        seen.push(tree.current_san_line().pop().unwrap());
    }
    assert_eq!(seen, ["e6", "c5", "e5"], "e5 -> e6 -> c5 -> e5");
}

#[test]
fn cycling_without_alternatives_reports_no_movement() {
    let mut tree = open_game();
    let before = tree.current();
    assert!(!tree.go_to_next_alternative());
    assert!(!tree.go_to_previous_alternative());
    assert_eq!(tree.current(), before);
}

// ── Dedup ─────────────────────────────────────────────────────────────────────

#[test]
fn re_entering_an_existing_branch_reuses_its_node() {
    let mut tree = open_game();
    tree.go_to_previous();
    tree.add_move("c5").unwrap();
    let c5 = tree.current();
    let count = tree.node_count();

    tree.go_to_previous();
    tree.add_move("c5").unwrap();
    assert_eq!(tree.current(), c5, "the cursor lands on the existing node");
    assert_eq!(tree.node_count(), count, "no duplicate branch was created");

    tree.go_to_previous();
    tree.add_move("e5").unwrap();
    assert_eq!(tree.node_count(), count, "the main continuation deduplicates too");
    assert_eq!(tree.current_san_line(), ["e4", "e5"]);
}

// ── Duplicate handles ─────────────────────────────────────────────────────────

#[test]
fn mutating_a_duplicate_leaves_the_original_cursor_and_line_alone() {
    let tree = open_game();
    let current = tree.current();
    let fen = tree.position().fen();

    let mut copy = tree.duplicate();
    copy.add_move("Nf3").unwrap();
    copy.go_to_previous();

    assert_eq!(tree.current(), current);
    assert_eq!(tree.current_san_line(), ["e4", "e5"]);
    assert_eq!(tree.position().fen(), fen);
}

#[test]
fn duplicates_agree_on_node_identity() {
    let tree = open_game();
    let copy = tree.duplicate();
    assert_eq!(copy.current(), tree.current());
    assert_eq!(copy.root(), tree.root());
    assert_eq!(copy.position().fen(), tree.position().fen());
}
