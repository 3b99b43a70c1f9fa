//! Integration tests for the game loop through the public facade

use recycle_tetris::core::{drop_interval_ticks, GameState, RandomSource, ScriptedRng};
use recycle_tetris::types::{Category, GameAction, ShapeKind, LINE_CLEAR_ANIMATION_STEPS};

/// Always draws zero: every piece is a paper I, flat, anchored at column 2.
struct ZeroRng;

impl RandomSource for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert!(state.active().is_some());
    assert!(!state.game_over());

    state.apply_action(GameAction::HardDrop);
    assert_eq!(state.piece_serial(), 2);

    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.score(), 0);
    assert_eq!(state.piece_serial(), 1);
    assert!(state.board().cells().iter().all(|c| !c.occupied));
}

#[test]
fn test_custom_random_source_drives_spawns() {
    let mut state = GameState::with_rng(ZeroRng);
    let piece = state.active().unwrap();
    assert_eq!(piece.shape, ShapeKind::I);
    assert_eq!(piece.categories, [Category::Paper; 4]);
    assert_eq!((piece.x, piece.y, piece.rotation), (2, 17, 0));

    assert_eq!(state.hard_drop(), 17);
    assert_eq!(state.hard_drop(), 16);
    for x in 0..4 {
        assert!(state.is_occupied(x, 0));
        assert!(state.is_occupied(x, 1));
    }
    assert!(!state.is_occupied(4, 0));
}

#[test]
fn test_gravity_until_game_over() {
    let mut state = GameState::with_rng(ZeroRng);
    let mut counter = 0;
    let mut ticks = 0;

    while !state.game_over() && ticks < 20_000 {
        state.update();
        counter += 1;
        if counter >= drop_interval_ticks(state.level()) {
            counter = 0;
            state.move_down();
        }
        ticks += 1;
    }

    // Rows 0..=17 hold one flat bar each; the next spawn collides.
    assert!(state.game_over());
    assert!(state.active().is_none());
    assert_eq!(state.score(), 0);
    let occupied = state.board().cells().iter().filter(|c| c.occupied).count();
    assert_eq!(occupied, 18 * 4);
    assert!(state.board().is_consistent());

    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::HardDrop));
    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert!(state.active().is_some());
}

#[test]
fn test_restore_mid_animation_continues_identically() {
    // Every spawn is a plastic square at column 3.
    let squares = || GameState::with_rng(ScriptedRng::new(vec![6, 1]));

    let mut state = squares();
    for x in 0..10 {
        if x != 2 && x != 3 {
            state.set_cell(x, 0, recycle_tetris::core::Cell::frozen(Category::Plastic, None));
        }
    }
    state.apply_action(GameAction::HardDrop);
    assert_eq!(state.score(), 225);
    state.move_down();
    state.move_down();
    assert_eq!(state.line_clear_animation().step(), 2);

    let mut copy = squares();
    assert!(copy.restore(&state.snapshot()));
    assert_eq!(copy.snapshot(), state.snapshot());

    for _ in 2..LINE_CLEAR_ANIMATION_STEPS {
        state.move_down();
        copy.move_down();
    }
    assert!(!state.is_line_clearing());
    assert!(state.active().is_some());
    assert_eq!(copy.snapshot(), state.snapshot());
}

#[test]
fn test_actions_are_total_while_animating() {
    let mut state = GameState::with_rng(ScriptedRng::new(vec![6, 1]));
    for x in 0..10 {
        if x != 2 && x != 3 {
            state.set_cell(x, 0, recycle_tetris::core::Cell::frozen(Category::Plastic, None));
        }
    }
    state.apply_action(GameAction::HardDrop);
    assert!(state.is_line_clearing());

    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::Rotate));
    assert!(!state.apply_action(GameAction::Hold));
    assert!(!state.apply_action(GameAction::HardDrop));
    // Soft drop advances the animation.
    assert!(state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.line_clear_animation().step(), 1);
}
