//! Board tests through the public facade

use recycle_tetris::core::{Board, Cell};
use recycle_tetris::types::{Category, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(Cell::EMPTY));
        }
    }
    assert!(board.is_consistent());
}

#[test]
fn test_board_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);

    assert!(board.is_out_of_bounds(-1, 5));
    assert!(board.is_out_of_bounds(3, 20));
    assert!(!board.is_valid(10, 0));
    assert!(!board.is_occupied(-1, -1));
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();
    let glass = Cell::frozen(Category::Glass, Some(4));

    assert!(board.set(5, 10, glass));
    assert_eq!(board.get(5, 10), Some(glass));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_valid(5, 10));
    assert_eq!(board.get(5, 10).and_then(|c| c.color()), Some(Category::Glass.color()));

    assert!(!board.set(10, 0, glass));
    assert!(!board.set(0, -1, glass));
}

#[test]
fn test_current_marks_never_add_categories() {
    let mut board = Board::new();
    board.mark_current(&[(0, 0), (1, 0), (-1, 0), (4, 25)]);

    let cell = board.get(0, 0).unwrap();
    assert!(cell.current);
    assert!(!cell.occupied);
    assert_eq!(cell.category, None);
    assert_eq!(cell.color(), None);
    assert!(board.is_consistent());

    board.clear_current_marks();
    assert!(board.cells().iter().all(|c| !c.current));
}

#[test]
fn test_full_rows_and_uniformity() {
    let mut board = Board::new();
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, 0, Cell::frozen(Category::Metal, None));
        let mixed = if x == 4 { Category::Paper } else { Category::Metal };
        board.set(x, 1, Cell::frozen(mixed, None));
    }
    board.set(0, 2, Cell::frozen(Category::Metal, None));

    assert!(board.is_row_full(0));
    assert_eq!(board.uniform_category(0), Some(Category::Metal));
    assert!(board.is_row_full(1));
    assert_eq!(board.uniform_category(1), None);
    assert!(!board.is_row_full(2));
    assert_eq!(board.uniform_category(2), None);
    assert!(!board.is_row_full(20));
}

#[test]
fn test_delete_row_shifts_down_and_refills_top() {
    let mut board = Board::new();
    board.set(3, 5, Cell::frozen(Category::Organic, Some(1)));
    board.set(3, 19, Cell::frozen(Category::Paper, Some(2)));

    assert!(board.delete_row(4));
    assert_eq!(board.get(3, 4).and_then(|c| c.category), Some(Category::Organic));
    assert!(!board.is_occupied(3, 5));
    assert_eq!(board.get(3, 18).and_then(|c| c.combo_id), Some(2));
    assert_eq!(board.get(3, 19), Some(Cell::EMPTY));

    assert!(!board.delete_row(20));
}
