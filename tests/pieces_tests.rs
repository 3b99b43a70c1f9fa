//! Shape table tests

use recycle_tetris::core::pieces::{blocks_at, next_rotation, ROTATION_COUNT};
use recycle_tetris::core::{get_shape, Piece, QueuedPiece};
use recycle_tetris::types::{Category, ShapeKind};

#[test]
fn test_every_pose_has_four_distinct_blocks_anchor_first() {
    for kind in ShapeKind::ALL {
        for rotation in 0..ROTATION_COUNT {
            let shape = get_shape(kind, rotation);
            assert_eq!(shape[0], (0, 0), "{kind:?} r{rotation} anchor");
            for i in 0..4 {
                for j in i + 1..4 {
                    assert_ne!(shape[i], shape[j], "{kind:?} r{rotation} overlaps");
                }
            }
        }
    }
}

#[test]
fn test_square_ignores_rotation() {
    let base = get_shape(ShapeKind::O, 0);
    for rotation in 1..ROTATION_COUNT {
        assert_eq!(get_shape(ShapeKind::O, rotation), base);
    }
    assert_eq!(
        blocks_at(ShapeKind::O, 2, 3, 17),
        [(3, 17), (3, 16), (2, 16), (2, 17)]
    );
}

#[test]
fn test_rotation_counts_down_and_wraps() {
    assert_eq!(next_rotation(0), 3);
    assert_eq!(next_rotation(3), 2);
    assert_eq!(next_rotation(1), 0);
    assert_eq!(get_shape(ShapeKind::I, 4), get_shape(ShapeKind::I, 0));
}

#[test]
fn test_piece_blocks_follow_category_order() {
    let queued = QueuedPiece {
        shape: ShapeKind::T,
        categories: [Category::Paper, Category::Plastic, Category::Metal, Category::Glass],
    };
    let piece = Piece::new(queued, 0, 4, 10);
    let blocks = piece.blocks();
    assert_eq!(blocks[0], (4, 10));
    assert_eq!(blocks[2], (4, 9));
    assert_eq!(piece.categories[2], Category::Metal);
    assert_eq!(queued.uniform_category(), None);
    assert_eq!(piece.queued(), queued);
    assert_eq!(
        QueuedPiece::uniform(ShapeKind::L, Category::Organic).uniform_category(),
        Some(Category::Organic)
    );
}
