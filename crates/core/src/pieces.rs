//! Pieces module - tetromino shape table and piece values
//!
//! Every shape is described per rotation as three offsets from an anchor block;
//! the anchor itself is the fourth block. Block order inside a piece is
//! anchor first, then the three offsets, and the per-block category array
//! follows the same order.
//!
//! There are no wall kicks: a rotation either fits in place or is rejected.

use crate::types::{Category, ShapeKind};

/// Offset of a single block relative to the piece anchor
pub type BlockOffset = (i8, i8);

/// Shape of a piece - 4 block offsets from the anchor (anchor first)
pub type PieceShape = [BlockOffset; 4];

/// Number of rotation states per shape.
pub const ROTATION_COUNT: u8 = 4;

/// Offsets (excluding the anchor) indexed by `[shape][rotation]`.
const SHAPE_TABLE: [[[BlockOffset; 3]; 4]; 7] = [
    // I
    [
        [(-2, 0), (-1, 0), (1, 0)],
        [(0, -2), (0, -1), (0, 1)],
        [(2, 0), (1, 0), (-1, 0)],
        [(0, 2), (0, 1), (0, -1)],
    ],
    // S
    [
        [(-1, -1), (0, -1), (1, 0)],
        [(1, -1), (1, 0), (0, 1)],
        [(1, 1), (0, 1), (-1, 0)],
        [(-1, 1), (-1, 0), (0, -1)],
    ],
    // Z
    [
        [(-1, 1), (0, 1), (1, 0)],
        [(-1, -1), (-1, 0), (0, 1)],
        [(1, -1), (0, -1), (-1, 0)],
        [(1, 1), (1, 0), (0, -1)],
    ],
    // L
    [
        [(-1, -1), (-1, 0), (1, 0)],
        [(1, -1), (0, -1), (0, 1)],
        [(1, 1), (1, 0), (-1, 0)],
        [(-1, 1), (0, 1), (0, -1)],
    ],
    // J
    [
        [(-1, 1), (-1, 0), (1, 0)],
        [(-1, -1), (0, -1), (0, 1)],
        [(1, -1), (1, 0), (-1, 0)],
        [(1, 1), (0, 1), (0, -1)],
    ],
    // T
    [
        [(-1, 0), (0, -1), (1, 0)],
        [(0, -1), (1, 0), (0, 1)],
        [(1, 0), (0, 1), (-1, 0)],
        [(0, 1), (-1, 0), (0, -1)],
    ],
    // O (same for all rotations)
    [
        [(0, -1), (-1, -1), (-1, 0)],
        [(0, -1), (-1, -1), (-1, 0)],
        [(0, -1), (-1, -1), (-1, 0)],
        [(0, -1), (-1, -1), (-1, 0)],
    ],
];

/// Get the shape (block offsets, anchor first) for a shape and rotation.
/// Rotation is taken modulo 4.
pub fn get_shape(kind: ShapeKind, rotation: u8) -> PieceShape {
    let [a, b, c] = SHAPE_TABLE[kind.index()][(rotation % ROTATION_COUNT) as usize];
    [(0, 0), a, b, c]
}

/// Rotation index after one `rotate` step (counts down, 0 wraps to 3).
pub fn next_rotation(rotation: u8) -> u8 {
    if rotation > 0 && rotation < ROTATION_COUNT {
        rotation - 1
    } else {
        ROTATION_COUNT - 1
    }
}

/// Absolute block positions of `kind` anchored at `(x, y)`.
///
/// Saturating arithmetic keeps far-off anchors out of bounds instead of wrapping.
pub fn blocks_at(kind: ShapeKind, rotation: u8, x: i8, y: i8) -> [(i8, i8); 4] {
    get_shape(kind, rotation).map(|(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
}

/// A piece without a board position: the next piece or the held piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueuedPiece {
    pub shape: ShapeKind,
    /// Category per block, in block order.
    pub categories: [Category; 4],
}

impl QueuedPiece {
    /// All four blocks share one category (how new pieces are generated).
    pub fn uniform(shape: ShapeKind, category: Category) -> Self {
        Self {
            shape,
            categories: [category; 4],
        }
    }

    /// Category shared by every block, if any.
    pub fn uniform_category(&self) -> Option<Category> {
        let first = self.categories[0];
        self.categories
            .iter()
            .all(|c| *c == first)
            .then_some(first)
    }
}

/// The falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeKind,
    /// Rotation index 0..=3
    pub rotation: u8,
    /// Anchor column
    pub x: i8,
    /// Anchor row (0 = bottom)
    pub y: i8,
    pub categories: [Category; 4],
}

impl Piece {
    pub fn new(queued: QueuedPiece, rotation: u8, x: i8, y: i8) -> Self {
        Self {
            shape: queued.shape,
            rotation: rotation % ROTATION_COUNT,
            x,
            y,
            categories: queued.categories,
        }
    }

    /// Absolute block positions, anchor first.
    pub fn blocks(&self) -> [(i8, i8); 4] {
        blocks_at(self.shape, self.rotation, self.x, self.y)
    }

    /// Same shape and categories without the pose.
    pub fn queued(&self) -> QueuedPiece {
        QueuedPiece {
            shape: self.shape,
            categories: self.categories,
        }
    }
}
