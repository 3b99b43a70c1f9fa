use crate::animation::LineClearAnimation;
use crate::board::Cell;
use crate::particles::Particle;
use crate::pieces::{Piece, QueuedPiece, ROTATION_COUNT};
use crate::scoring::calculate_level;
use crate::types::{Category, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, CATEGORY_COUNT};

/// Every queryable value of a [`GameState`](crate::GameState), as a plain value.
///
/// `board[y][x]` with row 0 at the bottom. Feeding a snapshot back through
/// [`GameState::restore`](crate::GameState::restore) reproduces the state exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<Piece>,
    pub next: QueuedPiece,
    pub hold: Option<QueuedPiece>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    /// Indexed by [`Category::index`].
    pub recycled: [u32; CATEGORY_COUNT],
    pub game_over: bool,
    pub animation: LineClearAnimation,
    pub particles: Vec<Particle>,
    /// Serial of the most recently spawned piece.
    pub piece_serial: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[Cell::EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.next = QueuedPiece::uniform(ShapeKind::I, Category::Paper);
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.recycled = [0; CATEGORY_COUNT];
        self.game_over = false;
        self.animation = LineClearAnimation::Idle;
        self.particles.clear();
        self.piece_serial = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    pub fn recycled_count(&self, category: Category) -> u32 {
        self.recycled[category.index()]
    }

    /// Saturates at `u32::MAX`.
    pub fn total_recycled(&self) -> u32 {
        self.recycled.iter().fold(0, |sum, &n| sum.saturating_add(n))
    }

    /// Cells respect the occupancy invariant, every block of the active piece
    /// sits on a free cell, the level is at least what the line count earns,
    /// and the animation is in range.
    pub fn is_valid(&self) -> bool {
        let cells_ok = self.board.iter().flatten().all(Cell::is_consistent);
        let active_ok = self.active.map_or(true, |piece| {
            piece.rotation < ROTATION_COUNT
                && piece
                    .blocks()
                    .iter()
                    .all(|&(x, y)| self.cell(x, y).is_some_and(|cell| !cell.occupied))
        });
        let level_ok = self.level >= calculate_level(self.lines);
        cells_ok && active_ok && level_ok && self.animation.is_valid()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: QueuedPiece::uniform(ShapeKind::I, Category::Paper),
            hold: None,
            can_hold: true,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            recycled: [0; CATEGORY_COUNT],
            game_over: false,
            animation: LineClearAnimation::Idle,
            particles: Vec::new(),
            piece_serial: 0,
        }
    }
}
