//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, pieces, RNG, scoring,
//! particles and the line-clear animation. It owns every piece of mutable game
//! state; callers read values through queries and never hold live references
//! into the board.
//!
//! Gravity is driven externally: the caller invokes [`GameState::move_down`] at
//! whatever cadence the difficulty multiplier suggests and [`GameState::update`]
//! once per frame for particles.

use arrayvec::ArrayVec;

use crate::animation::LineClearAnimation;
use crate::board::{Board, Cell};
use crate::particles::{create_recycle_effect, update_particles, Particle};
use crate::pieces::{blocks_at, next_rotation, Piece, QueuedPiece, ROTATION_COUNT};
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::{calculate_level, calculate_line_score, difficulty_multiplier};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R: RandomSource = SimpleRng> {
    board: Board,
    /// Falling piece. None while a line animates, after game over, and before the first spawn.
    active: Option<Piece>,
    next: QueuedPiece,
    hold: Option<QueuedPiece>,
    can_hold: bool,
    game_over: bool,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    recycled: [u32; CATEGORY_COUNT],
    animation: LineClearAnimation,
    particles: Vec<Particle>,
    /// Monotonic id for spawned pieces, stamped into frozen cells as `combo_id`.
    piece_serial: u32,
    /// Level reached since the driver last asked.
    pending_level_up: Option<u32>,
    rng: R,
}

impl GameState<SimpleRng> {
    /// Create a new game with the given RNG seed; the first piece is already falling.
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game drawing from `rng`; the first piece is already falling.
    pub fn with_rng(rng: R) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            next: QueuedPiece::uniform(ShapeKind::I, Category::Paper),
            hold: None,
            can_hold: true,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            recycled: [0; CATEGORY_COUNT],
            animation: LineClearAnimation::Idle,
            particles: Vec::new(),
            piece_serial: 0,
            pending_level_up: None,
            rng,
        };
        state.restart();
        state
    }

    /// Reset everything and spawn the first piece. Safe to call mid-game.
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.recycled = [0; CATEGORY_COUNT];
        self.animation = LineClearAnimation::Idle;
        self.particles.clear();
        self.piece_serial = 0;
        self.pending_level_up = None;
        self.next = self.generate_next();
        self.spawn_piece();
    }

    fn generate_next(&mut self) -> QueuedPiece {
        let shape = ShapeKind::ALL[self.rng.next_range(SHAPE_COUNT as u32) as usize];
        let category = Category::ALL[self.rng.next_range(CATEGORY_COUNT as u32) as usize];
        QueuedPiece::uniform(shape, category)
    }

    // ----- queries -----

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        self.board.get(x, y)
    }

    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.board.is_occupied(x, y)
    }

    /// Covered by the falling piece.
    pub fn is_current(&self, x: i8, y: i8) -> bool {
        self.board.get(x, y).is_some_and(|cell| cell.current)
    }

    pub fn category_at(&self, x: i8, y: i8) -> Option<Category> {
        self.board.get(x, y).and_then(|cell| cell.category)
    }

    pub fn color_at(&self, x: i8, y: i8) -> Option<CellColor> {
        self.board.get(x, y).and_then(|cell| cell.color())
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_piece(&self) -> QueuedPiece {
        self.next
    }

    pub fn held_piece(&self) -> Option<QueuedPiece> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines
    }

    pub fn combo_count(&self) -> u32 {
        self.combo
    }

    pub fn recycled_count(&self, category: Category) -> u32 {
        self.recycled[category.index()]
    }

    pub fn recycled_counts(&self) -> [u32; CATEGORY_COUNT] {
        self.recycled
    }

    /// Saturates at `u32::MAX`.
    pub fn total_recycled(&self) -> u32 {
        self.recycled.iter().fold(0, |sum, &n| sum.saturating_add(n))
    }

    pub fn line_clear_animation(&self) -> LineClearAnimation {
        self.animation
    }

    pub fn is_line_clearing(&self) -> bool {
        self.animation.is_active()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn piece_serial(&self) -> u32 {
        self.piece_serial
    }

    /// Gravity scale for the current level; lower is faster.
    pub fn difficulty_multiplier(&self) -> f32 {
        difficulty_multiplier(self.level)
    }

    /// Level reached since the last call, if any.
    pub fn take_level_up(&mut self) -> Option<u32> {
        self.pending_level_up.take()
    }

    /// Write a snapshot into `out`, reusing its particle buffer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.next = self.next;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.recycled = self.recycled;
        out.game_over = self.game_over;
        out.animation = self.animation;
        out.particles.clear();
        out.particles.extend_from_slice(&self.particles);
        out.piece_serial = self.piece_serial;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    // ----- commands -----

    /// Promote the next piece to the falling piece.
    ///
    /// No-op while a line animates. Sets game over (and leaves no falling
    /// piece) when the spawn pose collides. Returns true if a piece spawned.
    pub fn spawn_piece(&mut self) -> bool {
        if self.animation.is_active() {
            return false;
        }

        let queued = self.next;
        self.next = self.generate_next();
        let rotation = self.rng.next_range(u32::from(ROTATION_COUNT)) as u8;
        let x = SPAWN_X_MIN + self.rng.next_range(SPAWN_X_RANGE) as i8;

        self.board.clear_current_marks();
        if self.collides(queued.shape, rotation, x, SPAWN_Y) {
            self.active = None;
            self.game_over = true;
            return false;
        }

        let piece = Piece::new(queued, rotation, x, SPAWN_Y);
        self.piece_serial = self.piece_serial.wrapping_add(1);
        self.can_hold = true;
        self.place_active(piece);
        true
    }

    fn collides(&self, shape: ShapeKind, rotation: u8, x: i8, y: i8) -> bool {
        blocks_at(shape, rotation, x, y)
            .iter()
            .any(|&(bx, by)| !self.board.is_valid(bx, by))
    }

    /// True if the falling piece at `(x, y, rotation)` would leave the board
    /// or overlap a frozen block. Always true when nothing is falling.
    pub fn check_collision(&self, x: i8, y: i8, rotation: u8) -> bool {
        match self.active {
            Some(piece) => self.collides(piece.shape, rotation, x, y),
            None => true,
        }
    }

    fn place_active(&mut self, piece: Piece) {
        self.board.clear_current_marks();
        self.board.mark_current(&piece.blocks());
        self.active = Some(piece);
    }

    /// Rotate one step if the new pose fits (no kicks).
    pub fn rotate(&mut self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let rotation = next_rotation(piece.rotation);
        if self.check_collision(piece.x, piece.y, rotation) {
            return false;
        }
        self.place_active(Piece { rotation, ..piece });
        true
    }

    /// Shift horizontally by `dx` if the new pose fits.
    pub fn translate(&mut self, dx: i8) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let x = piece.x.saturating_add(dx);
        if self.check_collision(x, piece.y, piece.rotation) {
            return false;
        }
        self.place_active(Piece { x, ..piece });
        true
    }

    /// One gravity step.
    ///
    /// While a line animates this only advances the animation. Otherwise the
    /// piece moves down one row, or, when blocked, freezes, lines resolve and
    /// the next piece spawns. Returns true only if the piece moved down.
    pub fn move_down(&mut self) -> bool {
        if self.animation.is_active() {
            self.advance_line_animation();
            return false;
        }

        let Some(piece) = self.active else {
            return false;
        };
        let y = piece.y - 1;
        if !self.check_collision(piece.x, y, piece.rotation) {
            self.place_active(Piece { y, ..piece });
            return true;
        }

        self.freeze_current();
        self.resolve_lines();
        self.spawn_piece();
        false
    }

    /// Freeze the piece where it stands.
    ///
    /// Sets game over instead when the current pose is illegal.
    pub fn drop_fruit(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        if self.check_collision(piece.x, piece.y, piece.rotation) {
            self.game_over = true;
            return;
        }
        self.freeze_current();
        self.resolve_lines();
        self.spawn_piece();
    }

    /// Slide down while the row below is free, then freeze with one last step.
    /// Returns the number of rows travelled.
    pub fn hard_drop(&mut self) -> u32 {
        if self.animation.is_active() || self.active.is_none() {
            return 0;
        }

        let mut rows = 0;
        while let Some(piece) = self.active {
            if self.check_collision(piece.x, piece.y - 1, piece.rotation) {
                break;
            }
            self.move_down();
            rows += 1;
        }
        self.move_down();
        rows
    }

    /// Bank the falling piece, or swap it with the banked one. Once per spawn.
    pub fn hold_piece(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(current) = self.active else {
            return false;
        };

        self.board.clear_current_marks();
        self.active = None;

        match self.hold.replace(current.queued()) {
            None => {
                self.spawn_piece();
            }
            Some(held) => {
                if self.collides(held.shape, 0, HOLD_SWAP_X, SPAWN_Y) {
                    self.game_over = true;
                } else {
                    self.place_active(Piece::new(held, 0, HOLD_SWAP_X, SPAWN_Y));
                }
            }
        }

        self.can_hold = false;
        true
    }

    fn freeze_current(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        for (&(x, y), &category) in piece.blocks().iter().zip(piece.categories.iter()) {
            self.board
                .set(x, y, Cell::frozen(category, Some(self.piece_serial)));
        }
        self.board.clear_current_marks();
    }

    /// Resolve full rows after a freeze.
    ///
    /// Mixed rows vanish unscored. Every uniform row scores now; only the
    /// lowest one starts the animation and the rest wait for the re-scan.
    fn resolve_lines(&mut self) {
        if self.animation.is_active() {
            return;
        }

        let mut uniform: ArrayVec<(u8, Category), { BOARD_HEIGHT as usize }> = ArrayVec::new();
        let mut y = 0usize;
        while y < BOARD_HEIGHT as usize {
            if !self.board.is_row_full(y) {
                y += 1;
                continue;
            }
            match self.board.uniform_category(y) {
                Some(category) => {
                    uniform.push((y as u8, category));
                    y += 1;
                }
                // Rows above shift down; rescan the same index.
                None => {
                    self.board.delete_row(y);
                }
            }
        }

        let Some(&(first_row, first_category)) = uniform.first() else {
            self.combo = 0;
            return;
        };

        if uniform.len() > 1 {
            self.combo = self.combo.saturating_add(1);
        } else {
            self.combo = 0;
        }

        self.animation = LineClearAnimation::start(first_row, first_category);

        for (i, &(row, category)) in uniform.iter().enumerate() {
            let is_combo = i > 0 || self.combo > 0;
            let result = calculate_line_score(1, category, self.level, self.combo, is_combo);
            self.score = self.score.saturating_add(result.total);
            let count = &mut self.recycled[category.index()];
            *count = count.saturating_add(1);
            for x in 0..BOARD_WIDTH as i8 {
                create_recycle_effect(&mut self.particles, &mut self.rng, x, row as i8, category);
            }
        }

        self.lines = self.lines.saturating_add(uniform.len() as u32);
        self.update_level();
    }

    /// Scan for the next full row after an animated row was removed.
    fn check_row(&mut self) {
        if self.animation.is_active() {
            return;
        }

        let mut y = 0usize;
        while y < BOARD_HEIGHT as usize {
            if !self.board.is_row_full(y) {
                y += 1;
                continue;
            }
            match self.board.uniform_category(y) {
                Some(category) => {
                    self.animation = LineClearAnimation::start(y as u8, category);
                    return;
                }
                None => {
                    self.board.delete_row(y);
                }
            }
        }
    }

    fn advance_line_animation(&mut self) {
        let Some(row) = self.animation.advance() else {
            return;
        };
        self.board.delete_row(row as usize);
        self.check_row();

        if !self.animation.is_active() && self.active.is_none() && !self.game_over {
            self.spawn_piece();
        }
    }

    fn update_level(&mut self) {
        let level = calculate_level(self.lines);
        if level > self.level {
            self.level = level;
            self.pending_level_up = Some(level);
        }
    }

    /// Per-frame update (particles only; gravity is driven by the caller).
    pub fn update(&mut self) {
        update_particles(&mut self.particles);
    }

    /// Apply a game action. Returns true if anything changed.
    ///
    /// After game over only `Restart` is accepted.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over && action != GameAction::Restart {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.translate(-1),
            GameAction::MoveRight => self.translate(1),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => {
                if self.active.is_none() && !self.animation.is_active() {
                    return false;
                }
                self.move_down();
                true
            }
            GameAction::HardDrop => {
                if self.active.is_none() || self.animation.is_active() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Hold => self.hold_piece(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    // ----- persistence writers -----

    /// Overwrite one board cell. The falling-piece marking is kept as is.
    ///
    /// Rejects cells whose occupancy and category disagree.
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if !cell.is_consistent() {
            return false;
        }
        let Some(existing) = self.board.get(x, y) else {
            return false;
        };
        self.board.set(
            x,
            y,
            Cell {
                current: existing.current,
                ..cell
            },
        )
    }

    /// Place the falling piece. Rejects rotations above 3 and poses with a
    /// block off the board or on a frozen cell.
    pub fn set_current_piece(&mut self, piece: Piece) -> bool {
        if piece.rotation >= ROTATION_COUNT || self.collides(piece.shape, piece.rotation, piece.x, piece.y) {
            return false;
        }
        self.place_active(piece);
        true
    }

    pub fn clear_current_piece(&mut self) {
        self.board.clear_current_marks();
        self.active = None;
    }

    pub fn set_next_piece(&mut self, piece: QueuedPiece) {
        self.next = piece;
    }

    pub fn set_hold_piece(&mut self, piece: Option<QueuedPiece>, can_hold: bool) {
        self.hold = piece;
        self.can_hold = can_hold;
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn set_lines_cleared(&mut self, lines: u32) {
        self.lines = lines;
    }

    pub fn set_combo_count(&mut self, combo: u32) {
        self.combo = combo;
    }

    pub fn set_recycled_count(&mut self, category: Category, count: u32) {
        self.recycled[category.index()] = count;
    }

    pub fn set_game_over(&mut self, game_over: bool) {
        self.game_over = game_over;
    }

    /// Rejects out-of-range rows and steps.
    pub fn set_line_clear_animation(&mut self, animation: LineClearAnimation) -> bool {
        if !animation.is_valid() {
            return false;
        }
        self.animation = animation;
        true
    }

    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    pub fn set_piece_serial(&mut self, serial: u32) {
        self.piece_serial = serial;
    }

    /// Rebuild the exact state captured in `snapshot`.
    ///
    /// Returns false, leaving the state untouched, when the snapshot is invalid.
    pub fn restore(&mut self, snapshot: &GameSnapshot) -> bool {
        if !snapshot.is_valid() {
            return false;
        }

        self.board.clear();
        for (y, row) in snapshot.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.set_cell(x as i8, y as i8, *cell);
            }
        }
        match snapshot.active {
            Some(piece) => {
                self.set_current_piece(piece);
            }
            None => self.clear_current_piece(),
        }
        self.set_next_piece(snapshot.next);
        self.set_hold_piece(snapshot.hold, snapshot.can_hold);
        self.set_score(snapshot.score);
        self.set_level(snapshot.level);
        self.set_lines_cleared(snapshot.lines);
        self.set_combo_count(snapshot.combo);
        for category in Category::ALL {
            self.set_recycled_count(category, snapshot.recycled_count(category));
        }
        self.set_game_over(snapshot.game_over);
        self.set_line_clear_animation(snapshot.animation);
        self.set_particles(snapshot.particles.clone());
        self.set_piece_serial(snapshot.piece_serial);
        self.pending_level_up = None;
        true
    }
}
