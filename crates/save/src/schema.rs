//! Versioned on-disk schema for a saved game
//!
//! Field-by-field mirror of [`GameSnapshot`]. Categories are stored by their
//! lowercase names, shapes by table index, the board as 20 rows of 10 cells
//! with row 0 (the floor) first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recycle_tetris_core::board::Cell;
use recycle_tetris_core::particles::Particle;
use recycle_tetris_core::pieces::{Piece, QueuedPiece, ROTATION_COUNT};
use recycle_tetris_core::{calculate_level, GameSnapshot, LineClearAnimation};
use recycle_tetris_types::{
    Category, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, CATEGORY_COUNT, LINE_CLEAR_ANIMATION_STEPS,
};

use crate::SaveError;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub game: SavedGame,
}

impl SaveFile {
    pub fn new(snapshot: &GameSnapshot, saved_at: DateTime<Utc>) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at,
            game: SavedGame::from_snapshot(snapshot),
        }
    }

    /// Check the version, then decode and validate the game.
    pub fn into_snapshot(self) -> Result<GameSnapshot, SaveError> {
        if self.version != SAVE_VERSION {
            return Err(SaveError::UnsupportedVersion(self.version));
        }
        self.game.to_snapshot()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub combo_count: u32,
    /// Indexed paper, plastic, metal, glass, organic.
    pub recycled: [u32; CATEGORY_COUNT],
    pub current: Option<SavedPiece>,
    pub next: SavedQueuedPiece,
    pub hold: Option<SavedQueuedPiece>,
    pub can_hold: bool,
    pub game_over: bool,
    #[serde(default)]
    pub animation: Option<SavedAnimation>,
    #[serde(default)]
    pub particles: Vec<SavedParticle>,
    #[serde(default)]
    pub piece_serial: u32,
    /// `board[y][x]`, row 0 first.
    pub board: Vec<Vec<SavedCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCell {
    pub occupied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combo_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQueuedPiece {
    pub shape: u8,
    pub categories: [String; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPiece {
    pub shape: u8,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    pub categories: [String; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAnimation {
    pub row: u8,
    pub category: String,
    pub step: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedParticle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub life: f32,
    pub size: f32,
    pub category: String,
}

fn invalid(message: impl Into<String>) -> SaveError {
    SaveError::Invalid(message.into())
}

fn parse_category(name: &str) -> Result<Category, SaveError> {
    Category::from_str(name).ok_or_else(|| invalid(format!("unknown category {name:?}")))
}

fn parse_categories(names: &[String; 4]) -> Result<[Category; 4], SaveError> {
    let mut out = [Category::Paper; 4];
    for (slot, name) in out.iter_mut().zip(names.iter()) {
        *slot = parse_category(name)?;
    }
    Ok(out)
}

fn category_names(categories: &[Category; 4]) -> [String; 4] {
    (*categories).map(|c| c.as_str().to_string())
}

fn parse_shape(index: u8) -> Result<ShapeKind, SaveError> {
    ShapeKind::from_index(usize::from(index))
        .ok_or_else(|| invalid(format!("shape index {index} out of range")))
}

impl SavedQueuedPiece {
    fn from_piece(piece: &QueuedPiece) -> Self {
        Self {
            shape: piece.shape.index() as u8,
            categories: category_names(&piece.categories),
        }
    }

    fn to_piece(&self) -> Result<QueuedPiece, SaveError> {
        Ok(QueuedPiece {
            shape: parse_shape(self.shape)?,
            categories: parse_categories(&self.categories)?,
        })
    }
}

impl SavedPiece {
    fn from_piece(piece: &Piece) -> Self {
        Self {
            shape: piece.shape.index() as u8,
            rotation: piece.rotation,
            x: piece.x,
            y: piece.y,
            categories: category_names(&piece.categories),
        }
    }

    fn to_piece(&self) -> Result<Piece, SaveError> {
        if self.rotation >= ROTATION_COUNT {
            return Err(invalid(format!("rotation {} out of range", self.rotation)));
        }
        if !(0..BOARD_WIDTH as i8).contains(&self.x) || !(0..BOARD_HEIGHT as i8).contains(&self.y) {
            return Err(invalid(format!("piece anchor ({}, {}) off the board", self.x, self.y)));
        }
        Ok(Piece {
            shape: parse_shape(self.shape)?,
            rotation: self.rotation,
            x: self.x,
            y: self.y,
            categories: parse_categories(&self.categories)?,
        })
    }
}

impl SavedCell {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            occupied: cell.occupied,
            category: cell.category.map(|c| c.as_str().to_string()),
            combo_id: cell.combo_id,
        }
    }

    fn to_cell(&self) -> Result<Cell, SaveError> {
        let category = self.category.as_deref().map(parse_category).transpose()?;
        let cell = Cell {
            occupied: self.occupied,
            current: false,
            category,
            combo_id: self.combo_id,
        };
        if !cell.is_consistent() {
            return Err(invalid("cell occupancy and category disagree"));
        }
        Ok(cell)
    }
}

impl SavedGame {
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        Self {
            score: snapshot.score,
            level: snapshot.level,
            lines_cleared: snapshot.lines,
            combo_count: snapshot.combo,
            recycled: snapshot.recycled,
            current: snapshot.active.as_ref().map(SavedPiece::from_piece),
            next: SavedQueuedPiece::from_piece(&snapshot.next),
            hold: snapshot.hold.as_ref().map(SavedQueuedPiece::from_piece),
            can_hold: snapshot.can_hold,
            game_over: snapshot.game_over,
            animation: match snapshot.animation {
                LineClearAnimation::Idle => None,
                LineClearAnimation::Active {
                    row,
                    category,
                    step,
                } => Some(SavedAnimation {
                    row,
                    category: category.as_str().to_string(),
                    step,
                }),
            },
            particles: snapshot
                .particles
                .iter()
                .map(|p| SavedParticle {
                    x: p.x,
                    y: p.y,
                    vx: p.vx,
                    vy: p.vy,
                    life: p.life,
                    size: p.size,
                    category: p.category.as_str().to_string(),
                })
                .collect(),
            piece_serial: snapshot.piece_serial,
            board: snapshot
                .board
                .iter()
                .map(|row| row.iter().map(SavedCell::from_cell).collect())
                .collect(),
        }
    }

    /// Decode and validate every field. Nothing is applied on error.
    pub fn to_snapshot(&self) -> Result<GameSnapshot, SaveError> {
        let mut snapshot = GameSnapshot::default();

        if self.board.len() != BOARD_HEIGHT as usize {
            return Err(invalid(format!("board has {} rows", self.board.len())));
        }
        for (y, row) in self.board.iter().enumerate() {
            if row.len() != BOARD_WIDTH as usize {
                return Err(invalid(format!("row {y} has {} cells", row.len())));
            }
            for (x, cell) in row.iter().enumerate() {
                snapshot.board[y][x] = cell.to_cell()?;
            }
        }

        snapshot.active = self.current.as_ref().map(SavedPiece::to_piece).transpose()?;
        // The falling-piece marking is derived, not stored.
        if let Some(piece) = snapshot.active {
            for (x, y) in piece.blocks() {
                if x < 0 || y < 0 {
                    continue;
                }
                if let Some(cell) = snapshot
                    .board
                    .get_mut(y as usize)
                    .and_then(|row| row.get_mut(x as usize))
                {
                    cell.current = true;
                }
            }
        }
        snapshot.next = self.next.to_piece()?;
        snapshot.hold = self.hold.as_ref().map(SavedQueuedPiece::to_piece).transpose()?;
        snapshot.can_hold = self.can_hold;
        snapshot.score = self.score;
        snapshot.level = self.level;
        snapshot.lines = self.lines_cleared;
        snapshot.combo = self.combo_count;
        snapshot.recycled = self.recycled;
        snapshot.game_over = self.game_over;
        snapshot.piece_serial = self.piece_serial;

        snapshot.animation = match &self.animation {
            None => LineClearAnimation::Idle,
            Some(anim) => {
                if anim.row >= BOARD_HEIGHT || anim.step >= LINE_CLEAR_ANIMATION_STEPS {
                    return Err(invalid("line-clear animation out of range"));
                }
                LineClearAnimation::Active {
                    row: anim.row,
                    category: parse_category(&anim.category)?,
                    step: anim.step,
                }
            }
        };

        snapshot.particles = self
            .particles
            .iter()
            .map(|p| {
                Ok(Particle {
                    x: p.x,
                    y: p.y,
                    vx: p.vx,
                    vy: p.vy,
                    life: p.life,
                    size: p.size,
                    category: parse_category(&p.category)?,
                })
            })
            .collect::<Result<Vec<_>, SaveError>>()?;

        if snapshot.level < calculate_level(snapshot.lines) {
            return Err(invalid(format!(
                "level {} is below what {} lines earn",
                snapshot.level, snapshot.lines
            )));
        }
        if !snapshot.is_valid() {
            return Err(invalid("falling piece is off the board or overlaps a block"));
        }
        Ok(snapshot)
    }
}
