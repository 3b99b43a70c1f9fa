//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core simulation, terminal rendering, save files).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, **bottom to top**: y=0 is the floor)
//! - **Spawn row**: y=17, column chosen at random in 2..=6
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_TICKS` | 30 | Ticks between gravity steps at level 1 |
//! | `LINE_CLEAR_ANIMATION_STEPS` | 10 | Gravity ticks a uniform line animates before removal |
//!
//! # Examples
//!
//! ```
//! use recycle_tetris_types::{Category, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let category = Category::from_str("plastic").unwrap();
//! assert_eq!(category, Category::Plastic);
//! assert_eq!(category.base_score(), 150);
//!
//! assert_eq!(ShapeKind::from_index(6), Some(ShapeKind::O));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Row every new piece spawns on.
pub const SPAWN_Y: i8 = 17;

/// Lowest spawn column (inclusive).
pub const SPAWN_X_MIN: i8 = 2;

/// Number of distinct spawn columns (2..=6).
pub const SPAWN_X_RANGE: u32 = 5;

/// Column a piece swapped out of hold is placed at.
pub const HOLD_SWAP_X: i8 = 5;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Ticks between automatic drops at level 1, scaled by the difficulty multiplier.
pub const BASE_DROP_TICKS: u32 = 30;

/// Number of animation steps before an animated uniform line is removed.
pub const LINE_CLEAR_ANIMATION_STEPS: u8 = 10;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Particles spawned per cleared cell.
pub const PARTICLES_PER_CELL: usize = 3;

/// Number of material categories.
pub const CATEGORY_COUNT: usize = 5;

/// Number of tetromino shapes.
pub const SHAPE_COUNT: usize = 7;

/// Recyclable material carried by every block of a piece.
///
/// Each category has its own base score and display colour:
/// - **Paper**: 100 points, blue
/// - **Plastic**: 150 points, red
/// - **Metal**: 200 points, yellow
/// - **Glass**: 175 points, green
/// - **Organic**: 125 points, brown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Paper,
    Plastic,
    Metal,
    Glass,
    Organic,
}

impl Category {
    /// All categories in index order.
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Paper,
        Category::Plastic,
        Category::Metal,
        Category::Glass,
        Category::Organic,
    ];

    /// Category for a random draw in `0..5`.
    ///
    /// # Examples
    ///
    /// ```
    /// use recycle_tetris_types::Category;
    ///
    /// assert_eq!(Category::from_index(0), Some(Category::Paper));
    /// assert_eq!(Category::from_index(4), Some(Category::Organic));
    /// assert_eq!(Category::from_index(5), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Category::Paper => 0,
            Category::Plastic => 1,
            Category::Metal => 2,
            Category::Glass => 3,
            Category::Organic => 4,
        }
    }

    /// Parse category from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paper" => Some(Category::Paper),
            "plastic" => Some(Category::Plastic),
            "metal" => Some(Category::Metal),
            "glass" => Some(Category::Glass),
            "organic" => Some(Category::Organic),
            _ => None,
        }
    }

    /// Convert to lowercase string (stable, used by save files)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Paper => "paper",
            Category::Plastic => "plastic",
            Category::Metal => "metal",
            Category::Glass => "glass",
            Category::Organic => "organic",
        }
    }

    /// Human-readable name shown to players.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Paper => "Paper",
            Category::Plastic => "Plastic",
            Category::Metal => "Metal",
            Category::Glass => "Glass",
            Category::Organic => "Organic",
        }
    }

    /// Points for one uniform line of this category before multipliers.
    pub fn base_score(&self) -> u32 {
        match self {
            Category::Paper => 100,
            Category::Plastic => 150,
            Category::Metal => 200,
            Category::Glass => 175,
            Category::Organic => 125,
        }
    }

    /// Display colour of blocks carrying this category.
    pub fn color(&self) -> CellColor {
        match self {
            Category::Paper => CellColor::new(0.0, 0.0, 1.0),
            Category::Plastic => CellColor::new(1.0, 0.0, 0.0),
            Category::Metal => CellColor::new(1.0, 1.0, 0.0),
            Category::Glass => CellColor::new(0.0, 1.0, 0.0),
            Category::Organic => CellColor::new(0.5, 0.25, 0.0),
        }
    }
}

/// Human-readable name for an optional category ("Unknown" when absent).
pub fn category_name(category: Option<Category>) -> &'static str {
    category.map(|c| c.display_name()).unwrap_or("Unknown")
}

/// Normalised RGB colour (each channel in `0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl CellColor {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Channel by index (0 = red, 1 = green, 2 = blue); 0.0 otherwise.
    pub fn channel(&self, index: usize) -> f32 {
        match index {
            0 => self.red,
            1 => self.green,
            2 => self.blue,
            _ => 0.0,
        }
    }
}

/// The seven tetromino shapes, in shape-table index order.
///
/// - **I**: straight bar (index 0)
/// - **S**: index 1
/// - **Z**: mirror of S (index 2)
/// - **L**: index 3
/// - **J**: mirror of L (index 4)
/// - **T**: index 5
/// - **O**: 2x2 square (index 6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    S,
    Z,
    L,
    J,
    T,
    O,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; SHAPE_COUNT] = [
        ShapeKind::I,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::O,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::S => 1,
            ShapeKind::Z => 2,
            ShapeKind::L => 3,
            ShapeKind::J => 4,
            ShapeKind::T => 5,
            ShapeKind::O => 6,
        }
    }

    /// Single-letter name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::L => "L",
            ShapeKind::J => "J",
            ShapeKind::T => "T",
            ShapeKind::O => "O",
        }
    }
}

/// Game actions that can be applied to the simulation
///
/// Driver-level commands (pause, save, load, quit) live in the input crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// One gravity step (advances the line-clear animation while it runs)
    SoftDrop,
    /// Slide the piece to its resting row and freeze it
    HardDrop,
    /// Rotate piece one step
    Rotate,
    /// Hold current piece (once per spawn)
    Hold,
    /// Restart the game
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use recycle_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "hold" => Some(GameAction::Hold),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Hold => "hold",
            GameAction::Restart => "restart",
        }
    }
}
