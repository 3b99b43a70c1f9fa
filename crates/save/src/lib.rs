//! Persistence for saved games, high scores, statistics and achievements
//!
//! Everything is stored as JSON under one directory chosen by the driver.
//! Saved games use an explicit versioned schema ([`schema::SaveFile`]) rather
//! than a memory dump, and are validated completely before any of it is
//! applied to a [`GameState`](recycle_tetris_core::GameState).
//!
//! # Example
//!
//! ```no_run
//! use recycle_tetris_core::GameState;
//! use recycle_tetris_save::{SaveStore, DEFAULT_SLOT};
//!
//! let store = SaveStore::new("saves");
//! let game = GameState::new(7);
//! store.save_game(&game, DEFAULT_SLOT)?;
//!
//! let mut restored = GameState::new(1);
//! store.load_game(&mut restored, DEFAULT_SLOT)?;
//! assert_eq!(restored.snapshot(), game.snapshot());
//! # Ok::<(), recycle_tetris_save::SaveError>(())
//! ```

pub mod records;
pub mod schema;
pub mod store;

use thiserror::Error;

pub use records::{HighScore, Statistics, MAX_HIGH_SCORES};
pub use schema::{SaveFile, SavedGame, SAVE_VERSION};
pub use store::{SaveStore, DEFAULT_SLOT};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),
    #[error("invalid save data: {0}")]
    Invalid(String),
    #[error("no save in slot {0:?}")]
    NotFound(String),
}
