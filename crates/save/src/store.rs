//! File-backed persistence rooted at one directory
//!
//! Files:
//! - `recycle_tetris_save_<slot>.json`: one saved game per slot
//! - `recycle_tetris_scores.json`: top-10 high scores
//! - `recycle_tetris_stats.json`: lifetime statistics
//! - `recycle_tetris_achievements.json`: unlocked achievement ids

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use recycle_tetris_achievements::AchievementBook;
use recycle_tetris_core::rng::RandomSource;
use recycle_tetris_core::GameState;

use crate::records::{insert_high_score, HighScore, Statistics};
use crate::schema::SaveFile;
use crate::SaveError;

/// Slot written on quit.
pub const DEFAULT_SLOT: &str = "autosave";

const SCORES_FILE: &str = "recycle_tetris_scores.json";
const STATS_FILE: &str = "recycle_tetris_stats.json";
const ACHIEVEMENTS_FILE: &str = "recycle_tetris_achievements.json";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
struct AchievementsFile {
    unlocked: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a slot's save file. Slot names are limited to ASCII letters,
    /// digits, `-` and `_`.
    pub fn save_path(&self, slot: &str) -> Result<PathBuf, SaveError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SaveError::Invalid(format!("bad slot name {slot:?}")));
        }
        Ok(self.dir.join(format!("recycle_tetris_save_{slot}.json")))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string_pretty(value)?;
        // Replace atomically.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Missing files read as `None`.
    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, SaveError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    // ----- game slots -----

    pub fn save_game<R: RandomSource>(&self, game: &GameState<R>, slot: &str) -> Result<(), SaveError> {
        let path = self.save_path(slot)?;
        let file = SaveFile::new(&game.snapshot(), Utc::now());
        self.write_json(&path, &file)
    }

    /// Read and validate a slot without applying it.
    pub fn read_save(&self, slot: &str) -> Result<SaveFile, SaveError> {
        let path = self.save_path(slot)?;
        self.read_json(&path)?
            .ok_or_else(|| SaveError::NotFound(slot.to_string()))
    }

    /// Replace `game` with the slot's contents.
    ///
    /// The file is decoded and validated completely first; on any error the
    /// game is left untouched.
    pub fn load_game<R: RandomSource>(&self, game: &mut GameState<R>, slot: &str) -> Result<(), SaveError> {
        let snapshot = self.read_save(slot)?.into_snapshot()?;
        if !game.restore(&snapshot) {
            return Err(SaveError::Invalid("snapshot rejected".to_string()));
        }
        Ok(())
    }

    pub fn has_save(&self, slot: &str) -> bool {
        self.save_path(slot).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Returns false when there was nothing to delete.
    pub fn delete_save(&self, slot: &str) -> Result<bool, SaveError> {
        let path = self.save_path(slot)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    // ----- high scores -----

    pub fn high_scores(&self) -> Result<Vec<HighScore>, SaveError> {
        Ok(self
            .read_json(&self.dir.join(SCORES_FILE))?
            .unwrap_or_default())
    }

    /// Add an entry and persist the table. Returns its rank if it made the table.
    pub fn add_high_score(&self, entry: HighScore) -> Result<Option<usize>, SaveError> {
        let mut table = self.high_scores()?;
        let rank = insert_high_score(&mut table, entry);
        if rank.is_some() {
            self.write_json(&self.dir.join(SCORES_FILE), &table)?;
        }
        Ok(rank)
    }

    // ----- statistics -----

    pub fn statistics(&self) -> Result<Statistics, SaveError> {
        Ok(self
            .read_json(&self.dir.join(STATS_FILE))?
            .unwrap_or_default())
    }

    /// Fold a finished game into the statistics and offer it to the high-score table.
    pub fn record_game<R: RandomSource>(
        &self,
        game: &GameState<R>,
        duration: Duration,
    ) -> Result<Statistics, SaveError> {
        let mut stats = self.statistics()?;
        stats.record(game, duration);
        self.write_json(&self.dir.join(STATS_FILE), &stats)?;
        self.add_high_score(HighScore::from_game(game, duration, Utc::now()))?;
        Ok(stats)
    }

    pub fn reset_statistics(&self) -> Result<(), SaveError> {
        self.write_json(&self.dir.join(STATS_FILE), &Statistics::default())
    }

    // ----- achievements -----

    pub fn save_achievements(&self, book: &AchievementBook) -> Result<(), SaveError> {
        let file = AchievementsFile {
            unlocked: book.unlocked_ids(),
        };
        self.write_json(&self.dir.join(ACHIEVEMENTS_FILE), &file)
    }

    /// Mark saved unlocks in `book`. Returns how many ids the file listed.
    pub fn load_achievements(&self, book: &mut AchievementBook) -> Result<usize, SaveError> {
        let file: AchievementsFile = self
            .read_json(&self.dir.join(ACHIEVEMENTS_FILE))?
            .unwrap_or_default();
        book.restore_unlocked(&file.unlocked);
        Ok(file.unlocked.len())
    }
}
