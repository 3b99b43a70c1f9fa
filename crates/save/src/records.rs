//! High-score table and lifetime statistics

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use recycle_tetris_core::rng::RandomSource;
use recycle_tetris_core::GameState;
use recycle_tetris_types::CATEGORY_COUNT;

/// Entries kept in the high-score table.
pub const MAX_HIGH_SCORES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub duration_secs: u64,
    pub date: DateTime<Utc>,
}

impl HighScore {
    pub fn from_game<R: RandomSource>(game: &GameState<R>, duration: Duration, date: DateTime<Utc>) -> Self {
        Self {
            score: game.score(),
            level: game.level(),
            lines: game.lines_cleared(),
            duration_secs: duration.as_secs(),
            date,
        }
    }
}

/// Insert `entry`, keep the table sorted by score (highest first) and capped at ten.
///
/// Equal scores keep their insertion order. Returns the entry's rank (0-based)
/// if it made the table.
pub fn insert_high_score(table: &mut Vec<HighScore>, entry: HighScore) -> Option<usize> {
    let rank = table
        .iter()
        .position(|existing| existing.score < entry.score)
        .unwrap_or(table.len());
    if rank >= MAX_HIGH_SCORES {
        return None;
    }
    table.insert(rank, entry);
    table.truncate(MAX_HIGH_SCORES);
    Some(rank)
}

/// Totals across every finished game.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub games_played: u32,
    pub best_score: u32,
    pub best_level: u32,
    pub total_lines: u64,
    pub total_time_secs: u64,
    /// Indexed paper, plastic, metal, glass, organic.
    pub lifetime_recycled: [u64; CATEGORY_COUNT],
}

impl Statistics {
    /// Fold one finished game into the totals.
    pub fn record<R: RandomSource>(&mut self, game: &GameState<R>, duration: Duration) {
        self.games_played = self.games_played.saturating_add(1);
        self.total_time_secs = self.total_time_secs.saturating_add(duration.as_secs());
        self.best_score = self.best_score.max(game.score());
        self.best_level = self.best_level.max(game.level());
        self.total_lines = self.total_lines.saturating_add(u64::from(game.lines_cleared()));
        for (total, count) in self.lifetime_recycled.iter_mut().zip(game.recycled_counts()) {
            *total = total.saturating_add(u64::from(count));
        }
    }

    pub fn total_recycled(&self) -> u64 {
        self.lifetime_recycled
            .iter()
            .fold(0, |sum, &n| sum.saturating_add(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use recycle_tetris_types::Category;

    fn entry(score: u32) -> HighScore {
        HighScore {
            score,
            level: 1,
            lines: 0,
            duration_secs: 60,
            date: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn table_stays_sorted_and_capped() {
        let mut table = Vec::new();
        for score in [300, 100, 900, 500, 700, 200, 800, 400, 600, 1000, 50] {
            insert_high_score(&mut table, entry(score));
        }
        let scores: Vec<u32> = table.iter().map(|h| h.score).collect();
        assert_eq!(scores, vec![1000, 900, 800, 700, 600, 500, 400, 300, 200, 100]);

        assert_eq!(insert_high_score(&mut table, entry(10)), None);
        assert_eq!(insert_high_score(&mut table, entry(850)), Some(2));
        assert_eq!(table.len(), MAX_HIGH_SCORES);
        assert_eq!(table.last().map(|h| h.score), Some(200));
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut table = vec![entry(500)];
        let mut later = entry(500);
        later.lines = 7;
        assert_eq!(insert_high_score(&mut table, later), Some(1));
        assert_eq!(table[1].lines, 7);
    }

    #[test]
    fn statistics_accumulate() {
        let mut game = GameState::new(3);
        game.set_score(1_500);
        game.set_level(3);
        game.set_lines_cleared(25);
        game.set_recycled_count(Category::Glass, 4);

        let mut stats = Statistics::default();
        stats.record(&game, Duration::from_secs(90));
        game.set_score(900);
        stats.record(&game, Duration::from_secs(30));

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.best_score, 1_500);
        assert_eq!(stats.best_level, 3);
        assert_eq!(stats.total_lines, 50);
        assert_eq!(stats.total_time_secs, 120);
        assert_eq!(stats.lifetime_recycled[Category::Glass.index()], 8);
        assert_eq!(stats.total_recycled(), 8);
    }
}
