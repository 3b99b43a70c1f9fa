//! Achievement checklist
//!
//! A static catalog of threshold achievements evaluated by polling the game
//! state after each command. The driver owns one [`AchievementBook`] for the
//! session and hands it to whatever needs it; there is no global instance.
//!
//! # Example
//!
//! ```
//! use recycle_tetris_achievements::AchievementBook;
//! use recycle_tetris_core::GameState;
//!
//! let mut book = AchievementBook::new();
//! let mut game = GameState::new(1);
//! game.set_score(1_200);
//!
//! let unlocked = book.check(&game);
//! assert_eq!(unlocked, 1);
//! assert_eq!(book.take_notification().map(|a| a.id), Some(1));
//! ```

use recycle_tetris_core::rng::RandomSource;
use recycle_tetris_core::{GameSnapshot, GameState};
use recycle_tetris_types::{Category, CATEGORY_COUNT};

/// What must hold for an achievement to unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Score(u32),
    Lines(u32),
    Level(u32),
    Recycled(Category, u32),
    /// Every category recycled at least this many times.
    AllCategories(u32),
    TotalRecycled(u32),
    Combo(u32),
}

/// Values an achievement can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub combo: u32,
    pub recycled: [u32; CATEGORY_COUNT],
}

impl<R: RandomSource> From<&GameState<R>> for Progress {
    fn from(game: &GameState<R>) -> Self {
        Self {
            score: game.score(),
            lines: game.lines_cleared(),
            level: game.level(),
            combo: game.combo_count(),
            recycled: game.recycled_counts(),
        }
    }
}

impl From<&GameSnapshot> for Progress {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            score: snapshot.score,
            lines: snapshot.lines,
            level: snapshot.level,
            combo: snapshot.combo,
            recycled: snapshot.recycled,
        }
    }
}

impl Condition {
    pub fn is_met(&self, progress: &Progress) -> bool {
        match *self {
            Condition::Score(target) => progress.score >= target,
            Condition::Lines(target) => progress.lines >= target,
            Condition::Level(target) => progress.level >= target,
            Condition::Recycled(category, target) => progress.recycled[category.index()] >= target,
            Condition::AllCategories(target) => progress.recycled.iter().all(|&n| n >= target),
            Condition::TotalRecycled(target) => {
                progress.recycled.iter().map(|&n| u64::from(n)).sum::<u64>() >= u64::from(target)
            }
            Condition::Combo(target) => progress.combo >= target,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: Condition,
    pub unlocked: bool,
}

const CATALOG: [(u32, &str, &str, Condition); 23] = [
    (1, "First Step", "Reach 1,000 points", Condition::Score(1_000)),
    (2, "Novice Recycler", "Reach 5,000 points", Condition::Score(5_000)),
    (3, "Eco Warrior", "Reach 25,000 points", Condition::Score(25_000)),
    (4, "Recycling Master", "Reach 100,000 points", Condition::Score(100_000)),
    (5, "Eco Legend", "Reach 500,000 points", Condition::Score(500_000)),
    (6, "First Sweep", "Clear 10 lines", Condition::Lines(10)),
    (7, "Efficient Cleaner", "Clear 100 lines", Condition::Lines(100)),
    (8, "Cleaning Machine", "Clear 500 lines", Condition::Lines(500)),
    (9, "Eco Demolisher", "Clear 1,000 lines", Condition::Lines(1_000)),
    (10, "Levelling Up", "Reach level 5", Condition::Level(5)),
    (11, "Specialist", "Reach level 10", Condition::Level(10)),
    (12, "Master", "Reach level 20", Condition::Level(20)),
    (13, "Legend", "Reach level 50", Condition::Level(50)),
    (14, "Paper Pal", "Recycle 100 paper lines", Condition::Recycled(Category::Paper, 100)),
    (15, "Plastic Fighter", "Recycle 100 plastic lines", Condition::Recycled(Category::Plastic, 100)),
    (16, "Metal Collector", "Recycle 100 metal lines", Condition::Recycled(Category::Metal, 100)),
    (17, "Glass Guardian", "Recycle 100 glass lines", Condition::Recycled(Category::Glass, 100)),
    (18, "Composter", "Recycle 100 organic lines", Condition::Recycled(Category::Organic, 100)),
    (19, "Complete Recycler", "Recycle 50 lines of every material", Condition::AllCategories(50)),
    (20, "Eco Champion", "Recycle 1,000 lines in total", Condition::TotalRecycled(1_000)),
    (21, "Combo Beginner", "Reach a combo of 3", Condition::Combo(3)),
    (22, "Combo Master", "Reach a combo of 5", Condition::Combo(5)),
    (23, "Combo Legend", "Reach a combo of 10", Condition::Combo(10)),
];

/// The session's achievements and the pending unlock notification.
#[derive(Debug, Clone)]
pub struct AchievementBook {
    achievements: Vec<Achievement>,
    /// Id of the most recent unlock not yet shown.
    notification: Option<u32>,
}

impl AchievementBook {
    pub fn new() -> Self {
        let achievements = CATALOG
            .iter()
            .map(|&(id, name, description, condition)| Achievement {
                id,
                name,
                description,
                condition,
                unlocked: false,
            })
            .collect();
        Self {
            achievements,
            notification: None,
        }
    }

    /// Unlock everything `game` now satisfies. Returns how many were newly unlocked.
    pub fn check<R: RandomSource>(&mut self, game: &GameState<R>) -> usize {
        self.check_progress(&Progress::from(game))
    }

    pub fn check_progress(&mut self, progress: &Progress) -> usize {
        let newly: Vec<u32> = self
            .achievements
            .iter()
            .filter(|a| !a.unlocked && a.condition.is_met(progress))
            .map(|a| a.id)
            .collect();
        for id in &newly {
            self.unlock(*id);
        }
        newly.len()
    }

    /// Unlock by id. Returns false for unknown or already unlocked ids.
    pub fn unlock(&mut self, id: u32) -> bool {
        match self.achievements.iter_mut().find(|a| a.id == id) {
            Some(achievement) if !achievement.unlocked => {
                achievement.unlocked = true;
                self.notification = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Mark ids unlocked without raising a notification (loading saved progress).
    pub fn restore_unlocked(&mut self, ids: &[u32]) {
        for achievement in &mut self.achievements {
            if ids.contains(&achievement.id) {
                achievement.unlocked = true;
            }
        }
    }

    pub fn get(&self, id: u32) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn all(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn unlocked(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.unlocked)
    }

    pub fn locked(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| !a.unlocked)
    }

    pub fn unlocked_ids(&self) -> Vec<u32> {
        self.unlocked().map(|a| a.id).collect()
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked().count()
    }

    pub fn completion_percentage(&self) -> f32 {
        if self.achievements.is_empty() {
            return 0.0;
        }
        self.unlocked_count() as f32 / self.achievements.len() as f32 * 100.0
    }

    pub fn has_notification(&self) -> bool {
        self.notification.is_some()
    }

    /// The latest unlock, once.
    pub fn take_notification(&mut self) -> Option<Achievement> {
        let id = self.notification.take()?;
        self.get(id).cloned()
    }
}

impl Default for AchievementBook {
    fn default() -> Self {
        Self::new()
    }
}
