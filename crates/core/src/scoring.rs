//! Scoring module - uniform line rewards, levels and drop speed
//!
//! Only uniform lines score. For a single line of a category:
//!
//! ```text
//! base          = base_score[category] * lines
//! level_mult    = 1 + (level - 1) * 0.1      = (9 + level) / 10
//! combo_mult    = 1 + combo_count * 0.2      = (5 + combo) / 5
//! uniform_bonus = 1.5                        = 3 / 2
//! points        = floor(base * level_mult * combo_mult * uniform_bonus)
//! if is_combo: points = floor(points * 1.5)
//! ```
//!
//! The multipliers are exact rationals, so the arithmetic is done on integers
//! and each floor happens exactly where the formula places it.

use crate::types::{Category, BASE_DROP_TICKS, LINES_PER_LEVEL};

const BONUS_NUMERATOR: u64 = 3;
const BONUS_DENOMINATOR: u64 = 2;

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Points before the combo bonus.
    pub line_clear_score: u32,
    pub total: u32,
    /// Whether the 1.5x combo bonus was applied.
    pub combo_applied: bool,
}

/// Points for `lines` uniform lines of `category`.
///
/// `combo_count` is the value after the current pass updated it.
pub fn calculate_line_score(
    lines: u32,
    category: Category,
    level: u32,
    combo_count: u32,
    is_combo: bool,
) -> ScoreResult {
    let base = u64::from(category.base_score()) * u64::from(lines);
    let numerator = base
        .saturating_mul(9 + u64::from(level))
        .saturating_mul(5 + u64::from(combo_count))
        .saturating_mul(BONUS_NUMERATOR);
    let line_clear_score = numerator / (10 * 5 * BONUS_DENOMINATOR);

    let total = if is_combo {
        line_clear_score.saturating_mul(BONUS_NUMERATOR) / BONUS_DENOMINATOR
    } else {
        line_clear_score
    };

    ScoreResult {
        line_clear_score: saturate(line_clear_score),
        total: saturate(total),
        combo_applied: is_combo,
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Level for a lifetime line count: `lines / 10 + 1`.
pub fn calculate_level(lines_cleared: u32) -> u32 {
    lines_cleared / LINES_PER_LEVEL + 1
}

/// `max(0.1, 1 - (level - 1) * 0.05)`; lower means faster gravity.
pub fn difficulty_multiplier(level: u32) -> f32 {
    (1.0 - (level as f32 - 1.0) * 0.05).max(0.1)
}

/// Ticks between automatic drops at `level`: `max(1, floor(30 * multiplier))`.
pub fn drop_interval_ticks(level: u32) -> u32 {
    ((BASE_DROP_TICKS as f32 * difficulty_multiplier(level)) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_plastic_line_at_level_one() {
        let result = calculate_line_score(1, Category::Plastic, 1, 0, false);
        assert_eq!(result.line_clear_score, 225);
        assert_eq!(result.total, 225);
        assert!(!result.combo_applied);
    }

    #[test]
    fn test_base_scores_per_category() {
        let expected = [
            (Category::Paper, 150),
            (Category::Plastic, 225),
            (Category::Metal, 300),
            (Category::Glass, 262),
            (Category::Organic, 187),
        ];
        for (category, points) in expected {
            assert_eq!(calculate_line_score(1, category, 1, 0, false).total, points);
        }
    }

    #[test]
    fn test_level_multiplier() {
        // 100 * 1.2 * 1.5 = 180
        assert_eq!(calculate_line_score(1, Category::Paper, 3, 0, false).total, 180);
    }

    #[test]
    fn test_combo_multiplier_and_bonus() {
        // 100 * 1.0 * 1.2 * 1.5 = 180, then * 1.5 = 270
        let result = calculate_line_score(1, Category::Paper, 1, 1, true);
        assert_eq!(result.line_clear_score, 180);
        assert_eq!(result.total, 270);

        // Glass: floor(175 * 1.2 * 1.5) = 315, floor(315 * 1.5) = 472
        assert_eq!(calculate_line_score(1, Category::Glass, 1, 1, true).total, 472);
    }

    #[test]
    fn test_floor_applied_twice() {
        // Organic: floor(125 * 1.5) = 187, floor(187 * 1.5) = 280 (not 281)
        assert_eq!(calculate_line_score(1, Category::Organic, 1, 0, true).total, 280);
    }

    #[test]
    fn test_calculate_level() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(11), 2);
        assert_eq!(calculate_level(95), 10);
    }

    #[test]
    fn test_difficulty_multiplier() {
        assert_eq!(difficulty_multiplier(1), 1.0);
        assert!((difficulty_multiplier(3) - 0.9).abs() < 1e-6);
        assert_eq!(difficulty_multiplier(25), 0.1);
        assert_eq!(difficulty_multiplier(100), 0.1);
    }

    #[test]
    fn test_drop_interval_ticks() {
        assert_eq!(drop_interval_ticks(1), 30);
        assert_eq!(drop_interval_ticks(100), 3);
        assert!(drop_interval_ticks(5) < drop_interval_ticks(1));
    }
}
