//! Line-clear animation state machine
//!
//! ```text
//! Idle --start(row, category)--> Active { step: 0 }
//! Active { step } --advance--> Active { step + 1 }     while step + 1 < 10
//! Active { step: 9 } --advance--> Idle (row is handed back for deletion)
//! ```
//!
//! At most one row animates at a time.

use crate::types::{Category, BOARD_HEIGHT, LINE_CLEAR_ANIMATION_STEPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineClearAnimation {
    #[default]
    Idle,
    Active {
        /// Row being cleared (0 = bottom)
        row: u8,
        category: Category,
        /// Steps taken so far, always below `LINE_CLEAR_ANIMATION_STEPS`
        step: u8,
    },
}

impl LineClearAnimation {
    pub fn start(row: u8, category: Category) -> Self {
        LineClearAnimation::Active {
            row,
            category,
            step: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, LineClearAnimation::Active { .. })
    }

    pub fn row(&self) -> Option<u8> {
        match self {
            LineClearAnimation::Active { row, .. } => Some(*row),
            LineClearAnimation::Idle => None,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            LineClearAnimation::Active { category, .. } => Some(*category),
            LineClearAnimation::Idle => None,
        }
    }

    /// Current step (0 when idle).
    pub fn step(&self) -> u8 {
        match self {
            LineClearAnimation::Active { step, .. } => *step,
            LineClearAnimation::Idle => 0,
        }
    }

    /// Fraction of the animation completed, in `0.0..1.0`.
    pub fn progress(&self) -> f32 {
        f32::from(self.step()) / f32::from(LINE_CLEAR_ANIMATION_STEPS)
    }

    /// Row and step are within range.
    pub fn is_valid(&self) -> bool {
        match self {
            LineClearAnimation::Active { row, step, .. } => {
                *row < BOARD_HEIGHT && *step < LINE_CLEAR_ANIMATION_STEPS
            }
            LineClearAnimation::Idle => true,
        }
    }

    /// Take one step. Returns the row to delete when the animation finishes.
    pub fn advance(&mut self) -> Option<u8> {
        let LineClearAnimation::Active { row, step, .. } = self else {
            return None;
        };
        *step += 1;
        if *step < LINE_CLEAR_ANIMATION_STEPS {
            return None;
        }
        let finished = *row;
        *self = LineClearAnimation::Idle;
        Some(finished)
    }
}
