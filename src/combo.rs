#![warn(clippy::all, clippy::pedantic)]

use log::trace;

use crate::game::{COMBO_STEP, COMBO_WINDOW, MULTIPLIER_CAP};

/// Running score plus the combo streak that drives the multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreState {
    pub score: u32,
    pub combo_streak: u32,
    pub combo_decay_remaining: f32,
    pub max_combo: u32,
    combo_window: f32,
    multiplier_cap: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(COMBO_WINDOW, MULTIPLIER_CAP)
    }
}

impl ScoreState {
    #[must_use]
    pub fn new(combo_window: f32, multiplier_cap: u32) -> Self {
        Self {
            score: 0,
            combo_streak: 0,
            combo_decay_remaining: 0.0,
            max_combo: 0,
            combo_window: combo_window.max(0.0),
            multiplier_cap: multiplier_cap.max(1),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.combo_window, self.multiplier_cap);
    }

    /// `min(1 + streak / 3, cap)` with integer division.
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        (1 + self.combo_streak / COMBO_STEP).min(self.multiplier_cap)
    }

    pub fn register_catch(&mut self) {
        self.combo_streak += 1;
        self.combo_decay_remaining = self.combo_window;
        self.max_combo = self.max_combo.max(self.combo_streak);
    }

    pub fn register_miss(&mut self) {
        self.break_combo();
    }

    pub fn register_mismatch(&mut self) {
        self.break_combo();
    }

    /// Extends the streak without scoring (combo booster power-up).
    pub fn boost(&mut self, amount: u32) {
        self.combo_streak += amount;
        self.combo_decay_remaining = self.combo_window;
        self.max_combo = self.max_combo.max(self.combo_streak);
    }

    /// Scores a catch worth `base_points` at the current multiplier, then extends the streak.
    /// Returns the points added.
    pub fn award(&mut self, base_points: u32) -> u32 {
        let points = base_points.saturating_mul(self.multiplier());
        self.score = self.score.saturating_add(points);
        self.register_catch();
        trace!("Awarded {points} points, streak now {}", self.combo_streak);
        points
    }

    pub fn tick(&mut self, dt: f32) {
        if self.combo_decay_remaining > 0.0 {
            self.combo_decay_remaining -= dt;
            if self.combo_decay_remaining <= 0.0 {
                trace!("Combo of {} expired", self.combo_streak);
                self.break_combo();
            }
        }
    }

    fn break_combo(&mut self) {
        self.combo_streak = 0;
        self.combo_decay_remaining = 0.0;
    }
}
