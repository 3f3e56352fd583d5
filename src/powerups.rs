#![warn(clippy::all, clippy::pedantic)]

use std::collections::HashMap;

use log::debug;

use crate::game::{DOUBLE_POINTS_FACTOR, POWER_UP_DURATION, SLOW_MOTION_SCALE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    DoublePoints,
    SlowMotion,
    ComboBooster,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::DoublePoints,
        PowerUpKind::SlowMotion,
        PowerUpKind::ComboBooster,
    ];

    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::DoublePoints => "Double Points",
            PowerUpKind::SlowMotion => "Slow Motion",
            PowerUpKind::ComboBooster => "Combo Booster",
        }
    }

    /// Instant power-ups apply once and never occupy a timer slot.
    #[must_use]
    pub fn is_instant(self) -> bool {
        matches!(self, PowerUpKind::ComboBooster)
    }
}

/// Remaining duration per active timed power-up.
#[derive(Debug, Clone, Default)]
pub struct PowerUpTimers {
    active: HashMap<PowerUpKind, f32>,
}

impl PowerUpTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or refreshes) a timed power-up. Instant kinds are ignored.
    pub fn activate(&mut self, kind: PowerUpKind) {
        if kind.is_instant() {
            return;
        }
        debug!("Power-up {} active for {POWER_UP_DURATION}s", kind.label());
        self.active.insert(kind, POWER_UP_DURATION);
    }

    /// Counts every timer down by `dt` and returns the kinds that ran out.
    pub fn update(&mut self, dt: f32) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.active.retain(|kind, remaining| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                expired.push(*kind);
                false
            } else {
                true
            }
        });
        expired
    }

    #[must_use]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active.contains_key(&kind)
    }

    #[must_use]
    pub fn remaining(&self, kind: PowerUpKind) -> Option<f32> {
        self.active.get(&kind).copied()
    }

    /// Active power-ups in a stable order, for display.
    #[must_use]
    pub fn active(&self) -> Vec<(PowerUpKind, f32)> {
        PowerUpKind::ALL
            .iter()
            .filter_map(|kind| self.remaining(*kind).map(|r| (*kind, r)))
            .collect()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    #[must_use]
    pub fn points_factor(&self) -> u32 {
        if self.is_active(PowerUpKind::DoublePoints) {
            DOUBLE_POINTS_FACTOR
        } else {
            1
        }
    }

    #[must_use]
    pub fn time_scale(&self) -> f32 {
        if self.is_active(PowerUpKind::SlowMotion) {
            SLOW_MOTION_SCALE
        } else {
            1.0
        }
    }
}
