#![warn(clippy::all, clippy::pedantic)]

use crate::game::{COMBO_KING_STREAK, FRUIT_MASTER_SCORE, SHARP_EYE_CATCHES};
use crate::persistence::PlayerStats;
use crate::round::RoundSummary;

const SECONDS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    FruitMaster,
    ComboKing,
    SharpEye,
}

impl Achievement {
    pub const ALL: [Achievement; 3] = [
        Achievement::FruitMaster,
        Achievement::ComboKing,
        Achievement::SharpEye,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Achievement::FruitMaster => "Fruit Master",
            Achievement::ComboKing => "Combo King",
            Achievement::SharpEye => "Sharp Eye",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Achievement::FruitMaster => "Score 1000 points in one round",
            Achievement::ComboKing => "Reach a 10x combo",
            Achievement::SharpEye => "Catch 25 fruits in a row without a slip",
        }
    }

    #[must_use]
    pub fn is_earned(self, summary: &RoundSummary) -> bool {
        match self {
            Achievement::FruitMaster => summary.score >= FRUIT_MASTER_SCORE,
            Achievement::ComboKing => summary.max_combo >= COMBO_KING_STREAK,
            Achievement::SharpEye => summary.best_clean_streak >= SHARP_EYE_CATCHES,
        }
    }
}

/// Unlocks every achievement the round earned that `stats` doesn't already hold.
/// Returns only the newly unlocked ones.
pub fn evaluate(summary: &RoundSummary, stats: &mut PlayerStats) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|achievement| achievement.is_earned(summary))
        .filter(|achievement| stats.unlock(achievement.name()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyChallenge {
    MatchFruits(u32),
    ReachScore(u32),
    ReachCombo(u32),
}

impl DailyChallenge {
    const ROTATION: [DailyChallenge; 3] = [
        DailyChallenge::MatchFruits(50),
        DailyChallenge::ReachScore(500),
        DailyChallenge::ReachCombo(20),
    ];

    /// The challenge for a given number of days since the Unix epoch.
    #[must_use]
    pub fn for_day(day: u64) -> Self {
        // Rotation has three entries, so the cast cannot truncate
        #[allow(clippy::cast_possible_truncation)]
        let index = (day % Self::ROTATION.len() as u64) as usize;
        Self::ROTATION[index]
    }

    #[must_use]
    pub fn for_timestamp(unix_seconds: u64) -> Self {
        Self::for_day(unix_seconds / SECONDS_PER_DAY)
    }

    #[must_use]
    pub fn description(self) -> String {
        match self {
            DailyChallenge::MatchFruits(n) => format!("Match {n} fruits"),
            DailyChallenge::ReachScore(n) => format!("Reach {n} points"),
            DailyChallenge::ReachCombo(n) => format!("Get a {n}x combo"),
        }
    }

    #[must_use]
    pub fn is_completed(self, summary: &RoundSummary) -> bool {
        match self {
            DailyChallenge::MatchFruits(n) => summary.catches >= n,
            DailyChallenge::ReachScore(n) => summary.score >= n,
            DailyChallenge::ReachCombo(n) => summary.max_combo >= n,
        }
    }
}
