use serde::{Deserialize, Serialize};

use crate::game::{
    BASE_FALL_SPEED, BASE_POINTS, COMBO_WINDOW, DEFAULT_BATCH_SIZE, DEFAULT_MISS_LIMIT,
    MULTIPLIER_CAP, SPECIAL_ITEM_CHANCE, TIME_ATTACK_SECONDS,
};

// Fall speed presets chosen from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    #[must_use]
    pub fn speed_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
            Difficulty::Expert => 1.5,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Expert,
            Difficulty::Expert => Difficulty::Easy,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Expert,
            Difficulty::Normal => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Normal,
            Difficulty::Expert => Difficulty::Hard,
        }
    }
}

// How a round ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Classic,
    TimeAttack,
    Zen,
}

impl GameMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::TimeAttack => "Time Attack",
            GameMode::Zen => "Zen",
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            GameMode::Classic => GameMode::TimeAttack,
            GameMode::TimeAttack => GameMode::Zen,
            GameMode::Zen => GameMode::Classic,
        }
    }

    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            GameMode::Classic => GameMode::Zen,
            GameMode::TimeAttack => GameMode::Classic,
            GameMode::Zen => GameMode::TimeAttack,
        }
    }
}

// What a wrong basket does to the falling item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Only the combo is lost; the player may try another basket
    #[default]
    LeaveFalling,
    /// The item is discarded along with the combo
    RemoveItem,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub miss_limit: u32,
    pub time_limit_secs: f32,
    pub batch_size: usize,
    pub base_points: u32,
    pub base_fall_speed: f32,
    pub combo_window: f32,
    pub multiplier_cap: u32,
    pub mismatch_policy: MismatchPolicy,
    pub special_item_chance: f32,
    /// Fixed RNG seed for reproducible rounds; random when unset
    pub seed: Option<u64>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            mode: GameMode::default(),
            miss_limit: DEFAULT_MISS_LIMIT,
            time_limit_secs: TIME_ATTACK_SECONDS,
            batch_size: DEFAULT_BATCH_SIZE,
            base_points: BASE_POINTS,
            base_fall_speed: BASE_FALL_SPEED,
            combo_window: COMBO_WINDOW,
            multiplier_cap: MULTIPLIER_CAP,
            mismatch_policy: MismatchPolicy::default(),
            special_item_chance: SPECIAL_ITEM_CHANCE,
            seed: None,
        }
    }
}
