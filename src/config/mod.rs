pub mod gameplay;
pub mod loader;

use serde::{Deserialize, Serialize};

pub use self::gameplay::{Difficulty, GameMode, GameplayConfig, MismatchPolicy};
pub use crate::render::WidgetStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub gameplay: GameplayConfig,
    pub audio: AudioConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_enabled: bool,
    pub sound_enabled: bool,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_enabled: true,
            sound_enabled: true,
            volume: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub button_style: WidgetStyle,
    pub particles: bool,
    pub screen_shake: bool,
    /// Render frames per second
    pub frame_rate: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            button_style: WidgetStyle::Modern,
            particles: true,
            screen_shake: true,
            frame_rate: 30,
        }
    }
}
