pub mod achievements;
pub mod app;
pub mod combo;
pub mod components;
pub mod config;
pub mod game;
pub mod input;
pub mod particles;
pub mod persistence;
pub mod powerups;
pub mod render;
pub mod round;
pub mod screen;
pub mod screenshake;
pub mod sound;
pub mod terminal;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

/// Frame clock. Either measures wall time between updates or advances by a fixed step.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
    elapsed: Duration,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            last_update: Instant::now(),
            elapsed: Duration::default(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
        self.elapsed += self.delta;
    }

    /// Steps the clock by `seconds` regardless of wall time.
    pub fn advance(&mut self, seconds: f32) {
        self.delta = Duration::from_secs_f32(seconds.max(0.0));
        self.last_update = Instant::now();
        self.elapsed += self.delta;
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
