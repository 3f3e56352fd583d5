#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting small counts to f32 for layout
    clippy::cast_precision_loss
)]

use std::collections::{HashMap, VecDeque};

use log::{debug, trace};

use crate::combo::ScoreState;
use crate::components::{Catalog, Category, FallingItem, Position, Receptacle};
use crate::config::{GameplayConfig, MismatchPolicy};
use crate::game::{COMBO_BOOST, MAX_HORIZONTAL_DRIFT, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH, SPAWN_MARGIN};
use crate::powerups::{PowerUpKind, PowerUpTimers};

/// Something that happened during a round, reported back to the caller for effects and bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    Spawned {
        category: Category,
    },
    Caught {
        category: Category,
        position: Position,
        points: u32,
        combo: u32,
        special: bool,
    },
    Mismatch {
        expected: Category,
        selected: Category,
        removed: bool,
    },
    Missed {
        category: Category,
        position: Position,
    },
    PowerUp(PowerUpKind),
    PowerUpExpired(PowerUpKind),
}

/// Round parameters fixed at round start.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSettings {
    pub batch_size: usize,
    pub base_points: u32,
    pub base_fall_speed: f32,
    pub speed_multiplier: f32,
    pub combo_window: f32,
    pub multiplier_cap: u32,
    pub mismatch_policy: MismatchPolicy,
    pub special_item_chance: f32,
}

impl From<&GameplayConfig> for RoundSettings {
    fn from(config: &GameplayConfig) -> Self {
        Self {
            batch_size: config.batch_size.max(1),
            base_points: config.base_points,
            base_fall_speed: config.base_fall_speed,
            speed_multiplier: config.difficulty.speed_multiplier(),
            combo_window: config.combo_window,
            multiplier_cap: config.multiplier_cap,
            mismatch_policy: config.mismatch_policy,
            special_item_chance: config.special_item_chance,
        }
    }
}

impl Default for RoundSettings {
    fn default() -> Self {
        Self::from(&GameplayConfig::default())
    }
}

/// What a finished round hands to statistics and achievements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoundSummary {
    pub score: u32,
    pub max_combo: u32,
    pub catches: u32,
    pub misses: u32,
    pub best_clean_streak: u32,
    pub elapsed: f32,
    pub catches_by_category: HashMap<&'static str, u32>,
}

/// True once `miss_count` has reached `limit`.
#[must_use]
pub fn is_round_over(miss_count: u32, limit: u32) -> bool {
    miss_count >= limit
}

/// Owns the falling items, the baskets and the score for one round.
pub struct RoundEngine {
    catalog: Catalog,
    receptacles: Vec<Receptacle>,
    // Oldest item first; selections always target the front
    items: VecDeque<FallingItem>,
    score: ScoreState,
    power_ups: PowerUpTimers,
    settings: RoundSettings,
    rng: fastrand::Rng,
    misses: u32,
    mismatches: u32,
    elapsed: f32,
    catches: u32,
    clean_streak: u32,
    best_clean_streak: u32,
    catches_by_category: HashMap<&'static str, u32>,
}

impl RoundEngine {
    #[must_use]
    pub fn new(catalog: Catalog, settings: RoundSettings, rng: fastrand::Rng) -> Self {
        let receptacles = Receptacle::layout(&catalog);
        let score = ScoreState::new(settings.combo_window, settings.multiplier_cap);
        Self {
            catalog,
            receptacles,
            items: VecDeque::new(),
            score,
            power_ups: PowerUpTimers::new(),
            settings,
            rng,
            misses: 0,
            mismatches: 0,
            elapsed: 0.0,
            catches: 0,
            clean_streak: 0,
            best_clean_streak: 0,
            catches_by_category: HashMap::new(),
        }
    }

    /// Prepares a new round with `settings`, drawing from `rng`.
    pub fn restart(&mut self, settings: RoundSettings, rng: fastrand::Rng) {
        self.score = ScoreState::new(settings.combo_window, settings.multiplier_cap);
        self.settings = settings;
        self.rng = rng;
        self.reset();
    }

    /// Starts the round over: fresh score, rebuilt receptacles, nothing falling.
    pub fn reset(&mut self) {
        self.receptacles = Receptacle::layout(&self.catalog);
        self.items.clear();
        self.score.reset();
        self.power_ups.clear();
        self.misses = 0;
        self.mismatches = 0;
        self.elapsed = 0.0;
        self.catches = 0;
        self.clean_streak = 0;
        self.best_clean_streak = 0;
        self.catches_by_category.clear();
    }

    /// Spawns one item when the batch has room. Returns the spawned category, or `None` when full.
    pub fn spawn_next(&mut self) -> Option<Category> {
        if self.items.len() >= self.settings.batch_size {
            return None;
        }
        let category = self.catalog.random(&mut self.rng)?;

        let span = (PLAYFIELD_WIDTH - 2.0 * SPAWN_MARGIN).max(0.0);
        let x = SPAWN_MARGIN + self.rng.f32() * span;
        let drift = (self.rng.f32() * 2.0 - 1.0) * MAX_HORIZONTAL_DRIFT;
        let special = self.rng.f32() < self.settings.special_item_chance;

        let item = FallingItem {
            category,
            position: Position::new(x, 0.0),
            vertical_speed: self.settings.base_fall_speed * self.settings.speed_multiplier,
            horizontal_speed: drift,
            spawn_time: self.elapsed,
            special,
        };
        trace!("Spawned {} at x={x:.0}", category.identifier);
        self.items.push_back(item);
        Some(category)
    }

    /// Advances time by `dt` seconds: moves items, expires combo and power-ups, detects misses.
    pub fn tick(&mut self, dt: f32) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        if dt <= 0.0 {
            return events;
        }

        let time_scale = self.power_ups.time_scale();
        self.elapsed += dt;
        self.score.tick(dt);
        for kind in self.power_ups.update(dt) {
            debug!("Power-up {} expired", kind.label());
            events.push(RoundEvent::PowerUpExpired(kind));
        }

        for item in &mut self.items {
            item.advance(dt * time_scale, PLAYFIELD_WIDTH);
        }

        while let Some(index) = self
            .items
            .iter()
            .position(|item| item.position.y >= PLAYFIELD_HEIGHT)
        {
            let Some(item) = self.items.remove(index) else {
                break;
            };
            self.misses += 1;
            self.clean_streak = 0;
            self.score.register_miss();
            debug!("Missed {} (misses: {})", item.category.identifier, self.misses);
            events.push(RoundEvent::Missed {
                category: item.category,
                position: item.position,
            });
        }

        events
    }

    /// Ticks and then refills the batch; what the playing screen calls every frame.
    pub fn update(&mut self, dt: f32) -> Vec<RoundEvent> {
        let mut events = self.tick(dt);
        while let Some(category) = self.spawn_next() {
            events.push(RoundEvent::Spawned { category });
        }
        events
    }

    /// Judges a basket choice against the oldest falling item.
    pub fn resolve_selection(&mut self, selected: Category) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        let Some(expected) = self.items.front().map(|item| item.category) else {
            return events;
        };

        if expected != selected {
            self.mismatches += 1;
            self.clean_streak = 0;
            self.score.register_mismatch();
            let removed = self.settings.mismatch_policy == MismatchPolicy::RemoveItem;
            if removed {
                self.items.pop_front();
            }
            debug!(
                "Mismatch: {} into the {} basket",
                expected.identifier, selected.identifier
            );
            events.push(RoundEvent::Mismatch {
                expected,
                selected,
                removed,
            });
            return events;
        }

        let Some(item) = self.items.pop_front() else {
            return events;
        };
        let base = self
            .settings
            .base_points
            .saturating_mul(self.power_ups.points_factor());
        let points = self.score.award(base);

        self.catches += 1;
        self.clean_streak += 1;
        self.best_clean_streak = self.best_clean_streak.max(self.clean_streak);
        *self
            .catches_by_category
            .entry(item.category.identifier)
            .or_insert(0) += 1;

        events.push(RoundEvent::Caught {
            category: item.category,
            position: item.position,
            points,
            combo: self.score.combo_streak,
            special: item.special,
        });

        if item.special {
            let kind = PowerUpKind::random(&mut self.rng);
            self.apply_power_up(kind);
            events.push(RoundEvent::PowerUp(kind));
        }

        events
    }

    /// Selects the receptacle at `index`; out-of-range indices are ignored.
    pub fn select_receptacle(&mut self, index: usize) -> Vec<RoundEvent> {
        match self.receptacles.get(index) {
            Some(receptacle) => {
                let category = receptacle.category;
                self.resolve_selection(category)
            }
            None => Vec::new(),
        }
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        if kind == PowerUpKind::ComboBooster {
            self.score.boost(COMBO_BOOST);
        }
        self.power_ups.activate(kind);
    }

    #[must_use]
    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            score: self.score.score,
            max_combo: self.score.max_combo,
            catches: self.catches,
            misses: self.misses,
            best_clean_streak: self.best_clean_streak,
            elapsed: self.elapsed,
            catches_by_category: self.catches_by_category.clone(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn receptacles(&self) -> &[Receptacle] {
        &self.receptacles
    }

    pub fn items(&self) -> impl Iterator<Item = &FallingItem> {
        self.items.iter()
    }

    /// The item the next selection is judged against.
    #[must_use]
    pub fn active_item(&self) -> Option<&FallingItem> {
        self.items.front()
    }

    #[must_use]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[must_use]
    pub fn power_ups(&self) -> &PowerUpTimers {
        &self.power_ups
    }

    #[must_use]
    pub fn settings(&self) -> &RoundSettings {
        &self.settings
    }

    #[must_use]
    pub fn misses(&self) -> u32 {
        self.misses
    }

    #[must_use]
    pub fn mismatches(&self) -> u32 {
        self.mismatches
    }

    #[must_use]
    pub fn catches(&self) -> u32 {
        self.catches
    }

    #[must_use]
    pub fn best_clean_streak(&self) -> u32 {
        self.best_clean_streak
    }

    /// Seconds since the round started.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[must_use]
    pub fn catches_by_category(&self) -> &HashMap<&'static str, u32> {
        &self.catches_by_category
    }
}
