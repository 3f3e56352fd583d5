#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting counts to f32 since the catalog is tiny
    clippy::cast_precision_loss
)]

use bevy_ecs::prelude::*;
use ratatui::style::Color;

use crate::game::{PLAYFIELD_WIDTH, RECEPTACLE_HEIGHT, RECEPTACLE_WIDTH, RECEPTACLE_Y};

/// A matchable fruit category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub identifier: &'static str,
    pub symbol: &'static str,
    pub color: Color,
}

impl Category {
    #[must_use]
    pub const fn new(identifier: &'static str, symbol: &'static str, color: Color) -> Self {
        Self {
            identifier,
            symbol,
            color,
        }
    }
}

pub const APPLE: Category = Category::new("apple", "●", Color::Red);
pub const BANANA: Category = Category::new("banana", "◗", Color::Yellow);
pub const ORANGE: Category = Category::new("orange", "◉", Color::LightRed);
pub const GRAPE: Category = Category::new("grape", "⁂", Color::Magenta);

/// The fixed set of categories a round is played with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    #[must_use]
    pub fn fruits() -> Self {
        Self::new(vec![APPLE, BANANA, ORANGE, GRAPE])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Category> {
        self.categories.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Picks a category uniformly at random.
    pub fn random(&self, rng: &mut fastrand::Rng) -> Option<Category> {
        if self.categories.is_empty() {
            return None;
        }
        self.get(rng.usize(..self.categories.len()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fruits()
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallingItem {
    pub category: Category,
    pub position: Position,
    pub vertical_speed: f32,
    pub horizontal_speed: f32,
    /// Round time (seconds) at which the item appeared
    pub spawn_time: f32,
    /// Catching a special item grants a power-up
    pub special: bool,
}

impl FallingItem {
    /// Moves the item by its speed over `dt` seconds, keeping it inside the side walls.
    pub fn advance(&mut self, dt: f32, playfield_width: f32) {
        self.position.y += self.vertical_speed * dt;
        self.position.x = (self.position.x + self.horizontal_speed * dt).clamp(0.0, playfield_width);
    }
}

/// Axis-aligned rectangle in playfield units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Receptacle {
    pub category: Category,
    pub position: Position,
    pub hit_region: HitRegion,
}

impl Receptacle {
    /// Builds one receptacle per catalog entry, spread evenly along the floor.
    #[must_use]
    pub fn layout(catalog: &Catalog) -> Vec<Self> {
        let count = catalog.len().max(1) as f32;
        let slot = PLAYFIELD_WIDTH / count;

        catalog
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let center_x = slot * (i as f32 + 0.5);
                Self {
                    category: *category,
                    position: Position::new(center_x, RECEPTACLE_Y),
                    hit_region: HitRegion {
                        x: center_x - RECEPTACLE_WIDTH / 2.0,
                        y: RECEPTACLE_Y,
                        width: RECEPTACLE_WIDTH,
                        height: RECEPTACLE_HEIGHT,
                    },
                }
            })
            .collect()
    }
}

#[derive(Component, Debug, Clone)]
pub struct Particle {
    pub position: Position,
    pub velocity: (f32, f32),
    pub color: Color,
    pub lifetime: f32,
    pub size: f32,
}

// Screen shake, offsets in terminal cells
#[derive(Debug, Clone, Resource, Default)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    pub current_offset: (i16, i16),
    pub is_active: bool,
    // Side-to-side only, used for wrong baskets
    pub horizontal_bias: bool,
}
