#![warn(clippy::all, clippy::pedantic)]

// Playfield dimensions in logical units (independent of terminal size)
pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 600.0;

// Receptacles sit on a row near the floor
pub const RECEPTACLE_Y: f32 = 540.0;
pub const RECEPTACLE_WIDTH: f32 = 80.0;
pub const RECEPTACLE_HEIGHT: f32 = 40.0;

// Game timing
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

// Falling items
pub const BASE_FALL_SPEED: f32 = 200.0; // Units per second at speed multiplier 1.0
pub const MAX_HORIZONTAL_DRIFT: f32 = 20.0; // Units per second, either direction
pub const SPAWN_MARGIN: f32 = 40.0; // Keep spawns away from the side walls
pub const SPECIAL_ITEM_CHANCE: f32 = 0.1;
pub const DEFAULT_BATCH_SIZE: usize = 1;

// Scoring
pub const BASE_POINTS: u32 = 10;
pub const COMBO_WINDOW: f32 = 2.0; // Seconds a streak survives without another catch
pub const COMBO_STEP: u32 = 3; // Catches per multiplier step
pub const MULTIPLIER_CAP: u32 = 5;

// Round end conditions
pub const DEFAULT_MISS_LIMIT: u32 = 3;
pub const TIME_ATTACK_SECONDS: f32 = 60.0;

// Power-ups
pub const POWER_UP_DURATION: f32 = 10.0;
pub const DOUBLE_POINTS_FACTOR: u32 = 2;
pub const SLOW_MOTION_SCALE: f32 = 0.5;
pub const COMBO_BOOST: u32 = 3;

// High scores
pub const MAX_HIGH_SCORES: usize = 10;

// Achievements
pub const FRUIT_MASTER_SCORE: u32 = 1000;
pub const COMBO_KING_STREAK: u32 = 10;
pub const SHARP_EYE_CATCHES: u32 = 25;
