#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::ScreenShake;

// Offsets fade out over this many seconds
const FADE_SECONDS: f32 = 0.3;

/// Starts a shake in every direction, replacing any shake already running.
pub fn trigger_screen_shake(world: &mut World, intensity: f32, duration: f32) {
    let mut screen_shake = world.resource_mut::<ScreenShake>();
    screen_shake.intensity = intensity;
    screen_shake.duration = duration;
    screen_shake.is_active = true;
    screen_shake.horizontal_bias = false;
    trace!("Screen shake triggered with intensity {intensity}");
}

/// Side-to-side shake for a fruit dropped into the wrong basket.
pub fn trigger_mismatch_shake(world: &mut World) {
    let mut screen_shake = world.resource_mut::<ScreenShake>();
    screen_shake.intensity = 1.5;
    screen_shake.duration = 0.25;
    screen_shake.is_active = true;
    screen_shake.horizontal_bias = true;
    trace!("Mismatch shake triggered");
}

pub fn update_screen_shake(world: &mut World, delta_seconds: f32) {
    let mut screen_shake = world.resource_mut::<ScreenShake>();
    if screen_shake.duration <= 0.0 {
        return;
    }

    screen_shake.duration -= delta_seconds;
    if screen_shake.duration <= 0.0 {
        screen_shake.intensity = 0.0;
        screen_shake.current_offset = (0, 0);
        screen_shake.is_active = false;
        screen_shake.horizontal_bias = false;
        return;
    }

    let intensity = screen_shake.intensity * (screen_shake.duration / FADE_SECONDS).min(1.0);
    #[allow(clippy::cast_possible_truncation)]
    let max_offset = ((intensity * 2.0) as i16).max(1);

    let dx = fastrand::i16(0..=max_offset) - max_offset / 2;
    let dy = if screen_shake.horizontal_bias {
        0
    } else {
        fastrand::i16(0..=max_offset) - max_offset / 2
    };
    screen_shake.current_offset = (dx, dy);
}
