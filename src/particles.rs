#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow defining constants after statements in functions as it's clearer to define them near where they're used
    clippy::items_after_statements
)]

use bevy_ecs::prelude::*;
use log::trace;
use ratatui::style::Color;

use crate::components::{Particle, Position};
use crate::game::PLAYFIELD_WIDTH;
use crate::screenshake;

// Playfield units per second squared
const GRAVITY: f32 = 300.0;
const FRICTION: f32 = 0.95;

/// Burst in the fruit's color where it was caught; bigger combos throw more sparks.
pub fn spawn_catch_particles(world: &mut World, position: Position, color: Color, combo: u32) {
    trace!("Catch burst at ({:.0}, {:.0})", position.x, position.y);

    let count = 8 + combo.min(12) as usize;
    for _ in 0..count {
        // Upward bias so the burst pops out of the basket
        let vx = (fastrand::f32() - 0.5) * 240.0;
        let vy = (fastrand::f32() - 0.8) * 240.0;

        spawn_particle(
            world,
            position,
            (vx, vy),
            color,
            fastrand::f32() * 0.6 + 0.2, // lifetime: 0.2 to 0.8 seconds
            fastrand::f32() * 0.8 + 0.2, // size: 0.2 to 1.0
        );
    }
}

/// Dull splash where a fruit hit the floor.
pub fn spawn_miss_particles(world: &mut World, position: Position) {
    trace!("Miss splash at x={:.0}", position.x);

    const PARTICLES: usize = 10;
    for _ in 0..PARTICLES {
        let vx = (fastrand::f32() - 0.5) * 300.0;
        let vy = -fastrand::f32() * 120.0;

        spawn_particle(
            world,
            position,
            (vx, vy),
            Color::DarkGray,
            fastrand::f32() * 0.4 + 0.2,
            fastrand::f32() * 0.6 + 0.3,
        );
    }
}

/// Wide golden shower across the top of the playfield.
pub fn spawn_power_up_particles(world: &mut World) {
    const PARTICLES: usize = 24;
    for i in 0..PARTICLES {
        #[allow(clippy::cast_precision_loss)]
        let x = PLAYFIELD_WIDTH * (i as f32 + 0.5) / PARTICLES as f32;
        let vx = (fastrand::f32() - 0.5) * 60.0;
        let vy = fastrand::f32() * 80.0;

        spawn_particle(
            world,
            Position::new(x, 0.0),
            (vx, vy),
            Color::LightYellow,
            fastrand::f32() * 0.8 + 0.5, // lifetime: 0.5 to 1.3 seconds
            fastrand::f32() * 1.0 + 0.5,
        );
    }
}

/// Ages, moves and removes particles, then steps the screen shake.
pub fn update_particles(world: &mut World, delta_seconds: f32) {
    let mut expired = Vec::new();

    for (entity, mut particle) in world.query::<(Entity, &mut Particle)>().iter_mut(world) {
        particle.lifetime -= delta_seconds;
        if particle.lifetime <= 0.0 {
            expired.push(entity);
            continue;
        }

        particle.position.x += particle.velocity.0 * delta_seconds;
        particle.position.y += particle.velocity.1 * delta_seconds;

        particle.velocity.0 *= FRICTION;
        particle.velocity.1 = particle.velocity.1 * FRICTION + GRAVITY * delta_seconds;

        // Shrink as the particle ages
        let fade = particle.lifetime.min(1.0);
        particle.size *= 0.6 + 0.4 * fade * fade;
    }

    for entity in expired {
        world.despawn(entity);
    }

    screenshake::update_screen_shake(world, delta_seconds);
}

pub fn clear_particles(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<Particle>>()
        .iter(world)
        .collect();
    for entity in entities {
        world.despawn(entity);
    }
}

pub fn spawn_particle(
    world: &mut World,
    position: Position,
    velocity: (f32, f32),
    color: Color,
    lifetime: f32,
    size: f32,
) {
    world.spawn(Particle {
        position,
        velocity,
        color,
        lifetime,
        size,
    });
}
