#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::trace;
use std::error;

use crate::Time;
use crate::components::{Catalog, ScreenShake};
use crate::config::Config;
use crate::game::FIXED_TIMESTEP;
use crate::input::InputEvent;
use crate::particles;
use crate::persistence::ScoreStore;
use crate::round::RoundEvent;
use crate::screen::{Control, ScreenEvent, ScreenMachine};
use crate::screenshake;
use crate::sound::{AudioState, SoundEffect};

pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

// Longest frame the simulation will catch up on, so a stall never turns into a burst of misses
const MAX_FRAME_SECONDS: f32 = 0.25;

pub struct App {
    /// Effects and shared resources: particles, screen shake, audio, clock
    pub world: World,
    pub machine: ScreenMachine<Box<dyn ScoreStore>>,
    pub config: Config,
    pub should_quit: bool,
    accumulator: f32,
}

impl App {
    pub fn new(config: Config, store: Box<dyn ScoreStore>) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(ScreenShake::default());
        world.insert_resource(AudioState::new(&config.audio));

        let machine = ScreenMachine::new(
            config.gameplay.clone(),
            Catalog::fruits(),
            config.display.button_style,
            store,
        );

        Self {
            world,
            machine,
            config,
            should_quit: false,
            accumulator: 0.0,
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::ToggleMusic => {
                self.world.resource_mut::<AudioState>().toggle_music();
            }
            InputEvent::ToggleSound => self.world.resource_mut::<AudioState>().toggle_sound(),
            InputEvent::VolumeUp => self.world.resource_mut::<AudioState>().volume_up(),
            InputEvent::VolumeDown => self.world.resource_mut::<AudioState>().volume_down(),
            _ => {
                if self.machine.handle_input(event) == Control::Quit {
                    self.should_quit = true;
                }
            }
        }
        self.process_events();
    }

    /// Runs the simulation in fixed steps covering `delta_seconds`, then ages the effects.
    pub fn on_tick(&mut self, delta_seconds: f32) {
        self.world.resource_mut::<Time>().advance(delta_seconds);

        self.accumulator = (self.accumulator + delta_seconds).min(MAX_FRAME_SECONDS);
        while self.accumulator >= FIXED_TIMESTEP {
            self.machine.update(FIXED_TIMESTEP);
            self.accumulator -= FIXED_TIMESTEP;
        }
        // A zero step still applies a pending screen change
        self.machine.update(0.0);

        self.process_events();
        particles::update_particles(&mut self.world, delta_seconds);
    }

    /// The loaded config with the menu's gameplay choices and the live audio settings applied.
    #[must_use]
    pub fn current_config(&self) -> Config {
        let audio = self.world.resource::<AudioState>();
        let mut config = self.config.clone();
        config.gameplay = self.machine.config().clone();
        config.audio.music_enabled = audio.is_music_enabled();
        config.audio.sound_enabled = audio.is_sound_enabled();
        config.audio.volume = audio.get_volume();
        config
    }

    fn process_events(&mut self) {
        for event in self.machine.take_events() {
            self.apply_event(&event);
        }
    }

    fn apply_event(&mut self, event: &ScreenEvent) {
        let show_particles = self.config.display.particles;
        let shake = self.config.display.screen_shake;

        match event {
            ScreenEvent::Round(RoundEvent::Caught {
                category,
                position,
                combo,
                ..
            }) => {
                if show_particles {
                    particles::spawn_catch_particles(&mut self.world, *position, category.color, *combo);
                }
                self.play(SoundEffect::Catch);
            }
            ScreenEvent::Round(RoundEvent::Missed { position, .. }) => {
                if show_particles {
                    particles::spawn_miss_particles(&mut self.world, *position);
                }
                if shake {
                    screenshake::trigger_screen_shake(&mut self.world, 1.0, 0.3);
                }
                self.play(SoundEffect::Miss);
            }
            ScreenEvent::Round(RoundEvent::Mismatch { .. }) => {
                if shake {
                    screenshake::trigger_mismatch_shake(&mut self.world);
                }
                self.play(SoundEffect::Mismatch);
            }
            ScreenEvent::Round(RoundEvent::PowerUp(kind)) => {
                trace!("Power-up effect for {}", kind.label());
                if show_particles {
                    particles::spawn_power_up_particles(&mut self.world);
                }
                self.play(SoundEffect::PowerUp);
            }
            ScreenEvent::Round(RoundEvent::Spawned { .. } | RoundEvent::PowerUpExpired(_)) => {}
            ScreenEvent::MenuMoved | ScreenEvent::MenuSelected => self.play(SoundEffect::Click),
            ScreenEvent::RoundStarted => particles::clear_particles(&mut self.world),
            ScreenEvent::RoundEnded { rank, .. } => {
                if *rank == Some(1) {
                    self.play(SoundEffect::NewHighScore);
                } else {
                    self.play(SoundEffect::GameOver);
                }
            }
            ScreenEvent::AchievementUnlocked(_) => self.play(SoundEffect::PowerUp),
        }
    }

    fn play(&self, effect: SoundEffect) {
        self.world.resource::<AudioState>().play_sound(effect);
    }
}
