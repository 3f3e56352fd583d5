#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when converting the f64 sample clock to f32 since audible time spans are short
    clippy::cast_possible_truncation
)]

use std::f32::consts::TAU;
use std::thread;

use anyhow::Result;
use bevy_ecs::prelude::Resource;
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, error, warn};

use crate::config::AudioConfig;

// Seconds after which any effect is silent
const MAX_EFFECT_SECONDS: f32 = 2.0;
const VOLUME_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Click,
    Catch,
    Mismatch,
    Miss,
    PowerUp,
    GameOver,
    NewHighScore,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 7] = [
        SoundEffect::Click,
        SoundEffect::Catch,
        SoundEffect::Mismatch,
        SoundEffect::Miss,
        SoundEffect::PowerUp,
        SoundEffect::GameOver,
        SoundEffect::NewHighScore,
    ];
}

enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool),
    SetVolume(f32),
}

/// Handle to the audio thread. Cues are fire-and-forget; a full channel drops them.
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    music_enabled: bool,
    sound_enabled: bool,
    volume: f32,
}

impl AudioState {
    #[must_use]
    pub fn new(config: &AudioConfig) -> Self {
        let (sender, receiver) = bounded(64);
        let volume = config.volume.clamp(0.0, 1.0);
        let music_enabled = config.music_enabled;

        let spawned = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                if let Err(e) = run_audio_thread(&receiver, volume, music_enabled) {
                    warn!("Audio unavailable: {e}");
                    // Keep draining so senders never notice
                    while receiver.recv().is_ok() {}
                }
            });

        let sender = match spawned {
            Ok(_) => Some(sender),
            Err(e) => {
                error!("Could not start audio thread: {e}");
                None
            }
        };

        Self {
            sender,
            music_enabled,
            sound_enabled: config.sound_enabled,
            volume,
        }
    }

    /// Sends a cue; returns false when sound effects are switched off.
    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if !self.sound_enabled {
            return false;
        }
        self.send(AudioCommand::PlaySound(effect));
        true
    }

    #[must_use]
    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    #[must_use]
    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;
        debug!("Music {}", if self.music_enabled { "on" } else { "off" });
        self.send(AudioCommand::PlayMusic(self.music_enabled));
    }

    #[must_use]
    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.send(AudioCommand::SetVolume(self.volume));
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.volume + VOLUME_STEP);
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.volume - VOLUME_STEP);
    }

    fn send(&self, command: AudioCommand) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(command);
        }
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new(&AudioConfig::default())
    }
}

#[cfg(not(feature = "audio"))]
fn run_audio_thread(
    receiver: &Receiver<AudioCommand>,
    _volume: f32,
    _music_enabled: bool,
) -> Result<()> {
    debug!("Built without audio output, sound cues are discarded");
    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect) => log::trace!("Cue {effect:?}"),
            AudioCommand::PlayMusic(enabled) => log::trace!("Music enabled: {enabled}"),
            AudioCommand::SetVolume(volume) => log::trace!("Volume {volume:.1}"),
        }
    }
    Ok(())
}

#[cfg(feature = "audio")]
fn run_audio_thread(
    receiver: &Receiver<AudioCommand>,
    volume: f32,
    music_enabled: bool,
) -> Result<()> {
    use cpal::traits::{DeviceTrait, HostTrait};

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;

    let (sound_sender, sound_receiver) = bounded::<SoundEffect>(64);
    let (mix_sender, mix_receiver) = bounded::<(bool, f32)>(16);
    let mix = Mixer {
        sounds: sound_receiver,
        settings: mix_receiver,
        volume,
        music_enabled,
    };

    // The stream stops when dropped, so it lives as long as this thread
    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => output::build_stream::<f32>(&device, &config.into(), mix)?,
        cpal::SampleFormat::I16 => output::build_stream::<i16>(&device, &config.into(), mix)?,
        cpal::SampleFormat::U16 => output::build_stream::<u16>(&device, &config.into(), mix)?,
        other => return Err(anyhow::anyhow!("Unsupported sample format {other:?}")),
    };

    let mut volume = volume;
    let mut music_enabled = music_enabled;
    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect) => {
                let _ = sound_sender.try_send(effect);
            }
            AudioCommand::PlayMusic(enabled) => {
                music_enabled = enabled;
                let _ = mix_sender.try_send((music_enabled, volume));
            }
            AudioCommand::SetVolume(new_volume) => {
                volume = new_volume;
                let _ = mix_sender.try_send((music_enabled, volume));
            }
        }
    }
    Ok(())
}

#[cfg(feature = "audio")]
struct Mixer {
    sounds: Receiver<SoundEffect>,
    settings: Receiver<(bool, f32)>,
    volume: f32,
    music_enabled: bool,
}

#[cfg(feature = "audio")]
mod output {
    use anyhow::Result;
    use cpal::traits::{DeviceTrait, StreamTrait};
    use cpal::{FromSample, SizedSample};
    use log::error;

    use super::{MAX_EFFECT_SECONDS, Mixer, SoundEffect, generate_sound_sample};

    pub(super) fn build_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        mut mix: Mixer,
    ) -> Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let sample_rate = f64::from(config.sample_rate.0);
        let channels = usize::from(config.channels);

        let mut active: Vec<(SoundEffect, f64)> = Vec::new();
        let mut clock = 0.0_f64;

        let mut next_frame = move || {
            while let Ok((music_enabled, volume)) = mix.settings.try_recv() {
                mix.music_enabled = music_enabled;
                mix.volume = volume;
            }
            while let Ok(effect) = mix.sounds.try_recv() {
                active.push((effect, clock));
            }

            active.retain(|(_, start)| clock - start <= f64::from(MAX_EFFECT_SECONDS));
            let (mut left, mut right) = active.iter().fold((0.0, 0.0), |(l, r), (effect, start)| {
                let (sl, sr) = generate_sound_sample(*effect, clock - start);
                (l + sl, r + sr)
            });

            if mix.music_enabled {
                let (ml, mr) = super::music_sample(clock);
                left += ml;
                right += mr;
            }

            clock += 1.0 / sample_rate;
            (
                (left * mix.volume).clamp(-1.0, 1.0),
                (right * mix.volume).clamp(-1.0, 1.0),
            )
        };

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let (left, right) = next_frame();
                    for (channel, sample) in frame.iter_mut().enumerate() {
                        *sample = T::from_sample(if channel & 1 == 0 { left } else { right });
                    }
                }
            },
            |err| error!("Audio stream error: {err}"),
            None,
        )?;
        stream.play()?;
        Ok(stream)
    }
}

/// Soft looping pad in a pentatonic scale.
#[must_use]
pub fn music_sample(t: f64) -> (f32, f32) {
    const NOTES: [f32; 5] = [220.0, 261.63, 293.66, 349.23, 392.0];
    let t = t as f32;
    #[allow(clippy::cast_sign_loss)]
    let note = NOTES[((t * 0.5) as usize) % NOTES.len()];
    let bass = (t * 110.0 * TAU).sin() * 0.04;
    let melody = (t * note * TAU).sin() * 0.05 * ((t * 0.3).sin() * 0.5 + 0.5);
    let sample = bass + melody;
    (sample, sample)
}

/// Stereo sample of `effect` at `t` seconds after it started.
#[must_use]
pub fn generate_sound_sample(effect: SoundEffect, t: f64) -> (f32, f32) {
    let t = t as f32;
    if !(0.0..=MAX_EFFECT_SECONDS).contains(&t) {
        return (0.0, 0.0);
    }

    match effect {
        SoundEffect::Click => {
            let amp = if t < 0.04 { 0.25 } else { 0.0 };
            let sample = (t * 660.0 * TAU).sin() * amp;
            (sample, sample)
        }
        SoundEffect::Catch => {
            // Quick rising blip
            let freq = 520.0 + 600.0 * (t * 8.0).min(1.0);
            let amp = (0.15 - t).max(0.0) * 3.0;
            let sample = (t * freq * TAU).sin() * amp;
            (sample, sample)
        }
        SoundEffect::Mismatch => {
            // Low buzz
            let amp = if t < 0.2 { 0.3 } else { 0.0 };
            let square = if (t * 140.0).fract() < 0.5 { 1.0 } else { -1.0 };
            let sample = square * amp * 0.5;
            (sample * 1.2, sample * 0.8)
        }
        SoundEffect::Miss => {
            // Thud with a bit of noise
            let amp = (0.12 - t).max(0.0) * 5.0;
            let noise = fastrand::f32() * 0.1;
            let tone = (t * 80.0 * TAU).sin() * 0.2;
            let sample = (noise + tone) * amp;
            (sample, sample)
        }
        SoundEffect::PowerUp => {
            let (freq, amp) = arpeggio(t, &[523.0, 659.0, 784.0, 1047.0], 0.12);
            let sample = (t * freq * TAU).sin() * amp * 0.3;
            (sample, sample)
        }
        SoundEffect::GameOver => {
            let freq = 600.0 - 200.0 * t;
            let amp = (MAX_EFFECT_SECONDS - t).max(0.0) * 0.2;
            let sample = (t * freq * TAU).sin() * amp;
            (sample, sample)
        }
        SoundEffect::NewHighScore => {
            let (freq, amp) = arpeggio(t, &[392.0, 494.0, 587.0, 784.0], 0.2);
            let sample = (t * freq * TAU).sin() * amp * 0.35;
            (sample, sample)
        }
    }
}

// Frequency and amplitude of a stepped arpeggio, silent after the last note
fn arpeggio(t: f32, notes: &[f32], step: f32) -> (f32, f32) {
    #[allow(clippy::cast_sign_loss)]
    let index = (t / step) as usize;
    match notes.get(index) {
        Some(freq) => (*freq, 1.0),
        None => (0.0, 0.0),
    }
}
