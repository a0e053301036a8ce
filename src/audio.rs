//! Audio direction
//!
//! The simulation never plays sound. Each frame the director reads the
//! world's events and saucers plus the local thrust flag, and issues
//! playback commands to whatever backend implements [`AudioSink`].

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameEvent, World};

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player fires
    PlayerShoot,
    /// Saucer fires
    UfoShoot,
    /// Asteroid split or destroyed
    AsteroidExplosion,
    /// Ship death or saucer destroyed
    ShipExplosion,
}

impl SoundEffect {
    /// Asset file backing this effect
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::PlayerShoot => "player_shoot.wav",
            SoundEffect::UfoShoot => "ufo_shoot.wav",
            SoundEffect::AsteroidExplosion => "asteroid_explosion.wav",
            SoundEffect::ShipExplosion => "ship_explosion.wav",
        }
    }

    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::PlayerShoot => SoundEffect::PlayerShoot,
            GameEvent::UfoShoot => SoundEffect::UfoShoot,
            GameEvent::AsteroidExplosion => SoundEffect::AsteroidExplosion,
            GameEvent::ShipExplosion => SoundEffect::ShipExplosion,
        }
    }
}

/// Looping sounds; each plays on its own channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoopSound {
    Thrust,
    SirenBig,
    SirenSmall,
}

impl LoopSound {
    pub fn file_name(&self) -> &'static str {
        match self {
            LoopSound::Thrust => "thrust_loop.wav",
            LoopSound::SirenBig => "ufo_siren_big.wav",
            LoopSound::SirenSmall => "ufo_siren_small.wav",
        }
    }
}

/// A playback request for the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AudioCommand {
    Play { effect: SoundEffect, volume: f32 },
    StartLoop { sound: LoopSound, volume: f32 },
    StopLoop(LoopSound),
}

/// Audio backend
pub trait AudioSink {
    fn submit(&mut self, command: AudioCommand);
}

/// Recording sink
impl AudioSink for Vec<AudioCommand> {
    fn submit(&mut self, command: AudioCommand) {
        self.push(command);
    }
}

/// Sink that only logs what it would play
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn submit(&mut self, command: AudioCommand) {
        match command {
            AudioCommand::Play { effect, volume } => {
                log::trace!("play {} at {volume:.2}", effect.file_name());
            }
            AudioCommand::StartLoop { sound, volume } => {
                log::debug!("loop {} at {volume:.2}", sound.file_name());
            }
            AudioCommand::StopLoop(sound) => log::debug!("stop {}", sound.file_name()),
        }
    }
}

/// Decides what to play each frame
#[derive(Debug, Clone)]
pub struct AudioDirector {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    thrust_playing: bool,
    siren: Option<LoopSound>,
}

impl Default for AudioDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDirector {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            thrust_playing: false,
            siren: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut director = Self::new();
        director.set_master_volume(settings.master_volume);
        director.set_sfx_volume(settings.sfx_volume);
        director.set_muted(settings.muted);
        director
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Siren currently looping, if any
    pub fn siren(&self) -> Option<LoopSound> {
        self.siren
    }

    pub fn thrust_playing(&self) -> bool {
        self.thrust_playing
    }

    /// Issue this frame's commands: thrust loop, siren, then one-shots in
    /// event order
    pub fn update(&mut self, world: &World, thrust: bool, sink: &mut impl AudioSink) {
        self.update_thrust(thrust, sink);
        self.update_siren(world, sink);
        self.play_events(&world.events, sink);
    }

    fn update_thrust(&mut self, thrust: bool, sink: &mut impl AudioSink) {
        if thrust == self.thrust_playing {
            return;
        }

        if thrust {
            sink.submit(AudioCommand::StartLoop {
                sound: LoopSound::Thrust,
                volume: self.effective_volume(),
            });
        } else {
            sink.submit(AudioCommand::StopLoop(LoopSound::Thrust));
        }
        self.thrust_playing = thrust;
    }

    fn update_siren(&mut self, world: &World, sink: &mut impl AudioSink) {
        let wanted = choose_siren(world);
        if wanted == self.siren {
            return;
        }

        if let Some(current) = self.siren {
            sink.submit(AudioCommand::StopLoop(current));
        }
        if let Some(sound) = wanted {
            sink.submit(AudioCommand::StartLoop {
                sound,
                volume: self.effective_volume(),
            });
        }
        self.siren = wanted;
    }

    fn play_events(&self, events: &[GameEvent], sink: &mut impl AudioSink) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }

        for &event in events {
            sink.submit(AudioCommand::Play {
                effect: SoundEffect::for_event(event),
                volume,
            });
        }
    }

    /// Stop every loop (game over, quitting)
    pub fn stop_loops(&mut self, sink: &mut impl AudioSink) {
        if self.thrust_playing {
            sink.submit(AudioCommand::StopLoop(LoopSound::Thrust));
            self.thrust_playing = false;
        }
        if let Some(siren) = self.siren.take() {
            sink.submit(AudioCommand::StopLoop(siren));
        }
    }
}

/// Small siren wins over big; none without saucers
fn choose_siren(world: &World) -> Option<LoopSound> {
    if world.saucers.is_empty() {
        None
    } else if world.saucers.iter().any(|s| s.is_small()) {
        Some(LoopSound::SirenSmall)
    } else {
        Some(LoopSound::SirenBig)
    }
}
