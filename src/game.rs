//! Scene flow around the simulation
//!
//! Menu -> Play -> GameOver -> Play ... Any key leaves the menu or the
//! game-over screen; Escape asks to quit from anywhere.

use serde::Serialize;

use crate::audio::{AudioDirector, AudioSink};
use crate::consts::{LOCAL_PLAYER_ID, MAX_FRAME_DT};
use crate::error::ConfigError;
use crate::input::{InputMapper, Key, KeyEvent, KeyState};
use crate::renderer::{self, GAME_OVER_TITLE, MENU_TITLE, PRESS_ANY_KEY, Vertex};
use crate::settings::Settings;
use crate::sim::{Commands, World};
use crate::tuning::Tuning;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scene {
    Menu,
    Play,
    GameOver,
}

/// The whole client: scene, world, input and audio direction
#[derive(Debug)]
pub struct Game {
    scene: Scene,
    world: World,
    settings: Settings,
    keys: KeyState,
    mapper: InputMapper,
    audio: AudioDirector,
    quit_requested: bool,
}

impl Game {
    pub fn new(settings: Settings, tuning: Tuning, seed: u64) -> Self {
        log::info!("New game (seed {seed})");
        Self {
            scene: Scene::Menu,
            world: World::with_tuning(tuning, seed),
            audio: AudioDirector::from_settings(&settings),
            settings,
            keys: KeyState::new(),
            mapper: InputMapper::new(),
            quit_requested: false,
        }
    }

    /// Build a game from settings, loading the tuning file they name
    pub fn from_settings(settings: Settings, fallback_seed: u64) -> Result<Self, ConfigError> {
        let tuning = settings.tuning()?;
        let seed = settings.seed_or(fallback_seed);
        Ok(Self::new(settings, tuning, seed))
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn set_scene(&mut self, scene: Scene) {
        if self.scene != scene {
            log::info!("Scene {:?} -> {:?}", self.scene, scene);
            self.scene = scene;
        }
    }

    /// React to one key transition
    pub fn handle_event(&mut self, event: KeyEvent) {
        self.keys.apply(event);

        if event == KeyEvent::Down(Key::Escape) {
            self.quit_requested = true;
        }

        match (self.scene, event) {
            (Scene::Menu, KeyEvent::Down(_)) => self.set_scene(Scene::Play),
            (Scene::GameOver, KeyEvent::Down(_)) => {
                self.world.reset();
                self.set_scene(Scene::Play);
            }
            (Scene::Play, _) => self.mapper.handle_event(event),
            _ => {}
        }
    }

    /// Run one presentation frame
    ///
    /// `events` are the key transitions since the last frame. The world only
    /// advances during play, by at most `MAX_FRAME_DT`.
    pub fn frame(&mut self, dt: f32, events: &[KeyEvent], sink: &mut impl AudioSink) {
        for &event in events {
            self.handle_event(event);
        }

        if self.scene != Scene::Play {
            return;
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let cmd = self.mapper.build_command(&self.keys);
        let commands = Commands::from([(LOCAL_PLAYER_ID, cmd)]);

        self.world.update(dt, &commands);

        // The final frame is silent apart from stopping the loops
        if self.world.game_over {
            self.audio.stop_loops(sink);
            self.set_scene(Scene::GameOver);
            return;
        }

        self.audio.update(&self.world, cmd.thrust, sink);
    }

    /// HUD line, when it should be on screen
    pub fn hud_line(&self) -> Option<String> {
        if self.scene != Scene::Play || !self.settings.show_hud {
            return None;
        }
        Some(renderer::hud_text(self.world.score, self.world.lives, self.world.wave))
    }

    /// Title and prompt for the menu and game-over screens
    pub fn captions(&self) -> Option<(&'static str, &'static str)> {
        match self.scene {
            Scene::Menu => Some((MENU_TITLE, PRESS_ANY_KEY)),
            Scene::GameOver => Some((GAME_OVER_TITLE, PRESS_ANY_KEY)),
            Scene::Play => None,
        }
    }

    /// Geometry for this frame; the playfield is only drawn during play
    pub fn vertices(&self) -> Vec<Vertex> {
        match self.scene {
            Scene::Play => renderer::draw_world(&self.world),
            Scene::Menu | Scene::GameOver => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCommand, LoopSound};
    use crate::sim::GameEvent;

    const DT: f32 = 1.0 / 60.0;

    fn game() -> Game {
        Game::new(Settings::default(), Tuning::default(), 7)
    }

    #[test]
    fn test_any_key_leaves_menu() {
        let mut game = game();
        let mut sink = Vec::new();
        game.frame(DT, &[], &mut sink);
        assert_eq!(game.scene(), Scene::Menu);
        assert_eq!(game.captions(), Some((MENU_TITLE, PRESS_ANY_KEY)));
        assert!(game.hud_line().is_none());

        game.frame(DT, &[KeyEvent::Down(Key::Other)], &mut sink);
        assert_eq!(game.scene(), Scene::Play);
        assert_eq!(game.hud_line().as_deref(), Some("SCORE 000000   LIVES 3   WAVE 0"));
    }

    #[test]
    fn test_menu_key_does_not_fire() {
        let mut game = game();
        let mut sink = Vec::new();
        game.frame(DT, &[KeyEvent::Down(Key::Space)], &mut sink);
        assert!(game.world().bullets.is_empty());
    }

    #[test]
    fn test_space_fires_during_play() {
        let mut game = game();
        let mut sink = Vec::new();
        game.frame(DT, &[KeyEvent::Down(Key::Other)], &mut sink);
        game.frame(DT, &[KeyEvent::Down(Key::Space)], &mut sink);
        assert_eq!(game.world().bullets.len(), 1);
        assert!(sink.iter().any(|c| matches!(c, AudioCommand::Play { .. })));
    }

    #[test]
    fn test_escape_requests_quit() {
        let mut game = game();
        let mut sink = Vec::new();
        game.frame(DT, &[KeyEvent::Down(Key::Escape)], &mut sink);
        assert!(game.quit_requested());
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut game = game();
        let mut sink = Vec::new();
        game.frame(DT, &[KeyEvent::Down(Key::Other), KeyEvent::Down(Key::Up)], &mut sink);
        assert!(game.audio.thrust_playing());

        game.world.lives = 1;
        game.world.wave_timer = 1e6;
        let ship_pos = {
            let ship = game.world.ship_mut(LOCAL_PLAYER_ID).unwrap();
            ship.invuln = 0.0;
            ship.pos
        };
        game.world.spawn_asteroid(ship_pos, glam::Vec2::ZERO, crate::sim::AsteroidSize::Large);

        sink.clear();
        game.frame(DT, &[], &mut sink);
        assert_eq!(game.scene(), Scene::GameOver);
        assert!(game.world().events.contains(&GameEvent::ShipExplosion));
        assert_eq!(sink, vec![AudioCommand::StopLoop(LoopSound::Thrust)]);
        assert!(!game.audio.thrust_playing());
        assert_eq!(game.captions(), Some((GAME_OVER_TITLE, PRESS_ANY_KEY)));
        assert!(game.vertices().is_empty());

        // Frozen until a key is pressed
        game.frame(DT, &[], &mut sink);
        assert_eq!(game.scene(), Scene::GameOver);

        game.frame(DT, &[KeyEvent::Down(Key::Other)], &mut sink);
        assert_eq!(game.scene(), Scene::Play);
        assert!(!game.world().game_over);
        assert_eq!(game.world().lives, game.world().tuning.start_lives);
    }

    #[test]
    fn test_from_settings_rejects_invalid_tuning_file() {
        let path = std::env::temp_dir().join(format!("asteroids-bad-tuning-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"width": 0.0}"#).unwrap();
        let settings = Settings {
            tuning_path: Some(path.clone()),
            ..Settings::default()
        };

        let result = Game::from_settings(settings, 3);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let game = Game::from_settings(Settings::default(), 3).unwrap();
        assert_eq!(game.world().tuning, Tuning::default());
    }

    #[test]
    fn test_long_frames_are_clamped() {
        let mut game = game();
        let mut sink = Vec::new();
        game.frame(DT, &[KeyEvent::Down(Key::Other)], &mut sink);
        let before = game.world().wave_timer;
        game.frame(5.0, &[], &mut sink);
        assert!((before - game.world().wave_timer - MAX_FRAME_DT).abs() < 1e-5);
    }

    #[test]
    fn test_hidden_hud() {
        let settings = Settings {
            show_hud: false,
            ..Settings::default()
        };
        let mut game = Game::new(settings, Tuning::default(), 1);
        let mut sink = Vec::new();
        game.frame(DT, &[KeyEvent::Down(Key::Other)], &mut sink);
        assert!(game.hud_line().is_none());
        assert!(!game.vertices().is_empty());
    }
}
