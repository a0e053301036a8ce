//! Asteroids entry point
//!
//! Headless runner: loads settings, plays a scripted session at the fixed
//! frame rate and prints the final HUD line and a JSON world snapshot.
//! Usage: `asteroids [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(not(target_arch = "wasm32"))]
use asteroids::audio::LogSink;
#[cfg(not(target_arch = "wasm32"))]
use asteroids::consts::FPS;
#[cfg(not(target_arch = "wasm32"))]
use asteroids::game::{Game, Scene};
#[cfg(not(target_arch = "wasm32"))]
use asteroids::input::{Key, KeyEvent};
#[cfg(not(target_arch = "wasm32"))]
use asteroids::renderer::hud_text;
#[cfg(not(target_arch = "wasm32"))]
use asteroids::{ConfigError, Settings};

/// Two minutes of play
#[cfg(not(target_arch = "wasm32"))]
const SESSION_FRAMES: u64 = 120 * FPS as u64;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_SETTINGS: &str = "asteroids.json";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Asteroids (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), ConfigError> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS));
    let settings = Settings::load(&path)?;

    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let mut game = Game::from_settings(settings, clock_seed)?;
    let mut sink = LogSink;

    let dt = 1.0 / FPS as f32;
    for frame in 0..SESSION_FRAMES {
        let keys = scripted_keys(frame, game.scene());
        game.frame(dt, &keys, &mut sink);

        for event in &game.world().events {
            log::debug!("frame {frame}: {event}");
        }
        if game.quit_requested() || game.scene() == Scene::GameOver {
            break;
        }
    }

    let world = game.world();
    log::info!(
        "Session over: wave {}, {} asteroids, {} saucers left",
        world.wave,
        world.asteroids.len(),
        world.saucers.len()
    );
    println!("{}", hud_text(world.score, world.lives, world.wave));
    println!("{}", serde_json::to_string_pretty(world)?);

    Ok(())
}

/// A simple pilot: spin, thrust in bursts, fire steadily, jump now and then
#[cfg(not(target_arch = "wasm32"))]
fn scripted_keys(frame: u64, scene: Scene) -> Vec<KeyEvent> {
    if scene == Scene::Menu {
        return vec![KeyEvent::Down(Key::Other), KeyEvent::Up(Key::Other)];
    }

    let mut keys = Vec::new();
    match frame % 240 {
        0 => keys.push(KeyEvent::Down(Key::Left)),
        60 => {
            keys.push(KeyEvent::Up(Key::Left));
            keys.push(KeyEvent::Down(Key::Up));
        }
        90 => keys.push(KeyEvent::Up(Key::Up)),
        120 => keys.push(KeyEvent::Down(Key::Right)),
        180 => keys.push(KeyEvent::Up(Key::Right)),
        _ => {}
    }
    if frame % 12 == 0 {
        keys.push(KeyEvent::Down(Key::Space));
        keys.push(KeyEvent::Up(Key::Space));
    }
    if frame % 1800 == 1799 {
        keys.push(KeyEvent::Down(Key::LeftShift));
        keys.push(KeyEvent::Up(Key::LeftShift));
    }
    keys
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is the product on wasm
}
