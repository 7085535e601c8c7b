//! Headless entry point
//!
//! Runs a scripted demo session against the tick driver: selects a
//! difficulty, sweeps and fires for a while, then shuts down and records the
//! final score on the leaderboard. A real front end would replace the script
//! with input capture and render from `latest_snapshot()`.

use std::path::Path;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use invaders::driver::{self, DriverConfig};
use invaders::sim::{Difficulty, GameEvent, GamePhase, GameState};
use invaders::{HighScoreTable, Settings};

const SETTINGS_PATH: &str = "settings.json";
const DEMO_TICKS: u64 = 400;

fn main() {
    env_logger::init();
    log::info!("Invaders (headless) starting...");

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let mut scores = HighScoreTable::load(&settings.scores_path);
    if let Some(top) = scores.top_score() {
        log::info!("Top score to beat: {}", top);
    }

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Session seed: {}", seed);

    let config = DriverConfig::default();
    let tick = config.tick_period;
    let (mut handle, events) = driver::spawn(GameState::new(seed), config);
    let intents = handle.intents();
    intents.select_difficulty(Difficulty::Medium);

    // Scripted play: sweep side to side, firing as we go
    let mut final_score = None;
    'demo: for step in 0..DEMO_TICKS {
        let sweep_right = (step / 40) % 2 == 0;
        intents.set_move_right(sweep_right);
        intents.set_move_left(!sweep_right);
        if step % 4 == 0 {
            intents.press_fire();
        }

        for event in events.try_iter() {
            match event {
                GameEvent::AlienFired => {}
                GameEvent::BonusDestroyed { points } => {
                    log::info!("Bonus ship destroyed for {} points", points)
                }
                GameEvent::PlayerHit { lives_remaining } => {
                    log::info!("Player hit, {} lives remaining", lives_remaining)
                }
                GameEvent::LevelUp { new_level } => log::info!("Reached level {}", new_level),
                GameEvent::GameOver { final_score: score } => {
                    log::info!("Game over with score {}", score);
                    final_score = Some(score);
                    break 'demo;
                }
            }
        }

        thread::sleep(tick);
    }

    let snapshot = handle.latest_snapshot();
    handle.stop();

    let score = final_score.unwrap_or(snapshot.score);
    log::info!(
        "Demo finished: score {} level {} lives {} phase {:?}",
        score,
        snapshot.level,
        snapshot.lives,
        snapshot.phase
    );

    if snapshot.phase == GamePhase::GameOver || final_score.is_some() {
        if let Some(rank) = scores.add("CPU", score) {
            log::info!("Demo session ranked #{} on the leaderboard", rank);
        }
    }

    for (i, entry) in scores.entries().iter().enumerate() {
        println!("{:>2}. {:<3} {:>8}", i + 1, entry.initials, entry.score);
    }
}
