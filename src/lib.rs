//! Invaders - a deterministic fixed-tick arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `driver`: Fixed-cadence tick thread, intent buffer, snapshot/event plumbing
//! - `highscores`: Top-10 leaderboard with file-backed persistence
//! - `settings`: Persisted preferences
//!
//! Rendering, input capture and audio playback live outside this crate; they
//! consume [`sim::Snapshot`]s and [`sim::GameEvent`]s and produce
//! [`sim::TickInput`] flags through [`driver::IntentBuffer`].

pub mod driver;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreEntry, HighScoreTable};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period (20 Hz)
    pub const TICK_PERIOD_MS: u64 = 50;

    /// World dimensions in pixels
    pub const WORLD_W: i32 = 1000;
    pub const WORLD_H: i32 = 800;
    /// Height of the ground strip at the bottom of the world
    pub const GROUND_HEIGHT: i32 = 50;

    /// Player defaults - the cannon sits on the ground line and never leaves it
    pub const PLAYER_WIDTH: i32 = 60;
    pub const PLAYER_HEIGHT: i32 = 40;
    /// Horizontal movement per tick while a move intent is held
    pub const PLAYER_STEP: i32 = 10;

    /// Bullet dimensions (both player and alien bullets)
    pub const BULLET_W: i32 = 5;
    pub const BULLET_H: i32 = 15;
    /// Player bullets travel up, alien bullets travel down
    pub const PLAYER_BULLET_STEP: i32 = 20;
    pub const ALIEN_BULLET_STEP: i32 = 15;

    /// Alien sprite dimensions
    pub const ALIEN_W: i32 = 40;
    pub const ALIEN_H: i32 = 30;
    /// Formation grid
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIEN_COLS: usize = 11;
    /// Number of color variants an alien can be created with
    pub const ALIEN_COLOR_VARIANTS: u8 = 6;
    /// Formation speed at level 1, and the per-level increment
    pub const ALIEN_BASE_SPEED: i32 = 10;
    pub const ALIEN_SPEED_INCREMENT: i32 = 2;
    /// Downward shift applied once per edge-hit tick
    pub const ALIEN_DESCENT: i32 = 20;
    /// Ticks between formation-wide animation frame toggles
    pub const ALIEN_ANIM_PERIOD: u32 = 5;
    /// Chance per eligible tick that the formation fires
    pub const ALIEN_FIRE_PROBABILITY: f64 = 0.30;
    /// Hitbox inflation for player-bullet-vs-alien tests
    pub const ALIEN_HITBOX_PADDING: i32 = 5;
    /// Base score for an alien kill, scaled by the difficulty multiplier
    pub const ALIEN_KILL_SCORE: u64 = 10;

    /// Mystery ship defaults
    pub const MYSTERY_W: i32 = 60;
    pub const MYSTERY_H: i32 = 30;
    pub const MYSTERY_Y: i32 = 50;
    pub const MYSTERY_STEP: i32 = 5;
    /// Spawn countdown is redrawn uniformly from [MIN, MAX) ticks
    pub const MYSTERY_COOLDOWN_MIN: i32 = 600;
    pub const MYSTERY_COOLDOWN_MAX: i32 = 1000;
    /// Mystery bonus clamp
    pub const MYSTERY_SCORE_CAP: u64 = 300;

    /// Score granted by the debug add-score intent
    pub const DEBUG_SCORE_BONUS: u64 = 100;
}
