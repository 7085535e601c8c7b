//! Game state and core simulation types
//!
//! [`GameState`] owns every mutable piece of a session. Nothing outside the
//! simulation mutates it; consumers see [`Snapshot`]s and [`GameEvent`]s only.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session difficulty, chosen once and immutable until restart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Score multiplier applied to alien kills
    pub fn multiplier(self) -> u64 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Ticks between alien shots once the formation fires
    pub fn alien_fire_cooldown(self) -> i32 {
        match self {
            Difficulty::Easy => 15,
            Difficulty::Medium => 7,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a difficulty selection; no entities exist yet
    AwaitingDifficulty,
    /// Active gameplay
    Running,
    /// Frozen; intent capture and snapshots stay live
    Paused,
    /// Run ended. Ticks are no-ops until restart
    GameOver,
}

/// Alien variants, fixed per formation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlienKind {
    Squid,
    Crab,
    Octopus,
}

impl AlienKind {
    /// Row 0 is the top of the formation
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => AlienKind::Squid,
            1 | 2 => AlienKind::Crab,
            _ => AlienKind::Octopus,
        }
    }
}

/// One alien in the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    pub kind: AlienKind,
    /// Sprite color variant, drawn once at creation
    pub color_index: u8,
    /// Animation frame (0 or 1), toggled formation-wide
    pub frame: u8,
}

/// A projectile (player or alien; the owner is implied by which vec holds it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

/// The transient bonus target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MysteryShip {
    pub x: i32,
    pub y: i32,
    /// -1 or +1
    pub direction: i32,
}

/// Domain events, consumed by audio/score components.
///
/// Each kind is emitted at most once per tick, except `PlayerHit` which fires
/// once per distinct alien bullet that connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AlienFired,
    BonusDestroyed { points: u64 },
    PlayerHit { lives_remaining: u32 },
    GameOver { final_score: u64 },
    LevelUp { new_level: u32 },
}

/// Immutable post-tick view of the whole session, safe to hand to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub player_x: i32,
    pub player_y: i32,
    pub player_bullets: Vec<Bullet>,
    pub alien_bullets: Vec<Bullet>,
    pub aliens: Vec<Alien>,
    pub mystery_ship: Option<MysteryShip>,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub shots_fired: u64,
    pub time_ticks: u64,
}

/// Complete session state, exclusively owned by the simulation
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub player_x: i32,
    pub player_y: i32,
    /// Player bullets, creation order
    pub player_bullets: Vec<Bullet>,
    /// Alien bullets, creation order
    pub alien_bullets: Vec<Bullet>,
    /// Formation, creation order (row-major from the top-left)
    pub aliens: Vec<Alien>,
    /// Shared formation direction: -1 or +1
    pub alien_direction: i32,
    pub alien_speed: i32,
    /// Shared animation counter; wraps every [`ALIEN_ANIM_PERIOD`] ticks
    pub alien_anim_counter: u32,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    /// Monotonic; feeds the mystery-ship bonus formula
    pub shots_fired: u64,
    pub alien_fire_cooldown: i32,
    pub mystery_ship: Option<MysteryShip>,
    /// Ticks until the next mystery-ship spawn while absent
    pub mystery_cooldown: i32,
    pub time_ticks: u64,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a fresh state awaiting difficulty selection
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::AwaitingDifficulty,
            difficulty: Difficulty::default(),
            player_x: (WORLD_W - PLAYER_WIDTH) / 2,
            player_y: WORLD_H - GROUND_HEIGHT - PLAYER_HEIGHT,
            player_bullets: Vec::new(),
            alien_bullets: Vec::new(),
            aliens: Vec::new(),
            alien_direction: 1,
            alien_speed: ALIEN_BASE_SPEED,
            alien_anim_counter: 0,
            score: 0,
            lives: 3,
            level: 1,
            shots_fired: 0,
            alien_fire_cooldown: 0,
            mystery_ship: None,
            mystery_cooldown: 0,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a session at the given difficulty (AwaitingDifficulty -> Running)
    pub fn start(&mut self, difficulty: Difficulty) {
        log::info!("starting session: difficulty={}", difficulty.as_str());
        self.difficulty = difficulty;
        self.player_x = (WORLD_W - PLAYER_WIDTH) / 2;
        self.player_y = WORLD_H - GROUND_HEIGHT - PLAYER_HEIGHT;
        self.player_bullets.clear();
        self.alien_bullets.clear();
        self.alien_speed = ALIEN_BASE_SPEED;
        self.score = 0;
        self.lives = 3;
        self.level = 1;
        self.shots_fired = 0;
        self.alien_fire_cooldown = 0;
        self.mystery_ship = None;
        self.mystery_cooldown = self.draw_mystery_cooldown();
        self.time_ticks = 0;
        self.spawn_formation();
        self.phase = GamePhase::Running;
    }

    /// Discard the session entirely (restart): back to difficulty selection
    pub fn reset(&mut self) {
        log::info!("session reset");
        self.phase = GamePhase::AwaitingDifficulty;
        self.player_bullets.clear();
        self.alien_bullets.clear();
        self.aliens.clear();
        self.alien_direction = 1;
        self.alien_speed = ALIEN_BASE_SPEED;
        self.alien_anim_counter = 0;
        self.score = 0;
        self.lives = 3;
        self.level = 1;
        self.shots_fired = 0;
        self.alien_fire_cooldown = 0;
        self.mystery_ship = None;
        self.mystery_cooldown = 0;
        self.time_ticks = 0;
        self.player_x = (WORLD_W - PLAYER_WIDTH) / 2;
    }

    /// Populate a fresh 55-alien formation for the current level.
    ///
    /// Color indices are redrawn; direction and the animation counter reset.
    pub fn spawn_formation(&mut self) {
        self.aliens.clear();
        for row in 0..ALIEN_ROWS {
            let kind = AlienKind::for_row(row);
            for col in 0..ALIEN_COLS {
                let color_index = self.rng.random_range(0..ALIEN_COLOR_VARIANTS);
                self.aliens.push(Alien {
                    x: 50 + col as i32 * 50,
                    y: 50 + row as i32 * 40,
                    kind,
                    color_index,
                    frame: 0,
                });
            }
        }
        self.alien_direction = 1;
        self.alien_anim_counter = 0;
    }

    /// Spawn the mystery ship at a random horizontal edge, moving inward
    pub fn spawn_mystery_ship(&mut self) {
        let from_left = self.rng.random_bool(0.5);
        let (x, direction) = if from_left {
            (0, 1)
        } else {
            (WORLD_W - MYSTERY_W, -1)
        };
        self.mystery_ship = Some(MysteryShip {
            x,
            y: MYSTERY_Y,
            direction,
        });
    }

    /// Redraw the mystery-ship spawn countdown
    pub fn draw_mystery_cooldown(&mut self) -> i32 {
        self.rng.random_range(MYSTERY_COOLDOWN_MIN..MYSTERY_COOLDOWN_MAX)
    }

    /// Bonus awarded for destroying the mystery ship.
    ///
    /// Increment-then-compute: `shots_fired` is bumped first and the formula
    /// reads the new value. The bonus cycles with the shot count and clamps
    /// at [`MYSTERY_SCORE_CAP`].
    pub fn mystery_ship_score(&mut self) -> u64 {
        self.shots_fired += 1;
        let increment = ((self.shots_fired + 22) % 15) * 50;
        (50 + increment).min(MYSTERY_SCORE_CAP)
    }

    /// Fully-consistent copy of the session for consumers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            player_x: self.player_x,
            player_y: self.player_y,
            player_bullets: self.player_bullets.clone(),
            alien_bullets: self.alien_bullets.clone(),
            aliens: self.aliens.clone(),
            mystery_ship: self.mystery_ship,
            score: self.score,
            lives: self.lives,
            level: self.level,
            shots_fired: self.shots_fired,
            time_ticks: self.time_ticks,
        }
    }
}
