//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (creation order within each collection)
//! - No rendering, audio or platform dependencies

pub mod rect;
pub mod state;
pub mod tick;

pub use rect::Rect;
pub use state::{
    Alien, AlienKind, Bullet, Difficulty, GameEvent, GamePhase, GameState, MysteryShip, Snapshot,
};
pub use tick::{TickInput, advance_one_tick, tick};
