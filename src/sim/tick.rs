//! Fixed timestep simulation tick
//!
//! One call advances the whole session by exactly one tick. All randomness
//! comes from the seeded RNG owned by [`GameState`], so identical seeds and
//! intent sequences replay identically.

use rand::Rng;

use super::rect::Rect;
use super::state::{Bullet, GameEvent, GamePhase, GameState, Snapshot};
use crate::consts::*;

/// Intent flags for a single tick (deterministic)
///
/// Produced by input capture, drained once per tick boundary. Movement flags
/// are held-key state; everything else is edge-triggered upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// One press, one shot
    pub fire: bool,
    pub pause_toggle: bool,
    /// Discard the session and return to difficulty selection
    pub restart: bool,
    /// Observed by the driver, not the tick itself
    pub quit: bool,
    /// Begins a session; honored only while awaiting difficulty
    pub difficulty_select: Option<super::state::Difficulty>,
    // Debug triggers
    pub add_life: bool,
    pub add_score: bool,
    pub force_spawn_bonus: bool,
}

/// Advance one tick and hand back the post-tick snapshot with any events
pub fn advance_one_tick(state: &mut GameState, input: &TickInput) -> (Snapshot, Vec<GameEvent>) {
    let events = tick(state, input);
    (state.snapshot(), events)
}

/// Advance the game state by one fixed tick, returning the domain events
/// produced along the way.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Control intents are honored regardless of phase
    if input.restart {
        state.reset();
        return events;
    }
    match state.phase {
        GamePhase::AwaitingDifficulty => {
            if let Some(difficulty) = input.difficulty_select {
                state.start(difficulty);
            }
            return events;
        }
        GamePhase::GameOver => return events,
        GamePhase::Running | GamePhase::Paused => {}
    }
    if input.pause_toggle {
        if state.phase == GamePhase::Running {
            state.phase = GamePhase::Paused;
            return events;
        }
        state.phase = GamePhase::Running;
    } else if state.phase == GamePhase::Paused {
        return events;
    }

    // Debug triggers
    if input.add_life {
        state.lives += 1;
    }
    if input.add_score {
        state.score += DEBUG_SCORE_BONUS;
    }
    if input.force_spawn_bonus && state.mystery_ship.is_none() {
        state.spawn_mystery_ship();
    }

    // Player movement, clamped to the world
    if input.move_left {
        state.player_x = (state.player_x - PLAYER_STEP).max(0);
    }
    if input.move_right {
        state.player_x = (state.player_x + PLAYER_STEP).min(WORLD_W - PLAYER_WIDTH);
    }
    debug_assert!(state.player_x >= 0 && state.player_x <= WORLD_W - PLAYER_WIDTH);

    if input.fire {
        state.player_bullets.push(Bullet {
            x: state.player_x + PLAYER_WIDTH / 2 - 2,
            y: state.player_y,
        });
    }

    // Advance projectiles, dropping anything that left the world.
    // Filter/rebuild keeps iteration order intact for the survivors.
    state.player_bullets = state
        .player_bullets
        .iter()
        .filter(|b| b.y > 0)
        .map(|b| Bullet {
            x: b.x,
            y: b.y - PLAYER_BULLET_STEP,
        })
        .collect();
    state.alien_bullets = state
        .alien_bullets
        .iter()
        .filter(|b| b.y < WORLD_H)
        .map(|b| Bullet {
            x: b.x,
            y: b.y + ALIEN_BULLET_STEP,
        })
        .collect();

    // Formation advance; edge contact is checked against post-move positions
    let mut edge_hit = false;
    let step = state.alien_direction * state.alien_speed;
    state.alien_anim_counter += 1;
    for alien in &mut state.aliens {
        alien.x += step;
        if alien.x <= 0 || alien.x >= WORLD_W - ALIEN_W {
            edge_hit = true;
        }
    }
    // Shared counter: every alien's frame toggles in lockstep
    if state.alien_anim_counter >= ALIEN_ANIM_PERIOD {
        for alien in &mut state.aliens {
            alien.frame ^= 1;
        }
        state.alien_anim_counter = 0;
    }
    // One flip and one descent per tick, however many aliens touched an edge
    if edge_hit {
        state.alien_direction = -state.alien_direction;
        for alien in &mut state.aliens {
            alien.y += ALIEN_DESCENT;
        }
    }

    // Alien shooting. A failed roll leaves a spent cooldown untouched.
    if state.alien_fire_cooldown <= 0 {
        if !state.aliens.is_empty() && state.rng.random::<f64>() < ALIEN_FIRE_PROBABILITY {
            let idx = state.rng.random_range(0..state.aliens.len());
            let shooter = state.aliens[idx];
            state.alien_bullets.push(Bullet {
                x: shooter.x + 18,
                y: shooter.y + 30,
            });
            state.alien_fire_cooldown = state.difficulty.alien_fire_cooldown();
            events.push(GameEvent::AlienFired);
        }
    } else {
        state.alien_fire_cooldown -= 1;
    }

    // Mystery ship: countdown while absent, lateral travel while present
    match state.mystery_ship {
        None => {
            state.mystery_cooldown -= 1;
            if state.mystery_cooldown <= 0 {
                state.spawn_mystery_ship();
            }
        }
        Some(mut ship) => {
            ship.x += ship.direction * MYSTERY_STEP;
            if ship.x < -MYSTERY_W || ship.x > WORLD_W {
                state.mystery_ship = None;
                state.mystery_cooldown = state.draw_mystery_cooldown();
            } else {
                state.mystery_ship = Some(ship);
            }
        }
    }

    // Player bullets vs aliens: creation order, first matching bullet wins,
    // at most one kill per bullet. The alien hitbox grows by the padding on
    // its origin side only.
    let aliens = std::mem::take(&mut state.aliens);
    let mut survivors = Vec::with_capacity(aliens.len());
    for alien in aliens {
        let hitbox = Rect::new(
            alien.x - ALIEN_HITBOX_PADDING,
            alien.y - ALIEN_HITBOX_PADDING,
            ALIEN_W + ALIEN_HITBOX_PADDING,
            ALIEN_H + ALIEN_HITBOX_PADDING,
        );
        let hit = state
            .player_bullets
            .iter()
            .position(|b| Rect::new(b.x, b.y, BULLET_W, BULLET_H).intersects(&hitbox));
        match hit {
            Some(i) => {
                state.player_bullets.remove(i);
                state.score += ALIEN_KILL_SCORE * state.difficulty.multiplier();
            }
            None => survivors.push(alien),
        }
    }
    state.aliens = survivors;

    // Player bullets vs mystery ship (no padding)
    if let Some(ship) = state.mystery_ship {
        let ship_box = Rect::new(ship.x, ship.y, MYSTERY_W, MYSTERY_H);
        let hit = state
            .player_bullets
            .iter()
            .position(|b| Rect::new(b.x, b.y, BULLET_W, BULLET_H).intersects(&ship_box));
        if let Some(i) = hit {
            state.player_bullets.remove(i);
            let points = state.mystery_ship_score();
            state.score += points;
            state.mystery_ship = None;
            state.mystery_cooldown = state.draw_mystery_cooldown();
            events.push(GameEvent::BonusDestroyed { points });
        }
    }

    // Alien bullets vs player. Several distinct bullets may connect in the
    // same tick; each costs a life, but GameOver fires exactly once.
    let player_box = Rect::new(state.player_x, state.player_y, PLAYER_WIDTH, PLAYER_HEIGHT);
    let alien_bullets = std::mem::take(&mut state.alien_bullets);
    for bullet in alien_bullets {
        if Rect::new(bullet.x, bullet.y, BULLET_W, BULLET_H).intersects(&player_box) {
            state.lives = state.lives.saturating_sub(1);
            events.push(GameEvent::PlayerHit {
                lives_remaining: state.lives,
            });
            if state.lives == 0 && state.phase != GamePhase::GameOver {
                state.phase = GamePhase::GameOver;
                events.push(GameEvent::GameOver {
                    final_score: state.score,
                });
                log::info!("game over: out of lives, score={}", state.score);
            }
        } else {
            state.alien_bullets.push(bullet);
        }
    }

    // Level completion: the whole formation was destroyed
    if state.aliens.is_empty() {
        state.level += 1;
        state.alien_speed += ALIEN_SPEED_INCREMENT;
        state.spawn_formation();
        events.push(GameEvent::LevelUp {
            new_level: state.level,
        });
        log::info!(
            "level up: level={} formation speed={}",
            state.level,
            state.alien_speed
        );
    }

    // Loss condition: a live formation reached the player's row
    if state.phase != GamePhase::GameOver
        && state.aliens.iter().any(|a| a.y + ALIEN_H >= state.player_y)
    {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        log::info!("game over: formation reached the ground, score={}", state.score);
    }

    state.time_ticks += 1;
    events
}
