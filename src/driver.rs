//! Fixed-cadence simulation driver
//!
//! Runs the tick loop on a dedicated thread at the fixed logical rate,
//! decoupled from whatever cadence presentation samples at. Consumers read
//! the latest post-tick [`Snapshot`] from a shared slot and receive
//! [`GameEvent`]s over a channel; input capture writes intent flags into the
//! shared [`IntentBuffer`], which the driver drains once per tick boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consts::TICK_PERIOD_MS;
use crate::sim::{Difficulty, GameEvent, GameState, Snapshot, TickInput, advance_one_tick};

/// Ticks of accumulated lag before the schedule resyncs instead of catching up
const RESYNC_TICKS: u32 = 10;

/// Driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Logical tick period
    pub tick_period: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_millis(TICK_PERIOD_MS),
        }
    }
}

/// Shared intent flags between input capture and the driver.
///
/// The single contended resource in the system: input capture writes at any
/// time, the driver drains exactly once per tick boundary, so intent updates
/// become visible at the next tick and never mid-tick. Edge-triggered flags
/// are cleared by the drain; held movement flags persist until released.
#[derive(Debug, Clone, Default)]
pub struct IntentBuffer {
    inner: Arc<Mutex<TickInput>>,
}

impl IntentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, TickInput> {
        // Poisoning means a writer panicked mid-update; fail fast
        self.inner.lock().expect("intent buffer poisoned")
    }

    pub fn set_move_left(&self, held: bool) {
        self.lock().move_left = held;
    }

    pub fn set_move_right(&self, held: bool) {
        self.lock().move_right = held;
    }

    pub fn press_fire(&self) {
        self.lock().fire = true;
    }

    pub fn press_pause(&self) {
        self.lock().pause_toggle = true;
    }

    pub fn press_restart(&self) {
        self.lock().restart = true;
    }

    pub fn press_quit(&self) {
        self.lock().quit = true;
    }

    pub fn select_difficulty(&self, difficulty: Difficulty) {
        self.lock().difficulty_select = Some(difficulty);
    }

    pub fn debug_add_life(&self) {
        self.lock().add_life = true;
    }

    pub fn debug_add_score(&self) {
        self.lock().add_score = true;
    }

    pub fn debug_spawn_bonus(&self) {
        self.lock().force_spawn_bonus = true;
    }

    /// Drain at a tick boundary: returns the current intent and clears
    /// everything edge-triggered
    pub fn take(&self) -> TickInput {
        let mut guard = self.lock();
        let input = *guard;
        guard.fire = false;
        guard.pause_toggle = false;
        guard.restart = false;
        guard.quit = false;
        guard.difficulty_select = None;
        guard.add_life = false;
        guard.add_score = false;
        guard.force_spawn_bonus = false;
        input
    }
}

/// Handle to a running simulation driver
pub struct SimulationHandle {
    intents: IntentBuffer,
    snapshot: Arc<Mutex<Arc<Snapshot>>>,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl SimulationHandle {
    /// Clone of the shared intent buffer for the input side
    pub fn intents(&self) -> IntentBuffer {
        self.intents.clone()
    }

    /// Latest fully-consistent post-tick snapshot
    pub fn latest_snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.lock().expect("snapshot slot poisoned"))
    }

    /// Stop the driver and wait for it to acknowledge. Idempotent: repeated
    /// calls are harmless, and no tick fires once this returns.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("simulation thread panicked");
            }
        }
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn the tick-driver thread.
///
/// Returns the control handle and the receiving end of the domain-event
/// channel. Dropping the receiver does not stop the driver.
pub fn spawn(state: GameState, config: DriverConfig) -> (SimulationHandle, Receiver<GameEvent>) {
    let intents = IntentBuffer::new();
    let snapshot = Arc::new(Mutex::new(Arc::new(state.snapshot())));
    let stop = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();

    let thread = {
        let intents = intents.clone();
        let snapshot = Arc::clone(&snapshot);
        let stop = Arc::clone(&stop);
        thread::Builder::new()
            .name("simulation".into())
            .spawn(move || run_loop(state, intents, snapshot, stop, tx, config))
            .expect("failed to spawn simulation thread")
    };

    (
        SimulationHandle {
            intents,
            snapshot,
            stop,
            thread: Some(thread),
        },
        rx,
    )
}

fn run_loop(
    mut state: GameState,
    intents: IntentBuffer,
    snapshot: Arc<Mutex<Arc<Snapshot>>>,
    stop: Arc<AtomicBool>,
    events: Sender<GameEvent>,
    config: DriverConfig,
) {
    let period = config.tick_period;
    let mut next_tick = Instant::now() + period;
    log::info!("simulation driver running, tick period {:?}", period);

    while !stop.load(Ordering::Acquire) {
        let input = intents.take();
        if input.quit {
            stop.store(true, Ordering::Release);
            break;
        }

        let (snap, tick_events) = advance_one_tick(&mut state, &input);
        *snapshot.lock().expect("snapshot slot poisoned") = Arc::new(snap);
        for event in tick_events {
            // A departed consumer must not kill the driver
            if events.send(event).is_err() {
                break;
            }
        }

        // Hold the fixed logical cadence. Late ticks run back to back, in
        // order; lag beyond the resync horizon abandons the lost schedule.
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else if now.duration_since(next_tick) > period * RESYNC_TICKS {
            next_tick = now;
        }
        next_tick += period;
    }

    log::info!("simulation driver stopped after {} ticks", state.time_ticks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn fast_config() -> DriverConfig {
        DriverConfig {
            tick_period: Duration::from_millis(2),
        }
    }

    #[test]
    fn test_intent_buffer_clears_edge_triggers() {
        let intents = IntentBuffer::new();
        intents.set_move_left(true);
        intents.press_fire();
        intents.select_difficulty(Difficulty::Hard);

        let first = intents.take();
        assert!(first.move_left);
        assert!(first.fire);
        assert_eq!(first.difficulty_select, Some(Difficulty::Hard));

        let second = intents.take();
        assert!(second.move_left, "held movement persists");
        assert!(!second.fire, "fire is one-shot");
        assert_eq!(second.difficulty_select, None);
    }

    #[test]
    fn test_driver_ticks_and_stop_is_idempotent() {
        let (mut handle, _events) = spawn(GameState::new(42), fast_config());
        handle.intents().select_difficulty(Difficulty::Easy);
        thread::sleep(Duration::from_millis(100));
        assert!(handle.latest_snapshot().time_ticks > 0);

        handle.stop();
        let frozen = handle.latest_snapshot().time_ticks;
        thread::sleep(Duration::from_millis(50));
        assert_eq!(handle.latest_snapshot().time_ticks, frozen);

        // Second stop is harmless
        handle.stop();
    }

    #[test]
    fn test_quit_intent_stops_driver() {
        let (mut handle, _events) = spawn(GameState::new(7), fast_config());
        let intents = handle.intents();
        intents.select_difficulty(Difficulty::Medium);
        thread::sleep(Duration::from_millis(50));

        intents.press_quit();
        thread::sleep(Duration::from_millis(50));
        let frozen = handle.latest_snapshot().time_ticks;
        thread::sleep(Duration::from_millis(50));
        assert_eq!(handle.latest_snapshot().time_ticks, frozen);
        handle.stop();
    }

    #[test]
    fn test_restart_discards_session() {
        let (mut handle, _events) = spawn(GameState::new(11), fast_config());
        let intents = handle.intents();
        intents.select_difficulty(Difficulty::Easy);
        thread::sleep(Duration::from_millis(30));
        intents.debug_add_score();
        thread::sleep(Duration::from_millis(30));
        assert!(handle.latest_snapshot().score > 0);

        intents.press_restart();
        thread::sleep(Duration::from_millis(30));
        let snap = handle.latest_snapshot();
        assert_eq!(snap.phase, GamePhase::AwaitingDifficulty);
        assert_eq!(snap.score, 0);
        assert!(snap.aliens.is_empty());
        handle.stop();
    }

    #[test]
    fn test_events_flow_through_channel() {
        let (mut handle, events) = spawn(GameState::new(3), fast_config());
        handle.intents().select_difficulty(Difficulty::Hard);

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut fired = false;
        while Instant::now() < deadline {
            match events.recv_timeout(Duration::from_millis(100)) {
                Ok(GameEvent::AlienFired) => {
                    fired = true;
                    break;
                }
                Ok(_) => {}
                Err(_) => {}
            }
        }
        assert!(fired, "expected at least one AlienFired event");
        handle.stop();
    }
}
