//! Session state and host-facing notifications
//!
//! A session is created once and reused for every spin. Only the tick
//! driver writes to it.

use serde::{Deserialize, Serialize};

use super::reward::RewardTier;
use super::ring::{Kinematics, Ring, RingSnapshot, SymbolId};
use crate::consts::*;
use crate::settings::Settings;

/// Phase of the click-sequenced minigame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Ready for a start request
    Idle,
    /// Rings started; outcomes are drawn on the next tick
    Spinning,
    /// Each activate stops the next ring in order
    AwaitingStops,
    /// Reading landed symbols and paying out
    Resolving,
    /// Short pause before the next session can start
    Cooldown,
}

/// Outcome of one completed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Symbols drawn before stopping began
    pub predetermined: [Option<SymbolId>; RING_COUNT],
    /// Symbols found on the winning slots at resolution
    pub landed: [Option<SymbolId>; RING_COUNT],
    pub tier: RewardTier,
    pub reward: u32,
}

/// Notifications recorded by [`EventLog`]
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(SessionState),
    StartAvailable(bool),
    Resolved(SessionResult),
}

/// Receives engine output. All methods default to no-ops.
pub trait SessionObserver {
    fn session_state_changed(&mut self, _state: SessionState) {}

    /// Whether a start request could currently succeed
    fn start_availability_changed(&mut self, _available: bool) {}

    /// Called once per ring per tick
    fn ring_frame(&mut self, _snapshot: &RingSnapshot) {}

    fn session_resolved(&mut self, _result: &SessionResult) {}
}

impl SessionObserver for () {}

/// Observer that records notifications and keeps the latest ring frames
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<SessionEvent>,
    pub frames: [Option<RingSnapshot>; RING_COUNT],
    pub frame_count: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded events, leaving the log empty
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// State changes recorded so far, in order
    pub fn states(&self) -> Vec<SessionState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::StateChanged(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl SessionObserver for EventLog {
    fn session_state_changed(&mut self, state: SessionState) {
        self.events.push(SessionEvent::StateChanged(state));
    }

    fn start_availability_changed(&mut self, available: bool) {
        self.events.push(SessionEvent::StartAvailable(available));
    }

    fn ring_frame(&mut self, snapshot: &RingSnapshot) {
        self.frame_count += 1;
        if let Some(slot) = self.frames.get_mut(snapshot.ring) {
            *slot = Some(snapshot.clone());
        }
    }

    fn session_resolved(&mut self, result: &SessionResult) {
        self.events.push(SessionEvent::Resolved(result.clone()));
    }
}

/// Rings plus the per-spin bookkeeping of the minigame
#[derive(Debug, Clone)]
pub struct Session {
    pub rings: [Ring; RING_COUNT],
    /// Target per ring; meaningful only while awaiting stops or resolving
    pub predetermined: [Option<SymbolId>; RING_COUNT],
    /// Rings stopped so far this spin (0..=3)
    pub stopped_count: usize,
    pub state: SessionState,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Outcomes are drawn on the tick after the spin starts
    pub(crate) predetermine_pending: bool,
    /// Seconds left in the current timed wait (resolve or cooldown)
    pub(crate) timer: f32,
}

impl Session {
    pub fn new(rings: [Ring; RING_COUNT]) -> Self {
        Self {
            rings,
            predetermined: Default::default(),
            stopped_count: 0,
            state: SessionState::Idle,
            time_ticks: 0,
            predetermine_pending: false,
            timer: 0.0,
        }
    }

    /// Build the rings described by `settings`. A missing layout becomes an
    /// empty ring, which the session skips.
    pub fn from_settings(settings: &Settings) -> Self {
        let kinematics = Kinematics {
            initial_speed: settings.initial_spin_speed,
            free_stop_rate: settings.free_stop_rate,
            free_stop_threshold: settings.free_stop_threshold,
        };
        let rings = std::array::from_fn(|i| match settings.rings.get(i) {
            Some(layout) => layout.build(kinematics),
            None => {
                log::warn!("No layout for ring {}, ring will be skipped", i + 1);
                Ring::new(0.0, 0.0, Vec::new()).with_kinematics(kinematics)
            }
        });
        Self::new(rings)
    }

    /// Clear per-spin bookkeeping
    pub(crate) fn reset_spin(&mut self) {
        self.predetermined = Default::default();
        self.stopped_count = 0;
        self.predetermine_pending = true;
        self.timer = 0.0;
    }

    /// Symbols currently on the winning slots
    pub fn landed_symbols(&self) -> [Option<SymbolId>; RING_COUNT] {
        std::array::from_fn(|i| self.rings[i].winning_symbol().cloned())
    }

    pub fn snapshots(&self) -> Vec<RingSnapshot> {
        self.rings
            .iter()
            .enumerate()
            .map(|(i, ring)| ring.snapshot(i))
            .collect()
    }
}
