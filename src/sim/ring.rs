//! Ring kinematics
//!
//! A ring is an ordered set of symbols riding an elliptical track. Symbols
//! keep a fixed angular offset from each other; the ring itself carries a
//! single phase, so every rotation is rigid by construction.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{ellipse_point, normalize_degrees};

/// Symbol identifier (sprite name in the layout)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(String);

impl SymbolId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SymbolId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One icon placed on a ring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub id: SymbolId,
    /// Opaque visual handle for the renderer
    pub sprite: u32,
    /// Fixed spacing offset within the ring (degrees)
    pub offset: f32,
    /// Current angle (degrees, [0, 360))
    pub angle: f32,
    /// Rendered position on the ellipse
    pub pos: Vec2,
}

/// Motion state of a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingState {
    /// Never spun
    Idle,
    /// Rotating at constant speed
    Spinning,
    /// Free stop: speed decays until it settles wherever physics puts it
    Slowing,
    /// Controlled stop in progress (driven by a deceleration task)
    Decelerating,
    /// At rest
    Stopped,
}

/// Free-spin parameters of a ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    /// Speed set by `start_spin` (degrees/sec)
    pub initial_speed: f32,
    /// Exponential decay rate while slowing (1/sec)
    pub free_stop_rate: f32,
    /// Slowing ring stops below this speed (degrees/sec)
    pub free_stop_threshold: f32,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            initial_speed: INITIAL_SPIN_SPEED,
            free_stop_rate: FREE_STOP_RATE,
            free_stop_threshold: FREE_STOP_THRESHOLD,
        }
    }
}

/// Identifies one spin of one ring. Tasks holding a stale token are dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpinToken(u32);

/// Per-symbol render data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolPose {
    pub id: SymbolId,
    pub sprite: u32,
    pub angle: f32,
    pub pos: Vec2,
}

/// What the renderer gets for one ring each tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingSnapshot {
    pub ring: usize,
    pub state: RingState,
    pub symbols: Vec<SymbolPose>,
}

/// A rotating ring of symbols
#[derive(Debug, Clone)]
pub struct Ring {
    pub symbols: Vec<Symbol>,
    /// Horizontal radius of the track
    pub radius_x: f32,
    /// Vertical radius of the track
    pub radius_y: f32,
    /// Current angular speed (degrees/sec)
    pub angular_speed: f32,
    pub state: RingState,
    pub kinematics: Kinematics,
    /// Rotation applied on top of every symbol's offset
    phase: f32,
    /// Bumped by `start_spin` to cancel outstanding tasks
    spin_generation: u32,
}

impl Ring {
    /// Build a ring, spacing `entries` evenly in the given order
    pub fn new(radius_x: f32, radius_y: f32, entries: Vec<(SymbolId, u32)>) -> Self {
        let count = entries.len();
        let symbols = entries
            .into_iter()
            .enumerate()
            .map(|(i, (id, sprite))| {
                let offset = 360.0 * i as f32 / count as f32;
                Symbol {
                    id,
                    sprite,
                    offset,
                    angle: offset,
                    pos: Vec2::ZERO,
                }
            })
            .collect();

        let mut ring = Self {
            symbols,
            radius_x,
            radius_y,
            angular_speed: 0.0,
            state: RingState::Idle,
            kinematics: Kinematics::default(),
            phase: 0.0,
            spin_generation: 0,
        };
        ring.refresh_positions();
        ring
    }

    pub fn with_kinematics(mut self, kinematics: Kinematics) -> Self {
        self.kinematics = kinematics;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Current rigid rotation of the ring (degrees)
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Token of the current spin
    pub fn token(&self) -> SpinToken {
        SpinToken(self.spin_generation)
    }

    /// Start free spinning. Cancels any controlled stop in flight.
    pub fn start_spin(&mut self) {
        self.spin_generation = self.spin_generation.wrapping_add(1);
        self.state = RingState::Spinning;
        self.angular_speed = self.kinematics.initial_speed;
    }

    /// Uncontrolled stop: the ring coasts down and lands wherever it lands.
    /// Only a freely spinning ring can begin a free stop.
    pub fn begin_free_stop(&mut self) -> bool {
        if self.state == RingState::Spinning {
            self.state = RingState::Slowing;
            true
        } else {
            false
        }
    }

    /// Advance free motion by `dt` seconds.
    ///
    /// Controlled stops are integrated by their deceleration task, not here.
    pub fn advance(&mut self, dt: f32) {
        match self.state {
            RingState::Spinning => {
                self.rotate(self.angular_speed * dt);
            }
            RingState::Slowing => {
                self.angular_speed *= (-self.kinematics.free_stop_rate * dt).exp();
                self.rotate(self.angular_speed * dt);
                if self.angular_speed < self.kinematics.free_stop_threshold {
                    self.state = RingState::Stopped;
                    self.angular_speed = 0.0;
                }
            }
            RingState::Idle | RingState::Decelerating | RingState::Stopped => {}
        }
    }

    /// Rotate every symbol by `delta` degrees
    pub fn rotate(&mut self, delta: f32) {
        self.phase = normalize_degrees(self.phase + delta);
        self.refresh_positions();
    }

    /// Put symbol `index` exactly on the winning slot and bring the ring to rest
    pub fn land(&mut self, index: usize) {
        if let Some(symbol) = self.symbols.get(index) {
            self.phase = normalize_degrees(WINNING_ANGLE - symbol.offset);
            self.refresh_positions();
        }
        self.state = RingState::Stopped;
        self.angular_speed = 0.0;
    }

    /// Recompute angles and positions from the phase
    pub fn refresh_positions(&mut self) {
        for symbol in &mut self.symbols {
            symbol.angle = normalize_degrees(symbol.offset + self.phase);
            symbol.pos = ellipse_point(self.radius_x, self.radius_y, symbol.angle);
        }
    }

    /// Index of the first symbol with this id
    pub fn find_symbol(&self, id: &SymbolId) -> Option<usize> {
        self.symbols.iter().position(|s| &s.id == id)
    }

    pub fn symbol_at(&self, index: usize) -> Option<&SymbolId> {
        self.symbols.get(index).map(|s| &s.id)
    }

    /// Index of the symbol rendered nearest to `point`
    pub fn closest_index(&self, point: Vec2) -> Option<usize> {
        self.symbols
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.pos
                    .distance_squared(point)
                    .partial_cmp(&b.pos.distance_squared(point))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
    }

    /// Position of the winning slot on this ring's track
    pub fn winning_slot(&self) -> Vec2 {
        ellipse_point(self.radius_x, self.radius_y, WINNING_ANGLE)
    }

    pub fn winning_index(&self) -> Option<usize> {
        self.closest_index(self.winning_slot())
    }

    /// Symbol currently nearest the winning slot (geometric, not stored)
    pub fn winning_symbol(&self) -> Option<&SymbolId> {
        self.winning_index().and_then(|i| self.symbol_at(i))
    }

    pub fn snapshot(&self, ring: usize) -> RingSnapshot {
        RingSnapshot {
            ring,
            state: self.state,
            symbols: self
                .symbols
                .iter()
                .map(|s| SymbolPose {
                    id: s.id.clone(),
                    sprite: s.sprite,
                    angle: s.angle,
                    pos: s.pos,
                })
                .collect(),
        }
    }
}
