//! Cauldron Spin - a spin-and-stop ring minigame engine
//!
//! Core modules:
//! - `sim`: Deterministic engine (ring kinematics, outcomes, session state machine)
//! - `settings`: Data-driven timing, rewards and ring layouts
//! - `ledger`: Resource collaborator (spend to start, credit rewards)
//! - `platform`: Fixed timestep driving for hosts

pub mod ledger;
pub mod platform;
pub mod settings;
pub mod sim;

pub use ledger::{Pantry, ResourceLedger};
pub use settings::{ConfigError, Settings, TimingPreset};

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Rings per session
    pub const RING_COUNT: usize = 3;
    /// Icons per layout tier (tier 1 = 9, tier 2 = 18, tier 3 = 27)
    pub const ICONS_PER_TIER: usize = 9;

    /// Angle of the winning slot on every ring (degrees)
    pub const WINNING_ANGLE: f32 = 0.0;

    /// Free spin speed (degrees/sec)
    pub const INITIAL_SPIN_SPEED: f32 = 200.0;
    /// Free stop decay rate (1/sec)
    pub const FREE_STOP_RATE: f32 = 2.0;
    /// Below this speed (degrees/sec) a free stop settles
    pub const FREE_STOP_THRESHOLD: f32 = 10.0;
    /// Extra rotation added to every controlled stop (two full turns)
    pub const EXTRA_ROTATIONS: f32 = 720.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if a >= 360.0 { 0.0 } else { a }
}

/// Signed shortest difference from `from` to `to`, in (-180, 180]
#[inline]
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let d = normalize_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Point on an axis-aligned ellipse at `angle` degrees
#[inline]
pub fn ellipse_point(radius_x: f32, radius_y: f32, angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(radius_x * rad.cos(), radius_y * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-4);
        assert!(normalize_degrees(-1e-8) < 360.0);
    }

    #[test]
    fn test_delta_angle() {
        assert!((delta_angle(120.0, 0.0) - -120.0).abs() < 1e-4);
        assert!((delta_angle(240.0, 0.0) - 120.0).abs() < 1e-4);
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
        // Exactly opposite resolves to +180
        assert!((delta_angle(180.0, 0.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_ellipse_point() {
        let p = ellipse_point(300.0, 200.0, 0.0);
        assert!((p.x - 300.0).abs() < 1e-3 && p.y.abs() < 1e-3);
        let p = ellipse_point(300.0, 200.0, 90.0);
        assert!(p.x.abs() < 1e-3 && (p.y - 200.0).abs() < 1e-3);
    }
}
