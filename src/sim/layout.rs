//! Ring generation from tiered layouts
//!
//! Tier `n` places `n * 9` icons on the ring, cycling through the symbol
//! list. Tier 0 means "no ring" and yields an empty ring.

use serde::{Deserialize, Serialize};

use super::ring::{Kinematics, Ring, SymbolId};
use crate::consts::*;

/// Ingredients used by the stock cauldron rings
pub const CAULDRON_SYMBOLS: [&str; 9] = [
    "newt_eye",
    "mandrake",
    "moonpetal",
    "ember_salt",
    "nightshade",
    "frost_lichen",
    "glowcap",
    "wyrm_scale",
    "stardust",
];

/// Description of one ring's icons and track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingLayout {
    /// 1..=3 (9, 18 or 27 icons); 0 disables the ring
    pub tier: u8,
    /// Symbol names, cycled to fill the ring
    pub symbols: Vec<String>,
    /// Vertical radius of the track
    pub radius: f32,
    /// Horizontal stretch (1 = circle)
    pub oval_factor: f32,
}

impl RingLayout {
    /// Stock layout for the given tier; outer tiers get larger tracks
    pub fn cauldron(tier: u8) -> Self {
        Self {
            tier,
            symbols: CAULDRON_SYMBOLS.iter().map(|s| s.to_string()).collect(),
            radius: 100.0 * tier as f32,
            oval_factor: 1.5,
        }
    }

    /// Number of icons the layout produces
    pub fn icon_count(&self) -> usize {
        if self.symbols.is_empty() {
            0
        } else {
            self.tier as usize * ICONS_PER_TIER
        }
    }

    pub fn radius_x(&self) -> f32 {
        self.radius * self.oval_factor
    }

    pub fn radius_y(&self) -> f32 {
        self.radius
    }

    /// Build the ring. Sprite handles are indices into `symbols`.
    pub fn build(&self, kinematics: Kinematics) -> Ring {
        let count = self.icon_count();
        if count == 0 {
            log::warn!(
                "Ring layout (tier {}, {} symbols) produces no icons",
                self.tier,
                self.symbols.len()
            );
        }

        let entries = (0..count)
            .map(|i| {
                let sprite = i % self.symbols.len();
                (SymbolId::new(self.symbols[sprite].as_str()), sprite as u32)
            })
            .collect();

        Ring::new(self.radius_x(), self.radius_y(), entries).with_kinematics(kinematics)
    }
}
