//! Payout rules for three landed symbols

use serde::{Deserialize, Serialize};

use super::ring::SymbolId;
use crate::consts::RING_COUNT;

/// Which rule a result matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardTier {
    ThreeMatch,
    /// Ring 0 matches ring 1, or ring 1 matches ring 2
    TwoMatch,
    NoMatch,
}

/// Maps landed symbols to a payout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardEvaluator {
    pub three_match_reward: u32,
    pub two_match_reward: u32,
}

impl Default for RewardEvaluator {
    fn default() -> Self {
        Self {
            three_match_reward: 15,
            two_match_reward: 5,
        }
    }
}

impl RewardEvaluator {
    pub fn new(three_match_reward: u32, two_match_reward: u32) -> Self {
        Self {
            three_match_reward,
            two_match_reward,
        }
    }

    /// Only adjacent pairs count; outer-pair matches pay nothing.
    pub fn classify(symbols: &[SymbolId; RING_COUNT]) -> RewardTier {
        let [a, b, c] = symbols;
        if a == b && b == c {
            RewardTier::ThreeMatch
        } else if a == b || b == c {
            RewardTier::TwoMatch
        } else {
            RewardTier::NoMatch
        }
    }

    pub fn payout(&self, tier: RewardTier) -> u32 {
        match tier {
            RewardTier::ThreeMatch => self.three_match_reward,
            RewardTier::TwoMatch => self.two_match_reward,
            RewardTier::NoMatch => 0,
        }
    }

    pub fn evaluate(&self, symbols: &[SymbolId; RING_COUNT]) -> u32 {
        self.payout(Self::classify(symbols))
    }
}
