//! Outcome predetermination
//!
//! Each ring's result is drawn before the player starts stopping rings.
//! The draw is uniform over the ring's icons and independent of where the
//! ring happens to be in its spin.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::error::EngineError;
use super::ring::{Ring, SymbolId};

/// Seeded picker of target symbols
#[derive(Debug, Clone)]
pub struct OutcomePredeterminer {
    seed: u64,
    rng: Pcg32,
}

impl OutcomePredeterminer {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the symbol ring `index` must land on
    pub fn choose(&mut self, index: usize, ring: &Ring) -> Result<SymbolId, EngineError> {
        if ring.is_empty() {
            return Err(EngineError::EmptyRing { ring: index });
        }
        let pick = self.rng.random_range(0..ring.len());
        let symbol = ring.symbols[pick].id.clone();
        log::debug!("Ring {} predetermined winner: {} (icon {})", index + 1, symbol, pick);
        Ok(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ring_of(names: &[&str]) -> Ring {
        Ring::new(
            100.0,
            100.0,
            names
                .iter()
                .enumerate()
                .map(|(i, n)| (SymbolId::from(*n), i as u32))
                .collect(),
        )
    }

    #[test]
    fn test_choose_is_uniform() {
        let names = ["a", "b", "c", "d", "e", "f"];
        let ring = ring_of(&names);
        let mut picker = OutcomePredeterminer::new(42);

        let trials = 60_000;
        let mut counts: HashMap<SymbolId, u32> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(picker.choose(0, &ring).unwrap()).or_default() += 1;
        }

        let expected = trials as f64 / names.len() as f64;
        assert_eq!(counts.len(), names.len());
        for (symbol, count) in counts {
            let ratio = count as f64 / expected;
            assert!((ratio - 1.0).abs() < 0.05, "{} drawn {} times", symbol, count);
        }
    }

    #[test]
    fn test_choose_is_deterministic_per_seed() {
        let ring = ring_of(&["a", "b", "c", "d"]);
        let mut p1 = OutcomePredeterminer::new(7);
        let mut p2 = OutcomePredeterminer::new(7);
        for _ in 0..20 {
            assert_eq!(p1.choose(0, &ring), p2.choose(0, &ring));
        }
    }

    #[test]
    fn test_choose_ignores_spin_phase() {
        let mut ring = ring_of(&["a", "b", "c"]);
        let mut p1 = OutcomePredeterminer::new(99);
        let mut p2 = OutcomePredeterminer::new(99);
        let first = p1.choose(0, &ring).unwrap();
        ring.rotate(133.0);
        assert_eq!(p2.choose(0, &ring).unwrap(), first);
    }

    #[test]
    fn test_empty_ring_errors() {
        let ring = Ring::new(100.0, 100.0, Vec::new());
        let mut picker = OutcomePredeterminer::new(1);
        assert_eq!(picker.choose(2, &ring), Err(EngineError::EmptyRing { ring: 2 }));
    }
}
