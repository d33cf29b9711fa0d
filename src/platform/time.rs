//! Fixed timestep accumulator

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Turns variable frame deltas into a bounded number of fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedStepClock {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }

    /// Add frame time; returns how many fixed steps to run this frame
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Clamp long stalls (tab switch, debugger) to 100ms
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_substeps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        // Drop the backlog rather than spiral
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        steps
    }

    /// The fixed delta time
    pub fn dt(&self) -> f32 {
        self.dt
    }
}
