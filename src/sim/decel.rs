//! Controlled stops
//!
//! A deceleration task rotates a whole ring along a quadratic ease-out so it
//! comes to rest with a chosen symbol on the winning slot after exactly
//! `duration` seconds. The final tick snaps the ring into place, which
//! absorbs whatever the integration left over.

use super::error::EngineError;
use super::ring::{Ring, RingState, SpinToken, SymbolId};
use crate::consts::WINNING_ANGLE;
use crate::delta_angle;

/// Result of stepping a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Running,
    /// Ring landed this step
    Finished,
    /// Ring was restarted; task is dead
    Cancelled,
}

/// One ring's controlled stop in progress
#[derive(Debug, Clone)]
pub struct DecelTask {
    pub ring: usize,
    pub symbol: SymbolId,
    /// Icon index of `symbol` on the ring
    target: usize,
    /// Degrees the ease-out is scaled to
    total: f32,
    duration: f32,
    elapsed: f32,
    token: SpinToken,
}

impl DecelTask {
    /// Plan a stop of `ring` onto `symbol`. The ring is not touched on error.
    pub fn plan(
        index: usize,
        ring: &Ring,
        symbol: &SymbolId,
        duration: f32,
        extra_rotations: f32,
    ) -> Result<Self, EngineError> {
        let target = ring.find_symbol(symbol).ok_or_else(|| EngineError::TargetNotFound {
            ring: index,
            symbol: symbol.clone(),
        })?;

        let current = ring.symbols[target].angle;
        let mut total = delta_angle(current, WINNING_ANGLE) + extra_rotations;
        if total < 0.0 {
            total += 360.0;
        }

        log::debug!(
            "Ring {}: {} at {:.1} deg, rotating {:.1} deg over {:.2}s",
            index + 1,
            symbol,
            current,
            total,
            duration
        );

        Ok(Self {
            ring: index,
            symbol: symbol.clone(),
            target,
            total,
            duration,
            elapsed: 0.0,
            token: ring.token(),
        })
    }

    /// Planned rotation in degrees
    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Angular rate (degrees/sec) at time `t` into the stop
    pub fn rate_at(&self, t: f32) -> f32 {
        if self.duration <= 0.0 || t >= self.duration {
            return 0.0;
        }
        let progress = t / self.duration;
        (self.total / self.duration) * (1.0 - progress * progress)
    }

    /// Integrate one tick
    pub fn step(&mut self, ring: &mut Ring, dt: f32) -> TaskStatus {
        if ring.token() != self.token {
            return TaskStatus::Cancelled;
        }

        if self.elapsed < self.duration {
            ring.rotate(self.rate_at(self.elapsed) * dt);
            self.elapsed += dt;
        }

        if self.elapsed >= self.duration {
            ring.land(self.target);
            log::debug!("Ring {} stopped with {} at winning position", self.ring + 1, self.symbol);
            TaskStatus::Finished
        } else {
            TaskStatus::Running
        }
    }
}

/// Owns every in-flight controlled stop
#[derive(Debug, Clone, Default)]
pub struct DecelerationScheduler {
    tasks: Vec<DecelTask>,
}

impl DecelerationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a controlled stop of `ring` onto `symbol`.
    ///
    /// On error the ring keeps whatever motion it had.
    pub fn decelerate(
        &mut self,
        index: usize,
        ring: &mut Ring,
        symbol: &SymbolId,
        duration: f32,
        extra_rotations: f32,
    ) -> Result<(), EngineError> {
        let task = DecelTask::plan(index, ring, symbol, duration, extra_rotations)?;
        // A second stop on the same ring replaces the first
        self.tasks.retain(|t| t.ring != index);
        ring.state = RingState::Decelerating;
        ring.angular_speed = 0.0;
        self.tasks.push(task);
        Ok(())
    }

    /// Step every task. Returns the rings that landed this tick.
    pub fn advance(&mut self, rings: &mut [Ring], dt: f32) -> Vec<usize> {
        let mut landed = Vec::new();
        self.tasks.retain_mut(|task| {
            let Some(ring) = rings.get_mut(task.ring) else {
                return false;
            };
            match task.step(ring, dt) {
                TaskStatus::Running => true,
                TaskStatus::Finished => {
                    landed.push(task.ring);
                    false
                }
                TaskStatus::Cancelled => {
                    log::debug!("Ring {} stop cancelled by respin", task.ring + 1);
                    false
                }
            }
        });
        landed
    }

    pub fn is_active(&self, ring: usize) -> bool {
        self.tasks.iter().any(|t| t.ring == ring)
    }

    pub fn is_idle(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{EXTRA_ROTATIONS, SIM_DT};
    use proptest::prelude::*;

    fn xyz_ring() -> Ring {
        Ring::new(
            300.0,
            200.0,
            vec![("X".into(), 0), ("Y".into(), 1), ("Z".into(), 2)],
        )
    }

    fn run_to_end(sched: &mut DecelerationScheduler, ring: &mut Ring, dt: f32) -> usize {
        let rings = std::slice::from_mut(ring);
        let mut ticks = 0;
        while !sched.is_idle() && ticks < 100_000 {
            sched.advance(rings, dt);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_plan_total_rotation() {
        let ring = xyz_ring();
        let task = DecelTask::plan(0, &ring, &"Y".into(), 2.0, EXTRA_ROTATIONS).unwrap();
        // Y at 120: shortest way to 0 is -120, plus two turns
        assert!((task.total() - 600.0).abs() < 1e-3);

        let task = DecelTask::plan(0, &ring, &"Z".into(), 2.0, EXTRA_ROTATIONS).unwrap();
        assert!((task.total() - 840.0).abs() < 1e-3);
    }

    #[test]
    fn test_negative_total_is_wrapped() {
        let ring = xyz_ring();
        let task = DecelTask::plan(0, &ring, &"Y".into(), 2.0, 0.0).unwrap();
        assert!((task.total() - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_rate_is_quadratic_ease_out() {
        let ring = xyz_ring();
        let task = DecelTask::plan(0, &ring, &"Y".into(), 2.0, EXTRA_ROTATIONS).unwrap();
        assert!((task.rate_at(0.0) - 300.0).abs() < 1e-3);
        assert!((task.rate_at(1.0) - 225.0).abs() < 1e-3);
        assert_eq!(task.rate_at(2.0), 0.0);
    }

    #[test]
    fn test_lands_xyz_scenario() {
        let mut ring = xyz_ring();
        ring.start_spin();
        let mut sched = DecelerationScheduler::new();
        sched
            .decelerate(0, &mut ring, &"Y".into(), 2.0, EXTRA_ROTATIONS)
            .unwrap();
        assert_eq!(ring.state, RingState::Decelerating);

        let rings = std::slice::from_mut(&mut ring);
        for _ in 0..3 {
            assert!(sched.advance(rings, 0.5).is_empty());
        }
        assert_eq!(sched.advance(rings, 0.5), vec![0]);

        assert_eq!(ring.symbols[1].angle, 0.0);
        assert_eq!(ring.symbols[0].angle, 240.0);
        assert_eq!(ring.symbols[2].angle, 120.0);
        assert_eq!(ring.state, RingState::Stopped);
        assert_eq!(ring.angular_speed, 0.0);
        assert_eq!(ring.winning_symbol(), Some(&SymbolId::from("Y")));
    }

    #[test]
    fn test_lands_at_sim_rate() {
        let mut ring = xyz_ring();
        ring.start_spin();
        ring.advance(0.37);
        let mut sched = DecelerationScheduler::new();
        sched
            .decelerate(0, &mut ring, &"Z".into(), 2.0, EXTRA_ROTATIONS)
            .unwrap();
        let ticks = run_to_end(&mut sched, &mut ring, SIM_DT);
        assert!((120..=121).contains(&ticks), "ticks = {}", ticks);
        assert_eq!(ring.symbols[2].angle, 0.0);
        assert_eq!(ring.winning_symbol(), Some(&SymbolId::from("Z")));
    }

    #[test]
    fn test_missing_target_leaves_ring_spinning() {
        let mut ring = xyz_ring();
        ring.start_spin();
        let mut sched = DecelerationScheduler::new();
        let err = sched
            .decelerate(1, &mut ring, &"Q".into(), 2.0, EXTRA_ROTATIONS)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::TargetNotFound {
                ring: 1,
                symbol: "Q".into()
            }
        );
        assert_eq!(ring.state, RingState::Spinning);
        assert!(sched.is_idle());
    }

    #[test]
    fn test_respin_cancels_task() {
        let mut ring = xyz_ring();
        ring.start_spin();
        let mut sched = DecelerationScheduler::new();
        sched
            .decelerate(0, &mut ring, &"Y".into(), 2.0, EXTRA_ROTATIONS)
            .unwrap();
        {
            let rings = std::slice::from_mut(&mut ring);
            sched.advance(rings, 0.5);
        }

        ring.start_spin();
        let rings = std::slice::from_mut(&mut ring);
        assert!(sched.advance(rings, 0.5).is_empty());
        assert!(sched.is_idle());
        assert_eq!(ring.state, RingState::Spinning);
    }

    #[test]
    fn test_zero_duration_lands_next_step() {
        let mut ring = xyz_ring();
        let mut sched = DecelerationScheduler::new();
        sched.decelerate(0, &mut ring, &"Z".into(), 0.0, EXTRA_ROTATIONS).unwrap();
        let rings = std::slice::from_mut(&mut ring);
        assert_eq!(sched.advance(rings, SIM_DT), vec![0]);
        assert_eq!(ring.symbols[2].angle, 0.0);
    }

    proptest! {
        #[test]
        fn prop_always_lands_on_target(
            start in 0.0f32..360.0,
            target in 0usize..9,
            dt in 0.001f32..0.1,
            duration in 0.1f32..4.0,
        ) {
            let entries = (0..9).map(|i| (SymbolId::new(format!("s{}", i)), i as u32)).collect();
            let mut ring = Ring::new(150.0, 100.0, entries);
            ring.start_spin();
            ring.rotate(start);
            let symbol = SymbolId::new(format!("s{}", target));

            let mut sched = DecelerationScheduler::new();
            sched.decelerate(0, &mut ring, &symbol, duration, EXTRA_ROTATIONS).unwrap();
            run_to_end(&mut sched, &mut ring, dt);

            prop_assert_eq!(ring.state, RingState::Stopped);
            prop_assert!(ring.symbols[target].angle.abs() < 1e-4);
            prop_assert_eq!(ring.winning_symbol(), Some(&symbol));
            for s in &ring.symbols {
                prop_assert!(s.angle >= 0.0 && s.angle < 360.0);
            }
        }
    }
}
