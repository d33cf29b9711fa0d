//! Fixed timestep session tick
//!
//! The engine is the only writer of ring and session state. Hosts call
//! `request_start` when the player asks to brew and `tick` once per fixed
//! step with that step's input.

use super::decel::DecelerationScheduler;
use super::outcome::OutcomePredeterminer;
use super::reward::{RewardEvaluator, RewardTier};
use super::ring::SymbolId;
use super::state::{Session, SessionObserver, SessionResult, SessionState};
use crate::consts::*;
use crate::ledger::ResourceLedger;
use crate::settings::Settings;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer/touch activation. At most one is consumed per tick.
    pub activate: bool,
}

/// Spin-and-stop session controller with its collaborators
pub struct Engine<L: ResourceLedger, O: SessionObserver = ()> {
    settings: Settings,
    session: Session,
    predeterminer: OutcomePredeterminer,
    scheduler: DecelerationScheduler,
    evaluator: RewardEvaluator,
    ledger: L,
    observer: O,
    last_result: Option<SessionResult>,
}

impl<L: ResourceLedger, O: SessionObserver> Engine<L, O> {
    /// Build rings from `settings` and wire in the collaborators
    pub fn new(settings: Settings, ledger: L, observer: O) -> Self {
        let session = Session::from_settings(&settings);
        Self::with_session(settings, session, ledger, observer)
    }

    /// Use prebuilt rings instead of the layouts in `settings`
    pub fn with_session(settings: Settings, session: Session, ledger: L, observer: O) -> Self {
        for (i, ring) in session.rings.iter().enumerate() {
            if ring.is_empty() {
                log::warn!("Ring {} has no symbols and will be skipped", i + 1);
            }
        }
        Self {
            predeterminer: OutcomePredeterminer::new(settings.seed),
            scheduler: DecelerationScheduler::new(),
            evaluator: RewardEvaluator::new(settings.three_match_reward, settings.two_match_reward),
            settings,
            session,
            ledger,
            observer,
            last_result: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Most recent resolved session, if any
    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    pub fn into_parts(self) -> (Session, L, O) {
        (self.session, self.ledger, self.observer)
    }

    /// Whether a start request would currently succeed
    pub fn can_start(&self) -> bool {
        self.session.state == SessionState::Idle && self.ledger.balance() >= self.settings.spin_cost
    }

    /// Debit one spin and start all rings. Returns false (changing nothing)
    /// if a session is already running or the ledger is short.
    pub fn request_start(&mut self) -> bool {
        if self.session.state != SessionState::Idle {
            log::debug!("Start ignored in {:?}", self.session.state);
            return false;
        }
        if !self.ledger.try_spend(self.settings.spin_cost) {
            log::warn!("Not enough resources to start a session");
            self.notify_start_availability();
            return false;
        }

        log::info!("Starting spin session");
        self.scheduler.clear();
        self.session.reset_spin();
        for ring in &mut self.session.rings {
            ring.start_spin();
        }
        self.set_state(SessionState::Spinning);
        self.notify_start_availability();
        true
    }

    /// Spin all rings without a session. An activate while idle then lets
    /// them coast to a stop wherever they land.
    pub fn free_spin(&mut self) -> bool {
        if self.session.state != SessionState::Idle {
            return false;
        }
        log::info!("Free spin");
        self.scheduler.clear();
        for ring in &mut self.session.rings {
            ring.start_spin();
        }
        true
    }

    /// Advance the engine by one fixed timestep
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.session.time_ticks += 1;

        if self.session.state == SessionState::Spinning && self.session.predetermine_pending {
            self.predetermine();
            self.set_state(SessionState::AwaitingStops);
        }

        if input.activate {
            self.handle_activate();
        }

        for ring in &mut self.session.rings {
            ring.advance(dt);
        }
        for index in self.scheduler.advance(&mut self.session.rings, dt) {
            log::debug!("Ring {} landed", index + 1);
        }

        match self.session.state {
            SessionState::AwaitingStops if self.session.stopped_count == RING_COUNT => {
                self.session.timer -= dt;
                // Never resolve while a ring is still easing in
                if self.session.timer <= 0.0 && self.scheduler.is_idle() {
                    self.resolve();
                }
            }
            SessionState::Cooldown => {
                self.session.timer -= dt;
                if self.session.timer <= 0.0 {
                    log::info!("Ending spin session");
                    self.set_state(SessionState::Idle);
                    self.notify_start_availability();
                }
            }
            _ => {}
        }

        for (i, ring) in self.session.rings.iter().enumerate() {
            self.observer.ring_frame(&ring.snapshot(i));
        }
    }

    fn set_state(&mut self, state: SessionState) {
        if self.session.state != state {
            self.session.state = state;
            self.observer.session_state_changed(state);
        }
    }

    fn notify_start_availability(&mut self) {
        let available = self.can_start();
        self.observer.start_availability_changed(available);
    }

    fn predetermine(&mut self) {
        self.session.predetermine_pending = false;
        for (i, ring) in self.session.rings.iter().enumerate() {
            match self.predeterminer.choose(i, ring) {
                Ok(symbol) => self.session.predetermined[i] = Some(symbol),
                Err(e) => log::warn!("Skipping outcome for ring {}: {}", i + 1, e),
            }
        }
    }

    fn handle_activate(&mut self) {
        match self.session.state {
            SessionState::AwaitingStops => self.stop_next_ring(),
            SessionState::Idle => {
                let mut slowing = 0;
                for ring in &mut self.session.rings {
                    if ring.begin_free_stop() {
                        slowing += 1;
                    }
                }
                if slowing > 0 {
                    log::info!("Slowing down {} free-spinning ring(s)", slowing);
                }
            }
            _ => {}
        }
    }

    /// Rings stop in fixed order 0, 1, 2 regardless of where the player clicked
    fn stop_next_ring(&mut self) {
        if self.session.stopped_count >= RING_COUNT {
            log::debug!("Activate ignored, all rings already stopping");
            return;
        }

        let index = self.session.stopped_count;
        self.session.stopped_count += 1;

        let duration = self.settings.deceleration_time;
        let extra = self.settings.extra_rotations;
        match &self.session.predetermined[index] {
            Some(symbol) => {
                let ring = &mut self.session.rings[index];
                match self.scheduler.decelerate(index, ring, symbol, duration, extra) {
                    Ok(()) => log::info!("Decelerating ring {} toward {}", index + 1, symbol),
                    Err(e) => log::warn!("Ring {} keeps spinning: {}", index + 1, e),
                }
            }
            None => log::warn!("Ring {} has no predetermined symbol, skipping", index + 1),
        }

        if self.session.stopped_count == RING_COUNT {
            log::info!("All rings stopping");
            self.session.timer = self.settings.resolve_delay();
        }
    }

    fn resolve(&mut self) {
        self.set_state(SessionState::Resolving);
        log::info!("Evaluating results");

        let landed = self.session.landed_symbols();
        for (i, (got, want)) in landed.iter().zip(&self.session.predetermined).enumerate() {
            if got != want {
                log::warn!("Ring {} landed on {:?}, predetermined {:?}", i + 1, got, want);
            }
        }

        let (tier, reward) = match &landed {
            [Some(a), Some(b), Some(c)] => {
                let symbols: [SymbolId; RING_COUNT] = [a.clone(), b.clone(), c.clone()];
                let tier = RewardEvaluator::classify(&symbols);
                (tier, self.evaluator.payout(tier))
            }
            _ => {
                log::warn!("A ring has no landed symbol, no payout");
                (RewardTier::NoMatch, 0)
            }
        };

        if reward > 0 {
            self.ledger.reward_granted(reward);
            log::info!("Player wins {} ({:?})", reward, tier);
        } else {
            log::info!("No winning combination");
        }

        let result = SessionResult {
            predetermined: self.session.predetermined.clone(),
            landed,
            tier,
            reward,
        };
        self.observer.session_resolved(&result);
        self.last_result = Some(result);

        self.session.timer = self.settings.cooldown_delay;
        self.set_state(SessionState::Cooldown);
    }
}
