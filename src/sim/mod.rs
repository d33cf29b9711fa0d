//! Deterministic spin-and-stop engine
//!
//! All minigame logic lives here. This module must stay pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Collaborators injected at construction, never looked up globally
//! - No rendering or platform dependencies

pub mod decel;
pub mod error;
pub mod layout;
pub mod outcome;
pub mod reward;
pub mod ring;
pub mod state;
pub mod tick;

pub use decel::{DecelTask, DecelerationScheduler, TaskStatus};
pub use error::EngineError;
pub use layout::{CAULDRON_SYMBOLS, RingLayout};
pub use outcome::OutcomePredeterminer;
pub use reward::{RewardEvaluator, RewardTier};
pub use ring::{Kinematics, Ring, RingSnapshot, RingState, SpinToken, Symbol, SymbolId, SymbolPose};
pub use state::{EventLog, Session, SessionEvent, SessionObserver, SessionResult, SessionState};
pub use tick::{Engine, TickInput};
