//! Engine errors. None of these are fatal; the session logs and carries on.

use super::ring::SymbolId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("ring {ring} has no symbols")]
    EmptyRing { ring: usize },

    #[error("symbol {symbol} not found on ring {ring}")]
    TargetNotFound { ring: usize, symbol: SymbolId },

    #[error("ring index {ring} out of range")]
    RingOutOfRange { ring: usize },
}
