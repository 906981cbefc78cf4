//! Engine error types

use crate::board::Hex;

/// Errors raised by the board engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Coordinate is not part of the fixed cell set
    #[error("hex {0} is not a board cell")]
    UnknownCell(Hex),

    /// Occupant value outside 0..=6
    #[error("invalid occupant {0} (expected 0..=6)")]
    InvalidOccupant(u8),
}
