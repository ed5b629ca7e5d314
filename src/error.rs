//! Errors reported by the rules engine.
//!
//! Everything except [`Error::InvariantViolation`] is caused by the input and
//! the caller is expected to report it and ask for another move or position.

use crate::chess::core::Square;
use crate::chess::game::Status;

#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed position or move notation.
    #[error("parse error: {0:#}")]
    Parse(#[from] anyhow::Error),
    /// The move is impossible or leaves the mover's king in check.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// No piece of the given kind can reach the destination.
    #[error("illegal move: {0}")]
    NoCandidate(String),
    /// More than one piece of the given kind can reach the destination.
    #[error("ambiguous move: {0}")]
    Ambiguous(String),
    /// The notation says "capture" but there is nothing to capture.
    #[error("there is nothing to capture on {0}")]
    NoCapture(Square),
    #[error("the game is over: {0}")]
    GameOver(Status),
    /// The board and the armies went out of sync. This is a bug, not a user
    /// error.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}
