//! This module implements "static" [evaluation], i.e. predicting the relative
//! value/score of given position without [`crate::search`].
//!
//! For convenience, the score is returned in centipawn units.
//!
//! [evaluation]: https://www.chessprogramming.org/Evaluation

pub mod material;
mod score;

pub use score::Score;

/// Centipawn value of a position or a piece.
pub type Value = i32;
