use std::cmp::Ordering;
use std::fmt::Display;
use std::ops::Neg;

use crate::evaluation::Value;

/// The score represents the relative value of the position (in centipawns) or
/// checkmate in N plies (if one is found). It is always relative to the side
/// to move.
///
/// A compact i32 representation is used to store the score in both cases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score {
    value: Value,
}

impl Score {
    /// Neither side has an advantage. Stalemate and dead positions score
    /// exactly this.
    pub const DRAW: Self = Self { value: 0 };
    /// Upper bound of every score. Negated, the lower bound.
    pub const INFINITY: Self = Self {
        value: 2_000_000_000,
    };
    /// `[-INFINITY, -INFINITY + MATE_RANGE)` and `(INFINITY - MATE_RANGE,
    /// INFINITY]` are reserved for mate scores.
    /// `[-INFINITY + MATE_RANGE, INFINITY - MATE_RANGE]` if for centipawn
    /// evaluations.
    const MATE_RANGE: Value = 1000;

    /// Creates a new score in centipawn units.
    ///
    /// The value must be in the range `[-INFINITY + MATE_RANGE, INFINITY -
    /// MATE_RANGE]`.
    #[must_use]
    pub fn cp(value: Value) -> Self {
        debug_assert!(value.abs() < Self::INFINITY.value - Self::MATE_RANGE);
        Self { value }
    }

    /// Creates a new score representing the side to move's victory in `plies`
    /// half-moves. Faster mates score higher.
    #[must_use]
    pub fn mate(plies: u8) -> Self {
        Self {
            value: Self::INFINITY.value - Value::from(plies),
        }
    }

    /// Returns the number of full moves until mate: positive when the side to
    /// move mates, negative when it gets mated.
    ///
    /// # Panics
    ///
    /// Panics if the score is not a mate score.
    #[must_use]
    pub fn mate_in(&self) -> i32 {
        assert!(self.is_mate());
        let plies = Self::INFINITY.value - self.value.abs();
        let moves = (plies + 1) / 2;
        match self.value.cmp(&0) {
            Ordering::Greater => moves,
            _ => -moves,
        }
    }

    /// Returns `true` if the score represents a mate, not centipawn evaluation.
    #[must_use]
    pub fn is_mate(&self) -> bool {
        self.value.abs() > Self::INFINITY.value - Self::MATE_RANGE
    }

    /// The score right below this one. Used to open a search window that still
    /// accepts ties with the best score so far.
    #[must_use]
    pub(crate) const fn below(self) -> Self {
        Self {
            value: self.value - 1,
        }
    }
}

impl Neg for Score {
    type Output = Self;

    /// Mirrors evaluation to other player's perspective.
    fn neg(self) -> Self::Output {
        Self { value: -self.value }
    }
}

impl Display for Score {
    /// Formats the score as centipawn units or moves to mate, the way UCI
    /// reports it.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_mate() {
            write!(f, "mate {}", self.mate_in())
        } else {
            write!(f, "cp {}", self.value)
        }
    }
}
