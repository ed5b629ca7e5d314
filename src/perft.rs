//! [Perft] (*per*formance *t*esting) is a technique for checking correctness of
//! move generation (tested functions are generate move, make move and unmake
//! move).
//!
//! The counts are compared with well-known reference values; any mismatch
//! points at a rules bug and [`Game::divide`] narrows it down to a root move.
//!
//! [Perft]: https://www.chessprogramming.org/Perft

use std::fmt;
use std::ops::AddAssign;

use log::info;

use crate::chess::core::Move;
use crate::chess::game::{Game, Undo};
use crate::error::Error;
use crate::search::Depth;

/// Perft counters. Everything except `nodes` is counted for the moves of the
/// last ply only, the same way the reference tables do it.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl AddAssign for TestResult {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passant += other.en_passant;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.checkmates += other.checkmates;
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes {} captures {} e.p. {} castles {} promotions {} checks {} checkmates {}",
            self.nodes,
            self.captures,
            self.en_passant,
            self.castles,
            self.promotions,
            self.checks,
            self.checkmates
        )
    }
}

impl Game {
    /// Counts leaf nodes of the legal move tree `depth` plies deep. The last
    /// ply is not played: the number of legal moves is the answer.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvariantViolation`] from playing moves.
    pub fn perft(&mut self, depth: Depth) -> Result<u64, Error> {
        if depth == 0 {
            return Ok(1);
        }
        let moves = self.generate_legal_moves();
        if depth == 1 {
            return Ok(moves.len() as u64);
        }
        let mut nodes = 0;
        for next in moves {
            let undo = self.make_move(&next)?;
            let result = self.perft(depth - 1);
            self.unmake_move(undo);
            nodes += result?;
        }
        Ok(nodes)
    }

    /// Perft split by root moves.
    ///
    /// # Errors
    ///
    /// Same as [`Game::perft`].
    pub fn divide(&mut self, depth: Depth) -> Result<Vec<(Move, u64)>, Error> {
        if depth == 0 {
            return Ok(Vec::new());
        }
        let mut result = Vec::new();
        for next in self.generate_legal_moves() {
            let undo = self.make_move(&next)?;
            let nodes = self.perft(depth - 1);
            self.unmake_move(undo);
            result.push((next, nodes?));
        }
        Ok(result)
    }

    /// Perft with move statistics.
    ///
    /// # Errors
    ///
    /// Same as [`Game::perft`].
    pub fn perft_with_stats(&mut self, depth: Depth) -> Result<TestResult, Error> {
        let mut result = TestResult::default();
        if depth == 0 {
            result.nodes = 1;
            return Ok(result);
        }
        for next in self.generate_legal_moves() {
            let undo = self.make_move(&next)?;
            let subtree = if depth == 1 {
                Ok(self.leaf_stats(&undo))
            } else {
                self.perft_with_stats(depth - 1)
            };
            self.unmake_move(undo);
            result += subtree?;
        }
        Ok(result)
    }

    fn leaf_stats(&mut self, undo: &Undo) -> TestResult {
        let checkmate = self.in_check() && !self.has_legal_move(self.side_to_move());
        TestResult {
            nodes: 1,
            captures: u64::from(undo.is_capture()),
            en_passant: u64::from(undo.is_en_passant()),
            castles: u64::from(undo.is_castle()),
            promotions: u64::from(undo.promotion().is_some()),
            checks: u64::from(self.in_check()),
            checkmates: u64::from(checkmate),
        }
    }

    /// Runs [`Game::perft_with_stats`] for every depth up to `max_depth` and
    /// logs each report.
    ///
    /// # Errors
    ///
    /// Same as [`Game::perft`].
    pub fn test_gen_moves(&mut self, max_depth: Depth) -> Result<Vec<TestResult>, Error> {
        (1..=max_depth)
            .map(|depth| {
                let result = self.perft_with_stats(depth)?;
                info!("perft {depth}: {result}");
                Ok(result)
            })
            .collect()
    }
}
