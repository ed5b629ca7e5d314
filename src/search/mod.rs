//! Fixed-depth search over legal moves.
//!
//! The root keeps every move that reaches the best score so that the caller
//! can choose among equally good moves (see
//! [`crate::chess::game::Game::computer_move`]).

use std::cmp::Ordering;

use log::debug;

use crate::chess::core::Move;
use crate::chess::game::Game;
use crate::error::Error;
use crate::evaluation::Score;

mod minimax;

/// Search depth in plies.
pub type Depth = u8;

/// Outcome of [`search`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// Score of the best moves from the perspective of the side to move.
    pub score: Score,
    /// Every root move reaching [`SearchResult::score`], in generation order.
    /// Empty when there are no legal moves.
    pub best_moves: Vec<Move>,
    /// Number of positions visited.
    pub nodes: u64,
}

/// Searches `depth` plies (at least one) and returns all the best root moves.
///
/// # Errors
///
/// Propagates [`Error::InvariantViolation`] from playing moves; the game is
/// restored before returning.
pub fn search(game: &mut Game, depth: Depth) -> Result<SearchResult, Error> {
    let depth = depth.max(1);
    let mut nodes = 1;
    let mut score = -Score::INFINITY;
    let mut best_moves = Vec::new();
    for next in game.generate_legal_moves() {
        // Ties with the best score have to be exact, everything worse may be
        // cut off.
        let alpha = if best_moves.is_empty() {
            -Score::INFINITY
        } else {
            score.below()
        };
        let undo = game.make_move(&next)?;
        let result = minimax::negamax(game, depth - 1, -Score::INFINITY, -alpha, 1, &mut nodes);
        game.unmake_move(undo);
        let candidate = -result?;
        match candidate.cmp(&score) {
            Ordering::Greater => {
                score = candidate;
                best_moves.clear();
                best_moves.push(next);
            },
            Ordering::Equal => best_moves.push(next),
            Ordering::Less => {},
        }
    }
    if best_moves.is_empty() {
        score = if game.in_check() {
            -Score::mate(0)
        } else {
            Score::DRAW
        };
    }
    debug!("searched {nodes} nodes at depth {depth}: {score}");
    Ok(SearchResult {
        score,
        best_moves,
        nodes,
    })
}
