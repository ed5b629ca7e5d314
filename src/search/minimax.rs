//! Implementation of [Minimax] algorithm with [Negamax] and [Alpha-Beta
//! pruning] extensions.
//!
//! [Minimax]: https://en.wikipedia.org/wiki/Minimax
//! [Negamax]: https://en.wikipedia.org/wiki/Negamax
//! [Alpha-Beta pruning]: https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

use crate::chess::game::Game;
use crate::error::Error;
use crate::evaluation::{material, Score};
use crate::search::Depth;

/// Scores the position from the perspective of the side to move. `ply` is the
/// distance from the root and makes quicker mates score higher.
pub(super) fn negamax(
    game: &mut Game,
    depth: Depth,
    mut alpha: Score,
    beta: Score,
    ply: u8,
    nodes: &mut u64,
) -> Result<Score, Error> {
    *nodes += 1;
    let moves = game.generate_legal_moves();
    if moves.is_empty() {
        return Ok(if game.in_check() {
            -Score::mate(ply)
        } else {
            Score::DRAW
        });
    }
    if game.is_insufficient_material() {
        return Ok(Score::DRAW);
    }
    if depth == 0 {
        return Ok(material::evaluate(game));
    }
    let mut best = -Score::INFINITY;
    for next in moves {
        let undo = game.make_move(&next)?;
        let result = negamax(game, depth - 1, -beta, -alpha, ply.saturating_add(1), nodes);
        game.unmake_move(undo);
        let score = -result?;
        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    Ok(best)
}
