//! Provides a very basic implementation of evaluation based on material
//! advantage using "[standard piece valuations]".
//!
//! While not very useful in practice, this evaluation function is great for
//! testing search and other infrastructure, because it is stable (will not
//! change because of the fixed piece "values"), easy to understand and
//! deterministic.
//!
//! [standard piece valuations]: https://en.wikipedia.org/wiki/Chess_piece_relative_value

use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player};
use crate::chess::game::Game;
use crate::evaluation::{Score, Value};

/// Standard value of the piece kind. The king is priceless and never counted.
#[must_use]
pub const fn piece_value(kind: PieceKind) -> Value {
    match kind {
        PieceKind::King => 0,
        PieceKind::Queen => 900,
        PieceKind::Rook => 500,
        PieceKind::Bishop | PieceKind::Knight => 300,
        PieceKind::Pawn => 100,
    }
}

fn player_value(board: &Board, player: Player) -> Value {
    PieceKind::ALL
        .into_iter()
        .map(|kind| {
            let count = Value::try_from(board.count(Piece::new(player, kind))).unwrap_or(0);
            piece_value(kind) * count
        })
        .sum()
}

/// White's material minus Black's material.
#[must_use]
pub fn material_advantage(board: &Board) -> Value {
    player_value(board, Player::White) - player_value(board, Player::Black)
}

/// Material advantage from the perspective of the side to move.
#[must_use]
pub fn evaluate(game: &Game) -> Score {
    let advantage = material_advantage(game.board());
    Score::cp(match game.side_to_move() {
        Player::White => advantage,
        Player::Black => -advantage,
    })
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_position() {
        assert_eq!(material_advantage(Game::new().board()), 0);
        assert_eq!(evaluate(&Game::new()), Score::DRAW);
    }

    #[test]
    fn white_advantage() {
        let game =
            Game::from_fen("rnb1kbnr/ppp2p1p/6p1/3pN1B1/3P4/2N5/PPP1PPPP/R2QKB1R b KQkq - 0 5")
                .unwrap();
        assert_eq!(material_advantage(game.board()), 1000);
        assert_eq!(evaluate(&game), Score::cp(-1000));
    }

    #[test]
    fn black_advantage() {
        let game = Game::from_fen("rn1qkbnr/ppp1pppp/8/8/2BP4/4P3/PP3PPP/RbBQK1NR w KQkq - 0 5")
            .unwrap();
        assert_eq!(material_advantage(game.board()), -300);
        assert_eq!(evaluate(&game), Score::cp(-300));
    }
}
