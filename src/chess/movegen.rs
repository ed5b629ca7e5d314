//! Move generation on top of figure coverage.
//!
//! Pseudo-legal moves are simply the coverage of every figure of the side to
//! move. Legal moves are the pseudo-legal ones that pass the legality oracle
//! ([`Game::handle_check`]), which plays each move on the board and asks the
//! opponent whether the king can be taken.

use crate::chess::core::{Move, Piece, PieceKind, Player, Promotion, Rank, Square};
use crate::chess::game::Game;

/// Pushes `from` -> `to`, expanding pawn moves to the last rank into the four
/// promotions.
fn push_move(moves: &mut Vec<Move>, piece: Piece, from: Square, to: Square) {
    if piece.kind == PieceKind::Pawn && to.rank() == Rank::promotion(piece.owner) {
        moves.extend(
            Promotion::ALL
                .into_iter()
                .map(|promotion| Move::new(piece, from, to, Some(promotion))),
        );
    } else {
        moves.push(Move::new(piece, from, to, None));
    }
}

impl Game {
    /// Figure indices and destinations covered by `player`'s figures.
    fn candidates(&mut self, player: Player) -> Vec<(usize, Square)> {
        let (board, army) = self.split(player);
        army.update_coverage(board);
        army.active()
            .flat_map(|(id, figure)| figure.coverage().iter().map(move |to| (id, *to)))
            .collect()
    }

    /// Moves of the side to move that follow piece movement rules but may
    /// leave the king in check. Castling destinations are included whenever
    /// the king has not moved, rights are not checked.
    #[must_use]
    pub fn generate_moves(&mut self) -> Vec<Move> {
        let player = self.side_to_move();
        let mut moves = Vec::new();
        for (id, to) in self.candidates(player) {
            let figure = self.army(player).figure(id);
            push_move(&mut moves, figure.piece(), figure.square(), to);
        }
        moves
    }

    /// All legal moves of the side to move. Promotions come in all four
    /// flavors.
    #[must_use]
    pub fn generate_legal_moves(&mut self) -> Vec<Move> {
        let player = self.side_to_move();
        let mut moves = Vec::new();
        for (id, to) in self.candidates(player) {
            if self.handle_check(player, id, to) {
                let figure = self.army(player).figure(id);
                push_move(&mut moves, figure.piece(), figure.square(), to);
            }
        }
        moves
    }

    /// Stops at the first legal move of `player`. Cheaper than generating all
    /// of them when only checkmate and stalemate matter.
    pub fn has_legal_move(&mut self, player: Player) -> bool {
        self.candidates(player)
            .into_iter()
            .any(|(id, to)| self.handle_check(player, id, to))
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn legal_moves(fen: &str) -> Vec<String> {
        let mut game = Game::from_fen(fen).unwrap();
        game.generate_legal_moves()
            .iter()
            .map(Move::to_string)
            .sorted()
            .collect()
    }

    fn sorted(moves: &[&str]) -> Vec<String> {
        moves.iter().map(|m| (*m).to_string()).sorted().collect()
    }

    #[test]
    fn starting_moves() {
        let mut game = Game::new();
        assert_eq!(game.generate_moves().len(), 20);
        assert_eq!(
            legal_moves("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            sorted(&[
                "a2a3", "a2a4", "b1a3", "b1c3", "b2b3", "b2b4", "c2c3", "c2c4", "d2d3", "d2d4",
                "e2e3", "e2e4", "f2f3", "f2f4", "g1f3", "g1h3", "g2g3", "g2g4", "h2h3", "h2h4",
            ])
        );
    }

    #[test]
    fn promotions_expand() {
        assert_eq!(
            legal_moves("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1"),
            sorted(&[
                "b7b8q", "b7b8r", "b7b8b", "b7b8n", "e1d1", "e1d2", "e1e2", "e1f1", "e1f2",
            ])
        );
    }

    #[test]
    fn pseudo_legal_includes_suicide() {
        let mut game = Game::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").unwrap();
        let pseudo = game.generate_moves().len();
        let legal = game.generate_legal_moves();
        assert!(pseudo > legal.len());
        assert_eq!(
            legal.iter().map(Move::to_string).sorted().collect_vec(),
            sorted(&["e1d2", "e1f1"])
        );
    }

    #[test]
    fn castling_requires_safe_path() {
        // The rook on f8 attacks f1: short castling would pass through check.
        assert_eq!(
            legal_moves("5r1k/8/8/8/8/8/8/R3K2R w KQ - 0 1")
                .into_iter()
                .filter(|m| m.starts_with("e1"))
                .collect_vec(),
            sorted(&["e1c1", "e1d1", "e1d2", "e1e2"])
        );
        // In check: no castling at all.
        assert!(!legal_moves("4r2k/8/8/8/8/8/8/R3K2R w KQ - 0 1")
            .iter()
            .any(|m| m == "e1g1" || m == "e1c1"));
        // b1 may be attacked when castling long.
        assert!(legal_moves("1r5k/8/8/8/8/8/8/R3K2R w KQ - 0 1").contains(&"e1c1".to_string()));
    }

    #[test]
    fn has_legal_move_detects_mate() {
        let mut game = Game::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(!game.has_legal_move(Player::Black));
        assert!(game.has_legal_move(Player::White));
        assert!(game.generate_legal_moves().is_empty());
    }
}
