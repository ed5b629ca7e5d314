//! Square-centric [board representation]: an 8x8 grid of cells.
//!
//! The [`Board`] is derived state. It is rebuilt from both
//! [`crate::chess::army::Army`]s by [`crate::chess::game::Game`] before every
//! ply and only answers positional queries; it never decides anything on its
//! own.
//!
//! [board representation]: https://www.chessprogramming.org/Board_Representation

use std::fmt::{self, Write};

use crate::chess::core::{File, Piece, PieceKind, Rank, Square, BOARD_WIDTH};

/// Contents of a single square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    #[allow(missing_docs)]
    Empty,
    /// The square a pawn has just passed through when advancing two squares.
    /// It is empty for every purpose except pawn captures.
    EnPassant,
    #[allow(missing_docs)]
    Occupied(Piece),
}

/// 8x8 grid indexed by rank, then file.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
        }
    }

    /// Wipes every cell, including the en passant marker.
    pub fn clear_all(&mut self) {
        *self = Self::empty();
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn at(&self, square: Square) -> Cell {
        self.cells[square.rank().index()][square.file().index()]
    }

    fn cell_mut(&mut self, square: Square) -> &mut Cell {
        &mut self.cells[square.rank().index()][square.file().index()]
    }

    /// Puts the piece on the square, replacing whatever was there.
    pub fn write(&mut self, piece: Piece, square: Square) {
        *self.cell_mut(square) = Cell::Occupied(piece);
    }

    #[allow(missing_docs)]
    pub fn clear(&mut self, square: Square) {
        *self.cell_mut(square) = Cell::Empty;
    }

    /// Marks the square as the en passant target. At most one such square
    /// exists: any previous marker is cleared first.
    pub fn mark_en_passant(&mut self, square: Square) {
        self.clear_en_passant();
        *self.cell_mut(square) = Cell::EnPassant;
    }

    #[allow(missing_docs)]
    pub fn clear_en_passant(&mut self) {
        if let Some(square) = self.en_passant_square() {
            self.clear(square);
        }
    }

    /// Returns the square holding the en passant marker, if any.
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        Square::iter().find(|square| self.at(*square) == Cell::EnPassant)
    }

    /// Returns the piece standing on the square.
    #[must_use]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        match self.at(square) {
            Cell::Occupied(piece) => Some(piece),
            Cell::Empty | Cell::EnPassant => None,
        }
    }

    /// Empty squares and the en passant square are both "empty" for moving
    /// pieces.
    #[must_use]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_en_passant(&self, square: Square) -> bool {
        self.at(square) == Cell::EnPassant
    }

    /// The square holds a piece of the same color as `piece`.
    #[must_use]
    pub fn is_friendly(&self, piece: Piece, square: Square) -> bool {
        self.piece_at(square)
            .is_some_and(|other| other.owner == piece.owner)
    }

    /// The square holds a piece of the opposite color to `piece`.
    #[must_use]
    pub fn is_enemy(&self, piece: Piece, square: Square) -> bool {
        self.piece_at(square)
            .is_some_and(|other| other.owner != piece.owner)
    }

    /// The square holds the king of the opposite color to `piece`.
    #[must_use]
    pub fn is_enemy_king(&self, piece: Piece, square: Square) -> bool {
        self.piece_at(square)
            .is_some_and(|other| other.owner != piece.owner && other.kind == PieceKind::King)
    }

    /// Number of squares holding exactly this piece.
    #[must_use]
    pub fn count(&self, piece: Piece) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Cell::Occupied(piece))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Board {
    /// Dumps the board in Forsyth-Edwards Notation (piece placement only).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, rank) in Rank::ALL.iter().rev().enumerate() {
            if index != 0 {
                f.write_char('/')?;
            }
            let mut empty_squares = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, *rank)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{piece}")?;
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, '!' for en
    /// passant target, FEN algebraic symbol for piece) a-la Stockfish "debug"
    /// command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            for file in File::ALL {
                let symbol = match self.at(Square::new(file, *rank)) {
                    Cell::Empty => '.',
                    Cell::EnPassant => '!',
                    Cell::Occupied(piece) => piece.symbol(),
                };
                f.write_char(symbol)?;
                if file != File::H {
                    f.write_char(' ')?;
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Player;

    fn square(input: &str) -> Square {
        Square::try_from(input).unwrap()
    }

    #[test]
    fn friendliness() {
        let mut board = Board::empty();
        let white_rook = Piece::new(Player::White, PieceKind::Rook);
        let black_king = Piece::new(Player::Black, PieceKind::King);
        let black_pawn = Piece::new(Player::Black, PieceKind::Pawn);
        board.write(white_rook, square("a1"));
        board.write(black_king, square("e8"));
        board.write(black_pawn, square("d5"));

        assert!(board.is_friendly(white_rook, square("a1")));
        assert!(!board.is_enemy(white_rook, square("a1")));
        assert!(board.is_enemy(white_rook, square("d5")));
        assert!(!board.is_enemy_king(white_rook, square("d5")));
        assert!(board.is_enemy_king(white_rook, square("e8")));
        assert!(!board.is_enemy_king(black_pawn, square("e8")));
        assert!(board.is_empty(square("e4")));
        assert!(!board.is_friendly(white_rook, square("e4")));
        assert!(!board.is_enemy(white_rook, square("e4")));

        board.clear(square("d5"));
        assert!(board.is_empty(square("d5")));
    }

    #[test]
    fn single_en_passant_marker() {
        let mut board = Board::empty();
        assert_eq!(board.en_passant_square(), None);
        board.mark_en_passant(square("e3"));
        assert_eq!(board.en_passant_square(), Some(square("e3")));
        assert!(board.is_empty(square("e3")));
        assert!(board.is_en_passant(square("e3")));

        board.mark_en_passant(square("d6"));
        assert_eq!(board.en_passant_square(), Some(square("d6")));
        assert!(!board.is_en_passant(square("e3")));

        board.clear_en_passant();
        assert_eq!(board.en_passant_square(), None);
    }

    #[test]
    fn count_and_dump() {
        let mut board = Board::empty();
        let white_pawn = Piece::new(Player::White, PieceKind::Pawn);
        for file in File::ALL {
            board.write(white_pawn, Square::new(file, Rank::Two));
        }
        board.write(Piece::new(Player::White, PieceKind::King), square("e1"));
        board.write(Piece::new(Player::Black, PieceKind::King), square("e8"));
        board.mark_en_passant(square("c6"));

        assert_eq!(board.count(white_pawn), 8);
        assert_eq!(board.count(Piece::new(Player::Black, PieceKind::Pawn)), 0);
        assert_eq!(board.to_string(), "4k3/8/8/8/8/8/PPPPPPPP/4K3");
        assert_eq!(
            format!("{board:?}"),
            ". . . . k . . .\n\
             . . . . . . . .\n\
             . . ! . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             . . . . K . . .\n"
        );
    }
}
