//! Pieces owned by an [`crate::chess::army::Army`] and their movement rules.
//!
//! Every [`Figure`] computes its own "coverage": the squares it could move to
//! from its current square given the occupancy of the [`Board`], ignoring
//! whether the move would leave its own king in check. Filtering out such
//! moves is the job of the legality oracle in [`crate::chess::game`].

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square};

/// Upper bound on the number of squares a single piece covers (a queen in the
/// center of an empty board).
pub const MAX_COVERAGE: usize = 27;

#[allow(missing_docs)]
pub type Coverage = ArrayVec<Square, MAX_COVERAGE>;

const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ADJACENT: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Piece kind together with the movement history the rules care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    #[allow(missing_docs)]
    King { has_moved: bool },
    #[allow(missing_docs)]
    Queen,
    #[allow(missing_docs)]
    Rook { has_moved: bool },
    #[allow(missing_docs)]
    Bishop,
    #[allow(missing_docs)]
    Knight,
    /// `en_passant` is set right after the pawn advanced two squares and until
    /// the opponent's reply.
    Pawn { en_passant: bool },
}

impl Role {
    /// Fresh role for a piece that has not moved yet.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        match kind {
            PieceKind::King => Self::King { has_moved: false },
            PieceKind::Queen => Self::Queen,
            PieceKind::Rook => Self::Rook { has_moved: false },
            PieceKind::Bishop => Self::Bishop,
            PieceKind::Knight => Self::Knight,
            PieceKind::Pawn => Self::Pawn { en_passant: false },
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self {
            Self::King { .. } => PieceKind::King,
            Self::Queen => PieceKind::Queen,
            Self::Rook { .. } => PieceKind::Rook,
            Self::Bishop => PieceKind::Bishop,
            Self::Knight => PieceKind::Knight,
            Self::Pawn { .. } => PieceKind::Pawn,
        }
    }
}

/// A piece on the board: owner, role, square, coverage and the "hidden" flag
/// used for reversible captures while probing.
#[derive(Clone, Debug)]
pub struct Figure {
    owner: Player,
    role: Role,
    square: Square,
    hidden: bool,
    coverage: Coverage,
}

impl Figure {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(piece: Piece, square: Square) -> Self {
        Self {
            owner: piece.owner,
            role: Role::new(piece.kind),
            square,
            hidden: false,
            coverage: Coverage::new(),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn piece(&self) -> Piece {
        Piece::new(self.owner, self.role.kind())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.role.kind()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Restores a role saved before a speculative move.
    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub(crate) fn hide(&mut self) {
        self.hidden = true;
    }

    pub(crate) fn reveal(&mut self) {
        self.hidden = false;
    }

    /// Kings and rooks remember whether they have ever moved. Other pieces
    /// report `false`.
    #[must_use]
    pub const fn has_moved(&self) -> bool {
        match self.role {
            Role::King { has_moved } | Role::Rook { has_moved } => has_moved,
            _ => false,
        }
    }

    /// Overrides the movement flag of a king or a rook. Used when loading a
    /// position where castling rights come from FEN.
    pub(crate) fn set_has_moved(&mut self, moved: bool) {
        match &mut self.role {
            Role::King { has_moved } | Role::Rook { has_moved } => *has_moved = moved,
            _ => {},
        }
    }

    /// The pawn has just advanced two squares and can be captured en passant.
    #[must_use]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.role, Role::Pawn { en_passant: true })
    }

    pub(crate) fn set_en_passant(&mut self, value: bool) {
        if let Role::Pawn { en_passant } = &mut self.role {
            *en_passant = value;
        }
    }

    /// The square this pawn has passed through on its double push.
    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        if !self.is_en_passant() {
            return None;
        }
        self.square.offset(0, -self.owner.push_direction())
    }

    /// Moves the figure without touching any of its flags. The legality
    /// oracle uses this to try a square and come back.
    pub(crate) fn relocate(&mut self, to: Square) {
        self.square = to;
    }

    /// Moves the figure and records the consequences for the rules: kings and
    /// rooks lose their castling ability and a pawn advancing two squares
    /// becomes capturable en passant.
    pub(crate) fn apply_move(&mut self, to: Square) {
        let from = self.square;
        self.square = to;
        match &mut self.role {
            Role::King { has_moved } | Role::Rook { has_moved } => *has_moved = true,
            Role::Pawn { en_passant } => {
                *en_passant = from.rank().index().abs_diff(to.rank().index()) == 2;
            },
            Role::Queen | Role::Bishop | Role::Knight => {},
        }
    }

    /// Replaces a pawn that reached the last rank.
    pub(crate) fn promote(&mut self, kind: PieceKind) {
        debug_assert_eq!(self.kind(), PieceKind::Pawn);
        self.role = match Role::new(kind) {
            Role::Rook { .. } => Role::Rook { has_moved: true },
            role => role,
        };
    }

    /// Pseudo-legal destinations computed by the last
    /// [`Figure::update_coverage`].
    #[must_use]
    pub fn coverage(&self) -> &[Square] {
        &self.coverage
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn covers(&self, square: Square) -> bool {
        self.coverage.contains(&square)
    }

    /// Recomputes the coverage from the current square and board occupancy.
    pub fn update_coverage(&mut self, board: &Board) {
        self.coverage.clear();
        let piece = self.piece();
        let from = self.square;
        match self.role {
            Role::Queen => {
                slide(board, piece, from, &ORTHOGONAL, &mut self.coverage);
                slide(board, piece, from, &DIAGONAL, &mut self.coverage);
            },
            Role::Rook { .. } => slide(board, piece, from, &ORTHOGONAL, &mut self.coverage),
            Role::Bishop => slide(board, piece, from, &DIAGONAL, &mut self.coverage),
            Role::Knight => step(board, piece, from, &KNIGHT_JUMPS, &mut self.coverage),
            Role::King { has_moved } => {
                step(board, piece, from, &ADJACENT, &mut self.coverage);
                if !has_moved {
                    castling_destinations(board, piece, from, &mut self.coverage);
                }
            },
            Role::Pawn { .. } => pawn(board, piece, from, &mut self.coverage),
        }
    }
}

/// Casts a ray in each direction until the edge, stopping before a friendly
/// piece and on an enemy one.
fn slide(board: &Board, piece: Piece, from: Square, directions: &[(i8, i8)], coverage: &mut Coverage) {
    for (files, ranks) in directions {
        let mut current = from;
        while let Some(next) = current.offset(*files, *ranks) {
            if board.is_friendly(piece, next) {
                break;
            }
            coverage.push(next);
            if board.is_enemy(piece, next) {
                break;
            }
            current = next;
        }
    }
}

fn step(board: &Board, piece: Piece, from: Square, offsets: &[(i8, i8)], coverage: &mut Coverage) {
    coverage.extend(
        offsets
            .iter()
            .filter_map(|(files, ranks)| from.offset(*files, *ranks))
            .filter(|square| !board.is_friendly(piece, *square)),
    );
}

/// The king offers the squares two files away on its home rank. Whether the
/// castling is actually allowed is decided by the game.
fn castling_destinations(board: &Board, piece: Piece, from: Square, coverage: &mut Coverage) {
    if from.file() != File::E || from.rank() != Rank::backrank(piece.owner) {
        return;
    }
    for files in [-2, 2] {
        if let Some(destination) = from.offset(files, 0) {
            if board.is_empty(destination) {
                coverage.push(destination);
            }
        }
    }
}

fn pawn(board: &Board, piece: Piece, from: Square, coverage: &mut Coverage) {
    let forward = piece.owner.push_direction();
    if let Some(single) = from.offset(0, forward) {
        if board.is_empty(single) {
            coverage.push(single);
            if from.rank() == Rank::pawns_starting(piece.owner) {
                if let Some(double) = single.offset(0, forward) {
                    if board.is_empty(double) {
                        coverage.push(double);
                    }
                }
            }
        }
    }
    for files in [-1, 1] {
        if let Some(target) = from.offset(files, forward) {
            if board.is_enemy(piece, target) || board.is_en_passant(target) {
                coverage.push(target);
            }
        }
    }
}
