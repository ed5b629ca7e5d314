//! One side's pieces.
//!
//! An [`Army`] owns its [`Figure`]s in a `Vec` whose indices stay stable
//! while the engine probes moves: a captured figure is only hidden during
//! speculative play and is removed for real only when a move is committed.
//! A per-kind tracker keeps the indices of the non-hidden figures of every
//! kind for quick lookups.

use arrayvec::ArrayVec;
use itertools::Itertools;

use crate::chess::board::Board;
use crate::chess::core::{
    CastleSide,
    File,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
};
use crate::chess::piece::Figure;
use crate::error::Error;

/// Maximum number of pieces one player can have on the board.
pub const MAX_PIECES: usize = 16;
/// Pawns never multiply: a player can have at most eight.
pub const MAX_PAWNS: usize = 8;

type Slots = ArrayVec<usize, MAX_PIECES>;

/// Pieces besides the king that matter for dead positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Material {
    BareKing,
    Knight,
    /// A single bishop on the given square.
    Bishop(Square),
    /// Anything else: pawns, heavy pieces or several minor pieces.
    Other,
}

/// Indices of non-hidden figures grouped by [`PieceKind`].
#[derive(Clone, Debug, Default)]
struct PieceTracker {
    slots: [Slots; PieceKind::ALL.len()],
}

impl PieceTracker {
    fn of(&self, kind: PieceKind) -> &[usize] {
        &self.slots[kind.index()]
    }

    fn rebuild(&mut self, figures: &[Figure]) {
        for slots in &mut self.slots {
            slots.clear();
        }
        for (id, figure) in figures.iter().enumerate() {
            if !figure.is_hidden() {
                self.slots[figure.kind().index()].push(id);
            }
        }
    }
}

/// All pieces of one player.
#[derive(Clone, Debug)]
pub struct Army {
    player: Player,
    figures: Vec<Figure>,
    tracker: PieceTracker,
}

impl Army {
    /// Creates an army without any pieces.
    #[must_use]
    pub fn new(player: Player) -> Self {
        Self {
            player,
            figures: Vec::with_capacity(MAX_PIECES),
            tracker: PieceTracker::default(),
        }
    }

    /// The pieces of the player in the standard starting position.
    #[must_use]
    pub fn starting(player: Player) -> Self {
        const BACKRANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut army = Self::new(player);
        for (file, kind) in File::ALL.into_iter().zip(BACKRANK) {
            army.figures.push(Figure::new(
                Piece::new(player, kind),
                Square::new(file, Rank::backrank(player)),
            ));
        }
        for file in File::ALL {
            army.figures.push(Figure::new(
                Piece::new(player, PieceKind::Pawn),
                Square::new(file, Rank::pawns_starting(player)),
            ));
        }
        army.retrack();
        army
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn player(&self) -> Player {
        self.player
    }

    /// Adds a piece, returning its index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvariantViolation`] when the army is already full.
    pub fn add(&mut self, kind: PieceKind, square: Square) -> Result<usize, Error> {
        if self.figures.len() == MAX_PIECES {
            return Err(Error::InvariantViolation(format!(
                "{:?} can not have more than {MAX_PIECES} pieces",
                self.player
            )));
        }
        self.figures
            .push(Figure::new(Piece::new(self.player, kind), square));
        self.retrack();
        Ok(self.figures.len() - 1)
    }

    /// Every figure, including the hidden ones.
    #[must_use]
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Non-hidden figures together with their indices.
    pub fn active(&self) -> impl Iterator<Item = (usize, &Figure)> {
        self.figures
            .iter()
            .enumerate()
            .filter(|(_, figure)| !figure.is_hidden())
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn figure(&self, id: usize) -> &Figure {
        &self.figures[id]
    }

    pub(crate) fn figure_mut(&mut self, id: usize) -> &mut Figure {
        &mut self.figures[id]
    }

    /// Rebuilds the per-kind tracker. Needed whenever a figure changes kind,
    /// disappears or comes back.
    pub(crate) fn retrack(&mut self) {
        self.tracker.rebuild(&self.figures);
    }

    /// Indices of non-hidden figures of the kind.
    #[must_use]
    pub fn of_kind(&self, kind: PieceKind) -> &[usize] {
        self.tracker.of(kind)
    }

    /// Finds the non-hidden figure of the kind standing on the square.
    #[must_use]
    pub fn find(&self, kind: PieceKind, square: Square) -> Option<usize> {
        self.tracker
            .of(kind)
            .iter()
            .copied()
            .find(|id| self.figures[*id].square() == square)
    }

    /// Finds the non-hidden figure standing on the square.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<usize> {
        self.active()
            .find(|(_, figure)| figure.square() == square)
            .map(|(id, _)| id)
    }

    /// Marks the square behind a pawn that has just advanced two squares.
    /// Markers of both armies have to be written before any piece so that a
    /// piece standing on a marked square wins.
    pub fn write_en_passant_to(&self, board: &mut Board) {
        for (_, figure) in self.active() {
            if let Some(target) = figure.en_passant_target() {
                board.mark_en_passant(target);
            }
        }
    }

    /// Writes non-hidden figures to the board.
    pub fn write_pieces_to(&self, board: &mut Board) {
        for (_, figure) in self.active() {
            board.write(figure.piece(), figure.square());
        }
    }

    /// Recomputes coverage of every non-hidden figure.
    pub fn update_coverage(&mut self, board: &Board) {
        for figure in self.figures.iter_mut().filter(|figure| !figure.is_hidden()) {
            figure.update_coverage(board);
        }
    }

    /// Non-hidden figures of the kind whose coverage includes `destination`,
    /// keeping only those standing on the disambiguating file and rank when
    /// these are given.
    pub fn candidates(
        &mut self,
        board: &Board,
        kind: PieceKind,
        destination: Square,
        file: Option<File>,
        rank: Option<Rank>,
    ) -> Vec<usize> {
        self.update_coverage(board);
        self.tracker
            .of(kind)
            .iter()
            .copied()
            .filter(|id| {
                let figure = &self.figures[*id];
                figure.covers(destination)
                    && file.map_or(true, |file| figure.square().file() == file)
                    && rank.map_or(true, |rank| figure.square().rank() == rank)
            })
            .collect()
    }

    /// Resolves SAN to the single figure that can make the move.
    ///
    /// # Errors
    ///
    /// [`Error::NoCandidate`] when nothing can reach the destination and
    /// [`Error::Ambiguous`] when more than one figure can.
    pub fn resolve(
        &mut self,
        board: &Board,
        kind: PieceKind,
        destination: Square,
        file: Option<File>,
        rank: Option<Rank>,
    ) -> Result<usize, Error> {
        let candidates = self.candidates(board, kind, destination, file, rank);
        match candidates.as_slice() {
            [id] => Ok(*id),
            [] => Err(Error::NoCandidate(format!(
                "no {kind:?} can move to {destination}"
            ))),
            _ => Err(Error::Ambiguous(format!(
                "{} {kind:?}s can move to {destination}: {}",
                candidates.len(),
                candidates
                    .iter()
                    .map(|id| self.figures[*id].square())
                    .join(", ")
            ))),
        }
    }

    /// Recomputes the coverage and reports whether any non-hidden figure
    /// attacks the enemy king. This is the check detector for the *other*
    /// player.
    pub fn attacks_enemy_king(&mut self, board: &Board) -> bool {
        self.attacker(board).is_some()
    }

    /// Same as [`Army::attacks_enemy_king`] but returns the first attacker.
    pub fn attacker(&mut self, board: &Board) -> Option<usize> {
        for (id, figure) in self.figures.iter_mut().enumerate() {
            if figure.is_hidden() {
                continue;
            }
            figure.update_coverage(board);
            let piece = figure.piece();
            if figure
                .coverage()
                .iter()
                .any(|square| board.is_enemy_king(piece, *square))
            {
                return Some(id);
            }
        }
        None
    }

    /// Marks the figure on the square inactive without removing it and
    /// returns its index for [`Army::reveal`].
    pub(crate) fn hide(&mut self, square: Square) -> Option<usize> {
        let id = self.at(square)?;
        self.figures[id].hide();
        self.retrack();
        Some(id)
    }

    /// Brings back a figure hidden by [`Army::hide`].
    pub(crate) fn reveal(&mut self, id: usize) {
        self.figures[id].reveal();
        self.retrack();
    }

    /// Removes a captured figure for good.
    pub(crate) fn remove(&mut self, square: Square) -> Option<Figure> {
        let id = self.at(square)?;
        let figure = self.figures.remove(id);
        self.retrack();
        Some(figure)
    }

    /// The non-hidden king.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvariantViolation`] if the army has no king: this
    /// means the board and the armies went out of sync.
    pub fn king(&self) -> Result<&Figure, Error> {
        Ok(&self.figures[self.king_id()?])
    }

    /// Index of the non-hidden king.
    ///
    /// # Errors
    ///
    /// Same as [`Army::king`].
    pub fn king_id(&self) -> Result<usize, Error> {
        match self.tracker.of(PieceKind::King) {
            [id] => Ok(*id),
            ids => Err(Error::InvariantViolation(format!(
                "expected 1 {:?} king, got {}",
                self.player,
                ids.len()
            ))),
        }
    }

    /// The unmoved rook on the corner of the side, if present.
    fn castling_rook(&self, side: CastleSide) -> Option<usize> {
        let corner = Square::new(side.rook_origin(), Rank::backrank(self.player));
        self.find(PieceKind::Rook, corner)
            .filter(|id| !self.figures[*id].has_moved())
    }

    /// The king and the rook of the side have never moved and stand on their
    /// home squares. Does not look at the squares in between.
    #[must_use]
    pub fn has_castle_right(&self, side: CastleSide) -> bool {
        let home = Square::new(File::E, Rank::backrank(self.player));
        let king_ready = self
            .king()
            .is_ok_and(|king| !king.has_moved() && king.square() == home);
        king_ready && self.castling_rook(side).is_some()
    }

    /// Castling rights are always derived from the pieces, never stored:
    /// the king and the rook are unmoved and at home and every square
    /// between them is empty. Safety of the king's path is checked by the
    /// game.
    #[must_use]
    pub fn can_castle(&self, side: CastleSide, board: &Board) -> bool {
        let rank = Rank::backrank(self.player);
        self.has_castle_right(side)
            && side
                .between()
                .iter()
                .all(|file| board.is_empty(Square::new(*file, rank)))
    }

    /// Index of the rook that castling on the side would move.
    pub(crate) fn rook_for(&self, side: CastleSide) -> Option<usize> {
        self.castling_rook(side)
    }

    /// Summarizes what the army has next to its king for deciding whether
    /// checkmate is still possible.
    #[must_use]
    pub fn material(&self) -> Material {
        let count = |kind| self.tracker.of(kind).len();
        if count(PieceKind::Queen) + count(PieceKind::Rook) + count(PieceKind::Pawn) > 0 {
            return Material::Other;
        }
        match (
            self.tracker.of(PieceKind::Bishop),
            self.tracker.of(PieceKind::Knight),
        ) {
            ([], []) => Material::BareKing,
            ([], [_]) => Material::Knight,
            ([bishop], []) => Material::Bishop(self.figures[*bishop].square()),
            _ => Material::Other,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn square(input: &str) -> Square {
        Square::try_from(input).unwrap()
    }

    fn board_of(armies: &[&Army]) -> Board {
        let mut board = Board::empty();
        for army in armies {
            army.write_en_passant_to(&mut board);
        }
        for army in armies {
            army.write_pieces_to(&mut board);
        }
        board
    }

    #[test]
    fn starting_army() {
        let white = Army::starting(Player::White);
        let black = Army::starting(Player::Black);
        assert_eq!(white.figures().len(), MAX_PIECES);
        assert_eq!(white.of_kind(PieceKind::Pawn).len(), 8);
        assert_eq!(black.of_kind(PieceKind::Knight).len(), 2);
        assert_eq!(white.king().unwrap().square(), square("e1"));
        assert_eq!(black.king().unwrap().square(), square("e8"));
        assert_eq!(
            board_of(&[&white, &black]).to_string(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn resolve_unique() {
        let mut white = Army::starting(Player::White);
        let black = Army::starting(Player::Black);
        let board = board_of(&[&white, &black]);
        let id = white
            .resolve(&board, PieceKind::Knight, square("f3"), None, None)
            .unwrap();
        assert_eq!(white.figure(id).square(), square("g1"));
        assert!(matches!(
            white.resolve(&board, PieceKind::Bishop, square("e2"), None, None),
            Err(Error::NoCandidate(_))
        ));
    }

    #[test]
    fn resolve_ambiguous() {
        let mut white = Army::new(Player::White);
        let _ = white.add(PieceKind::King, square("e1")).unwrap();
        let _ = white.add(PieceKind::Rook, square("a1")).unwrap();
        let _ = white.add(PieceKind::Rook, square("h1")).unwrap();
        let _ = white.add(PieceKind::Knight, square("b1")).unwrap();
        let _ = white.add(PieceKind::Knight, square("b5")).unwrap();
        let mut black = Army::new(Player::Black);
        let _ = black.add(PieceKind::King, square("e8")).unwrap();
        let board = board_of(&[&white, &black]);

        assert!(matches!(
            white.resolve(&board, PieceKind::Rook, square("d1"), None, None),
            Err(Error::NoCandidate(_))
        ));
        assert!(matches!(
            white.resolve(&board, PieceKind::Knight, square("c3"), None, None),
            Err(Error::Ambiguous(_))
        ));
        let id = white
            .resolve(&board, PieceKind::Knight, square("c3"), None, Some(Rank::Five))
            .unwrap();
        assert_eq!(white.figure(id).square(), square("b5"));
        let id = white
            .resolve(&board, PieceKind::Rook, square("f1"), Some(File::H), None)
            .unwrap();
        assert_eq!(white.figure(id).square(), square("h1"));
    }

    #[test]
    fn hide_and_reveal() {
        let mut black = Army::starting(Player::Black);
        let id = black.hide(square("d8")).unwrap();
        assert!(black.figure(id).is_hidden());
        assert!(black.of_kind(PieceKind::Queen).is_empty());
        assert_eq!(black.find(PieceKind::Queen, square("d8")), None);
        assert_eq!(black.hide(square("d8")), None);
        assert!(!board_of(&[&black]).to_string().contains('q'));

        black.reveal(id);
        assert_eq!(black.find(PieceKind::Queen, square("d8")), Some(id));
        assert_eq!(black.figures().len(), MAX_PIECES);

        let removed = black.remove(square("d8")).unwrap();
        assert_eq!(removed.kind(), PieceKind::Queen);
        assert_eq!(black.figures().len(), MAX_PIECES - 1);
        assert!(black.of_kind(PieceKind::Queen).is_empty());
    }

    #[test]
    fn check_detection() {
        let mut white = Army::new(Player::White);
        let _ = white.add(PieceKind::King, square("e1")).unwrap();
        let _ = white.add(PieceKind::Bishop, square("b5")).unwrap();
        let mut black = Army::new(Player::Black);
        let _ = black.add(PieceKind::King, square("e8")).unwrap();
        let _ = black.add(PieceKind::Pawn, square("c6")).unwrap();

        assert!(!white.attacks_enemy_king(&board_of(&[&white, &black])));
        let pawn = black.hide(square("c6")).unwrap();
        assert!(white.attacks_enemy_king(&board_of(&[&white, &black])));
        black.reveal(pawn);
        assert!(!white.attacks_enemy_king(&board_of(&[&white, &black])));
    }

    #[test]
    fn castling_rights_are_derived() {
        let mut white = Army::new(Player::White);
        let king = white.add(PieceKind::King, square("e1")).unwrap();
        let _ = white.add(PieceKind::Rook, square("h1")).unwrap();
        let _ = white.add(PieceKind::Rook, square("a1")).unwrap();
        let knight = white.add(PieceKind::Knight, square("b1")).unwrap();
        let board = board_of(&[&white]);

        assert!(white.can_castle(CastleSide::Short, &board));
        assert!(!white.can_castle(CastleSide::Long, &board));
        assert!(white.has_castle_right(CastleSide::Long));

        white.figure_mut(knight).apply_move(square("c3"));
        let board = board_of(&[&white]);
        assert!(white.can_castle(CastleSide::Long, &board));

        white.figure_mut(king).apply_move(square("e2"));
        white.figure_mut(king).apply_move(square("e1"));
        assert!(!white.has_castle_right(CastleSide::Short));
        assert!(!white.can_castle(CastleSide::Long, &board));
    }

    #[test]
    fn material() {
        let mut army = Army::new(Player::Black);
        let _ = army.add(PieceKind::King, square("a8")).unwrap();
        assert_eq!(army.material(), Material::BareKing);
        let _ = army.add(PieceKind::Knight, square("b8")).unwrap();
        assert_eq!(army.material(), Material::Knight);
        let _ = army.add(PieceKind::Bishop, square("c8")).unwrap();
        assert_eq!(army.material(), Material::Other);
        let _ = army.remove(square("b8")).unwrap();
        assert_eq!(army.material(), Material::Bishop(square("c8")));

        let mut army = Army::new(Player::White);
        let _ = army.add(PieceKind::King, square("a1")).unwrap();
        let _ = army.add(PieceKind::Pawn, square("a2")).unwrap();
        assert_eq!(army.material(), Material::Other);
    }
}
