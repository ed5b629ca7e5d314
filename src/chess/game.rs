//! [`Game`] ties both armies and the board together: it keeps the turn order,
//! decides which moves are legal, plays and takes back moves and tracks how
//! the game ends.
//!
//! Legality is decided by trying the move: the piece is relocated, the
//! captured figure is hidden, the board is rebuilt and the opponent's army is
//! asked whether it attacks the king. Everything is put back before the
//! answer is returned.

use std::fmt;

use arrayvec::ArrayVec;
use itertools::Itertools;
use log::{debug, info, warn};
use rand::Rng;

use crate::chess::army::{Army, Material, MAX_PAWNS};
use crate::chess::board::Board;
use crate::chess::core::{
    CastleSide,
    File,
    Move,
    Piece,
    PieceKind,
    Player,
    Promotion,
    Rank,
    Square,
};
use crate::chess::notation::{self, Notation};
use crate::chess::piece::Role;
use crate::error::Error;
use crate::search::{self, Depth};

/// How the game stands after the last committed move.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Ongoing,
    Checkmate { winner: Player },
    Stalemate,
    /// Neither side has enough material to checkmate.
    Draw,
    Resignation { winner: Player },
}

impl Status {
    /// Any status other than [`Status::Ongoing`] is final.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    /// Result in PGN form.
    #[must_use]
    pub const fn result(self) -> &'static str {
        match self {
            Self::Ongoing => "*",
            Self::Checkmate {
                winner: Player::White,
            }
            | Self::Resignation {
                winner: Player::White,
            } => "1-0",
            Self::Checkmate {
                winner: Player::Black,
            }
            | Self::Resignation {
                winner: Player::Black,
            } => "0-1",
            Self::Stalemate | Self::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => return f.write_str("ongoing"),
            Self::Checkmate { winner } => write!(f, "{winner:?} wins by checkmate")?,
            Self::Stalemate => f.write_str("draw by stalemate")?,
            Self::Draw => f.write_str("draw by insufficient material")?,
            Self::Resignation { winner } => write!(f, "{winner:?} wins by resignation")?,
        }
        write!(f, " ({})", self.result())
    }
}

/// A committed move as it goes into the game history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    /// Full-move number the move was played at.
    pub number: u16,
    /// The move itself, with the promotion filled in when a pawn reached the
    /// last rank.
    pub played: Move,
    /// Disambiguating file needed to tell the piece apart in SAN.
    pub file: Option<File>,
    /// Disambiguating rank needed to tell the piece apart in SAN.
    pub rank: Option<Rank>,
    #[allow(missing_docs)]
    pub capture: bool,
    #[allow(missing_docs)]
    pub check: bool,
    #[allow(missing_docs)]
    pub checkmate: bool,
}

impl fmt::Display for Record {
    /// Writes the move in SAN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let played = &self.played;
        if let Some(side) = played.castle_side() {
            f.write_str(side.san())?;
        } else {
            let kind = played.piece.kind;
            if kind == PieceKind::Pawn {
                if self.capture {
                    write!(f, "{}", played.from.file())?;
                }
            } else {
                write!(f, "{}", Piece::new(Player::White, kind))?;
                if let Some(file) = self.file {
                    write!(f, "{file}")?;
                }
                if let Some(rank) = self.rank {
                    write!(f, "{rank}")?;
                }
            }
            if self.capture {
                f.write_str("x")?;
            }
            write!(f, "{}", played.to)?;
            if let Some(promotion) = played.promotion {
                write!(f, "={}", Piece::new(Player::White, promotion.into()))?;
            }
        }
        if self.checkmate {
            f.write_str("#")?;
        } else if self.check {
            f.write_str("+")?;
        }
        Ok(())
    }
}

/// Everything [`Game::unmake_move`] needs to restore the position that was
/// there before [`Game::make_move`].
#[derive(Clone, Debug)]
#[must_use]
pub struct Undo {
    played: Move,
    id: usize,
    role: Role,
    rook: Option<(usize, Square, Role)>,
    captured: Option<usize>,
    capture: bool,
    en_passant: bool,
    promotion: Option<Promotion>,
    cleared: ArrayVec<usize, MAX_PAWNS>,
    in_check: bool,
}

impl Undo {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.capture
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_castle(&self) -> bool {
        self.rook.is_some()
    }

    /// The piece the pawn was promoted to.
    #[must_use]
    pub const fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }
}

/// State of a single game: both armies, the board derived from them, whose
/// turn it is and the history of committed moves.
#[derive(Clone)]
pub struct Game {
    board: Board,
    white: Army,
    black: Army,
    side_to_move: Player,
    in_check: bool,
    status: Status,
    fullmove: u16,
    history: Vec<Record>,
}

impl Game {
    /// Creates the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_armies(
            Army::starting(Player::White),
            Army::starting(Player::Black),
            Player::White,
            1,
        )
    }

    /// Assembles a game from already validated armies. The status is left
    /// [`Status::Ongoing`]: callers loading arbitrary positions refresh it
    /// with [`Game::refresh_status`].
    pub(crate) fn from_armies(white: Army, black: Army, side_to_move: Player, fullmove: u16) -> Self {
        let mut game = Self {
            board: Board::empty(),
            white,
            black,
            side_to_move,
            in_check: false,
            status: Status::Ongoing,
            fullmove,
            history: Vec::new(),
        };
        game.rebuild();
        game.in_check = game.is_king_attacked(side_to_move);
        game
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn army(&self, player: Player) -> &Army {
        match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }

    pub(crate) fn army_mut(&mut self, player: Player) -> &mut Army {
        match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }

    /// The army of `player` and the army of its opponent.
    fn armies_mut(&mut self, player: Player) -> (&mut Army, &mut Army) {
        match player {
            Player::White => (&mut self.white, &mut self.black),
            Player::Black => (&mut self.black, &mut self.white),
        }
    }

    /// The board together with the army of `player`, for coverage queries.
    pub(crate) fn split(&mut self, player: Player) -> (&Board, &mut Army) {
        let army = match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        };
        (&self.board, army)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// The side to move is in check.
    #[must_use]
    pub const fn in_check(&self) -> bool {
        self.in_check
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn fullmove_number(&self) -> u16 {
        self.fullmove
    }

    /// Committed moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn last_move(&self) -> Option<&Record> {
        self.history.last()
    }

    /// Writes both armies to the board from scratch. En passant markers go
    /// first so that they never shadow a piece.
    pub(crate) fn rebuild(&mut self) {
        self.board.clear_all();
        self.white.write_en_passant_to(&mut self.board);
        self.black.write_en_passant_to(&mut self.board);
        self.white.write_pieces_to(&mut self.board);
        self.black.write_pieces_to(&mut self.board);
    }

    /// The opponent of `player` attacks `player`'s king on the current board.
    pub(crate) fn is_king_attacked(&mut self, player: Player) -> bool {
        let board = &self.board;
        let attackers = match player {
            Player::White => &mut self.black,
            Player::Black => &mut self.white,
        };
        attackers.attacks_enemy_king(board)
    }

    /// Neither side can ever deliver checkmate: bare kings, a single minor
    /// piece against a bare king or bishops of the same colour on both sides.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        match (self.white.material(), self.black.material()) {
            (Material::BareKing, Material::BareKing | Material::Knight | Material::Bishop(_))
            | (Material::Knight | Material::Bishop(_), Material::BareKing) => true,
            (Material::Bishop(white), Material::Bishop(black)) => {
                white.is_light() == black.is_light()
            },
            _ => false,
        }
    }

    /// Square of the piece `played` would capture: the target itself or, for
    /// en passant, the pawn behind it.
    fn capture_square(&self, played: &Move) -> Option<Square> {
        if self.board.is_enemy(played.piece, played.to) {
            return Some(played.to);
        }
        if played.piece.kind == PieceKind::Pawn
            && played.from.file() != played.to.file()
            && self.board.is_en_passant(played.to)
        {
            return Some(Square::new(played.to.file(), played.from.rank()));
        }
        None
    }

    /// Decides whether moving figure `id` of `player` to `to` leaves its king
    /// safe. Castling additionally needs the castling right and a king path
    /// that is never attacked, the start and destination squares included.
    ///
    /// The position is the same before and after the call.
    pub(crate) fn handle_check(&mut self, player: Player, id: usize, to: Square) -> bool {
        let figure = self.army(player).figure(id);
        let candidate = Move::new(figure.piece(), figure.square(), to, None);
        match candidate.castle_side() {
            Some(side) => {
                self.army(player).can_castle(side, &self.board)
                    && self.is_castling_safe(player, id, side)
            },
            None => self.is_move_safe(player, id, &candidate),
        }
    }

    fn is_move_safe(&mut self, player: Player, id: usize, candidate: &Move) -> bool {
        let captured = self.capture_square(candidate);
        let (mover, opponent) = self.armies_mut(player);
        mover.figure_mut(id).relocate(candidate.to);
        let hidden = captured.and_then(|square| opponent.hide(square));
        self.rebuild();

        let attacked = self.is_king_attacked(player);

        let (mover, opponent) = self.armies_mut(player);
        mover.figure_mut(id).relocate(candidate.from);
        if let Some(hidden) = hidden {
            opponent.reveal(hidden);
        }
        self.rebuild();
        !attacked
    }

    fn is_castling_safe(&mut self, player: Player, id: usize, side: CastleSide) -> bool {
        let home = self.army(player).figure(id).square();
        let mut attacked = false;
        for file in side.king_walk() {
            self.army_mut(player)
                .figure_mut(id)
                .relocate(Square::new(*file, home.rank()));
            self.rebuild();
            if self.is_king_attacked(player) {
                attacked = true;
                break;
            }
        }
        self.army_mut(player).figure_mut(id).relocate(home);
        self.rebuild();
        !attacked
    }

    /// Checks a move coming from outside of the move generator: the piece has
    /// to be there, reach the target and leave its king safe. Pawns reaching
    /// the last rank without a promotion piece become queens.
    pub fn is_legal(&mut self, played: &Move) -> bool {
        let player = played.piece.owner;
        if player != self.side_to_move {
            return false;
        }
        let Some(id) = self.army(player).find(played.piece.kind, played.from) else {
            return false;
        };
        let promotes = played.piece.kind == PieceKind::Pawn
            && played.to.rank() == Rank::promotion(player);
        if played.promotion.is_some() && !promotes {
            return false;
        }
        let (board, army) = self.split(player);
        let figure = army.figure_mut(id);
        figure.update_coverage(board);
        figure.covers(played.to) && self.handle_check(player, id, played.to)
    }

    /// Plays a legal move speculatively. Captured figures are only hidden,
    /// so [`Game::unmake_move`] with the returned [`Undo`] restores the exact
    /// previous position. History and status are not touched.
    ///
    /// The move has to be legal, e.g. produced by
    /// [`Game::generate_legal_moves`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvariantViolation`] when the move does not match the
    /// position. The game is left unchanged in that case.
    pub fn make_move(&mut self, played: &Move) -> Result<Undo, Error> {
        self.apply(played, true)
    }

    /// Takes back a move played by [`Game::make_move`].
    pub fn unmake_move(&mut self, undo: Undo) {
        let player = undo.played.piece.owner;
        let (mover, opponent) = self.armies_mut(player);
        let figure = mover.figure_mut(undo.id);
        figure.set_role(undo.role);
        figure.relocate(undo.played.from);
        if let Some((rook, square, role)) = undo.rook {
            let rook = mover.figure_mut(rook);
            rook.set_role(role);
            rook.relocate(square);
        }
        if undo.promotion.is_some() {
            mover.retrack();
        }
        if let Some(captured) = undo.captured {
            opponent.reveal(captured);
        }
        for id in undo.cleared {
            opponent.figure_mut(id).set_en_passant(true);
        }
        self.side_to_move = player;
        self.in_check = undo.in_check;
        self.rebuild();
    }

    /// Plays the move, hiding the captured figure when `probe` is set and
    /// removing it otherwise. All lookups that can fail happen before the
    /// first mutation.
    fn apply(&mut self, played: &Move, probe: bool) -> Result<Undo, Error> {
        let player = played.piece.owner;
        if player != self.side_to_move {
            return Err(Error::InvariantViolation(format!(
                "{played} is not a move of {:?}",
                self.side_to_move
            )));
        }
        let id = self
            .army(player)
            .find(played.piece.kind, played.from)
            .ok_or_else(|| {
                Error::InvariantViolation(format!(
                    "no {:?} {:?} on {} to play {played}",
                    player, played.piece.kind, played.from
                ))
            })?;
        let castle = match played.castle_side() {
            Some(side) => {
                let rook = self.army(player).rook_for(side).ok_or_else(|| {
                    Error::InvariantViolation(format!("no rook for {played} ({})", side.san()))
                })?;
                Some((side, rook))
            },
            None => None,
        };
        let captured_square = self.capture_square(played);
        if let Some(square) = captured_square {
            if self.army(player.opponent()).at(square).is_none() {
                return Err(Error::InvariantViolation(format!(
                    "nothing to capture on {square} for {played}"
                )));
            }
        }
        let promotion = (played.piece.kind == PieceKind::Pawn
            && played.to.rank() == Rank::promotion(player))
        .then(|| played.promotion.unwrap_or(Promotion::Queen));
        let in_check = self.in_check;

        let (mover, opponent) = self.armies_mut(player);
        let role = mover.figure(id).role();
        mover.figure_mut(id).apply_move(played.to);
        let rook = castle.map(|(side, rook)| {
            let figure = mover.figure_mut(rook);
            let (square, role) = (figure.square(), figure.role());
            figure.apply_move(Square::new(side.rook_destination(), square.rank()));
            (rook, square, role)
        });
        let captured = match captured_square {
            Some(square) if probe => opponent.hide(square),
            Some(square) => {
                let _ = opponent.remove(square);
                None
            },
            None => None,
        };
        if let Some(promotion) = promotion {
            mover.figure_mut(id).promote(promotion.into());
            mover.retrack();
        }
        let cleared: ArrayVec<usize, MAX_PAWNS> = opponent
            .active()
            .filter(|(_, figure)| figure.is_en_passant())
            .map(|(id, _)| id)
            .collect();
        for id in &cleared {
            opponent.figure_mut(*id).set_en_passant(false);
        }

        self.side_to_move = player.opponent();
        self.rebuild();
        self.in_check = self.is_king_attacked(self.side_to_move);

        Ok(Undo {
            played: *played,
            id,
            role,
            rook,
            captured,
            capture: captured_square.is_some(),
            en_passant: captured_square.is_some_and(|square| square != played.to),
            promotion,
            cleared,
            in_check,
        })
    }

    /// File and rank SAN needs to tell figure `id` apart from other figures
    /// of the same kind that can legally go to `to`.
    fn disambiguation(&mut self, player: Player, id: usize, to: Square) -> (Option<File>, Option<Rank>) {
        let figure = self.army(player).figure(id);
        let (kind, from) = (figure.kind(), figure.square());
        if matches!(kind, PieceKind::Pawn | PieceKind::King) {
            return (None, None);
        }
        let (board, army) = self.split(player);
        let candidates = army.candidates(board, kind, to, None, None);
        let mut rivals = Vec::new();
        for rival in candidates {
            if rival != id && self.handle_check(player, rival, to) {
                rivals.push(self.army(player).figure(rival).square());
            }
        }
        if rivals.is_empty() {
            (None, None)
        } else if rivals.iter().all(|square| square.file() != from.file()) {
            (Some(from.file()), None)
        } else if rivals.iter().all(|square| square.rank() != from.rank()) {
            (None, Some(from.rank()))
        } else {
            (Some(from.file()), Some(from.rank()))
        }
    }

    /// Status of the position for the side to move.
    fn assess(&mut self) -> Status {
        let player = self.side_to_move;
        if !self.has_legal_move(player) {
            if self.in_check {
                Status::Checkmate {
                    winner: player.opponent(),
                }
            } else {
                Status::Stalemate
            }
        } else if self.is_insufficient_material() {
            Status::Draw
        } else {
            Status::Ongoing
        }
    }

    /// Recomputes the status of a freshly loaded position.
    pub(crate) fn refresh_status(&mut self) {
        self.status = self.assess();
    }

    /// Plays a legal move for real: captured figures are removed, the move
    /// goes into the history and the status is updated.
    fn commit(&mut self, played: Move) -> Result<Status, Error> {
        let player = played.piece.owner;
        let (file, rank) = match self.army(player).find(played.piece.kind, played.from) {
            Some(id) => self.disambiguation(player, id, played.to),
            None => (None, None),
        };
        let undo = self.apply(&played, false)?;
        self.status = self.assess();

        let record = Record {
            number: self.fullmove,
            played: Move {
                promotion: undo.promotion,
                ..played
            },
            file,
            rank,
            capture: undo.capture,
            check: self.in_check,
            checkmate: matches!(self.status, Status::Checkmate { .. }),
        };
        match player {
            Player::White => info!("{}. {record}", record.number),
            Player::Black => info!("{}... {record}", record.number),
        }
        self.history.push(record);
        if player == Player::Black {
            self.fullmove = self.fullmove.saturating_add(1);
        }
        if self.status.is_over() {
            info!("game over: {}", self.status);
        }
        Ok(self.status)
    }

    /// Plays a move given in SAN for the side to move.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has already ended
    /// - [`Error::Parse`] for malformed notation
    /// - [`Error::NoCandidate`] and [`Error::Ambiguous`] when the notation
    ///   does not point to exactly one piece
    /// - [`Error::NoCapture`] when the notation captures an empty square
    /// - [`Error::IllegalMove`] when the move would leave the king in check
    ///   or castling is not allowed
    ///
    /// The game is unchanged after any error.
    pub fn submit_move(&mut self, san: &str) -> Result<Status, Error> {
        if self.status.is_over() {
            return Err(Error::GameOver(self.status));
        }
        match self.interpret(san) {
            Ok(played) => self.commit(played),
            Err(error) => {
                warn!("rejected '{san}': {error}");
                Err(error)
            },
        }
    }

    /// Turns SAN into a legal move of the side to move.
    fn interpret(&mut self, san: &str) -> Result<Move, Error> {
        let player = self.side_to_move;
        let notation = notation::decode(san, player)?;
        let id = match notation.castle {
            Some(side) => {
                let id = self.army(player).king_id()?;
                if !self.army(player).can_castle(side, &self.board) {
                    return Err(Error::IllegalMove(format!(
                        "{player:?} can not castle {side:?} in '{san}'"
                    )));
                }
                id
            },
            None => self.resolve(player, &notation)?,
        };
        let figure = self.army(player).figure(id);
        let played = Move::new(
            figure.piece(),
            figure.square(),
            notation.destination,
            notation.promotion,
        );
        if notation.castle.is_none() {
            if let Some(side) = played.castle_side() {
                return Err(Error::IllegalMove(format!(
                    "'{san}' moves the king two files, castling is written as {}",
                    side.san()
                )));
            }
        }
        if notation.capture && self.capture_square(&played).is_none() {
            return Err(Error::NoCapture(notation.destination));
        }
        if !self.handle_check(player, id, notation.destination) {
            return Err(Error::IllegalMove(format!(
                "'{san}' leaves the {player:?} king in check"
            )));
        }
        Ok(played)
    }

    /// Finds the figure the notation talks about. When several figures can
    /// reach the destination but only one of them legally, SAN does not
    /// require disambiguation and that one is used.
    fn resolve(&mut self, player: Player, notation: &Notation) -> Result<usize, Error> {
        let destination = notation.destination;
        let file = match (notation.kind, notation.capture) {
            (PieceKind::Pawn, false) => Some(destination.file()),
            _ => notation.file,
        };
        let (board, army) = self.split(player);
        match army.resolve(board, notation.kind, destination, file, notation.rank) {
            Err(Error::Ambiguous(message)) => {
                let (board, army) = self.split(player);
                let legal = army
                    .candidates(board, notation.kind, destination, file, notation.rank)
                    .into_iter()
                    .filter(|id| self.handle_check(player, *id, destination))
                    .collect_vec();
                match legal.as_slice() {
                    [id] => Ok(*id),
                    _ => Err(Error::Ambiguous(message)),
                }
            },
            result => result,
        }
    }

    /// Plays a move produced by the move generator or parsed from UCI.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] if the game has ended and [`Error::IllegalMove`]
    /// if the move is not legal in the current position.
    pub fn play(&mut self, played: &Move) -> Result<Status, Error> {
        if self.status.is_over() {
            return Err(Error::GameOver(self.status));
        }
        if !self.is_legal(played) {
            warn!("rejected {played}: not a legal move");
            return Err(Error::IllegalMove(played.to_string()));
        }
        self.commit(*played)
    }

    /// Lets the engine search `depth` plies and play one of the best moves,
    /// chosen by `rng`.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] if the game has ended.
    pub fn computer_move(&mut self, depth: Depth, rng: &mut impl Rng) -> Result<Status, Error> {
        if self.status.is_over() {
            return Err(Error::GameOver(self.status));
        }
        let result = search::search(self, depth)?;
        debug!(
            "depth {depth}: {} after {} nodes, best moves: {}",
            result.score,
            result.nodes,
            result.best_moves.iter().join(" ")
        );
        if result.best_moves.is_empty() {
            return Err(Error::InvariantViolation(
                "ongoing game without legal moves".to_string(),
            ));
        }
        let played = result.best_moves[rng.gen_range(0..result.best_moves.len())];
        self.commit(played)
    }

    /// The side to move gives up.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] if the game has already ended.
    pub fn resign(&mut self) -> Result<Status, Error> {
        if self.status.is_over() {
            return Err(Error::GameOver(self.status));
        }
        self.status = Status::Resignation {
            winner: self.side_to_move.opponent(),
        };
        info!("game over: {}", self.status);
        Ok(self.status)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Game {
    /// Board dump followed by the state the board does not show.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.board)?;
        writeln!(f)?;
        writeln!(f, "Side to move: {:?}", self.side_to_move)?;
        writeln!(f, "Full-move number: {}", self.fullmove)?;
        writeln!(f, "In check: {}", self.in_check)?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "FEN: {}", self.fen())
    }
}
