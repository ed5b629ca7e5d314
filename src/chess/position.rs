//! [Forsyth-Edwards Notation] (FEN) import and export for [`Game`].
//!
//! [`Game::try_from`] cleans up the input (trims whitespace and the optional
//! "fen " or "epd " prefix) and accepts both full FEN and trimmed FEN, i.e.
//! [Extended Position Description] without operations. EPD lines are common
//! in public test suites where the move counters do not matter.
//!
//! The loaded position is validated: a game can only start from a position
//! that could have occurred in a real game as far as the rules engine can
//! tell.
//!
//! [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
//! [Extended Position Description]: https://www.chessprogramming.org/Extended_Position_Description

use std::fmt;
use std::num::NonZeroU16;

use anyhow::{bail, Context};

use crate::chess::army::{Army, MAX_PAWNS, MAX_PIECES};
use crate::chess::core::{
    CastleRights,
    CastleSide,
    File,
    Piece,
    PieceKind,
    Player,
    Rank,
    Square,
    BOARD_WIDTH,
};
use crate::chess::game::Game;
use crate::error::Error;

impl Game {
    /// Parses a position from FEN. The castling, en passant, halfmove clock
    /// and fullmove counter fields are optional:
    ///
    /// ```text
    /// FEN ::= Placement ' ' Side (' ' Castling (' ' EnPassant (' ' Halfmove (' ' Fullmove)?)?)?)?
    /// ```
    ///
    /// Without the castling field, kings and rooks standing on their initial
    /// squares are considered unmoved. The halfmove clock is validated and
    /// ignored.
    ///
    /// NOTE: This expects properly-formatted input without extra whitespace.
    /// Use [`Game::try_from`] for input coming from users.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if the input is malformed or the position is
    /// impossible.
    pub fn from_fen(input: &str) -> Result<Self, Error> {
        Ok(parse(input)?)
    }

    /// Replaces the current game with the position. On error the current game
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`Game::from_fen`].
    pub fn load_position(&mut self, input: &str) -> Result<(), Error> {
        *self = Self::try_from(input)?;
        Ok(())
    }

    /// Dumps the position as trimmed FEN: placement, side to move, castling
    /// rights and en passant square.
    #[must_use]
    pub fn fen(&self) -> String {
        let mut rights = CastleRights::NONE;
        for player in [Player::White, Player::Black] {
            for side in CastleSide::ALL {
                if self.army(player).has_castle_right(side) {
                    rights |= CastleRights::single(player, side);
                }
            }
        }
        let en_passant = self
            .board()
            .en_passant_square()
            .map_or_else(|| "-".to_string(), |square| square.to_string());
        format!(
            "{} {} {rights} {en_passant}",
            self.board(),
            self.side_to_move()
        )
    }
}

impl TryFrom<&str> for Game {
    type Error = Error;

    fn try_from(input: &str) -> Result<Self, Error> {
        let input = input.trim();
        for prefix in ["fen ", "epd "] {
            if let Some(stripped) = input.strip_prefix(prefix) {
                return Self::from_fen(stripped);
            }
        }
        Self::from_fen(input)
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

const fn name(player: Player) -> &'static str {
    match player {
        Player::White => "white",
        Player::Black => "black",
    }
}

fn parse(input: &str) -> anyhow::Result<Game> {
    let mut parts = input.split(' ');
    let Some(placement) = parts.next().filter(|placement| !placement.is_empty()) else {
        bail!("incorrect FEN: missing pieces placement");
    };
    let mut white = Army::new(Player::White);
    let mut black = Army::new(Player::Black);
    let mut rank_id = BOARD_WIDTH;
    for rank_fen in placement.split('/') {
        if rank_id == 0 {
            bail!("incorrect FEN: expected 8 ranks, got {placement}");
        }
        rank_id -= 1;
        let rank = Rank::try_from(rank_id)?;
        let mut file: u8 = 0;
        for symbol in rank_fen.chars() {
            if file >= BOARD_WIDTH {
                bail!("incorrect FEN: rank {rank} is longer than {BOARD_WIDTH} squares in {rank_fen}");
            }
            match symbol {
                '0' => bail!("increment can not be 0"),
                '1'..='9' => {
                    file += symbol as u8 - b'0';
                    continue;
                },
                _ => (),
            }
            let piece = Piece::try_from(symbol)?;
            if piece.kind == PieceKind::Pawn && (rank == Rank::One || rank == Rank::Eight) {
                bail!("pawns can not be placed on backranks");
            }
            let army = match piece.owner {
                Player::White => &mut white,
                Player::Black => &mut black,
            };
            if army.figures().len() == MAX_PIECES {
                bail!("expected <= {MAX_PIECES} {} pieces", name(piece.owner));
            }
            let _ = army.add(piece.kind, Square::new(File::try_from(file)?, rank))?;
            file += 1;
        }
        if file != BOARD_WIDTH {
            bail!("incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of length {file}");
        }
    }
    if rank_id != 0 {
        bail!("incorrect FEN: there should be 8 ranks, got {placement}");
    }
    for army in [&white, &black] {
        let kings = army.of_kind(PieceKind::King).len();
        if kings != 1 {
            bail!("expected 1 {} king, got {kings}", name(army.player()));
        }
        let pawns = army.of_kind(PieceKind::Pawn).len();
        if pawns > MAX_PAWNS {
            bail!("expected <= {MAX_PAWNS} {} pawns, got {pawns}", name(army.player()));
        }
    }

    let side_to_move: Player = match parts.next() {
        Some(value) => value.try_into()?,
        None => bail!("incorrect FEN: missing side to move"),
    };
    let castling = match parts.next() {
        Some(value) => Some(CastleRights::try_from(value)?),
        None => None,
    };
    let en_passant = match parts.next() {
        None | Some("-") => None,
        Some(value) => Some(Square::try_from(value)?),
    };
    if let Some(value) = parts.next() {
        if !value.bytes().all(|c| c.is_ascii_digit()) {
            bail!("halfmove clock can not contain anything other than digits");
        }
        let _ = value
            .parse::<u16>()
            .with_context(|| format!("incorrect FEN: halfmove clock can not be parsed {value}"))?;
    }
    let fullmove = match parts.next() {
        Some(value) => {
            if !value.bytes().all(|c| c.is_ascii_digit()) {
                bail!("fullmove counter can not contain anything other than digits");
            }
            value
                .parse::<NonZeroU16>()
                .with_context(|| format!("incorrect FEN: fullmove counter can not be parsed {value}"))?
                .get()
        },
        None => 1,
    };
    if parts.next().is_some() {
        bail!("trailing symbols are not allowed in FEN");
    }

    set_castling(&mut white, castling)?;
    set_castling(&mut black, castling)?;
    if let Some(square) = en_passant {
        let pushed = match side_to_move {
            Player::White => &mut black,
            Player::Black => &mut white,
        };
        set_en_passant(side_to_move, pushed, square)?;
    }

    let mut game = Game::from_armies(white, black, side_to_move, fullmove);
    if en_passant.is_some() && game.board().en_passant_square() != en_passant {
        bail!("en passant square has to be empty");
    }
    if game.is_king_attacked(side_to_move.opponent()) {
        bail!(
            "{} is not to move and can not be in check",
            name(side_to_move.opponent())
        );
    }
    game.refresh_status();
    Ok(game)
}

/// Sets the movement flags of the king and the rooks. Given castling rights
/// are trusted as long as the pieces are on their initial squares, otherwise
/// the rights are derived from the placement.
fn set_castling(army: &mut Army, rights: Option<CastleRights>) -> anyhow::Result<()> {
    let player = army.player();
    let backrank = Rank::backrank(player);
    let king = army.king_id()?;
    let king_home = army.figure(king).square() == Square::new(File::E, backrank);
    for rook in army.of_kind(PieceKind::Rook).to_vec() {
        army.figure_mut(rook).set_has_moved(true);
    }
    let mut king_moved = true;
    for side in CastleSide::ALL {
        let corner = Square::new(side.rook_origin(), backrank);
        let rook = army.find(PieceKind::Rook, corner);
        let in_place = king_home && rook.is_some();
        let allowed = match rights {
            Some(rights) => rights.contains(CastleRights::single(player, side)),
            None => in_place,
        };
        if allowed && !in_place {
            bail!(
                "{} can not castle {side:?} without the king on e{backrank} and a rook on {corner}",
                name(player)
            );
        }
        if let (true, Some(rook)) = (allowed, rook) {
            army.figure_mut(rook).set_has_moved(false);
            king_moved = false;
        }
    }
    army.figure_mut(king).set_has_moved(king_moved);
    Ok(())
}

/// Marks the pawn that has just advanced two squares through `square`.
fn set_en_passant(side_to_move: Player, pushed: &mut Army, square: Square) -> anyhow::Result<()> {
    let expected = match side_to_move {
        Player::White => Rank::Six,
        Player::Black => Rank::Three,
    };
    if square.rank() != expected {
        bail!(
            "expected en passant square to be on rank {expected}, got {}",
            square.rank()
        );
    }
    let pawn = square
        .offset(0, pushed.player().push_direction())
        .and_then(|pawn| pushed.find(PieceKind::Pawn, pawn));
    match pawn {
        Some(pawn) => {
            pushed.figure_mut(pawn).set_en_passant(true);
            Ok(())
        },
        None => bail!("en passant square {square} is not behind a pushed pawn"),
    }
}
