//! Decoder for moves written in [Standard Algebraic Notation] (SAN).
//!
//! The grammar accepted here is:
//!
//! ```text
//! move        := castle suffix? | piece? from? 'x'? square promotion? suffix?
//! castle      := "O-O" | "O-O-O"
//! piece       := 'K' | 'Q' | 'R' | 'B' | 'N'
//! from        := file | rank | file rank
//! promotion   := '=' ('Q' | 'R' | 'B' | 'N')
//! suffix      := '+' | '#'
//! ```
//!
//! Pawn moves have no piece letter, may only be disambiguated by the file they
//! capture from and promote only on the last rank of their side.
//!
//! [Standard Algebraic Notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Standard_Algebraic_Notation_.28SAN.29

use anyhow::bail;

use crate::chess::core::{CastleSide, File, PieceKind, Player, Promotion, Rank, Square};

/// The shortest move is a pawn push like "e4".
pub const MIN_LENGTH: usize = 2;
/// The longest move is a disambiguated capture with check like "Qh4xe1+" or
/// a promotion capture like "exd8=Q#".
pub const MAX_LENGTH: usize = 7;

/// Everything a SAN token says about the move. The moving piece itself is
/// found later by [`crate::chess::army::Army::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notation {
    /// Kind of the moving piece. Castling is a king move.
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub destination: Square,
    /// Disambiguating file of the moving piece.
    pub file: Option<File>,
    /// Disambiguating rank of the moving piece.
    pub rank: Option<Rank>,
    #[allow(missing_docs)]
    pub capture: bool,
    #[allow(missing_docs)]
    pub promotion: Option<Promotion>,
    #[allow(missing_docs)]
    pub check: bool,
    #[allow(missing_docs)]
    pub checkmate: bool,
    #[allow(missing_docs)]
    pub castle: Option<CastleSide>,
}

impl Notation {
    fn castle(side: CastleSide, player: Player, check: bool, checkmate: bool) -> Self {
        Self {
            kind: PieceKind::King,
            destination: Square::new(side.king_destination(), Rank::backrank(player)),
            file: None,
            rank: None,
            capture: false,
            promotion: None,
            check,
            checkmate,
            castle: Some(side),
        }
    }
}

/// Splits the move notation into its parts for the player making the move.
///
/// # Errors
///
/// Returns an error if the token is too short or too long, has characters in
/// the wrong order, a check suffix anywhere but the end or a promotion that is
/// impossible for the player.
pub fn decode(san: &str, player: Player) -> anyhow::Result<Notation> {
    let length = san.chars().count();
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        bail!("move should be {MIN_LENGTH}..={MAX_LENGTH} chars long, got {length} in '{san}'");
    }
    let (body, check, checkmate) = if let Some(body) = san.strip_suffix('#') {
        (body, false, true)
    } else if let Some(body) = san.strip_suffix('+') {
        (body, true, false)
    } else {
        (san, false, false)
    };
    if body.contains(|symbol: char| symbol == '+' || symbol == '#') {
        bail!("'+' and '#' are only allowed at the end of the move, got '{san}'");
    }
    if let Some(side) = CastleSide::ALL.into_iter().find(|side| side.san() == body) {
        return Ok(Notation::castle(side, player, check, checkmate));
    }

    let (body, promotion) = match body.split_once('=') {
        Some((body, piece)) => {
            let mut symbols = piece.chars();
            match (symbols.next(), symbols.next()) {
                (Some(symbol), None) if symbol.is_ascii_uppercase() => {
                    (body, Some(Promotion::try_from(symbol)?))
                },
                _ => bail!("expected a single promotion piece after '=', got '{san}'"),
            }
        },
        None => (body, None),
    };

    let mut symbols: Vec<char> = body.chars().collect();
    let kind = match symbols.first().copied().and_then(PieceKind::from_san_letter) {
        Some(kind) => {
            let _ = symbols.remove(0);
            kind
        },
        None => PieceKind::Pawn,
    };
    let (Some(rank), Some(file)) = (symbols.pop(), symbols.pop()) else {
        bail!("move should end with the destination square, got '{san}'");
    };
    let destination = Square::new(File::try_from(file)?, Rank::try_from(rank)?);
    let capture = symbols.last() == Some(&'x');
    if capture {
        let _ = symbols.pop();
    }
    let (file, rank) = match symbols.as_slice() {
        [] => (None, None),
        [rank] if rank.is_ascii_digit() => (None, Some(Rank::try_from(*rank)?)),
        [file] => (Some(File::try_from(*file)?), None),
        [file, rank] => (Some(File::try_from(*file)?), Some(Rank::try_from(*rank)?)),
        _ => bail!("unexpected symbols before the destination square in '{san}'"),
    };

    if kind == PieceKind::Pawn {
        if rank.is_some() {
            bail!("pawn moves can only be disambiguated by file, got '{san}'");
        }
        if capture != file.is_some() {
            bail!("pawn captures have to start with the pawn's file, got '{san}'");
        }
    }
    if promotion.is_some() {
        if kind != PieceKind::Pawn {
            bail!("only pawns can be promoted, got '{san}'");
        }
        let last = Rank::promotion(player);
        if destination.rank() != last {
            bail!("{player:?} pawns can only promote on rank {last}, got '{san}'");
        }
    }

    Ok(Notation {
        kind,
        destination,
        file,
        rank,
        capture,
        promotion,
        check,
        checkmate,
        castle: None,
    })
}
