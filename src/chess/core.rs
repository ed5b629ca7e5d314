//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files from the queenside to the kingside.
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// Zero-based column index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the file `delta` columns away, if it is still on the board.
    #[must_use]
    pub fn offset(self, delta: i8) -> Option<Self> {
        let column = self as i8 + delta;
        u8::try_from(column)
            .ok()
            .and_then(|column| Self::try_from(column).ok())
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Self::try_from(file as u8 - b'a'),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(column as usize) {
            Some(file) => Ok(*file),
            None => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    /// All ranks from White's side of the board to Black's.
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// Zero-based row index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the rank `delta` rows away, if it is still on the board.
    #[must_use]
    pub fn offset(self, delta: i8) -> Option<Self> {
        let row = self as i8 + delta;
        u8::try_from(row).ok().and_then(|row| Self::try_from(row).ok())
    }

    /// The rank where the player's king and rooks start.
    #[must_use]
    pub const fn backrank(player: Player) -> Self {
        match player {
            Player::White => Self::One,
            Player::Black => Self::Eight,
        }
    }

    /// The rank the player's pawns start on and may advance two squares from.
    #[must_use]
    pub const fn pawns_starting(player: Player) -> Self {
        match player {
            Player::White => Self::Two,
            Player::Black => Self::Seven,
        }
    }

    /// The rank where the player's pawns promote.
    #[must_use]
    pub const fn promotion(player: Player) -> Self {
        Self::backrank(player.opponent())
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Self::try_from(rank as u8 - b'1'),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(row as usize) {
            Some(rank) => Ok(*rank),
            None => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A square is the intersection of a [`File`] and a [`Rank`]. Squares outside
/// of the board can not be constructed: "no square" is `Option<Square>`.
///
/// ```
/// use rankfile::chess::core::{File, Rank, Square};
///
/// let square = Square::new(File::E, Rank::Four);
/// assert_eq!(square.to_string(), "e4");
/// assert_eq!(square.offset(1, 1), Some(Square::new(File::F, Rank::Five)));
/// assert_eq!(square.offset(4, 0), None);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self { file, rank }
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        self.file
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    /// a1 is dark, h1 is light.
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.file.index() + self.rank.index()) % 2 == 1
    }

    /// Shifts the square by given number of files and ranks. Returns `None`
    /// if the result would leave the board.
    #[must_use]
    pub fn offset(self, files: i8, ranks: i8) -> Option<Self> {
        Some(Self::new(
            self.file.offset(files)?,
            self.rank.offset(ranks)?,
        ))
    }

    /// Iterates over all squares rank by rank starting from a1.
    pub fn iter() -> impl Iterator<Item = Self> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Self::new(file, rank)))
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank delta of a single pawn push.
    #[must_use]
    pub const fn push_direction(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    King = 1,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    #[allow(missing_docs)]
    pub const ALL: [Self; 6] = [
        Self::King,
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
        Self::Pawn,
    ];

    /// Zero-based index for kind-indexed tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Parses the uppercase piece letter used in SAN. Pawns have no letter.
    pub(crate) fn from_san_letter(letter: char) -> Option<Self> {
        match letter {
            'K' => Some(Self::King),
            'Q' => Some(Self::Queen),
            'R' => Some(Self::Rook),
            'B' => Some(Self::Bishop),
            'N' => Some(Self::Knight),
            _ => None,
        }
    }
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player. The character form is the
/// FEN letter: uppercase for White and lowercase for Black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self { owner, kind })
    }
}

impl Piece {
    /// FEN letter of the piece.
    #[must_use]
    pub const fn symbol(self) -> char {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match self.owner {
            Player::White => symbol.to_ascii_uppercase(),
            Player::Black => symbol,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    #[allow(missing_docs)]
    pub const ALL: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];
}

impl TryFrom<char> for Promotion {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_uppercase() {
            'Q' => Ok(Self::Queen),
            'R' => Ok(Self::Rook),
            'B' => Ok(Self::Bishop),
            'N' => Ok(Self::Knight),
            _ => bail!("promotion should be one of \"QRBN\", got '{symbol}'"),
        }
    }
}

/// The two ways of [castling]: towards the h-file (short, O-O) or towards the
/// a-file (long, O-O-O).
///
/// The king and the rook end up on the same files for both sides:
///
/// - When castling short, the king ends up on [`File::G`] and the rook on
///   [`File::F`]
/// - When castling long, the king ends up on [`File::C`] and the rook on
///   [`File::D`]
///
/// [castling]: https://www.chessprogramming.org/Castling
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Short,
    Long,
}

impl CastleSide {
    #[allow(missing_docs)]
    pub const ALL: [Self; 2] = [Self::Short, Self::Long];

    /// File the king lands on.
    #[must_use]
    pub const fn king_destination(self) -> File {
        match self {
            Self::Short => File::G,
            Self::Long => File::C,
        }
    }

    /// File of the rook before castling.
    #[must_use]
    pub const fn rook_origin(self) -> File {
        match self {
            Self::Short => File::H,
            Self::Long => File::A,
        }
    }

    /// File of the rook after castling.
    #[must_use]
    pub const fn rook_destination(self) -> File {
        match self {
            Self::Short => File::F,
            Self::Long => File::D,
        }
    }

    /// Files strictly between the king and the rook: all of them have to be
    /// empty.
    #[must_use]
    pub const fn between(self) -> &'static [File] {
        match self {
            Self::Short => &[File::F, File::G],
            Self::Long => &[File::B, File::C, File::D],
        }
    }

    /// Files the king stands on during castling, including the starting and
    /// the final one: none of them may be attacked.
    #[must_use]
    pub const fn king_walk(self) -> &'static [File] {
        match self {
            Self::Short => &[File::E, File::F, File::G],
            Self::Long => &[File::E, File::D, File::C],
        }
    }

    /// Castling token in SAN.
    #[must_use]
    pub const fn san(self) -> &'static str {
        match self {
            Self::Short => "O-O",
            Self::Long => "O-O-O",
        }
    }
}

bitflags::bitflags! {
    /// Castle rights as they appear in the FEN castling field. The engine
    /// itself derives castling ability from the king and rook movement flags,
    /// this type is only the exchange format.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const NONE = 0;
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
        #[allow(missing_docs)]
        const ALL = Self::WHITE_SHORT.bits()
            | Self::WHITE_LONG.bits()
            | Self::BLACK_SHORT.bits()
            | Self::BLACK_LONG.bits();
    }
}

impl CastleRights {
    /// The flag for one player and side.
    #[must_use]
    pub const fn single(player: Player, side: CastleSide) -> Self {
        match (player, side) {
            (Player::White, CastleSide::Short) => Self::WHITE_SHORT,
            (Player::White, CastleSide::Long) => Self::WHITE_LONG,
            (Player::Black, CastleSide::Short) => Self::BLACK_SHORT,
            (Player::Black, CastleSide::Long) => Self::BLACK_LONG,
        }
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = anyhow::Error;

    /// Parses [`CastleRights`] for both players from the FEN format.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if given pattern does not match
    ///
    /// [`CastleRights`] := - | (K)? (Q)? (k)? (q)?
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input == "-" {
            return Ok(Self::NONE);
        }
        const ORDER: [(char, CastleRights); 4] = [
            ('K', CastleRights::WHITE_SHORT),
            ('Q', CastleRights::WHITE_LONG),
            ('k', CastleRights::BLACK_SHORT),
            ('q', CastleRights::BLACK_LONG),
        ];
        let mut rights = Self::NONE;
        let mut next = 0;
        for symbol in input.chars() {
            match ORDER[next..].iter().position(|(s, _)| *s == symbol) {
                Some(offset) => {
                    rights |= ORDER[next + offset].1;
                    next += offset + 1;
                },
                None => bail!("unknown castle rights: {input}"),
            }
        }
        if rights == Self::NONE {
            bail!("unknown castle rights: {input}");
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            return f.write_char('-');
        }
        for (symbol, flag) in [
            ('K', Self::WHITE_SHORT),
            ('Q', Self::WHITE_LONG),
            ('k', Self::BLACK_SHORT),
            ('q', Self::BLACK_LONG),
        ] {
            if self.contains(flag) {
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

/// A move of a single piece: castling is encoded as the king's move and the
/// rook follows implicitly. Moves are immutable once constructed and serve
/// both as generated candidates and as committed records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub(crate) piece: Piece,
    pub(crate) from: Square,
    pub(crate) to: Square,
    pub(crate) promotion: Option<Promotion>,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(piece: Piece, from: Square, to: Square, promotion: Option<Promotion>) -> Self {
        Self {
            piece,
            from,
            to,
            promotion,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    /// Returns the side if this is a king jumping two files along its
    /// backrank.
    #[must_use]
    pub fn castle_side(&self) -> Option<CastleSide> {
        if self.piece.kind != PieceKind::King
            || self.from.file() != File::E
            || self.from.rank() != Rank::backrank(self.piece.owner)
            || self.from.rank() != self.to.rank()
        {
            return None;
        }
        CastleSide::ALL
            .into_iter()
            .find(|side| side.king_destination() == self.to.file())
    }
}

impl fmt::Display for Move {
    /// Serializes a move in [UCI format].
    ///
    /// [UCI format]: http://wbec-ridderkerk.nl/html/UCIProtocol.html
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", PieceKind::from(promotion))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            ('1'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            Rank::ALL.to_vec()
        );
        assert_eq!(
            (0..=BOARD_WIDTH)
                .filter_map(|idx| Rank::try_from(idx).ok())
                .collect::<Vec<Rank>>(),
            Rank::ALL.to_vec()
        );
    }

    #[test]
    #[should_panic(expected = "rank should be within '1'..='8', got '9'")]
    fn rank_from_incorrect_char() {
        let _ = Rank::try_from('9').unwrap();
    }

    #[test]
    #[should_panic(expected = "rank should be within '1'..='8', got '0'")]
    fn rank_from_incorrect_char_zero() {
        let _ = Rank::try_from('0').unwrap();
    }

    #[test]
    #[should_panic(expected = "rank should be within 0..BOARD_WIDTH, got 8")]
    fn rank_from_incorrect_index() {
        let _ = Rank::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            File::ALL.to_vec()
        );
        assert_eq!(File::E.offset(2), Some(File::G));
        assert_eq!(File::B.offset(-2), None);
        assert_eq!(File::H.offset(1), None);
    }

    #[test]
    #[should_panic(expected = "file should be within 'a'..='h', got 'i'")]
    fn file_from_incorrect_char() {
        let _ = File::try_from('i').unwrap();
    }

    #[test]
    #[should_panic(expected = "file should be within 0..BOARD_WIDTH, got 8")]
    fn file_from_incorrect_index() {
        let _ = File::try_from(BOARD_WIDTH).unwrap();
    }

    #[test]
    fn square() {
        assert_eq!(
            Square::try_from("b3").unwrap(),
            Square::new(File::B, Rank::Three)
        );
        assert_eq!(Square::new(File::H, Rank::Eight).to_string(), "h8");
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a0").is_err());
        assert!(Square::try_from("a10").is_err());
        assert_eq!(Square::iter().count(), BOARD_SIZE as usize);
        assert_eq!(
            Square::iter().next(),
            Some(Square::new(File::A, Rank::One))
        );
    }

    #[test]
    fn border_squares_offset() {
        let corner = Square::new(File::A, Rank::One);
        assert_eq!(corner.offset(1, 1), Some(Square::new(File::B, Rank::Two)));
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        let corner = Square::new(File::H, Rank::Eight);
        assert_eq!(corner.offset(0, 1), None);
        assert_eq!(corner.offset(1, 0), None);
        assert_eq!(
            corner.offset(-7, -7),
            Some(Square::new(File::A, Rank::One))
        );
    }

    #[test]
    fn piece_symbols() {
        for symbol in "KQRBNPkqrbnp".chars() {
            assert_eq!(Piece::try_from(symbol).unwrap().to_string(), symbol.to_string());
        }
        assert_eq!(
            Piece::try_from('n').unwrap(),
            Piece::new(Player::Black, PieceKind::Knight)
        );
        assert!(Piece::try_from('x').is_err());
        assert!(Piece::try_from('.').is_err());
    }

    #[test]
    fn castle_rights() {
        assert_eq!(CastleRights::try_from("-").unwrap(), CastleRights::NONE);
        assert_eq!(CastleRights::try_from("KQkq").unwrap(), CastleRights::ALL);
        assert_eq!(
            CastleRights::try_from("Kq").unwrap(),
            CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG
        );
        assert_eq!(CastleRights::try_from("Qk").unwrap().to_string(), "Qk");
        assert!(CastleRights::try_from("qK").is_err());
        assert!(CastleRights::try_from("KK").is_err());
        assert!(CastleRights::try_from("").is_err());
        assert!(CastleRights::try_from("KQkqx").is_err());
    }

    #[test]
    fn move_display() {
        let pawn = Piece::new(Player::White, PieceKind::Pawn);
        assert_eq!(
            Move::new(
                pawn,
                Square::try_from("e2").unwrap(),
                Square::try_from("e4").unwrap(),
                None
            )
            .to_string(),
            "e2e4"
        );
        assert_eq!(
            Move::new(
                pawn,
                Square::try_from("a7").unwrap(),
                Square::try_from("b8").unwrap(),
                Some(Promotion::Knight)
            )
            .to_string(),
            "a7b8n"
        );
    }

    #[test]
    fn castle_side() {
        let king = Piece::new(Player::Black, PieceKind::King);
        let castle = Move::new(
            king,
            Square::try_from("e8").unwrap(),
            Square::try_from("c8").unwrap(),
            None,
        );
        assert_eq!(castle.castle_side(), Some(CastleSide::Long));
        let step = Move::new(
            king,
            Square::try_from("e8").unwrap(),
            Square::try_from("d8").unwrap(),
            None,
        );
        assert_eq!(step.castle_side(), None);
        let wrong_rank = Move::new(
            king,
            Square::try_from("e1").unwrap(),
            Square::try_from("g1").unwrap(),
            None,
        );
        assert_eq!(wrong_rank.castle_side(), None);
    }
}
