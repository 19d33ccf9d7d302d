//! The `chess` module implements the FIDE Laws of Chess: board positions, legal move generation,
//! and the notations used to read and write moves and positions.
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Rank step taken by this color's pawns: `1` for `White`, `-1` for `Black`.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The rank the king and rooks start on
    pub fn back_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// The rank this color's pawns start on, and from which they may advance two squares
    pub fn pawn_rank(self) -> Rank {
        match self {
            Color::White => Rank::R2,
            Color::Black => Rank::R7,
        }
    }

    /// The rank on which this color's pawns promote
    pub fn promotion_rank(self) -> Rank {
        (!self).back_rank()
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chess_rules::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

impl TryFrom<usize> for Color {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            0 => Ok(Color::White),
            1 => Ok(Color::Black),
            _ => Err(Error::TryFromIntError),
        }
    }
}

impl From<Color> for usize {
    fn from(value: Color) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of a chess piece, without its color
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

const PIECES: [Piece; Piece::COUNT] = [
    Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King,
];

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// The piece's letter as used in SAN and for `White` in FEN
    pub fn letter(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }

    /// The FEN letter for a piece of this kind and `color`: uppercase for `White`, lowercase for
    /// `Black`.
    pub fn fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.letter(),
            Color::Black => self.letter().to_ascii_lowercase(),
        }
    }

    /// Parses a FEN piece letter, returning its color and kind
    pub fn from_fen_char(c: char) -> Option<(Color, Piece)> {
        let piece = Piece::from_letter(c.to_ascii_uppercase())?;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some((color, piece))
    }

    fn from_letter(c: char) -> Option<Piece> {
        PIECES.iter().copied().find(|p| p.letter() == c)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letter().fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::from_letter(c.to_ascii_uppercase()).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Pawn
    }
}

impl TryFrom<usize> for Piece {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        PIECES.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Piece> for usize {
    fn from(value: Piece) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

const FILES: [File; File::COUNT] = [
    File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
];

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// All files from `A` to `H`
    pub fn all() -> impl DoubleEndedIterator<Item = File> {
        FILES.iter().copied()
    }

    /// Returns the file `steps` files to the right (or left, if negative), if it is on the board.
    pub fn offset(self, steps: i8) -> Option<File> {
        let index = (self as i8).checked_add(steps)?;
        if index >= 0 { FILES.get(index as usize).copied() } else { None }
    }

    /// The file's letter
    pub fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Parses a file letter (either case)
    pub fn from_char(c: char) -> Option<File> {
        match c.to_ascii_lowercase() {
            c @ 'a' ..= 'h' => Some(FILES[(c as u8 - b'a') as usize]),
            _ => None,
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => File::from_char(c).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        FILES.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<File> for usize {
    fn from(value: File) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

const RANKS: [Rank; Rank::COUNT] = [
    Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
];

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// All ranks from `R1` to `R8`
    pub fn all() -> impl DoubleEndedIterator<Item = Rank> {
        RANKS.iter().copied()
    }

    /// Returns the rank `steps` ranks up (or down, if negative), if it is on the board.
    pub fn offset(self, steps: i8) -> Option<Rank> {
        let index = (self as i8).checked_add(steps)?;
        if index >= 0 { RANKS.get(index as usize).copied() } else { None }
    }

    /// The rank's digit
    pub fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// Parses a rank digit
    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            '1' ..= '8' => Some(RANKS[(c as u8 - b'1') as usize]),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_char(c).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        RANKS.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Rank> for usize {
    fn from(value: Rank) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Square {
    // file-major, so the index is `file * 8 + rank`
    A1 = 0o00, A2 = 0o01, A3 = 0o02, A4 = 0o03, A5 = 0o04, A6 = 0o05, A7 = 0o06, A8 = 0o07,
    B1 = 0o10, B2 = 0o11, B3 = 0o12, B4 = 0o13, B5 = 0o14, B6 = 0o15, B7 = 0o16, B8 = 0o17,
    C1 = 0o20, C2 = 0o21, C3 = 0o22, C4 = 0o23, C5 = 0o24, C6 = 0o25, C7 = 0o26, C8 = 0o27,
    D1 = 0o30, D2 = 0o31, D3 = 0o32, D4 = 0o33, D5 = 0o34, D6 = 0o35, D7 = 0o36, D8 = 0o37,
    E1 = 0o40, E2 = 0o41, E3 = 0o42, E4 = 0o43, E5 = 0o44, E6 = 0o45, E7 = 0o46, E8 = 0o47,
    F1 = 0o50, F2 = 0o51, F3 = 0o52, F4 = 0o53, F5 = 0o54, F6 = 0o55, F7 = 0o56, F8 = 0o57,
    G1 = 0o60, G2 = 0o61, G3 = 0o62, G4 = 0o63, G5 = 0o64, G6 = 0o65, G7 = 0o66, G8 = 0o67,
    H1 = 0o70, H2 = 0o71, H3 = 0o72, H4 = 0o73, H5 = 0o74, H6 = 0o75, H7 = 0o76, H8 = 0o77,
}

/// Every square, indexed by its discriminant
const SQUARES: [Square; Square::COUNT] = {
    use Square::*;
    [
        A1, A2, A3, A4, A5, A6, A7, A8,
        B1, B2, B3, B4, B5, B6, B7, B8,
        C1, C2, C3, C4, C5, C6, C7, C8,
        D1, D2, D3, D4, D5, D6, D7, D8,
        E1, E2, E3, E4, E5, E6, E7, E8,
        F1, F2, F3, F4, F5, F6, F7, F8,
        G1, G2, G3, G4, G5, G6, G7, G8,
        H1, H2, H3, H4, H5, H6, H7, H8,
    ]
};

impl Square {
    /// The number of squares
    pub const COUNT: usize = Square::H8 as usize + 1;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        SQUARES[(file as usize) << 3 | rank as usize]
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        FILES[(self as usize) >> 3]
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        RANKS[(self as usize) & 7]
    }

    /// Returns the square reached by stepping once by `offset`, or `None` if that leaves the board.
    pub fn offset(self, offset: Offset) -> Option<Square> {
        let file = self.file().offset(offset.file)?;
        let rank = self.rank().offset(offset.rank)?;
        Some(Square::from_coord(file, rank))
    }

    /// All 64 squares, file by file
    pub fn all() -> impl DoubleEndedIterator<Item = Square> {
        SQUARES.iter().copied()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = [self.file().to_char(), self.rank().to_char()].iter().collect();
        s.fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => {
                let file = File::from_char(f).ok_or(Error::ParseError)?;
                let rank = Rank::from_char(r).ok_or(Error::ParseError)?;
                Ok(Square::from_coord(file, rank))
            },
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A1
    }
}

impl TryFrom<usize> for Square {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        SQUARES.get(value).copied().ok_or(Error::TryFromIntError)
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value as Self
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod error;
pub use error::{Error, FenError, Result};

pub mod offset;
pub use offset::{Offset, Movement};

mod moves;
pub use moves::{Move, MoveType, Promotion, MoveBuilder};

pub mod position;
pub use position::{Position, PositionBuilder, CastlingRights, Wing, Legality};

pub mod san;
pub mod variations;
pub mod game;


#[cfg(test)]
mod piece_tests {
    use std::convert::TryFrom;
    use super::*;

    #[test]
    fn fromstr_accepts_either_case() {
        for (s, p) in &[("P", Piece::Pawn), ("n", Piece::Knight), ("B", Piece::Bishop),
                        ("r", Piece::Rook), ("Q", Piece::Queen), ("k", Piece::King)] {
            assert_eq!(s.parse::<Piece>().unwrap(), *p);
        }
        assert!("X".parse::<Piece>().is_err());
        assert!("NN".parse::<Piece>().is_err());
        assert!("".parse::<Piece>().is_err());
    }

    #[test]
    fn fen_chars_carry_color() {
        assert_eq!(Piece::Knight.fen_char(Color::White), 'N');
        assert_eq!(Piece::Knight.fen_char(Color::Black), 'n');
        assert_eq!(Piece::from_fen_char('q'), Some((Color::Black, Piece::Queen)));
        assert_eq!(Piece::from_fen_char('K'), Some((Color::White, Piece::King)));
        assert_eq!(Piece::from_fen_char('x'), None);
    }

    #[test]
    fn usize_conversions_round_trip() {
        for i in 0..Piece::COUNT {
            assert_eq!(usize::from(Piece::try_from(i).unwrap()), i);
        }
        assert!(Piece::try_from(Piece::COUNT).is_err());
    }
}

#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::*;

    #[test]
    fn from_coord_matches_variant_names() {
        assert_eq!(Square::from_coord(File::A, Rank::R1), Square::A1);
        assert_eq!(Square::from_coord(File::E, Rank::R4), Square::E4);
        assert_eq!(Square::from_coord(File::H, Rank::R8), Square::H8);
        assert_eq!(Square::from_coord(File::B, Rank::R7), Square::B7);
    }

    #[test]
    fn file_and_rank_methods_match_from_coord() {
        for f in File::all() {
            for r in Rank::all() {
                let s = Square::from_coord(f, r);
                assert_eq!(f, s.file());
                assert_eq!(r, s.rank());
                assert_eq!(s.to_string(), format!("{}{}", f, r));
                assert_eq!(s.to_string().parse::<Square>().unwrap(), s);
            }
        }
    }

    #[test]
    fn fromstr_produces_errors_when_it_should() {
        assert!("a".parse::<Square>().is_err());
        assert!("1".parse::<Square>().is_err());
        assert!("ax".parse::<Square>().is_err());
        assert!("x1".parse::<Square>().is_err());
        assert!("a1x".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
    }

    #[test]
    fn usize_conversions_are_consistent() {
        for i in 0..Square::COUNT {
            let s = Square::try_from(i).unwrap();
            assert_eq!(usize::from(s), i);
        }
        assert!(Square::try_from(Square::COUNT).is_err());
    }

    #[test]
    fn offset_stays_on_the_board() {
        assert_eq!(Square::E4.offset(Offset::new(1, 2)), Some(Square::F6));
        assert_eq!(Square::A1.offset(Offset::new(-1, 0)), None);
        assert_eq!(Square::H8.offset(Offset::new(0, 1)), None);
        assert_eq!(Square::H8.offset(Offset::new(-7, -7)), Some(Square::A1));
    }

    #[test]
    fn extreme_offsets_fall_off_the_board() {
        assert_eq!(File::H.offset(i8::MAX), None);
        assert_eq!(File::A.offset(i8::MIN), None);
        assert_eq!(Rank::R8.offset(i8::MAX), None);
        assert_eq!(Rank::R1.offset(i8::MIN), None);
        assert_eq!(Square::H8.offset(Offset::new(127, 0)), None);
        assert_eq!(Square::A1.offset(Offset::new(0, -128)), None);
    }
}
