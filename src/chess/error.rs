//! Defines the error types needed by the chess module
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::position::Legality;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string
    ParseError,
    /// Failed to convert an integer to an another type
    TryFromIntError,
    /// Malformed FEN string
    Fen(FenError),
    /// Move text that is neither valid SAN nor coordinate notation
    MalformedMove(String),
    /// Move text that does not identify exactly one move
    AmbiguousMove(String),
    /// Illegal move
    IllegalMove,
    /// A move that cannot be applied to any position, such as castling to the d-file
    InvalidMoveShape,
    /// The position breaks one of the rules checked by `Position::legality`
    IllegalPosition(Legality),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "cannot parse string".fmt(f),
            TryFromIntError => "integer out of range".fmt(f),
            Fen(err) => write!(f, "malformed FEN: {}", err),
            MalformedMove(s) => write!(f, "{}: malformed move", s),
            AmbiguousMove(s) => write!(f, "{}: ambiguous move", s),
            IllegalMove => "illegal move".fmt(f),
            InvalidMoveShape => "move cannot be applied to any position".fmt(f),
            IllegalPosition(legality) => write!(f, "illegal position: {}", legality),
        }
    }
}

impl std::error::Error for Error { }

impl From<FenError> for Error {
    fn from(err: FenError) -> Self {
        Error::Fen(err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The field of a FEN string which could not be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN requires exactly six fields; holds the number found
    FieldCount(usize),
    /// Piece placement
    Board,
    /// Active color
    Turn,
    /// Castling availability
    Castling,
    /// En passant target square
    EnPassant,
    /// Halfmove clock
    HalfmoveClock,
    /// Fullmove number
    FullmoveNumber,
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FenError::*;

        match self {
            FieldCount(n) => write!(f, "expected 6 fields but found {}", n),
            Board => "bad piece placement field".fmt(f),
            Turn => "active color must be 'w' or 'b'".fmt(f),
            Castling => "castling field must be '-' or a subset of \"KQkq\"".fmt(f),
            EnPassant => "en passant field must be '-' or a square".fmt(f),
            HalfmoveClock => "halfmove clock must be a non-negative integer".fmt(f),
            FullmoveNumber => "fullmove number must be a positive integer".fmt(f),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;
