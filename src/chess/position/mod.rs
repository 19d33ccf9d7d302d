//! Contains structures related to the `Position`
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::*;

use Color::*;
use Piece::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of the arrangement of pieces on the board at a given point in the game, as well
/// as whose turn it is, castling availability, the en passant target, and the move clocks.
///
/// A `Position` is never modified. New positions come from FEN, from a `PositionBuilder`, or from
/// `Position::make_move`. Construction does not check that the position could occur in a game;
/// use `Position::legality` for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<(Color, Piece)>; Square::COUNT],
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: usize,
    fullmove_number: usize,
}

const BACK_RANK: [Piece; File::COUNT] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

impl Position {
    /// Returns the standard starting Position
    pub fn new() -> Position {
        let mut builder = PositionBuilder::new();

        for (file, &piece) in File::all().zip(BACK_RANK.iter()) {
            for &color in &[White, Black] {
                builder.piece(color, piece, Square::from_coord(file, color.back_rank()));
                builder.piece(color, Pawn, Square::from_coord(file, color.pawn_rank()));
            }
        }

        builder.castling_rights(CastlingRights::all()).build()
    }

    /// Returns the color whose turn it is
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the color and type of piece, if any, at the given location
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.board[sq as usize]
    }

    /// Returns the remaining castling rights
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the en passant target square, set after every two-square pawn advance
    pub fn en_passant_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the number of plies since the last capture or pawn move
    pub fn halfmove_clock(&self) -> usize {
        self.halfmove_clock
    }

    /// Returns the move number, which starts at 1 and increments after each move by `Black`
    pub fn fullmove_number(&self) -> usize {
        self.fullmove_number
    }

    /// Iterates over every occupied square along with the piece on it
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Color, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|(c, p)| (sq, c, p)))
    }

    /// Returns the square where the king of the given color is located, or `None` if there is no
    /// such king. If there are several, the first one found is returned.
    pub fn king_location(&self, c: Color) -> Option<Square> {
        self.pieces().find(|&(_, color, piece)| color == c && piece == King).map(|(sq, _, _)| sq)
    }

    /// Returns `true` if the side to move has no legal moves and is in check
    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && self.legal_moves().is_empty()
    }

    /// Returns `true` if the side to move has no legal moves but is not in check
    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && self.legal_moves().is_empty()
    }

    /// Returns `true` if a draw by the fifty move rule can be claimed (assuming the game isn't
    /// already over)
    pub fn fifty_moves(&self) -> bool {
        self.halfmove_clock >= 100
    }
}

impl Default for Position {
    /// Returns the standard starting Position
    fn default() -> Self {
        Position::new()
    }
}

impl fmt::Display for Position {
    /// Writes out the position using FEN
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a position from a FEN string
    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
mod castling;
pub use castling::{CastlingRights, Wing};

mod builder;
pub use builder::PositionBuilder;

mod legality;
pub use legality::Legality;

mod fen;
mod attacks;
mod move_gen;
mod make_move;
