//! Contains a builder for `Position`
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `Position`
///
/// ```rust
/// use chess_rules::chess::{PositionBuilder, Color, Piece, Square, Legality};
///
/// let pos = PositionBuilder::new()
///     .piece(Color::White, Piece::King, Square::E1)
///     .piece(Color::White, Piece::Pawn, Square::A7)
///     .piece(Color::Black, Piece::King, Square::E8)
///     .validate()?;
/// assert_eq!(pos.legality(), Legality::Legal);
/// # Ok::<(), chess_rules::chess::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    board: [Option<(Color, Piece)>; Square::COUNT],
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: usize,
    fullmove_number: usize,
}

impl PositionBuilder {
    /// Creates a new, empty `PositionBuilder`
    pub fn new() -> Self {
        PositionBuilder {
            board: [None; Square::COUNT],
            turn: White,
            castling: CastlingRights::none(),
            ep_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Sets the piece at `square`
    pub fn piece(&mut self, color: Color, piece: Piece, square: Square) -> &mut Self {
        self.board[square as usize] = Some((color, piece));
        self
    }

    /// Clears the piece at `square`
    pub fn clear(&mut self, square: Square) -> &mut Self {
        self.board[square as usize] = None;
        self
    }

    /// Sets the turn to `color`
    pub fn turn(&mut self, color: Color) -> &mut Self {
        self.turn = color;
        self
    }

    /// Replaces all four castling rights
    pub fn castling_rights(&mut self, rights: CastlingRights) -> &mut Self {
        self.castling = rights;
        self
    }

    /// Sets one castling right for `color`
    pub fn can_castle(&mut self, color: Color, wing: Wing, available: bool) -> &mut Self {
        self.castling.set(color, wing, available);
        self
    }

    /// Sets or clears the en-passant square
    pub fn en_passant_square(&mut self, square: Option<Square>) -> &mut Self {
        self.ep_square = square;
        self
    }

    /// Sets the number of plies that count toward the 50-move rule. A ply is a move by one player,
    /// so two plies would be one move by each player.
    pub fn halfmove_clock(&mut self, plies: usize) -> &mut Self {
        self.halfmove_clock = plies;
        self
    }

    /// Sets the move number
    pub fn fullmove_number(&mut self, move_num: usize) -> &mut Self {
        self.fullmove_number = move_num;
        self
    }

    /// Returns the `Position` as built, without checking legality
    pub fn build(&self) -> Position {
        Position {
            board: self.board,
            turn: self.turn,
            castling: self.castling,
            ep_square: self.ep_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Validates legality and returns a `Position`
    pub fn validate(&self) -> Result<Position> {
        let pos = self.build();
        pos.validate()?;
        Ok(pos)
    }
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Position> for PositionBuilder {
    fn from(pos: &Position) -> Self {
        PositionBuilder {
            board: pos.board,
            turn: pos.turn,
            castling: pos.castling,
            ep_square: pos.ep_square,
            halfmove_clock: pos.halfmove_clock,
            fullmove_number: pos.fullmove_number,
        }
    }
}
