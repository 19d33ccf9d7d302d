//! Context-free sanity checks on a position
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
/// The result of checking whether a position could arise in a game. Checks are made in the order
/// of the variants, and the first failure is reported.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Legality {
    /// No problems found
    Legal,
    /// A side has no king
    MissingKing,
    /// A side has more than one king
    TooManyKings,
    /// A pawn stands on the first or eighth rank
    IllegalPawnRank,
    /// The side to move could capture the opposing king
    CanCaptureKing,
    /// A castling right is set although the king or that rook has left its home square
    IllegalCastlingRights,
    /// The en passant target is occupied, on the wrong rank, or has no pawn in front of it
    IllegalEnPassant,
}

impl fmt::Display for Legality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Legality::*;

        match self {
            Legal => "legal position".fmt(f),
            MissingKing => "a side has no king".fmt(f),
            TooManyKings => "a side has more than one king".fmt(f),
            IllegalPawnRank => "pawn on the first or last rank".fmt(f),
            CanCaptureKing => "the side to move can capture the king".fmt(f),
            IllegalCastlingRights => "castling rights without king and rook in place".fmt(f),
            IllegalEnPassant => "impossible en passant target".fmt(f),
        }
    }
}

impl Position {
    /// Checks that the position could occur in a game.
    ///
    /// ```
    /// use chess_rules::chess::{Position, Legality};
    ///
    /// assert_eq!(Position::new().legality(), Legality::Legal);
    /// let pos: Position = "4k3/8/8/8/8/8/8/4K2R b K - 0 1".parse()?;
    /// assert_eq!(pos.legality(), Legality::Legal);
    /// let pos: Position = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse()?;
    /// assert_eq!(pos.legality(), Legality::Legal);
    /// let pos: Position = "4k2R/8/8/8/8/8/8/4K3 w - - 0 1".parse()?;
    /// assert_eq!(pos.legality(), Legality::CanCaptureKing);
    /// # Ok::<(), chess_rules::chess::Error>(())
    /// ```
    pub fn legality(&self) -> Legality {
        use Legality::*;

        for &color in &[Color::White, Color::Black] {
            let kings = self.pieces().filter(|&(_, c, p)| c == color && p == Piece::King).count();
            match kings {
                0 => return MissingKing,
                1 => {},
                _ => return TooManyKings,
            }
        }

        let back_rank_pawn = self.pieces().any(|(sq, _, piece)| {
            piece == Piece::Pawn && (sq.rank() == Rank::R1 || sq.rank() == Rank::R8)
        });
        if back_rank_pawn {
            return IllegalPawnRank;
        }

        if let Some(king) = self.king_location(!self.turn) {
            if self.is_square_attacked_by(king, self.turn) {
                return CanCaptureKing;
            }
        }

        if !self.castling_rights_in_place() {
            return IllegalCastlingRights;
        }

        if let Some(ep_square) = self.ep_square {
            if !self.en_passant_possible(ep_square) {
                return IllegalEnPassant;
            }
        }

        Legal
    }

    /// Returns `Error::IllegalPosition` unless `legality` finds the position legal
    pub fn validate(&self) -> Result<()> {
        match self.legality() {
            Legality::Legal => Ok(()),
            legality => Err(Error::IllegalPosition(legality)),
        }
    }

    fn castling_rights_in_place(&self) -> bool {
        for &color in &[Color::White, Color::Black] {
            for &wing in &Wing::ALL {
                if !self.castling.has(color, wing) {
                    continue;
                }
                if self.piece_at(castling::king_square(color)) != Some((color, Piece::King))
                    || self.piece_at(wing.rook_square(color)) != Some((color, Piece::Rook)) {
                    return false;
                }
            }
        }
        true
    }

    /// The target must be empty, on the square the opponent's pawn just skipped, with that pawn
    /// standing in front of it.
    fn en_passant_possible(&self, ep_square: Square) -> bool {
        let pusher = !self.turn;
        let expected_rank = pusher.pawn_rank().offset(pusher.forward());
        if Some(ep_square.rank()) != expected_rank || self.piece_at(ep_square).is_some() {
            return false;
        }
        let pawn_square = ep_square.offset(Offset::new(0, pusher.forward()));
        pawn_square.and_then(|sq| self.piece_at(sq)) == Some((pusher, Piece::Pawn))
    }
}
