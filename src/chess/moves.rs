//! Contains structures to represent moves and to read them from coordinate notation
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveType {
    /// Any move which is not castling, an en passant capture, or a pawn promotion. Includes
    /// ordinary captures and two-square pawn advances.
    Normal,
    /// A castling move, given as the king's origin and destination
    Castling,
    /// An en passant capture
    EnPassant,
    /// A pawn promotion to the given piece type
    Promotion(Promotion),
}

impl Default for MoveType {
    fn default() -> Self {
        MoveType::Normal
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which piece to promote to for a promotion move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Promotion {
    ToKnight = 1,
    ToBishop = 2,
    ToRook = 3,
    ToQueen = 4,
}

use Promotion::*;

impl Promotion {
    /// Every promotion, in the order the move generator emits them
    pub const ALL: [Promotion; 4] = [ToQueen, ToRook, ToBishop, ToKnight];

    /// Returns the promotion to `piece`, if pawns can promote to it
    pub fn from_piece(piece: Piece) -> Option<Promotion> {
        match piece {
            Piece::Knight => Some(ToKnight),
            Piece::Bishop => Some(ToBishop),
            Piece::Rook => Some(ToRook),
            Piece::Queen => Some(ToQueen),
            Piece::Pawn | Piece::King => None,
        }
    }
}

impl Default for Promotion {
    fn default() -> Self {
        ToQueen
    }
}

impl From<Promotion> for Piece {
    fn from(prom: Promotion) -> Self {
        match prom {
            ToKnight => Piece::Knight,
            ToBishop => Piece::Bishop,
            ToRook => Piece::Rook,
            ToQueen => Piece::Queen,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move, described by its origin, destination, and type. Moves are plain values; whether one is
/// legal depends on the `Position` it is played from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    orig: Square,
    dest: Square,
    move_type: MoveType,
}

impl Move {
    /// Creates a move. No check is made that it is legal in any position.
    pub fn new(orig: Square, dest: Square, move_type: MoveType) -> Move {
        Move { orig, dest, move_type }
    }

    /// Returns the origin of the moved piece. For castling, the king's origin.
    pub fn origin(&self) -> Square {
        self.orig
    }

    /// Returns the destination of the moved piece. For castling, the king's destination.
    pub fn destination(&self) -> Square {
        self.dest
    }

    /// Returns the type of move
    pub fn move_type(&self) -> MoveType {
        self.move_type
    }

    /// Returns the piece a pawn promotes to, if this is a promotion
    pub fn promotion(&self) -> Option<Piece> {
        match self.move_type {
            MoveType::Promotion(prom) => Some(prom.into()),
            _ => None,
        }
    }

    /// Returns `true` if the move is a castling move
    pub fn is_castling(&self) -> bool {
        self.move_type == MoveType::Castling
    }
}

impl fmt::Display for Move {
    /// Formats the move in coordinate notation (eg g1f3, e7e8q, or e1g1). Use `san::to_san` for
    /// Standard Algebraic Notation, which depends on the position.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format!("{}{}", self.orig, self.dest);

        if let Some(piece) = self.promotion() {
            s.push(piece.letter().to_ascii_lowercase());
        }

        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `Move`, and the parser for coordinate notation.
///
/// ```rust
/// use chess_rules::chess::{Position, MoveBuilder, MoveType};
///
/// let pos = Position::new();
/// let mv = "e2e4".parse::<MoveBuilder>()?.validate(&pos)?;
/// assert_eq!(mv.move_type(), MoveType::Normal);
///
/// let new_pos = pos.make_move(mv)?;
/// assert_eq!(new_pos.to_fen_str(),
///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
/// # Ok::<(), chess_rules::chess::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveBuilder {
    orig: Option<Square>,
    dest: Option<Square>,
    prom_pc: Option<Promotion>,
}

impl MoveBuilder {
    /// Creates a new MoveBuilder
    pub fn new() -> Self {
        MoveBuilder {
            orig: None,
            dest: None,
            prom_pc: None,
        }
    }

    /// Sets the origin
    pub fn origin(&mut self, orig: Square) -> &mut Self {
        self.orig = Some(orig);
        self
    }

    /// Sets the destination
    pub fn destination(&mut self, dest: Square) -> &mut Self {
        self.dest = Some(dest);
        self
    }

    /// Sets or clears the promotion piece
    pub fn promotion(&mut self, prom_pc: Option<Promotion>) -> &mut Self {
        self.prom_pc = prom_pc;
        self
    }

    /// Finds the legal move in `pos` with this origin and destination. The move type (castling,
    /// en passant, promotion) is taken from the position. A pawn reaching the last rank with no
    /// promotion piece set promotes to a queen.
    pub fn validate(&self, pos: &Position) -> Result<Move> {
        let (orig, dest) = match (self.orig, self.dest) {
            (Some(orig), Some(dest)) => (orig, dest),
            _ => return Err(Error::IllegalMove),
        };
        let prom = self.prom_pc.unwrap_or_default();

        pos.legal_moves().into_iter()
            .filter(|mv| mv.orig == orig && mv.dest == dest)
            .find(|mv| match mv.move_type {
                MoveType::Promotion(p) => p == prom,
                _ => self.prom_pc.is_none(),
            })
            .ok_or(Error::IllegalMove)
    }
}

impl FromStr for MoveBuilder {
    type Err = Error;

    /// Parses coordinate notation: an origin square, an optional `-` or `x`, a destination
    /// square, and an optional promotion piece, itself optionally preceded by `=`.
    fn from_str(s: &str) -> Result<MoveBuilder> {
        let malformed = || Error::MalformedMove(s.to_owned());
        let mut builder = MoveBuilder::new();
        let mut chars = s.trim().chars().peekable();

        let square = |chars: &mut std::iter::Peekable<std::str::Chars<'_>>| {
            let file = chars.next().and_then(File::from_char);
            let rank = chars.next().and_then(Rank::from_char);
            match (file, rank) {
                (Some(file), Some(rank)) => Ok(Square::from_coord(file, rank)),
                _ => Err(malformed()),
            }
        };

        builder.origin(square(&mut chars)?);
        if let Some('-') | Some('x') = chars.peek() {
            chars.next();
        }
        builder.destination(square(&mut chars)?);

        if chars.peek() == Some(&'=') {
            chars.next();
            if chars.peek().is_none() {
                return Err(malformed());
            }
        }
        if let Some(c) = chars.next() {
            let piece = Piece::from_fen_char(c).map(|(_, p)| p);
            let prom = piece.and_then(Promotion::from_piece).ok_or_else(malformed)?;
            builder.promotion(Some(prom));
        }

        if chars.next().is_some() {
            // extra characters
            return Err(malformed());
        }

        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_coordinate_notation() {
        assert_eq!(Move::new(Square::G1, Square::F3, MoveType::Normal).to_string(), "g1f3");
        assert_eq!(Move::new(Square::E1, Square::G1, MoveType::Castling).to_string(), "e1g1");
        assert_eq!(Move::new(Square::E7, Square::E8, MoveType::Promotion(ToQueen)).to_string(),
            "e7e8q");
        assert_eq!(Move::new(Square::B2, Square::A1, MoveType::Promotion(ToKnight)).to_string(),
            "b2a1n");
    }

    #[test]
    fn parse_accepts_separators_and_promotion_forms() -> Result<()> {
        for s in &["e2e4", "e2-e4", "e2xe4"] {
            let builder: MoveBuilder = s.parse()?;
            assert_eq!(builder.orig, Some(Square::E2));
            assert_eq!(builder.dest, Some(Square::E4));
            assert_eq!(builder.prom_pc, None);
        }
        for s in &["e7e8q", "e7e8Q", "e7e8=Q", "e7-e8=q"] {
            assert_eq!(s.parse::<MoveBuilder>()?.prom_pc, Some(ToQueen));
        }
        assert_eq!("a2a1n".parse::<MoveBuilder>()?.prom_pc, Some(ToKnight));
        Ok(())
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for s in &["", "e2", "e2e", "e2e9", "i2e4", "e2e4k", "e2e4p", "e7e8=", "e2e4 e5", "Nf3"] {
            match s.parse::<MoveBuilder>() {
                Err(Error::MalformedMove(text)) => assert_eq!(&text, s),
                other => panic!("{:?} parsed as {:?}", s, other),
            }
        }
    }

    #[test]
    fn validate_finds_the_move_type() -> Result<()> {
        let pos = Position::new();
        let mv = "g1f3".parse::<MoveBuilder>()?.validate(&pos)?;
        assert_eq!(mv, Move::new(Square::G1, Square::F3, MoveType::Normal));
        assert_eq!("e2e5".parse::<MoveBuilder>()?.validate(&pos), Err(Error::IllegalMove));
        assert_eq!("e7e5".parse::<MoveBuilder>()?.validate(&pos), Err(Error::IllegalMove));

        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse()?;
        let mv = "e1c1".parse::<MoveBuilder>()?.validate(&pos)?;
        assert_eq!(mv.move_type(), MoveType::Castling);

        let pos: Position = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2".parse()?;
        let mv = "e5d6".parse::<MoveBuilder>()?.validate(&pos)?;
        assert_eq!(mv.move_type(), MoveType::EnPassant);
        Ok(())
    }

    #[test]
    fn validate_defaults_promotion_to_queen() -> Result<()> {
        let pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse()?;
        let mv = "a7a8".parse::<MoveBuilder>()?.validate(&pos)?;
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        let mv = "a7a8r".parse::<MoveBuilder>()?.validate(&pos)?;
        assert_eq!(mv.promotion(), Some(Piece::Rook));
        assert_eq!("e1e2q".parse::<MoveBuilder>()?.validate(&pos), Err(Error::IllegalMove));
        Ok(())
    }
}
