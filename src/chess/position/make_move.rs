//! Applies a move to a position
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

impl Position {
    /// Makes the move, returning the resulting position.
    ///
    /// The move is assumed to be pseudo-legal; it is not checked against the move generator. Use
    /// `MoveBuilder::validate` or `Position::is_legal` for that. Returns `Error::IllegalMove` if
    /// there is no piece of the side to move on the origin, and `Error::InvalidMoveShape` if the
    /// move type does not fit the piece and squares: castling which is not a king moving from the
    /// e-file to the c- or g-file of its back rank with its own rook in the corner, or a promotion
    /// or en passant capture which is not a pawn stepping onto the right rank.
    pub fn make_move(&self, mv: Move) -> Result<Position> {
        let (orig, dest) = (mv.origin(), mv.destination());
        let turn = self.turn;

        let piece = match self.piece_at(orig) {
            Some((color, piece)) if color == turn => piece,
            _ => return Err(Error::IllegalMove),
        };
        let is_capture = self.piece_at(dest).is_some() || mv.move_type() == MoveType::EnPassant;
        let file_step = dest.file() as i8 - orig.file() as i8;
        let pawn_step = piece == Piece::Pawn
            && dest.rank() as i8 - orig.rank() as i8 == turn.forward();

        let mut next = PositionBuilder::from(self);
        next.clear(orig);

        match mv.move_type() {
            MoveType::Normal => {
                next.piece(turn, piece, dest);
            },
            MoveType::Castling => {
                let rank = turn.back_rank();
                let wing = Wing::from_king_destination(dest.file())
                    .ok_or(Error::InvalidMoveShape)?;
                if piece != Piece::King || orig != castling::king_square(turn)
                    || dest.rank() != rank {
                    return Err(Error::InvalidMoveShape);
                }
                let corner = wing.rook_square(turn);
                let rook = match self.piece_at(corner) {
                    Some((color, rook @ Piece::Rook)) if color == turn => rook,
                    _ => return Err(Error::InvalidMoveShape),
                };
                next.piece(turn, Piece::King, dest);
                next.clear(corner);
                next.piece(turn, rook, Square::from_coord(wing.rook_destination(), rank));
            },
            MoveType::EnPassant => {
                let ep_rank = (!turn).pawn_rank().offset(-turn.forward());
                if !pawn_step || file_step.abs() != 1 || Some(dest.rank()) != ep_rank {
                    return Err(Error::InvalidMoveShape);
                }
                next.piece(turn, piece, dest);
                next.clear(Square::from_coord(dest.file(), orig.rank()));
            },
            MoveType::Promotion(prom) => {
                if !pawn_step || file_step.abs() > 1 || dest.rank() != turn.promotion_rank() {
                    return Err(Error::InvalidMoveShape);
                }
                next.piece(turn, prom.into(), dest);
            },
        }

        let mut rights = self.castling;
        for &color in &[Color::White, Color::Black] {
            for &wing in &Wing::ALL {
                let corner = wing.rook_square(color);
                let king_moved = piece == Piece::King && color == turn;
                if king_moved || orig == corner || dest == corner {
                    rights.set(color, wing, false);
                }
            }
        }
        next.castling_rights(rights);

        let double_push = piece == Piece::Pawn
            && (dest.rank() as i8 - orig.rank() as i8).abs() == 2;
        next.en_passant_square(if double_push {
            orig.offset(Offset::new(0, turn.forward()))
        } else {
            None
        });

        if piece == Piece::Pawn || is_capture {
            next.halfmove_clock(0);
        } else {
            next.halfmove_clock(self.halfmove_clock + 1);
        }
        if turn == Color::Black {
            next.fullmove_number(self.fullmove_number + 1);
        }
        next.turn(!turn);

        Ok(next.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(fen: &str, orig: Square, dest: Square, move_type: MoveType) -> Result<String> {
        let pos: Position = fen.parse()?;
        Ok(pos.make_move(Move::new(orig, dest, move_type))?.to_fen_str())
    }

    #[test]
    fn double_push_sets_the_en_passant_target() -> Result<()> {
        assert_eq!(play("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                        Square::E2, Square::E4, MoveType::Normal)?,
                   "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        // recorded even though no black pawn can capture
        assert_eq!(play("4k3/8/8/8/8/8/P7/4K3 w - - 5 9", Square::A2, Square::A4,
                        MoveType::Normal)?,
                   "4k3/8/8/8/P7/8/8/4K3 b - a3 0 9");
        // and cleared by the next move
        assert_eq!(play("4k3/8/8/8/P7/8/8/4K3 b - a3 0 9", Square::E8, Square::D8,
                        MoveType::Normal)?,
                   "3k4/8/8/8/P7/8/8/4K3 w - - 1 10");
        Ok(())
    }

    #[test]
    fn en_passant_removes_the_pawn_beside_the_destination() -> Result<()> {
        assert_eq!(play("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", Square::E5, Square::D6,
                        MoveType::EnPassant)?,
                   "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
        assert_eq!(play("4k3/8/8/8/4pP2/8/8/4K3 b - f3 0 2", Square::E4, Square::F3,
                        MoveType::EnPassant)?,
                   "4k3/8/8/8/8/5p2/8/4K3 w - - 0 3");
        Ok(())
    }

    #[test]
    fn castling_moves_king_and_rook() -> Result<()> {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10";
        assert_eq!(play(fen, Square::E1, Square::G1, MoveType::Castling)?,
                   "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");
        assert_eq!(play(fen, Square::E1, Square::C1, MoveType::Castling)?,
                   "r3k2r/8/8/8/8/8/8/2KR3R b kq - 4 10");
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10";
        assert_eq!(play(fen, Square::E8, Square::G8, MoveType::Castling)?,
                   "r4rk1/8/8/8/8/8/8/R3K2R w KQ - 4 11");
        assert_eq!(play(fen, Square::E8, Square::C8, MoveType::Castling)?,
                   "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 4 11");
        Ok(())
    }

    #[test]
    fn invalid_castling_shapes_are_rejected() -> Result<()> {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse()?;
        assert_eq!(pos.make_move(Move::new(Square::E1, Square::D1, MoveType::Castling)),
                   Err(Error::InvalidMoveShape));
        assert_eq!(pos.make_move(Move::new(Square::E1, Square::G2, MoveType::Castling)),
                   Err(Error::InvalidMoveShape));
        assert_eq!(pos.make_move(Move::new(Square::A1, Square::C1, MoveType::Castling)),
                   Err(Error::InvalidMoveShape));
        assert_eq!(pos.make_move(Move::new(Square::E8, Square::G8, MoveType::Normal)),
                   Err(Error::IllegalMove));
        Ok(())
    }

    #[test]
    fn castling_needs_a_rook_in_the_corner() -> Result<()> {
        let pos: Position = "4k3/8/8/8/8/8/8/4K3 w K - 0 1".parse()?;
        assert_eq!(pos.make_move(Move::new(Square::E1, Square::G1, MoveType::Castling)),
                   Err(Error::InvalidMoveShape));
        assert!(!pos.legal_moves().iter().any(|mv| mv.is_castling()));

        let pos: Position = "4k3/8/8/8/8/8/8/4K2N w K - 0 1".parse()?;
        assert_eq!(pos.make_move(Move::new(Square::E1, Square::G1, MoveType::Castling)),
                   Err(Error::InvalidMoveShape));
        assert!(!pos.legal_moves().iter().any(|mv| mv.is_castling()));

        let pos: Position = "4k3/8/8/8/8/8/8/r3K3 w Q - 0 1".parse()?;
        assert_eq!(pos.make_move(Move::new(Square::E1, Square::C1, MoveType::Castling)),
                   Err(Error::InvalidMoveShape));
        assert!(!pos.legal_moves().iter().any(|mv| mv.is_castling()));
        Ok(())
    }

    #[test]
    fn promotion_and_en_passant_need_a_pawn_step() -> Result<()> {
        let pos: Position = "4k3/8/8/8/8/8/8/R3K1N1 w - d6 0 1".parse()?;
        let queen = MoveType::Promotion(Promotion::ToQueen);
        assert_eq!(pos.make_move(Move::new(Square::G1, Square::F3, queen)),
                   Err(Error::InvalidMoveShape));
        assert_eq!(pos.make_move(Move::new(Square::A1, Square::A3, MoveType::EnPassant)),
                   Err(Error::InvalidMoveShape));

        // pawns, but the wrong squares
        let pos: Position = "4k3/8/8/3pP3/8/8/P7/4K3 w - d6 0 2".parse()?;
        assert_eq!(pos.make_move(Move::new(Square::A2, Square::A3, queen)),
                   Err(Error::InvalidMoveShape));
        assert_eq!(pos.make_move(Move::new(Square::A2, Square::B3, MoveType::EnPassant)),
                   Err(Error::InvalidMoveShape));
        assert_eq!(pos.make_move(Move::new(Square::E5, Square::E6, MoveType::EnPassant)),
                   Err(Error::InvalidMoveShape));
        assert!(pos.make_move(Move::new(Square::E5, Square::D6, MoveType::EnPassant)).is_ok());

        let pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse()?;
        assert_eq!(pos.make_move(Move::new(Square::A7, Square::C8, queen)),
                   Err(Error::InvalidMoveShape));
        assert!(pos.make_move(Move::new(Square::A7, Square::A8, queen)).is_ok());
        Ok(())
    }

    #[test]
    fn each_corner_clears_only_its_own_right() -> Result<()> {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(play(fen, Square::A1, Square::A2, MoveType::Normal)?,
                   "r3k2r/8/8/8/8/8/R7/4K2R b Kkq - 1 1");
        assert_eq!(play(fen, Square::H1, Square::H5, MoveType::Normal)?,
                   "r3k2r/8/8/7R/8/8/8/R3K3 b Qkq - 1 1");
        assert_eq!(play(fen, Square::A1, Square::A8, MoveType::Normal)?,
                   "R3k2r/8/8/8/8/8/8/4K2R b Kk - 0 1");
        assert_eq!(play(fen, Square::H1, Square::H8, MoveType::Normal)?,
                   "r3k2R/8/8/8/8/8/8/R3K3 b Qq - 0 1");
        assert_eq!(play(fen, Square::E1, Square::E2, MoveType::Normal)?,
                   "r3k2r/8/8/8/8/8/4K3/R6R b kq - 1 1");
        Ok(())
    }

    #[test]
    fn promotion_replaces_the_pawn() -> Result<()> {
        let prom = MoveType::Promotion(Promotion::ToKnight);
        assert_eq!(play("1n2k3/P7/8/8/8/8/8/4K3 w - - 12 40", Square::A7, Square::B8, prom)?,
                   "1N2k3/8/8/8/8/8/8/4K3 b - - 0 40");
        Ok(())
    }

    #[test]
    fn clocks() -> Result<()> {
        assert_eq!(play("4k3/8/8/8/8/8/8/4K1N1 w - - 12 40", Square::G1, Square::F3,
                        MoveType::Normal)?,
                   "4k3/8/8/8/8/5N2/8/4K3 b - - 13 40");
        assert_eq!(play("4k3/8/8/8/8/5n2/8/4K1N1 w - - 12 40", Square::G1, Square::F3,
                        MoveType::Normal)?,
                   "4k3/8/8/8/8/5N2/8/4K3 b - - 0 40");
        Ok(())
    }
}
