//! Pseudo-legal and legal move generation
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
    /// Returns every move for the side to move that obeys movement geometry and occupancy.
    ///
    /// These moves may leave the mover's king in check. Castling moves are the exception: they
    /// are only generated if the king is not in check and does not pass through or land on an
    /// attacked square.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();

        for (orig, color, piece) in self.pieces() {
            if color != self.turn {
                continue;
            }
            match piece.movement() {
                Movement::Pawn => self.pawn_moves(orig, &mut moves),
                Movement::Rider { offsets, range } => {
                    for offset in offsets {
                        for dest in offset.extend(orig, range) {
                            match self.piece_at(dest) {
                                None => moves.push(Move::new(orig, dest, MoveType::Normal)),
                                Some((c, _)) => {
                                    if c != color {
                                        moves.push(Move::new(orig, dest, MoveType::Normal));
                                    }
                                    break;
                                },
                            }
                        }
                    }
                },
            }
        }

        self.castling_moves(&mut moves);
        moves
    }

    /// Returns every legal move for the side to move: the pseudo-legal moves which do not leave
    /// the mover's own king attacked.
    ///
    /// ```
    /// use chess_rules::chess::Position;
    /// assert_eq!(Position::new().legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudo_legal_moves().into_iter().filter(|&mv| self.is_legal_after(mv)).collect()
    }

    /// Returns `true` if `mv` is one of the legal moves
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Applies a pseudo-legal move and checks that the mover's king is safe afterward
    fn is_legal_after(&self, mv: Move) -> bool {
        let next = match self.make_move(mv) {
            Ok(next) => next,
            Err(_) => return false,
        };
        match next.king_location(self.turn) {
            Some(king) => !next.is_square_attacked_by(king, next.turn),
            None => false,
        }
    }

    fn pawn_moves(&self, orig: Square, moves: &mut Vec<Move>) {
        let turn = self.turn;
        let forward = turn.forward();
        let mut add = |dest: Square, move_type: MoveType| {
            if dest.rank() == turn.promotion_rank() {
                for &prom in &Promotion::ALL {
                    moves.push(Move::new(orig, dest, MoveType::Promotion(prom)));
                }
            } else {
                moves.push(Move::new(orig, dest, move_type));
            }
        };

        // advances
        if let Some(one) = orig.offset(Offset::new(0, forward)) {
            if self.piece_at(one).is_none() {
                add(one, MoveType::Normal);
                if orig.rank() == turn.pawn_rank() {
                    if let Some(two) = one.offset(Offset::new(0, forward)) {
                        if self.piece_at(two).is_none() {
                            add(two, MoveType::Normal);
                        }
                    }
                }
            }
        }

        // captures
        let ep_rank = (!turn).pawn_rank().offset(-forward);
        for &df in &[-1, 1] {
            let dest = match orig.offset(Offset::new(df, forward)) {
                Some(dest) => dest,
                None => continue,
            };
            match self.piece_at(dest) {
                Some((color, _)) if color != turn => add(dest, MoveType::Normal),
                None if self.ep_square == Some(dest) && Some(dest.rank()) == ep_rank => {
                    add(dest, MoveType::EnPassant);
                },
                _ => {},
            }
        }
    }

    fn castling_moves(&self, moves: &mut Vec<Move>) {
        let turn = self.turn;
        let king = castling::king_square(turn);

        if self.piece_at(king) != Some((turn, Piece::King)) {
            return;
        }

        for &wing in &Wing::ALL {
            if !self.castling.has(turn, wing)
                || self.piece_at(wing.rook_square(turn)) != Some((turn, Piece::Rook)) {
                continue;
            }
            let rank = turn.back_rank();
            let empty = wing.empty_files().iter()
                .all(|&file| self.piece_at(Square::from_coord(file, rank)).is_none());
            if !empty {
                continue;
            }
            let attacked = wing.king_path().iter()
                .any(|&file| self.is_square_attacked_by(Square::from_coord(file, rank), !turn));
            if !attacked {
                let dest = Square::from_coord(wing.king_destination(), rank);
                moves.push(Move::new(king, dest, MoveType::Castling));
            }
        }
    }
}
