//! Attack and check detection
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
    /// Returns `true` if any piece of color `c` could capture on `sq`. Sliding pieces are blocked
    /// by the first occupied square; pawns attack only their two forward diagonals.
    pub fn is_square_attacked_by(&self, sq: Square, c: Color) -> bool {
        self.pieces()
            .filter(|&(_, color, _)| color == c)
            .any(|(from, color, piece)| self.attacks(from, color, piece, sq))
    }

    /// Returns `true` if the color to move is in check. A side without a king is never in check.
    pub fn is_in_check(&self) -> bool {
        match self.king_location(self.turn) {
            Some(king) => self.is_square_attacked_by(king, !self.turn),
            None => false,
        }
    }

    fn attacks(&self, from: Square, color: Color, piece: Piece, target: Square) -> bool {
        match piece.movement() {
            Movement::Pawn => {
                [-1, 1].iter()
                    .any(|&df| from.offset(Offset::new(df, color.forward())) == Some(target))
            },
            Movement::Rider { offsets, range } => {
                offsets.iter().any(|offset| {
                    for sq in offset.extend(from, range) {
                        if sq == target {
                            return true;
                        }
                        if self.piece_at(sq).is_some() {
                            break;
                        }
                    }
                    false
                })
            },
        }
    }
}
