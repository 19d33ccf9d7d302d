//! Direction vectors and the movement geometry of each kind of piece
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
/// A step across the board, measured in files and ranks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Files to the right (negative for left)
    pub file: i8,
    /// Ranks up (negative for down)
    pub rank: i8,
}

impl Offset {
    /// One square in each of the eight directions
    pub const KING: [Offset; 8] = [
        Offset::new(-1, -1), Offset::new(-1, 0), Offset::new(-1, 1), Offset::new(0, -1),
        Offset::new(0, 1), Offset::new(1, -1), Offset::new(1, 0), Offset::new(1, 1),
    ];

    /// The eight L-shaped jumps
    pub const KNIGHT: [Offset; 8] = [
        Offset::new(-2, -1), Offset::new(-2, 1), Offset::new(-1, -2), Offset::new(-1, 2),
        Offset::new(1, -2), Offset::new(1, 2), Offset::new(2, -1), Offset::new(2, 1),
    ];

    /// The four diagonals
    pub const BISHOP: [Offset; 4] = [
        Offset::new(-1, -1), Offset::new(-1, 1), Offset::new(1, -1), Offset::new(1, 1),
    ];

    /// The four orthogonals
    pub const ROOK: [Offset; 4] = [
        Offset::new(-1, 0), Offset::new(0, -1), Offset::new(0, 1), Offset::new(1, 0),
    ];

    /// Creates an offset
    pub const fn new(file: i8, rank: i8) -> Offset {
        Offset { file, rank }
    }

    /// Walks from `origin` in this direction for at most `range` steps, stopping at the edge of
    /// the board. The origin itself is not included.
    ///
    /// # Example
    /// ```
    /// use chess_rules::chess::{Offset, Square};
    /// let ray: Vec<Square> = Offset::new(1, 1).extend(Square::E4, usize::max_value()).collect();
    /// assert_eq!(ray, vec![Square::F5, Square::G6, Square::H7]);
    /// ```
    pub fn extend(self, origin: Square, range: usize) -> Extend {
        Extend { offset: self, next: Some(origin), remaining: range }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Iterator returned by `Offset::extend`
#[derive(Debug, Clone)]
pub struct Extend {
    offset: Offset,
    next: Option<Square>,
    remaining: usize,
}

impl Iterator for Extend {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.next = self.next?.offset(self.offset);
        self.next
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// How a kind of piece moves
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Movement {
    /// Pawns push, double-push, capture diagonally and capture en passant, so they get dedicated
    /// handling wherever moves or attacks are computed.
    Pawn,
    /// Repeats any one of a set of offsets up to `range` times.
    Rider {
        /// The directions the piece can travel
        offsets: &'static [Offset],
        /// `1` for leapers, unbounded for sliders
        range: usize,
    },
}

/// Range of the sliding pieces
pub const UNBOUNDED: usize = usize::MAX;

const QUEEN: [Offset; 8] = Offset::KING;

impl Piece {
    /// Returns the movement geometry of this kind of piece
    pub fn movement(self) -> Movement {
        match self {
            Piece::Pawn => Movement::Pawn,
            Piece::Knight => Movement::Rider { offsets: &Offset::KNIGHT, range: 1 },
            Piece::Bishop => Movement::Rider { offsets: &Offset::BISHOP, range: UNBOUNDED },
            Piece::Rook => Movement::Rider { offsets: &Offset::ROOK, range: UNBOUNDED },
            Piece::Queen => Movement::Rider { offsets: &QUEEN, range: UNBOUNDED },
            Piece::King => Movement::Rider { offsets: &Offset::KING, range: 1 },
        }
    }
}
