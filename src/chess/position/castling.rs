//! Castling availability and the board geometry of each castling wing
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
/// The side of the board a king castles toward
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Wing {
    KingSide,
    QueenSide,
}

impl Wing {
    /// Both wings, king side first
    pub const ALL: [Wing; 2] = [Wing::KingSide, Wing::QueenSide];

    /// File the castling rook starts on
    pub fn rook_file(self) -> File {
        match self {
            Wing::KingSide => File::H,
            Wing::QueenSide => File::A,
        }
    }

    /// File the king lands on
    pub fn king_destination(self) -> File {
        match self {
            Wing::KingSide => File::G,
            Wing::QueenSide => File::C,
        }
    }

    /// File the rook lands on
    pub fn rook_destination(self) -> File {
        match self {
            Wing::KingSide => File::F,
            Wing::QueenSide => File::D,
        }
    }

    /// Files between king and rook, which must all be empty
    pub fn empty_files(self) -> &'static [File] {
        match self {
            Wing::KingSide => &[File::F, File::G],
            Wing::QueenSide => &[File::B, File::C, File::D],
        }
    }

    /// Files the king starts on, crosses, and lands on; none may be attacked
    pub fn king_path(self) -> &'static [File] {
        match self {
            Wing::KingSide => &[File::E, File::F, File::G],
            Wing::QueenSide => &[File::E, File::D, File::C],
        }
    }

    /// Returns the wing whose king destination is `file`
    pub fn from_king_destination(file: File) -> Option<Wing> {
        match file {
            File::G => Some(Wing::KingSide),
            File::C => Some(Wing::QueenSide),
            _ => None,
        }
    }

    /// The rook's home square for `color` on this wing
    pub fn rook_square(self, color: Color) -> Square {
        Square::from_coord(self.rook_file(), color.back_rank())
    }
}

/// The king's home square for `color`
pub fn king_square(color: Color) -> Square {
    Square::from_coord(File::E, color.back_rank())
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The four independent castling rights: one per color and wing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    king_side: [bool; Color::COUNT],
    queen_side: [bool; Color::COUNT],
}

impl CastlingRights {
    /// No castling rights at all
    pub fn none() -> Self {
        CastlingRights::default()
    }

    /// Every castling right, as in the starting position
    pub fn all() -> Self {
        CastlingRights { king_side: [true; Color::COUNT], queen_side: [true; Color::COUNT] }
    }

    /// Returns `true` if `color` may still castle on `wing`
    pub fn has(&self, color: Color, wing: Wing) -> bool {
        match wing {
            Wing::KingSide => self.king_side[color as usize],
            Wing::QueenSide => self.queen_side[color as usize],
        }
    }

    /// Returns `true` if `color` may still castle on either wing
    pub fn has_any(&self, color: Color) -> bool {
        self.king_side[color as usize] || self.queen_side[color as usize]
    }

    /// Grants or removes the right for `color` to castle on `wing`
    pub fn set(&mut self, color: Color, wing: Wing, available: bool) -> &mut Self {
        match wing {
            Wing::KingSide => self.king_side[color as usize] = available,
            Wing::QueenSide => self.queen_side[color as usize] = available,
        }
        self
    }

    fn flag_char(color: Color, wing: Wing) -> char {
        let c = match wing {
            Wing::KingSide => 'K',
            Wing::QueenSide => 'Q',
        };
        if color == Color::White { c } else { c.to_ascii_lowercase() }
    }
}

impl fmt::Display for CastlingRights {
    /// Formats as the FEN castling field: a subset of "KQkq" in that order, or "-"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for &color in &[Color::White, Color::Black] {
            for &wing in &Wing::ALL {
                if self.has(color, wing) {
                    s.push(CastlingRights::flag_char(color, wing));
                }
            }
        }
        if s.is_empty() {
            s.push('-');
        }
        s.fmt(f)
    }
}

impl FromStr for CastlingRights {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut rights = CastlingRights::none();
        if s == "-" {
            return Ok(rights);
        }
        if s.is_empty() {
            return Err(FenError::Castling.into());
        }
        for c in s.chars() {
            match c {
                'K' => rights.set(Color::White, Wing::KingSide, true),
                'Q' => rights.set(Color::White, Wing::QueenSide, true),
                'k' => rights.set(Color::Black, Wing::KingSide, true),
                'q' => rights.set(Color::Black, Wing::QueenSide, true),
                _ => return Err(FenError::Castling.into()),
            };
        }
        Ok(rights)
    }
}
