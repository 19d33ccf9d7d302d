//! Reading and writing positions in Forsyth-Edwards Notation
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use super::*;

impl Position {
    /// Parse a position from a FEN string.
    ///
    /// Only the syntax is checked. A position with, say, no kings parses successfully; use
    /// `Position::legality` to check it.
    pub fn from_fen_str(s: &str) -> Result<Position> {
        use FenError::*;

        let fields: Vec<&str> = s.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FieldCount(fields.len()).into());
        }

        let mut builder = PositionBuilder::new();
        parse_board(fields[0], &mut builder)?;

        builder.turn(fields[1].parse().map_err(|_| Turn)?);
        builder.castling_rights(fields[2].parse()?);

        builder.en_passant_square(match fields[3] {
            "-" => None,
            sq => Some(sq.parse().map_err(|_| EnPassant)?),
        });

        builder.halfmove_clock(fields[4].parse().map_err(|_| HalfmoveClock)?);

        match fields[5].parse::<usize>() {
            Ok(n) if n > 0 => builder.fullmove_number(n),
            _ => return Err(FullmoveNumber.into()),
        };

        Ok(builder.build())
    }

    /// Converts the position to a FEN string
    pub fn to_fen_str(&self) -> String {
        let mut board = String::new();

        for rank in Rank::all().rev() {
            let mut empty = 0;
            for file in File::all() {
                match self.piece_at(Square::from_coord(file, rank)) {
                    Some((color, piece)) => {
                        if empty > 0 {
                            board += &empty.to_string();
                            empty = 0;
                        }
                        board.push(piece.fen_char(color));
                    },
                    None => empty += 1,
                }
            }
            if empty > 0 {
                board += &empty.to_string();
            }
            if rank != Rank::R1 {
                board.push('/');
            }
        }

        let ep_square = match self.ep_square {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", board, self.turn, self.castling, ep_square,
                                     self.halfmove_clock, self.fullmove_number)
    }
}

/// Places the pieces from the FEN board field, ranks 8 through 1 separated by `/`
fn parse_board(field: &str, builder: &mut PositionBuilder) -> Result<()> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != Rank::COUNT {
        return Err(FenError::Board.into());
    }

    for (rank, text) in Rank::all().rev().zip(ranks) {
        let mut f = 0;
        for c in text.chars() {
            match c {
                '1' ..= '8' => f += c as usize - '0' as usize,
                _ => {
                    let (color, piece) = Piece::from_fen_char(c).ok_or(FenError::Board)?;
                    let file = File::try_from(f).map_err(|_| FenError::Board)?;
                    builder.piece(color, piece, Square::from_coord(file, rank));
                    f += 1;
                },
            }
            if f > File::COUNT {
                return Err(FenError::Board.into());
            }
        }
        if f != File::COUNT {
            return Err(FenError::Board.into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use FenError::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn fen_error(s: &str) -> Option<FenError> {
        match Position::from_fen_str(s) {
            Err(Error::Fen(err)) => Some(err),
            _ => None,
        }
    }

    #[test]
    fn back_to_identical_fen() -> Result<()> {
        for fen in &[
            START,
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 b - - 13 47",
        ] {
            assert_eq!(Position::from_fen_str(fen)?.to_fen_str(), *fen);
        }
        Ok(())
    }

    #[test]
    fn fields_are_read_into_the_position() -> Result<()> {
        let pos = Position::from_fen_str("4k2r/8/8/8/8/8/8/R3K3 b Qk e3 7 31")?;
        assert_eq!(pos.turn(), Color::Black);
        assert_eq!(pos.piece_at(Square::H8), Some((Color::Black, Piece::Rook)));
        assert_eq!(pos.piece_at(Square::A1), Some((Color::White, Piece::Rook)));
        assert_eq!(pos.piece_at(Square::E4), None);
        assert!(pos.castling_rights().has(Color::White, Wing::QueenSide));
        assert!(!pos.castling_rights().has(Color::White, Wing::KingSide));
        assert!(pos.castling_rights().has(Color::Black, Wing::KingSide));
        assert_eq!(pos.en_passant_square(), Some(Square::E3));
        assert_eq!(pos.halfmove_clock(), 7);
        assert_eq!(pos.fullmove_number(), 31);
        Ok(())
    }

    #[test]
    fn syntax_is_the_only_check() {
        assert!(Position::from_fen_str("8/8/8/8/8/8/8/8 w - - 0 1").is_ok());
        assert!(Position::from_fen_str("P7/8/8/8/8/8/8/8 w KQkq a1 0 1").is_ok());
    }

    #[test]
    fn field_count_must_be_six() {
        assert_eq!(fen_error(""), Some(FieldCount(0)));
        assert_eq!(fen_error("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Some(FieldCount(4)));
        assert_eq!(fen_error(&format!("{} 1", START)), Some(FieldCount(7)));
    }

    #[test]
    fn bad_board_field() {
        for board in &[
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP",           // too few ranks
            "rnbqkbnr/pppppppp/8/8/8/8/8/PPPPPPPP/RNBQKBNR", // too many ranks
            "rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",   // rank too short
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR",  // bad digit
            "rnbqkbnr/pppppppp/81/8/8/8/PPPPPPPP/RNBQKBNR", // rank too long
            "rnbqkbnrp/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", // rank too long
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBXKBNR",  // not a piece
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/", // trailing slash
        ] {
            assert_eq!(fen_error(&format!("{} w KQkq - 0 1", board)), Some(Board), "{}", board);
        }
    }

    #[test]
    fn bad_turn_field() {
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 W - - 0 1"), Some(Turn));
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 x - - 0 1"), Some(Turn));
    }

    #[test]
    fn bad_castling_field() {
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 w KQkx - 0 1"), Some(Castling));
    }

    #[test]
    fn bad_en_passant_field() {
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 w - e9 0 1"), Some(EnPassant));
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 w - e 0 1"), Some(EnPassant));
    }

    #[test]
    fn bad_clock_fields() {
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 w - - -1 1"), Some(HalfmoveClock));
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 w - - x 1"), Some(HalfmoveClock));
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 w - - 0 0"), Some(FullmoveNumber));
        assert_eq!(fen_error("8/8/8/8/8/8/8/8 w - - 0 one"), Some(FullmoveNumber));
    }
}
