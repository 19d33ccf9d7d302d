//! Standard Algebraic Notation: writing moves as SAN and resolving SAN back into moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::debug;
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Writes `mv`, which must be legal in `pos`, in Standard Algebraic Notation (eg Nf3, exd5, e8=Q,
/// O-O, Rae1+, or Qh4#).
///
/// ```
/// use chess_rules::chess::{Position, MoveBuilder, san};
///
/// let pos = Position::new();
/// let mv = "g1f3".parse::<MoveBuilder>()?.validate(&pos)?;
/// assert_eq!(san::to_san(&pos, mv)?, "Nf3");
/// # Ok::<(), chess_rules::chess::Error>(())
/// ```
pub fn to_san(pos: &Position, mv: Move) -> Result<String> {
    let legal = pos.legal_moves();
    if !legal.contains(&mv) {
        return Err(Error::IllegalMove);
    }

    let (orig, dest) = (mv.origin(), mv.destination());
    let piece = match pos.piece_at(orig) {
        Some((_, piece)) => piece,
        None => return Err(Error::IllegalMove),
    };
    let is_capture = pos.piece_at(dest).is_some() || mv.move_type() == MoveType::EnPassant;

    let mut s = String::new();

    if mv.is_castling() {
        s += match dest.file() {
            File::G => "O-O",
            File::C => "O-O-O",
            _ => return Err(Error::InvalidMoveShape),
        };
    } else if piece == Piece::Pawn {
        if is_capture {
            s.push(orig.file().to_char());
            s.push('x');
        }
        s += &dest.to_string();
        if let Some(prom) = mv.promotion() {
            s.push('=');
            s.push(prom.letter());
        }
    } else {
        s.push(piece.letter());
        s += &disambiguation(pos, &legal, piece, mv);
        if is_capture {
            s.push('x');
        }
        s += &dest.to_string();
    }

    let next = pos.make_move(mv)?;
    if next.is_in_check() {
        s.push(if next.legal_moves().is_empty() { '#' } else { '+' });
    }

    Ok(s)
}

/// The shortest origin qualifier (nothing, file, rank, or square) that tells `mv` apart from the
/// other legal moves of the same kind of piece to the same destination
fn disambiguation(pos: &Position, legal: &[Move], piece: Piece, mv: Move) -> String {
    let orig = mv.origin();
    let rivals: Vec<Square> = legal.iter()
        .filter(|m| m.destination() == mv.destination() && m.origin() != orig && !m.is_castling())
        .map(|m| m.origin())
        .filter(|&sq| pos.piece_at(sq).map(|(_, p)| p) == Some(piece))
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.file() != orig.file()) {
        orig.file().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != orig.rank()) {
        orig.rank().to_string()
    } else {
        orig.to_string()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
lazy_static! {
    static ref KING_SIDE_CASTLE: Regex = Regex::new(r"^(?:O-O|0-0)$").expect("INFALLIBLE");
    static ref QUEEN_SIDE_CASTLE: Regex = Regex::new(r"^(?:O-O-O|0-0-0)$").expect("INFALLIBLE");
    static ref PAWN_MOVE: Regex =
        Regex::new(r"^(?:([a-h])x)?([a-h][1-8])(?:=?([NBRQ]))?$").expect("INFALLIBLE");
    static ref PIECE_MOVE: Regex =
        Regex::new(r"^([NBRQK])([a-h])?([1-8])?(x)?([a-h][1-8])$").expect("INFALLIBLE");
}

/// Resolves a move written in Standard Algebraic Notation to the legal move it names in `pos`.
///
/// Check, mate, and annotation suffixes (`+`, `#`, `!`, `?`) are ignored, and castling may be
/// written with zeros. If more than one piece could make the move and the text does not say
/// which, candidates that would leave their own king capturable are discarded; if that still
/// leaves more than one, the move is ambiguous.
///
/// ```
/// use chess_rules::chess::{Position, Square, san};
///
/// let pos = Position::new();
/// let mv = san::from_san(&pos, "e4")?;
/// assert_eq!(mv.origin(), Square::E2);
/// assert_eq!(mv.destination(), Square::E4);
/// # Ok::<(), chess_rules::chess::Error>(())
/// ```
pub fn from_san(pos: &Position, text: &str) -> Result<Move> {
    let san = text.trim().trim_end_matches(|c: char| "+#!?".contains(c));

    let mv = if KING_SIDE_CASTLE.is_match(san) {
        castle(pos, Wing::KingSide)
    } else if QUEEN_SIDE_CASTLE.is_match(san) {
        castle(pos, Wing::QueenSide)
    } else if let Some(caps) = PAWN_MOVE.captures(san) {
        let capture_file = caps.get(1).and_then(|m| m.as_str().chars().next());
        let dest: Square = caps[2].parse()?;
        let prom = caps.get(3).and_then(|m| m.as_str().parse::<Piece>().ok());
        pawn_move(pos, capture_file.and_then(File::from_char), dest, prom)?
    } else if let Some(caps) = PIECE_MOVE.captures(san) {
        let piece: Piece = caps[1].parse()?;
        let file = caps.get(2).and_then(|m| m.as_str().chars().next()).and_then(File::from_char);
        let rank = caps.get(3).and_then(|m| m.as_str().chars().next()).and_then(Rank::from_char);
        let dest: Square = caps[5].parse()?;
        piece_move(pos, text, piece, file, rank, dest)?
    } else {
        debug!("{}: not SAN", text);
        return Err(Error::MalformedMove(text.to_owned()));
    };

    if pos.is_legal(mv) {
        Ok(mv)
    } else {
        debug!("{}: illegal in {}", text, pos);
        Err(Error::IllegalMove)
    }
}

fn castle(pos: &Position, wing: Wing) -> Move {
    let rank = pos.turn().back_rank();
    Move::new(Square::from_coord(File::E, rank),
              Square::from_coord(wing.king_destination(), rank),
              MoveType::Castling)
}

fn pawn_move(pos: &Position, capture_file: Option<File>, dest: Square, prom: Option<Piece>)
    -> Result<Move>
{
    let turn = pos.turn();
    let back = Offset::new(0, -turn.forward());
    let one_back = dest.offset(back).ok_or(Error::IllegalMove)?;

    let (orig, is_capture) = match capture_file {
        Some(file) => (Square::from_coord(file, one_back.rank()), true),
        None => {
            if pos.piece_at(one_back).is_none() {
                (one_back.offset(back).ok_or(Error::IllegalMove)?, false)
            } else {
                (one_back, false)
            }
        },
    };

    let move_type = match prom {
        Some(piece) => {
            MoveType::Promotion(Promotion::from_piece(piece).ok_or(Error::IllegalMove)?)
        },
        None if is_capture && pos.piece_at(dest).is_none()
            && pos.en_passant_square() == Some(dest) => MoveType::EnPassant,
        None => MoveType::Normal,
    };

    Ok(Move::new(orig, dest, move_type))
}

fn piece_move(pos: &Position, text: &str, piece: Piece, file: Option<File>, rank: Option<Rank>,
    dest: Square) -> Result<Move>
{
    let mut candidates: Vec<Move> = pos.pseudo_legal_moves().into_iter()
        .filter(|mv| mv.destination() == dest && mv.move_type() == MoveType::Normal)
        .filter(|mv| pos.piece_at(mv.origin()).map(|(_, p)| p) == Some(piece))
        .collect();

    if candidates.len() > 1 {
        candidates.retain(|mv| {
            file.map_or(true, |f| mv.origin().file() == f)
                && rank.map_or(true, |r| mv.origin().rank() == r)
        });
    }

    if candidates.is_empty() {
        return Err(Error::IllegalMove);
    }

    if candidates.len() > 1 {
        debug!("{}: {} candidates, discarding those exposing their king", text, candidates.len());
        candidates.retain(|&mv| match pos.make_move(mv) {
            Ok(next) => next.legality() != Legality::CanCaptureKing,
            Err(_) => false,
        });
    }

    match candidates.as_slice() {
        &[mv] => Ok(mv),
        _ => {
            debug!("{}: ambiguous in {}", text, pos);
            Err(Error::AmbiguousMove(text.to_owned()))
        },
    }
}
