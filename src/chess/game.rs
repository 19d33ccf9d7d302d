//! Module to replay a chess game as a sequence of moves
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::slice::SliceIndex;
use std::ops::Index;
use std::iter::FromIterator;
use std::sync::Arc;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use super::*;

lazy_static! {
    static ref MOVE_NUMBER: Regex = Regex::new(r"^[0-9]+\.+").expect("INFALLIBLE");
}

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A structure to represent a sequence of legal moves and the positions they lead to
///
/// ```
/// use chess_rules::chess::game::MoveSequence;
///
/// let mut seq = MoveSequence::new();
/// seq.push_san("e4")?;
/// seq.push_san("e5")?;
/// seq.push_san("Nf3")?;
/// assert_eq!(seq.to_string(), "1. e4 e5 2. Nf3");
/// assert_eq!(format!("{:#}", seq), "e2e4 e7e5 g1f3");
/// # Ok::<(), chess_rules::chess::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveSequence {
    moves: Vec<Move>,
    // always one longer than `moves`; `positions[i]` is the position `moves[i]` is played from
    positions: Vec<Arc<Position>>,
}

impl MoveSequence {
    /// Constructs an empty `MoveSequence` starting at the standard starting position.
    pub fn new() -> MoveSequence {
        MoveSequence::starting_at(Position::new())
    }

    /// Constructs an empty `MoveSequence` starting at the given initial position.
    pub fn starting_at(initial_pos: Position) -> MoveSequence {
        MoveSequence {
            moves: Vec::new(),
            positions: vec![Arc::new(initial_pos)],
        }
    }

    /// Adds a move onto the end of the move sequence and returns the resulting position.
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalMove` if `mv` is not a legal move in `self.final_position()`.
    pub fn push(&mut self, mv: Move) -> Result<&Arc<Position>> {
        let next = {
            let pos = self.final_position();
            if !pos.is_legal(mv) {
                debug!("{}: rejected after {} moves, illegal in {}", mv, self.len(), pos);
                return Err(Error::IllegalMove);
            }
            pos.make_move(mv)?
        };

        self.moves.push(mv);
        self.positions.push(Arc::new(next));
        Ok(self.final_position())
    }

    /// Resolves `text` as Standard Algebraic Notation in the final position and adds the move.
    pub fn push_san(&mut self, text: &str) -> Result<&Arc<Position>> {
        let mv = san::from_san(self.final_position(), text).map_err(|e| {
            debug!("{}: rejected after {} moves: {}", text, self.len(), e);
            e
        })?;
        self.push(mv)
    }

    /// Resolves `text` as coordinate notation (eg `e2e4`) in the final position and adds the move.
    pub fn push_str(&mut self, text: &str) -> Result<&Arc<Position>> {
        let mv = text.parse::<MoveBuilder>()?.validate(self.final_position())?;
        self.push(mv)
    }

    /// Resolves each token of a movetext string as SAN and adds the moves in order. Move numbers
    /// (`1.`, `1...`, or a `12.` prefix glued to the move) and game results are skipped.
    ///
    /// On error, the moves before the offending token remain in the sequence.
    pub fn push_movetext(&mut self, text: &str) -> Result<&Arc<Position>> {
        for token in text.split_whitespace() {
            if RESULT_TOKENS.contains(&token) {
                continue;
            }
            let token = MOVE_NUMBER.replace(token, "");
            if token.is_empty() {
                continue;
            }
            self.push_san(&token)?;
        }
        Ok(self.final_position())
    }

    /// Removes the last move from the move sequence and returns it, or `None` if it is empty.
    pub fn pop(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        self.positions.pop();
        Some(mv)
    }

    /// Shortens the move sequence, keeping the first `len` moves and dropping the rest.
    ///
    /// If `len` is greater than the move sequence's current length, this has no effect.
    pub fn truncate(&mut self, len: usize) {
        self.moves.truncate(len);
        self.positions.truncate(len + 1);
    }

    /// Removes all moves from the move sequence, leaving only the initial position.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Returns the number of moves in the move sequence.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns `true` if the move sequence contains no moves.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the initial position of the move sequence.
    pub fn initial_position(&self) -> &Arc<Position> {
        &self.positions[0]
    }

    /// Returns the final position of the move sequence.
    pub fn final_position(&self) -> &Arc<Position> {
        &self.positions[self.moves.len()]
    }

    /// Extracts a slice containing the entire move sequence.
    pub fn as_slice(&self) -> &[Move] {
        self.moves.as_slice()
    }

    /// Returns a reference to a move or subslice of moves, depending on the type of index.
    pub fn get<I>(&self, index: I) -> Option<&<I as SliceIndex<[Move]>>::Output>
        where I: SliceIndex<[Move]> {
        self.moves.get(index)
    }

    /// Returns a reference to the position at `index` or `None` if out of bounds.
    ///
    /// Note that an index of `self.len()` is in bounds and will return the final position, which
    /// is the result of the last move.
    pub fn position(&self, index: usize) -> Option<&Arc<Position>> {
        self.positions.get(index)
    }

    /// Returns an iterator over the move sequence.
    pub fn iter(&self) -> Iter<'_> {
        self.moves.iter()
    }

    /// Returns an iterator over the positions in the move sequence, from the intial position up to
    /// and including the final position.
    pub fn positions(&self) -> Positions<'_> {
        self.positions.iter()
    }

    /// Returns an iterator over each move along with the position it was played from.
    pub fn plies(&self) -> impl Iterator<Item = (&Position, Move)> + '_ {
        self.positions.iter().map(Arc::as_ref).zip(self.moves.iter().copied())
    }
}

impl Default for MoveSequence {
    fn default() -> Self {
        MoveSequence::new()
    }
}

impl IntoIterator for MoveSequence {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for Result<MoveSequence> {
    fn from_iter<I: IntoIterator<Item=Move>>(iter: I) -> Self {
        let mut seq = MoveSequence::new();

        for mv in iter {
            seq.push(mv)?;
        }

        Ok(seq)
    }
}

impl<I> Index<I> for MoveSequence where I: SliceIndex<[Move]> {
    type Output = I::Output;

    fn index(&self, index: I) -> &Self::Output {
        &self.moves[index]
    }
}

impl fmt::Display for MoveSequence {
    /// The sequence is formatted as follows:
    ///
    /// "{}" -- Numbered Standard Algebraic Notation (eg 1. e4 e5 2. Nf3)
    ///
    /// "{:#}" -- A space delimited sequence in coordinate notation (eg e2e4 e7e5 g1f3)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = Vec::with_capacity(self.len() * 3 / 2 + 1);

        if f.alternate() {
            tokens.extend(self.iter().map(Move::to_string));
        } else {
            for (i, (pos, mv)) in self.plies().enumerate() {
                if pos.turn() == Color::White {
                    tokens.push(format!("{}.", pos.fullmove_number()));
                } else if i == 0 {
                    tokens.push(format!("{}...", pos.fullmove_number()));
                }
                tokens.push(san::to_san(pos, mv).map_err(|_| fmt::Error)?);
            }
        }

        tokens.join(" ").fmt(f)
    }
}

impl FromStr for MoveSequence {
    type Err = Error;

    /// Parses a movetext string of SAN moves played from the standard starting position
    fn from_str(s: &str) -> Result<Self> {
        let mut seq = MoveSequence::new();
        seq.push_movetext(s)?;
        Ok(seq)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Iterator over the moves in a MoveSequence
pub type Iter<'a> = std::slice::Iter<'a, Move>;

/// An iterator over the positions in the move sequence, from the intial position up to and
/// including the final position.
pub type Positions<'a> = std::slice::Iter<'a, Arc<Position>>;

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_applies_legal_moves() -> Result<()> {
        let mut seq = MoveSequence::new();
        let mv = Move::new(Square::E2, Square::E4, MoveType::Normal);
        let pos = seq.push(mv)?.clone();
        assert_eq!(pos.to_fen_str(),
                   "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq[0], mv);
        assert_eq!(seq.final_position(), &pos);
        assert_eq!(seq.initial_position().as_ref(), &Position::new());
        Ok(())
    }

    #[test]
    fn push_rejects_illegal_moves() -> Result<()> {
        let mut seq = MoveSequence::new();
        assert_eq!(seq.push(Move::new(Square::E2, Square::E5, MoveType::Normal)),
                   Err(Error::IllegalMove));
        assert_eq!(seq.push(Move::new(Square::E7, Square::E5, MoveType::Normal)),
                   Err(Error::IllegalMove));
        assert!(seq.is_empty());
        assert_eq!(seq.push_san("Nf6"), Err(Error::IllegalMove));
        assert_eq!(seq.push_san("Zz9"), Err(Error::MalformedMove("Zz9".to_owned())));
        assert!(seq.is_empty());
        Ok(())
    }

    #[test]
    fn pop_and_truncate_restore_earlier_positions() -> Result<()> {
        let mut seq: MoveSequence = "1. e4 e5 2. Nf3 Nc6 3. Bb5".parse()?;
        assert_eq!(seq.len(), 5);
        let after_two = seq.position(2).cloned();

        assert_eq!(seq.pop(), Some(Move::new(Square::F1, Square::B5, MoveType::Normal)));
        assert_eq!(seq.len(), 4);
        seq.truncate(10);
        assert_eq!(seq.len(), 4);
        seq.truncate(2);
        assert_eq!(Some(seq.final_position().clone()), after_two);
        seq.clear();
        assert!(seq.is_empty());
        assert_eq!(seq.pop(), None);
        assert_eq!(seq.final_position().as_ref(), &Position::new());
        Ok(())
    }

    #[test]
    fn positions_include_initial_and_final() -> Result<()> {
        let seq: MoveSequence = "e4 e5".parse()?;
        let positions: Vec<_> = seq.positions().map(|p| p.to_fen_str()).collect();
        assert_eq!(positions, vec![
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        ]);
        assert_eq!(seq.position(3), None);
        Ok(())
    }

    #[test]
    fn movetext_skips_numbers_and_results() -> Result<()> {
        let seq: MoveSequence = "1.f3 e5 2. g4?? Qh4# 0-1".parse()?;
        assert_eq!(seq.len(), 4);
        assert!(seq.final_position().is_checkmate());
        assert_eq!(seq.to_string(), "1. f3 e5 2. g4 Qh4#");

        let seq: MoveSequence = "1. e4 1... e5 *".parse()?;
        assert_eq!(seq.len(), 2);
        Ok(())
    }

    #[test]
    fn movetext_errors_keep_earlier_moves() {
        let mut seq = MoveSequence::new();
        assert_eq!(seq.push_movetext("1. e4 e5 2. Ke3"), Err(Error::IllegalMove));
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn display_numbers_a_black_first_move() -> Result<()> {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 20".parse()?;
        let mut seq = MoveSequence::starting_at(pos);
        seq.push_san("O-O-O")?;
        seq.push_san("O-O")?;
        seq.push_str("d8d2")?;
        assert_eq!(seq.to_string(), "20... O-O-O 21. O-O Rd2");
        assert_eq!(format!("{:#}", seq), "e8c8 e1g1 d8d2");
        Ok(())
    }

    #[test]
    fn collect_from_moves() {
        let moves = vec![
            Move::new(Square::G1, Square::F3, MoveType::Normal),
            Move::new(Square::G8, Square::F6, MoveType::Normal),
        ];
        let seq: Result<MoveSequence> = moves.iter().copied().collect();
        assert_eq!(seq.map(|s| s.len()), Ok(2));

        let seq: Result<MoveSequence> = moves.into_iter().rev().collect();
        assert_eq!(seq.map(|s| s.len()), Err(Error::IllegalMove));
    }
}
