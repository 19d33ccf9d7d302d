//! Module for counting and printing the number of variations from a given position
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use log::trace;
use rayon::prelude::*;
use crate::chess::*;

/// Print the number of variations of the given `depth` for each legal move from `pos`, and
/// return the total
pub fn print(pos: &Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for mv in pos.legal_moves() {
        if let Ok(next) = pos.make_move(mv) {
            let count = count(&next, depth - 1);
            trace!("{}: {} variations of depth {}", mv, count, depth - 1);
            total += count;
            println!("\t{:7}\t{:12}\t{}", mv, count, next);
        }
    }

    total
}

/// Count the number of variations of the given `depth` from `pos`
///
/// ```
/// use chess_rules::chess::{Position, variations};
///
/// assert_eq!(variations::count(&Position::new(), 2), 400);
/// ```
pub fn count(pos: &Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len();
    }

    let mut total = 0;
    for mv in moves {
        if let Ok(next) = pos.make_move(mv) {
            total += count(&next, depth - 1);
        }
    }

    total
}

/// Same as `count`, but each legal move from `pos` is counted on its own task in the rayon thread
/// pool
pub fn count_parallel(pos: &Position, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    pos.legal_moves()
        .par_iter()
        .map(|&mv| {
            let n = pos.make_move(mv).map(|next| count(&next, depth - 1)).unwrap_or(0);
            trace!("{}: {} variations of depth {}", mv, n, depth - 1);
            n
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one_variation() {
        assert_eq!(count(&Position::new(), 0), 1);
        assert_eq!(count_parallel(&Position::new(), 0), 1);
        assert_eq!(print(&Position::new(), 0), 1);
    }

    #[test]
    fn start_position() {
        let pos = Position::new();
        assert_eq!(count(&pos, 1), 20);
        assert_eq!(count(&pos, 2), 400);
        assert_eq!(count(&pos, 3), 8902);
    }

    #[test]
    fn print_returns_the_total() {
        assert_eq!(print(&Position::new(), 2), 400);
    }

    #[test]
    fn parallel_count_matches_sequential() -> Result<()> {
        for fen in &[
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ] {
            let pos: Position = fen.parse()?;
            for depth in 1..3 {
                assert_eq!(count_parallel(&pos, depth), count(&pos, depth), "{}", fen);
            }
        }
        Ok(())
    }

    #[test]
    fn mated_side_has_no_variations() -> Result<()> {
        let pos: Position =
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3".parse()?;
        assert_eq!(count(&pos, 1), 0);
        assert_eq!(count(&pos, 3), 0);
        assert_eq!(count_parallel(&pos, 2), 0);
        Ok(())
    }
}
