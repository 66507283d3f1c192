// This file is part of the chessbits library.
// Copyright (C) 2026 The chessbits developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use chessbits::{perft, Position};
//!
//! let pos = Position::new();
//! assert_eq!(perft::perft(&pos, 1), 20);
//! assert_eq!(perft::perft(&pos, 2), 400);
//! assert_eq!(perft::perft(&pos, 3), 8902);
//! ```

use std::{collections::BTreeMap, thread};

use tracing::debug;

use crate::{attacks, movegen, position::Position, sliding::SlidingAttacks};

/// Counts legal move paths of a given length.
///
/// Paths with mate or stalemate are not counted unless it occurs in the final
/// position. Useful for comparing, testing and debugging move generation
/// correctness and performance.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    perft_with(pos, depth, attacks::magics())
}

/// Like [`perft()`], with an explicit sliding attack oracle.
pub fn perft_with<S: SlidingAttacks>(pos: &Position, depth: u32, sliders: &S) -> u64 {
    if depth < 1 {
        1
    } else {
        let moves = movegen::legal_moves_with(pos, sliders);

        if depth == 1 {
            moves.len() as u64
        } else {
            moves
                .into_iter()
                .map(|m| {
                    let mut child = *pos;
                    child.play_unchecked(m);
                    perft_with(&child, depth - 1, sliders)
                })
                .sum()
        }
    }
}

/// Like [`perft()`], but returns the node count below each legal root move,
/// keyed by the move in coordinate notation (`e2e4`, `e7e8q`).
///
/// The counts sum up to `perft(pos, depth)`. An empty map is returned for
/// depth 0.
///
/// # Examples
///
/// ```
/// use chessbits::{perft, Position};
///
/// let divided = perft::perft_divide(&Position::new(), 2);
/// assert_eq!(divided.len(), 20);
/// assert_eq!(divided["g1f3"], 20);
/// assert_eq!(divided.values().sum::<u64>(), 400);
/// ```
pub fn perft_divide(pos: &Position, depth: u32) -> BTreeMap<String, u64> {
    perft_divide_with(pos, depth, attacks::magics())
}

/// Like [`perft_divide()`], with an explicit sliding attack oracle.
pub fn perft_divide_with<S: SlidingAttacks>(
    pos: &Position,
    depth: u32,
    sliders: &S,
) -> BTreeMap<String, u64> {
    let mut divided = BTreeMap::new();
    if depth < 1 {
        return divided;
    }

    for m in movegen::legal_moves_with(pos, sliders) {
        let mut child = *pos;
        child.play_unchecked(m);
        let nodes = perft_with(&child, depth - 1, sliders);
        debug!(%m, nodes, "divide");
        divided.insert(m.to_string(), nodes);
    }

    divided
}

/// Like [`perft()`], but spreads the root moves over `threads` scoped worker
/// threads. Each worker explores its own copies of the position.
///
/// A thread count of 0 is treated as 1.
pub fn perft_parallel(pos: &Position, depth: u32, threads: usize) -> u64 {
    if depth < 2 {
        return perft(pos, depth);
    }

    attacks::init();

    let moves = pos.legal_moves();
    let threads = threads.clamp(1, moves.len().max(1));

    thread::scope(|s| {
        let workers: Vec<_> = (0..threads)
            .map(|worker| {
                let moves = &moves;
                s.spawn(move || {
                    moves
                        .iter()
                        .skip(worker)
                        .step_by(threads)
                        .map(|&m| {
                            let mut child = *pos;
                            child.play_unchecked(m);
                            perft(&child, depth - 1)
                        })
                        .sum::<u64>()
                })
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| match worker.join() {
                Ok(nodes) => nodes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .sum()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sliding::Classical;

    #[test]
    fn test_depth_zero() {
        let pos = Position::new();
        assert_eq!(perft(&pos, 0), 1);
        assert!(perft_divide(&pos, 0).is_empty());
        assert_eq!(perft_parallel(&pos, 0, 4), 1);
    }

    #[test]
    fn test_kiwipete() {
        let pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        assert_eq!(perft(&pos, 1), 48);
        assert_eq!(perft(&pos, 2), 2039);
        assert_eq!(perft_with(&pos, 2, &Classical), 2039);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let pos: Position = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"
            .parse()
            .expect("valid fen");
        let divided = perft_divide(&pos, 3);
        assert_eq!(divided.len(), 14);
        assert_eq!(divided.values().sum::<u64>(), 2812);
    }

    #[test]
    fn test_divide_with_classical() {
        let pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        let classical = perft_divide_with(&pos, 2, &Classical);
        assert_eq!(classical, perft_divide(&pos, 2));
        assert_eq!(classical.len(), 48);
        assert_eq!(classical.values().sum::<u64>(), 2039);
        assert!(perft_divide_with(&pos, 0, &Classical).is_empty());
    }

    #[test]
    fn test_parallel() {
        let pos = Position::new();
        assert_eq!(perft_parallel(&pos, 3, 4), 8902);
        assert_eq!(perft_parallel(&pos, 3, 0), 8902);
        assert_eq!(perft_parallel(&pos, 2, 64), 400);
    }

    #[test]
    fn test_checkmated_root() {
        let pos: Position = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .expect("valid fen");
        assert_eq!(perft(&pos, 1), 0);
        assert_eq!(perft_parallel(&pos, 3, 2), 0);
    }
}
