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

//! Sliding piece attack oracles.
//!
//! Move generation only asks one question about rooks, bishops and queens:
//! given a square and the set of occupied squares, which squares does the
//! piece reach? Anything answering [`SlidingAttacks`] can back the move
//! generator.
//!
//! # Examples
//!
//! ```
//! use chessbits::{Bitboard, Square};
//! use chessbits::sliding::{Classical, Magics, SlidingAttacks};
//!
//! let occupied = Bitboard::rank(5); // blocking pieces
//! let magics = Magics::new();
//! let attacks = magics.bishop_attacks(Square::C2, occupied);
//! // . . . . . . . .
//! // . . . . . . . .
//! // 0 0 0 0 0 0 1 0
//! // . . . . . 1 . .
//! // 1 . . . 1 . . .
//! // . 1 . 1 . . . .
//! // . . . . . . . .
//! // . 1 . 1 . . . .
//!
//! assert!(attacks.contains(Square::G6));
//! assert!(!attacks.contains(Square::H7));
//! assert_eq!(attacks, Classical.bishop_attacks(Square::C2, occupied));
//! ```

use crate::{bitboard::Bitboard, square::Square};

const ROOK_DELTAS: [i32; 4] = [8, 1, -8, -1];
const BISHOP_DELTAS: [i32; 4] = [9, 7, -9, -7];

/// Ray attack lookup for rooks, bishops and queens.
///
/// Attack sets include the first blocker on each ray, whatever its color.
pub trait SlidingAttacks {
    fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard;

    fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard;

    #[inline]
    fn queen_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occupied) | self.bishop_attacks(sq, occupied)
    }
}

impl<S: SlidingAttacks + ?Sized> SlidingAttacks for &S {
    #[inline]
    fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        (**self).rook_attacks(sq, occupied)
    }

    #[inline]
    fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        (**self).bishop_attacks(sq, occupied)
    }
}

pub(crate) const fn sliding_attacks(square: i32, occupied: u64, deltas: &[i32]) -> u64 {
    let mut attack = 0;

    let mut i = 0;
    let len = deltas.len();
    while i < len {
        let mut previous = square;
        loop {
            let sq = previous + deltas[i];
            let file_diff = (sq & 0x7) - (previous & 0x7);
            if file_diff > 2 || file_diff < -2 || sq < 0 || sq > 63 {
                break;
            }
            let bb = 1 << sq;
            attack |= bb;
            if occupied & bb != 0 {
                break;
            }
            previous = sq;
        }
        i += 1;
    }

    attack
}

/// Scans each ray square by square. No tables, no setup.
#[derive(Debug, Default, Copy, Clone)]
pub struct Classical;

impl SlidingAttacks for Classical {
    #[inline]
    fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        Bitboard(sliding_attacks(sq.to_u32() as i32, occupied.0, &ROOK_DELTAS))
    }

    #[inline]
    fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        Bitboard(sliding_attacks(sq.to_u32() as i32, occupied.0, &BISHOP_DELTAS))
    }
}

/// Collects the bits of `src` selected by `mask` into the low bits of the
/// result, preserving their order.
#[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
#[inline]
fn extract(src: u64, mask: u64) -> u64 {
    // Safety: The target feature is statically enabled.
    unsafe { core::arch::x86_64::_pext_u64(src, mask) }
}

#[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
#[inline]
fn extract(src: u64, mut mask: u64) -> u64 {
    let mut result = 0;
    let mut bit = 1;
    while mask != 0 {
        if src & mask & mask.wrapping_neg() != 0 {
            result |= bit;
        }
        mask &= mask.wrapping_sub(1);
        bit <<= 1;
    }
    result
}

#[derive(Debug, Default, Copy, Clone)]
struct Entry {
    mask: u64,
    offset: usize,
}

/// Occupancy-indexed attack tables.
///
/// For every square only the relevant blockers (the rays without the final
/// edge square) can change the attack set. Those bits are extracted from the
/// occupancy into a dense index into one flat table per piece type, which is
/// filled once by [`Classical`] ray scans. With `bmi2` enabled at compile
/// time, extraction is a single instruction.
///
/// Building the tables takes about 850 KiB of heap memory. The crate keeps
/// one shared instance, see [`crate::attacks::init()`].
#[derive(Clone)]
pub struct Magics {
    rook: [Entry; 64],
    bishop: [Entry; 64],
    rook_table: Vec<Bitboard>,
    bishop_table: Vec<Bitboard>,
}

impl Magics {
    pub fn new() -> Magics {
        let (rook, rook_table) = build_table(&ROOK_DELTAS);
        let (bishop, bishop_table) = build_table(&BISHOP_DELTAS);
        Magics {
            rook,
            bishop,
            rook_table,
            bishop_table,
        }
    }

    /// Total number of precomputed attack sets.
    pub fn len(&self) -> usize {
        self.rook_table.len() + self.bishop_table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Magics {
    fn default() -> Magics {
        Magics::new()
    }
}

impl core::fmt::Debug for Magics {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Magics")
            .field("rook_table", &self.rook_table.len())
            .field("bishop_table", &self.bishop_table.len())
            .finish()
    }
}

fn relevant_mask(square: i32, deltas: &[i32]) -> u64 {
    let sq = Square::new(square as u32);
    let edges = ((Bitboard::rank(0) | Bitboard::rank(7)) & !Bitboard::rank(sq.rank()))
        | ((Bitboard::file(0) | Bitboard::file(7)) & !Bitboard::file(sq.file()));
    sliding_attacks(square, 0, deltas) & !edges.0
}

fn build_table(deltas: &[i32]) -> ([Entry; 64], Vec<Bitboard>) {
    let mut entries = [Entry::default(); 64];
    let mut table = Vec::new();

    for square in 0..64 {
        let mask = relevant_mask(square, deltas);
        let offset = table.len();
        entries[square as usize] = Entry { mask, offset };

        table.resize(offset + (1 << mask.count_ones()), Bitboard::EMPTY);
        for subset in Bitboard(mask).carry_rippler() {
            let idx = offset + extract(subset.0, mask) as usize;
            table[idx] = Bitboard(sliding_attacks(square, subset.0, deltas));
        }
    }

    (entries, table)
}

impl SlidingAttacks for Magics {
    #[inline]
    fn rook_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let e = &self.rook[sq.to_usize()];
        self.rook_table[e.offset + extract(occupied.0, e.mask) as usize]
    }

    #[inline]
    fn bishop_attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let e = &self.bishop[sq.to_usize()];
        self.bishop_table[e.offset + extract(occupied.0, e.mask) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classical_rook_attacks() {
        assert_eq!(
            Classical.rook_attacks(Square::D6, Bitboard(0x3f7f_2880_2826_f5b9)),
            Bitboard(0x0008_3708_0800_0000)
        );
    }

    #[test]
    fn test_magics_rook_attacks() {
        let magics = Magics::new();
        assert_eq!(
            magics.rook_attacks(Square::D6, Bitboard(0x3f7f_2880_2826_f5b9)),
            Bitboard(0x0008_3708_0800_0000)
        );
    }

    #[test]
    fn test_table_sizes() {
        let magics = Magics::new();
        assert_eq!(magics.rook_table.len(), 102_400);
        assert_eq!(magics.bishop_table.len(), 5_248);
    }

    #[test]
    fn test_extract() {
        assert_eq!(extract(!0, 0), 0);
        assert_eq!(extract(!0, !0), !0);
        assert_eq!(extract(7, 1), 1);
        assert_eq!(extract(0b1010, 0b1110), 0b101);
    }

    #[test]
    fn test_oracles_agree() {
        let magics = Magics::new();
        let mut occupied = 0x9e37_79b9_7f4a_7c15u64;
        for _ in 0..64 {
            occupied ^= occupied << 13;
            occupied ^= occupied >> 7;
            occupied ^= occupied << 17;
            for sq in Square::all() {
                let occ = Bitboard(occupied);
                assert_eq!(magics.rook_attacks(sq, occ), Classical.rook_attacks(sq, occ));
                assert_eq!(magics.bishop_attacks(sq, occ), Classical.bishop_attacks(sq, occ));
                assert_eq!(magics.queen_attacks(sq, occ), Classical.queen_attacks(sq, occ));
            }
        }
    }

    #[test]
    fn test_edges_are_reachable() {
        let attacks = Magics::new().rook_attacks(Square::A1, Bitboard::EMPTY);
        assert!(attacks.contains(Square::H1));
        assert!(attacks.contains(Square::A8));
        assert_eq!(attacks.count(), 14);
    }
}
