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

//! Zobrist hashing for positions.
//!
//! Keys are drawn from a fixed SplitMix64 stream at compile time, so hashes
//! are stable across runs and platforms. The hash covers piece placement,
//! side to move, castling rights and a capturable en passant file. Move
//! counters are not included.
//!
//! # Examples
//!
//! ```
//! use chessbits::Position;
//!
//! let a: Position = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse()?;
//! let b: Position = "4k3/8/8/8/8/8/8/4K2R w K - 17 42".parse()?;
//! let c: Position = "4k3/8/8/8/8/8/8/4K2R w - - 0 1".parse()?;
//! assert_eq!(a.zobrist_hash(), b.zobrist_hash());
//! assert_ne!(a.zobrist_hash(), c.zobrist_hash());
//! # Ok::<_, chessbits::fen::ParseFenError>(())
//! ```

use core::{
    fmt,
    ops::{BitXor, BitXorAssign},
};

use crate::{castling::CastlingRights, square::Square, types::Piece};

/// A 64 bit Zobrist hash.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zobrist64(pub u64);

impl BitXor for Zobrist64 {
    type Output = Zobrist64;

    #[inline]
    fn bitxor(self, other: Zobrist64) -> Zobrist64 {
        Zobrist64(self.0 ^ other.0)
    }
}

impl BitXorAssign for Zobrist64 {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Zobrist64) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for Zobrist64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zobrist64({:#018x})", self.0)
    }
}

impl fmt::LowerHex for Zobrist64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Zobrist64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

const PIECE_OFFSET: usize = 0;
const WHITE_TURN_OFFSET: usize = 12 * 64;
const CASTLING_OFFSET: usize = WHITE_TURN_OFFSET + 1;
const EN_PASSANT_OFFSET: usize = CASTLING_OFFSET + 4;
const KEY_COUNT: usize = EN_PASSANT_OFFSET + 8;

const SEED: u64 = 0x6368_6573_7362_6974;

const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    (state, z ^ (z >> 31))
}

const fn generate_keys() -> [u64; KEY_COUNT] {
    let mut keys = [0; KEY_COUNT];
    let mut state = SEED;
    let mut i = 0;
    while i < KEY_COUNT {
        let (next, key) = splitmix64(state);
        keys[i] = key;
        state = next;
        i += 1;
    }
    keys
}

static KEYS: [u64; KEY_COUNT] = generate_keys();

/// Key for `piece` standing on `sq`.
#[inline]
pub fn piece(piece: Piece, sq: Square) -> Zobrist64 {
    Zobrist64(KEYS[PIECE_OFFSET + piece.index() * 64 + sq.to_usize()])
}

/// Key mixed in when white is to move.
#[inline]
pub fn white_to_move() -> Zobrist64 {
    Zobrist64(KEYS[WHITE_TURN_OFFSET])
}

/// Combined key of all castling rights in `rights`.
pub fn castling(rights: CastlingRights) -> Zobrist64 {
    let mut hash = Zobrist64::default();
    for (i, right) in [
        CastlingRights::WHITE_KING_SIDE,
        CastlingRights::WHITE_QUEEN_SIDE,
        CastlingRights::BLACK_KING_SIDE,
        CastlingRights::BLACK_QUEEN_SIDE,
    ]
    .into_iter()
    .enumerate()
    {
        if rights.contains(right) {
            hash ^= Zobrist64(KEYS[CASTLING_OFFSET + i]);
        }
    }
    hash
}

/// Key for an en passant square on `file`, `0..8`.
#[inline]
pub fn en_passant_file(file: u32) -> Zobrist64 {
    debug_assert!(file < 8);
    Zobrist64(KEYS[EN_PASSANT_OFFSET + file as usize])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, position::Position};

    #[test]
    fn test_keys_are_distinct() {
        let mut keys = KEYS.to_vec();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), KEY_COUNT);
        assert!(!keys.contains(&0));
    }

    #[test]
    fn test_castling_keys_combine() {
        assert_eq!(castling(CastlingRights::empty()), Zobrist64::default());
        assert_eq!(
            castling(CastlingRights::all()),
            castling(CastlingRights::WHITE) ^ castling(CastlingRights::BLACK)
        );
    }

    #[test]
    fn test_piece_keys_depend_on_color() {
        assert_ne!(
            piece(Color::White.rook(), Square::A1),
            piece(Color::Black.rook(), Square::A1)
        );
    }

    #[test]
    fn test_en_passant_only_when_capturable() {
        // No black pawn can take on e3.
        let quiet: Position = "4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1".parse().expect("valid fen");
        let plain: Position = "4k3/8/8/8/4P3/8/8/4K3 b - - 0 1".parse().expect("valid fen");
        assert_eq!(quiet.zobrist_hash(), plain.zobrist_hash());

        let capturable: Position = "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1".parse().expect("valid fen");
        let missed: Position = "4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1".parse().expect("valid fen");
        assert_ne!(capturable.zobrist_hash(), missed.zobrist_hash());
    }

    #[test]
    fn test_format() {
        assert_eq!(format!("{:x}", Zobrist64(0xff)), "ff");
        assert_eq!(format!("{:?}", Zobrist64(1)), "Zobrist64(0x0000000000000001)");
    }
}
