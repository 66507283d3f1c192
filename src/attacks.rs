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

//! Attack tables.
//!
//! Knight, king and pawn attacks are fixed per square and built at compile
//! time. Sliding attacks come from one shared [`Magics`] instance, built on
//! first use or by an explicit call to [`init()`].
//!
//! # Example
//!
//! ```
//! use chessbits::{attacks, Bitboard, Color, Square};
//!
//! attacks::init();
//!
//! assert_eq!(attacks::knight_attacks(Square::A1).count(), 2);
//! assert_eq!(attacks::king_attacks(Square::E4).count(), 8);
//!
//! // Pawn attacks never wrap around the board edge.
//! assert_eq!(
//!     attacks::pawn_attacks(Color::White, Square::H4),
//!     Bitboard::from_square(Square::G5)
//! );
//! ```

use std::sync::OnceLock;

use crate::{
    bitboard::Bitboard,
    color::{ByColor, Color},
    role::Role,
    sliding::{sliding_attacks, Magics, SlidingAttacks},
    square::Square,
    types::Piece,
};

const KING_DELTAS: [i32; 8] = [9, 8, 7, 1, -9, -8, -7, -1];
const KNIGHT_DELTAS: [i32; 8] = [17, 15, 10, 6, -17, -15, -10, -6];
const WHITE_PAWN_DELTAS: [i32; 2] = [7, 9];
const BLACK_PAWN_DELTAS: [i32; 2] = [-7, -9];

// With a full occupancy every ray stops after one step, and the file
// distance check rejects steps that wrap around the board edge.
const fn bootstrap_stepping_attacks(deltas: &[i32]) -> [u64; 64] {
    let mut table = [0; 64];
    let mut sq = 0;
    while sq < 64 {
        table[sq] = sliding_attacks(sq as i32, !0, deltas);
        sq += 1;
    }
    table
}

static KNIGHT_ATTACKS: [u64; 64] = bootstrap_stepping_attacks(&KNIGHT_DELTAS);
static KING_ATTACKS: [u64; 64] = bootstrap_stepping_attacks(&KING_DELTAS);
static PAWN_ATTACKS: ByColor<[u64; 64]> = ByColor {
    white: bootstrap_stepping_attacks(&WHITE_PAWN_DELTAS),
    black: bootstrap_stepping_attacks(&BLACK_PAWN_DELTAS),
};

static MAGICS: OnceLock<Magics> = OnceLock::new();

/// Builds the shared sliding attack tables.
///
/// Idempotent and thread-safe: the first call does the work, later calls
/// return immediately. Lookups initialize lazily as well, so calling this is
/// only needed to move the setup cost out of the first move generation.
pub fn init() {
    magics();
}

/// The shared sliding attack oracle.
#[inline]
pub fn magics() -> &'static Magics {
    MAGICS.get_or_init(|| {
        let magics = Magics::new();
        tracing::debug!(entries = magics.len(), "built sliding attack tables");
        magics
    })
}

/// Looks up attacks for a pawn of `color` on `sq`.
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS.get(color)[sq.to_usize()])
}

/// Looks up attacks for a knight on `sq`.
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.to_usize()])
}

/// Looks up attacks for a king on `sq`.
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.to_usize()])
}

/// Looks up attacks for a rook on `sq` with `occupied` squares.
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    magics().rook_attacks(sq, occupied)
}

/// Looks up attacks for a bishop on `sq` with `occupied` squares.
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    magics().bishop_attacks(sq, occupied)
}

/// Looks up attacks for a queen on `sq` with `occupied` squares.
#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    magics().queen_attacks(sq, occupied)
}

/// Looks up attacks for `piece` on `sq` with `occupied` squares.
pub fn attacks(sq: Square, piece: Piece, occupied: Bitboard) -> Bitboard {
    match piece.role {
        Role::Pawn => pawn_attacks(piece.color, sq),
        Role::Knight => knight_attacks(sq),
        Role::Bishop => bishop_attacks(sq, occupied),
        Role::Rook => rook_attacks(sq, occupied),
        Role::Queen => queen_attacks(sq, occupied),
        Role::King => king_attacks(sq),
    }
}
