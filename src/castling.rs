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

use bitflags::bitflags;

use crate::{bitboard::Bitboard, color::Color, square::Square};

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    #[inline]
    pub const fn is_king_side(self) -> bool {
        matches!(self, CastlingSide::KingSide)
    }

    /// The home square of the king.
    #[inline]
    pub const fn king_from(color: Color) -> Square {
        match color {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        }
    }

    /// Where the king lands.
    pub const fn king_to(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::KingSide, Color::White) => Square::G1,
            (CastlingSide::QueenSide, Color::White) => Square::C1,
            (CastlingSide::KingSide, Color::Black) => Square::G8,
            (CastlingSide::QueenSide, Color::Black) => Square::C8,
        }
    }

    /// The home square of the rook.
    pub const fn rook_from(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::KingSide, Color::White) => Square::H1,
            (CastlingSide::QueenSide, Color::White) => Square::A1,
            (CastlingSide::KingSide, Color::Black) => Square::H8,
            (CastlingSide::QueenSide, Color::Black) => Square::A8,
        }
    }

    /// Where the rook lands.
    pub const fn rook_to(self, color: Color) -> Square {
        match (self, color) {
            (CastlingSide::KingSide, Color::White) => Square::F1,
            (CastlingSide::QueenSide, Color::White) => Square::D1,
            (CastlingSide::KingSide, Color::Black) => Square::F8,
            (CastlingSide::QueenSide, Color::Black) => Square::D8,
        }
    }

    /// Squares between king and rook that must be empty.
    pub const fn path(self, color: Color) -> Bitboard {
        let path = match self {
            CastlingSide::KingSide => 0x60, // f1, g1
            CastlingSide::QueenSide => 0x0e, // b1, c1, d1
        };
        Bitboard(match color {
            Color::White => path,
            Color::Black => path << 56,
        })
    }

    /// Squares the king stands on, passes through, or lands on. None of
    /// them may be attacked.
    pub const fn king_walk(self, color: Color) -> Bitboard {
        let walk = match self {
            CastlingSide::KingSide => 0x70,  // e1, f1, g1
            CastlingSide::QueenSide => 0x1c, // c1, d1, e1
        };
        Bitboard(match color {
            Color::White => walk,
            Color::Black => walk << 56,
        })
    }

    /// The side a king move of two files goes to, if any.
    pub fn from_king_move(from: Square, to: Square) -> Option<CastlingSide> {
        if from.rank() != to.rank() {
            return None;
        }
        match to.file() as i32 - from.file() as i32 {
            2 => Some(CastlingSide::KingSide),
            -2 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }
}

bitflags! {
    /// The four castling rights, in the bit order `K`, `Q`, `k`, `q`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessbits::{CastlingRights, CastlingSide, Color};
    ///
    /// let rights = CastlingRights::all();
    /// assert!(rights.has(Color::Black, CastlingSide::QueenSide));
    /// assert_eq!(rights.to_string(), "KQkq");
    /// assert_eq!(CastlingRights::empty().to_string(), "-");
    /// ```
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CastlingRights: u8 {
        const WHITE_KING_SIDE = 1;
        const WHITE_QUEEN_SIDE = 2;
        const BLACK_KING_SIDE = 4;
        const BLACK_QUEEN_SIDE = 8;

        const WHITE = Self::WHITE_KING_SIDE.bits() | Self::WHITE_QUEEN_SIDE.bits();
        const BLACK = Self::BLACK_KING_SIDE.bits() | Self::BLACK_QUEEN_SIDE.bits();
    }
}

impl Default for CastlingRights {
    fn default() -> CastlingRights {
        CastlingRights::all()
    }
}

impl CastlingRights {
    /// The single right for `color` and `side`.
    pub const fn single(color: Color, side: CastlingSide) -> CastlingRights {
        match (color, side) {
            (Color::White, CastlingSide::KingSide) => CastlingRights::WHITE_KING_SIDE,
            (Color::White, CastlingSide::QueenSide) => CastlingRights::WHITE_QUEEN_SIDE,
            (Color::Black, CastlingSide::KingSide) => CastlingRights::BLACK_KING_SIDE,
            (Color::Black, CastlingSide::QueenSide) => CastlingRights::BLACK_QUEEN_SIDE,
        }
    }

    /// Both rights of `color`.
    pub const fn of(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights::WHITE,
            Color::Black => CastlingRights::BLACK,
        }
    }

    #[inline]
    pub fn has(self, color: Color, side: CastlingSide) -> bool {
        self.contains(CastlingRights::single(color, side))
    }

    /// The rights lost when a piece leaves or is captured on `sq`.
    ///
    /// Only the king and rook home squares matter.
    pub const fn touched_by(sq: Square) -> CastlingRights {
        match sq {
            Square::E1 => CastlingRights::WHITE,
            Square::H1 => CastlingRights::WHITE_KING_SIDE,
            Square::A1 => CastlingRights::WHITE_QUEEN_SIDE,
            Square::E8 => CastlingRights::BLACK,
            Square::H8 => CastlingRights::BLACK_KING_SIDE,
            Square::A8 => CastlingRights::BLACK_QUEEN_SIDE,
            _ => CastlingRights::empty(),
        }
    }

    /// Parses the castling field of a FEN (`KQkq`, any subset, or `-`).
    pub fn from_ascii(s: &[u8]) -> Option<CastlingRights> {
        if s == b"-" {
            return Some(CastlingRights::empty());
        }
        if s.is_empty() || s.len() > 4 {
            return None;
        }
        let mut rights = CastlingRights::empty();
        for &ch in s {
            let right = match ch {
                b'K' => CastlingRights::WHITE_KING_SIDE,
                b'Q' => CastlingRights::WHITE_QUEEN_SIDE,
                b'k' => CastlingRights::BLACK_KING_SIDE,
                b'q' => CastlingRights::BLACK_QUEEN_SIDE,
                _ => return None,
            };
            if rights.contains(right) {
                return None;
            }
            rights |= right;
        }
        Some(rights)
    }
}

impl core::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (right, ch) in [
            (CastlingRights::WHITE_KING_SIDE, 'K'),
            (CastlingRights::WHITE_QUEEN_SIDE, 'Q'),
            (CastlingRights::BLACK_KING_SIDE, 'k'),
            (CastlingRights::BLACK_QUEEN_SIDE, 'q'),
        ] {
            if self.contains(right) {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
