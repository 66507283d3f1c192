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

use core::fmt::{self, Write as _};

use arrayvec::ArrayVec;

use crate::{castling::CastlingSide, role::Role, square::Square};

/// What kind of move a [`Move`] is, beyond its origin and target.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveFlag {
    /// A quiet move or a regular capture.
    Normal,
    /// A pawn capturing en passant. The captured pawn is not on the target
    /// square.
    EnPassant,
    /// Castling, encoded as the two square king move.
    Castle,
    /// A pawn reaching the last rank and turning into the given role.
    Promotion(Role),
}

/// A move: origin, target, the moving piece and a [`MoveFlag`].
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using the coordinate notation
/// also spoken by UCI engines: origin square, target square and an optional
/// lowercase promotion letter.
///
/// ```
/// use chessbits::{Move, MoveFlag, Role, Square};
///
/// let m = Move {
///     from: Square::E7,
///     to: Square::E8,
///     role: Role::Pawn,
///     flag: MoveFlag::Promotion(Role::Queen),
/// };
/// assert_eq!(m.to_string(), "e7e8q");
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub role: Role,
    pub flag: MoveFlag,
}

impl Move {
    #[inline]
    pub const fn normal(role: Role, from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            role,
            flag: MoveFlag::Normal,
        }
    }

    /// Gets the promotion role.
    #[inline]
    pub const fn promotion(self) -> Option<Role> {
        match self.flag {
            MoveFlag::Promotion(role) => Some(role),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.flag, MoveFlag::Promotion(_))
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        matches!(self.flag, MoveFlag::EnPassant)
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self.flag, MoveFlag::Castle)
    }

    /// Gets the castling side.
    pub fn castling_side(self) -> Option<CastlingSide> {
        if self.is_castle() {
            CastlingSide::from_king_move(self.from, self.to)
        } else {
            None
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion() {
            f.write_char(role.char())?;
        }
        Ok(())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is limited, but there is enough space to hold the legal
/// moves of any chess position.
pub type MoveList = ArrayVec<Move, 256>;
