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

use core::fmt;

use crate::{color::Color, role::Role};

/// A piece with [`Color`] and [`Role`].
///
/// An empty square is represented as `Option::<Piece>::None`, so a mailbox
/// entry stays a two byte value.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// The FEN letter: uppercase for white, lowercase for black.
    pub const fn char(self) -> char {
        match self.color {
            Color::White => self.role.upper_char(),
            Color::Black => self.role.char(),
        }
    }

    /// Parses a FEN piece letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessbits::{Color, Piece, Role};
    ///
    /// assert_eq!(Piece::from_char('q'), Some(Role::Queen.of(Color::Black)));
    /// assert_eq!(Piece::from_char('N'), Some(Role::Knight.of(Color::White)));
    /// assert_eq!(Piece::from_char('x'), None);
    /// ```
    pub const fn from_char(ch: char) -> Option<Piece> {
        match Role::from_char(ch) {
            Some(role) => Some(role.of(Color::from_white(ch.is_ascii_uppercase()))),
            None => None,
        }
    }

    /// Index into the twelve per-color-per-role bitboards.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.color.to_usize() * 6 + self.role.to_usize()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}
