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

use std::{error::Error, fmt, str::FromStr};

use crate::color::Color;

/// A square index `0..64`, `A1` = 0, `B1` = 1, ..., `H8` = 63.
///
/// `file = index % 8`, `rank = index / 8`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square(u8);

macro_rules! square_consts {
    ($($name:ident = $idx:expr),+ $(,)?) => {
        impl Square {
            $(
                #[allow(missing_docs)]
                pub const $name: Square = Square($idx);
            )+
        }
    };
}

#[rustfmt::skip]
square_consts! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

impl Square {
    /// Gets the square for an index.
    ///
    /// # Panics
    ///
    /// In debug builds, if `index >= 64`. Square indices are a trusted
    /// precondition throughout the crate.
    #[inline]
    pub const fn new(index: u32) -> Square {
        debug_assert!(index < 64);
        Square(index as u8)
    }

    /// Combines a file and a rank, both `0..8`.
    #[inline]
    pub const fn from_coords(file: u32, rank: u32) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square((rank * 8 + file) as u8)
    }

    #[inline]
    pub const fn file(self) -> u32 {
        (self.0 & 7) as u32
    }

    #[inline]
    pub const fn rank(self) -> u32 {
        (self.0 >> 3) as u32
    }

    /// The rank as seen from `color`, so that `0` is its back rank.
    #[inline]
    pub const fn relative_rank(self, color: Color) -> u32 {
        match color {
            Color::White => self.rank(),
            Color::Black => 7 - self.rank(),
        }
    }

    /// Same-colored squares have the same parity of `file + rank`.
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Parses a square name such as `e4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chessbits::Square;
    ///
    /// assert_eq!(Square::from_ascii(b"e4"), Ok(Square::E4));
    /// assert!(Square::from_ascii(b"i9").is_err());
    /// ```
    pub const fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        if s.len() != 2 {
            return Err(ParseSquareError);
        }
        let (file, rank) = (s[0], s[1]);
        if file < b'a' || file > b'h' || rank < b'1' || rank > b'8' {
            return Err(ParseSquareError);
        }
        Ok(Square::from_coords(
            (file - b'a') as u32,
            (rank - b'1') as u32,
        ))
    }

    /// All 64 squares, `A1` first.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }

    pub(crate) fn file_char(self) -> char {
        char::from(b'a' + self.file() as u8)
    }

    pub(crate) fn rank_char(self) -> char {
        char::from(b'1' + self.rank() as u8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file_char().to_ascii_uppercase(),
            self.rank_char()
        )
    }
}

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseSquareError;

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseSquareError {}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square() {
        for file in 0..8 {
            for rank in 0..8 {
                let square = Square::from_coords(file, rank);
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
            }
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Square::A1.to_string(), "a1");
        assert_eq!(Square::H8.to_string(), "h8");
        assert_eq!("d6".parse::<Square>(), Ok(Square::D6));
        assert_eq!(format!("{:?}", Square::G3), "G3");
        assert!("".parse::<Square>().is_err());
        assert!("a0".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn test_color_parity() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(Square::D1.is_light());
        assert!(!Square::E1.is_light());
    }

    #[test]
    fn test_relative_rank() {
        assert_eq!(Square::E2.relative_rank(Color::White), 1);
        assert_eq!(Square::E7.relative_rank(Color::Black), 1);
    }
}
