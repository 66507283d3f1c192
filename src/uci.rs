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

//! Parse and write moves in coordinate notation, as spoken by the Universal
//! Chess Interface: `e2e4`, `e1g1` (castling), `e7e8q` (promotion).
//!
//! # Examples
//!
//! Parsing a move and converting it to a legal [`Move`] in the context of a
//! position:
//!
//! ```
//! use chessbits::{uci::Uci, Color, Position, Square};
//!
//! let uci: Uci = "g1f3".parse()?;
//! assert_eq!(uci, Uci { from: Square::G1, to: Square::F3, promotion: None });
//!
//! let pos = Position::new();
//! let m = uci.to_move(&pos)?;
//! let after = pos.play(m)?;
//! assert_eq!(after.board().piece_at(Square::F3), Some(Color::White.knight()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Converting from [`Move`] to [`Uci`]:
//!
//! ```
//! use chessbits::{uci::Uci, Move, MoveFlag, Role, Square};
//!
//! let m = Move {
//!     from: Square::B7,
//!     to: Square::A8,
//!     role: Role::Pawn,
//!     flag: MoveFlag::Promotion(Role::Knight),
//! };
//! assert_eq!(Uci::from(m).to_string(), "b7a8n");
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    m::Move,
    position::Position,
    role::Role,
    square::Square,
};

/// Error when parsing an invalid UCI move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseUciError;

impl fmt::Display for ParseUciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid uci")
    }
}

impl Error for ParseUciError {}

/// Error when a UCI move does not name a legal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IllegalUciMoveError {
    pub uci: Uci,
}

impl fmt::Display for IllegalUciMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal uci move {}", self.uci)
    }
}

impl Error for IllegalUciMoveError {}

/// A move as represented in the UCI protocol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Uci {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Uci {
    /// Parses a move in coordinate notation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseUciError`] if `uci` is not two square names followed
    /// by an optional `n`, `b`, `r` or `q`.
    pub fn from_ascii(uci: &[u8]) -> Result<Uci, ParseUciError> {
        if uci.len() != 4 && uci.len() != 5 {
            return Err(ParseUciError);
        }

        let from = Square::from_ascii(&uci[0..2]).map_err(|_| ParseUciError)?;
        let to = Square::from_ascii(&uci[2..4]).map_err(|_| ParseUciError)?;
        let promotion = match uci.get(4) {
            None => None,
            Some(b'n') => Some(Role::Knight),
            Some(b'b') => Some(Role::Bishop),
            Some(b'r') => Some(Role::Rook),
            Some(b'q') => Some(Role::Queen),
            Some(_) => return Err(ParseUciError),
        };

        if from == to {
            return Err(ParseUciError);
        }

        Ok(Uci {
            from,
            to,
            promotion,
        })
    }

    /// Finds the matching legal move.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciMoveError`] if no legal move in `pos` has the
    /// same origin, target and promotion.
    pub fn to_move(&self, pos: &Position) -> Result<Move, IllegalUciMoveError> {
        pos.legal_moves()
            .into_iter()
            .find(|m| m.from == self.from && m.to == self.to && m.promotion() == self.promotion)
            .ok_or(IllegalUciMoveError { uci: *self })
    }
}

impl From<Move> for Uci {
    fn from(m: Move) -> Uci {
        Uci {
            from: m.from,
            to: m.to,
            promotion: m.promotion(),
        }
    }
}

impl FromStr for Uci {
    type Err = ParseUciError;

    fn from_str(uci: &str) -> Result<Uci, ParseUciError> {
        Uci::from_ascii(uci.as_bytes())
    }
}

impl fmt::Display for Uci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}
