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

//! A bitboard chess position with rules-correct move generation and perft.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use chessbits::Position;
//!
//! let pos = Position::new();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use chessbits::{Move, Position, Role, Square};
//!
//! let pos = Position::new();
//!
//! // 1. e4
//! let pos = pos.play(Move::normal(Role::Pawn, Square::E2, Square::E4))?;
//! # Ok::<_, chessbits::PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! # use chessbits::Position;
//! # let pos = Position::new();
//! assert!(!pos.is_checkmate());
//! assert!(!pos.is_stalemate());
//! assert!(!pos.is_insufficient_material());
//! assert_eq!(pos.outcome(), None); // no winner yet
//! ```
//!
//! Also supports [FEN](fen) for positions and [UCI](uci) coordinate notation
//! for moves, [perft] for move generator verification and [`game::Game`] for
//! repetition tracking.
//!
//! Sliding piece attacks are looked up in tables that are built once per
//! process, on first use or by calling [`attacks::init()`].
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//!
//! # Logging
//!
//! Table construction, per-move [`perft::perft_divide()`] counts and
//! repetitions in [`game::Game`] are reported through [`tracing`]. No
//! subscriber is installed by the library.

#![doc(html_root_url = "https://docs.rs/chessbits/0.1.0")]
#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod castling;
mod color;
mod m;
mod position;
mod role;
mod square;
mod types;

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod fen;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod sliding;
pub mod uci;
pub mod zobrist;

pub use bitboard::Bitboard;
pub use board::Board;
pub use castling::{CastlingRights, CastlingSide};
pub use color::{ByColor, Color, ParseColorError};
pub use m::{Move, MoveFlag, MoveList};
pub use position::{Outcome, ParseOutcomeError, PlayError, Position};
pub use role::Role;
pub use square::{ParseSquareError, Square};
pub use types::Piece;
