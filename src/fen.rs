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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse and validate a FEN:
//!
//! ```
//! use chessbits::{fen::Fen, Position, Square};
//!
//! let fen: Fen = "r1bqkbnr/ppp2Qpp/2np4/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4".parse()?;
//! let pos = Position::try_from(fen)?;
//! assert!(pos.is_checkmate());
//! assert_eq!(pos.board().piece_at(Square::F7).map(|p| p.char()), Some('Q'));
//! # Ok::<_, chessbits::fen::ParseFenError>(())
//! ```
//!
//! Write a FEN:
//!
//! ```
//! use chessbits::Position;
//!
//! let pos = Position::new();
//! assert_eq!(pos.fen().to_string(),
//!            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
//! ```

use std::{error::Error, fmt, str::FromStr};

use crate::{
    board::Board, castling::CastlingRights, color::Color, square::Square, types::Piece,
};

/// Errors that can occur when parsing a FEN, or when a parsed FEN does not
/// describe a usable position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    /// Not exactly six whitespace separated fields.
    FieldCount { found: usize },
    /// The placement field does not have eight ranks.
    RankCount { found: usize },
    /// A rank (`1..=8`) does not describe exactly eight files.
    RankLength { rank: u32 },
    /// Unexpected character in the placement field.
    InvalidPiece { ch: char },
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
    /// A side does not have exactly one king.
    KingCount { color: Color },
    /// Pawns on the first or eighth rank.
    PawnsOnBackrank,
    /// The side that just moved is in check.
    OppositeCheck,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseFenError::FieldCount { found } => {
                write!(f, "invalid fen: expected 6 fields, found {found}")
            }
            ParseFenError::RankCount { found } => {
                write!(f, "invalid fen: expected 8 ranks, found {found}")
            }
            ParseFenError::RankLength { rank } => {
                write!(f, "invalid fen: rank {rank} does not have 8 files")
            }
            ParseFenError::InvalidPiece { ch } => {
                write!(f, "invalid fen: unexpected {ch:?} in board")
            }
            ParseFenError::InvalidTurn => f.write_str("invalid fen: bad side to move"),
            ParseFenError::InvalidCastling => f.write_str("invalid fen: bad castling rights"),
            ParseFenError::InvalidEpSquare => f.write_str("invalid fen: bad en passant square"),
            ParseFenError::InvalidHalfmoveClock => f.write_str("invalid fen: bad halfmove clock"),
            ParseFenError::InvalidFullmoves => f.write_str("invalid fen: bad fullmove number"),
            ParseFenError::KingCount { color } => {
                write!(f, "illegal position: expected exactly one {color} king")
            }
            ParseFenError::PawnsOnBackrank => f.write_str("illegal position: pawns on backrank"),
            ParseFenError::OppositeCheck => {
                f.write_str("illegal position: side not to move is in check")
            }
        }
    }
}

impl Error for ParseFenError {}

/// The six fields of a FEN, parsed but not yet validated as a position.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Fen {
    pub board: Board,
    pub turn: Color,
    pub castling_rights: CastlingRights,
    pub ep_square: Option<Square>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen {
            board: Board::new(),
            turn: Color::White,
            castling_rights: CastlingRights::all(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl Fen {
    /// An empty board, white to move, no castling rights.
    pub fn empty() -> Fen {
        Fen {
            board: Board::empty(),
            castling_rights: CastlingRights::empty(),
            ..Fen::default()
        }
    }

    /// Parses a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] naming the first malformed field.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let fields: Vec<&[u8]> = fen
            .split(|ch| ch.is_ascii_whitespace())
            .filter(|field| !field.is_empty())
            .collect();
        let [board, turn, castling, ep_square, halfmoves, fullmoves] = fields[..] else {
            return Err(ParseFenError::FieldCount {
                found: fields.len(),
            });
        };

        let board = parse_board_fen(board)?;

        let turn = match turn {
            b"w" => Color::White,
            b"b" => Color::Black,
            _ => return Err(ParseFenError::InvalidTurn),
        };

        let castling_rights =
            CastlingRights::from_ascii(castling).ok_or(ParseFenError::InvalidCastling)?;

        let ep_square = match ep_square {
            b"-" => None,
            name => {
                let sq = Square::from_ascii(name).map_err(|_| ParseFenError::InvalidEpSquare)?;
                // The square a pawn of the side not to move just passed over.
                if sq.relative_rank(turn) != 5 {
                    return Err(ParseFenError::InvalidEpSquare);
                }
                Some(sq)
            }
        };

        let halfmoves = btoi::btou::<u32>(halfmoves).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        let fullmoves = match btoi::btou::<u32>(fullmoves) {
            Ok(0) | Err(_) => return Err(ParseFenError::InvalidFullmoves),
            Ok(n) => n,
        };

        Ok(Fen {
            board,
            turn,
            castling_rights,
            ep_square,
            halfmoves,
            fullmoves,
        })
    }
}

fn parse_board_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
    let ranks: Vec<&[u8]> = board_fen.split(|&ch| ch == b'/').collect();
    if ranks.len() != 8 {
        return Err(ParseFenError::RankCount { found: ranks.len() });
    }

    let mut board = Board::empty();
    for (rank_fen, rank) in ranks.into_iter().zip((0..8).rev()) {
        let mut file = 0;
        for &ch in rank_fen {
            if (b'1'..=b'8').contains(&ch) {
                file += u32::from(ch - b'0');
            } else {
                let piece =
                    Piece::from_char(char::from(ch)).ok_or(ParseFenError::InvalidPiece {
                        ch: char::from(ch),
                    })?;
                if file >= 8 {
                    return Err(ParseFenError::RankLength { rank: rank + 1 });
                }
                board.set_piece(Square::from_coords(file, rank), piece);
                file += 1;
            }
            if file > 8 {
                return Err(ParseFenError::RankLength { rank: rank + 1 });
            }
        }
        if file != 8 {
            return Err(ParseFenError::RankLength { rank: rank + 1 });
        }
    }
    Ok(board)
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.write_board_fen(f)?;
        write!(f, " {} {} ", self.turn.char(), self.castling_rights)?;
        match self.ep_square {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmoves, self.fullmoves)
    }
}
