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

use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    castling::{CastlingRights, CastlingSide},
    color::Color,
    fen::{Fen, ParseFenError},
    m::{Move, MoveFlag, MoveList},
    movegen,
    role::Role,
    square::Square,
    zobrist::{self, Zobrist64},
};

/// Outcome of a game.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn from_winner(winner: Option<Color>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Draw,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing the outcome of a game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

impl Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        match s {
            "1-0" => Ok(Outcome::Decisive {
                winner: Color::White,
            }),
            "0-1" => Ok(Outcome::Decisive {
                winner: Color::Black,
            }),
            "1/2-1/2" => Ok(Outcome::Draw),
            _ => Err(ParseOutcomeError),
        }
    }
}

/// Error when trying to play an illegal move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PlayError {
    pub m: Move,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}", self.m)
    }
}

impl Error for PlayError {}

/// A chess position: piece placement, side to move, castling rights, en
/// passant square and move counters.
///
/// `Position` is a plain value. Copies are independent, which is what
/// legality testing and perft rely on: a move is tried on a copy, and the
/// copy is dropped afterwards.
///
/// # Examples
///
/// ```
/// use chessbits::{Position, Square};
///
/// let pos = Position::new();
/// let m = pos.legal_moves()
///     .into_iter()
///     .find(|m| m.from == Square::E2 && m.to == Square::E4)
///     .expect("e2e4 is legal");
///
/// let pos = pos.play(m)?;
/// assert_eq!(pos.ep_square(), Some(Square::E3));
/// assert_eq!(pos.fen().to_string(),
///            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
/// # Ok::<_, chessbits::PlayError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    board: Board,
    turn: Color,
    castling_rights: CastlingRights,
    ep_square: Option<Square>,
    halfmoves: u32,
    fullmoves: u32,
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        Position {
            board: Board::new(),
            turn: Color::White,
            castling_rights: CastlingRights::all(),
            ep_square: None,
            halfmoves: 0,
            fullmoves: 1,
        }
    }

    /// Parses and validates a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] if the text is malformed or the position it
    /// describes cannot be played from.
    pub fn from_fen(fen: &str) -> Result<Position, ParseFenError> {
        Position::try_from(fen.parse::<Fen>()?)
    }

    pub fn fen(&self) -> Fen {
        Fen {
            board: self.board,
            turn: self.turn,
            castling_rights: self.castling_rights,
            ep_square: self.ep_square,
            halfmoves: self.halfmoves,
            fullmoves: self.fullmoves,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Number of plies since the last capture or pawn move.
    #[inline]
    pub fn halfmoves(&self) -> u32 {
        self.halfmoves
    }

    /// Starts at 1 and is incremented after every black move.
    #[inline]
    pub fn fullmoves(&self) -> u32 {
        self.fullmoves
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.king_of(color)
    }

    /// Tests if `sq` is attacked by any piece of `by`.
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        movegen::is_square_attacked_with(&self.board, sq, by, attacks::magics())
    }

    /// Tests if the king of `color` is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, !color))
    }

    /// Tests if the side to move is in check.
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_in_check(self.turn)
    }

    /// Pieces giving check to the side to move.
    pub fn checkers(&self) -> Bitboard {
        self.king_square(self.turn).map_or(Bitboard::EMPTY, |king| {
            self.board
                .attacks_to(king, !self.turn, self.board.occupied(), attacks::magics())
        })
    }

    /// Generates all legal moves.
    pub fn legal_moves(&self) -> MoveList {
        movegen::legal_moves_with(self, attacks::magics())
    }

    /// Tests a move for legality.
    pub fn is_legal(&self, m: Move) -> bool {
        self.legal_moves().contains(&m)
    }

    /// Plays a move, without checking that it is legal.
    ///
    /// The move must at least be pseudo-legal, as produced by
    /// [`movegen::pseudo_legal_moves_with()`]. Anything else leaves the
    /// position in an unspecified (but memory safe) state.
    pub fn play_unchecked(&mut self, m: Move) {
        let us = self.turn;

        let is_capture = m.is_en_passant() || self.board.piece_at(m.to).is_some();
        if m.role == Role::Pawn || is_capture {
            self.halfmoves = 0;
        } else {
            self.halfmoves = self.halfmoves.saturating_add(1);
        }

        let moved = self.board.clear_square(m.from);
        debug_assert_eq!(moved, Some(m.role.of(us)), "no {:?} on {:?}", m.role, m.from);

        let role = match m.flag {
            MoveFlag::Normal => m.role,
            MoveFlag::Castle => {
                if let Some(side) = CastlingSide::from_king_move(m.from, m.to) {
                    if let Some(rook) = self.board.clear_square(side.rook_from(us)) {
                        self.board.set_piece(side.rook_to(us), rook);
                    }
                }
                m.role
            }
            MoveFlag::EnPassant => {
                self.board
                    .clear_square(Square::from_coords(m.to.file(), m.from.rank()));
                m.role
            }
            MoveFlag::Promotion(role) => role,
        };

        self.board.set_piece(m.to, role.of(us));

        if m.role == Role::King {
            self.castling_rights.remove(CastlingRights::of(us));
        }
        self.castling_rights
            .remove(CastlingRights::touched_by(m.from) | CastlingRights::touched_by(m.to));

        self.ep_square = if m.role == Role::Pawn && m.from.rank().abs_diff(m.to.rank()) == 2 {
            Some(Square::from_coords(m.from.file(), (m.from.rank() + m.to.rank()) / 2))
        } else {
            None
        };

        if us.is_black() {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.turn = !us;
    }

    /// Validates and plays a move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the move is not legal in this position.
    pub fn play(mut self, m: Move) -> Result<Position, PlayError> {
        if self.is_legal(m) {
            self.play_unchecked(m);
            Ok(self)
        } else {
            Err(PlayError { m })
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Tests if the halfmove clock has reached 100 plies.
    pub fn is_fifty_moves(&self) -> bool {
        self.halfmoves >= 100
    }

    /// Tests for the material configurations that can never deliver
    /// mate: king against king, a single minor piece against a bare king,
    /// and a bishop each on squares of the same color.
    pub fn is_insufficient_material(&self) -> bool {
        let board = &self.board;
        if (board.by_role(Role::Pawn) | board.by_role(Role::Rook) | board.by_role(Role::Queen))
            .any()
        {
            return false;
        }

        match board.occupied().count() {
            // Two kings, possibly one knight or bishop.
            2 | 3 => true,
            4 => {
                let white = board.by_piece(Color::White.bishop());
                let black = board.by_piece(Color::Black.bishop());
                match (white.single_square(), black.single_square()) {
                    (Some(w), Some(b)) => w.is_light() == b.is_light(),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Checkmate, stalemate, the fifty-move rule or insufficient material.
    pub fn is_game_over(&self) -> bool {
        self.legal_moves().is_empty() || self.is_fifty_moves() || self.is_insufficient_material()
    }

    /// The outcome of the game, or `None` if it is still in progress.
    ///
    /// A side without legal moves loses if it is in check and draws
    /// otherwise. The fifty-move rule and insufficient material are draws.
    /// Repetitions depend on the game history, see
    /// [`Game::outcome()`](crate::game::Game::outcome).
    pub fn outcome(&self) -> Option<Outcome> {
        if self.legal_moves().is_empty() {
            Some(if self.is_check() {
                Outcome::Decisive { winner: !self.turn }
            } else {
                Outcome::Draw
            })
        } else if self.is_fifty_moves() || self.is_insufficient_material() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Computes the Zobrist hash from scratch.
    ///
    /// The en passant square only contributes if a pawn of the side to move
    /// stands next to the pushed pawn.
    pub fn zobrist_hash(&self) -> Zobrist64 {
        let mut hash = Zobrist64::default();
        for (sq, piece) in self.board.iter() {
            hash ^= zobrist::piece(piece, sq);
        }
        if self.turn.is_white() {
            hash ^= zobrist::white_to_move();
        }
        hash ^= zobrist::castling(self.castling_rights);
        if let Some(ep) = self.ep_square {
            if (attacks::pawn_attacks(!self.turn, ep) & self.board.by_piece(self.turn.pawn()))
                .any()
            {
                hash ^= zobrist::en_passant_file(ep.file());
            }
        }
        hash
    }
}

impl TryFrom<Fen> for Position {
    type Error = ParseFenError;

    fn try_from(fen: Fen) -> Result<Position, ParseFenError> {
        let board = fen.board;

        for color in Color::ALL {
            if board.by_piece(color.king()).count() != 1 {
                return Err(ParseFenError::KingCount { color });
            }
        }

        if (board.by_role(Role::Pawn) & (Bitboard::rank(0) | Bitboard::rank(7))).any() {
            return Err(ParseFenError::PawnsOnBackrank);
        }

        for color in Color::ALL {
            for side in CastlingSide::ALL {
                if fen.castling_rights.has(color, side)
                    && (board.piece_at(CastlingSide::king_from(color)) != Some(color.king())
                        || board.piece_at(side.rook_from(color)) != Some(color.rook()))
                {
                    return Err(ParseFenError::InvalidCastling);
                }
            }
        }

        if let Some(ep) = fen.ep_square {
            // The pawn that just moved, and the squares it came from and
            // passed over.
            let pushed = Square::from_coords(ep.file(), fen.turn.fold_wb(4, 3));
            let origin = Square::from_coords(ep.file(), fen.turn.fold_wb(6, 1));
            if board.piece_at(pushed) != Some((!fen.turn).pawn())
                || board.piece_at(ep).is_some()
                || board.piece_at(origin).is_some()
            {
                return Err(ParseFenError::InvalidEpSquare);
            }
        }

        let pos = Position {
            board,
            turn: fen.turn,
            castling_rights: fen.castling_rights,
            ep_square: fen.ep_square,
            halfmoves: fen.halfmoves,
            fullmoves: fen.fullmoves,
        };

        if pos.is_in_check(!pos.turn) {
            return Err(ParseFenError::OppositeCheck);
        }

        Ok(pos)
    }
}

impl FromStr for Position {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Position, ParseFenError> {
        Position::from_fen(fen)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fen(), f)
    }
}
