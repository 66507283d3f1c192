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

//! A position together with the history needed to detect repetitions.
//!
//! [`Position::outcome()`] only looks at a single position. A game is also
//! drawn once the same position occurs for the third time, which requires
//! remembering the positions since the last irreversible move.
//!
//! # Examples
//!
//! ```
//! use chessbits::{game::Game, uci::Uci, Outcome};
//!
//! let mut game = Game::default();
//! for _ in 0..2 {
//!     for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
//!         game.play_uci(&uci.parse::<Uci>()?)?;
//!     }
//! }
//! assert_eq!(game.repetitions(), 3);
//! assert_eq!(game.outcome(), Some(Outcome::Draw));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use tracing::trace;

use crate::{
    m::{Move, MoveList},
    position::{Outcome, PlayError, Position},
    role::Role,
    uci::{IllegalUciMoveError, Uci},
    zobrist::Zobrist64,
};

/// A [`Position`] and the hashes of the positions that can still repeat.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    history: Vec<Zobrist64>,
}

impl Default for Game {
    fn default() -> Game {
        Game::new(Position::new())
    }
}

impl Game {
    /// Starts a game at `position`.
    pub fn new(position: Position) -> Game {
        Game {
            history: vec![position.zobrist_hash()],
            position,
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn legal_moves(&self) -> MoveList {
        self.position.legal_moves()
    }

    /// Validates and plays a move.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] if the move is illegal. The game is unchanged
    /// in that case.
    pub fn play(&mut self, m: Move) -> Result<(), PlayError> {
        let before = self.position;
        self.position = before.play(m)?;

        // Pawn moves, captures and lost castling rights can never be undone.
        let irreversible = m.role == Role::Pawn
            || before.board().piece_at(m.to).is_some()
            || before.castling_rights() != self.position.castling_rights();
        if irreversible {
            self.history.clear();
        }

        let hash = self.position.zobrist_hash();
        self.history.push(hash);

        let repetitions = self.repetitions();
        if repetitions > 1 {
            trace!(%m, repetitions, "position repeated");
        }
        Ok(())
    }

    /// Plays a move given in coordinate notation.
    ///
    /// # Errors
    ///
    /// Returns [`IllegalUciMoveError`] if the move is not legal.
    pub fn play_uci(&mut self, uci: &Uci) -> Result<Move, IllegalUciMoveError> {
        let m = uci.to_move(&self.position)?;
        self.play(m)
            .map_err(|_| IllegalUciMoveError { uci: *uci })?;
        Ok(m)
    }

    /// How often the current position occurred since the last irreversible
    /// move, including now.
    pub fn repetitions(&self) -> usize {
        match self.history.last() {
            Some(current) => self.history.iter().filter(|&h| h == current).count(),
            None => 0,
        }
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions() >= 3
    }

    /// Like [`Position::outcome()`], but also a draw by threefold
    /// repetition.
    pub fn outcome(&self) -> Option<Outcome> {
        self.position.outcome().or_else(|| {
            if self.is_threefold_repetition() {
                Some(Outcome::Draw)
            } else {
                None
            }
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(game: &mut Game, moves: &[&str]) {
        for uci in moves {
            game.play_uci(&uci.parse().expect("valid uci"))
                .expect("legal move");
        }
    }

    #[test]
    fn test_repetition_counts() {
        let mut game = Game::default();
        assert_eq!(game.repetitions(), 1);
        play_all(&mut game, &["b1c3", "b8c6", "c3b1", "c6b8"]);
        assert_eq!(game.repetitions(), 2);
        assert!(!game.is_threefold_repetition());
        assert_eq!(game.outcome(), None);
        play_all(&mut game, &["b1c3", "b8c6", "c3b1", "c6b8"]);
        assert!(game.is_threefold_repetition());
        assert!(game.is_game_over());
    }

    #[test]
    fn test_pawn_move_resets_history() {
        let mut game = Game::default();
        play_all(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(game.repetitions(), 2);
        play_all(&mut game, &["e2e3"]);
        assert_eq!(game.repetitions(), 1);
    }

    #[test]
    fn test_lost_castling_rights_reset_history() {
        let pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().expect("valid fen");
        let mut game = Game::new(pos);
        play_all(&mut game, &["e1f1", "e8f8", "f1e1", "f8e8"]);
        // Same placement, but without castling rights: a new position.
        assert_eq!(game.repetitions(), 1);
        play_all(&mut game, &["e1f1", "e8f8", "f1e1", "f8e8"]);
        assert_eq!(game.repetitions(), 2);
    }

    #[test]
    fn test_illegal_move_leaves_game_unchanged() {
        let mut game = Game::default();
        let before = *game.position();
        let uci: Uci = "e2e5".parse().expect("valid uci");
        assert!(game.play_uci(&uci).is_err());
        assert_eq!(*game.position(), before);
        assert_eq!(game.repetitions(), 1);
    }
}
