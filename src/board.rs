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

use crate::{
    attacks,
    bitboard::Bitboard,
    color::Color,
    role::Role,
    sliding::SlidingAttacks,
    square::Square,
    types::Piece,
};

/// Piece placement.
///
/// Every piece is recorded twice: in one of twelve per-color-per-role
/// bitboards and in a 64 entry mailbox. [`Board::set_piece()`] and
/// [`Board::clear_square()`] are the only mutators and keep both views in
/// agreement, so the bitboards are always pairwise disjoint.
///
/// # Examples
///
/// ```
/// use chessbits::{Board, Color, Square};
///
/// let board = Board::new();
/// assert_eq!(board.piece_at(Square::E1), Some(Color::White.king()));
/// assert_eq!(board.king_of(Color::Black), Some(Square::E8));
/// assert_eq!(board.occupied().count(), 32);
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Board {
    pieces: [Bitboard; 12],
    mailbox: [Option<Piece>; 64],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        let back_rank = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];
        for (file, role) in back_rank.into_iter().enumerate() {
            let file = file as u32;
            board.set_piece(Square::from_coords(file, 0), role.of(Color::White));
            board.set_piece(Square::from_coords(file, 1), Color::White.pawn());
            board.set_piece(Square::from_coords(file, 6), Color::Black.pawn());
            board.set_piece(Square::from_coords(file, 7), role.of(Color::Black));
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            pieces: [Bitboard::EMPTY; 12],
            mailbox: [None; 64],
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.mailbox[sq.to_usize()]
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    /// Puts `piece` on `sq`, replacing whatever stood there.
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.clear_square(sq);
        self.pieces[piece.index()].add(sq);
        self.mailbox[sq.to_usize()] = Some(piece);
    }

    /// Empties `sq` and returns the piece that stood there.
    pub fn clear_square(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.mailbox[sq.to_usize()].take();
        if let Some(piece) = piece {
            self.pieces[piece.index()].discard(sq);
        }
        piece
    }

    #[inline]
    pub fn by_piece(&self, piece: Piece) -> Bitboard {
        self.pieces[piece.index()]
    }

    pub fn by_color(&self, color: Color) -> Bitboard {
        let offset = color.to_usize() * 6;
        self.pieces[offset..offset + 6]
            .iter()
            .fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    #[inline]
    pub fn by_role(&self, role: Role) -> Bitboard {
        self.by_piece(role.of(Color::White)) | self.by_piece(role.of(Color::Black))
    }

    pub fn occupied(&self) -> Bitboard {
        self.pieces.iter().fold(Bitboard::EMPTY, |acc, &bb| acc | bb)
    }

    /// The square of the king of `color`, or `None` if there is no single
    /// king.
    #[inline]
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.by_piece(color.king()).single_square()
    }

    /// Iterates over all pieces, `A1` first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Pieces of `attacker` that attack `sq`. Sliding pieces are blocked
    /// by `occupied`.
    pub fn attacks_to<S: SlidingAttacks>(
        &self,
        sq: Square,
        attacker: Color,
        occupied: Bitboard,
        sliders: &S,
    ) -> Bitboard {
        let queens = self.by_piece(attacker.queen());
        (sliders.rook_attacks(sq, occupied) & (self.by_piece(attacker.rook()) | queens))
            | (sliders.bishop_attacks(sq, occupied) & (self.by_piece(attacker.bishop()) | queens))
            | (attacks::knight_attacks(sq) & self.by_piece(attacker.knight()))
            | (attacks::king_attacks(sq) & self.by_piece(attacker.king()))
            | (attacks::pawn_attacks(!attacker, sq) & self.by_piece(attacker.pawn()))
    }

    /// Writes the placement field of a FEN.
    pub fn write_board_fen(&self, f: &mut impl fmt::Write) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            f.write_char(char::from(b'0' + empty))?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                f.write_char(char::from(b'0' + empty))?;
            }
            if rank > 0 {
                f.write_char('/')?;
            }
        }
        Ok(())
    }

    pub fn board_fen(&self) -> String {
        BoardFen(self).to_string()
    }
}

struct BoardFen<'a>(&'a Board);

impl fmt::Display for BoardFen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_board_fen(f)
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::from_coords(file, rank);
                f.write_char(self.piece_at(sq).map_or('.', Piece::char))?;
                f.write_char(if file < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.board_fen()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_board_fen() {
        assert_eq!(
            Board::new().board_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
        assert_eq!(Board::empty().board_fen(), "8/8/8/8/8/8/8/8");
    }

    #[test]
    fn test_board_fen_after_edits() {
        let mut board = Board::new();
        board.clear_square(Square::E2);
        board.set_piece(Square::E4, Color::White.pawn());
        board.clear_square(Square::G8);
        assert_eq!(
            board.board_fen(),
            "rnbqkb1r/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"
        );
        assert_eq!(
            format!("{board:?}"),
            "Board(\"rnbqkb1r/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR\")"
        );
    }

    #[test]
    fn test_set_piece_replaces() {
        let mut board = Board::new();
        board.set_piece(Square::E8, Color::White.queen());
        assert_eq!(board.piece_at(Square::E8), Some(Color::White.queen()));
        assert!(board.by_piece(Color::Black.king()).is_empty());
        assert_eq!(board.king_of(Color::Black), None);
        assert_eq!(board.occupied().count(), 32);
    }

    #[test]
    fn test_clear_square() {
        let mut board = Board::new();
        assert_eq!(board.clear_square(Square::D1), Some(Color::White.queen()));
        assert_eq!(board.clear_square(Square::D1), None);
        assert!(board.by_role(Role::Queen).contains(Square::D8));
        assert!(!board.by_color(Color::White).contains(Square::D1));
    }

    #[test]
    fn test_views_agree() {
        let board = Board::new();
        for sq in Square::all() {
            let owners: Vec<Piece> = Role::ALL
                .iter()
                .flat_map(|role| Color::ALL.map(|color| role.of(color)))
                .filter(|&piece| board.by_piece(piece).contains(sq))
                .collect();
            assert_eq!(owners.first().copied(), board.piece_at(sq));
            assert!(owners.len() <= 1);
        }
    }

    #[test]
    fn test_display() {
        let board = Board::new();
        let text = board.to_string();
        assert!(text.starts_with("r n b q k b n r\n"));
        assert!(text.ends_with("R N B Q K B N R\n"));
    }
}
