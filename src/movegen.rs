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

//! Move generation.
//!
//! Candidates are produced per piece type into a [`MoveList`]. The legality
//! filter plays each candidate on a copy of the position and drops those that
//! leave the mover's king attacked.
//!
//! Every function is generic over the [`SlidingAttacks`] oracle, so any
//! implementation can back generation:
//!
//! ```
//! use chessbits::{movegen, sliding::Classical, Position};
//!
//! let pos = Position::new();
//! assert_eq!(movegen::legal_moves_with(&pos, &Classical).len(), 20);
//! ```

use crate::{
    attacks,
    bitboard::Bitboard,
    board::Board,
    castling::CastlingSide,
    color::Color,
    m::{Move, MoveFlag, MoveList},
    position::Position,
    role::Role,
    sliding::SlidingAttacks,
    square::Square,
};

/// Tests if `sq` is attacked by any piece of `by`.
///
/// Stops at the first attacking piece type found.
pub fn is_square_attacked_with<S: SlidingAttacks>(
    board: &Board,
    sq: Square,
    by: Color,
    sliders: &S,
) -> bool {
    let occupied = board.occupied();
    let queens = board.by_piece(by.queen());
    (sliders.rook_attacks(sq, occupied) & (board.by_piece(by.rook()) | queens)).any()
        || (sliders.bishop_attacks(sq, occupied) & (board.by_piece(by.bishop()) | queens)).any()
        || (attacks::knight_attacks(sq) & board.by_piece(by.knight())).any()
        || (attacks::king_attacks(sq) & board.by_piece(by.king())).any()
        || (attacks::pawn_attacks(!by, sq) & board.by_piece(by.pawn())).any()
}

/// Generates all pseudo-legal moves of the side to move.
///
/// Pseudo-legal moves obey the movement rules of each piece but may leave
/// the own king in check. Castling is the exception: the king's start,
/// transit and target squares are already checked here.
pub fn pseudo_legal_moves_with<S: SlidingAttacks>(pos: &Position, sliders: &S, moves: &mut MoveList) {
    let target = !pos.board().by_color(pos.turn());

    KnightTag::gen_moves(pos, target, moves);
    BishopTag::gen_moves_with(pos, target, sliders, moves);
    RookTag::gen_moves_with(pos, target, sliders, moves);
    QueenTag::gen_moves_with(pos, target, sliders, moves);
    KingTag::gen_moves(pos, target, moves);
    gen_pawn_moves(pos, moves);
    gen_en_passant(pos, moves);
    gen_castling_moves(pos, sliders, moves);
}

/// Generates all legal moves of the side to move, in a deterministic order.
pub fn legal_moves_with<S: SlidingAttacks>(pos: &Position, sliders: &S) -> MoveList {
    let mut moves = MoveList::new();
    pseudo_legal_moves_with(pos, sliders, &mut moves);
    moves.retain(|m| is_legal_with(pos, *m, sliders));
    moves
}

/// Tests a pseudo-legal move by playing it on a copy of the position.
pub fn is_legal_with<S: SlidingAttacks>(pos: &Position, m: Move, sliders: &S) -> bool {
    let us = pos.turn();
    let mut after = *pos;
    after.play_unchecked(m);
    match after.board().king_of(us) {
        Some(king) => !is_square_attacked_with(after.board(), king, !us, sliders),
        None => true,
    }
}

trait Stepper {
    const ROLE: Role;

    fn attacks(from: Square) -> Bitboard;

    fn gen_moves(pos: &Position, target: Bitboard, moves: &mut MoveList) {
        for from in pos.board().by_piece(Self::ROLE.of(pos.turn())) {
            for to in Self::attacks(from) & target {
                moves.push(Move::normal(Self::ROLE, from, to));
            }
        }
    }
}

trait Slider {
    const ROLE: Role;

    fn attacks<S: SlidingAttacks>(sliders: &S, from: Square, occupied: Bitboard) -> Bitboard;

    fn gen_moves_with<S: SlidingAttacks>(
        pos: &Position,
        target: Bitboard,
        sliders: &S,
        moves: &mut MoveList,
    ) {
        let occupied = pos.board().occupied();
        for from in pos.board().by_piece(Self::ROLE.of(pos.turn())) {
            for to in Self::attacks(sliders, from, occupied) & target {
                moves.push(Move::normal(Self::ROLE, from, to));
            }
        }
    }
}

struct KingTag;
struct KnightTag;
struct BishopTag;
struct RookTag;
struct QueenTag;

impl Stepper for KingTag {
    const ROLE: Role = Role::King;
    fn attacks(from: Square) -> Bitboard {
        attacks::king_attacks(from)
    }
}

impl Stepper for KnightTag {
    const ROLE: Role = Role::Knight;
    fn attacks(from: Square) -> Bitboard {
        attacks::knight_attacks(from)
    }
}

impl Slider for BishopTag {
    const ROLE: Role = Role::Bishop;
    fn attacks<S: SlidingAttacks>(sliders: &S, from: Square, occupied: Bitboard) -> Bitboard {
        sliders.bishop_attacks(from, occupied)
    }
}

impl Slider for RookTag {
    const ROLE: Role = Role::Rook;
    fn attacks<S: SlidingAttacks>(sliders: &S, from: Square, occupied: Bitboard) -> Bitboard {
        sliders.rook_attacks(from, occupied)
    }
}

impl Slider for QueenTag {
    const ROLE: Role = Role::Queen;
    fn attacks<S: SlidingAttacks>(sliders: &S, from: Square, occupied: Bitboard) -> Bitboard {
        sliders.queen_attacks(from, occupied)
    }
}

// Reverses a set-wise pawn shift. `delta` is the index difference from
// origin to target.
#[inline]
fn origin(to: Square, delta: i32) -> Square {
    Square::new((to.to_u32() as i32 - delta) as u32)
}

fn push_pawn_moves(moves: &mut MoveList, turn: Color, from: Square, to: Square) {
    if to.relative_rank(turn) == 7 {
        for promotion in Role::PROMOTIONS {
            moves.push(Move {
                from,
                to,
                role: Role::Pawn,
                flag: MoveFlag::Promotion(promotion),
            });
        }
    } else {
        moves.push(Move::normal(Role::Pawn, from, to));
    }
}

fn gen_pawn_moves(pos: &Position, moves: &mut MoveList) {
    let turn = pos.turn();
    let board = pos.board();
    let pawns = board.by_piece(turn.pawn());
    let empty = !board.occupied();
    let them = board.by_color(!turn);
    let up = turn.fold_wb(8, -8);

    // Captures. The file masks in the shifts keep pawns on the a-file and
    // h-file from capturing across the board edge.
    let advanced = pawns.forward(turn);
    for to in advanced.shift_west() & them {
        push_pawn_moves(moves, turn, origin(to, up - 1), to);
    }
    for to in advanced.shift_east() & them {
        push_pawn_moves(moves, turn, origin(to, up + 1), to);
    }

    let single_moves = advanced & empty;
    let double_moves = single_moves.forward(turn) & empty & Bitboard::relative_rank(turn, 3);

    for to in single_moves {
        push_pawn_moves(moves, turn, origin(to, up), to);
    }

    for to in double_moves {
        moves.push(Move::normal(Role::Pawn, origin(to, 2 * up), to));
    }
}

fn gen_en_passant(pos: &Position, moves: &mut MoveList) {
    if let Some(to) = pos.ep_square() {
        let turn = pos.turn();
        for from in pos.board().by_piece(turn.pawn()) & attacks::pawn_attacks(!turn, to) {
            moves.push(Move {
                from,
                to,
                role: Role::Pawn,
                flag: MoveFlag::EnPassant,
            });
        }
    }
}

fn gen_castling_moves<S: SlidingAttacks>(pos: &Position, sliders: &S, moves: &mut MoveList) {
    let turn = pos.turn();
    let board = pos.board();
    let king = CastlingSide::king_from(turn);

    if board.piece_at(king) != Some(turn.king()) {
        return;
    }

    'next_side: for side in CastlingSide::ALL {
        if !pos.castling_rights().has(turn, side)
            || board.piece_at(side.rook_from(turn)) != Some(turn.rook())
            || board.occupied().intersects(side.path(turn))
        {
            continue;
        }

        for sq in side.king_walk(turn) {
            if is_square_attacked_with(board, sq, !turn, sliders) {
                continue 'next_side;
            }
        }

        moves.push(Move {
            from: king,
            to: side.king_to(turn),
            role: Role::King,
            flag: MoveFlag::Castle,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sliding::Classical;

    fn pseudo_legal(pos: &Position) -> MoveList {
        let mut moves = MoveList::new();
        pseudo_legal_moves_with(pos, attacks::magics(), &mut moves);
        moves
    }

    #[test]
    fn test_starting_moves() {
        let pos = Position::new();
        let moves = legal_moves_with(&pos, attacks::magics());
        assert_eq!(moves.len(), 20);
        assert_eq!(moves.iter().filter(|m| m.role == Role::Knight).count(), 4);
        assert_eq!(
            moves
                .iter()
                .filter(|m| m.role == Role::Pawn && m.to.rank() == 3)
                .count(),
            8
        );
    }

    #[test]
    fn test_pawn_captures_do_not_wrap() {
        // White pawn on h4, black pawns on g5 and a6. An unmasked shift
        // from h4 would land on a6.
        let pos: Position = "4k3/8/p7/6p1/7P/8/8/4K3 w - - 0 1".parse().expect("valid fen");
        let pawn_moves: Vec<Move> = pseudo_legal(&pos)
            .into_iter()
            .filter(|m| m.role == Role::Pawn && m.from == Square::H4)
            .collect();
        assert_eq!(pawn_moves.len(), 2);
        assert!(pawn_moves.iter().any(|m| m.to == Square::G5));
        assert!(pawn_moves.iter().any(|m| m.to == Square::H5));
        assert!(pawn_moves.iter().all(|m| m.to != Square::A6));
    }

    #[test]
    fn test_black_pawn_pushes() {
        let pos: Position = "4k3/p7/8/8/8/8/8/4K3 b - - 0 1".parse().expect("valid fen");
        let pushes: Vec<String> = pseudo_legal(&pos)
            .into_iter()
            .filter(|m| m.role == Role::Pawn)
            .map(|m| m.to_string())
            .collect();
        assert_eq!(pushes.len(), 2);
        assert!(pushes.contains(&"a7a6".to_owned()));
        assert!(pushes.contains(&"a7a5".to_owned()));
    }

    #[test]
    fn test_blocked_double_push() {
        let pos: Position = "4k3/8/8/8/8/P7/P7/4K3 w - - 0 1".parse().expect("valid fen");
        let pawn_moves: Vec<String> = pseudo_legal(&pos)
            .into_iter()
            .filter(|m| m.role == Role::Pawn)
            .map(|m| m.to_string())
            .collect();
        assert_eq!(pawn_moves, ["a3a4"]);
    }

    #[test]
    fn test_promotions_and_capture_promotions() {
        let pos: Position = "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid fen");
        let promotions: Vec<Move> = legal_moves_with(&pos, attacks::magics())
            .into_iter()
            .filter(|m| m.role == Role::Pawn)
            .collect();
        assert_eq!(promotions.len(), 8);
        assert!(promotions.iter().all(|m| m.is_promotion()));
        assert_eq!(promotions.iter().filter(|m| m.to == Square::B8).count(), 4);
    }

    #[test]
    fn test_castling_through_attack() {
        // The black rook on f8 covers f1.
        let pos: Position = "4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1".parse().expect("valid fen");
        let castles: Vec<String> = legal_moves_with(&pos, attacks::magics())
            .into_iter()
            .filter(|m| m.is_castle())
            .map(|m| m.to_string())
            .collect();
        assert_eq!(castles, ["e1c1"]);
    }

    #[test]
    fn test_castling_queen_side_b_file_may_be_attacked() {
        // Only b1 is attacked, which the king never crosses.
        let pos: Position = "1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1".parse().expect("valid fen");
        assert!(legal_moves_with(&pos, attacks::magics())
            .iter()
            .any(|m| m.is_castle()));
    }

    #[test]
    fn test_oracles_generate_the_same_moves() {
        let pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
            .parse()
            .expect("valid fen");
        assert_eq!(
            legal_moves_with(&pos, &Classical),
            legal_moves_with(&pos, attacks::magics())
        );
    }

    #[test]
    fn test_is_square_attacked() {
        let board = Board::new();
        assert!(is_square_attacked_with(&board, Square::F3, Color::White, &Classical));
        assert!(!is_square_attacked_with(&board, Square::E4, Color::White, &Classical));
        assert!(is_square_attacked_with(&board, Square::D6, Color::Black, &Classical));
    }
}
