use chessbits::{
    game::Game, uci::Uci, CastlingRights, Color, Move, MoveFlag, Outcome, Position, Role, Square,
};

fn pos(fen: &str) -> Position {
    fen.parse().expect("legal fen")
}

fn play(pos: Position, uci: &str) -> Position {
    let m = uci
        .parse::<Uci>()
        .expect("valid uci")
        .to_move(&pos)
        .expect("legal move");
    pos.play(m).expect("legal move")
}

fn has_move(pos: &Position, uci: &str) -> bool {
    pos.legal_moves().iter().any(|m| m.to_string() == uci)
}

#[test]
fn test_en_passant_expires_after_one_ply() {
    let p = pos("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1");
    let p = play(p, "d7d5");
    assert_eq!(p.ep_square(), Some(Square::D6));
    assert!(has_move(&p, "e5d6"));

    // Waiting moves by both sides keep the pawns in place, but the right
    // to capture en passant is gone.
    let p = play(play(p, "e1d1"), "e8d8");
    assert_eq!(p.ep_square(), None);
    assert!(!has_move(&p, "e5d6"));
}

#[test]
fn test_en_passant_discovering_check_is_illegal() {
    // Capturing would expose the white king on a5 to the rook on h5.
    let p = pos("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 2");
    assert!(!has_move(&p, "b5c6"));
    assert!(has_move(&p, "b5b6"));
}

#[test]
fn test_castling_rejected_when_in_check() {
    let p = pos("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(p.is_check());
    assert!(!p.legal_moves().iter().any(|m| m.is_castle()));
}

#[test]
fn test_castling_rejected_through_attacked_square() {
    // d1 is covered by the rook on d8, f1 and g1 are free.
    let p = pos("3r2k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!has_move(&p, "e1c1"));
    assert!(has_move(&p, "e1g1"));
}

#[test]
fn test_castling_rejected_into_check() {
    // g1 is covered by the bishop on c5.
    let p = pos("6k1/8/8/2b5/8/8/8/R3K2R w KQ - 0 1");
    assert!(!has_move(&p, "e1g1"));
    assert!(has_move(&p, "e1c1"));
}

#[test]
fn test_castling_requires_empty_path() {
    let p = pos("4k3/8/8/8/8/8/8/RN2K1NR w KQ - 0 1");
    assert!(!p.legal_moves().iter().any(|m| m.is_castle()));
}

#[test]
fn test_castling_rights_after_rook_moves() {
    let p = pos("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let p = play(p, "h1h5");
    assert_eq!(
        p.castling_rights(),
        CastlingRights::WHITE_QUEEN_SIDE | CastlingRights::BLACK
    );
    let p = play(p, "a8a1");
    assert_eq!(p.castling_rights(), CastlingRights::BLACK_KING_SIDE);
}

#[test]
fn test_promotion_generates_four_moves_per_target() {
    let p = pos("r3k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
    let pawn_moves: Vec<Move> = p
        .legal_moves()
        .into_iter()
        .filter(|m| m.role == Role::Pawn)
        .collect();
    assert_eq!(pawn_moves.len(), 8);
    for target in [Square::A8, Square::B8] {
        let mut roles: Vec<Role> = pawn_moves
            .iter()
            .filter(|m| m.to == target)
            .filter_map(|m| m.promotion())
            .collect();
        roles.sort_by_key(|role| role.to_usize());
        assert_eq!(roles, [Role::Knight, Role::Bishop, Role::Rook, Role::Queen]);
    }
    assert!(pawn_moves.iter().all(|m| matches!(m.flag, MoveFlag::Promotion(_))));
}

#[test]
fn test_black_promotion() {
    let p = pos("4k3/8/8/8/8/8/6p1/4K3 b - - 0 1");
    let p = play(p, "g2g1q");
    assert_eq!(p.board().piece_at(Square::G1), Some(Color::Black.queen()));
    assert!(p.is_check());
}

#[test]
fn test_outcome_is_idempotent() {
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
    ] {
        let p = pos(fen);
        let first = p.outcome();
        assert_eq!(p.outcome(), first);
        assert_eq!(p.fen().to_string(), fen);
    }
}

#[test]
fn test_game_over_variants() {
    assert_eq!(
        pos("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").outcome(),
        Some(Outcome::Decisive {
            winner: Color::Black
        })
    );
    assert!(pos("8/8/8/8/8/2k5/8/K1b5 w - - 0 60").is_game_over());
    assert!(!pos("8/8/8/8/8/2k5/8/K1r5 w - - 0 60").is_insufficient_material());
    assert_eq!(pos("8/8/8/8/8/2k5/8/K1b5 w - - 0 60").outcome(), Some(Outcome::Draw));
}

#[test]
fn test_threefold_repetition() {
    let mut game = Game::default();
    for _ in 0..2 {
        for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            game.play_uci(&uci.parse().expect("valid uci"))
                .expect("legal move");
        }
    }
    assert!(game.is_threefold_repetition());
    assert_eq!(game.outcome(), Some(Outcome::Draw));
    assert_eq!(game.position().outcome(), None);
}
