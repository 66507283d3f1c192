use iai::black_box;
use chessbits::{
    attacks, perft,
    sliding::{Classical, Magics},
    uci::Uci,
    zobrist::Zobrist64,
    Move, Position, Role, Square,
};

const MIDDLEGAME: &str = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 0 1";

fn bench_shallow_perft() {
    let pos = Position::new();
    assert_eq!(black_box(perft::perft(black_box(&pos), 4)), 197_281);
}

fn bench_classical_perft() {
    let pos = Position::new();
    assert_eq!(perft::perft_with(black_box(&pos), 3, &Classical), 8_902);
}

fn bench_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let pos: Position = fen.parse().expect("legal position");
    assert_eq!(perft::perft(black_box(&pos), 3), 97_862);
}

fn bench_build_magics() -> Magics {
    Magics::new()
}

fn bench_generate_moves() {
    attacks::init();
    let pos: Position = MIDDLEGAME.parse().expect("legal position");
    assert_eq!(black_box(&pos).legal_moves().len(), 39);
}

fn bench_play_unchecked() -> Position {
    let pos: Position = MIDDLEGAME.parse().expect("legal position");

    let m = Move::normal(Role::Bishop, Square::F8, Square::E7);

    let mut pos = black_box(pos);
    pos.play_unchecked(m);
    pos
}

fn bench_play_ucis() -> Position {
    let ucis = [
        "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "f3g5", "d7d5", "e4d5", "c6a5", "c4b5",
        "c7c6", "d5c6", "b7c6", "b5a4", "c8a6", "d2d3", "f8c5", "e1g1", "e8g8",
    ];

    let mut pos = black_box(Position::new());
    for uci in black_box(ucis).iter() {
        let m = uci
            .parse::<Uci>()
            .expect("valid uci")
            .to_move(&pos)
            .expect("legal move");

        pos.play_unchecked(m);
    }
    pos
}

fn bench_zobrist_hash() -> Zobrist64 {
    black_box(Position::new()).zobrist_hash()
}

iai::main!(
    bench_shallow_perft,
    bench_classical_perft,
    bench_kiwipete,
    bench_build_magics,
    bench_generate_moves,
    bench_play_unchecked,
    bench_play_ucis,
    bench_zobrist_hash,
);
