use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};

use quince_chess::move_validator::all_legal_moves;
use quince_chess::utils::position_notation::parse_position_text;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    position: &'static str,
    expected_moves: usize,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "starting_position",
        position: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_moves: 20,
    },
    BenchCase {
        name: "open_middlegame",
        position: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_moves: 48,
    },
    BenchCase {
        name: "rook_endgame",
        position: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_moves: 14,
    },
];

/// The quadratic hot path: every piece of a side against every destination
/// square, each candidate cloned and re-simulated for check safety. This is
/// what checkmate and stalemate detection pay per ply.
fn bench_legality_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("legality_scan");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));

    for case in CASES {
        let game = parse_position_text(case.position).expect("benchmark position should parse");

        // Correctness guard before benchmarking.
        let legal = all_legal_moves(game.board(), game.turn());
        assert_eq!(
            legal.len(),
            case.expected_moves,
            "legal move count mismatch for {}",
            case.name
        );

        group.bench_function(case.name, |b| {
            b.iter(|| {
                let moves = all_legal_moves(black_box(game.board()), black_box(game.turn()));
                black_box(moves.len())
            });
        });
    }

    group.finish();
}

criterion_group!(legality_benches, bench_legality_scan);
criterion_main!(legality_benches);
