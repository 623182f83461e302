use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use quadrille::{legal_plies, perft, Position};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_nodes: &[20, 400, 8_902, 197_281],
    },
    BenchCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2_039, 97_862],
    },
    BenchCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2_812, 43_238],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let position = Position::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_ix, &expected) in case.expected_nodes.iter().enumerate() {
            let depth = depth_ix as u32 + 1;

            // Correctness guard before measuring anything.
            assert_eq!(
                perft(depth, &position),
                expected,
                "node mismatch for {} depth {depth}",
                case.name
            );

            group.throughput(Throughput::Elements(expected));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{depth}", case.name)),
                &depth,
                |b, &depth| {
                    b.iter(|| perft(black_box(depth), black_box(&position)));
                },
            );
        }
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_plies");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(2));

    for case in CASES {
        let position = Position::from_fen(case.fen).expect("benchmark FEN should parse");
        group.bench_function(case.name, |b| {
            b.iter(|| legal_plies(black_box(&position)));
        });
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft, bench_movegen);
criterion_main!(perft_benches);
