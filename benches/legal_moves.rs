use chessgraph::{BoardSquare, BoardSquareExt, Game};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn legal_moves_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    group.significance_level(0.1).sample_size(500);

    group.bench_function("setup", |b| b.iter(|| black_box(Game::setup())));

    let positions = [
        (
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
            "starting_position",
        ),
        (
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
            "kiwipete_position",
        ),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", "endgame_position"),
    ];

    for (fen, name) in positions {
        let Ok(game) = Game::from_fen(fen) else {
            continue;
        };

        group.bench_with_input(BenchmarkId::new("all_legal_moves", name), &game, |b, game| {
            b.iter(|| black_box(game.all_legal_moves(game.current_turn())))
        });
    }

    // measures the incremental repair after each move
    group.bench_function("short_game", |b| {
        let line = [
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "b5"),
            ("a7", "a6"),
            ("b5", "c6"),
            ("d7", "c6"),
        ];

        b.iter(|| {
            let mut game = Game::setup().ok()?;

            for (from, to) in line {
                let from = BoardSquare::parse(from)?;
                let to = BoardSquare::parse(to)?;
                game.execute_move(from, to).ok()?;
            }

            Some(black_box(game))
        })
    });

    group.finish();
}

criterion_group!(benches, legal_moves_benchmark);
criterion_main!(benches);
