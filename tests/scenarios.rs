use chessgraph::{BoardSquare, BoardSquareExt, Color, Game, MoveError, Piece, PieceRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn sorted_labels(game: &Game, label: &str) -> Vec<String> {
    let square = BoardSquare::parse(label).expect("bad label in test");
    let mut labels = game.legal_labels(square);
    labels.sort();
    labels
}

fn describe(piece: &PieceRecord) -> String {
    format!("{}{}{}", piece.color, piece.kind, piece.square.unparse())
}

/// Everything derived from the cached registries, square by square.
fn fingerprint(game: &Game) -> Vec<String> {
    (0..64u8)
        .map(|square| {
            let mut targeting: Vec<String> = game
                .targeting(square)
                .into_iter()
                .map(|id| describe(&game.pieces[id]))
                .collect();
            targeting.sort();

            format!(
                "{} {:?} {:?} {:?}",
                square.unparse(),
                game.piece_at(square).map(|p| (p.kind, p.color, p.is_protecting_king)),
                targeting,
                game.legal_labels(square)
            )
        })
        .collect()
}

fn perft(game: &Game, depth: usize) -> usize {
    let moves = game.all_legal_moves(game.current_turn());

    if depth == 1 {
        return moves.len();
    }

    moves
        .into_iter()
        .map(|(from, to)| {
            let mut next = game.clone();
            next.execute_move(from, to).expect("generated move should play");
            perft(&next, depth - 1)
        })
        .sum()
}

#[test]
fn test_opening_capture() {
    let mut game = Game::setup().unwrap();

    game.execute_labels("e2", "e4").unwrap();
    game.execute_labels("d7", "d5").unwrap();
    let outcome = game.execute_labels("e4", "d5").unwrap();

    assert_eq!(outcome.captured, Some(Piece::Pawn));
    assert!(game.piece_at(BoardSquare::E4).is_none());
    assert_eq!(game.owner_at(BoardSquare::D5), Some(Color::White));
    assert_eq!(
        game.history.labels_for(Color::White),
        vec!["e2-e4", "e4-d5"]
    );
    assert_eq!(game.current_turn(), Color::Black);
}

#[test]
fn test_pinned_rook_keeps_to_the_file() {
    let mut game = Game::from_fen("4q2k/8/8/8/4R3/8/8/4K3 w - - 0 1").unwrap();

    assert_eq!(
        sorted_labels(&game, "e4"),
        vec!["e2", "e3", "e5", "e6", "e7", "e8"]
    );
    assert_eq!(
        game.execute_labels("e4", "d4"),
        Err(MoveError::IllegalDestination(BoardSquare::E4, BoardSquare::D4))
    );

    // rejected move left the position untouched
    assert_eq!(game.get_fen(), "4q2k/8/8/8/4R3/8/8/4K3 w - - 0 1");
}

#[test]
fn test_perft_from_start() {
    let game = Game::setup().unwrap();

    assert_eq!(perft(&game, 1), 20);
    assert_eq!(perft(&game, 2), 400);
    assert_eq!(perft(&game, 3), 8902);
}

#[test]
fn test_fools_mate_leaves_no_moves() {
    let mut game = Game::setup().unwrap();

    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        game.execute_labels(from, to).unwrap();
    }

    assert!(game.is_in_check(Color::White));
    assert!(game.all_legal_moves(Color::White).is_empty());
}

#[test]
fn test_incremental_state_matches_rebuilt_position() {
    for seed in 0..6 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Game::setup().unwrap();

        for ply in 0..120 {
            let mover = game.current_turn();
            let moves = game.all_legal_moves(mover);

            if moves.is_empty() {
                break;
            }

            let (from, to) = moves[rng.random_range(0..moves.len())];
            game.execute_move(from, to).unwrap();

            assert!(
                !game.is_in_check(mover),
                "seed {} ply {}: {}-{} left the mover in check",
                seed,
                ply,
                from.unparse(),
                to.unparse()
            );

            let rebuilt = Game::from_fen(&game.get_fen()).unwrap();
            assert_eq!(
                fingerprint(&game),
                fingerprint(&rebuilt),
                "seed {} ply {} after {}-{}",
                seed,
                ply,
                from.unparse(),
                to.unparse()
            );
        }
    }
}
