use crate::game::{BoardSquare, BoardSquareExt, Game, PositionSnapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What the opponent is asked: the whole position and how hard to think.
#[derive(Debug, Clone)]
pub struct SuggestionRequest {
    pub snapshot: PositionSnapshot,
    pub depth: usize,
    pub attempt: usize, // 0 for the first request, counts re-requests
}

impl SuggestionRequest {
    /// UCI-style lines an external engine process would be fed.
    pub fn to_uci_lines(&self) -> Vec<String> {
        vec![
            format!("position fen {}", self.snapshot.to_fen()),
            format!("go depth {}", self.depth),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suggestion {
    pub from: BoardSquare,
    pub to: BoardSquare,
}

impl Suggestion {
    /// Accepts `e2e4`, `e2-e4` or an engine's `bestmove e2e4 [ponder ...]`.
    pub fn parse(text: &str) -> Option<Suggestion> {
        let mut words = text.split_whitespace();
        let mut word = words.next()?;

        if word == "bestmove" {
            word = words.next()?;
        }

        let word = word.replace('-', "");

        if word.len() != 4 || !word.is_ascii() {
            return None;
        }

        Some(Suggestion {
            from: BoardSquare::parse(&word[0..2])?,
            to: BoardSquare::parse(&word[2..4])?,
        })
    }

    pub fn unparse(&self) -> String {
        format!("{}{}", self.from.unparse(), self.to.unparse())
    }
}

/// Anything that proposes moves for one side. Proposals are never trusted:
/// the controller validates them exactly like human input.
pub trait Opponent {
    fn suggest(&mut self, request: &SuggestionRequest) -> Option<Suggestion>;

    fn name(&self) -> &str {
        "opponent"
    }

    /// Restarts whatever randomness the opponent uses. Deterministic
    /// opponents ignore it.
    fn reseed(&mut self, _seed: u64) {}
}

/// Plays a uniformly random legal move, worked out on its own copy of the
/// position rebuilt from the snapshot.
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self { rng }
    }
}

impl Opponent for RandomOpponent {
    fn suggest(&mut self, request: &SuggestionRequest) -> Option<Suggestion> {
        let game = match Game::from_fen(&request.snapshot.to_fen()) {
            Ok(game) => game,
            Err(e) => {
                log::warn!("Random opponent could not read the position: {}", e);
                return None;
            }
        };

        let moves = game.all_legal_moves(request.snapshot.turn);

        if moves.is_empty() {
            return None;
        }

        let (from, to) = moves[self.rng.random_range(0..moves.len())];

        Some(Suggestion { from, to })
    }

    fn name(&self) -> &str {
        "random"
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Depth for the next request after a rejected suggestion: the base depth
/// plus a random bump of up to nine plies.
pub fn adjust_depth<R: Rng>(base: usize, rng: &mut R) -> usize {
    base + rng.random_range(0..10)
}
