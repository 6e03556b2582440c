use crate::controller::opponent::{Opponent, SuggestionRequest, adjust_depth};
use crate::game::{
    BoardSquare, BoardSquareExt, Color, Game, MoveError, MoveOutcome, Ray, SetupError,
    unparse_squares,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    pub opponent: Option<Color>, // side played by the opponent, if any
    pub opponent_depth: usize,
    pub max_opponent_retries: usize,
    pub seed: Option<u64>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            opponent: None,
            opponent_depth: 10,
            max_opponent_retries: 5,
            seed: None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum MoveResultType {
    Success,                // successful move
    InvalidNotation,        // wrong long algebraic notation
    Rejected(MoveError),    // parsed, but not playable now
    OpponentGaveUp,         // every opponent suggestion was illegal or missing
}

/// What a click on a square ended up doing.
#[derive(Debug, PartialEq)]
pub enum ClickResult {
    Selected(Vec<Ray>),
    Moved(MoveOutcome),
    Ignored,
}

/// Turn controller: owns the game and routes selections, moves and
/// opponent suggestions into it one complete cycle at a time.
pub struct GameController {
    pub game: Game,
    pub options: ControllerOptions,
    rng: StdRng,
}

impl GameController {
    pub fn new() -> Result<Self, SetupError> {
        Self::with_options(ControllerOptions::default())
    }

    pub fn with_options(options: ControllerOptions) -> Result<Self, SetupError> {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            game: Game::setup()?,
            options,
            rng,
        })
    }

    pub fn new_game(&mut self) -> Result<(), SetupError> {
        self.game = Game::setup()?;
        log::info!("New game");
        Ok(())
    }

    pub fn new_game_from_fen(&mut self, fen: &str) -> Result<(), SetupError> {
        self.game = Game::from_fen(fen)?;
        log::info!("New game from {}", fen);
        Ok(())
    }

    pub fn current_turn(&self) -> Color {
        self.game.current_turn()
    }

    pub fn set_option(&mut self, name: &str, value: &str) {
        match name.to_lowercase().as_str() {
            "opponent" => match value.to_lowercase().as_str() {
                "none" | "off" => self.options.opponent = None,
                other => match Color::from_str(other) {
                    Ok(color) => self.options.opponent = Some(color),
                    Err(_) => log::warn!(
                        "Invalid value for Opponent option: {}. Expected 'white', 'black' or 'none'",
                        value
                    ),
                },
            },
            "depth" => match value.parse::<usize>() {
                Ok(depth) if (1..=64).contains(&depth) => self.options.opponent_depth = depth,
                _ => log::warn!(
                    "Invalid value for Depth option: {}. Expected value between 1 and 64",
                    value
                ),
            },
            "max retries" => match value.parse::<usize>() {
                Ok(retries) if retries <= 100 => self.options.max_opponent_retries = retries,
                _ => log::warn!(
                    "Invalid value for Max Retries option: {}. Expected value between 0 and 100",
                    value
                ),
            },
            "seed" => match value.parse::<u64>() {
                Ok(seed) => {
                    self.options.seed = Some(seed);
                    self.rng = StdRng::seed_from_u64(seed);
                }
                Err(_) => log::warn!(
                    "Invalid value for Seed option: {}. Expected numeric value",
                    value
                ),
            },
            _ => log::warn!("Unknown option: {}", name),
        }
    }

    pub fn select(&mut self, label: &str) -> Result<Vec<Ray>, MoveError> {
        self.game.select_label(label)
    }

    /// Board click semantics: a highlighted square completes the move of the
    /// focused piece, one of the mover's pieces becomes the new focus, and
    /// anything else is ignored.
    pub fn click(&mut self, square: BoardSquare) -> ClickResult {
        if self.game.state.focused.is_some() && self.game.state.is_highlighted(square) {
            return match self.game.move_focused(square) {
                Ok(outcome) => ClickResult::Moved(outcome),
                Err(e) => {
                    log::warn!("Highlighted move refused: {}", e);
                    ClickResult::Ignored
                }
            };
        }

        if self.game.owner_at(square) == Some(self.game.current_turn()) {
            return ClickResult::Selected(self.game.select(square));
        }

        ClickResult::Ignored
    }

    pub fn try_move_piece(&mut self, long_algebraic_notation: &str) -> MoveResultType {
        let notation = long_algebraic_notation.replace('-', "");

        if notation.len() != 4 || !notation.is_ascii() {
            return MoveResultType::InvalidNotation;
        }

        match (
            BoardSquare::parse(&notation[0..2]),
            BoardSquare::parse(&notation[2..4]),
        ) {
            (Some(from), Some(to)) => match self.game.execute_move(from, to) {
                Ok(_) => MoveResultType::Success,
                Err(e) => MoveResultType::Rejected(e),
            },
            _ => MoveResultType::InvalidNotation,
        }
    }

    pub fn is_opponent_turn(&self) -> bool {
        self.options.opponent == Some(self.current_turn())
    }

    /// Asks `opponent` for a move and plays it if legal. A bad or missing
    /// suggestion is re-requested with an adjusted depth, at most
    /// `max_opponent_retries` more times.
    pub fn play_opponent_turn(&mut self, opponent: &mut dyn Opponent) -> MoveResultType {
        let mut depth = self.options.opponent_depth;

        for attempt in 0..=self.options.max_opponent_retries {
            let request = SuggestionRequest {
                snapshot: self.game.snapshot(),
                depth,
                attempt,
            };

            let suggestion = opponent.suggest(&request);

            match suggestion {
                Some(s) => match self.game.execute_move(s.from, s.to) {
                    Ok(outcome) => {
                        log::debug!(
                            "{} opponent played {} (attempt {})",
                            opponent.name(),
                            s.unparse(),
                            attempt
                        );
                        log::trace!("Changed squares: {}", unparse_squares(&outcome.changed));
                        return MoveResultType::Success;
                    }
                    Err(e) => log::warn!(
                        "{} opponent suggested {}: {}",
                        opponent.name(),
                        s.unparse(),
                        e
                    ),
                },
                None => log::warn!("{} opponent had no suggestion", opponent.name()),
            }

            depth = adjust_depth(self.options.opponent_depth, &mut self.rng);
        }

        MoveResultType::OpponentGaveUp
    }

    pub fn render(&self) -> String {
        const RESET: &str = "\x1b[0m";
        const LIGHT_SQUARE_BG: &str = "\x1b[48;5;172m";
        const DARK_SQUARE_BG: &str = "\x1b[48;5;130m";
        const FOCUS_BG: &str = "\x1b[48;5;28m";
        const WHITE_PIECE: &str = "\x1b[1;97m";
        const BLACK_PIECE: &str = "\x1b[1;30m";
        const MOVE_HIGHLIGHT: &str = "\x1b[1;34m";
        const CAPTURE_HIGHLIGHT: &str = "\x1b[1;31m";

        let state = &self.game.state;
        let mut out = String::new();

        out.push_str(&format!(
            "{} to move{}\n",
            state.turn,
            if self.game.is_in_check(state.turn) { " (check)" } else { "" }
        ));

        for rank in (0..8).rev() {
            out.push_str(&format!("{} ", rank + 1));

            for file in 0..8 {
                let square = BoardSquare::from_position(file, rank);
                let bg_color = if state.focused == Some(square) {
                    FOCUS_BG
                } else if (file + rank) % 2 == 1 {
                    LIGHT_SQUARE_BG
                } else {
                    DARK_SQUARE_BG
                };
                out.push_str(bg_color);

                let highlighted = state.is_highlighted(square);

                match self.game.piece_at(square) {
                    Some(piece) => {
                        let piece_color = match (highlighted, piece.color) {
                            (true, _) => CAPTURE_HIGHLIGHT,
                            (false, Color::White) => WHITE_PIECE,
                            (false, Color::Black) => BLACK_PIECE,
                        };
                        out.push_str(&format!("{} {} ", piece_color, piece.kind.to_emoji()));
                    }
                    None if highlighted => out.push_str(&format!("{} ● ", MOVE_HIGHLIGHT)),
                    None => out.push_str("   "),
                }

                out.push_str(RESET);
            }

            out.push('\n');
        }

        out.push_str("   a  b  c  d  e  f  g  h\n");
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    pub fn print_fen(&self) {
        println!("{}", self.game.get_fen());
    }

    pub fn print_history(&self) {
        for (index, record) in self.game.history.iter().enumerate() {
            println!("{:>3}. {} {} {}", index + 1, record.color, record.piece, record.label());
        }
    }

    /// Labels of every legal destination of `square`, for quick listing.
    pub fn legal_labels(&self, label: &str) -> Option<Vec<String>> {
        BoardSquare::parse(label).map(|square| self.game.legal_labels(square))
    }
}
