use crate::controller::ControllerOptions;
use crate::game::Color;
use clap::Parser;
use std::io;

#[derive(Parser, Debug)]
#[command(name = "chessgraph")]
#[command(about = "Two-player chess on the terminal, with an optional random opponent", long_about = None)]
pub struct Args {
    /// Start from this position instead of the initial one
    #[arg(long, value_name = "FEN")]
    pub fen: Option<String>,

    /// Side the built-in opponent plays (white or black)
    #[arg(long, value_name = "COLOR", value_parser = parse_color)]
    pub opponent: Option<Color>,

    /// Depth sent with each opponent request
    #[arg(long, default_value_t = 10)]
    pub depth: usize,

    /// How many times an illegal suggestion is re-requested
    #[arg(long, default_value_t = 5)]
    pub max_retries: usize,

    /// Seed for the opponent's picks and depth adjustments
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_color(value: &str) -> Result<Color, String> {
    value
        .parse::<Color>()
        .map_err(|_| format!("expected 'white' or 'black', got '{}'", value))
}

impl Args {
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            opponent: self.opponent,
            opponent_depth: self.depth,
            max_opponent_retries: self.max_retries,
            seed: self.seed,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum PlayCommand {
    Click(String),             // <square>: select, or move the focused piece there
    Select(String),            // select <square>
    Move(String),              // move <from><to>
    Moves(String),             // moves <square>: list legal destinations
    SetOption(String, String), // set <name> = <value>
    Board,
    Fen,
    History,
    Turn,
    NewGame(Option<String>), // new [fen]
    Opponent,                // let the opponent move now
    Quit,

    Invalid(String), // placeholder for invalid commands so we can pattern match
}

impl PlayCommand {
    /// Reads one line from stdin. End of input reads as `quit`.
    pub fn receive() -> PlayCommand {
        let mut input = String::new();

        match io::stdin().read_line(&mut input) {
            Ok(0) => PlayCommand::Quit,
            Ok(_) => PlayCommand::parse(&input),
            Err(e) => PlayCommand::Invalid(e.to_string()),
        }
    }

    pub fn parse(input: &str) -> PlayCommand {
        let parts = input.trim().split_whitespace().collect::<Vec<_>>();

        match parts.as_slice() {
            ["select", square] => PlayCommand::Select(square.to_string()),
            ["move", notation] => PlayCommand::Move(notation.to_string()),
            ["move", from, to] => PlayCommand::Move(format!("{}{}", from, to)),
            ["moves", square] => PlayCommand::Moves(square.to_string()),
            ["set", rest @ ..] if !rest.is_empty() => Self::parse_set(rest),
            ["board"] => PlayCommand::Board,
            ["fen"] => PlayCommand::Fen,
            ["history"] => PlayCommand::History,
            ["turn"] => PlayCommand::Turn,
            ["new"] => PlayCommand::NewGame(None),
            ["new", fen @ ..] => PlayCommand::NewGame(Some(fen.join(" "))),
            ["opponent"] => PlayCommand::Opponent,
            ["quit"] | ["exit"] => PlayCommand::Quit,
            [square] if square.len() == 2 => PlayCommand::Click(square.to_string()),
            // e2e4 or e2-e4
            [notation] if notation.replace('-', "").len() == 4 => {
                PlayCommand::Move(notation.to_string())
            }
            _ => PlayCommand::Invalid(input.trim().to_string()),
        }
    }

    fn parse_set(parts: &[&str]) -> PlayCommand {
        // Everything before "=" is the option name, everything after the value
        match parts.iter().position(|&part| part == "=") {
            Some(eq) if eq > 0 && eq + 1 < parts.len() => {
                PlayCommand::SetOption(parts[..eq].join(" "), parts[eq + 1..].join(" "))
            }
            _ => PlayCommand::Invalid(format!("set {}", parts.join(" "))),
        }
    }
}
