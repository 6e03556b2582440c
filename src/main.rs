use chessgraph::utils::{Args, PlayCommand};
use chessgraph::{ClickResult, GameController, MoveResultType, Opponent, RandomOpponent};
use chessgraph::{BoardSquare, BoardSquareExt};
use clap::Parser;

fn main() {
    env_logger::init();

    let args = Args::parse();

    let mut controller = match GameController::with_options(args.controller_options()) {
        Ok(controller) => controller,
        Err(e) => {
            eprintln!("Could not set up the board: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(fen) = &args.fen {
        if let Err(e) = controller.new_game_from_fen(fen) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    let mut opponent = RandomOpponent::new(args.seed);

    controller.print();

    loop {
        if controller.is_opponent_turn() {
            match controller.play_opponent_turn(&mut opponent) {
                MoveResultType::Success => controller.print(),
                result => {
                    log::info!("{:?}", result);
                    // stop auto-play; the human can take over with "opponent"
                    controller.set_option("opponent", "none");
                }
            }
            continue;
        }

        match PlayCommand::receive() {
            PlayCommand::Quit => break,
            PlayCommand::Click(label) => match BoardSquare::parse(&label) {
                Some(square) => match controller.click(square) {
                    ClickResult::Ignored => log::info!("Nothing to do on {}", label),
                    _ => controller.print(),
                },
                None => println!("Unknown square {}", label),
            },
            PlayCommand::Select(label) => match controller.select(&label) {
                Ok(_) => controller.print(),
                Err(e) => println!("{}", e),
            },
            PlayCommand::Move(notation) => match controller.try_move_piece(&notation) {
                MoveResultType::Success => controller.print(),
                MoveResultType::Rejected(e) => println!("{}", e),
                result => println!("{:?}", result),
            },
            PlayCommand::Moves(label) => match controller.legal_labels(&label) {
                Some(labels) => println!("{}", labels.join(" ")),
                None => println!("Unknown square {}", label),
            },
            PlayCommand::SetOption(name, value) => {
                controller.set_option(&name, &value);

                // the seed drives the opponent's picks as well as depth bumps
                if name.eq_ignore_ascii_case("seed") {
                    if let Ok(seed) = value.parse::<u64>() {
                        opponent.reseed(seed);
                    }
                }
            }
            PlayCommand::Board => controller.print(),
            PlayCommand::Fen => controller.print_fen(),
            PlayCommand::History => controller.print_history(),
            PlayCommand::Turn => println!("{}", controller.current_turn()),
            PlayCommand::NewGame(fen) => {
                let result = match fen {
                    Some(fen) => controller.new_game_from_fen(&fen),
                    None => controller.new_game(),
                };

                match result {
                    Ok(()) => controller.print(),
                    Err(e) => println!("{}", e),
                }
            }
            PlayCommand::Opponent => match controller.play_opponent_turn(&mut opponent) {
                MoveResultType::Success => controller.print(),
                result => println!("{:?}", result),
            },
            PlayCommand::Invalid(input) => {
                if !input.is_empty() {
                    println!("Unknown command: {}", input);
                }
            }
        }
    }
}
