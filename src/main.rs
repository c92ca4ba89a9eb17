use anyhow::Result;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Stdin, Write};

use drop_four::*;

mod game;
use game::*;

fn ask_yes_no(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn ask_lookahead(stdin: &Stdin) -> Result<usize> {
    loop {
        let mut buffer = String::new();
        print!("Search depth (blank for {}): ", LOOK_AHEAD);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        let answer = buffer.trim();
        if answer.is_empty() {
            return Ok(LOOK_AHEAD);
        }
        match answer.parse::<usize>() {
            Ok(depth) if depth > 0 => return Ok(depth),
            _ => println!("Invalid depth: {}", answer),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let ai_players = (
        ask_yes_no(&stdin, "Is player 1 AI controlled?")?,
        ask_yes_no(&stdin, "Is player 2 AI controlled?")?,
    );
    let config = SearchConfig::default()
        .with_lookahead(ask_lookahead(&stdin)?)
        .with_verbose(true);

    let mut game = Game::new(WIDTH, HEIGHT)?;

    // game loop
    loop {
        game.display()?;

        match game.state {
            GameState::Playing => {
                let ai_to_move = match game.to_move {
                    Player::One => ai_players.0,
                    Player::Two => ai_players.1,
                };
                let next_move = if ai_to_move {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    // slow down play if both players are AI
                    if ai_players == (true, true) {
                        std::thread::sleep(std::time::Duration::new(3, 0));
                    }

                    let mut solver =
                        Solver::new(game.board.try_clone()?, game.to_move, game.to_move.other())
                            .with_config(config.clone());
                    let outcome = solver.search()?;
                    let best_move = match outcome.best_move {
                        Some(column) => column,
                        None => anyhow::bail!("no move found for a game still in play"),
                    };

                    println!("Best move: {}", best_move + 1);
                    best_move + 1

                // human player
                } else {
                    print!("Move input > ");
                    stdout().flush()?;
                    let mut input_str = String::new();
                    stdin.read_line(&mut input_str)?;

                    match input_str.trim().parse::<usize>() {
                        Err(_) => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                        Ok(column) => column,
                    }
                };

                if let Err(err) = game.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(player) => {
                println!("Player {} wins!", player.number());
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    println!("Moves played: {}", game.history);
    Ok(())
}
