//! Human input over stdin: playing the network and writing examples.

use std::io::{self, BufRead, Write};

use tracing::info;
use ttt_nn::{Board, Error, Example, MoveSelector, NeuralNetwork, Outcome, Player, SeededRng};
use ttt_nn::policy::RandomBoardGenerator;

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a row and column until the move is accepted.
///
/// Returns `Ok(None)` when stdin closes.
fn human_move(input: &mut impl BufRead, board: &mut Board) -> ttt_nn::Result<Option<(usize, usize)>> {
    loop {
        let Some(row) = prompt(input, "Input row: ")? else {
            return Ok(None);
        };
        let Some(col) = prompt(input, "Input column: ")? else {
            return Ok(None);
        };
        let (Ok(x), Ok(y)) = (row.parse::<usize>(), col.parse::<usize>()) else {
            println!("Row and column must be numbers 0-2");
            continue;
        };
        match board.play(x, y) {
            Ok(_) => return Ok(Some((x, y))),
            Err(e @ Error::IllegalMove { .. }) => println!("{}", e),
            Err(e) => return Err(e),
        }
    }
}

/// Human against the network until the game ends.
pub fn play_game(
    network: &NeuralNetwork,
    selector: &MoveSelector,
    human_first: bool,
) -> ttt_nn::Result<()> {
    let mut board = Board::new();
    let human = if human_first { Player::Naught } else { Player::Cross };
    let stdin = io::stdin();
    let mut input = stdin.lock();

    while !board.is_terminal() {
        print!("{}", board);
        if board.turn() == human {
            if human_move(&mut input, &mut board)?.is_none() {
                return Ok(());
            }
        } else {
            let (x, y) = selector.choose_move(&mut board, network)?;
            println!("Network plays ({}, {})", x, y);
        }
    }

    print!("{}", board);
    match board.outcome() {
        Outcome::Won(p) if p == human => println!("You win!!"),
        Outcome::Won(_) => println!("The network wins."),
        _ => println!("Draw."),
    }
    Ok(())
}

/// Show `count` random positions and record the human's reply to each.
pub fn create_examples(
    count: usize,
    generator: &RandomBoardGenerator,
    selector: &MoveSelector,
    rng: &mut SeededRng,
) -> ttt_nn::Result<Vec<Example>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut examples = Vec::with_capacity(count);

    for n in 0..count {
        println!("-- board {} of {}", n + 1, count);
        let before = generator.generate(rng)?;
        let mut after = before.clone();
        print!("{}", before);
        println!("Move as: {}", before.turn());

        if human_move(&mut input, &mut after)?.is_none() {
            break;
        }
        print!("{}", after);
        examples.push(Example::from_boards(&before, &after, selector.encoder()));
    }

    info!(count = examples.len(), "created examples");
    Ok(examples)
}
