use tictactoe_solver::{best_move, Board};

/// Plays both sides optimally from the empty board and prints each position.
/// Two optimal players always end in a draw.
fn main() {
    env_logger::init();

    let mut board = Board::empty();
    while let Some(m) = best_move(&board) {
        let player = board.current_player();
        board = match board.apply(m) {
            Ok(next) => next,
            Err(err) => {
                eprintln!("search suggested an illegal move: {err}");
                return;
            }
        };
        println!("{player} plays {m}");
        println!("{board}");
        println!();
    }

    match board.winner() {
        Some(player) => println!("{player} wins"),
        None => println!("draw"),
    }
}
