//! Static evaluation of boards

use crate::{
    board::{Board, Cell, Player, DIRECTIONS},
    LINE_LENGTH, WIN_SCORE,
};

/// Counts the directions from `(x, y)` whose window of four cells holds at
/// least one of `player`'s pieces and nothing else but empty cells
///
/// Windows that leave the board contain [`Cell::OffBoard`] and never count.
pub fn count_open_lines(board: &Board, x: isize, y: isize, player: Player) -> i32 {
    DIRECTIONS
        .iter()
        .filter(|&&(dx, dy)| {
            let mut owned = false;
            for i in 0..LINE_LENGTH as isize {
                match board.at(x + i * dx, y + i * dy) {
                    Cell::Taken(p) if p == player => owned = true,
                    Cell::Empty => {}
                    _ => return false,
                }
            }
            owned
        })
        .count() as i32
}

/// The number of open lines `player` has over the whole board, minus those of `opponent`
pub fn static_score(board: &Board, player: Player, opponent: Player) -> i32 {
    let mut score = 0;
    for x in 0..board.width() as isize {
        for y in 0..board.height() as isize {
            score += count_open_lines(board, x, y, player) - count_open_lines(board, x, y, opponent);
        }
    }
    score
}

/// Scores a board from `player`'s point of view
///
/// A full board scores 0, a win for `player` scores [`WIN_SCORE`] and a win
/// for anyone else scores `-WIN_SCORE`. Any other board gets its [`static_score`].
pub fn evaluate(board: &Board, player: Player, opponent: Player) -> i32 {
    if board.is_full() {
        return 0;
    }
    match board.winner() {
        Some(winner) if winner == player => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None => static_score(board, player, opponent),
    }
}
