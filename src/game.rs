use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use drop_four::{Board, Cell, GameState, Player};

/// A game in progress, as seen by the command loop
pub struct Game {
    pub board: Board,
    pub to_move: Player,
    pub history: String,
    pub state: GameState,
}

impl Game {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            board: Board::new(width, height)?,
            to_move: Player::One,
            history: String::new(),
            state: GameState::Playing,
        })
    }

    /// Plays a column given as entered by the user, counting from 1
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        let width = self.board.width();
        if column_one_indexed < 1 || column_one_indexed > width {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                width
            ));
        }
        let column = column_one_indexed - 1;
        if !self.board.has_room(column) {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        self.board = self.board.with_move(column, self.to_move)?;
        self.to_move = self.to_move.other();
        self.history.push_str(&column_one_indexed.to_string());
        self.state = self.board.state();

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();
        let width = self.board.width();
        let height = self.board.height();

        let cols: String = (1..=width).map(|x| (x % 10).to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..height {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;
        // the bottom row sits on the cursor's line
        let top = origin_y.saturating_sub(height as u16 - 1);

        for (row, cells) in self.board.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                stdout
                    .queue(MoveTo(origin_x + col as u16, top + row as u16))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match cell {
                                Cell::Taken(Player::One) => Color::Red,
                                Cell::Taken(Player::Two) => Color::Yellow,
                                _ => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + width as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}
