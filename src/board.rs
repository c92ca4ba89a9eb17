//! The game board: a fixed-size grid of cells filled by dropping pieces into columns

use anyhow::{anyhow, Result};

use crate::{error::Error, LINE_LENGTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns the other player
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The player's number as shown to users
    pub fn number(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    Taken(Player),
    /// Returned for positions outside the grid, never stored in a board
    OffBoard,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The player occupying this cell, if any
    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Taken(player) => Some(*player),
            _ => None,
        }
    }

    /// Numeric encoding of the cell, mixed into the board hash
    pub fn value(&self) -> i64 {
        match self {
            Cell::Empty => -1,
            Cell::OffBoard => -2,
            Cell::Taken(player) => player.number() as i64,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Player),
    Draw,
}

/// Directions scanned from a cell when looking for lines:
/// across, up, and both upward diagonals
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// A game board of arbitrary size
///
/// # Layout
/// Cells are stored column by column, bottom to top, so the cell at
/// `(x, y)` lives at index `x * height + y`. Row 0 is the bottom row.
///
/// Once a board has been created by [`Board::new`] or [`Board::with_move`]
/// its cells never change; the search shares boards between its own stack
/// and the transposition table through `Rc`.
#[derive(Debug)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    last_move: Option<usize>,
    weight: Option<i32>,
}

impl Board {
    /// Creates an empty board
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        let size = match width.checked_mul(height) {
            Some(size) if size > 0 => size,
            _ => return Err(Error::InvalidDimensions { width, height }),
        };
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|source| Error::BoardAllocation {
                cells: size,
                source,
            })?;
        cells.resize(size, Cell::Empty);

        Ok(Self {
            width,
            height,
            cells,
            last_move: None,
            weight: None,
        })
    }

    /// Creates a board by dropping pieces into the given columns,
    /// alternating between player one and player two
    pub fn from_moves<S: AsRef<str>>(width: usize, height: usize, moves: S) -> Result<Self> {
        let mut board = Self::new(width, height)?;
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column < width => {
                    if !board.has_room(column) {
                        return Err(anyhow!("Invalid move, column {} full", column));
                    }
                    board = board.with_move(column, player)?;
                    player = player.other();
                }
                Some(column) => return Err(anyhow!("Invalid move, column {} out of range", column)),
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Copies the board, reporting allocation failure instead of aborting
    pub fn try_clone(&self) -> Result<Self, Error> {
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(self.cells.len())
            .map_err(|source| Error::BoardAllocation {
                cells: self.cells.len(),
                source,
            })?;
        cells.extend_from_slice(&self.cells);

        Ok(Self {
            width: self.width,
            height: self.height,
            cells,
            last_move: self.last_move,
            weight: self.weight,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The column of the most recently dropped piece
    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// The weight the search assigned to this board, if any
    pub fn weight(&self) -> Option<i32> {
        self.weight
    }

    pub fn set_weight(&mut self, weight: i32) {
        self.weight = Some(weight);
    }

    /// All cells in storage order, for hashing and comparison
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the cell at `(x, y)`, or [`Cell::OffBoard`] outside the grid
    pub fn at(&self, x: isize, y: isize) -> Cell {
        if x < 0 || y < 0 || x >= self.width as isize || y >= self.height as isize {
            return Cell::OffBoard;
        }
        self.cells[x as usize * self.height + y as usize]
    }

    /// Whether `column` can take another piece
    pub fn has_room(&self, column: usize) -> bool {
        column < self.width && self.cells[self.column_range(column)].iter().any(Cell::is_empty)
    }

    /// Returns a copy of the board with `player`'s piece dropped into `column`
    ///
    /// # Notes
    /// The column is not validated: dropping into a full or out-of-range
    /// column returns an unmodified copy. Check [`Board::has_room`] first.
    pub fn with_move(&self, column: usize, player: Player) -> Result<Self, Error> {
        let mut next = self.try_clone()?;
        next.weight = None;
        next.drop_piece(column, player);
        Ok(next)
    }

    fn drop_piece(&mut self, column: usize, player: Player) {
        if column >= self.width {
            return;
        }
        let range = self.column_range(column);
        if let Some(cell) = self.cells[range].iter_mut().find(|cell| cell.is_empty()) {
            *cell = Cell::Taken(player);
            self.last_move = Some(column);
        }
    }

    fn column_range(&self, column: usize) -> std::ops::Range<usize> {
        column * self.height..(column + 1) * self.height
    }

    /// Returns the owner of a line of four starting at `(x, y)` and running
    /// across, up, or along either upward diagonal
    pub fn line_at(&self, x: isize, y: isize) -> Option<Player> {
        let player = self.at(x, y).player()?;

        let found = DIRECTIONS.iter().any(|&(dx, dy)| {
            (1..LINE_LENGTH as isize).all(|i| self.at(x + i * dx, y + i * dy) == Cell::Taken(player))
        });
        if found {
            Some(player)
        } else {
            None
        }
    }

    /// Returns the owner of the first line of four found, scanning column by column
    pub fn winner(&self) -> Option<Player> {
        (0..self.width as isize)
            .flat_map(|x| (0..self.height as isize).map(move |y| (x, y)))
            .find_map(|(x, y)| self.line_at(x, y))
    }

    /// Whether every cell is taken
    ///
    /// A full board may still contain a win, so check [`Board::winner`] first
    /// when looking for a draw.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(Cell::is_empty)
    }

    pub fn state(&self) -> GameState {
        match self.winner() {
            Some(player) => GameState::Won(player),
            None if self.is_full() => GameState::Draw,
            None => GameState::Playing,
        }
    }

    /// The cells of the board for display, rows top to bottom and each row left to right
    pub fn rows(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        (0..self.height as isize)
            .rev()
            .map(move |y| (0..self.width as isize).map(|x| self.at(x, y)).collect())
    }
}

impl PartialEq for Board {
    /// Boards are equal when they have the same shape and the same pieces,
    /// regardless of how they were reached or weighted
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Eq for Board {}
