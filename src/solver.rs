//! An agent choosing moves by depth-limited minimax search

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::{
    board::{Board, Player},
    config::{CacheMode, SearchConfig},
    error::Error,
    heuristic::evaluate,
    transposition_table::{TableStats, TranspositionTable},
};

/// Orders the children of a search node by their static weight
///
/// Children of a maximising node come out weakest first, children of a
/// minimising node strongest first. Equal weights keep insertion order.
struct MoveSorter {
    player: Player,
    opponent: Player,
    ascending: bool,
    // sort key, column and resulting board
    moves: Vec<(i32, usize, Board)>,
}

impl MoveSorter {
    pub fn new(player: Player, opponent: Player, ascending: bool) -> Self {
        Self {
            player,
            opponent,
            ascending,
            moves: Vec::new(),
        }
    }

    pub fn push(&mut self, column: usize, board: Board) {
        let weight = evaluate(&board, self.player, self.opponent);
        let key = if self.ascending { weight } else { -weight };

        // kept in descending key order so the next move can be popped off the end
        let mut pos = self.moves.len();
        while pos != 0 && self.moves[pos - 1].0 <= key {
            pos -= 1;
        }
        self.moves.insert(pos, (key, column, board));
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl Iterator for MoveSorter {
    type Item = (usize, Board);

    fn next(&mut self) -> Option<Self::Item> {
        self.moves.pop().map(|(_, column, board)| (column, board))
    }
}

/// One node of the game tree
///
/// `alpha` and `beta` narrow as the node's children are explored and each
/// child starts from the bounds its parent holds at that moment.
#[derive(Copy, Clone, Debug)]
pub struct SearchNode {
    pub player: Player,
    pub opponent: Player,
    /// True when `player` is to move
    pub maximizing: bool,
    pub alpha: i32,
    pub beta: i32,
    pub best_move: Option<usize>,
}

impl SearchNode {
    /// A root node with `player` to move and an unbounded window
    pub fn root(player: Player, opponent: Player) -> Self {
        Self {
            player,
            opponent,
            maximizing: true,
            alpha: i32::MIN,
            beta: i32::MAX,
            best_move: None,
        }
    }

    fn child(&self) -> Self {
        Self {
            maximizing: !self.maximizing,
            best_move: None,
            ..*self
        }
    }

    fn mover(&self) -> Player {
        if self.maximizing {
            self.player
        } else {
            self.opponent
        }
    }
}

/// The weight a root move was given, in the order root moves were explored
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RootMove {
    pub column: usize,
    pub weight: i32,
}

impl fmt::Display for RootMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Move {} has weight {}", self.column, self.weight)
    }
}

/// The result of a [`Solver::search`]
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// The chosen column, `None` if the root board was already terminal
    pub best_move: Option<usize>,
    /// The weight of the root board from the searching player's point of view
    pub score: i32,
    pub node_count: usize,
    pub cache_hits: usize,
    pub table: TableStats,
    pub root_moves: Vec<RootMove>,
}

/// An agent picking moves for `player` against `opponent`
///
/// # Position Scoring
/// Leaves of the search are weighed by [`evaluate`]: 1000 for a win, -1000
/// for a loss, 0 for a draw, and otherwise the open-line balance of the board.
///
/// # Notes
/// Every call to [`Solver::search`] builds its own transposition table and
/// drops it on return, so nothing is remembered between searches. Stored
/// weights are reused whatever window they were found with, which can make
/// a reused weight a bound rather than the exact minimax value.
pub struct Solver {
    board: Board,
    player: Player,
    opponent: Player,
    config: SearchConfig,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
    cache_hits: usize,
    root_moves: Vec<RootMove>,
}

impl Solver {
    /// Creates a new `Solver` with the default configuration
    pub fn new(board: Board, player: Player, opponent: Player) -> Self {
        Self {
            board,
            player,
            opponent,
            config: SearchConfig::default(),
            node_count: 0,
            cache_hits: 0,
            root_moves: Vec::new(),
        }
    }

    /// Replaces the configuration of an existing `Solver`
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Searches the game tree to the configured lookahead and returns the best move
    pub fn search(&mut self) -> Result<SearchOutcome, Error> {
        self.config.validate()?;
        self.node_count = 0;
        self.cache_hits = 0;
        self.root_moves.clear();

        let mut table = match self.config.cache_mode {
            CacheMode::Disabled => None,
            mode => Some(TranspositionTable::new(
                self.config.table_size,
                self.config.bin_size,
                mode,
            )?),
        };

        let board = self.board.try_clone()?;
        let mut root = SearchNode::root(self.player, self.opponent);
        let score = self.weight(&mut root, &board, self.config.lookahead, &mut table)?;

        let outcome = SearchOutcome {
            best_move: root.best_move,
            score,
            node_count: self.node_count,
            cache_hits: self.cache_hits,
            table: table.as_ref().map(|t| t.stats()).unwrap_or_default(),
            root_moves: self.root_moves.clone(),
        };
        debug!(
            nodes = outcome.node_count,
            cache_hits = outcome.cache_hits,
            stored = outcome.table.stored,
            overflows = outcome.table.overflows,
            score = outcome.score,
            best_move = ?outcome.best_move,
            "search finished"
        );
        Ok(outcome)
    }

    /// Performs minimax search with alpha-beta pruning
    ///
    /// Returns the weight of `board` and records the best column in `node`.
    fn weight(
        &mut self,
        node: &mut SearchNode,
        board: &Board,
        moves_left: usize,
        table: &mut Option<TranspositionTable>,
    ) -> Result<i32, Error> {
        self.node_count += 1;

        if moves_left == 0 || board.winner().is_some() || board.is_full() {
            return Ok(evaluate(board, node.player, node.opponent));
        }

        let mut moves = MoveSorter::new(node.player, node.opponent, node.maximizing);
        for column in 0..board.width() {
            if board.has_room(column) {
                moves.push(column, board.with_move(column, node.mover())?);
            }
        }
        if moves.is_empty() {
            return Ok(evaluate(board, node.player, node.opponent));
        }

        let mut best_weight = if node.maximizing { i32::MIN } else { i32::MAX };
        for (column, mut child) in moves {
            let stored = table
                .as_ref()
                .and_then(|t| t.lookup(&child, moves_left - 1))
                .and_then(|b| b.weight());

            let child_weight = match stored {
                Some(weight) => {
                    self.cache_hits += 1;
                    weight
                }
                None => {
                    let mut next = node.child();
                    self.weight(&mut next, &child, moves_left - 1, table)?
                }
            };

            child.set_weight(child_weight);
            if let Some(table) = table.as_mut() {
                table.insert(Rc::new(child), moves_left - 1);
            }

            if moves_left == self.config.lookahead {
                let root_move = RootMove {
                    column,
                    weight: child_weight,
                };
                if self.config.verbose {
                    println!("{}", root_move);
                }
                self.root_moves.push(root_move);
            }

            // a perfect opponent will never let the game reach this branch
            if node.maximizing {
                if child_weight >= node.beta {
                    return Ok(child_weight);
                }
                node.alpha = node.alpha.max(child_weight);
            } else {
                if child_weight <= node.alpha {
                    return Ok(child_weight);
                }
                node.beta = node.beta.min(child_weight);
            }

            if (node.maximizing && child_weight > best_weight)
                || (!node.maximizing && child_weight < best_weight)
            {
                best_weight = child_weight;
                node.best_move = Some(column);
            }
        }

        Ok(best_weight)
    }
}

/// Picks a column for `player` by searching `lookahead` plies with a fresh table
///
/// Returns `None` if `board` is already won or full, or `lookahead` is 0.
pub fn choose_move(
    board: &Board,
    player: Player,
    opponent: Player,
    lookahead: usize,
) -> Result<Option<usize>, Error> {
    let config = SearchConfig::default().with_lookahead(lookahead);
    let mut solver = Solver::new(board.try_clone()?, player, opponent).with_config(config);
    Ok(solver.search()?.best_move)
}
