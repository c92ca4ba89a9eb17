//! Search configuration

use crate::{error::Error, LOOK_AHEAD, TABLE_BIN_SIZE, TABLE_SIZE};

/// How the transposition table matches stored boards against new ones
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CacheMode {
    /// Reuse a stored weight for any equal board, whatever depth it was searched to
    Board,
    /// Reuse a stored weight only for an equal board searched to the same remaining depth
    BoardAndDepth,
    /// Never look up or store boards, every child is searched in full
    Disabled,
}

/// Parameters of a single search
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Remaining depth budget at the root, in plies
    pub lookahead: usize,
    /// Number of buckets in the transposition table
    pub table_size: usize,
    /// Number of boards each bucket can hold
    pub bin_size: usize,
    pub cache_mode: CacheMode,
    /// Print the weight of every root move to stdout as it is found
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lookahead: LOOK_AHEAD,
            table_size: TABLE_SIZE,
            bin_size: TABLE_BIN_SIZE,
            cache_mode: CacheMode::Board,
            verbose: false,
        }
    }
}

impl SearchConfig {
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size;
        self
    }

    pub fn with_bin_size(mut self, bin_size: usize) -> Self {
        self.bin_size = bin_size;
        self
    }

    pub fn with_cache_mode(mut self, cache_mode: CacheMode) -> Self {
        self.cache_mode = cache_mode;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks that the table dimensions can hold at least one board
    pub fn validate(&self) -> Result<(), Error> {
        if self.table_size == 0 {
            return Err(Error::Config("table_size must be > 0".into()));
        }
        if self.bin_size == 0 {
            return Err(Error::Config("bin_size must be > 0".into()));
        }
        Ok(())
    }
}
