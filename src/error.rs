use std::collections::TryReserveError;

/// Errors raised while building boards, tables or searches.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("failed to allocate a board of {cells} cells: {source}")]
    BoardAllocation {
        cells: usize,
        source: TryReserveError,
    },

    #[error("failed to allocate a transposition table of {slots} slots: {source}")]
    TableAllocation {
        slots: usize,
        source: TryReserveError,
    },

    #[error("config validation error: {0}")]
    Config(String),
}
