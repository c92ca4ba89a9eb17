use std::rc::Rc;

use tracing::warn;

use crate::{board::Board, config::CacheMode, error::Error};

const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

/// FNV-1a hash of a board's cells in storage order
pub fn hash(board: &Board) -> u64 {
    board.cells().iter().fold(FNV_OFFSET_BASIS, |hash, cell| {
        (hash ^ cell.value() as u64).wrapping_mul(FNV_PRIME)
    })
}

#[derive(Clone)]
struct Entry {
    board: Rc<Board>,
    // remaining search depth the board's weight was found with
    depth: usize,
}

/// Counters describing what happened to a table over its lifetime
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TableStats {
    /// Boards stored in a previously empty slot
    pub stored: usize,
    /// Boards that overwrote an equal entry
    pub replaced: usize,
    /// Boards dropped because their bucket was full
    pub overflows: usize,
}

/// A store of weighted boards, bucketed by hash
///
/// # Notes
/// Every bucket holds a fixed number of boards. Buckets fill from the front
/// and are never compacted, so the first empty slot ends a bucket. When a
/// bucket is full new boards are dropped, which only costs memoisation.
///
/// The table holds its boards through `Rc`; dropping the table releases
/// every board it kept alive.
pub struct TranspositionTable {
    entries: Vec<Option<Entry>>,
    table_size: usize,
    bin_size: usize,
    mode: CacheMode,
    stats: TableStats,
}

impl TranspositionTable {
    /// Creates an empty table of `table_size` buckets holding `bin_size` boards each
    pub fn new(table_size: usize, bin_size: usize, mode: CacheMode) -> Result<Self, Error> {
        if table_size == 0 {
            return Err(Error::Config("table_size must be > 0".into()));
        }
        if bin_size == 0 {
            return Err(Error::Config("bin_size must be > 0".into()));
        }
        let slots = table_size.saturating_mul(bin_size);
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(slots)
            .map_err(|source| Error::TableAllocation { slots, source })?;
        entries.resize(slots, None);

        Ok(Self {
            entries,
            table_size,
            bin_size,
            mode,
            stats: TableStats::default(),
        })
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    /// Index of the bucket `board` belongs to
    pub fn bucket(&self, board: &Board) -> usize {
        (hash(board) % self.table_size as u64) as usize
    }

    fn bin(&self, bucket: usize) -> &[Option<Entry>] {
        &self.entries[bucket * self.bin_size..(bucket + 1) * self.bin_size]
    }

    fn matches(&self, entry: &Entry, board: &Board, depth: usize) -> bool {
        *entry.board == *board && (self.mode != CacheMode::BoardAndDepth || entry.depth == depth)
    }

    /// Returns the stored board equal to `board`
    ///
    /// `depth` is the remaining search depth the caller would search `board`
    /// to. It is only compared in [`CacheMode::BoardAndDepth`].
    pub fn lookup(&self, board: &Board, depth: usize) -> Option<Rc<Board>> {
        for slot in self.bin(self.bucket(board)) {
            match slot {
                None => return None,
                Some(entry) if self.matches(entry, board, depth) => {
                    return Some(Rc::clone(&entry.board))
                }
                Some(_) => {}
            }
        }
        None
    }

    /// Stores `board`, overwriting an equal entry if there is one
    ///
    /// Returns false when the bucket was full and the board was dropped.
    pub fn insert(&mut self, board: Rc<Board>, depth: usize) -> bool {
        let bucket = self.bucket(&board);
        let start = bucket * self.bin_size;

        for i in start..start + self.bin_size {
            let replace = match &self.entries[i] {
                None => false,
                Some(entry) if self.matches(entry, &board, depth) => true,
                Some(_) => continue,
            };
            self.entries[i] = Some(Entry { board, depth });
            if replace {
                self.stats.replaced += 1;
            } else {
                self.stats.stored += 1;
            }
            return true;
        }

        self.stats.overflows += 1;
        warn!("Overflow in hash bin {}, won't store board", bucket);
        false
    }
}
