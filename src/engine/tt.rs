//! Transposition Table
//!
//! Fixed-size table indexed by the low bits of the position hash. The
//! searcher clears it at the start of every deepening iteration, so entries
//! only ever deduplicate work within one iteration.

use crate::engine::search::MATE_SCORE;

/// Entry type in the transposition table
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum TTFlag {
    /// Exact score
    Exact = 0,
    /// Lower bound (beta cutoff)
    LowerBound = 1,
    /// Upper bound (failed low)
    UpperBound = 2,
}

/// A single entry in the transposition table
#[derive(Clone, Debug, PartialEq)]
pub struct TTEntry<M> {
    /// Full hash key (for verification)
    pub key: u64,
    pub best_move: Option<M>,
    /// Remaining depth the score was searched to
    pub depth: u32,
    /// Always within `[-MATE_SCORE, MATE_SCORE]`
    pub score: i32,
    pub flag: TTFlag,
}

pub struct TranspositionTable<M> {
    entries: Vec<Option<TTEntry<M>>>,
    size: usize,
    used: usize,
}

impl<M: Clone> TranspositionTable<M> {
    /// Create a new transposition table with the given size in MB
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry<M>>>();
        let num_entries = ((size_mb.max(1) * 1024 * 1024) / entry_size).max(2);
        // Round down to power of 2 for efficient indexing
        let size = if num_entries.is_power_of_two() {
            num_entries
        } else {
            num_entries.next_power_of_two() / 2
        };

        TranspositionTable {
            entries: vec![None; size],
            size,
            used: 0,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & (self.size - 1)
    }

    pub fn probe(&self, key: u64) -> Option<&TTEntry<M>> {
        self.entries[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Store an entry, replacing the slot unless it holds a deeper result
    /// for the same position.
    pub fn store(&mut self, key: u64, best_move: Option<M>, depth: u32, score: i32, flag: TTFlag) {
        let idx = self.index(key);
        let slot = &mut self.entries[idx];

        let should_replace = match slot {
            None => true,
            Some(existing) => existing.key != key || depth >= existing.depth,
        };
        if !should_replace {
            return;
        }
        if slot.is_none() {
            self.used += 1;
        }
        *slot = Some(TTEntry {
            key,
            best_move,
            depth,
            score: score.clamp(-MATE_SCORE, MATE_SCORE),
            flag,
        });
    }

    pub fn clear(&mut self) {
        if self.used > 0 {
            self.entries.fill(None);
            self.used = 0;
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    pub fn capacity(&self) -> usize {
        self.size
    }

    /// Fill rate in permille, as UCI `hashfull` expects.
    pub fn hashfull(&self) -> usize {
        (self.used * 1000) / self.size
    }
}

impl<M: Clone> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new(16)
    }
}
