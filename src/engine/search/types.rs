//! Search limits, configuration, stats, results and constants.

use std::time::Duration;

pub const INFINITY: i32 = 32000;
pub const MATE_SCORE: i32 = 30000;
pub const DRAW_SCORE: i32 = 0;
pub const MAX_PLY: usize = 128;

/// UCI `go` parameters.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    pub depth: Option<u32>,
    pub movetime: Option<Duration>,
    pub wtime: Option<Duration>,
    pub btime: Option<Duration>,
    pub winc: Option<Duration>,
    pub binc: Option<Duration>,
    pub movestogo: Option<u32>,
    pub infinite: bool,
}

/// Engine tuning.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Depth used when the caller gives none.
    pub default_depth: u32,
    /// A new iteration starts only while elapsed time is at most this
    /// fraction of the budget.
    pub time_fraction: f64,
    pub root_move_cap: usize,
    /// Cap for internal nodes with more than `deep_threshold` plies left.
    pub deep_move_cap: usize,
    pub shallow_move_cap: usize,
    pub deep_threshold: u32,
    pub use_book: bool,
    /// Book lookups happen only up to this fullmove number.
    pub book_max_fullmove: u32,
    pub use_transposition: bool,
    pub hash_mb: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_depth: 20,
            time_fraction: 0.8,
            root_move_cap: 30,
            deep_move_cap: 18,
            shallow_move_cap: 28,
            deep_threshold: 5,
            use_book: true,
            book_max_fullmove: 20,
            use_transposition: true,
            hash_mb: 16,
        }
    }
}

/// Lifetime counters of one engine instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_evaluated: u64,
    pub cutoffs: u64,
    pub tt_hits: u64,
    pub tt_size: usize,
}

/// One completed deepening iteration.
#[derive(Clone, Debug)]
pub struct IterationReport<M> {
    pub depth: u32,
    /// Offset from the start of the search.
    pub started: Duration,
    pub duration: Duration,
    pub score: i32,
    pub best_move: Option<M>,
    /// `nodes_evaluated` at the end of the iteration.
    pub nodes: u64,
}

#[derive(Clone, Debug)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    /// Score of the deepest completed iteration. `-INFINITY` when no
    /// iteration completed (budget spent before depth 1, or `max_depth`
    /// of 0); check `depth` before trusting it.
    pub score: i32,
    /// Deepest fully searched iteration, 0 for book moves and aborted starts.
    pub depth: u32,
    pub from_book: bool,
    pub elapsed: Duration,
    /// Duration of the last iteration that was started.
    pub last_iteration: Duration,
    pub iterations: Vec<IterationReport<M>>,
}

impl<M> SearchResult<M> {
    pub(super) fn empty(score: i32) -> Self {
        SearchResult {
            best_move: None,
            score,
            depth: 0,
            from_book: false,
            elapsed: Duration::ZERO,
            last_iteration: Duration::ZERO,
            iterations: Vec::new(),
        }
    }
}
