//! Searcher: iterative deepening driver, time budget, book probe and the
//! engine-owned tables and counters.

use shakmaty::{Color, Square};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::engine::book::OpeningBook;
use crate::engine::tt::TranspositionTable;
use crate::error::SearchError;
use crate::rules::{ChessMove, Rules};

use super::ordering::{HistoryTable, KillerMoves};
use super::types::{INFINITY, IterationReport, SearchConfig, SearchLimits, SearchResult, SearchStats};

/// Search engine for one game at a time.
///
/// Killer moves, the history table and the counters live as long as the
/// searcher and are not reset between searches; use [`Searcher::clear`] or
/// [`Searcher::reset_stats`] for isolated measurements.
pub struct Searcher<M> {
    pub(super) config: SearchConfig,
    pub(super) tt: TranspositionTable<M>,
    pub(super) killers: KillerMoves<M>,
    pub(super) history: HistoryTable,
    pub(super) stats: SearchStats,
    book: Option<OpeningBook>,
}

impl<M: ChessMove> Searcher<M> {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Searcher {
            tt: TranspositionTable::new(config.hash_mb),
            killers: KillerMoves::new(),
            history: HistoryTable::new(),
            stats: SearchStats::default(),
            book: Some(OpeningBook::standard()),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    pub fn set_book(&mut self, book: Option<OpeningBook>) {
        self.book = book;
    }

    pub fn set_hash_size(&mut self, size_mb: usize) {
        self.config.hash_mb = size_mb;
        self.tt = TranspositionTable::new(size_mb);
    }

    /// Forget tables, heuristics and counters.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers = KillerMoves::new();
        self.history.clear();
        self.reset_stats();
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    pub fn stats(&self) -> SearchStats {
        SearchStats {
            tt_size: self.tt.len(),
            ..self.stats
        }
    }

    /// Transposition table fill in permille.
    pub fn hashfull(&self) -> usize {
        self.tt.hashfull()
    }

    /// Add `depth²` to the history weight of the move's (from, to) pair.
    pub fn update_history(&mut self, mv: &M, depth: u32) {
        self.history.add(mv, depth);
    }

    pub fn history_weight(&self, from: Square, to: Square) -> u32 {
        self.history.get(from, to)
    }

    pub fn is_killer(&self, mv: &M, ply: usize) -> bool {
        self.killers.is_killer(mv, ply)
    }

    /// Time for one move under UCI clock rules. `None` means no limit.
    pub fn calculate_time(&self, limits: &SearchLimits, side: Color) -> Option<Duration> {
        if limits.infinite {
            return None;
        }
        if let Some(mt) = limits.movetime {
            return Some(mt);
        }
        let (time, inc) = match side {
            Color::White => (limits.wtime?, limits.winc.unwrap_or_default()),
            Color::Black => (limits.btime?, limits.binc.unwrap_or_default()),
        };
        let moves_to_go = limits.movestogo.unwrap_or(30).max(1);
        let time_for_move = time / moves_to_go + inc / 2;
        Some(time_for_move.min(time / 2))
    }

    /// [`Searcher::search`] driven by UCI `go` parameters.
    pub fn search_with_limits<R: Rules<Move = M>>(
        &mut self,
        pos: &mut R,
        limits: &SearchLimits,
    ) -> Result<SearchResult<M>, SearchError> {
        let depth = limits.depth.unwrap_or(self.config.default_depth);
        let time_limit = self.calculate_time(limits, pos.turn());
        self.search(pos, depth, time_limit)
    }

    /// Best move for `pos` by iterative deepening up to `max_depth`.
    ///
    /// The clock is only looked at before each iteration: once more than
    /// `time_fraction` of `time_limit` has passed no new depth is started,
    /// but a running iteration always finishes, so the call can overrun
    /// `time_limit` by up to one iteration. `pos` is returned unchanged.
    pub fn search<R: Rules<Move = M>>(
        &mut self,
        pos: &mut R,
        max_depth: u32,
        time_limit: Option<Duration>,
    ) -> Result<SearchResult<M>, SearchError> {
        let start = Instant::now();

        if self.config.use_book && pos.fullmove_number() <= self.config.book_max_fullmove {
            if let Some(mv) = self.book.as_ref().and_then(|book| book.probe(&*pos)) {
                info!(fen = %pos.fen(), ?mv, "book move");
                let mut result = SearchResult::empty(0);
                result.best_move = Some(mv);
                result.from_book = true;
                result.elapsed = start.elapsed();
                return Ok(result);
            }
        }

        let soft_limit = time_limit.map(|limit| limit.mul_f64(self.config.time_fraction));
        let mut result = SearchResult::empty(-INFINITY);

        for depth in 1..=max_depth {
            let started = start.elapsed();
            if let Some(soft) = soft_limit {
                if started > soft {
                    info!(depth, elapsed_ms = started.as_millis() as u64, "time budget spent");
                    break;
                }
            }

            self.tt.clear();
            let (best_move, score) = self.search_root(pos, depth)?;
            let duration = start.elapsed() - started;
            result.last_iteration = duration;

            let Some(best_move) = best_move else {
                // No legal moves: the static score is final at every depth.
                result.score = score;
                break;
            };

            debug!(
                depth,
                score,
                nodes = self.stats.nodes_evaluated,
                cutoffs = self.stats.cutoffs,
                ms = duration.as_millis() as u64,
                "iteration complete"
            );
            result.iterations.push(IterationReport {
                depth,
                started,
                duration,
                score,
                best_move: Some(best_move.clone()),
                nodes: self.stats.nodes_evaluated,
            });
            result.best_move = Some(best_move);
            result.score = score;
            result.depth = depth;
        }

        result.elapsed = start.elapsed();
        Ok(result)
    }
}

impl<M: ChessMove> Default for Searcher<M> {
    fn default() -> Self {
        Self::new()
    }
}
