//! Search: iterative deepening, negamax with alpha-beta, move ordering.

mod negamax;
mod ordering;
mod report;
mod searcher;
mod types;

pub use ordering::{MoveCap, move_score, order_and_cap, order_moves};
pub use report::{format_score, info_line};
pub use searcher::Searcher;
pub use types::{
    DRAW_SCORE, INFINITY, IterationReport, MATE_SCORE, MAX_PLY, SearchConfig, SearchLimits,
    SearchResult, SearchStats,
};
