//! Chess engine components
//!
//! This module contains the core engine functionality:
//! - Static evaluation
//! - Negamax search with alpha-beta pruning and iterative deepening
//! - Transposition table
//! - Placeholder opening book

pub mod book;
pub mod eval;
pub mod search;
pub mod tt;

pub use book::OpeningBook;
pub use eval::{evaluate, evaluate_absolute};
pub use search::{MATE_SCORE, SearchConfig, SearchLimits, SearchResult, SearchStats, Searcher};
pub use tt::{TTEntry, TTFlag, TranspositionTable};
