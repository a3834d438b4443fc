pub mod engine;
pub mod error;
pub mod rules;
pub mod uci;

pub use engine::eval::evaluate;
pub use engine::search::{SearchLimits, SearchResult, Searcher};
pub use error::{RulesError, SearchError};
pub use rules::{Board, ChessMove, Rules};
pub use shakmaty;
pub use uci::UCI;
