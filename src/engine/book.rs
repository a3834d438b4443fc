//! Opening book: exact FEN -> candidate moves in UCI notation.

use std::collections::HashMap;

use crate::rules::Rules;

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Placeholder book. A position matches only if its full FEN, move counters
/// included, is identical to a stored key.
#[derive(Clone, Debug, Default)]
pub struct OpeningBook {
    /// One or more UCI moves per FEN. Repeating a move raises its weight.
    entries: HashMap<String, Vec<String>>,
}

impl OpeningBook {
    /// The built-in book: 1. e4 from the start position.
    pub fn standard() -> Self {
        let mut book = OpeningBook::default();
        book.insert(STARTPOS_FEN, "e2e4");
        book
    }

    pub fn insert(&mut self, fen: &str, uci: &str) {
        self.entries
            .entry(fen.trim().to_string())
            .or_default()
            .push(uci.to_string());
    }

    /// Probe the book for the current position. Returns a random legal book move if any.
    pub fn probe<R: Rules>(&self, pos: &R) -> Option<R::Move> {
        let moves = self.entries.get(&pos.fen())?;
        if moves.is_empty() {
            return None;
        }
        let uci = moves.get(rand::random::<u64>() as usize % moves.len())?;
        pos.parse_uci(uci).ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
