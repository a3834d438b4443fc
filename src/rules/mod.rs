//! Rules engine interface
//!
//! The search core never looks inside a position. Everything it needs
//! (legal moves, make/unmake, terminal detection, piece lookup) goes through
//! the [`Rules`] trait, so any move generator can sit behind it. [`Board`]
//! is the implementation backed by `shakmaty`.

mod board;
mod guard;

pub use board::Board;
pub use guard::UndoGuard;

use shakmaty::{Bitboard, Color, Piece, Role, Square};
use std::fmt::Debug;

use crate::error::RulesError;

/// Move as seen by the search: an opaque value with a few accessors.
pub trait ChessMove: Clone + PartialEq + Debug {
    /// Origin square, `None` for drops.
    fn origin(&self) -> Option<Square>;
    fn destination(&self) -> Square;
    fn promotion_role(&self) -> Option<Role>;
}

impl ChessMove for shakmaty::Move {
    fn origin(&self) -> Option<Square> {
        self.from()
    }

    fn destination(&self) -> Square {
        self.to()
    }

    fn promotion_role(&self) -> Option<Role> {
        self.promotion()
    }
}

/// Position with make/unmake semantics.
///
/// `apply` and `set_turn` both push onto an undo stack; `undo` pops exactly
/// one of them and restores the previous state bit for bit.
pub trait Rules {
    type Move: ChessMove;

    fn legal_moves(&self) -> Vec<Self::Move>;
    fn apply(&mut self, mv: &Self::Move) -> Result<(), RulesError>;
    fn undo(&mut self) -> Result<(), RulesError>;

    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_game_over(&self) -> bool;

    fn piece_at(&self, sq: Square) -> Option<Piece>;
    fn king_square(&self, color: Color) -> Option<Square>;
    /// Squares holding pieces of `color` that attack `sq`.
    fn attackers(&self, color: Color, sq: Square) -> Bitboard;

    fn turn(&self) -> Color;
    /// Switch the side to move. Undone by [`Rules::undo`].
    fn set_turn(&mut self, color: Color) -> Result<(), RulesError>;

    fn fen(&self) -> String;
    fn fullmove_number(&self) -> u32;
    fn zobrist(&self) -> u64;
    fn parse_uci(&self, uci: &str) -> Result<Self::Move, RulesError>;
}

/// Count leaf nodes of the legal move tree, walking it with apply/undo.
pub fn perft<R: Rules>(pos: &mut R, depth: u32) -> Result<u64, RulesError> {
    if depth == 0 {
        return Ok(1);
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }
    let mut nodes = 0;
    for mv in &moves {
        let mut child = UndoGuard::apply(pos, mv)?;
        nodes += perft(&mut *child, depth - 1)?;
    }
    Ok(nodes)
}
