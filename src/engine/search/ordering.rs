//! Move ordering: capture/promotion ranking, move caps, killer moves and
//! the history heuristic.
//!
//! Killers and history are recorded on every beta cutoff but the ranking
//! below does not read them.

use std::cmp::Reverse;

use shakmaty::Square;

use super::types::{MAX_PLY, SearchConfig};
use crate::engine::eval::piece_value;
use crate::rules::{ChessMove, Rules};

const PROMOTION_BONUS: i32 = 1000;

pub(super) struct KillerMoves<M> {
    pub(super) moves: Vec<[Option<M>; 2]>,
}

impl<M: ChessMove> KillerMoves<M> {
    pub(super) fn new() -> Self {
        KillerMoves {
            moves: vec![[None, None]; MAX_PLY],
        }
    }

    pub(super) fn add(&mut self, mv: M, ply: usize) {
        if ply < MAX_PLY && self.moves[ply][0].as_ref() != Some(&mv) {
            self.moves[ply][1] = self.moves[ply][0].take();
            self.moves[ply][0] = Some(mv);
        }
    }

    pub(super) fn is_killer(&self, mv: &M, ply: usize) -> bool {
        ply < MAX_PLY
            && (self.moves[ply][0].as_ref() == Some(mv) || self.moves[ply][1].as_ref() == Some(mv))
    }
}

/// Cutoff weights by (from, to). Unset pairs read as zero.
pub(super) struct HistoryTable {
    table: [[u32; 64]; 64],
}

impl HistoryTable {
    pub(super) fn new() -> Self {
        HistoryTable {
            table: [[0; 64]; 64],
        }
    }

    fn key<M: ChessMove>(mv: &M) -> (usize, usize) {
        let to = mv.destination();
        let from = mv.origin().unwrap_or(to);
        (from as usize, to as usize)
    }

    pub(super) fn add<M: ChessMove>(&mut self, mv: &M, depth: u32) {
        let (from, to) = Self::key(mv);
        let weight = depth.saturating_mul(depth);
        self.table[from][to] = self.table[from][to].saturating_add(weight);
    }

    pub(super) fn get(&self, from: Square, to: Square) -> u32 {
        self.table[from as usize][to as usize]
    }

    pub(super) fn clear(&mut self) {
        self.table = [[0; 64]; 64];
    }
}

/// Where in the tree a move list is being cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveCap {
    Root,
    Internal { depth: u32 },
}

impl MoveCap {
    pub fn limit(self, config: &SearchConfig) -> usize {
        match self {
            MoveCap::Root => config.root_move_cap,
            MoveCap::Internal { depth } if depth > config.deep_threshold => config.deep_move_cap,
            MoveCap::Internal { .. } => config.shallow_move_cap,
        }
    }
}

/// Value of the enemy piece on the destination square plus the promotion
/// bonus. Own pieces on the destination (castling is king-takes-rook) do not
/// count.
pub fn move_score<R: Rules>(pos: &R, mv: &R::Move) -> i32 {
    let us = pos.turn();
    let captured = pos
        .piece_at(mv.destination())
        .filter(|p| p.color != us)
        .map(|p| piece_value(p.role))
        .unwrap_or(0);
    let promotion = if mv.promotion_role().is_some() {
        PROMOTION_BONUS
    } else {
        0
    };
    captured + promotion
}

/// Highest score first; equal scores keep generation order.
pub fn order_moves<R: Rules>(pos: &R, moves: Vec<R::Move>) -> Vec<R::Move> {
    let mut scored: Vec<(R::Move, i32)> = moves
        .into_iter()
        .map(|mv| {
            let score = move_score(pos, &mv);
            (mv, score)
        })
        .collect();
    scored.sort_by_key(|(_, score)| Reverse(*score));
    scored.into_iter().map(|(mv, _)| mv).collect()
}

/// Order and keep only as many moves as `cap` allows.
pub fn order_and_cap<R: Rules>(
    pos: &R,
    moves: Vec<R::Move>,
    cap: MoveCap,
    config: &SearchConfig,
) -> Vec<R::Move> {
    let mut ordered = order_moves(pos, moves);
    ordered.truncate(cap.limit(config));
    ordered
}
