//! Negamax with alpha-beta pruning.
//!
//! Scores are always from the side to move at the node. A move that mates
//! immediately scores `MATE_SCORE - (ply + 1)`, where the root is ply 0, so
//! shorter mates are preferred everywhere in the tree.

use crate::engine::eval;
use crate::engine::tt::TTFlag;
use crate::error::RulesError;
use crate::rules::{ChessMove, Rules, UndoGuard};

use super::ordering::{MoveCap, order_and_cap};
use super::searcher::Searcher;
use super::types::{INFINITY, MATE_SCORE, MAX_PLY};

#[inline]
fn mate_score(ply: usize) -> i32 {
    MATE_SCORE - (ply as i32 + 1)
}

fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - MAX_PLY as i32
}

/// Mate scores are stored relative to the node, not the root.
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score + ply as i32
    } else {
        score - ply as i32
    }
}

fn score_from_tt(score: i32, ply: usize) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score - ply as i32
    } else {
        score + ply as i32
    }
}

impl<M: ChessMove> Searcher<M> {
    /// One full-width root pass. Returns no move only when the root has no
    /// legal moves; the score is then the static evaluation.
    pub(super) fn search_root<R: Rules<Move = M>>(
        &mut self,
        pos: &mut R,
        depth: u32,
    ) -> Result<(Option<M>, i32), RulesError> {
        let legals = pos.legal_moves();
        if legals.is_empty() {
            return Ok((None, self.evaluate(pos)));
        }

        let ordered = order_and_cap(&*pos, legals, MoveCap::Root, &self.config);
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best_score = -INFINITY;
        let mut best_move: Option<M> = None;

        for mv in ordered {
            let score = {
                let mut child = UndoGuard::apply(pos, &mv)?;
                if child.is_checkmate() {
                    mate_score(0)
                } else {
                    -self.negamax(&mut *child, depth - 1, -beta, -alpha, 1)?
                }
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv.clone());
                alpha = alpha.max(best_score);
            }
            if alpha >= beta {
                self.record_cutoff(&mv, depth, 0);
                break;
            }
        }

        Ok((best_move, best_score))
    }

    pub(super) fn negamax<R: Rules<Move = M>>(
        &mut self,
        pos: &mut R,
        depth: u32,
        mut alpha: i32,
        beta: i32,
        ply: usize,
    ) -> Result<i32, RulesError> {
        if depth == 0 {
            return Ok(self.quiescence(pos, alpha, beta));
        }
        if pos.is_game_over() {
            return Ok(self.evaluate(pos));
        }

        let alpha_orig = alpha;
        let hash = self.config.use_transposition.then(|| pos.zobrist());
        if let Some(entry) = hash.and_then(|h| self.tt.probe(h)) {
            let (entry_depth, flag) = (entry.depth, entry.flag);
            let score = score_from_tt(entry.score, ply);
            self.stats.tt_hits += 1;
            if entry_depth >= depth {
                match flag {
                    TTFlag::Exact => return Ok(score),
                    TTFlag::LowerBound if score >= beta => return Ok(score),
                    TTFlag::UpperBound if score <= alpha => return Ok(score),
                    _ => {}
                }
            }
        }

        let legals = pos.legal_moves();
        let ordered = order_and_cap(&*pos, legals, MoveCap::Internal { depth }, &self.config);
        let mut best_score = -INFINITY;
        let mut best_move: Option<M> = None;

        for mv in ordered {
            let score = {
                let mut child = UndoGuard::apply(pos, &mv)?;
                if child.is_checkmate() {
                    mate_score(ply)
                } else {
                    -self.negamax(&mut *child, depth - 1, -beta, -alpha, ply + 1)?
                }
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv.clone());
            }
            alpha = alpha.max(best_score);
            if alpha >= beta {
                self.record_cutoff(&mv, depth, ply);
                break;
            }
        }

        if let Some(hash) = hash {
            let flag = if best_score <= alpha_orig {
                TTFlag::UpperBound
            } else if best_score >= beta {
                TTFlag::LowerBound
            } else {
                TTFlag::Exact
            };
            self.tt
                .store(hash, best_move, depth, score_to_tt(best_score, ply), flag);
        }

        Ok(best_score)
    }

    /// Capture-extension hook. No captures are searched yet: this is the
    /// static evaluation.
    pub(super) fn quiescence<R: Rules<Move = M>>(
        &mut self,
        pos: &mut R,
        _alpha: i32,
        _beta: i32,
    ) -> i32 {
        self.evaluate(pos)
    }

    pub(super) fn evaluate<R: Rules<Move = M>>(&mut self, pos: &mut R) -> i32 {
        self.stats.nodes_evaluated += 1;
        eval::evaluate(pos)
    }

    fn record_cutoff(&mut self, mv: &M, depth: u32, ply: usize) {
        self.stats.cutoffs += 1;
        self.killers.add(mv.clone(), ply);
        self.update_history(mv, depth);
    }
}
