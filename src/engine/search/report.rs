//! UCI `info` line formatting for completed iterations.

use super::types::{IterationReport, MATE_SCORE, MAX_PLY};

/// `cp <n>` or `mate <moves>`, negative when the side to move is mated.
pub fn format_score(score: i32) -> String {
    if score.abs() >= MATE_SCORE - MAX_PLY as i32 {
        let plies = MATE_SCORE - score.abs();
        let moves = (plies + 1) / 2;
        if score > 0 {
            format!("mate {}", moves)
        } else {
            format!("mate -{}", moves)
        }
    } else {
        format!("cp {}", score)
    }
}

/// One `info` line; `move_text` renders the best move.
pub fn info_line<M>(
    report: &IterationReport<M>,
    hashfull: usize,
    move_text: impl Fn(&M) -> String,
) -> String {
    let elapsed = report.started + report.duration;
    let nps = if elapsed.as_millis() > 0 {
        (report.nodes as u128 * 1000) / elapsed.as_millis()
    } else {
        0
    };
    let pv = report.best_move.as_ref().map(move_text).unwrap_or_default();
    format!(
        "info depth {} score {} nodes {} nps {} time {} hashfull {} pv {}",
        report.depth,
        format_score(report.score),
        report.nodes,
        nps,
        elapsed.as_millis(),
        hashfull,
        pv
    )
}
