use shakmaty::{CastlingMode, Color, Move, Position};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing::warn;
use vampirc_uci::uci::{UciSearchControl, UciTimeControl};
use vampirc_uci::{UciMessage, parser};

use crate::engine::eval::evaluate;
use crate::engine::search::{SearchLimits, Searcher, info_line};
use crate::engine::book::OpeningBook;
use crate::rules::{self, Board, Rules};

pub struct UCI {
    pub board: Board,
    searcher: Searcher<Move>,
}

impl UCI {
    pub fn new() -> Self {
        UCI {
            board: Board::startpos(),
            searcher: Searcher::new(),
        }
    }

    pub fn searcher(&self) -> &Searcher<Move> {
        &self.searcher
    }

    pub fn run(&mut self) {
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            match self.handle_line(&line, &mut stdout) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    warn!(%err, "stdout closed");
                    break;
                }
            }
        }
    }

    /// Handle one input line. Returns `false` on `quit`.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(true);
        }

        match parser::parse_one(line) {
            UciMessage::Uci => self.cmd_uci(out)?,
            UciMessage::IsReady => writeln!(out, "readyok")?,
            UciMessage::SetOption { name, value } => {
                self.apply_setoption(name.trim(), value.as_deref());
            }
            UciMessage::UciNewGame => self.cmd_ucinewgame(),
            UciMessage::Position { startpos, fen, moves } => {
                let fen_str = fen.as_ref().map(|f| f.as_str());
                let move_strs: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                let refs: Vec<&str> = move_strs.iter().map(String::as_str).collect();
                self.apply_position(startpos, fen_str, &refs);
            }
            UciMessage::Go { time_control, search_control } => {
                let limits = go_to_limits(time_control.as_ref(), search_control.as_ref());
                self.do_go(&limits, out)?;
            }
            UciMessage::Quit => return Ok(false),
            UciMessage::Unknown(ref s, _) => {
                let parts: Vec<&str> = s.split_whitespace().collect();
                match parts.first().copied() {
                    Some("d" | "display") => self.cmd_display(out)?,
                    Some("eval") => self.cmd_eval(out)?,
                    Some("perft") => self.cmd_perft(&parts, out)?,
                    _ => {}
                }
            }
            _ => {}
        }
        out.flush()?;
        Ok(true)
    }

    fn cmd_uci<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name DuckSearch 0.1.0")?;
        writeln!(out, "id author DuckChess Team")?;
        writeln!(out)?;
        writeln!(out, "option name Hash type spin default 16 min 1 max 4096")?;
        writeln!(out, "option name Threads type spin default 1 min 1 max 1")?;
        writeln!(out, "option name OwnBook type check default true")?;
        writeln!(out, "option name UseTT type check default true")?;
        writeln!(out, "uciok")
    }

    fn apply_setoption(&mut self, name: &str, value: Option<&str>) {
        let opt = name.to_lowercase().replace([' ', '_'], "");
        let value = value.unwrap_or("").trim();
        let flag = value.eq_ignore_ascii_case("true") || value == "1";
        match opt.as_str() {
            "hash" => {
                if let Ok(size) = value.parse::<usize>() {
                    self.searcher.set_hash_size(size.clamp(1, 4096));
                }
            }
            "ownbook" => self.searcher.config_mut().use_book = flag,
            "usett" => self.searcher.config_mut().use_transposition = flag,
            "threads" => {}
            _ => warn!(name, "unknown option"),
        }
    }

    pub fn cmd_ucinewgame(&mut self) {
        self.board = Board::startpos();
        self.searcher.clear();
        self.searcher.set_book(Some(OpeningBook::standard()));
    }

    fn apply_position(&mut self, startpos: bool, fen: Option<&str>, move_strs: &[&str]) {
        if startpos {
            self.board = Board::startpos();
        } else if let Some(fen_str) = fen {
            match Board::from_fen(fen_str) {
                Ok(board) => self.board = board,
                Err(err) => {
                    warn!(%err, "ignoring position");
                    return;
                }
            }
        }

        for &s in move_strs {
            let applied = self
                .board
                .parse_uci(s)
                .and_then(|mv| self.board.apply(&mv));
            if let Err(err) = applied {
                warn!(%err, "stopping at unplayable move");
                break;
            }
        }
        // The driver never undoes game moves.
        self.board = Board::new(self.board.position().clone());
    }

    pub fn parse_move(&self, move_str: &str) -> Option<Move> {
        self.board.parse_uci(move_str).ok()
    }

    /// Run the search and print its iteration lines and `bestmove`.
    fn do_go<W: Write>(&mut self, limits: &SearchLimits, out: &mut W) -> io::Result<()> {
        let result = match self.searcher.search_with_limits(&mut self.board, limits) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "search failed");
                return writeln!(out, "bestmove 0000");
            }
        };

        let hashfull = self.searcher.hashfull();
        for report in &result.iterations {
            writeln!(out, "{}", info_line(report, hashfull, uci_text))?;
        }

        // Aborted before depth 1: fall back to the first legal move.
        let best = result
            .best_move
            .or_else(|| self.board.legal_moves().into_iter().next());
        match best {
            Some(mv) => writeln!(out, "bestmove {}", uci_text(&mv)),
            None => writeln!(out, "bestmove 0000"),
        }
    }

    fn cmd_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n{:?}", self.board.position().board())?;
        writeln!(out, "Fen: {}", self.board.fen())
    }

    fn cmd_eval<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let score = evaluate(&mut self.board);
        writeln!(out, "Evaluation: {} cp", score)?;
        writeln!(
            out,
            "(Positive = {} advantage)",
            if self.board.turn() == Color::White { "White" } else { "Black" }
        )
    }

    fn cmd_perft<W: Write>(&mut self, parts: &[&str], out: &mut W) -> io::Result<()> {
        let depth: u32 = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
        let start = Instant::now();
        let nodes = match rules::perft(&mut self.board, depth) {
            Ok(n) => n,
            Err(err) => {
                warn!(%err, "perft failed");
                return Ok(());
            }
        };
        let elapsed = start.elapsed();
        let nps = if elapsed.as_millis() > 0 { nodes as u128 * 1000 / elapsed.as_millis() } else { 0 };
        writeln!(out, "Nodes: {} ({} ms, {} nps)", nodes, elapsed.as_millis(), nps)
    }
}

fn uci_text(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// Build SearchLimits from vampirc-parsed go command (time_control, search_control).
fn go_to_limits(
    time_control: Option<&UciTimeControl>,
    search_control: Option<&UciSearchControl>,
) -> SearchLimits {
    let mut limits = SearchLimits::default();

    if let Some(sc) = search_control {
        limits.depth = sc.depth.map(u32::from);
    }

    if let Some(tc) = time_control {
        match tc {
            UciTimeControl::Infinite => limits.infinite = true,
            UciTimeControl::MoveTime(d) => limits.movetime = to_std_duration(d),
            UciTimeControl::TimeLeft {
                white_time,
                black_time,
                white_increment,
                black_increment,
                moves_to_go,
            } => {
                limits.wtime = white_time.as_ref().and_then(to_std_duration);
                limits.btime = black_time.as_ref().and_then(to_std_duration);
                limits.winc = white_increment.as_ref().and_then(to_std_duration);
                limits.binc = black_increment.as_ref().and_then(to_std_duration);
                limits.movestogo = moves_to_go.map(u32::from);
            }
            _ => {}
        }
    }

    limits
}

/// Negative clock values become `None`.
fn to_std_duration(d: &chrono::Duration) -> Option<Duration> {
    d.to_std().ok()
}

impl Default for UCI {
    fn default() -> Self {
        Self::new()
    }
}
