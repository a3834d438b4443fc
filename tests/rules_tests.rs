//! Rules Adapter Tests
//!
//! Make/unmake, side-to-move switching and perft through the `Rules` trait.

use duck_search::rules::{perft, Board, Rules, UndoGuard};
use duck_search::RulesError;
use shakmaty::{Color, Role, Square};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

// ============================================================================
// Perft
// ============================================================================

#[test]
fn test_perft_startpos_depth_1() {
    assert_eq!(perft(&mut Board::startpos(), 1).unwrap(), 20);
}

#[test]
fn test_perft_startpos_depth_2() {
    assert_eq!(perft(&mut Board::startpos(), 2).unwrap(), 400);
}

#[test]
fn test_perft_startpos_depth_3() {
    let mut board = Board::startpos();
    assert_eq!(perft(&mut board, 3).unwrap(), 8902);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_perft_kiwipete_depth_2() {
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut board, 2).unwrap(), 2039);
    assert_eq!(board.fen(), KIWIPETE);
}

// ============================================================================
// FEN
// ============================================================================

#[test]
fn test_fen_round_trips() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        KIWIPETE,
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1",
        "8/8/8/8/8/8/8/K6k b - - 12 57",
    ];
    for fen in fens {
        assert_eq!(board_fen(fen), fen);
    }
    assert_eq!(Board::startpos().fen(), fens[0]);
}

fn board_fen(fen: &str) -> String {
    Board::from_fen(fen).unwrap().fen()
}

// ============================================================================
// Make / unmake
// ============================================================================

#[test]
fn test_apply_undo_restores_fen() {
    let mut board = Board::startpos();
    let before = board.fen();
    let mv = board.parse_uci("e2e4").unwrap();
    board.apply(&mv).unwrap();
    assert_eq!(
        board.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
    board.undo().unwrap();
    assert_eq!(board.fen(), before);
}

#[test]
fn test_undo_on_empty_stack() {
    let mut board = Board::startpos();
    assert_eq!(board.undo(), Err(RulesError::NothingToUndo));
}

#[test]
fn test_illegal_move_is_rejected() {
    let mut board = Board::startpos();
    let mv = board.parse_uci("e2e4").unwrap();
    board.apply(&mv).unwrap();
    // White's move again, now with Black to move.
    assert!(matches!(board.apply(&mv), Err(RulesError::IllegalMove(_))));
    assert_eq!(board.history_len(), 1);
}

#[test]
fn test_parse_uci_errors() {
    let board = Board::startpos();
    assert!(matches!(board.parse_uci("zz"), Err(RulesError::InvalidUci(_))));
    assert!(matches!(board.parse_uci("e2e5"), Err(RulesError::IllegalMove(_))));
}

#[test]
fn test_invalid_fen() {
    assert!(matches!(Board::from_fen("not a fen"), Err(RulesError::InvalidFen(_))));
}

#[test]
fn test_guard_undoes_on_drop() {
    let mut board = Board::startpos();
    let mv = board.parse_uci("g1f3").unwrap();
    {
        let child = UndoGuard::apply(&mut board, &mv).unwrap();
        assert_eq!(child.turn(), Color::Black);
    }
    assert_eq!(board.turn(), Color::White);
    assert_eq!(board.history_len(), 0);
}

#[test]
fn test_guard_undoes_on_early_return() {
    fn fails_inside(board: &mut Board) -> Result<(), RulesError> {
        let mv = board.parse_uci("e2e4").unwrap();
        let mut child = UndoGuard::apply(board, &mv)?;
        child.undo()?;
        child.undo()?;
        Ok(())
    }

    let mut board = Board::startpos();
    let before = board.fen();
    assert_eq!(fails_inside(&mut board), Err(RulesError::NothingToUndo));
    assert_eq!(board.fen(), before);
}

// ============================================================================
// Side to move
// ============================================================================

#[test]
fn test_set_turn_is_undoable_and_restores_en_passant() {
    let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
    let mut board = Board::from_fen(fen).unwrap();
    board.set_turn(Color::Black).unwrap();
    assert_eq!(board.turn(), Color::Black);
    board.undo().unwrap();
    assert_eq!(board.fen(), fen);
}

#[test]
fn test_set_turn_refused_when_in_check() {
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
    assert!(matches!(
        board.set_turn(Color::Black),
        Err(RulesError::InvalidTurnToggle(_))
    ));
    assert_eq!(board.history_len(), 0);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_queries() {
    let board = Board::startpos();
    assert_eq!(board.king_square(Color::White), Some(Square::E1));
    assert_eq!(board.king_square(Color::Black), Some(Square::E8));
    let piece = board.piece_at(Square::D8).unwrap();
    assert_eq!(piece.role, Role::Queen);
    assert_eq!(piece.color, Color::Black);
    assert!(board.piece_at(Square::E4).is_none());
    // f3 is covered by the g1 knight and the e2 and g2 pawns.
    assert_eq!(board.attackers(Color::White, Square::F3).count(), 3);
    assert_eq!(board.fullmove_number(), 1);
}

#[test]
fn test_terminal_predicates() {
    let mate = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert!(mate.is_checkmate());
    assert!(mate.is_game_over());

    let stalemate = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(stalemate.is_stalemate());
    assert!(!stalemate.is_checkmate());

    let bare = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(bare.is_insufficient_material());
}

#[test]
fn test_zobrist_follows_position() {
    let mut board = Board::startpos();
    let start = board.zobrist();
    let mv = board.parse_uci("e2e4").unwrap();
    board.apply(&mv).unwrap();
    assert_ne!(board.zobrist(), start);
    board.undo().unwrap();
    assert_eq!(board.zobrist(), start);
}
