//! Evaluation Tests

use duck_search::engine::eval::{
    evaluate, evaluate_absolute, king_safety, material, mobility, pawn_structure,
    piece_coordination,
};
use duck_search::engine::search::MATE_SCORE;
use duck_search::rules::Board;

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

/// Flip the board vertically and swap colours and side to move.
fn mirror_fen(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let placement = fields[0]
        .split('/')
        .rev()
        .map(|rank| {
            rank.chars()
                .map(|c| {
                    if c.is_ascii_uppercase() {
                        c.to_ascii_lowercase()
                    } else {
                        c.to_ascii_uppercase()
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("/");
    let turn = if fields[1] == "w" { "b" } else { "w" };
    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let mut rights: Vec<char> = fields[2]
            .chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect();
        rights.sort_by_key(|c| (c.is_ascii_lowercase(), *c != 'K' && *c != 'k'));
        rights.into_iter().collect()
    };
    let ep = match fields[3] {
        "-" => "-".to_string(),
        sq => {
            let (file, rank) = sq.split_at(1);
            let mirrored = if rank == "3" { "6" } else { "3" };
            format!("{file}{mirrored}")
        }
    };
    format!("{placement} {turn} {castling} {ep} {} {}", fields[4], fields[5])
}

// ============================================================================
// Terminal positions
// ============================================================================

#[test]
fn test_stalemate_scores_zero() {
    let mut pos = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert_eq!(evaluate(&mut pos), 0);
}

#[test]
fn test_checkmate_scores_minus_mate() {
    let mut pos = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(evaluate(&mut pos), -MATE_SCORE);
}

#[test]
fn test_insufficient_material_scores_zero() {
    let mut pos = board("4k3/8/8/8/8/8/8/4KB2 w - - 0 1");
    assert_eq!(evaluate(&mut pos), 0);
}

// ============================================================================
// Default evaluation
// ============================================================================

#[test]
fn test_startpos_is_level() {
    let mut pos = Board::startpos();
    // Twenty moves each and equal material.
    assert_eq!(evaluate(&mut pos), 0);
}

#[test]
fn test_material_and_mobility_from_mover() {
    let mut pos = board("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    assert_eq!(material(&pos), 900);
    let white = evaluate(&mut pos);
    assert!(white > 800);

    let mut flipped = board("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert!(evaluate(&mut flipped) < -800);
}

#[test]
fn test_evaluate_is_material_plus_mobility() {
    let mut pos = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    let expected = material(&pos) + mobility(&mut pos);
    assert_eq!(evaluate(&mut pos), expected);
    assert_eq!(pos.history_len(), 0);
}

#[test]
fn test_evaluation_is_antisymmetric() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
        "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "4k3/8/8/8/8/8/8/r3K3 w - - 0 1",
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
    ];
    for fen in fens {
        let mut pos = board(fen);
        let mut mirrored = board(&mirror_fen(fen));
        assert_eq!(
            evaluate_absolute(&mut pos),
            -evaluate_absolute(&mut mirrored),
            "{fen}"
        );
    }
}

// ============================================================================
// Optional terms
// ============================================================================

#[test]
fn test_king_safety() {
    // White: wing king (50) behind three pawns (30). Black: wing king only.
    let pos = board("6k1/8/8/8/8/8/5PPP/6K1 w - - 0 1");
    assert_eq!(king_safety(&pos), 30);

    let centred = board("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(king_safety(&centred), 0);
}

#[test]
fn test_pawn_structure_lone_pawn() {
    // Isolated (-20) and unopposed: (7 - 1) * 20.
    let pos = board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
    assert_eq!(pawn_structure(&pos), 100);
}

#[test]
fn test_pawn_structure_doubled() {
    // Two isolated pawns on the e-file, one extra: -15 - 40 + 120 + 100.
    let pos = board("4k3/8/8/8/8/4P3/4P3/4K3 w - - 0 1");
    assert_eq!(pawn_structure(&pos), 165);
}

#[test]
fn test_piece_coordination() {
    // Knight on d4 covered by the rook on d2.
    let pos = board("4k3/8/8/8/3N4/8/3R4/4K3 w - - 0 1");
    assert_eq!(piece_coordination(&pos), 2);

    let mirrored = board(&mirror_fen("4k3/8/8/8/3N4/8/3R4/4K3 w - - 0 1"));
    assert_eq!(piece_coordination(&mirrored), -2);
}
