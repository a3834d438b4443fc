//! Static evaluation
//!
//! The default score is material plus a one-point-per-move mobility term.
//! King safety, pawn structure and piece coordination are available as
//! separate terms but are not part of [`evaluate`].
//!
//! Every term is computed White-positive; only [`evaluate`] converts to the
//! side to move.

use shakmaty::{Color, Piece, Role, Square};

use crate::engine::search::MATE_SCORE;
use crate::rules::{Rules, UndoGuard};

const CENTER: [Square; 4] = [Square::D4, Square::E4, Square::D5, Square::E5];

const KING_WING_BONUS: i32 = 50;
const PAWN_SHIELD_BONUS: i32 = 10;
const DOUBLED_PAWN_PENALTY: i32 = 15;
const ISOLATED_PAWN_PENALTY: i32 = 20;
const PASSED_PAWN_STEP: i32 = 20;
const CENTER_CONTROL_WEIGHT: i32 = 2;

pub fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 100,
        Role::Knight => 320,
        Role::Bishop => 330,
        Role::Rook => 500,
        Role::Queen => 900,
        Role::King => 20000,
    }
}

#[inline]
fn sign(color: Color) -> i32 {
    if color == Color::White { 1 } else { -1 }
}

#[inline]
fn file_of(sq: Square) -> i32 {
    sq.file() as i32
}

#[inline]
fn rank_of(sq: Square) -> i32 {
    sq.rank() as i32
}

fn squares() -> impl Iterator<Item = Square> {
    (0..64u32).map(Square::new)
}

fn pieces<R: Rules>(pos: &R) -> impl Iterator<Item = (Square, Piece)> + '_ {
    squares().filter_map(move |sq| pos.piece_at(sq).map(|p| (sq, p)))
}

fn pawn_squares<R: Rules>(pos: &R, color: Color) -> Vec<Square> {
    pieces(pos)
        .filter(|(_, p)| p.role == Role::Pawn && p.color == color)
        .map(|(sq, _)| sq)
        .collect()
}

/// Score from the perspective of the side to move.
///
/// Takes the position mutably because counting the opponent's mobility
/// switches the side to move for a moment; the switch is undone before
/// returning. When the side to move is in check the switch is refused and
/// the opponent's mobility counts as zero.
pub fn evaluate<R: Rules>(pos: &mut R) -> i32 {
    if pos.is_checkmate() {
        return -MATE_SCORE;
    }
    if pos.is_stalemate() || pos.is_insufficient_material() {
        return 0;
    }
    let score = white_score(pos);
    if pos.turn() == Color::White { score } else { -score }
}

/// [`evaluate`] in White's frame.
pub fn evaluate_absolute<R: Rules>(pos: &mut R) -> i32 {
    let score = evaluate(pos);
    if pos.turn() == Color::White { score } else { -score }
}

fn white_score<R: Rules>(pos: &mut R) -> i32 {
    material(pos) + mobility(pos)
}

pub fn material<R: Rules>(pos: &R) -> i32 {
    pieces(pos)
        .map(|(_, p)| sign(p.color) * piece_value(p.role))
        .sum()
}

/// `legal(White) - legal(Black)`.
///
/// When the side to move is in check the flipped position is illegal and
/// the rules engine refuses the switch; the other side then counts zero.
pub fn mobility<R: Rules>(pos: &mut R) -> i32 {
    let mover = pos.turn();
    let mover_moves = pos.legal_moves().len() as i32;
    let other_moves = match UndoGuard::set_turn(pos, !mover) {
        Ok(flipped) => flipped.legal_moves().len() as i32,
        Err(_) => 0,
    };
    sign(mover) * (mover_moves - other_moves)
}

pub fn king_safety<R: Rules>(pos: &R) -> i32 {
    [Color::White, Color::Black]
        .into_iter()
        .map(|color| sign(color) * king_safety_for(pos, color))
        .sum()
}

fn king_safety_for<R: Rules>(pos: &R, color: Color) -> i32 {
    let Some(king) = pos.king_square(color) else {
        return 0;
    };
    let wing = match file_of(king) {
        0..=2 | 5..=7 => KING_WING_BONUS,
        _ => 0,
    };
    let shield = pawn_squares(pos, color)
        .into_iter()
        .filter(|&sq| {
            (rank_of(sq) - rank_of(king)).abs() <= 1 && (file_of(sq) - file_of(king)).abs() <= 1
        })
        .count() as i32;
    wing + shield * PAWN_SHIELD_BONUS
}

pub fn pawn_structure<R: Rules>(pos: &R) -> i32 {
    [Color::White, Color::Black]
        .into_iter()
        .map(|color| sign(color) * pawn_structure_for(pos, color))
        .sum()
}

fn pawn_structure_for<R: Rules>(pos: &R, color: Color) -> i32 {
    let own = pawn_squares(pos, color);
    let enemy = pawn_squares(pos, !color);

    let mut per_file = [0i32; 8];
    for &sq in &own {
        per_file[file_of(sq) as usize] += 1;
    }

    let doubled: i32 = per_file.iter().map(|&n| (n - 1).max(0)).sum();
    let mut score = -doubled * DOUBLED_PAWN_PENALTY;

    for &sq in &own {
        let file = file_of(sq);
        let rank = rank_of(sq);

        let has_neighbour = [file - 1, file + 1]
            .into_iter()
            .any(|f| (0..8).contains(&f) && per_file[f as usize] > 0);
        if !has_neighbour {
            score -= ISOLATED_PAWN_PENALTY;
        }

        let blocked = enemy.iter().any(|&e| {
            (file_of(e) - file).abs() <= 1
                && match color {
                    Color::White => rank_of(e) > rank,
                    Color::Black => rank_of(e) < rank,
                }
        });
        if !blocked {
            score += match color {
                Color::White => (7 - rank) * PASSED_PAWN_STEP,
                Color::Black => rank * PASSED_PAWN_STEP,
            };
        }
    }
    score
}

/// Knights, bishops, rooks and queens standing on a centre square earn a
/// bonus per own piece defending that square.
pub fn piece_coordination<R: Rules>(pos: &R) -> i32 {
    CENTER
        .iter()
        .filter_map(|&sq| pos.piece_at(sq).map(|p| (sq, p)))
        .filter(|(_, p)| !matches!(p.role, Role::Pawn | Role::King))
        .map(|(sq, p)| {
            let defenders = pos.attackers(p.color, sq).count() as i32;
            sign(p.color) * CENTER_CONTROL_WEIGHT * defenders
        })
        .sum()
}
