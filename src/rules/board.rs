use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{
    Bitboard, CastlingMode, Chess, Color, EnPassantMode, Move, Piece, Position, Square,
};

use super::Rules;
use crate::error::RulesError;

/// `shakmaty` position plus the stack of earlier states needed for undo.
#[derive(Clone, Debug, Default)]
pub struct Board {
    pos: Chess,
    history: Vec<Chess>,
}

impl Board {
    pub fn new(pos: Chess) -> Self {
        Board { pos, history: Vec::new() }
    }

    pub fn startpos() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let parsed = fen
            .parse::<Fen>()
            .map_err(|e| RulesError::InvalidFen(e.to_string()))?;
        let pos: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::InvalidFen(e.to_string()))?;
        Ok(Board::new(pos))
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    /// Number of pending undos.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl Rules for Board {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.pos.legal_moves().into_iter().collect()
    }

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        if !self.pos.is_legal(mv) {
            return Err(RulesError::IllegalMove(
                mv.to_uci(CastlingMode::Standard).to_string(),
            ));
        }
        self.history.push(self.pos.clone());
        self.pos.play_unchecked(mv);
        Ok(())
    }

    fn undo(&mut self) -> Result<(), RulesError> {
        self.pos = self.history.pop().ok_or(RulesError::NothingToUndo)?;
        Ok(())
    }

    fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    fn is_insufficient_material(&self) -> bool {
        self.pos.is_insufficient_material()
    }

    fn is_game_over(&self) -> bool {
        self.pos.is_game_over()
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pos.board().piece_at(sq)
    }

    fn king_square(&self, color: Color) -> Option<Square> {
        self.pos.board().king_of(color)
    }

    fn attackers(&self, color: Color, sq: Square) -> Bitboard {
        let board = self.pos.board();
        board.attacks_to(sq, color, board.occupied())
    }

    fn turn(&self) -> Color {
        self.pos.turn()
    }

    fn set_turn(&mut self, color: Color) -> Result<(), RulesError> {
        let next = if color == self.pos.turn() {
            self.pos.clone()
        } else {
            self.pos
                .clone()
                .swap_turn()
                .map_err(|e| RulesError::InvalidTurnToggle(e.to_string()))?
        };
        self.history.push(std::mem::replace(&mut self.pos, next));
        Ok(())
    }

    fn fen(&self) -> String {
        Fen::from_position(self.pos.clone(), EnPassantMode::Legal).to_string()
    }

    fn fullmove_number(&self) -> u32 {
        self.pos.fullmoves().get()
    }

    fn zobrist(&self) -> u64 {
        let z: Zobrist64 = self.pos.zobrist_hash(EnPassantMode::Legal);
        z.0
    }

    fn parse_uci(&self, uci: &str) -> Result<Move, RulesError> {
        let parsed = uci
            .parse::<UciMove>()
            .map_err(|_| RulesError::InvalidUci(uci.to_string()))?;
        let mv = parsed
            .to_move(&self.pos)
            .map_err(|_| RulesError::IllegalMove(uci.to_string()))?;
        Ok(mv)
    }
}
