//! 对局会话
//!
//! 保存棋盘、走子方、着法记录与对局结果，负责校验玩家走法并执行引擎走法。

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use xiangqi_rules::{Board, BoardState, ChessError, Color, Move, MoveGenerator, Position};

/// 对局结束原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// 将死（含将/帅被吃）
    Checkmate,
    /// 引擎找不到可走的棋
    NoLegalMove,
}

/// 对局结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Color,
    pub reason: EndReason,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self.reason {
            EndReason::Checkmate => "checkmate",
            EndReason::NoLegalMove => "no legal move",
        };
        write!(f, "{} wins by {}", self.winner, reason)
    }
}

/// 对局会话
#[derive(Debug, Clone)]
pub struct GameSession {
    state: BoardState,
    history: Vec<Move>,
    outcome: Option<Outcome>,
}

impl GameSession {
    /// 从初始局面开始新对局
    pub fn new() -> Self {
        Self::from_state(BoardState::initial())
    }

    /// 从指定局面开始对局
    ///
    /// 若走子方已被将死，对局直接结束。
    pub fn from_state(state: BoardState) -> Self {
        let mut session = Self {
            state,
            history: Vec::new(),
            outcome: None,
        };
        session.check_checkmate();
        session
    }

    /// 重置为初始局面
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("session reset");
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    /// 已走着法
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// 走子方棋子的可走位置（已排除自将）
    pub fn destinations(&self, pos: Position) -> Vec<Position> {
        match self.state.board.get(pos) {
            Some(piece) if piece.color == self.state.side_to_move && !self.is_over() => {
                MoveGenerator::safe_destinations(&self.state.board, pos)
            }
            _ => Vec::new(),
        }
    }

    /// 玩家走子
    pub fn play(&mut self, from: Position, to: Position) -> Result<Move, ChessError> {
        let mv = self.validate(from, to)?;
        if MoveGenerator::would_leave_self_in_check(&self.state.board, &mv) {
            return Err(ChessError::KingInCheck);
        }

        self.commit(mv);
        Ok(mv)
    }

    /// 执行搜索引擎给出的走法
    ///
    /// 引擎走法只校验是否符合棋子走法，不做自将过滤。
    /// `None` 表示引擎无棋可走，判走子方的对手获胜。
    pub fn apply_engine_move(&mut self, mv: Option<Move>) -> Result<Option<Move>, ChessError> {
        let Some(mv) = mv else {
            if self.is_over() {
                return Err(ChessError::GameOver);
            }
            let outcome = Outcome {
                winner: self.state.side_to_move.opponent(),
                reason: EndReason::NoLegalMove,
            };
            warn!(side = %self.state.side_to_move, "engine returned no move");
            info!(%outcome, "game over");
            self.outcome = Some(outcome);
            return Ok(None);
        };

        let mv = self.validate(mv.from, mv.to)?;
        self.commit(mv);
        Ok(Some(mv))
    }

    fn validate(&self, from: Position, to: Position) -> Result<Move, ChessError> {
        if self.is_over() {
            return Err(ChessError::GameOver);
        }
        for pos in [from, to] {
            if !pos.is_valid() {
                return Err(ChessError::InvalidPosition {
                    row: pos.row.into(),
                    col: pos.col.into(),
                });
            }
        }

        let piece = self.state.board.get(from).ok_or(ChessError::NoPiece {
            row: from.row,
            col: from.col,
        })?;
        if piece.color != self.state.side_to_move {
            return Err(ChessError::NotYourTurn);
        }
        if !MoveGenerator::legal_destinations(&self.state.board, from).contains(&to) {
            return Err(ChessError::InvalidMove {
                from_row: from.row,
                from_col: from.col,
                to_row: to.row,
                to_col: to.col,
            });
        }

        Ok(Move::new(from, to, piece))
    }

    fn commit(&mut self, mv: Move) {
        let captured = self.state.board.move_piece(mv.from, mv.to);
        self.history.push(mv);
        self.state.switch_turn();
        debug!(%mv, captured = captured.is_some(), ply = self.history.len(), "move applied");

        self.check_checkmate();
    }

    fn check_checkmate(&mut self) {
        let side = self.state.side_to_move;
        if MoveGenerator::is_checkmate(&self.state.board, side) {
            let outcome = Outcome {
                winner: side.opponent(),
                reason: EndReason::Checkmate,
            };
            info!(%outcome, "game over");
            self.outcome = Some(outcome);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
