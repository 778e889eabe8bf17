//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝，走法排序只在根节点进行。

use std::time::Instant;

use tracing::{debug, info};
use xiangqi_rules::{Board, Color, Move, MoveGenerator};

use crate::config::{AiConfig, Difficulty};
use crate::evaluate::Evaluator;
use crate::ordering::order_moves;

/// 生成指定阵营的所有走法（按棋盘行优先顺序）
pub fn all_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for (from, piece) in board.pieces(color) {
        for to in MoveGenerator::legal_destinations(board, from) {
            moves.push(Move::new(from, to, piece));
        }
    }
    moves
}

/// 以指定深度为 `color` 搜索最佳走法
pub fn best_move(board: &Board, color: Color, depth: u8) -> Option<Move> {
    AiEngine::new(AiConfig::default().with_depth(depth)).search(board, color)
}

/// AI 引擎
///
/// 每次搜索都从传入的棋盘重新计算，调用之间只保留上一次的统计数据。
#[derive(Debug, Clone)]
pub struct AiEngine {
    config: AiConfig,
    nodes_searched: u64,
    last_score: Option<i32>,
}

impl AiEngine {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        Self {
            config,
            nodes_searched: 0,
            last_score: None,
        }
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }

    /// 当前配置
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 搜索最佳走法，无子可动时返回 None
    pub fn search(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.nodes_searched = 0;
        self.last_score = None;

        let depth = self.config.depth.max(1);
        let started = Instant::now();

        let moves = all_moves(board, color);
        if moves.is_empty() {
            debug!(%color, "no moves available");
            return None;
        }

        let candidates = order_moves(board, moves);
        debug!(%color, depth, candidates = candidates.len(), "search started");

        let mut best: Option<(Move, i32)> = None;
        let mut alpha = i32::MIN;

        for mv in candidates {
            let next = board.with_move(&mv);
            let score = self.minimax(&next, depth - 1, alpha, i32::MAX, false, color);

            // 严格大于：同分保留先出现的走法
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
            alpha = alpha.max(score);
        }

        let (mv, score) = best?;
        self.last_score = Some(score);
        info!(
            %color,
            %mv,
            score,
            nodes = self.nodes_searched,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "best move found"
        );
        Some(mv)
    }

    /// Minimax + Alpha-Beta 剪枝，返回 `root_color` 视角的分值
    ///
    /// `maximizing` 为 true 时轮到 `root_color` 走，否则轮到对方。
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        root_color: Color,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0
            || MoveGenerator::is_checkmate(board, root_color)
            || MoveGenerator::is_checkmate(board, root_color.opponent())
        {
            return Evaluator::evaluate(board, root_color);
        }

        let to_move = if maximizing {
            root_color
        } else {
            root_color.opponent()
        };

        // 无子可动同样视为终局，不区分困毙
        let moves = all_moves(board, to_move);
        if moves.is_empty() {
            return Evaluator::evaluate(board, root_color);
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                let score =
                    self.minimax(&board.with_move(&mv), depth - 1, alpha, beta, false, root_color);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let score =
                    self.minimax(&board.with_move(&mv), depth - 1, alpha, beta, true, root_color);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }

    /// 获取上一次搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// 获取上一次搜索选中走法的分值
    pub fn last_score(&self) -> Option<i32> {
        self.last_score
    }
}

impl Default for AiEngine {
    fn default() -> Self {
        Self::new(AiConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiangqi_rules::{Fen, Piece, PieceKind, Position};

    fn pos(row: u8, col: u8) -> Position {
        Position::new_unchecked(row, col)
    }

    #[test]
    fn test_all_moves_initial() {
        let board = Board::initial();
        let moves = all_moves(&board, Color::Black);
        assert_eq!(moves.len(), 44);
        assert!(moves.iter().all(|mv| mv.piece.color == Color::Black));
        assert!(moves.iter().all(|mv| board.get(mv.from) == Some(mv.piece)));

        // 行优先扫描：第一个走法来自 (0,0) 的车
        assert_eq!(moves[0].from, pos(0, 0));
        assert!(moves.windows(2).all(|w| w[0].from <= w[1].from));
    }

    #[test]
    fn test_minimax_depth_zero_is_static_evaluation() {
        let boards = [
            Board::initial(),
            Fen::parse("3k5/9/9/9/9/9/9/9/9/3RK4 r").unwrap().board,
        ];
        let mut engine = AiEngine::default();

        for board in boards {
            for color in [Color::Red, Color::Black] {
                let expected = Evaluator::evaluate(&board, color);
                for maximizing in [true, false] {
                    let score = engine.minimax(&board, 0, i32::MIN, i32::MAX, maximizing, color);
                    assert_eq!(score, expected);
                }
            }
        }
    }

    #[test]
    fn test_minimax_terminal_on_checkmate() {
        // 黑方已被将死，任何深度都直接返回静态评估
        let board = Fen::parse("9/4k4/9/9/9/3RRR3/9/9/9/4K4 b").unwrap().board;
        assert!(MoveGenerator::is_checkmate(&board, Color::Black));

        let mut engine = AiEngine::default();
        let score = engine.minimax(&board, 3, i32::MIN, i32::MAX, true, Color::Black);
        assert_eq!(score, Evaluator::evaluate(&board, Color::Black));
        assert_eq!(engine.nodes_searched(), 1);
    }

    #[test]
    fn test_no_moves_returns_none() {
        // 黑方没有任何棋子
        let mut board = Board::empty();
        board.set(pos(9, 3), Some(Piece::new(PieceKind::King, Color::Red)));
        assert!(best_move(&board, Color::Black, 3).is_none());
    }

    #[test]
    fn test_single_move_is_returned() {
        // 黑方唯一的走法是卒前进一步
        let mut board = Board::empty();
        board.set(pos(9, 3), Some(Piece::new(PieceKind::King, Color::Red)));
        board.set(pos(3, 0), Some(Piece::new(PieceKind::Pawn, Color::Black)));

        let mv = best_move(&board, Color::Black, 2).unwrap();
        assert_eq!(mv.from, pos(3, 0));
        assert_eq!(mv.to, pos(4, 0));
    }

    #[test]
    fn test_takes_hanging_rook() {
        // 黑车可以白吃红车
        let state = Fen::parse("3k5/9/9/9/r3R4/9/9/9/9/5K3 b").unwrap();
        let mv = best_move(&state.board, Color::Black, 2).unwrap();
        assert_eq!(mv.from, pos(4, 0));
        assert_eq!(mv.to, pos(4, 4));
    }

    #[test]
    fn test_finds_mate_in_one() {
        // 红车沉底将死：黑卒堵住将门，且卒不能横走垫将
        let state = Fen::parse("4k4/4p4/9/9/9/9/9/9/9/R2K5 r").unwrap();
        let mut engine = AiEngine::from_difficulty(Difficulty::Easy);
        let mv = engine.search(&state.board, Color::Red).unwrap();

        let after = state.board.with_move(&mv);
        assert!(MoveGenerator::is_checkmate(&after, Color::Black), "应找到杀着: {}", mv);
        assert!(engine.nodes_searched() > 0);
        assert!(engine.last_score().is_some());
    }

    #[test]
    fn test_depth_zero_treated_as_one() {
        let board = Board::initial();
        assert_eq!(
            best_move(&board, Color::Red, 0),
            best_move(&board, Color::Red, 1)
        );
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = Board::initial();
        let first = best_move(&board, Color::Red, 2);
        let second = best_move(&board, Color::Red, 2);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
