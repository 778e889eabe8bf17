//! 根节点走法排序
//!
//! 只在根节点使用，用于提高剪枝效率，不影响最终选出的分值。

use xiangqi_rules::{Board, Move};

use crate::evaluate::Evaluator;

/// 走法启发分：吃子收益 + 目标位置加成 + 靠近中路加成
pub fn move_score(board: &Board, mv: &Move) -> i32 {
    let capture = board.get(mv.to).map_or(0, |target| {
        Evaluator::material(target.kind) * 10 - Evaluator::material(mv.piece.kind)
    });
    let position = Evaluator::position_bonus(mv.piece, mv.to);
    let centrality = (4 - (mv.to.col as i32 - 4).abs()) * 2;

    capture + position + centrality
}

/// 按启发分从高到低排序（稳定排序，同分保持原顺序）
pub fn order_moves(board: &Board, moves: Vec<Move>) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|mv| (move_score(board, &mv), mv))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}
