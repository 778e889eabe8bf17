//! 中国象棋 AI 引擎
//!
//! 包含:
//! - 棋局评估函数
//! - 根节点走法排序
//! - Minimax + Alpha-Beta 搜索
//! - 难度与搜索深度配置

mod config;
mod evaluate;
mod ordering;
mod search;

pub use config::{AiConfig, Difficulty, ParseDifficultyError, DEFAULT_DEPTH};
pub use evaluate::{Evaluator, CHECK_BONUS};
pub use ordering::{move_score, order_moves};
pub use search::{all_moves, best_move, AiEngine};
