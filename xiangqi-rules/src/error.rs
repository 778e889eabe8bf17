//! 错误类型定义
//!
//! 规则查询本身都是全函数，不会返回错误；这里的错误只在
//! 解析外部输入（FEN）或宿主程序执行走法时使用。

use thiserror::Error;

/// 象棋规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 无效的位置
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: i16, col: i16 },

    /// 无效的走法
    #[error("Invalid move: from ({from_row}, {from_col}) to ({to_row}, {to_col})")]
    InvalidMove {
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    },

    /// 没有棋子
    #[error("No piece at position ({row}, {col})")]
    NoPiece { row: u8, col: u8 },

    /// 不是你的回合
    #[error("Not your turn")]
    NotYourTurn,

    /// 走法会导致被将军
    #[error("Move would leave king in check")]
    KingInCheck,

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,
}

/// 规则操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
