//! 中国象棋规则引擎
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 各类棋子的走法生成
//! - 将军、将死与自将检测
//! - FEN 局面导入导出

mod board;
pub mod constants;
mod error;
mod fen;
mod moves;
mod piece;

pub use board::{Board, BoardState};
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use moves::{Move, MoveGenerator};
pub use piece::{Color, Piece, PieceKind, Position};
