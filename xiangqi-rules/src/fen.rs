//! FEN 格式解析和生成
//!
//! 中国象棋 FEN 格式：
//! `<棋盘> <走子方> [无吃子步数] [回合数]`
//!
//! 棋盘部分从上到下依次是第 0 行（黑方底线）到第 9 行（红方底线）。
//! 末尾的计数字段可以省略，解析时忽略。
//!
//! 示例：
//! `rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r 0 1`

use crate::board::{Board, BoardState};
use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::error::ChessError;
use crate::piece::{Color, Piece, Position};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR r 0 1";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为棋盘状态
    pub fn parse(fen: &str) -> Result<BoardState, ChessError> {
        let mut parts = fen.split_whitespace();
        let board_part = parts.next().ok_or_else(|| ChessError::InvalidFen {
            reason: "Empty FEN string".to_string(),
        })?;

        let board = Self::parse_board(board_part)?;

        // 走子方（默认红方）
        let side_to_move = match parts.next() {
            Some(token) => {
                let mut chars = token.chars();
                match (chars.next().and_then(Color::from_fen_char), chars.next()) {
                    (Some(color), None) => color,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", token),
                        })
                    }
                }
            }
            None => Color::Red,
        };

        Ok(BoardState::from_board(board, side_to_move))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_HEIGHT {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_HEIGHT, rows.len()),
            });
        }

        for (row, text) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in text.chars() {
                if let Some(empty) = c.to_digit(10) {
                    col += empty as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    if col >= BOARD_WIDTH {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Row {} has too many columns", row),
                        });
                    }
                    board.set(Position::new_unchecked(row as u8, col as u8), Some(piece));
                    col += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_WIDTH {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row, col, BOARD_WIDTH),
                });
            }
        }

        Ok(board)
    }

    /// 将棋盘状态转换为 FEN 字符串
    pub fn to_string(state: &BoardState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(&state.board),
            state.side_to_move.to_fen_char()
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_HEIGHT);

        for row in 0..BOARD_HEIGHT as u8 {
            let mut text = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_WIDTH as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        text.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    text.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                text.push_str(&empty_count.to_string());
            }

            rows.push(text);
        }

        rows.join("/")
    }
}
