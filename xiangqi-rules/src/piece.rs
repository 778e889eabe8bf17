//! 棋子、阵营与棋盘位置

use serde::{Deserialize, Serialize};

use crate::constants::{
    BLACK_PALACE_ROWS, BLACK_RIVER_ROW, BOARD_HEIGHT, BOARD_SQUARES, BOARD_WIDTH, PALACE_COLS,
    RED_PALACE_ROWS, RED_RIVER_ROW,
};

/// 棋子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// 将/帅
    King,
    /// 士/仕
    Advisor,
    /// 象/相
    Elephant,
    /// 马/傌
    Horse,
    /// 车/俥
    Rook,
    /// 炮/砲
    Cannon,
    /// 兵/卒
    Pawn,
}

impl PieceKind {
    /// 全部七种棋子
    pub const ALL: [PieceKind; 7] = [
        PieceKind::King,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Rook,
        PieceKind::Cannon,
        PieceKind::Pawn,
    ];

    /// 获取 FEN 字符（红方大写，黑方小写）
    pub fn to_fen_char(&self, color: Color) -> char {
        let c = match self {
            PieceKind::King => 'k',
            PieceKind::Advisor => 'a',
            PieceKind::Elephant => 'b',
            PieceKind::Horse => 'n',
            PieceKind::Rook => 'r',
            PieceKind::Cannon => 'c',
            PieceKind::Pawn => 'p',
        };
        match color {
            Color::Red => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// 从 FEN 字符解析，同时接受 `e`/`h` 作为象和马的别名
    pub fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::Red
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'a' => PieceKind::Advisor,
            'b' | 'e' => PieceKind::Elephant,
            'n' | 'h' => PieceKind::Horse,
            'r' => PieceKind::Rook,
            'c' => PieceKind::Cannon,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        Some((kind, color))
    }
}

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// 红方（先手，在下方，占 5-9 行）
    Red,
    /// 黑方（后手，在上方，占 0-4 行）
    Black,
}

impl Color {
    /// 获取对方阵营
    pub fn opponent(&self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// 前进方向的行增量
    pub fn forward(&self) -> i8 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Color::Red => 'r',
            Color::Black => 'b',
        }
    }

    /// 从 FEN 字符解析（`w` 视为红方）
    pub fn from_fen_char(c: char) -> Option<Color> {
        match c {
            'r' | 'R' | 'w' | 'W' => Some(Color::Red),
            'b' | 'B' => Some(Color::Black),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// 棋子（不可变，走子和吃子时整体替换）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    /// 创建新棋子
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// 获取棋子显示的汉字
    pub fn display_glyph(&self) -> char {
        match (self.kind, self.color) {
            (PieceKind::King, Color::Red) => '帥',
            (PieceKind::King, Color::Black) => '將',
            (PieceKind::Advisor, Color::Red) => '仕',
            (PieceKind::Advisor, Color::Black) => '士',
            (PieceKind::Elephant, Color::Red) => '相',
            (PieceKind::Elephant, Color::Black) => '象',
            (PieceKind::Horse, Color::Red) => '傌',
            (PieceKind::Horse, Color::Black) => '馬',
            (PieceKind::Rook, Color::Red) => '俥',
            (PieceKind::Rook, Color::Black) => '車',
            (PieceKind::Cannon, Color::Red) => '炮',
            (PieceKind::Cannon, Color::Black) => '砲',
            (PieceKind::Pawn, Color::Red) => '兵',
            (PieceKind::Pawn, Color::Black) => '卒',
        }
    }

    /// 获取 FEN 字符
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Piece> {
        PieceKind::from_fen_char(c).map(|(kind, color)| Piece { kind, color })
    }
}

/// 棋盘位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// 行 (0-9)，0 为黑方底线
    pub row: u8,
    /// 列 (0-8)
    pub col: u8,
}

impl Position {
    /// 创建新位置
    pub fn new(row: u8, col: u8) -> Option<Self> {
        let pos = Self { row, col };
        pos.is_valid().then_some(pos)
    }

    /// 创建新位置（不检查边界，内部使用）
    pub const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// 检查位置是否在棋盘内
    pub fn is_valid(&self) -> bool {
        (self.row as usize) < BOARD_HEIGHT && (self.col as usize) < BOARD_WIDTH
    }

    /// 检查位置是否在指定阵营的九宫格内
    pub fn is_in_palace(&self, color: Color) -> bool {
        let rows = match color {
            Color::Red => RED_PALACE_ROWS,
            Color::Black => BLACK_PALACE_ROWS,
        };
        rows.contains(&self.row) && PALACE_COLS.contains(&self.col)
    }

    /// 检查位置是否在指定阵营的己方半场
    pub fn is_on_own_side(&self, color: Color) -> bool {
        match color {
            Color::Red => self.row >= RED_RIVER_ROW,
            Color::Black => self.row <= BLACK_RIVER_ROW,
        }
    }

    /// 对指定阵营的兵来说，该位置是否已过河
    pub fn has_crossed_river(&self, color: Color) -> bool {
        !self.is_on_own_side(color)
    }

    /// 获取偏移后的位置，越界返回 None
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Position> {
        let row = self.row as i16 + d_row as i16;
        let col = self.col as i16 + d_col as i16;
        if row >= 0 && (row as usize) < BOARD_HEIGHT && col >= 0 && (col as usize) < BOARD_WIDTH {
            Some(Position {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// 转换为数组索引（行优先）
    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_WIDTH + self.col as usize
    }

    /// 从数组索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < BOARD_SQUARES {
            Some(Position {
                row: (index / BOARD_WIDTH) as u8,
                col: (index % BOARD_WIDTH) as u8,
            })
        } else {
            None
        }
    }

    /// 按行优先顺序遍历棋盘上的所有位置
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_HEIGHT as u8)
            .flat_map(|row| (0..BOARD_WIDTH as u8).map(move |col| Position { row, col }))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
