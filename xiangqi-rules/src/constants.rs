//! 棋盘常量定义

/// 棋盘宽度（列数）
pub const BOARD_WIDTH: usize = 9;

/// 棋盘高度（行数）
pub const BOARD_HEIGHT: usize = 10;

/// 棋盘格子总数
pub const BOARD_SQUARES: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// 黑方半场的最后一行（黑方占 0-4 行，红方占 5-9 行）
pub const BLACK_RIVER_ROW: u8 = 4;

/// 红方半场的第一行
pub const RED_RIVER_ROW: u8 = 5;

/// 九宫格列范围
pub const PALACE_COLS: std::ops::RangeInclusive<u8> = 3..=5;

/// 黑方九宫格行范围
pub const BLACK_PALACE_ROWS: std::ops::RangeInclusive<u8> = 0..=2;

/// 红方九宫格行范围
pub const RED_PALACE_ROWS: std::ops::RangeInclusive<u8> = 7..=9;
