//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::moves::Move;
use crate::piece::{Color, Piece, PieceKind, Position};

/// 棋盘
///
/// 10 行 9 列，第 0 行是黑方底线，第 9 行是红方底线。
/// 棋盘是值类型，模拟走法时总是复制出一个新的棋盘。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; BOARD_WIDTH] = [
            PieceKind::Rook,
            PieceKind::Horse,
            PieceKind::Elephant,
            PieceKind::Advisor,
            PieceKind::King,
            PieceKind::Advisor,
            PieceKind::Elephant,
            PieceKind::Horse,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();

        // 黑方（上方）：底线、炮、卒
        // 红方（下方）：兵、炮、底线
        for (color, back, cannon, pawn) in [(Color::Black, 0, 2, 3), (Color::Red, 9, 7, 6)] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.place(back, col as u8, *kind, color);
            }
            board.place(cannon, 1, PieceKind::Cannon, color);
            board.place(cannon, 7, PieceKind::Cannon, color);
            for col in (0..BOARD_WIDTH as u8).step_by(2) {
                board.place(pawn, col, PieceKind::Pawn, color);
            }
        }

        board
    }

    fn place(&mut self, row: u8, col: u8, kind: PieceKind, color: Color) {
        self.set(Position::new_unchecked(row, col), Some(Piece::new(kind, color)));
    }

    /// 获取指定位置的棋子，越界返回 None
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.row as usize][pos.col as usize]
        } else {
            None
        }
    }

    /// 设置指定位置的棋子，越界时忽略
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.row as usize][pos.col as usize] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回被吃掉的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 返回执行走法后的新棋盘，原棋盘不变
    pub fn with_move(&self, mv: &Move) -> Board {
        let mut next = *self;
        next.move_piece(mv.from, mv.to);
        next
    }

    /// 查找指定阵营的将/帅位置
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.all_pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    /// 按行优先顺序获取指定阵营的所有棋子
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.all_pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// 按行优先顺序获取所有棋子
    pub fn all_pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_WIDTH {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_HEIGHT as u8 {
            write!(f, "{} ", row)?;
            for col in 0..BOARD_WIDTH as u8 {
                match self.get(Position::new_unchecked(row, col)) {
                    Some(piece) => write!(f, "{}", piece.display_glyph())?,
                    None => write!(f, "．")?,
                }
            }
            writeln!(f)?;
            if row == 4 {
                writeln!(f, "  ～～～～ 楚河  汉界 ～～～～")?;
            }
        }
        Ok(())
    }
}

/// 棋盘加走子方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// 棋盘
    pub board: Board,
    /// 当前走子方
    pub side_to_move: Color,
}

impl BoardState {
    /// 创建初始状态（红方先行）
    pub fn initial() -> Self {
        Self::from_board(Board::initial(), Color::Red)
    }

    /// 从棋盘创建状态
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    /// 切换走子方
    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::initial();

        assert_eq!(
            board.get(Position::new_unchecked(0, 4)),
            Some(Piece::new(PieceKind::King, Color::Black))
        );
        assert_eq!(
            board.get(Position::new_unchecked(9, 4)),
            Some(Piece::new(PieceKind::King, Color::Red))
        );
        assert_eq!(
            board.get(Position::new_unchecked(2, 1)),
            Some(Piece::new(PieceKind::Cannon, Color::Black))
        );
        assert_eq!(
            board.get(Position::new_unchecked(7, 7)),
            Some(Piece::new(PieceKind::Cannon, Color::Red))
        );
        assert_eq!(
            board.get(Position::new_unchecked(3, 0)),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert_eq!(
            board.get(Position::new_unchecked(6, 8)),
            Some(Piece::new(PieceKind::Pawn, Color::Red))
        );

        assert_eq!(board.pieces(Color::Red).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::initial();
        let from = Position::new_unchecked(7, 1);
        let to = Position::new_unchecked(7, 4);

        let captured = board.move_piece(from, to);
        assert!(captured.is_none());
        assert!(board.get(from).is_none());
        assert_eq!(board.get(to), Some(Piece::new(PieceKind::Cannon, Color::Red)));
    }

    #[test]
    fn test_with_move_leaves_original() {
        let board = Board::initial();
        let mv = Move::new(
            Position::new_unchecked(7, 1),
            Position::new_unchecked(0, 1),
            Piece::new(PieceKind::Cannon, Color::Red),
        );

        let next = board.with_move(&mv);
        assert_eq!(board, Board::initial());
        assert!(next.get(mv.from).is_none());
        assert_eq!(next.get(mv.to), Some(mv.piece));
    }

    #[test]
    fn test_find_king() {
        let board = Board::initial();
        assert_eq!(board.find_king(Color::Red), Some(Position::new_unchecked(9, 4)));
        assert_eq!(board.find_king(Color::Black), Some(Position::new_unchecked(0, 4)));
        assert_eq!(Board::empty().find_king(Color::Red), None);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut board = Board::empty();
        let outside = Position::new_unchecked(10, 0);
        board.set(outside, Some(Piece::new(PieceKind::Rook, Color::Red)));
        assert!(board.get(outside).is_none());
        assert_eq!(board.all_pieces().count(), 0);
    }

    #[test]
    fn test_display() {
        let text = Board::initial().to_string();
        assert!(text.contains('將'));
        assert!(text.contains('帥'));
        assert!(text.contains("楚河"));
        // 表头 + 10 行 + 河界
        assert_eq!(text.lines().count(), 12);
    }

    #[test]
    fn test_switch_turn() {
        let mut state = BoardState::initial();
        assert_eq!(state.side_to_move, Color::Red);
        state.switch_turn();
        assert_eq!(state.side_to_move, Color::Black);
    }
}
