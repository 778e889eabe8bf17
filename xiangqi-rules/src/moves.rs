//! 走法生成和将军检测

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind, Position};

/// 走法（尚未执行的候选走法）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 走动的棋子
    pub piece: Piece,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position, piece: Piece) -> Self {
        Self { from, to, piece }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.piece.display_glyph(), self.from, self.to)
    }
}

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// 马的 8 个走法及对应的马腿偏移（沿日字长边、紧邻起点的一格）
const HORSE_STEPS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((-1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((1, 2), (0, 1)),
    ((2, -1), (1, 0)),
    ((2, 1), (1, 0)),
];

/// 走法生成器
pub struct MoveGenerator;

impl MoveGenerator {
    /// 生成指定位置棋子的所有目标位置（不考虑自己是否被将军）
    ///
    /// 空位或越界位置返回空集合。
    pub fn legal_destinations(board: &Board, pos: Position) -> Vec<Position> {
        let mut targets = Vec::new();
        let Some(piece) = board.get(pos) else {
            return targets;
        };

        let color = piece.color;
        match piece.kind {
            PieceKind::King => Self::king_destinations(board, pos, color, &mut targets),
            PieceKind::Advisor => Self::advisor_destinations(board, pos, color, &mut targets),
            PieceKind::Elephant => Self::elephant_destinations(board, pos, color, &mut targets),
            PieceKind::Horse => Self::horse_destinations(board, pos, color, &mut targets),
            PieceKind::Rook => Self::rook_destinations(board, pos, color, &mut targets),
            PieceKind::Cannon => Self::cannon_destinations(board, pos, color, &mut targets),
            PieceKind::Pawn => Self::pawn_destinations(board, pos, color, &mut targets),
        }
        targets
    }

    /// 将/帅：九宫内直走一步
    fn king_destinations(board: &Board, pos: Position, color: Color, out: &mut Vec<Position>) {
        for (dr, dc) in ORTHOGONAL {
            if let Some(to) = pos.offset(dr, dc) {
                if to.is_in_palace(color) {
                    Self::try_add(board, to, color, out);
                }
            }
        }
    }

    /// 士/仕：九宫内斜走一步
    fn advisor_destinations(board: &Board, pos: Position, color: Color, out: &mut Vec<Position>) {
        for (dr, dc) in DIAGONAL {
            if let Some(to) = pos.offset(dr, dc) {
                if to.is_in_palace(color) {
                    Self::try_add(board, to, color, out);
                }
            }
        }
    }

    /// 象/相：走田字，不能过河，象眼被堵则不能走
    fn elephant_destinations(board: &Board, pos: Position, color: Color, out: &mut Vec<Position>) {
        for (dr, dc) in DIAGONAL {
            let Some(to) = pos.offset(dr * 2, dc * 2) else {
                continue;
            };
            if !to.is_on_own_side(color) {
                continue;
            }
            // 象眼
            let blocked = pos.offset(dr, dc).and_then(|eye| board.get(eye)).is_some();
            if !blocked {
                Self::try_add(board, to, color, out);
            }
        }
    }

    /// 马：走日字，蹩马腿
    fn horse_destinations(board: &Board, pos: Position, color: Color, out: &mut Vec<Position>) {
        for ((dr, dc), (lr, lc)) in HORSE_STEPS {
            let Some(to) = pos.offset(dr, dc) else {
                continue;
            };
            let blocked = pos.offset(lr, lc).and_then(|leg| board.get(leg)).is_some();
            if !blocked {
                Self::try_add(board, to, color, out);
            }
        }
    }

    /// 车：直线滑行，可吃第一个遇到的敌子
    fn rook_destinations(board: &Board, pos: Position, color: Color, out: &mut Vec<Position>) {
        for (dr, dc) in ORTHOGONAL {
            let mut current = pos;
            while let Some(to) = current.offset(dr, dc) {
                match board.get(to) {
                    Some(target) => {
                        if target.color != color {
                            out.push(to);
                        }
                        break;
                    }
                    None => out.push(to),
                }
                current = to;
            }
        }
    }

    /// 炮：直线滑行到空位，隔一个炮架才能吃子
    fn cannon_destinations(board: &Board, pos: Position, color: Color, out: &mut Vec<Position>) {
        for (dr, dc) in ORTHOGONAL {
            let mut current = pos;
            let mut screened = false;

            while let Some(to) = current.offset(dr, dc) {
                match (board.get(to), screened) {
                    (None, false) => out.push(to),
                    (None, true) => {}
                    (Some(_), false) => screened = true,
                    (Some(target), true) => {
                        if target.color != color {
                            out.push(to);
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }

    /// 兵/卒：未过河只能前进，过河后可以左右平移，永不后退
    fn pawn_destinations(board: &Board, pos: Position, color: Color, out: &mut Vec<Position>) {
        if let Some(to) = pos.offset(color.forward(), 0) {
            Self::try_add(board, to, color, out);
        }

        if pos.has_crossed_river(color) {
            for dc in [-1, 1] {
                if let Some(to) = pos.offset(0, dc) {
                    Self::try_add(board, to, color, out);
                }
            }
        }
    }

    /// 目标位置为空或敌子时加入结果
    fn try_add(board: &Board, to: Position, color: Color, out: &mut Vec<Position>) {
        match board.get(to) {
            Some(target) if target.color == color => {}
            _ => out.push(to),
        }
    }

    /// 检查指定阵营是否被将军
    ///
    /// 找不到将/帅时返回 false。
    pub fn is_in_check(board: &Board, color: Color) -> bool {
        let Some(king_pos) = board.find_king(color) else {
            return false;
        };

        board
            .pieces(color.opponent())
            .any(|(pos, _)| Self::legal_destinations(board, pos).contains(&king_pos))
    }

    /// 走完这一步后，走子方自己是否处于被将军状态
    pub fn would_leave_self_in_check(board: &Board, mv: &Move) -> bool {
        Self::is_in_check(&board.with_move(mv), mv.piece.color)
    }

    /// 生成不会让己方被将军的目标位置（用于玩家走子校验）
    pub fn safe_destinations(board: &Board, pos: Position) -> Vec<Position> {
        let Some(piece) = board.get(pos) else {
            return Vec::new();
        };

        Self::legal_destinations(board, pos)
            .into_iter()
            .filter(|&to| !Self::would_leave_self_in_check(board, &Move::new(pos, to, piece)))
            .collect()
    }

    /// 检查是否被将死
    ///
    /// 将/帅不存在时视为被将死；否则要求正被将军，且己方任意一步走完之后仍被将军。
    pub fn is_checkmate(board: &Board, color: Color) -> bool {
        if board.find_king(color).is_none() {
            return true;
        }
        if !Self::is_in_check(board, color) {
            return false;
        }

        board.pieces(color).all(|(from, piece)| {
            Self::legal_destinations(board, from)
                .into_iter()
                .all(|to| Self::would_leave_self_in_check(board, &Move::new(from, to, piece)))
        })
    }

    /// 检查游戏是否结束（任一方无将或被将死）
    pub fn is_game_over(board: &Board) -> bool {
        board.find_king(Color::Red).is_none()
            || board.find_king(Color::Black).is_none()
            || Self::is_checkmate(board, Color::Red)
            || Self::is_checkmate(board, Color::Black)
    }

    /// 获取胜方（被将死一方的对手），先判断红方
    pub fn winner(board: &Board) -> Option<Color> {
        if Self::is_checkmate(board, Color::Red) {
            Some(Color::Black)
        } else if Self::is_checkmate(board, Color::Black) {
            Some(Color::Red)
        } else {
            None
        }
    }
}
