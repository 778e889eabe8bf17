//! 棋局评估函数

use xiangqi_rules::{Board, Color, MoveGenerator, Piece, PieceKind, Position};

/// 将军奖惩分：己方被将军扣分，对方被将军加分
pub const CHECK_BONUS: i32 = 50;

/// 评估器
pub struct Evaluator;

/// 棋子位置分值表，行列与棋盘一致（第 0 行为黑方底线）
mod position_tables {
    /// 红兵：临近黑方底线前两行加分
    pub const RED_PAWN: [[i32; 9]; 10] = [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [10, 10, 10, 10, 10, 10, 10, 10, 10],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
    ];

    /// 黑卒
    pub const BLACK_PAWN: [[i32; 9]; 10] = [
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [10, 10, 10, 10, 10, 10, 10, 10, 10],
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0, 0, 0, 0, 0],
    ];

    /// 马的灵活性分值，只覆盖第 0-6 行，其余行为 0，红黑共用
    pub const HORSE: [[i32; 9]; 7] = [
        [0, 3, 6, 9, 12, 9, 6, 3, 0],
        [3, 6, 9, 12, 15, 12, 9, 6, 3],
        [0, 3, 16, 18, 16, 18, 16, 3, 0],
        [3, 8, 19, 24, 27, 24, 19, 8, 3],
        [0, 3, 16, 18, 16, 18, 16, 3, 0],
        [3, 6, 9, 12, 15, 12, 9, 6, 3],
        [0, 3, 6, 9, 12, 9, 6, 3, 0],
    ];

    /// 炮按列计分
    pub const CANNON: [i32; 9] = [6, 4, 0, 10, 12, 10, 0, 4, 6];
}

impl Evaluator {
    /// 棋子基础分值
    pub fn material(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::King => 10000,
            PieceKind::Advisor => 20,
            PieceKind::Elephant => 20,
            PieceKind::Horse => 40,
            PieceKind::Rook => 90,
            PieceKind::Cannon => 45,
            PieceKind::Pawn => 10,
        }
    }

    /// 获取棋子在指定位置的位置加成分，越界位置为 0
    pub fn position_bonus(piece: Piece, pos: Position) -> i32 {
        if !pos.is_valid() {
            return 0;
        }

        let row = pos.row as usize;
        let col = pos.col as usize;

        match piece.kind {
            PieceKind::Pawn => match piece.color {
                Color::Red => position_tables::RED_PAWN[row][col],
                Color::Black => position_tables::BLACK_PAWN[row][col],
            },
            PieceKind::Horse => position_tables::HORSE.get(row).map_or(0, |cols| cols[col]),
            PieceKind::Cannon => position_tables::CANNON[col],
            PieceKind::Rook => (4 - (col as i32 - 4).abs()).max(0) * 2,
            PieceKind::King | PieceKind::Advisor | PieceKind::Elephant => 0,
        }
    }

    /// 子力加位置分（指定阵营视角，正值对该阵营有利）
    pub fn static_score(board: &Board, perspective: Color) -> i32 {
        board
            .all_pieces()
            .map(|(pos, piece)| {
                let value = Self::material(piece.kind) + Self::position_bonus(piece, pos);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    /// 评估棋局（指定阵营视角），包含将军奖惩
    pub fn evaluate(board: &Board, perspective: Color) -> i32 {
        let mut score = Self::static_score(board, perspective);

        if MoveGenerator::is_in_check(board, perspective) {
            score -= CHECK_BONUS;
        }
        if MoveGenerator::is_in_check(board, perspective.opponent()) {
            score += CHECK_BONUS;
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xiangqi_rules::Fen;

    fn board(fen: &str) -> Board {
        Fen::parse(fen).unwrap().board
    }

    #[test]
    fn test_piece_values() {
        assert_eq!(Evaluator::material(PieceKind::King), 10000);
        assert_eq!(Evaluator::material(PieceKind::Advisor), 20);
        assert_eq!(Evaluator::material(PieceKind::Elephant), 20);
        assert_eq!(Evaluator::material(PieceKind::Horse), 40);
        assert_eq!(Evaluator::material(PieceKind::Rook), 90);
        assert_eq!(Evaluator::material(PieceKind::Cannon), 45);
        assert_eq!(Evaluator::material(PieceKind::Pawn), 10);
    }

    #[test]
    fn test_initial_evaluation() {
        let board = Board::initial();
        // 马的位置表只覆盖 0-6 行，初始局面黑马 (0,1)(0,7) 各得 3 分，红马得 0 分
        assert_eq!(Evaluator::evaluate(&board, Color::Black), 6);
        assert_eq!(Evaluator::evaluate(&board, Color::Red), -6);
    }

    #[test]
    fn test_pawn_bonus() {
        let red = Piece::new(PieceKind::Pawn, Color::Red);
        let black = Piece::new(PieceKind::Pawn, Color::Black);

        assert_eq!(Evaluator::position_bonus(red, Position::new_unchecked(6, 4)), 0);
        assert_eq!(Evaluator::position_bonus(red, Position::new_unchecked(7, 0)), 1);
        assert_eq!(Evaluator::position_bonus(red, Position::new_unchecked(8, 8)), 10);
        assert_eq!(Evaluator::position_bonus(black, Position::new_unchecked(1, 3)), 10);
        assert_eq!(Evaluator::position_bonus(black, Position::new_unchecked(2, 3)), 1);
        assert_eq!(Evaluator::position_bonus(black, Position::new_unchecked(8, 3)), 0);
    }

    #[test]
    fn test_horse_bonus() {
        let horse = Piece::new(PieceKind::Horse, Color::Red);
        assert_eq!(Evaluator::position_bonus(horse, Position::new_unchecked(3, 4)), 27);
        assert_eq!(Evaluator::position_bonus(horse, Position::new_unchecked(0, 0)), 0);
        // 第 7-9 行没有加成
        assert_eq!(Evaluator::position_bonus(horse, Position::new_unchecked(7, 4)), 0);
        assert_eq!(Evaluator::position_bonus(horse, Position::new_unchecked(9, 1)), 0);
    }

    #[test]
    fn test_cannon_and_rook_bonus() {
        let cannon = Piece::new(PieceKind::Cannon, Color::Black);
        assert_eq!(Evaluator::position_bonus(cannon, Position::new_unchecked(2, 4)), 12);
        assert_eq!(Evaluator::position_bonus(cannon, Position::new_unchecked(7, 2)), 0);

        let rook = Piece::new(PieceKind::Rook, Color::Red);
        assert_eq!(Evaluator::position_bonus(rook, Position::new_unchecked(9, 0)), 0);
        assert_eq!(Evaluator::position_bonus(rook, Position::new_unchecked(9, 4)), 8);
        assert_eq!(Evaluator::position_bonus(rook, Position::new_unchecked(5, 6)), 4);
    }

    #[test]
    fn test_off_board_position_has_no_bonus() {
        let off_board = [Position::new_unchecked(10, 0), Position::new_unchecked(0, 9)];
        for kind in PieceKind::ALL {
            for color in [Color::Red, Color::Black] {
                for pos in off_board {
                    assert_eq!(Evaluator::position_bonus(Piece::new(kind, color), pos), 0);
                }
            }
        }
    }

    #[test]
    fn test_static_score_flips_with_perspective() {
        let boards = [
            Board::initial(),
            board("4k4/9/9/9/4P4/9/9/9/4R4/4K4 r"),
            board("3akab2/9/4b4/9/2n6/9/9/4C4/9/3K5 r"),
        ];
        for board in boards {
            assert_eq!(
                Evaluator::static_score(&board, Color::Red),
                -Evaluator::static_score(&board, Color::Black)
            );
        }
    }

    #[test]
    fn test_check_bonus_both_directions() {
        // 红车将黑将
        let board = board("3k5/9/9/9/9/9/9/9/9/3RK4 r");
        assert!(MoveGenerator::is_in_check(&board, Color::Black));
        assert!(!MoveGenerator::is_in_check(&board, Color::Red));

        let red_static = Evaluator::static_score(&board, Color::Red);
        assert_eq!(Evaluator::evaluate(&board, Color::Red), red_static + CHECK_BONUS);
        assert_eq!(Evaluator::evaluate(&board, Color::Black), -red_static - CHECK_BONUS);
    }

    #[test]
    fn test_material_advantage() {
        // 红方少一个车
        let score = Evaluator::static_score(
            &board("rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABN1 r"),
            Color::Red,
        );
        assert!(score < 0, "红方少车应该分数为负: {}", score);
        assert!(score <= -90, "车的价值为 90: {}", score);
    }

    #[test]
    fn test_missing_king_dominates() {
        let board = board("9/9/9/9/9/9/9/9/9/4K4 r");
        assert_eq!(Evaluator::evaluate(&board, Color::Red), 10000);
        assert_eq!(Evaluator::evaluate(&board, Color::Black), -10000);
    }
}
