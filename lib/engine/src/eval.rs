/*
 * 局面评估
 *
 * 分数 = 己方(子力 + 位置加成) - 对方(子力 + 位置加成) ± 将军加减分
 * - 子力见 PieceKind::material_value，将帅 10000，远超其余子力之和
 * - 位置加成按红方视角（红方在下）给出，黑方查表前先中心翻转
 * - 兵过河后越深入加成越高；将帅在九宫底线中心最安全
 * 评估对双方对称：evaluate(b, 红) == -evaluate(b, 黑)
 */

use crate::board::{Board, Cell, Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use crate::check::is_in_check;
use crate::constant::CHECK_BONUS;

type Table = [[i32; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

// 九宫内的将帅加成（第 7~9 行，第 3~5 列）
const GENERAL_PALACE_BONUS: [[i32; 3]; 3] = [[1, 1, 1], [2, 2, 2], [11, 15, 11]];

const CHARIOT_BONUS: Table = [
    [ 6,  8,  7, 13, 14, 13,  7,  8,  6],
    [ 6, 12,  9, 16, 33, 16,  9, 12,  6],
    [ 6,  8,  7, 14, 16, 14,  7,  8,  6],
    [ 6, 13, 13, 16, 16, 16, 13, 13,  6],
    [ 8, 11, 11, 14, 15, 14, 11, 11,  8],
    [ 8, 12, 12, 14, 15, 14, 12, 12,  8],
    [ 4,  9,  4, 12, 14, 12,  4,  9,  4],
    [-2,  8,  4, 12, 12, 12,  4,  8, -2],
    [ 0,  8,  6, 12,  0, 12,  6,  8,  0],
    [-6,  6,  4, 12,  0, 12,  4,  6, -6],
];

const HORSE_BONUS: Table = [
    [  0,   0,   0,   6,   0,   6,   0,   0,   0],
    [  0,   6,  13,   7,   4,   7,  13,   6,   0],
    [  2,   8,   9,  13,   9,  13,   9,   8,   2],
    [  3,  18,  10,  17,  10,  17,  10,  18,   3],
    [  0,  10,   9,  13,  14,  13,   9,  10,   0],
    [  0,   8,  11,  12,  13,  12,  11,   8,   0],
    [  2,   4,   8,   5,   8,   5,   8,   4,   2],
    [  3,   2,   4,   5,   2,   5,   4,   2,   3],
    [ -5,   0,   2,   3, -12,   3,   2,   0,  -5],
    [ -2,  -5,   0,  -2,   0,  -2,   0,  -5,  -2],
];

const CANNON_BONUS: Table = [
    [  0,   0,  -4,  -9, -10,  -9,  -4,   0,   0],
    [ -2,  -2,  -4,  -8, -11,  -8,  -4,  -2,  -2],
    [ -3,  -3,  -4,  -9,  -8,  -9,  -4,  -3,  -3],
    [ -4,  -1,  -1,  -2,   0,  -2,  -1,  -1,  -4],
    [ -4,  -4,  -4,  -4,   0,  -4,  -4,  -4,  -4],
    [ -5,  -4,  -1,  -4,   0,  -4,  -1,  -4,  -5],
    [ -4,  -4,  -4,  -4,  -4,  -4,  -4,  -4,  -4],
    [ -3,  -4,   0,  -1,   1,  -1,   0,  -4,  -3],
    [ -4,  -3,  -2,  -2,  -2,  -2,  -2,  -3,  -4],
    [ -4,  -4,  -3,  -1,  -1,  -1,  -3,  -4,  -4],
];

const SOLDIER_BONUS: Table = [
    [-1, -1, -1,  1,  3,  1, -1, -1, -1],
    [ 9, 14, 24, 32, 34, 32, 24, 14,  9],
    [ 9, 14, 22, 27, 27, 27, 22, 14,  9],
    [ 9, 13, 17, 19, 20, 19, 17, 13,  9],
    [ 4,  8, 10, 17, 19, 17, 10,  8,  4],
    [-3,  0,  3,  0,  6,  0,  3,  0, -3],
    [-3,  0, -3,  0,  5,  0, -3,  0, -3],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
    [ 0,  0,  0,  0,  0,  0,  0,  0,  0],
];

pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let mut score = 0;
    for (cell, piece) in board.pieces() {
        let value = piece_value(piece.kind, piece.color, cell);
        if piece.color == perspective {
            score += value;
        } else {
            score -= value;
        }
    }
    if is_in_check(board, perspective.opponent()) {
        score += CHECK_BONUS;
    }
    if is_in_check(board, perspective) {
        score -= CHECK_BONUS;
    }
    score
}

/// 单个棋子在某格的价值（子力 + 位置加成）
pub fn piece_value(kind: PieceKind, color: Color, cell: Cell) -> i32 {
    kind.material_value() + positional_bonus(kind, color, cell)
}

fn positional_bonus(kind: PieceKind, color: Color, cell: Cell) -> i32 {
    let cell = match color {
        Color::Red => cell,
        Color::Black => cell.flip(),
    };
    let (row, col) = (cell.row as usize, cell.col as usize);
    match kind {
        PieceKind::General => {
            if (7..=9).contains(&row) && (3..=5).contains(&col) {
                GENERAL_PALACE_BONUS[row - 7][col - 3]
            } else {
                0
            }
        }
        // 士象只在几个固定点上，按点给分
        PieceKind::Advisor => match (row, col) {
            (8, 4) => 3,
            _ => 0,
        },
        PieceKind::Elephant => match (row, col) {
            (7, 4) => 3,
            (7, 0) | (7, 8) => -2,
            _ => 0,
        },
        PieceKind::Horse => HORSE_BONUS[row][col],
        PieceKind::Chariot => CHARIOT_BONUS[row][col],
        PieceKind::Cannon => CANNON_BONUS[row][col],
        PieceKind::Soldier => SOLDIER_BONUS[row][col],
    }
}
