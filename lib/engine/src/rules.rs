/*
 * 走法规则（Move Validator）
 *
 * 两级合法性，必须保持分开：
 * - Basic：只看棋子的几何走法与阻挡（蹩马腿、塞象眼、炮架、飞将……）
 * - Full ：Basic + 走后己方将帅不被将军
 *
 * 将军检测（check 模块）只能调用 Basic，否则 Full -> 将军检测 -> Full 会无限递归。
 * 所有判定都只返回 bool，非法走法不是错误。
 */

use crate::board::{in_bounds, in_own_territory, in_palace, path_blocked, straight_path};
use crate::board::{Board, Cell, Color, Move, Piece, PieceKind};
use crate::check::is_in_check;

/// 合法性的两个层级
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Legality {
    /// 仅棋子走法与阻挡
    Basic,
    /// 走法 + 不能送将
    Full,
}

pub fn check_move(board: &Board, piece: Piece, from: Cell, to: Cell, legality: Legality) -> bool {
    match legality {
        Legality::Basic => is_basic_move(board, piece, from, to),
        Legality::Full => is_legal_move(board, piece, from, to),
    }
}

/// 完整合法性：基本走法合法，且走后己方将帅不被将军。
pub fn is_legal_move(board: &Board, piece: Piece, from: Cell, to: Cell) -> bool {
    is_basic_move(board, piece, from, to) && !exposes_general(board, piece, from, to)
}

/// 基本合法性：只判断棋子本身的走法规则，不考虑走后是否被将军。
pub fn is_basic_move(board: &Board, piece: Piece, from: Cell, to: Cell) -> bool {
    if !in_bounds(from) || !in_bounds(to) || from == to {
        return false;
    }
    // 起点必须就是这个子
    if board.piece_at(from) != Some(piece) {
        return false;
    }
    // 目标格子有同色棋子，不能吃
    if board.piece_at(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }

    let color = piece.color;
    match piece.kind {
        PieceKind::General => general_move(board, color, from, to),
        PieceKind::Advisor => {
            (from.row - to.row).abs() == 1 && (from.col - to.col).abs() == 1 && in_palace(to, color)
        }
        PieceKind::Elephant => {
            (from.row - to.row).abs() == 2
                && (from.col - to.col).abs() == 2
                && in_own_territory(to, color)
                // 塞象眼
                && board
                    .piece_at(Cell::new((from.row + to.row) / 2, (from.col + to.col) / 2))
                    .is_none()
        }
        PieceKind::Horse => horse_move(board, from, to),
        PieceKind::Chariot => (from.row == to.row || from.col == to.col) && !path_blocked(board, &straight_path(from, to)),
        PieceKind::Cannon => cannon_move(board, from, to),
        PieceKind::Soldier => soldier_move(color, from, to),
    }
}

fn general_move(board: &Board, color: Color, from: Cell, to: Cell) -> bool {
    if (from.row - to.row).abs() + (from.col - to.col).abs() == 1 {
        return in_palace(to, color);
    }
    // 飞将：同一列上直接吃对方将帅，中间不能有子
    from.col == to.col
        && matches!(
            board.piece_at(to),
            Some(Piece { kind: PieceKind::General, color: c, .. }) if c != color
        )
        && !path_blocked(board, &straight_path(from, to))
}

fn horse_move(board: &Board, from: Cell, to: Cell) -> bool {
    let row_diff = (from.row - to.row).abs();
    let col_diff = (from.col - to.col).abs();
    // 马脚在长边方向、紧挨起点的那一格
    let leg = match (row_diff, col_diff) {
        (2, 1) => Cell::new((from.row + to.row) / 2, from.col),
        (1, 2) => Cell::new(from.row, (from.col + to.col) / 2),
        _ => return false,
    };
    board.piece_at(leg).is_none()
}

fn cannon_move(board: &Board, from: Cell, to: Cell) -> bool {
    if from.row != to.row && from.col != to.col {
        return false;
    }
    let screens = straight_path(from, to)
        .into_iter()
        .filter(|&cell| board.piece_at(cell).is_some())
        .count();
    match board.piece_at(to) {
        // 不吃子时路径必须畅通
        None => screens == 0,
        // 吃子必须隔且只隔一个炮架
        Some(_) => screens == 1,
    }
}

fn soldier_move(color: Color, from: Cell, to: Cell) -> bool {
    let forward = to == from.offset(color.forward(), 0);
    if in_own_territory(from, color) {
        // 没过河，只能前进
        forward
    } else {
        // 过了河，可以前进或左右平移
        forward || (from.row == to.row && (from.col - to.col).abs() == 1)
    }
}

// 在一次性的棋盘副本上模拟走子，看己方将帅是否被将军
fn exposes_general(board: &Board, piece: Piece, from: Cell, to: Cell) -> bool {
    let m = Move {
        from,
        to,
        piece,
        captured: board.piece_at(to),
    };
    is_in_check(&board.after(&m), piece.color)
}
