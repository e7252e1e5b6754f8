/*
 * 将军 / 将死 / 困毙判定
 *
 * - is_in_check 只使用基本走法规则（rules::is_basic_move），见 rules 模块说明
 * - 将死与困毙都是"没有合法走法"，区别只在于当前是否被将军；
 *   搜索里两者都按负方处理，界面层通过 game_status 区分
 */

use crate::board::{Board, Color};
use crate::movegen::has_legal_move;
use crate::rules::is_basic_move;

/// 对方是否有任何棋子能按基本规则走到己方将帅的位置。
/// 找不到己方将帅时视为被将军（局面已不合法）。
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(general) = board.general(color) else {
        return true;
    };
    board
        .pieces_of(color.opponent())
        .any(|(from, piece)| is_basic_move(board, piece, from, general))
}

pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color) && !has_legal_move(board, color)
}

/// 未被将军但无子可走
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_in_check(board, color) && !has_legal_move(board, color)
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// 轮到 `color` 走时的局面状态
pub fn game_status(board: &Board, color: Color) -> GameStatus {
    let checked = is_in_check(board, color);
    let can_move = has_legal_move(board, color);
    match (checked, can_move) {
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Checkmate,
        (false, true) => GameStatus::Ongoing,
        (false, false) => GameStatus::Stalemate,
    }
}
