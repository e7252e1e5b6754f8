// 测试用：从开局出发随机走子，收集沿途局面
use crate::board::{Board, Color};
use crate::movegen::all_moves;

/// 返回 (局面, 轮到谁走) 序列，遇到无子可走即停止
pub(crate) fn random_positions(seed: u64, plies: usize) -> Vec<(Board, Color)> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut board = Board::initial();
    let mut side = Color::Red;
    let mut positions = vec![];
    for _ in 0..plies {
        positions.push((board.clone(), side));
        let moves = all_moves(&board, side);
        if moves.is_empty() {
            break;
        }
        board.apply(&moves[rng.usize(..moves.len())]);
        side = side.opponent();
    }
    positions
}
