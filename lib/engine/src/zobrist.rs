/*
 * Zobrist 哈希
 *
 * 每个 (颜色, 棋种, 格子) 一个随机数，另有一个"黑方走棋"随机数；
 * 局面哈希 = 所有在场棋子对应随机数的异或。棋子编号不参与哈希，
 * 所以同样的子力布局总是得到同一个值。
 */

use crate::board::{Board, Cell, Color, Move, Piece, CELL_COUNT};

pub struct ZobristTable {
    pieces: [[[u64; CELL_COUNT]; 7]; 2],
    black_to_move: u64,
}

impl ZobristTable {
    pub fn new(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut pieces = [[[0; CELL_COUNT]; 7]; 2];
        for key in pieces.iter_mut().flatten().flatten() {
            *key = rng.u64(..);
        }
        ZobristTable {
            pieces,
            black_to_move: rng.u64(..),
        }
    }

    fn piece_key(&self, piece: Piece, cell: Cell) -> u64 {
        self.pieces[piece.color.index()][piece.kind.index()][cell.index()]
    }

    fn side_key(&self, side: Color) -> u64 {
        match side {
            Color::Red => 0,
            Color::Black => self.black_to_move,
        }
    }

    /// 全量计算
    pub fn calc_board(&self, board: &Board, side: Color) -> u64 {
        board
            .pieces()
            .fold(self.side_key(side), |hash, (cell, piece)| hash ^ self.piece_key(piece, cell))
    }

    /// 增量更新：`hash` 是走子前（轮到 m 的一方）的哈希
    pub fn apply_move(&self, hash: u64, m: &Move) -> u64 {
        let mut hash = hash ^ self.piece_key(m.piece, m.from) ^ self.piece_key(m.piece, m.to) ^ self.black_to_move;
        if let Some(captured) = m.captured {
            hash ^= self.piece_key(captured, m.to);
        }
        hash
    }
}
