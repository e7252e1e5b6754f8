/*
 * 走法生成
 *
 * 对每种棋子先列出候选落点（日字、田字、直线上的所有格子……），再逐个交给 rules 判定。
 * 候选集合是合法落点的超集，所以结果与"扫描全部 90 格"完全一致，只是少做很多无用判定。
 * 搜索的耗时主要就在这里。
 */

use std::collections::BTreeSet;

use crate::board::{in_bounds, Board, Cell, Color, Move, Piece, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
use crate::rules::{check_move, is_legal_move, Legality};

/// 棋子从 `from` 出发的全部合法落点（已排除送将）
pub fn legal_moves(board: &Board, piece: Piece, from: Cell) -> BTreeSet<Cell> {
    destinations(board, piece, from, Legality::Full)
}

pub fn destinations(board: &Board, piece: Piece, from: Cell, legality: Legality) -> BTreeSet<Cell> {
    candidate_cells(board, piece, from)
        .into_iter()
        .filter(|&to| check_move(board, piece, from, to, legality))
        .collect()
}

/// `color` 一方的全部合法走法
pub fn all_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = vec![];
    for (from, piece) in board.pieces_of(color) {
        for to in candidate_cells(board, piece, from) {
            if is_legal_move(board, piece, from, to) {
                moves.push(Move {
                    from,
                    to,
                    piece,
                    captured: board.piece_at(to),
                });
            }
        }
    }
    moves
}

/// 是否至少有一步合法走法，找到即返回
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board.pieces_of(color).any(|(from, piece)| {
        candidate_cells(board, piece, from)
            .into_iter()
            .any(|to| is_legal_move(board, piece, from, to))
    })
}

// 候选落点：只按棋子形状列出，不判断阻挡与送将
fn candidate_cells(board: &Board, piece: Piece, from: Cell) -> Vec<Cell> {
    let mut targets = match piece.kind {
        PieceKind::General => {
            let mut targets = vec![from.up(1), from.down(1), from.left(1), from.right(1)];
            // 飞将
            if let Some(other) = board.general(piece.color.opponent()) {
                if other.col == from.col {
                    targets.push(other);
                }
            }
            targets
        }
        PieceKind::Advisor => vec![
            from.offset(-1, -1),
            from.offset(-1, 1),
            from.offset(1, -1),
            from.offset(1, 1),
        ],
        PieceKind::Elephant => vec![
            from.offset(-2, -2),
            from.offset(-2, 2),
            from.offset(2, -2),
            from.offset(2, 2),
        ],
        PieceKind::Horse => vec![
            from.offset(-2, -1),
            from.offset(-2, 1),
            from.offset(2, -1),
            from.offset(2, 1),
            from.offset(-1, -2),
            from.offset(1, -2),
            from.offset(-1, 2),
            from.offset(1, 2),
        ],
        PieceKind::Chariot | PieceKind::Cannon => (0..BOARD_HEIGHT)
            .map(|row| Cell::new(row, from.col))
            .chain((0..BOARD_WIDTH).map(|col| Cell::new(from.row, col)))
            .filter(|&cell| cell != from)
            .collect(),
        PieceKind::Soldier => vec![from.offset(piece.color.forward(), 0), from.left(1), from.right(1)],
    };
    targets.retain(|&cell| in_bounds(cell));
    targets
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::board::*;
    use crate::check::is_in_check;
    use crate::movegen::*;
    use crate::rules::check_move;
    use crate::testutil::random_positions;

    // 最朴素的实现：扫描全部 90 格
    fn scan(board: &Board, piece: Piece, from: Cell, legality: Legality) -> BTreeSet<Cell> {
        Cell::all()
            .filter(|&to| check_move(board, piece, from, to, legality))
            .collect()
    }

    #[test]
    fn test_generate_move() {
        let board = Board::initial();
        assert_eq!(all_moves(&board, Color::Red).len(), 5 + 24 + 4 + 4 + 4 + 2 + 1);
        assert_eq!(all_moves(&board, Color::Black).len(), 5 + 24 + 4 + 4 + 4 + 2 + 1);
    }

    #[test]
    fn test_initial_chariot_moves() {
        let board = Board::initial();
        let from = Cell::new(9, 0);
        let chariot = board.piece_at(from).unwrap();
        let moves = legal_moves(&board, chariot, from);
        assert_eq!(moves, BTreeSet::from([Cell::new(8, 0), Cell::new(7, 0)]));
        assert!(!moves.contains(&Cell::new(6, 0)));
    }

    #[test]
    fn test_candidates_match_full_scan() {
        for (board, _) in random_positions(3, 70) {
            for (from, piece) in board.pieces() {
                for legality in [Legality::Basic, Legality::Full] {
                    assert_eq!(
                        destinations(&board, piece, from, legality),
                        scan(&board, piece, from, legality),
                        "{piece:?} at {from}\n{board}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_moves_never_leave_general_in_check() {
        for (board, side) in random_positions(5, 90) {
            for (from, piece) in board.pieces_of(side) {
                for to in legal_moves(&board, piece, from) {
                    let m = board.make_move(from, to).unwrap();
                    assert!(!is_in_check(&board.after(&m), side), "{m}\n{board}");
                }
            }
        }
    }

    #[test]
    fn test_all_moves_agree_with_legal_moves() {
        for (board, side) in random_positions(9, 40) {
            let from_sets: usize = board
                .pieces_of(side)
                .map(|(from, piece)| legal_moves(&board, piece, from).len())
                .sum();
            let moves = all_moves(&board, side);
            assert_eq!(moves.len(), from_sets);
            assert_eq!(has_legal_move(&board, side), !moves.is_empty());
            for m in moves {
                assert_eq!(m.captured, board.piece_at(m.to));
                assert_eq!(m.color(), side);
            }
        }
    }
}
