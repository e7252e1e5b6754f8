/**
 * 中国象棋引擎核心库
 *
 * 说明
 * - board: 棋盘、棋子、坐标与走法
 * - rules / check / movegen: 走子规则、将军与将死判定、走法生成
 * - eval / zobrist / search: 局面评估、哈希、Alpha-Beta 搜索
 * - config: 难度配置
 * - 引擎不保存对局历史，也不管理轮到谁走，调用方负责这些
 */
pub mod board;
pub mod check;
pub mod config;
pub mod constant;
pub mod eval;
pub mod movegen;
pub mod rules;
pub mod search;
pub mod zobrist;

#[cfg(test)]
mod testutil;

pub use board::{initial_board, Board, Cell, Color, Move, Piece, PieceId, PieceKind};
pub use check::{game_status, is_checkmate, is_in_check, is_stalemate, GameStatus};
pub use config::{ConfigError, Difficulty, Level};
pub use movegen::{all_moves, legal_moves};
pub use rules::is_legal_move;
pub use search::{best_move, search, search_with, spawn_search, SearchOutcome, SearchStats, SearchTask};
