use std::sync::LazyLock;

use crate::zobrist::ZobristTable;

// 评分边界；被将死记为 MIN + 距根节点步数，越快将死分数越极端
pub const MIN: i32 = -99999;
pub const MAX: i32 = 99999;
// 绝对值超过 KILL 的分数都是杀棋分
pub const KILL: i32 = MAX - 100;

// 有一方被将军时的评估加减分
pub const CHECK_BONUS: i32 = 20;

pub const MAX_DEPTH: u32 = 32;
// 置换表容量（条目数），必须是 2 的幂
pub const RECORD_SIZE: usize = 1 << 16;

const ZOBRIST_SEED: u64 = 0x5851_F42D_4C95_7F2D;

pub static ZOBRIST_TABLE: LazyLock<ZobristTable> = LazyLock::new(|| ZobristTable::new(ZOBRIST_SEED));
