/*
 * 搜索模块 - 电脑走子
 *
 * - 负极大值形式的 Alpha-Beta 剪枝（Negamax），分数总是站在轮到走棋一方的角度
 * - 迭代深化：1, 2, ... depth 层逐层加深，超时或被取消时返回最后一个完整层的结果
 * - 置换表：有界、按 Zobrist 哈希取模定位、新记录直接覆盖旧记录；杀棋分按距根步数归一化
 * - 走法排序：置换表走法 > 吃子（MVV/LVA）> 其余
 * - 每次搜索都是独立的：置换表与统计数据只在本次调用内存在，统计随结果一起返回
 * - 每个模拟走子都在棋盘副本上进行，不修改调用方的棋盘
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::board::{Board, Color, Move};
use crate::config::Difficulty;
use crate::constant::{KILL, MAX, MIN, RECORD_SIZE, ZOBRIST_TABLE};
use crate::eval::evaluate;
use crate::movegen::{all_moves, has_legal_move};

// 每搜索这么多个节点检查一次时间与取消标志
const POLL_INTERVAL: u64 = 64;

/// 置换表记录的类型标志
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HashFlag {
    Exact, // 精确值
    Alpha, // 上界（fail-low）
    Beta,  // 下界（fail-high）
}

/// 置换表记录
#[derive(Clone, Copy, Debug)]
pub struct Record {
    pub key: u64,
    pub depth: u32,
    pub flag: HashFlag,
    pub value: i32,
    pub best_move: Option<Move>,
}

/// 固定容量的置换表。位置由哈希低位决定，冲突时新记录覆盖旧记录。
pub struct TranspositionTable {
    records: Vec<Option<Record>>,
    mask: u64,
}

impl TranspositionTable {
    /// 容量向上取整到 2 的幂
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        TranspositionTable {
            records: vec![None; capacity],
            mask: capacity as u64 - 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.records.len()
    }

    pub fn probe(&self, key: u64) -> Option<&Record> {
        self.records[(key & self.mask) as usize]
            .as_ref()
            .filter(|record| record.key == key)
    }

    pub fn store(&mut self, record: Record) {
        self.records[(record.key & self.mask) as usize] = Some(record);
    }
}

// 杀棋分存表时换算成相对当前节点的值，取出时再按当前步数还原
fn value_to_record(value: i32, ply: i32) -> i32 {
    if value > KILL {
        value + ply
    } else if value < -KILL {
        value - ply
    } else {
        value
    }
}

fn value_from_record(value: i32, ply: i32) -> i32 {
    if value > KILL {
        value - ply
    } else if value < -KILL {
        value + ply
    } else {
        value
    }
}

/// 一次搜索的统计
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// 访问的节点数
    pub nodes: u64,
    /// 叶子节点（静态评估）数
    pub leaves: u64,
    /// 置换表命中并直接返回的次数
    pub cache_hits: u64,
    /// Beta 剪枝次数
    pub cutoffs: u64,
    /// 完整搜索完成的最深层数，0 表示第一层都没搜完
    pub depth_reached: u32,
    pub elapsed: Duration,
    /// 因超时或取消提前结束
    pub timed_out: bool,
    /// 最终走法被随机走法替换
    pub randomized: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    /// 无子可走（被将死或困毙）时为 None
    pub best: Option<Move>,
    /// 站在搜索方角度的分数
    pub score: i32,
    pub stats: SearchStats,
}

/// 搜索 `color` 一方的最佳走法；返回 None 表示该方已无合法走法。
pub fn best_move(board: &Board, difficulty: &Difficulty, color: Color) -> Option<Move> {
    search(board, difficulty, color).best
}

pub fn search(board: &Board, difficulty: &Difficulty, color: Color) -> SearchOutcome {
    let mut rng = fastrand::Rng::new();
    search_with(board, difficulty, color, &mut rng, None)
}

/// 带随机数发生器与取消标志的搜索入口。取消只是建议：搜索在下一次轮询时停下并返回已有结果。
#[tracing::instrument(level = "debug", skip_all, fields(color = ?color, depth = difficulty.depth()))]
pub fn search_with(
    board: &Board,
    difficulty: &Difficulty,
    color: Color,
    rng: &mut fastrand::Rng,
    cancel: Option<&AtomicBool>,
) -> SearchOutcome {
    let started = Instant::now();
    let mut root_moves = all_moves(board, color);
    if root_moves.is_empty() {
        debug!("no legal moves");
        return SearchOutcome {
            best: None,
            score: MIN,
            stats: SearchStats {
                elapsed: started.elapsed(),
                ..SearchStats::default()
            },
        };
    }
    sort_moves(&mut root_moves, None);

    let mut state = SearchState::new(started + difficulty.thinking_time(), cancel);
    let key = ZOBRIST_TABLE.calc_board(board, color);
    let mut best: Option<(i32, Move)> = None;

    for depth in 1..=difficulty.depth() {
        let (complete, iteration) = state.search_root(board, color, key, depth, &root_moves);
        if !complete {
            // 第一层都没搜完时，用这一层里已经比较过的最好走法
            if best.is_none() {
                best = iteration;
            }
            state.stats.timed_out = true;
            debug!(depth, "search budget exhausted");
            break;
        }
        let Some((score, m)) = iteration else {
            break;
        };
        best = Some((score, m));
        state.stats.depth_reached = depth;
        debug!(depth, score, nodes = state.stats.nodes, best = %m, "iteration complete");

        // 下一层先搜这一层的最佳走法
        if let Some(index) = root_moves.iter().position(|x| *x == m) {
            let m = root_moves.remove(index);
            root_moves.insert(0, m);
        }
        // 已经找到杀棋（或已被杀），再加深没有意义
        if score.abs() > KILL {
            break;
        }
    }

    let (score, mut chosen) = match best {
        Some(found) => found,
        None => (evaluate(board, color), root_moves[0]),
    };

    let mut stats = state.stats;
    if difficulty.randomness() > 0.0 && rng.f64() < difficulty.randomness() {
        chosen = root_moves[rng.usize(..root_moves.len())];
        stats.randomized = true;
        info!(chosen = %chosen, "substituting a random move");
    }
    stats.elapsed = started.elapsed();

    SearchOutcome {
        best: Some(chosen),
        score,
        stats,
    }
}

/// 在后台线程中运行的一次搜索
pub struct SearchTask {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<SearchOutcome>,
}

/// 在新线程上搜索，避免阻塞界面线程。棋盘被移入任务，不与调用方共享。
pub fn spawn_search(board: Board, difficulty: Difficulty, color: Color) -> SearchTask {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);
    let handle = thread::spawn(move || {
        let mut rng = fastrand::Rng::new();
        search_with(&board, &difficulty, color, &mut rng, Some(&flag))
    });
    SearchTask { cancel, handle }
}

impl SearchTask {
    /// 请求提前结束；搜索会尽快返回当前最好的结果
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// 等待结果；搜索线程 panic 时返回 None
    pub fn join(self) -> Option<SearchOutcome> {
        self.handle.join().ok()
    }
}

// 走法排序：置换表走法最先，其次按 MVV/LVA 排吃子，稳定排序保证结果可复现
fn sort_moves(moves: &mut [Move], hash_move: Option<Move>) {
    moves.sort_by_key(|m| {
        if Some(*m) == hash_move {
            return i32::MIN;
        }
        match m.captured {
            Some(victim) => -(victim.kind.material_value() * 10 - m.piece.kind.material_value()),
            None => 0,
        }
    });
}

// 单次搜索的临时状态，随调用结束而丢弃
struct SearchState<'a> {
    table: TranspositionTable,
    stats: SearchStats,
    deadline: Instant,
    cancel: Option<&'a AtomicBool>,
    stopped: bool,
}

impl<'a> SearchState<'a> {
    fn new(deadline: Instant, cancel: Option<&'a AtomicBool>) -> Self {
        SearchState {
            table: TranspositionTable::new(RECORD_SIZE),
            stats: SearchStats::default(),
            deadline,
            cancel,
            stopped: false,
        }
    }

    fn should_stop(&mut self) -> bool {
        if !self.stopped && self.stats.nodes % POLL_INTERVAL == 0 {
            let cancelled = self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));
            self.stopped = cancelled || Instant::now() >= self.deadline;
        }
        self.stopped
    }

    // 根节点：逐个走法搜索，返回 (是否完整搜完, 目前最好的分数与走法)
    fn search_root(
        &mut self,
        board: &Board,
        color: Color,
        key: u64,
        depth: u32,
        moves: &[Move],
    ) -> (bool, Option<(i32, Move)>) {
        let mut alpha = MIN;
        let mut best: Option<(i32, Move)> = None;
        for m in moves {
            let child = board.after(m);
            let child_key = ZOBRIST_TABLE.apply_move(key, m);
            let Some(v) = self.alpha_beta(&child, color.opponent(), child_key, depth - 1, 1, -MAX, -alpha) else {
                return (false, best);
            };
            let v = -v;
            if best.is_none() || v > alpha {
                alpha = v;
                best = Some((v, *m));
            }
        }
        (true, best)
    }

    // 返回 None 表示超时或被取消，本层结果作废
    fn alpha_beta(
        &mut self,
        board: &Board,
        side: Color,
        key: u64,
        depth: u32,
        ply: i32,
        mut alpha: i32,
        beta: i32,
    ) -> Option<i32> {
        if self.should_stop() {
            return None;
        }
        self.stats.nodes += 1;

        if depth == 0 {
            self.stats.leaves += 1;
            // 叶子节点也要认出将死与困毙，与内部节点给出同样的终局分
            if !has_legal_move(board, side) {
                return Some(MIN + ply);
            }
            return Some(evaluate(board, side));
        }

        let mut hash_move = None;
        if let Some(record) = self.table.probe(key) {
            hash_move = record.best_move;
            if record.depth >= depth {
                let value = value_from_record(record.value, ply);
                let usable = match record.flag {
                    HashFlag::Exact => true,
                    HashFlag::Alpha => value <= alpha,
                    HashFlag::Beta => value >= beta,
                };
                if usable {
                    self.stats.cache_hits += 1;
                    return Some(value);
                }
            }
        }

        let mut moves = all_moves(board, side);
        if moves.is_empty() {
            // 被将死或困毙，越早越差
            return Some(MIN + ply);
        }
        sort_moves(&mut moves, hash_move);

        let alpha_orig = alpha;
        let mut best_value = MIN;
        let mut best_move = None;
        for m in moves {
            let child = board.after(&m);
            let child_key = ZOBRIST_TABLE.apply_move(key, &m);
            let v = -self.alpha_beta(&child, side.opponent(), child_key, depth - 1, ply + 1, -beta, -alpha)?;
            if best_move.is_none() || v > best_value {
                best_value = v;
                best_move = Some(m);
            }
            if v > alpha {
                alpha = v;
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let flag = if best_value <= alpha_orig {
            HashFlag::Alpha
        } else if best_value >= beta {
            HashFlag::Beta
        } else {
            HashFlag::Exact
        };
        self.table.store(Record {
            key,
            depth,
            flag,
            value: value_to_record(best_value, ply),
            best_move,
        });
        Some(best_value)
    }
}
