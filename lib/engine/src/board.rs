/*
 * 棋盘模块（Board 与棋子表示）
 *
 * 设计要点
 * - 棋盘尺寸为 9 列 x 10 行，黑方在上（第 0~4 行），红方在下（第 5~9 行），楚河汉界在第 4/5 行之间
 * - Piece = 棋种 + 颜色 + 唯一编号；编号在开局摆子时分配，走子后保持不变，便于界面层追踪动画与被吃子
 * - Cell 表示坐标，行列从 0 开始；允许临时构造越界坐标，由 in_bounds 过滤
 * - Move 是一个值（起点、终点、走子、被吃子），不持有棋盘引用
 *
 * 本模块只提供几何判定（是否在棋盘内、九宫、本方地盘、直线路径），不包含任何走法规则
 */

use std::fmt;

pub const BOARD_WIDTH: i32 = 9;
pub const BOARD_HEIGHT: i32 = 10;
pub const CELL_COUNT: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    /// 兵卒前进方向上的行增量：红方向上（行号减小），黑方向下。
    pub fn forward(self) -> i32 {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "红方"),
            Color::Black => write!(f, "黑方"),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    General,  // 帅/将
    Advisor,  // 仕/士
    Elephant, // 相/象
    Horse,    // 马
    Chariot,  // 车
    Cannon,   // 炮
    Soldier,  // 兵/卒
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::General,
        PieceKind::Advisor,
        PieceKind::Elephant,
        PieceKind::Horse,
        PieceKind::Chariot,
        PieceKind::Cannon,
        PieceKind::Soldier,
    ];

    pub fn index(self) -> usize {
        match self {
            PieceKind::General => 0,
            PieceKind::Advisor => 1,
            PieceKind::Elephant => 2,
            PieceKind::Horse => 3,
            PieceKind::Chariot => 4,
            PieceKind::Cannon => 5,
            PieceKind::Soldier => 6,
        }
    }

    /// 粗略子力价值，用于吃子排序（MVV/LVA）。
    /// 将帅的价值远大于其余所有子力之和，保证永远不会被"换掉"。
    pub fn material_value(self) -> i32 {
        match self {
            PieceKind::General => 10000,
            PieceKind::Advisor => 20,
            PieceKind::Elephant => 20,
            PieceKind::Horse => 90,
            PieceKind::Chariot => 200,
            PieceKind::Cannon => 100,
            PieceKind::Soldier => 10,
        }
    }

    pub fn name(self, color: Color) -> &'static str {
        match (color, self) {
            (Color::Red, PieceKind::General) => "帅",
            (Color::Red, PieceKind::Advisor) => "仕",
            (Color::Red, PieceKind::Elephant) => "相",
            (Color::Red, PieceKind::Horse) => "傌",
            (Color::Red, PieceKind::Chariot) => "俥",
            (Color::Red, PieceKind::Cannon) => "炮",
            (Color::Red, PieceKind::Soldier) => "兵",
            (Color::Black, PieceKind::General) => "将",
            (Color::Black, PieceKind::Advisor) => "士",
            (Color::Black, PieceKind::Elephant) => "象",
            (Color::Black, PieceKind::Horse) => "馬",
            (Color::Black, PieceKind::Chariot) => "車",
            (Color::Black, PieceKind::Cannon) => "砲",
            (Color::Black, PieceKind::Soldier) => "卒",
        }
    }
}

/// 棋子的唯一编号，开局摆子时分配，整盘棋内不变。
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct PieceId(pub u32);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub id: PieceId,
}

impl Piece {
    pub fn name(&self) -> &'static str {
        self.kind.name(self.color)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Cell { row, col }
    }
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }
    pub fn up(&self, delta: i32) -> Self {
        Cell::new(self.row - delta, self.col)
    }
    pub fn down(&self, delta: i32) -> Self {
        Cell::new(self.row + delta, self.col)
    }
    pub fn left(&self, delta: i32) -> Self {
        Cell::new(self.row, self.col - delta)
    }
    pub fn right(&self, delta: i32) -> Self {
        Cell::new(self.row, self.col + delta)
    }
    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Cell::new(self.row + d_row, self.col + d_col)
    }
    /// 中心对称翻转，黑方查红方视角的价值表时使用
    pub fn flip(&self) -> Self {
        Cell::new(BOARD_HEIGHT - 1 - self.row, BOARD_WIDTH - 1 - self.col)
    }
    /// 0..90 的线性下标，只对棋盘内坐标有意义
    pub fn index(&self) -> usize {
        (self.row * BOARD_WIDTH + self.col) as usize
    }

    /// 按行优先顺序遍历全部 90 个格子
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..BOARD_HEIGHT).flat_map(|row| (0..BOARD_WIDTH).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub from: Cell,              // 起手位置
    pub to: Cell,                // 落子位置
    pub piece: Piece,            // 走的子
    pub captured: Option<Piece>, // 这一步吃的子
}

impl Move {
    pub fn color(&self) -> Color {
        self.piece.color
    }
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}->{}", self.piece.name(), self.from, self.to)?;
        if let Some(captured) = self.captured {
            write!(f, " 吃{}", captured.name())?;
        }
        Ok(())
    }
}

// 坐标是否在棋盘内
pub fn in_bounds(cell: Cell) -> bool {
    cell.row >= 0 && cell.row < BOARD_HEIGHT && cell.col >= 0 && cell.col < BOARD_WIDTH
}

// 坐标是否在该方九宫格内
pub fn in_palace(cell: Cell, color: Color) -> bool {
    let rows = match color {
        Color::Black => 0..=2,
        Color::Red => 7..=9,
    };
    rows.contains(&cell.row) && (3..=5).contains(&cell.col)
}

// 坐标是否在该方楚河汉界以内
pub fn in_own_territory(cell: Cell, color: Color) -> bool {
    in_bounds(cell)
        && match color {
            Color::Red => cell.row >= BOARD_HEIGHT / 2,
            Color::Black => cell.row < BOARD_HEIGHT / 2,
        }
}

/// 横向或纵向两点之间的格子（不含两端）；不在同一行/列时返回空。
pub fn straight_path(from: Cell, to: Cell) -> Vec<Cell> {
    if from.row == to.row {
        (from.col.min(to.col) + 1..from.col.max(to.col))
            .map(|col| Cell::new(from.row, col))
            .collect()
    } else if from.col == to.col {
        (from.row.min(to.row) + 1..from.row.max(to.row))
            .map(|row| Cell::new(row, from.col))
            .collect()
    } else {
        vec![]
    }
}

pub fn path_blocked(board: &Board, path: &[Cell]) -> bool {
    path.iter().any(|&cell| board.piece_at(cell).is_some())
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    // 9×10的棋盘，黑方在上，红方在下
    cells: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    next_id: u32,
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}

/// 标准开局局面，双方各 16 子。
pub fn initial_board() -> Board {
    Board::initial()
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            next_id: 0,
        }
    }

    pub fn initial() -> Self {
        use PieceKind::*;
        let mut board = Board::empty();
        // 黑方半边棋子的 (行, 列)，红方按中心对称摆放
        [
            (Chariot, (0, 0)),
            (Horse, (0, 1)),
            (Elephant, (0, 2)),
            (Advisor, (0, 3)),
            (General, (0, 4)),
            (Advisor, (0, 5)),
            (Elephant, (0, 6)),
            (Horse, (0, 7)),
            (Chariot, (0, 8)),
            (Cannon, (2, 1)),
            (Cannon, (2, 7)),
            (Soldier, (3, 0)),
            (Soldier, (3, 2)),
            (Soldier, (3, 4)),
            (Soldier, (3, 6)),
            (Soldier, (3, 8)),
        ]
        .into_iter()
        .flat_map(|(kind, cell)| {
            let cell = Cell::from(cell);
            [(kind, Color::Black, cell), (kind, Color::Red, cell.flip())]
        })
        .for_each(|(kind, color, cell)| {
            board.place(cell, color, kind);
        });
        board
    }

    pub fn piece_at(&self, cell: Cell) -> Option<Piece> {
        if in_bounds(cell) {
            self.cells[cell.row as usize][cell.col as usize]
        } else {
            None
        }
    }

    /// 摆放一个新棋子并分配编号，返回该棋子。
    ///
    /// # Panics
    /// `cell` 不在棋盘内时 panic。
    pub fn place(&mut self, cell: Cell, color: Color, kind: PieceKind) -> Piece {
        assert!(in_bounds(cell), "cell {cell} is off the board");
        let piece = Piece {
            kind,
            color,
            id: PieceId(self.next_id),
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.cells[cell.row as usize][cell.col as usize] = Some(piece);
        piece
    }

    pub fn remove(&mut self, cell: Cell) -> Option<Piece> {
        if !in_bounds(cell) {
            return None;
        }
        self.cells[cell.row as usize][cell.col as usize].take()
    }

    /// 按棋盘当前状态构造走法；起点无子或越界时返回 None。不做规则判断。
    pub fn make_move(&self, from: Cell, to: Cell) -> Option<Move> {
        if !in_bounds(to) {
            return None;
        }
        let piece = self.piece_at(from)?;
        Some(Move {
            from,
            to,
            piece,
            captured: self.piece_at(to),
        })
    }

    /// 应用走子到棋盘（原地修改），返回实际被吃掉的子。
    ///
    /// # Panics
    /// `m.from` 或 `m.to` 不在棋盘内时 panic；`make_move` 构造的走法总在棋盘内。
    pub fn apply(&mut self, m: &Move) -> Option<Piece> {
        assert!(in_bounds(m.from) && in_bounds(m.to), "move {m} leaves the board");
        let captured = self.remove(m.to);
        self.remove(m.from);
        self.cells[m.to.row as usize][m.to.col as usize] = Some(m.piece);
        captured
    }

    /// 走子后的新局面，自身不变
    pub fn after(&self, m: &Move) -> Board {
        let mut next = self.clone();
        next.apply(m);
        next
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        Cell::all().filter_map(move |cell| self.piece_at(cell).map(|piece| (cell, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Cell, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    // 将帅只能在九宫格内，只需扫描九宫
    pub fn general(&self, color: Color) -> Option<Cell> {
        let rows = match color {
            Color::Black => 0..3,
            Color::Red => 7..10,
        };
        rows.flat_map(|row| (3..6).map(move |col| Cell::new(row, col)))
            .find(|&cell| {
                matches!(
                    self.piece_at(cell),
                    Some(Piece { kind: PieceKind::General, color: c, .. }) if c == color
                )
            })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   ０ １ ２ ３ ４ ５ ６ ７ ８")?;
        for row in 0..BOARD_HEIGHT {
            if row == BOARD_HEIGHT / 2 {
                writeln!(f, "   ～～～ 楚 河 ～～ 汉 界 ～～～")?;
            }
            write!(f, "{row}  ")?;
            for col in 0..BOARD_WIDTH {
                match self.piece_at(Cell::new(row, col)) {
                    Some(piece) => write!(f, "{}", piece.name())?,
                    None => write!(f, "＋")?,
                }
                if col + 1 < BOARD_WIDTH {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::board::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::initial();
        for color in [Color::Red, Color::Black] {
            assert_eq!(board.count(color), 16);
            let generals = board
                .pieces_of(color)
                .filter(|(_, p)| p.kind == PieceKind::General)
                .count();
            assert_eq!(generals, 1);
        }
        assert_eq!(board.general(Color::Red), Some(Cell::new(9, 4)));
        assert_eq!(board.general(Color::Black), Some(Cell::new(0, 4)));
        assert_eq!(board.piece_at(Cell::new(9, 0)).map(|p| p.kind), Some(PieceKind::Chariot));
        assert_eq!(board.piece_at(Cell::new(7, 1)).map(|p| p.kind), Some(PieceKind::Cannon));
        assert_eq!(board.piece_at(Cell::new(6, 0)).map(|p| p.kind), Some(PieceKind::Soldier));
        assert_eq!(board.piece_at(Cell::new(6, 0)).map(|p| p.color), Some(Color::Red));
    }

    #[test]
    fn test_piece_ids_are_unique() {
        let board = Board::initial();
        let mut ids: Vec<PieceId> = board.pieces().map(|(_, p)| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn test_geometry() {
        assert!(in_bounds(Cell::new(0, 0)));
        assert!(in_bounds(Cell::new(9, 8)));
        assert!(!in_bounds(Cell::new(10, 0)));
        assert!(!in_bounds(Cell::new(0, -1)));

        assert!(in_palace(Cell::new(8, 4), Color::Red));
        assert!(!in_palace(Cell::new(6, 4), Color::Red));
        assert!(in_palace(Cell::new(2, 3), Color::Black));
        assert!(!in_palace(Cell::new(2, 6), Color::Black));

        assert!(in_own_territory(Cell::new(5, 0), Color::Red));
        assert!(!in_own_territory(Cell::new(4, 0), Color::Red));
        assert!(in_own_territory(Cell::new(4, 8), Color::Black));
        assert!(!in_own_territory(Cell::new(5, 8), Color::Black));
    }

    #[test]
    fn test_straight_path() {
        assert_eq!(
            straight_path(Cell::new(9, 0), Cell::new(6, 0)),
            vec![Cell::new(7, 0), Cell::new(8, 0)]
        );
        assert_eq!(
            straight_path(Cell::new(3, 5), Cell::new(3, 2)),
            vec![Cell::new(3, 3), Cell::new(3, 4)]
        );
        assert!(straight_path(Cell::new(0, 0), Cell::new(0, 1)).is_empty());
        assert!(straight_path(Cell::new(0, 0), Cell::new(1, 1)).is_empty());

        let board = Board::initial();
        assert!(path_blocked(&board, &straight_path(Cell::new(9, 0), Cell::new(5, 0))));
        assert!(!path_blocked(&board, &straight_path(Cell::new(9, 0), Cell::new(6, 0))));
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut board = Board::initial();
        let m = board.make_move(Cell::new(7, 1), Cell::new(0, 1)).unwrap();
        let before = board.clone();
        let next = board.after(&m);
        assert_eq!(board, before);

        let captured = board.apply(&m);
        assert_eq!(board, next);
        assert_eq!(captured.map(|p| p.kind), Some(PieceKind::Horse));
        assert_eq!(board.piece_at(Cell::new(0, 1)).map(|p| p.id), Some(m.piece.id));
        assert_eq!(board.piece_at(Cell::new(7, 1)), None);
        assert_eq!(board.count(Color::Black), 15);
    }

    #[test]
    fn test_make_move_marks_capture() {
        let board = Board::initial();
        let quiet = board.make_move(Cell::new(9, 0), Cell::new(8, 0)).unwrap();
        assert!(!quiet.is_capture());
        let capture = board.make_move(Cell::new(7, 1), Cell::new(0, 1)).unwrap();
        assert!(capture.is_capture());
        assert!(board.make_move(Cell::new(9, 0), Cell::new(10, 0)).is_none());
        assert!(board.make_move(Cell::new(5, 0), Cell::new(4, 0)).is_none());
    }

    #[test]
    #[should_panic(expected = "leaves the board")]
    fn test_apply_rejects_off_board_move() {
        let mut board = Board::initial();
        let mut m = board.make_move(Cell::new(9, 0), Cell::new(8, 0)).unwrap();
        m.to = Cell::new(10, 0);
        board.apply(&m);
    }

    #[test]
    fn test_many_placements_keep_counting() {
        let mut board = Board::empty();
        let cell = Cell::new(4, 4);
        let mut last = None;
        for _ in 0..70_000 {
            last = Some(board.place(cell, Color::Red, PieceKind::Soldier));
            board.remove(cell);
        }
        assert_eq!(last.map(|p| p.id), Some(PieceId(69_999)));
    }

    #[test]
    fn test_display_marks_river() {
        let text = Board::initial().to_string();
        assert!(text.contains("楚 河"));
        assert!(text.contains("帅"));
        assert!(text.contains("将"));
    }
}
