// 电脑自我对弈：rs-xiangqi [难度] [最大步数]
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xiangqi_engine::{game_status, search, Board, Color, Difficulty, GameStatus, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let level: Level = args.next().as_deref().unwrap_or("easy").parse()?;
    let max_plies: usize = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid ply count `{s}`"))?,
        None => 120,
    };
    let difficulty = Difficulty::from(level);
    info!(%level, max_plies, "self-play started");

    let mut board = Board::initial();
    let mut side = Color::Red;
    println!("{board}");

    for ply in 1..=max_plies {
        let outcome = search(&board, &difficulty, side);
        let Some(m) = outcome.best else {
            break;
        };
        board.apply(&m);
        info!(
            ply,
            %side,
            %m,
            capture = m.is_capture(),
            score = outcome.score,
            nodes = outcome.stats.nodes,
            depth = outcome.stats.depth_reached,
            elapsed = ?outcome.stats.elapsed,
            "move played"
        );
        println!("{board}");

        side = side.opponent();
        match game_status(&board, side) {
            GameStatus::Checkmate => {
                println!("绝杀！{} 胜", side.opponent());
                return Ok(());
            }
            GameStatus::Stalemate => {
                println!("困毙！{} 胜", side.opponent());
                return Ok(());
            }
            GameStatus::Check => println!("将军！"),
            GameStatus::Ongoing => {}
        }
    }
    println!("{max_plies} 步内未分胜负");
    Ok(())
}
