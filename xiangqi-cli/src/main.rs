use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use xiangqi_ai::{AiConfig, AiEngine, Difficulty};
use xiangqi_cli::{load_ai_config, GameSession};
use xiangqi_rules::{Board, BoardState, Color, Fen, Move, INITIAL_FEN};

#[derive(Parser)]
#[command(name = "xiangqi", version, about = "中国象棋规则与 AI 引擎")]
struct Cli {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 计算当前局面走子方的最佳走法
    BestMove {
        #[command(flatten)]
        engine: EngineArgs,

        /// 以 JSON 输出走法
        #[arg(long)]
        json: bool,
    },
    /// 引擎自我对弈
    SelfPlay {
        #[command(flatten)]
        engine: EngineArgs,

        /// 最多走多少步
        #[arg(short, long, default_value_t = 20)]
        plies: u32,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// 起始局面
    #[arg(long, default_value = INITIAL_FEN)]
    fen: String,

    /// 搜索深度
    #[arg(short, long, conflicts_with = "difficulty")]
    depth: Option<u8>,

    /// 难度：easy、medium 或 hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl EngineArgs {
    fn load(&self) -> Result<(BoardState, AiConfig)> {
        let state =
            Fen::parse(&self.fen).with_context(|| format!("无法解析局面: {}", self.fen))?;
        let config = load_ai_config(self.config.as_deref(), self.difficulty, self.depth)?;
        info!(difficulty = %config.difficulty, depth = config.depth, "engine configured");
        Ok((state, config))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志（输出到 stderr，stdout 只留给结果）
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("xiangqi={}", level).parse()?),
        )
        .init();

    match cli.command {
        Commands::BestMove { engine, json } => best_move(engine, json).await,
        Commands::SelfPlay { engine, plies } => self_play(engine, plies).await,
    }
}

/// 在阻塞线程池中运行搜索，返回走法和引擎（保留统计数据）
async fn search(
    mut engine: AiEngine,
    board: Board,
    color: Color,
) -> Result<(Option<Move>, AiEngine)> {
    tokio::task::spawn_blocking(move || {
        let mv = engine.search(&board, color);
        (mv, engine)
    })
    .await
    .context("搜索任务异常退出")
}

async fn best_move(args: EngineArgs, json: bool) -> Result<()> {
    let (state, config) = args.load()?;
    let side = state.side_to_move;

    let (mv, engine) = search(AiEngine::new(config), state.board, side).await?;

    if json {
        println!("{}", serde_json::to_string(&mv).context("序列化走法失败")?);
        return Ok(());
    }

    match mv {
        Some(mv) => {
            println!("{} {}", side, mv);
            if let Some(score) = engine.last_score() {
                println!("score {} nodes {}", score, engine.nodes_searched());
            }
        }
        None => {
            warn!(%side, "no move available");
            println!("{} has no move", side);
        }
    }
    Ok(())
}

async fn self_play(args: EngineArgs, plies: u32) -> Result<()> {
    let (state, config) = args.load()?;
    let mut session = GameSession::from_state(state);
    let mut engine = AiEngine::new(config);

    println!("{}", session.board());

    for ply in 1..=plies {
        if session.is_over() {
            break;
        }

        let side = session.side_to_move();
        let (mv, returned) = search(engine, *session.board(), side).await?;
        engine = returned;

        if let Some(mv) = session.apply_engine_move(mv).context("引擎走法无效")? {
            println!("{}. {} {}", ply, side, mv);
            println!("{}", session.board());
        }
    }

    match session.outcome() {
        Some(outcome) => println!("{}", outcome),
        None => println!("no result after {} plies", session.history().len()),
    }
    println!("{}", Fen::to_string(session.state()));
    Ok(())
}
