//! Terminal viewer for animated chessboard scenes.
//!
//! Draws a layout, then plays the moves and annotations given on the command
//! line or in a JSON script (see [`board_tui::script`]).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use board_scene::{AssetCatalog, ChessBoard};
use board_tui::config;
use board_tui::script::{Script, Step};
use board_tui::ui::{run_app, App};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const START_LAYOUT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Parser)]
#[command(name = "board-tui", about = "Animated chessboard in the terminal")]
struct Cli {
    /// Board layout in FEN placement syntax. Defaults to the starting position.
    #[arg(long, conflicts_with = "script")]
    layout: Option<String>,

    /// JSON script with a layout and steps to play.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Move to play after the script, as `row,col-row,col`. Repeatable.
    #[arg(long = "move", value_parser = parse_move)]
    moves: Vec<Step>,

    /// Directory with piece PNGs (`wK.png`, `bQ.png`, ...).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Duration of each animation in milliseconds.
    #[arg(long)]
    run_time_ms: Option<u64>,

    /// Frame interval in milliseconds.
    #[arg(long)]
    frame_ms: Option<u64>,
}

fn parse_cell(s: &str) -> Result<[usize; 2], String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected row,col but got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok([parse(row)?, parse(col)?])
}

fn parse_move(s: &str) -> Result<Step, String> {
    let (from, to) = s
        .split_once('-')
        .ok_or_else(|| format!("expected row,col-row,col but got {s:?}"))?;
    Ok(Step::Move {
        from: parse_cell(from)?,
        to: parse_cell(to)?,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to a file; the terminal belongs to the UI.
    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "board-tui");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("board-tui starting up");

    let (layout, mut steps) = match &cli.script {
        Some(path) => {
            let script = Script::load(path)?;
            (script.layout, script.steps)
        }
        None => (
            cli.layout.clone().unwrap_or_else(|| START_LAYOUT.to_string()),
            Vec::new(),
        ),
    };
    steps.extend(cli.moves.iter().cloned());

    let assets = match cli.assets.clone().or_else(config::get_assets_dir) {
        Some(dir) => AssetCatalog::png(dir),
        None => AssetCatalog::silhouettes(),
    };
    tracing::info!(root = %assets.root().display(), steps = steps.len(), "Loading board");
    let board = ChessBoard::new(&layout, assets).context("failed to build board")?;

    let run_time = Duration::from_millis(cli.run_time_ms.unwrap_or_else(config::get_run_time_ms));
    let frame = Duration::from_millis(cli.frame_ms.unwrap_or_else(config::get_frame_ms).max(1));

    let title = format!("♟ {} ♟", layout.split_whitespace().next().unwrap_or_default());
    run_app(App::new(board, steps, run_time).with_title(title), frame).await?;

    tracing::info!("board-tui shutting down");
    Ok(())
}
