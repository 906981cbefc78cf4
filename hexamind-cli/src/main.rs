//! Hexamind CLI - Command-line interface
//!
//! Commands:
//! - play: Play a match between humans and automated players
//! - board: Print the starting board
//! - moves: List the moves available at the start

mod board_cmd;
mod human;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexamind")]
#[command(about = "Hexamind Chinese Checkers arena")]
struct Cli {
    /// Random seed for reproducible matches
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match
    Play(play_cmd::PlayArgs),
    /// Print the starting board
    Board(board_cmd::BoardArgs),
    /// List a player's moves on the starting board
    Moves(board_cmd::MovesArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries boards and JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Board(args) => board_cmd::run_board(args),
        Commands::Moves(args) => board_cmd::run_moves(args),
    }
}
