//! Board inspection commands - render the start position, list moves

use anyhow::Result;
use clap::Args;

use hexamind_core::{render_board, render_board_with_coords, ChineseCheckers, MoveKind, PlayerId};

#[derive(Args)]
pub struct BoardArgs {
    /// Number of players (2, 3, 4 or 6)
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Prefix each row with its r coordinate
    #[arg(long)]
    pub coords: bool,
}

#[derive(Args)]
pub struct MovesArgs {
    /// Number of players (2, 3, 4 or 6)
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Player whose moves to list
    #[arg(long, default_value = "1")]
    pub player: PlayerId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_board(args: BoardArgs) -> Result<()> {
    let game = ChineseCheckers::new(args.players);
    let text = if args.coords {
        render_board_with_coords(game.board())
    } else {
        render_board(game.board())
    };
    print!("{}", text);
    println!(
        "{} cells, {} pieces",
        game.board().len(),
        game.board().occupied_count()
    );
    Ok(())
}

pub fn run_moves(args: MovesArgs) -> Result<()> {
    let game = ChineseCheckers::new(args.players);
    let moves = game.get_valid_moves(args.player);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&moves)?);
        return Ok(());
    }

    let jumps = moves.iter().filter(|m| m.kind() == MoveKind::Jump).count();
    println!(
        "Player {}: {} moves ({} steps, {} jumps)",
        args.player,
        moves.len(),
        moves.len() - jumps,
        jumps
    );
    for (i, mv) in moves.iter().enumerate() {
        println!("{:>3}: {}", i, mv);
    }
    Ok(())
}
