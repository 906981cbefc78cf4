//! Play command - run a match between human and automated seats
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), build_seats(), play_match(), report_results()
//! - Level 3: describe_event()
//! - Level 4: formatting utilities

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexamind_core::{
    render_board, ControllerKind, MatchConfig, MatchOutcome, MatchRunner, MoveSource, PlayerId,
    Seat, SeatConfig, TurnEvent,
};

use crate::human::HumanPlayer;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Match config JSON file (flags below override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of players (2, 3, 4 or 6)
    #[arg(long)]
    pub players: Option<usize>,

    /// Controller per seat, in player order: human, random, greedy, critic
    #[arg(long = "seat", value_name = "KIND")]
    pub seats: Vec<ControllerKind>,

    /// Turn limit
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Write the resolved config to this file before playing
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Do not print the board after each move
    #[arg(long)]
    pub quiet: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Resolve the match config
/// 2. Seat the players
/// 3. Play turn by turn
/// 4. Report results
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("Failed to save config: {}", path.display()))?;
        tracing::info!("Saved match config to {}", path.display());
    }

    tracing::info!(
        "Starting {}-player match (max {} turns, seed={:?})",
        config.player_count,
        config.max_turns,
        config.seed
    );

    let seats = build_seats(&config);
    let mut runner = MatchRunner::new(seats, config.max_turns);
    let outcome = play_match(&mut runner, args.quiet || args.json)?;

    report_results(&outcome, &config, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge the config file (if any) with command-line flags
fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => MatchConfig::load(path)
            .with_context(|| format!("Failed to load match config: {}", path.display()))?,
        None => MatchConfig::default(),
    };

    if !args.seats.is_empty() {
        let seats = args.seats.iter().map(|&kind| SeatConfig::new(kind)).collect();
        config = config.with_seats(seats);
    }
    if let Some(players) = args.players {
        // Pad or trim the seat list to match
        let fill = config.seats.last().map(|s| s.controller).unwrap_or_default();
        config.seats.resize(players, SeatConfig::new(fill));
        config.player_count = players;
    }
    if let Some(max_turns) = args.max_turns {
        config = config.with_max_turns(max_turns);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    config.validate()?;
    Ok(config)
}

/// Create a move source per seat
fn build_seats(config: &MatchConfig) -> Vec<Seat> {
    (1..=config.player_count as PlayerId)
        .map(|pid| {
            let source: Box<dyn MoveSource> = match config.automated_source(pid) {
                Some(source) => source,
                None => {
                    let name = config.seats[pid as usize - 1].display_name(pid);
                    Box::new(HumanPlayer::new(name, io::stdin(), io::stdout()))
                }
            };
            tracing::info!("Player {}: {}", pid, source.name());
            Seat::new(pid, source)
        })
        .collect()
}

/// Play every turn, echoing progress unless quiet
fn play_match(runner: &mut MatchRunner, quiet: bool) -> Result<MatchOutcome> {
    if !quiet {
        print!("{}", render_board(runner.board()));
    }

    while !runner.is_finished() {
        let name = runner
            .current_seat()
            .map(|s| s.source.name().to_string())
            .unwrap_or_default();
        let event = runner.play_turn()?;
        if !quiet {
            println!("{}", describe_event(&event, &name));
            if let TurnEvent::Moved(_) = event {
                print!("{}", render_board(runner.board()));
            }
        }
    }

    Ok(runner.outcome())
}

/// Report match results
fn report_results(outcome: &MatchOutcome, config: &MatchConfig, json: bool) -> Result<()> {
    if json {
        print_json_results(outcome, config)
    } else {
        print_text_results(outcome);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn describe_event(event: &TurnEvent, name: &str) -> String {
    match event {
        TurnEvent::Moved(rec) => {
            let note = if rec.fallback { " (fallback)" } else { "" };
            format!(
                "Turn {}: {} moved {} [{} options]{}",
                rec.turn, name, rec.mv, rec.options, note
            )
        }
        TurnEvent::Skipped { turn, .. } => {
            format!("Turn {}: {} has no valid moves, skipping", turn, name)
        }
        TurnEvent::Rejected { turn, mv, .. } => {
            format!("Turn {}: {} attempted invalid move {}", turn, name, mv)
        }
        TurnEvent::Finished => "Match finished".to_string(),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Print results as JSON
fn print_json_results(outcome: &MatchOutcome, config: &MatchConfig) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        config: &'a MatchConfig,
        outcome: &'a MatchOutcome,
    }

    let json = serde_json::to_string_pretty(&JsonOutput { config, outcome })?;
    println!("{}", json);
    Ok(())
}

/// Print results as text
fn print_text_results(outcome: &MatchOutcome) {
    println!("\n=== Match Results ===");
    match outcome.winner {
        Some(pid) => println!("Winner:        Player {}", pid),
        None => println!("Winner:        none"),
    }
    println!("Turns played:  {}", outcome.turns_played);
    println!("Moves made:    {}", outcome.moves.len());
    println!("Skipped turns: {}", outcome.skipped_turns);
    println!(
        "Fallbacks:     {}",
        outcome.moves.iter().filter(|m| m.fallback).count()
    );
    if outcome.turn_limit_reached {
        println!("Game ended - turn limit reached");
    }
}
