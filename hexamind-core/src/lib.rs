//! Hexamind Core - Chinese Checkers engine
//!
//! This crate provides the core game logic for Hexamind:
//! - Board geometry (star-shaped hex board with axial coordinates)
//! - Move generation (steps and single jumps) and move application
//! - Move sources (random, greedy and critic-reviewed policies)
//! - Turn sequencing, text rendering and match configuration

pub mod error;
pub mod board;
pub mod game;
pub mod ai;
pub mod runner;
pub mod render;
pub mod config;

// Re-exports for convenient access
pub use error::EngineError;
pub use board::{Board, Hex, Occupant, PlayerId, EMPTY, MOVE_DIRECTIONS, CUBE_DIRECTIONS};
pub use game::{ChineseCheckers, Move, MoveKind, WinCheck, NoWinner};
pub use ai::{MoveSource, RandomAI, GreedyAI, CriticAI, goal_for};
pub use runner::{MatchRunner, MatchOutcome, Seat, TurnEvent, TurnRecord};
pub use render::{render_board, render_board_with_coords};
pub use config::{MatchConfig, SeatConfig, ControllerKind};
