//! Move sources: anything that picks one move from a generated list
//!
//! Automated players here are seeded so matches are reproducible.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Hex, PlayerId};
use crate::game::Move;

// ============================================================================
// CONSTANTS
// ============================================================================

/// The critic accepts moves that lose at most this much distance
const MAX_SETBACK: f32 = 2.0;

/// Proposals the critic reviews before approving whatever comes next
const CRITIC_ATTEMPTS: u32 = 3;

// ============================================================================
// MOVE SOURCE
// ============================================================================

/// Something that chooses moves: a person at a prompt or a policy
pub trait MoveSource {
    /// Display name
    fn name(&self) -> &str;

    fn is_human(&self) -> bool {
        false
    }

    /// Pick one of `moves` for `player`; None means no decision
    fn choose_move(&mut self, board: &Board, player: PlayerId, moves: &[Move]) -> Option<Move>;
}

// ============================================================================
// GOALS
// ============================================================================

/// Where a player is heading
pub fn goal_for(player: PlayerId) -> Hex {
    match player {
        1 => Hex::new(0, 4),
        2 => Hex::new(-4, 0),
        3 => Hex::new(4, -4),
        _ => Hex::new(0, 0),
    }
}

/// Straight-line distance in (q, r) space
pub fn goal_distance(from: Hex, goal: Hex) -> f32 {
    let dq = (from.q - goal.q) as f32;
    let dr = (from.r - goal.r) as f32;
    (dq * dq + dr * dr).sqrt()
}

/// How much closer a move brings its piece to the goal (negative = away)
pub fn improvement(mv: &Move, goal: Hex) -> f32 {
    goal_distance(mv.start, goal) - goal_distance(mv.end, goal)
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// RANDOM
// ============================================================================

/// Uniformly random choice
pub struct RandomAI {
    name: String,
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            name: name.into(),
            rng: create_rng(seed),
        }
    }
}

impl MoveSource for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _board: &Board, _player: PlayerId, moves: &[Move]) -> Option<Move> {
        moves.choose(&mut self.rng).copied()
    }
}

// ============================================================================
// GREEDY
// ============================================================================

/// Takes the move that gains the most ground toward the goal
///
/// Ties are broken at random.
pub struct GreedyAI {
    name: String,
    rng: ChaCha8Rng,
}

impl GreedyAI {
    pub fn new(name: impl Into<String>, seed: Option<u64>) -> Self {
        Self {
            name: name.into(),
            rng: create_rng(seed),
        }
    }
}

impl MoveSource for GreedyAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, _board: &Board, player: PlayerId, moves: &[Move]) -> Option<Move> {
        let goal = goal_for(player);
        let best = moves
            .iter()
            .map(|mv| improvement(mv, goal))
            .fold(f32::NEG_INFINITY, f32::max);

        let top: Vec<Move> = moves
            .iter()
            .filter(|mv| improvement(mv, goal) >= best - f32::EPSILON)
            .copied()
            .collect();

        top.choose(&mut self.rng).copied()
    }
}

// ============================================================================
// CRITIC
// ============================================================================

/// Reviews proposals from an inner source before committing
///
/// A proposal passes if it does not retreat more than `MAX_SETBACK` from
/// the goal. After `CRITIC_ATTEMPTS` rejected proposals the next one is
/// taken regardless. If the inner source gives up, a random legal move is
/// played.
pub struct CriticAI<P: MoveSource> {
    name: String,
    inner: P,
    rng: ChaCha8Rng,
    /// Proposals rejected during the last decision
    pub last_rejections: u32,
}

impl<P: MoveSource> CriticAI<P> {
    pub fn new(name: impl Into<String>, inner: P, seed: Option<u64>) -> Self {
        Self {
            name: name.into(),
            inner,
            rng: create_rng(seed),
            last_rejections: 0,
        }
    }

    /// Would the critic approve `mv` on attempt number `attempt` (1-based)?
    pub fn approves(mv: &Move, player: PlayerId, attempt: u32) -> bool {
        attempt > CRITIC_ATTEMPTS || improvement(mv, goal_for(player)) > -MAX_SETBACK
    }
}

impl<P: MoveSource> MoveSource for CriticAI<P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &Board, player: PlayerId, moves: &[Move]) -> Option<Move> {
        self.last_rejections = 0;
        for attempt in 1..=CRITIC_ATTEMPTS + 1 {
            let proposal = match self.inner.choose_move(board, player, moves) {
                Some(mv) => mv,
                None => break,
            };
            if Self::approves(&proposal, player, attempt) {
                return Some(proposal);
            }
            self.last_rejections += 1;
            tracing::debug!("{} rejected {} (attempt {})", self.name, proposal, attempt);
        }
        moves.choose(&mut self.rng).copied()
    }
}

// ============================================================================
// TESTS
// ============================================================================
