//! Match runner - sequences turns between seats
//!
//! ## Architecture
//! - Level 1: run() - whole match
//! - Level 2: play_turn() - one seat's turn
//! - Level 3: choose_or_fallback() - move selection with recovery

use serde::Serialize;

use crate::ai::MoveSource;
use crate::board::{Board, PlayerId};
use crate::error::EngineError;
use crate::game::{ChineseCheckers, Move, NoWinner, WinCheck};

/// Turn limit used when none is configured
pub const DEFAULT_MAX_TURNS: u32 = 200;

// ============================================================================
// RECORDS
// ============================================================================

/// One seat at the table
pub struct Seat {
    pub player_id: PlayerId,
    pub source: Box<dyn MoveSource>,
}

impl Seat {
    pub fn new(player_id: PlayerId, source: Box<dyn MoveSource>) -> Self {
        Self { player_id, source }
    }
}

/// A committed move
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub player: PlayerId,
    pub mv: Move,
    /// Options the player had
    pub options: usize,
    /// Source gave no usable answer and the first option was played
    pub fallback: bool,
}

/// What happened on a turn
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TurnEvent {
    Moved(TurnRecord),
    /// Player had no moves
    Skipped { turn: u32, player: PlayerId },
    /// Engine refused the move
    Rejected { turn: u32, player: PlayerId, mv: Move },
    /// A winner was already declared, or the turn limit is reached
    Finished,
}

/// Outcome of a whole match
#[derive(Clone, Debug, Serialize)]
pub struct MatchOutcome {
    pub winner: Option<PlayerId>,
    pub turns_played: u32,
    pub turn_limit_reached: bool,
    pub skipped_turns: u32,
    pub moves: Vec<TurnRecord>,
}

// ============================================================================
// RUNNER
// ============================================================================

/// Turn controller: owns the engine and the seats
pub struct MatchRunner<W: WinCheck = NoWinner> {
    game: ChineseCheckers<W>,
    seats: Vec<Seat>,
    max_turns: u32,
    /// Next turn number (1-based)
    turn: u32,
    skipped: u32,
    history: Vec<TurnRecord>,
}

impl MatchRunner<NoWinner> {
    /// Fresh game for the given seats (player count = seat count)
    pub fn new(seats: Vec<Seat>, max_turns: u32) -> Self {
        let game = ChineseCheckers::new(seats.len());
        Self::with_game(game, seats, max_turns)
    }
}

impl<W: WinCheck> MatchRunner<W> {
    pub fn with_game(game: ChineseCheckers<W>, seats: Vec<Seat>, max_turns: u32) -> Self {
        Self {
            game,
            seats,
            max_turns,
            turn: 1,
            skipped: 0,
            history: Vec::new(),
        }
    }

    pub fn game(&self) -> &ChineseCheckers<W> {
        &self.game
    }

    pub fn board(&self) -> &Board {
        self.game.board()
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Turn number that will be played next
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Seat whose turn it is
    pub fn current_seat(&self) -> Option<&Seat> {
        if self.seats.is_empty() {
            return None;
        }
        let idx = (self.turn as usize - 1) % self.seats.len();
        self.seats.get(idx)
    }

    pub fn is_finished(&self) -> bool {
        self.seats.is_empty() || self.turn > self.max_turns || self.game.check_winner().is_some()
    }

    // ========================================================================
    // LEVEL 1 - MATCH
    // ========================================================================

    /// Play until someone wins or the turn limit is hit
    pub fn run(&mut self) -> Result<MatchOutcome, EngineError> {
        while !self.is_finished() {
            self.play_turn()?;
        }
        let outcome = self.outcome();
        tracing::info!(
            "Match over after {} turns: winner={:?}, limit reached={}",
            outcome.turns_played,
            outcome.winner,
            outcome.turn_limit_reached
        );
        Ok(outcome)
    }

    /// Summary of the match so far
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome {
            winner: self.game.check_winner(),
            turns_played: self.turn - 1,
            turn_limit_reached: self.turn > self.max_turns,
            skipped_turns: self.skipped,
            moves: self.history.clone(),
        }
    }

    // ========================================================================
    // LEVEL 2 - TURN
    // ========================================================================

    /// Play the current seat's turn
    pub fn play_turn(&mut self) -> Result<TurnEvent, EngineError> {
        if self.is_finished() {
            return Ok(TurnEvent::Finished);
        }

        let turn = self.turn;
        let idx = (turn as usize - 1) % self.seats.len();
        let player = self.seats[idx].player_id;
        self.turn += 1;

        let moves = self.game.get_valid_moves(player);
        if moves.is_empty() {
            tracing::warn!("Turn {}: player {} has no moves, skipping", turn, player);
            self.skipped += 1;
            return Ok(TurnEvent::Skipped { turn, player });
        }

        let (mv, fallback) = choose_or_fallback(&mut self.seats[idx], self.game.board(), &moves);
        if fallback {
            tracing::warn!(
                "Turn {}: {} gave no usable move, playing {}",
                turn,
                self.seats[idx].source.name(),
                mv
            );
        }

        if !self.game.apply(mv)? {
            tracing::warn!("Turn {}: move {} rejected", turn, mv);
            return Ok(TurnEvent::Rejected { turn, player, mv });
        }

        tracing::debug!("Turn {}: player {} played {} ({} options)", turn, player, mv, moves.len());

        let record = TurnRecord {
            turn,
            player,
            mv,
            options: moves.len(),
            fallback,
        };
        self.history.push(record.clone());
        Ok(TurnEvent::Moved(record))
    }
}

// ============================================================================
// LEVEL 3 - MOVE SELECTION
// ============================================================================

/// Ask the seat for a move; fall back to the first option if it answers
/// with nothing or with a move that was not offered
fn choose_or_fallback(seat: &mut Seat, board: &Board, moves: &[Move]) -> (Move, bool) {
    match seat.source.choose_move(board, seat.player_id, moves) {
        Some(mv) if moves.contains(&mv) => (mv, false),
        _ => (moves[0], true),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{GreedyAI, RandomAI};
    use crate::board::Hex;

    /// Always answers with an off-list move
    struct Stubborn;

    impl MoveSource for Stubborn {
        fn name(&self) -> &str {
            "stubborn"
        }

        fn choose_move(&mut self, _board: &Board, _player: PlayerId, _moves: &[Move]) -> Option<Move> {
            Some(Move::new(Hex::new(0, 0), Hex::new(0, 1)))
        }
    }

    fn random_seats(n: u8) -> Vec<Seat> {
        (1..=n)
            .map(|pid| Seat::new(pid, Box::new(RandomAI::new(format!("P{}", pid), Some(pid as u64)))))
            .collect()
    }

    #[test]
    fn test_turn_order() {
        let mut runner = MatchRunner::new(random_seats(3), 10);
        for expected in [1, 2, 3, 1, 2] {
            match runner.play_turn().unwrap() {
                TurnEvent::Moved(rec) => assert_eq!(rec.player, expected),
                other => panic!("unexpected event {:?}", other),
            }
        }
        assert_eq!(runner.turn(), 6);
    }

    #[test]
    fn test_run_hits_turn_limit() {
        let mut runner = MatchRunner::new(random_seats(2), 20);
        let outcome = runner.run().unwrap();
        assert_eq!(outcome.winner, None);
        assert!(outcome.turn_limit_reached);
        assert_eq!(outcome.turns_played, 20);
        assert_eq!(outcome.moves.len() as u32 + outcome.skipped_turns, 20);
        assert_eq!(runner.play_turn().unwrap(), TurnEvent::Finished);
    }

    #[test]
    fn test_pieces_conserved() {
        let seats = vec![
            Seat::new(1, Box::new(GreedyAI::new("g1", Some(1)))),
            Seat::new(2, Box::new(GreedyAI::new("g2", Some(2)))),
        ];
        let mut runner = MatchRunner::new(seats, 40);
        runner.run().unwrap();
        assert_eq!(runner.board().occupied_count(), 30);
        assert_eq!(runner.board().pieces_of(1).count(), 15);
        assert_eq!(runner.board().pieces_of(2).count(), 15);
    }

    #[test]
    fn test_off_list_move_falls_back() {
        let seats = vec![
            Seat::new(1, Box::new(Stubborn)),
            Seat::new(2, Box::new(Stubborn)),
        ];
        let mut runner = MatchRunner::new(seats, 4);
        let first = runner.game().get_valid_moves(1)[0];
        match runner.play_turn().unwrap() {
            TurnEvent::Moved(rec) => {
                assert!(rec.fallback);
                assert_eq!(rec.mv, first);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_stuck_player_is_skipped() {
        // Player 1 has no pieces on this board
        let mut board = Board::new();
        board.set(Hex::new(0, 0), 2).unwrap();
        let game = ChineseCheckers::from_board(board, 2);
        let mut runner = MatchRunner::with_game(game, random_seats(2), 2);

        assert_eq!(
            runner.play_turn().unwrap(),
            TurnEvent::Skipped { turn: 1, player: 1 }
        );
        assert!(matches!(runner.play_turn().unwrap(), TurnEvent::Moved(_)));
        assert_eq!(runner.outcome().skipped_turns, 1);
    }

    #[test]
    fn test_winner_stops_match() {
        struct Two;
        impl WinCheck for Two {
            fn winner(&self, _board: &Board) -> Option<PlayerId> {
                Some(2)
            }
        }
        let game = ChineseCheckers::with_win_check(2, Two);
        let mut runner = MatchRunner::with_game(game, random_seats(2), 50);
        let outcome = runner.run().unwrap();
        assert_eq!(outcome.winner, Some(2));
        assert_eq!(outcome.turns_played, 0);
    }
}
