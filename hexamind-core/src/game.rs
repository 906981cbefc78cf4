//! Game state and move generation

use serde::{Deserialize, Serialize};

use crate::board::{Board, Hex, PlayerId, EMPTY, MOVE_DIRECTIONS};
use crate::error::EngineError;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A candidate move: piece at `start` goes to `end`
///
/// Moves are plain values. Any move generated before the board changes may
/// no longer be legal afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub start: Hex,
    pub end: Hex,
}

/// Shape of a generated move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    Step,
    Jump,
}

impl Move {
    pub const fn new(start: Hex, end: Hex) -> Self {
        Self { start, end }
    }

    /// Step for adjacent targets, Jump for anything else
    ///
    /// Generated moves span one or two cells. A zero-length move counts as
    /// a Jump since it is not a step to a neighbor.
    pub fn kind(&self) -> MoveKind {
        if self.start.distance_to(self.end) == 1 {
            MoveKind::Step
        } else {
            MoveKind::Jump
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

// ============================================================================
// WIN CHECK
// ============================================================================

/// Strategy deciding whether someone has won
pub trait WinCheck {
    fn winner(&self, board: &Board) -> Option<PlayerId>;
}

/// Never reports a winner
///
/// This is the shipped rule set: games only end on the turn limit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoWinner;

impl WinCheck for NoWinner {
    fn winner(&self, _board: &Board) -> Option<PlayerId> {
        None
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Chinese Checkers board engine
///
/// Owns one board for the life of a game. Callers share it by reference;
/// it is not meant for concurrent access.
#[derive(Clone, Debug)]
pub struct ChineseCheckers<W: WinCheck = NoWinner> {
    player_count: usize,
    board: Board,
    win_check: W,
}

impl ChineseCheckers<NoWinner> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// New game for `player_count` players
    pub fn new(player_count: usize) -> Self {
        Self::with_win_check(player_count, NoWinner)
    }

    /// Engine over a prepared board
    pub fn from_board(board: Board, player_count: usize) -> Self {
        Self {
            player_count,
            board,
            win_check: NoWinner,
        }
    }
}

impl<W: WinCheck> ChineseCheckers<W> {
    /// New game with a custom win-check strategy
    pub fn with_win_check(player_count: usize, win_check: W) -> Self {
        Self {
            player_count,
            board: Board::with_players(player_count),
            win_check,
        }
    }

    /// Put every piece back in its starting corner
    pub fn reset(&mut self) {
        self.board = Board::with_players(self.player_count);
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Read-only board view
    pub fn board(&self) -> &Board {
        &self.board
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// All moves available to `player`
    ///
    /// Per piece: steps to empty neighbors, then single jumps over any piece
    /// onto an empty cell. Jumps do not chain.
    pub fn get_valid_moves(&self, player: PlayerId) -> Vec<Move> {
        let mut moves = Vec::new();
        if player == EMPTY {
            return moves;
        }
        for pos in self.board.pieces_of(player) {
            self.generate_step_moves(pos, &mut moves);
            self.generate_jump_moves(pos, &mut moves);
        }
        moves
    }

    fn generate_step_moves(&self, pos: Hex, moves: &mut Vec<Move>) {
        for &(dq, dr) in &MOVE_DIRECTIONS {
            let target = pos.offset(dq, dr);
            if self.board.is_vacant(target) {
                moves.push(Move::new(pos, target));
            }
        }
    }

    fn generate_jump_moves(&self, pos: Hex, moves: &mut Vec<Move>) {
        for &(dq, dr) in &MOVE_DIRECTIONS {
            let over = pos.offset(dq, dr);
            let landing = pos.offset(2 * dq, 2 * dr);
            if self.board.is_occupied(over) && self.board.is_vacant(landing) {
                moves.push(Move::new(pos, landing));
            }
        }
    }

    // ========================================================================
    // MOVE APPLICATION
    // ========================================================================

    /// Move the piece at `start` to `end`
    ///
    /// Returns `Ok(false)` without touching the board when `start` is empty.
    /// Only that is checked: distance and occupancy of `end` are the
    /// caller's business. Off-board coordinates are an error.
    pub fn apply_move(&mut self, start: Hex, end: Hex) -> Result<bool, EngineError> {
        let piece = self.board.occupant(start)?;
        if !self.board.contains(end) {
            return Err(EngineError::UnknownCell(end));
        }
        if piece == EMPTY {
            return Ok(false);
        }
        self.board.set(start, EMPTY)?;
        self.board.set(end, piece)?;
        Ok(true)
    }

    /// Apply a generated move
    pub fn apply(&mut self, mv: Move) -> Result<bool, EngineError> {
        self.apply_move(mv.start, mv.end)
    }

    // ========================================================================
    // RESULT
    // ========================================================================

    /// Winning player, if the win-check strategy reports one
    pub fn check_winner(&self) -> Option<PlayerId> {
        self.win_check.winner(&self.board)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{central_region, corner_triangle, CORNER_COUNT};
    use std::collections::HashSet;

    fn lone_piece(at: Hex, player: PlayerId) -> ChineseCheckers {
        let mut board = Board::new();
        board.set(at, player).unwrap();
        ChineseCheckers::from_board(board, 2)
    }

    #[test]
    fn test_game_creation() {
        for n in [2, 3, 4, 6] {
            let game = ChineseCheckers::new(n);
            assert_eq!(game.player_count(), n);
            assert_eq!(game.board().len(), 133);
        }
    }

    #[test]
    fn test_piece_counts() {
        assert_eq!(ChineseCheckers::new(2).board().occupied_count(), 30);
        assert_eq!(ChineseCheckers::new(3).board().occupied_count(), 45);
        assert_eq!(ChineseCheckers::new(4).board().occupied_count(), 90);
        assert_eq!(ChineseCheckers::new(6).board().occupied_count(), 90);
    }

    #[test]
    fn test_center_empty_outside_wedges() {
        let wedges: HashSet<Hex> = (0..CORNER_COUNT).flat_map(corner_triangle).collect();
        for n in [2, 3, 4, 6] {
            let game = ChineseCheckers::new(n);
            for hex in central_region() {
                if !wedges.contains(&hex) {
                    assert_eq!(game.board().get(hex), Some(EMPTY));
                }
            }
        }
    }

    #[test]
    fn test_lone_piece_steps_only() {
        let game = lone_piece(Hex::new(0, 0), 1);
        let moves = game.get_valid_moves(1);
        assert_eq!(moves.len(), 6);
        assert!(moves.iter().all(|m| m.kind() == MoveKind::Step));
        // Direction order is fixed
        assert_eq!(moves[0].end, Hex::new(1, 0));
        assert_eq!(moves[5].end, Hex::new(0, 1));
    }

    #[test]
    fn test_apex_piece_has_two_steps() {
        // Corner apex touches only two cells of the board
        let game = lone_piece(Hex::new(7, -7), 1);
        let moves = game.get_valid_moves(1);
        assert_eq!(
            moves,
            vec![
                Move::new(Hex::new(7, -7), Hex::new(6, -6)),
                Move::new(Hex::new(7, -7), Hex::new(7, -6)),
            ]
        );
        assert!(moves.iter().all(|m| m.kind() == MoveKind::Step));
    }

    #[test]
    fn test_move_kind() {
        let origin = Hex::new(0, 0);
        assert_eq!(Move::new(origin, Hex::new(1, 0)).kind(), MoveKind::Step);
        assert_eq!(Move::new(origin, Hex::new(2, 0)).kind(), MoveKind::Jump);
        assert_eq!(Move::new(origin, origin).kind(), MoveKind::Jump);
    }

    #[test]
    fn test_jump_over_any_piece() {
        let mut board = Board::new();
        board.set(Hex::new(0, 0), 1).unwrap();
        board.set(Hex::new(1, 0), 2).unwrap();
        board.set(Hex::new(0, -1), 1).unwrap();
        let game = ChineseCheckers::from_board(board, 2);

        let from_origin: Vec<Move> = game
            .get_valid_moves(1)
            .into_iter()
            .filter(|m| m.start == Hex::new(0, 0))
            .collect();

        // 4 free neighbors, then jumps over the foe and the friend
        assert_eq!(from_origin.len(), 6);
        assert_eq!(
            &from_origin[4..],
            &[
                Move::new(Hex::new(0, 0), Hex::new(2, 0)),
                Move::new(Hex::new(0, 0), Hex::new(0, -2)),
            ]
        );
    }

    #[test]
    fn test_no_chained_jumps() {
        // 1 at origin, pieces at (1,0) and (3,0): (2,0) reachable, (4,0) not
        let mut board = Board::new();
        board.set(Hex::new(0, 0), 1).unwrap();
        board.set(Hex::new(1, 0), 2).unwrap();
        board.set(Hex::new(3, 0), 2).unwrap();
        let game = ChineseCheckers::from_board(board, 2);
        let ends: HashSet<Hex> = game.get_valid_moves(1).iter().map(|m| m.end).collect();
        assert!(ends.contains(&Hex::new(2, 0)));
        assert!(!ends.contains(&Hex::new(4, 0)));
    }

    #[test]
    fn test_initial_two_player_moves() {
        let game = ChineseCheckers::new(2);
        assert_eq!(game.get_valid_moves(1).len(), 14);
        assert_eq!(game.get_valid_moves(2).len(), 14);
        assert!(game.get_valid_moves(3).is_empty());
    }

    #[test]
    fn test_boxed_in_player_has_no_moves() {
        let mut board = Board::new();
        let center = Hex::new(0, 0);
        board.set(center, 1).unwrap();
        for dir in 0..6 {
            board.set(center.neighbor(dir), 2).unwrap();
            let (dq, dr) = MOVE_DIRECTIONS[dir];
            board.set(center.offset(2 * dq, 2 * dr), 2).unwrap();
        }
        let game = ChineseCheckers::from_board(board, 2);
        assert!(game.get_valid_moves(1).is_empty());
    }

    #[test]
    fn test_apply_move() {
        let mut game = ChineseCheckers::new(2);
        let before = game.board().clone();
        let mv = game.get_valid_moves(1)[0];

        assert_eq!(game.apply(mv), Ok(true));
        assert_eq!(game.board().get(mv.end), Some(1));
        assert_eq!(game.board().get(mv.start), Some(EMPTY));
        assert_eq!(game.board().occupied_count(), before.occupied_count());

        let changed = game
            .board()
            .cells()
            .filter(|&(hex, occ)| before.get(hex) != Some(occ))
            .count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_apply_from_empty_fails() {
        let mut game = ChineseCheckers::new(2);
        let before = game.board().clone();
        assert_eq!(game.apply_move(Hex::new(0, 0), Hex::new(1, 0)), Ok(false));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_apply_off_board() {
        let mut game = ChineseCheckers::new(2);
        let before = game.board().clone();
        let off = Hex::new(9, 9);
        assert_eq!(
            game.apply_move(off, Hex::new(0, 0)),
            Err(EngineError::UnknownCell(off))
        );
        assert_eq!(
            game.apply_move(Hex::new(7, 0), off),
            Err(EngineError::UnknownCell(off))
        );
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_apply_does_not_check_legality() {
        // Far, non-adjacent destination is accepted
        let mut game = ChineseCheckers::new(2);
        assert_eq!(game.apply_move(Hex::new(7, 0), Hex::new(0, 0)), Ok(true));
        assert_eq!(game.board().get(Hex::new(0, 0)), Some(1));
    }

    #[test]
    fn test_round_trip() {
        let mut game = ChineseCheckers::new(3);
        let before = game.board().clone();
        let mv = game.get_valid_moves(2)[0];
        assert_eq!(game.apply(mv), Ok(true));
        assert_eq!(game.apply_move(mv.end, mv.start), Ok(true));
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_reset() {
        let mut game = ChineseCheckers::new(2);
        let mv = game.get_valid_moves(1)[0];
        game.apply(mv).unwrap();
        game.reset();
        assert_eq!(game.board(), &Board::with_players(2));
    }

    #[test]
    fn test_no_winner() {
        let mut board = Board::new();
        // All of player 1's pieces in the opposite corner
        for hex in corner_triangle(3) {
            board.set(hex, 1).unwrap();
        }
        let game = ChineseCheckers::from_board(board, 2);
        assert_eq!(game.check_winner(), None);
        assert_eq!(ChineseCheckers::new(6).check_winner(), None);
    }

    #[test]
    fn test_custom_win_check() {
        struct FirstPlayerAlwaysWins;
        impl WinCheck for FirstPlayerAlwaysWins {
            fn winner(&self, _board: &Board) -> Option<PlayerId> {
                Some(1)
            }
        }
        let game = ChineseCheckers::with_win_check(2, FirstPlayerAlwaysWins);
        assert_eq!(game.check_winner(), Some(1));
    }
}
