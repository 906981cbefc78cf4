//! Hex board geometry with axial coordinates
//!
//! The playing field is a star: a central hexagon of radius 4 plus six
//! wedge-shaped corners. The cell set is built procedurally from cube
//! directions and never changes after construction; only occupants do.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Radius of the central hexagon
pub const CENTER_RADIUS: i8 = 4;

/// Distance from the origin to each corner apex, along its cube direction
pub const APEX_DISTANCE: i8 = 7;

/// Rows in a corner wedge, counted from the apex inward
pub const WEDGE_ROWS: i8 = 5;

/// Number of corner wedges
pub const CORNER_COUNT: usize = 6;

/// Highest player id a board can hold
pub const MAX_PLAYERS: u8 = 6;

/// Occupant value of an empty cell
pub const EMPTY: Occupant = 0;

/// Cube direction vectors (x, y, z), used to build the corner wedges
pub const CUBE_DIRECTIONS: [(i8, i8, i8); 6] = [
    (1, -1, 0),
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
];

/// Axial direction vectors (dq, dr), in move enumeration order
pub const MOVE_DIRECTIONS: [(i8, i8); 6] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Cell contents: 0 = empty, 1..=6 = that player's piece
pub type Occupant = u8;

/// Player identifier (1..=6)
pub type PlayerId = u8;

// ============================================================================
// COORDINATES
// ============================================================================

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Convert cube (x, y, z) to axial, keeping x as q and z as r
    pub const fn from_cube(x: i8, _y: i8, z: i8) -> Self {
        Self { q: x, r: z }
    }

    /// Derived third cube coordinate
    pub const fn s(&self) -> i8 {
        -self.q - self.r
    }

    /// Hex shifted by (dq, dr)
    pub const fn offset(&self, dq: i8, dr: i8) -> Hex {
        Hex::new(self.q + dq, self.r + dr)
    }

    /// Get neighbor in direction (0-5, MOVE_DIRECTIONS order)
    pub fn neighbor(&self, direction: usize) -> Hex {
        let (dq, dr) = MOVE_DIRECTIONS[direction % 6];
        self.offset(dq, dr)
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i8 {
        (self.q.abs() + self.r.abs() + self.s().abs()) / 2
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i8 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        (dq + dr + ds) / 2
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<(i8, i8)> for Hex {
    fn from((q, r): (i8, i8)) -> Self {
        Hex::new(q, r)
    }
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// All cells of the central hexagon (61 cells)
pub fn central_region() -> Vec<Hex> {
    let mut cells = Vec::new();
    for x in -CENTER_RADIUS..=CENTER_RADIUS {
        for y in -CENTER_RADIUS..=CENTER_RADIUS {
            let z = -x - y;
            if x.abs().max(y.abs()).max(z.abs()) <= CENTER_RADIUS {
                cells.push(Hex::from_cube(x, y, z));
            }
        }
    }
    cells
}

/// Cells of corner wedge `corner` (0-5)
///
/// The apex sits `APEX_DISTANCE` steps out along `CUBE_DIRECTIONS[corner]`.
/// Row `i` walks back toward the center along that direction and spans
/// `WEDGE_ROWS - i` cells along the next direction clockwise. The innermost
/// row is a single point. Inner rows overlap the central hexagon.
pub fn corner_triangle(corner: usize) -> Vec<Hex> {
    let (dx, dy, dz) = CUBE_DIRECTIONS[corner % CORNER_COUNT];
    let (ex, ey, ez) = CUBE_DIRECTIONS[(corner + 1) % CORNER_COUNT];
    let apex = (dx * APEX_DISTANCE, dy * APEX_DISTANCE, dz * APEX_DISTANCE);

    let mut cells = Vec::new();
    for i in 0..WEDGE_ROWS {
        for j in 0..(WEDGE_ROWS - i) {
            if i == WEDGE_ROWS - 1 && j > 0 {
                continue;
            }
            let x = apex.0 - i * dx - j * ex;
            let y = apex.1 - i * dy - j * ey;
            let z = apex.2 - i * dz - j * ez;
            cells.push(Hex::from_cube(x, y, z));
        }
    }
    cells
}

/// Which corner each player starts in, as (player, corner) pairs
///
/// Two players take opposite corners and three take alternating ones. Every
/// other count (4 and 5 included) fills all six corners with players 1..=6.
pub fn corner_assignment(player_count: usize) -> Vec<(PlayerId, usize)> {
    match player_count {
        2 => vec![(1, 0), (2, 3)],
        3 => vec![(1, 0), (2, 2), (3, 4)],
        _ => (1..=MAX_PLAYERS).map(|pid| (pid, pid as usize - 1)).collect(),
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board: hex -> occupant over a fixed set of cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: FxHashMap<Hex, Occupant>,
}

impl Board {
    /// Empty board covering the full star
    pub fn new() -> Self {
        let mut cells = FxHashMap::default();
        for hex in central_region() {
            cells.insert(hex, EMPTY);
        }
        for corner in 0..CORNER_COUNT {
            for hex in corner_triangle(corner) {
                cells.insert(hex, EMPTY);
            }
        }
        Self { cells }
    }

    /// Board with starting pieces for `player_count` players
    pub fn with_players(player_count: usize) -> Self {
        let mut board = Self::new();
        for (pid, corner) in corner_assignment(player_count) {
            for hex in corner_triangle(corner) {
                board.cells.insert(hex, pid);
            }
        }
        board
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if hex is a board cell
    pub fn contains(&self, hex: Hex) -> bool {
        self.cells.contains_key(&hex)
    }

    /// Occupant at hex, None off the board
    pub fn get(&self, hex: Hex) -> Option<Occupant> {
        self.cells.get(&hex).copied()
    }

    /// Occupant at hex, failing off the board
    pub fn occupant(&self, hex: Hex) -> Result<Occupant, EngineError> {
        self.get(hex).ok_or(EngineError::UnknownCell(hex))
    }

    /// True if hex is a board cell with no piece on it
    pub fn is_vacant(&self, hex: Hex) -> bool {
        self.get(hex) == Some(EMPTY)
    }

    /// True if hex is a board cell holding any piece
    pub fn is_occupied(&self, hex: Hex) -> bool {
        matches!(self.get(hex), Some(occ) if occ != EMPTY)
    }

    /// Replace the occupant of an existing cell, returning the previous one
    pub fn set(&mut self, hex: Hex, occupant: Occupant) -> Result<Occupant, EngineError> {
        if occupant > MAX_PLAYERS {
            return Err(EngineError::InvalidOccupant(occupant));
        }
        let slot = self
            .cells
            .get_mut(&hex)
            .ok_or(EngineError::UnknownCell(hex))?;
        Ok(std::mem::replace(slot, occupant))
    }

    /// Iterate cells with their occupants (map order)
    pub fn cells(&self) -> impl Iterator<Item = (Hex, Occupant)> + '_ {
        self.cells.iter().map(|(&hex, &occ)| (hex, occ))
    }

    /// Cells sorted by (r, q), for stable output
    pub fn sorted_cells(&self) -> Vec<(Hex, Occupant)> {
        let mut cells: Vec<_> = self.cells().collect();
        cells.sort_by_key(|(hex, _)| (hex.r, hex.q));
        cells
    }

    /// Positions of a player's pieces
    pub fn pieces_of(&self, player: PlayerId) -> impl Iterator<Item = Hex> + '_ {
        self.cells
            .iter()
            .filter(move |&(_, &occ)| occ == player)
            .map(|(&hex, _)| hex)
    }

    /// Count of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.values().filter(|&&occ| occ != EMPTY).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
