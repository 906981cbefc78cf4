//! Text rendering of a board
//!
//! Rows run along r; within a row a cell sits at column 2q + r so that
//! neighboring rows interleave like a hex lattice.

use crate::board::{Board, Hex, Occupant, EMPTY};

fn cell_char(occ: Occupant) -> char {
    if occ == EMPTY {
        '.'
    } else {
        char::from_digit(occ as u32, 10).unwrap_or('?')
    }
}

fn column(hex: Hex) -> i32 {
    2 * hex.q as i32 + hex.r as i32
}

/// Render the board as ASCII art
pub fn render_board(board: &Board) -> String {
    render(board, false)
}

/// Render with an `r=` label in front of each row
pub fn render_board_with_coords(board: &Board) -> String {
    render(board, true)
}

fn render(board: &Board, labels: bool) -> String {
    let cells = board.sorted_cells();
    let min_col = match cells.iter().map(|&(hex, _)| column(hex)).min() {
        Some(c) => c,
        None => return String::new(),
    };

    let mut out = String::new();
    let mut idx = 0;
    while idx < cells.len() {
        let r = cells[idx].0.r;
        let mut line = String::new();
        let mut col = min_col;
        while idx < cells.len() && cells[idx].0.r == r {
            let (hex, occ) = cells[idx];
            let target = column(hex);
            while col < target {
                line.push(' ');
                col += 1;
            }
            line.push(cell_char(occ));
            col += 1;
            idx += 1;
        }
        if labels {
            out.push_str(&format!("r={:>3} ", r));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_counts_cells() {
        let board = Board::with_players(3);
        let text = render_board(&board);
        let dots = text.chars().filter(|&c| c == '.').count();
        let pieces = text.chars().filter(|c| c.is_ascii_digit()).count();
        assert_eq!(dots + pieces, board.len());
        assert_eq!(pieces, board.occupied_count());
    }

    #[test]
    fn test_render_one_line_per_row() {
        let board = Board::new();
        let rows: std::collections::HashSet<i8> = board.cells().map(|(h, _)| h.r).collect();
        assert_eq!(render_board(&board).lines().count(), rows.len());
    }

    #[test]
    fn test_render_labels() {
        let text = render_board_with_coords(&Board::new());
        assert!(text.lines().all(|l| l.starts_with("r=")));
    }

    #[test]
    fn test_render_does_not_mutate() {
        let board = Board::with_players(2);
        let before = board.clone();
        let _ = render_board(&board);
        assert_eq!(board, before);
    }
}
