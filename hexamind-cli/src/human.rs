//! Human move source reading choices from a terminal

use std::io::{self, BufRead, Write};

use hexamind_core::{Board, Move, MoveSource, PlayerId};

/// Line-oriented input
///
/// Stdin takes its lock per line so several human seats can share it.
pub trait LineInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineInput for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// Prompts for a move index on each turn
pub struct HumanPlayer<R: LineInput, W: Write> {
    name: String,
    input: R,
    output: W,
}

impl<R: LineInput, W: Write> HumanPlayer<R, W> {
    pub fn new(name: impl Into<String>, input: R, output: W) -> Self {
        Self {
            name: name.into(),
            input,
            output,
        }
    }

    fn prompt(&mut self, moves: &[Move]) -> std::io::Result<Option<Move>> {
        for (i, mv) in moves.iter().enumerate() {
            writeln!(self.output, "{:>3}: {}", i, mv)?;
        }
        loop {
            write!(self.output, "{} - choose a move [0-{}] > ", self.name, moves.len() - 1)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match parse_choice(&line, moves.len()) {
                Some(idx) => return Ok(Some(moves[idx])),
                None => writeln!(self.output, "Invalid choice: {}", line.trim())?,
            }
        }
    }
}

/// First integer in the line, if it indexes a move
fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let digits: String = line
        .trim()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<usize>().ok().filter(|&idx| idx < count)
}

impl<R: LineInput, W: Write> MoveSource for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        true
    }

    fn choose_move(&mut self, _board: &Board, _player: PlayerId, moves: &[Move]) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }
        match self.prompt(moves) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!("Input error for {}: {}", self.name, e);
                None
            }
        }
    }
}
