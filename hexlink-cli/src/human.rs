//! Interactive player reading moves from a terminal

use std::io::{self, BufRead, Read, Write};

use hexlink_core::{Board, Controller, HexError, Move, Player};

/// Human player: prompts on `output`, reads `row,col` lines from `input`
pub struct HumanPlayer<R, W> {
    player: Player,
    input: R,
    output: W,
}

/// Stdin reader that holds the stdin lock only while pulling in one line.
///
/// Several terminal players can each own one without blocking each other.
pub struct TerminalInput {
    stdin: io::Stdin,
    line: Vec<u8>,
    pos: usize,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            line: Vec::new(),
            pos: 0,
        }
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for TerminalInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for TerminalInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            self.stdin.lock().read_until(b'\n', &mut self.line)?;
        }
        Ok(&self.line[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.line.len());
    }
}

impl HumanPlayer<TerminalInput, io::Stdout> {
    /// Human at the process terminal
    pub fn stdio(player: Player) -> Self {
        Self::new(player, TerminalInput::new(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(player: Player, input: R, output: W) -> Self {
        Self {
            player,
            input,
            output,
        }
    }

    fn read_line(&mut self) -> Result<String, HexError> {
        write!(
            self.output,
            "Player {} - enter your move (row,col): ",
            self.player.id()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(HexError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before a move was entered",
            )));
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Controller for HumanPlayer<R, W> {
    fn player(&self) -> Player {
        self.player
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn choose_move(&mut self, board: &Board) -> Result<Move, HexError> {
        loop {
            let line = self.read_line()?;
            match line.parse::<Move>() {
                Ok(mv) if board.possible_moves().contains(&mv) => return Ok(mv),
                Ok(_) => writeln!(self.output, "Invalid move. Try again.")?,
                Err(_) => writeln!(self.output, "Bad format. Use: row,col (e.g. 1,2)")?,
            }
        }
    }
}
