//! The engine connects the rules, perft and search to a line-oriented text
//! protocol.
//!
//! [`Engine::run`] is the "main loop": it reads one command per line from
//! the input stream, executes it and writes the answer to the output. Bad
//! input (unknown commands, malformed FEN, illegal moves) is reported as an
//! `error: ...` line and the loop goes on; only I/O failures stop it.

use std::io::{BufRead, Write};

use itertools::Itertools;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess::core::Player;
use crate::chess::game::{Game, Status};
use crate::engine::command::Command;
use crate::search::Depth;

mod command;

/// Search depth used unless configured otherwise.
pub const DEFAULT_DEPTH: Depth = 2;

/// The Engine owns the game and handles commands, including I/O.
pub struct Engine<'a, R: BufRead, W: Write> {
    game: Game,
    /// The side the computer answers for after every accepted move.
    computer: Option<Player>,
    depth: Depth,
    rng: StdRng,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Engine<'a, R, W> {
    /// Creates a new instance of the engine with starting position and provided
    /// I/O. The computer does not play for either side.
    #[must_use]
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game: Game::new(),
            computer: None,
            depth: DEFAULT_DEPTH,
            rng: StdRng::from_entropy(),
            input,
            output,
        }
    }

    /// Starts from `game` instead of the standard position.
    #[must_use]
    pub fn with_game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    /// Lets the computer answer for `player`.
    #[must_use]
    pub fn with_computer(mut self, player: Option<Player>) -> Self {
        self.computer = player;
        self
    }

    /// Search depth of computer moves in plies.
    #[must_use]
    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    /// Makes the choice among equally good computer moves reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Continuously reads the input stream and executes commands until "quit"
    /// is sent or the input ends.
    ///
    /// If the computer plays the side to move already, it moves before the
    /// first command is read.
    ///
    /// # Errors
    ///
    /// Only reading and writing can fail.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.reply()?;
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            match Command::parse(&line) {
                Command::Empty => continue,
                Command::Quit => break,
                command => self.execute(command)?,
            }
            self.output.flush()?;
        }
        debug!("command loop finished: {}", self.game.status());
        Ok(())
    }

    fn execute(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Position { fen } => self.handle_position(fen)?,
            Command::Move(san) => match self.game.submit_move(&san) {
                Ok(status) => {
                    self.report(status)?;
                    self.reply()?;
                },
                Err(e) => writeln!(self.output, "error: {e}")?,
            },
            Command::Side(player) => {
                self.computer = player;
                self.reply()?;
            },
            Command::Go => self.computer_move()?,
            Command::SelfPlay { plies } => {
                for _ in 0..plies {
                    if self.game.status().is_over() {
                        break;
                    }
                    self.computer_move()?;
                }
            },
            Command::Perft { depth } => match self.game.perft(depth) {
                Ok(nodes) => writeln!(self.output, "{nodes}")?,
                Err(e) => writeln!(self.output, "error: {e}")?,
            },
            Command::Divide { depth } => self.handle_divide(depth)?,
            Command::Moves => {
                let moves = self.game.generate_legal_moves();
                writeln!(self.output, "{}", moves.iter().join(" "))?;
            },
            Command::Fen => writeln!(self.output, "{}", self.game.fen())?,
            Command::Display => writeln!(self.output, "{:?}", self.game)?,
            Command::Resign => match self.game.resign() {
                Ok(status) => writeln!(self.output, "{status}")?,
                Err(e) => writeln!(self.output, "error: {e}")?,
            },
            Command::Unknown(command) => writeln!(self.output, "error: unknown command: {command}")?,
            Command::Empty | Command::Quit => {},
        }
        Ok(())
    }

    fn handle_position(&mut self, fen: Option<String>) -> anyhow::Result<()> {
        match fen {
            None => self.game = Game::new(),
            Some(fen) => {
                if let Err(e) = self.game.load_position(&fen) {
                    writeln!(self.output, "error: {e}")?;
                    return Ok(());
                }
            },
        }
        info!("new position: {}", self.game.fen());
        writeln!(self.output, "{}", self.game.fen())?;
        if self.game.status().is_over() {
            writeln!(self.output, "{}", self.game.status())?;
        }
        self.reply()
    }

    fn handle_divide(&mut self, depth: Depth) -> anyhow::Result<()> {
        match self.game.divide(depth) {
            Ok(split) => {
                for (root, nodes) in &split {
                    writeln!(self.output, "{root}: {nodes}")?;
                }
                writeln!(self.output)?;
                writeln!(
                    self.output,
                    "total {}",
                    split.iter().map(|(_, nodes)| nodes).sum::<u64>()
                )?;
            },
            Err(e) => writeln!(self.output, "error: {e}")?,
        }
        Ok(())
    }

    /// Prints the last move in SAN and the final status once the game ends.
    fn report(&mut self, status: Status) -> anyhow::Result<()> {
        if let Some(record) = self.game.last_move() {
            writeln!(self.output, "{record}")?;
        }
        if status.is_over() {
            writeln!(self.output, "{status}")?;
        }
        Ok(())
    }

    fn computer_move(&mut self) -> anyhow::Result<()> {
        match self.game.computer_move(self.depth, &mut self.rng) {
            Ok(status) => self.report(status),
            Err(e) => {
                writeln!(self.output, "error: {e}")?;
                Ok(())
            },
        }
    }

    /// Plays for the computer when it is its turn.
    fn reply(&mut self) -> anyhow::Result<()> {
        if self.computer == Some(self.game.side_to_move()) && !self.game.status().is_over() {
            self.computer_move()?;
        }
        Ok(())
    }
}
