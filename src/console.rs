//! Line-oriented command console.
//!
//! Drives a single game over any reader/writer pair, using the request and
//! response framing of the Go Text Protocol: each command line may start with
//! a numeric id, and each response is `=[id] text` on success or
//! `?[id] text` on failure, followed by a blank line.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the console
//! - `clear_board` - Start a new game
//! - `play [color] <square>` - Play a move for the color to move
//! - `genmove` - Search for a move, play it, and return it
//! - `showboard` - Print the board with coordinates
//! - `legal_moves` - List legal moves for the color to move
//! - `stable` - List stable discs
//! - `score` - Current disc counts
//! - `to_move` - Color to move, or `none` when the game is over

use std::io::{self, BufRead, Write};

use crate::board::{Color, SquareSet};
use crate::constants::DEFAULT_SEARCH_DEPTH;
use crate::game::{Game, MoveProvider};
use crate::search::SearchPlayer;
use crate::stability::stable_discs;
use crate::topology::Square;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "genmove",
    "known_command",
    "legal_moves",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "stable",
    "to_move",
    "version",
];

/// Console state.
pub struct Console {
    game: Game,
    searcher: SearchPlayer,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_SEARCH_DEPTH)
    }

    /// A console whose `genmove` searches `depth` plies.
    pub fn with_depth(depth: u32) -> Self {
        Self {
            game: Game::new(),
            searcher: SearchPlayer::new(depth),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let (success, message) = self.execute(&command, &parts[1..]);

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "othello-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.game = Game::new();
                (true, String::new())
            }

            "play" => self.play(args),

            "genmove" => {
                let Some(color) = self.game.to_move() else {
                    return (false, "game is over".to_string());
                };
                match self.searcher.choose(color, self.game.board()) {
                    Ok(square) => match self.game.play(square) {
                        Ok(true) => (true, square.to_string()),
                        Ok(false) => (false, format!("search chose illegal move {square}")),
                        Err(err) => (false, err.to_string()),
                    },
                    Err(err) => (false, err.to_string()),
                }
            }

            "showboard" => (true, format!("\n{}", self.game.board().pretty())),

            "legal_moves" => (true, join_squares(self.game.legal_moves())),

            "stable" => (true, join_squares(stable_discs(self.game.board()))),

            "score" => {
                let outcome = self.game.outcome();
                (true, format!("black {} white {}", outcome.black, outcome.white))
            }

            "to_move" => {
                let text = match self.game.to_move() {
                    Some(Color::Black) => "black",
                    Some(Color::White) => "white",
                    None => "none",
                };
                (true, text.to_string())
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    /// `play <square>` or `play <color> <square>`.
    fn play(&mut self, args: &[&str]) -> (bool, String) {
        let (color_arg, vertex) = match args {
            [vertex] => (None, *vertex),
            [color, vertex] => (Some(*color), *vertex),
            _ => return (false, "expected: play [color] <square>".to_string()),
        };

        let Some(to_move) = self.game.to_move() else {
            return (false, "game is over".to_string());
        };
        if let Some(color) = color_arg {
            let color = match color.to_lowercase().as_str() {
                "b" | "black" => Color::Black,
                "w" | "white" => Color::White,
                _ => return (false, format!("invalid color: {color}")),
            };
            if color != to_move {
                return (false, format!("it is {to_move}'s turn"));
            }
        }

        let square: Square = match vertex.parse() {
            Ok(sq) => sq,
            Err(err) => return (false, err.to_string()),
        };
        match self.game.play(square) {
            Ok(true) => (true, String::new()),
            Ok(false) => (false, "illegal move".to_string()),
            Err(err) => (false, err.to_string()),
        }
    }
}

fn join_squares(set: SquareSet) -> String {
    set.iter()
        .map(|sq| sq.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
