//! Structured engine commands and their wire tokens

use std::fmt;
use std::str::FromStr;

use hive_core::Color;

use crate::error::ProtocolError;

/// A command for the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the engine's position: side to move plus full board text
    State { next: Color, board: String },
    /// Ask for the current position
    Print,
    /// Ask for the legal moves
    List,
    /// Play `<from><to>` (or `PASS`)
    Move(String),
    /// Let the engine pick and play a move
    Play,
    /// Recenter the engine's board
    Center,
}

/// First token of every command, which is how replies are routed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandName {
    State,
    Print,
    List,
    Move,
    Play,
    Center,
}

impl Command {
    pub fn name(&self) -> CommandName {
        match self {
            Command::State { .. } => CommandName::State,
            Command::Print => CommandName::Print,
            Command::List => CommandName::List,
            Command::Move(_) => CommandName::Move,
            Command::Play => CommandName::Play,
            Command::Center => CommandName::Center,
        }
    }

    /// Wire tokens; the line is these joined by single spaces
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.name().as_str().to_string()];
        match self {
            Command::State { next, board } => tokens.push(format!(":{} {}", next.letter(), board)),
            Command::Move(mv) => tokens.push(mv.clone()),
            Command::Print | Command::List | Command::Play | Command::Center => {}
        }
        tokens
    }
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::State => "state",
            CommandName::Print => "print",
            CommandName::List => "list",
            CommandName::Move => "move",
            CommandName::Play => "play",
            CommandName::Center => "center",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "state" => Ok(CommandName::State),
            "print" => Ok(CommandName::Print),
            "list" => Ok(CommandName::List),
            "move" => Ok(CommandName::Move),
            "play" => Ok(CommandName::Play),
            "center" => Ok(CommandName::Center),
            _ => Err(ProtocolError::UnknownCommand(s.to_string())),
        }
    }
}
