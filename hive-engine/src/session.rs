//! Sans-IO engine session
//!
//! The engine speaks a line protocol: each command is one line, each reply
//! is zero or more payload lines closed by `OK` or by a line starting with
//! `ERROR`. The session keeps at most one command outstanding, queues the
//! rest, and routes each closed reply to the handler for the command that
//! produced it. Bytes in and out go through [`EngineSession::receive`] and
//! the [`Transport`], so the same session drives a socket or a test double.

use std::collections::VecDeque;

use hive_core::{AxialPosition, BoardState, Color};
use tracing::{debug, warn};

use crate::command::{Command, CommandName};
use crate::error::{ProtocolError, SessionError};
use crate::transport::Transport;

/// Whether a command is awaiting its reply
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

/// What a closed reply (or a failure) did to the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A command without a payload handler completed
    Acknowledged(CommandName),
    /// `print` replaced the board
    BoardUpdated { next: Color },
    /// `list` replaced the legal moves
    MovesUpdated(usize),
    Failed(SessionError),
}

pub struct EngineSession<T: Transport> {
    transport: T,
    board: BoardState,
    next_to_move: Color,
    legal_moves: Vec<String>,
    outgoing: VecDeque<Vec<String>>,
    sent: VecDeque<String>,
    incoming: Vec<String>,
}

impl<T: Transport> EngineSession<T> {
    pub fn new(transport: T, board: BoardState) -> Self {
        Self {
            transport,
            board,
            next_to_move: Color::White,
            legal_moves: Vec::new(),
            outgoing: VecDeque::new(),
            sent: VecDeque::new(),
            incoming: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn state(&self) -> SessionState {
        if self.sent.is_empty() {
            SessionState::Idle
        } else {
            SessionState::AwaitingReply
        }
    }

    /// Idle with nothing queued
    pub fn is_settled(&self) -> bool {
        self.sent.is_empty() && self.outgoing.is_empty()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Local edits; pushed to the engine by the next [`start`](Self::start)
    pub fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }

    pub fn next_to_move(&self) -> Color {
        self.next_to_move
    }

    pub fn set_next_to_move(&mut self, color: Color) {
        self.next_to_move = color;
    }

    pub fn legal_moves(&self) -> &[String] {
        &self.legal_moves
    }

    /// Name of the command awaiting a reply
    pub fn outstanding(&self) -> Option<&str> {
        self.sent.front().map(String::as_str)
    }

    /// Commands queued behind the outstanding one
    pub fn queued(&self) -> usize {
        self.outgoing.len()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ========================================================================
    // OUTBOUND
    // ========================================================================

    pub fn enqueue(&mut self, command: Command) {
        self.outgoing.push_back(command.tokens());
    }

    /// Send the next queued command if nothing is outstanding
    ///
    /// A failed send drops the connection state.
    pub fn pump(&mut self) -> Result<(), SessionError> {
        if !self.sent.is_empty() {
            return Ok(());
        }
        let Some(tokens) = self.outgoing.pop_front() else {
            return Ok(());
        };
        let line = format!("{}\n", tokens.join(" "));
        debug!(line = line.trim_end(), "engine <=");
        if let Err(e) = self.transport.send(&line) {
            warn!(error = %e, "engine send failed");
            self.disconnect();
            return Err(e.into());
        }
        self.sent.push_back(tokens[0].clone());
        Ok(())
    }

    /// Push the local position to the engine and catch up
    ///
    /// When `ai` is the side to move the engine plays first.
    pub fn start(&mut self, next: Color, ai: Option<Color>) -> Result<(), SessionError> {
        self.next_to_move = next;
        self.outgoing.clear();
        self.legal_moves.clear();
        self.enqueue(Command::State {
            next: self.next_to_move,
            board: self.board.text(true),
        });
        if ai == Some(self.next_to_move) {
            self.enqueue(Command::Play);
        }
        self.enqueue(Command::Print);
        self.enqueue(Command::List);
        self.pump()
    }

    /// Ask the engine to recenter and send back its board
    pub fn center(&mut self) -> Result<(), SessionError> {
        self.enqueue(Command::Center);
        self.enqueue(Command::Print);
        self.pump()
    }

    /// Play `from` -> `to` if the engine listed it, then let the engine reply
    ///
    /// An unlisted move sends nothing.
    pub fn request_move(&mut self, from: &str, to: &str) -> Result<(), SessionError> {
        let mv = format!("{from}{to}");
        if !self.legal_moves.iter().any(|m| *m == mv) {
            return Err(SessionError::IllegalMove(mv));
        }
        self.legal_moves.clear();
        self.enqueue(Command::Move(mv));
        self.enqueue(Command::Play);
        self.enqueue(Command::Print);
        self.enqueue(Command::List);
        self.pump()
    }

    /// Pass the turn, when the engine lists passing as legal
    pub fn pass(&mut self) -> Result<(), SessionError> {
        self.request_move("PASS", "")
    }

    /// Forget everything in flight
    pub fn disconnect(&mut self) {
        self.outgoing.clear();
        self.sent.clear();
        self.incoming.clear();
        self.legal_moves.clear();
    }

    // ========================================================================
    // INBOUND
    // ========================================================================

    /// Feed received text; any number of complete lines
    pub fn receive(&mut self, text: &str) -> Vec<Event> {
        let mut events = Vec::new();
        for raw in text.split('\n') {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            if let Some(event) = self.receive_line(line) {
                events.push(event);
            }
        }
        if let Err(e) = self.pump() {
            events.push(Event::Failed(e));
        }
        events
    }

    fn receive_line(&mut self, line: &str) -> Option<Event> {
        if line.is_empty() {
            return None;
        }
        debug!(line, "engine =>");
        if line == "OK" {
            let Some(command) = self.sent.pop_front() else {
                return Some(self.unsolicited(line));
            };
            let payload = std::mem::take(&mut self.incoming);
            let event = match self.dispatch(&command, payload) {
                Ok(event) => event,
                Err(e) => {
                    warn!(command = %command, error = %e, "engine reply rejected");
                    Event::Failed(e.into())
                }
            };
            Some(event)
        } else if line.starts_with("ERROR") {
            let Some(command) = self.sent.pop_front() else {
                return Some(self.unsolicited(line));
            };
            self.incoming.clear();
            warn!("{} => {}", command, line);
            Some(Event::Failed(SessionError::Engine {
                command,
                message: line.to_string(),
            }))
        } else if self.sent.is_empty() {
            Some(self.unsolicited(line))
        } else {
            self.incoming.push(line.to_string());
            None
        }
    }

    fn unsolicited(&self, line: &str) -> Event {
        warn!(line, "unsolicited engine line");
        Event::Failed(ProtocolError::Unsolicited(line.to_string()).into())
    }

    fn dispatch(&mut self, command: &str, payload: Vec<String>) -> Result<Event, ProtocolError> {
        match command.parse::<CommandName>()? {
            CommandName::Print => self.on_print(&payload),
            CommandName::List => {
                self.legal_moves = payload;
                Ok(Event::MovesUpdated(self.legal_moves.len()))
            }
            name => Ok(Event::Acknowledged(name)),
        }
    }

    /// `:<w|b>[<position>] <board>`; the board is committed only if it parses
    fn on_print(&mut self, payload: &[String]) -> Result<Event, ProtocolError> {
        let line = payload
            .first()
            .ok_or_else(|| ProtocolError::MissingPayload(CommandName::Print.to_string()))?;
        let (next, rest) = if let Some(rest) = line.strip_prefix(":w") {
            (Color::White, rest)
        } else if let Some(rest) = line.strip_prefix(":b") {
            (Color::Black, rest)
        } else {
            return Err(ProtocolError::BadMarker(line.clone()));
        };
        let (head, body) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        if !head.is_empty() && head.parse::<AxialPosition>().is_err() {
            return Err(ProtocolError::BadMarker(line.clone()));
        }
        self.board.parse(body)?;
        self.next_to_move = next;
        Ok(Event::BoardUpdated { next })
    }
}
