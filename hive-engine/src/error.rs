//! Engine session errors

use hive_core::BoardError;

/// The engine said something this client does not understand
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("unexpected command: {0}")]
    UnknownCommand(String),

    #[error("unexpected state: {0}")]
    BadMarker(String),

    #[error("{0} reply has no payload")]
    MissingPayload(String),

    #[error("unsolicited line from engine: {0}")]
    Unsolicited(String),

    #[error("engine sent an unreadable board: {0}")]
    Board(#[from] BoardError),
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("engine connection closed")]
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// An `ERROR` line in reply to `command`
    #[error("{command} => {message}")]
    Engine { command: String, message: String },

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The move is not in the engine's current legal-move list
    #[error("illegal move: {0}")]
    IllegalMove(String),
}
