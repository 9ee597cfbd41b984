//! Error types for coordinates and board operations

/// Malformed coordinate, direction, colour or variant text
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("unexpected position: {0}")]
    Position(String),

    #[error("unexpected direction: {0}")]
    Direction(String),

    #[error("unexpected color: {0}")]
    Color(String),

    #[error("unexpected board type: {0}")]
    Variant(String),
}

/// Board text grammar violations and invalid board operations
///
/// A failed operation leaves the board exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("unexpected board: {token}")]
    Parse { token: String },

    #[error("duplicate position: {0}")]
    DuplicatePosition(String),

    #[error("unexpected alias: {0}")]
    UnknownAlias(String),

    #[error("unexpected bug: {0}")]
    UnknownPiece(String),

    #[error("unexpected position: {0}")]
    UnknownPosition(String),

    #[error("unexpected move from: {0}")]
    EmptySource(String),

    #[error("{piece} cannot rest in pool {pool}")]
    ForeignPool { piece: String, pool: String },

    #[error("pool {pool} holds {available} bugs, {requested} requested")]
    PoolUnderflow {
        pool: String,
        requested: usize,
        available: usize,
    },
}
