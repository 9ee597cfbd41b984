//! Hive engine client
//!
//! Drives an external engine over its line protocol: one command out at a
//! time, replies routed back by command name.

pub mod command;
pub mod config;
pub mod connection;
pub mod error;
pub mod session;
pub mod transport;

pub use command::{Command, CommandName};
pub use config::EngineConfig;
pub use connection::{ConnectionError, EngineConnection};
pub use error::{ProtocolError, SessionError, TransportError};
pub use session::{EngineSession, Event, SessionState};
pub use transport::{ChannelTransport, Transport};
