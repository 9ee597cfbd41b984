//! TCP link to an engine line server
//!
//! Reads are line framed and fed to the session one line at a time.
//! Writes go through a channel to a writer task, so the session never
//! blocks on the socket.

use hive_core::BoardState;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::session::{EngineSession, Event};
use crate::transport::ChannelTransport;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out connecting to engine at {0}")]
    Timeout(String),

    #[error("engine closed the connection")]
    Closed,
}

pub struct EngineConnection {
    session: EngineSession<ChannelTransport>,
    lines: Lines<BufReader<OwnedReadHalf>>,
    writer: JoinHandle<()>,
}

impl EngineConnection {
    pub async fn connect(config: &EngineConfig, board: BoardState) -> Result<Self, ConnectionError> {
        let stream = tokio::time::timeout(config.connect_timeout(), TcpStream::connect(config.address.as_str()))
            .await
            .map_err(|_| ConnectionError::Timeout(config.address.clone()))??;
        stream.set_nodelay(true)?;
        info!(address = %config.address, "connected to engine");

        let (read, write) = stream.into_split();
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(write_lines(write, rx));
        Ok(Self {
            session: EngineSession::new(ChannelTransport::new(tx), board),
            lines: BufReader::new(read).lines(),
            writer,
        })
    }

    pub fn session(&self) -> &EngineSession<ChannelTransport> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EngineSession<ChannelTransport> {
        &mut self.session
    }

    /// Wait for one line from the engine; `None` once it hangs up
    ///
    /// Cancel safe, so it can sit in a `select!` next to user input.
    pub async fn next_events(&mut self) -> Result<Option<Vec<Event>>, ConnectionError> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(Some(self.session.receive(&line))),
            Ok(None) => {
                info!("engine hung up");
                self.session.disconnect();
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "engine read failed");
                self.session.disconnect();
                Err(e.into())
            }
        }
    }

    /// Process replies until nothing is outstanding or queued
    pub async fn settle(&mut self) -> Result<Vec<Event>, ConnectionError> {
        let mut events = Vec::new();
        while !self.session.is_settled() {
            match self.next_events().await? {
                Some(batch) => events.extend(batch),
                None => return Err(ConnectionError::Closed),
            }
        }
        Ok(events)
    }
}

impl Drop for EngineConnection {
    fn drop(&mut self) {
        self.writer.abort();
    }
}

async fn write_lines(mut write: OwnedWriteHalf, mut rx: mpsc::UnboundedReceiver<String>) {
    while let Some(line) = rx.recv().await {
        if let Err(e) = write.write_all(line.as_bytes()).await {
            warn!(error = %e, "engine write failed");
            break;
        }
    }
}
