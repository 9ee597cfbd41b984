//! Outbound side of the engine link

use tokio::sync::mpsc;

use crate::error::TransportError;

/// Something that can carry one framed line to the engine
pub trait Transport {
    /// Send a complete line, terminator included
    fn send(&mut self, line: &str) -> Result<(), TransportError>;
}

/// Hands lines to an async writer task
#[derive(Clone, Debug)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    pub fn new(tx: mpsc::UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, line: &str) -> Result<(), TransportError> {
        self.tx
            .send(line.to_string())
            .map_err(|_| TransportError::Closed)
    }
}
