use tokio::sync::mpsc;
use crate::log_debug;
use super::codec::encode_message;
use super::message::ProtocolMessage;

/// Outbound half of the peer transport. Delivery, ordering and discovery
/// belong to the implementation; the session only hands messages over.
pub trait SessionTransport {
    fn send(&mut self, message: ProtocolMessage);
}

/// Transport for sessions that never talk to a peer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTransport;

impl SessionTransport for NoTransport {
    fn send(&mut self, message: ProtocolMessage) {
        log_debug!("No transport attached, dropping {}", message.kind());
    }
}

/// Encodes each message and pushes the bytes into a channel that the
/// surrounding shell drains onto its real connection.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl ChannelTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl SessionTransport for ChannelTransport {
    fn send(&mut self, message: ProtocolMessage) {
        if self.tx.send(encode_message(&message)).is_err() {
            log_debug!("Transport channel closed, dropping {}", message.kind());
        }
    }
}
