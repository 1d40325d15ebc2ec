mod codec;
mod message;
mod transport;

pub use codec::{PROTOCOL_VERSION, ProtocolError, decode_message, encode_message};
pub use message::{ProtocolMessage, SyncState};
pub use transport::{ChannelTransport, NoTransport, SessionTransport};
