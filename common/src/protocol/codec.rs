use std::fmt;
use prost::Message;
use crate::proto::PeerMessage;
use super::message::ProtocolMessage;

pub const PROTOCOL_VERSION: u8 = 1;

#[derive(Debug)]
pub enum ProtocolError {
    EmptyPayload,
    UnsupportedVersion { found: u8, expected: u8 },
    Decode(prost::DecodeError),
    MissingPayload,
    InvalidPlayer(u32),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::EmptyPayload => write!(f, "Empty message"),
            ProtocolError::UnsupportedVersion { found, expected } => {
                write!(f, "Unsupported protocol version: found {}, expected {}", found, expected)
            }
            ProtocolError::Decode(e) => write!(f, "Decode error: {}", e),
            ProtocolError::MissingPayload => write!(f, "Message has no payload"),
            ProtocolError::InvalidPlayer(value) => write!(f, "Invalid player number {}", value),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<prost::DecodeError> for ProtocolError {
    fn from(e: prost::DecodeError) -> Self {
        ProtocolError::Decode(e)
    }
}

/// Version byte followed by the protobuf-encoded `PeerMessage`.
pub fn encode_message(message: &ProtocolMessage) -> Vec<u8> {
    let mut result = vec![PROTOCOL_VERSION];
    result.extend(message.to_proto().encode_to_vec());
    result
}

pub fn decode_message(bytes: &[u8]) -> Result<ProtocolMessage, ProtocolError> {
    let Some((&version, body)) = bytes.split_first() else {
        return Err(ProtocolError::EmptyPayload);
    };

    if version != PROTOCOL_VERSION {
        return Err(ProtocolError::UnsupportedVersion {
            found: version,
            expected: PROTOCOL_VERSION,
        });
    }

    let message = PeerMessage::decode(body)?;
    ProtocolMessage::from_proto(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::odd_scoring::PlayerNumber;
    use crate::protocol::SyncState;

    #[test]
    fn test_move_survives_encoding() {
        let message = ProtocolMessage::Move {
            player: PlayerNumber::Two,
            steps: 2,
            new_position: 4,
            total_steps: 5,
        };
        let decoded = decode_message(&encode_message(&message)).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_state_sync_survives_encoding() {
        let message = ProtocolMessage::StateSync(SyncState {
            in_progress: true,
            board_size: 15,
            position: 7,
            total_steps: 7,
            current_player: PlayerNumber::Two,
            terminal: false,
        });
        let decoded = decode_message(&encode_message(&message)).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_empty_bytes_error() {
        assert!(matches!(decode_message(&[]), Err(ProtocolError::EmptyPayload)));
    }

    #[test]
    fn test_unsupported_version_error() {
        assert!(matches!(
            decode_message(&[9, 0]),
            Err(ProtocolError::UnsupportedVersion { found: 9, .. })
        ));
    }

    #[test]
    fn test_message_without_payload_error() {
        assert!(matches!(decode_message(&[PROTOCOL_VERSION]), Err(ProtocolError::MissingPayload)));
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        let bytes = [PROTOCOL_VERSION, 0xff, 0xff, 0xff];
        assert!(matches!(decode_message(&bytes), Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_player_number_zero_is_rejected() {
        let raw = PeerMessage {
            payload: Some(crate::proto::peer_message::Payload::MoveMade(crate::proto::MoveMade {
                player: 0,
                steps: 1,
                new_position: 3,
                total_steps: 1,
            })),
        };
        let mut bytes = vec![PROTOCOL_VERSION];
        bytes.extend(raw.encode_to_vec());
        assert!(matches!(decode_message(&bytes), Err(ProtocolError::InvalidPlayer(0))));
    }
}
