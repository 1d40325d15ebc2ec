use crate::games::odd_scoring::PlayerNumber;
use crate::proto;
use crate::proto::peer_message::Payload;
use super::codec::ProtocolError;

/// Late-join snapshot: everything a joining peer needs to mirror the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncState {
    pub in_progress: bool,
    pub board_size: u32,
    pub position: u32,
    pub total_steps: u32,
    pub current_player: PlayerNumber,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolMessage {
    PlayerReady {
        nick: String,
    },
    GameStart {
        board_size: u32,
        current_player: PlayerNumber,
        host_player: PlayerNumber,
        guest_player: PlayerNumber,
    },
    Move {
        player: PlayerNumber,
        steps: u32,
        new_position: u32,
        total_steps: u32,
    },
    GameOver {
        total_steps: u32,
        winner: PlayerNumber,
        final_position: u32,
    },
    StateSync(SyncState),
}

impl ProtocolMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolMessage::PlayerReady { .. } => "PlayerReady",
            ProtocolMessage::GameStart { .. } => "GameStart",
            ProtocolMessage::Move { .. } => "Move",
            ProtocolMessage::GameOver { .. } => "GameOver",
            ProtocolMessage::StateSync(_) => "StateSync",
        }
    }

    pub fn to_proto(&self) -> proto::PeerMessage {
        let payload = match self {
            ProtocolMessage::PlayerReady { nick } => Payload::PlayerReady(proto::PlayerReady {
                nick: nick.clone(),
            }),
            ProtocolMessage::GameStart {
                board_size,
                current_player,
                host_player,
                guest_player,
            } => Payload::GameStart(proto::GameStart {
                board_size: *board_size,
                current_player: current_player.as_u32(),
                host_player: host_player.as_u32(),
                guest_player: guest_player.as_u32(),
            }),
            ProtocolMessage::Move {
                player,
                steps,
                new_position,
                total_steps,
            } => Payload::MoveMade(proto::MoveMade {
                player: player.as_u32(),
                steps: *steps,
                new_position: *new_position,
                total_steps: *total_steps,
            }),
            ProtocolMessage::GameOver {
                total_steps,
                winner,
                final_position,
            } => Payload::GameOver(proto::GameOver {
                total_steps: *total_steps,
                winner: winner.as_u32(),
                final_position: *final_position,
            }),
            ProtocolMessage::StateSync(sync) => Payload::StateSync(proto::StateSync {
                in_progress: sync.in_progress,
                board_size: sync.board_size,
                position: sync.position,
                total_steps: sync.total_steps,
                current_player: sync.current_player.as_u32(),
                terminal: sync.terminal,
            }),
        };

        proto::PeerMessage {
            payload: Some(payload),
        }
    }

    pub fn from_proto(message: proto::PeerMessage) -> Result<Self, ProtocolError> {
        let payload = message.payload.ok_or(ProtocolError::MissingPayload)?;

        let decoded = match payload {
            Payload::PlayerReady(ready) => ProtocolMessage::PlayerReady { nick: ready.nick },
            Payload::GameStart(start) => ProtocolMessage::GameStart {
                board_size: start.board_size,
                current_player: player_from_wire(start.current_player)?,
                host_player: player_from_wire(start.host_player)?,
                guest_player: player_from_wire(start.guest_player)?,
            },
            Payload::MoveMade(made) => ProtocolMessage::Move {
                player: player_from_wire(made.player)?,
                steps: made.steps,
                new_position: made.new_position,
                total_steps: made.total_steps,
            },
            Payload::GameOver(over) => ProtocolMessage::GameOver {
                total_steps: over.total_steps,
                winner: player_from_wire(over.winner)?,
                final_position: over.final_position,
            },
            Payload::StateSync(sync) => ProtocolMessage::StateSync(SyncState {
                in_progress: sync.in_progress,
                board_size: sync.board_size,
                position: sync.position,
                total_steps: sync.total_steps,
                current_player: player_from_wire(sync.current_player)?,
                terminal: sync.terminal,
            }),
        };

        Ok(decoded)
    }
}

fn player_from_wire(value: u32) -> Result<PlayerNumber, ProtocolError> {
    PlayerNumber::from_u32(value).ok_or(ProtocolError::InvalidPlayer(value))
}
