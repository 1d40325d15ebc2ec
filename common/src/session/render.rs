use crate::games::odd_scoring::{GameMode, Outcome, PlayerNumber};
use super::mode::SideLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Menu,
    Lobby,
    Active,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyView {
    pub is_host: bool,
    pub roster_size: usize,
    pub opponent_nick: Option<String>,
    pub can_start: bool,
}

/// Read-only view handed to the shell. Board fields are zero outside a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub phase: SessionPhase,
    pub mode: Option<GameMode>,
    pub board_size: u32,
    pub position: u32,
    pub total_steps: u32,
    pub current_player: PlayerNumber,
    pub terminal: bool,
    pub winner: Option<PlayerNumber>,
    pub outcome: Outcome,
    pub legal_moves: Vec<u32>,
    pub awaiting_local_input: bool,
    pub current_label: Option<SideLabel>,
    pub winner_label: Option<SideLabel>,
    pub lobby: Option<LobbyView>,
}

impl RenderState {
    pub fn menu() -> Self {
        Self {
            phase: SessionPhase::Menu,
            mode: None,
            board_size: 0,
            position: 0,
            total_steps: 0,
            current_player: PlayerNumber::One,
            terminal: false,
            winner: None,
            outcome: Outcome::InProgress,
            legal_moves: Vec::new(),
            awaiting_local_input: false,
            current_label: None,
            winner_label: None,
            lobby: None,
        }
    }

    pub fn lobby(view: LobbyView) -> Self {
        Self {
            phase: SessionPhase::Lobby,
            mode: Some(GameMode::Networked),
            lobby: Some(view),
            ..Self::menu()
        }
    }
}
