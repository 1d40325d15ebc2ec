use crate::games::odd_scoring::{BOT_PLAYER, OddScoringGameState, PlayerNumber};
use crate::protocol::SyncState;
use super::mode::{ModeRules, ModeState};
use super::role::NetworkRole;

/// One playthrough: the mode variant plus the game it governs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub mode: ModeState,
    pub game: OddScoringGameState,
}

impl Session {
    pub fn new(mode: ModeState, board_size: u32) -> Self {
        Self {
            mode,
            game: OddScoringGameState::new(board_size, PlayerNumber::One),
        }
    }

    pub fn rules(&self) -> &dyn ModeRules {
        self.mode.rules()
    }

    pub fn network_role(&self) -> Option<&NetworkRole> {
        self.mode.network_role()
    }

    pub fn bot_to_move(&self) -> bool {
        matches!(self.mode, ModeState::VsBot(_))
            && !self.game.is_terminal()
            && self.game.current_player == BOT_PLAYER
    }

    pub fn sync_state(&self) -> SyncState {
        SyncState {
            in_progress: true,
            board_size: self.game.board.board_size(),
            position: self.game.board.position(),
            total_steps: self.game.board.total_steps(),
            current_player: self.game.current_player,
            terminal: self.game.is_terminal(),
        }
    }
}
