use serde::{Deserialize, Serialize};

use crate::games::odd_scoring::{
    GameMode, GameStatus, OddScoringGameState, PlayerNumber, validate_board_size,
};
use crate::session::{ModeState, NetworkRole, Session};

/// Flat save/restore record. Every field has a default so that partial or
/// older files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub mode: GameMode,
    pub board_size: u32,
    pub position: u32,
    pub total_steps: u32,
    pub terminal: bool,
    pub current_player: u32,
    pub is_host: bool,
    pub my_player_number: u32,
    pub game_started: bool,
    pub in_progress: bool,
    pub aborted: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            mode: GameMode::VsBot,
            board_size: 0,
            position: 0,
            total_steps: 0,
            terminal: false,
            current_player: 1,
            is_host: false,
            my_player_number: 1,
            game_started: false,
            in_progress: false,
            aborted: false,
        }
    }
}

impl SessionSnapshot {
    /// Snapshot of "no game running"; restoring it lands on the menu.
    pub fn minimal() -> Self {
        Self::default()
    }

    pub fn from_session(session: &Session) -> Self {
        let role = session.network_role();
        let board = &session.game.board;
        Self {
            mode: session.rules().game_mode(),
            board_size: board.board_size(),
            position: board.position(),
            total_steps: board.total_steps(),
            terminal: session.game.is_terminal(),
            current_player: session.game.current_player.as_u32(),
            is_host: role.is_some_and(|r| r.is_host),
            my_player_number: role.map_or(1, |r| r.my_player.as_u32()),
            game_started: role.is_some_and(|r| r.game_started),
            in_progress: true,
            aborted: session.game.status == GameStatus::Aborted,
        }
    }

    pub fn to_session(&self) -> Result<Session, String> {
        validate_board_size(self.board_size).map_err(|e| e.to_string())?;

        if self.position >= self.board_size {
            return Err(format!(
                "Position {} does not fit a board of {} cells",
                self.position, self.board_size
            ));
        }

        let current_player = PlayerNumber::from_u32(self.current_player)
            .ok_or_else(|| format!("Invalid current player {}", self.current_player))?;

        let status = self.status()?;

        let mode = match ModeState::local(self.mode) {
            Some(mode) => mode,
            None => {
                let my_player = PlayerNumber::from_u32(self.my_player_number)
                    .ok_or_else(|| format!("Invalid player number {}", self.my_player_number))?;
                ModeState::Networked(NetworkRole {
                    is_host: self.is_host,
                    my_player,
                    opponent: None,
                    game_started: self.game_started,
                })
            }
        };

        Ok(Session {
            mode,
            game: OddScoringGameState::restore(
                self.board_size,
                self.position,
                self.total_steps,
                current_player,
                status,
            ),
        })
    }

    fn status(&self) -> Result<GameStatus, String> {
        match (self.terminal, self.aborted) {
            (true, true) => Ok(GameStatus::Aborted),
            (false, true) => Err("Aborted snapshot must be terminal".to_string()),
            (true, false) if self.position == 0 => Ok(GameStatus::Finished),
            (true, false) => Err(format!("Terminal snapshot left at position {}", self.position)),
            (false, false) if self.position == 0 => {
                Err("Snapshot at position 0 must be terminal".to_string())
            }
            (false, false) => Ok(GameStatus::InProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_progress_snapshot() -> SessionSnapshot {
        SessionSnapshot {
            mode: GameMode::VsLocalPlayer,
            board_size: 12,
            position: 6,
            total_steps: 5,
            current_player: 2,
            in_progress: true,
            ..SessionSnapshot::default()
        }
    }

    #[test]
    fn test_session_round_trip_keeps_counters() {
        let snapshot = in_progress_snapshot();
        let session = snapshot.to_session().unwrap();
        assert_eq!(session.game.board.position(), 6);
        assert_eq!(session.game.current_player, PlayerNumber::Two);
        assert_eq!(SessionSnapshot::from_session(&session), snapshot);
    }

    #[test]
    fn test_invalid_board_size_is_rejected() {
        let snapshot = SessionSnapshot {
            board_size: 42,
            ..in_progress_snapshot()
        };
        assert!(snapshot.to_session().is_err());
    }

    #[test]
    fn test_terminal_flag_must_match_position() {
        let finished_early = SessionSnapshot {
            terminal: true,
            ..in_progress_snapshot()
        };
        assert!(finished_early.to_session().is_err());

        let aborted = SessionSnapshot {
            terminal: true,
            aborted: true,
            ..in_progress_snapshot()
        };
        assert_eq!(aborted.to_session().unwrap().game.status, GameStatus::Aborted);
    }

    #[test]
    fn test_networked_snapshot_restores_role() {
        let snapshot = SessionSnapshot {
            mode: GameMode::Networked,
            is_host: false,
            my_player_number: 2,
            game_started: true,
            ..in_progress_snapshot()
        };
        let session = snapshot.to_session().unwrap();
        let role = session.network_role().unwrap();
        assert!(!role.is_host);
        assert_eq!(role.my_player, PlayerNumber::Two);
        assert!(role.opponent.is_none());
    }
}
