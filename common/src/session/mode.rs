use std::fmt;
use crate::games::odd_scoring::{BOT_PLAYER, GameMode, PlayerNumber};
use super::role::NetworkRole;

/// What the controller does once the turn has passed to `next`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAdvance {
    AwaitLocal,
    ScheduleBot,
    AwaitPeer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideLabel {
    You,
    Computer,
    PlayerOne,
    PlayerTwo,
    Host,
    Guest,
}

impl fmt::Display for SideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SideLabel::You => "You",
            SideLabel::Computer => "Computer",
            SideLabel::PlayerOne => "Player 1",
            SideLabel::PlayerTwo => "Player 2",
            SideLabel::Host => "Host",
            SideLabel::Guest => "Guest",
        };
        write!(f, "{}", label)
    }
}

pub trait ModeRules {
    fn game_mode(&self) -> GameMode;

    /// The player a local move intent acts for, or `None` when the local user
    /// does not own the current turn.
    fn local_mover(&self, current: PlayerNumber) -> Option<PlayerNumber>;

    fn turn_advance(&self, next: PlayerNumber) -> TurnAdvance;

    fn announces_moves(&self) -> bool {
        false
    }

    fn side_label(&self, player: PlayerNumber) -> SideLabel;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BotMode;

impl ModeRules for BotMode {
    fn game_mode(&self) -> GameMode {
        GameMode::VsBot
    }

    fn local_mover(&self, current: PlayerNumber) -> Option<PlayerNumber> {
        (current != BOT_PLAYER).then_some(current)
    }

    fn turn_advance(&self, next: PlayerNumber) -> TurnAdvance {
        if next == BOT_PLAYER {
            TurnAdvance::ScheduleBot
        } else {
            TurnAdvance::AwaitLocal
        }
    }

    fn side_label(&self, player: PlayerNumber) -> SideLabel {
        if player == BOT_PLAYER {
            SideLabel::Computer
        } else {
            SideLabel::You
        }
    }
}

/// Two people sharing one device: every local intent moves the current player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalMode;

impl ModeRules for LocalMode {
    fn game_mode(&self) -> GameMode {
        GameMode::VsLocalPlayer
    }

    fn local_mover(&self, current: PlayerNumber) -> Option<PlayerNumber> {
        Some(current)
    }

    fn turn_advance(&self, _next: PlayerNumber) -> TurnAdvance {
        TurnAdvance::AwaitLocal
    }

    fn side_label(&self, player: PlayerNumber) -> SideLabel {
        match player {
            PlayerNumber::One => SideLabel::PlayerOne,
            PlayerNumber::Two => SideLabel::PlayerTwo,
        }
    }
}

impl ModeRules for NetworkRole {
    fn game_mode(&self) -> GameMode {
        GameMode::Networked
    }

    fn local_mover(&self, current: PlayerNumber) -> Option<PlayerNumber> {
        (current == self.my_player).then_some(current)
    }

    fn turn_advance(&self, next: PlayerNumber) -> TurnAdvance {
        if next == self.my_player {
            TurnAdvance::AwaitLocal
        } else {
            TurnAdvance::AwaitPeer
        }
    }

    fn announces_moves(&self) -> bool {
        true
    }

    fn side_label(&self, player: PlayerNumber) -> SideLabel {
        match player {
            PlayerNumber::One => SideLabel::Host,
            PlayerNumber::Two => SideLabel::Guest,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeState {
    VsBot(BotMode),
    VsLocalPlayer(LocalMode),
    Networked(NetworkRole),
}

impl ModeState {
    /// Mode state for a session that needs no peer. Networked sessions are
    /// built from a role instead.
    pub fn local(mode: GameMode) -> Option<Self> {
        match mode {
            GameMode::VsBot => Some(ModeState::VsBot(BotMode)),
            GameMode::VsLocalPlayer => Some(ModeState::VsLocalPlayer(LocalMode)),
            GameMode::Networked => None,
        }
    }

    pub fn rules(&self) -> &dyn ModeRules {
        match self {
            ModeState::VsBot(m) => m,
            ModeState::VsLocalPlayer(m) => m,
            ModeState::Networked(role) => role,
        }
    }

    pub fn network_role(&self) -> Option<&NetworkRole> {
        match self {
            ModeState::Networked(role) => Some(role),
            _ => None,
        }
    }

    pub fn network_role_mut(&mut self) -> Option<&mut NetworkRole> {
        match self {
            ModeState::Networked(role) => Some(role),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_mode_owns_only_first_seat() {
        let rules = BotMode;
        assert_eq!(rules.local_mover(PlayerNumber::One), Some(PlayerNumber::One));
        assert_eq!(rules.local_mover(PlayerNumber::Two), None);
        assert_eq!(rules.turn_advance(PlayerNumber::Two), TurnAdvance::ScheduleBot);
        assert_eq!(rules.side_label(PlayerNumber::One), SideLabel::You);
    }

    #[test]
    fn test_local_mode_moves_for_whoever_is_current() {
        let rules = LocalMode;
        assert_eq!(rules.local_mover(PlayerNumber::Two), Some(PlayerNumber::Two));
        assert_eq!(rules.turn_advance(PlayerNumber::Two), TurnAdvance::AwaitLocal);
        assert!(!rules.announces_moves());
    }

    #[test]
    fn test_guest_waits_for_host_turn() {
        let role = NetworkRole::guest();
        assert_eq!(role.local_mover(PlayerNumber::One), None);
        assert_eq!(role.local_mover(PlayerNumber::Two), Some(PlayerNumber::Two));
        assert_eq!(role.turn_advance(PlayerNumber::One), TurnAdvance::AwaitPeer);
        assert!(role.announces_moves());
        assert_eq!(role.side_label(PlayerNumber::One), SideLabel::Host);
    }

    #[test]
    fn test_networked_mode_has_no_local_state() {
        assert!(ModeState::local(GameMode::Networked).is_none());
        let mode = ModeState::local(GameMode::VsBot).unwrap();
        assert_eq!(mode.rules().game_mode(), GameMode::VsBot);
    }
}
