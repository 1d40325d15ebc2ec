use crate::PeerId;
use crate::games::odd_scoring::PlayerNumber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRole {
    pub is_host: bool,
    pub my_player: PlayerNumber,
    pub opponent: Option<PeerId>,
    pub game_started: bool,
}

impl NetworkRole {
    pub fn host() -> Self {
        Self {
            is_host: true,
            my_player: PlayerNumber::One,
            opponent: None,
            game_started: false,
        }
    }

    pub fn guest() -> Self {
        Self {
            is_host: false,
            my_player: PlayerNumber::Two,
            opponent: None,
            game_started: false,
        }
    }

    pub fn is_opponent(&self, peer: &PeerId) -> bool {
        self.opponent.as_ref() == Some(peer)
    }

    /// Accepts messages from the registered opponent, or from anyone while no
    /// opponent is known yet.
    pub fn accepts_from(&self, peer: &PeerId) -> bool {
        self.opponent.is_none() || self.is_opponent(peer)
    }
}
