use std::collections::HashMap;
use crate::PeerId;

/// Remote participants known to this side of a networked session, with the
/// nickname each announced in `PlayerReady`. Only one opponent fits.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    peers: HashMap<PeerId, Option<String>>,
}

impl Roster {
    pub const MAX_OPPONENTS: usize = 1;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&mut self, peer: PeerId) -> bool {
        if self.peers.contains_key(&peer) {
            return false;
        }
        if self.peers.len() >= Self::MAX_OPPONENTS {
            return false;
        }
        self.peers.insert(peer, None);
        true
    }

    /// Records a peer's nickname, registering the peer first if needed.
    /// Returns false when the roster is already full with someone else.
    pub fn set_nick(&mut self, peer: &PeerId, nick: String) -> bool {
        if let Some(entry) = self.peers.get_mut(peer) {
            *entry = Some(nick);
            return true;
        }
        if !self.add_peer(peer.clone()) {
            return false;
        }
        self.peers.insert(peer.clone(), Some(nick));
        true
    }

    pub fn remove_peer(&mut self, peer: &PeerId) -> bool {
        self.peers.remove(peer).is_some()
    }

    pub fn contains(&self, peer: &PeerId) -> bool {
        self.peers.contains_key(peer)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn can_start(&self) -> bool {
        self.peers.len() == Self::MAX_OPPONENTS
    }

    pub fn opponent(&self) -> Option<&PeerId> {
        self.peers.keys().next()
    }

    pub fn nick_of(&self, peer: &PeerId) -> Option<&str> {
        self.peers.get(peer).and_then(|nick| nick.as_deref())
    }
}
