use std::fmt;
use serde::{Deserialize, Serialize};

pub const MIN_BOARD_SIZE: u32 = 8;
pub const MAX_BOARD_SIZE: u32 = 20;
pub const MAX_STEPS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerNumber {
    One,
    Two,
}

impl PlayerNumber {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(PlayerNumber::One),
            2 => Some(PlayerNumber::Two),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        match self {
            PlayerNumber::One => 1,
            PlayerNumber::Two => 2,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerNumber::One => PlayerNumber::Two,
            PlayerNumber::Two => PlayerNumber::One,
        }
    }

    /// The parity rule: an even step total goes to player one's side.
    pub fn winner_for_total(total_steps: u32) -> Self {
        if total_steps % 2 == 0 {
            PlayerNumber::One
        } else {
            PlayerNumber::Two
        }
    }
}

impl fmt::Display for PlayerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    VsBot,
    VsLocalPlayer,
    Networked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Finished,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(PlayerNumber),
    Aborted,
}
