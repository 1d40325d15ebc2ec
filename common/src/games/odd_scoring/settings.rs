use crate::error::SessionError;
use crate::games::SessionRng;
use super::types::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OddScoringSettings {
    pub board_size: u32,
}

impl OddScoringSettings {
    pub fn random(rng: &mut SessionRng) -> Self {
        Self {
            board_size: rng.board_size(),
        }
    }

    pub fn with_board_size(board_size: u32) -> Result<Self, SessionError> {
        validate_board_size(board_size)?;
        Ok(Self { board_size })
    }

    /// Uses `requested` when given, otherwise draws a fresh size.
    pub fn resolve(requested: Option<u32>, rng: &mut SessionRng) -> Result<Self, SessionError> {
        match requested {
            Some(board_size) => Self::with_board_size(board_size),
            None => Ok(Self::random(rng)),
        }
    }
}

pub fn validate_board_size(board_size: u32) -> Result<(), SessionError> {
    if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
        return Err(SessionError::InvalidBoardSize(board_size));
    }
    Ok(())
}
