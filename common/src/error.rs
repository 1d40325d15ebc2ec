use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    IllegalMove { steps: u32, position: u32 },
    NotYourTurn,
    InvalidBoardSize(u32),
    LobbyNotReady { roster_size: usize },
    NotHost,
    NotInLobby,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IllegalMove { steps, position } => {
                write!(f, "Illegal move: cannot take {} steps from position {}", steps, position)
            }
            SessionError::NotYourTurn => write!(f, "Not your turn"),
            SessionError::InvalidBoardSize(size) => {
                write!(f, "Board size {} is outside the allowed range", size)
            }
            SessionError::LobbyNotReady { roster_size } => {
                write!(f, "Lobby needs exactly one opponent, has {}", roster_size)
            }
            SessionError::NotHost => write!(f, "Only the host can start the game"),
            SessionError::NotInLobby => write!(f, "No lobby is open"),
        }
    }
}

impl std::error::Error for SessionError {}
