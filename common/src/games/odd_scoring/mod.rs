mod board;
mod bot_controller;
mod game_state;
mod settings;
mod types;

pub use board::Board;
pub use bot_controller::{BOT_PLAYER, calculate_move};
pub use game_state::{MoveOutcome, OddScoringGameState};
pub use settings::{OddScoringSettings, validate_board_size};
pub use types::{GameMode, GameStatus, MAX_BOARD_SIZE, MAX_STEPS, MIN_BOARD_SIZE, Outcome, PlayerNumber};
