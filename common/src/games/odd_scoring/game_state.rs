use crate::error::SessionError;
use super::board::Board;
use super::types::{GameStatus, Outcome, PlayerNumber};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue { next_player: PlayerNumber },
    Finished { winner: PlayerNumber },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddScoringGameState {
    pub board: Board,
    pub current_player: PlayerNumber,
    pub status: GameStatus,
}

impl OddScoringGameState {
    pub fn new(board_size: u32, first_player: PlayerNumber) -> Self {
        Self {
            board: Board::new(board_size),
            current_player: first_player,
            status: GameStatus::InProgress,
        }
    }

    /// Rebuilds a game from counters that came from a snapshot or a peer.
    pub fn restore(
        board_size: u32,
        position: u32,
        total_steps: u32,
        current_player: PlayerNumber,
        status: GameStatus,
    ) -> Self {
        Self {
            board: Board::from_parts(board_size, position, total_steps),
            current_player,
            status,
        }
    }

    pub fn apply_move(&mut self, player: PlayerNumber, steps: u32) -> Result<MoveOutcome, SessionError> {
        if self.status != GameStatus::InProgress || player != self.current_player {
            return Err(SessionError::NotYourTurn);
        }

        self.board.apply_move(steps)?;
        Ok(self.advance_turn())
    }

    /// Applies a move the peer already performed, trusting its counters.
    pub fn adopt_remote_move(&mut self, position: u32, total_steps: u32) -> MoveOutcome {
        self.board.adopt(position, total_steps);
        self.advance_turn()
    }

    /// Adopts the final counters announced in a peer's game-over message.
    /// Returns true when this call is what ended the game.
    pub fn adopt_final(&mut self, total_steps: u32, final_position: u32) -> bool {
        self.board.adopt(final_position, total_steps);
        if self.status == GameStatus::InProgress {
            self.status = GameStatus::Finished;
            return true;
        }
        false
    }

    pub fn abort(&mut self) -> bool {
        if self.status != GameStatus::InProgress {
            return false;
        }
        self.status = GameStatus::Aborted;
        true
    }

    fn advance_turn(&mut self) -> MoveOutcome {
        if self.board.is_terminal() {
            self.status = GameStatus::Finished;
            return MoveOutcome::Finished {
                winner: PlayerNumber::winner_for_total(self.board.total_steps()),
            };
        }

        self.current_player = self.current_player.other();
        MoveOutcome::Continue {
            next_player: self.current_player,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    pub fn winner(&self) -> Option<PlayerNumber> {
        match self.status {
            GameStatus::Finished => Some(PlayerNumber::winner_for_total(self.board.total_steps())),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.status {
            GameStatus::InProgress => Outcome::InProgress,
            GameStatus::Aborted => Outcome::Aborted,
            GameStatus::Finished => Outcome::Won(PlayerNumber::winner_for_total(self.board.total_steps())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_alternate_until_finish() {
        let mut game = OddScoringGameState::new(10, PlayerNumber::One);

        let outcome = game.apply_move(PlayerNumber::One, 3).unwrap();
        assert_eq!(outcome, MoveOutcome::Continue { next_player: PlayerNumber::Two });
        game.apply_move(PlayerNumber::Two, 2).unwrap();
        game.apply_move(PlayerNumber::One, 3).unwrap();
        let outcome = game.apply_move(PlayerNumber::Two, 1).unwrap();

        assert_eq!(outcome, MoveOutcome::Finished { winner: PlayerNumber::Two });
        assert_eq!(game.board.total_steps(), 9);
        assert_eq!(game.winner(), Some(PlayerNumber::Two));
        assert_eq!(game.outcome(), Outcome::Won(PlayerNumber::Two));
    }

    #[test]
    fn test_wrong_player_is_not_your_turn() {
        let mut game = OddScoringGameState::new(10, PlayerNumber::One);
        assert_eq!(game.apply_move(PlayerNumber::Two, 1), Err(SessionError::NotYourTurn));
        assert_eq!(game.board.position(), 9);
    }

    #[test]
    fn test_illegal_move_keeps_turn() {
        let mut game = OddScoringGameState::restore(10, 2, 7, PlayerNumber::One, GameStatus::InProgress);
        assert!(matches!(game.apply_move(PlayerNumber::One, 3), Err(SessionError::IllegalMove { .. })));
        assert_eq!(game.current_player, PlayerNumber::One);
        assert_eq!(game.board.position(), 2);
    }

    #[test]
    fn test_no_moves_after_finish() {
        let mut game = OddScoringGameState::restore(8, 1, 6, PlayerNumber::One, GameStatus::InProgress);
        game.apply_move(PlayerNumber::One, 1).unwrap();
        assert!(game.is_terminal());
        assert_eq!(game.winner(), Some(PlayerNumber::Two));
        assert_eq!(game.apply_move(PlayerNumber::Two, 1), Err(SessionError::NotYourTurn));
    }

    #[test]
    fn test_abort_has_no_winner() {
        let mut game = OddScoringGameState::new(12, PlayerNumber::One);
        game.apply_move(PlayerNumber::One, 2).unwrap();
        assert!(game.abort());
        assert!(game.is_terminal());
        assert_eq!(game.winner(), None);
        assert_eq!(game.outcome(), Outcome::Aborted);
        assert!(!game.abort());
    }

    #[test]
    fn test_adopt_final_ends_game_once() {
        let mut game = OddScoringGameState::restore(12, 2, 9, PlayerNumber::Two, GameStatus::InProgress);
        assert!(game.adopt_final(11, 0));
        assert!(!game.adopt_final(11, 0));
        assert_eq!(game.winner(), Some(PlayerNumber::Two));
    }
}
