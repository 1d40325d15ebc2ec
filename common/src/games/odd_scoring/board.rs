use crate::error::SessionError;
use super::types::MAX_STEPS;

/// A row of `board_size` cells. The walker starts on the last cell and moves
/// toward cell 0; `total_steps` counts every step taken by either side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    board_size: u32,
    position: u32,
    total_steps: u32,
}

impl Board {
    pub fn new(board_size: u32) -> Self {
        Self {
            board_size,
            position: board_size.saturating_sub(1),
            total_steps: 0,
        }
    }

    pub fn from_parts(board_size: u32, position: u32, total_steps: u32) -> Self {
        Self {
            board_size,
            position,
            total_steps,
        }
    }

    pub fn board_size(&self) -> u32 {
        self.board_size
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    pub fn is_legal_move(&self, steps: u32) -> bool {
        (1..=MAX_STEPS).contains(&steps) && steps <= self.position
    }

    pub fn legal_moves(&self) -> Vec<u32> {
        (1..=MAX_STEPS).filter(|&steps| self.is_legal_move(steps)).collect()
    }

    pub fn apply_move(&mut self, steps: u32) -> Result<(), SessionError> {
        // A total adopted from a peer may already sit at the top of the range.
        let total_steps = self
            .total_steps
            .checked_add(steps)
            .filter(|_| self.is_legal_move(steps))
            .ok_or(SessionError::IllegalMove {
                steps,
                position: self.position,
            })?;

        self.position -= steps;
        self.total_steps = total_steps;
        Ok(())
    }

    /// Overwrites both counters with values reported by the remote peer.
    pub fn adopt(&mut self, position: u32, total_steps: u32) {
        self.position = position;
        self.total_steps = total_steps;
    }

    pub fn is_terminal(&self) -> bool {
        self.position == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_starts_on_last_cell() {
        let board = Board::new(10);
        assert_eq!(board.board_size(), 10);
        assert_eq!(board.position(), 9);
        assert_eq!(board.total_steps(), 0);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_apply_move_updates_counters() {
        let mut board = Board::new(10);
        board.apply_move(3).unwrap();
        board.apply_move(2).unwrap();
        assert_eq!(board.position(), 4);
        assert_eq!(board.total_steps(), 5);
    }

    #[test]
    fn test_step_larger_than_position_is_rejected() {
        let mut board = Board::from_parts(10, 2, 7);
        let result = board.apply_move(3);
        assert_eq!(result, Err(SessionError::IllegalMove { steps: 3, position: 2 }));
        assert_eq!(board.position(), 2);
        assert_eq!(board.total_steps(), 7);
    }

    #[test]
    fn test_step_outside_one_to_three_is_rejected() {
        let mut board = Board::new(20);
        assert!(board.apply_move(0).is_err());
        assert!(board.apply_move(4).is_err());
        assert_eq!(board.position(), 19);
    }

    #[test]
    fn test_legal_moves_shrink_near_finish() {
        assert_eq!(Board::from_parts(8, 5, 2).legal_moves(), vec![1, 2, 3]);
        assert_eq!(Board::from_parts(8, 2, 5).legal_moves(), vec![1, 2]);
        assert_eq!(Board::from_parts(8, 1, 6).legal_moves(), vec![1]);
        assert!(Board::from_parts(8, 0, 7).legal_moves().is_empty());
    }

    #[test]
    fn test_move_that_would_overflow_total_is_rejected() {
        let mut board = Board::from_parts(10, 8, u32::MAX);
        assert_eq!(board.apply_move(1), Err(SessionError::IllegalMove { steps: 1, position: 8 }));
        assert_eq!(board.position(), 8);
        assert_eq!(board.total_steps(), u32::MAX);
    }

    #[test]
    fn test_reaching_zero_is_terminal() {
        let mut board = Board::new(8);
        for steps in [3, 3, 1] {
            board.apply_move(steps).unwrap();
        }
        assert!(board.is_terminal());
        assert_eq!(board.total_steps(), 7);
        assert!(board.apply_move(1).is_err());
    }
}
