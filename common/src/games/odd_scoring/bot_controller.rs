use crate::games::SessionRng;
use super::types::{MAX_STEPS, PlayerNumber};

/// The computer always plays the second seat.
pub const BOT_PLAYER: PlayerNumber = PlayerNumber::Two;

/// Subtraction-game heuristic: leave the opponent on a multiple of four when
/// possible, otherwise take a random step. Always returns `1..=min(3, position)`
/// for a positive position.
pub fn calculate_move(position: u32, rng: &mut SessionRng) -> u32 {
    let ideal = position % 4;
    let steps = if ideal != 0 { ideal } else { rng.step_count() };
    let steps = steps.min(position).min(MAX_STEPS);
    if steps == 0 { 1 } else { steps }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_remainder_when_not_multiple_of_four() {
        let mut rng = SessionRng::new(1);
        assert_eq!(calculate_move(6, &mut rng), 2);
        assert_eq!(calculate_move(9, &mut rng), 1);
        assert_eq!(calculate_move(7, &mut rng), 3);
        assert_eq!(calculate_move(1, &mut rng), 1);
    }

    #[test]
    fn test_move_always_within_bounds() {
        let mut rng = SessionRng::new(42);
        for position in 1..=19 {
            for _ in 0..50 {
                let steps = calculate_move(position, &mut rng);
                assert!(steps >= 1);
                assert!(steps <= position.min(MAX_STEPS));
            }
        }
    }

    #[test]
    fn test_multiple_of_four_draws_random_step() {
        let mut rng = SessionRng::new(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[calculate_move(8, &mut rng) as usize] = true;
        }
        assert!(seen[1] && seen[2] && seen[3]);
    }

    #[test]
    fn test_zero_position_forces_single_step() {
        let mut rng = SessionRng::new(5);
        assert_eq!(calculate_move(0, &mut rng), 1);
    }
}
