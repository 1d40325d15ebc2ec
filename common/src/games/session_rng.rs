use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::odd_scoring::{MAX_BOARD_SIZE, MAX_STEPS, MIN_BOARD_SIZE};

/// Seedable randomness for one controller: board size draws and the bot's
/// tie-break steps. Recording the seed keeps a session reproducible.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn board_size(&mut self) -> u32 {
        self.random_range(MIN_BOARD_SIZE..=MAX_BOARD_SIZE)
    }

    pub fn step_count(&mut self) -> u32 {
        self.random_range(1..=MAX_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..20 {
            assert_eq!(a.board_size(), b.board_size());
            assert_eq!(a.step_count(), b.step_count());
        }
    }

    #[test]
    fn test_board_size_within_bounds() {
        let mut rng = SessionRng::new(99);
        for _ in 0..500 {
            let size = rng.board_size();
            assert!((MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size));
        }
    }
}
