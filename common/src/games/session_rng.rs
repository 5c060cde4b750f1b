use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random source owned by a session. Two sessions built from the
/// same seed and fed the same inputs place food identically.
#[derive(Clone, Debug)]
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

    /// Uniform index into a slice of `len` items, `None` when empty.
    pub fn random_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.rng.random_range(0..len))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.random_range(0..1000u32), b.random_range(0..1000u32));
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = SessionRng::new(1);
        let mut b = SessionRng::new(2);
        let first: Vec<u64> = (0..8).map(|_| a.random_range(0..u64::MAX)).collect();
        let second: Vec<u64> = (0..8).map(|_| b.random_range(0..u64::MAX)).collect();
        assert_ne!(first, second);
        assert_eq!(a.seed(), 1);
    }

    #[test]
    fn test_random_index_empty() {
        let mut rng = SessionRng::new(1);
        assert_eq!(rng.random_index(0), None);
        assert!(rng.random_index(3).unwrap() < 3);
    }
}
