//! Random number generator wrapper shared by the optimizers.

use rand::prelude::*;

use crate::schema::ArenaBounds;

/// Seedable randomness source for weight initialization, genetic operators,
/// and spawn placement.
pub struct WeightRng {
    rng: StdRng,
}

impl WeightRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Uniform initial weight in [-1, 1].
    pub fn weight(&mut self) -> f32 {
        self.rng.gen_range(-1.0..=1.0)
    }

    /// Uniform draw in [0, 1).
    pub fn unit(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    /// True with probability `p`.
    pub fn coin(&mut self, p: f32) -> bool {
        self.rng.r#gen::<f32>() < p
    }

    /// Uniform index in [0, len).
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Gaussian draw with mean 0 and the given standard deviation.
    pub fn gaussian(&mut self, sigma: f32) -> f32 {
        let noise: f32 = self.rng.sample(rand_distr::StandardNormal);
        noise * sigma
    }

    /// Uniform spawn position within the arena.
    pub fn position(&mut self, bounds: &ArenaBounds) -> (f32, f32) {
        (
            self.rng.gen_range(0.0..bounds.width),
            self.rng.gen_range(0.0..bounds.height),
        )
    }

    /// Uniform heading in [0, 2π).
    pub fn heading(&mut self) -> f32 {
        self.rng.gen_range(0.0..std::f32::consts::TAU)
    }

    /// Generate next u64 for seeding child RNGs.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.r#gen()
    }
}

impl std::fmt::Debug for WeightRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightRng").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = WeightRng::new(7);
        let mut b = WeightRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.weight(), b.weight());
        }
    }

    #[test]
    fn test_weight_range() {
        let mut rng = WeightRng::new(42);
        for _ in 0..256 {
            let w = rng.weight();
            assert!((-1.0..=1.0).contains(&w));
        }
    }

    #[test]
    fn test_position_within_bounds() {
        let mut rng = WeightRng::new(42);
        let bounds = ArenaBounds {
            width: 320.0,
            height: 200.0,
        };
        for _ in 0..64 {
            let (x, y) = rng.position(&bounds);
            assert!((0.0..320.0).contains(&x));
            assert!((0.0..200.0).contains(&y));
        }
    }
}
