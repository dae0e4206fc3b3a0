const ZERO_STATE_REPLACEMENT: u64 = 0xA5A5_A5A5_A5A5_A5A5;

/// xorshift64*: small deterministic PRNG so palettes and particles are
/// reproducible under a fixed seed.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.reseed(seed);
        rng
    }

    pub fn reseed(&mut self, seed: u64) {
        self.state = if seed == 0 {
            ZERO_STATE_REPLACEMENT
        } else {
            seed
        };
    }

    /// Uniform value in `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = if x == 0 { ZERO_STATE_REPLACEMENT } else { x };
        let out = x.wrapping_mul(0x2545_F491_4F6C_DD1D);
        // Top 53 bits.
        let mantissa = out >> 11;
        (mantissa as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform integer in `[0, bound)`; `bound == 0` yields 0.
    pub fn below(&mut self, bound: u32) -> u32 {
        (self.next_f64() * f64::from(bound)).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_same_sequence() {
        let mut left = Rng::new(42);
        let mut right = Rng::new(42);
        for _ in 0..16 {
            assert_eq!(left.next_f64().to_bits(), right.next_f64().to_bits());
        }
    }

    #[test]
    fn values_stay_in_unit_interval() {
        let mut rng = Rng::new(0);
        for _ in 0..1_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value), "out of range: {value}");
        }
        assert!(rng.below(256) < 256);
    }
}
