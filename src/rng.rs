//! Seeded source of shuffles for generated input arrays
//!
//! A seed string is folded with FNV-1a and fed to SplitMix64, so the same
//! `--seed` always yields the same "random" distribution on every platform.

/// Fold a seed string into the generator's starting state.
pub fn fnv1a64(s: &str) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in s.as_bytes() {
        h ^= u64::from(*b);
        h = h.wrapping_mul(0x0100_0000_01b3);
    }
    h
}

/// Generator behind [`crate::distribution::generate`]'s shuffle.
#[derive(Clone, Debug)]
pub struct DetRng {
    state: u64,
}

impl DetRng {
    /// Generator for a user-facing seed string.
    pub fn new(seed: &str) -> Self {
        Self {
            state: fnv1a64(seed),
        }
    }

    /// Generator with an explicit starting state (tests).
    pub fn from_u64(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit draw.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform draw in `[0, 1)`.
    #[allow(clippy::cast_precision_loss)]
    pub fn random(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Swap partner for a Fisher–Yates step at position `max`: uniform in `0..=max`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn index_upto(&mut self, max: usize) -> usize {
        let j = (self.random() * (max + 1) as f64).floor() as usize;
        j.min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a64_deterministic() {
        let h1 = fnv1a64("test_seed");
        let h2 = fnv1a64("test_seed");
        assert_eq!(h1, h2);

        let h3 = fnv1a64("different_seed");
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = DetRng::new("test");
        let mut rng2 = DetRng::new("test");

        for _ in 0..100 {
            assert_eq!(rng1.next_u64(), rng2.next_u64());
        }
    }

    #[test]
    fn test_rng_random_range() {
        let mut rng = DetRng::from_u64(7);

        for _ in 0..1000 {
            let r = rng.random();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_index_upto_bounds() {
        let mut rng = DetRng::new("bounds");
        for max in 0..50 {
            assert!(rng.index_upto(max) <= max);
        }
    }

    #[test]
    fn test_index_upto_reaches_every_slot() {
        let mut rng = DetRng::new("default");
        let mut seen = [false; 8];
        for _ in 0..500 {
            seen[rng.index_upto(7)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
