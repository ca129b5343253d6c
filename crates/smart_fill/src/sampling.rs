//! Random draws used by the placement loop.
//!
//! All helpers take `&mut dyn RngCore` so a single caller-owned generator drives a
//! whole fill and seeded runs are reproducible.
use rand::RngCore;

const UNIT_SCALE: f32 = 1.0 / (1u32 << 24) as f32;

/// Generate a random float in the half-open range [0, 1).
///
/// Uses the top 24 bits so the result is exactly representable and never rounds up to 1.
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 * UNIT_SCALE
}

/// Uniform draw from `[lo, hi)`. Returns `lo` when the range is empty.
#[inline]
pub(crate) fn uniform(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        return lo;
    }
    lo + rand01(rng) * (hi - lo)
}

/// Uniform index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((rand01(rng) * len as f32) as usize).min(len - 1)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct FixedRng {
        pub value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_stays_below_one_for_max_input() {
        let mut rng = FixedRng { value: u32::MAX };
        let r = rand01(&mut rng);
        assert!(r < 1.0);
        assert!(r > 0.999);
    }

    #[test]
    fn uniform_maps_into_range() {
        let mut rng = FixedRng {
            value: u32::MAX / 2,
        };
        let v = uniform(&mut rng, 10.0, 20.0);
        assert!((v - 15.0).abs() < 0.01);
    }

    #[test]
    fn uniform_collapses_empty_range_to_lower_bound() {
        let mut rng = FixedRng { value: u32::MAX };
        assert_eq!(uniform(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(uniform(&mut rng, 5.0, 1.0), 5.0);
    }

    #[test]
    fn index_covers_every_slot_and_stays_in_bounds() {
        for (value, expected) in [(0u32, 0usize), (u32::MAX / 4 + 256, 1), (u32::MAX, 3)] {
            let mut rng = FixedRng { value };
            assert_eq!(index(&mut rng, 4), expected);
        }
    }
}
