//! Fixed-weight exponential moving average over raw ADC samples.

use crate::sampler::{RawSample, RAW_MAX};

/// 75% previous value, 25% newest sample, integer arithmetic with truncation.
///
/// The filter is always seeded with a real reading so the first filtered
/// values do not ramp up from zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ema {
    previous: RawSample,
}

impl Ema {
    /// Creates a filter whose history is the given sample.
    /// param seed: first real reading from the sensor
    pub fn seeded(seed: RawSample) -> Ema {
        Self {
            previous: seed.min(RAW_MAX),
        }
    }

    /// Feeds one raw sample and returns the new filtered value
    pub fn update(&mut self, raw: RawSample) -> RawSample {
        let raw = u32::from(raw.min(RAW_MAX));
        let filtered = (u32::from(self.previous) * 3 + raw) / 4;
        // Average of two values <= RAW_MAX
        self.previous = filtered as RawSample;
        self.previous
    }

    /// The last filtered value
    pub fn value(&self) -> RawSample {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_first_value() {
        let ema = Ema::seeded(300);
        assert_eq!(ema.value(), 300);
    }

    #[test]
    fn test_steady_input_is_fixed_point() {
        let mut ema = Ema::seeded(512);
        for _ in 0..4 {
            assert_eq!(ema.update(512), 512);
        }
    }

    #[test]
    fn test_weighting_and_truncation() {
        let mut ema = Ema::seeded(100);
        // (100 * 3 + 200) / 4 = 125
        assert_eq!(ema.update(200), 125);
        // (125 * 3 + 0) / 4 = 93.75 -> 93
        assert_eq!(ema.update(0), 93);
    }

    #[test]
    fn test_step_response_converges() {
        let mut ema = Ema::seeded(0);
        let mut last = 0;
        for _ in 0..64 {
            let next = ema.update(1023);
            assert!(next >= last);
            last = next;
        }
        // Truncation stalls three counts short of the target
        assert_eq!(last, 1020);
    }

    #[test]
    fn test_output_stays_in_raw_domain() {
        for prev in (0..=RAW_MAX).step_by(31).chain([RAW_MAX]) {
            for raw in (0..=RAW_MAX).step_by(17).chain([RAW_MAX]) {
                let mut ema = Ema::seeded(prev);
                let filtered = ema.update(raw);
                assert!(filtered <= RAW_MAX);
                assert!(filtered >= prev.min(raw));
                assert!(filtered <= prev.max(raw));
            }
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let mut ema = Ema::seeded(u16::MAX);
        assert_eq!(ema.value(), RAW_MAX);
        assert_eq!(ema.update(u16::MAX), RAW_MAX);
    }
}
