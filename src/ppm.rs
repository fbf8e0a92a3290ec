//! Raw reading to displayed concentration.
//!
//! The map is a straight line through the origin and is only a placeholder:
//! a real deployment has to fit the sensor's own response curve.

use crate::preferences::{ADC_FULL_SCALE, DISPLAY_SCALE_FACTOR, REFERENCE_VOLTAGE};
use crate::sampler::RawSample;

/// Converts a filtered reading to pseudo-PPM
pub fn to_concentration(filtered: RawSample) -> f32 {
    sanitize(volts_to_ppm(f32::from(filtered) * REFERENCE_VOLTAGE / ADC_FULL_SCALE))
}

fn volts_to_ppm(volts: f32) -> f32 {
    volts * DISPLAY_SCALE_FACTOR
}

/// Clamps a concentration to a finite, non-negative value.
/// NaN and negative values become 0.0, +inf becomes f32::MAX.
pub fn sanitize(ppm: f32) -> f32 {
    if ppm.is_nan() || ppm <= 0.0 {
        0.0
    } else {
        ppm.min(f32::MAX)
    }
}
