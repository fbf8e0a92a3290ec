/// Concentration below this is safe
pub const SAFE_THRESHOLD: f32 = 40.0;
/// Concentration below this is a warning, at or above it is danger
pub const WARNING_THRESHOLD: f32 = 80.0;

/// ADC reference voltage in volts
pub const REFERENCE_VOLTAGE: f32 = 5.0;
/// Full-scale count of the 10-bit ADC domain
pub const ADC_FULL_SCALE: f32 = 1023.0;
/// Volts to displayed PPM
pub const DISPLAY_SCALE_FACTOR: f32 = 100.0;

pub const POWER_ON_DELAY_MS: u32 = 500; // LCD and sensor warm-up
pub const SPLASH_HOLD_MS: u32 = 1000;
pub const SEED_SETTLE_MS: u32 = 100;
pub const CYCLE_DELAY_MS: u32 = 500; // Update every half second

/// Preferences holds the fixed tuning of the control loop.
/// thresholds: tier boundaries in displayed PPM
/// cycle_delay_ms: pause between two loop iterations
/// power_on_delay_ms: wait before any peripheral is touched
/// splash_hold_ms: how long the boot message stays up
/// seed_settle_ms: pause after the filter seed sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preferences {
    pub thresholds: Thresholds,
    pub cycle_delay_ms: u32,
    pub power_on_delay_ms: u32,
    pub splash_hold_ms: u32,
    pub seed_settle_ms: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            thresholds: Thresholds::default(),
            cycle_delay_ms: CYCLE_DELAY_MS,
            power_on_delay_ms: POWER_ON_DELAY_MS,
            splash_hold_ms: SPLASH_HOLD_MS,
            seed_settle_ms: SEED_SETTLE_MS,
        }
    }
}

/// Tier boundaries. `safe` is the exclusive upper bound of the safe tier,
/// `warning` the exclusive upper bound of the warning tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thresholds {
    pub safe: f32,
    pub warning: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            safe: SAFE_THRESHOLD,
            warning: WARNING_THRESHOLD,
        }
    }
}
