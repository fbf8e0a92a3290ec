//! Alert tiers and the LEDs and buzzer that announce them.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::preferences::Thresholds;

const WARNING_PULSE_MS: u32 = 100;
const DANGER_PULSE_MS: u32 = 50;
const DANGER_PULSES: usize = 3;

/// Discrete alert level derived from the concentration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Tier {
    Safe,
    Warning,
    Danger,
}

impl Tier {
    /// Status row text, exactly one row wide
    pub fn status_line(self) -> &'static str {
        match self {
            Tier::Safe => "AIR QUALITY:SAFE",
            Tier::Warning => "AIR QUAL:WARNING",
            Tier::Danger => "AIR QUAL:DANGER ",
        }
    }
}

impl Thresholds {
    /// Maps a concentration to its tier. Each boundary belongs to the higher
    /// tier. NaN fails both comparisons and lands in Danger.
    pub fn classify(&self, ppm: f32) -> Tier {
        if ppm < self.safe {
            Tier::Safe
        } else if ppm < self.warning {
            Tier::Warning
        } else {
            Tier::Danger
        }
    }
}

/// Classifies against the default 40/80 thresholds
pub fn classify(ppm: f32) -> Tier {
    Thresholds::default().classify(ppm)
}

/// Green, yellow and red tier LEDs plus the buzzer, all active-high.
pub struct Indicators<O> {
    green: O,
    yellow: O,
    red: O,
    buzzer: O,
}

impl<O: OutputPin> Indicators<O> {
    pub fn new(green: O, yellow: O, red: O, buzzer: O) -> Self {
        Self {
            green,
            yellow,
            red,
            buzzer,
        }
    }

    /// Drives every LED and the buzzer low
    pub fn all_off(&mut self) -> Result<(), O::Error> {
        self.green.set_low()?;
        self.yellow.set_low()?;
        self.red.set_low()?;
        self.buzzer.set_low()
    }

    /// Clears all outputs, then lights the one LED that belongs to `tier`
    pub fn show(&mut self, tier: Tier) -> Result<(), O::Error> {
        self.all_off()?;
        match tier {
            Tier::Safe => self.green.set_high(),
            Tier::Warning => self.yellow.set_high(),
            Tier::Danger => self.red.set_high(),
        }
    }

    /// Plays the buzzer pattern for `tier`, blocking until it is done.
    /// Safe is silent, Warning is two 100 ms beeps, Danger three 50 ms beeps.
    /// The buzzer is low when this returns.
    pub fn sound(&mut self, tier: Tier, delay: &mut impl DelayNs) -> Result<(), O::Error> {
        match tier {
            Tier::Safe => Ok(()),
            Tier::Warning => {
                self.beep(WARNING_PULSE_MS, delay)?;
                self.buzzer.set_high()?;
                delay.delay_ms(WARNING_PULSE_MS);
                self.buzzer.set_low()
            }
            Tier::Danger => {
                for _ in 0..DANGER_PULSES {
                    self.beep(DANGER_PULSE_MS, delay)?;
                }
                Ok(())
            }
        }
    }

    /// Returns (green, yellow, red, buzzer)
    pub fn release(self) -> (O, O, O, O) {
        (self.green, self.yellow, self.red, self.buzzer)
    }

    fn beep(&mut self, ms: u32, delay: &mut impl DelayNs) -> Result<(), O::Error> {
        self.buzzer.set_high()?;
        delay.delay_ms(ms);
        self.buzzer.set_low()?;
        delay.delay_ms(ms);
        Ok(())
    }
}
