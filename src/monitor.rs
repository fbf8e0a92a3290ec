//! The sample → filter → convert → display → alert loop.
//!
//! [`Monitor`] owns every peripheral and all state that lives across loop
//! iterations. It boots once and then runs until power is lost.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::filter::Ema;
use crate::indicators::{Indicators, Tier};
use crate::lcd::CharLcd;
use crate::ppm::to_concentration;
use crate::preferences::Preferences;
use crate::rendering::{format_ppm, render_screen, render_splash, Row};
use crate::sampler::{RawSample, Sampler};

/// A pin write failed somewhere in the loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Error {
    Display,
    Indicator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Phase {
    Booting,
    Running,
}

/// Everything one loop iteration measured and decided
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub raw: RawSample,
    pub filtered: RawSample,
    pub ppm: f32,
    pub tier: Tier,
}

/// Control-loop context for a single sensor and a single display.
///
/// `LD` is the display's own delay, `D` the one used for boot waits, buzzer
/// pulses and the pause between cycles.
pub struct Monitor<P, LD, S: Sampler, O, D> {
    lcd: CharLcd<P, LD>,
    sampler: S,
    channel: S::Channel,
    indicators: Indicators<O>,
    delay: D,
    preferences: Preferences,
    filter: Option<Ema>,
}

impl<P, LD, S, O, D> Monitor<P, LD, S, O, D>
where
    P: OutputPin,
    LD: DelayNs,
    S: Sampler,
    O: OutputPin,
    D: DelayNs,
{
    pub fn new(
        lcd: CharLcd<P, LD>,
        sampler: S,
        channel: S::Channel,
        indicators: Indicators<O>,
        delay: D,
        preferences: Preferences,
    ) -> Self {
        Self {
            lcd,
            sampler,
            channel,
            indicators,
            delay,
            preferences,
            filter: None,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.filter {
            None => Phase::Booting,
            Some(_) => Phase::Running,
        }
    }

    /// One-time start-up: outputs off, power-on wait, display and ADC
    /// bring-up, splash message, then seeds the filter with a real sample.
    /// returns the seed sample
    pub fn boot(&mut self) -> Result<RawSample, Error> {
        self.indicators.all_off().map_err(|_| Error::Indicator)?;
        self.delay.delay_ms(self.preferences.power_on_delay_ms);

        self.lcd.initialize().map_err(|_| Error::Display)?;
        self.sampler.initialize();

        render_splash(&mut self.lcd).map_err(|_| Error::Display)?;
        self.delay.delay_ms(self.preferences.splash_hold_ms);
        // Drop the splash so its tail does not show behind the shorter value line
        self.lcd.clear().map_err(|_| Error::Display)?;

        let seed = self.sampler.read_channel(&mut self.channel);
        self.filter = Some(Ema::seeded(seed));
        self.delay.delay_ms(self.preferences.seed_settle_ms);
        Ok(seed)
    }

    /// One loop iteration without the trailing pause. Blocks for the whole
    /// buzzer pattern. Seeds the filter from this sample if [`boot`] was
    /// skipped.
    ///
    /// [`boot`]: Monitor::boot
    pub fn step(&mut self) -> Result<Reading, Error> {
        let raw = self.sampler.read_channel(&mut self.channel);
        let filtered = self
            .filter
            .get_or_insert_with(|| Ema::seeded(raw))
            .update(raw);
        let ppm = to_concentration(filtered);
        let tier = self.preferences.thresholds.classify(ppm);

        render_screen(&format_ppm(ppm), Row::Bottom, &mut self.lcd).map_err(|_| Error::Display)?;

        self.indicators.show(tier).map_err(|_| Error::Indicator)?;
        render_screen(tier.status_line(), Row::Top, &mut self.lcd).map_err(|_| Error::Display)?;
        self.indicators
            .sound(tier, &mut self.delay)
            .map_err(|_| Error::Indicator)?;

        Ok(Reading {
            raw,
            filtered,
            ppm,
            tier,
        })
    }

    /// Runs [`step`] forever, handing each reading to `on_reading` before the
    /// inter-cycle pause. Only returns if a pin write fails.
    ///
    /// [`step`]: Monitor::step
    pub fn run<F: FnMut(&Reading)>(&mut self, mut on_reading: F) -> Result<Infallible, Error> {
        loop {
            let reading = self.step()?;
            on_reading(&reading);
            self.delay.delay_ms(self.preferences.cycle_delay_ms);
        }
    }

    /// Returns (lcd, sampler, indicators, delay)
    pub fn release(self) -> (CharLcd<P, LD>, S, Indicators<O>, D) {
        (self.lcd, self.sampler, self.indicators, self.delay)
    }
}
