//! Blocking single-channel analog sampling.
//!
//! Conversions are polled to completion by the caller. No interrupt handler
//! touches the result, so there is no shared sample state to guard.

/// A reading in the 10-bit, right-justified ADC domain
pub type RawSample = u16;

/// Largest legal [`RawSample`]
pub const RAW_MAX: RawSample = 1023;

const RAW_BITS: u8 = 10;

/// Wait between selecting a channel and starting a conversion
pub const ACQUISITION_TIME_US: u32 = 20;
/// Wait after enabling the converter so its reference can settle
pub const REFERENCE_SETTLE_MS: u32 = 20;

/// Resolution of the RP2040 SAR converter
pub const CONVERSION_BITS: u8 = 12;

/// An ADC that can be pointed at a channel and read synchronously.
pub trait Sampler {
    /// Typed channel selector for this converter
    type Channel;

    /// Lets the converter's reference settle after power-up.
    /// Converters that need no start-up do nothing.
    fn initialize(&mut self) {}

    /// Selects `channel`, waits out the acquisition time, converts and blocks
    /// until the result is ready.
    /// returns the conversion in the 10-bit domain
    fn read_channel(&mut self, channel: &mut Self::Channel) -> RawSample;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    type Channel = S::Channel;

    fn initialize(&mut self) {
        (**self).initialize()
    }

    fn read_channel(&mut self, channel: &mut Self::Channel) -> RawSample {
        (**self).read_channel(channel)
    }
}

/// Drops the low bits of a 12-bit conversion so it lands in [`RawSample`]
pub fn to_raw_domain(conversion: u16) -> RawSample {
    (conversion >> (CONVERSION_BITS - RAW_BITS)).min(RAW_MAX)
}

#[cfg(target_arch = "arm")]
pub mod rp2040 {
    use core::convert::Infallible;
    use core::marker::PhantomData;

    use embedded_hal::delay::DelayNs;
    use embedded_hal_0_2::adc::{Channel, OneShot};
    use rp_pico::hal::adc::Adc;

    use super::{to_raw_domain, RawSample, Sampler, ACQUISITION_TIME_US, REFERENCE_SETTLE_MS};

    /// Polls the HAL's one-shot ADC. `P` is the channel type it reads,
    /// usually an `AdcPin` on GPIO26-GPIO29.
    pub struct AdcSampler<P, D> {
        adc: Adc,
        delay: D,
        channel: PhantomData<P>,
    }

    impl<P, D: DelayNs> AdcSampler<P, D> {
        /// `adc` is already out of reset and enabled by [`Adc::new`]
        pub fn new(adc: Adc, delay: D) -> Self {
            Self {
                adc,
                delay,
                channel: PhantomData,
            }
        }
    }

    impl<P, D> Sampler for AdcSampler<P, D>
    where
        P: Channel<Adc>,
        Adc: OneShot<Adc, u16, P, Error = Infallible>,
        D: DelayNs,
    {
        type Channel = P;

        fn initialize(&mut self) {
            self.delay.delay_ms(REFERENCE_SETTLE_MS);
        }

        fn read_channel(&mut self, channel: &mut P) -> RawSample {
            self.delay.delay_us(ACQUISITION_TIME_US);
            match nb::block!(self.adc.read(channel)) {
                Ok(conversion) => to_raw_domain(conversion),
                Err(never) => match never {},
            }
        }
    }
}
