#![no_std]
#![no_main]

use bsp::entry;
use defmt::*;
use defmt_rtt as _;
use panic_probe as _;

// Provide an alias for our BSP so we can switch targets quickly.
// Uncomment the BSP you included in Cargo.toml, the rest of the code does not need to change.
use rp_pico as bsp;

use air_quality_monitor::indicators::Indicators;
use air_quality_monitor::lcd::CharLcd;
use air_quality_monitor::monitor::Monitor;
use air_quality_monitor::preferences::Preferences;
use air_quality_monitor::sampler::rp2040::AdcSampler;
use bsp::hal::{
    adc::{Adc, AdcPin},
    clocks::init_clocks_and_plls,
    gpio::{bank0::Gpio26, FunctionSioInput, Pin, PullNone},
    pac,
    watchdog::Watchdog,
};
use rp_pico::hal;
use rp_pico::hal::Timer;

/// Gas sensor output on GPIO26 (AIN0)
type SensorPin = AdcPin<Pin<Gpio26, FunctionSioInput, PullNone>>;

/// Push-pull output with its pin number erased, so every line shares one type
macro_rules! output {
    ($pin:expr) => {
        $pin.into_push_pull_output().into_dyn_pin()
    };
}

#[entry]
fn main() -> ! {
    info!("Air quality monitor starting");
    // Grab our singleton objects
    let mut pac = pac::Peripherals::take().unwrap();

    // Set up the watchdog driver - needed by the clock setup code
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure the clocks
    //
    // The default is to generate a 125 MHz system clock and a 48 MHz ADC clock
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // The single-cycle I/O block controls our GPIO pins
    let sio = hal::Sio::new(pac.SIO);

    // Set the pins up according to their function on this particular board
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let delay = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // Set up LCD: RS, RW, EN, then D0-D7
    let lcd = CharLcd::new(
        output!(pins.gpio0),
        output!(pins.gpio1),
        output!(pins.gpio2),
        [
            output!(pins.gpio3),
            output!(pins.gpio4),
            output!(pins.gpio5),
            output!(pins.gpio6),
            output!(pins.gpio7),
            output!(pins.gpio8),
            output!(pins.gpio9),
            output!(pins.gpio10),
        ],
        delay,
    );

    // Set up green, yellow and red LEDs and the buzzer
    let indicators = Indicators::new(
        output!(pins.gpio11),
        output!(pins.gpio12),
        output!(pins.gpio13),
        output!(pins.gpio14),
    );

    // Set up ADC; AdcPin also turns off the pad's digital input
    let adc = Adc::new(pac.ADC, &mut pac.RESETS);
    let sensor: SensorPin = AdcPin::new(pins.gpio26.into_floating_input()).unwrap();
    let sampler: AdcSampler<SensorPin, Timer> = AdcSampler::new(adc, delay);

    let mut monitor = Monitor::new(
        lcd,
        sampler,
        sensor,
        indicators,
        delay,
        Preferences::default(),
    );

    match monitor.boot() {
        Ok(seed) => info!("Air quality monitor ready, seed sample {}", seed),
        Err(error) => error!("Boot failed: {}", error),
    }

    match monitor.run(|reading| {
        debug!(
            "raw: {}, filtered: {}, ppm: {}, tier: {}",
            reading.raw, reading.filtered, reading.ppm, reading.tier
        );
    }) {
        Ok(never) => match never {},
        Err(error) => error!("Control loop stopped: {}", error),
    }

    loop {
        cortex_m::asm::wfi();
    }
}
