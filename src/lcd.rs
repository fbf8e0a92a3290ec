//! HD44780-class character display on an 8-bit parallel bus.
//!
//! Every transfer is a byte strobe: the byte goes on D0-D7, RS picks the
//! command or data register, RW is held low, and EN is pulsed high then low.
//! The controller latches on the falling edge of EN. The busy flag is never
//! read back; each transfer waits a fixed settle time instead.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

/// DDRAM address of the first character of row 1
pub const LINE_1: u8 = 0x80;
/// DDRAM address of the first character of row 2
pub const LINE_2: u8 = 0xC0;
/// Visible characters per row
pub const COLUMNS: usize = 16;

pub const CLEAR_DISPLAY: u8 = 0x01;
pub const ENTRY_MODE_INCREMENT: u8 = 0x06; // Cursor increment, no display shift
pub const DISPLAY_OFF: u8 = 0x08;
pub const DISPLAY_ON: u8 = 0x0C; // Cursor off, blink off
pub const WAKE_UP: u8 = 0x30; // 8-bit interface
pub const FUNCTION_SET: u8 = 0x38; // 8-bit, 2 lines, 5x7 dots

const POWER_ON_DELAY_MS: u32 = 100;
const STROBE_SETUP_US: u32 = 10;
const STROBE_PULSE_US: u32 = 10;
const COMMAND_SETTLE_MS: u32 = 2;
const DATA_SETTLE_MS: u32 = 1;
const LONG_SETTLE_MS: u32 = 5; // Init sequence and clear
const ADDRESS_SETTLE_US: u32 = 100;

const INIT_SEQUENCE: [u8; 8] = [
    WAKE_UP,
    WAKE_UP,
    WAKE_UP,
    FUNCTION_SET,
    DISPLAY_OFF,
    CLEAR_DISPLAY,
    ENTRY_MODE_INCREMENT,
    DISPLAY_ON,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum State {
    Uninitialized,
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Register {
    Command,
    Data,
}

/// Driver for a 16x2 character display.
///
/// All control and data lines share one pin type; on the RP2040 that is a
/// type-erased SIO output. The driver owns its delay source.
pub struct CharLcd<P, D> {
    rs: P,
    rw: P,
    en: P,
    data: [P; 8],
    delay: D,
    state: State,
}

impl<P: OutputPin, D: DelayNs> CharLcd<P, D> {
    /// param rs: register select, low for commands, high for data
    /// param rw: read/write select, held low
    /// param en: enable strobe
    /// param data: D0 through D7
    /// param delay: settle-time source
    pub fn new(rs: P, rw: P, en: P, data: [P; 8], delay: D) -> Self {
        Self {
            rs,
            rw,
            en,
            data,
            delay,
            state: State::Uninitialized,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Runs the power-on sequence and leaves the display on, cleared, with
    /// the cursor hidden. Calling it again repeats the sequence.
    pub fn initialize(&mut self) -> Result<(), P::Error> {
        self.delay.delay_ms(POWER_ON_DELAY_MS);
        for code in INIT_SEQUENCE {
            self.write_command(code)?;
            self.delay.delay_ms(LONG_SETTLE_MS);
        }
        self.state = State::Ready;
        Ok(())
    }

    /// Sends an instruction byte and waits out its execution time
    pub fn write_command(&mut self, code: u8) -> Result<(), P::Error> {
        self.strobe(Register::Command, code)?;
        self.delay.delay_ms(COMMAND_SETTLE_MS);
        Ok(())
    }

    /// Writes one character at the cursor; the cursor advances
    pub fn write_data(&mut self, byte: u8) -> Result<(), P::Error> {
        self.strobe(Register::Data, byte)?;
        self.delay.delay_ms(DATA_SETTLE_MS);
        Ok(())
    }

    /// Moves the cursor to `address` and writes `text` from there.
    /// Stops at a NUL byte. Text longer than the row spills into DDRAM
    /// that is not on screen or onto the other row.
    /// param address: DDRAM set-address command, e.g. [`LINE_1`]
    /// param text: bytes to write
    pub fn write_string(&mut self, address: u8, text: &str) -> Result<(), P::Error> {
        self.write_command(address)?;
        self.delay.delay_us(ADDRESS_SETTLE_US);

        for byte in text.bytes().take_while(|&b| b != 0) {
            self.write_data(byte)?;
        }
        Ok(())
    }

    /// Blanks the display and homes the cursor
    pub fn clear(&mut self) -> Result<(), P::Error> {
        self.write_command(CLEAR_DISPLAY)?;
        self.delay.delay_ms(LONG_SETTLE_MS);
        Ok(())
    }

    /// Returns the pins and delay: (rs, rw, en, data, delay)
    pub fn release(self) -> (P, P, P, [P; 8], D) {
        (self.rs, self.rw, self.en, self.data, self.delay)
    }

    fn strobe(&mut self, register: Register, byte: u8) -> Result<(), P::Error> {
        for (bit, pin) in self.data.iter_mut().enumerate() {
            pin.set_state(PinState::from(byte & (1 << bit) != 0))?;
        }
        match register {
            Register::Command => self.rs.set_low()?,
            Register::Data => self.rs.set_high()?,
        }
        self.rw.set_low()?;
        self.delay.delay_us(STROBE_SETUP_US);

        self.en.set_high()?;
        self.delay.delay_us(STROBE_PULSE_US);
        self.en.set_low()
    }
}
