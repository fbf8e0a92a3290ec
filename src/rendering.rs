use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::String;
use ufmt::uwrite;

use crate::lcd::{CharLcd, COLUMNS, LINE_1, LINE_2};
use crate::ppm::sanitize;

/// One row worth of text
pub type DisplayLine = String<COLUMNS>;

pub const SPLASH_TITLE: &str = "AIR QUALITY";
pub const SPLASH_SUBTITLE: &str = "Initializing...";

/// Width of the value line including trailing padding
pub const VALUE_WIDTH: usize = 12;
/// Largest whole part the value line can show
const MAX_WHOLE: u32 = 9999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Row {
    /// Status row
    Top,
    /// Value row
    Bottom,
}

impl Row {
    /// DDRAM set-address command for the start of this row
    pub fn address(self) -> u8 {
        match self {
            Row::Top => LINE_1,
            Row::Bottom => LINE_2,
        }
    }
}

/// Formats a concentration as `PPM: <whole>.<tenth>` padded to [`VALUE_WIDTH`].
/// The tenth is truncated, not rounded. Negative and NaN values show as 0.0,
/// values past 9999.9 are pinned there.
/// param ppm: concentration to show
pub fn format_ppm(ppm: f32) -> DisplayLine {
    let ppm = sanitize(ppm);
    let whole = (ppm as u32).min(MAX_WHOLE);
    let tenth = (((ppm - whole as f32) * 10.0) as u32).min(9);

    let mut line = DisplayLine::new();
    uwrite!(line, "PPM: {}.{}", whole, tenth).unwrap(); // Max str size 11
    while line.len() < VALUE_WIDTH {
        line.push(' ').unwrap();
    }
    line
}

/// Writes `line` at the start of `row` without clearing the rest of the screen.
/// Characters past the written text keep whatever was there before.
/// param line: text to render, at most 16 characters
/// param row: which row to write
/// param lcd: LCD instance
pub fn render_screen<P: OutputPin, D: DelayNs>(
    line: &str,
    row: Row,
    lcd: &mut CharLcd<P, D>,
) -> Result<(), P::Error> {
    lcd.write_string(row.address(), line)
}

/// Clears the screen and shows the boot message on both rows
pub fn render_splash<P: OutputPin, D: DelayNs>(lcd: &mut CharLcd<P, D>) -> Result<(), P::Error> {
    lcd.clear()?;
    render_screen(SPLASH_TITLE, Row::Top, lcd)?;
    render_screen(SPLASH_SUBTITLE, Row::Bottom, lcd)
}
