//! Host-side doubles for the display bus, delays and the sampler.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::sampler::{RawSample, Sampler};

/// One byte latched by the display controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer {
    Command(u8),
    Data(u8),
}

#[derive(Clone, Copy, Debug)]
enum Line {
    Rs,
    Rw,
    En,
    Data(u8),
}

struct Controller {
    rs: bool,
    rw: bool,
    en: bool,
    bus: u8,
    ddram: [u8; 128],
    address: u8,
    display_on: bool,
    read_strobe: bool,
    transfers: Vec<Transfer>,
}

impl Controller {
    fn drive(&mut self, line: Line, high: bool) {
        match line {
            Line::Rs => self.rs = high,
            Line::Rw => self.rw = high,
            Line::Data(bit) => {
                if high {
                    self.bus |= 1 << bit;
                } else {
                    self.bus &= !(1 << bit);
                }
            }
            Line::En => {
                let falling = self.en && !high;
                self.en = high;
                if falling {
                    self.latch();
                }
            }
        }
    }

    fn latch(&mut self) {
        if self.rw {
            self.read_strobe = true;
            return;
        }
        if self.rs {
            self.transfers.push(Transfer::Data(self.bus));
            self.ddram[usize::from(self.address)] = self.bus;
            self.address = (self.address + 1) & 0x7F;
        } else {
            self.transfers.push(Transfer::Command(self.bus));
            self.execute(self.bus);
        }
    }

    fn execute(&mut self, code: u8) {
        if code & 0x80 != 0 {
            self.address = code & 0x7F;
        } else if code & 0x40 != 0 || code & 0x20 != 0 || code & 0x10 != 0 {
            // CGRAM address, function set, cursor shift
        } else if code & 0x08 != 0 {
            self.display_on = code & 0x04 != 0;
        } else if code & 0x04 != 0 {
            // Entry mode
        } else if code & 0x02 != 0 {
            self.address = 0;
        } else if code & 0x01 != 0 {
            self.ddram = [b' '; 128];
            self.address = 0;
        }
    }
}

/// Minimal HD44780 model that decodes EN strobes into DDRAM writes.
#[derive(Clone)]
pub struct DisplayModel {
    inner: Rc<RefCell<Controller>>,
}

impl DisplayModel {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Controller {
                rs: false,
                rw: false,
                en: false,
                bus: 0,
                ddram: [b' '; 128],
                address: 0,
                display_on: false,
                read_strobe: false,
                transfers: Vec::new(),
            })),
        }
    }

    /// (rs, rw, en, data) wired to this model
    pub fn pins(&self) -> (ModelPin, ModelPin, ModelPin, [ModelPin; 8]) {
        let pin = |line| ModelPin {
            line,
            controller: self.inner.clone(),
        };
        let data = core::array::from_fn(|bit| pin(Line::Data(bit as u8)));
        (pin(Line::Rs), pin(Line::Rw), pin(Line::En), data)
    }

    /// The 16 visible characters of row 0 or 1
    pub fn row(&self, row: usize) -> String {
        let base = if row == 0 { 0x00 } else { 0x40 };
        let inner = self.inner.borrow();
        inner.ddram[base..base + 16].iter().map(|&b| b as char).collect()
    }

    pub fn address(&self) -> u8 {
        self.inner.borrow().address
    }

    pub fn display_on(&self) -> bool {
        self.inner.borrow().display_on
    }

    pub fn saw_read_strobe(&self) -> bool {
        self.inner.borrow().read_strobe
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.inner.borrow().transfers.clone()
    }

    pub fn reset_transfers(&self) {
        self.inner.borrow_mut().transfers.clear();
    }
}

/// One control or data line of a [`DisplayModel`]
pub struct ModelPin {
    line: Line,
    controller: Rc<RefCell<Controller>>,
}

impl ErrorType for ModelPin {
    type Error = Infallible;
}

impl OutputPin for ModelPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.controller.borrow_mut().drive(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.controller.borrow_mut().drive(self.line, true);
        Ok(())
    }
}

/// Delay that returns immediately and records each request in nanoseconds.
/// Clones share the same record.
#[derive(Clone, Default)]
pub struct TallyDelay {
    calls: Rc<RefCell<Vec<u64>>>,
}

impl TallyDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls_ns(&self) -> Vec<u64> {
        self.calls.borrow().clone()
    }

    pub fn total_ns(&self) -> u64 {
        self.calls.borrow().iter().sum()
    }
}

impl DelayNs for TallyDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.borrow_mut().push(u64::from(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.calls.borrow_mut().push(u64::from(us) * 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.borrow_mut().push(u64::from(ms) * 1_000_000);
    }
}

/// Replays a fixed list of readings, then repeats the last one.
pub struct ScriptedSampler {
    samples: Vec<RawSample>,
    next: usize,
    channels: Vec<u8>,
    initialized: bool,
}

impl ScriptedSampler {
    pub fn new(samples: &[RawSample]) -> Self {
        Self {
            samples: samples.to_vec(),
            next: 0,
            channels: Vec::new(),
            initialized: false,
        }
    }

    /// Channels requested so far, in order
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }

    pub fn initialized(&self) -> bool {
        self.initialized
    }
}

impl Sampler for ScriptedSampler {
    type Channel = u8;

    fn initialize(&mut self) {
        self.initialized = true;
    }

    fn read_channel(&mut self, channel: &mut u8) -> RawSample {
        self.channels.push(*channel);
        let index = self.next.min(self.samples.len().saturating_sub(1));
        self.next += 1;
        self.samples.get(index).copied().unwrap_or(0)
    }
}
