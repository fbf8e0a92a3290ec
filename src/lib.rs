#![cfg_attr(not(test), no_std)]

//! # air-quality-monitor
//! ## A single-sensor gas monitor for the Raspberry Pi Pico
//!
//! Features:
//! - Polled analog sampling of a gas sensor
//! - 75/25 moving-average smoothing
//! - Pseudo-PPM readout on a 16x2 character LCD (8-bit parallel bus)
//! - Safe / Warning / Danger tiers with LEDs and buzzer patterns
//!
//! Everything except the RP2040 ADC driver runs on the host:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```

pub mod filter;
pub mod indicators;
pub mod lcd;
pub mod monitor;
pub mod ppm;
pub mod preferences;
pub mod rendering;
pub mod sampler;

#[cfg(test)]
mod testing;
