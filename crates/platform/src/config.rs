//! Device configuration and constants
//!
//! Central values shared by the firmware and host tooling. Timing constants
//! are minimums taken from the board bring-up notes; raise them, never lower
//! them.

/// The device name
pub const DEVICE_NAME: &str = "DiCo";

/// Crate version (synchronized with Cargo.toml)
pub const DEVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Serial link baud rate expected by the host driver.
pub const LINK_BAUD_RATE: u32 = 57_600;

/// SPI clock for the switch shift register.
pub const SWITCH_SPI_FREQUENCY_HZ: u32 = 1_000_000;

/// Chip-select hold time after the last SPI byte, before the rising edge
/// latches the shift register outputs.
pub const SWITCH_LATCH_SETTLE_US: u32 = 5;

/// Startup settling delay between clearing the switches and zeroing the DAC.
pub const RESET_SETTLE_MS: u32 = 5;
