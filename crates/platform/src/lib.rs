//! Hardware Abstraction Layer (HAL) for the DiCo output device
//!
//! This crate provides the trait-based abstractions the firmware needs on top
//! of `embedded-hal`, enabling development and testing without physical
//! hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Session loop + dispatcher (firmware crate)
//!         ↓
//! Controllers (switch matrix, DAC)
//!         ↓
//! Platform HAL (this crate + embedded-hal / embedded-io traits)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! `embedded-hal` already covers SPI, GPIO and delays, and `embedded-io-async`
//! covers the serial byte stream. What is left here:
//!
//! - [`analog`] - DAC output trait and the validated [`DacCode`] newtype
//! - [`peripheral`] - serial and SPI link configuration
//! - [`config`] - device constants shared by firmware and host tooling
//! - `mocks` - in-memory serial link and DAC for host tests (`std` / `test`)
//!
//! # Features
//!
//! - `std`: Enable standard library support (for testing)
//! - `defmt`: Enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod analog;
pub mod config;
pub mod peripheral;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use analog::{AnalogOutput, DacChannel, DacCode, OutOfRangeError};
pub use peripheral::{BitOrder, DataBits, Parity, SpiConfig, SpiMode, StopBits, UartConfig};
