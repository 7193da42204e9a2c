//! DiCo Firmware
//!
//! Serial-controlled output stage for STM32H7: one 10-bit DAC voltage and 32
//! switch lines behind a shift-register chain.
//!
//! # Architecture
//!
//! This firmware follows a layered architecture:
//!
//! ```text
//! Session loop (session)      8-byte request in, 4-byte response out
//!         ↓
//! Dispatcher (dispatch)       opcode → controller calls → status
//!         ↓
//! Controllers (dac, switches)
//!         ↓
//! Platform HAL (embedded-hal, embedded-io, platform::AnalogOutput)
//! ```
//!
//! Everything above the platform traits is generic and runs under `tokio`
//! with `embedded-hal-mock` and `platform::mocks` on the development machine.
//!
//! # Host compatibility
//!
//! The 32-bit switch mask arrives little-endian inside the request frame and
//! is shifted out to the registers most-significant byte first, so bit `n`
//! always drives line `n`. Older host scripts that packed the mask big-endian
//! and relied on the raw wire bytes being shifted out in order will see
//! byte-reversed switch lines. Only the `host` crate's `DicoClient` and the
//! `dico` CLI speak this layout.
//!
//! # Features
//!
//! - `hardware` - Build for STM32H7 target (embassy, defmt)
//! - `defmt` - Log through defmt
//! - `std` - Enable standard library (for host testing)
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)]
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]

pub mod boot;
pub mod dac;
pub mod dispatch;
pub mod session;
pub mod switches;

pub use dac::{DacController, DacError};
pub use dispatch::Dispatcher;
pub use session::{Session, SessionError, StartupError};
pub use switches::{SwitchError, SwitchMatrix};
