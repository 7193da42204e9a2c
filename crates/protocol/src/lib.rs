//! DiCo serial wire protocol.
//!
//! Fixed-size binary frames exchanged between the host and the output device
//! over a plain byte stream. There is no delimiter and no checksum: framing is
//! purely by length, one request in flight at a time.
//!
//! ```text
//! Request  (8 bytes)                    Response (4 bytes)
//! [0]    opcode       u8                [0]    status     u8
//! [1]    reserved     u8 (0 on write)   [1]    reserved   u8 (always 0)
//! [2..4] voltage      u16 le            [2..4] payload    u16 le
//! [4..8] bitmask      u32 le
//! ```
//!
//! This crate is `no_std` and shared by the firmware and the host driver, so
//! both ends agree on layout and byte order by construction.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub mod command;
pub mod frame;
pub mod version;

pub use command::{Command, Status};
pub use frame::{FrameError, Request, Response, REQUEST_LEN, RESPONSE_LEN};
pub use version::{FirmwareVersion, FIRMWARE_VERSION};

/// Largest value the 10-bit DAC can represent, plus one.
///
/// Any `voltage` field `>= DAC_LIMIT` is a range error.
pub const DAC_LIMIT: u16 = 0x400;
