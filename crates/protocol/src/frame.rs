//! Request and response frames.
//!
//! All multi-byte integers are little-endian. Decoding a request never fails:
//! every 8-byte pattern is a request, possibly with an unknown opcode or an
//! out-of-range voltage, and both are for the dispatcher to judge.

use crate::command::{Command, Status};
use crate::version::FIRMWARE_VERSION;

/// Size of a request frame on the wire.
pub const REQUEST_LEN: usize = 8;

/// Size of a response frame on the wire.
pub const RESPONSE_LEN: usize = 4;

/// Errors decoding a response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The status byte is not a known [`Status`] code.
    UnknownStatus(u8),
}

#[cfg(feature = "std")]
impl std::error::Error for FrameError {}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnknownStatus(code) => write!(f, "unknown status code {code:#04x}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Request, host → device
// ---------------------------------------------------------------------------

/// A decoded request frame.
///
/// The reserved byte is dropped on decode and written as zero on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    /// Raw opcode byte; see [`Request::command`].
    pub opcode: u8,
    /// Requested DAC code. Valid iff `< DAC_LIMIT`.
    pub voltage: u16,
    /// One bit per switch line; bit `n` drives line `n`.
    pub bitmask: u32,
}

impl Request {
    /// Build a request for a known command.
    #[must_use]
    pub const fn new(command: Command, voltage: u16, bitmask: u32) -> Self {
        Self {
            opcode: command.opcode(),
            voltage,
            bitmask,
        }
    }

    /// The command this request selects, or `None` for an unknown opcode.
    #[must_use]
    pub const fn command(&self) -> Option<Command> {
        Command::from_opcode(self.opcode)
    }

    /// Decode a request from exactly one frame worth of bytes.
    #[must_use]
    pub fn decode(buf: &[u8; REQUEST_LEN]) -> Self {
        let [opcode, _reserved, v0, v1, m0, m1, m2, m3] = *buf;
        Self {
            opcode,
            voltage: u16::from_le_bytes([v0, v1]),
            bitmask: u32::from_le_bytes([m0, m1, m2, m3]),
        }
    }

    /// Encode the request into its wire form.
    #[must_use]
    pub fn encode(&self) -> [u8; REQUEST_LEN] {
        let [v0, v1] = self.voltage.to_le_bytes();
        let [m0, m1, m2, m3] = self.bitmask.to_le_bytes();
        [self.opcode, 0, v0, v1, m0, m1, m2, m3]
    }
}

// ---------------------------------------------------------------------------
// Response, device → host
// ---------------------------------------------------------------------------

/// A response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Result code.
    pub status: Status,
    /// Opcode-dependent payload: firmware version, echoed opcode, or zero.
    pub payload: u16,
}

impl Response {
    /// Success with a zero payload.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            status: Status::Ok,
            payload: 0,
        }
    }

    /// Success carrying [`FIRMWARE_VERSION`].
    #[must_use]
    pub const fn version() -> Self {
        Self {
            status: Status::Ok,
            payload: FIRMWARE_VERSION,
        }
    }

    /// Requested voltage outside the DAC range.
    #[must_use]
    pub const fn dac_range() -> Self {
        Self {
            status: Status::DacRange,
            payload: 0,
        }
    }

    /// Unknown opcode, echoed in the low byte of the payload.
    #[must_use]
    pub const fn unknown_command(opcode: u8) -> Self {
        Self {
            status: Status::UnknownCommand,
            payload: opcode as u16,
        }
    }

    /// A peripheral reported a transfer error.
    #[must_use]
    pub const fn hardware_fault() -> Self {
        Self {
            status: Status::HardwareFault,
            payload: 0,
        }
    }

    /// Encode the response into its wire form.
    #[must_use]
    pub fn encode(&self) -> [u8; RESPONSE_LEN] {
        let [p0, p1] = self.payload.to_le_bytes();
        [self.status.code(), 0, p0, p1]
    }

    /// Decode a response frame.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::UnknownStatus`] when the status byte is not a
    /// known code.
    pub fn decode(buf: &[u8; RESPONSE_LEN]) -> Result<Self, FrameError> {
        let [code, _reserved, p0, p1] = *buf;
        let status = Status::from_code(code).ok_or(FrameError::UnknownStatus(code))?;
        Ok(Self {
            status,
            payload: u16::from_le_bytes([p0, p1]),
        })
    }
}
