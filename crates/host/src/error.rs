//! Client error type

use protocol::{FrameError, Status};
use thiserror_no_std::Error;

/// Everything that can go wrong talking to the device.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Serial link failure (includes read timeouts from the port).
    #[error("serial link: {0}")]
    Io(#[from] std::io::Error),

    /// The device answered with a status byte this driver does not know.
    #[error("malformed response: {0}")]
    Frame(#[from] FrameError),

    /// The device rejected the request.
    #[error("device: {0}")]
    Device(Status),

    /// Voltage cannot be represented by the DAC; nothing was sent.
    #[error("voltage {volts} V outside 0..={full_scale} V")]
    VoltageOutOfRange {
        /// Requested voltage
        volts: f32,
        /// Converter full scale
        full_scale: f32,
    },

    /// Header pin index past the end of the pin map; nothing was sent.
    #[error("no header pin {0} (valid: 0..=31)")]
    NoSuchPin(u8),

    /// `set_state` was called with neither pins nor a voltage.
    #[error("at least one of pins, voltage is required")]
    NothingToSet,
}
