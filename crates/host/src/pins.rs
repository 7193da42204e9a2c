//! Header pin to switch line mapping.
//!
//! The header is numbered straight through, but the board routes every
//! second group of four lines in reverse: pins 4-7 land on lines 7, 6, 5, 4,
//! and so on.

use crate::error::ClientError;

/// `CHANNEL_MAP[pin]` is the switch line wired to header `pin`.
pub const CHANNEL_MAP: [u8; 32] = [
    0, 1, 2, 3, //
    7, 6, 5, 4, //
    8, 9, 10, 11, //
    15, 14, 13, 12, //
    16, 17, 18, 19, //
    23, 22, 21, 20, //
    24, 25, 26, 27, //
    31, 30, 29, 28,
];

/// Build the switch mask that closes exactly `pins`.
///
/// Repeated pins are harmless. An unknown pin fails the whole call.
pub fn mask_from_pins(pins: &[u8]) -> Result<u32, ClientError> {
    pins.iter().try_fold(0u32, |mask, &pin| {
        let line = CHANNEL_MAP
            .get(usize::from(pin))
            .ok_or(ClientError::NoSuchPin(pin))?;
        Ok(mask | 1u32.wrapping_shl(u32::from(*line)))
    })
}
