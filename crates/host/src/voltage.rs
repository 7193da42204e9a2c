//! Volts ↔ DAC code conversion.

use protocol::DAC_LIMIT;

use crate::error::ClientError;

/// Output voltage at DAC code [`DAC_LIMIT`].
pub const FULL_SCALE_VOLTS: f32 = 15.0;

/// Convert `volts` to a DAC code, rounding down.
///
/// `FULL_SCALE_VOLTS` itself converts to [`DAC_LIMIT`] (1024), which is
/// still sent; the device answers it with a range error. Anything that
/// would convert past that, and negative or non-finite input, is refused
/// here.
pub fn volts_to_code(volts: f32) -> Result<u16, ClientError> {
    let limit = f32::from(DAC_LIMIT);
    let code = (limit * volts / FULL_SCALE_VOLTS).floor();
    if !code.is_finite() || code < 0.0 || code > limit {
        return Err(ClientError::VoltageOutOfRange {
            volts,
            full_scale: FULL_SCALE_VOLTS,
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let code = code as u16;
    Ok(code)
}

/// Nominal output voltage for `code`.
pub fn code_to_volts(code: u16) -> f32 {
    f32::from(code) / f32::from(DAC_LIMIT) * FULL_SCALE_VOLTS
}
