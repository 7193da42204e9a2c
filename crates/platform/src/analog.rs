//! Analog output (DAC) abstraction.
//!
//! `embedded-hal` 1.0 has no DAC trait, so the firmware talks to the converter
//! through [`AnalogOutput`]. Values travel as [`DacCode`], which can only hold
//! codes the 10-bit converter can represent; the range check happens once,
//! when the code is built, and never again at the register write.

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u16,
    /// The inclusive minimum allowed value.
    pub min: u16,
    /// The inclusive maximum allowed value.
    pub max: u16,
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} outside {}..={}",
            self.value, self.min, self.max
        )
    }
}

// ── DacCode ──────────────────────────────────────────────────────────────────

/// A 10-bit DAC code.
///
/// Wraps a `u16` with the invariant `value <= DacCode::MAX` (1023).
/// Construct with [`DacCode::try_new`]; there is no clamping constructor,
/// since silently clamping a requested output voltage is never what the host
/// wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct DacCode(u16);

impl DacCode {
    /// Largest representable code.
    pub const MAX: u16 = 0x3FF;

    /// Code for 0 V.
    pub const ZERO: Self = Self(0);

    /// Create a `DacCode`, returning an error if `value > 1023`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > DacCode::MAX`.
    pub const fn try_new(value: u16) -> Result<Self, OutOfRangeError> {
        if value > Self::MAX {
            Err(OutOfRangeError {
                value,
                min: 0,
                max: Self::MAX,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the raw code (0–1023).
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for DacCode {
    type Error = OutOfRangeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DacCode> for u16 {
    fn from(code: DacCode) -> Self {
        code.get()
    }
}

// ── Channel ──────────────────────────────────────────────────────────────────

/// DAC output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacChannel {
    /// Channel 0: drives the programmable output rail.
    Ch0,
    /// Channel 1: unused on the DiCo board.
    Ch1,
}

// ── Trait ────────────────────────────────────────────────────────────────────

/// Analog output trait.
///
/// Register writes on a DAC complete immediately, so the trait is synchronous,
/// like `embedded_hal::digital::OutputPin`.
pub trait AnalogOutput {
    /// Error type
    type Error: core::fmt::Debug;

    /// Enable the output buffer of `channel`.
    fn enable(&mut self, channel: DacChannel) -> Result<(), Self::Error>;

    /// Write `code` to `channel`.
    fn write(&mut self, channel: DacChannel, code: DacCode) -> Result<(), Self::Error>;
}
