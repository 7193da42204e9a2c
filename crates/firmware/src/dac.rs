//! Output voltage DAC controller
//!
//! Wraps one channel of an [`AnalogOutput`] and owns the range gate: every
//! value coming off the wire is turned into a [`DacCode`] before it gets near
//! the converter, so an out-of-range request never touches the hardware.

use platform::analog::{AnalogOutput, DacChannel, DacCode, OutOfRangeError};

/// DAC controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacError {
    /// Requested value does not fit the converter; nothing was written.
    OutOfRange(u16),
    /// The converter rejected the write.
    Hardware,
}

impl From<OutOfRangeError> for DacError {
    fn from(err: OutOfRangeError) -> Self {
        Self::OutOfRange(err.value)
    }
}

impl core::fmt::Display for DacError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange(value) => {
                write!(f, "DAC value {} exceeds {}", value, DacCode::MAX)
            }
            Self::Hardware => write!(f, "DAC hardware error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DacError {}

/// Single-channel DAC controller.
pub struct DacController<A> {
    dac: A,
    channel: DacChannel,
}

impl<A: AnalogOutput> DacController<A> {
    /// Drive the output voltage from `channel`.
    pub fn new(dac: A, channel: DacChannel) -> Self {
        Self { dac, channel }
    }

    /// Enable the output channel. Done once at startup.
    pub fn enable(&mut self) -> Result<(), DacError> {
        self.dac
            .enable(self.channel)
            .map_err(|_| DacError::Hardware)
    }

    /// Validate `value` and write it to the channel.
    pub fn set_output(&mut self, value: u16) -> Result<DacCode, DacError> {
        let code = DacCode::try_new(value)?;
        self.write(code)?;
        Ok(code)
    }

    /// Drive the channel to zero.
    pub fn reset(&mut self) -> Result<(), DacError> {
        self.write(DacCode::ZERO)
    }

    /// Channel this controller drives.
    pub fn channel(&self) -> DacChannel {
        self.channel
    }

    /// Borrow the underlying converter.
    pub fn output(&self) -> &A {
        &self.dac
    }

    /// Mutably borrow the underlying converter.
    pub fn output_mut(&mut self) -> &mut A {
        &mut self.dac
    }

    fn write(&mut self, code: DacCode) -> Result<(), DacError> {
        self.dac.write(self.channel, code).map_err(|_e| {
            #[cfg(feature = "defmt")]
            defmt::warn!("DAC write failed: {}", defmt::Debug2Format(&_e));
            DacError::Hardware
        })?;

        #[cfg(feature = "defmt")]
        defmt::trace!("DAC code {=u16}", code.get());

        Ok(())
    }
}
