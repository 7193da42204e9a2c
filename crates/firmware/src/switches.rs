//! 32-line switch matrix driver
//!
//! The switches sit behind a chain of serial-in/parallel-out shift registers
//! on a write-only SPI bus. A frame is the full 32-bit mask, shifted out with
//! chip-select held low; the rising edge of chip-select latches the new state
//! onto all 32 lines at once.
//!
//! Bit `n` of the mask drives line `n`. The mask goes out most-significant
//! byte first on an MSB-first bus, so line 31 is the first bit on the wire
//! and line 0 the last.
//!
//! This is not the raw wire byte order; see the crate docs on host
//! compatibility.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;
use platform::config::SWITCH_LATCH_SETTLE_US;

/// Switch matrix errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchError {
    /// SPI transfer failed
    Spi,
    /// Chip-select pin could not be driven
    ChipSelect,
}

impl core::fmt::Display for SwitchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi => write!(f, "switch SPI transfer failed"),
            Self::ChipSelect => write!(f, "switch chip-select pin error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SwitchError {}

/// Shift-register switch matrix.
///
/// Owns the SPI bus outright (no other device shares it), the chip-select pin
/// and a delay for the latch settle time.
pub struct SwitchMatrix<SPI, CS, D> {
    spi: SPI,
    cs: CS,
    delay: D,
}

impl<SPI, CS, D> SwitchMatrix<SPI, CS, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    /// Create a driver. Chip-select is expected to be idle (high) already.
    pub fn new(spi: SPI, cs: CS, delay: D) -> Self {
        Self { spi, cs, delay }
    }

    /// Latch `mask` onto the switch lines.
    ///
    /// Chip-select is released again even when the transfer fails, so the
    /// next frame starts from a clean edge.
    pub async fn set_mask(&mut self, mask: u32) -> Result<(), SwitchError> {
        self.cs.set_low().map_err(|_| SwitchError::ChipSelect)?;
        let shifted = self.shift_out(mask).await;
        let released = self.cs.set_high().map_err(|_| SwitchError::ChipSelect);

        #[cfg(feature = "defmt")]
        if shifted.is_ok() && released.is_ok() {
            defmt::trace!("switch mask latched: {=u32:#010x}", mask);
        }

        shifted.and(released)
    }

    /// Open every switch.
    pub async fn clear(&mut self) -> Result<(), SwitchError> {
        self.set_mask(0).await
    }

    /// Release the underlying bus, pin and delay.
    pub fn release(self) -> (SPI, CS, D) {
        (self.spi, self.cs, self.delay)
    }

    async fn shift_out(&mut self, mask: u32) -> Result<(), SwitchError> {
        self.spi
            .write(&mask.to_be_bytes())
            .await
            .map_err(|_| SwitchError::Spi)?;
        // The last bit must be out of the shifter before chip-select rises.
        self.spi.flush().await.map_err(|_| SwitchError::Spi)?;
        self.delay.delay_us(SWITCH_LATCH_SETTLE_US).await;
        Ok(())
    }
}
