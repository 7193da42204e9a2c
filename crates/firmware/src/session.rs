//! Serial session loop
//!
//! One request frame in, one response frame out, forever. The link is a raw
//! byte stream with no framing marker, so the loop simply reads eight bytes at
//! a time; the host keeps the two ends in step by waiting for every response
//! before sending the next request.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;
use embedded_io::ReadExactError;
use embedded_io_async::{Read, Write};
use platform::analog::AnalogOutput;
use platform::config::RESET_SETTLE_MS;
use protocol::{Request, Response, REQUEST_LEN};

use crate::dispatch::Dispatcher;

/// Session-level failures. None of them end the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// The link closed before a full request frame arrived.
    Eof,
    /// Reading the request frame failed.
    Read,
    /// Writing the response frame failed.
    Write,
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Eof => write!(f, "link closed mid-frame"),
            Self::Read => write!(f, "serial read error"),
            Self::Write => write!(f, "serial write error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}

/// Startup failures, reported once before serving begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupError {
    /// Enabling or zeroing the DAC failed.
    Dac,
    /// The switch reset line could not be driven.
    ResetLine,
    /// Clearing the switch matrix failed.
    Switches,
}

impl core::fmt::Display for StartupError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Dac => write!(f, "DAC bring-up failed"),
            Self::ResetLine => write!(f, "switch reset line error"),
            Self::Switches => write!(f, "switch clear failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StartupError {}

/// A running device: the host link plus the dispatcher behind it.
pub struct Session<IO, A, SPI, CS, D> {
    io: IO,
    dispatcher: Dispatcher<A, SPI, CS, D>,
}

impl<IO, A, SPI, CS, D> Session<IO, A, SPI, CS, D>
where
    IO: Read + Write,
    A: AnalogOutput,
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    /// Pair an already-configured serial link with the dispatcher.
    pub fn new(io: IO, dispatcher: Dispatcher<A, SPI, CS, D>) -> Self {
        Self { io, dispatcher }
    }

    /// Bring the outputs to a known state.
    ///
    /// Order: enable the DAC channel, release the switch reset line, open
    /// every switch, wait [`RESET_SETTLE_MS`], then zero the DAC.
    ///
    /// Every step runs even when an earlier one fails, so a partial fault
    /// still leaves as much of the output stage safe as possible. The first
    /// failure is the one reported.
    pub async fn startup<RST, DL>(&mut self, reset: &mut RST, delay: &mut DL) -> Result<(), StartupError>
    where
        RST: OutputPin,
        DL: DelayNs,
    {
        let enabled = self
            .dispatcher
            .dac_mut()
            .enable()
            .map_err(|_| StartupError::Dac);
        let released = reset.set_high().map_err(|_| StartupError::ResetLine);
        let cleared = self
            .dispatcher
            .switches_mut()
            .clear()
            .await
            .map_err(|_| StartupError::Switches);
        delay.delay_ms(RESET_SETTLE_MS).await;
        let zeroed = self
            .dispatcher
            .dac_mut()
            .reset()
            .map_err(|_| StartupError::Dac);

        enabled.and(released).and(cleared).and(zeroed)?;

        #[cfg(feature = "defmt")]
        defmt::info!("outputs cleared, DAC at zero");

        Ok(())
    }

    /// Handle exactly one request/response exchange.
    pub async fn serve_one(&mut self) -> Result<Response, SessionError> {
        let mut frame = [0u8; REQUEST_LEN];
        self.io.read_exact(&mut frame).await.map_err(|e| match e {
            ReadExactError::UnexpectedEof => SessionError::Eof,
            ReadExactError::Other(_) => SessionError::Read,
        })?;

        let request = Request::decode(&frame);
        #[cfg(feature = "defmt")]
        defmt::trace!("rx {}", request);

        let response = self.dispatcher.dispatch(&request).await;

        self.io
            .write_all(&response.encode())
            .await
            .map_err(|_| SessionError::Write)?;
        self.io.flush().await.map_err(|_| SessionError::Write)?;

        Ok(response)
    }

    /// Serve requests until power-off.
    ///
    /// Transport errors are logged and the loop carries on with the next
    /// frame; the outputs keep whatever state they last latched.
    pub async fn serve(&mut self) -> ! {
        loop {
            if let Err(_e) = self.serve_one().await {
                #[cfg(feature = "defmt")]
                defmt::warn!("session: {}", _e);
            }
        }
    }

    /// Borrow the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher<A, SPI, CS, D> {
        &self.dispatcher
    }

    /// Borrow the serial link.
    pub fn io(&self) -> &IO {
        &self.io
    }

    /// Mutably borrow the serial link.
    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }
}
