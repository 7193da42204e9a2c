//! Startup sequence integration tests
//!
//! Validates that `Session::startup` leaves the outputs in the known-safe
//! state (switches open, DAC at zero), runs its steps in order and honours
//! the settle delays, without needing physical hardware.
//!
//! Run with: cargo test -p firmware --test integration_startup
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind as PinErrorKind, OutputPin};
use embedded_hal::spi::ErrorKind as SpiErrorKind;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use firmware::{DacController, Dispatcher, Session, StartupError, SwitchMatrix};
use platform::analog::{AnalogOutput, DacChannel, DacCode};
use platform::config::{RESET_SETTLE_MS, SWITCH_LATCH_SETTLE_US};
use platform::mocks::{MockAnalogOutput, MockSerial};

// ── Ordered hardware log ────────────────────────────────────────────────────

/// One observable action on the output stage.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    DacEnable,
    DacWrite(u16),
    ResetHigh,
    CsLow,
    CsHigh,
    SpiWrite(Vec<u8>),
    SpiFlush,
    DelayNs(u32),
    DelayUs(u32),
    DelayMs(u32),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct LoggedDac(Log);

impl AnalogOutput for LoggedDac {
    type Error = core::convert::Infallible;

    fn enable(&mut self, _channel: DacChannel) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::DacEnable);
        Ok(())
    }

    fn write(&mut self, _channel: DacChannel, code: DacCode) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::DacWrite(code.get()));
        Ok(())
    }
}

/// Chip-select or reset line; `low`/`high` name what each edge records.
struct LoggedPin {
    log: Log,
    low: Option<Event>,
    high: Event,
}

impl embedded_hal::digital::ErrorType for LoggedPin {
    type Error = PinErrorKind;
}

impl OutputPin for LoggedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let event = self.low.clone().ok_or(PinErrorKind::Other)?;
        self.log.borrow_mut().push(event);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push(self.high.clone());
        Ok(())
    }
}

struct LoggedSpi(Log);

impl embedded_hal::spi::ErrorType for LoggedSpi {
    type Error = SpiErrorKind;
}

impl SpiBus for LoggedSpi {
    async fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(SpiErrorKind::Other)
    }

    async fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::SpiWrite(words.to_vec()));
        Ok(())
    }

    async fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(SpiErrorKind::Other)
    }

    async fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(SpiErrorKind::Other)
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::SpiFlush);
        Ok(())
    }
}

struct LoggedDelay(Log);

impl DelayNs for LoggedDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::DelayNs(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().push(Event::DelayUs(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ms));
    }
}

// ── Mock-based rig ──────────────────────────────────────────────────────────

/// Delay that only adds up how long it was asked to wait.
#[derive(Default)]
struct RecordingDelay {
    total_ns: u64,
}

impl DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

fn session(
    spi: &SpiMock<u8>,
    cs: &PinMock,
    dac: MockAnalogOutput,
) -> Session<MockSerial, MockAnalogOutput, SpiMock<u8>, PinMock, NoopDelay> {
    Session::new(
        MockSerial::new(),
        Dispatcher::new(
            DacController::new(dac, DacChannel::Ch0),
            SwitchMatrix::new(spi.clone(), cs.clone(), NoopDelay),
        ),
    )
}

fn clear_frame() -> (SpiMock<u8>, PinMock) {
    let spi = SpiMock::new(&[
        SpiTransaction::write_vec(vec![0x00; 4]),
        SpiTransaction::flush(),
    ]);
    let cs = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);
    (spi, cs)
}

#[tokio::test]
async fn test_startup_runs_steps_in_order() {
    let log = Log::default();
    let cs = LoggedPin {
        log: log.clone(),
        low: Some(Event::CsLow),
        high: Event::CsHigh,
    };
    let mut reset = LoggedPin {
        log: log.clone(),
        low: None,
        high: Event::ResetHigh,
    };
    let mut delay = LoggedDelay(log.clone());

    let mut s = Session::new(
        MockSerial::new(),
        Dispatcher::new(
            DacController::new(LoggedDac(log.clone()), DacChannel::Ch0),
            SwitchMatrix::new(LoggedSpi(log.clone()), cs, LoggedDelay(log.clone())),
        ),
    );
    s.startup(&mut reset, &mut delay).await.unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            Event::DacEnable,
            Event::ResetHigh,
            Event::CsLow,
            Event::SpiWrite(vec![0x00; 4]),
            Event::SpiFlush,
            Event::DelayUs(SWITCH_LATCH_SETTLE_US),
            Event::CsHigh,
            Event::DelayMs(RESET_SETTLE_MS),
            Event::DacWrite(0),
        ]
    );
}

#[tokio::test]
async fn test_startup_leaves_outputs_safe() {
    let (mut spi, mut cs) = clear_frame();
    let mut reset = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let mut delay = RecordingDelay::default();

    let mut s = session(&spi, &cs, MockAnalogOutput::new());
    s.startup(&mut reset, &mut delay).await.unwrap();

    let dac = s.dispatcher().dac().output();
    assert!(dac.is_enabled(DacChannel::Ch0), "DAC channel must be enabled");
    assert_eq!(dac.writes(), &[(DacChannel::Ch0, 0)], "DAC must end at zero");
    assert!(
        delay.total_ns >= u64::from(RESET_SETTLE_MS) * 1_000_000,
        "startup must wait at least {RESET_SETTLE_MS} ms, waited {} ns",
        delay.total_ns
    );

    spi.done();
    cs.done();
    reset.done();
}

#[tokio::test]
async fn test_startup_still_clears_outputs_on_reset_line_fault() {
    use embedded_hal_mock::eh1::MockError;
    use std::io::ErrorKind;

    let (mut spi, mut cs) = clear_frame();
    let mut reset = PinMock::new(&[PinTransaction::set(PinState::High)
        .with_error(MockError::Io(ErrorKind::NotConnected))]);
    let mut delay = RecordingDelay::default();

    let mut s = session(&spi, &cs, MockAnalogOutput::new());
    assert_eq!(
        s.startup(&mut reset, &mut delay).await,
        Err(StartupError::ResetLine)
    );
    assert_eq!(
        s.dispatcher().dac().output().writes(),
        &[(DacChannel::Ch0, 0)]
    );
    assert!(delay.total_ns >= u64::from(RESET_SETTLE_MS) * 1_000_000);

    spi.done();
    cs.done();
    reset.done();
}

#[tokio::test]
async fn test_startup_reports_dac_fault_after_clearing_switches() {
    let (mut spi, mut cs) = clear_frame();
    let mut reset = PinMock::new(&[PinTransaction::set(PinState::High)]);
    let mut delay = RecordingDelay::default();

    let mut dac = MockAnalogOutput::new();
    dac.set_fail_writes(true);
    let mut s = session(&spi, &cs, dac);

    assert_eq!(
        s.startup(&mut reset, &mut delay).await,
        Err(StartupError::Dac)
    );

    spi.done();
    cs.done();
    reset.done();
}
