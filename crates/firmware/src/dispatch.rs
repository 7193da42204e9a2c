//! Command dispatcher
//!
//! Maps one decoded [`Request`] to controller calls and produces exactly one
//! [`Response`]. Every request gets an answer; failures become status codes,
//! never early returns out of the session loop.
//!
//! | Opcode | Command        | Effect                                 |
//! |--------|----------------|----------------------------------------|
//! | 0x00   | STATUS         | none                                   |
//! | 0x01   | VERSION        | none, payload = firmware version       |
//! | 0x02   | OUTPUT_ENABLE  | set DAC, then latch the switch mask    |
//! | 0x03   | OUTPUT_DISABLE | open every switch                      |
//! | 0x04   | SET_VOLTAGE    | set DAC                                |
//! | 0x05   | SET_PINS       | latch the switch mask                  |
//! | 0x06   | CLEAR          | zero the DAC, then open every switch   |

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;
use platform::analog::AnalogOutput;
use protocol::{Command, Request, Response};

use crate::dac::{DacController, DacError};
use crate::switches::{SwitchError, SwitchMatrix};

/// Routes requests to the DAC and switch controllers.
pub struct Dispatcher<A, SPI, CS, D> {
    dac: DacController<A>,
    switches: SwitchMatrix<SPI, CS, D>,
}

impl<A, SPI, CS, D> Dispatcher<A, SPI, CS, D>
where
    A: AnalogOutput,
    SPI: SpiBus,
    CS: OutputPin,
    D: DelayNs,
{
    /// Create a dispatcher over both output controllers.
    pub fn new(dac: DacController<A>, switches: SwitchMatrix<SPI, CS, D>) -> Self {
        Self { dac, switches }
    }

    /// Execute `request` and build its response.
    pub async fn dispatch(&mut self, request: &Request) -> Response {
        let Some(command) = request.command() else {
            #[cfg(feature = "defmt")]
            defmt::warn!("unknown opcode {=u8:#04x}", request.opcode);
            return Response::unknown_command(request.opcode);
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("dispatch {=str}", command.name());

        match self.execute(command, request).await {
            Ok(response) | Err(response) => response,
        }
    }

    /// OUTPUT_ENABLE: voltage first, switches second.
    ///
    /// The switches are only touched once the DAC holds the new code, so an
    /// out-of-range voltage leaves both the DAC and the switch lines exactly
    /// as they were.
    pub async fn enable_output(&mut self, voltage: u16, mask: u32) -> Result<Response, Response> {
        self.dac.set_output(voltage).map_err(dac_failure)?;
        self.switches.set_mask(mask).await.map_err(switch_failure)?;
        Ok(Response::ok())
    }

    /// CLEAR: zero the DAC, then open every switch.
    ///
    /// The switches are opened even when the DAC write faults.
    pub async fn clear(&mut self) -> Result<Response, Response> {
        let zeroed = self.dac.reset().map_err(dac_failure);
        self.switches.clear().await.map_err(switch_failure)?;
        zeroed?;
        Ok(Response::ok())
    }

    /// Borrow the DAC controller.
    pub fn dac(&self) -> &DacController<A> {
        &self.dac
    }

    /// Mutably borrow the DAC controller.
    pub fn dac_mut(&mut self) -> &mut DacController<A> {
        &mut self.dac
    }

    /// Mutably borrow the switch matrix.
    pub fn switches_mut(&mut self) -> &mut SwitchMatrix<SPI, CS, D> {
        &mut self.switches
    }

    async fn execute(&mut self, command: Command, request: &Request) -> Result<Response, Response> {
        match command {
            Command::Status => Ok(Response::ok()),
            Command::Version => Ok(Response::version()),
            Command::OutputEnable => self.enable_output(request.voltage, request.bitmask).await,
            Command::OutputDisable => {
                self.switches.clear().await.map_err(switch_failure)?;
                Ok(Response::ok())
            }
            Command::SetVoltage => {
                self.dac.set_output(request.voltage).map_err(dac_failure)?;
                Ok(Response::ok())
            }
            Command::SetPins => {
                self.switches.set_mask(request.bitmask).await.map_err(switch_failure)?;
                Ok(Response::ok())
            }
            Command::Clear => self.clear().await,
        }
    }
}

fn dac_failure(err: DacError) -> Response {
    match err {
        DacError::OutOfRange(_value) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("voltage {=u16} out of range", _value);
            Response::dac_range()
        }
        DacError::Hardware => Response::hardware_fault(),
    }
}

fn switch_failure(_err: SwitchError) -> Response {
    #[cfg(feature = "defmt")]
    defmt::error!("switch update failed: {}", _err);
    Response::hardware_fault()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
    use platform::analog::DacChannel;
    use platform::mocks::MockAnalogOutput;
    use protocol::Status;

    type TestDispatcher = Dispatcher<MockAnalogOutput, SpiMock<u8>, PinMock, NoopDelay>;

    fn dispatcher(spi: &SpiMock<u8>, cs: &PinMock) -> TestDispatcher {
        Dispatcher::new(
            DacController::new(MockAnalogOutput::new(), DacChannel::Ch0),
            SwitchMatrix::new(spi.clone(), cs.clone(), NoopDelay),
        )
    }

    #[tokio::test]
    async fn test_status_touches_nothing() {
        let mut spi = SpiMock::new(&[]);
        let mut cs = PinMock::new(&[]);
        let mut d = dispatcher(&spi, &cs);

        let resp = d.dispatch(&Request::new(Command::Status, 0, 0)).await;
        assert_eq!(resp, Response::ok());
        assert!(d.dac().output().writes().is_empty());

        spi.done();
        cs.done();
    }

    #[tokio::test]
    async fn test_enable_out_of_range_leaves_switches_alone() {
        let mut spi = SpiMock::new(&[]);
        let mut cs = PinMock::new(&[]);
        let mut d = dispatcher(&spi, &cs);

        let resp = d
            .dispatch(&Request::new(Command::OutputEnable, 0x0400, 0xFFFF_FFFF))
            .await;
        assert_eq!(resp.status, Status::DacRange);
        assert!(d.dac().output().writes().is_empty());

        spi.done();
        cs.done();
    }

    #[tokio::test]
    async fn test_unknown_opcode_is_echoed() {
        let mut spi = SpiMock::new(&[]);
        let mut cs = PinMock::new(&[]);
        let mut d = dispatcher(&spi, &cs);

        let req = Request {
            opcode: 0x42,
            voltage: 0,
            bitmask: 0,
        };
        let resp = d.dispatch(&req).await;
        assert_eq!(resp.status, Status::UnknownCommand);
        assert_eq!(resp.payload, 0x42);

        spi.done();
        cs.done();
    }

    #[tokio::test]
    async fn test_dac_fault_maps_to_hardware_fault() {
        let mut spi = SpiMock::new(&[]);
        let mut cs = PinMock::new(&[]);
        let mut d = dispatcher(&spi, &cs);
        d.dac_mut().output_mut().set_fail_writes(true);

        let resp = d.dispatch(&Request::new(Command::SetVoltage, 5, 0)).await;
        assert_eq!(resp, Response::hardware_fault());

        spi.done();
        cs.done();
    }

    #[tokio::test]
    async fn test_clear_zeroes_dac_and_opens_switches() {
        let mut spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0; 4]),
            SpiTransaction::flush(),
        ]);
        let mut cs = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut d = dispatcher(&spi, &cs);
        d.dac_mut().set_output(300).unwrap();

        let resp = d.dispatch(&Request::new(Command::Clear, 0, 0)).await;
        assert_eq!(resp, Response::ok());
        assert_eq!(d.dac().output().last(DacChannel::Ch0), Some(0));

        spi.done();
        cs.done();
    }

    #[tokio::test]
    async fn test_clear_opens_switches_even_on_dac_fault() {
        let mut spi = SpiMock::new(&[
            SpiTransaction::write_vec(vec![0; 4]),
            SpiTransaction::flush(),
        ]);
        let mut cs = PinMock::new(&[
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ]);
        let mut d = dispatcher(&spi, &cs);
        d.dac_mut().output_mut().set_fail_writes(true);

        let resp = d.dispatch(&Request::new(Command::Clear, 0, 0)).await;
        assert_eq!(resp, Response::hardware_fault());

        spi.done();
        cs.done();
    }
}
