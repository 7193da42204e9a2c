//! Hardware boot sequence for the DiCo output board.
//!
//! Initialization order (MUST be respected):
//!   1. Clocks + Embassy HAL
//!   2. Host serial link
//!   3. DAC channel enabled
//!   4. Switch reset line released (driven high)
//!   5. Switch matrix cleared
//!   6. Settle delay
//!   7. DAC driven to zero
//!   8. Serve requests
//!
//! Steps 3-7 live in [`crate::session::Session::startup`] so they run the
//! same way on the host test rig. Only clock and pin wiring is in here.

/// Ordered list of boot steps for documentation and testing.
///
/// # Correctness Invariants
///
/// - The switches must be cleared before the DAC is zeroed: the lines open
///   first, so the load never sees the voltage step.
/// - The reset line must be released before the first shift-register frame,
///   or the frame is lost.
pub const STARTUP_SEQUENCE_STEPS: &[&str] = &[
    "1. Clocks: HSI -> PLL1, Embassy HAL init",
    "2. Serial: host link at 57600 8N1",
    "3. DAC: enable output channel",
    "4. Switch reset: drive high",
    "5. Switches: shift out all-zero mask",
    "6. Settle: wait platform::config::RESET_SETTLE_MS",
    "7. DAC: write zero",
    "8. Serve: request/response loop",
];

/// Build the Embassy RCC config for the STM32H743.
///
/// HSI (64 MHz) / 4 = 16 MHz → × 50 = 800 MHz VCO, PLL1_P = 400 MHz sysclk.
/// Every peripheral on this board runs off the APB clocks at 100 MHz.
#[cfg(feature = "hardware")]
pub fn build_embassy_config() -> embassy_stm32::Config {
    use embassy_stm32::rcc::*;

    let mut config = embassy_stm32::Config::default();

    config.rcc.hsi = Some(HSIPrescaler::DIV1);
    config.rcc.csi = true;
    config.rcc.pll1 = Some(Pll {
        source: PllSource::HSI,
        prediv: PllPreDiv::DIV4,
        mul: PllMul::MUL50,
        divp: Some(PllDiv::DIV2), // 400 MHz system clock
        divq: None,
        divr: None,
    });

    config.rcc.sys = Sysclk::PLL1_P; // 400 MHz
    config.rcc.ahb_pre = AHBPrescaler::DIV2; // 200 MHz
    config.rcc.apb1_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb2_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb3_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.apb4_pre = APBPrescaler::DIV2; // 100 MHz
    config.rcc.voltage_scale = VoltageScale::Scale1;

    config
}

// ─── Hardware-only initialization ─────────────────────────────────────────────
//
// Everything below translates the plain-data link configs from `platform`
// into Embassy config structs and adapts the on-chip DAC. Compiled only with
// `--features hardware`.

#[cfg(feature = "hardware")]
pub mod hardware {
    //! Embassy-specific adapters. Only compiled when targeting real hardware.

    use embassy_stm32::dac::{DacCh1, Value};
    use embassy_stm32::dma::NoDma;
    use embassy_stm32::peripherals::DAC1;
    use embassy_stm32::time::Hertz;
    use embassy_stm32::{spi, usart};
    use platform::analog::{AnalogOutput, DacChannel, DacCode};
    use platform::{BitOrder, DataBits, Parity, SpiConfig, SpiMode, StopBits, UartConfig};

    /// A link setting the STM32 peripheral cannot express.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
    pub struct UnsupportedLinkConfig;

    /// Translate the host link description into a USART config.
    pub fn uart_config(link: &UartConfig) -> Result<usart::Config, UnsupportedLinkConfig> {
        let mut config = usart::Config::default();
        config.baudrate = link.baud_rate;
        config.data_bits = match link.data_bits {
            DataBits::Eight => usart::DataBits::DataBits8,
            DataBits::Nine => usart::DataBits::DataBits9,
            DataBits::Seven => return Err(UnsupportedLinkConfig),
        };
        config.parity = match link.parity {
            Parity::None => usart::Parity::ParityNone,
            Parity::Even => usart::Parity::ParityEven,
            Parity::Odd => usart::Parity::ParityOdd,
        };
        config.stop_bits = match link.stop_bits {
            StopBits::One => usart::StopBits::STOP1,
            StopBits::Two => usart::StopBits::STOP2,
        };
        Ok(config)
    }

    /// Translate the shift-register link description into an SPI config.
    pub fn spi_config(link: &SpiConfig) -> spi::Config {
        let mut config = spi::Config::default();
        config.frequency = Hertz(link.frequency);
        config.mode = match link.mode {
            SpiMode::Mode0 => spi::MODE_0,
            SpiMode::Mode1 => spi::MODE_1,
            SpiMode::Mode2 => spi::MODE_2,
            SpiMode::Mode3 => spi::MODE_3,
        };
        config.bit_order = match link.bit_order {
            BitOrder::MsbFirst => spi::BitOrder::MsbFirst,
            BitOrder::LsbFirst => spi::BitOrder::LsbFirst,
        };
        config
    }

    /// DAC adapter errors.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
    pub enum Stm32DacError {
        /// Only channel 0 (DAC1_OUT1) is wired on this board.
        UnwiredChannel,
    }

    /// On-chip DAC1 channel 1 as an [`AnalogOutput`].
    ///
    /// The converter is 12 bits wide; 10-bit codes are scaled up by 4 so
    /// full scale maps to the top of the 12-bit range.
    pub struct Stm32Dac {
        ch1: DacCh1<'static, DAC1, NoDma>,
    }

    impl Stm32Dac {
        /// Wrap an initialised DAC1 channel 1.
        pub fn new(ch1: DacCh1<'static, DAC1, NoDma>) -> Self {
            Self { ch1 }
        }
    }

    impl AnalogOutput for Stm32Dac {
        type Error = Stm32DacError;

        fn enable(&mut self, channel: DacChannel) -> Result<(), Self::Error> {
            match channel {
                DacChannel::Ch0 => {
                    self.ch1.set_enable(true);
                    Ok(())
                }
                DacChannel::Ch1 => Err(Stm32DacError::UnwiredChannel),
            }
        }

        fn write(&mut self, channel: DacChannel, code: DacCode) -> Result<(), Self::Error> {
            match channel {
                DacChannel::Ch0 => {
                    self.ch1.set(Value::Bit12Right(code.get().wrapping_shl(2)));
                    Ok(())
                }
                DacChannel::Ch1 => Err(Stm32DacError::UnwiredChannel),
            }
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
