//! DiCo Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32H743ZI.
//!
//! Pin assignments:
//!   PD8  = USART3_TX (ST-LINK virtual COM port)
//!   PD9  = USART3_RX
//!   PA4  = DAC1_OUT1 (output voltage)
//!   PA5  = SPI1_SCK  (switch shift register clock)
//!   PA7  = SPI1_MOSI (switch shift register data)
//!   PD14 = Switch chip-select / latch (active low)
//!   PD15 = Switch reset (active low)

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::dac::DacCh1;
use embassy_stm32::dma::NoDma;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::spi::Spi;
use embassy_stm32::usart::{self, BufferedUart};
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Timer};
use static_cell::StaticCell;

use firmware::boot::hardware::{spi_config, uart_config, Stm32Dac};
use firmware::{DacController, Dispatcher, Session, SwitchMatrix};
use platform::analog::DacChannel;
use platform::config::{DEVICE_NAME, DEVICE_VERSION};
use platform::{SpiConfig, UartConfig};

// Panic handler
use panic_probe as _;
use defmt_rtt as _;

bind_interrupts!(struct Irqs {
    USART3 => usart::BufferedInterruptHandler<peripherals::USART3>;
});

/// Serial ring buffer size, each direction. Holds several request frames.
const LINK_BUFFER_LEN: usize = 64;

static TX_BUF: StaticCell<[u8; LINK_BUFFER_LEN]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; LINK_BUFFER_LEN]> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    defmt::info!("{=str} firmware v{=str}", DEVICE_NAME, DEVICE_VERSION);

    let p = embassy_stm32::init(firmware::boot::build_embassy_config());

    // Host serial link
    let link = UartConfig::host_link();
    let uart_cfg = match uart_config(&link) {
        Ok(cfg) => cfg,
        Err(e) => halt("unsupported link config", e).await,
    };
    let tx_buf = TX_BUF.init([0; LINK_BUFFER_LEN]);
    let rx_buf = RX_BUF.init([0; LINK_BUFFER_LEN]);
    let uart = match BufferedUart::new(p.USART3, Irqs, p.PD9, p.PD8, tx_buf, rx_buf, uart_cfg) {
        Ok(uart) => uart,
        Err(e) => halt("USART3 init failed", e).await,
    };
    defmt::info!("host link: {=u32} baud", link.baud_rate);

    // Output voltage DAC
    let dac = Stm32Dac::new(DacCh1::new(p.DAC1, NoDma, p.PA4));

    // Switch shift register: write-only SPI, manual chip-select
    let spi = Spi::new_txonly(
        p.SPI1,
        p.PA5, // SCK
        p.PA7, // MOSI
        p.DMA1_CH0,
        p.DMA1_CH1,
        spi_config(&SpiConfig::shift_register()),
    );
    let cs = Output::new(p.PD14, Level::High, Speed::VeryHigh);
    let mut reset = Output::new(p.PD15, Level::Low, Speed::VeryHigh);

    let dispatcher = Dispatcher::new(
        DacController::new(dac, DacChannel::Ch0),
        SwitchMatrix::new(spi, cs, Delay),
    );
    let mut session = Session::new(uart, dispatcher);

    // Keep serving on a failed startup; the host can still query STATUS and
    // retry with CLEAR.
    match session.startup(&mut reset, &mut Delay).await {
        Ok(()) => defmt::info!("startup complete, serving"),
        Err(e) => defmt::error!("startup failed: {}", e),
    }

    session.serve().await
}

async fn halt<E: core::fmt::Debug>(what: &str, err: E) -> ! {
    defmt::error!("{=str}: {}", what, defmt::Debug2Format(&err));
    loop {
        Timer::after(Duration::from_secs(1)).await;
    }
}
