//! `dico`: drive a DiCo output device from the command line.
//!
//! ```bash
//! dico --port /dev/ttyACM0 version
//! dico --port /dev/ttyACM0 set --pins 0,1,4 --volts 3.3
//! RUST_LOG=host=debug dico --port /dev/ttyACM0 reset
//! ```
#![allow(clippy::print_stdout)]

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use host::{code_to_volts, volts_to_code, DicoClient};
use platform::config::LINK_BAUD_RATE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dico", about = "DiCo output device control")]
struct Cli {
    /// Serial port the device is attached to
    #[arg(short, long)]
    port: String,

    /// Link baud rate
    #[arg(short, long, default_value_t = LINK_BAUD_RATE)]
    baud: u32,

    /// Give up waiting for a response after this many milliseconds
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the device answers
    Status,
    /// Print the firmware version
    Version,
    /// Open every switch and zero the voltage
    Reset,
    /// Open every switch, keep the voltage
    Disable,
    /// Close header pins and/or set the output voltage
    Set {
        /// Header pins to close (0-31); every other switch opens
        #[arg(long, value_delimiter = ',')]
        pins: Option<Vec<u8>>,
        /// Output voltage in volts
        #[arg(long)]
        volts: Option<f32>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let port = serialport::new(&cli.port, cli.baud)
        .timeout(Duration::from_millis(cli.timeout_ms))
        .open()
        .with_context(|| format!("opening {}", cli.port))?;
    let mut dico = DicoClient::new(port);

    match cli.command {
        Commands::Status => {
            dico.status()?;
            println!("OK");
        }
        Commands::Version => {
            println!("{}", dico.version()?);
        }
        Commands::Reset => dico.reset()?,
        Commands::Disable => dico.disable_output()?,
        Commands::Set { pins, volts } => {
            dico.set_state(pins.as_deref(), volts)?;
            if let Some(v) = volts {
                let actual = code_to_volts(volts_to_code(v)?);
                println!("output at {actual:.3} V");
            }
        }
    }

    Ok(())
}
