//! Host-side driver for the DiCo output device.
//!
//! [`DicoClient`] speaks the request/response protocol over anything that is
//! `std::io::Read + Write` (a serial port in production, an in-memory buffer
//! in tests). [`pins`] maps front-panel header pins to switch lines and
//! [`voltage`] converts volts to DAC codes.
//!
//! ```no_run
//! use host::DicoClient;
//!
//! let port = serialport::new("/dev/ttyACM0", 57_600).open()?;
//! let mut dico = DicoClient::new(port);
//! dico.reset()?;
//! dico.set_state(Some(&[0, 1, 4]), Some(3.3))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod error;
pub mod pins;
pub mod voltage;

pub use client::DicoClient;
pub use error::ClientError;
pub use pins::{mask_from_pins, CHANNEL_MAP};
pub use voltage::{code_to_volts, volts_to_code, FULL_SCALE_VOLTS};
