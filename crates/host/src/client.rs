//! Blocking request/response client.

use std::io::{Read, Write};

use protocol::{Command, FirmwareVersion, Request, Response, RESPONSE_LEN};
use tracing::{debug, trace};

use crate::error::ClientError;
use crate::pins::mask_from_pins;
use crate::voltage::volts_to_code;

/// Driver for one DiCo device on a byte stream.
///
/// One request is in flight at a time: every call writes a frame and blocks
/// until the 4-byte answer is in. Put a read timeout on the port if the
/// device may be absent; the client itself never gives up.
pub struct DicoClient<P> {
    port: P,
}

impl<P: Read + Write> DicoClient<P> {
    /// Wrap an open, configured port (57 600 8N1 for the real device).
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Send one request and read its response.
    ///
    /// Any non-OK status comes back as [`ClientError::Device`].
    pub fn transact(&mut self, request: Request) -> Result<Response, ClientError> {
        debug!(
            command = request.command().map_or("?", Command::name),
            opcode = request.opcode,
            voltage = request.voltage,
            bitmask = format_args!("{:#010x}", request.bitmask),
            "request"
        );
        self.port.write_all(&request.encode())?;
        self.port.flush()?;

        let mut buf = [0u8; RESPONSE_LEN];
        self.port.read_exact(&mut buf)?;
        let response = Response::decode(&buf)?;
        trace!(status = %response.status, payload = response.payload, "response");

        if response.status.is_ok() {
            Ok(response)
        } else {
            Err(ClientError::Device(response.status))
        }
    }

    /// Liveness check.
    pub fn status(&mut self) -> Result<(), ClientError> {
        self.command(Command::Status).map(drop)
    }

    /// Firmware version reported by the device.
    pub fn version(&mut self) -> Result<FirmwareVersion, ClientError> {
        let response = self.command(Command::Version)?;
        Ok(FirmwareVersion::from_payload(response.payload))
    }

    /// Open every switch and drive the voltage to zero.
    pub fn reset(&mut self) -> Result<(), ClientError> {
        self.command(Command::Clear).map(drop)
    }

    /// Open every switch; the voltage is left as it is.
    pub fn disable_output(&mut self) -> Result<(), ClientError> {
        self.command(Command::OutputDisable).map(drop)
    }

    /// Set the closed pins, the voltage, or both in one frame.
    ///
    /// | pins | volts | command       |
    /// |------|-------|---------------|
    /// | -    | some  | SET_VOLTAGE   |
    /// | some | -     | SET_PINS      |
    /// | some | some  | OUTPUT_ENABLE |
    ///
    /// Arguments are validated before anything is written to the port.
    pub fn set_state(&mut self, pins: Option<&[u8]>, volts: Option<f32>) -> Result<(), ClientError> {
        let request = match (pins, volts) {
            (None, None) => return Err(ClientError::NothingToSet),
            (None, Some(v)) => Request::new(Command::SetVoltage, volts_to_code(v)?, 0),
            (Some(p), None) => Request::new(Command::SetPins, 0, mask_from_pins(p)?),
            (Some(p), Some(v)) => {
                Request::new(Command::OutputEnable, volts_to_code(v)?, mask_from_pins(p)?)
            }
        };
        self.transact(request).map(drop)
    }

    /// Borrow the port.
    pub fn get_ref(&self) -> &P {
        &self.port
    }

    /// Unwrap the port.
    pub fn into_inner(self) -> P {
        self.port
    }

    fn command(&mut self, command: Command) -> Result<Response, ClientError> {
        self.transact(Request::new(command, 0, 0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Port with canned device replies; records what the client wrote.
    struct ScriptedPort {
        replies: Cursor<Vec<u8>>,
        sent: Vec<u8>,
    }

    impl ScriptedPort {
        fn replying(replies: &[u8]) -> Self {
            Self {
                replies: Cursor::new(replies.to_vec()),
                sent: Vec::new(),
            }
        }
    }

    impl Read for ScriptedPort {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.replies.read(buf)
        }
    }

    impl Write for ScriptedPort {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.sent.write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_version_split() {
        let mut client = DicoClient::new(ScriptedPort::replying(&[0, 0, 0x00, 0x01]));
        let version = client.version().unwrap();
        assert_eq!((version.major, version.minor), (1, 0));
        assert_eq!(client.get_ref().sent, [0x01, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_reset_sends_clear() {
        let mut client = DicoClient::new(ScriptedPort::replying(&[0, 0, 0, 0]));
        client.reset().unwrap();
        assert_eq!(client.get_ref().sent[0], 0x06);
    }

    #[test]
    fn test_range_error_surfaces_as_device_error() {
        let mut client = DicoClient::new(ScriptedPort::replying(&[1, 0, 0, 0]));
        let err = client.set_state(None, Some(15.0)).unwrap_err();
        assert!(matches!(err, ClientError::Device(protocol::Status::DacRange)));
        // 15 V converts to 1024, which the device is left to reject.
        assert_eq!(&client.get_ref().sent[..4], &[0x04, 0x00, 0x00, 0x04]);
    }

    #[test]
    fn test_nothing_to_set_sends_nothing() {
        let mut client = DicoClient::new(ScriptedPort::replying(&[]));
        assert!(matches!(
            client.set_state(None, None),
            Err(ClientError::NothingToSet)
        ));
        assert!(client.get_ref().sent.is_empty());
    }

    #[test]
    fn test_short_reply_is_io_error() {
        let mut client = DicoClient::new(ScriptedPort::replying(&[0, 0]));
        assert!(matches!(client.status(), Err(ClientError::Io(_))));
    }

    #[test]
    fn test_unknown_status_byte_is_frame_error() {
        let mut client = DicoClient::new(ScriptedPort::replying(&[9, 0, 0, 0]));
        assert!(matches!(client.status(), Err(ClientError::Frame(_))));
    }
}
