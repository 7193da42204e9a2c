//! Mock implementations for testing
//!
//! In-memory stand-ins for the serial link and the DAC, for use in unit and
//! integration tests. SPI, GPIO and delays are covered by `embedded-hal-mock`.

#![cfg(any(test, feature = "std"))]

use crate::analog::{AnalogOutput, DacChannel, DacCode};

/// Capacity of each mock serial direction, in bytes.
pub const MOCK_SERIAL_CAPACITY: usize = 256;

/// Capacity of the mock DAC write log.
pub const MOCK_DAC_LOG: usize = 64;

/// Error injected by the mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFault {
    /// A read/write was forced to fail.
    Injected,
    /// The mock's fixed-capacity buffer is full.
    BufferFull,
}

impl embedded_io::Error for MockFault {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            Self::Injected => embedded_io::ErrorKind::Other,
            Self::BufferFull => embedded_io::ErrorKind::OutOfMemory,
        }
    }
}

/// Mock serial link.
///
/// Bytes queued with [`MockSerial::feed`] are returned by reads; everything
/// written is captured for inspection. An empty receive queue reads as
/// end-of-stream (`Ok(0)`), which `read_exact` reports as `UnexpectedEof`.
pub struct MockSerial {
    rx: heapless::Deque<u8, MOCK_SERIAL_CAPACITY>,
    tx: heapless::Vec<u8, MOCK_SERIAL_CAPACITY>,
    fail_next_read: bool,
    fail_next_write: bool,
}

impl MockSerial {
    /// Create an idle mock link.
    pub fn new() -> Self {
        Self {
            rx: heapless::Deque::new(),
            tx: heapless::Vec::new(),
            fail_next_read: false,
            fail_next_write: false,
        }
    }

    /// Queue bytes for the device to read.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), MockFault> {
        for &b in bytes {
            self.rx.push_back(b).map_err(|_| MockFault::BufferFull)?;
        }
        Ok(())
    }

    /// Bytes the device has written so far.
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Number of queued bytes not yet read.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Make the next read return [`MockFault::Injected`].
    pub fn fail_next_read(&mut self) {
        self.fail_next_read = true;
    }

    /// Make the next write return [`MockFault::Injected`].
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }
}

impl Default for MockSerial {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = MockFault;
}

impl embedded_io_async::Read for MockSerial {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if core::mem::take(&mut self.fail_next_read) {
            return Err(MockFault::Injected);
        }
        let mut n: usize = 0;
        for slot in buf.iter_mut() {
            match self.rx.pop_front() {
                Some(b) => {
                    *slot = b;
                    n = n.saturating_add(1);
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl embedded_io_async::Write for MockSerial {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if core::mem::take(&mut self.fail_next_write) {
            return Err(MockFault::Injected);
        }
        self.tx
            .extend_from_slice(buf)
            .map_err(|_| MockFault::BufferFull)?;
        Ok(buf.len())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Mock DAC: records all calls for test assertions.
pub struct MockAnalogOutput {
    enabled: heapless::Vec<DacChannel, 2>,
    writes: heapless::Vec<(DacChannel, u16), MOCK_DAC_LOG>,
    fail_writes: bool,
}

impl MockAnalogOutput {
    /// Create a new mock DAC with every channel disabled.
    pub fn new() -> Self {
        Self {
            enabled: heapless::Vec::new(),
            writes: heapless::Vec::new(),
            fail_writes: false,
        }
    }

    /// Every `(channel, code)` written, oldest first.
    pub fn writes(&self) -> &[(DacChannel, u16)] {
        &self.writes
    }

    /// Last code written to `channel`, if any.
    pub fn last(&self, channel: DacChannel) -> Option<u16> {
        self.writes
            .iter()
            .rev()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, code)| *code)
    }

    /// Whether [`AnalogOutput::enable`] was called for `channel`.
    pub fn is_enabled(&self, channel: DacChannel) -> bool {
        self.enabled.contains(&channel)
    }

    /// Make every subsequent write fail with [`MockFault::Injected`].
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl Default for MockAnalogOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalogOutput for MockAnalogOutput {
    type Error = MockFault;

    fn enable(&mut self, channel: DacChannel) -> Result<(), Self::Error> {
        if !self.enabled.contains(&channel) {
            self.enabled
                .push(channel)
                .map_err(|_| MockFault::BufferFull)?;
        }
        Ok(())
    }

    fn write(&mut self, channel: DacChannel, code: DacCode) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MockFault::Injected);
        }
        self.writes
            .push((channel, code.get()))
            .map_err(|_| MockFault::BufferFull)
    }
}
