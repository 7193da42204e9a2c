//! Property-based tests for frame building in `DicoClient::set_state`.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::collections::BTreeSet;
use std::io::{Cursor, Read, Write};

use host::{mask_from_pins, volts_to_code, DicoClient, CHANNEL_MAP, FULL_SCALE_VOLTS};
use protocol::Request;

/// Answers every request with OK; keeps everything the client sent.
struct OkPort {
    sent: Vec<u8>,
    replies: Cursor<Vec<u8>>,
}

impl OkPort {
    fn new() -> Self {
        Self {
            sent: Vec::new(),
            replies: Cursor::new(vec![0; 4]),
        }
    }
}

impl Read for OkPort {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.replies.read(buf)
    }
}

impl Write for OkPort {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.sent.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn sent_request(client: DicoClient<OkPort>) -> Request {
    let sent = client.into_inner().sent;
    let frame: [u8; 8] = sent.as_slice().try_into().expect("exactly one frame");
    Request::decode(&frame)
}

proptest::proptest! {
    /// One bit per distinct pin, each on the line the pin map names.
    #[test]
    fn mask_has_one_bit_per_distinct_pin(pins in proptest::collection::vec(0u8..32, 0..64)) {
        let mask = mask_from_pins(&pins).unwrap();
        let distinct: BTreeSet<u8> = pins.iter().copied().collect();
        assert_eq!(mask.count_ones() as usize, distinct.len());
        for pin in distinct {
            assert_ne!(mask & (1 << CHANNEL_MAP[usize::from(pin)]), 0);
        }
    }

    /// Pins plus voltage always go out as a single OUTPUT_ENABLE frame.
    #[test]
    fn pins_and_voltage_make_output_enable(
        pins in proptest::collection::vec(0u8..32, 1..8),
        volts in 0.0f32..FULL_SCALE_VOLTS,
    ) {
        let mut client = DicoClient::new(OkPort::new());
        client.set_state(Some(&pins), Some(volts)).unwrap();

        let request = sent_request(client);
        assert_eq!(request.opcode, 0x02);
        assert_eq!(request.voltage, volts_to_code(volts).unwrap());
        assert_eq!(request.bitmask, mask_from_pins(&pins).unwrap());
    }

    /// Voltage alone never carries a switch mask.
    #[test]
    fn voltage_only_sends_zero_mask(volts in 0.0f32..FULL_SCALE_VOLTS) {
        let mut client = DicoClient::new(OkPort::new());
        client.set_state(None, Some(volts)).unwrap();

        let request = sent_request(client);
        assert_eq!(request.opcode, 0x04);
        assert_eq!(request.bitmask, 0);
        assert!(request.voltage < 1024);
    }
}
