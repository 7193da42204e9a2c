//! Property-based tests for the DAC range gate.
//! Verifies invariants hold for ALL inputs, not just fixed examples.

use platform::analog::{DacCode, OutOfRangeError};

proptest::proptest! {
    /// DacCode::try_new never panics for any u16 input.
    #[test]
    fn dac_code_try_new_never_panics(value in 0u16..=u16::MAX) {
        let _ = DacCode::try_new(value);
    }

    /// Every code the 10-bit converter can represent is accepted unchanged.
    #[test]
    fn dac_code_valid_range_always_ok(value in 0u16..1024u16) {
        assert_eq!(DacCode::try_new(value).map(DacCode::get), Ok(value),
            "DacCode::try_new({}) should be Ok within [0, 1023]", value);
    }

    /// Everything from 1024 upwards is rejected and reports the offending value.
    #[test]
    fn dac_code_out_of_range_always_err(value in 1024u16..=u16::MAX) {
        assert_eq!(DacCode::try_new(value),
            Err(OutOfRangeError { value, min: 0, max: DacCode::MAX }),
            "DacCode::try_new({}) should be Err above 1023", value);
    }
}
