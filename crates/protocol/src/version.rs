//! Firmware version reported by `VERSION`.

/// Version word returned verbatim in the `VERSION` response payload.
///
/// High byte is the major version, low byte the minor version.
pub const FIRMWARE_VERSION: u16 = 0x0100;

/// Major/minor split of a version payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareVersion {
    /// Major version (payload high byte).
    pub major: u8,
    /// Minor version (payload low byte).
    pub minor: u8,
}

impl FirmwareVersion {
    /// Split a 16-bit version payload.
    #[must_use]
    pub const fn from_payload(payload: u16) -> Self {
        let [major, minor] = payload.to_be_bytes();
        Self { major, minor }
    }

    /// Recombine into the 16-bit payload.
    #[must_use]
    pub const fn to_payload(self) -> u16 {
        u16::from_be_bytes([self.major, self.minor])
    }
}

impl core::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
