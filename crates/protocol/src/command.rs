//! Opcodes and result codes.

/// Commands understood by the device.
///
/// Opcodes outside `0x00..=0x06` are not representable here; the raw byte
/// stays in [`Request::opcode`](crate::Request::opcode) so the device can echo
/// it back in the unknown-command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Command {
    /// Report liveness. No hardware action.
    Status = 0x00,
    /// Report the firmware version in the payload.
    Version = 0x01,
    /// Set the DAC, then (only if the voltage was valid) the switches.
    OutputEnable = 0x02,
    /// Open every switch. DAC untouched.
    OutputDisable = 0x03,
    /// Set the DAC. Switches untouched.
    SetVoltage = 0x04,
    /// Set the switches. DAC untouched.
    SetPins = 0x05,
    /// DAC to 0, then open every switch.
    Clear = 0x06,
}

impl Command {
    /// Every known command, in opcode order.
    pub const ALL: [Command; 7] = [
        Command::Status,
        Command::Version,
        Command::OutputEnable,
        Command::OutputDisable,
        Command::SetVoltage,
        Command::SetPins,
        Command::Clear,
    ];

    /// Look up the command for a raw opcode byte.
    #[must_use]
    pub const fn from_opcode(opcode: u8) -> Option<Self> {
        match opcode {
            0x00 => Some(Self::Status),
            0x01 => Some(Self::Version),
            0x02 => Some(Self::OutputEnable),
            0x03 => Some(Self::OutputDisable),
            0x04 => Some(Self::SetVoltage),
            0x05 => Some(Self::SetPins),
            0x06 => Some(Self::Clear),
            _ => None,
        }
    }

    /// The wire opcode.
    #[must_use]
    pub const fn opcode(self) -> u8 {
        self as u8
    }

    /// Short upper-case name, used in logs and by the host CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Status => "STATUS",
            Self::Version => "VERSION",
            Self::OutputEnable => "OUTP_ENABLE",
            Self::OutputDisable => "OUTP_DISABLE",
            Self::SetVoltage => "SET_VOLTAGE",
            Self::SetPins => "SET_PINS",
            Self::Clear => "CLEAR",
        }
    }
}

impl TryFrom<u8> for Command {
    type Error = u8;

    /// Returns the unrecognised opcode as the error.
    fn try_from(opcode: u8) -> Result<Self, Self::Error> {
        Self::from_opcode(opcode).ok_or(opcode)
    }
}

/// Result code carried in the first byte of every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Status {
    /// Command executed.
    Ok = 0,
    /// Requested voltage is outside the DAC range; no hardware was touched
    /// after the failed range check.
    DacRange = 1,
    /// Opcode not recognised; the payload echoes it.
    UnknownCommand = 2,
    /// A peripheral transfer (SPI, GPIO, DAC) reported an error.
    HardwareFault = 3,
}

impl Status {
    /// Look up the status for a raw code byte.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            1 => Some(Self::DacRange),
            2 => Some(Self::UnknownCommand),
            3 => Some(Self::HardwareFault),
            _ => None,
        }
    }

    /// The wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// `true` for [`Status::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::DacRange => write!(f, "DAC voltage out of range"),
            Self::UnknownCommand => write!(f, "Unknown command"),
            Self::HardwareFault => write!(f, "Hardware fault"),
        }
    }
}
