use byteorder::{ByteOrder, LittleEndian};

use crate::utils::{Error, FromPayload};

/// Second half of a response frame: did the module accept the command?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Ack,
    Nack,
    Unknown(u16),
}

impl ResponseKind {
    pub const ACK: u16 = 0x30;
    pub const NACK: u16 = 0x31;

    pub fn from_code(code: u16) -> Self {
        match code {
            Self::ACK => Self::Ack,
            Self::NACK => Self::Nack,
            other => Self::Unknown(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Self::Ack => Self::ACK,
            Self::Nack => Self::NACK,
            Self::Unknown(code) => code,
        }
    }
}

/// Status codes carried in the parameter of a NACK response. Names match the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Success,
    /// Obsolete, capture timeout
    Timeout,
    /// Obsolete, invalid serial baud rate
    InvalidBaudrate,
    /// The specified ID is not between 0 and 199
    InvalidPos,
    /// The specified ID is not used
    IsNotUsed,
    /// The specified ID is already used
    IsAlreadyUsed,
    CommErr,
    /// 1:1 verification failure
    VerifyFailed,
    /// 1:N identification failure
    IdentifyFailed,
    DbIsFull,
    DbIsEmpty,
    /// Obsolete, enrollment stages were not run in order
    TurnErr,
    /// Too bad fingerprint
    BadFinger,
    EnrollFailed,
    IsNotSupported,
    /// Device error, usually the crypto chip
    DevErr,
    /// Obsolete, the capture was cancelled
    CaptureCanceled,
    InvalidParam,
    FingerIsNotPressed,
    /// The module's own "could not parse" sentinel.
    Invalid,
    Unrecognized(u32),
}

impl DeviceStatus {
    pub fn from_code(code: u32) -> Self {
        match code {
            0x0000 => Self::Success,
            0x1001 => Self::Timeout,
            0x1002 => Self::InvalidBaudrate,
            0x1003 => Self::InvalidPos,
            0x1004 => Self::IsNotUsed,
            0x1005 => Self::IsAlreadyUsed,
            0x1006 => Self::CommErr,
            0x1007 => Self::VerifyFailed,
            0x1008 => Self::IdentifyFailed,
            0x1009 => Self::DbIsFull,
            0x100A => Self::DbIsEmpty,
            0x100B => Self::TurnErr,
            0x100C => Self::BadFinger,
            0x100D => Self::EnrollFailed,
            0x100E => Self::IsNotSupported,
            0x100F => Self::DevErr,
            0x1010 => Self::CaptureCanceled,
            0x1011 => Self::InvalidParam,
            0x1012 => Self::FingerIsNotPressed,
            0xFFFF => Self::Invalid,
            other => Self::Unrecognized(other),
        }
    }
}

// A NACK is always a failure, so even a NACK carrying `Success` lands on `Generic`.
impl From<DeviceStatus> for Error {
    fn from(status: DeviceStatus) -> Error {
        match status {
            DeviceStatus::Timeout | DeviceStatus::CommErr => Error::Communication,
            DeviceStatus::InvalidBaudrate | DeviceStatus::InvalidParam => Error::BadParameters,
            DeviceStatus::InvalidPos
            | DeviceStatus::IsNotUsed
            | DeviceStatus::TurnErr
            | DeviceStatus::BadFinger
            | DeviceStatus::EnrollFailed
            | DeviceStatus::DevErr
            | DeviceStatus::FingerIsNotPressed => Error::BadState,
            DeviceStatus::IsAlreadyUsed => Error::Busy,
            DeviceStatus::VerifyFailed | DeviceStatus::IdentifyFailed => Error::AccessDenied,
            DeviceStatus::DbIsFull => Error::OutOfMemory,
            DeviceStatus::DbIsEmpty => Error::NoData,
            DeviceStatus::IsNotSupported => Error::NotSupported,
            DeviceStatus::CaptureCanceled => Error::Cancelled,
            DeviceStatus::Success | DeviceStatus::Invalid | DeviceStatus::Unrecognized(_) => {
                Error::Generic
            }
        }
    }
}

/// Identification record returned by `Open` when asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub firmware_version: u32,

    /// Maximum size of the ISO CD image area, in bytes.
    pub iso_area_max_size: u32,

    pub serial_number: [u8; 16],
}

impl FromPayload for DeviceInfo {
    const PAYLOAD_LEN: usize = 24;

    fn from_payload(payload: &[u8]) -> Self {
        let mut serial_number = [0u8; 16];
        serial_number.copy_from_slice(&payload[8..24]);
        DeviceInfo {
            firmware_version: LittleEndian::read_u32(&payload[0..4]),
            iso_area_max_size: LittleEndian::read_u32(&payload[4..8]),
            serial_number,
        }
    }
}
