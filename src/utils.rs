/// Errors returned by the driver. Device-reported failures and protocol-integrity failures
/// (checksum mismatch, wrong start codes) both end up here, one variant per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Checksum mismatch, malformed frame, transport failure or receive timeout.
    #[error("communication error")]
    Communication,

    /// Invalid configuration or a parameter rejected by the module.
    #[error("bad parameters")]
    BadParameters,

    /// The session or the module is not in a state that allows the operation.
    #[error("bad state")]
    BadState,

    /// The requested template slot is already in use.
    #[error("busy")]
    Busy,

    /// Verification or identification did not match.
    #[error("access denied")]
    AccessDenied,

    /// The fingerprint database is full.
    #[error("out of memory")]
    OutOfMemory,

    /// The fingerprint database is empty.
    #[error("no data")]
    NoData,

    /// The module does not support the command.
    #[error("not supported")]
    NotSupported,

    /// The capture was cancelled on the module.
    #[error("cancelled")]
    Cancelled,

    /// The requested data frame does not fit in the receive buffer.
    #[error("buffer too small")]
    BufferTooSmall,

    /// Anything the module reported that has no better match.
    #[error("unclassified error")]
    Generic,
}

/// Additive checksum used by every frame: the sum of all bytes, wrapping at 16 bits.
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |sum, byte| sum.wrapping_add(u16::from(*byte)))
}

pub trait FromPayload: Sized {
    /// Size of the payload carried in a data frame, in bytes.
    const PAYLOAD_LEN: usize;

    fn from_payload(payload: &[u8]) -> Self;
}
