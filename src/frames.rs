use byteorder::{ByteOrder, LittleEndian};

use crate::responses::ResponseKind;
use crate::utils::{checksum, Error};

// Command and response packets share their start codes:
// start1 | 0x55 [1]
// start2 | 0xAA [1]
// devid  | 0x0001 [2]
// param  | parameter [4]
// code   | command / response kind [2]
// chksum | checksum [2]
pub const PACKET_START_CODE1: u8 = 0x55;
pub const PACKET_START_CODE2: u8 = 0xAA;

// start1 | 0x5A [1]
// start2 | 0xA5 [1]
// devid  | 0x0001 [2]
// data   | payload [N]
// chksum | checksum [2]
pub const DATA_START_CODE1: u8 = 0x5A;
pub const DATA_START_CODE2: u8 = 0xA5;

pub const DEVICE_ID: u16 = 0x0001;

/// Size of a command or response packet.
pub const PACKET_SIZE: usize = 12;

/// Size of the data frame header (start codes and device id).
pub const DATA_HEADER_SIZE: usize = 4;

/// Size of the checksum trailer of every frame.
pub const CHECKSUM_SIZE: usize = 2;

/// Largest data frame the driver can receive, header and checksum included.
pub const MAX_FRAME_SIZE: usize = 64 * 1024;

/// Largest payload that fits in a data frame of `MAX_FRAME_SIZE`.
pub const MAX_PAYLOAD_SIZE: usize = MAX_FRAME_SIZE - DATA_HEADER_SIZE - CHECKSUM_SIZE;

/// Why a frame could not be decoded or encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Wrong start codes or a short buffer.
    Protocol,
    /// The frame would exceed `MAX_FRAME_SIZE`, or the output buffer is too short.
    BufferTooSmall,
}

impl From<FrameError> for Error {
    fn from(error: FrameError) -> Error {
        match error {
            FrameError::Protocol => Error::Communication,
            FrameError::BufferTooSmall => Error::BufferTooSmall,
        }
    }
}

/// A command packet, host to module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame {
    pub device_id: u16,
    pub parameter: u32,
    pub command: u16,
    pub checksum: u16,
}

impl CommandFrame {
    /// Builds a command packet with its checksum filled in.
    pub fn encode(command: u16, parameter: u32) -> Self {
        let mut frame = CommandFrame {
            device_id: DEVICE_ID,
            parameter,
            command,
            checksum: 0,
        };
        let bytes = frame.to_bytes();
        frame.checksum = checksum(&bytes[..PACKET_SIZE - CHECKSUM_SIZE]);
        frame
    }

    /// Reads a command packet back. Only the start codes are validated.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        let (device_id, parameter, command, checksum) =
            read_packet(raw, PACKET_START_CODE1, PACKET_START_CODE2)?;
        Ok(CommandFrame {
            device_id,
            parameter,
            command,
            checksum,
        })
    }

    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        write_packet(self.device_id, self.parameter, self.command, self.checksum)
    }
}

/// A response packet, module to host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFrame {
    pub device_id: u16,
    /// Output value on `Ack`, a `DeviceStatus` code on `Nack`.
    pub parameter: u32,
    pub kind: ResponseKind,
    pub checksum: u16,
}

impl ResponseFrame {
    /// Builds a response packet with its checksum filled in.
    pub fn encode(kind: ResponseKind, parameter: u32) -> Self {
        let mut frame = ResponseFrame {
            device_id: DEVICE_ID,
            parameter,
            kind,
            checksum: 0,
        };
        let bytes = frame.to_bytes();
        frame.checksum = checksum(&bytes[..PACKET_SIZE - CHECKSUM_SIZE]);
        frame
    }

    /// Interprets `raw` as a response packet. The checksum field is read out as-is and not
    /// verified here; the receive path checks it before decoding.
    pub fn decode(raw: &[u8]) -> Result<Self, FrameError> {
        let (device_id, parameter, kind, checksum) =
            read_packet(raw, PACKET_START_CODE1, PACKET_START_CODE2)?;
        Ok(ResponseFrame {
            device_id,
            parameter,
            kind: ResponseKind::from_code(kind),
            checksum,
        })
    }

    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        write_packet(self.device_id, self.parameter, self.kind.code(), self.checksum)
    }
}

/// A validated view of a data frame held in some receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFrame<'a> {
    pub device_id: u16,
    pub payload: &'a [u8],
    pub checksum: u16,
}

impl<'a> DataFrame<'a> {
    /// Number of bytes on the wire for a data frame carrying `payload_len` bytes.
    pub const fn frame_size(payload_len: usize) -> usize {
        DATA_HEADER_SIZE + payload_len + CHECKSUM_SIZE
    }

    /// Checks whether a frame carrying `payload_len` bytes can be received at all.
    pub fn check_size(payload_len: usize) -> Result<usize, FrameError> {
        if payload_len > MAX_PAYLOAD_SIZE {
            return Err(FrameError::BufferTooSmall);
        }
        Ok(Self::frame_size(payload_len))
    }

    /// Interprets `raw` as a data frame carrying exactly `payload_len` bytes.
    pub fn decode(raw: &'a [u8], payload_len: usize) -> Result<Self, FrameError> {
        let frame_len = Self::check_size(payload_len)?;
        if raw.len() < frame_len {
            return Err(FrameError::Protocol);
        }
        if raw[0] != DATA_START_CODE1 || raw[1] != DATA_START_CODE2 {
            return Err(FrameError::Protocol);
        }

        let payload_end = DATA_HEADER_SIZE + payload_len;
        Ok(DataFrame {
            device_id: LittleEndian::read_u16(&raw[2..4]),
            payload: &raw[DATA_HEADER_SIZE..payload_end],
            checksum: LittleEndian::read_u16(&raw[payload_end..frame_len]),
        })
    }

    /// Writes a complete data frame for `payload` into `out`, returning the frame length.
    pub fn encode(payload: &[u8], out: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = Self::check_size(payload.len())?;
        if out.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let payload_end = DATA_HEADER_SIZE + payload.len();
        out[0] = DATA_START_CODE1;
        out[1] = DATA_START_CODE2;
        LittleEndian::write_u16(&mut out[2..4], DEVICE_ID);
        out[DATA_HEADER_SIZE..payload_end].copy_from_slice(payload);
        let chk = checksum(&out[..payload_end]);
        LittleEndian::write_u16(&mut out[payload_end..frame_len], chk);
        Ok(frame_len)
    }
}

fn read_packet(raw: &[u8], start1: u8, start2: u8) -> Result<(u16, u32, u16, u16), FrameError> {
    if raw.len() < PACKET_SIZE {
        return Err(FrameError::Protocol);
    }
    if raw[0] != start1 || raw[1] != start2 {
        return Err(FrameError::Protocol);
    }
    Ok((
        LittleEndian::read_u16(&raw[2..4]),
        LittleEndian::read_u32(&raw[4..8]),
        LittleEndian::read_u16(&raw[8..10]),
        LittleEndian::read_u16(&raw[10..12]),
    ))
}

fn write_packet(device_id: u16, parameter: u32, code: u16, chk: u16) -> [u8; PACKET_SIZE] {
    let mut bytes = [0u8; PACKET_SIZE];
    bytes[0] = PACKET_START_CODE1;
    bytes[1] = PACKET_START_CODE2;
    LittleEndian::write_u16(&mut bytes[2..4], device_id);
    LittleEndian::write_u32(&mut bytes[4..8], parameter);
    LittleEndian::write_u16(&mut bytes[8..10], code);
    LittleEndian::write_u16(&mut bytes[10..12], chk);
    bytes
}
