use core::fmt;

use arrayvec::ArrayVec;
use byteorder::{ByteOrder, LittleEndian};
use log::{debug, trace, warn};

use crate::commands::Command;
use crate::frames::{
    CommandFrame, DataFrame, ResponseFrame, CHECKSUM_SIZE, MAX_FRAME_SIZE, PACKET_SIZE,
};
use crate::responses::{DeviceStatus, ResponseKind};
use crate::transport::{self, RxTimeout, Uart};
use crate::utils::{checksum, Error};

/// One command exchange at a time over a UART: send a command packet, read the response
/// packet, and optionally a data frame after it.
///
/// Every frame is received into a single buffer of `MAX_FRAME_SIZE` bytes owned by this
/// struct, so receiving never allocates. Data returned from `receive_exact` and
/// `receive_data` borrows that buffer and is overwritten by the next receive.
pub struct Protocol<U> {
    uart: U,
    rx_timeout: RxTimeout,
    last_status: Option<DeviceStatus>,
    received: ArrayVec<[u8; MAX_FRAME_SIZE]>,
}

impl<U> fmt::Debug for Protocol<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Protocol")
            .field("rx_timeout", &self.rx_timeout)
            .field("last_status", &self.last_status)
            .field("received_len", &self.received.len())
            .finish()
    }
}

impl<U: Uart> Protocol<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            rx_timeout: RxTimeout::Never,
            last_status: None,
            received: ArrayVec::new(),
        }
    }

    pub fn set_rx_timeout(&mut self, rx_timeout: RxTimeout) {
        self.rx_timeout = rx_timeout;
    }

    pub fn rx_timeout(&self) -> RxTimeout {
        self.rx_timeout
    }

    /// Status carried by the NACK that failed the most recent command, if it failed that way.
    ///
    /// Several statuses share one `Error` kind; this keeps the exact one around.
    pub fn last_status(&self) -> Option<DeviceStatus> {
        self.last_status
    }

    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    /// Gives the UART back.
    pub fn free(self) -> U {
        self.uart
    }

    /// Sends a command and blocks waiting for its response packet.
    /// Returns the response parameter on ACK. A NACK fails with the error its status maps to.
    pub fn send_command(&mut self, command: Command, parameter: u32) -> Result<u32, Error> {
        self.last_status = None;
        let frame = CommandFrame::encode(command.code(), parameter);
        debug!("-> {:?} ({:#010x})", command, parameter);

        let bytes = frame.to_bytes();
        trace!("tx {:02x?}", bytes);
        for byte in bytes.iter() {
            transport::put_byte(&mut self.uart, *byte)?;
        }
        transport::flush(&mut self.uart)?;

        let response = self.receive_response()?;
        debug!("<- ACK ({:#010x})", response.parameter);
        Ok(response.parameter)
    }

    /// Reads one response packet and checks it. Only an ACK comes back as `Ok`.
    pub fn receive_response(&mut self) -> Result<ResponseFrame, Error> {
        let raw = self.receive_exact(PACKET_SIZE)?;
        let response = ResponseFrame::decode(raw)?;

        match response.kind {
            ResponseKind::Ack => Ok(response),
            ResponseKind::Nack => {
                let status = DeviceStatus::from_code(response.parameter);
                warn!("<- NACK {:?}", status);
                self.last_status = Some(status);
                Err(Error::from(status))
            }
            ResponseKind::Unknown(code) => {
                warn!("<- unknown response kind {:#06x}", code);
                Err(Error::Communication)
            }
        }
    }

    /// Reads a data frame carrying exactly `payload_len` bytes and returns the payload.
    /// Fails with `BufferTooSmall` before touching the UART if the frame cannot fit.
    pub fn receive_data(&mut self, payload_len: usize) -> Result<&[u8], Error> {
        let frame_len = DataFrame::check_size(payload_len)?;
        let raw = self.receive_exact(frame_len)?;
        let frame = DataFrame::decode(raw, payload_len)?;
        Ok(frame.payload)
    }

    /// Reads `length` bytes and verifies the little-endian checksum in the last two of them
    /// against the sum of the rest.
    pub fn receive_exact(&mut self, length: usize) -> Result<&[u8], Error> {
        if length < CHECKSUM_SIZE {
            return Err(Error::BadParameters);
        }
        if length > MAX_FRAME_SIZE {
            return Err(Error::BufferTooSmall);
        }

        self.received.clear();
        for _ in 0..length {
            let byte = transport::get_byte(&mut self.uart, self.rx_timeout)?;
            self.received
                .try_push(byte)
                .map_err(|_| Error::BufferTooSmall)?;
        }
        trace!("rx {:02x?}", &self.received[..]);

        let (body, trailer) = self.received.split_at(length - CHECKSUM_SIZE);
        let expected = LittleEndian::read_u16(trailer);
        let calculated = checksum(body);
        if expected != calculated {
            warn!(
                "checksum mismatch: frame says {:#06x}, calculated {:#06x}",
                expected, calculated
            );
            return Err(Error::Communication);
        }

        Ok(&self.received[..])
    }
}
