use core::fmt::Debug;

use embedded_hal::serial::{Read, Write};
use log::{trace, warn};
use nb::block;

use crate::utils::Error;

/// Line parameters handed to `Uart::init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSettings {
    pub clock_hz: u32,
    pub baud_rate: u32,
}

/// A UART the module is wired to: the embedded-hal byte primitives plus line bring-up.
///
/// `init` may be called more than once on the same UART (for instance to switch baud rate).
/// `release` is called whenever the session goes back to closed, including after a failed
/// open, so an implementation can hand the line back to whoever owns it.
pub trait Uart: Read<u8> + Write<u8> {
    type InitError: Debug;

    fn init(&mut self, base_address: u64, settings: &LineSettings) -> Result<(), Self::InitError>;

    fn release(&mut self) {}
}

/// How long to wait for each incoming byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxTimeout {
    /// Block until the byte arrives, however long that takes.
    Never,
    /// Give up after this many consecutive `WouldBlock` polls.
    Polls(u32),
}

impl Default for RxTimeout {
    fn default() -> Self {
        RxTimeout::Never
    }
}

pub(crate) fn put_byte<U: Uart>(uart: &mut U, byte: u8) -> Result<(), Error> {
    block!(uart.write(byte)).map_err(|_| {
        warn!("uart write failed");
        Error::Communication
    })
}

pub(crate) fn flush<U: Uart>(uart: &mut U) -> Result<(), Error> {
    block!(uart.flush()).map_err(|_| {
        warn!("uart flush failed");
        Error::Communication
    })
}

pub(crate) fn get_byte<U: Uart>(uart: &mut U, timeout: RxTimeout) -> Result<u8, Error> {
    let limit = match timeout {
        RxTimeout::Never => {
            return block!(uart.read()).map_err(|_| {
                warn!("uart read failed");
                Error::Communication
            })
        }
        RxTimeout::Polls(limit) => limit,
    };

    let mut polls = 0u32;
    loop {
        match uart.read() {
            Ok(byte) => return Ok(byte),
            Err(nb::Error::WouldBlock) => {
                polls += 1;
                if polls >= limit {
                    trace!("rx timed out after {} polls", polls);
                    return Err(Error::Communication);
                }
            }
            Err(nb::Error::Other(_)) => {
                warn!("uart read failed");
                return Err(Error::Communication);
            }
        }
    }
}
