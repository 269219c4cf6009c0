use std::io::{self, ErrorKind};
use std::time::Duration;

use embedded_hal::serial::{Read, Write};
use gt511c3::{LineSettings, Uart};
use serialport::prelude::*;
use serialport::{available_ports, open};

// We're cheating here and will use the host OS's serial port
// as our UART, and for that we have to implement the read/write
// interfaces from embedded-hal plus the driver's line bring-up.

/// How long one `read` waits before reporting `WouldBlock`.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A host serial port has no physical base address, but the driver insists on a non-zero one.
pub const HOST_BASE_ADDRESS: u64 = 1;

pub struct SerialUart(pub Box<dyn SerialPort>);

impl SerialUart {
    pub fn open(port_name: &str) -> io::Result<Self> {
        let mut port = open(port_name)?;
        port.set_timeout(POLL_INTERVAL)?;
        Ok(SerialUart(port))
    }
}

impl Read<u8> for SerialUart {
    type Error = io::Error;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let mut buf: [u8; 1] = [0u8];
        match io::Read::read(&mut self.0, &mut buf) {
            Ok(1) => {
                log::trace!("read: {:02x}", buf[0]);
                Ok(buf[0])
            }
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(ref e) if e.kind() == ErrorKind::TimedOut => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }
}

impl Write<u8> for SerialUart {
    type Error = io::Error;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        let buf: [u8; 1] = [word];
        match io::Write::write(&mut self.0, &buf) {
            Ok(1) => {
                log::trace!("write: {:02x}", word);
                Ok(())
            }
            Ok(_) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        io::Write::flush(&mut self.0).map_err(nb::Error::Other)
    }
}

impl Uart for SerialUart {
    type InitError = serialport::Error;

    fn init(&mut self, _base_address: u64, settings: &LineSettings) -> Result<(), Self::InitError> {
        self.0.set_baud_rate(settings.baud_rate)
    }
}

pub fn print_ports() {
    let ports = available_ports().unwrap();
    for port in ports {
        println!("Available port: {} ({:#?})", port.port_name, port.port_type);
    }
}

#[allow(dead_code)]
// This allows us to share code between different PC-based demos.
fn main() {}
