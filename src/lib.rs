//! **gt511c3** is an embedded-hal driver for the ADH-Tech GT-511C3 (and likely similar GT-5xx)
//! fingerprint scanner modules.
//!
//! The driver speaks the module's UART packet protocol: 12-byte command and response packets,
//! variable-length data frames, and a 16-bit additive checksum on all of them. Status codes the
//! module reports are translated into a small [`Error`] enum.
//!
//! It does not strive to cover image processing or firmware upgrades; templates and images are
//! moved around as opaque bytes.
//!
//! ## Example
//!
//! To open the module and count enrolled fingerprints:
//! ```
//! # use embedded_hal::serial::{Read, Write};
//! use gt511c3::{DeviceConfig, Gt511c3, LineSettings, Uart};
//! # struct TestUart(usize);
//! #
//! # // ACK to OPEN, then ACK to GET_ENROLL_COUNT with parameter 3
//! # const RES_DATA: &[u8] = &[
//! #     0x55, 0xaa, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x30, 0x00, 0x30, 0x01,
//! #     0x55, 0xaa, 0x01, 0x00, 0x03, 0x00, 0x00, 0x00, 0x30, 0x00, 0x33, 0x01,
//! # ];
//! #
//! # impl Write<u8> for TestUart {
//! #     type Error = ();
//! #     fn write(&mut self, _word: u8) -> nb::Result<(), Self::Error> {
//! #         return Ok(());
//! #     }
//! #     fn flush(&mut self) -> nb::Result<(), Self::Error> {
//! #         return Ok(());
//! #     }
//! # }
//! #
//! # impl Read<u8> for TestUart {
//! #     type Error = ();
//! #     fn read(&mut self) -> nb::Result<u8, Self::Error> {
//! #         let word = RES_DATA[self.0];
//! #         self.0 += 1;
//! #         return Ok(word);
//! #     }
//! # }
//! #
//! # impl Uart for TestUart {
//! #     type InitError = ();
//! #     fn init(&mut self, _base: u64, _settings: &LineSettings) -> Result<(), ()> {
//! #         return Ok(());
//! #     }
//! # }
//! # let uart = TestUart(0);
//!
//! // Obtain a UART from some HAL and wrap it in `Uart`
//! let mut scanner = Gt511c3::new(uart);
//! let config = DeviceConfig::new(0x3086_0000, 80_000_000);
//!
//! scanner.open(&config, false).expect("open failed");
//! match scanner.enroll_count() {
//!     Ok(count) => println!("Enrolled: {}", count),
//!     Err(error) => panic!("Error: {:#?}", error),
//! }
//! ```
//!
//! For programs that drive a real module from a PC, see the `demos` directory.
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![no_std]

mod commands;
mod config;
mod driver;
mod frames;
mod protocol;
mod responses;
mod transport;
mod utils;

pub use crate::commands::Command;
pub use crate::config::{BaudSwitch, DeviceConfig, MAX_BAUD_RATE, RESET_BAUD_RATE};
pub use crate::driver::{EnrollStage, Gt511c3, SessionState, RAW_IMAGE_SIZE, TEMPLATE_SIZE};
pub use crate::frames::{
    CommandFrame, DataFrame, FrameError, ResponseFrame, DATA_HEADER_SIZE, DEVICE_ID,
    MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, PACKET_SIZE,
};
pub use crate::protocol::Protocol;
pub use crate::responses::{DeviceInfo, DeviceStatus, ResponseKind};
pub use crate::transport::{LineSettings, RxTimeout, Uart};
pub use crate::utils::{checksum, Error, FromPayload};
