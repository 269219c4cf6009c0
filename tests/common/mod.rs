#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::serial::{Read, Write};
use gt511c3::{
    CommandFrame, DataFrame, DeviceStatus, LineSettings, ResponseFrame, ResponseKind, Uart,
};

// The module side of the wire: bytes it will send, bytes it got, and how the line was set up.
#[derive(Debug, Default)]
pub struct Wire {
    pub incoming: VecDeque<u8>,
    pub written: Vec<u8>,
    pub reads: usize,
    pub would_blocks: usize,
    pub inits: Vec<(u64, LineSettings)>,
    pub releases: usize,
    pub fail_init: bool,
    // When set, an empty `incoming` reads as `WouldBlock` instead of an error.
    pub starve: bool,
}

impl Wire {
    pub fn queue(&mut self, bytes: &[u8]) {
        self.incoming.extend(bytes.iter().copied());
    }

    pub fn commands(&self) -> Vec<CommandFrame> {
        self.written
            .chunks(12)
            .map(|chunk| CommandFrame::decode(chunk).expect("host sent a malformed packet"))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockUart(pub Rc<RefCell<Wire>>);

impl MockUart {
    pub fn new() -> (Self, Rc<RefCell<Wire>>) {
        let wire = Rc::new(RefCell::new(Wire::default()));
        (MockUart(wire.clone()), wire)
    }
}

#[derive(Debug)]
pub struct Exhausted;

impl Read<u8> for MockUart {
    type Error = Exhausted;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let mut wire = self.0.borrow_mut();
        match wire.incoming.pop_front() {
            Some(byte) => {
                wire.reads += 1;
                Ok(byte)
            }
            None if wire.starve => {
                wire.would_blocks += 1;
                Err(nb::Error::WouldBlock)
            }
            None => Err(nb::Error::Other(Exhausted)),
        }
    }
}

impl Write<u8> for MockUart {
    type Error = ();

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.0.borrow_mut().written.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

impl Uart for MockUart {
    type InitError = &'static str;

    fn init(&mut self, base_address: u64, settings: &LineSettings) -> Result<(), Self::InitError> {
        let mut wire = self.0.borrow_mut();
        if wire.fail_init {
            return Err("line refused");
        }
        wire.inits.push((base_address, *settings));
        Ok(())
    }

    fn release(&mut self) {
        self.0.borrow_mut().releases += 1;
    }
}

pub fn ack(parameter: u32) -> [u8; 12] {
    ResponseFrame::encode(ResponseKind::Ack, parameter).to_bytes()
}

pub fn nack(status: u32) -> [u8; 12] {
    ResponseFrame::encode(ResponseKind::Nack, status).to_bytes()
}

pub fn nack_status(status: DeviceStatus) -> [u8; 12] {
    let code = match status {
        DeviceStatus::IsNotUsed => 0x1004,
        DeviceStatus::InvalidPos => 0x1003,
        DeviceStatus::VerifyFailed => 0x1007,
        DeviceStatus::DbIsEmpty => 0x100A,
        DeviceStatus::FingerIsNotPressed => 0x1012,
        other => panic!("no code table entry for {:?}", other),
    };
    nack(code)
}

pub fn data(payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; DataFrame::frame_size(payload.len())];
    DataFrame::encode(payload, &mut frame).expect("payload too large");
    frame
}
