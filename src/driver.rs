use log::{debug, error};

use crate::commands::Command;
use crate::config::DeviceConfig;
use crate::frames::DataFrame;
use crate::protocol::Protocol;
use crate::responses::{DeviceInfo, DeviceStatus};
use crate::transport::Uart;
use crate::utils::{Error, FromPayload};

/// Size of one fingerprint template, as moved by `GetTemplate` / `SetTemplate`.
pub const TEMPLATE_SIZE: usize = 498;

/// Size of the image downloaded by `GetRawImage` (160x120, one byte per pixel).
pub const RAW_IMAGE_SIZE: usize = 160 * 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Open,
}

/// Enrollment takes three captures, each made into a template with its own command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollStage {
    First,
    Second,
    Third,
}

impl EnrollStage {
    fn command(self) -> Command {
        match self {
            Self::First => Command::Enroll1,
            Self::Second => Command::Enroll2,
            Self::Third => Command::Enroll3,
        }
    }
}

/// Represents a GT-511C3 connected to a UART.
///
/// The session is either open or closed. Commands other than `open` need it open; the UART
/// is released every time it goes back to closed, including when `open` fails halfway.
#[derive(Debug)]
pub struct Gt511c3<U> {
    protocol: Protocol<U>,
    state: SessionState,
}

impl<U: Uart> Gt511c3<U> {
    pub fn new(uart: U) -> Self {
        Self {
            protocol: Protocol::new(uart),
            state: SessionState::Closed,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// See `Protocol::last_status`.
    pub fn last_status(&self) -> Option<DeviceStatus> {
        self.protocol.last_status()
    }

    /// Gives the UART back. Does not talk to the module, so close it first.
    pub fn free(self) -> U {
        self.protocol.free()
    }

    /// Brings the line up at the reset baud rate and sends `Open`.
    ///
    /// With `want_info` the module is asked for its `DeviceInfo` record, which is returned.
    /// Any failure leaves the session closed.
    pub fn open(
        &mut self,
        config: &DeviceConfig,
        want_info: bool,
    ) -> Result<Option<DeviceInfo>, Error> {
        if self.state == SessionState::Open {
            return Err(Error::BadState);
        }

        let line = config.reset_line()?;
        if config.switches_baud() {
            config.target_line()?;
        }

        self.protocol.set_rx_timeout(config.rx_timeout);
        if let Err(e) = self
            .protocol
            .uart_mut()
            .init(config.uart_base_address, &line)
        {
            error!("uart init at {} baud failed: {:?}", line.baud_rate, e);
            self.protocol.uart_mut().release();
            return Err(Error::BadParameters);
        }

        match self.bring_up(config, want_info) {
            Ok(info) => {
                debug!("session open");
                self.state = SessionState::Open;
                Ok(info)
            }
            Err(e) => {
                error!("open failed: {}", e);
                self.protocol.uart_mut().release();
                Err(e)
            }
        }
    }

    fn bring_up(
        &mut self,
        config: &DeviceConfig,
        want_info: bool,
    ) -> Result<Option<DeviceInfo>, Error> {
        self.protocol
            .send_command(Command::Open, u32::from(want_info))?;

        let info = if want_info {
            let payload = self.protocol.receive_data(DeviceInfo::PAYLOAD_LEN)?;
            Some(DeviceInfo::from_payload(payload))
        } else {
            None
        };

        if config.switches_baud() {
            let line = config.target_line()?;
            self.protocol
                .send_command(Command::ChangeBaudRate, line.baud_rate)?;
            if let Err(e) = self
                .protocol
                .uart_mut()
                .init(config.uart_base_address, &line)
            {
                error!("uart init at {} baud failed: {:?}", line.baud_rate, e);
                return Err(Error::BadParameters);
            }
            debug!("switched to {} baud", line.baud_rate);
        }

        Ok(info)
    }

    /// Sends `Close`. The session is closed afterwards even if the module answers with an
    /// error; that error is still returned.
    pub fn close(&mut self) -> Result<(), Error> {
        if self.state != SessionState::Open {
            return Err(Error::BadState);
        }

        let result = self.protocol.send_command(Command::Close, 0).map(|_| ());
        self.state = SessionState::Closed;
        self.protocol.uart_mut().release();

        match result {
            Ok(()) => debug!("session closed"),
            Err(e) => error!("close failed: {}", e),
        }
        result
    }

    /// Sends any command and returns the ACK parameter.
    ///
    /// If `reply` is given, the command is expected to be followed by a data frame of exactly
    /// `reply.len()` bytes, which is copied into it. Nothing is read past a failed command, and
    /// nothing is sent if the data frame could not be received.
    pub fn execute(
        &mut self,
        command: Command,
        parameter: u32,
        reply: Option<&mut [u8]>,
    ) -> Result<u32, Error> {
        if self.state != SessionState::Open {
            return Err(Error::BadState);
        }
        if let Some(buffer) = reply.as_ref() {
            DataFrame::check_size(buffer.len())?;
        }

        let output = self.protocol.send_command(command, parameter)?;
        if let Some(buffer) = reply {
            let payload = self.protocol.receive_data(buffer.len())?;
            buffer.copy_from_slice(payload);
        }
        Ok(output)
    }

    /// Number of enrolled fingerprints.
    pub fn enroll_count(&mut self) -> Result<u32, Error> {
        self.execute(Command::GetEnrollCount, 0, None)
    }

    /// Whether a fingerprint is stored under `id`.
    pub fn check_enrolled(&mut self, id: u32) -> Result<bool, Error> {
        match self.execute(Command::CheckEnrolled, id, None) {
            Ok(_) => Ok(true),
            Err(_) if self.last_status() == Some(DeviceStatus::IsNotUsed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Whether a finger is on the sensor right now.
    pub fn is_press_finger(&mut self) -> Result<bool, Error> {
        self.execute(Command::IsPressFinger, 0, None)
            .map(|parameter| parameter == 0)
    }

    pub fn set_led(&mut self, on: bool) -> Result<(), Error> {
        self.execute(Command::CmosLed, u32::from(on), None)
            .map(|_| ())
    }

    /// Captures a fingerprint. Best quality is slower and meant for enrollment.
    pub fn capture_finger(&mut self, best_quality: bool) -> Result<(), Error> {
        self.execute(Command::CaptureFinger, u32::from(best_quality), None)
            .map(|_| ())
    }

    pub fn enroll_start(&mut self, id: u32) -> Result<(), Error> {
        self.execute(Command::EnrollStart, id, None).map(|_| ())
    }

    /// Makes a template from the last capture. Capture before each stage.
    pub fn enroll(&mut self, stage: EnrollStage) -> Result<(), Error> {
        self.execute(stage.command(), 0, None).map(|_| ())
    }

    pub fn delete_id(&mut self, id: u32) -> Result<(), Error> {
        self.execute(Command::DeleteId, id, None).map(|_| ())
    }

    pub fn delete_all(&mut self) -> Result<(), Error> {
        self.execute(Command::DeleteAll, 0, None).map(|_| ())
    }

    /// 1:1 match of the last capture against `id`. A mismatch is `Error::AccessDenied`.
    pub fn verify(&mut self, id: u32) -> Result<(), Error> {
        self.execute(Command::Verify, id, None).map(|_| ())
    }

    /// 1:N match of the last capture against the database; returns the matching ID.
    pub fn identify(&mut self) -> Result<u32, Error> {
        self.execute(Command::Identify, 0, None)
    }

    /// Downloads the template stored under `id`.
    pub fn get_template(
        &mut self,
        id: u32,
        template: &mut [u8; TEMPLATE_SIZE],
    ) -> Result<(), Error> {
        self.execute(Command::GetTemplate, id, Some(&mut template[..]))
            .map(|_| ())
    }

    /// Captures and downloads a raw, unprocessed image.
    pub fn get_raw_image(&mut self, image: &mut [u8; RAW_IMAGE_SIZE]) -> Result<(), Error> {
        self.execute(Command::GetRawImage, 0, Some(&mut image[..]))
            .map(|_| ())
    }
}
