//# Naming follows the GT-511C3 datasheet (ADH-Tech, UART protocol manual v1.x).

/// Commands one can send to the GT-511C3. Names match the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Initialisation. Parameter `1` asks the module for its device info record.
    Open,
    /// Termination.
    Close,
    /// Checks whether the connected USB device is valid.
    UsbInternalCheck,
    /// Changes the UART baud rate. Parameter is the new baud rate.
    ChangeBaudRate,
    /// Enters IAP (firmware upgrade) mode.
    SetIapMode,
    /// Turns the CMOS LED on (`1`) or off (`0`).
    CmosLed,
    /// Returns the number of enrolled fingerprints.
    GetEnrollCount,
    /// Checks whether the given ID is enrolled.
    CheckEnrolled,
    /// Starts an enrollment into the given ID.
    EnrollStart,
    /// Makes the 1st template of an enrollment.
    Enroll1,
    /// Makes the 2nd template of an enrollment.
    Enroll2,
    /// Makes the 3rd template, merges all three and stores the result.
    Enroll3,
    /// Checks whether a finger is on the sensor.
    IsPressFinger,
    /// Deletes the fingerprint with the given ID.
    DeleteId,
    /// Deletes every fingerprint in the database.
    DeleteAll,
    /// 1:1 verification of the captured image against the given ID.
    Verify,
    /// 1:N identification of the captured image against the database.
    Identify,
    /// 1:1 verification of an uploaded template against the given ID.
    VerifyTemplate,
    /// 1:N identification of an uploaded template against the database.
    IdentifyTemplate,
    /// Captures a fingerprint image. Parameter non-zero selects best (slow) quality.
    CaptureFinger,
    /// Makes a template for transmission.
    MakeTemplate,
    /// Downloads the captured image (256x256).
    ///
    /// **Note:** the image does not fit in `MAX_FRAME_SIZE`, so `execute` refuses it with
    /// `Error::BufferTooSmall` before anything is sent. Use `GetRawImage` instead.
    GetImage,
    /// Captures and downloads a raw image (160x120).
    GetRawImage,
    /// Downloads the template with the given ID.
    GetTemplate,
    /// Uploads a template into the given ID.
    SetTemplate,
    /// Obsolete.
    GetDatabaseStart,
    /// Obsolete.
    GetDatabaseEnd,
    /// Not supported by the module.
    UpgradeFirmware,
    /// Not supported by the module.
    UpgradeIsoCdImage,
    /// A code this driver has no name for, sent verbatim.
    Other(u16),
}

impl Command {
    pub fn code(self) -> u16 {
        match self {
            Self::Open => 0x01,
            Self::Close => 0x02,
            Self::UsbInternalCheck => 0x03,
            Self::ChangeBaudRate => 0x04,
            Self::SetIapMode => 0x05,
            Self::CmosLed => 0x12,
            Self::GetEnrollCount => 0x20,
            Self::CheckEnrolled => 0x21,
            Self::EnrollStart => 0x22,
            Self::Enroll1 => 0x23,
            Self::Enroll2 => 0x24,
            Self::Enroll3 => 0x25,
            Self::IsPressFinger => 0x26,
            Self::DeleteId => 0x40,
            Self::DeleteAll => 0x41,
            Self::Verify => 0x50,
            Self::Identify => 0x51,
            Self::VerifyTemplate => 0x52,
            Self::IdentifyTemplate => 0x53,
            Self::CaptureFinger => 0x60,
            Self::MakeTemplate => 0x61,
            Self::GetImage => 0x62,
            Self::GetRawImage => 0x63,
            Self::GetTemplate => 0x70,
            Self::SetTemplate => 0x71,
            Self::GetDatabaseStart => 0x72,
            Self::GetDatabaseEnd => 0x73,
            Self::UpgradeFirmware => 0x80,
            Self::UpgradeIsoCdImage => 0x81,
            Self::Other(code) => code,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            0x01 => Self::Open,
            0x02 => Self::Close,
            0x03 => Self::UsbInternalCheck,
            0x04 => Self::ChangeBaudRate,
            0x05 => Self::SetIapMode,
            0x12 => Self::CmosLed,
            0x20 => Self::GetEnrollCount,
            0x21 => Self::CheckEnrolled,
            0x22 => Self::EnrollStart,
            0x23 => Self::Enroll1,
            0x24 => Self::Enroll2,
            0x25 => Self::Enroll3,
            0x26 => Self::IsPressFinger,
            0x40 => Self::DeleteId,
            0x41 => Self::DeleteAll,
            0x50 => Self::Verify,
            0x51 => Self::Identify,
            0x52 => Self::VerifyTemplate,
            0x53 => Self::IdentifyTemplate,
            0x60 => Self::CaptureFinger,
            0x61 => Self::MakeTemplate,
            0x62 => Self::GetImage,
            0x63 => Self::GetRawImage,
            0x70 => Self::GetTemplate,
            0x71 => Self::SetTemplate,
            0x72 => Self::GetDatabaseStart,
            0x73 => Self::GetDatabaseEnd,
            0x80 => Self::UpgradeFirmware,
            0x81 => Self::UpgradeIsoCdImage,
            other => Self::Other(other),
        }
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> u16 {
        cmd.code()
    }
}
