use crate::transport::{LineSettings, RxTimeout};
use crate::utils::Error;

/// Baud rate the module listens at after power-up or reset.
pub const RESET_BAUD_RATE: u32 = 9600;

/// Fastest baud rate the module supports.
pub const MAX_BAUD_RATE: u32 = 115_200;

/// Whether `open` moves the line off the reset baud rate once the module has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudSwitch {
    /// Stay at `RESET_BAUD_RATE` for the whole session.
    Disabled,
    /// Send `ChangeBaudRate` after `Open` and re-init the line at `DeviceConfig::baud_rate`.
    Enabled,
}

impl Default for BaudSwitch {
    fn default() -> Self {
        BaudSwitch::Disabled
    }
}

/// How to reach the module. Read by `open`, never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    /// Physical base address of the UART, passed through to `Uart::init`.
    pub uart_base_address: u64,

    pub uart_clock_hz: u32,

    /// Operating baud rate. Only used with `BaudSwitch::Enabled`.
    pub baud_rate: u32,

    pub rx_timeout: RxTimeout,

    pub baud_switch: BaudSwitch,
}

impl DeviceConfig {
    pub fn new(uart_base_address: u64, uart_clock_hz: u32) -> Self {
        DeviceConfig {
            uart_base_address,
            uart_clock_hz,
            baud_rate: RESET_BAUD_RATE,
            rx_timeout: RxTimeout::default(),
            baud_switch: BaudSwitch::default(),
        }
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_rx_timeout(mut self, rx_timeout: RxTimeout) -> Self {
        self.rx_timeout = rx_timeout;
        self
    }

    pub fn with_baud_switch(mut self, baud_switch: BaudSwitch) -> Self {
        self.baud_switch = baud_switch;
        self
    }

    /// Line settings for bring-up, which always happens at the reset baud rate.
    pub fn reset_line(&self) -> Result<LineSettings, Error> {
        if self.uart_base_address == 0 {
            return Err(Error::BadParameters);
        }
        line(self.uart_clock_hz, RESET_BAUD_RATE)
    }

    /// Line settings for the operating baud rate.
    pub fn target_line(&self) -> Result<LineSettings, Error> {
        line(self.uart_clock_hz, self.baud_rate)
    }

    pub(crate) fn switches_baud(&self) -> bool {
        self.baud_switch == BaudSwitch::Enabled && self.baud_rate != RESET_BAUD_RATE
    }
}

fn line(clock_hz: u32, baud_rate: u32) -> Result<LineSettings, Error> {
    if baud_rate > MAX_BAUD_RATE {
        return Err(Error::BadParameters);
    }
    Ok(LineSettings {
        clock_hz,
        baud_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_stay_at_reset_baud() {
        let config = DeviceConfig::new(0x3086_0000, 80_000_000);
        assert_eq!(config.baud_rate, RESET_BAUD_RATE);
        assert_eq!(config.rx_timeout, RxTimeout::Never);
        assert_eq!(config.baud_switch, BaudSwitch::Disabled);
        assert!(!config.switches_baud());
    }

    #[test]
    fn reset_line_ignores_target_baud() {
        let config = DeviceConfig::new(0x3086_0000, 80_000_000).with_baud_rate(921_600);
        assert_eq!(
            config.reset_line(),
            Ok(LineSettings {
                clock_hz: 80_000_000,
                baud_rate: 9600
            })
        );
        assert_eq!(config.target_line(), Err(Error::BadParameters));
    }

    #[test]
    fn reset_line_needs_base_address() {
        let config = DeviceConfig::new(0, 80_000_000);
        assert_eq!(config.reset_line(), Err(Error::BadParameters));
    }

    #[test]
    fn switch_only_when_enabled_and_different() {
        let config = DeviceConfig::new(1, 1).with_baud_switch(BaudSwitch::Enabled);
        assert!(!config.switches_baud());
        assert!(config.with_baud_rate(115_200).switches_baud());
    }
}
