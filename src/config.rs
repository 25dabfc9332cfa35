//! Driver configuration: the serial link parameters and the multiplex timing.

use crate::error::Error;

/// Default serial clock rate.
pub const DEFAULT_CLOCK_HZ: u32 = 2_000_000;
/// Default MOSI pin.
pub const DEFAULT_DATA_PIN: u8 = 11;
/// Default SCK pin.
pub const DEFAULT_CLOCK_PIN: u8 = 10;
/// Default LOAD (latch) pin.
pub const DEFAULT_LATCH_PIN: u8 = 13;
/// Default time each grid stays lit before the next one is struck. Nine grids at 1.5ms gives a
/// 13.5ms sweep, comfortably above the flicker fusion threshold.
pub const DEFAULT_SETTLE_US: u32 = 1500;

/// A configuration for the driver. Builder methods start from the defaults and override one
/// setting at a time.
///
/// The pin numbers are recorded for the benefit of board support code and diagnostics; the
/// driver itself talks to whatever `DisplayInterface` it was given.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    clock_hz: u32,
    data_pin: u8,
    clock_pin: u8,
    latch_pin: u8,
    settle_us: u32,
}

impl Config {
    /// Create a new configuration with the default settings.
    pub fn new() -> Self {
        Config {
            clock_hz: DEFAULT_CLOCK_HZ,
            data_pin: DEFAULT_DATA_PIN,
            clock_pin: DEFAULT_CLOCK_PIN,
            latch_pin: DEFAULT_LATCH_PIN,
            settle_us: DEFAULT_SETTLE_US,
        }
    }

    /// Extend this `Config` with a serial clock rate in Hz. Must be nonzero.
    pub fn clock_hz(self, clock_hz: u32) -> Self {
        Self { clock_hz, ..self }
    }

    /// Extend this `Config` with the data, clock and latch pin numbers.
    pub fn pins(self, data_pin: u8, clock_pin: u8, latch_pin: u8) -> Self {
        Self {
            data_pin,
            clock_pin,
            latch_pin,
            ..self
        }
    }

    /// Extend this `Config` with the per-grid settle delay in microseconds. Must be nonzero.
    pub fn settle_us(self, settle_us: u32) -> Self {
        Self { settle_us, ..self }
    }

    pub fn clock(&self) -> u32 {
        self.clock_hz
    }

    pub fn data_pin(&self) -> u8 {
        self.data_pin
    }

    pub fn clock_pin(&self) -> u8 {
        self.clock_pin
    }

    pub fn latch_pin(&self) -> u8 {
        self.latch_pin
    }

    pub fn settle(&self) -> u32 {
        self.settle_us
    }

    /// Check the settings that have no valid zero value.
    pub fn validate(&self) -> Result<(), Error> {
        if self.clock_hz == 0 || self.settle_us == 0 {
            return Err(Error::InvalidParam);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
