//! The closed set of failures the driver can report.

use core::fmt;

/// An error returned by a driver operation. None of these carry a payload, so every failure the
/// driver can produce is one of these five values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A parameter was outside its range: a zero clock rate or settle delay, a digit above 9, a
    /// command code above 7, or an out-of-range time of day.
    InvalidParam,
    /// The operation needs an initialized driver.
    NotInitialized,
    /// A grid index was 9 or greater.
    InvalidGrid,
    /// Reserved. Every 8-bit segment pattern is legal, so the driver never returns this.
    InvalidSegment,
    /// The transport could not be configured or refused a write.
    Hardware,
}

const OK_DESCRIPTION: &str = "Operation successful";
const UNKNOWN_DESCRIPTION: &str = "Unknown error";

impl Error {
    /// Stable numeric code, with 0 standing for success.
    pub fn code(self) -> u8 {
        match self {
            Error::InvalidParam => 1,
            Error::NotInitialized => 2,
            Error::InvalidGrid => 3,
            Error::InvalidSegment => 4,
            Error::Hardware => 5,
        }
    }

    /// Look up an error by numeric code. Code 0 is success and is not an error.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Error::InvalidParam),
            2 => Some(Error::NotInitialized),
            3 => Some(Error::InvalidGrid),
            4 => Some(Error::InvalidSegment),
            5 => Some(Error::Hardware),
            _ => None,
        }
    }

    /// Fixed human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Error::InvalidParam => "Invalid parameter provided",
            Error::NotInitialized => "VFD not initialized",
            Error::InvalidGrid => "Grid index out of range",
            Error::InvalidSegment => "Segment value out of range",
            Error::Hardware => "Hardware initialization failed",
        }
    }

    /// Describe a raw numeric code, including success and codes the driver never produces.
    pub fn describe_code(code: u8) -> &'static str {
        match code {
            0 => OK_DESCRIPTION,
            _ => Error::from_code(code).map_or(UNKNOWN_DESCRIPTION, Error::description),
        }
    }
}

/// Describe the outcome of any driver operation.
pub fn describe<T>(result: &Result<T, Error>) -> &'static str {
    match result {
        Ok(_) => OK_DESCRIPTION,
        Err(e) => e.description(),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
