//! The main API to the display driver. It owns the transport and the display buffer, tracks the
//! driver lifecycle, and runs the multiplexed refresh.

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
pub mod testing {
    /// The four transport calls making up one latched transmission of `$frame`.
    macro_rules! latched {
        ($frame:expr) => {
            [
                Sent::Bytes($frame.to_vec()),
                Sent::Latch(true),
                Sent::Delay(1),
                Sent::Latch(false),
            ]
        };
    }
}

pub mod buffer;
pub mod clock;

use crate::command::{CommandCode, ControlWord};
use crate::config::Config;
use crate::error::Error;
use crate::grid::Grid;
use crate::interface::DisplayInterface;
use crate::segment::{self, Digit, Segments};

pub use self::buffer::DisplayBuffer;
pub use self::clock::TimeOfDay;

/// Lifecycle of a `Display`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed; `init` has not succeeded yet.
    Uninitialized,
    Initialized,
    /// Shut down by `deinit`. `init` may be called again.
    Deinitialized,
}

/// A driver for a MAX6921 wired to a 9-grid 7-segment tube.
///
/// Every mutator only edits the in-memory buffer. Nothing reaches the tube until `refresh`, and
/// since the chip can only light one grid at a time, `refresh` has to be called continuously:
///
/// ```ignore
/// let mut disp = Display::new(SpiInterface::new(spi, latch, delay));
/// disp.init(None)?;
/// disp.write_string("12-34-56")?;
/// loop {
///     disp.refresh()?;
/// }
/// ```
///
/// All methods take `&mut self`, so a sweep never sees a half-written buffer. If the driver is
/// shared with an interrupt handler behind a mutex and the lock is taken per call, a buffer
/// update can still land between two refreshes of the same frame; the tube then shows a mix of
/// old and new grids for at most one sweep.
pub struct Display<DI>
where
    DI: DisplayInterface,
{
    iface: DI,
    state: State,
    config: Config,
    buffer: DisplayBuffer,
}

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// Construct an uninitialized driver around `iface`. Nothing is sent until `init`.
    pub fn new(iface: DI) -> Self {
        Display {
            iface,
            state: State::Uninitialized,
            config: Config::default(),
            buffer: DisplayBuffer::new(),
        }
    }

    /// Initialize the driver with `config`, or `Config::default()` if `None`.
    ///
    /// Configures the transport, leaving the latch line low, and blanks the buffer. Calling this
    /// on an initialized driver succeeds without doing anything, and the first configuration
    /// stays in effect.
    pub fn init(&mut self, config: Option<Config>) -> Result<(), Error> {
        if self.state == State::Initialized {
            trace!("init: already initialized");
            return Ok(());
        }

        let config = config.unwrap_or_default();
        if let Err(e) = config.validate() {
            warn!("init: rejected config {}", config);
            return Err(e);
        }
        if self.iface.configure(&config).is_err() {
            warn!("init: transport refused {} Hz", config.clock());
            return Err(Error::Hardware);
        }

        self.config = config;
        self.buffer.clear();
        self.state = State::Initialized;
        debug!("init: {}", config);
        Ok(())
    }

    /// Blank the tube and release the transport.
    ///
    /// The buffer is cleared and swept out once so every grid goes dark. The transport is
    /// released and the driver deinitialized even if that final sweep or the release fails, in
    /// which case `Error::Hardware` is returned.
    pub fn deinit(&mut self) -> Result<(), Error> {
        self.ensure_init()?;

        self.buffer.clear();
        let swept = self.sweep();
        let released = self.iface.release().map_err(|_| {
            warn!("deinit: transport release failed");
            Error::Hardware
        });
        self.state = State::Deinitialized;
        debug!("deinit");
        swept.and(released)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state == State::Initialized
    }

    /// The configuration in effect, if initialized.
    pub fn config(&self) -> Option<&Config> {
        match self.state {
            State::Initialized => Some(&self.config),
            _ => None,
        }
    }

    /// Consume the driver and hand back the transport. The tube is left as it is; call `deinit`
    /// first to blank it.
    pub fn release(self) -> DI {
        self.iface
    }

    /// Store a raw segment pattern for `grid`.
    pub fn write_segments<S>(&mut self, grid: u8, segments: S) -> Result<(), Error>
    where
        S: Into<Segments>,
    {
        self.ensure_init()?;
        let grid = Grid::new(grid)?;
        self.buffer.set(grid, segments.into());
        Ok(())
    }

    /// The pattern currently stored for `grid`.
    pub fn read_segments(&self, grid: u8) -> Result<Segments, Error> {
        self.ensure_init()?;
        Ok(self.buffer.get(Grid::new(grid)?))
    }

    /// Store the pattern for decimal `digit`, 0 through 9, on `grid`.
    pub fn write_digit(&mut self, grid: u8, digit: u8) -> Result<(), Error> {
        self.ensure_init()?;
        let grid = Grid::new(grid)?;
        let digit = Digit::new(digit).ok_or(Error::InvalidParam)?;
        self.buffer.set(grid, segment::digit(digit));
        Ok(())
    }

    /// Replace the buffer contents with `text`. See `DisplayBuffer::write_str` for the accepted
    /// characters. Returns the number of grids written.
    pub fn write_string(&mut self, text: &str) -> Result<usize, Error> {
        self.ensure_init()?;
        Ok(self.buffer.write_str(text))
    }

    /// Replace the buffer contents with a 12-hour rendering of a 24-hour time. See
    /// `TimeOfDay::render` for the layout.
    pub fn write_time(&mut self, hours: u8, minutes: u8, seconds: u8) -> Result<(), Error> {
        self.ensure_init()?;
        TimeOfDay::new(hours, minutes, seconds)?.render(&mut self.buffer);
        Ok(())
    }

    /// Blank every grid.
    pub fn clear(&mut self) -> Result<(), Error> {
        self.ensure_init()?;
        self.buffer.clear();
        Ok(())
    }

    /// Set every grid to the same raw pattern. Handy for lamp tests.
    pub fn fill<S>(&mut self, segments: S) -> Result<(), Error>
    where
        S: Into<Segments>,
    {
        self.ensure_init()?;
        self.buffer.fill(segments.into());
        Ok(())
    }

    pub fn buffer(&self) -> Result<&DisplayBuffer, Error> {
        self.ensure_init()?;
        Ok(&self.buffer)
    }

    /// Borrow the buffer for direct editing. Changes show up on the next `refresh`.
    pub fn buffer_mut(&mut self) -> Result<&mut DisplayBuffer, Error> {
        self.ensure_init()?;
        Ok(&mut self.buffer)
    }

    /// Strike every grid once, in order from 0 to 8, waiting the configured settle time after
    /// each one. Blank grids are struck too so every grid gets the same share of time.
    pub fn refresh(&mut self) -> Result<(), Error> {
        self.ensure_init()?;
        self.sweep()
    }

    /// Send a command-only word: `code` on the three command outputs and every grid and segment
    /// output off. The buffer is untouched, and this may be interleaved with refreshes freely.
    pub fn send_command(&mut self, code: u8) -> Result<(), Error> {
        self.ensure_init()?;
        let command = CommandCode::new(code)?;
        trace!("send_command: {}", command);
        ControlWord::command(command)
            .send(&mut self.iface)
            .map_err(|_| transport_failure())
    }

    fn ensure_init(&self) -> Result<(), Error> {
        match self.state {
            State::Initialized => Ok(()),
            _ => Err(Error::NotInitialized),
        }
    }

    fn sweep(&mut self) -> Result<(), Error> {
        let settle_us = self.config.settle();
        for grid in Grid::all() {
            ControlWord::display(grid, self.buffer[grid])
                .send(&mut self.iface)
                .map_err(|_| transport_failure())?;
            self.iface.delay_us(settle_us);
        }
        Ok(())
    }
}

fn transport_failure() -> Error {
    warn!("transport write failed");
    Error::Hardware
}
