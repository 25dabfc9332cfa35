//! The transport seam between the driver and the hardware: a write-only byte sink and a latch
//! line, plus the microsecond delays the protocol needs.

use crate::command::Frame;
use crate::config::Config;

/// Minimum time the latch line is held high, in microseconds.
pub const LATCH_HOLD_US: u32 = 1;

pub trait DisplayInterface {
    /// Prepare the link for `config`: apply the serial clock rate and drive the latch line low.
    /// Returns `Err(())` if the underlying peripheral cannot run as configured.
    fn configure(&mut self, config: &Config) -> Result<(), ()>;
    /// Shift `buf` out MSB first, blocking until every bit is on the wire.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ()>;
    /// Drive the latch line.
    fn set_latch(&mut self, high: bool) -> Result<(), ()>;
    /// Busy-wait.
    fn delay_us(&mut self, us: u32);
    /// Give up the link after a final blanking sweep, leaving the latch line low. The default
    /// leaves everything as it is.
    fn release(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

/// Shift a frame into the chip and pulse the latch so it appears on the outputs. The outputs
/// change as the latch falls.
pub fn transmit<DI>(iface: &mut DI, frame: &Frame) -> Result<(), ()>
where
    DI: DisplayInterface,
{
    iface.write_bytes(frame)?;
    iface.set_latch(true)?;
    iface.delay_us(LATCH_HOLD_US);
    iface.set_latch(false)
}

pub mod spi {
    //! The SPI interface uses only the clock and MOSI lines of an SPI master, in mode 0, plus a
    //! GPIO output for the MAX6921's LOAD pin. The chip has no data output, so MISO is unused.

    use hal::blocking::delay::DelayUs;
    use hal::digital::v2::OutputPin;

    use super::DisplayInterface;
    use crate::config::Config;

    pub struct SpiInterface<SPI, LATCH, DELAY> {
        /// The SPI master device connected to DIN and CLK of the MAX6921.
        spi: SPI,
        /// A GPIO output pin connected to the LOAD pin of the MAX6921.
        latch: LATCH,
        /// Source of the latch hold and grid settle delays.
        delay: DELAY,
        /// Highest clock rate the SPI master was set up to run at, if known.
        max_clock_hz: Option<u32>,
    }

    impl<SPI, LATCH, DELAY> SpiInterface<SPI, LATCH, DELAY>
    where
        SPI: hal::blocking::spi::Write<u8>,
        LATCH: OutputPin,
        DELAY: DelayUs<u32>,
    {
        /// Create a new SPI interface to communicate with the driver chip. `spi` must already be
        /// configured for mode 0 at the clock rate the driver `Config` will ask for; embedded-hal
        /// has no way to change it afterwards.
        pub fn new(spi: SPI, latch: LATCH, delay: DELAY) -> Self {
            Self {
                spi,
                latch,
                delay,
                max_clock_hz: None,
            }
        }

        /// Declare the clock rate `spi` was initialized with. Driver initialization then fails
        /// for configurations asking for anything faster.
        pub fn max_clock_hz(self, hz: u32) -> Self {
            Self {
                max_clock_hz: Some(hz),
                ..self
            }
        }

        /// Take the peripherals back.
        pub fn destroy(self) -> (SPI, LATCH, DELAY) {
            (self.spi, self.latch, self.delay)
        }
    }

    impl<SPI, LATCH, DELAY> DisplayInterface for SpiInterface<SPI, LATCH, DELAY>
    where
        SPI: hal::blocking::spi::Write<u8>,
        LATCH: OutputPin,
        DELAY: DelayUs<u32>,
    {
        fn configure(&mut self, config: &Config) -> Result<(), ()> {
            if let Some(max) = self.max_clock_hz {
                if config.clock() > max {
                    return Err(());
                }
            }
            self.latch.set_low().map_err(|_| ())
        }

        fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ()> {
            self.spi.write(buf).map_err(|_| ())
        }

        fn set_latch(&mut self, high: bool) -> Result<(), ()> {
            if high {
                self.latch.set_high().map_err(|_| ())
            } else {
                self.latch.set_low().map_err(|_| ())
            }
        }

        fn delay_us(&mut self, us: u32) {
            self.delay.delay_us(us);
        }

        fn release(&mut self) -> Result<(), ()> {
            self.latch.set_low().map_err(|_| ())
        }
    }

}
