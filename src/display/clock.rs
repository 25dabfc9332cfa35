//! 12-hour clock face for IV-18 style tubes.
//!
//! Layout, left to right: `[PM][H][H][-][M][M][-][S][S]`. Grid 0 is the small indicator digit
//! and shows only its dot, lit in the afternoon.

use super::buffer::DisplayBuffer;
use crate::error::Error;
use crate::grid::Grid;
use crate::segment::{self, Digit, Segments};

/// A validated 24-hour time of day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    hours: u8,
    minutes: u8,
    seconds: u8,
}

impl TimeOfDay {
    /// Returns `Error::InvalidParam` unless `hours < 24`, `minutes < 60` and `seconds < 60`.
    pub fn new(hours: u8, minutes: u8, seconds: u8) -> Result<Self, Error> {
        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(Error::InvalidParam);
        }
        Ok(TimeOfDay {
            hours,
            minutes,
            seconds,
        })
    }

    pub fn is_pm(&self) -> bool {
        self.hours >= 12
    }

    /// The hour on a 12-hour dial, 1 through 12.
    pub fn hour12(&self) -> u8 {
        match self.hours {
            0 => 12,
            13..=23 => self.hours - 12,
            h => h,
        }
    }

    /// Replace the whole buffer with this time.
    pub fn render(&self, buf: &mut DisplayBuffer) {
        let hour = self.hour12();
        let cells = [
            if self.is_pm() { Segments::DOT } else { Segments::BLANK },
            if hour < 10 { Segments::BLANK } else { two_digit(hour).0 },
            two_digit(hour).1,
            Segments::DASH,
            two_digit(self.minutes).0,
            two_digit(self.minutes).1,
            Segments::DASH,
            two_digit(self.seconds).0,
            two_digit(self.seconds).1,
        ];
        for (grid, cell) in Grid::all().zip(cells.iter()) {
            buf.set(grid, *cell);
        }
    }
}

/// Tens and units patterns of a value below 100.
fn two_digit(value: u8) -> (Segments, Segments) {
    (
        segment::digit(Digit::units(value / 10)),
        segment::digit(Digit::units(value)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u8) -> Segments {
        segment::digit(Digit::new(value).unwrap())
    }

    fn rendered(h: u8, m: u8, s: u8) -> DisplayBuffer {
        let mut buf = DisplayBuffer::new();
        buf.fill(Segments::ALL);
        TimeOfDay::new(h, m, s).unwrap().render(&mut buf);
        buf
    }

    #[test]
    fn morning_single_digit_hour() {
        let buf = rendered(9, 5, 30);
        #[cfg_attr(rustfmt, rustfmt_skip)]
        assert_eq!(buf.cells(), &[
            Segments::BLANK, // AM
            Segments::BLANK, // no leading zero
            d(9),
            Segments::DASH,
            d(0), d(5),
            Segments::DASH,
            d(3), d(0),
        ]);
    }

    #[test]
    fn afternoon() {
        let buf = rendered(23, 59, 1);
        #[cfg_attr(rustfmt, rustfmt_skip)]
        assert_eq!(buf.cells(), &[
            Segments::DOT, // PM
            d(1), // hour tens
            d(1),
            Segments::DASH,
            d(5), d(9),
            Segments::DASH,
            d(0), d(1),
        ]);
    }

    #[test]
    fn afternoon_single_digit_hour() {
        let buf = rendered(21, 0, 0);
        #[cfg_attr(rustfmt, rustfmt_skip)]
        assert_eq!(buf.cells(), &[
            Segments::DOT,
            Segments::BLANK,
            d(9),
            Segments::DASH,
            d(0), d(0),
            Segments::DASH,
            d(0), d(0),
        ]);
    }

    #[test]
    fn midnight_and_noon_show_twelve() {
        let buf = rendered(0, 0, 0);
        assert_eq!(buf.cells()[..3], [Segments::BLANK, d(1), d(2)]);
        let buf = rendered(12, 0, 0);
        assert_eq!(buf.cells()[..3], [Segments::DOT, d(1), d(2)]);
    }

    #[test]
    fn hour_twelve_conversion() {
        let hours: Vec<u8> = (0..24)
            .map(|h| TimeOfDay::new(h, 0, 0).unwrap().hour12())
            .collect();
        assert_eq!(
            hours,
            vec![12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]
        );
    }

    #[test]
    fn out_of_range() {
        assert_eq!(TimeOfDay::new(24, 0, 0), Err(Error::InvalidParam));
        assert_eq!(TimeOfDay::new(0, 60, 0), Err(Error::InvalidParam));
        assert_eq!(TimeOfDay::new(0, 0, 60), Err(Error::InvalidParam));
        assert!(TimeOfDay::new(23, 59, 59).is_ok());
    }
}
