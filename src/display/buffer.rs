//! The frame held in RAM between refresh sweeps.

use core::ops::{Index, IndexMut};

use crate::grid::{Grid, NUM_GRIDS};
use crate::segment::{self, Digit, Segments};

/// One segment pattern per grid, left to right.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer([Segments; NUM_GRIDS]);

impl DisplayBuffer {
    /// A buffer with every grid blank.
    pub fn new() -> Self {
        DisplayBuffer([Segments::BLANK; NUM_GRIDS])
    }

    pub fn get(&self, grid: Grid) -> Segments {
        self.0[grid.index() as usize]
    }

    pub fn set(&mut self, grid: Grid, segments: Segments) {
        self.0[grid.index() as usize] = segments;
    }

    /// Blank every grid.
    pub fn clear(&mut self) {
        self.fill(Segments::BLANK);
    }

    /// Set every grid to the same raw pattern.
    pub fn fill(&mut self, segments: Segments) {
        self.0 = [segments; NUM_GRIDS];
    }

    /// The patterns in grid order.
    pub fn cells(&self) -> &[Segments; NUM_GRIDS] {
        &self.0
    }

    pub fn cells_mut(&mut self) -> &mut [Segments; NUM_GRIDS] {
        &mut self.0
    }

    /// Render `text` from the leftmost grid, after blanking the whole buffer.
    ///
    /// Digits, `-` and ` ` each take one grid. A `.` lights the decimal point of the grid
    /// written just before it and takes no grid of its own; a leading `.` does nothing. Any other
    /// character is skipped. Once all nine grids are used the rest of the text is dropped, dots
    /// included.
    ///
    /// Returns the number of grids written.
    pub fn write_str(&mut self, text: &str) -> usize {
        self.clear();

        let mut next = 0;
        for c in text.chars() {
            if next == NUM_GRIDS {
                break;
            }
            let cell = match c {
                '.' => {
                    if let Some(prev) = next.checked_sub(1) {
                        self.0[prev] |= Segments::DOT;
                    }
                    continue;
                }
                '-' => Segments::DASH,
                ' ' => Segments::BLANK,
                c => match Digit::from_char(c) {
                    Some(d) => segment::digit(d),
                    None => continue,
                },
            };
            self.0[next] = cell;
            next += 1;
        }
        next
    }
}

impl Index<Grid> for DisplayBuffer {
    type Output = Segments;

    fn index(&self, grid: Grid) -> &Segments {
        &self.0[grid.index() as usize]
    }
}

impl IndexMut<Grid> for DisplayBuffer {
    fn index_mut(&mut self, grid: Grid) -> &mut Segments {
        &mut self.0[grid.index() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: u8) -> Segments {
        segment::digit(Digit::new(value).unwrap())
    }

    fn g(index: u8) -> Grid {
        Grid::new(index).unwrap()
    }

    #[test]
    fn starts_blank() {
        let buf = DisplayBuffer::new();
        assert!(buf.cells().iter().all(|s| s.is_blank()));
        assert_eq!(buf, DisplayBuffer::default());
    }

    #[test]
    fn single_digit() {
        let mut buf = DisplayBuffer::new();
        assert_eq!(buf.write_str("5"), 1);
        assert_eq!(buf[g(0)], d(5));
        for grid in Grid::all().skip(1) {
            assert_eq!(buf[grid], Segments::BLANK);
        }
    }

    #[test]
    fn dot_joins_previous_digit() {
        let mut buf = DisplayBuffer::new();
        assert_eq!(buf.write_str("1.2"), 2);
        assert_eq!(buf[g(0)], d(1) | Segments::DOT);
        assert_eq!(buf[g(1)], d(2));
        assert_eq!(buf[g(2)], Segments::BLANK);
    }

    #[test]
    fn leading_dot_is_ignored() {
        let mut buf = DisplayBuffer::new();
        assert_eq!(buf.write_str(".7"), 1);
        assert_eq!(buf[g(0)], d(7));
    }

    #[test]
    fn dot_after_blank_and_dash() {
        let mut buf = DisplayBuffer::new();
        assert_eq!(buf.write_str(" .-."), 2);
        assert_eq!(buf[g(0)], Segments::DOT);
        assert_eq!(buf[g(1)], Segments::DASH | Segments::DOT);
    }

    #[test]
    fn overflow_is_truncated() {
        let mut buf = DisplayBuffer::new();
        assert_eq!(buf.write_str("123456789X"), 9);
        for (grid, value) in Grid::all().zip(1..=9) {
            assert_eq!(buf[grid], d(value));
        }

        assert_eq!(buf.write_str("1234567890."), 9);
        assert_eq!(buf[g(8)], d(9), "dot past the last grid is dropped");
    }

    #[test]
    fn unknown_characters_are_skipped() {
        let mut buf = DisplayBuffer::new();
        assert_eq!(buf.write_str("a1b-c2é"), 3);
        assert_eq!(buf.cells()[..3], [d(1), Segments::DASH, d(2)]);
    }

    #[test]
    fn write_str_clears_first() {
        let mut buf = DisplayBuffer::new();
        buf.fill(Segments::ALL);
        assert_eq!(buf.write_str("12:34"), 4);
        assert_eq!(buf.cells()[..4], [d(1), d(2), d(3), d(4)]);
        assert!(buf.cells()[4..].iter().all(|s| s.is_blank()));

        assert_eq!(buf.write_str(""), 0);
        assert_eq!(buf, DisplayBuffer::new());
    }

    #[test]
    fn fill_and_clear() {
        let mut buf = DisplayBuffer::new();
        buf.fill(Segments(0xA5));
        assert!(buf.cells().iter().all(|&s| s == Segments(0xA5)));
        buf.clear();
        assert_eq!(buf, DisplayBuffer::new());
    }

    #[test]
    fn direct_cell_access() {
        let mut buf = DisplayBuffer::new();
        buf.set(g(4), Segments::DASH);
        buf.cells_mut()[5] = Segments::DOT;
        buf[g(6)] |= Segments(0x01);
        assert_eq!(buf.get(g(4)), Segments::DASH);
        assert_eq!(buf[g(5)], Segments::DOT);
        assert_eq!(buf[g(6)], Segments(0x01));
    }
}
