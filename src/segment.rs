//! Segment patterns and the symbol font.
//!
//! Bit 0 of a pattern drives segment A, bit 6 segment G, and bit 7 the decimal point, which the
//! tube datasheets call H:
//!
//! ```txt
//!      A
//!     ---
//!  F |   | B
//!     -G-
//!  E |   | C
//!     ---   . H
//!      D
//! ```

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use itertools::Itertools;

/// Names of the segments, indexed by bit position.
static SEGMENT_NAMES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// An 8-bit segment illumination pattern. Every value is legal: a set bit lights its segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segments(pub u8);

impl Segments {
    /// All segments off.
    pub const BLANK: Segments = Segments(0b0000_0000);
    /// Decimal point only.
    pub const DOT: Segments = Segments(0b1000_0000);
    /// Segment G only, drawn as a dash or minus sign.
    pub const DASH: Segments = Segments(0b0100_0000);
    /// Every segment and the decimal point.
    pub const ALL: Segments = Segments(0b1111_1111);

    /// The raw pattern.
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// This pattern with the decimal point lit as well.
    pub fn with_dot(self) -> Segments {
        self | Segments::DOT
    }

    /// Names of the lit segments, A first and the decimal point (H) last.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        SEGMENT_NAMES
            .iter()
            .enumerate()
            .filter(move |&(bit, _)| self.0 & (1 << bit) != 0)
            .map(|(_, name)| *name)
    }
}

impl From<u8> for Segments {
    fn from(bits: u8) -> Self {
        Segments(bits)
    }
}

impl From<Segments> for u8 {
    fn from(segments: Segments) -> u8 {
        segments.0
    }
}

impl BitOr for Segments {
    type Output = Segments;

    fn bitor(self, rhs: Segments) -> Segments {
        Segments(self.0 | rhs.0)
    }
}

impl BitOrAssign for Segments {
    fn bitor_assign(&mut self, rhs: Segments) {
        self.0 |= rhs.0;
    }
}

/// Formats as the space-separated names of the lit segments, e.g. `A B C D E F` for a zero. A
/// blank pattern formats as the empty string.
impl fmt::Display for Segments {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.names().format(" "))
    }
}

/// A decimal digit, 0 through 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` for values above 9.
    pub fn new(value: u8) -> Option<Digit> {
        match value {
            0..=9 => Some(Digit(value)),
            _ => None,
        }
    }

    /// Parse an ASCII decimal digit.
    pub fn from_char(c: char) -> Option<Digit> {
        c.to_digit(10).map(|d| Digit(d as u8))
    }

    /// The units digit of `value`.
    pub fn units(value: u8) -> Digit {
        Digit(value % 10)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Everything the font can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    Digit(Digit),
    /// Decimal point alone.
    Dot,
    /// Minus sign (segment G).
    Dash,
    Blank,
}

/// Standard 7-segment digit shapes, indexed by value.
const DIGITS: [Segments; 10] = [
    Segments(0b0011_1111), // 0: A B C D E F
    Segments(0b0000_0110), // 1: B C
    Segments(0b0101_1011), // 2: A B D E G
    Segments(0b0100_1111), // 3: A B C D G
    Segments(0b0110_0110), // 4: B C F G
    Segments(0b0110_1101), // 5: A C D F G
    Segments(0b0111_1101), // 6: A C D E F G
    Segments(0b0000_0111), // 7: A B C
    Segments(0b0111_1111), // 8: A B C D E F G
    Segments(0b0110_1111), // 9: A B C D F G
];

/// Look up the segment pattern for a symbol.
pub fn encode(symbol: Symbol) -> Segments {
    match symbol {
        Symbol::Digit(d) => DIGITS[d.0 as usize],
        Symbol::Dot => Segments::DOT,
        Symbol::Dash => Segments::DASH,
        Symbol::Blank => Segments::BLANK,
    }
}

/// Shorthand for `encode(Symbol::Digit(digit))`.
pub fn digit(digit: Digit) -> Segments {
    encode(Symbol::Digit(digit))
}
