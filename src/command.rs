//! The MAX6921 control word and its serial framing.
//!
//! The chip is a 20-bit shift register feeding 20 high-voltage outputs. This driver assigns the
//! outputs as follows, most significant first:
//!
//! ```txt
//!  19    17 16          8 7        0
//! +--------+-------------+----------+
//! |  CMD   |  GRID 0..8  | SEGMENTS |
//! +--------+-------------+----------+
//! ```
//!
//! `CMD` drives three spare outputs which the application may wire to anything it likes; the
//! driver never interprets them. SPI moves whole bytes, so each word goes out as a 3 byte frame
//! whose first 4 bits are zero padding. Those 4 bits are shifted out the far end of the register
//! by the 20 bits that follow, leaving exactly the control word latched.

use crate::error::Error;
use crate::grid::{Grid, GRID_FIELD_MASK};
use crate::interface::{self, DisplayInterface};
use crate::segment::Segments;

/// Number of significant bits in a control word.
pub const WORD_BITS: u32 = 20;
/// Number of zero bits sent ahead of the control word.
pub const PAD_BITS: u32 = 24 - WORD_BITS;
/// Bytes per transmission.
pub const FRAME_LEN: usize = 3;

pub const COMMAND_MAX: u8 = 7;

const COMMAND_SHIFT: u32 = 17;
const GRID_SHIFT: u32 = 8;
const WORD_MASK: u32 = (1 << WORD_BITS) - 1;

/// One transmission on the wire, most significant byte first.
pub type Frame = [u8; FRAME_LEN];

/// An application-defined 3-bit code carried in the top of every control word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandCode(u8);

impl CommandCode {
    /// The code sent with ordinary display data.
    pub const NONE: CommandCode = CommandCode(0);

    /// Validate a command code, 0 through 7.
    pub fn new(code: u8) -> Result<CommandCode, Error> {
        match code {
            0..=COMMAND_MAX => Ok(CommandCode(code)),
            _ => Err(Error::InvalidParam),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

/// A 20-bit control word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlWord(u32);

impl ControlWord {
    /// Compose a control word from its three fields. `grid_mask` must fit in 9 bits; it is
    /// normally a single grid's mask, or zero for a command-only word.
    pub fn new(command: CommandCode, grid_mask: u16, segments: Segments) -> Self {
        debug_assert!(grid_mask & !GRID_FIELD_MASK == 0, "grid mask wider than 9 bits");
        ControlWord(
            (command.0 as u32) << COMMAND_SHIFT
                | ((grid_mask & GRID_FIELD_MASK) as u32) << GRID_SHIFT
                | segments.0 as u32,
        )
    }

    /// Word that lights `segments` on `grid` and carries no command.
    pub fn display(grid: Grid, segments: Segments) -> Self {
        Self::new(CommandCode::NONE, grid.mask(), segments)
    }

    /// Word that carries only a command, with every grid and segment output off.
    pub fn command(command: CommandCode) -> Self {
        Self::new(command, 0, Segments::BLANK)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn command_code(self) -> CommandCode {
        CommandCode((self.0 >> COMMAND_SHIFT) as u8 & COMMAND_MAX)
    }

    pub fn grid_mask(self) -> u16 {
        (self.0 >> GRID_SHIFT) as u16 & GRID_FIELD_MASK
    }

    pub fn segments(self) -> Segments {
        Segments(self.0 as u8)
    }

    /// Frame this word for transmission, padding first.
    pub fn to_frame(self) -> Frame {
        let padded = self.0 & WORD_MASK;
        [(padded >> 16) as u8, (padded >> 8) as u8, padded as u8]
    }

    /// Recover the control word a frame will leave latched in the chip. The padding bits are
    /// discarded, as the chip does.
    pub fn from_frame(frame: &Frame) -> Self {
        let raw = (frame[0] as u32) << 16 | (frame[1] as u32) << 8 | frame[2] as u32;
        ControlWord(raw & WORD_MASK)
    }

    /// Transmit this word to the chip and latch it onto the outputs.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), ()>
    where
        DI: DisplayInterface,
    {
        interface::transmit(iface, &self.to_frame())
    }
}

/// Pack the three fields straight into a frame.
pub fn pack(command: CommandCode, grid_mask: u16, segments: Segments) -> Frame {
    ControlWord::new(command, grid_mask, segments).to_frame()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{select, NUM_GRIDS};
    use crate::interface::test_spy::{Sent, TestSpyInterface};
    use proptest::prelude::*;

    fn cmd(code: u8) -> CommandCode {
        CommandCode::new(code).unwrap()
    }

    #[test]
    fn display_frame_layout() {
        // Grid 0, digit zero.
        assert_eq!(
            pack(CommandCode::NONE, select(0).unwrap(), Segments(0x3F)),
            [0x01, 0x00, 0x3F]
        );
        // Grid 8, all segments.
        assert_eq!(
            pack(CommandCode::NONE, select(8).unwrap(), Segments::ALL),
            [0x00, 0x01, 0xFF]
        );
        // Grid 1, dash.
        assert_eq!(
            pack(CommandCode::NONE, select(1).unwrap(), Segments::DASH),
            [0x00, 0x80, 0x40]
        );
    }

    #[test]
    fn command_only_frame() {
        let frame = pack(cmd(5), 0, Segments::BLANK);
        assert_eq!(frame, [0x0A, 0x00, 0x00]);
        let raw = (frame[0] as u32) << 16 | (frame[1] as u32) << 8 | frame[2] as u32;
        assert_eq!(raw >> WORD_BITS, 0, "padding must be zero");
        assert_eq!((raw >> 17) & 0b111, 5);
        assert_eq!(raw & 0x1_FFFF, 0);
        assert_eq!(ControlWord::command(cmd(5)).to_frame(), frame);
    }

    #[test]
    fn command_and_display_share_a_word() {
        let word = ControlWord::new(cmd(7), select(3).unwrap(), Segments(0x6D));
        assert_eq!(word.bits(), 0b111_000100000_01101101);
        assert_eq!(word.to_frame(), [0x0E, 0x20, 0x6D]);
        assert_eq!(word.command_code(), cmd(7));
        assert_eq!(word.grid_mask(), 0b000100000);
        assert_eq!(word.segments(), Segments(0x6D));
    }

    #[test]
    fn command_code_range() {
        assert_eq!(CommandCode::new(0), Ok(CommandCode::NONE));
        assert_eq!(CommandCode::new(7).map(CommandCode::value), Ok(7));
        assert_eq!(CommandCode::new(8), Err(Error::InvalidParam));
    }

    #[test]
    fn from_frame_drops_padding() {
        let word = ControlWord::from_frame(&[0xF1, 0x00, 0x3F]);
        assert_eq!(word, ControlWord::display(Grid::new(0).unwrap(), Segments(0x3F)));
    }

    #[test]
    fn send_writes_then_latches() {
        let mut di = TestSpyInterface::new();
        ControlWord::display(Grid::new(2).unwrap(), Segments(0x06))
            .send(&mut di)
            .unwrap();
        di.check_multi(&[
            Sent::Bytes(vec![0x00, 0x40, 0x06]),
            Sent::Latch(true),
            Sent::Delay(1),
            Sent::Latch(false),
        ]);
    }

    proptest! {
        #[test]
        fn display_word_round_trip(grid in 0u8..NUM_GRIDS as u8, bits in any::<u8>()) {
            let frame = pack(CommandCode::NONE, select(grid).unwrap(), Segments(bits));
            let word = ControlWord::from_frame(&frame);
            prop_assert_eq!(frame[0] & 0xF0, 0);
            prop_assert_eq!(word.command_code(), CommandCode::NONE);
            prop_assert_eq!(word.grid_mask(), select(grid).unwrap());
            prop_assert_eq!(word.grid_mask().count_ones(), 1);
            prop_assert_eq!(word.segments(), Segments(bits));
        }

        #[test]
        fn fields_are_independent(code in 0u8..=COMMAND_MAX, mask in 0u16..=GRID_FIELD_MASK, bits in any::<u8>()) {
            let word = ControlWord::from_frame(&pack(cmd(code), mask, Segments(bits)));
            prop_assert_eq!(word.command_code().value(), code);
            prop_assert_eq!(word.grid_mask(), mask);
            prop_assert_eq!(word.segments().bits(), bits);
        }
    }
}
