//! Grid addressing. The tube has nine grids, numbered 0 (leftmost, the one carrying the
//! indicator dot on an IV-18) through 8.

use crate::error::Error;

pub const NUM_GRIDS: usize = 9;
pub const GRID_MAX: u8 = NUM_GRIDS as u8 - 1;

/// Mask covering every grid line in the control word's grid field.
pub const GRID_FIELD_MASK: u16 = 0x1FF;

/// A validated grid index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grid(u8);

impl Grid {
    /// Validate a grid index. Indices past the last grid are an error, never wrapped.
    pub fn new(index: u8) -> Result<Grid, Error> {
        match index {
            0..=GRID_MAX => Ok(Grid(index)),
            _ => Err(Error::InvalidGrid),
        }
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// The one-hot grid select mask for this grid. Grid 0 drives the most significant line of
    /// the 9-bit field, grid 8 the least.
    pub fn mask(self) -> u16 {
        1 << (GRID_MAX - self.0)
    }

    /// All grids in scan order.
    pub fn all() -> impl Iterator<Item = Grid> {
        (0..=GRID_MAX).map(Grid)
    }
}

/// Map a raw grid index to its one-hot select mask.
pub fn select(index: u8) -> Result<u16, Error> {
    Grid::new(index).map(Grid::mask)
}
