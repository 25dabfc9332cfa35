//! Driver library for multiplexed 9-grid, 7-segment vacuum fluorescent tubes (IV-18 and
//! similar) driven through a Maxim MAX6921 20-output serial-to-parallel VFD driver.
//!
//! The MAX6921 has no frame memory: it only holds whichever grid and segment lines were latched
//! last. [`Display`] keeps one segment pattern per grid and [`Display::refresh`] strikes each
//! grid in turn, so the caller is expected to call it in a loop.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate embedded_hal as hal;

#[macro_use]
mod log;

pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod grid;
pub mod interface;
pub mod segment;

// Re-exports for primary API.
pub use command::{CommandCode, ControlWord, Frame};
pub use config::Config;
pub use display::{Display, DisplayBuffer};
pub use error::{describe, Error};
pub use grid::Grid;
pub use interface::spi::SpiInterface;
pub use interface::DisplayInterface;
pub use segment::{Digit, Segments, Symbol};
