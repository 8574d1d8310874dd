//! # huesort
//!
//! Parse lists of colors from text, sort them into a perceptually smooth
//! order and write the result as text or as one of two binary palette
//! formats (ASE and CLR).
//!
//! ## Quick Start
//!
//! ```
//! use huesort::parse::read_colors;
//! use huesort::sort::{Direction, SortKind, sort};
//! use huesort::write;
//! use huesort::color::ColorFormat;
//!
//! let input = "#eb3d34 red\n(75, 214, 47) green\n#d46804 orange\n";
//! let colors = read_colors(input.as_bytes()).unwrap();
//! let sorted = sort(&colors, SortKind::Hilbert, Direction::Forward);
//! let output = write::render(&sorted, ColorFormat::Hexcode);
//! assert_eq!(output.lines().count(), 3);
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: an RGB value plus its canonical hexcode, original textual
//!   format and description
//! - **Sorting strategy**: reduces a color to a sort key; the default is a
//!   Hilbert-curve index over the RGB cube
//! - **Writers**: plain text, the chunked ASE swatch format, and the legacy
//!   CLR serialized-object format, both of the latter bit-exact

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ase;
pub mod clr;
pub mod color;
pub mod convert;
pub mod hilbert;
pub mod logging;
pub mod naming;
pub mod parse;
pub mod sort;
pub mod write;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::ase;
    pub use crate::clr;
    pub use crate::color::{Color, ColorFormat, Rgb};
    pub use crate::convert::{Hsl, rgb_to_hsl, rgb_to_hsv};
    pub use crate::hilbert::hilbert_index;
    pub use crate::naming::{ColorNamer, apply_names};
    pub use crate::parse::{ColorParseError, ReadError, parse_line, read_colors};
    pub use crate::sort::{Direction, SortKind, sort};
    pub use crate::write;
}

// Re-export key types at crate root
pub use color::{Color, ColorFormat, Rgb};
pub use hilbert::hilbert_index;
pub use sort::{Direction, SortKind, sort};
