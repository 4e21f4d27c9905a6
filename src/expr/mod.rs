//! Expression values: units, parsing, and the length algebra.
//!
//! Everything in this module is a plain value with no attachment to any
//! control tree. Parsing a string yields a [`Length`] (or a composite of
//! them); operators combine values without mutating their operands. Wiring
//! an expression to live controls happens in [`crate::graph`].
//!
//! - [`Length::parse`] — `"50pw+20px"` to a value.
//! - [`Thickness::parse`], [`CornerRadius::parse`], [`RelativeSize::parse`]
//!   — composite forms of one, two or four components.
//! - [`LengthUnits`] — numeric sugar, `20.pw() + 2.em()`.

pub mod corner_radius;
pub mod length;
pub mod lexer;
pub mod parser;
pub mod size;
pub mod splitter;
pub mod thickness;
pub mod unit;

pub use corner_radius::CornerRadius;
pub use length::{Length, LengthUnits, Scale};
pub use parser::ParseError;
pub use size::RelativeSize;
pub use splitter::SplitError;
pub use thickness::Thickness;
pub use unit::{Unit, UnitError};
