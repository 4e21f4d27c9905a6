//! A width and height pair of length expressions.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use crate::expr::length::Length;
use crate::expr::parser::ParseError;
use crate::expr::splitter;
use crate::expr::thickness::{Thickness, COMPONENT_SEPARATORS};

/// A size whose dimensions are length expressions, e.g. `"50pw, 2em+10px"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelativeSize {
    pub width: Length,
    pub height: Length,
}

impl RelativeSize {
    /// A size of positive infinity on both axes.
    pub const INFINITY: RelativeSize = RelativeSize {
        width: Length::POSITIVE_INFINITY,
        height: Length::POSITIVE_INFINITY,
    };

    /// Create a size from its dimensions.
    pub fn new(width: Length, height: Length) -> Self {
        RelativeSize { width, height }
    }

    /// Parse a size string of exactly two components.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let parts = splitter::split(input, COMPONENT_SEPARATORS)?;
        match parts.as_slice() {
            [width, height] => Ok(RelativeSize::new(
                Length::parse(width)?,
                Length::parse(height)?,
            )),
            _ => Err(ParseError::ValueCount {
                expected: "2",
                found: parts.len(),
            }),
        }
    }

    /// The same height with a new width.
    pub fn with_width(self, width: Length) -> Self {
        RelativeSize {
            width,
            height: self.height,
        }
    }

    /// The same width with a new height.
    pub fn with_height(self, height: Length) -> Self {
        RelativeSize {
            width: self.width,
            height,
        }
    }

    /// Grow the size by a thickness: width gains left and right, height gains
    /// top and bottom.
    pub fn inflate(self, thickness: Thickness) -> Self {
        RelativeSize {
            width: self.width + thickness.left + thickness.right,
            height: self.height + thickness.top + thickness.bottom,
        }
    }

    /// Shrink the size by a thickness, the inverse of [`inflate`].
    ///
    /// [`inflate`]: Self::inflate
    pub fn deflate(self, thickness: Thickness) -> Self {
        RelativeSize {
            width: self.width - thickness.left - thickness.right,
            height: self.height - thickness.top - thickness.bottom,
        }
    }
}

impl FromStr for RelativeSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelativeSize::parse(s)
    }
}

impl fmt::Display for RelativeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.width, self.height)
    }
}

impl Add for RelativeSize {
    type Output = RelativeSize;

    fn add(self, rhs: RelativeSize) -> RelativeSize {
        RelativeSize {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

impl Sub for RelativeSize {
    type Output = RelativeSize;

    fn sub(self, rhs: RelativeSize) -> RelativeSize {
        RelativeSize {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

impl Mul<f64> for RelativeSize {
    type Output = RelativeSize;

    fn mul(self, rhs: f64) -> RelativeSize {
        RelativeSize {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

impl Div<f64> for RelativeSize {
    type Output = RelativeSize;

    fn div(self, rhs: f64) -> RelativeSize {
        RelativeSize {
            width: self.width / rhs,
            height: self.height / rhs,
        }
    }
}
