//! Four-sided [`Thickness`] expressions for margin, padding and borders.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use crate::expr::length::Length;
use crate::expr::parser::ParseError;
use crate::expr::splitter;

/// The separators accepted between the sides of a composite expression.
pub(crate) const COMPONENT_SEPARATORS: &[char] = &[',', ' '];

/// A thickness whose four sides are length expressions.
///
/// Parses from one, two or four components: `"2em"` applies to every side,
/// `"10pw, 5ph"` is horizontal then vertical, and four components are left,
/// top, right, bottom.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Thickness {
    pub left: Length,
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
}

impl Thickness {
    /// The no-value thickness. Every side is [`Length::Empty`].
    pub const EMPTY: Thickness = Thickness {
        left: Length::Empty,
        top: Length::Empty,
        right: Length::Empty,
        bottom: Length::Empty,
    };

    /// One length for all four sides.
    pub fn uniform(length: Length) -> Self {
        Thickness {
            left: length.clone(),
            top: length.clone(),
            right: length.clone(),
            bottom: length,
        }
    }

    /// One length for left and right, another for top and bottom.
    pub fn symmetric(horizontal: Length, vertical: Length) -> Self {
        Thickness {
            left: horizontal.clone(),
            top: vertical.clone(),
            right: horizontal,
            bottom: vertical,
        }
    }

    /// Explicit lengths per side.
    pub fn new(left: Length, top: Length, right: Length, bottom: Length) -> Self {
        Thickness {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns `true` if all four sides are equal.
    pub fn is_uniform(&self) -> bool {
        self.left == self.right && self.top == self.bottom && self.left == self.top
    }

    /// Parse a thickness string of one, two or four components.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let parts = splitter::split(input, COMPONENT_SEPARATORS)?;
        match parts.as_slice() {
            [all] => Ok(Thickness::uniform(Length::parse(all)?)),
            [horizontal, vertical] => Ok(Thickness::symmetric(
                Length::parse(horizontal)?,
                Length::parse(vertical)?,
            )),
            [left, top, right, bottom] => Ok(Thickness::new(
                Length::parse(left)?,
                Length::parse(top)?,
                Length::parse(right)?,
                Length::parse(bottom)?,
            )),
            _ => Err(ParseError::ValueCount {
                expected: "1, 2 or 4",
                found: parts.len(),
            }),
        }
    }
}

impl FromStr for Thickness {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Thickness::parse(s)
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.left, self.top, self.right, self.bottom)
    }
}

impl Add for Thickness {
    type Output = Thickness;

    fn add(self, rhs: Thickness) -> Thickness {
        Thickness {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
        }
    }
}

impl Sub for Thickness {
    type Output = Thickness;

    fn sub(self, rhs: Thickness) -> Thickness {
        Thickness {
            left: self.left - rhs.left,
            top: self.top - rhs.top,
            right: self.right - rhs.right,
            bottom: self.bottom - rhs.bottom,
        }
    }
}

impl Mul<f64> for Thickness {
    type Output = Thickness;

    fn mul(self, rhs: f64) -> Thickness {
        Thickness {
            left: self.left * rhs,
            top: self.top * rhs,
            right: self.right * rhs,
            bottom: self.bottom * rhs,
        }
    }
}

impl Mul<Thickness> for f64 {
    type Output = Thickness;

    fn mul(self, rhs: Thickness) -> Thickness {
        rhs * self
    }
}

impl Div<f64> for Thickness {
    type Output = Thickness;

    fn div(self, rhs: f64) -> Thickness {
        Thickness {
            left: self.left / rhs,
            top: self.top / rhs,
            right: self.right / rhs,
            bottom: self.bottom / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expr::length::LengthUnits;

    // ── Parsing arities ──────────────────────────────────────────────

    #[test]
    fn test_parse_one_value_is_uniform() {
        let t = Thickness::parse("2em").expect("parses");
        assert_eq!(t, Thickness::uniform(2.em()));
        assert!(t.is_uniform());
    }

    #[test]
    fn test_parse_two_values_is_horizontal_vertical() {
        let t = Thickness::parse("10pw, 5ph").expect("parses");
        assert_eq!(t.left, 10.pw());
        assert_eq!(t.right, 10.pw());
        assert_eq!(t.top, 5.ph());
        assert_eq!(t.bottom, 5.ph());
    }

    #[test]
    fn test_parse_four_values_is_left_top_right_bottom() {
        let t = Thickness::parse("1px 2px 3px 4px").expect("parses");
        assert_eq!(
            t,
            Thickness::new(1.px(), 2.px(), 3.px(), 4.px())
        );
    }

    #[test]
    fn test_parse_mixed_separators() {
        let t = Thickness::parse("10pw+5px, 5ph 20pw 2em").expect("parses");
        assert_eq!(t.left, 10.pw() + 5.px());
        assert_eq!(t.top, 5.ph());
        assert_eq!(t.right, 20.pw());
        assert_eq!(t.bottom, 2.em());
    }

    #[test]
    fn test_parse_three_values_is_an_error() {
        assert_eq!(
            Thickness::parse("1px 2px 3px"),
            Err(ParseError::ValueCount {
                expected: "1, 2 or 4",
                found: 3,
            })
        );
    }

    #[test]
    fn test_parse_bad_component_surfaces_inner_error() {
        assert!(Thickness::parse("1px 2qx").is_err());
        assert!(Thickness::parse("1px ,, 2px").is_err());
    }

    // ── Queries ──────────────────────────────────────────────────────

    #[test]
    fn test_is_uniform() {
        assert!(Thickness::uniform(20.pw()).is_uniform());
        assert!(!Thickness::symmetric(20.pw(), 10.ph()).is_uniform());
        assert!(Thickness::EMPTY.is_uniform());
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Thickness::default(), Thickness::EMPTY);
    }

    // ── Operators ────────────────────────────────────────────────────

    #[test]
    fn test_add_componentwise() {
        let a = Thickness::uniform(10.pw());
        let b = Thickness::new(1.px(), 2.px(), 3.px(), 4.px());
        let sum = a + b;
        assert_eq!(sum.left, 10.pw() + 1.px());
        assert_eq!(sum.bottom, 10.pw() + 4.px());
    }

    #[test]
    fn test_sub_componentwise() {
        let a = Thickness::uniform(10.pw());
        let b = Thickness::uniform(4.pw());
        assert_eq!(a - b, Thickness::uniform(6.pw()));
    }

    #[test]
    fn test_scale() {
        let t = Thickness::symmetric(10.pw(), 4.ph());
        assert_eq!(t.clone() * 2.0, Thickness::symmetric(20.pw(), 8.ph()));
        assert_eq!(2.0 * t.clone(), Thickness::symmetric(20.pw(), 8.ph()));
        assert_eq!(t / 2.0, Thickness::symmetric(5.pw(), 2.ph()));
    }

    // ── Display ──────────────────────────────────────────────────────

    #[test]
    fn test_display_round_trip() {
        let t = Thickness::parse("20pw+40ph 30pw 40ph 50ph-10px").expect("parses");
        insta::assert_snapshot!(t.to_string(), @"20pw+40ph 30pw 40ph 50ph-10px");
        assert_eq!(Thickness::parse(&t.to_string()), Ok(t));
    }
}
