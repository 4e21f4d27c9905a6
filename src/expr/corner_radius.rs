//! [`CornerRadius`] expressions, one length per corner in clockwise order.

use std::fmt;
use std::ops::{Div, Mul};
use std::str::FromStr;

use crate::expr::length::Length;
use crate::expr::parser::ParseError;
use crate::expr::splitter;
use crate::expr::thickness::COMPONENT_SEPARATORS;

/// The radii of a rectangle's corners as length expressions.
///
/// Parses from one, two or four components: one applies everywhere, two are
/// top then bottom, four run clockwise from the top left.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CornerRadius {
    pub top_left: Length,
    pub top_right: Length,
    pub bottom_right: Length,
    pub bottom_left: Length,
}

impl CornerRadius {
    /// The no-value corner radius. Every corner is [`Length::Empty`].
    pub const EMPTY: CornerRadius = CornerRadius {
        top_left: Length::Empty,
        top_right: Length::Empty,
        bottom_right: Length::Empty,
        bottom_left: Length::Empty,
    };

    /// One radius for all four corners.
    pub fn uniform(radius: Length) -> Self {
        CornerRadius {
            top_left: radius.clone(),
            top_right: radius.clone(),
            bottom_right: radius.clone(),
            bottom_left: radius,
        }
    }

    /// One radius for the two top corners, another for the two bottom ones.
    pub fn symmetric(top: Length, bottom: Length) -> Self {
        CornerRadius {
            top_left: top.clone(),
            top_right: top,
            bottom_right: bottom.clone(),
            bottom_left: bottom,
        }
    }

    /// Explicit radii per corner, clockwise from the top left.
    pub fn new(
        top_left: Length,
        top_right: Length,
        bottom_right: Length,
        bottom_left: Length,
    ) -> Self {
        CornerRadius {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// Returns `true` if all four corners are equal.
    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.bottom_left == self.bottom_right
            && self.top_right == self.bottom_right
    }

    /// Parse a corner radius string of one, two or four components.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let parts = splitter::split(input, COMPONENT_SEPARATORS)?;
        match parts.as_slice() {
            [all] => Ok(CornerRadius::uniform(Length::parse(all)?)),
            [top, bottom] => Ok(CornerRadius::symmetric(
                Length::parse(top)?,
                Length::parse(bottom)?,
            )),
            [tl, tr, br, bl] => Ok(CornerRadius::new(
                Length::parse(tl)?,
                Length::parse(tr)?,
                Length::parse(br)?,
                Length::parse(bl)?,
            )),
            _ => Err(ParseError::ValueCount {
                expected: "1, 2 or 4",
                found: parts.len(),
            }),
        }
    }
}

impl FromStr for CornerRadius {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CornerRadius::parse(s)
    }
}

impl fmt::Display for CornerRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.top_left, self.top_right, self.bottom_right, self.bottom_left
        )
    }
}

impl Mul<f64> for CornerRadius {
    type Output = CornerRadius;

    fn mul(self, rhs: f64) -> CornerRadius {
        CornerRadius {
            top_left: self.top_left * rhs,
            top_right: self.top_right * rhs,
            bottom_right: self.bottom_right * rhs,
            bottom_left: self.bottom_left * rhs,
        }
    }
}

impl Div<f64> for CornerRadius {
    type Output = CornerRadius;

    fn div(self, rhs: f64) -> CornerRadius {
        CornerRadius {
            top_left: self.top_left / rhs,
            top_right: self.top_right / rhs,
            bottom_right: self.bottom_right / rhs,
            bottom_left: self.bottom_left / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expr::length::LengthUnits;

    #[test]
    fn test_parse_one_value_is_uniform() {
        let r = CornerRadius::parse("4px").expect("parses");
        assert_eq!(r, CornerRadius::uniform(4.px()));
        assert!(r.is_uniform());
    }

    #[test]
    fn test_parse_two_values_is_top_bottom() {
        let r = CornerRadius::parse("10pw 5ph").expect("parses");
        assert_eq!(r.top_left, 10.pw());
        assert_eq!(r.top_right, 10.pw());
        assert_eq!(r.bottom_right, 5.ph());
        assert_eq!(r.bottom_left, 5.ph());
    }

    #[test]
    fn test_parse_four_values_runs_clockwise() {
        let r = CornerRadius::parse("1px 2px 3px 4px").expect("parses");
        assert_eq!(r.top_left, 1.px());
        assert_eq!(r.top_right, 2.px());
        assert_eq!(r.bottom_right, 3.px());
        assert_eq!(r.bottom_left, 4.px());
    }

    #[test]
    fn test_parse_compound_corners() {
        let r = CornerRadius::parse("20pw+40ph 30pw+30ph 40ph+20pw 50ph+10pw").expect("parses");
        assert_eq!(r.top_left, 20.pw() + 40.ph());
        assert_eq!(r.bottom_left, 50.ph() + 10.pw());
    }

    #[test]
    fn test_parse_three_values_is_an_error() {
        assert_eq!(
            CornerRadius::parse("1px 2px 3px"),
            Err(ParseError::ValueCount {
                expected: "1, 2 or 4",
                found: 3,
            })
        );
    }

    #[test]
    fn test_is_uniform() {
        assert!(CornerRadius::uniform(2.em()).is_uniform());
        assert!(!CornerRadius::symmetric(2.em(), 4.px()).is_uniform());
    }

    #[test]
    fn test_scale() {
        let r = CornerRadius::symmetric(10.pw(), 4.ph());
        assert_eq!(r.clone() * 2.0, CornerRadius::symmetric(20.pw(), 8.ph()));
        assert_eq!(r / 2.0, CornerRadius::symmetric(5.pw(), 2.ph()));
    }

    #[test]
    fn test_display_round_trip() {
        let r = CornerRadius::parse("1px 2em 3pw 4vh").expect("parses");
        insta::assert_snapshot!(r.to_string(), @"1px 2em 3pw 4vh");
        assert_eq!(CornerRadius::parse(&r.to_string()), Ok(r));
    }
}
