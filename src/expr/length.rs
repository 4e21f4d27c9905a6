//! The scalar expression value: [`Length`], its operator algebra, and the
//! percent [`Scale`] factor.
//!
//! A `Length` is an immutable value. Operators never mutate an operand; they
//! fold scalar multipliers into leaf values and sum scales, merge leaves that
//! share a unit, collapse absolute-only additions to plain pixels, and widen
//! everything else into a sum. Binding a `Length` to a live control is the
//! engine's job ([`crate::graph`]); evaluating one once without a binding is
//! [`Length::evaluate`](crate::graph).

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::expr::parser::{self, ParseError};
use crate::expr::unit::Unit;

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

/// A scalar length expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    /// The explicit no-value sentinel. Evaluates to NaN, attaches as the
    /// property default, and is the identity for `+`/`-`.
    Empty,
    /// A single value with its unit. Signs and scalar multipliers fold
    /// directly into `value`.
    Leaf { value: f64, unit: Unit },
    /// An n-ary sum of child expressions times a scale factor.
    Sum { scale: f64, terms: Vec<Length> },
}

impl Length {
    /// Zero pixels.
    pub const ZERO: Length = Length::Leaf {
        value: 0.0,
        unit: Unit::Pixel,
    };

    /// Positive infinity in pixels, the max-bound property default.
    pub const POSITIVE_INFINITY: Length = Length::Leaf {
        value: f64::INFINITY,
        unit: Unit::Pixel,
    };

    /// Negative infinity in pixels, the min-bound property default.
    pub const NEGATIVE_INFINITY: Length = Length::Leaf {
        value: f64::NEG_INFINITY,
        unit: Unit::Pixel,
    };

    /// Create a leaf length.
    pub fn new(value: f64, unit: Unit) -> Self {
        Length::Leaf { value, unit }
    }

    /// Create a sum over `terms` with scale 1.
    pub fn sum(terms: Vec<Length>) -> Self {
        Length::Sum { scale: 1.0, terms }
    }

    /// Parse an expression string. See [`crate::expr::parser::parse`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parser::parse(input)
    }

    /// Returns `true` for the no-value sentinel.
    pub fn is_empty(&self) -> bool {
        matches!(self, Length::Empty)
    }

    /// Returns `true` if every leaf under this expression is absolute, i.e.
    /// the expression converts to pixels without any source.
    pub fn is_absolute(&self) -> bool {
        match self {
            Length::Empty => false,
            Length::Leaf { unit, .. } => unit.is_absolute(),
            Length::Sum { terms, .. } => terms.iter().all(Length::is_absolute),
        }
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Empty
    }
}

impl FromStr for Length {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Length::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        match (self, rhs) {
            (Length::Empty, rhs) => rhs,
            (lhs, Length::Empty) => lhs,
            (Length::Leaf { value: a, unit: ua }, Length::Leaf { value: b, unit: ub }) => {
                if ua == ub {
                    return Length::Leaf {
                        value: a + b,
                        unit: ua,
                    };
                }
                if let (Ok(pa), Ok(pb)) = (ua.absolute_pixels(a), ub.absolute_pixels(b)) {
                    return Length::Leaf {
                        value: pa + pb,
                        unit: Unit::Pixel,
                    };
                }
                Length::sum(vec![Length::new(a, ua), Length::new(b, ub)])
            }
            // An unscaled sum absorbs the new term; a scaled one must nest,
            // appending under its scale would rescale the term.
            (Length::Sum { scale, mut terms }, rhs) if scale == 1.0 => {
                terms.push(rhs);
                Length::Sum { scale, terms }
            }
            (lhs, rhs) => Length::sum(vec![lhs, rhs]),
        }
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        self + -rhs
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        self * -1.0
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        match self {
            Length::Empty => Length::Empty,
            Length::Leaf { value, unit } => Length::Leaf {
                value: value * rhs,
                unit,
            },
            Length::Sum { scale, terms } => Length::Sum {
                scale: scale * rhs,
                terms,
            },
        }
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        match self {
            Length::Empty => Length::Empty,
            Length::Leaf { value, unit } => Length::Leaf {
                value: value / rhs,
                unit,
            },
            Length::Sum { scale, terms } => Length::Sum {
                scale: scale / rhs,
                terms,
            },
        }
    }
}

impl Mul<Scale> for Length {
    type Output = Length;

    fn mul(self, rhs: Scale) -> Length {
        self * rhs.factor()
    }
}

impl Mul<Length> for Scale {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self.factor()
    }
}

impl Div<Scale> for Length {
    type Output = Length;

    fn div(self, rhs: Scale) -> Length {
        self / rhs.factor()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Empty => Ok(()),
            Length::Leaf { value, unit } => write!(f, "{}{}", value, unit.symbol()),
            Length::Sum { terms, .. } => {
                for (i, term) in terms.iter().enumerate() {
                    match term {
                        Length::Leaf { value, .. } => {
                            if i > 0 && *value >= 0.0 {
                                f.write_str("+")?;
                            }
                            write!(f, "{term}")?;
                        }
                        _ => {
                            if i > 0 {
                                f.write_str("+")?;
                            }
                            write!(f, "({term})")?;
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Scale
// ---------------------------------------------------------------------------

/// A unitless multiplier with percent notation: `Scale::new(1.5)` is `150%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    /// Create a scale from its raw factor (1.0 = 100%).
    pub const fn new(factor: f64) -> Self {
        Scale(factor)
    }

    /// Create a scale from a percentage (150.0 = factor 1.5).
    pub fn from_percent(percent: f64) -> Self {
        Scale(percent / 100.0)
    }

    /// The raw multiplication factor.
    pub fn factor(self) -> f64 {
        self.0
    }

    /// The factor as a percentage.
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }

    /// Parse a percent string such as `"150%"`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let input = input.trim();
        let Some(literal) = input.strip_suffix('%') else {
            return Err(ParseError::UnexpectedEof(
                "relative scale must end with `%`".into(),
            ));
        };
        let percent: f64 = literal.trim().parse().map_err(|_| ParseError::UnexpectedToken {
            position: 0,
            message: format!("invalid numeric literal `{literal}`"),
        })?;
        Ok(Scale::from_percent(percent))
    }
}

impl From<f64> for Scale {
    fn from(factor: f64) -> Self {
        Scale(factor)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl Mul for Scale {
    type Output = Scale;

    fn mul(self, rhs: Scale) -> Scale {
        Scale(self.0 * rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Numeric constructor sugar
// ---------------------------------------------------------------------------

/// Constructor methods on numbers for building lengths inline: `20.pw()`,
/// `2.5.em()`, `12.px()`, `150.percent()`.
pub trait LengthUnits: Into<f64> + Copy {
    /// A leaf in the given unit.
    fn length(self, unit: Unit) -> Length {
        Length::new(self.into(), unit)
    }

    /// Pixels.
    fn px(self) -> Length {
        self.length(Unit::Pixel)
    }

    /// Centimeters.
    fn cm(self) -> Length {
        self.length(Unit::Centimeter)
    }

    /// Millimeters.
    fn mm(self) -> Length {
        self.length(Unit::Millimeter)
    }

    /// Inches.
    fn inches(self) -> Length {
        self.length(Unit::Inch)
    }

    /// Percent of the template parent's width.
    fn tpw(self) -> Length {
        self.length(Unit::TemplateParentWidth)
    }

    /// Percent of the template parent's height.
    fn tph(self) -> Length {
        self.length(Unit::TemplateParentHeight)
    }

    /// Percent of the parent's width.
    fn pw(self) -> Length {
        self.length(Unit::ParentWidth)
    }

    /// Percent of the parent's height.
    fn ph(self) -> Length {
        self.length(Unit::ParentHeight)
    }

    /// Percent of the visual parent's width.
    fn vpw(self) -> Length {
        self.length(Unit::VisualParentWidth)
    }

    /// Percent of the visual parent's height.
    fn vph(self) -> Length {
        self.length(Unit::VisualParentHeight)
    }

    /// Percent of the control's own width.
    fn sw(self) -> Length {
        self.length(Unit::SelfWidth)
    }

    /// Percent of the control's own height.
    fn sh(self) -> Length {
        self.length(Unit::SelfHeight)
    }

    /// Multiple of the control's font size.
    fn em(self) -> Length {
        self.length(Unit::FontSize)
    }

    /// Percent of the viewport's width.
    fn vw(self) -> Length {
        self.length(Unit::ViewportWidth)
    }

    /// Percent of the viewport's height.
    fn vh(self) -> Length {
        self.length(Unit::ViewportHeight)
    }

    /// A percent [`Scale`] factor.
    fn percent(self) -> Scale {
        Scale::from_percent(self.into())
    }
}

impl LengthUnits for f64 {}
impl LengthUnits for i32 {}
