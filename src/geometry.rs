//! Measurement primitives shared by the host boundary and the bound graph.
//!
//! Expression values resolve against pixel measurements reported by the host
//! toolkit; [`Size`] is the width/height pair those measurements travel in.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D measurement in pixels (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` if both dimensions are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

impl Sub for Size {
    type Output = Size;
    #[inline]
    fn sub(self, rhs: Size) -> Size {
        Size {
            width: self.width - rhs.width,
            height: self.height - rhs.height,
        }
    }
}

impl Mul<f64> for Size {
    type Output = Size;
    #[inline]
    fn mul(self, rhs: f64) -> Size {
        Size {
            width: self.width * rhs,
            height: self.height * rhs,
        }
    }
}

impl Div<f64> for Size {
    type Output = Size;
    #[inline]
    fn div(self, rhs: f64) -> Size {
        Size {
            width: self.width / rhs,
            height: self.height / rhs,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_new() {
        let s = Size::new(1440.0, 900.0);
        assert_eq!(s.width, 1440.0);
        assert_eq!(s.height, 900.0);
    }

    #[test]
    fn test_size_zero() {
        assert_eq!(Size::ZERO, Size::new(0.0, 0.0));
    }

    #[test]
    fn test_size_arithmetic() {
        let a = Size::new(100.0, 50.0);
        let b = Size::new(20.0, 30.0);
        assert_eq!(a + b, Size::new(120.0, 80.0));
        assert_eq!(a - b, Size::new(80.0, 20.0));
        assert_eq!(a * 2.0, Size::new(200.0, 100.0));
        assert_eq!(a / 2.0, Size::new(50.0, 25.0));
    }

    #[test]
    fn test_size_is_finite() {
        assert!(Size::new(10.0, 20.0).is_finite());
        assert!(!Size::new(f64::NAN, 20.0).is_finite());
        assert!(!Size::new(10.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_size_display() {
        assert_eq!(Size::new(1440.0, 900.0).to_string(), "1440, 900");
    }
}
