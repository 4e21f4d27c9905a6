//! One-shot evaluation: compute an expression's current pixel value against
//! a host without creating any binding.
//!
//! This is the calculate-once path. It resolves and measures sources at call
//! time, uses them, and forgets them; nothing is subscribed and later source
//! changes go unnoticed. For live values, bind through
//! [`Engine`](crate::graph::engine::Engine) instead.

use crate::expr::corner_radius::CornerRadius;
use crate::expr::length::Length;
use crate::expr::size::RelativeSize;
use crate::expr::thickness::Thickness;
use crate::geometry::Size;
use crate::graph::source::{self, SourceError};
use crate::host::Host;

impl Length {
    /// Evaluate to pixels right now. [`Length::Empty`] evaluates to NaN.
    ///
    /// Fails when a relative leaf's source cannot be resolved from `target`,
    /// including every `%` leaf.
    pub fn evaluate<H: Host>(&self, host: &H, target: H::Control) -> Result<f64, SourceError> {
        match self {
            Length::Empty => Ok(f64::NAN),
            Length::Leaf { value, unit } => {
                if let Ok(pixels) = unit.absolute_pixels(*value) {
                    return Ok(pixels);
                }
                let (relation, aspect) = source::unit_source(*unit)?;
                let resolved = source::resolve(host, target, relation).ok_or(
                    SourceError::Unresolved {
                        unit: *unit,
                        relation,
                    },
                )?;
                let measurement = source::measure(host, resolved, aspect, relation);
                Ok(source::leaf_pixels(*unit, *value, measurement))
            }
            Length::Sum { scale, terms } => {
                let mut total = 0.0;
                for term in terms {
                    total += term.evaluate(host, target)?;
                }
                Ok(total * scale)
            }
        }
    }

    /// The operand whose evaluated pixels are smaller. NaN loses; an exact
    /// tie keeps `other`.
    pub fn min<H: Host>(
        self,
        other: Length,
        host: &H,
        target: H::Control,
    ) -> Result<Length, SourceError> {
        let a = self.evaluate(host, target)?;
        let b = other.evaluate(host, target)?;
        if a.is_nan() {
            return Ok(other);
        }
        if b.is_nan() || a < b {
            return Ok(self);
        }
        Ok(other)
    }

    /// The operand whose evaluated pixels are larger. NaN loses; an exact
    /// tie keeps `other`.
    pub fn max<H: Host>(
        self,
        other: Length,
        host: &H,
        target: H::Control,
    ) -> Result<Length, SourceError> {
        let a = self.evaluate(host, target)?;
        let b = other.evaluate(host, target)?;
        if a.is_nan() {
            return Ok(other);
        }
        if b.is_nan() || a > b {
            return Ok(self);
        }
        Ok(other)
    }
}

impl Thickness {
    /// Evaluate all four sides to pixels as `[left, top, right, bottom]`.
    pub fn evaluate<H: Host>(
        &self,
        host: &H,
        target: H::Control,
    ) -> Result<[f64; 4], SourceError> {
        Ok([
            self.left.evaluate(host, target)?,
            self.top.evaluate(host, target)?,
            self.right.evaluate(host, target)?,
            self.bottom.evaluate(host, target)?,
        ])
    }
}

impl CornerRadius {
    /// Evaluate all four corners to pixels, clockwise from the top left.
    pub fn evaluate<H: Host>(
        &self,
        host: &H,
        target: H::Control,
    ) -> Result<[f64; 4], SourceError> {
        Ok([
            self.top_left.evaluate(host, target)?,
            self.top_right.evaluate(host, target)?,
            self.bottom_right.evaluate(host, target)?,
            self.bottom_left.evaluate(host, target)?,
        ])
    }
}

impl RelativeSize {
    /// Evaluate both dimensions to a pixel [`Size`].
    pub fn evaluate<H: Host>(&self, host: &H, target: H::Control) -> Result<Size, SourceError> {
        Ok(Size::new(
            self.width.evaluate(host, target)?,
            self.height.evaluate(host, target)?,
        ))
    }

    /// Constrain each dimension to `constraint`, picking per axis by
    /// evaluated pixels with NaN losing.
    pub fn constrain<H: Host>(
        self,
        constraint: RelativeSize,
        host: &H,
        target: H::Control,
    ) -> Result<RelativeSize, SourceError> {
        Ok(RelativeSize {
            width: self.width.min(constraint.width, host, target)?,
            height: self.height.min(constraint.height, host, target)?,
        })
    }
}
