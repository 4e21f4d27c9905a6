//! The boundary between the engine and the GUI toolkit hosting it.
//!
//! The engine never touches a widget type directly. A toolkit adapter
//! implements [`Host`] over its own control handles and the engine reads
//! tree relations and measurements through it, pushing computed pixels back
//! through [`Host::set_property`]. Change notifications flow the other way:
//! the adapter calls the engine's `source_changed` / `control_attached` /
//! `control_removed` when the toolkit reports layout or tree changes.

use std::fmt;
use std::hash::Hash;

use crate::geometry::Size;

/// Toolkit adapter interface.
///
/// `declared_width`/`declared_height` return the explicitly set dimension or
/// NaN when unset; the engine prefers a finite declared value over measured
/// `bounds`, except for the viewport root which is always measured.
pub trait Host {
    /// The toolkit's control handle.
    type Control: Copy + Eq + Hash + fmt::Debug;

    /// Logical parent, if any.
    fn parent(&self, control: Self::Control) -> Option<Self::Control>;

    /// Templated parent, if any.
    fn template_parent(&self, control: Self::Control) -> Option<Self::Control>;

    /// Visual-tree parent, if any.
    fn visual_parent(&self, control: Self::Control) -> Option<Self::Control>;

    /// The viewport (window) this control lives in, if currently in one.
    fn viewport_root(&self, control: Self::Control) -> Option<Self::Control>;

    /// Measured layout bounds.
    fn bounds(&self, control: Self::Control) -> Size;

    /// Explicitly declared width, NaN when unset.
    fn declared_width(&self, control: Self::Control) -> f64;

    /// Explicitly declared height, NaN when unset.
    fn declared_height(&self, control: Self::Control) -> f64;

    /// Current font size in pixels.
    fn font_size(&self, control: Self::Control) -> f64;

    /// Whether the control is mounted in a tree.
    fn is_attached(&self, control: Self::Control) -> bool;

    /// Write a computed value to the control.
    fn set_property(&mut self, control: Self::Control, property: Property, value: PropertyValue);
}

/// The control properties an expression can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Width,
    Height,
    MinWidth,
    MinHeight,
    MaxWidth,
    MaxHeight,
    Margin,
    Padding,
    BorderThickness,
    CornerRadius,
}

impl Property {
    /// The value written when the bound expression is empty or detached.
    pub fn default_value(self) -> PropertyValue {
        match self {
            Property::Width | Property::Height => PropertyValue::Pixels(f64::NAN),
            Property::MinWidth | Property::MinHeight => {
                PropertyValue::Pixels(f64::NEG_INFINITY)
            }
            Property::MaxWidth | Property::MaxHeight => PropertyValue::Pixels(f64::INFINITY),
            Property::Margin
            | Property::Padding
            | Property::BorderThickness
            | Property::CornerRadius => PropertyValue::Quad([0.0; 4]),
        }
    }

    /// Whether the property takes four components rather than one.
    pub fn is_quad(self) -> bool {
        matches!(
            self,
            Property::Margin
                | Property::Padding
                | Property::BorderThickness
                | Property::CornerRadius
        )
    }
}

/// A value pushed through [`Host::set_property`].
///
/// Quad component order follows the property: left, top, right, bottom for
/// the thickness properties; clockwise from top left for corner radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Pixels(f64),
    Quad([f64; 4]),
}

/// A change delivered to observers registered with the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeEvent {
    pub property: Property,
    pub old: PropertyValue,
    pub new: PropertyValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_property() {
        assert!(matches!(
            Property::Width.default_value(),
            PropertyValue::Pixels(v) if v.is_nan()
        ));
        assert_eq!(
            Property::MinHeight.default_value(),
            PropertyValue::Pixels(f64::NEG_INFINITY)
        );
        assert_eq!(
            Property::MaxWidth.default_value(),
            PropertyValue::Pixels(f64::INFINITY)
        );
        assert_eq!(Property::Margin.default_value(), PropertyValue::Quad([0.0; 4]));
        assert_eq!(
            Property::CornerRadius.default_value(),
            PropertyValue::Quad([0.0; 4])
        );
    }

    #[test]
    fn test_quad_split() {
        assert!(Property::Padding.is_quad());
        assert!(Property::BorderThickness.is_quad());
        assert!(!Property::Width.is_quad());
        assert!(!Property::MaxHeight.is_quad());
    }
}
