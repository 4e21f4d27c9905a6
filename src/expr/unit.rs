//! Length units: the fixed symbol table and absolute-to-pixel conversion.
//!
//! Units split into two partitions. Absolute units (px, cm, mm, in) convert to
//! pixels with a fixed constant and never need a source. Relative units are a
//! percentage of some measured source quantity (parent size, viewport size,
//! font size, self size) resolved when the expression is bound or evaluated.

use std::fmt;

/// Pixels per inch, the fixed conversion root for all absolute units.
const PIXELS_PER_INCH: f64 = 96.0;

/// A length unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Device-independent pixel (default unit).
    Pixel,
    /// Centimeter, 96/2.54 pixels.
    Centimeter,
    /// Millimeter, 96/2.54/1000 pixels.
    Millimeter,
    /// Inch, 96 pixels.
    Inch,
    /// Percentage of the template parent's width.
    TemplateParentWidth,
    /// Percentage of the template parent's height.
    TemplateParentHeight,
    /// Percentage of the logical parent's width.
    ParentWidth,
    /// Percentage of the logical parent's height.
    ParentHeight,
    /// Percentage of the visual parent's width.
    VisualParentWidth,
    /// Percentage of the visual parent's height.
    VisualParentHeight,
    /// Percentage of the control's own width.
    SelfWidth,
    /// Percentage of the control's own height.
    SelfHeight,
    /// Multiple of the control's font size.
    FontSize,
    /// Percentage of the viewport's width.
    ViewportWidth,
    /// Percentage of the viewport's height.
    ViewportHeight,
    /// Bare percent; carried by [`Scale`](crate::expr::length::Scale), not
    /// resolvable as a length source.
    Percent,
}

/// Errors from unit lookup and conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    #[error("unsupported unit symbol `{0}`")]
    UnsupportedSymbol(String),
    #[error("unit `{0}` is not absolute")]
    NotAbsolute(Unit),
}

impl Unit {
    /// Look up a unit by symbol, case-insensitively.
    ///
    /// The logical-parent units accept both their long and short spellings
    /// (`lpw`/`pw` and `lph`/`ph`).
    pub fn from_symbol(symbol: &str) -> Result<Unit, UnitError> {
        match symbol.to_ascii_lowercase().as_str() {
            "px" => Ok(Unit::Pixel),
            "cm" => Ok(Unit::Centimeter),
            "mm" => Ok(Unit::Millimeter),
            "in" => Ok(Unit::Inch),
            "tpw" => Ok(Unit::TemplateParentWidth),
            "tph" => Ok(Unit::TemplateParentHeight),
            "lpw" | "pw" => Ok(Unit::ParentWidth),
            "lph" | "ph" => Ok(Unit::ParentHeight),
            "vpw" => Ok(Unit::VisualParentWidth),
            "vph" => Ok(Unit::VisualParentHeight),
            "sw" => Ok(Unit::SelfWidth),
            "sh" => Ok(Unit::SelfHeight),
            "em" => Ok(Unit::FontSize),
            "vw" => Ok(Unit::ViewportWidth),
            "vh" => Ok(Unit::ViewportHeight),
            "%" => Ok(Unit::Percent),
            _ => Err(UnitError::UnsupportedSymbol(symbol.to_string())),
        }
    }

    /// The canonical symbol for this unit. The logical-parent units print
    /// their short spellings.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Pixel => "px",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
            Unit::TemplateParentWidth => "tpw",
            Unit::TemplateParentHeight => "tph",
            Unit::ParentWidth => "pw",
            Unit::ParentHeight => "ph",
            Unit::VisualParentWidth => "vpw",
            Unit::VisualParentHeight => "vph",
            Unit::SelfWidth => "sw",
            Unit::SelfHeight => "sh",
            Unit::FontSize => "em",
            Unit::ViewportWidth => "vw",
            Unit::ViewportHeight => "vh",
            Unit::Percent => "%",
        }
    }

    /// Returns `true` if this unit converts to pixels without a source.
    pub fn is_absolute(self) -> bool {
        matches!(
            self,
            Unit::Pixel | Unit::Centimeter | Unit::Millimeter | Unit::Inch
        )
    }

    /// Returns `true` if this unit needs a resolved source quantity.
    pub fn is_relative(self) -> bool {
        !self.is_absolute()
    }

    /// Convert `value` in this unit to pixels. Fails on relative units, which
    /// cannot be converted without a source.
    pub fn absolute_pixels(self, value: f64) -> Result<f64, UnitError> {
        match self {
            Unit::Pixel => Ok(value),
            Unit::Centimeter => Ok(PIXELS_PER_INCH / 2.54 * value),
            Unit::Millimeter => Ok(PIXELS_PER_INCH / 2.54 * value / 1000.0),
            Unit::Inch => Ok(PIXELS_PER_INCH * value),
            _ => Err(UnitError::NotAbsolute(self)),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
