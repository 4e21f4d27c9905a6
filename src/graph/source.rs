//! Source resolution: mapping a relative unit to the control and quantity it
//! measures.

use crate::expr::unit::Unit;
use crate::host::Host;

/// The tree relation a relative unit follows from its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRelation {
    TemplateParent,
    Parent,
    VisualParent,
    SelfControl,
    Viewport,
}

impl SourceRelation {
    /// Whether a finite declared dimension wins over measured bounds.
    /// The viewport is always measured.
    pub(crate) fn prefers_declared(self) -> bool {
        !matches!(self, SourceRelation::Viewport)
    }
}

impl std::fmt::Display for SourceRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SourceRelation::TemplateParent => "template parent",
            SourceRelation::Parent => "parent",
            SourceRelation::VisualParent => "visual parent",
            SourceRelation::SelfControl => "control itself",
            SourceRelation::Viewport => "viewport",
        })
    }
}

/// The measured quantity of a source control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Width,
    Height,
    FontSize,
}

/// Errors from resolving a relative unit against a live control tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The unit carries no source relation. `%` always lands here; it parses
    /// but cannot be bound.
    #[error("`{0}` has no source relation to resolve")]
    NoRelation(Unit),
    /// The relation exists but the control tree has no such control.
    #[error("cannot resolve `{unit}`: the control has no {relation}")]
    Unresolved { unit: Unit, relation: SourceRelation },
}

/// The relation and aspect a relative unit measures.
pub(crate) fn unit_source(unit: Unit) -> Result<(SourceRelation, Aspect), SourceError> {
    match unit {
        Unit::TemplateParentWidth => Ok((SourceRelation::TemplateParent, Aspect::Width)),
        Unit::TemplateParentHeight => Ok((SourceRelation::TemplateParent, Aspect::Height)),
        Unit::ParentWidth => Ok((SourceRelation::Parent, Aspect::Width)),
        Unit::ParentHeight => Ok((SourceRelation::Parent, Aspect::Height)),
        Unit::VisualParentWidth => Ok((SourceRelation::VisualParent, Aspect::Width)),
        Unit::VisualParentHeight => Ok((SourceRelation::VisualParent, Aspect::Height)),
        Unit::SelfWidth => Ok((SourceRelation::SelfControl, Aspect::Width)),
        Unit::SelfHeight => Ok((SourceRelation::SelfControl, Aspect::Height)),
        Unit::FontSize => Ok((SourceRelation::SelfControl, Aspect::FontSize)),
        Unit::ViewportWidth => Ok((SourceRelation::Viewport, Aspect::Width)),
        Unit::ViewportHeight => Ok((SourceRelation::Viewport, Aspect::Height)),
        _ => Err(SourceError::NoRelation(unit)),
    }
}

/// Follow `relation` from `target`. `SelfControl` always resolves.
pub(crate) fn resolve<H: Host>(
    host: &H,
    target: H::Control,
    relation: SourceRelation,
) -> Option<H::Control> {
    match relation {
        SourceRelation::TemplateParent => host.template_parent(target),
        SourceRelation::Parent => host.parent(target),
        SourceRelation::VisualParent => host.visual_parent(target),
        SourceRelation::SelfControl => Some(target),
        SourceRelation::Viewport => host.viewport_root(target),
    }
}

/// Measure one aspect of a source control.
pub(crate) fn measure<H: Host>(
    host: &H,
    source: H::Control,
    aspect: Aspect,
    relation: SourceRelation,
) -> f64 {
    match aspect {
        Aspect::Width => {
            if relation.prefers_declared() {
                let declared = host.declared_width(source);
                if declared.is_finite() {
                    return declared;
                }
            }
            host.bounds(source).width
        }
        Aspect::Height => {
            if relation.prefers_declared() {
                let declared = host.declared_height(source);
                if declared.is_finite() {
                    return declared;
                }
            }
            host.bounds(source).height
        }
        Aspect::FontSize => host.font_size(source),
    }
}

/// Pixel contribution of a relative leaf given its source measurement.
/// Every relative unit is a percentage of its measurement except `em`,
/// which is a straight multiple of the font size.
pub(crate) fn leaf_pixels(unit: Unit, value: f64, measurement: f64) -> f64 {
    match unit {
        Unit::FontSize => value * measurement,
        _ => value / 100.0 * measurement,
    }
}
