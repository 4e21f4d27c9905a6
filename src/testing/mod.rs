//! Headless testing host.
//!
//! [`TestHost`] is a minimal in-memory [`Host`](crate::host::Host): a
//! slotmap of controls with parent links, bounds and declared sizes, which
//! records every [`set_property`](crate::host::Host::set_property) push so
//! tests can assert on exactly what the engine wrote and when.

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Size;
use crate::host::{Host, Property, PropertyValue};

new_key_type! {
    /// Handle to a control in a [`TestHost`].
    pub struct ControlId;
}

#[derive(Debug, Clone)]
struct ControlData {
    parent: Option<ControlId>,
    template_parent: Option<ControlId>,
    visual_parent: Option<ControlId>,
    bounds: Size,
    declared_width: f64,
    declared_height: f64,
    font_size: f64,
    attached: bool,
}

impl ControlData {
    fn new(width: f64, height: f64) -> Self {
        ControlData {
            parent: None,
            template_parent: None,
            visual_parent: None,
            bounds: Size::new(width, height),
            declared_width: f64::NAN,
            declared_height: f64::NAN,
            font_size: 12.0,
            attached: false,
        }
    }
}

/// An in-memory control tree that records property pushes.
///
/// Controls default to no declared size (NaN) and a 12px font. The visual
/// parent falls back to the logical parent unless set explicitly, and the
/// viewport root of an attached control is the top of its parent chain.
#[derive(Default)]
pub struct TestHost {
    controls: SlotMap<ControlId, ControlData>,
    pushes: Vec<(ControlId, Property, PropertyValue)>,
}

impl TestHost {
    /// Create an empty host.
    pub fn new() -> Self {
        TestHost {
            controls: SlotMap::with_key(),
            pushes: Vec::new(),
        }
    }

    // ── Tree construction ────────────────────────────────────────────

    /// Insert an attached control with no parent. Its own bounds serve as
    /// the viewport for everything mounted under it.
    pub fn insert_root(&mut self, width: f64, height: f64) -> ControlId {
        let mut data = ControlData::new(width, height);
        data.attached = true;
        self.controls.insert(data)
    }

    /// Insert an attached control under `parent`.
    pub fn insert_child(&mut self, parent: ControlId, width: f64, height: f64) -> ControlId {
        debug_assert!(self.controls.contains_key(parent), "stale parent handle");
        let mut data = ControlData::new(width, height);
        data.parent = Some(parent);
        data.attached = true;
        self.controls.insert(data)
    }

    /// Insert a control that is not in any tree yet.
    pub fn insert_detached(&mut self, width: f64, height: f64) -> ControlId {
        self.controls.insert(ControlData::new(width, height))
    }

    /// Mount a detached control under `parent`, marking it attached.
    pub fn mount(&mut self, control: ControlId, parent: ControlId) {
        debug_assert!(self.controls.contains_key(parent), "stale parent handle");
        let data = &mut self.controls[control];
        data.parent = Some(parent);
        data.attached = true;
    }

    /// Remove a control. Children it had become detached roots.
    pub fn remove(&mut self, control: ControlId) {
        self.controls.remove(control);
        for data in self.controls.values_mut() {
            if data.parent == Some(control) {
                data.parent = None;
                data.attached = false;
            }
            if data.template_parent == Some(control) {
                data.template_parent = None;
            }
            if data.visual_parent == Some(control) {
                data.visual_parent = None;
            }
        }
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Change a control's measured bounds.
    pub fn set_bounds(&mut self, control: ControlId, width: f64, height: f64) {
        self.controls[control].bounds = Size::new(width, height);
    }

    /// Declare an explicit width (NaN clears it).
    pub fn set_declared_width(&mut self, control: ControlId, width: f64) {
        self.controls[control].declared_width = width;
    }

    /// Declare an explicit height (NaN clears it).
    pub fn set_declared_height(&mut self, control: ControlId, height: f64) {
        self.controls[control].declared_height = height;
    }

    /// Change a control's font size.
    pub fn set_font_size(&mut self, control: ControlId, font_size: f64) {
        self.controls[control].font_size = font_size;
    }

    /// Set a templated parent relation.
    pub fn set_template_parent(&mut self, control: ControlId, parent: ControlId) {
        self.controls[control].template_parent = Some(parent);
    }

    /// Set a visual parent distinct from the logical one.
    pub fn set_visual_parent(&mut self, control: ControlId, parent: ControlId) {
        self.controls[control].visual_parent = Some(parent);
    }

    // ── Push inspection ──────────────────────────────────────────────

    /// Every push in order.
    pub fn pushes(&self) -> &[(ControlId, Property, PropertyValue)] {
        &self.pushes
    }

    /// All values pushed to one property of one control, in order.
    pub fn pushes_for(&self, control: ControlId, property: Property) -> Vec<PropertyValue> {
        self.pushes
            .iter()
            .filter(|(c, p, _)| *c == control && *p == property)
            .map(|(_, _, value)| *value)
            .collect()
    }

    /// The most recent value pushed to one property of one control.
    pub fn last_push(&self, control: ControlId, property: Property) -> Option<PropertyValue> {
        self.pushes_for(control, property).pop()
    }

    /// Forget recorded pushes.
    pub fn clear_pushes(&mut self) {
        self.pushes.clear();
    }
}

impl Host for TestHost {
    type Control = ControlId;

    fn parent(&self, control: ControlId) -> Option<ControlId> {
        self.controls.get(control)?.parent
    }

    fn template_parent(&self, control: ControlId) -> Option<ControlId> {
        self.controls.get(control)?.template_parent
    }

    fn visual_parent(&self, control: ControlId) -> Option<ControlId> {
        let data = self.controls.get(control)?;
        data.visual_parent.or(data.parent)
    }

    fn viewport_root(&self, control: ControlId) -> Option<ControlId> {
        if !self.is_attached(control) {
            return None;
        }
        let mut top = control;
        while let Some(parent) = self.parent(top) {
            top = parent;
        }
        Some(top)
    }

    fn bounds(&self, control: ControlId) -> Size {
        self.controls[control].bounds
    }

    fn declared_width(&self, control: ControlId) -> f64 {
        self.controls[control].declared_width
    }

    fn declared_height(&self, control: ControlId) -> f64 {
        self.controls[control].declared_height
    }

    fn font_size(&self, control: ControlId) -> f64 {
        self.controls[control].font_size
    }

    fn is_attached(&self, control: ControlId) -> bool {
        self.controls
            .get(control)
            .is_some_and(|data| data.attached)
    }

    fn set_property(&mut self, control: ControlId, property: Property, value: PropertyValue) {
        self.pushes.push((control, property, value));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_viewport_root_walks_to_the_top() {
        let mut host = TestHost::new();
        let root = host.insert_root(100.0, 100.0);
        let child = host.insert_child(root, 50.0, 50.0);
        let grandchild = host.insert_child(child, 25.0, 25.0);

        assert_eq!(host.viewport_root(grandchild), Some(root));
        assert_eq!(host.viewport_root(root), Some(root));
    }

    #[test]
    fn test_detached_controls_have_no_viewport() {
        let mut host = TestHost::new();
        let floating = host.insert_detached(10.0, 10.0);

        assert!(!host.is_attached(floating));
        assert_eq!(host.viewport_root(floating), None);
        assert_eq!(host.parent(floating), None);
    }

    #[test]
    fn test_visual_parent_falls_back_to_logical() {
        let mut host = TestHost::new();
        let root = host.insert_root(100.0, 100.0);
        let presenter = host.insert_child(root, 80.0, 80.0);
        let child = host.insert_child(root, 50.0, 50.0);

        assert_eq!(host.visual_parent(child), Some(root));
        host.set_visual_parent(child, presenter);
        assert_eq!(host.visual_parent(child), Some(presenter));
        assert_eq!(host.parent(child), Some(root));
    }

    #[test]
    fn test_removal_detaches_children() {
        let mut host = TestHost::new();
        let root = host.insert_root(100.0, 100.0);
        let child = host.insert_child(root, 50.0, 50.0);
        let grandchild = host.insert_child(child, 25.0, 25.0);

        host.remove(child);

        assert!(!host.is_attached(grandchild));
        assert_eq!(host.parent(grandchild), None);
        assert!(host.is_attached(root));
    }

    #[test]
    fn test_push_recording() {
        let mut host = TestHost::new();
        let root = host.insert_root(100.0, 100.0);

        host.set_property(root, Property::Width, PropertyValue::Pixels(10.0));
        host.set_property(root, Property::Width, PropertyValue::Pixels(20.0));
        host.set_property(root, Property::Height, PropertyValue::Pixels(5.0));

        assert_eq!(
            host.pushes_for(root, Property::Width),
            vec![PropertyValue::Pixels(10.0), PropertyValue::Pixels(20.0)]
        );
        assert_eq!(
            host.last_push(root, Property::Height),
            Some(PropertyValue::Pixels(5.0))
        );
        assert_eq!(host.pushes().len(), 3);
        host.clear_pushes();
        assert!(host.pushes().is_empty());
    }
}
