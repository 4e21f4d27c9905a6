//! The live binding engine.
//!
//! Every attached expression becomes a small node graph mirroring its term
//! structure: one leaf per unit term, one sum node per nested sum. Relative
//! leaves subscribe to `(source control, aspect)` pairs; when the host
//! reports a source change the affected leaves remeasure and their deltas
//! bubble up through running sum totals. A change that survives the epsilon
//! gate at every level reaches the binding root and is pushed back through
//! [`Host::set_property`], coalesced so one notification writes each
//! property at most once.

use std::collections::HashMap;

use slotmap::{new_key_type, SecondaryMap, SlotMap};
use tracing::{debug, trace, warn};

use crate::expr::corner_radius::CornerRadius;
use crate::expr::length::Length;
use crate::expr::parser::ParseError;
use crate::expr::thickness::Thickness;
use crate::expr::unit::Unit;
use crate::graph::source::{self, Aspect, SourceError, SourceRelation};
use crate::host::{ChangeEvent, Host, Property, PropertyValue};

new_key_type! {
    /// Stable handle to one bound expression. Stale after detach; every
    /// engine call checks and ignores stale handles.
    pub struct BindingId;
}

new_key_type! {
    pub(crate) struct NodeId;
}

/// Tuning knobs for an [`Engine`].
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Recomputation deltas at or below this magnitude do not propagate.
    pub change_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            change_epsilon: 1e-5,
        }
    }
}

impl EngineConfig {
    /// Set the propagation threshold (builder).
    pub fn with_change_epsilon(mut self, epsilon: f64) -> Self {
        self.change_epsilon = epsilon;
        self
    }
}

/// Errors from attaching an expression to a control property.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AttachError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("{property:?} takes {expected}")]
    Shape {
        property: Property,
        expected: &'static str,
    },
}

enum NodeKind<C> {
    Empty,
    Leaf {
        value: f64,
        unit: Unit,
        /// Resolved source of a relative leaf; absolute leaves have none.
        source: Option<(C, Aspect, SourceRelation)>,
        pixels: f64,
    },
    Sum {
        scale: f64,
        /// Running raw sum of child outputs, updated by delta.
        total: f64,
        children: Vec<NodeId>,
    },
}

struct Node<C> {
    kind: NodeKind<C>,
    parent: Option<NodeId>,
    binding: BindingId,
}

impl<C> Node<C> {
    fn output(&self) -> f64 {
        match &self.kind {
            NodeKind::Empty => f64::NAN,
            NodeKind::Leaf { pixels, .. } => *pixels,
            NodeKind::Sum { scale, total, .. } => scale * total,
        }
    }
}

#[derive(Debug, Clone)]
enum Expression {
    Scalar(Length),
    Quad(Box<[Length; 4]>),
}

impl Expression {
    fn components(&self) -> &[Length] {
        match self {
            Expression::Scalar(length) => std::slice::from_ref(length),
            Expression::Quad(quad) => &quad[..],
        }
    }
}

enum BindingState {
    /// Target not in a tree yet; source resolution deferred.
    Pending(Expression),
    /// Live node graph, one root per pushed component.
    Bound { roots: Vec<NodeId> },
}

struct Binding<C> {
    target: C,
    property: Property,
    state: BindingState,
    /// Last value pushed through the host.
    current: PropertyValue,
}

/// Outward values are never negative; NaN clamps to zero as well.
fn clamped(pixels: f64) -> f64 {
    pixels.max(0.0)
}

/// Reject units that can never bind, regardless of tree state.
fn validate_units(length: &Length) -> Result<(), SourceError> {
    match length {
        Length::Empty => Ok(()),
        Length::Leaf { unit, .. } => {
            if unit.is_absolute() {
                return Ok(());
            }
            source::unit_source(*unit).map(|_| ())
        }
        Length::Sum { terms, .. } => terms.iter().try_for_each(validate_units),
    }
}

/// Check that every relative leaf resolves from `target` right now.
fn validate_sources<H: Host>(
    host: &H,
    target: H::Control,
    length: &Length,
) -> Result<(), SourceError> {
    match length {
        Length::Empty => Ok(()),
        Length::Leaf { unit, .. } => {
            if unit.is_absolute() {
                return Ok(());
            }
            let (relation, _) = source::unit_source(*unit)?;
            match source::resolve(host, target, relation) {
                Some(_) => Ok(()),
                None => Err(SourceError::Unresolved {
                    unit: *unit,
                    relation,
                }),
            }
        }
        Length::Sum { terms, .. } => terms
            .iter()
            .try_for_each(|term| validate_sources(host, target, term)),
    }
}

/// The binding engine over one host.
///
/// The engine never stores the host; callers pass it into each operation,
/// which keeps borrows local and lets the host own the engine if it wants.
pub struct Engine<H: Host> {
    nodes: SlotMap<NodeId, Node<H::Control>>,
    bindings: SlotMap<BindingId, Binding<H::Control>>,
    /// Leaf nodes listening to one aspect of one control.
    subs: HashMap<(H::Control, Aspect), Vec<NodeId>>,
    /// Deferred bindings keyed by their unattached target.
    pending: HashMap<H::Control, Vec<BindingId>>,
    observers: SecondaryMap<BindingId, Vec<Box<dyn FnMut(ChangeEvent)>>>,
    config: EngineConfig,
}

impl<H: Host> Engine<H> {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            nodes: SlotMap::with_key(),
            bindings: SlotMap::with_key(),
            subs: HashMap::new(),
            pending: HashMap::new(),
            observers: SecondaryMap::new(),
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Attachment
    // -----------------------------------------------------------------------

    /// Bind a scalar expression to one of the six scalar properties.
    ///
    /// The current value is computed and pushed before returning. If the
    /// target is not attached yet, source resolution waits for
    /// [`control_attached`](Self::control_attached) and zero pixels are
    /// pushed in the interim; an empty expression pushes the property
    /// default instead.
    pub fn attach_length(
        &mut self,
        host: &mut H,
        target: H::Control,
        property: Property,
        length: Length,
    ) -> Result<BindingId, AttachError> {
        if property.is_quad() {
            return Err(AttachError::Shape {
                property,
                expected: "a four-component expression",
            });
        }
        self.attach(host, target, property, Expression::Scalar(length))
    }

    /// Bind a thickness to margin, padding or border thickness.
    pub fn attach_thickness(
        &mut self,
        host: &mut H,
        target: H::Control,
        property: Property,
        thickness: Thickness,
    ) -> Result<BindingId, AttachError> {
        match property {
            Property::Margin | Property::Padding | Property::BorderThickness => {}
            Property::CornerRadius => {
                return Err(AttachError::Shape {
                    property,
                    expected: "corner radii",
                })
            }
            _ => {
                return Err(AttachError::Shape {
                    property,
                    expected: "a scalar length",
                })
            }
        }
        let Thickness {
            left,
            top,
            right,
            bottom,
        } = thickness;
        self.attach(
            host,
            target,
            property,
            Expression::Quad(Box::new([left, top, right, bottom])),
        )
    }

    /// Bind corner radii to the corner radius property.
    pub fn attach_corner_radius(
        &mut self,
        host: &mut H,
        target: H::Control,
        radius: CornerRadius,
    ) -> Result<BindingId, AttachError> {
        let CornerRadius {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        } = radius;
        self.attach(
            host,
            target,
            Property::CornerRadius,
            Expression::Quad(Box::new([top_left, top_right, bottom_right, bottom_left])),
        )
    }

    /// Parse `text` with the grammar the property expects, then attach.
    pub fn attach_str(
        &mut self,
        host: &mut H,
        target: H::Control,
        property: Property,
        text: &str,
    ) -> Result<BindingId, AttachError> {
        match property {
            Property::CornerRadius => {
                let radius = CornerRadius::parse(text)?;
                self.attach_corner_radius(host, target, radius)
            }
            Property::Margin | Property::Padding | Property::BorderThickness => {
                let thickness = Thickness::parse(text)?;
                self.attach_thickness(host, target, property, thickness)
            }
            _ => {
                let length = Length::parse(text)?;
                self.attach_length(host, target, property, length)
            }
        }
    }

    fn attach(
        &mut self,
        host: &mut H,
        target: H::Control,
        property: Property,
        expr: Expression,
    ) -> Result<BindingId, AttachError> {
        for component in expr.components() {
            validate_units(component)?;
        }
        let attached = host.is_attached(target);
        if attached {
            for component in expr.components() {
                validate_sources(host, target, component)?;
            }
        }
        let binding = self.bindings.insert(Binding {
            target,
            property,
            state: BindingState::Bound { roots: Vec::new() },
            current: property.default_value(),
        });
        if attached {
            let roots = self.build_roots(host, binding, target, &expr);
            self.bindings[binding].state = BindingState::Bound { roots };
            debug!(?property, "binding live");
        } else {
            self.bindings[binding].state = BindingState::Pending(expr);
            self.pending.entry(target).or_default().push(binding);
            debug!(?property, "binding deferred until target attaches");
        }
        self.flush(host, binding);
        Ok(binding)
    }

    fn build_roots(
        &mut self,
        host: &H,
        binding: BindingId,
        target: H::Control,
        expr: &Expression,
    ) -> Vec<NodeId> {
        expr.components()
            .iter()
            .map(|component| self.build_node(host, binding, target, component, None))
            .collect()
    }

    /// Build the node mirror of `length`. Sources must already validate.
    fn build_node(
        &mut self,
        host: &H,
        binding: BindingId,
        target: H::Control,
        length: &Length,
        parent: Option<NodeId>,
    ) -> NodeId {
        match length {
            Length::Empty => self.nodes.insert(Node {
                kind: NodeKind::Empty,
                parent,
                binding,
            }),
            Length::Leaf { value, unit } => {
                let (source, pixels) = match unit.absolute_pixels(*value) {
                    Ok(pixels) => (None, pixels),
                    Err(_) => {
                        match source::unit_source(*unit)
                            .ok()
                            .and_then(|(relation, aspect)| {
                                source::resolve(host, target, relation)
                                    .map(|control| (control, aspect, relation))
                            }) {
                            Some((control, aspect, relation)) => {
                                let measurement =
                                    source::measure(host, control, aspect, relation);
                                (
                                    Some((control, aspect, relation)),
                                    source::leaf_pixels(*unit, *value, measurement),
                                )
                            }
                            None => (None, 0.0),
                        }
                    }
                };
                let id = self.nodes.insert(Node {
                    kind: NodeKind::Leaf {
                        value: *value,
                        unit: *unit,
                        source,
                        pixels,
                    },
                    parent,
                    binding,
                });
                if let Some((control, aspect, _)) = source {
                    self.subs.entry((control, aspect)).or_default().push(id);
                }
                id
            }
            Length::Sum { scale, terms } => {
                let id = self.nodes.insert(Node {
                    kind: NodeKind::Sum {
                        scale: *scale,
                        total: 0.0,
                        children: Vec::new(),
                    },
                    parent,
                    binding,
                });
                let children: Vec<NodeId> = terms
                    .iter()
                    .map(|term| self.build_node(host, binding, target, term, Some(id)))
                    .collect();
                let total: f64 = children.iter().map(|&child| self.nodes[child].output()).sum();
                if let NodeKind::Sum {
                    total: slot,
                    children: kids,
                    ..
                } = &mut self.nodes[id].kind
                {
                    *slot = total;
                    *kids = children;
                }
                id
            }
        }
    }

    // -----------------------------------------------------------------------
    // Host notifications
    // -----------------------------------------------------------------------

    /// Recompute everything that measures `control`. The host calls this
    /// after any bounds, declared-size or font-size change.
    pub fn source_changed(&mut self, host: &mut H, control: H::Control) {
        let mut dirty: Vec<BindingId> = Vec::new();
        for aspect in [Aspect::Width, Aspect::Height, Aspect::FontSize] {
            let Some(leaves) = self.subs.get(&(control, aspect)) else {
                continue;
            };
            for leaf in leaves.clone() {
                let Some((old, new)) = self.recompute_leaf(host, leaf) else {
                    continue;
                };
                let Some(binding) = self.bubble(leaf, old, new) else {
                    continue;
                };
                if !dirty.contains(&binding) {
                    dirty.push(binding);
                }
            }
        }
        for binding in dirty {
            self.flush(host, binding);
        }
    }

    /// Resolve bindings that were deferred because `control` had no tree.
    ///
    /// Bindings that still cannot resolve stay deferred for a later
    /// attachment; the first such failure is returned after the rest have
    /// been processed.
    pub fn control_attached(
        &mut self,
        host: &mut H,
        control: H::Control,
    ) -> Result<(), SourceError> {
        let Some(waiting) = self.pending.get(&control) else {
            return Ok(());
        };
        let waiting = waiting.clone();
        let mut first_failure = None;
        let mut still_waiting = Vec::new();
        let mut bound = Vec::new();

        for id in waiting {
            let Some(binding) = self.bindings.get(id) else {
                continue;
            };
            let BindingState::Pending(expr) = &binding.state else {
                continue;
            };
            let target = binding.target;
            let failure = expr
                .components()
                .iter()
                .find_map(|component| validate_sources(host, target, component).err());
            if let Some(error) = failure {
                warn!(control = ?target, error = %error, "deferred binding cannot resolve its source");
                if first_failure.is_none() {
                    first_failure = Some(error);
                }
                still_waiting.push(id);
                continue;
            }
            let Some(binding) = self.bindings.get_mut(id) else {
                continue;
            };
            let BindingState::Pending(expr) = std::mem::replace(
                &mut binding.state,
                BindingState::Bound { roots: Vec::new() },
            ) else {
                continue;
            };
            let roots = self.build_roots(host, id, target, &expr);
            self.bindings[id].state = BindingState::Bound { roots };
            debug!(property = ?self.bindings[id].property, "deferred binding live");
            bound.push(id);
        }

        if still_waiting.is_empty() {
            self.pending.remove(&control);
        } else {
            self.pending.insert(control, still_waiting);
        }
        for id in bound {
            self.flush(host, id);
        }
        match first_failure {
            None => Ok(()),
            Some(error) => Err(error),
        }
    }

    /// Drop every binding targeting `control` and freeze leaves that were
    /// measuring it at their last value. Nothing is pushed; the control is
    /// assumed gone from the host.
    pub fn control_removed(&mut self, control: H::Control) {
        let doomed: Vec<BindingId> = self
            .bindings
            .iter()
            .filter(|(_, binding)| binding.target == control)
            .map(|(id, _)| id)
            .collect();
        for id in doomed {
            if let Some(binding) = self.bindings.remove(id) {
                if let BindingState::Bound { roots } = binding.state {
                    self.remove_nodes(&roots);
                }
                self.observers.remove(id);
            }
        }
        self.pending.remove(&control);
        for aspect in [Aspect::Width, Aspect::Height, Aspect::FontSize] {
            if let Some(leaves) = self.subs.remove(&(control, aspect)) {
                if !leaves.is_empty() {
                    warn!(source = ?control, ?aspect, "source removed; dependents freeze at last value");
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Binding access
    // -----------------------------------------------------------------------

    /// Tear down one binding and push the property default back.
    /// Returns `false` for a stale handle.
    pub fn detach(&mut self, host: &mut H, binding: BindingId) -> bool {
        let Some(removed) = self.bindings.remove(binding) else {
            return false;
        };
        match removed.state {
            BindingState::Bound { roots } => self.remove_nodes(&roots),
            BindingState::Pending(_) => {
                if let Some(waiting) = self.pending.get_mut(&removed.target) {
                    waiting.retain(|&id| id != binding);
                    if waiting.is_empty() {
                        self.pending.remove(&removed.target);
                    }
                }
            }
        }
        self.observers.remove(binding);
        host.set_property(
            removed.target,
            removed.property,
            removed.property.default_value(),
        );
        debug!(property = ?removed.property, "binding detached");
        true
    }

    /// Register a callback for future pushes of this binding.
    /// Returns `false` for a stale handle.
    pub fn observe(
        &mut self,
        binding: BindingId,
        callback: impl FnMut(ChangeEvent) + 'static,
    ) -> bool {
        if !self.bindings.contains_key(binding) {
            return false;
        }
        match self.observers.get_mut(binding) {
            Some(callbacks) => callbacks.push(Box::new(callback)),
            None => {
                self.observers.insert(binding, vec![Box::new(callback)]);
            }
        }
        true
    }

    /// Current raw pixels of a scalar binding, unclamped. An empty
    /// expression reads NaN and a still-deferred binding reads zero;
    /// quad bindings and stale handles read `None`.
    pub fn pixels(&self, binding: BindingId) -> Option<f64> {
        let b = self.bindings.get(binding)?;
        if b.property.is_quad() {
            return None;
        }
        match &b.state {
            BindingState::Pending(Expression::Scalar(length)) if length.is_empty() => {
                Some(f64::NAN)
            }
            BindingState::Pending(_) => Some(0.0),
            BindingState::Bound { roots } => Some(self.nodes[roots[0]].output()),
        }
    }

    /// The value most recently pushed for this binding.
    pub fn absolute(&self, binding: BindingId) -> Option<PropertyValue> {
        Some(self.bindings.get(binding)?.current)
    }

    /// The binding whose current pixels are smaller, NaN losing.
    /// `None` when either handle is stale or quad-valued.
    pub fn min(&self, a: BindingId, b: BindingId) -> Option<BindingId> {
        let (pa, pb) = (self.pixels(a)?, self.pixels(b)?);
        if pa.is_nan() {
            return Some(b);
        }
        if pb.is_nan() || pa < pb {
            return Some(a);
        }
        Some(b)
    }

    /// The binding whose current pixels are larger, NaN losing.
    /// `None` when either handle is stale or quad-valued.
    pub fn max(&self, a: BindingId, b: BindingId) -> Option<BindingId> {
        let (pa, pb) = (self.pixels(a)?, self.pixels(b)?);
        if pa.is_nan() {
            return Some(b);
        }
        if pb.is_nan() || pa > pb {
            return Some(a);
        }
        Some(b)
    }

    // -----------------------------------------------------------------------
    // Propagation
    // -----------------------------------------------------------------------

    fn recompute_leaf(&mut self, host: &H, leaf: NodeId) -> Option<(f64, f64)> {
        let epsilon = self.config.change_epsilon;
        let node = self.nodes.get_mut(leaf)?;
        let NodeKind::Leaf {
            value,
            unit,
            source: Some((control, aspect, relation)),
            pixels,
        } = &mut node.kind
        else {
            return None;
        };
        let measurement = source::measure(host, *control, *aspect, *relation);
        let new = source::leaf_pixels(*unit, *value, measurement);
        let old = std::mem::replace(pixels, new);
        if (new - old).abs() > epsilon {
            trace!(old, new, "leaf recomputed");
            Some((old, new))
        } else {
            None
        }
    }

    /// Apply a child's output delta up the parent chain. Returns the owning
    /// binding when the change survives every gate to the root.
    fn bubble(&mut self, from: NodeId, old: f64, new: f64) -> Option<BindingId> {
        let epsilon = self.config.change_epsilon;
        let (mut node, mut old, mut new) = (from, old, new);
        loop {
            let Some(parent) = self.nodes.get(node)?.parent else {
                return Some(self.nodes[node].binding);
            };
            let Some(Node {
                kind: NodeKind::Sum { scale, total, .. },
                ..
            }) = self.nodes.get_mut(parent)
            else {
                return None;
            };
            let old_output = *scale * *total;
            *total += new - old;
            let new_output = *scale * *total;
            if (new_output - old_output).abs() <= epsilon {
                return None;
            }
            node = parent;
            old = old_output;
            new = new_output;
        }
    }

    /// Recompute a binding's outward value, push it, and notify observers.
    fn flush(&mut self, host: &mut H, binding: BindingId) {
        let Some(b) = self.bindings.get(binding) else {
            return;
        };
        let (target, property, old) = (b.target, b.property, b.current);
        let new = self.binding_value(binding);
        if let Some(b) = self.bindings.get_mut(binding) {
            b.current = new;
        }
        trace!(?property, ?new, "push");
        host.set_property(target, property, new);

        let Some(mut callbacks) = self.observers.remove(binding) else {
            return;
        };
        let event = ChangeEvent { property, old, new };
        for callback in &mut callbacks {
            callback(event);
        }
        if let Some(added) = self.observers.remove(binding) {
            callbacks.extend(added);
        }
        self.observers.insert(binding, callbacks);
    }

    fn binding_value(&self, binding: BindingId) -> PropertyValue {
        let b = &self.bindings[binding];
        match &b.state {
            BindingState::Pending(Expression::Scalar(length)) if length.is_empty() => {
                b.property.default_value()
            }
            BindingState::Pending(Expression::Scalar(_)) => PropertyValue::Pixels(0.0),
            BindingState::Pending(Expression::Quad(_)) => PropertyValue::Quad([0.0; 4]),
            BindingState::Bound { roots } if !b.property.is_quad() => {
                let root = &self.nodes[roots[0]];
                if matches!(root.kind, NodeKind::Empty) {
                    b.property.default_value()
                } else {
                    PropertyValue::Pixels(clamped(root.output()))
                }
            }
            BindingState::Bound { roots } => {
                let mut quad = [0.0; 4];
                for (slot, &root) in quad.iter_mut().zip(roots) {
                    *slot = clamped(self.nodes[root].output());
                }
                PropertyValue::Quad(quad)
            }
        }
    }

    fn remove_nodes(&mut self, roots: &[NodeId]) {
        let mut stack: Vec<NodeId> = roots.to_vec();
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.remove(id) else {
                continue;
            };
            match node.kind {
                NodeKind::Sum { children, .. } => stack.extend(children),
                NodeKind::Leaf {
                    source: Some((control, aspect, _)),
                    ..
                } => {
                    if let Some(leaves) = self.subs.get_mut(&(control, aspect)) {
                        leaves.retain(|&leaf| leaf != id);
                        if leaves.is_empty() {
                            self.subs.remove(&(control, aspect));
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl<H: Host> Default for Engine<H> {
    fn default() -> Self {
        Self::new()
    }
}
