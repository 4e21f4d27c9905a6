//! # relative-length
//!
//! Relative-length expressions for GUI layout.
//!
//! A [`Length`] is a signed sum of unit terms like `50pw`, `20vh+10px` or
//! `2em-5%`, where relative units measure another control: the parent, the
//! templated parent, the visual parent, the viewport or the control itself.
//! Expressions parse from text, compose through arithmetic, and evaluate to
//! pixels against any toolkit that implements the [`Host`] trait. The
//! [`Engine`] keeps attached expressions live: every term becomes a node
//! subscribed to the control it measures, so a parent resize recomputes
//! exactly the affected terms and pushes the new pixels back to the toolkit.
//!
//! ## Core Systems
//!
//! - **[`expr`]** — Units, lexer, parser, and the [`Length`] algebra with
//!   its [`Thickness`] / [`CornerRadius`] / [`RelativeSize`] composites
//! - **[`graph`]** — Source resolution, evaluation, and the live [`Engine`]
//!   with its epsilon-gated delta propagation
//! - **[`host`]** — The [`Host`] boundary trait a toolkit adapter implements
//! - **[`geometry`]** — The [`Size`] measurement primitive
//! - **[`testing`]** — A headless recording [`TestHost`](testing::TestHost)

// Foundation
pub mod geometry;

// Expression language
pub mod expr;

// Live bindings
pub mod graph;
pub mod host;

// Test support
pub mod testing;

// Convenience re-exports
pub use expr::{
    CornerRadius, Length, LengthUnits, ParseError, RelativeSize, Scale, SplitError, Thickness,
    Unit, UnitError,
};
pub use geometry::Size;
pub use graph::{AttachError, BindingId, Engine, EngineConfig, SourceError, SourceRelation};
pub use host::{ChangeEvent, Host, Property, PropertyValue};
