//! Live binding graph: source resolution, evaluation, propagation.

pub mod engine;
pub mod eval;
pub mod source;

pub use engine::{AttachError, BindingId, Engine, EngineConfig};
pub use source::{Aspect, SourceError, SourceRelation};
