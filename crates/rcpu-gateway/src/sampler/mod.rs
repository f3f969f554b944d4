//! CPU sampling: pluggable tick sources and the engine that turns
//! consecutive reads into published snapshots.

pub mod engine;
pub mod source;

pub use engine::SamplerEngine;
pub use source::{detect_source, ProcStatSource, StatSource, SyntheticSource};
