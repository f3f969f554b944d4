//! Top-level facade crate for rcpu.
//!
//! Re-exports the core types and the gateway library so users can depend on
//! a single crate.

pub mod core {
    pub use rcpu_core::*;
}

pub mod gateway {
    pub use rcpu_gateway::*;
}
