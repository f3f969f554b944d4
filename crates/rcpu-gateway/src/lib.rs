//! rcpu gateway library entry.
//!
//! This crate wires the sampler engine, data-source detection, config, API
//! handlers, and metrics into a cohesive service. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod router;
pub mod sampler;
pub mod thermal;
