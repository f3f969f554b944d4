//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use rcpu_core::error::{RcpuError, Result};

pub use schema::{RcpuConfig, SamplerSection, SourcesSection};

pub fn load_from_file(path: &str) -> Result<RcpuConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| RcpuError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RcpuConfig> {
    let cfg: RcpuConfig = serde_yaml::from_str(s)
        .map_err(|e| RcpuError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
