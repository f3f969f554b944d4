use serde::Deserialize;

use rcpu_core::error::{RcpuError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RcpuConfig {
    pub version: u32,

    #[serde(default)]
    pub sampler: SamplerSection,

    #[serde(default)]
    pub sources: SourcesSection,
}

impl Default for RcpuConfig {
    fn default() -> Self {
        Self {
            version: 1,
            sampler: SamplerSection::default(),
            sources: SourcesSection::default(),
        }
    }
}

impl RcpuConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RcpuError::BadRequest("version must be 1".into()));
        }

        self.sampler.validate()?;
        self.sources.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerSection {
    /// Pacing between the two reads of a cycle; also the effective publish
    /// cadence. Sub-250ms intervals yield noisy deltas from integer
    /// truncation, so the floor is deliberately coarse.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl SamplerSection {
    pub fn validate(&self) -> Result<()> {
        if !(250..=60000).contains(&self.interval_ms) {
            return Err(RcpuError::BadRequest(
                "sampler.interval_ms must be between 250 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesSection {
    #[serde(default = "default_proc_stat")]
    pub proc_stat: String,

    #[serde(default = "default_thermal_zone")]
    pub thermal_zone: String,

    /// Core count used by the synthetic source when the accounting file is
    /// absent. Demo mode only, not real topology.
    #[serde(default = "default_fallback_cores")]
    pub fallback_cores: usize,
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            proc_stat: default_proc_stat(),
            thermal_zone: default_thermal_zone(),
            fallback_cores: default_fallback_cores(),
        }
    }
}

impl SourcesSection {
    pub fn validate(&self) -> Result<()> {
        if self.fallback_cores == 0 {
            return Err(RcpuError::BadRequest(
                "sources.fallback_cores must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

fn default_proc_stat() -> String {
    "/proc/stat".into()
}
fn default_thermal_zone() -> String {
    "/sys/class/thermal/thermal_zone0/temp".into()
}
fn default_fallback_cores() -> usize {
    2
}
