//! CPU temperature sources.
//!
//! The sysfs thermal zone reports millidegrees Celsius as a bare integer.
//! Hosts without one get `NoThermalSource`, and the API answers the literal
//! string `unknown` instead of a reading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

#[async_trait]
pub trait ThermalSource: Send + Sync {
    /// Current CPU temperature in degrees Celsius, `None` if unreadable.
    async fn read_celsius(&self) -> Option<f64>;
}

/// Reads `/sys/class/thermal/thermal_zone0/temp` (or a configured path).
pub struct ThermalZoneSource {
    path: PathBuf,
}

impl ThermalZoneSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ThermalSource for ThermalZoneSource {
    async fn read_celsius(&self) -> Option<f64> {
        let raw = tokio::fs::read_to_string(&self.path).await.ok()?;
        let millidegrees: f64 = raw.trim().parse().ok()?;
        Some(millidegrees / 1000.0)
    }
}

/// No temperature source on this host.
pub struct NoThermalSource;

#[async_trait]
impl ThermalSource for NoThermalSource {
    async fn read_celsius(&self) -> Option<f64> {
        None
    }
}

/// Probe the thermal zone once at startup.
pub fn detect_thermal(path: &str) -> Arc<dyn ThermalSource> {
    if Path::new(path).exists() {
        tracing::info!(%path, "thermal zone found");
        Arc::new(ThermalZoneSource::new(path))
    } else {
        tracing::info!(%path, "no thermal zone, temperature will read unknown");
        Arc::new(NoThermalSource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_source_reads_none() {
        assert_eq!(NoThermalSource.read_celsius().await, None);
    }

    #[tokio::test]
    async fn missing_zone_file_reads_none() {
        let s = ThermalZoneSource::new("/definitely/not/thermal_zone0/temp");
        assert_eq!(s.read_celsius().await, None);
    }

    #[tokio::test]
    async fn zone_file_reads_millidegrees_as_celsius() {
        let path = std::env::temp_dir().join("rcpu_thermal_read_test");
        std::fs::write(&path, "43851\n").unwrap();

        let s = ThermalZoneSource::new(&path);
        assert_eq!(s.read_celsius().await, Some(43.851));

        std::fs::write(&path, "5000").unwrap();
        assert_eq!(s.read_celsius().await, Some(5.0));

        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn garbage_zone_content_reads_none() {
        let path = std::env::temp_dir().join("rcpu_thermal_garbage_test");
        std::fs::write(&path, "not a number\n").unwrap();

        let s = ThermalZoneSource::new(&path);
        assert_eq!(s.read_celsius().await, None);

        std::fs::remove_file(&path).ok();
    }
}
