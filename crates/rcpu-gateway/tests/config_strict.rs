#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use rcpu_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
sampler:
  interval_mss: 1000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("invalid yaml"));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.sampler.interval_ms, 1000);
    assert_eq!(cfg.sources.proc_stat, "/proc/stat");
    assert_eq!(cfg.sources.fallback_cores, 2);
}

#[test]
fn interval_out_of_range_rejected() {
    let bad = r#"
version: 1
sampler:
  interval_ms: 100
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(err.to_string().contains("interval_ms"));
}

#[test]
fn zero_fallback_cores_rejected() {
    let bad = r#"
version: 1
sources:
  fallback_cores: 0
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn wrong_version_rejected() {
    let bad = "version: 2\n";
    config::load_from_str(bad).expect_err("must fail");
}
