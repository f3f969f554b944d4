//! Accounting-dump vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use rcpu_core::stat::{count_cpu_lines, parse_cpu_block};
use rcpu_core::RcpuError;

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn four_core_dump_counts_five_rows() {
    // The aggregate `cpu` line is counted as a row on purpose; the published
    // array length inherits this off-by-one.
    let text = load("proc_stat_4core.txt");
    assert_eq!(count_cpu_lines(&text), 5);
}

#[test]
fn four_core_dump_parses_in_source_order() {
    let text = load("proc_stat_4core.txt");
    let rows = parse_cpu_block(&text).unwrap();
    assert_eq!(rows.len(), 5);

    // Aggregate first, then cpu0..cpu3.
    assert_eq!(rows[0].idle(), 22_625_563);
    assert_eq!(rows[1].idle(), 11_311_718);
    assert_eq!(rows[4].idle(), 5_995_769);
}

#[test]
fn scan_stops_at_intr() {
    let text = load("proc_stat_4core.txt");
    // `ctxt` starts with `c` but sits past `intr`, so it is never reached.
    assert!(!text.lines().take(count_cpu_lines(&text)).any(|l| l.starts_with("ctxt")));
}

#[test]
fn short_row_aborts_the_block() {
    let text = load("proc_stat_short_row.txt");
    let err = parse_cpu_block(&text).unwrap_err();
    assert!(matches!(err, RcpuError::MalformedSample(_)));
}
