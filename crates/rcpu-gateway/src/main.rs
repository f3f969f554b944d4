//! rcpu gateway binary.
//!
//! Startup order matters: core-count discovery runs once and sizes the
//! snapshot, then the sampler engine starts as a long-lived background task,
//! then the HTTP server takes over the main task. Request handlers only ever
//! read the latest published snapshot; they never trigger sampling.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use rcpu_gateway::obs::RcpuMetrics;
use rcpu_gateway::sampler::{detect_source, SamplerEngine};
use rcpu_gateway::thermal::detect_thermal;
use rcpu_gateway::{app_state, config, router};

const CONFIG_FILE: &str = "rcpu.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let Some(port) = parse_port() else {
        eprintln!("hint: rcpu-gateway [port number]");
        return;
    };

    let cfg = if Path::new(CONFIG_FILE).exists() {
        config::load_from_file(CONFIG_FILE).expect("config load failed")
    } else {
        config::RcpuConfig::default()
    };

    // Discovery runs exactly once; its result sizes everything downstream.
    let (source, core_count) = detect_source(&cfg.sources).await;
    let thermal = detect_thermal(&cfg.sources.thermal_zone);
    let metrics = Arc::new(RcpuMetrics::default());

    let interval = Duration::from_millis(cfg.sampler.interval_ms);
    let (engine, snapshot_rx) =
        SamplerEngine::new(source, core_count, interval, Arc::clone(&metrics));

    let cancel = CancellationToken::new();
    tokio::spawn(engine.run(cancel.clone()));

    let state = app_state::AppState::new(cfg, core_count, snapshot_rx, thermal, metrics);
    let app = router::build_router(state);

    let listen = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%listen, cores = core_count, "rcpu-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown(cancel))
        .await
        .expect("server failed");
}

/// The single required positional argument. `-h` or anything unparseable
/// falls through to the usage hint.
fn parse_port() -> Option<u16> {
    let arg = std::env::args().nth(1)?;
    if arg.starts_with("-h") {
        return None;
    }
    arg.parse().ok()
}

async fn shutdown(cancel: CancellationToken) {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown requested");
    cancel.cancel();
}
