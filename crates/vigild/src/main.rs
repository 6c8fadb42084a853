//! vigild — the Vigil daemon.
//!
//! One process per node. Assembles the coordinator actor (probing, alert
//! hysteresis, gossip exchange) and the HTTP surface other agents pull
//! gossip from, then runs until Ctrl-C.
//!
//! # Usage
//!
//! ```text
//! vigild --port 9999 \
//!        --targets http://svc-a.example/health,http://svc-b.example/health \
//!        --peers http://10.0.0.2:9999
//! ```
//!
//! Alerts are emitted as structured tracing events and, for piping into
//! another program, as lines on stdout:
//! `<unix-ts>;<target>;<status|-1>;<OK|ERR>;<threshold>`.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use vigil_agent::{AgentConfig, Coordinator};

#[derive(Parser)]
#[command(name = "vigild", about = "Vigil decentralized health monitoring agent")]
struct Cli {
    /// Port the gossip surface listens on.
    #[arg(long, default_value = "9999")]
    port: u16,

    /// Address advertised to peers (forms the callback URL).
    #[arg(long, default_value = "127.0.0.1")]
    advertise_addr: String,

    /// Consecutive identical observations before an alert fires.
    #[arg(long, default_value = "3")]
    alert_threshold: u32,

    /// How often to probe targets (in seconds).
    #[arg(long, default_value = "60")]
    probe_interval: u64,

    /// How often to exchange gossip with peers (in seconds).
    #[arg(long, default_value = "60")]
    gossip_interval: u64,

    /// Per-probe timeout (in seconds); must stay below the probe interval.
    #[arg(long, default_value = "10")]
    probe_timeout: u64,

    /// Latency budget (in milliseconds) above which a probe classifies WARN.
    #[arg(long, default_value = "1000")]
    latency_budget_ms: u64,

    /// Comma-separated list of target URLs to monitor.
    #[arg(long, default_value = "")]
    targets: String,

    /// Comma-separated list of peer callback URLs for bootstrapping.
    #[arg(long, default_value = "")]
    peers: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vigild=debug,vigil=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    info!(callback = %config.callback, "vigild starting");

    // ── Coordinator actor ──────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (handle, coordinator_task) = Coordinator::spawn(config, shutdown_rx);

    // ── Gossip surface ─────────────────────────────────────────
    let router = vigil_api::build_router(handle);
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));

    info!(%addr, "gossip surface starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for the actor to drain.
    let _ = coordinator_task.await;

    info!("vigild stopped");
    Ok(())
}

/// Validate CLI arguments and assemble the agent config.
///
/// Configuration errors are the only fatal errors in the system and are
/// caught here, before the core starts.
fn build_config(cli: &Cli) -> anyhow::Result<AgentConfig> {
    if cli.alert_threshold == 0 {
        bail!("--alert-threshold must be at least 1");
    }
    if cli.probe_interval == 0 || cli.gossip_interval == 0 {
        bail!("--probe-interval and --gossip-interval must be at least 1 second");
    }
    if cli.probe_timeout >= cli.probe_interval {
        bail!(
            "--probe-timeout ({}s) must be below --probe-interval ({}s)",
            cli.probe_timeout,
            cli.probe_interval
        );
    }

    Ok(AgentConfig {
        callback: format!("http://{}:{}", cli.advertise_addr, cli.port),
        alert_threshold: cli.alert_threshold,
        probe_interval: Duration::from_secs(cli.probe_interval),
        gossip_interval: Duration::from_secs(cli.gossip_interval),
        probe_timeout: Duration::from_secs(cli.probe_timeout),
        latency_budget: Duration::from_millis(cli.latency_budget_ms),
        seed_targets: split_list(&cli.targets),
        seed_peers: split_list(&cli.peers),
    })
}

/// Split a comma-separated flag value, dropping empty entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("vigild").chain(args.iter().copied()))
    }

    #[test]
    fn split_list_handles_empty_and_spaces() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("a,b"), vec!["a", "b"]);
        assert_eq!(split_list(" a , ,b, "), vec!["a", "b"]);
    }

    #[test]
    fn config_defaults_are_valid() {
        let config = build_config(&cli(&[])).unwrap();
        assert_eq!(config.callback, "http://127.0.0.1:9999");
        assert_eq!(config.alert_threshold, 3);
        assert_eq!(config.probe_interval, Duration::from_secs(60));
        assert!(config.seed_targets.is_empty());
    }

    #[test]
    fn seed_lists_are_parsed() {
        let config = build_config(&cli(&[
            "--targets",
            "http://a.example/,http://b.example/",
            "--peers",
            "http://10.0.0.2:9999",
        ]))
        .unwrap();
        assert_eq!(config.seed_targets.len(), 2);
        assert_eq!(config.seed_peers, vec!["http://10.0.0.2:9999"]);
    }

    #[test]
    fn zero_threshold_is_rejected() {
        assert!(build_config(&cli(&["--alert-threshold", "0"])).is_err());
    }

    #[test]
    fn timeout_must_stay_below_interval() {
        assert!(build_config(&cli(&["--probe-timeout", "60"])).is_err());
        assert!(build_config(&cli(&["--probe-timeout", "5", "--probe-interval", "5"])).is_err());
    }
}
