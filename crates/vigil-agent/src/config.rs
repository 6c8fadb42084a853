//! Agent configuration.

use std::time::Duration;

/// Configuration for one agent node.
///
/// Owned by the process boundary (CLI); the coordinator only consumes it.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// This node's advertised callback URL (how peers reach our surface).
    pub callback: String,
    /// Consecutive identical observations before an alert fires.
    pub alert_threshold: u32,
    /// How often to probe every known target.
    pub probe_interval: Duration,
    /// How often to exchange gossip with every known peer.
    pub gossip_interval: Duration,
    /// Bound on a single probe; keep below `probe_interval`.
    pub probe_timeout: Duration,
    /// Elapsed time above which a reachable probe classifies as WARN.
    pub latency_budget: Duration,
    /// Initial target URLs to monitor.
    pub seed_targets: Vec<String>,
    /// Initial peer callback URLs to gossip with.
    pub seed_peers: Vec<String>,
}
