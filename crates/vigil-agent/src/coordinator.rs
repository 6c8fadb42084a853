//! The coordinator actor loop and its mailbox.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use vigil_alert::{AlertEngine, AlertEvent};
use vigil_gossip::{Directory, GossipClient, GossipPayload};
use vigil_probe::{classify, http_probe, ClassKey, ProbeOutcome};

use crate::config::AgentConfig;

/// Requests into the coordinator from other contexts.
///
/// The HTTP surface never touches the directory; it sends these instead.
#[derive(Debug)]
pub enum Command {
    /// A peer announced its own callback address.
    RegisterPeer { callback: String },
    /// Request the current directory as a gossip payload.
    Snapshot {
        reply: oneshot::Sender<GossipPayload>,
    },
}

/// Results streaming back from fanned-out tasks.
#[derive(Debug)]
enum Event {
    Probe(ProbeOutcome),
    Gossip { peer: String, payload: GossipPayload },
}

/// Cheap clonable handle for talking to a running coordinator.
#[derive(Debug, Clone)]
pub struct AgentHandle {
    tx: mpsc::Sender<Command>,
}

impl AgentHandle {
    /// Funnel a self-registration through the coordinator mailbox.
    pub async fn register_peer(&self, callback: &str) {
        let _ = self
            .tx
            .send(Command::RegisterPeer {
                callback: callback.to_string(),
            })
            .await;
    }

    /// Fetch the current directory snapshot.
    ///
    /// Returns an empty payload if the coordinator has shut down.
    pub async fn snapshot(&self) -> GossipPayload {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Snapshot { reply }).await.is_err() {
            return GossipPayload::default();
        }
        rx.await.unwrap_or_default()
    }
}

/// Single owner of the directory and alert engine.
///
/// All mutation happens inside [`run`](Coordinator::run), one event or
/// command at a time.
pub struct Coordinator {
    config: AgentConfig,
    directory: Directory,
    alerts: AlertEngine,
    client: GossipClient,
}

impl Coordinator {
    /// Build a coordinator from config (seeds go through directory dedup).
    pub fn new(config: AgentConfig) -> Self {
        let directory = Directory::new(
            &config.callback,
            config.seed_targets.clone(),
            config.seed_peers.clone(),
        );
        let alerts = AlertEngine::new(config.alert_threshold);
        let client = GossipClient::new(config.probe_timeout);

        Self {
            config,
            directory,
            alerts,
            client,
        }
    }

    /// Spawn the coordinator actor.
    ///
    /// Returns the handle for commands and the join handle of the actor
    /// task. The task exits when `shutdown` flips or its sender drops.
    pub fn spawn(
        config: AgentConfig,
        shutdown: watch::Receiver<bool>,
    ) -> (AgentHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(64);
        let coordinator = Self::new(config);

        let task = tokio::spawn(async move {
            coordinator.run(rx, shutdown).await;
        });

        (AgentHandle { tx }, task)
    }

    /// The actor loop: tick, fan out, serialize every application.
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let (events_tx, mut events) = mpsc::channel::<Event>(64);

        let mut probe_tick = tokio::time::interval(self.config.probe_interval);
        let mut gossip_tick = tokio::time::interval(self.config.gossip_interval);

        info!(
            targets = self.directory.targets().len(),
            peers = self.directory.peers().len(),
            threshold = self.config.alert_threshold,
            "coordinator started"
        );

        loop {
            tokio::select! {
                _ = probe_tick.tick() => self.start_probe_round(&events_tx),
                _ = gossip_tick.tick() => self.start_gossip_round(&events_tx),
                Some(event) = events.recv() => self.apply_event(event),
                Some(command) = commands.recv() => self.apply_command(command),
                _ = shutdown.changed() => {
                    debug!("coordinator shutting down");
                    break;
                }
            }
        }
    }

    /// Fan out one probe task per target in the current snapshot.
    ///
    /// Targets discovered while this round is in flight are probed from
    /// the next round on.
    fn start_probe_round(&self, events_tx: &mpsc::Sender<Event>) {
        let targets = self.directory.targets().to_vec();
        debug!(count = targets.len(), "probe round starting");

        for target in targets {
            let tx = events_tx.clone();
            let timeout = self.config.probe_timeout;
            tokio::spawn(async move {
                let outcome = http_probe(&target, timeout).await;
                let _ = tx.send(Event::Probe(outcome)).await;
            });
        }
    }

    /// Fan out one gossip fetch per peer in the current snapshot.
    fn start_gossip_round(&self, events_tx: &mpsc::Sender<Event>) {
        let peers = self.directory.peers().to_vec();
        debug!(count = peers.len(), "gossip round starting");

        for peer in peers {
            let tx = events_tx.clone();
            let client = self.client.clone();
            let callback = self.config.callback.clone();
            tokio::spawn(async move {
                match client.fetch_payload(&peer, &callback).await {
                    Ok(payload) => {
                        let _ = tx.send(Event::Gossip { peer, payload }).await;
                    }
                    // The round contributes nothing; the peer stays listed.
                    Err(e) => debug!(%peer, error = %e, "gossip exchange failed"),
                }
            });
        }
    }

    fn apply_event(&mut self, event: Event) {
        match event {
            Event::Probe(outcome) => self.apply_probe(outcome),
            Event::Gossip { peer, payload } => self.apply_gossip(&peer, payload),
        }
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::RegisterPeer { callback } => {
                if self.directory.register_peer(&callback) {
                    info!(peer = %callback, "new peer from inbound registration");
                }
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.directory.snapshot());
            }
        }
    }

    /// Classify one probe outcome and feed it through the alert engine.
    fn apply_probe(&mut self, outcome: ProbeOutcome) {
        let (class, passing) = classify(&outcome, self.config.latency_budget);
        info!(
            target = %outcome.target,
            status = %outcome.status_detail(),
            elapsed = ?outcome.elapsed,
            "probe {class}"
        );

        let key = ClassKey::of(&outcome, passing);
        let detail = outcome.status_detail();
        if let Some(event) = self.alerts.observe(&outcome.target, key, &detail) {
            self.emit_alert(&event);
        }
    }

    /// Merge one peer's payload into the directory.
    fn apply_gossip(&mut self, peer: &str, payload: GossipPayload) {
        for target in self.directory.merge_targets(&payload.targets) {
            info!(%peer, %target, "new target from gossip");
        }
        for new_peer in self.directory.merge_peers(&payload.peers) {
            info!(%peer, new_peer = %new_peer, "new peer from gossip");
        }
    }

    /// Emit one debounced alert: a structured tracing event plus the
    /// machine-readable line on stdout for piping into another program.
    fn emit_alert(&self, event: &AlertEvent) {
        warn!(
            target = %event.target,
            status = %event.status_detail,
            passing = event.passing,
            streak = event.streak,
            threshold = event.threshold,
            "alert"
        );
        println!(
            "{};{};{};{};{}",
            event.timestamp_unix,
            event.target,
            event.status_detail,
            if event.passing { "OK" } else { "ERR" },
            event.threshold
        );
    }
}
