//! Directory — the append-only sets of known peers and targets.

use crate::payload::GossipPayload;

/// The node-local view of what to monitor and who else is monitoring.
///
/// Both sets are append-only for the life of the process and deduplicated
/// by exact string equality. A peer that goes offline remains listed; there
/// is no liveness eviction. Insertion order is preserved so probe and
/// gossip rounds iterate deterministically.
#[derive(Debug)]
pub struct Directory {
    /// This node's own callback address, never merged into `peers`.
    self_callback: String,
    peers: Vec<String>,
    targets: Vec<String>,
}

impl Directory {
    /// Create a directory from seed lists.
    ///
    /// Seeds go through the same dedup rules as gossip payloads, so
    /// duplicate or self-referencing seeds are harmless.
    pub fn new(
        self_callback: &str,
        seed_targets: Vec<String>,
        seed_peers: Vec<String>,
    ) -> Self {
        let mut directory = Self {
            self_callback: self_callback.to_string(),
            peers: Vec::new(),
            targets: Vec::new(),
        };
        directory.merge_targets(&seed_targets);
        directory.merge_peers(&seed_peers);
        directory
    }

    /// Merge incoming targets, returning the ones newly added.
    pub fn merge_targets(&mut self, incoming: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for target in incoming {
            if !self.targets.contains(target) {
                self.targets.push(target.clone());
                added.push(target.clone());
            }
        }
        added
    }

    /// Merge incoming peers, returning the ones newly added.
    ///
    /// This node's own callback is filtered out: an agent does not gossip
    /// with itself even after a neighbor echoes its address back.
    pub fn merge_peers(&mut self, incoming: &[String]) -> Vec<String> {
        let mut added = Vec::new();
        for peer in incoming {
            if *peer != self.self_callback && !self.peers.contains(peer) {
                self.peers.push(peer.clone());
                added.push(peer.clone());
            }
        }
        added
    }

    /// Self-registration: a peer announced its own callback address
    /// through an inbound request. Returns whether it was new.
    pub fn register_peer(&mut self, callback: &str) -> bool {
        if callback == self.self_callback || self.peers.iter().any(|p| p == callback) {
            return false;
        }
        self.peers.push(callback.to_string());
        true
    }

    /// The current directory as a gossip payload.
    pub fn snapshot(&self) -> GossipPayload {
        GossipPayload {
            targets: self.targets.clone(),
            peers: self.peers.clone(),
        }
    }

    /// Known targets, in insertion order.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Known peers, in insertion order.
    pub fn peers(&self) -> &[String] {
        &self.peers
    }
}
