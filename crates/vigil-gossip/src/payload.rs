//! The gossip wire shape.

use serde::{Deserialize, Serialize};

/// A peer's advertised lists, exchanged between agents.
///
/// Order is insignificant and duplicates across agents are expected; both
/// are handled at merge time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GossipPayload {
    /// Target URLs the advertising peer monitors.
    pub targets: Vec<String>,
    /// Callback URLs of agents the advertising peer knows.
    pub peers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips_as_json() {
        let payload = GossipPayload {
            targets: vec!["http://svc.example/health".to_string()],
            peers: vec!["http://10.0.0.2:9999".to_string()],
        };

        let json = serde_json::to_string(&payload).unwrap();
        let back: GossipPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn missing_fields_decode_as_error() {
        // Both lists are required on the wire; a bare object is malformed.
        assert!(serde_json::from_str::<GossipPayload>("{}").is_err());
    }
}
