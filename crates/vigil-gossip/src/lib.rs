//! vigil-gossip — append-only peer/target directory and pull-based exchange.
//!
//! Each agent keeps a [`Directory`] of known monitoring targets and known
//! peer agents. Directories only ever grow: merges add the elements not
//! already present (string equality) and report what was new, so a mesh of
//! agents converges on a shared view without a central registry.
//!
//! The wire shape is [`GossipPayload`]: a peer's advertised target and peer
//! lists, pulled over plain HTTP by [`GossipClient`]. Every pull carries
//! this node's own callback address so the remote side can reciprocally
//! register it.

pub mod client;
pub mod directory;
pub mod error;
pub mod payload;

pub use client::GossipClient;
pub use directory::Directory;
pub use error::{GossipError, GossipResult};
pub use payload::GossipPayload;
