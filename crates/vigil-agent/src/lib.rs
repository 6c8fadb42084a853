//! vigil-agent — the coordinator actor owning directory and alert state.
//!
//! The coordinator is the sole owner of the gossip [`Directory`] and the
//! [`AlertEngine`]. On a fixed cadence it fans out concurrent work — one
//! probe task per known target, one gossip fetch per known peer — and
//! applies every result back to shared state one at a time, in arrival
//! order. Inbound self-registration from the HTTP surface travels through
//! the same mailbox, so no concurrent context ever touches the shared
//! structures directly.
//!
//! ```text
//! probe ticker ──┐                       ┌── http_probe tasks ──┐
//! gossip ticker ─┤                       ├── gossip fetch tasks ┤
//!                ▼                       ▼                      │
//!          Coordinator ──fan out──▶ tokio::spawn          Event channel
//!           (select!)◀──────────── apply one at a time ◀───────┘
//!                ▲
//! AgentHandle ───┘  (RegisterPeer / Snapshot commands)
//! ```
//!
//! Rounds iterate a *snapshot* of the directory: entries discovered while
//! a round is in flight are picked up from the next round on. Outstanding
//! tasks are not cancelled when the next tick fires; probe timeouts are
//! kept below the tick interval so stragglers stay rare.
//!
//! [`Directory`]: vigil_gossip::Directory
//! [`AlertEngine`]: vigil_alert::AlertEngine

pub mod config;
pub mod coordinator;

pub use config::AgentConfig;
pub use coordinator::{AgentHandle, Command, Coordinator};
