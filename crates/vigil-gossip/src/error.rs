//! Gossip exchange error types.

use thiserror::Error;

/// Result type alias for gossip exchange operations.
pub type GossipResult<T> = Result<T, GossipError>;

/// Errors that can occur while pulling a peer's gossip payload.
///
/// All of these are transport failures recovered locally: the round simply
/// contributes nothing and the peer stays listed for future rounds.
#[derive(Debug, Error)]
pub enum GossipError {
    #[error("peer unreachable: {0}")]
    Connect(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("peer returned status {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Decode(String),

    #[error("exchange timed out")]
    Timeout,

    #[error("invalid peer address: {0}")]
    Address(String),
}
