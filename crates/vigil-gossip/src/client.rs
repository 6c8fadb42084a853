//! Gossip pull client — fetches a peer's advertised lists over HTTP.

use std::time::Duration;

use http_body_util::BodyExt;
use tracing::debug;

use crate::error::{GossipError, GossipResult};
use crate::payload::GossipPayload;

/// Pulls gossip payloads from peers.
///
/// One GET per exchange: `{peer}/gossip?callback={self}`. The callback
/// parameter lets the remote peer reciprocally register this node.
#[derive(Debug, Clone)]
pub struct GossipClient {
    timeout: Duration,
}

impl GossipClient {
    /// Create a client with a per-exchange timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Fetch a peer's advertised targets and peers.
    ///
    /// Any failure means this exchange round contributes nothing; the
    /// caller keeps the peer listed for future rounds.
    pub async fn fetch_payload(
        &self,
        peer: &str,
        self_callback: &str,
    ) -> GossipResult<GossipPayload> {
        let url = format!("{peer}/gossip?callback={self_callback}");

        match tokio::time::timeout(self.timeout, fetch(peer, &url)).await {
            Ok(result) => result,
            Err(_) => {
                debug!(%peer, "gossip exchange timed out");
                Err(GossipError::Timeout)
            }
        }
    }
}

async fn fetch(peer: &str, url: &str) -> GossipResult<GossipPayload> {
    let uri: http::Uri = peer
        .parse()
        .map_err(|e: http::uri::InvalidUri| GossipError::Address(e.to_string()))?;
    let authority = uri
        .authority()
        .ok_or_else(|| GossipError::Address(format!("no authority in {peer}")))?
        .clone();
    let host = authority.host();
    let port = uri.port_u16().unwrap_or(80);

    let stream = tokio::net::TcpStream::connect(format!("{host}:{port}"))
        .await
        .map_err(|e| GossipError::Connect(e.to_string()))?;

    let io = hyper_util::rt::TokioIo::new(stream);
    let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(|e| GossipError::Http(e.to_string()))?;

    // Drive the connection in the background.
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let req = http::Request::builder()
        .method("GET")
        .uri(url)
        .header("host", authority.as_str())
        .header("user-agent", "vigil-gossip/0.1")
        .body(http_body_util::Empty::<bytes::Bytes>::new())
        .map_err(|e| GossipError::Http(e.to_string()))?;

    let resp = sender
        .send_request(req)
        .await
        .map_err(|e| GossipError::Http(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(GossipError::Status(resp.status().as_u16()));
    }

    let body = resp
        .into_body()
        .collect()
        .await
        .map_err(|e| GossipError::Http(e.to_string()))?
        .to_bytes();

    serde_json::from_slice(&body).map_err(|e| GossipError::Decode(e.to_string()))
}
