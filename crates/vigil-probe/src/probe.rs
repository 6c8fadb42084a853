//! Probe execution — one bounded HTTP GET per call.

use std::time::{Duration, Instant};

use tracing::debug;

/// Result of a single probe against one target.
///
/// `status: None` is the failure sentinel: the target could not be reached
/// at all (connect error, handshake error, request error, or timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The probed target URL.
    pub target: String,
    /// HTTP status code, or `None` when the target was unreachable.
    pub status: Option<u16>,
    /// Wall time spent on the probe, including failed attempts.
    pub elapsed: Duration,
}

impl ProbeOutcome {
    /// Whether the target answered at all.
    pub fn reachable(&self) -> bool {
        self.status.is_some()
    }

    /// Status code as text for alert output; `-1` when unreachable.
    pub fn status_detail(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "-1".to_string(),
        }
    }
}

/// Perform one HTTP probe against a target URL.
///
/// Issues a single GET with a bounded wait and returns the outcome. Every
/// failure mode yields the sentinel outcome rather than an error, with the
/// elapsed time measured up to the point of failure.
pub async fn http_probe(target: &str, timeout: Duration) -> ProbeOutcome {
    let start = Instant::now();

    let status = match tokio::time::timeout(timeout, request_status(target)).await {
        Ok(status) => status,
        Err(_) => {
            debug!(%target, ?timeout, "probe timed out");
            None
        }
    };

    ProbeOutcome {
        target: target.to_string(),
        status,
        elapsed: start.elapsed(),
    }
}

/// Issue the GET and return the response status, or `None` on any failure.
async fn request_status(target: &str) -> Option<u16> {
    let uri: http::Uri = match target.parse() {
        Ok(uri) => uri,
        Err(e) => {
            debug!(error = %e, %target, "probe target is not a valid URL");
            return None;
        }
    };

    let authority = uri.authority()?.clone();
    let host = authority.host();
    let port = uri.port_u16().unwrap_or(80);
    let address = format!("{host}:{port}");

    let stream = match tokio::net::TcpStream::connect(&address).await {
        Ok(s) => s,
        Err(e) => {
            debug!(error = %e, %target, "probe connection failed");
            return None;
        }
    };

    let io = hyper_util::rt::TokioIo::new(stream);
    let (mut sender, conn) = match hyper::client::conn::http1::handshake(io).await {
        Ok(pair) => pair,
        Err(e) => {
            debug!(error = %e, %target, "probe handshake failed");
            return None;
        }
    };

    // Drive the connection in the background.
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let req = http::Request::builder()
        .method("GET")
        .uri(target)
        .header("host", authority.as_str())
        .header("user-agent", "vigil-probe/0.1")
        .body(http_body_util::Empty::<bytes::Bytes>::new())
        .ok()?;

    match sender.send_request(req).await {
        Ok(resp) => Some(resp.status().as_u16()),
        Err(e) => {
            debug!(error = %e, %target, "probe request failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn probe_to_closed_port_returns_sentinel() {
        // Port 1 won't be listening.
        let outcome = http_probe("http://127.0.0.1:1/healthz", Duration::from_millis(200)).await;
        assert_eq!(outcome.status, None);
        assert!(!outcome.reachable());
        assert_eq!(outcome.status_detail(), "-1");
    }

    #[tokio::test]
    async fn probe_invalid_url_returns_sentinel() {
        let outcome = http_probe("not a url", Duration::from_millis(200)).await;
        assert_eq!(outcome.status, None);
    }

    #[tokio::test]
    async fn probe_reports_real_status() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            use tokio::io::{AsyncReadExt, AsyncWriteExt};
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf).await;
            let _ = stream
                .write_all(b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\n\r\n")
                .await;
        });

        let outcome = http_probe(&format!("http://{addr}/"), Duration::from_secs(2)).await;
        assert_eq!(outcome.status, Some(503));
        assert!(outcome.reachable());
        assert_eq!(outcome.status_detail(), "503");
    }

    #[tokio::test]
    async fn probe_times_out_on_silent_server() {
        // Never accepted: the connection sits in the backlog and the probe
        // waits on a response that never comes.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let outcome = http_probe(&format!("http://{addr}/"), Duration::from_millis(200)).await;
        assert_eq!(outcome.status, None);
        assert!(outcome.elapsed >= Duration::from_millis(200));
    }
}
