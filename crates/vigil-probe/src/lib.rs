//! vigil-probe — single-shot HTTP health checks and probe classification.
//!
//! The prober issues exactly one GET against a target URL with a bounded
//! wait and reports a [`ProbeOutcome`]. A probe never fails as an error:
//! unreachable targets and timeouts degrade into the failure sentinel
//! (`status: None`), which is distinguishable from any real HTTP status so
//! the classifier can tell "could not reach" apart from "reached but
//! unhealthy".
//!
//! Classification is a pure policy over an outcome:
//!
//! ```text
//! sentinel            ⇒ FAIL  (not passing)
//! elapsed over budget ⇒ WARN  (not passing, even on 2xx)
//! non-2xx status      ⇒ WARN  (not passing)
//! otherwise           ⇒ PASS  (passing)
//! ```
//!
//! No retries live here; retry policy is the coordinator's next round.

pub mod classify;
pub mod probe;

pub use classify::{classify, ClassKey, Classification};
pub use probe::{http_probe, ProbeOutcome};
