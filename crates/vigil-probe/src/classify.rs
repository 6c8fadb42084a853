//! Probe classification — pure policy mapping outcomes to health states.

use std::fmt;
use std::time::Duration;

use crate::probe::ProbeOutcome;

/// Discrete health classification of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Reached, 2xx, within the latency budget.
    Pass,
    /// Reached but degraded: non-2xx status or latency over budget.
    Warn,
    /// Unreachable.
    Fail,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Pass => write!(f, "PASS"),
            Classification::Warn => write!(f, "WARN"),
            Classification::Fail => write!(f, "FAIL"),
        }
    }
}

/// The alerting key: two probes are "the same state" only if both the
/// status code (or sentinel) and the passing flag match.
///
/// The full key is significant for streak resets: a 500→503 change that
/// stays WARN still resets the streak and re-arms alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassKey {
    /// Status code, `None` for the unreachable sentinel.
    pub code: Option<u16>,
    /// Whether the probe passed.
    pub passing: bool,
}

impl ClassKey {
    /// Derive the alerting key from an outcome and its passing flag.
    pub fn of(outcome: &ProbeOutcome, passing: bool) -> Self {
        Self {
            code: outcome.status,
            passing,
        }
    }
}

/// Classify a probe outcome against a latency budget.
///
/// Ordering matters: a latency breach takes precedence over a nominally
/// successful status code.
pub fn classify(outcome: &ProbeOutcome, latency_budget: Duration) -> (Classification, bool) {
    let Some(code) = outcome.status else {
        return (Classification::Fail, false);
    };

    if outcome.elapsed > latency_budget {
        return (Classification::Warn, false);
    }

    if !(200..300).contains(&code) {
        return (Classification::Warn, false);
    }

    (Classification::Pass, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET: Duration = Duration::from_secs(1);

    fn outcome(status: Option<u16>, elapsed_ms: u64) -> ProbeOutcome {
        ProbeOutcome {
            target: "http://svc.example/health".to_string(),
            status,
            elapsed: Duration::from_millis(elapsed_ms),
        }
    }

    #[test]
    fn sentinel_is_fail() {
        let (class, passing) = classify(&outcome(None, 50), BUDGET);
        assert_eq!(class, Classification::Fail);
        assert!(!passing);
    }

    #[test]
    fn fast_ok_is_pass() {
        let (class, passing) = classify(&outcome(Some(200), 50), BUDGET);
        assert_eq!(class, Classification::Pass);
        assert!(passing);
    }

    #[test]
    fn non_success_status_is_warn() {
        let (class, passing) = classify(&outcome(Some(500), 50), BUDGET);
        assert_eq!(class, Classification::Warn);
        assert!(!passing);

        let (class, _) = classify(&outcome(Some(302), 50), BUDGET);
        assert_eq!(class, Classification::Warn);
    }

    #[test]
    fn slow_success_is_warn() {
        // Latency breach wins even on 200.
        let (class, passing) = classify(&outcome(Some(200), 1500), BUDGET);
        assert_eq!(class, Classification::Warn);
        assert!(!passing);
    }

    #[test]
    fn any_2xx_passes() {
        let (class, passing) = classify(&outcome(Some(204), 10), BUDGET);
        assert_eq!(class, Classification::Pass);
        assert!(passing);
    }

    #[test]
    fn key_distinguishes_codes_with_same_flag() {
        let a = ClassKey::of(&outcome(Some(500), 10), false);
        let b = ClassKey::of(&outcome(Some(503), 10), false);
        assert_ne!(a, b);
    }

    #[test]
    fn key_distinguishes_sentinel_from_status() {
        let a = ClassKey::of(&outcome(None, 10), false);
        let b = ClassKey::of(&outcome(Some(500), 10), false);
        assert_ne!(a, b);
    }
}
