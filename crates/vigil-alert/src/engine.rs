//! The hysteresis transition function and alert records.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::debug;

use vigil_probe::ClassKey;

/// Tracking state for one target.
///
/// Created lazily on the first non-passing observation and never deleted;
/// a target whose every observation has passed has no record at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertRecord {
    /// The classification key of the current streak.
    pub key: ClassKey,
    /// Whether an alert has already fired for this streak.
    pub alerted: bool,
    /// Consecutive observations of `key`.
    pub streak: u32,
}

/// A debounced alert produced by the engine.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AlertEvent {
    /// Unix timestamp (seconds) of emission.
    pub timestamp_unix: u64,
    /// The target the alert concerns.
    pub target: String,
    /// Status code as text, `-1` when the target was unreachable.
    pub status_detail: String,
    /// Whether the sustained state is passing (recovery) or failing.
    pub passing: bool,
    /// Length of the streak that triggered the alert.
    pub streak: u32,
    /// The threshold in effect when the alert fired.
    pub threshold: u32,
}

/// Per-target alert hysteresis.
///
/// Owns every [`AlertRecord`]; callers feed classified observations through
/// [`observe`](AlertEngine::observe) and emit whatever events come back.
#[derive(Debug)]
pub struct AlertEngine {
    records: HashMap<String, AlertRecord>,
    threshold: u32,
}

impl AlertEngine {
    /// Create an engine with the given consecutive-observation threshold.
    pub fn new(threshold: u32) -> Self {
        Self {
            records: HashMap::new(),
            threshold,
        }
    }

    /// Feed one classified observation for a target.
    ///
    /// Returns the alert to emit, if the observation completed a streak of
    /// `threshold` identical keys that has not alerted yet.
    pub fn observe(
        &mut self,
        target: &str,
        key: ClassKey,
        status_detail: &str,
    ) -> Option<AlertEvent> {
        let record = match self.records.entry(target.to_string()) {
            // A healthy target never starts tracking.
            Entry::Vacant(_) if key.passing => return None,
            Entry::Vacant(vacant) => {
                debug!(%target, ?key, "tracking started");
                vacant.insert(AlertRecord {
                    key,
                    alerted: false,
                    streak: 0,
                })
            }
            Entry::Occupied(occupied) => occupied.into_mut(),
        };

        // Any key change, including recovery to passing, restarts the
        // streak and re-arms alerting.
        if record.key != key {
            debug!(%target, old = ?record.key, new = ?key, "state changed, streak reset");
            record.key = key;
            record.alerted = false;
            record.streak = 0;
        }

        record.streak += 1;

        if record.streak >= self.threshold && !record.alerted {
            record.alerted = true;
            return Some(AlertEvent {
                timestamp_unix: epoch_secs(),
                target: target.to_string(),
                status_detail: status_detail.to_string(),
                passing: key.passing,
                streak: record.streak,
                threshold: self.threshold,
            });
        }

        None
    }

    /// The record for a target, if it has ever been tracked.
    pub fn record(&self, target: &str) -> Option<&AlertRecord> {
        self.records.get(target)
    }

    /// Number of targets currently being tracked.
    pub fn tracked_count(&self) -> usize {
        self.records.len()
    }

    /// The configured threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
