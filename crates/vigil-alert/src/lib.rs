//! vigil-alert — per-target hysteresis and debounced alert emission.
//!
//! The engine keeps one record per target that has ever been observed in a
//! non-passing state and emits an alert only once the same classification
//! key has persisted for a configured number of consecutive observations.
//!
//! # State machine (per target)
//!
//! ```text
//! Unrecorded ──first non-passing──▶ Tracking { key, streak, alerted }
//!     │                                 │
//!     └──passing observations──▶ stays Unrecorded (baseline optimism)
//!
//! Tracking: key change  ⇒ reset streak, re-arm (alerted = false)
//!           same key    ⇒ streak += 1
//!           streak ≥ threshold && !alerted ⇒ emit alert, latch alerted
//! ```
//!
//! Recovery is symmetric: a tracked target that stays passing for
//! `threshold` cycles emits a "now passing" alert exactly once.

pub mod engine;

pub use engine::{AlertEngine, AlertEvent, AlertRecord};
