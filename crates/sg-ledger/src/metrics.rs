//! # Ledger Metrics
//!
//! Prometheus counters for ledger operations.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! sg-ledger = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `sg_ledger_operations_total{operation}` - committed operations
//! - `sg_ledger_operations_rejected_total{operation}` - operations rolled back
//! - `sg_ledger_events_emitted_total` - events delivered to the sink
//!
//! A counter that fails to register (e.g. a duplicate name in the default
//! registry) is skipped rather than aborting the process.

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Committed operations, labeled by operation.
    pub static ref OPERATIONS: Option<IntCounterVec> = register_int_counter_vec!(
        "sg_ledger_operations_total",
        "Total number of committed ledger operations",
        &["operation"]
    )
    .ok();

    /// Rolled-back operations, labeled by operation.
    pub static ref OPERATIONS_REJECTED: Option<IntCounterVec> = register_int_counter_vec!(
        "sg_ledger_operations_rejected_total",
        "Total number of rejected ledger operations",
        &["operation"]
    )
    .ok();

    /// Events delivered.
    pub static ref EVENTS_EMITTED: Option<IntCounter> = register_int_counter!(
        "sg_ledger_events_emitted_total",
        "Total number of ledger events delivered"
    )
    .ok();
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a committed operation
#[cfg(feature = "metrics")]
pub fn record_operation(operation: &str) {
    if let Some(counter) = OPERATIONS.as_ref() {
        counter.with_label_values(&[operation]).inc();
    }
}

/// Record a rejected operation
#[cfg(feature = "metrics")]
pub fn record_rejected(operation: &str) {
    if let Some(counter) = OPERATIONS_REJECTED.as_ref() {
        counter.with_label_values(&[operation]).inc();
    }
}

/// Record delivered events
#[cfg(feature = "metrics")]
pub fn record_events_emitted(count: u64) {
    if let Some(counter) = EVENTS_EMITTED.as_ref() {
        counter.inc_by(count);
    }
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// Record a committed operation (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_operation(_operation: &str) {}

/// Record a rejected operation (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_rejected(_operation: &str) {}

/// Record delivered events (no-op)
#[cfg(not(feature = "metrics"))]
pub fn record_events_emitted(_count: u64) {}
