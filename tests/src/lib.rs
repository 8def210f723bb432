//! # SG Test Suite
//!
//! Cross-crate flows that exercise the ledger together with its real
//! adapters and the telemetry setup.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end flows through SocialGraphApi
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sg-tests
//! cargo test -p sg-tests integration::
//! ```

pub mod integration;
