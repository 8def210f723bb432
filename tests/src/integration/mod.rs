//! Integration flows.
//!
//! Each flow drives a [`sg_ledger::service::SocialLedgerService`] wired to a
//! tokio broadcast sink, the way an indexer would observe it.

pub mod flows;
