//! # Error Types
//!
//! Every failure an operation can surface. Failed operations are
//! all-or-nothing: whenever a [`LedgerError`] is returned the ledger is left
//! exactly as it was before the call.

use crate::config::ConfigError;
use crate::domain::value_objects::{ActionKind, Address, ProfileId, PublicationRef, Revision};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors returned by ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    // --- identity ---
    /// Handle is already reserved by a live profile.
    #[error("handle already taken: {handle}")]
    HandleTaken {
        /// The requested handle.
        handle: String,
    },

    /// Handle length outside the allowed range.
    #[error("handle length {len} outside 1..={max}")]
    HandleLengthInvalid {
        /// Length of the requested handle in bytes.
        len: usize,
        /// Configured maximum handle length.
        max: usize,
    },

    /// Handle contains characters outside `[a-z0-9._-]`.
    #[error("handle contains invalid characters: {handle}")]
    HandleContainsInvalidCharacters {
        /// The requested handle.
        handle: String,
    },

    /// Profile was never created or has been burned.
    #[error("profile does not exist: {0}")]
    ProfileDoesNotExist(ProfileId),

    /// Publication was never created.
    #[error("publication does not exist: {0}")]
    PublicationDoesNotExist(PublicationRef),

    /// URI exceeds the configured length limit.
    #[error("uri too long: {len} > {max}")]
    UriTooLong {
        /// Length of the submitted URI in bytes.
        len: usize,
        /// Configured maximum URI length.
        max: usize,
    },

    /// The zero address is not a valid owner, dispatcher target or role.
    #[error("zero address")]
    ZeroAddress,

    // --- interactions ---
    /// Profile id and module data arrays differ in length.
    #[error("array length mismatch: {profiles} profile ids, {data} data entries")]
    ArrayMismatch {
        /// Number of profile ids supplied.
        profiles: usize,
        /// Number of module data entries supplied.
        data: usize,
    },

    /// Actor has already voted on this publication in either direction.
    #[error("already voted")]
    AlreadyVoted,

    /// Actor has already performed this action on this publication.
    #[error("already {kind}")]
    AlreadyActed {
        /// The repeated action.
        kind: ActionKind,
    },

    /// Stake amount must be positive.
    #[error("stake amount must be positive")]
    ZeroStakeAmount,

    /// Bet is resolved or past its deadline.
    #[error("bet closed on {0}")]
    BetClosed(PublicationRef),

    /// Bet has no deadline or the deadline has not passed yet.
    #[error("bet on {0} cannot be resolved yet")]
    BetNotResolvable(PublicationRef),

    /// Bet already has a correct option.
    #[error("bet on {0} already resolved")]
    BetAlreadyResolved(PublicationRef),

    // --- scoring ---
    /// Reputation needs a recommendation ratio but none were attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// A score, counter or amount would overflow.
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// Factor table revision was never written.
    #[error("unknown revision: {0}")]
    UnknownRevision(Revision),

    // --- protocol state ---
    /// Operation requires a state other than Paused.
    #[error("protocol paused")]
    ProtocolPaused,

    /// Publishing is paused.
    #[error("publishing disabled")]
    PublishingDisabled,

    // --- access ---
    /// Caller is not the profile owner.
    #[error("not profile owner")]
    NotProfileOwner,

    /// Caller is neither the profile owner nor its dispatcher.
    #[error("not profile owner or dispatcher")]
    NotProfileOwnerOrDispatcher,

    /// Caller is not governance.
    #[error("not governance")]
    NotGovernance,

    /// Caller is neither governance nor the emergency admin.
    #[error("not governance or emergency admin")]
    NotGovernanceOrEmergencyAdmin,

    /// Emergency admin tried to move the protocol to Unpaused.
    #[error("emergency admin cannot unpause")]
    EmergencyAdminCannotUnpause,

    // --- whitelists and modules ---
    /// Caller may not create profiles.
    #[error("profile creator not whitelisted: {0:?}")]
    ProfileCreatorNotWhitelisted(Address),

    /// Follow module is not whitelisted.
    #[error("follow module not whitelisted: {0:?}")]
    FollowModuleNotWhitelisted(Address),

    /// Collect module is not whitelisted.
    #[error("collect module not whitelisted: {0:?}")]
    CollectModuleNotWhitelisted(Address),

    /// Reference module is not whitelisted.
    #[error("reference module not whitelisted: {0:?}")]
    ReferenceModuleNotWhitelisted(Address),

    /// Staking currency is not whitelisted.
    #[error("currency not whitelisted: {0:?}")]
    CurrencyNotWhitelisted(Address),

    /// Module is whitelisted but no implementation is registered for it.
    #[error("module not registered: {0:?}")]
    ModuleNotRegistered(Address),

    /// A policy module refused the operation.
    #[error("module {module:?} rejected: {source}")]
    ModuleRejected {
        /// Address the module is registered under.
        module: Address,
        /// Reason reported by the module.
        #[source]
        source: ModuleError,
    },

    /// Transfer into custody failed.
    #[error("token transfer failed: {0}")]
    TokenTransferFailed(#[from] TransferError),

    // --- storage and setup ---
    /// Storage backend failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Service constructed with an invalid configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl LedgerError {
    /// Wraps a module failure with the module's address.
    #[must_use]
    pub fn module_rejected(module: Address, source: ModuleError) -> Self {
        Self::ModuleRejected { module, source }
    }

    /// Returns true for authorization and protocol-state gate failures.
    #[must_use]
    pub fn is_gate_failure(&self) -> bool {
        matches!(
            self,
            Self::ProtocolPaused
                | Self::PublishingDisabled
                | Self::NotProfileOwner
                | Self::NotProfileOwnerOrDispatcher
                | Self::NotGovernance
                | Self::NotGovernanceOrEmergencyAdmin
                | Self::EmergencyAdminCannotUnpause
        )
    }
}

// =============================================================================
// COLLABORATOR ERRORS
// =============================================================================

/// Errors from the ledger store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A transaction is already open.
    #[error("transaction already in progress")]
    TransactionInProgress,

    /// Commit or rollback without an open transaction.
    #[error("no transaction in progress")]
    NoTransaction,

    /// Stored data violates a ledger invariant.
    #[error("store corrupted: {0}")]
    Corrupted(String),
}

/// Errors raised by policy modules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModuleError {
    /// Module refused the operation.
    #[error("{0}")]
    Rejected(String),

    /// Module could not decode its data payload.
    #[error("invalid module data: {0}")]
    InvalidData(String),
}

/// Errors raised by the token transfer capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Payer balance too low.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the transfer needs.
        required: u128,
        /// Amount the payer holds.
        available: u128,
    },

    /// Token refused the transfer.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_rejected_display_includes_reason() {
        let err = LedgerError::module_rejected(
            Address::repeat_byte(0x11),
            ModuleError::Rejected("not approved".into()),
        );
        assert!(err.to_string().ends_with("rejected: not approved"));
    }

    #[test]
    fn test_gate_failures() {
        assert!(LedgerError::ProtocolPaused.is_gate_failure());
        assert!(LedgerError::NotGovernance.is_gate_failure());
        assert!(!LedgerError::AlreadyVoted.is_gate_failure());
    }

    #[test]
    fn test_store_error_converts() {
        let err: LedgerError = StoreError::NoTransaction.into();
        assert_eq!(err, LedgerError::Store(StoreError::NoTransaction));
    }
}
