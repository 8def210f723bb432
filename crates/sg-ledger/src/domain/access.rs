//! # Access Policy
//!
//! Caller authorization: profile owner, delegated dispatcher, governance and
//! emergency admin.

use super::entities::{Profile, ProtocolSettings};
use super::value_objects::Address;
use crate::errors::LedgerError;

/// Protocol-level role of a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// The governance address.
    Governance,
    /// The emergency admin.
    EmergencyAdmin,
    /// Any other address.
    Anyone,
}

/// Stateless authorization checks.
pub struct AccessPolicy;

impl AccessPolicy {
    /// Resolves the protocol role of `caller`. Governance wins if both match.
    #[must_use]
    pub fn role_of(settings: &ProtocolSettings, caller: Address) -> Role {
        if caller == settings.governance {
            Role::Governance
        } else if settings.emergency_admin == Some(caller) {
            Role::EmergencyAdmin
        } else {
            Role::Anyone
        }
    }

    /// Requires `caller` to be governance.
    pub fn require_governance(settings: &ProtocolSettings, caller: Address) -> Result<(), LedgerError> {
        if caller == settings.governance {
            Ok(())
        } else {
            Err(LedgerError::NotGovernance)
        }
    }

    /// Requires `caller` to own `profile`.
    pub fn require_owner(profile: &Profile, caller: Address) -> Result<(), LedgerError> {
        if profile.is_owner(caller) {
            Ok(())
        } else {
            Err(LedgerError::NotProfileOwner)
        }
    }

    /// Requires `caller` to own `profile` or be its dispatcher.
    pub fn require_owner_or_dispatcher(profile: &Profile, caller: Address) -> Result<(), LedgerError> {
        if profile.is_owner_or_dispatcher(caller) {
            Ok(())
        } else {
            Err(LedgerError::NotProfileOwnerOrDispatcher)
        }
    }
}
