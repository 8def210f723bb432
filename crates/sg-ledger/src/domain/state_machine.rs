//! Protocol state machine.
//!
//! ```text
//!            ┌──────────────── governance ────────────────┐
//!            ↓                                            │
//!      [UNPAUSED] ── governance / emergency ──→ [PUBLISHING_PAUSED]
//!         ↑  │                                        │   ↑
//!         │  └──── governance / emergency ──→ [PAUSED] ───┘
//!         └──────────────── governance ─────────────┘
//! ```
//!
//! Every state is reachable from every other. Governance may set any state;
//! the emergency admin may only tighten (Paused, PublishingPaused).

use super::access::Role;
use crate::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol-wide operating state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolState {
    /// Everything enabled.
    #[default]
    Unpaused,
    /// Interactions allowed, new publications and profiles refused.
    PublishingPaused,
    /// All mutations refused.
    Paused,
}

impl ProtocolState {
    /// `whenNotPaused`: permits Unpaused and PublishingPaused.
    pub fn ensure_not_paused(self) -> Result<(), LedgerError> {
        match self {
            ProtocolState::Paused => Err(LedgerError::ProtocolPaused),
            ProtocolState::Unpaused | ProtocolState::PublishingPaused => Ok(()),
        }
    }

    /// `whenPublishingEnabled`: permits Unpaused only.
    pub fn ensure_publishing_enabled(self) -> Result<(), LedgerError> {
        match self {
            ProtocolState::Unpaused => Ok(()),
            ProtocolState::PublishingPaused => Err(LedgerError::PublishingDisabled),
            ProtocolState::Paused => Err(LedgerError::ProtocolPaused),
        }
    }

    /// Profile creation requires the fully unpaused state.
    pub fn ensure_unpaused(self) -> Result<(), LedgerError> {
        match self {
            ProtocolState::Unpaused => Ok(()),
            _ => Err(LedgerError::ProtocolPaused),
        }
    }

    /// Checks whether `role` may move the protocol into `target`.
    pub fn authorize_transition(role: Role, target: ProtocolState) -> Result<(), LedgerError> {
        match (role, target) {
            (Role::Governance, _) => Ok(()),
            (Role::EmergencyAdmin, ProtocolState::Unpaused) => {
                Err(LedgerError::EmergencyAdminCannotUnpause)
            }
            (Role::EmergencyAdmin, _) => Ok(()),
            (Role::Anyone, _) => Err(LedgerError::NotGovernanceOrEmergencyAdmin),
        }
    }
}

impl fmt::Display for ProtocolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProtocolState::Unpaused => "unpaused",
            ProtocolState::PublishingPaused => "publishing_paused",
            ProtocolState::Paused => "paused",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ProtocolState; 3] = [
        ProtocolState::Unpaused,
        ProtocolState::PublishingPaused,
        ProtocolState::Paused,
    ];

    #[test]
    fn test_gates() {
        assert!(ProtocolState::Unpaused.ensure_not_paused().is_ok());
        assert!(ProtocolState::PublishingPaused.ensure_not_paused().is_ok());
        assert_eq!(
            ProtocolState::Paused.ensure_not_paused(),
            Err(LedgerError::ProtocolPaused)
        );

        assert!(ProtocolState::Unpaused.ensure_publishing_enabled().is_ok());
        assert_eq!(
            ProtocolState::PublishingPaused.ensure_publishing_enabled(),
            Err(LedgerError::PublishingDisabled)
        );
        assert_eq!(
            ProtocolState::Paused.ensure_publishing_enabled(),
            Err(LedgerError::ProtocolPaused)
        );
    }

    #[test]
    fn test_governance_reaches_every_state() {
        for target in ALL {
            assert!(ProtocolState::authorize_transition(Role::Governance, target).is_ok());
        }
    }

    #[test]
    fn test_emergency_admin_can_only_tighten() {
        assert_eq!(
            ProtocolState::authorize_transition(Role::EmergencyAdmin, ProtocolState::Unpaused),
            Err(LedgerError::EmergencyAdminCannotUnpause)
        );
        assert!(
            ProtocolState::authorize_transition(Role::EmergencyAdmin, ProtocolState::Paused)
                .is_ok()
        );
        assert!(ProtocolState::authorize_transition(
            Role::EmergencyAdmin,
            ProtocolState::PublishingPaused
        )
        .is_ok());
    }

    #[test]
    fn test_anyone_else_is_refused() {
        for target in ALL {
            assert_eq!(
                ProtocolState::authorize_transition(Role::Anyone, target),
                Err(LedgerError::NotGovernanceOrEmergencyAdmin)
            );
        }
    }
}
