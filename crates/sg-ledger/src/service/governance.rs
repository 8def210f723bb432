//! Protocol state, roles, whitelists and factor tables.

use super::SocialLedgerService;
use crate::domain::access::AccessPolicy;
use crate::domain::scoring::{ActionFactors, ReputationFactors};
use crate::domain::state_machine::ProtocolState;
use crate::domain::value_objects::{Address, Revision, WhitelistKind};
use crate::errors::{LedgerError, LedgerResult};
use crate::events::LedgerEvent;
use crate::ports::outbound::{Clock, EventSink, LedgerStore};
use tracing::{info, instrument, warn};

impl<S: LedgerStore, E: EventSink, C: Clock> SocialLedgerService<S, E, C> {
    /// Moves the protocol state machine.
    ///
    /// Governance may choose any state; the emergency admin may only pause.
    #[instrument(skip(self))]
    pub fn set_state(&self, caller: Address, state: ProtocolState) -> LedgerResult<()> {
        let previous = self.atomically("set_state", |ctx| {
            let mut settings = self.settings()?;
            let role = AccessPolicy::role_of(&settings, caller);
            ProtocolState::authorize_transition(role, state)?;
            let previous = settings.state;
            settings.state = state;
            self.store.put_settings(settings)?;
            ctx.emit(LedgerEvent::StateChanged {
                caller,
                previous,
                new: state,
            });
            Ok(previous)
        })?;
        if state == ProtocolState::Unpaused {
            info!(previous = %previous, "Protocol unpaused");
        } else {
            warn!(previous = %previous, new = %state, "Protocol state changed");
        }
        Ok(())
    }

    /// Replaces governance.
    #[instrument(skip(self))]
    pub fn set_governance(&self, caller: Address, governance: Address) -> LedgerResult<()> {
        self.atomically("set_governance", |ctx| {
            let mut settings = self.settings()?;
            AccessPolicy::require_governance(&settings, caller)?;
            if governance.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }
            let previous = std::mem::replace(&mut settings.governance, governance);
            self.store.put_settings(settings)?;
            ctx.emit(LedgerEvent::GovernanceSet {
                caller,
                previous,
                new: governance,
            });
            Ok(())
        })?;
        info!(governance = %governance, "Governance replaced");
        Ok(())
    }

    /// Appoints or removes the emergency admin.
    #[instrument(skip(self))]
    pub fn set_emergency_admin(&self, caller: Address, admin: Option<Address>) -> LedgerResult<()> {
        self.atomically("set_emergency_admin", |ctx| {
            let mut settings = self.settings()?;
            AccessPolicy::require_governance(&settings, caller)?;
            if admin.is_some_and(|a| a.is_zero()) {
                return Err(LedgerError::ZeroAddress);
            }
            let previous = std::mem::replace(&mut settings.emergency_admin, admin);
            self.store.put_settings(settings)?;
            ctx.emit(LedgerEvent::EmergencyAdminSet {
                caller,
                previous,
                new: admin,
            });
            Ok(())
        })
    }

    /// Adds or removes a whitelist entry.
    #[instrument(skip(self))]
    pub fn set_whitelisted(
        &self,
        caller: Address,
        kind: WhitelistKind,
        address: Address,
        whitelisted: bool,
    ) -> LedgerResult<()> {
        self.atomically("set_whitelisted", |ctx| {
            AccessPolicy::require_governance(&self.settings()?, caller)?;
            if address.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }
            self.store.set_whitelisted(kind, address, whitelisted)?;
            ctx.emit(LedgerEvent::WhitelistUpdated {
                kind,
                address,
                whitelisted,
            });
            Ok(())
        })
    }

    /// Writes action weights for `revision`. Does not activate it.
    #[instrument(skip(self, factors))]
    pub fn set_action_factors(&self, caller: Address, revision: Revision, factors: ActionFactors) -> LedgerResult<()> {
        self.atomically("set_action_factors", |ctx| {
            AccessPolicy::require_governance(&self.settings()?, caller)?;
            self.store.put_action_factors(revision, factors)?;
            ctx.emit(LedgerEvent::ActionFactorsSet { revision, factors });
            Ok(())
        })
    }

    /// Writes reputation weights for `revision`. Does not activate it.
    #[instrument(skip(self, factors))]
    pub fn set_reputation_factors(
        &self,
        caller: Address,
        revision: Revision,
        factors: ReputationFactors,
    ) -> LedgerResult<()> {
        self.atomically("set_reputation_factors", |ctx| {
            AccessPolicy::require_governance(&self.settings()?, caller)?;
            self.store.put_reputation_factors(revision, factors)?;
            ctx.emit(LedgerEvent::ReputationFactorsSet { revision, factors });
            Ok(())
        })
    }

    /// Activates `revision`. Both of its factor tables must have been written.
    #[instrument(skip(self))]
    pub fn set_current_revision(&self, caller: Address, revision: Revision) -> LedgerResult<()> {
        self.atomically("set_current_revision", |ctx| {
            let mut settings = self.settings()?;
            AccessPolicy::require_governance(&settings, caller)?;
            if self.store.action_factors(revision)?.is_none()
                || self.store.reputation_factors(revision)?.is_none()
            {
                return Err(LedgerError::UnknownRevision(revision));
            }
            let previous = std::mem::replace(&mut settings.current_revision, revision);
            self.store.put_settings(settings)?;
            ctx.emit(LedgerEvent::RevisionActivated {
                previous,
                new: revision,
            });
            Ok(())
        })?;
        info!(revision = %revision, "Factor revision activated");
        Ok(())
    }
}
