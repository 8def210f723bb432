//! Policy module implementations keyed by their whitelisted address.

use crate::domain::value_objects::Address;
use crate::errors::LedgerError;
use crate::ports::outbound::{CollectModule, FollowModule, ReferenceModule};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Registered policy modules.
///
/// Whitelisting is ledger state and is checked separately; the registry
/// only maps an address to the code that runs for it.
#[derive(Default, Clone)]
pub struct ModuleRegistry {
    follow: HashMap<Address, Arc<dyn FollowModule>>,
    collect: HashMap<Address, Arc<dyn CollectModule>>,
    reference: HashMap<Address, Arc<dyn ReferenceModule>>,
}

impl ModuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a follow module at `address`.
    #[must_use]
    pub fn with_follow_module(mut self, address: Address, module: Arc<dyn FollowModule>) -> Self {
        self.follow.insert(address, module);
        self
    }

    /// Registers a collect module at `address`.
    #[must_use]
    pub fn with_collect_module(mut self, address: Address, module: Arc<dyn CollectModule>) -> Self {
        self.collect.insert(address, module);
        self
    }

    /// Registers a reference module at `address`.
    #[must_use]
    pub fn with_reference_module(mut self, address: Address, module: Arc<dyn ReferenceModule>) -> Self {
        self.reference.insert(address, module);
        self
    }

    pub(crate) fn follow_module(&self, address: Address) -> Result<&Arc<dyn FollowModule>, LedgerError> {
        self.follow
            .get(&address)
            .ok_or(LedgerError::ModuleNotRegistered(address))
    }

    pub(crate) fn collect_module(&self, address: Address) -> Result<&Arc<dyn CollectModule>, LedgerError> {
        self.collect
            .get(&address)
            .ok_or(LedgerError::ModuleNotRegistered(address))
    }

    pub(crate) fn reference_module(&self, address: Address) -> Result<&Arc<dyn ReferenceModule>, LedgerError> {
        self.reference
            .get(&address)
            .ok_or(LedgerError::ModuleNotRegistered(address))
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("follow", &self.follow.keys().collect::<Vec<_>>())
            .field("collect", &self.collect.keys().collect::<Vec<_>>())
            .field("reference", &self.reference.keys().collect::<Vec<_>>())
            .finish()
    }
}
