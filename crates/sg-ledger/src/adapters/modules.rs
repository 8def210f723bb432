//! # Reference Policy Modules
//!
//! Small [`FollowModule`], [`CollectModule`] and [`ReferenceModule`]
//! implementations. Initialisation payloads are JSON.
//!
//! Module-internal bookkeeping lives outside the ledger transaction, so each
//! module only mutates its own state once it has decided to accept.

use crate::domain::value_objects::{Address, ProfileId, PubId, PublicationRef};
use crate::errors::ModuleError;
use crate::ports::outbound::{CollectModule, FollowGraph, FollowModule, ReferenceModule};
use parking_lot::RwLock;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

fn decode<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, ModuleError> {
    serde_json::from_slice(data).map_err(|e| ModuleError::InvalidData(e.to_string()))
}

// =============================================================================
// COLLECT MODULES
// =============================================================================

/// Lets anyone collect.
#[derive(Debug, Default, Clone, Copy)]
pub struct FreeCollectModule;

impl CollectModule for FreeCollectModule {
    fn initialize_publication_collect_module(
        &self,
        _profile_id: ProfileId,
        _pub_id: PubId,
        _data: &[u8],
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    fn process_collect(
        &self,
        _referrer_profile_id: ProfileId,
        _collector: Address,
        _root_profile_id: ProfileId,
        _root_pub_id: PubId,
        _data: &[u8],
    ) -> Result<(), ModuleError> {
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct LimitedCollectInit {
    collect_limit: u64,
}

#[derive(Debug, Default, Clone, Copy)]
struct CollectAllowance {
    limit: u64,
    collected: u64,
}

/// Caps the number of collects per publication.
///
/// Init data: `{"collect_limit": <n>}` with `n > 0`.
#[derive(Debug, Default)]
pub struct LimitedCollectModule {
    allowances: RwLock<HashMap<PublicationRef, CollectAllowance>>,
}

impl LimitedCollectModule {
    /// Creates the module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects accepted so far for a publication.
    #[must_use]
    pub fn collected(&self, publication: PublicationRef) -> u64 {
        self.allowances
            .read()
            .get(&publication)
            .map_or(0, |a| a.collected)
    }
}

impl CollectModule for LimitedCollectModule {
    fn initialize_publication_collect_module(
        &self,
        profile_id: ProfileId,
        pub_id: PubId,
        data: &[u8],
    ) -> Result<(), ModuleError> {
        let init: LimitedCollectInit = decode(data)?;
        if init.collect_limit == 0 {
            return Err(ModuleError::InvalidData("collect_limit must be positive".into()));
        }
        self.allowances.write().insert(
            PublicationRef::new(profile_id, pub_id),
            CollectAllowance {
                limit: init.collect_limit,
                collected: 0,
            },
        );
        Ok(())
    }

    fn process_collect(
        &self,
        _referrer_profile_id: ProfileId,
        _collector: Address,
        root_profile_id: ProfileId,
        root_pub_id: PubId,
        _data: &[u8],
    ) -> Result<(), ModuleError> {
        let key = PublicationRef::new(root_profile_id, root_pub_id);
        let mut allowances = self.allowances.write();
        let allowance = allowances
            .get_mut(&key)
            .ok_or_else(|| ModuleError::Rejected(format!("publication {key} not initialised")))?;
        if allowance.collected >= allowance.limit {
            return Err(ModuleError::Rejected("mint limit exceeded".into()));
        }
        allowance.collected += 1;
        Ok(())
    }
}

// =============================================================================
// FOLLOW MODULES
// =============================================================================

/// Only addresses approved by the profile owner may follow.
#[derive(Debug, Default)]
pub struct ApprovalFollowModule {
    approved: RwLock<HashSet<(ProfileId, Address)>>,
}

impl ApprovalFollowModule {
    /// Creates the module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants or revokes approval for `follower` to follow `profile_id`.
    pub fn approve(&self, profile_id: ProfileId, follower: Address, approved: bool) {
        let mut set = self.approved.write();
        if approved {
            set.insert((profile_id, follower));
        } else {
            set.remove(&(profile_id, follower));
        }
    }

    /// Whether `follower` is approved for `profile_id`.
    #[must_use]
    pub fn is_approved(&self, profile_id: ProfileId, follower: Address) -> bool {
        self.approved.read().contains(&(profile_id, follower))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApprovalInit {
    #[serde(default)]
    approved: Vec<String>,
}

impl FollowModule for ApprovalFollowModule {
    /// Init data, when present: `{"approved": ["0x<40 hex>", ...]}`.
    fn initialize_follow_module(&self, profile_id: ProfileId, data: &[u8]) -> Result<(), ModuleError> {
        let init: ApprovalInit = if data.is_empty() {
            ApprovalInit::default()
        } else {
            decode(data)?
        };
        let mut addresses = Vec::with_capacity(init.approved.len());
        for raw in &init.approved {
            let bytes = hex::decode(raw.trim_start_matches("0x"))
                .map_err(|e| ModuleError::InvalidData(e.to_string()))?;
            let address = Address::from_slice(&bytes)
                .ok_or_else(|| ModuleError::InvalidData(format!("bad address: {raw}")))?;
            addresses.push(address);
        }
        let mut set = self.approved.write();
        for address in addresses {
            set.insert((profile_id, address));
        }
        Ok(())
    }

    fn process_follow(&self, follower: Address, profile_id: ProfileId, _data: &[u8]) -> Result<(), ModuleError> {
        if self.is_approved(profile_id, follower) {
            Ok(())
        } else {
            Err(ModuleError::Rejected("follow not approved".into()))
        }
    }
}

// =============================================================================
// REFERENCE MODULES
// =============================================================================

/// Only owners of profiles that follow the author may comment or mirror.
#[derive(Debug, Default, Clone, Copy)]
pub struct FollowerOnlyReferenceModule;

impl FollowerOnlyReferenceModule {
    fn check(
        profile_id: ProfileId,
        pointed: PublicationRef,
        graph: &dyn FollowGraph,
    ) -> Result<(), ModuleError> {
        let owner = graph
            .profile_owner(profile_id)
            .map_err(|e| ModuleError::Rejected(e.to_string()))?
            .ok_or_else(|| ModuleError::Rejected(format!("profile {profile_id} has no owner")))?;
        let follows = graph
            .is_following(pointed.profile_id, owner)
            .map_err(|e| ModuleError::Rejected(e.to_string()))?;
        if follows {
            Ok(())
        } else {
            Err(ModuleError::Rejected("follower only".into()))
        }
    }
}

impl ReferenceModule for FollowerOnlyReferenceModule {
    fn initialize_reference_module(
        &self,
        _profile_id: ProfileId,
        _pub_id: PubId,
        _data: &[u8],
    ) -> Result<(), ModuleError> {
        Ok(())
    }

    fn process_comment(
        &self,
        profile_id: ProfileId,
        pointed: PublicationRef,
        _data: &[u8],
        graph: &dyn FollowGraph,
    ) -> Result<(), ModuleError> {
        Self::check(profile_id, pointed, graph)
    }

    fn process_mirror(
        &self,
        profile_id: ProfileId,
        pointed: PublicationRef,
        _data: &[u8],
        graph: &dyn FollowGraph,
    ) -> Result<(), ModuleError> {
        Self::check(profile_id, pointed, graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;

    struct StaticGraph {
        owner: Address,
        follows: bool,
    }

    impl FollowGraph for StaticGraph {
        fn is_following(&self, _profile_id: ProfileId, _follower: Address) -> Result<bool, StoreError> {
            Ok(self.follows)
        }

        fn profile_owner(&self, _profile_id: ProfileId) -> Result<Option<Address>, StoreError> {
            Ok(Some(self.owner))
        }
    }

    #[test]
    fn test_limited_collect_enforces_limit() {
        let module = LimitedCollectModule::new();
        module
            .initialize_publication_collect_module(ProfileId(1), PubId(1), br#"{"collect_limit": 2}"#)
            .unwrap();
        let collect = || module.process_collect(ProfileId(1), Address::repeat_byte(2), ProfileId(1), PubId(1), &[]);
        assert!(collect().is_ok());
        assert!(collect().is_ok());
        assert_eq!(collect(), Err(ModuleError::Rejected("mint limit exceeded".into())));
        assert_eq!(module.collected(PublicationRef::new(ProfileId(1), PubId(1))), 2);
    }

    #[test]
    fn test_limited_collect_rejects_bad_init() {
        let module = LimitedCollectModule::new();
        assert!(matches!(
            module.initialize_publication_collect_module(ProfileId(1), PubId(1), b"not json"),
            Err(ModuleError::InvalidData(_))
        ));
        assert!(matches!(
            module.initialize_publication_collect_module(ProfileId(1), PubId(1), br#"{"collect_limit": 0}"#),
            Err(ModuleError::InvalidData(_))
        ));
    }

    #[test]
    fn test_approval_follow() {
        let module = ApprovalFollowModule::new();
        let bob = Address::repeat_byte(0xb0);
        let init = format!(r#"{{"approved": ["0x{}"]}}"#, hex::encode(bob.as_bytes()));
        module.initialize_follow_module(ProfileId(1), init.as_bytes()).unwrap();
        assert!(module.process_follow(bob, ProfileId(1), &[]).is_ok());
        assert!(module.process_follow(bob, ProfileId(2), &[]).is_err());

        module.approve(ProfileId(1), bob, false);
        assert!(module.process_follow(bob, ProfileId(1), &[]).is_err());
        assert!(module.is_following(ProfileId(1), bob, true));
    }

    #[test]
    fn test_follower_only_reference() {
        let module = FollowerOnlyReferenceModule;
        let pointed = PublicationRef::new(ProfileId(1), PubId(1));
        let follower = StaticGraph {
            owner: Address::repeat_byte(2),
            follows: true,
        };
        let stranger = StaticGraph {
            owner: Address::repeat_byte(3),
            follows: false,
        };
        assert!(module.process_comment(ProfileId(2), pointed, &[], &follower).is_ok());
        assert!(module.process_mirror(ProfileId(3), pointed, &[], &stranger).is_err());
    }
}
