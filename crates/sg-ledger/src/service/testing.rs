//! Test wiring: an in-memory ledger with the reference modules registered
//! and whitelisted at fixed addresses.

use super::{ModuleRegistry, SocialLedgerService};
use crate::adapters::{
    ApprovalFollowModule, FollowerOnlyReferenceModule, FreeCollectModule, InMemoryLedgerStore,
    InMemoryTokenCustody, LimitedCollectModule, ManualClock, RecordingEventSink,
};
use crate::config::LedgerConfig;
use crate::domain::value_objects::{Address, ProfileId, PubId, PublicationRef, WhitelistKind};
use crate::errors::LedgerResult;
use crate::ports::inbound::{CommentParams, CreateProfileParams, MirrorParams, PostParams};
use std::sync::Arc;

/// Fixed addresses and times used by [`create_test_service`].
pub mod fixtures {
    use crate::domain::value_objects::Address;

    /// Governance.
    pub const GOVERNANCE: Address = Address::repeat_byte(0x60);
    /// Emergency admin.
    pub const EMERGENCY_ADMIN: Address = Address::repeat_byte(0xea);
    /// Ledger hub and staking custody.
    pub const HUB: Address = Address::repeat_byte(0x5a);
    /// A user.
    pub const ALICE: Address = Address::repeat_byte(0xa1);
    /// A user.
    pub const BOB: Address = Address::repeat_byte(0xb0);
    /// A user.
    pub const CAROL: Address = Address::repeat_byte(0xc4);
    /// `FreeCollectModule`.
    pub const FREE_COLLECT: Address = Address::repeat_byte(0xf1);
    /// `LimitedCollectModule`.
    pub const LIMITED_COLLECT: Address = Address::repeat_byte(0xf2);
    /// `ApprovalFollowModule`.
    pub const APPROVAL_FOLLOW: Address = Address::repeat_byte(0xf3);
    /// `FollowerOnlyReferenceModule`.
    pub const FOLLOWER_ONLY_REFERENCE: Address = Address::repeat_byte(0xf4);
    /// Whitelisted staking currency.
    pub const CURRENCY: Address = Address::repeat_byte(0xcc);
    /// Clock reading at construction.
    pub const GENESIS_TIME: u64 = 1_700_000_000;
}

/// Service type produced by [`create_test_service`].
pub type TestService = SocialLedgerService<InMemoryLedgerStore, RecordingEventSink, ManualClock>;

/// An in-memory ledger plus handles to its stateful collaborators.
pub struct TestLedger {
    /// The service.
    pub service: TestService,
    /// Token balances used for staking.
    pub custody: Arc<InMemoryTokenCustody>,
    /// Limited collect module instance.
    pub limited_collect: Arc<LimitedCollectModule>,
    /// Approval follow module instance.
    pub approval_follow: Arc<ApprovalFollowModule>,
}

/// Default config with governance, emergency admin and the reference modules
/// whitelisted.
#[must_use]
pub fn test_config() -> LedgerConfig {
    LedgerConfig {
        hub: fixtures::HUB,
        ..LedgerConfig::default()
    }
    .with_governance(fixtures::GOVERNANCE)
    .with_emergency_admin(fixtures::EMERGENCY_ADMIN)
    .with_whitelisted(WhitelistKind::CollectModule, fixtures::FREE_COLLECT)
    .with_whitelisted(WhitelistKind::CollectModule, fixtures::LIMITED_COLLECT)
    .with_whitelisted(WhitelistKind::FollowModule, fixtures::APPROVAL_FOLLOW)
    .with_whitelisted(WhitelistKind::ReferenceModule, fixtures::FOLLOWER_ONLY_REFERENCE)
    .with_whitelisted(WhitelistKind::Currency, fixtures::CURRENCY)
}

/// Create a test service with in-memory adapters.
pub fn create_test_service() -> LedgerResult<TestLedger> {
    TestLedger::with_config(test_config())
}

impl TestLedger {
    /// Builds a test ledger from `config`, registering the reference modules.
    pub fn with_config(config: LedgerConfig) -> LedgerResult<Self> {
        let custody = Arc::new(InMemoryTokenCustody::new());
        let limited_collect = Arc::new(LimitedCollectModule::new());
        let approval_follow = Arc::new(ApprovalFollowModule::new());
        let modules = ModuleRegistry::new()
            .with_collect_module(fixtures::FREE_COLLECT, Arc::new(FreeCollectModule))
            .with_collect_module(fixtures::LIMITED_COLLECT, limited_collect.clone())
            .with_follow_module(fixtures::APPROVAL_FOLLOW, approval_follow.clone())
            .with_reference_module(
                fixtures::FOLLOWER_ONLY_REFERENCE,
                Arc::new(FollowerOnlyReferenceModule),
            );
        let service = SocialLedgerService::new(
            config,
            InMemoryLedgerStore::new(),
            RecordingEventSink::new(),
            ManualClock::new(fixtures::GENESIS_TIME),
            custody.clone(),
            modules,
        )?;
        Ok(Self {
            service,
            custody,
            limited_collect,
            approval_follow,
        })
    }

    /// Creates a profile owned by `owner` with no follow module.
    pub fn create_profile(&self, owner: Address, handle: &str) -> LedgerResult<ProfileId> {
        self.service.create_profile(
            owner,
            CreateProfileParams {
                to: owner,
                handle: handle.to_string(),
                ..CreateProfileParams::default()
            },
        )
    }

    /// Publishes a post with the free collect module.
    pub fn post(&self, caller: Address, profile_id: ProfileId) -> LedgerResult<PubId> {
        self.service.post(
            caller,
            PostParams {
                profile_id,
                content_uri: "ipfs://post".to_string(),
                collect_module: fixtures::FREE_COLLECT,
                ..PostParams::default()
            },
        )
    }

    /// Publishes a comment with the free collect module.
    pub fn comment(&self, caller: Address, profile_id: ProfileId, pointed: PublicationRef) -> LedgerResult<PubId> {
        self.service.comment(
            caller,
            CommentParams {
                profile_id,
                content_uri: "ipfs://comment".to_string(),
                pointed,
                collect_module: fixtures::FREE_COLLECT,
                ..CommentParams::default()
            },
        )
    }

    /// Publishes a mirror.
    pub fn mirror(&self, caller: Address, profile_id: ProfileId, pointed: PublicationRef) -> LedgerResult<PubId> {
        self.service.mirror(
            caller,
            MirrorParams {
                profile_id,
                pointed,
                ..MirrorParams::default()
            },
        )
    }
}
