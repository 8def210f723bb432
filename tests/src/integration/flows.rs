//! # Integration Test Flows
//!
//! Drives the ledger through `SocialGraphApi` with a
//! `BroadcastEventSink`, checking what a subscriber observes.
//!
//! ## Flows Tested:
//!
//! 1. **Identity → Publishing → Interactions**: events arrive in commit order
//! 2. **Rejected batch follow**: no events and no state change reach the outside
//! 3. **Governance revision switch**: new weights apply to later actions only
//! 4. **Bet lifecycle**: stake, deadline, resolution with token custody
//! 5. **Telemetry**: logging installs once and the ledger runs under it

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::sync::broadcast::Receiver;
    use tokio::time::timeout;

    use sg_ledger::prelude::*;
    use sg_ledger::service::fixtures::{
        ALICE, APPROVAL_FOLLOW, BOB, CAROL, CURRENCY, EMERGENCY_ADMIN, FREE_COLLECT, GENESIS_TIME,
        GOVERNANCE, HUB,
    };
    use sg_ledger::service::test_config;
    use sg_telemetry::{init_logging, TelemetryConfig, TelemetryError};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type BroadcastService = SocialLedgerService<InMemoryLedgerStore, BroadcastEventSink, ManualClock>;

    struct Harness {
        service: BroadcastService,
        custody: Arc<InMemoryTokenCustody>,
        approvals: Arc<ApprovalFollowModule>,
    }

    fn harness() -> Harness {
        let custody = Arc::new(InMemoryTokenCustody::new());
        let approvals = Arc::new(ApprovalFollowModule::new());
        let modules = ModuleRegistry::new()
            .with_collect_module(FREE_COLLECT, Arc::new(FreeCollectModule))
            .with_follow_module(APPROVAL_FOLLOW, approvals.clone());
        let service = SocialLedgerService::new(
            test_config(),
            InMemoryLedgerStore::new(),
            BroadcastEventSink::new(256),
            ManualClock::new(GENESIS_TIME),
            custody.clone(),
            modules,
        )
        .expect("service");
        Harness {
            service,
            custody,
            approvals,
        }
    }

    fn create_profile(api: &dyn SocialGraphApi, owner: Address, handle: &str) -> ProfileId {
        api.create_profile(
            owner,
            CreateProfileParams {
                to: owner,
                handle: handle.into(),
                ..CreateProfileParams::default()
            },
        )
        .expect("create profile")
    }

    fn post(api: &dyn SocialGraphApi, caller: Address, profile_id: ProfileId, bet_deadline: Option<u64>) -> PubId {
        api.post(
            caller,
            PostParams {
                profile_id,
                content_uri: "ipfs://flow".into(),
                collect_module: FREE_COLLECT,
                bet_deadline,
                ..PostParams::default()
            },
        )
        .expect("post")
    }

    /// Drains everything already delivered to `rx`.
    fn drain(rx: &mut Receiver<EventRecord>) -> Vec<EventRecord> {
        let mut out = Vec::new();
        while let Ok(record) = rx.try_recv() {
            out.push(record);
        }
        out
    }

    fn names(records: &[EventRecord]) -> Vec<&'static str> {
        records.iter().map(|r| r.event.name()).collect()
    }

    // =============================================================================
    // INTEGRATION TESTS: IDENTITY → PUBLISHING → INTERACTIONS
    // =============================================================================

    /// A subscriber sees every committed event, in order, with gap-free sequences.
    #[tokio::test]
    async fn test_subscriber_observes_committed_flow() {
        let h = harness();
        let mut rx = h.service.event_sink().subscribe();
        let api: &dyn SocialGraphApi = &h.service;

        let alice = create_profile(api, ALICE, "alice");
        let first = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout waiting for event")
            .expect("should receive event");
        assert_eq!(first.sequence, 1);
        assert_eq!(first.event.name(), "profile_created");

        let bob = create_profile(api, BOB, "bob");
        let pub_id = post(api, ALICE, alice, None);
        api.follow(BOB, &[alice], &[Vec::new()]).unwrap();
        api.comment(
            BOB,
            CommentParams {
                profile_id: bob,
                content_uri: "ipfs://reply".into(),
                pointed: PublicationRef::new(alice, pub_id),
                collect_module: FREE_COLLECT,
                ..CommentParams::default()
            },
        )
        .unwrap();

        let rest = drain(&mut rx);
        assert_eq!(
            names(&rest),
            vec![
                "default_profile_set",
                "profile_created",
                "default_profile_set",
                "post_created",
                "follow_ownership_provisioned",
                "followed",
                "content_score_updated",
                "comment_created",
            ]
        );
        let sequences: Vec<u64> = rest.iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, (2..2 + rest.len() as u64).collect::<Vec<_>>());

        assert_eq!(api.reputation(alice).unwrap(), 3);
        assert_eq!(api.get_profile(bob).unwrap().unwrap().stats.answers, 1);
    }

    // =============================================================================
    // INTEGRATION TESTS: ATOMIC ROLLBACK
    // =============================================================================

    /// A batch follow rejected by one module leaks nothing to subscribers.
    #[tokio::test]
    async fn test_rejected_batch_follow_is_invisible() {
        let h = harness();
        let api: &dyn SocialGraphApi = &h.service;
        let open = create_profile(api, ALICE, "open");
        let gated = api
            .create_profile(
                CAROL,
                CreateProfileParams {
                    to: CAROL,
                    handle: "gated".into(),
                    follow_module: Some(APPROVAL_FOLLOW),
                    ..CreateProfileParams::default()
                },
            )
            .unwrap();

        let mut rx = h.service.event_sink().subscribe();
        let before = h.service.store().snapshot();

        let result = api.follow(BOB, &[open, gated], &[Vec::new(), Vec::new()]);
        assert!(matches!(
            result,
            Err(LedgerError::ModuleRejected { module, .. }) if module == APPROVAL_FOLLOW
        ));
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
        assert_eq!(h.service.store().snapshot(), before);
        assert!(!api.is_following(open, BOB).unwrap());

        h.approvals.approve(gated, BOB, true);
        let units = api.follow(BOB, &[open, gated], &[Vec::new(), Vec::new()]).unwrap();
        assert_eq!(units, vec![UnitId(1), UnitId(1)]);
        assert!(api.is_following(gated, BOB).unwrap());
        assert!(names(&drain(&mut rx)).contains(&"followed"));
    }

    // =============================================================================
    // INTEGRATION TESTS: GOVERNANCE
    // =============================================================================

    /// Activating a new revision changes weights for later actions only.
    #[test]
    fn test_revision_switch_reweights_later_actions() {
        let h = harness();
        let api: &dyn SocialGraphApi = &h.service;
        let alice = create_profile(api, ALICE, "alice");
        let pub_id = post(api, ALICE, alice, None);

        api.like(BOB, alice, pub_id).unwrap();
        assert_eq!(api.reputation(alice).unwrap(), 1);

        let revision = Revision(2);
        api.set_action_factors(
            GOVERNANCE,
            revision,
            ActionFactors::from_pairs(&[(ActionKind::Like, 10)]),
        )
        .unwrap();
        api.set_reputation_factors(GOVERNANCE, revision, ReputationFactors::default())
            .unwrap();
        // Written but not active yet.
        api.like(CAROL, alice, pub_id).unwrap();
        assert_eq!(api.reputation(alice).unwrap(), 2);

        api.set_current_revision(GOVERNANCE, revision).unwrap();
        api.like(EMERGENCY_ADMIN, alice, pub_id).unwrap();
        let score = api.get_publication(alice, pub_id).unwrap().unwrap().score;
        assert_eq!(score.sub_score(ActionKind::Like), 12);
        assert_eq!(score.total, 12);
    }

    /// The emergency admin can halt interactions but not resume them.
    #[test]
    fn test_emergency_pause_halts_interactions() {
        let h = harness();
        let api: &dyn SocialGraphApi = &h.service;
        let alice = create_profile(api, ALICE, "alice");
        let pub_id = post(api, ALICE, alice, None);

        api.set_state(EMERGENCY_ADMIN, ProtocolState::Paused).unwrap();
        assert_eq!(api.like(BOB, alice, pub_id), Err(LedgerError::ProtocolPaused));
        assert_eq!(
            api.follow(BOB, &[alice], &[Vec::new()]),
            Err(LedgerError::ProtocolPaused)
        );
        assert_eq!(
            api.set_state(EMERGENCY_ADMIN, ProtocolState::Unpaused),
            Err(LedgerError::EmergencyAdminCannotUnpause)
        );

        api.set_state(GOVERNANCE, ProtocolState::Unpaused).unwrap();
        api.like(BOB, alice, pub_id).unwrap();
    }

    // =============================================================================
    // INTEGRATION TESTS: STAKING
    // =============================================================================

    /// Bets accumulate until the deadline and resolve once.
    #[tokio::test]
    async fn test_bet_lifecycle_with_custody() {
        let h = harness();
        let api: &dyn SocialGraphApi = &h.service;
        let alice = create_profile(api, ALICE, "alice");
        let bob = create_profile(api, BOB, "bob");
        let deadline = GENESIS_TIME + 3_600;
        let pub_id = post(api, ALICE, alice, Some(deadline));
        let target = PublicationRef::new(alice, pub_id);
        h.custody.mint(CURRENCY, BOB, 1_000);

        let bet = |amount| StakeParams {
            staker: bob,
            publication: target,
            stake_type: StakeType::Bet,
            amount,
            currency: CURRENCY,
        };
        api.stake(BOB, bet(300)).unwrap();
        api.stake(BOB, bet(200)).unwrap();

        let pool = api.get_publication(alice, pub_id).unwrap().unwrap().bet;
        assert_eq!((pool.amount, pool.stakers), (500, 1));
        assert_eq!(h.custody.balance_of(CURRENCY, HUB), 500);
        assert_eq!(h.custody.balance_of(CURRENCY, BOB), 500);

        assert_eq!(
            api.resolve_bet(ALICE, alice, pub_id, 1),
            Err(LedgerError::BetNotResolvable(target))
        );

        h.service.clock().set(deadline);
        assert_eq!(api.stake(BOB, bet(1)), Err(LedgerError::BetClosed(target)));
        api.resolve_bet(ALICE, alice, pub_id, 1).unwrap();
        assert_eq!(
            api.resolve_bet(ALICE, alice, pub_id, 2),
            Err(LedgerError::BetAlreadyResolved(target))
        );
        assert_eq!(
            api.get_publication(alice, pub_id).unwrap().unwrap().bet.correct_option,
            Some(1)
        );
        assert_eq!(h.custody.balance_of(CURRENCY, HUB), 500);
    }

    // =============================================================================
    // INTEGRATION TESTS: TELEMETRY
    // =============================================================================

    /// Logging installs at most once per process; the ledger runs either way.
    #[test]
    fn test_ledger_runs_under_installed_logging() {
        let config = TelemetryConfig::default().with_log_level("warn,sg_ledger=debug");
        let _guard = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::SubscriberInit(_))
        ));

        let h = harness();
        let alice = {
            let _span = sg_telemetry::operation_span!("create_profile", handle = "logged").entered();
            create_profile(&h.service, ALICE, "logged")
        };
        sg_telemetry::log_event!(info, "sg-tests", "profile created under telemetry", profile_id = %alice);
        assert_eq!(h.service.stats().profiles_created, 1);
    }
}
