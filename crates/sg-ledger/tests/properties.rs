//! Property tests for the ledger's structural guarantees.

use proptest::prelude::*;
use sg_ledger::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_handle() -> impl Strategy<Value = String> {
    "[a-z0-9._-]{1,31}"
}

fn ledger() -> TestLedger {
    create_test_service().expect("test ledger")
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// handle -> id -> handle, and the reverse mapping disappears on burn.
    #[test]
    fn handle_round_trip(handle in arb_handle()) {
        let t = ledger();
        let id = t.create_profile(fixtures::ALICE, &handle).unwrap();

        prop_assert_eq!(t.service.get_profile_id_by_handle(&handle).unwrap(), Some(id));
        let profile = t.service.get_profile(id).unwrap().unwrap();
        prop_assert_eq!(&profile.handle, &handle);

        t.service.burn_profile(fixtures::ALICE, id).unwrap();
        prop_assert_eq!(t.service.get_profile_id_by_handle(&handle).unwrap(), None);
    }

    /// Handles with a character outside [a-z0-9._-] are never reserved.
    #[test]
    fn invalid_handles_rejected(prefix in "[a-z]{0,5}", bad in "[A-Z !@#]", suffix in "[a-z]{0,5}") {
        let t = ledger();
        let handle = format!("{prefix}{bad}{suffix}");
        let result = t.create_profile(fixtures::ALICE, &handle);
        prop_assert_eq!(result, Err(LedgerError::HandleContainsInvalidCharacters { handle: handle.clone() }));
        prop_assert_eq!(t.service.protocol_settings().unwrap().profile_count, 0);
    }

    /// Repeating an action never adds score twice.
    #[test]
    fn record_action_is_idempotent(collects in 1usize..6) {
        let t = ledger();
        let alice = t.create_profile(fixtures::ALICE, "alice").unwrap();
        let post = t.post(fixtures::ALICE, alice).unwrap();
        for _ in 0..collects {
            t.service.collect(fixtures::BOB, alice, post, &[]).unwrap();
        }

        let publication = t.service.get_publication(alice, post).unwrap().unwrap();
        prop_assert_eq!(publication.collected, collects as u64);
        prop_assert_eq!(publication.score.sub_score(ActionKind::Collect), 4);
        prop_assert_eq!(publication.score.total, 4);
        prop_assert_eq!(t.service.get_profile(alice).unwrap().unwrap().stats.content_score, 4);
    }

    /// A chain of k mirrors resolves to the original post.
    #[test]
    fn mirror_chain_resolves_to_root(k in 1usize..8) {
        let t = ledger();
        let alice = t.create_profile(fixtures::ALICE, "alice").unwrap();
        let bob = t.create_profile(fixtures::BOB, "bob").unwrap();
        let post = t.post(fixtures::ALICE, alice).unwrap();
        let root = PublicationRef::new(alice, post);

        let mut pointed = root;
        for _ in 0..k {
            let mirror = t.mirror(fixtures::BOB, bob, pointed).unwrap();
            pointed = PublicationRef::new(bob, mirror);
        }

        let last = t.service.get_publication(bob, pointed.pub_id).unwrap().unwrap();
        prop_assert_eq!(last.kind(), PublicationKind::Mirror);
        prop_assert_eq!(t.service.get_pointed_if_mirror(bob, pointed.pub_id).unwrap(), root);
    }

    /// Mismatched follow arrays change nothing.
    #[test]
    fn follow_array_mismatch_has_no_effect(ids in 0usize..4, data in 0usize..4) {
        prop_assume!(ids != data);
        let t = ledger();
        let alice = t.create_profile(fixtures::ALICE, "alice").unwrap();
        let before = t.service.store().snapshot();
        let events = t.service.event_sink().len();

        let profile_ids = vec![alice; ids];
        let module_data = vec![Vec::new(); data];
        let result = t.service.follow(fixtures::BOB, &profile_ids, &module_data);

        prop_assert_eq!(result, Err(LedgerError::ArrayMismatch { profiles: ids, data }));
        prop_assert_eq!(t.service.store().snapshot(), before);
        prop_assert_eq!(t.service.event_sink().len(), events);
    }

    /// A second vote in either direction fails and leaves the tallies alone.
    #[test]
    fn double_vote_rejected(first in any::<i8>(), second in any::<i8>()) {
        let t = ledger();
        let alice = t.create_profile(fixtures::ALICE, "alice").unwrap();
        let post = t.post(fixtures::ALICE, alice).unwrap();

        t.service.vote(fixtures::BOB, alice, post, first).unwrap();
        let tallies = t.service.get_publication(alice, post).unwrap().unwrap().votes;
        prop_assert_eq!(tallies.up + tallies.down, 1);
        prop_assert_eq!(tallies.up == 1, first > 0);

        prop_assert_eq!(t.service.vote(fixtures::BOB, alice, post, second), Err(LedgerError::AlreadyVoted));
        prop_assert_eq!(t.service.get_publication(alice, post).unwrap().unwrap().votes, tallies);
    }

    /// Every delivered score update keeps total == sum of sub-scores.
    #[test]
    fn score_sum_holds_after_mixed_actions(like in any::<bool>(), report in any::<bool>(), vote in any::<i8>()) {
        let t = ledger();
        let alice = t.create_profile(fixtures::ALICE, "alice").unwrap();
        let post = t.post(fixtures::ALICE, alice).unwrap();
        if like {
            t.service.like(fixtures::BOB, alice, post).unwrap();
        }
        if report {
            t.service.report(fixtures::CAROL, alice, post).unwrap();
        }
        t.service.vote(fixtures::CAROL, alice, post, vote).unwrap();

        let score = t.service.get_publication(alice, post).unwrap().unwrap().score;
        prop_assert_eq!(score.sub_scores.iter().sum::<i64>(), score.total);
        prop_assert_eq!(t.service.get_profile(alice).unwrap().unwrap().stats.content_score, score.total);
    }
}
