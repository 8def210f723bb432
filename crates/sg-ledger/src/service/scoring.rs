//! Action recording, reputation and level.

use super::{OpContext, SocialLedgerService};
use crate::domain::access::AccessPolicy;
use crate::domain::entities::{ActionKey, Publication};
use crate::domain::invariants::check_score_sum;
use crate::domain::scoring::ScoreModel;
use crate::domain::value_objects::{ActionKind, Address, ProfileId};
use crate::errors::{LedgerError, LedgerResult, StoreError};
use crate::events::LedgerEvent;
use crate::ports::outbound::{Clock, EventSink, LedgerStore};
use tracing::{debug, info, instrument};

impl<S: LedgerStore, E: EventSink, C: Clock> SocialLedgerService<S, E, C> {
    /// Runs `f` against the factor tables of the current revision.
    pub(crate) fn with_score_model<R>(
        &self,
        f: impl FnOnce(ScoreModel<'_>) -> LedgerResult<R>,
    ) -> LedgerResult<R> {
        let revision = self.settings()?.current_revision;
        let actions = self
            .store
            .action_factors(revision)?
            .ok_or(LedgerError::UnknownRevision(revision))?;
        let reputation = self
            .store
            .reputation_factors(revision)?
            .ok_or(LedgerError::UnknownRevision(revision))?;
        f(ScoreModel {
            actions: &actions,
            reputation: &reputation,
            levels: &self.config.scoring.levels,
            policy: self.config.scoring.recommendation_policy,
        })
    }

    /// Records `actor` performing `kind` on `publication` and applies the
    /// score delta.
    ///
    /// Returns the applied delta. A repeated action returns 0 and writes
    /// nothing. A first action always sets the action flag, so a later
    /// revision with a different weight cannot score it again. A zero delta
    /// stops there. Otherwise the owner's content score is persisted and
    /// `publication.score` is updated in place; the caller persists
    /// `publication`.
    ///
    /// The owner may be burned: publications outlive their profile.
    pub(crate) fn record_action(
        &self,
        ctx: &mut OpContext,
        publication: &mut Publication,
        actor: Address,
        kind: ActionKind,
    ) -> LedgerResult<i64> {
        let key = ActionKey::new(publication.reference(), actor, kind);
        if self.store.has_acted(&key)? {
            return Ok(0);
        }
        let mut owner = self.content_owner(publication.profile_id)?;
        let delta = self.with_score_model(|model| model.delta(kind, &owner.stats))?;
        self.store.set_acted(key)?;
        if delta == 0 {
            return Ok(0);
        }

        let score = publication
            .score
            .apply(kind, delta)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        if !check_score_sum(&score) {
            return Err(StoreError::Corrupted(format!("score of {} out of balance", key.publication)).into());
        }
        owner.stats.content_score = owner
            .stats
            .content_score
            .checked_add(delta)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        publication.score = score;
        self.store.put_profile(owner)?;

        ctx.emit(LedgerEvent::ContentScoreUpdated {
            publication: key.publication,
            actor,
            kind,
            delta,
            new_total: score.total,
        });
        debug!(publication = %key.publication, kind = %kind, delta, "Score updated");
        Ok(delta)
    }

    /// Reputation of a live profile under the current revision.
    pub fn reputation(&self, profile_id: ProfileId) -> LedgerResult<i64> {
        let profile = self.live_profile(profile_id)?;
        self.with_score_model(|model| model.reputation(&profile.stats))
    }

    /// Level of a live profile under the current revision.
    pub fn level(&self, profile_id: ProfileId) -> LedgerResult<u32> {
        let profile = self.live_profile(profile_id)?;
        self.with_score_model(|model| model.level(&profile.stats))
    }

    /// Records a judged recommendation. Governance only.
    #[instrument(skip(self))]
    pub fn record_recommendation_outcome(
        &self,
        caller: Address,
        profile_id: ProfileId,
        successful: bool,
    ) -> LedgerResult<()> {
        self.atomically("record_recommendation_outcome", |ctx| {
            let settings = self.settings()?;
            AccessPolicy::require_governance(&settings, caller)?;
            let mut profile = self.live_profile(profile_id)?;
            let stats = &mut profile.stats;
            stats.recommendations_attempted = stats
                .recommendations_attempted
                .checked_add(1)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            if successful {
                stats.recommendations_successful = stats
                    .recommendations_successful
                    .checked_add(1)
                    .ok_or(LedgerError::ArithmeticOverflow)?;
            }
            self.store.put_profile(profile)?;
            ctx.emit(LedgerEvent::RecommendationRecorded {
                profile_id,
                successful,
            });
            Ok(())
        })?;
        info!(profile_id = %profile_id, successful, "Recommendation recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::scoring::{ActionFactors, RecommendationPolicy};
    use crate::domain::value_objects::{ActionKind, PublicationRef, Revision};
    use crate::errors::LedgerError;
    use crate::service::{fixtures::*, test_config, TestLedger};

    #[test]
    fn test_level_scales_delta() {
        let t = TestLedger::with_config(test_config()).unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let post = t.post(ALICE, alice).unwrap();

        // Lift alice to level 1 (reputation >= 100) with one heavy like.
        t.service
            .set_action_factors(
                GOVERNANCE,
                Revision(2),
                ActionFactors::from_pairs(&[(ActionKind::Like, 100), (ActionKind::Upvote, 2)]),
            )
            .unwrap();
        t.service
            .set_reputation_factors(GOVERNANCE, Revision(2), Default::default())
            .unwrap();
        t.service.set_current_revision(GOVERNANCE, Revision(2)).unwrap();

        t.service.like(BOB, alice, post).unwrap();
        assert_eq!(t.service.reputation(alice).unwrap(), 100);
        assert_eq!(t.service.level(alice).unwrap(), 1);

        t.service.vote(CAROL, alice, post, 1).unwrap();
        let publication = t.service.get_publication(alice, post).unwrap().unwrap();
        assert_eq!(publication.score.sub_score(ActionKind::Upvote), 4);
        assert_eq!(publication.score.total, 104);
    }

    #[test]
    fn test_zero_weight_sets_flag_without_scoring() {
        let t = TestLedger::with_config(test_config()).unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let post = t.post(ALICE, alice).unwrap();
        t.service
            .set_action_factors(GOVERNANCE, Revision(2), ActionFactors::from_pairs(&[]))
            .unwrap();
        t.service
            .set_reputation_factors(GOVERNANCE, Revision(2), Default::default())
            .unwrap();
        t.service.set_current_revision(GOVERNANCE, Revision(2)).unwrap();
        t.service.event_sink().take();

        t.service.collect(BOB, alice, post, &[]).unwrap();
        let publication = t.service.get_publication(alice, post).unwrap().unwrap();
        assert_eq!(publication.score.total, 0);
        assert!(t
            .service
            .has_acted(PublicationRef::new(alice, post), BOB, ActionKind::Collect)
            .unwrap());
        assert!(t
            .service
            .event_sink()
            .events()
            .iter()
            .all(|e| e.name() != "content_score_updated"));
    }

    #[test]
    fn test_zero_weight_action_is_not_rescored_after_revision_switch() {
        let t = TestLedger::with_config(test_config()).unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let post = t.post(ALICE, alice).unwrap();
        t.service
            .set_action_factors(GOVERNANCE, Revision(2), ActionFactors::from_pairs(&[]))
            .unwrap();
        t.service
            .set_reputation_factors(GOVERNANCE, Revision(2), Default::default())
            .unwrap();
        t.service.set_current_revision(GOVERNANCE, Revision(2)).unwrap();
        t.service.collect(BOB, alice, post, &[]).unwrap();

        // Back to the genesis weights, where a collect is worth 4.
        t.service.set_current_revision(GOVERNANCE, Revision(1)).unwrap();
        t.service.event_sink().take();
        t.service.collect(BOB, alice, post, &[]).unwrap();

        let publication = t.service.get_publication(alice, post).unwrap().unwrap();
        assert_eq!(publication.collected, 2);
        assert_eq!(publication.score.total, 0);
        assert_eq!(t.service.get_profile(alice).unwrap().unwrap().stats.content_score, 0);
        assert!(t
            .service
            .event_sink()
            .events()
            .iter()
            .all(|e| e.name() != "content_score_updated"));

        // A fresh collector still scores under the genesis weights.
        t.service.collect(CAROL, alice, post, &[]).unwrap();
        let publication = t.service.get_publication(alice, post).unwrap().unwrap();
        assert_eq!(publication.score.sub_score(ActionKind::Collect), 4);
    }

    #[test]
    fn test_recommendation_policies() {
        let strict = TestLedger::with_config(
            test_config().with_recommendation_policy(RecommendationPolicy::Strict),
        )
        .unwrap();
        let alice = strict.create_profile(ALICE, "alice").unwrap();
        assert_eq!(strict.service.reputation(alice), Err(LedgerError::DivisionByZero));

        strict
            .service
            .record_recommendation_outcome(GOVERNANCE, alice, true)
            .unwrap();
        strict
            .service
            .record_recommendation_outcome(GOVERNANCE, alice, false)
            .unwrap();
        // 1 * 10 / 2
        assert_eq!(strict.service.reputation(alice).unwrap(), 5);

        let lenient = TestLedger::with_config(test_config()).unwrap();
        let alice = lenient.create_profile(ALICE, "alice").unwrap();
        assert_eq!(lenient.service.reputation(alice).unwrap(), 0);
        assert_eq!(
            lenient.service.record_recommendation_outcome(ALICE, alice, true),
            Err(LedgerError::NotGovernance)
        );
    }

    #[test]
    fn test_strict_policy_blocks_scoring_without_recommendations() {
        let t = TestLedger::with_config(
            test_config().with_recommendation_policy(RecommendationPolicy::Strict),
        )
        .unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let post = t.post(ALICE, alice).unwrap();
        assert_eq!(t.service.like(BOB, alice, post), Err(LedgerError::DivisionByZero));
        assert_eq!(t.service.get_publication(alice, post).unwrap().unwrap().likes, 0);
    }
}
