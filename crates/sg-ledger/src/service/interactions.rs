//! # Interactions
//!
//! Follow, collect, vote, like, report and stake. Everything except follow
//! targets the resolved root of the requested publication.

use super::SocialLedgerService;
use crate::domain::access::AccessPolicy;
use crate::domain::entities::{ActionKey, Publication, StakeKey};
use crate::domain::value_objects::{ActionKind, Address, ProfileId, PubId, PublicationRef, StakeType, UnitId, WhitelistKind};
use crate::errors::{LedgerError, LedgerResult, StoreError};
use crate::events::LedgerEvent;
use crate::ports::inbound::StakeParams;
use crate::ports::outbound::{Clock, EventSink, FollowGraph, LedgerStore};
use tracing::{debug, info, instrument};

/// Single-shot reactions sharing the like/report flow.
#[derive(Clone, Copy, Debug)]
enum Reaction {
    Like,
    Report,
}

impl Reaction {
    fn kind(self) -> ActionKind {
        match self {
            Reaction::Like => ActionKind::Like,
            Reaction::Report => ActionKind::Report,
        }
    }

    fn counter(self, publication: &mut Publication) -> &mut u64 {
        match self {
            Reaction::Like => &mut publication.likes,
            Reaction::Report => &mut publication.reports,
        }
    }

    fn event(self, actor: Address, publication: PublicationRef) -> LedgerEvent {
        match self {
            Reaction::Like => LedgerEvent::Liked { actor, publication },
            Reaction::Report => LedgerEvent::Reported { actor, publication },
        }
    }
}

fn increment(counter: &mut u64) -> LedgerResult<()> {
    *counter = counter.checked_add(1).ok_or(LedgerError::ArithmeticOverflow)?;
    Ok(())
}

impl<S: LedgerStore, E: EventSink, C: Clock> SocialLedgerService<S, E, C> {
    // =========================================================================
    // FOLLOW / COLLECT
    // =========================================================================

    /// Follows each profile in input order, minting one follow unit per id.
    ///
    /// Duplicate ids are followed twice. Any rejection, including a follow
    /// module refusal, undoes the whole batch.
    #[instrument(skip(self, data), fields(count = profile_ids.len()))]
    pub fn follow(&self, caller: Address, profile_ids: &[ProfileId], data: &[Vec<u8>]) -> LedgerResult<Vec<UnitId>> {
        let unit_ids = self.atomically("follow", |ctx| {
            if profile_ids.len() != data.len() {
                return Err(LedgerError::ArrayMismatch {
                    profiles: profile_ids.len(),
                    data: data.len(),
                });
            }
            self.state()?.ensure_not_paused()?;

            let mut unit_ids = Vec::with_capacity(profile_ids.len());
            for (&profile_id, module_data) in profile_ids.iter().zip(data) {
                let profile = self.live_profile(profile_id)?;
                if !self.handle_bijection_holds(&profile)? {
                    return Err(LedgerError::ProfileDoesNotExist(profile_id));
                }
                let record = self.ensure_follow_ownership(ctx, profile_id)?;
                let unit_id = self.mint(record, caller)?;
                if let Some(module) = profile.follow_module {
                    self.modules
                        .follow_module(module)?
                        .process_follow(caller, profile_id, module_data)
                        .map_err(|e| LedgerError::module_rejected(module, e))?;
                }
                unit_ids.push(unit_id);
            }

            ctx.emit(LedgerEvent::Followed {
                follower: caller,
                profile_ids: profile_ids.to_vec(),
                unit_ids: unit_ids.clone(),
            });
            Ok(unit_ids)
        })?;

        let minted = unit_ids.len() as u64;
        self.bump_stats(|s| s.follows += minted);
        info!(follower = %caller, minted, "Follow batch committed");
        Ok(unit_ids)
    }

    /// Collects the root of `(profile_id, pub_id)`, minting one collect unit.
    ///
    /// The requested profile is passed to the collect module as referrer.
    #[instrument(skip(self, data))]
    pub fn collect(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, data: &[u8]) -> LedgerResult<UnitId> {
        let requested = PublicationRef::new(profile_id, pub_id);
        let unit_id = self.atomically("collect", |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut root = self.resolve_root(requested)?;
            let root_ref = root.reference();
            let module_address = root
                .collect_module
                .ok_or_else(|| StoreError::Corrupted(format!("root {root_ref} has no collect module")))?;
            let module = self.modules.collect_module(module_address)?;

            let mut owner = self.content_owner(root.profile_id)?;
            let record = self.ensure_collect_ownership(ctx, &mut root, &owner.handle)?;
            let unit_id = self.mint(record, caller)?;

            increment(&mut root.collected)?;
            increment(&mut owner.stats.collected)?;
            self.store.put_profile(owner)?;
            self.record_action(ctx, &mut root, caller, ActionKind::Collect)?;
            self.store.put_publication(root)?;

            module
                .process_collect(profile_id, caller, root_ref.profile_id, root_ref.pub_id, data)
                .map_err(|e| LedgerError::module_rejected(module_address, e))?;

            ctx.emit(LedgerEvent::Collected {
                collector: caller,
                requested,
                root: root_ref,
                unit_id,
            });
            Ok(unit_id)
        })?;

        self.bump_stats(|s| s.collects += 1);
        info!(collector = %caller, publication = %requested, unit_id = %unit_id, "Collected");
        Ok(unit_id)
    }

    // =========================================================================
    // REACTIONS
    // =========================================================================

    /// Votes once on a publication: up for `amount > 0`, down otherwise.
    #[instrument(skip(self))]
    pub fn vote(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, amount: i8) -> LedgerResult<()> {
        self.atomically("vote", |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut root = self.resolve_root(PublicationRef::new(profile_id, pub_id))?;
            let publication = root.reference();
            for kind in [ActionKind::Upvote, ActionKind::Downvote] {
                if self.store.has_acted(&ActionKey::new(publication, caller, kind))? {
                    return Err(LedgerError::AlreadyVoted);
                }
            }

            let upvote = amount > 0;
            let kind = if upvote {
                increment(&mut root.votes.up)?;
                ActionKind::Upvote
            } else {
                increment(&mut root.votes.down)?;
                ActionKind::Downvote
            };
            self.record_action(ctx, &mut root, caller, kind)?;
            self.store.put_publication(root)?;

            ctx.emit(LedgerEvent::Voted {
                voter: caller,
                publication,
                upvote,
            });
            Ok(())
        })?;
        self.bump_stats(|s| s.reactions += 1);
        Ok(())
    }

    /// Likes a publication once.
    #[instrument(skip(self))]
    pub fn like(&self, caller: Address, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<()> {
        self.react("like", caller, PublicationRef::new(profile_id, pub_id), Reaction::Like)
    }

    /// Reports a publication once.
    #[instrument(skip(self))]
    pub fn report(&self, caller: Address, profile_id: ProfileId, pub_id: PubId) -> LedgerResult<()> {
        self.react("report", caller, PublicationRef::new(profile_id, pub_id), Reaction::Report)
    }

    fn react(
        &self,
        operation: &'static str,
        caller: Address,
        requested: PublicationRef,
        reaction: Reaction,
    ) -> LedgerResult<()> {
        let kind = reaction.kind();
        self.atomically(operation, |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut root = self.resolve_root(requested)?;
            let publication = root.reference();
            let key = ActionKey::new(publication, caller, kind);
            if self.store.has_acted(&key)? {
                return Err(LedgerError::AlreadyActed { kind });
            }

            increment(reaction.counter(&mut root))?;
            self.record_action(ctx, &mut root, caller, kind)?;
            self.store.put_publication(root)?;

            ctx.emit(reaction.event(caller, publication));
            Ok(())
        })?;
        self.bump_stats(|s| s.reactions += 1);
        Ok(())
    }

    // =========================================================================
    // STAKES
    // =========================================================================

    /// Stakes `params.amount` of `params.currency` on a publication's root.
    ///
    /// Tokens move from the caller into custody at the hub after every check
    /// has passed and before any ledger write.
    #[instrument(skip(self, params), fields(staker = %params.staker, publication = %params.publication))]
    pub fn stake(&self, caller: Address, params: StakeParams) -> LedgerResult<()> {
        self.atomically("stake", |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut staker = self.live_profile(params.staker)?;
            AccessPolicy::require_owner_or_dispatcher(&staker, caller)?;
            if params.amount == 0 {
                return Err(LedgerError::ZeroStakeAmount);
            }
            self.require_whitelisted(WhitelistKind::Currency, params.currency)?;

            let mut root = self.resolve_root(params.publication)?;
            let publication = root.reference();
            let stake_key = StakeKey {
                publication,
                staker: params.staker,
                stake_type: params.stake_type,
            };
            let first_stake = !self.store.has_staked(&stake_key)?;

            let (amount, stakers) = match params.stake_type {
                StakeType::Boost => (&mut root.boost.amount, &mut root.boost.stakers),
                StakeType::Bet => {
                    if !root.bet.is_open(ctx.now) {
                        return Err(LedgerError::BetClosed(publication));
                    }
                    (&mut root.bet.amount, &mut root.bet.stakers)
                }
            };
            *amount = amount
                .checked_add(params.amount)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            if first_stake {
                increment(stakers)?;
            }
            increment(&mut staker.stats.bet_count)?;

            self.tokens
                .transfer_from(params.currency, caller, self.config.hub, params.amount)?;

            self.store.put_profile(staker)?;
            self.store.put_publication(root)?;
            if first_stake {
                self.store.set_staked(stake_key)?;
            }
            ctx.emit(LedgerEvent::Staked {
                staker: params.staker,
                publication,
                stake_type: params.stake_type,
                currency: params.currency,
                amount: params.amount,
            });
            Ok(())
        })?;

        self.bump_stats(|s| s.stakes += 1);
        debug!(staker = %params.staker, amount = %params.amount, "Stake placed");
        Ok(())
    }

    /// Sets the winning option of a bet once its deadline has passed.
    #[instrument(skip(self))]
    pub fn resolve_bet(&self, caller: Address, profile_id: ProfileId, pub_id: PubId, correct_option: u8) -> LedgerResult<()> {
        self.atomically("resolve_bet", |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut root = self.resolve_root(PublicationRef::new(profile_id, pub_id))?;
            let publication = root.reference();
            let owner = self.live_profile(root.profile_id)?;
            AccessPolicy::require_owner_or_dispatcher(&owner, caller)?;

            if root.bet.correct_option.is_some() {
                return Err(LedgerError::BetAlreadyResolved(publication));
            }
            match root.bet.deadline {
                Some(deadline) if ctx.now >= deadline => {}
                _ => return Err(LedgerError::BetNotResolvable(publication)),
            }
            root.bet.correct_option = Some(correct_option);
            self.store.put_publication(root)?;

            ctx.emit(LedgerEvent::BetResolved {
                publication,
                correct_option,
            });
            Ok(())
        })
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Whether `follower` follows a live profile.
    pub fn is_following(&self, profile_id: ProfileId, follower: Address) -> LedgerResult<bool> {
        self.live_profile(profile_id)?;
        Ok(<Self as FollowGraph>::is_following(self, profile_id, follower)?)
    }

    /// Whether `actor` has performed `kind` on a publication.
    pub fn has_acted(&self, publication: PublicationRef, actor: Address, kind: ActionKind) -> LedgerResult<bool> {
        Ok(self.store.has_acted(&ActionKey::new(publication, actor, kind))?)
    }
}
