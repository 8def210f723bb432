//! Profiles, handles and publications.

use super::{OpContext, SocialLedgerService};
use crate::domain::access::AccessPolicy;
use crate::domain::entities::{Profile, Publication};
use crate::domain::invariants::check_publication_shape;
use crate::domain::services::{handle_hash, validate_handle, validate_uri};
use crate::domain::value_objects::{ActionKind, Address, ProfileId, PubId, WhitelistKind};
use crate::errors::{LedgerError, LedgerResult, StoreError};
use crate::events::LedgerEvent;
use crate::ports::inbound::{CommentParams, CreateProfileParams, MirrorParams, PostParams};
use crate::ports::outbound::{Clock, EventSink, LedgerStore};
use tracing::{debug, info, instrument};

impl<S: LedgerStore, E: EventSink, C: Clock> SocialLedgerService<S, E, C> {
    // =========================================================================
    // PROFILES
    // =========================================================================

    /// Mints a profile to `params.to` and reserves its handle.
    ///
    /// The first profile a wallet receives becomes its default profile.
    #[instrument(skip(self, params), fields(handle = %params.handle))]
    pub fn create_profile(&self, caller: Address, params: CreateProfileParams) -> LedgerResult<ProfileId> {
        let profile_id = self.atomically("create_profile", |ctx| {
            let mut settings = self.settings()?;
            settings.state.ensure_unpaused()?;
            if self.config.require_whitelisted_profile_creators {
                self.require_whitelisted(WhitelistKind::ProfileCreator, caller)?;
            }
            if params.to.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }
            validate_handle(&params.handle, self.config.max_handle_length)?;
            validate_uri(&params.image_uri, self.config.max_uri_length)?;

            let key = handle_hash(&params.handle);
            if self.store.handle_owner(&key)?.is_some() {
                return Err(LedgerError::HandleTaken {
                    handle: params.handle.clone(),
                });
            }
            if let Some(module) = params.follow_module {
                self.check_follow_module(module)?;
            }

            let profile_id = ProfileId(
                settings
                    .profile_count
                    .checked_add(1)
                    .ok_or(LedgerError::ArithmeticOverflow)?,
            );
            settings.profile_count = profile_id.0;
            self.store.put_settings(settings)?;

            let mut profile = Profile::new(
                profile_id,
                params.to,
                params.handle.clone(),
                params.image_uri.clone(),
                ctx.now,
            );
            profile.follow_module = params.follow_module;
            self.store.put_profile(profile)?;
            self.store.set_handle_owner(key, Some(profile_id))?;

            ctx.emit(LedgerEvent::ProfileCreated {
                profile_id,
                creator: caller,
                owner: params.to,
                handle: params.handle.clone(),
                image_uri: params.image_uri.clone(),
                follow_module: params.follow_module,
            });
            if self.store.default_profile(params.to)?.is_none() {
                self.store.set_default_profile(params.to, Some(profile_id))?;
                ctx.emit(LedgerEvent::DefaultProfileSet {
                    wallet: params.to,
                    profile_id: Some(profile_id),
                });
            }

            if let Some(module) = params.follow_module {
                self.init_follow_module(module, profile_id, &params.follow_module_init_data)?;
            }
            Ok(profile_id)
        })?;

        self.bump_stats(|s| s.profiles_created += 1);
        info!(profile_id = %profile_id, owner = %params.to, "Profile created");
        Ok(profile_id)
    }

    /// Sets or clears the caller's default profile.
    #[instrument(skip(self))]
    pub fn set_default_profile(&self, caller: Address, profile_id: Option<ProfileId>) -> LedgerResult<()> {
        self.atomically("set_default_profile", |ctx| {
            self.state()?.ensure_not_paused()?;
            if let Some(id) = profile_id {
                let profile = self.live_profile(id)?;
                AccessPolicy::require_owner(&profile, caller)?;
            }
            self.store.set_default_profile(caller, profile_id)?;
            ctx.emit(LedgerEvent::DefaultProfileSet {
                wallet: caller,
                profile_id,
            });
            Ok(())
        })
    }

    /// Sets or clears the dispatcher allowed to publish for a profile.
    #[instrument(skip(self))]
    pub fn set_dispatcher(
        &self,
        caller: Address,
        profile_id: ProfileId,
        dispatcher: Option<Address>,
    ) -> LedgerResult<()> {
        self.atomically("set_dispatcher", |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut profile = self.live_profile(profile_id)?;
            AccessPolicy::require_owner(&profile, caller)?;
            profile.dispatcher = dispatcher;
            self.store.put_profile(profile)?;
            ctx.emit(LedgerEvent::DispatcherSet {
                profile_id,
                dispatcher,
            });
            Ok(())
        })
    }

    /// Sets or clears a profile's follow module, initialising the new one.
    #[instrument(skip(self, init_data))]
    pub fn set_follow_module(
        &self,
        caller: Address,
        profile_id: ProfileId,
        follow_module: Option<Address>,
        init_data: &[u8],
    ) -> LedgerResult<()> {
        self.atomically("set_follow_module", |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut profile = self.live_profile(profile_id)?;
            AccessPolicy::require_owner(&profile, caller)?;
            if let Some(module) = follow_module {
                self.check_follow_module(module)?;
            }
            profile.follow_module = follow_module;
            self.store.put_profile(profile)?;
            ctx.emit(LedgerEvent::FollowModuleSet {
                profile_id,
                follow_module,
            });
            if let Some(module) = follow_module {
                self.init_follow_module(module, profile_id, init_data)?;
            }
            Ok(())
        })
    }

    /// Moves a profile to `to`.
    ///
    /// The dispatcher is revoked and the sender's default-profile pointer is
    /// cleared if it named this profile.
    #[instrument(skip(self))]
    pub fn transfer_profile(&self, caller: Address, profile_id: ProfileId, to: Address) -> LedgerResult<()> {
        self.atomically("transfer_profile", |ctx| {
            self.state()?.ensure_not_paused()?;
            if to.is_zero() {
                return Err(LedgerError::ZeroAddress);
            }
            let mut profile = self.live_profile(profile_id)?;
            AccessPolicy::require_owner(&profile, caller)?;

            if profile.dispatcher.take().is_some() {
                ctx.emit(LedgerEvent::DispatcherSet {
                    profile_id,
                    dispatcher: None,
                });
            }
            profile.owner = Some(to);
            self.store.put_profile(profile)?;
            self.clear_default_pointer(ctx, caller, profile_id)?;

            ctx.emit(LedgerEvent::ProfileTransferred {
                profile_id,
                from: caller,
                to,
            });
            Ok(())
        })?;
        info!(profile_id = %profile_id, to = %to, "Profile transferred");
        Ok(())
    }

    /// Burns a profile. Its handle becomes available again.
    #[instrument(skip(self))]
    pub fn burn_profile(&self, caller: Address, profile_id: ProfileId) -> LedgerResult<()> {
        self.atomically("burn_profile", |ctx| {
            self.state()?.ensure_not_paused()?;
            let mut profile = self.live_profile(profile_id)?;
            AccessPolicy::require_owner(&profile, caller)?;

            let handle = std::mem::take(&mut profile.handle);
            self.store.set_handle_owner(handle_hash(&handle), None)?;
            self.clear_default_pointer(ctx, caller, profile_id)?;
            profile.dispatcher = None;
            profile.owner = None;
            self.store.put_profile(profile)?;

            ctx.emit(LedgerEvent::ProfileBurned {
                profile_id,
                owner: caller,
                handle,
            });
            Ok(())
        })?;
        info!(profile_id = %profile_id, "Profile burned");
        Ok(())
    }

    /// Profile id reserved under `handle`.
    pub fn get_profile_id_by_handle(&self, handle: &str) -> LedgerResult<Option<ProfileId>> {
        Ok(self.store.handle_owner(&handle_hash(handle))?)
    }

    // =========================================================================
    // PUBLICATIONS
    // =========================================================================

    /// Publishes a post.
    #[instrument(skip(self, params), fields(profile_id = %params.profile_id))]
    pub fn post(&self, caller: Address, params: PostParams) -> LedgerResult<PubId> {
        let pub_id = self.atomically("post", |ctx| {
            let mut profile = self.publisher(caller, params.profile_id)?;
            validate_uri(&params.content_uri, self.config.max_uri_length)?;
            self.check_publication_modules(Some(params.collect_module), params.reference_module)?;

            let pub_id = Self::next_pub_id(&mut profile)?;
            self.store.put_profile(profile)?;

            let mut publication = Publication::new(params.profile_id, pub_id, ctx.now);
            publication.content_uri = params.content_uri.clone();
            publication.collect_module = Some(params.collect_module);
            publication.reference_module = params.reference_module;
            publication.bet.deadline = params.bet_deadline;
            self.store_publication(&publication)?;

            ctx.emit(LedgerEvent::PostCreated {
                profile_id: params.profile_id,
                pub_id,
                content_uri: params.content_uri.clone(),
                collect_module: params.collect_module,
                reference_module: params.reference_module,
                bet_deadline: params.bet_deadline,
            });
            self.init_publication_modules(
                &publication,
                &params.collect_module_init_data,
                &params.reference_module_init_data,
            )?;
            Ok(pub_id)
        })?;

        self.bump_stats(|s| s.publications_created += 1);
        debug!(profile_id = %params.profile_id, pub_id = %pub_id, "Post created");
        Ok(pub_id)
    }

    /// Publishes a comment on `params.pointed`.
    ///
    /// Counts as an answer for the commenter and as a Comment action on the
    /// pointed publication's root.
    #[instrument(skip(self, params), fields(profile_id = %params.profile_id, pointed = %params.pointed))]
    pub fn comment(&self, caller: Address, params: CommentParams) -> LedgerResult<PubId> {
        let pub_id = self.atomically("comment", |ctx| {
            let mut profile = self.publisher(caller, params.profile_id)?;
            validate_uri(&params.content_uri, self.config.max_uri_length)?;
            self.check_publication_modules(Some(params.collect_module), params.reference_module)?;
            let pointed = self.existing_publication(params.pointed)?;
            let mut root = self.resolve_root(params.pointed)?;

            let pub_id = Self::next_pub_id(&mut profile)?;
            profile.stats.answers = profile
                .stats
                .answers
                .checked_add(1)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            self.store.put_profile(profile)?;

            let mut publication = Publication::new(params.profile_id, pub_id, ctx.now);
            publication.pointer = Some(params.pointed);
            publication.content_uri = params.content_uri.clone();
            publication.collect_module = Some(params.collect_module);
            publication.reference_module = params.reference_module;
            self.store_publication(&publication)?;

            if self.record_action(ctx, &mut root, caller, ActionKind::Comment)? != 0 {
                self.store.put_publication(root)?;
            }

            ctx.emit(LedgerEvent::CommentCreated {
                profile_id: params.profile_id,
                pub_id,
                content_uri: params.content_uri.clone(),
                pointed: params.pointed,
                collect_module: params.collect_module,
                reference_module: params.reference_module,
            });
            self.init_publication_modules(
                &publication,
                &params.collect_module_init_data,
                &params.reference_module_init_data,
            )?;
            if let Some(module) = pointed.reference_module {
                self.modules
                    .reference_module(module)?
                    .process_comment(params.profile_id, params.pointed, &params.reference_module_data, self)
                    .map_err(|e| LedgerError::module_rejected(module, e))?;
            }
            Ok(pub_id)
        })?;

        self.bump_stats(|s| s.publications_created += 1);
        debug!(profile_id = %params.profile_id, pub_id = %pub_id, "Comment created");
        Ok(pub_id)
    }

    /// Publishes a mirror of `params.pointed`.
    ///
    /// The pointer is stored as given; the root's reference module decides
    /// and the root is credited with the mirror.
    #[instrument(skip(self, params), fields(profile_id = %params.profile_id, pointed = %params.pointed))]
    pub fn mirror(&self, caller: Address, params: MirrorParams) -> LedgerResult<PubId> {
        let pub_id = self.atomically("mirror", |ctx| {
            let mut profile = self.publisher(caller, params.profile_id)?;
            self.check_publication_modules(None, params.reference_module)?;
            let mut root = self.resolve_root(params.pointed)?;

            let pub_id = Self::next_pub_id(&mut profile)?;
            self.store.put_profile(profile)?;

            let mut publication = Publication::new(params.profile_id, pub_id, ctx.now);
            publication.pointer = Some(params.pointed);
            publication.reference_module = params.reference_module;
            self.store_publication(&publication)?;

            root.mirrored = root.mirrored.checked_add(1).ok_or(LedgerError::ArithmeticOverflow)?;
            let mut owner = self.content_owner(root.profile_id)?;
            owner.stats.mirrored = owner
                .stats
                .mirrored
                .checked_add(1)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            self.store.put_profile(owner)?;
            self.record_action(ctx, &mut root, caller, ActionKind::Mirror)?;
            let root_ref = root.reference();
            let root_module = root.reference_module;
            self.store.put_publication(root)?;

            ctx.emit(LedgerEvent::MirrorCreated {
                profile_id: params.profile_id,
                pub_id,
                pointed: params.pointed,
                reference_module: params.reference_module,
            });
            self.init_publication_modules(&publication, &[], &params.reference_module_init_data)?;
            if let Some(module) = root_module {
                self.modules
                    .reference_module(module)?
                    .process_mirror(params.profile_id, root_ref, &params.reference_module_data, self)
                    .map_err(|e| LedgerError::module_rejected(module, e))?;
            }
            Ok(pub_id)
        })?;

        self.bump_stats(|s| s.publications_created += 1);
        debug!(profile_id = %params.profile_id, pub_id = %pub_id, "Mirror created");
        Ok(pub_id)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Live profile the caller may publish from, with publishing enabled.
    fn publisher(&self, caller: Address, profile_id: ProfileId) -> LedgerResult<Profile> {
        self.state()?.ensure_publishing_enabled()?;
        let profile = self.live_profile(profile_id)?;
        AccessPolicy::require_owner_or_dispatcher(&profile, caller)?;
        Ok(profile)
    }

    fn next_pub_id(profile: &mut Profile) -> LedgerResult<PubId> {
        profile.pub_count = profile
            .pub_count
            .checked_add(1)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        Ok(PubId(profile.pub_count))
    }

    fn store_publication(&self, publication: &Publication) -> LedgerResult<()> {
        if !check_publication_shape(publication) {
            return Err(StoreError::Corrupted(format!("malformed publication {}", publication.reference())).into());
        }
        self.store.put_publication(publication.clone())?;
        Ok(())
    }

    fn clear_default_pointer(&self, ctx: &mut OpContext, wallet: Address, profile_id: ProfileId) -> LedgerResult<()> {
        if self.store.default_profile(wallet)? == Some(profile_id) {
            self.store.set_default_profile(wallet, None)?;
            ctx.emit(LedgerEvent::DefaultProfileSet {
                wallet,
                profile_id: None,
            });
        }
        Ok(())
    }

    fn check_follow_module(&self, module: Address) -> LedgerResult<()> {
        self.require_whitelisted(WhitelistKind::FollowModule, module)?;
        self.modules.follow_module(module)?;
        Ok(())
    }

    fn init_follow_module(&self, module: Address, profile_id: ProfileId, data: &[u8]) -> LedgerResult<()> {
        self.modules
            .follow_module(module)?
            .initialize_follow_module(profile_id, data)
            .map_err(|e| LedgerError::module_rejected(module, e))
    }

    fn check_publication_modules(&self, collect: Option<Address>, reference: Option<Address>) -> LedgerResult<()> {
        if let Some(module) = collect {
            self.require_whitelisted(WhitelistKind::CollectModule, module)?;
            self.modules.collect_module(module)?;
        }
        if let Some(module) = reference {
            self.require_whitelisted(WhitelistKind::ReferenceModule, module)?;
            self.modules.reference_module(module)?;
        }
        Ok(())
    }

    fn init_publication_modules(
        &self,
        publication: &Publication,
        collect_data: &[u8],
        reference_data: &[u8],
    ) -> LedgerResult<()> {
        if let Some(module) = publication.collect_module {
            self.modules
                .collect_module(module)?
                .initialize_publication_collect_module(publication.profile_id, publication.pub_id, collect_data)
                .map_err(|e| LedgerError::module_rejected(module, e))?;
        }
        if let Some(module) = publication.reference_module {
            self.modules
                .reference_module(module)?
                .initialize_reference_module(publication.profile_id, publication.pub_id, reference_data)
                .map_err(|e| LedgerError::module_rejected(module, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::state_machine::ProtocolState;
    use crate::domain::value_objects::{ActionKind, PubId, PublicationRef, WhitelistKind};
    use crate::errors::LedgerError;
    use crate::events::LedgerEvent;
    use crate::ports::inbound::{CreateProfileParams, PostParams};
    use crate::service::{create_test_service, fixtures::*};

    #[test]
    fn test_create_profile_assigns_dense_ids_and_default() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let second = t.create_profile(ALICE, "alice.two").unwrap();
        assert_eq!(alice.0, 1);
        assert_eq!(second.0, 2);
        assert_eq!(t.service.get_default_profile(ALICE).unwrap(), Some(alice));
        assert_eq!(t.service.get_profile_id_by_handle("alice.two").unwrap(), Some(second));
        assert_eq!(t.service.protocol_settings().unwrap().profile_count, 2);
    }

    #[test]
    fn test_create_profile_rejects_taken_and_invalid_handles() {
        let t = create_test_service().unwrap();
        t.create_profile(ALICE, "alice").unwrap();
        assert_eq!(
            t.create_profile(BOB, "alice"),
            Err(LedgerError::HandleTaken { handle: "alice".into() })
        );
        assert_eq!(
            t.create_profile(BOB, "Bob"),
            Err(LedgerError::HandleContainsInvalidCharacters { handle: "Bob".into() })
        );
        assert!(matches!(
            t.create_profile(BOB, ""),
            Err(LedgerError::HandleLengthInvalid { len: 0, .. })
        ));
    }

    #[test]
    fn test_create_profile_requires_unpaused() {
        let t = create_test_service().unwrap();
        t.service
            .set_state(GOVERNANCE, ProtocolState::PublishingPaused)
            .unwrap();
        assert_eq!(t.create_profile(ALICE, "alice"), Err(LedgerError::ProtocolPaused));
    }

    #[test]
    fn test_create_profile_rejects_unlisted_follow_module() {
        let t = create_test_service().unwrap();
        let module = FREE_COLLECT;
        let result = t.service.create_profile(
            ALICE,
            CreateProfileParams {
                to: ALICE,
                handle: "alice".into(),
                follow_module: Some(module),
                ..CreateProfileParams::default()
            },
        );
        assert_eq!(result, Err(LedgerError::FollowModuleNotWhitelisted(module)));
        assert_eq!(t.service.get_profile_id_by_handle("alice").unwrap(), None);
    }

    #[test]
    fn test_burn_releases_handle() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        t.service.burn_profile(ALICE, alice).unwrap();

        assert_eq!(t.service.get_profile(alice).unwrap(), None);
        assert_eq!(t.service.get_profile_id_by_handle("alice").unwrap(), None);
        assert_eq!(t.service.get_default_profile(ALICE).unwrap(), None);
        assert_eq!(t.service.burn_profile(ALICE, alice), Err(LedgerError::ProfileDoesNotExist(alice)));

        let again = t.create_profile(BOB, "alice").unwrap();
        assert_eq!(t.service.get_profile_id_by_handle("alice").unwrap(), Some(again));
    }

    #[test]
    fn test_transfer_clears_dispatcher_and_default() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        t.service.set_dispatcher(ALICE, alice, Some(CAROL)).unwrap();
        assert!(t.post(CAROL, alice).is_ok());

        t.service.transfer_profile(ALICE, alice, BOB).unwrap();
        let profile = t.service.get_profile(alice).unwrap().unwrap();
        assert_eq!(profile.owner, Some(BOB));
        assert_eq!(profile.dispatcher, None);
        assert_eq!(t.service.get_default_profile(ALICE).unwrap(), None);
        assert_eq!(t.post(CAROL, alice), Err(LedgerError::NotProfileOwnerOrDispatcher));
        assert_eq!(
            t.service.transfer_profile(ALICE, alice, CAROL),
            Err(LedgerError::NotProfileOwner)
        );
    }

    #[test]
    fn test_post_requires_whitelisted_collect_module() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let result = t.service.post(
            ALICE,
            PostParams {
                profile_id: alice,
                content_uri: "ipfs://x".into(),
                collect_module: CAROL,
                ..PostParams::default()
            },
        );
        assert_eq!(result, Err(LedgerError::CollectModuleNotWhitelisted(CAROL)));

        t.service
            .set_whitelisted(GOVERNANCE, WhitelistKind::CollectModule, CAROL, true)
            .unwrap();
        let result = t.service.post(
            ALICE,
            PostParams {
                profile_id: alice,
                content_uri: "ipfs://x".into(),
                collect_module: CAROL,
                ..PostParams::default()
            },
        );
        assert_eq!(result, Err(LedgerError::ModuleNotRegistered(CAROL)));
        assert_eq!(t.service.get_profile(alice).unwrap().unwrap().pub_count, 0);
    }

    #[test]
    fn test_comment_counts_answer_and_scores_root() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let bob = t.create_profile(BOB, "bob").unwrap();
        let post = t.post(ALICE, alice).unwrap();
        let pointed = PublicationRef::new(alice, post);

        let comment = t.comment(BOB, bob, pointed).unwrap();
        assert_eq!(comment, PubId(1));
        assert_eq!(t.service.get_profile(bob).unwrap().unwrap().stats.answers, 1);

        let root = t.service.get_publication(alice, post).unwrap().unwrap();
        assert_eq!(root.score.sub_score(ActionKind::Comment), 3);
        assert!(t.service.has_acted(pointed, BOB, ActionKind::Comment).unwrap());

        // A second comment is a new publication but no new score.
        t.comment(BOB, bob, pointed).unwrap();
        let root = t.service.get_publication(alice, post).unwrap().unwrap();
        assert_eq!(root.score.total, 3);
        assert_eq!(t.service.get_profile(bob).unwrap().unwrap().stats.answers, 2);
    }

    #[test]
    fn test_comment_on_missing_publication() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let missing = PublicationRef::new(alice, PubId(4));
        assert_eq!(
            t.comment(ALICE, alice, missing),
            Err(LedgerError::PublicationDoesNotExist(missing))
        );
    }

    #[test]
    fn test_mirror_credits_root() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        let bob = t.create_profile(BOB, "bob").unwrap();
        let carol = t.create_profile(CAROL, "carol").unwrap();
        let post = t.post(ALICE, alice).unwrap();
        let first = t.mirror(BOB, bob, PublicationRef::new(alice, post)).unwrap();
        let second = t.mirror(CAROL, carol, PublicationRef::new(bob, first)).unwrap();

        let mirror = t.service.get_publication(carol, second).unwrap().unwrap();
        assert_eq!(mirror.pointer, Some(PublicationRef::new(bob, first)));
        assert_eq!(
            t.service.get_pointed_if_mirror(carol, second).unwrap(),
            PublicationRef::new(alice, post)
        );

        let root = t.service.get_publication(alice, post).unwrap().unwrap();
        assert_eq!(root.mirrored, 2);
        assert_eq!(root.score.sub_score(ActionKind::Mirror), 6);
        assert_eq!(t.service.get_profile(alice).unwrap().unwrap().stats.mirrored, 2);
    }

    #[test]
    fn test_publishing_paused_blocks_posts() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        t.service
            .set_state(EMERGENCY_ADMIN, ProtocolState::PublishingPaused)
            .unwrap();
        assert_eq!(t.post(ALICE, alice), Err(LedgerError::PublishingDisabled));
        t.service.set_state(GOVERNANCE, ProtocolState::Paused).unwrap();
        assert_eq!(t.post(ALICE, alice), Err(LedgerError::ProtocolPaused));
    }

    #[test]
    fn test_post_events() {
        let t = create_test_service().unwrap();
        let alice = t.create_profile(ALICE, "alice").unwrap();
        t.service.event_sink().take();
        let pub_id = t.post(ALICE, alice).unwrap();
        assert_eq!(
            t.service.event_sink().events(),
            vec![LedgerEvent::PostCreated {
                profile_id: alice,
                pub_id,
                content_uri: "ipfs://post".into(),
                collect_module: FREE_COLLECT,
                reference_module: None,
                bet_deadline: None,
            }]
        );
    }
}
