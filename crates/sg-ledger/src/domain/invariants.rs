//! # Domain Invariants
//!
//! Structural invariants of the ledger, checked after mutations and in tests.

use crate::domain::entities::{ContentScore, Profile, Publication, PublicationKind};
use crate::domain::services::handle_hash;
use crate::domain::value_objects::{Hash, ProfileId};

/// Handle index and profile record agree.
///
/// A live profile's handle hashes to a key that maps back to its id; a burned
/// profile owns no handle.
#[must_use]
pub fn check_handle_bijection(profile: &Profile, indexed: impl Fn(&Hash) -> Option<ProfileId>) -> bool {
    if profile.is_burned() {
        return profile.handle.is_empty();
    }
    indexed(&handle_hash(&profile.handle)) == Some(profile.id)
}

/// A score total equals the sum of its sub-scores.
#[must_use]
pub fn check_score_sum(score: &ContentScore) -> bool {
    score
        .sub_scores
        .iter()
        .try_fold(0i64, |acc, s| acc.checked_add(*s))
        == Some(score.total)
}

/// Mirrors carry a pointer and no collect module; comments carry both.
#[must_use]
pub fn check_publication_shape(publication: &Publication) -> bool {
    match publication.kind() {
        PublicationKind::Mirror => publication.pointer.is_some() && publication.collect_record.is_none(),
        PublicationKind::Comment => publication.pointer.is_some(),
        PublicationKind::Post => publication.pointer.is_none(),
    }
}

/// A follow-ownership reference is set once and never replaced.
#[must_use]
pub fn check_follow_record_stable(before: &Profile, after: &Profile) -> bool {
    before.follow_record.is_none() || before.follow_record == after.follow_record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ActionKind, Address, PubId, PublicationRef};

    #[test]
    fn test_handle_bijection() {
        let mut profile = Profile::new(ProfileId(3), Address::repeat_byte(1), "carol".into(), String::new(), 0);
        let key = handle_hash("carol");
        assert!(check_handle_bijection(&profile, |k| (*k == key).then_some(ProfileId(3))));
        assert!(!check_handle_bijection(&profile, |_| None));

        profile.owner = None;
        assert!(!check_handle_bijection(&profile, |_| None));
        profile.handle.clear();
        assert!(check_handle_bijection(&profile, |_| None));
    }

    #[test]
    fn test_score_sum() {
        let score = ContentScore::default().apply(ActionKind::Mirror, 6).unwrap();
        assert!(check_score_sum(&score));
        let broken = ContentScore { total: 1, ..score };
        assert!(!check_score_sum(&broken));
    }

    #[test]
    fn test_publication_shape() {
        let mut mirror = Publication::new(ProfileId(1), PubId(2), 0);
        assert!(!check_publication_shape(&mirror));
        mirror.pointer = Some(PublicationRef::new(ProfileId(1), PubId(1)));
        assert!(check_publication_shape(&mirror));
    }

    #[test]
    fn test_follow_record_stable() {
        let before = Profile::new(ProfileId(1), Address::repeat_byte(1), "a".into(), String::new(), 0);
        let mut after = before.clone();
        after.follow_record = Some(Address::repeat_byte(9));
        assert!(check_follow_record_stable(&before, &after));

        let before = after.clone();
        after.follow_record = Some(Address::repeat_byte(8));
        assert!(!check_follow_record_stable(&before, &after));
    }
}
