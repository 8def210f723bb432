//! # Value Objects
//!
//! Immutable domain primitives for the social-graph ledger.
//! These types are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account or contract address.
///
/// Callers, profile owners, policy modules, staking currencies and provisioned
/// ownership records are all identified by an `Address`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The zero address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose bytes are all `byte`. Handy for fixtures.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{}...{}",
            hex::encode(&self.0[..4]),
            hex::encode(&self.0[18..])
        )
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// HASH (32 bytes)
// =============================================================================

/// A 32-byte Keccak-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero hash.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Returns the raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

numeric_id!(
    /// Dense profile identifier, assigned from 1.
    ProfileId
);
numeric_id!(
    /// Publication identifier, local to its profile and assigned from 1.
    PubId
);
numeric_id!(
    /// Identifier of a unit minted by an ownership record, assigned from 1.
    UnitId
);
numeric_id!(
    /// Revision key into the versioned factor tables.
    Revision
);

/// Fully qualified publication key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct PublicationRef {
    /// Owning profile.
    pub profile_id: ProfileId,
    /// Publication id local to the profile.
    pub pub_id: PubId,
}

impl PublicationRef {
    /// Creates a publication key.
    #[must_use]
    pub const fn new(profile_id: ProfileId, pub_id: PubId) -> Self {
        Self { profile_id, pub_id }
    }
}

impl fmt::Display for PublicationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.profile_id, self.pub_id)
    }
}

// =============================================================================
// ACTION KINDS
// =============================================================================

/// Interaction categories tracked per (publication, actor).
///
/// Each kind has its own weight in the action factor table and its own
/// sub-score in a publication's [`ContentScore`](super::entities::ContentScore).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum ActionKind {
    /// Commented on the publication.
    Comment,
    /// Liked the publication.
    Like,
    /// Up-voted the publication.
    Upvote,
    /// Down-voted the publication.
    Downvote,
    /// Reported the publication.
    Report,
    /// Collected the publication.
    Collect,
    /// Mirrored the publication.
    Mirror,
}

impl ActionKind {
    /// Number of action kinds.
    pub const COUNT: usize = 7;

    /// All kinds, in table order.
    pub const ALL: [ActionKind; Self::COUNT] = [
        ActionKind::Comment,
        ActionKind::Like,
        ActionKind::Upvote,
        ActionKind::Downvote,
        ActionKind::Report,
        ActionKind::Collect,
        ActionKind::Mirror,
    ];

    /// Position of this kind in weight and sub-score tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ActionKind::Comment => 0,
            ActionKind::Like => 1,
            ActionKind::Upvote => 2,
            ActionKind::Downvote => 3,
            ActionKind::Report => 4,
            ActionKind::Collect => 5,
            ActionKind::Mirror => 6,
        }
    }

    /// Stable lowercase name, used as a metrics and log label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionKind::Comment => "commented",
            ActionKind::Like => "liked",
            ActionKind::Upvote => "upvoted",
            ActionKind::Downvote => "downvoted",
            ActionKind::Report => "reported",
            ActionKind::Collect => "collected",
            ActionKind::Mirror => "mirrored",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of stake placed on a publication.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum StakeType {
    /// Promote the publication.
    Boost,
    /// Wager on the publication's outcome.
    Bet,
}

/// Registries that governance maintains allow-lists for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub enum WhitelistKind {
    /// Addresses allowed to create profiles.
    ProfileCreator,
    /// Follow policy modules.
    FollowModule,
    /// Collect policy modules.
    CollectModule,
    /// Reference policy modules.
    ReferenceModule,
    /// Fungible tokens accepted for staking.
    Currency,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::repeat_byte(1).is_zero());
    }

    #[test]
    fn test_address_from_slice() {
        assert_eq!(
            Address::from_slice(&[7u8; 20]),
            Some(Address::repeat_byte(7))
        );
        assert!(Address::from_slice(&[7u8; 19]).is_none());
    }

    #[test]
    fn test_address_display_is_abbreviated() {
        let addr = Address::repeat_byte(0xab);
        assert_eq!(format!("{addr}"), "0xabababab...abab");
        assert_eq!(format!("{addr:?}").len(), 42);
    }

    #[test]
    fn test_action_kind_indexes_are_dense() {
        for (i, kind) in ActionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_ids_serialize_transparently() {
        let json = serde_json::to_string(&ProfileId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
