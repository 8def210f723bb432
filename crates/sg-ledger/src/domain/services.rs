//! # Domain Services
//!
//! Pure functions: hashing, handle rules and deterministic derivation of
//! ownership-record addresses and metadata.

use crate::domain::value_objects::{Address, Hash, ProfileId, PubId, PublicationRef};
use crate::errors::LedgerError;
use sha3::{Digest, Keccak256};

const FOLLOW_RECORD_TAG: &[u8] = b"sg-ledger/follow-record";
const COLLECT_RECORD_TAG: &[u8] = b"sg-ledger/collect-record";

/// Length of the handle prefix used in record symbols.
const SYMBOL_PREFIX_LEN: usize = 4;

// =============================================================================
// HASHING
// =============================================================================

/// Computes keccak256 of data.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let digest = Keccak256::digest(data);
    Hash(digest.into())
}

/// Handle index key: keccak256 of the handle bytes.
#[must_use]
pub fn handle_hash(handle: &str) -> Hash {
    keccak256(handle.as_bytes())
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Checks length and alphabet (`[a-z0-9._-]`) of a handle.
pub fn validate_handle(handle: &str, max_len: usize) -> Result<(), LedgerError> {
    let len = handle.len();
    if len == 0 || len > max_len {
        return Err(LedgerError::HandleLengthInvalid { len, max: max_len });
    }
    let valid = handle
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'.' | b'_' | b'-'));
    if !valid {
        return Err(LedgerError::HandleContainsInvalidCharacters {
            handle: handle.to_string(),
        });
    }
    Ok(())
}

/// Checks a URI against the length limit.
pub fn validate_uri(uri: &str, max_len: usize) -> Result<(), LedgerError> {
    if uri.len() > max_len {
        return Err(LedgerError::UriTooLong {
            len: uri.len(),
            max: max_len,
        });
    }
    Ok(())
}

// =============================================================================
// OWNERSHIP RECORDS
// =============================================================================

/// Address of a profile's follow-ownership record.
///
/// Address = keccak256(tag ++ hub ++ profileId)\[12:\]
#[must_use]
pub fn follow_record_address(hub: Address, profile_id: ProfileId) -> Address {
    derive_address(FOLLOW_RECORD_TAG, hub, &[profile_id.get()])
}

/// Address of a root publication's collect-ownership record.
///
/// Address = keccak256(tag ++ hub ++ profileId ++ pubId)\[12:\]
#[must_use]
pub fn collect_record_address(hub: Address, publication: PublicationRef) -> Address {
    derive_address(
        COLLECT_RECORD_TAG,
        hub,
        &[publication.profile_id.get(), publication.pub_id.get()],
    )
}

fn derive_address(tag: &[u8], hub: Address, ids: &[u64]) -> Address {
    let mut hasher = Keccak256::new();
    hasher.update(tag);
    hasher.update(hub.as_bytes());
    for id in ids {
        hasher.update(id.to_be_bytes());
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[12..]);
    Address(bytes)
}

fn symbol_prefix(handle: &str) -> String {
    handle.chars().take(SYMBOL_PREFIX_LEN).collect()
}

/// Name and symbol of a follow-ownership record.
#[must_use]
pub fn follow_record_metadata(handle: &str) -> (String, String) {
    (
        format!("{handle}-Follower"),
        format!("{}-Fl", symbol_prefix(handle)),
    )
}

/// Name and symbol of a collect-ownership record.
#[must_use]
pub fn collect_record_metadata(handle: &str, pub_id: PubId) -> (String, String) {
    (
        format!("{handle}-Collect-{pub_id}"),
        format!("{}-Cl-{pub_id}", symbol_prefix(handle)),
    )
}
