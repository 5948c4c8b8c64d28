//! Shared key generation for upload credentials.
//!
//! Key format: `media/{customer_id}/{YYYY}/{MM}/{DD}/{object_name}`.

use chrono::{DateTime, Utc};
use presign_core::constants::STORAGE_KEY_PREFIX;
use presign_core::StorageKey;

/// Derive the storage key for an upload issued at `issued_at`.
///
/// The date partition is taken from the issuance instant (UTC), never from the caller,
/// so objects land in per-day prefixes that lifecycle rules can target.
pub fn derive_storage_key(
    customer_id: &str,
    object_name: &str,
    issued_at: DateTime<Utc>,
) -> StorageKey {
    StorageKey::new(format!(
        "{}/{}/{}/{}",
        STORAGE_KEY_PREFIX,
        customer_id,
        issued_at.format("%Y/%m/%d"),
        object_name
    ))
}
