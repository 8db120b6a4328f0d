use crate::domain::Channel;
use sha2::{Digest, Sha256};

/// Deterministic channel for a record whose payload does not name one.
///
/// Hashes `(listing_name, guest_name, id)` and reduces it modulo the
/// inferable channel set, so a given record always lands on the same channel.
pub fn infer_channel(listing_name: &str, guest_name: &str, id: &str) -> Channel {
    let mut hasher = Sha256::new();
    for part in [listing_name, guest_name, id] {
        hasher.update(part.as_bytes());
        // unit separator keeps ("ab", "c") and ("a", "bc") apart
        hasher.update([0x1f]);
    }
    let digest = hasher.finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let bucket = u64::from_be_bytes(head) % Channel::INFERABLE.len() as u64;

    Channel::INFERABLE[bucket as usize]
}

/// Explicit channel if the payload carries a recognized one, inferred otherwise.
pub fn resolve_channel(raw: Option<&str>, listing_name: &str, guest_name: &str, id: &str) -> Channel {
    raw.and_then(Channel::parse)
        .unwrap_or_else(|| infer_channel(listing_name, guest_name, id))
}
