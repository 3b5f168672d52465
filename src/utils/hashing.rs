//! Stable hashing for cache keys

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `value`.
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Cache row key for a repository, derived from its `owner/name`.
pub fn repo_hash(name_with_owner: &str) -> String {
    sha256_hex(name_with_owner)
}
