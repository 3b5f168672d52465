//! Shared helpers

pub mod format;
pub mod hashing;
pub mod timing;

pub use format::format_with_commas;
pub use hashing::{repo_hash, sha256_hex};
pub use timing::{timed, Timings};
