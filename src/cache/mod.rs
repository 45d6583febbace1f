//! Flat-file cache for raw API responses.
//!
//! - Entries are keyed by a hash of the request URL
//! - An entry's existence is taken as proof of validity (no expiry)
//! - Writes are last-writer-wins; there is no locking

mod key;
mod layer;
mod storage;

pub use key::cache_key;
pub use layer::CacheLayer;
pub use storage::{CacheStorage, FileStorage, NoopStorage};
