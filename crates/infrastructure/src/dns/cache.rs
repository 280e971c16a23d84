pub mod cached_lookup;
pub mod key;

pub use cached_lookup::{CachedLookup, NEGATIVE_TTL_SECS};
pub use key::CacheKey;
