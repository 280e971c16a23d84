pub mod caching_resolver;

pub use caching_resolver::CachingResolver;
