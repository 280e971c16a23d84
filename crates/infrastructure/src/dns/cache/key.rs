use dohgate_domain::RecordType;
use std::sync::Arc;

/// Cache key: lower-cased name without the trailing dot, plus the type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        let trimmed = domain.strip_suffix('.').unwrap_or(domain);
        Self {
            domain: Arc::from(trimmed.to_ascii_lowercase()),
            record_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_case_and_trailing_dot() {
        assert_eq!(
            CacheKey::new("Example.COM.", RecordType::A),
            CacheKey::new("example.com", RecordType::A)
        );
    }

    #[test]
    fn test_key_distinguishes_types() {
        assert_ne!(
            CacheKey::new("example.com", RecordType::A),
            CacheKey::new("example.com", RecordType::AAAA)
        );
    }
}
