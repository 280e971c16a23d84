use super::RecordType;
use bytes::Bytes;
use std::sync::Arc;

/// A validated single-question query, ready for resolution.
///
/// `wire` is the query exactly as the client sent it (or, for host name
/// GET payloads, a query synthesised for that name). The forwarder relays
/// these bytes untouched.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub wire: Bytes,
    pub id: u16,
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(
        wire: Bytes,
        id: u16,
        domain: impl Into<Arc<str>>,
        record_type: RecordType,
    ) -> Self {
        Self {
            wire,
            id,
            domain: domain.into(),
            record_type,
        }
    }
}
