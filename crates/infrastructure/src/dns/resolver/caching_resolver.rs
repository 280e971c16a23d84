use async_trait::async_trait;
use bytes::Bytes;
use dohgate_application::ports::{DnsResolver, RecordLookup, WireCodec};
use dohgate_domain::{DnsQuery, DomainError};
use std::sync::Arc;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// Resolves through the recursive/caching collaborator and assembles the
/// wire response locally.
pub struct CachingResolver {
    lookup: Arc<dyn RecordLookup>,
    codec: Arc<dyn WireCodec>,
}

impl CachingResolver {
    pub fn new(lookup: Arc<dyn RecordLookup>, codec: Arc<dyn WireCodec>) -> Self {
        Self { lookup, codec }
    }
}

#[async_trait]
impl DnsResolver for CachingResolver {
    async fn resolve(&self, query: &DnsQuery, deadline: Instant) -> Result<Bytes, DomainError> {
        let result = timeout_at(
            deadline,
            self.lookup.lookup(&query.domain, query.record_type, deadline),
        )
        .await
        .map_err(|_| DomainError::QueryTimeout)?;

        match result {
            Ok(records) => {
                debug!(
                    domain = %query.domain,
                    record_type = %query.record_type,
                    answers = records.len(),
                    "Lookup answered"
                );
                self.codec.pack_answer(query, &records, false)
            }
            Err(DomainError::NxDomain) => {
                debug!(domain = %query.domain, record_type = %query.record_type, "NXDOMAIN");
                self.codec.pack_answer(query, &[], true)
            }
            Err(e @ (DomainError::QueryTimeout | DomainError::TransportTimeout { .. })) => Err(e),
            Err(e) => Err(DomainError::Upstream(e.to_string())),
        }
    }

    fn strategy_name(&self) -> &'static str {
        "internal"
    }
}
