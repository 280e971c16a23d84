use async_trait::async_trait;
use bytes::Bytes;
use dohgate_domain::{DnsQuery, DomainError};
use tokio::time::Instant;

/// A resolution strategy. Selected once at start-up and shared by every request.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    /// Resolve `query` into a complete wire-format response, giving up at `deadline`.
    async fn resolve(&self, query: &DnsQuery, deadline: Instant) -> Result<Bytes, DomainError>;

    fn strategy_name(&self) -> &'static str;
}
