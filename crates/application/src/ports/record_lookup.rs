use async_trait::async_trait;
use dohgate_domain::{DomainError, RecordType, ResourceRecord};
use tokio::time::Instant;

/// The recursive/caching resolver collaborator.
///
/// Implementations must be safe for concurrent use; any cache they keep is
/// theirs to lock. A name that does not exist is reported as
/// `DomainError::NxDomain`.
#[async_trait]
pub trait RecordLookup: Send + Sync {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
        deadline: Instant,
    ) -> Result<Vec<ResourceRecord>, DomainError>;
}
