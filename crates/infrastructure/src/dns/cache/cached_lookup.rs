use super::key::CacheKey;
use async_trait::async_trait;
use dashmap::DashMap;
use dohgate_application::ports::RecordLookup;
use dohgate_domain::{DomainError, RecordType, ResourceRecord};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info};

/// How long a NXDOMAIN (or an empty answer) stays cached.
pub const NEGATIVE_TTL_SECS: u64 = 60;

#[derive(Clone)]
enum CachedAnswer {
    Records(Arc<Vec<ResourceRecord>>),
    NxDomain,
}

impl CachedAnswer {
    fn into_result(self) -> Result<Vec<ResourceRecord>, DomainError> {
        match self {
            CachedAnswer::Records(records) => Ok(records.as_ref().clone()),
            CachedAnswer::NxDomain => Err(DomainError::NxDomain),
        }
    }
}

struct CacheEntry {
    answer: CachedAnswer,
    expires_at: Instant,
}

/// `None` until the leader finishes; stays `None` if it failed.
type InflightSender = Arc<watch::Sender<Option<CachedAnswer>>>;
type InflightReceiver = watch::Receiver<Option<CachedAnswer>>;

/// Wakes followers with `None` if the leader's future is dropped mid-lookup.
struct InflightLeaderGuard {
    inflight: Arc<DashMap<CacheKey, InflightSender>>,
    key: CacheKey,
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if let Some((_, tx)) = self.inflight.remove(&self.key) {
            let _ = tx.send(None);
        }
    }
}

/// Bounded TTL cache in front of a `RecordLookup`.
///
/// Positive entries live for the smallest TTL among their records; NXDOMAIN
/// and empty answers live for [`NEGATIVE_TTL_SECS`]. Least recently used
/// entries are evicted once `capacity` is reached. A capacity of zero turns
/// the cache off.
///
/// Concurrent misses for the same key are coalesced: the first caller asks
/// the collaborator, the rest wait for its answer.
pub struct CachedLookup {
    inner: Arc<dyn RecordLookup>,
    entries: Option<Mutex<LruCache<CacheKey, CacheEntry>>>,
    inflight: Arc<DashMap<CacheKey, InflightSender>>,
    capacity: usize,
}

impl CachedLookup {
    pub fn new(inner: Arc<dyn RecordLookup>, capacity: usize) -> Self {
        info!(capacity = capacity, "Record cache created");

        Self {
            inner,
            entries: NonZeroUsize::new(capacity).map(|c| Mutex::new(LruCache::new(c))),
            inflight: Arc::new(DashMap::new()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries
            .as_ref()
            .and_then(|m| m.lock().ok().map(|c| c.len()))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &CacheKey) -> Option<CachedAnswer> {
        let mut cache = self.entries.as_ref()?.lock().ok()?;
        let now = Instant::now();
        match cache.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.answer.clone()),
            Some(_) => {
                cache.pop(key);
                None
            }
            None => None,
        }
    }

    fn insert(&self, key: CacheKey, answer: CachedAnswer, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        if let Some(mut cache) = self.entries.as_ref().and_then(|m| m.lock().ok()) {
            cache.put(
                key,
                CacheEntry {
                    answer,
                    expires_at: Instant::now() + ttl,
                },
            );
        }
    }

    fn register_or_join_inflight(&self, key: &CacheKey) -> (bool, InflightReceiver) {
        match self.inflight.entry(key.clone()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                (false, rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None);
                e.insert(Arc::new(tx));
                (true, rx)
            }
        }
    }

    async fn lookup_as_follower(
        &self,
        domain: &str,
        record_type: RecordType,
        deadline: Instant,
        mut rx: InflightReceiver,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        debug!(domain = %domain, record_type = %record_type, "Joining in-flight lookup");

        match timeout_at(deadline, rx.changed()).await {
            Err(_) => return Err(DomainError::QueryTimeout),
            Ok(_) => {
                let shared = rx.borrow().clone();
                if let Some(answer) = shared {
                    return answer.into_result();
                }
            }
        }

        // The leader failed or was cancelled; failures are not shared.
        self.lookup(domain, record_type, deadline).await
    }

    async fn lookup_as_leader(
        &self,
        domain: &str,
        record_type: RecordType,
        deadline: Instant,
        key: CacheKey,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        debug!(domain = %domain, record_type = %record_type, "Cache MISS");

        let guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inflight),
            key: key.clone(),
        };

        let result = self.inner.lookup(domain, record_type, deadline).await;

        let shared = match &result {
            Ok(records) => {
                let answer = CachedAnswer::Records(Arc::new(records.clone()));
                self.insert(key.clone(), answer.clone(), positive_ttl(records));
                Some(answer)
            }
            Err(DomainError::NxDomain) => {
                self.insert(
                    key.clone(),
                    CachedAnswer::NxDomain,
                    Duration::from_secs(NEGATIVE_TTL_SECS),
                );
                Some(CachedAnswer::NxDomain)
            }
            Err(_) => None,
        };

        if let Some((_, tx)) = self.inflight.remove(&key) {
            let _ = tx.send(shared);
        }

        drop(guard);
        result
    }
}

fn positive_ttl(records: &[ResourceRecord]) -> Duration {
    records
        .iter()
        .map(|r| r.ttl)
        .min()
        .map(|ttl| Duration::from_secs(ttl as u64))
        .unwrap_or(Duration::from_secs(NEGATIVE_TTL_SECS))
}

#[async_trait]
impl RecordLookup for CachedLookup {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
        deadline: Instant,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let key = CacheKey::new(domain, record_type);

        if let Some(answer) = self.get(&key) {
            debug!(domain = %domain, record_type = %record_type, "Cache HIT");
            return answer.into_result();
        }

        let (is_leader, rx) = self.register_or_join_inflight(&key);
        if !is_leader {
            return self.lookup_as_follower(domain, record_type, deadline, rx).await;
        }

        self.lookup_as_leader(domain, record_type, deadline, key).await
    }
}
