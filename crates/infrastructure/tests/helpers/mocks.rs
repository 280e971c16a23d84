#![allow(dead_code)]
use async_trait::async_trait;
use dohgate_application::ports::RecordLookup;
use dohgate_domain::{DomainError, RecordType, ResourceRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Call-counting stand-in for the recursive resolver.
pub struct MockRecordLookup {
    answers: Mutex<HashMap<(String, RecordType), Result<Vec<ResourceRecord>, DomainError>>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl MockRecordLookup {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn answer(self, domain: &str, record_type: RecordType, records: Vec<ResourceRecord>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert((domain.to_string(), record_type), Ok(records));
        self
    }

    pub fn fail(self, domain: &str, record_type: RecordType, error: DomainError) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert((domain.to_string(), record_type), Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordLookup for MockRecordLookup {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
        _deadline: Instant,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answers
            .lock()
            .unwrap()
            .get(&(domain.to_string(), record_type))
            .cloned()
            .unwrap_or(Err(DomainError::NxDomain))
    }
}
