#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use dohgate_application::ports::{DnsResolver, WireCodec};
use dohgate_domain::{
    DnsQuery, DnsQuestion, DomainError, RecordType, ResourceRecord, WireMessage,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Codec double: knows a fixed set of byte strings and what they decode to.
#[derive(Default)]
pub struct FakeWireCodec {
    messages: Mutex<HashMap<Vec<u8>, WireMessage>>,
}

impl FakeWireCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, bytes: &[u8], id: u16, questions: Vec<(&str, RecordType)>) {
        let message = WireMessage {
            id,
            is_response: false,
            questions: questions
                .into_iter()
                .map(|(name, rt)| DnsQuestion::new(name, rt))
                .collect(),
            answer_count: 0,
        };
        self.messages
            .lock()
            .unwrap()
            .insert(bytes.to_vec(), message);
    }
}

impl WireCodec for FakeWireCodec {
    fn unpack(&self, bytes: &[u8]) -> Result<WireMessage, DomainError> {
        self.messages
            .lock()
            .unwrap()
            .get(bytes)
            .cloned()
            .ok_or_else(|| DomainError::Codec("unknown message".to_string()))
    }

    fn pack_query(&self, question: &DnsQuestion) -> Result<(u16, Bytes), DomainError> {
        if question.domain.contains(' ') {
            return Err(DomainError::Codec("bad label".to_string()));
        }
        let wire = format!("q:{}:{}", question.domain, question.record_type);
        self.register(wire.as_bytes(), 0x1234, vec![(&*question.domain, question.record_type)]);
        Ok((0x1234, Bytes::from(wire)))
    }

    fn pack_answer(
        &self,
        query: &DnsQuery,
        answers: &[ResourceRecord],
        nxdomain: bool,
    ) -> Result<Bytes, DomainError> {
        Ok(Bytes::from(format!(
            "a:{}:{}:{}",
            query.domain,
            answers.len(),
            nxdomain
        )))
    }

    fn pack_truncated(&self, query: &DnsQuery) -> Result<Bytes, DomainError> {
        Ok(Bytes::from(format!("tc:{}", query.domain)))
    }
}

/// Resolver double that records the queries and deadlines it sees.
pub struct MockDnsResolver {
    result: Mutex<Result<Bytes, DomainError>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(DnsQuery, Instant)>>,
}

impl MockDnsResolver {
    pub fn returning(bytes: &'static [u8]) -> Self {
        Self {
            result: Mutex::new(Ok(Bytes::from_static(bytes))),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            result: Mutex::new(Err(error)),
            delay: None,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<(DnsQuery, Instant)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery, deadline: Instant) -> Result<Bytes, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((query.clone(), deadline));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.result.lock().unwrap().clone()
    }

    fn strategy_name(&self) -> &'static str {
        "mock"
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
