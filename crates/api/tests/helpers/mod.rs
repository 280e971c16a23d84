#![allow(dead_code)]

use async_trait::async_trait;
use dohgate_application::ports::{RecordLookup, WireCodec};
use dohgate_application::use_cases::{DecodeDohRequestUseCase, HandleDohQueryUseCase};
use dohgate_domain::{DomainError, GetPayloadFormat, RecordData, RecordType, ResourceRecord};
use dohgate_infrastructure::dns::{CachedLookup, CachingResolver, HickoryWireCodec};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Knows example.com/A and xn--bcher-kva.example/A; everything else does
/// not exist.
pub struct ExampleLookup {
    pub calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl ExampleLookup {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordLookup for ExampleLookup {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
        _deadline: Instant,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(domain.to_string());
        match (domain, record_type) {
            ("xn--bcher-kva.example", RecordType::A) => Ok(vec![ResourceRecord::new(
                "xn--bcher-kva.example",
                300,
                RecordData::A(Ipv4Addr::new(192, 0, 2, 7)),
            )]),
            ("example.com", RecordType::A) => Ok(vec![ResourceRecord::new(
                "example.com",
                300,
                RecordData::A(Ipv4Addr::new(93, 184, 216, 34)),
            )]),
            ("example.com", _) => Ok(vec![]),
            _ => Err(DomainError::NxDomain),
        }
    }
}

pub fn internal_handler(
    lookup: Arc<ExampleLookup>,
    get_payload: GetPayloadFormat,
) -> Arc<HandleDohQueryUseCase> {
    let codec: Arc<dyn WireCodec> = HickoryWireCodec::shared();
    let cached = Arc::new(CachedLookup::new(lookup, 1000));
    let resolver = Arc::new(CachingResolver::new(cached, codec.clone()));
    let decoder = Arc::new(DecodeDohRequestUseCase::new(codec, get_payload));
    Arc::new(HandleDohQueryUseCase::new(
        decoder,
        resolver,
        Duration::from_millis(2500),
    ))
}

pub fn wire_query(domain: &str, record_type: RecordType) -> Vec<u8> {
    let (_, bytes) = HickoryWireCodec::new()
        .pack_query(&dohgate_domain::DnsQuestion::new(domain, record_type))
        .unwrap();
    bytes.to_vec()
}
