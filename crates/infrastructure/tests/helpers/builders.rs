#![allow(dead_code)]
use bytes::Bytes;
use dohgate_application::ports::WireCodec;
use dohgate_domain::{DnsQuery, DnsQuestion, RecordData, RecordType, ResourceRecord};
use dohgate_infrastructure::dns::HickoryWireCodec;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::time::Duration;
use tokio::time::Instant;

pub struct QueryBuilder;

impl QueryBuilder {
    /// A real wire-format query, decoded the way the gateway decodes POST bodies.
    pub fn wire(domain: &str, record_type: RecordType) -> DnsQuery {
        let codec = HickoryWireCodec::new();
        let (_, wire) = codec
            .pack_query(&DnsQuestion::new(domain, record_type))
            .unwrap();
        Self::from_bytes(wire)
    }

    pub fn from_bytes(wire: Bytes) -> DnsQuery {
        let message = HickoryWireCodec::new().unpack(&wire).unwrap();
        let question = message.single_question().unwrap().clone();
        DnsQuery::new(wire, message.id, question.domain, question.record_type)
    }
}

pub struct RecordBuilder;

impl RecordBuilder {
    pub fn a(name: &str, ip: [u8; 4], ttl: u32) -> ResourceRecord {
        ResourceRecord::new(name, ttl, RecordData::A(Ipv4Addr::from(ip)))
    }

    pub fn aaaa(name: &str, ip: Ipv6Addr, ttl: u32) -> ResourceRecord {
        ResourceRecord::new(name, ttl, RecordData::AAAA(ip))
    }

    pub fn cname(name: &str, target: &str, ttl: u32) -> ResourceRecord {
        ResourceRecord::new(name, ttl, RecordData::CNAME(target.into()))
    }

    pub fn txt(name: &str, text: &str, ttl: u32) -> ResourceRecord {
        ResourceRecord::new(name, ttl, RecordData::TXT(vec![text.to_string()]))
    }
}

pub fn deadline_in(millis: u64) -> Instant {
    Instant::now() + Duration::from_millis(millis)
}
