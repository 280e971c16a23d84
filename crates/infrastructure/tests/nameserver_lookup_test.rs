use dohgate_application::ports::RecordLookup;
use dohgate_domain::{DomainError, ErrorKind, RecordData, RecordType};
use dohgate_infrastructure::dns::NameserverLookup;
use std::net::Ipv4Addr;

mod helpers;
use helpers::{closed_udp_port, deadline_in, MockBehavior, MockDnsServer};

#[tokio::test]
async fn test_answers_become_resource_records() {
    let server = MockDnsServer::start(MockBehavior::AnswerA).await.unwrap();
    let lookup = NameserverLookup::new(&[server.addr()]);

    let records = lookup
        .lookup("example.com", RecordType::A, deadline_in(2000))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(&*records[0].name, "example.com");
    assert_eq!(records[0].ttl, 60);
    assert_eq!(records[0].data, RecordData::A(Ipv4Addr::new(93, 184, 216, 34)));
}

#[tokio::test]
async fn test_nxdomain_is_reported_as_such() {
    let server = MockDnsServer::start(MockBehavior::NxDomain).await.unwrap();
    let lookup = NameserverLookup::new(&[server.addr()]);

    let result = lookup
        .lookup("missing.example", RecordType::A, deadline_in(2000))
        .await;

    assert_eq!(result, Err(DomainError::NxDomain));
}

#[tokio::test]
async fn test_servfail_moves_to_next_server() {
    let failing = MockDnsServer::start(MockBehavior::ServFail).await.unwrap();
    let healthy = MockDnsServer::start(MockBehavior::AnswerA).await.unwrap();
    let lookup = NameserverLookup::new(&[failing.addr(), healthy.addr()]);

    let records = lookup
        .lookup("example.com", RecordType::A, deadline_in(2000))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(failing.received().len(), 1);
    assert_eq!(healthy.received().len(), 1);
}

#[tokio::test]
async fn test_all_servers_failing_reports_last_error() {
    let failing = MockDnsServer::start(MockBehavior::ServFail).await.unwrap();
    let lookup = NameserverLookup::new(&[failing.addr()]);

    let err = lookup
        .lookup("example.com", RecordType::A, deadline_in(2000))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
}

#[tokio::test]
async fn test_refusing_server_is_skipped() {
    let closed = closed_udp_port().await;
    let healthy = MockDnsServer::start(MockBehavior::AnswerA).await.unwrap();
    let lookup = NameserverLookup::new(&[closed, healthy.addr()]);

    let records = lookup
        .lookup("example.com", RecordType::A, deadline_in(2000))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_no_nameservers_is_upstream_error() {
    let lookup = NameserverLookup::new(&[]);

    let err = lookup
        .lookup("example.com", RecordType::A, deadline_in(500))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Upstream);
}
