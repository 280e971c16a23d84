pub mod udp;

use async_trait::async_trait;
use dohgate_domain::DomainError;
use tokio::time::Instant;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    /// The datagram filled the receive buffer and may have been cut short.
    pub truncated: bool,
}

/// One request/response exchange with a DNS server, bounded by `deadline`.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        deadline: Instant,
    ) -> Result<TransportResponse, DomainError>;

    fn server(&self) -> String;
}
