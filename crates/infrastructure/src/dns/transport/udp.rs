//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). A fresh socket is bound and
//! connected for every exchange and closed when the exchange ends or its
//! future is dropped.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dohgate_domain::DomainError;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn timed_out(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    fn io_failure(&self, stage: &str, e: io::Error) -> DomainError {
        match e.kind() {
            io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::HostUnreachable
            | io::ErrorKind::NetworkUnreachable => DomainError::UpstreamUnreachable {
                server: self.server_addr.to_string(),
            },
            _ => DomainError::TransportFailure {
                server: self.server_addr.to_string(),
                reason: format!("{}: {}", stage, e),
            },
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        deadline: Instant,
    ) -> Result<TransportResponse, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = timeout_at(deadline, UdpSocket::bind(bind_addr))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| self.io_failure("bind", e))?;

        timeout_at(deadline, socket.connect(self.server_addr))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| self.io_failure("connect", e))?;

        let bytes_sent = timeout_at(deadline, socket.send(message_bytes))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| self.io_failure("send", e))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = timeout_at(deadline, socket.recv(&mut recv_buf))
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| self.io_failure("recv", e))?;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            truncated: bytes_received == MAX_UDP_RESPONSE_SIZE,
        })
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}
