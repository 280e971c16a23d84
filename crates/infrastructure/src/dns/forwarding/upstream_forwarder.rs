use crate::dns::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use dohgate_application::ports::{DnsResolver, WireCodec};
use dohgate_domain::{DnsQuery, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Transparent proxy to a single upstream server.
///
/// The query bytes are forwarded untouched (header flags, EDNS0 options and
/// all) and the upstream's datagram is returned as-is.
pub struct UpstreamForwarder {
    transport: Arc<dyn DnsTransport>,
    codec: Arc<dyn WireCodec>,
}

impl UpstreamForwarder {
    pub fn new(upstream: SocketAddr, codec: Arc<dyn WireCodec>) -> Self {
        info!(upstream = %upstream, "Upstream forwarder created");
        Self::with_transport(Arc::new(UdpTransport::new(upstream)), codec)
    }

    pub fn with_transport(transport: Arc<dyn DnsTransport>, codec: Arc<dyn WireCodec>) -> Self {
        Self { transport, codec }
    }
}

#[async_trait]
impl DnsResolver for UpstreamForwarder {
    async fn resolve(&self, query: &DnsQuery, deadline: Instant) -> Result<Bytes, DomainError> {
        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            upstream = %self.transport.server(),
            "Forwarding query upstream"
        );

        let response = self.transport.send(&query.wire, deadline).await?;

        if response.truncated {
            warn!(
                domain = %query.domain,
                upstream = %self.transport.server(),
                bytes = response.bytes.len(),
                "Upstream response filled the receive buffer, answering with TC set"
            );
            return self.codec.pack_truncated(query);
        }

        Ok(Bytes::from(response.bytes))
    }

    fn strategy_name(&self) -> &'static str {
        "upstream"
    }
}
