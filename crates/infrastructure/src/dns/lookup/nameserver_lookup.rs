use crate::dns::transport::{DnsTransport, UdpTransport};
use crate::dns::wire::{MessageBuilder, RecordRenderer};
use async_trait::async_trait;
use dohgate_application::ports::RecordLookup;
use dohgate_domain::{DomainError, RecordType, ResourceRecord};
use hickory_proto::op::{Message, ResponseCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Stub lookup against a list of recursive nameservers, tried in order.
///
/// NXDOMAIN from any server is final. Transport failures, mismatched ids and
/// error RCODEs move on to the next server.
pub struct NameserverLookup {
    servers: Vec<Arc<dyn DnsTransport>>,
}

impl NameserverLookup {
    pub fn new(nameservers: &[SocketAddr]) -> Self {
        info!(nameservers = ?nameservers, "Nameserver lookup created");
        Self::with_transports(
            nameservers
                .iter()
                .map(|addr| Arc::new(UdpTransport::new(*addr)) as Arc<dyn DnsTransport>)
                .collect(),
        )
    }

    pub fn with_transports(servers: Vec<Arc<dyn DnsTransport>>) -> Self {
        Self { servers }
    }

    async fn query_server(
        transport: &dyn DnsTransport,
        domain: &str,
        record_type: RecordType,
        deadline: Instant,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let (id, bytes) = MessageBuilder::build_query_with_id(domain, record_type)?;
        let response = transport.send(&bytes, deadline).await?;

        let message = Message::from_vec(&response.bytes).map_err(|e| {
            DomainError::Upstream(format!(
                "unparseable response from {}: {}",
                transport.server(),
                e
            ))
        })?;

        if message.id() != id {
            return Err(DomainError::Upstream(format!(
                "response id {} from {} does not match query id {}",
                message.id(),
                transport.server(),
                id
            )));
        }

        match message.response_code() {
            ResponseCode::NoError => {}
            ResponseCode::NXDomain => return Err(DomainError::NxDomain),
            other => {
                return Err(DomainError::Upstream(format!(
                    "{} answered {}",
                    transport.server(),
                    other
                )))
            }
        }

        if message.truncated() {
            debug!(domain = %domain, server = %transport.server(), "Truncated answer, using what arrived");
        }

        Ok(message
            .answers()
            .iter()
            .filter_map(RecordRenderer::from_hickory)
            .collect())
    }
}

#[async_trait]
impl RecordLookup for NameserverLookup {
    async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
        deadline: Instant,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let mut last_error = DomainError::Upstream("no nameservers configured".to_string());

        for (position, transport) in self.servers.iter().enumerate() {
            if Instant::now() >= deadline {
                return Err(DomainError::QueryTimeout);
            }

            match Self::query_server(transport.as_ref(), domain, record_type, deadline).await {
                Ok(records) => {
                    debug!(
                        domain = %domain,
                        record_type = %record_type,
                        server = %transport.server(),
                        answers = records.len(),
                        "Nameserver answered"
                    );
                    return Ok(records);
                }
                Err(DomainError::NxDomain) => return Err(DomainError::NxDomain),
                Err(e) => {
                    warn!(
                        server = %transport.server(),
                        error = %e,
                        position = position,
                        "Nameserver failed, trying next"
                    );
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
