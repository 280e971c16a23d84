use crate::ports::WireCodec;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bytes::Bytes;
use dohgate_domain::{
    DnsQuery, DnsQuestion, DohMethod, DohRequest, DomainError, GetPayloadFormat, RecordType,
    DNS_UDPWIREFORMAT,
};
use std::sync::Arc;

/// Turns an inbound DoH request into a validated single-question query.
pub struct DecodeDohRequestUseCase {
    codec: Arc<dyn WireCodec>,
    get_payload: GetPayloadFormat,
}

impl DecodeDohRequestUseCase {
    pub fn new(codec: Arc<dyn WireCodec>, get_payload: GetPayloadFormat) -> Self {
        Self { codec, get_payload }
    }

    pub fn execute(&self, request: &DohRequest) -> Result<DnsQuery, DomainError> {
        match &request.method {
            DohMethod::Get => self.decode_get(request.dns_param.as_deref()),
            DohMethod::Post => self.decode_post(request.content_type.as_deref(), &request.body),
            DohMethod::Other(method) => Err(DomainError::InvalidRequest(format!(
                "unsupported method {}",
                method
            ))),
        }
    }

    pub fn decode_get(&self, param: Option<&str>) -> Result<DnsQuery, DomainError> {
        let encoded = match param {
            Some(p) if !p.is_empty() => p,
            _ => {
                return Err(DomainError::InvalidRequest(
                    "missing dns query parameter in GET request".to_string(),
                ))
            }
        };

        let decoded = URL_SAFE_NO_PAD.decode(encoded).map_err(|e| {
            DomainError::InvalidRequest(format!("dns parameter is not base64url: {}", e))
        })?;

        match self.get_payload {
            GetPayloadFormat::Wire => self.unpack_single_question(Bytes::from(decoded)),
            GetPayloadFormat::Hostname => self.query_for_hostname(decoded),
        }
    }

    pub fn decode_post(
        &self,
        content_type: Option<&str>,
        body: &Bytes,
    ) -> Result<DnsQuery, DomainError> {
        if content_type != Some(DNS_UDPWIREFORMAT) {
            return Err(DomainError::UnsupportedMediaType(format!(
                "expected {}, got {}",
                DNS_UDPWIREFORMAT,
                content_type.unwrap_or("none")
            )));
        }

        self.unpack_single_question(body.clone())
    }

    fn unpack_single_question(&self, wire: Bytes) -> Result<DnsQuery, DomainError> {
        let message = self
            .codec
            .unpack(&wire)
            .map_err(|e| DomainError::InvalidRequest(format!("malformed DNS message: {}", e)))?;

        let question = message.single_question().ok_or_else(|| {
            DomainError::InvalidRequest(format!(
                "DoH only supports single queries, got {} questions",
                message.questions.len()
            ))
        })?;

        Ok(DnsQuery::new(
            wire,
            message.id,
            question.domain.clone(),
            question.record_type,
        ))
    }

    fn query_for_hostname(&self, decoded: Vec<u8>) -> Result<DnsQuery, DomainError> {
        let name = String::from_utf8(decoded).map_err(|_| {
            DomainError::InvalidRequest("dns parameter is not a valid host name".to_string())
        })?;
        let name = name.trim_end_matches('.');
        if name.is_empty() {
            return Err(DomainError::InvalidRequest(
                "dns parameter holds an empty host name".to_string(),
            ));
        }

        let (_, wire) = self
            .codec
            .pack_query(&DnsQuestion::new(name, RecordType::A))
            .map_err(|e| DomainError::InvalidRequest(format!("invalid host name: {}", e)))?;

        // Read the name back so it matches what goes on the wire.
        self.unpack_single_question(wire)
    }
}
