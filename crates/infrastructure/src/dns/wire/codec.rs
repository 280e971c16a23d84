use super::message_builder::MessageBuilder;
use super::record_render::RecordRenderer;
use super::record_type_map::RecordTypeMapper;
use bytes::Bytes;
use dohgate_application::ports::WireCodec;
use dohgate_domain::{DnsQuery, DnsQuestion, DomainError, ResourceRecord, WireMessage};
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use std::sync::Arc;

/// `WireCodec` backed by `hickory-proto`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryWireCodec;

impl HickoryWireCodec {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> Arc<dyn WireCodec> {
        Arc::new(Self)
    }

    fn parse(bytes: &[u8]) -> Result<Message, DomainError> {
        Message::from_vec(bytes)
            .map_err(|e| DomainError::Codec(format!("failed to parse DNS message: {}", e)))
    }

    /// Response skeleton for `query`: same id, same questions, QR and RA set,
    /// RD copied from the request.
    fn response_to(query: &DnsQuery) -> Result<Message, DomainError> {
        let request = Self::parse(&query.wire)?;

        let mut response = Message::new(request.id(), MessageType::Response, OpCode::Query);
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        for question in request.queries() {
            response.add_query(question.clone());
        }
        Ok(response)
    }
}

impl WireCodec for HickoryWireCodec {
    fn unpack(&self, bytes: &[u8]) -> Result<WireMessage, DomainError> {
        let message = Self::parse(bytes)?;

        let questions = message
            .queries()
            .iter()
            .map(|q| {
                let name = q.name().to_ascii();
                let domain = name.strip_suffix('.').unwrap_or(&name);
                DnsQuestion::new(domain, RecordTypeMapper::from_hickory(q.query_type()))
            })
            .collect();

        Ok(WireMessage {
            id: message.id(),
            is_response: message.message_type() == MessageType::Response,
            questions,
            answer_count: message.answers().len(),
        })
    }

    fn pack_query(&self, question: &DnsQuestion) -> Result<(u16, Bytes), DomainError> {
        let (id, bytes) = MessageBuilder::build_query_with_id(&question.domain, question.record_type)?;
        Ok((id, Bytes::from(bytes)))
    }

    fn pack_answer(
        &self,
        query: &DnsQuery,
        answers: &[ResourceRecord],
        nxdomain: bool,
    ) -> Result<Bytes, DomainError> {
        let mut response = Self::response_to(query)?;
        if nxdomain {
            response.set_response_code(ResponseCode::NXDomain);
        }
        for record in answers {
            response.add_answer(RecordRenderer::to_hickory(record)?);
        }

        MessageBuilder::serialize_message(&response).map(Bytes::from)
    }

    fn pack_truncated(&self, query: &DnsQuery) -> Result<Bytes, DomainError> {
        let mut response = Self::response_to(query)?;
        response.set_truncated(true);

        MessageBuilder::serialize_message(&response).map(Bytes::from)
    }
}
