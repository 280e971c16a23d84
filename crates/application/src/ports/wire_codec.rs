use bytes::Bytes;
use dohgate_domain::{DnsQuery, DnsQuestion, DomainError, ResourceRecord, WireMessage};

/// DNS wire-format encoding and decoding.
///
/// Every failure is reported as `DomainError::Codec`.
pub trait WireCodec: Send + Sync {
    fn unpack(&self, bytes: &[u8]) -> Result<WireMessage, DomainError>;

    /// Build a recursive query for `question`, returning its id and bytes.
    fn pack_query(&self, question: &DnsQuestion) -> Result<(u16, Bytes), DomainError>;

    /// Build the response to `query` whose answer section holds `answers`
    /// in the given order. `nxdomain` sets RCODE=NXDOMAIN.
    fn pack_answer(
        &self,
        query: &DnsQuery,
        answers: &[ResourceRecord],
        nxdomain: bool,
    ) -> Result<Bytes, DomainError>;

    /// Build an empty response to `query` with the TC bit set.
    fn pack_truncated(&self, query: &DnsQuery) -> Result<Bytes, DomainError>;
}
