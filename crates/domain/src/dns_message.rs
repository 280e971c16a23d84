use super::RecordType;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuestion {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuestion {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }
}

/// The parts of an unpacked wire message the gateway cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    pub id: u16,
    pub is_response: bool,
    pub questions: Vec<DnsQuestion>,
    pub answer_count: usize,
}

impl WireMessage {
    /// Returns the question when the message carries exactly one.
    pub fn single_question(&self) -> Option<&DnsQuestion> {
        match self.questions.as_slice() {
            [question] => Some(question),
            _ => None,
        }
    }
}
