use bytes::Bytes;
use dohgate_domain::{DohResponse, DomainError, ErrorKind};
use std::time::Duration;

/// Result of running a resolution strategy for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Success {
        wire_bytes: Bytes,
        elapsed: Duration,
    },
    Failure {
        kind: ErrorKind,
        elapsed: Duration,
        detail: String,
    },
}

impl ResolutionOutcome {
    pub fn from_result(result: Result<Bytes, DomainError>, elapsed: Duration) -> Self {
        match result {
            Ok(wire_bytes) => Self::Success {
                wire_bytes,
                elapsed,
            },
            Err(e) => Self::Failure {
                kind: e.kind(),
                elapsed,
                detail: e.to_string(),
            },
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Success { elapsed, .. } | Self::Failure { elapsed, .. } => *elapsed,
        }
    }
}

/// Wire bytes become the body on success; failures carry no body.
pub fn encode_response(outcome: ResolutionOutcome) -> DohResponse {
    match outcome {
        ResolutionOutcome::Success { wire_bytes, .. } => DohResponse::ok(wire_bytes),
        ResolutionOutcome::Failure { kind, .. } => DohResponse::failure(kind.http_status()),
    }
}
