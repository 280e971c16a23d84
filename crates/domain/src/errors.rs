use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout talking to {server}")]
    TransportTimeout { server: String },

    #[error("Upstream {server} is unreachable")]
    UpstreamUnreachable { server: String },

    #[error("Transport failure talking to {server}: {reason}")]
    TransportFailure { server: String, reason: String },

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("Resolver error: {0}")]
    Upstream(String),

    #[error("DNS codec error: {0}")]
    Codec(String),
}

/// Failure classes surfaced to HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    UnsupportedMediaType,
    Timeout,
    Transport,
    Upstream,
    Codec,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidRequest(_) => ErrorKind::Validation,
            DomainError::UnsupportedMediaType(_) => ErrorKind::UnsupportedMediaType,
            // Refused and silent upstreams both surface as 408.
            DomainError::QueryTimeout
            | DomainError::TransportTimeout { .. }
            | DomainError::UpstreamUnreachable { .. } => ErrorKind::Timeout,
            DomainError::TransportFailure { .. } => ErrorKind::Transport,
            // NXDOMAIN only reaches this point if a strategy forgot to absorb it.
            DomainError::NxDomain | DomainError::Upstream(_) => ErrorKind::Upstream,
            DomainError::Codec(_) => ErrorKind::Codec,
        }
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::UnsupportedMediaType => "unsupported_media_type",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Transport => "transport",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Codec => "codec",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::UnsupportedMediaType => 415,
            ErrorKind::Timeout => 408,
            ErrorKind::Transport | ErrorKind::Upstream | ErrorKind::Codec => 500,
        }
    }

    /// Failures caused by the client rather than by resolution.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::Validation | ErrorKind::UnsupportedMediaType
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
