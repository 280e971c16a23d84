use bytes::Bytes;
use std::fmt;

/// Media type for DNS wire-format bodies, both directions.
pub const DNS_UDPWIREFORMAT: &str = "application/dns-udpwireformat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DohMethod {
    Get,
    Post,
    Other(String),
}

impl DohMethod {
    pub fn parse(method: &str) -> Self {
        match method {
            "GET" => DohMethod::Get,
            "POST" => DohMethod::Post,
            other => DohMethod::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DohMethod::Get => "GET",
            DohMethod::Post => "POST",
            DohMethod::Other(method) => method,
        }
    }
}

impl fmt::Display for DohMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-neutral view of an inbound DoH request.
#[derive(Debug, Clone)]
pub struct DohRequest {
    pub method: DohMethod,
    /// Value of the `dns` query parameter, if present.
    pub dns_param: Option<String>,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl DohRequest {
    pub fn get(dns_param: Option<String>) -> Self {
        Self {
            method: DohMethod::Get,
            dns_param,
            content_type: None,
            body: Bytes::new(),
        }
    }

    pub fn post(content_type: Option<String>, body: impl Into<Bytes>) -> Self {
        Self {
            method: DohMethod::Post,
            dns_param: None,
            content_type,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DohResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Bytes,
}

impl DohResponse {
    pub fn ok(body: Bytes) -> Self {
        Self {
            status: 200,
            content_type: Some(DNS_UDPWIREFORMAT),
            body,
        }
    }

    pub fn failure(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Bytes::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
