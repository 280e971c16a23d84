use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How the `dns` parameter of a GET request is interpreted.
///
/// Chosen once per process; the two forms are not interchangeable.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GetPayloadFormat {
    /// base64url of a complete wire-format query (RFC 8484).
    #[default]
    Wire,

    /// base64url of a bare host name, queried as type A.
    Hostname,
}

impl GetPayloadFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wire => "wire",
            Self::Hostname => "hostname",
        }
    }
}

impl fmt::Display for GetPayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GetPayloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wire" => Ok(Self::Wire),
            "hostname" => Ok(Self::Hostname),
            _ => Err(format!(
                "Invalid GET payload format '{}'. Expected 'wire' or 'hostname'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    /// Upstream DNS server (`IP:PORT` or `HOST:PORT`). When set, queries
    /// are forwarded verbatim; otherwise the internal resolver is used.
    #[serde(default)]
    pub upstream: Option<String>,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub get_payload: GetPayloadFormat,

    /// Recursive nameservers used by the internal resolver.
    #[serde(default = "default_nameservers")]
    pub nameservers: Vec<String>,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            upstream: None,
            query_timeout_ms: default_query_timeout_ms(),
            cache_capacity: default_cache_capacity(),
            verbose: false,
            get_payload: GetPayloadFormat::default(),
            nameservers: default_nameservers(),
        }
    }
}

fn default_query_timeout_ms() -> u64 {
    2500
}

fn default_cache_capacity() -> usize {
    1_000_000
}

fn default_nameservers() -> Vec<String> {
    vec!["1.1.1.1:53".to_string(), "8.8.8.8:53".to_string()]
}
