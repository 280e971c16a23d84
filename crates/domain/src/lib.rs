//! Dohgate Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_query;
pub mod dns_record;
pub mod doh;
pub mod errors;
pub mod upstream_addr;

pub use config::{
    parse_duration, CliOverrides, Config, ConfigError, GatewayConfig, GetPayloadFormat,
    LoggingConfig, ServerConfig,
};
pub use dns_message::{DnsQuestion, WireMessage};
pub use dns_query::DnsQuery;
pub use dns_record::{RecordData, RecordType, ResourceRecord};
pub use doh::{DohMethod, DohRequest, DohResponse, DNS_UDPWIREFORMAT};
pub use errors::{DomainError, ErrorKind};
pub use upstream_addr::UpstreamAddr;
