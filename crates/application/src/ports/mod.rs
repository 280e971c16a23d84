mod dns_resolver;
mod record_lookup;
mod wire_codec;

pub use dns_resolver::DnsResolver;
pub use record_lookup::RecordLookup;
pub use wire_codec::WireCodec;

// Re-export for convenience
pub use dohgate_domain::DnsQuery;
