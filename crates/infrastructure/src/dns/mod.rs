pub mod cache;
pub mod forwarding;
pub mod lookup;
pub mod resolver;
pub mod transport;
pub mod wire;

pub use cache::CachedLookup;
pub use forwarding::UpstreamForwarder;
pub use lookup::NameserverLookup;
pub use resolver::CachingResolver;
pub use transport::{DnsTransport, TransportResponse, UdpTransport};
pub use wire::HickoryWireCodec;
