pub mod nameserver_lookup;

pub use nameserver_lookup::NameserverLookup;
