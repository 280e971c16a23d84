pub mod doh;

pub use doh::{get_dns_query, post_dns_query, unsupported_method};
