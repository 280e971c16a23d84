mod dns;

pub use dns::DohServices;
