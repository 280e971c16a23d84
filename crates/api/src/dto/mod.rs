pub mod doh;

pub use doh::DohQueryParams;
