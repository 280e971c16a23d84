#![allow(dead_code)]

mod builders;
mod dns_server_mock;
mod mocks;

pub use builders::*;
pub use dns_server_mock::*;
pub use mocks::*;
