pub mod lambda;
pub mod web;

pub use lambda::{lambda_runtime_api, run_lambda_runtime};
pub use web::start_web_server;
