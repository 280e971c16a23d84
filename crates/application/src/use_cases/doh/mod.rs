mod decode_request;
mod encode_response;
mod handle_doh_query;

pub use decode_request::DecodeDohRequestUseCase;
pub use encode_response::{encode_response, ResolutionOutcome};
pub use handle_doh_query::HandleDohQueryUseCase;
