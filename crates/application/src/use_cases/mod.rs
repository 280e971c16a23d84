pub mod doh;

// Re-export use cases
pub use doh::{
    encode_response, DecodeDohRequestUseCase, HandleDohQueryUseCase, ResolutionOutcome,
};
